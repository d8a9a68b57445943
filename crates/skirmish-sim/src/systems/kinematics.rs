//! Kinematic integration in the player-relative frame.
//!
//! The player stays put; every other object moves by its own velocity
//! minus the player's. Velocities are integrated before positions.

use glam::DVec2;
use hecs::World;

use skirmish_core::components::{Kinematics, Player};

/// Integrate every object one tick. Returns the world-frame offset applied
/// to all positions (`-v_player * dt`, zero without a player).
pub fn run(world: &mut World, dt: f64) -> DVec2 {
    for (_entity, kin) in world.query_mut::<&mut Kinematics>() {
        kin.velocity += kin.acceleration * dt;
        kin.rot_velocity += kin.rot_acceleration * dt;
        kin.bearing += kin.rot_velocity * dt;
    }

    let offset = world
        .query_mut::<(&Player, &Kinematics)>()
        .into_iter()
        .next()
        .map(|(_, (_, kin))| -kin.velocity * dt)
        .unwrap_or(DVec2::ZERO);

    for (_entity, kin) in world.query_mut::<&mut Kinematics>() {
        kin.position += kin.velocity * dt + offset;
    }
    offset
}
