//! Cleanup system: removes objects that have left the world.

use glam::DVec2;
use hecs::{Entity, World};

use skirmish_core::components::{Kinematics, ObjectId, Player};

/// Despawn every non-player object farther than `world_radius` from the player.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, world_radius: f64, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    let centre = world
        .query_mut::<(&Player, &Kinematics)>()
        .into_iter()
        .next()
        .map(|(_, (_, kin))| kin.position)
        .unwrap_or(DVec2::ZERO);
    let radius_sq = world_radius * world_radius;

    for (entity, (id, kin, player)) in
        world.query_mut::<(&ObjectId, &Kinematics, Option<&Player>)>()
    {
        if player.is_none() && kin.position.distance_squared(centre) > radius_sq {
            log::debug!("object {} left the world", id.0);
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
