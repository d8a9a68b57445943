//! Missile guidance system.
//!
//! Picks a target from each missile's own tracks and, when the bearing
//! error is outside the deadband, asks the missile's rotation controller
//! to turn onto it. A busy controller simply keeps its current turn.

use hecs::World;

use skirmish_control::guidance::{self, GuidanceContext};
use skirmish_control::rotation::half_turn;
use skirmish_control::{RotationController, TrackFusion};
use skirmish_core::components::{Kinematics, ObjectClass, ObjectId};
use skirmish_core::config::MissileTuning;
use skirmish_core::enums::Faction;

pub fn run(world: &mut World, tuning: &MissileTuning) {
    for (_entity, (id, faction, kin, controller, fusion, class)) in world.query_mut::<(
        &ObjectId,
        &Faction,
        &Kinematics,
        &mut RotationController,
        &TrackFusion,
        &mut ObjectClass,
    )>() {
        let ObjectClass::Missile(missile) = class else {
            continue;
        };

        let update = guidance::evaluate(
            &GuidanceContext {
                position: kin.position,
                bearing: kin.bearing,
                deadband: tuning.deadband,
                friendly: Some(*faction),
            },
            fusion,
        );
        if update.target != missile.target_track {
            log::debug!(
                "missile {} target {:?} -> {:?}",
                id.0,
                missile.target_track,
                update.target
            );
        }
        missile.target_track = update.target;
        missile.seeker = update.seeker;

        if let Some(delta) = update.steer {
            let accel = missile.max_rot_accel;
            if let Err(e) = controller.command_new_bearing(kin.bearing, half_turn(delta), accel, accel)
            {
                log::trace!("missile {} steer deferred: {e}", id.0);
            }
        }
    }
}
