//! Propulsion system: rotation controllers, hull engines and missile motors.
//!
//! Sets each object's linear and rotational acceleration for this tick.
//! Ships turn their controller's demand into rotate thrust flags so the
//! hull's own thrusters produce the torque. Missiles apply the demand
//! directly.

use glam::DVec2;
use hecs::World;

use skirmish_control::rotation::{RotationContext, RotationEvent};
use skirmish_control::RotationController;
use skirmish_core::components::{Kinematics, ObjectClass, ObjectId};
use skirmish_core::config::RotationTuning;
use skirmish_core::events::StatusEvent;
use skirmish_hull::ShipConfiguration;

/// Run propulsion for all objects.
pub fn run(world: &mut World, tuning: &RotationTuning, events: &mut Vec<StatusEvent>) {
    for (_entity, (id, kin, controller, class, hull)) in world.query_mut::<(
        &ObjectId,
        &mut Kinematics,
        &mut RotationController,
        &mut ObjectClass,
        Option<&mut ShipConfiguration>,
    )>() {
        let out = controller.update(
            &RotationContext {
                bearing: kin.bearing,
                rot_velocity: kin.rot_velocity,
            },
            tuning,
        );
        kin.rot_velocity = out.rot_velocity;
        if let Some(event) = out.event {
            events.push(match event {
                RotationEvent::HalfRotationComplete => {
                    StatusEvent::HalfRotationComplete { object_id: id.0 }
                }
                RotationEvent::RotateCommandComplete => {
                    StatusEvent::RotateCommandComplete { object_id: id.0 }
                }
            });
        }

        match class {
            ObjectClass::Ship(controls) => {
                let Some(hull) = hull else {
                    kin.acceleration = DVec2::ZERO;
                    kin.rot_acceleration = out.demand;
                    continue;
                };
                let mut flags = controls.thrust;
                flags.rotate_right = out.demand > 0.0;
                flags.rotate_left = out.demand < 0.0;
                let output = hull.update_engines(&flags);
                kin.acceleration = output.world_acceleration(kin.bearing.radians());
                kin.rot_acceleration = output.rotational;
            }
            ObjectClass::Missile(missile) => {
                kin.rot_acceleration = out.demand;
                kin.acceleration = if kin.velocity.length() < missile.max_speed {
                    kin.bearing.unit_vector() * missile.thrust_accel
                } else {
                    DVec2::ZERO
                };
            }
        }
    }
}
