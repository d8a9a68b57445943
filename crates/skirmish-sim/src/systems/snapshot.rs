//! Snapshot system: queries the ECS world and builds a complete WorldSnapshot.
//!
//! Read-only: it never modifies the world.

use hecs::World;

use skirmish_control::fusion::track_alpha;
use skirmish_control::{RotationController, TrackFusion};
use skirmish_core::components::*;
use skirmish_core::config::Tuning;
use skirmish_core::enums::*;
use skirmish_core::events::StatusEvent;
use skirmish_core::state::*;
use skirmish_core::types::SimTime;
use skirmish_hull::ShipConfiguration;

/// Build a complete WorldSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    paused: bool,
    time_scale: f64,
    tuning: &Tuning,
    events: Vec<StatusEvent>,
) -> WorldSnapshot {
    WorldSnapshot {
        time: *time,
        paused,
        time_scale,
        objects: build_objects(world),
        hull: build_hull(world),
        tracks: build_tracks(world, tuning.tracks.max_lifetime),
        events,
    }
}

fn build_objects(world: &World) -> Vec<ObjectView> {
    let mut objects: Vec<ObjectView> = world
        .query::<(
            &ObjectId,
            &Faction,
            &Kinematics,
            &ObjectClass,
            &RotationController,
        )>()
        .iter()
        .map(|(_, (id, faction, kin, class, controller))| ObjectView {
            id: id.0,
            faction: *faction,
            kind: class.kind(),
            position: kin.position,
            velocity: kin.velocity,
            acceleration: kin.acceleration,
            bearing: kin.bearing.radians(),
            rot_velocity: kin.rot_velocity,
            rotation: controller.phase(),
            seeker: match class {
                ObjectClass::Missile(m) => Some(m.seeker),
                ObjectClass::Ship(_) => None,
            },
        })
        .collect();
    objects.sort_by_key(|o| o.id);
    objects
}

fn build_hull(world: &World) -> Option<HullView> {
    world
        .query::<(&Player, &Kinematics, &ShipConfiguration)>()
        .iter()
        .next()
        .map(|(_, (_, kin, hull))| hull.view(kin.position, kin.bearing.radians()))
}

/// The player's tracks in object id order.
fn build_tracks(world: &World, max_lifetime: u32) -> Vec<TrackView> {
    let mut query = world.query::<(&Player, &TrackFusion)>();
    let Some((_, (_, fusion))) = query.iter().next() else {
        return Vec::new();
    };
    fusion
        .tracks()
        .map(|t| TrackView {
            object_id: t.object_id,
            position: t.position,
            velocity: t.velocity,
            perceived_faction: t.perceived_faction,
            is_current: t.is_current,
            lifetime: t.lifetime,
            highlight: t.highlight,
            colour: t.perceived_faction.display_colour(),
            alpha: track_alpha(t, max_lifetime),
        })
        .collect()
}
