//! Detection sweep and track fusion.
//!
//! Detection is signal intercept: an observer detects another object when
//! any of that object's sensors covers the observer's position. Detections
//! are exact copies of the source state.

use glam::DVec2;
use hecs::{Entity, World};

use skirmish_control::TrackFusion;
use skirmish_core::components::{Detection, Kinematics, ObjectId, Player, Sensor, SensorSuite};
use skirmish_core::config::TrackTuning;
use skirmish_core::enums::Faction;
use skirmish_core::events::StatusEvent;

struct Emitter {
    entity: Entity,
    detection: Detection,
    sensors: Vec<Sensor>,
}

/// Run detection and fusion for every observer.
pub fn run(
    world: &mut World,
    frame_offset: DVec2,
    tuning: &TrackTuning,
    events: &mut Vec<StatusEvent>,
) {
    let emitters: Vec<Emitter> = world
        .query_mut::<(&ObjectId, &Faction, &Kinematics, &SensorSuite)>()
        .into_iter()
        .map(|(entity, (id, faction, kin, suite))| Emitter {
            entity,
            detection: Detection {
                object_id: id.0,
                position: kin.position,
                velocity: kin.velocity,
                faction: *faction,
            },
            sensors: suite.sensors.clone(),
        })
        .collect();

    for (entity, (id, kin, fusion, player)) in world.query_mut::<(
        &ObjectId,
        &Kinematics,
        &mut TrackFusion,
        Option<&Player>,
    )>() {
        let detections = detect(entity, kin.position, &emitters);
        let report = fusion.process(&detections, frame_offset, tuning);

        if player.is_none() {
            continue;
        }
        for track_id in report.gained {
            log::info!("player {}: new contact {track_id}", id.0);
            events.push(StatusEvent::ContactGained {
                object_id: id.0,
                track_id,
            });
        }
        for track_id in report.lost {
            log::info!("player {}: contact {track_id} lost", id.0);
            events.push(StatusEvent::ContactLost {
                object_id: id.0,
                track_id,
            });
        }
    }
}

fn detect(observer: Entity, position: DVec2, emitters: &[Emitter]) -> Vec<Detection> {
    emitters
        .iter()
        .filter(|e| e.entity != observer)
        .filter(|e| e.sensors.iter().any(|s| s.covers(position)))
        .map(|e| e.detection)
        .collect()
}
