//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the player ship and hostile missiles with their component
//! bundles.

use std::f64::consts::{FRAC_PI_2, TAU};

use glam::DVec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_control::{RotationController, TrackFusion};
use skirmish_core::components::*;
use skirmish_core::config::{ScenarioConfig, SensorTuning, Tuning};
use skirmish_core::enums::*;
use skirmish_core::error::SimError;
use skirmish_core::types::GridCoord;
use skirmish_core::Bearing;
use skirmish_hull::ShipConfiguration;

/// The player's starting heading: nose up-screen, so grid Up points at the top.
pub const PLAYER_START_BEARING: f64 = 3.0 * FRAC_PI_2;

/// Default hull: a single reactor at the grid centre.
pub fn default_hull(tuning: &Tuning) -> Result<ShipConfiguration, SimError> {
    let mut hull = ShipConfiguration::new(tuning.hull.clone());
    let centre = tuning.hull.grid_size / 2;
    hull.add_component(ComponentKind::Reactor, GridCoord::new(centre, centre), None)?;
    Ok(hull)
}

/// Search radar plus whatever the hull's sensor mounts contribute.
pub fn ship_sensors(hull: &ShipConfiguration, tuning: &SensorTuning) -> SensorSuite {
    let mut sensors = vec![Sensor::omni(tuning.search_radar_range)];
    sensors.extend(hull.mounted_sensors(tuning));
    SensorSuite { sensors }
}

/// Spawn the player ship at `position`.
pub fn spawn_player(
    world: &mut World,
    id: u32,
    position: DVec2,
    tuning: &Tuning,
) -> Result<Entity, SimError> {
    let hull = default_hull(tuning)?;
    let kinematics = Kinematics::at(position, Bearing::new(PLAYER_START_BEARING));
    let mut sensors = ship_sensors(&hull, &tuning.sensors);
    for s in &mut sensors.sensors {
        s.update(kinematics.position, kinematics.bearing);
    }

    log::info!("player {id} spawned at ({:.0}, {:.0})", position.x, position.y);
    Ok(world.spawn((
        Player,
        ObjectId(id),
        Faction::Blue,
        kinematics,
        sensors,
        RotationController::new(),
        TrackFusion::new(),
        ObjectClass::Ship(ShipControls::default()),
        hull,
    )))
}

/// Spawn a guided missile at rest, pointing along `bearing`.
pub fn spawn_missile(
    world: &mut World,
    id: u32,
    position: DVec2,
    bearing: Bearing,
    faction: Faction,
    tuning: &Tuning,
) -> Entity {
    let m = &tuning.missile;
    let kinematics = Kinematics::at(position, bearing);
    let mut seeker = Sensor::new(m.seeker_range, 0.0, m.seeker_arc);
    seeker.update(position, bearing);

    log::debug!(
        "missile {id} ({faction:?}) spawned at ({:.0}, {:.0}) heading {bearing}",
        position.x,
        position.y
    );
    world.spawn((
        ObjectId(id),
        faction,
        kinematics,
        SensorSuite {
            sensors: vec![seeker],
        },
        RotationController::new(),
        TrackFusion::new(),
        ObjectClass::Missile(MissileState {
            target_track: None,
            seeker: SeekerState::Searching,
            thrust_accel: m.thrust_accel,
            max_speed: m.max_speed,
            max_rot_accel: m.max_rot_accel,
        }),
    ))
}

/// Spawn a wave of hostile missiles at random bearings and ranges, each
/// pointing roughly at `centre`. Ids are taken from `next_id`.
pub fn spawn_missile_wave(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    next_id: &mut u32,
    centre: DVec2,
    scenario: &ScenarioConfig,
    tuning: &Tuning,
) -> Vec<Entity> {
    let mut spawned = Vec::with_capacity(scenario.missile_count);
    for _ in 0..scenario.missile_count {
        let angle = rng.gen_range(0.0..TAU);
        let range = if scenario.max_range > scenario.min_range {
            rng.gen_range(scenario.min_range..scenario.max_range)
        } else {
            scenario.min_range
        };
        let jitter = if scenario.heading_jitter > 0.0 {
            rng.gen_range(-scenario.heading_jitter..=scenario.heading_jitter)
        } else {
            0.0
        };

        let position = centre + Bearing::new(angle).unit_vector() * range;
        let heading = Bearing::between(position, centre) + jitter;
        let id = *next_id;
        *next_id += 1;
        spawned.push(spawn_missile(
            world,
            id,
            position,
            heading,
            Faction::Red,
            tuning,
        ));
    }
    spawned
}
