//! Tests for the simulation engine, player controls, sensors, and guidance pipeline.

use std::f64::consts::{FRAC_PI_2, PI};

use glam::DVec2;
use hecs::World;

use skirmish_core::commands::PlayerCommand;
use skirmish_core::components::{Kinematics, Player, SensorSuite};
use skirmish_core::config::ScenarioConfig;
use skirmish_core::enums::*;
use skirmish_core::error::SimError;
use skirmish_core::events::StatusEvent;
use skirmish_core::state::{ObjectView, WorldSnapshot};
use skirmish_core::Bearing;

use crate::engine::{SimConfig, SimulationEngine};
use crate::systems::kinematics;
use crate::world_setup::PLAYER_START_BEARING;

fn find(snap: &WorldSnapshot, id: u32) -> Option<&ObjectView> {
    snap.objects.iter().find(|o| o.id == id)
}

/// Engine with only the player in the world (no missile wave).
fn player_only() -> (SimulationEngine, u32) {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let id = engine.spawn_player(DVec2::ZERO).unwrap();
    (engine, id)
}

fn add(kind: ComponentKind, x: i32, y: i32, direction: Option<GridDirection>) -> PlayerCommand {
    PlayerCommand::AddComponent {
        kind,
        x,
        y,
        direction,
    }
}

// ---- Engine lifecycle ----

#[test]
fn test_empty_world_ticks() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let snap = engine.tick();
    assert_eq!(snap.time.tick, 1);
    assert!(snap.objects.is_empty());
    assert!(snap.hull.is_none());
    assert!(snap.tracks.is_empty());
    assert!(snap.events.is_empty());
}

#[test]
fn test_start_scenario_spawns_player_and_wave() {
    let mut engine = SimulationEngine::new(SimConfig {
        scenario: ScenarioConfig {
            missile_count: 3,
            ..Default::default()
        },
        ..Default::default()
    });
    engine.queue_command(PlayerCommand::StartScenario);
    let snap = engine.tick();

    assert_eq!(snap.objects.len(), 4);
    let player = find(&snap, engine.player_id().unwrap()).unwrap();
    assert_eq!(player.faction, Faction::Blue);
    assert_eq!(player.kind, ObjectKind::Ship);
    assert_eq!(player.position, DVec2::ZERO);
    assert!((player.bearing - PLAYER_START_BEARING).abs() < 1e-9);

    let scenario = ScenarioConfig::default();
    let missiles: Vec<_> = snap
        .objects
        .iter()
        .filter(|o| o.kind == ObjectKind::Missile)
        .collect();
    assert_eq!(missiles.len(), 3);
    for m in missiles {
        assert_eq!(m.faction, Faction::Red);
        let range = m.position.length();
        // One tick of motion on top of the spawn range.
        assert!(range > scenario.min_range - 100.0, "range {range}");
        assert!(range < scenario.max_range + 100.0, "range {range}");
        assert!(m.seeker.is_some());
    }
    assert!(snap.hull.is_some());
}

#[test]
fn test_determinism_same_seed() {
    let config = SimConfig {
        seed: 7,
        scenario: ScenarioConfig {
            missile_count: 4,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut engine_a = SimulationEngine::new(config.clone());
    let mut engine_b = SimulationEngine::new(config);
    engine_a.queue_command(PlayerCommand::StartScenario);
    engine_b.queue_command(PlayerCommand::StartScenario);

    for _ in 0..120 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_different_seeds_place_wave_differently() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 1,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 2,
        ..Default::default()
    });
    engine_a.queue_command(PlayerCommand::StartScenario);
    engine_b.queue_command(PlayerCommand::StartScenario);
    let snap_a = engine_a.tick();
    let snap_b = engine_b.tick();
    let missile_a = snap_a.objects.iter().find(|o| o.kind == ObjectKind::Missile).unwrap();
    let missile_b = snap_b.objects.iter().find(|o| o.kind == ObjectKind::Missile).unwrap();
    assert_ne!(missile_a.position, missile_b.position);
}

#[test]
fn test_restart_never_reuses_ids() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::StartScenario);
    let first = engine.tick();
    engine.queue_command(PlayerCommand::StartScenario);
    let second = engine.tick();

    assert_eq!(second.time.tick, 1, "restart resets the clock");
    let max_first = first.objects.iter().map(|o| o.id).max().unwrap();
    assert!(second.objects.iter().all(|o| o.id > max_first));
}

#[test]
fn test_pause_freezes_time() {
    let (mut engine, id) = player_only();
    engine.tick();
    engine.queue_command(PlayerCommand::Pause);
    let paused = engine.tick();
    assert!(paused.paused);
    assert_eq!(paused.time.tick, 1);
    assert!(engine.is_paused());

    engine.queue_command(PlayerCommand::Resume);
    let resumed = engine.tick();
    assert!(!resumed.paused);
    assert_eq!(resumed.time.tick, 2);
    assert!(find(&resumed, id).is_some());
}

#[test]
fn test_time_scale_clamped() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::SetTimeScale { scale: 10.0 });
    assert_eq!(engine.tick().time_scale, 4.0);
    engine.queue_command(PlayerCommand::SetTimeScale { scale: -1.0 });
    engine.tick();
    assert_eq!(engine.time_scale(), 0.0);
}

#[test]
fn test_zero_time_scale_freezes_simulation() {
    let (mut engine, player) = player_only();
    let missile = engine.spawn_missile(DVec2::new(10_000.0, 0.0), Bearing::new(0.0), Faction::Red);
    engine.tick();
    engine.queue_command(PlayerCommand::SetTimeScale { scale: 0.0 });
    let frozen = engine.tick();
    assert!(engine.is_frozen());
    assert!(!frozen.paused);
    assert_eq!(frozen.time.tick, 1);
    let held = find(&frozen, missile).unwrap().position;

    // Commands still land while frozen.
    engine.queue_command(add(ComponentKind::HeatSink, 0, 0, None));
    let snap = engine.tick();
    assert_eq!(snap.time.tick, 1);
    assert_eq!(find(&snap, missile).unwrap().position, held);
    assert_eq!(snap.hull.unwrap().components.len(), 2);

    engine.queue_command(PlayerCommand::SetTimeScale { scale: 1.0 });
    let snap = engine.tick();
    assert_eq!(snap.time.tick, 2);
    assert_ne!(find(&snap, missile).unwrap().position, held);
    assert!(find(&snap, player).is_some());
}

#[test]
fn test_despawn_unknown_object() {
    let (mut engine, id) = player_only();
    assert!(matches!(
        engine.despawn(99),
        Err(SimError::UnknownObject(99))
    ));
    engine.despawn(id).unwrap();
    assert!(engine.player_id().is_none());
    assert!(engine.tick().objects.is_empty());
}

#[test]
fn test_commands_without_player_are_rejected() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::Rotate { degrees: 90.0 });
    let snap = engine.tick();
    assert_eq!(snap.events.len(), 1);
    assert!(matches!(snap.events[0], StatusEvent::CommandRejected { .. }));
}

#[test]
fn test_sim_config_partial_json() {
    let config = SimConfig::from_json(r#"{ "seed": 9, "scenario": { "missile_count": 5 } }"#)
        .unwrap();
    assert_eq!(config.seed, 9);
    assert_eq!(config.scenario.missile_count, 5);
    assert_eq!(config.time_scale, 1.0);
    assert!(SimConfig::from_json("{ seed: ").is_err());
}

// ---- Player frame ----

#[test]
fn test_kinematics_keeps_player_at_origin() {
    let mut world = World::new();
    let player = world.spawn((
        Player,
        Kinematics {
            velocity: DVec2::new(10.0, 0.0),
            ..Default::default()
        },
    ));
    let other = world.spawn((Kinematics {
        position: DVec2::new(100.0, 0.0),
        velocity: DVec2::new(0.0, 5.0),
        ..Default::default()
    },));

    let offset = kinematics::run(&mut world, 0.1);
    assert!((offset - DVec2::new(-1.0, 0.0)).length() < 1e-12);

    let p = *world.get::<&Kinematics>(player).unwrap();
    assert!(p.position.length() < 1e-12);
    let o = *world.get::<&Kinematics>(other).unwrap();
    assert!((o.position - DVec2::new(99.0, 0.5)).length() < 1e-12);
}

#[test]
fn test_kinematics_integrates_rotation() {
    let mut world = World::new();
    let e = world.spawn((Kinematics {
        bearing: Bearing::new(0.0),
        rot_velocity: 1.0,
        rot_acceleration: 3.0,
        ..Default::default()
    },));
    kinematics::run(&mut world, 0.1);
    let k = *world.get::<&Kinematics>(e).unwrap();
    assert!((k.rot_velocity - 1.3).abs() < 1e-12);
    assert!((k.bearing.radians() - 0.13).abs() < 1e-12);
}

#[test]
fn test_player_velocity_shifts_other_objects() {
    let (mut engine, player) = player_only();
    let missile = engine.spawn_missile(DVec2::new(0.0, 20_000.0), Bearing::new(0.0), Faction::Red);
    engine.set_kinematics(
        player,
        Kinematics {
            velocity: DVec2::new(0.0, -300.0),
            bearing: Bearing::new(PLAYER_START_BEARING),
            ..Default::default()
        },
    );
    let before = engine.kinematics_of(missile).unwrap().position;
    let snap = engine.tick();

    assert_eq!(find(&snap, player).unwrap().position, DVec2::ZERO);
    // The missile thrusts along +x; the player's climb pushes it down-screen.
    let after = find(&snap, missile).unwrap().position;
    assert!((after.y - before.y - 300.0 * engine.tuning().dt()).abs() < 1e-9);
}

#[test]
fn test_forward_thrust_moves_player_frame() {
    let (mut engine, player) = player_only();
    engine.queue_commands([
        add(ComponentKind::CruiseThruster, 2, 4, Some(GridDirection::Up)),
        PlayerCommand::SetThrust {
            direction: ThrustDirection::Forward,
            active: true,
        },
    ]);
    let mut snap = engine.tick();
    for _ in 0..30 {
        snap = engine.tick();
    }
    let view = find(&snap, player).unwrap();
    assert_eq!(view.position, DVec2::ZERO);
    // Nose up-screen: forward is -y.
    assert!(view.velocity.y < 0.0);
    assert!(view.velocity.x.abs() < 1e-9);

    let hull = snap.hull.as_ref().unwrap();
    assert!(hull.engines.iter().any(|e| e.firing));

    engine.queue_command(PlayerCommand::SetThrust {
        direction: ThrustDirection::Forward,
        active: false,
    });
    for _ in 0..30 {
        snap = engine.tick();
    }
    assert!(snap.hull.unwrap().engines.iter().all(|e| !e.firing));
}

// ---- Hull editing ----

#[test]
fn test_add_component_reflected_in_snapshot() {
    let (mut engine, _) = player_only();
    engine.queue_command(add(ComponentKind::RotateThruster, 0, 1, None));
    let hull = engine.tick().hull.unwrap();
    assert_eq!(hull.components.len(), 2);
    assert_eq!(hull.engines.len(), 4);
    assert!(hull.mass > 10.0);
}

#[test]
fn test_out_of_bounds_component_rejected() {
    let (mut engine, _) = player_only();
    engine.queue_command(add(ComponentKind::HeatSink, 9, 0, None));
    let snap = engine.tick();
    assert_eq!(snap.hull.unwrap().components.len(), 1);
    assert_eq!(snap.events.len(), 1);
    let StatusEvent::CommandRejected { reason } = &snap.events[0] else {
        panic!("expected rejection, got {:?}", snap.events[0]);
    };
    assert!(snap.events[0].message().starts_with("<ERROR> - "));
    assert!(reason.contains("(9, 0)"), "{reason}");
}

#[test]
fn test_cruise_thruster_requires_direction() {
    let (mut engine, _) = player_only();
    engine.queue_command(add(ComponentKind::CruiseThruster, 2, 4, None));
    let snap = engine.tick();
    assert!(matches!(
        snap.events.as_slice(),
        [StatusEvent::CommandRejected { .. }]
    ));
    assert_eq!(snap.hull.unwrap().components.len(), 1);
}

#[test]
fn test_remove_component_clears_cell() {
    let (mut engine, _) = player_only();
    engine.queue_commands([
        add(ComponentKind::HeatSink, 1, 1, None),
        PlayerCommand::RemoveComponent { x: 1, y: 1 },
        PlayerCommand::RemoveComponent { x: 0, y: 0 },
    ]);
    let snap = engine.tick();
    assert!(snap.events.is_empty());
    assert_eq!(snap.hull.unwrap().components.len(), 1);
}

#[test]
fn test_sensor_mount_extends_player_sensors() {
    let (mut engine, _) = player_only();
    let count = |engine: &SimulationEngine| {
        engine
            .world()
            .query::<(&Player, &SensorSuite)>()
            .iter()
            .next()
            .map(|(_, (_, suite))| suite.sensors.len())
            .unwrap()
    };
    assert_eq!(count(&engine), 1);

    engine.queue_command(add(ComponentKind::SensorMount, 2, 0, None));
    engine.tick();
    assert_eq!(count(&engine), 2);

    engine.queue_command(PlayerCommand::RemoveComponent { x: 2, y: 0 });
    engine.tick();
    assert_eq!(count(&engine), 1);
}

#[test]
fn test_reactor_heats_hull() {
    let (mut engine, _) = player_only();
    let mut snap = engine.tick();
    for _ in 0..10 {
        snap = engine.tick();
    }
    let hull = snap.hull.unwrap();
    assert!(hull.components[0].temperature > 0.0);
}

// ---- Rotation ----

#[test]
fn test_rotate_without_thrusters_stays_busy() {
    let (mut engine, player) = player_only();
    engine.queue_command(PlayerCommand::Rotate { degrees: 90.0 });
    for _ in 0..30 {
        let snap = engine.tick();
        assert!(snap.events.is_empty());
    }

    engine.queue_command(PlayerCommand::Rotate { degrees: 45.0 });
    let snap = engine.tick();
    assert_eq!(
        snap.events,
        vec![StatusEvent::RotateInProgress { object_id: player }]
    );
    assert_eq!(snap.events[0].message(), "<ERROR> - ROTATE COMMAND IN PROGRESS");
    assert!(matches!(
        find(&snap, player).unwrap().rotation,
        RotationPhase::TurningBeforeTarget(TurnDirection::Clockwise)
    ));
}

/// Player with rotate thrusters in two diagonal corners: every direction has
/// a clear exhaust and the torque couples cancel linearly.
fn spinning_player() -> (SimulationEngine, u32) {
    let (mut engine, player) = player_only();
    engine.queue_commands([
        add(ComponentKind::RotateThruster, 0, 0, None),
        add(ComponentKind::RotateThruster, 4, 4, None),
    ]);
    let hull = engine.tick().hull.unwrap();
    assert_eq!(hull.engines.len(), 8);
    (engine, player)
}

/// Issue a rotate command and tick until the controller is idle again.
/// Returns the status messages and the clockwise angle turned (degrees).
fn run_rotate(engine: &mut SimulationEngine, player: u32, degrees: f64) -> (Vec<String>, f64) {
    let start = engine.kinematics_of(player).unwrap();
    engine.queue_command(PlayerCommand::Rotate { degrees });
    let mut messages = Vec::new();
    let mut unwrapped = 0.0;
    let mut last = start.bearing;
    for _ in 0..1000 {
        let snap = engine.tick();
        messages.extend(snap.events.iter().map(|e| e.message()));
        let bearing = Bearing::new(find(&snap, player).unwrap().bearing);
        unwrapped += last.delta_to_bearing(bearing);
        last = bearing;
        if find(&snap, player).unwrap().rotation == RotationPhase::Idle && messages.len() >= 2 {
            break;
        }
    }
    (messages, unwrapped.to_degrees())
}

#[test]
fn test_rotate_with_thrusters_completes() {
    let (mut engine, player) = spinning_player();
    let (messages, _) = run_rotate(&mut engine, player, 90.0);
    assert_eq!(
        messages,
        vec!["HALF-ROTATION COMPLETE", "ROTATE COMMAND COMPLETE"]
    );

    let kin = engine.kinematics_of(player).unwrap();
    assert_eq!(kin.rot_velocity, 0.0);
    // Balanced couples: no net linear thrust while turning.
    assert!(kin.velocity.length() < 1e-9);
}

#[test]
fn test_rotate_lands_near_requested_bearing() {
    // Engine ramp lag would carry a half-turn switch well past the target
    // (about 119° for a 90° command); the ramp-aware switch point corrects it.
    for degrees in [30.0, 90.0, -90.0, 180.0] {
        let (mut engine, player) = spinning_player();
        let (_, turned) = run_rotate(&mut engine, player, degrees);
        assert!(
            (turned - degrees).abs() < 4.0,
            "rotate {degrees} turned {turned}"
        );
    }
}

// ---- Sensors, tracking, guidance ----

#[test]
fn test_missile_acquires_and_turns_toward_player() {
    let (mut engine, player) = player_only();
    // Pointing down-screen; the player is due west.
    let missile = engine.spawn_missile(DVec2::new(50_000.0, 0.0), Bearing::new(FRAC_PI_2), Faction::Red);

    let snap = engine.tick();
    let view = find(&snap, missile).unwrap();
    assert_eq!(view.seeker, Some(SeekerState::Tracking));
    assert!(snap.tracks.is_empty(), "seeker points away from the player");

    let mut gained = false;
    let mut snap = snap;
    for _ in 0..300 {
        snap = engine.tick();
        gained |= snap.events.contains(&StatusEvent::ContactGained {
            object_id: player,
            track_id: missile,
        });
    }
    assert!(gained, "player never saw the missile's seeker");

    let view = find(&snap, missile).unwrap();
    let to_player = Bearing::between(view.position, DVec2::ZERO);
    let error = Bearing::new(view.bearing).delta_to_bearing(to_player);
    assert!(error.abs() < 0.3, "bearing error {error}");
    assert!(view.velocity.length() > 0.0);

    let track = snap.tracks.iter().find(|t| t.object_id == missile).unwrap();
    assert!(track.is_current);
    assert_eq!(track.perceived_faction, Faction::Red);
    assert_eq!(track.colour, Faction::Red.display_colour());
}

#[test]
fn test_missile_without_tracks_searches() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let missile = engine.spawn_missile(DVec2::ZERO, Bearing::new(PI), Faction::Red);
    let snap = engine.tick();
    let view = find(&snap, missile).unwrap();
    assert_eq!(view.seeker, Some(SeekerState::Searching));
    assert_eq!(view.rotation, RotationPhase::Idle);
}

#[test]
fn test_missiles_ignore_friendly_missiles() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let a = engine.spawn_missile(DVec2::ZERO, Bearing::new(0.0), Faction::Red);
    // Directly ahead of `a`, pointing back at it so each seeker covers the other.
    engine.spawn_missile(DVec2::new(10_000.0, 0.0), Bearing::new(PI), Faction::Red);
    let snap = engine.tick();
    assert_eq!(find(&snap, a).unwrap().seeker, Some(SeekerState::Searching));
}

#[test]
fn test_contact_lost_after_lifetime() {
    let (mut engine, player) = player_only();
    let missile = engine.spawn_missile(DVec2::new(-30_000.0, 0.0), Bearing::new(0.0), Faction::Red);
    let snap = engine.tick();
    assert!(snap.events.contains(&StatusEvent::ContactGained {
        object_id: player,
        track_id: missile
    }));

    engine.despawn(missile).unwrap();
    let max = engine.tuning().tracks.max_lifetime;
    let mut lost_at = None;
    for tick in 0..=max + 1 {
        let snap = engine.tick();
        if snap.events.contains(&StatusEvent::ContactLost {
            object_id: player,
            track_id: missile,
        }) {
            lost_at = Some(tick);
            assert!(snap.tracks.is_empty());
            break;
        }
        let track = &snap.tracks[0];
        assert!(!track.is_current);
    }
    assert!(lost_at.is_some(), "track never aged out");
}

// ---- Cleanup ----

#[test]
fn test_cleanup_removes_objects_outside_world() {
    let (mut engine, player) = player_only();
    let radius = engine.tuning().world_radius;
    let far = engine.spawn_missile(DVec2::new(radius + 1_000.0, 0.0), Bearing::new(0.0), Faction::Red);
    let near = engine.spawn_missile(DVec2::new(radius - 1_000.0, 0.0), Bearing::new(PI), Faction::Red);
    let snap = engine.tick();
    assert!(find(&snap, far).is_none());
    assert!(find(&snap, near).is_some());
    assert!(find(&snap, player).is_some());
}
