//! Simulation engine: the core of the skirmish.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `WorldSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use glam::DVec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use skirmish_control::rotation::ramped_half_turn;
use skirmish_control::RotationController;
use skirmish_core::commands::PlayerCommand;
use skirmish_core::components::{Kinematics, ObjectClass, ObjectId, Player, SensorSuite};
use skirmish_core::config::{ScenarioConfig, Tuning};
use skirmish_core::enums::{ComponentKind, Faction, GridDirection, ThrustDirection, TurnDirection};
use skirmish_core::error::SimError;
use skirmish_core::events::StatusEvent;
use skirmish_core::state::WorldSnapshot;
use skirmish_core::types::{GridCoord, SimTime};
use skirmish_core::Bearing;
use skirmish_hull::{Component, ShipConfiguration};

use crate::systems;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
    pub tuning: Tuning,
    pub scenario: ScenarioConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            tuning: Tuning::default(),
            scenario: ScenarioConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse a config file. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    paused: bool,
    time_scale: f64,
    tuning: Tuning,
    scenario: ScenarioConfig,
    rng: ChaCha8Rng,
    next_object_id: u32,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<StatusEvent>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            paused: false,
            time_scale: config.time_scale,
            tuning: config.tuning,
            scenario: config.scenario,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            next_object_id: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    /// A frozen engine applies commands but does not advance.
    pub fn tick(&mut self) -> WorldSnapshot {
        self.process_commands();

        if !self.is_frozen() {
            self.run_systems();
            self.time.advance(self.tuning.dt());
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.paused,
            self.time_scale,
            &self.tuning,
            events,
        )
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Paused, or running at a time scale of zero. Commands are still applied.
    pub fn is_frozen(&self) -> bool {
        self.paused || self.time_scale <= 0.0
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    // --- World lifecycle ---

    /// Clear the world and spawn the player plus the configured missile wave.
    pub fn start_scenario(&mut self) -> Result<(), SimError> {
        self.world.clear();
        self.time = SimTime::default();

        self.spawn_player(DVec2::ZERO)?;
        let spawned = world_setup::spawn_missile_wave(
            &mut self.world,
            &mut self.rng,
            &mut self.next_object_id,
            DVec2::ZERO,
            &self.scenario,
            &self.tuning,
        );
        log::info!("scenario started: {} hostile missiles", spawned.len());
        Ok(())
    }

    /// Spawn the player ship. Returns its object id.
    pub fn spawn_player(&mut self, position: DVec2) -> Result<u32, SimError> {
        let id = self.allocate_id();
        world_setup::spawn_player(&mut self.world, id, position, &self.tuning)?;
        Ok(id)
    }

    /// Spawn a guided missile. Returns its object id.
    pub fn spawn_missile(&mut self, position: DVec2, bearing: Bearing, faction: Faction) -> u32 {
        let id = self.allocate_id();
        world_setup::spawn_missile(&mut self.world, id, position, bearing, faction, &self.tuning);
        id
    }

    /// Remove an object from the simulation.
    pub fn despawn(&mut self, id: u32) -> Result<(), SimError> {
        let entity = self.entity_of(id).ok_or(SimError::UnknownObject(id))?;
        let _ = self.world.despawn(entity);
        log::debug!("object {id} despawned");
        Ok(())
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_object_id;
        self.next_object_id += 1;
        id
    }

    fn entity_of(&self, id: u32) -> Option<Entity> {
        self.world
            .query::<&ObjectId>()
            .iter()
            .find(|(_, oid)| oid.0 == id)
            .map(|(e, _)| e)
    }

    fn player(&self) -> Result<Entity, SimError> {
        self.world
            .query::<&Player>()
            .iter()
            .next()
            .map(|(e, _)| e)
            .ok_or(SimError::NoPlayer)
    }

    /// Object id of the player ship, if one exists.
    pub fn player_id(&self) -> Option<u32> {
        self.world
            .query::<(&Player, &ObjectId)>()
            .iter()
            .next()
            .map(|(_, (_, id))| id.0)
    }

    // --- Player controls ---

    /// Place a component on the player's hull. Mass properties, validity and
    /// engines are recomputed before this returns.
    pub fn add_component(
        &mut self,
        kind: ComponentKind,
        coord: GridCoord,
        direction: Option<GridDirection>,
    ) -> Result<(), SimError> {
        let player = self.player()?;
        {
            let mut hull = self
                .world
                .get::<&mut ShipConfiguration>(player)
                .map_err(|_| SimError::NoPlayer)?;
            hull.add_component(kind, coord, direction)?;
        }
        self.refresh_player_sensors(player);
        Ok(())
    }

    /// Clear a cell on the player's hull.
    pub fn remove_component(&mut self, coord: GridCoord) -> Result<Option<Component>, SimError> {
        let player = self.player()?;
        let removed = {
            let mut hull = self
                .world
                .get::<&mut ShipConfiguration>(player)
                .map_err(|_| SimError::NoPlayer)?;
            hull.remove_component(coord)?
        };
        if removed.is_some() {
            self.refresh_player_sensors(player);
        }
        Ok(removed)
    }

    fn refresh_player_sensors(&mut self, player: Entity) {
        let Ok((kin, hull, suite)) = self
            .world
            .query_one_mut::<(&Kinematics, &ShipConfiguration, &mut SensorSuite)>(player)
        else {
            return;
        };
        *suite = world_setup::ship_sensors(hull, &self.tuning.sensors);
        for s in &mut suite.sensors {
            s.update(kin.position, kin.bearing);
        }
    }

    /// Hold or release a translation thrust flag on the player.
    pub fn set_thrust(&mut self, direction: ThrustDirection, active: bool) -> Result<(), SimError> {
        let player = self.player()?;
        let mut class = self
            .world
            .get::<&mut ObjectClass>(player)
            .map_err(|_| SimError::NoPlayer)?;
        if let ObjectClass::Ship(controls) = &mut *class {
            controls.thrust.set(direction, active);
        }
        Ok(())
    }

    /// Turn the player by `degrees` (positive = clockwise). Rejected while a
    /// turn is running. The switch point allows for engine ramp lag so the
    /// ship comes to rest close to the requested bearing.
    pub fn rotate(&mut self, degrees: f64) -> Result<(), SimError> {
        let player = self.player()?;
        let (kin, controller, hull) = self
            .world
            .query_one_mut::<(&Kinematics, &mut RotationController, &ShipConfiguration)>(player)
            .map_err(|_| SimError::NoPlayer)?;
        let delta = degrees.to_radians();
        let direction = TurnDirection::of(delta);
        let opposite = match direction {
            TurnDirection::Clockwise => TurnDirection::CounterClockwise,
            TurnDirection::CounterClockwise => TurnDirection::Clockwise,
        };
        let toward = hull.max_rotate_acceleration(direction);
        let lag = f64::from(hull.tuning().ramp_ticks) * self.tuning.dt();
        controller.command_new_bearing(
            kin.bearing,
            ramped_half_turn(delta, toward, lag),
            toward,
            hull.max_rotate_acceleration(opposite),
        )
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        log::debug!("command {command:?}");
        let result = match command {
            PlayerCommand::StartScenario => self.start_scenario(),
            PlayerCommand::AddComponent {
                kind,
                x,
                y,
                direction,
            } => self.add_component(kind, GridCoord::new(x, y), direction),
            PlayerCommand::RemoveComponent { x, y } => {
                self.remove_component(GridCoord::new(x, y)).map(|_| ())
            }
            PlayerCommand::SetThrust { direction, active } => self.set_thrust(direction, active),
            PlayerCommand::Rotate { degrees } => self.rotate(degrees),
            PlayerCommand::SpawnMissile { x, y, bearing } => {
                self.spawn_missile(DVec2::new(x, y), Bearing::new(bearing), Faction::Red);
                Ok(())
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(0.0, 4.0);
                Ok(())
            }
            PlayerCommand::Pause => {
                self.paused = true;
                Ok(())
            }
            PlayerCommand::Resume => {
                self.paused = false;
                Ok(())
            }
        };

        if let Err(e) = result {
            log::warn!("command rejected: {e}");
            let event = match e {
                SimError::RotationInProgress => StatusEvent::RotateInProgress {
                    object_id: self.player_id().unwrap_or_default(),
                },
                other => StatusEvent::CommandRejected {
                    reason: other.to_string(),
                },
            };
            self.events.push(event);
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let dt = self.tuning.dt();
        // 1. Rotation controllers, hull engines, missile motors
        systems::propulsion::run(&mut self.world, &self.tuning.rotation, &mut self.events);
        // 2. Hull heat
        systems::thermal::run(&mut self.world);
        // 3. Integration in the player frame
        let frame_offset = systems::kinematics::run(&mut self.world, dt);
        // 4. Sensors follow their owners
        systems::sensors::run(&mut self.world);
        // 5. Detection + track fusion
        systems::tracking::run(
            &mut self.world,
            frame_offset,
            &self.tuning.tracks,
            &mut self.events,
        );
        // 6. Missile guidance
        systems::guidance::run(&mut self.world, &self.tuning.missile);
        // 7. Cleanup (out of bounds)
        systems::cleanup::run(
            &mut self.world,
            self.tuning.world_radius,
            &mut self.despawn_buffer,
        );
    }

    /// Kinematic state of an object.
    #[cfg(test)]
    pub(crate) fn kinematics_of(&self, id: u32) -> Option<Kinematics> {
        let entity = self.entity_of(id)?;
        self.world.get::<&Kinematics>(entity).ok().map(|k| *k)
    }

    #[cfg(test)]
    pub(crate) fn set_kinematics(&mut self, id: u32, kinematics: Kinematics) {
        if let Some(entity) = self.entity_of(id) {
            if let Ok(mut k) = self.world.get::<&mut Kinematics>(entity) {
                *k = kinematics;
            }
        }
    }
}
