//! Tuning tables handed to the simulation at construction.
//!
//! Every field has a default from [`crate::constants`], and every struct is
//! `#[serde(default)]`, so a config file only needs the values it changes.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::ComponentKind;
use crate::error::SimError;

/// Physical properties of one component kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentSpec {
    pub mass: f64,
    pub heat_transfer_ratio: f64,
    /// Heat added to the cell every tick.
    pub heat_output: f64,
    /// Heat added per tick while an attached engine fires at full profile.
    pub firing_heat: f64,
    /// Fraction of (T - ambient) shed per tick.
    pub radiation: f64,
    /// Thrust force of each engine this component provides (newtons).
    pub thrust: f64,
}

impl Default for ComponentSpec {
    fn default() -> Self {
        Self {
            mass: 1.0,
            heat_transfer_ratio: 0.3,
            heat_output: 0.0,
            firing_heat: 0.0,
            radiation: 0.0,
            thrust: 0.0,
        }
    }
}

/// Per-kind component table. Replaces any process-wide mass lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentTable {
    pub reactor: ComponentSpec,
    pub heat_sink: ComponentSpec,
    pub rotate_thruster: ComponentSpec,
    pub cruise_thruster: ComponentSpec,
    pub sensor_mount: ComponentSpec,
}

impl ComponentTable {
    pub fn get(&self, kind: ComponentKind) -> &ComponentSpec {
        match kind {
            ComponentKind::Reactor => &self.reactor,
            ComponentKind::HeatSink => &self.heat_sink,
            ComponentKind::RotateThruster => &self.rotate_thruster,
            ComponentKind::CruiseThruster => &self.cruise_thruster,
            ComponentKind::SensorMount => &self.sensor_mount,
        }
    }
}

impl Default for ComponentTable {
    fn default() -> Self {
        Self {
            reactor: ComponentSpec {
                mass: REACTOR_MASS,
                heat_transfer_ratio: REACTOR_HEAT_TRANSFER,
                heat_output: REACTOR_HEAT_OUTPUT,
                ..Default::default()
            },
            heat_sink: ComponentSpec {
                mass: HEAT_SINK_MASS,
                heat_transfer_ratio: HEAT_SINK_HEAT_TRANSFER,
                radiation: HEAT_SINK_RADIATION,
                ..Default::default()
            },
            rotate_thruster: ComponentSpec {
                mass: ROTATE_THRUSTER_MASS,
                heat_transfer_ratio: THRUSTER_HEAT_TRANSFER,
                firing_heat: THRUSTER_FIRING_HEAT,
                thrust: ROTATE_THRUSTER_FORCE,
                ..Default::default()
            },
            cruise_thruster: ComponentSpec {
                mass: CRUISE_THRUSTER_MASS,
                heat_transfer_ratio: THRUSTER_HEAT_TRANSFER,
                firing_heat: THRUSTER_FIRING_HEAT * 4.0,
                thrust: CRUISE_THRUSTER_FORCE,
                ..Default::default()
            },
            sensor_mount: ComponentSpec {
                mass: SENSOR_MOUNT_MASS,
                heat_transfer_ratio: SENSOR_MOUNT_HEAT_TRANSFER,
                ..Default::default()
            },
        }
    }
}

/// Hull grid, engine and thermal tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HullTuning {
    pub grid_size: i32,
    pub block_size: f64,
    pub ramp_ticks: u32,
    pub ambient_temperature: f64,
    pub max_temperature: f64,
    pub conductivity: f64,
    pub components: ComponentTable,
}

impl Default for HullTuning {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            block_size: BLOCK_SIZE,
            ramp_ticks: ENGINE_RAMP_TICKS,
            ambient_temperature: AMBIENT_TEMPERATURE,
            max_temperature: MAX_TEMPERATURE,
            conductivity: HEAT_CONDUCTIVITY,
            components: ComponentTable::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationTuning {
    pub stop_threshold: f64,
    pub rest_threshold: f64,
    pub damping: f64,
}

impl Default for RotationTuning {
    fn default() -> Self {
        Self {
            stop_threshold: ROTATION_STOP_THRESHOLD,
            rest_threshold: ROTATION_REST_THRESHOLD,
            damping: ROTATION_DAMPING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorTuning {
    pub search_radar_range: f64,
    pub mounted_range: f64,
    pub mounted_arc: f64,
}

impl Default for SensorTuning {
    fn default() -> Self {
        Self {
            search_radar_range: SEARCH_RADAR_RANGE,
            mounted_range: MOUNTED_SENSOR_RANGE,
            mounted_arc: MOUNTED_SENSOR_ARC,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackTuning {
    pub max_lifetime: u32,
    pub animation_lifetime: u32,
    pub highlight_period: u32,
}

impl Default for TrackTuning {
    fn default() -> Self {
        Self {
            max_lifetime: TRACK_MAX_LIFETIME,
            animation_lifetime: TRACK_ANIMATION_LIFETIME,
            highlight_period: TRACK_HIGHLIGHT_PERIOD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissileTuning {
    pub thrust_accel: f64,
    pub max_speed: f64,
    pub max_rot_accel: f64,
    pub seeker_range: f64,
    pub seeker_arc: f64,
    pub deadband: f64,
}

impl Default for MissileTuning {
    fn default() -> Self {
        Self {
            thrust_accel: MISSILE_THRUST_ACCEL,
            max_speed: MISSILE_MAX_SPEED,
            max_rot_accel: MISSILE_MAX_ROT_ACCEL,
            seeker_range: MISSILE_SEEKER_RANGE,
            seeker_arc: MISSILE_SEEKER_ARC,
            deadband: GUIDANCE_DEADBAND,
        }
    }
}

/// What `StartScenario` spawns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub missile_count: usize,
    pub min_range: f64,
    pub max_range: f64,
    pub heading_jitter: f64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            missile_count: SCENARIO_MISSILE_COUNT,
            min_range: SCENARIO_MIN_RANGE,
            max_range: SCENARIO_MAX_RANGE,
            heading_jitter: SCENARIO_HEADING_JITTER,
        }
    }
}

/// All simulation tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub tick_rate: u32,
    pub world_radius: f64,
    pub hull: HullTuning,
    pub rotation: RotationTuning,
    pub sensors: SensorTuning,
    pub tracks: TrackTuning,
    pub missile: MissileTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            world_radius: WORLD_RADIUS,
            hull: HullTuning::default(),
            rotation: RotationTuning::default(),
            sensors: SensorTuning::default(),
            tracks: TrackTuning::default(),
            missile: MissileTuning::default(),
        }
    }
}

impl Tuning {
    /// Seconds per tick.
    pub fn dt(&self) -> f64 {
        1.0 / self.tick_rate.max(1) as f64
    }

    /// Parse tuning from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }
}
