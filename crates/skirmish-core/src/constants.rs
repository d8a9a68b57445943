//! Simulation constants and tuning defaults.
//!
//! Everything here can be overridden through [`crate::config::Tuning`];
//! these values are what `Default` hands out.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- World bounds ---

/// Objects further than this from the player are removed (meters).
pub const WORLD_RADIUS: f64 = 500_000.0;

// --- Hull grid ---

/// Cells per side of the square component grid.
pub const GRID_SIZE: i32 = 5;

/// Physical edge length of one grid cell (meters).
pub const BLOCK_SIZE: f64 = 10.0;

/// Ticks an engine takes to ramp from idle to full output (and back).
pub const ENGINE_RAMP_TICKS: u32 = 10;

// --- Component table ---

pub const REACTOR_MASS: f64 = 10.0;
pub const HEAT_SINK_MASS: f64 = 5.0;
pub const ROTATE_THRUSTER_MASS: f64 = 1.0;
pub const CRUISE_THRUSTER_MASS: f64 = 3.0;
pub const SENSOR_MOUNT_MASS: f64 = 1.0;

pub const REACTOR_HEAT_TRANSFER: f64 = 0.5;
pub const HEAT_SINK_HEAT_TRANSFER: f64 = 1.0;
pub const THRUSTER_HEAT_TRANSFER: f64 = 0.3;
pub const SENSOR_MOUNT_HEAT_TRANSFER: f64 = 0.3;

/// Thrust of a small manoeuvring thruster (newtons).
pub const ROTATE_THRUSTER_FORCE: f64 = 40.0;

/// Thrust of a main cruise engine (newtons).
pub const CRUISE_THRUSTER_FORCE: f64 = 400.0;

// --- Thermal ---

/// Ambient temperature every component starts at and radiates toward.
pub const AMBIENT_TEMPERATURE: f64 = 0.0;

/// Temperature mapped to 1.0 on the normalized display scale.
pub const MAX_TEMPERATURE: f64 = 1000.0;

/// Fraction of a temperature difference that flows per tick. At 0.25 a cell
/// with four cooler neighbours never drops below their starting temperature.
pub const HEAT_CONDUCTIVITY: f64 = 0.25;

/// Heat a reactor adds to its own cell per tick.
pub const REACTOR_HEAT_OUTPUT: f64 = 2.0;

/// Heat a firing thruster adds to its cell per tick at full profile.
pub const THRUSTER_FIRING_HEAT: f64 = 1.0;

/// Fraction of (T - ambient) a heat sink sheds per tick.
pub const HEAT_SINK_RADIATION: f64 = 0.02;

// --- Rotation controller ---

/// |rot_velocity| below which the after-target phase shuts down (rad/s).
pub const ROTATION_STOP_THRESHOLD: f64 = 0.001;

/// |rot_velocity| below which shutdown snaps to rest (rad/s).
pub const ROTATION_REST_THRESHOLD: f64 = 1e-7;

/// Per-tick rotational velocity multiplier while shutting down.
pub const ROTATION_DAMPING: f64 = 0.8;

// --- Sensors ---

/// Range of the player's hull search radar (meters).
pub const SEARCH_RADAR_RANGE: f64 = 250_000.0;

/// Range of a grid-mounted sensor (meters).
pub const MOUNTED_SENSOR_RANGE: f64 = 150_000.0;

/// Arc width of a grid-mounted directional sensor (radians).
pub const MOUNTED_SENSOR_ARC: f64 = std::f64::consts::FRAC_PI_2;

// --- Tracking ---

/// Ticks a track survives without a fresh detection.
pub const TRACK_MAX_LIFETIME: u32 = 100;

/// Ticks of highlight animation after a contact (re)appears.
pub const TRACK_ANIMATION_LIFETIME: u32 = 100;

/// Highlight flag toggles every this many animation ticks.
pub const TRACK_HIGHLIGHT_PERIOD: u32 = 25;

// --- Missiles ---

/// Forward acceleration of a guided missile (m/s²).
pub const MISSILE_THRUST_ACCEL: f64 = 60.0;

/// Speed above which a missile stops thrusting (m/s).
pub const MISSILE_MAX_SPEED: f64 = 1_200.0;

/// Rotational acceleration available to a missile (rad/s²).
pub const MISSILE_MAX_ROT_ACCEL: f64 = 1.5;

/// Seeker range (meters).
pub const MISSILE_SEEKER_RANGE: f64 = 60_000.0;

/// Seeker arc width (radians), centred on the missile's bearing.
pub const MISSILE_SEEKER_ARC: f64 = std::f64::consts::FRAC_PI_2;

/// Bearing error (radians) below which guidance issues no turn.
pub const GUIDANCE_DEADBAND: f64 = 0.02;

// --- Scenario ---

/// Hostile missiles spawned when a scenario starts.
pub const SCENARIO_MISSILE_COUNT: usize = 1;

/// Spawn range band for scenario missiles (meters).
pub const SCENARIO_MIN_RANGE: f64 = 150_000.0;
pub const SCENARIO_MAX_RANGE: f64 = 200_000.0;

/// Maximum heading error (radians) of a freshly spawned missile.
pub const SCENARIO_HEADING_JITTER: f64 = 0.3;
