//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Allegiance of a world object. Blue is the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Red,
    Blue,
    Green,
    #[default]
    Unknown,
}

impl Faction {
    /// Display colour (RGB) for contact symbols. One colour per faction.
    pub fn display_colour(self) -> [u8; 3] {
        match self {
            Faction::Red => [255, 0, 0],
            Faction::Blue => [0, 0, 255],
            Faction::Green => [0, 255, 0],
            Faction::Unknown => [255, 155, 0],
        }
    }
}

/// What occupies a hull grid cell.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ComponentKind {
    Reactor,
    HeatSink,
    RotateThruster,
    CruiseThruster,
    SensorMount,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 5] = [
        ComponentKind::Reactor,
        ComponentKind::HeatSink,
        ComponentKind::RotateThruster,
        ComponentKind::CruiseThruster,
        ComponentKind::SensorMount,
    ];

    pub fn is_thruster(self) -> bool {
        matches!(
            self,
            ComponentKind::RotateThruster | ComponentKind::CruiseThruster
        )
    }
}

/// One of the four grid directions. Up is the ship's forward.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum GridDirection {
    Up,
    Right,
    Down,
    Left,
}

impl GridDirection {
    pub const ALL: [GridDirection; 4] = [
        GridDirection::Up,
        GridDirection::Right,
        GridDirection::Down,
        GridDirection::Left,
    ];

    /// Cell step (dx, dy) in grid coordinates; rows grow downward.
    pub fn grid_delta(self) -> (i32, i32) {
        match self {
            GridDirection::Up => (0, -1),
            GridDirection::Right => (1, 0),
            GridDirection::Down => (0, 1),
            GridDirection::Left => (-1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            GridDirection::Up => GridDirection::Down,
            GridDirection::Right => GridDirection::Left,
            GridDirection::Down => GridDirection::Up,
            GridDirection::Left => GridDirection::Right,
        }
    }

    /// Angle relative to the ship's bearing (radians, clockwise).
    pub fn body_angle(self) -> f64 {
        use std::f64::consts::{FRAC_PI_2, PI};
        match self {
            GridDirection::Up => 0.0,
            GridDirection::Right => FRAC_PI_2,
            GridDirection::Down => PI,
            GridDirection::Left => 3.0 * FRAC_PI_2,
        }
    }
}

/// Continuous translation thrust requested by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThrustDirection {
    Forward,
    Backward,
    LateralLeft,
    LateralRight,
}

/// Sense of a commanded turn. Clockwise is a positive bearing delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnDirection {
    Clockwise,
    CounterClockwise,
}

impl TurnDirection {
    pub fn of(delta: f64) -> Self {
        if delta < 0.0 {
            TurnDirection::CounterClockwise
        } else {
            TurnDirection::Clockwise
        }
    }

    pub fn sign(self) -> f64 {
        match self {
            TurnDirection::Clockwise => 1.0,
            TurnDirection::CounterClockwise => -1.0,
        }
    }
}

/// Rotation controller phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationPhase {
    #[default]
    Idle,
    /// Accelerating toward the target bearing.
    TurningBeforeTarget(TurnDirection),
    /// Target passed; decelerating to cancel angular momentum.
    TurningAfterTarget(TurnDirection),
    /// Damping residual drift to rest.
    Shutdown,
}

/// Missile seeker state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeekerState {
    /// No tracks to steer toward.
    #[default]
    Searching,
    /// Steering toward a contact seen this tick.
    Tracking,
    /// Steering toward the last known position of a stale contact.
    Coasting,
}

/// Display tag for a world object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Ship,
    Missile,
}
