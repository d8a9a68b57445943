//! ECS components for hecs entities.
//!
//! Components are plain data. Behaviour lives in systems and in the
//! hull/control crates; the few methods here are pure queries.

use std::f64::consts::TAU;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::bearing::Bearing;
use crate::enums::*;

/// Identity of a world object, unique for the lifetime of a simulation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ObjectId(pub u32);

/// Marks the entity the world frame is centred on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Linear and rotational state in the player-relative frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    pub position: DVec2,
    pub velocity: DVec2,
    /// Net linear acceleration produced this tick (world frame).
    pub acceleration: DVec2,
    pub bearing: Bearing,
    /// rad/s, positive = clockwise.
    pub rot_velocity: f64,
    pub rot_acceleration: f64,
}

impl Kinematics {
    pub fn at(position: DVec2, bearing: Bearing) -> Self {
        Self {
            position,
            bearing,
            ..Default::default()
        }
    }
}

/// An emitter whose coverage can be intercepted by other objects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    /// Maximum range (meters).
    pub range: f64,
    /// Arc centre relative to the owner's bearing (radians).
    pub arc_offset: f64,
    /// Total arc width (radians). `>= 2π` is omnidirectional.
    pub arc_width: f64,
    /// Position the sensor was last updated to.
    pub origin: DVec2,
    /// Absolute arc centre after the last update.
    pub centre: Bearing,
}

impl Sensor {
    pub fn new(range: f64, arc_offset: f64, arc_width: f64) -> Self {
        Self {
            range,
            arc_offset,
            arc_width,
            origin: DVec2::ZERO,
            centre: Bearing::new(arc_offset),
        }
    }

    pub fn omni(range: f64) -> Self {
        Self::new(range, 0.0, TAU)
    }

    /// Move the sensor with its owner.
    pub fn update(&mut self, owner_position: DVec2, owner_bearing: Bearing) {
        self.origin = owner_position;
        self.centre = owner_bearing + self.arc_offset;
    }

    /// Whether `point` is inside this sensor's range and arc.
    pub fn covers(&self, point: DVec2) -> bool {
        if self.origin.distance_squared(point) > self.range * self.range {
            return false;
        }
        if point == self.origin {
            return true;
        }
        Bearing::between(self.origin, point).within_arc(self.centre.radians(), self.arc_width)
    }
}

/// Sensors carried by a world object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SensorSuite {
    pub sensors: Vec<Sensor>,
}

/// Which thrusters should fire this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrustFlags {
    pub forward: bool,
    pub backward: bool,
    pub lateral_left: bool,
    pub lateral_right: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
}

impl ThrustFlags {
    pub fn set(&mut self, direction: ThrustDirection, active: bool) {
        match direction {
            ThrustDirection::Forward => self.forward = active,
            ThrustDirection::Backward => self.backward = active,
            ThrustDirection::LateralLeft => self.lateral_left = active,
            ThrustDirection::LateralRight => self.lateral_right = active,
        }
    }
}

/// Player input held by a ship between ticks.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ShipControls {
    /// Translation flags from `SetThrust`. Rotate flags come from the controller.
    pub thrust: ThrustFlags,
}

/// Guided missile state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissileState {
    /// Object id of the track currently steered toward.
    pub target_track: Option<u32>,
    pub seeker: SeekerState,
    /// Forward acceleration while under the speed limit (m/s²).
    pub thrust_accel: f64,
    pub max_speed: f64,
    /// Rotational acceleration handed to the rotation controller (rad/s²).
    pub max_rot_accel: f64,
}

/// Tagged specialization of a world object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ObjectClass {
    Ship(ShipControls),
    Missile(MissileState),
}

impl ObjectClass {
    pub fn kind(&self) -> ObjectKind {
        match self {
            ObjectClass::Ship(_) => ObjectKind::Ship,
            ObjectClass::Missile(_) => ObjectKind::Missile,
        }
    }
}

/// A sensor contact as seen by one observer this tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub object_id: u32,
    pub position: DVec2,
    pub velocity: DVec2,
    pub faction: Faction,
}

/// A persisted, decaying record of a perceived contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub object_id: u32,
    pub position: DVec2,
    pub velocity: DVec2,
    pub perceived_faction: Faction,
    /// Ticks remaining before the track is pruned.
    pub lifetime: u32,
    /// Ticks of highlight animation remaining.
    pub animation_lifetime: u32,
    /// Transient highlight toggle, driven by the animation lifetime.
    pub highlight: bool,
    /// Refreshed by a detection this tick.
    pub is_current: bool,
}
