//! Bang-bang rotation controller.
//!
//! Turns a commanded bearing change into timed acceleration phases:
//! accelerate toward the target, brake after passing it, then damp the
//! residual drift to rest. Pure data, no ECS dependency.
//!
//! The target is the switch point, not the resting bearing. With equal
//! toward and away accelerations the body comes to rest about twice the
//! commanded delta from where it started, so callers that want to land on
//! a bearing command half the turn (see [`half_turn`]).

use serde::{Deserialize, Serialize};

use skirmish_core::config::RotationTuning;
use skirmish_core::enums::{RotationPhase, TurnDirection};
use skirmish_core::error::SimError;
use skirmish_core::Bearing;

/// Per-tick input to the controller.
#[derive(Debug, Clone, Copy)]
pub struct RotationContext {
    pub bearing: Bearing,
    pub rot_velocity: f64,
}

/// Phase milestones worth reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationEvent {
    HalfRotationComplete,
    RotateCommandComplete,
}

/// Output from one controller tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationUpdate {
    /// Signed rotational acceleration demand (positive = clockwise).
    pub demand: f64,
    /// Rotational velocity to carry forward (damped while shutting down).
    pub rot_velocity: f64,
    pub event: Option<RotationEvent>,
}

/// Switch-point delta that brings a symmetric turn to rest `delta` away.
pub fn half_turn(delta: f64) -> f64 {
    delta * 0.5
}

/// Switch-point delta for a body whose torque takes `lag` seconds to swing
/// from full toward to full away, such as a hull whose engines ramp.
///
/// During the swing the body coasts roughly `lag * v` further, and the
/// braking engines winding down in `Shutdown` pull it back by about
/// `accel * lag² / 4`. Solves `2s + lag·√(2·accel·s) = |delta| + accel·lag²/4`
/// for `s`. With no lag or no acceleration this is [`half_turn`].
pub fn ramped_half_turn(delta: f64, accel: f64, lag: f64) -> f64 {
    if delta == 0.0 {
        return 0.0;
    }
    let accel = accel.abs();
    let lag = lag.max(0.0);
    let b = lag * (2.0 * accel).sqrt();
    let c = delta.abs() + accel * lag * lag / 4.0;
    let root = (-b + (b * b + 8.0 * c).sqrt()) / 4.0;
    (root * root).copysign(delta)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RotationController {
    phase: RotationPhase,
    /// Target on the unwrapped angle line.
    target: f64,
    /// Bearing accumulated without wrapping since the command.
    unwrapped: f64,
    last_bearing: Bearing,
    toward_accel: f64,
    away_accel: f64,
}

impl RotationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> RotationPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == RotationPhase::Idle
    }

    /// Normalized target bearing of the running (or last) command.
    pub fn target(&self) -> Bearing {
        Bearing::new(self.target)
    }

    /// Start a turn of `delta` radians from `current`. Rejected unless idle.
    pub fn command_new_bearing(
        &mut self,
        current: Bearing,
        delta: f64,
        toward_accel: f64,
        away_accel: f64,
    ) -> Result<(), SimError> {
        if !self.is_idle() {
            return Err(SimError::RotationInProgress);
        }
        let direction = TurnDirection::of(delta);
        self.unwrapped = current.radians();
        self.last_bearing = current;
        self.target = self.unwrapped + delta;
        self.toward_accel = direction.sign() * toward_accel.abs();
        self.away_accel = -direction.sign() * away_accel.abs();
        self.phase = RotationPhase::TurningBeforeTarget(direction);
        log::debug!(
            "rotate {:.1}° from {} toward {}",
            delta.to_degrees(),
            current,
            self.target()
        );
        Ok(())
    }

    /// Advance one tick.
    pub fn update(&mut self, ctx: &RotationContext, tuning: &RotationTuning) -> RotationUpdate {
        self.unwrapped += self.last_bearing.delta_to_bearing(ctx.bearing);
        self.last_bearing = ctx.bearing;

        let mut out = RotationUpdate {
            demand: 0.0,
            rot_velocity: ctx.rot_velocity,
            event: None,
        };

        match self.phase {
            RotationPhase::Idle => {}
            RotationPhase::TurningBeforeTarget(direction) => {
                let crossed = match direction {
                    TurnDirection::Clockwise => self.unwrapped >= self.target,
                    TurnDirection::CounterClockwise => self.unwrapped <= self.target,
                };
                if crossed {
                    self.phase = RotationPhase::TurningAfterTarget(direction);
                    out.demand = self.away_accel;
                    out.event = Some(RotationEvent::HalfRotationComplete);
                } else {
                    out.demand = self.toward_accel;
                }
            }
            RotationPhase::TurningAfterTarget(direction) => {
                let v = ctx.rot_velocity;
                if v.abs() < tuning.stop_threshold || v * direction.sign() <= 0.0 {
                    self.phase = RotationPhase::Shutdown;
                } else {
                    out.demand = self.away_accel;
                }
            }
            RotationPhase::Shutdown => {
                out.rot_velocity = ctx.rot_velocity * tuning.damping;
                if out.rot_velocity.abs() < tuning.rest_threshold {
                    out.rot_velocity = 0.0;
                    self.phase = RotationPhase::Idle;
                    out.event = Some(RotationEvent::RotateCommandComplete);
                    log::debug!("rotation complete at {}", ctx.bearing);
                }
            }
        }
        out
    }
}
