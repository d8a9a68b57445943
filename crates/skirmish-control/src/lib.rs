//! Control logic for SKIRMISH.
//!
//! Rotation controller state machine, per-observer track fusion
//! and missile guidance. No ECS dependency: operates on plain data.

pub mod fusion;
pub mod guidance;
pub mod rotation;

pub use skirmish_core as core;

pub use fusion::{FusionReport, TrackFusion};
pub use rotation::{RotationController, RotationEvent};
