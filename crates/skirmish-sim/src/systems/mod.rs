//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They own no state; everything lives in components.

pub mod cleanup;
pub mod guidance;
pub mod kinematics;
pub mod propulsion;
pub mod sensors;
pub mod snapshot;
pub mod thermal;
pub mod tracking;
