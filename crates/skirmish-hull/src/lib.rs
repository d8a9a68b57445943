//! Hull model for SKIRMISH.
//!
//! Component grid, mass properties, thruster line-of-sight,
//! engine spin-up and the per-cell thermal model.

pub use skirmish_core as core;

pub mod engine;
pub mod grid;
pub mod los;
pub mod thermal;

// Re-export key types for convenience.
pub use engine::{Engine, HullOutput};
pub use grid::{grid_to_world, Component, ShipConfiguration};
