//! Simulation engine for SKIRMISH.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces WorldSnapshots for the runner.

pub mod engine;
pub mod systems;
pub mod world_setup;

pub use skirmish_core as core;
pub use engine::{SimConfig, SimulationEngine};

#[cfg(test)]
mod tests;
