//! Core types and definitions for the SKIRMISH simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! bearings, components, commands, state snapshots, events, tuning
//! and constants. It has no dependency on the ECS or any runtime.

pub mod bearing;
pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

pub use bearing::Bearing;
pub use error::SimError;
