//! Headless skirmish runner.
//!
//! Runs the simulation engine on its own thread at the tick rate and
//! feeds it player commands read from a line-oriented console.

pub mod console;
pub mod game_loop;
pub mod state;

pub use skirmish_core as core;
