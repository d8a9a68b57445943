//! Player commands sent from the runner to the simulation.
//!
//! Commands are queued and applied at the next tick boundary, before any
//! system runs.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Hull configuration ---
    /// Place (or replace) a component on the player's hull grid.
    AddComponent {
        kind: ComponentKind,
        x: i32,
        y: i32,
        #[serde(default)]
        direction: Option<GridDirection>,
    },
    /// Clear a hull grid cell.
    RemoveComponent { x: i32, y: i32 },

    // --- Manoeuvring ---
    /// Hold or release a translation thrust flag.
    SetThrust {
        direction: ThrustDirection,
        active: bool,
    },
    /// Turn the player by a relative angle. Positive is clockwise.
    Rotate { degrees: f64 },

    // --- World ---
    /// Spawn the player and the hostile missile wave.
    StartScenario,
    /// Spawn one hostile missile at a player-frame position, heading `bearing` radians.
    SpawnMissile { x: f64, y: f64, bearing: f64 },

    // --- Simulation control ---
    /// Set time scale (1.0 = normal, 0.0 = frozen: commands apply, time stands still).
    SetTimeScale { scale: f64 },
    Pause,
    Resume,
}
