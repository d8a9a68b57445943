//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

pub use glam::DVec2;

use crate::enums::GridDirection;

/// Integer cell coordinate on a hull grid. x = column, y = row (row 0 at the top).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell one step in `direction`.
    pub fn step(self, direction: GridDirection) -> Self {
        let (dx, dy) = direction.grid_delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// The four edge-adjacent cells.
    pub fn neighbours(self) -> [GridCoord; 4] {
        GridDirection::ALL.map(|d| self.step(d))
    }

    /// Whether this coordinate lies inside a square grid of `size` cells per side.
    pub fn in_bounds(self, size: i32) -> bool {
        (0..size).contains(&self.x) && (0..size).contains(&self.y)
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}
