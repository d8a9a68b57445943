//! Thruster exhaust line-of-sight on the hull grid.
//!
//! A thruster pushes the ship in its thrust direction, so its exhaust leaves
//! the opposite way. The exhaust needs a clear straight path from the
//! thruster's cell to the grid boundary.

use std::collections::BTreeMap;

use skirmish_core::enums::{ComponentKind, GridDirection};
use skirmish_core::types::GridCoord;

use crate::grid::Component;

/// Whether the exhaust of a thruster at `from` pushing toward `thrust` is unobstructed.
pub fn exhaust_clear(
    cells: &BTreeMap<GridCoord, Component>,
    from: GridCoord,
    thrust: GridDirection,
    grid_size: i32,
) -> bool {
    let exhaust = thrust.opposite();
    let mut cell = from.step(exhaust);
    while cell.in_bounds(grid_size) {
        if cells.contains_key(&cell) {
            return false;
        }
        cell = cell.step(exhaust);
    }
    true
}

/// Thrust directions in which `component` can fire. Empty for non-thrusters.
pub fn valid_directions(
    cells: &BTreeMap<GridCoord, Component>,
    component: &Component,
    grid_size: i32,
) -> Vec<GridDirection> {
    let candidates: Vec<GridDirection> = match component.kind {
        ComponentKind::RotateThruster => GridDirection::ALL.to_vec(),
        ComponentKind::CruiseThruster => component.direction.into_iter().collect(),
        _ => Vec::new(),
    };
    candidates
        .into_iter()
        .filter(|d| exhaust_clear(cells, component.coord, *d, grid_size))
        .collect()
}
