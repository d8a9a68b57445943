//! Per-cell thermal model: heat generation, neighbour diffusion and radiation.
//!
//! Diffusion is computed from one snapshot of temperatures and applied after
//! every cell has been evaluated, so heat never cascades within a tick.

use std::collections::BTreeMap;

use skirmish_core::types::GridCoord;

use crate::grid::ShipConfiguration;

/// Temperature scaled into [0, 1] for display.
pub fn normalized_temperature(temperature: f64, max_temperature: f64) -> f64 {
    if max_temperature <= 0.0 {
        return 0.0;
    }
    (temperature / max_temperature).clamp(0.0, 1.0)
}

/// Per-cell temperature changes for one diffusion step. Sums to zero.
pub fn compute_heat_deltas(config: &ShipConfiguration) -> BTreeMap<GridCoord, f64> {
    let cells = config.cells();
    let conductivity = config.tuning().conductivity;
    let mut deltas: BTreeMap<GridCoord, f64> = cells.keys().map(|k| (*k, 0.0)).collect();

    for source in cells.values() {
        let mut outgoing = 0.0;
        let mut capacity = 0.0;
        let mut receivers = Vec::with_capacity(4);
        for n in source.coord.neighbours() {
            if let Some(dst) = cells.get(&n) {
                if source.temperature > dst.temperature {
                    outgoing += source.temperature - dst.temperature;
                    capacity += dst.heat_transfer_ratio;
                    receivers.push(dst);
                }
            }
        }
        if receivers.is_empty() || capacity <= 0.0 {
            continue;
        }
        outgoing *= conductivity;

        for dst in receivers {
            *deltas.entry(dst.coord).or_insert(0.0) +=
                outgoing * dst.heat_transfer_ratio / capacity;
        }
        *deltas.entry(source.coord).or_insert(0.0) -= outgoing;
    }
    deltas
}

/// Spread heat between adjacent cells.
pub fn diffuse(config: &mut ShipConfiguration) {
    let deltas = compute_heat_deltas(config);
    for (coord, delta) in deltas {
        if let Some(c) = config.cells_mut().get_mut(&coord) {
            c.temperature += delta;
        }
    }
}

/// Add per-tick heat from reactors and from engines proportional to their profile.
pub fn generate(config: &mut ShipConfiguration) {
    let table = config.tuning().components.clone();
    let engine_heat: Vec<(GridCoord, f64)> = config
        .engines()
        .iter()
        .filter(|e| e.profile > 0.0)
        .map(|e| (e.coord, table.get(e.kind).firing_heat * e.profile))
        .collect();

    for c in config.cells_mut().values_mut() {
        c.temperature += table.get(c.kind).heat_output;
    }
    for (coord, heat) in engine_heat {
        if let Some(c) = config.cells_mut().get_mut(&coord) {
            c.temperature += heat;
        }
    }
}

/// Shed heat from radiating components toward ambient.
pub fn radiate(config: &mut ShipConfiguration) {
    let table = config.tuning().components.clone();
    let ambient = config.tuning().ambient_temperature;
    for c in config.cells_mut().values_mut() {
        let rate = table.get(c.kind).radiation;
        if rate > 0.0 {
            c.temperature -= rate * (c.temperature - ambient);
        }
    }
}

/// One full thermal tick: generate, diffuse, radiate.
pub fn step(config: &mut ShipConfiguration) {
    generate(config);
    diffuse(config);
    radiate(config);
}
