//! ShipConfiguration: coordinate-keyed component arena with derived mass properties.
//!
//! The arena is the single owner of every [`Component`]. Derived data
//! (mass, centre of mass, inertia, validity flags, engines) is recomputed
//! in full before any mutating call returns.

use std::collections::BTreeMap;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use skirmish_core::components::Sensor;
use skirmish_core::config::{HullTuning, SensorTuning};
use skirmish_core::enums::{ComponentKind, GridDirection, TurnDirection};
use skirmish_core::error::SimError;
use skirmish_core::state::{ComponentView, EngineView, HullView};
use skirmish_core::types::GridCoord;

use crate::engine::Engine;
use crate::los;
use crate::thermal;

/// One occupied hull cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub kind: ComponentKind,
    pub coord: GridCoord,
    pub temperature: f64,
    pub mass: f64,
    pub heat_transfer_ratio: f64,
    /// False for a thruster with no clear exhaust path.
    pub valid: bool,
    pub direction: Option<GridDirection>,
}

/// A ship's hull grid and everything derived from it.
#[derive(Debug, Clone)]
pub struct ShipConfiguration {
    tuning: HullTuning,
    cells: BTreeMap<GridCoord, Component>,
    mass: f64,
    centre_of_mass: DVec2,
    inertia: f64,
    engines: Vec<Engine>,
}

impl ShipConfiguration {
    /// Empty hull.
    pub fn new(tuning: HullTuning) -> Self {
        Self {
            tuning,
            cells: BTreeMap::new(),
            mass: 0.0,
            centre_of_mass: DVec2::ZERO,
            inertia: 0.0,
            engines: Vec::new(),
        }
    }

    pub fn tuning(&self) -> &HullTuning {
        &self.tuning
    }

    pub fn grid_size(&self) -> i32 {
        self.tuning.grid_size
    }

    /// Place a component, replacing whatever occupied the cell.
    pub fn add_component(
        &mut self,
        kind: ComponentKind,
        coord: GridCoord,
        direction: Option<GridDirection>,
    ) -> Result<(), SimError> {
        self.check_bounds(coord)?;
        if kind == ComponentKind::CruiseThruster && direction.is_none() {
            return Err(SimError::MissingDirection(kind));
        }

        let spec = self.tuning.components.get(kind);
        let component = Component {
            kind,
            coord,
            temperature: self.tuning.ambient_temperature,
            mass: spec.mass,
            heat_transfer_ratio: spec.heat_transfer_ratio,
            valid: true,
            direction,
        };
        if let Some(old) = self.cells.insert(coord, component) {
            log::debug!("replaced {:?} at ({}, {})", old.kind, coord.x, coord.y);
        }
        self.recompute();
        log::debug!(
            "added {kind:?} at ({}, {}): mass {:.1}, {} engines",
            coord.x,
            coord.y,
            self.mass,
            self.engines.len()
        );
        Ok(())
    }

    /// Clear a cell. Returns the removed component, or `None` if it was empty.
    pub fn remove_component(&mut self, coord: GridCoord) -> Result<Option<Component>, SimError> {
        self.check_bounds(coord)?;
        let removed = self.cells.remove(&coord);
        if let Some(c) = &removed {
            self.recompute();
            log::debug!(
                "removed {:?} at ({}, {}): {} engines",
                c.kind,
                coord.x,
                coord.y,
                self.engines.len()
            );
        }
        Ok(removed)
    }

    fn check_bounds(&self, coord: GridCoord) -> Result<(), SimError> {
        if coord.in_bounds(self.tuning.grid_size) {
            Ok(())
        } else {
            Err(SimError::OutOfBounds {
                coord,
                size: self.tuning.grid_size,
            })
        }
    }

    pub fn component(&self, coord: GridCoord) -> Option<&Component> {
        self.cells.get(&coord)
    }

    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.cells.values()
    }

    pub fn is_occupied(&self, coord: GridCoord) -> bool {
        self.cells.contains_key(&coord)
    }

    pub(crate) fn cells(&self) -> &BTreeMap<GridCoord, Component> {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut BTreeMap<GridCoord, Component> {
        &mut self.cells
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Centre of mass in grid-frame meters, relative to the grid centre.
    pub fn centre_of_mass(&self) -> DVec2 {
        self.centre_of_mass
    }

    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    pub fn engines(&self) -> &[Engine] {
        &self.engines
    }

    pub(crate) fn engines_mut(&mut self) -> &mut [Engine] {
        &mut self.engines
    }

    /// Physical offset of a cell centre from the grid centre (grid frame, y down).
    pub fn cell_offset(&self, coord: GridCoord) -> DVec2 {
        let half = self.tuning.grid_size as f64 / 2.0;
        DVec2::new(coord.x as f64 + 0.5 - half, coord.y as f64 + 0.5 - half)
            * self.tuning.block_size
    }

    /// Rebuild every derived property. Order matters: inertia needs the final COM.
    fn recompute(&mut self) {
        let (mass, com) = self.mass_properties();
        self.mass = mass;
        self.centre_of_mass = com;
        self.inertia = self.rotational_inertia(com);
        self.refresh_validity();
        self.engines = self.build_engines();
    }

    fn mass_properties(&self) -> (f64, DVec2) {
        let mut mass = 0.0;
        let mut moment = DVec2::ZERO;
        for c in self.cells.values() {
            mass += c.mass;
            moment += self.cell_offset(c.coord) * c.mass;
        }
        if mass > 0.0 {
            (mass, moment / mass)
        } else {
            (0.0, DVec2::ZERO)
        }
    }

    fn rotational_inertia(&self, com: DVec2) -> f64 {
        self.cells
            .values()
            .map(|c| c.mass * self.cell_offset(c.coord).distance_squared(com))
            .sum()
    }

    fn refresh_validity(&mut self) {
        let size = self.tuning.grid_size;
        let flags: Vec<(GridCoord, bool)> = self
            .cells
            .values()
            .filter(|c| c.kind.is_thruster())
            .map(|c| (c.coord, !los::valid_directions(&self.cells, c, size).is_empty()))
            .collect();
        for (coord, valid) in flags {
            if let Some(c) = self.cells.get_mut(&coord) {
                c.valid = valid;
            }
        }
    }

    fn build_engines(&self) -> Vec<Engine> {
        let size = self.tuning.grid_size;
        let mut engines = Vec::new();
        for c in self.cells.values().filter(|c| c.kind.is_thruster()) {
            let thrust = self.tuning.components.get(c.kind).thrust;
            let offset = self.cell_offset(c.coord) - self.centre_of_mass;
            for direction in los::valid_directions(&self.cells, c, size) {
                engines.push(Engine::new(
                    c.coord,
                    c.kind,
                    direction,
                    offset,
                    thrust,
                    self.mass,
                    self.inertia,
                ));
            }
        }
        engines
    }

    /// Sum of full rotational acceleration available in one turn direction.
    pub fn max_rotate_acceleration(&self, direction: TurnDirection) -> f64 {
        self.engines
            .iter()
            .map(|e| e.rotational * direction.sign())
            .filter(|r| *r > 0.0)
            .sum()
    }

    /// Sensors contributed by sensor mounts.
    pub fn mounted_sensors(&self, tuning: &SensorTuning) -> Vec<Sensor> {
        self.cells
            .values()
            .filter(|c| c.kind == ComponentKind::SensorMount)
            .map(|c| match c.direction {
                Some(d) => Sensor::new(tuning.mounted_range, d.body_angle(), tuning.mounted_arc),
                None => Sensor::omni(tuning.mounted_range),
            })
            .collect()
    }

    /// Display view. `world_origin` and `bearing_rad` place the centre of rotation.
    pub fn view(&self, world_origin: DVec2, bearing_rad: f64) -> HullView {
        let max_t = self.tuning.max_temperature;
        let components = self
            .cells
            .values()
            .map(|c| ComponentView {
                kind: c.kind,
                coord: c.coord,
                temperature: thermal::normalized_temperature(c.temperature, max_t),
                valid: c.valid,
                direction: c.direction,
                offset: self.cell_offset(c.coord),
            })
            .collect();
        let engines = self
            .engines
            .iter()
            .map(|e| EngineView {
                coord: e.coord,
                direction: e.direction,
                profile: e.profile,
                firing: e.firing,
                temperature: self
                    .cells
                    .get(&e.coord)
                    .map(|c| thermal::normalized_temperature(c.temperature, max_t))
                    .unwrap_or(0.0),
            })
            .collect();

        HullView {
            grid_size: self.tuning.grid_size,
            block_size: self.tuning.block_size,
            components,
            engines,
            mass: self.mass,
            inertia: self.inertia,
            centre_of_mass: self.centre_of_mass,
            centre_of_rotation: world_origin + grid_to_world(self.centre_of_mass, bearing_rad),
        }
    }
}

/// Rotate a grid-frame vector (forward = -y) into the world frame for a bearing.
pub fn grid_to_world(v: DVec2, bearing_rad: f64) -> DVec2 {
    let forward = DVec2::new(bearing_rad.cos(), bearing_rad.sin());
    let right = DVec2::new(-bearing_rad.sin(), bearing_rad.cos());
    forward * -v.y + right * v.x
}
