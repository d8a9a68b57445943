//! Engines: direction-specific force generators derived from valid thrusters.
//!
//! Body frame: grid Up is forward (longitudinal), grid Right is lateral
//! right. Rotational acceleration is positive clockwise.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use skirmish_core::components::ThrustFlags;
use skirmish_core::enums::{ComponentKind, GridDirection};
use skirmish_core::types::GridCoord;

use crate::grid::ShipConfiguration;

/// Contributions smaller than this don't count as "contributing" to a flag.
const CONTRIBUTION_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engine {
    /// Cell of the owning thruster.
    pub coord: GridCoord,
    pub kind: ComponentKind,
    /// Direction the engine pushes the ship.
    pub direction: GridDirection,
    /// Offset from the centre of mass (grid frame).
    pub offset: DVec2,
    /// Full-output accelerations.
    pub longitudinal: f64,
    pub lateral: f64,
    pub rotational: f64,
    /// Spin-up level in [0, 1].
    pub profile: f64,
    pub firing: bool,
}

impl Engine {
    pub fn new(
        coord: GridCoord,
        kind: ComponentKind,
        direction: GridDirection,
        offset: DVec2,
        thrust: f64,
        mass: f64,
        inertia: f64,
    ) -> Self {
        let (dx, dy) = direction.grid_delta();
        let force = DVec2::new(dx as f64, dy as f64) * thrust;
        let (longitudinal, lateral) = if mass > 0.0 {
            (-force.y / mass, force.x / mass)
        } else {
            (0.0, 0.0)
        };
        let rotational = if inertia > 0.0 {
            (offset.x * force.y - offset.y * force.x) / inertia
        } else {
            0.0
        };
        Self {
            coord,
            kind,
            direction,
            offset,
            longitudinal,
            lateral,
            rotational,
            profile: 0.0,
            firing: false,
        }
    }

    /// Whether any set flag matches an acceleration this engine contributes to.
    pub fn should_fire(&self, flags: &ThrustFlags) -> bool {
        let e = CONTRIBUTION_EPSILON;
        let translation = (flags.forward && self.longitudinal > e)
            || (flags.backward && self.longitudinal < -e);
        if self.kind == ComponentKind::CruiseThruster {
            return translation;
        }
        translation
            || (flags.lateral_right && self.lateral > e)
            || (flags.lateral_left && self.lateral < -e)
            || (flags.rotate_right && self.rotational > e)
            || (flags.rotate_left && self.rotational < -e)
    }

    /// Ramp the profile one tick and return the scaled contribution.
    pub fn update(&mut self, flags: &ThrustFlags, ramp_ticks: u32) -> HullOutput {
        self.firing = self.should_fire(flags);
        let step = 1.0 / ramp_ticks.max(1) as f64;
        self.profile = if self.firing {
            (self.profile + step).min(1.0)
        } else {
            (self.profile - step).max(0.0)
        };
        if self.profile <= 0.0 {
            return HullOutput::default();
        }
        HullOutput {
            longitudinal: self.longitudinal * self.profile,
            lateral: self.lateral * self.profile,
            rotational: self.rotational * self.profile,
        }
    }
}

/// Summed body-frame acceleration of every engine this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HullOutput {
    pub longitudinal: f64,
    pub lateral: f64,
    pub rotational: f64,
}

impl std::ops::AddAssign for HullOutput {
    fn add_assign(&mut self, rhs: Self) {
        self.longitudinal += rhs.longitudinal;
        self.lateral += rhs.lateral;
        self.rotational += rhs.rotational;
    }
}

impl HullOutput {
    /// Linear acceleration in the world frame for a ship at `bearing_rad`.
    pub fn world_acceleration(&self, bearing_rad: f64) -> DVec2 {
        let forward = DVec2::new(bearing_rad.cos(), bearing_rad.sin());
        let right = DVec2::new(-bearing_rad.sin(), bearing_rad.cos());
        forward * self.longitudinal + right * self.lateral
    }
}

impl ShipConfiguration {
    /// Advance every engine one tick against the current flags.
    pub fn update_engines(&mut self, flags: &ThrustFlags) -> HullOutput {
        let ramp = self.tuning().ramp_ticks;
        let mut total = HullOutput::default();
        for engine in self.engines_mut() {
            total += engine.update(flags, ramp);
        }
        log::trace!(
            "hull output long {:.3} lat {:.3} rot {:.5}",
            total.longitudinal,
            total.lateral,
            total.rotational
        );
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(direction: GridDirection, offset: DVec2) -> Engine {
        Engine::new(
            GridCoord::new(0, 0),
            ComponentKind::RotateThruster,
            direction,
            offset,
            10.0,
            2.0,
            4.0,
        )
    }

    #[test]
    fn test_up_thrust_is_forward() {
        let e = engine(GridDirection::Up, DVec2::ZERO);
        assert!((e.longitudinal - 5.0).abs() < 1e-12);
        assert_eq!(e.lateral, 0.0);
        assert_eq!(e.rotational, 0.0, "thrust through the COM has no torque");
    }

    #[test]
    fn test_left_of_com_pushing_forward_turns_clockwise() {
        // Cell left of COM pushing up-screen swings the nose right.
        let e = engine(GridDirection::Up, DVec2::new(-10.0, 0.0));
        assert!(e.rotational > 0.0);
        let e = engine(GridDirection::Up, DVec2::new(10.0, 0.0));
        assert!(e.rotational < 0.0);
    }

    #[test]
    fn test_zero_inertia_has_no_rotation() {
        let e = Engine::new(
            GridCoord::new(0, 0),
            ComponentKind::RotateThruster,
            GridDirection::Right,
            DVec2::new(0.0, 10.0),
            10.0,
            1.0,
            0.0,
        );
        assert_eq!(e.rotational, 0.0);
        assert!(e.lateral > 0.0);
    }

    #[test]
    fn test_profile_ramps_up_and_down() {
        let mut e = engine(GridDirection::Up, DVec2::ZERO);
        let flags = ThrustFlags {
            forward: true,
            ..Default::default()
        };
        for i in 1..=4 {
            e.update(&flags, 4);
            assert!((e.profile - i as f64 / 4.0).abs() < 1e-12);
        }
        e.update(&flags, 4);
        assert_eq!(e.profile, 1.0, "profile saturates at 1");

        let idle = ThrustFlags::default();
        let out = e.update(&idle, 4);
        assert!((e.profile - 0.75).abs() < 1e-12);
        assert!(out.longitudinal > 0.0, "still contributing while spinning down");
        for _ in 0..10 {
            e.update(&idle, 4);
        }
        assert_eq!(e.profile, 0.0);
    }

    #[test]
    fn test_cruise_ignores_rotation_flags() {
        let e = Engine::new(
            GridCoord::new(0, 0),
            ComponentKind::CruiseThruster,
            GridDirection::Up,
            DVec2::new(-10.0, 0.0),
            10.0,
            1.0,
            1.0,
        );
        assert!(e.rotational > 0.0);
        let flags = ThrustFlags {
            rotate_right: true,
            ..Default::default()
        };
        assert!(!e.should_fire(&flags));
    }

    #[test]
    fn test_world_acceleration_axes() {
        let out = HullOutput {
            longitudinal: 1.0,
            lateral: 0.0,
            rotational: 0.0,
        };
        let a = out.world_acceleration(0.0);
        assert!((a - DVec2::new(1.0, 0.0)).length() < 1e-12);

        // Lateral right of an east-facing ship is down-screen.
        let out = HullOutput {
            longitudinal: 0.0,
            lateral: 1.0,
            rotational: 0.0,
        };
        let a = out.world_acceleration(0.0);
        assert!((a - DVec2::new(0.0, 1.0)).length() < 1e-12);
    }
}
