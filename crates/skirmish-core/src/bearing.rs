//! Normalized heading angle with wraparound arithmetic.
//!
//! Angles grow clockwise on screen (y pointing down), so a positive delta
//! is a right turn. The stored value is always in `[0, 2π)`.

use std::f64::consts::{PI, TAU};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use glam::DVec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Bearing(f64);

impl Bearing {
    pub fn new(raw: f64) -> Self {
        Self(normalize(raw))
    }

    /// Heading of a direction vector. A zero vector maps to 0.
    pub fn from_vector(v: DVec2) -> Self {
        if v.length_squared() == 0.0 {
            return Self(0.0);
        }
        Self::new(v.y.atan2(v.x))
    }

    /// Bearing from `from` toward `to`.
    pub fn between(from: DVec2, to: DVec2) -> Self {
        Self::from_vector(to - from)
    }

    pub fn radians(self) -> f64 {
        self.0
    }

    pub fn degrees(self) -> f64 {
        self.0.to_degrees()
    }

    /// Unit vector pointing along this bearing.
    pub fn unit_vector(self) -> DVec2 {
        DVec2::new(self.0.cos(), self.0.sin())
    }

    /// Signed shortest-arc delta from this bearing to `angle`, in `(-π, π]`.
    pub fn delta_to(self, angle: f64) -> f64 {
        let d = (angle - self.0).rem_euclid(TAU);
        if d > PI {
            d - TAU
        } else {
            d
        }
    }

    pub fn delta_to_bearing(self, other: Bearing) -> f64 {
        self.delta_to(other.0)
    }

    /// Whether this bearing lies within `width / 2` either side of `centre`.
    pub fn within_arc(self, centre: f64, width: f64) -> bool {
        if width >= TAU {
            return true;
        }
        Bearing::new(centre).delta_to(self.0).abs() <= width * 0.5
    }
}

fn normalize(raw: f64) -> f64 {
    if !raw.is_finite() {
        return 0.0;
    }
    let r = raw.rem_euclid(TAU);
    // rem_euclid can round tiny negatives up to exactly TAU
    if r >= TAU {
        0.0
    } else {
        r
    }
}

impl From<f64> for Bearing {
    fn from(raw: f64) -> Self {
        Self::new(raw)
    }
}

impl From<Bearing> for f64 {
    fn from(b: Bearing) -> Self {
        b.0
    }
}

impl fmt::Display for Bearing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.degrees())
    }
}

impl Add<f64> for Bearing {
    type Output = Bearing;

    fn add(self, delta: f64) -> Bearing {
        Bearing::new(self.0 + delta)
    }
}

impl Sub<f64> for Bearing {
    type Output = Bearing;

    fn sub(self, delta: f64) -> Bearing {
        Bearing::new(self.0 - delta)
    }
}

impl Add for Bearing {
    type Output = Bearing;

    fn add(self, other: Bearing) -> Bearing {
        Bearing::new(self.0 + other.0)
    }
}

impl Sub for Bearing {
    type Output = Bearing;

    fn sub(self, other: Bearing) -> Bearing {
        Bearing::new(self.0 - other.0)
    }
}

impl AddAssign<f64> for Bearing {
    fn add_assign(&mut self, delta: f64) {
        *self = *self + delta;
    }
}

impl SubAssign<f64> for Bearing {
    fn sub_assign(&mut self, delta: f64) {
        *self = *self - delta;
    }
}
