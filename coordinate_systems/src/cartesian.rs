use super::polar::Polar;
use linear_algebra::Vector2;
use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Represents a point in planar Cartesian coordinates.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cartesian {
    pub x: f64,
    pub y: f64,
}

impl Cartesian {
    /// Creates a new `Cartesian` instance with the given components.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Polar> for Cartesian {
    /// Converts a `Polar` coordinate to a `Cartesian` coordinate.
    fn from(polar: Polar) -> Self {
        Cartesian::new(
            polar.radius * polar.azimuth.cos(),
            polar.radius * polar.azimuth.sin(),
        )
    }
}

impl From<Vector2> for Cartesian {
    fn from(v: Vector2) -> Self {
        Cartesian::new(v.x, v.y)
    }
}

impl From<Cartesian> for Vector2 {
    fn from(c: Cartesian) -> Self {
        Vector2::new(c.x, c.y)
    }
}

impl Add<Cartesian> for Cartesian {
    type Output = Self;

    fn add(self, rhs: Cartesian) -> Cartesian {
        Cartesian::new(self.x + rhs.x, self.y + rhs.y)
    }
}
