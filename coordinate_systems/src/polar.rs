use super::cartesian::Cartesian;
use linear_algebra::Vector2;
use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Represents a point in planar polar coordinates. Azimuth is the right hand
/// rotation angle about +z where +x is 0.
/// Unique values are not enforced (azimuth is unbounded and radius may be
/// negative). This is so that instabilities are easily detectable without
/// rolling over.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polar {
    pub radius: f64,
    pub azimuth: f64,
}

impl Polar {
    /// Creates a new `Polar` instance with the given radius and azimuth.
    pub fn new(radius: f64, azimuth: f64) -> Self {
        Self { radius, azimuth }
    }
}

impl From<Cartesian> for Polar {
    /// Converts a `Cartesian` coordinate to a `Polar` coordinate.
    fn from(cartesian: Cartesian) -> Self {
        let radius = (cartesian.x.powi(2) + cartesian.y.powi(2)).sqrt();
        let azimuth = cartesian.y.atan2(cartesian.x);
        Polar::new(radius, azimuth)
    }
}

impl From<Vector2> for Polar {
    fn from(v: Vector2) -> Self {
        Polar::from(Cartesian::from(v))
    }
}

impl From<Polar> for Vector2 {
    fn from(polar: Polar) -> Self {
        Vector2::from(Cartesian::from(polar))
    }
}

impl Add<Polar> for Polar {
    type Output = Self;

    /// Adds two `Polar` coordinates by converting them to `Cartesian`,
    /// performing the addition, and converting back to `Polar`.
    fn add(self, rhs: Polar) -> Polar {
        let lhs = Cartesian::from(self);
        let rhs = Cartesian::from(rhs);
        Polar::from(lhs + rhs)
    }
}
