use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::VectorError;

/// A 3-dimensional vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    /// Creates a new `Vector3` with the given components.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Computes the norm (magnitude) of the vector.
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Computes the dot product of `self` and `other`.
    pub fn dot(&self, other: Vector3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Computes the cross product of `self` and `rhs`.
    pub fn cross(&self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    /// Returns the unit vector in the same direction.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::ZeroMagnitude`] when the vector has zero
    /// magnitude and no direction is defined.
    pub fn unit(&self) -> Result<Vector3, VectorError> {
        let mag = self.magnitude();
        if mag < f64::EPSILON {
            return Err(VectorError::ZeroMagnitude);
        }
        Ok(Vector3::new(self.x / mag, self.y / mag, self.z / mag))
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Add<Vector3> for Vector3 {
    type Output = Self;
    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub<Vector3> for Vector3 {
    type Output = Self;
    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Self;
    fn mul(self, f: f64) -> Self {
        Vector3::new(self.x * f, self.y * f, self.z * f)
    }
}

impl Div<f64> for Vector3 {
    type Output = Self;
    fn div(self, f: f64) -> Self {
        Vector3::new(self.x / f, self.y / f, self.z / f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_add_then_sub_recovers_lhs() {
        let a = Vector3::new(1.0, -2.0, 3.5);
        let b = Vector3::new(0.25, 8.0, -1.5);
        let result = (a + b) - b;
        assert!((result.x - a.x).abs() < TOL);
        assert!((result.y - a.y).abs() < TOL);
        assert!((result.z - a.z).abs() < TOL);
    }

    #[test]
    fn test_cross_is_orthogonal() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(-4.0, 0.5, 2.0);
        let c = a.cross(b);
        assert!(
            c.dot(a).abs() < TOL,
            "cross product not orthogonal to lhs: {}",
            c.dot(a)
        );
        assert!(
            c.dot(b).abs() < TOL,
            "cross product not orthogonal to rhs: {}",
            c.dot(b)
        );
    }

    #[test]
    fn test_unit_has_magnitude_one() {
        let v = Vector3::new(2.0, -2.0, 1.0);
        let u = v.unit().unwrap();
        assert!(
            (u.magnitude() - 1.0).abs() < TOL,
            "Expected: {}, Actual: {}",
            1.0,
            u.magnitude()
        );
        assert!(v.cross(u).magnitude() < TOL, "unit vector is not parallel");
    }

    #[test]
    fn test_unit_of_zero_vector_fails() {
        assert_eq!(Vector3::default().unit(), Err(VectorError::ZeroMagnitude));
    }
}
