use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::VectorError;

/// A 2-dimensional vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    /// Creates a new `Vector2` with the given components.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Computes the norm (magnitude) of the vector.
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Computes the dot product of `self` and `other`.
    pub fn dot(&self, other: Vector2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Returns the unit vector in the same direction.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::ZeroMagnitude`] when the vector has zero
    /// magnitude and no direction is defined.
    pub fn unit(&self) -> Result<Vector2, VectorError> {
        let mag = self.magnitude();
        if mag < f64::EPSILON {
            return Err(VectorError::ZeroMagnitude);
        }
        Ok(Vector2::new(self.x / mag, self.y / mag))
    }

    /// The z-component of the cross product when both vectors are embedded
    /// in the x-y plane. Zero for parallel vectors.
    pub fn cross(&self, other: Vector2) -> f64 {
        self.x * other.y - self.y * other.x
    }
}

impl Neg for Vector2 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

impl Add<Vector2> for Vector2 {
    type Output = Self;
    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub<Vector2> for Vector2 {
    type Output = Self;
    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;
    fn mul(self, f: f64) -> Self {
        Vector2::new(self.x * f, self.y * f)
    }
}

impl Div<f64> for Vector2 {
    type Output = Self;
    fn div(self, f: f64) -> Self {
        Vector2::new(self.x / f, self.y / f)
    }
}
