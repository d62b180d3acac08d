use serde::{Deserialize, Serialize};
use std::ops::{AddAssign, Deref, DerefMut, MulAssign};

use super::OdeState;

/// A dynamic-sized vector type for use in ODE solvers.
///
/// Unlike `StateArray`, this type supports arbitrary lengths and stores its
/// data in a `Vec<f64>`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    value: Vec<f64>,
}

impl StateVector {
    /// Constructs a new `StateVector` from a `Vec<f64>`.
    pub fn new(value: Vec<f64>) -> Self {
        Self { value }
    }

    /// Constructs a new `StateVector` of `n` zeros.
    pub fn zeros(n: usize) -> Self {
        Self {
            value: vec![0.0; n],
        }
    }

    /// Resizes to `n` entries, zero-filling any growth.
    pub fn resize(&mut self, n: usize) {
        self.value.resize(n, 0.0);
    }

    /// Sets every entry to `v`.
    pub fn fill(&mut self, v: f64) {
        self.value.fill(v);
    }

    /// In-place `self += c * other`, the accumulation used by the
    /// Runge-Kutta stage loops.
    pub fn scaled_add(&mut self, c: f64, other: &Self) {
        debug_assert_eq!(self.value.len(), other.value.len());
        for (lhs, rhs) in self.value.iter_mut().zip(&other.value) {
            *lhs += c * rhs;
        }
    }
}

impl AddAssign<&Self> for StateVector {
    /// Performs element-wise addition of two `StateVector`s.
    fn add_assign(&mut self, rhs: &Self) {
        debug_assert_eq!(self.value.len(), rhs.value.len());
        for (lhs, rhs) in self.value.iter_mut().zip(&rhs.value) {
            *lhs += rhs;
        }
    }
}

impl MulAssign<f64> for StateVector {
    /// Multiplies each element in the vector by a scalar value.
    fn mul_assign(&mut self, rhs: f64) {
        for lhs in self.value.iter_mut() {
            *lhs *= rhs;
        }
    }
}

impl Deref for StateVector {
    type Target = Vec<f64>;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl DerefMut for StateVector {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.value
    }
}

impl OdeState for StateVector {
    fn dim(&self) -> usize {
        self.value.len()
    }

    fn write_vector(&self, out: &mut StateVector) {
        out.value.clone_from(&self.value);
    }

    fn read_vector(&mut self, x: &StateVector) {
        self.value.clone_from(&x.value);
    }
}
