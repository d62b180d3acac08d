use std::ops::{AddAssign, Deref, DerefMut, MulAssign};

use super::{OdeState, StateVector};

/// A fixed-size state backed by an array, for models whose dimension is
/// known at compile time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StateArray<const N: usize>([f64; N]);

impl<const N: usize> StateArray<N> {
    pub fn new(array: [f64; N]) -> Self {
        Self(array)
    }
}

impl<const N: usize> Default for StateArray<N> {
    fn default() -> Self {
        Self([0.0; N])
    }
}

impl<const N: usize> AddAssign<&Self> for StateArray<N> {
    fn add_assign(&mut self, rhs: &Self) {
        for i in 0..N {
            self.0[i] += rhs.0[i];
        }
    }
}

impl<const N: usize> MulAssign<f64> for StateArray<N> {
    fn mul_assign(&mut self, rhs: f64) {
        for i in 0..N {
            self.0[i] *= rhs;
        }
    }
}

impl<const N: usize> Deref for StateArray<N> {
    type Target = [f64; N];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const N: usize> DerefMut for StateArray<N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<const N: usize> OdeState for StateArray<N> {
    fn dim(&self) -> usize {
        N
    }

    fn write_vector(&self, out: &mut StateVector) {
        out.resize(N);
        out.copy_from_slice(&self.0);
    }

    fn read_vector(&mut self, x: &StateVector) {
        debug_assert_eq!(x.len(), N);
        self.0.copy_from_slice(x);
    }
}
