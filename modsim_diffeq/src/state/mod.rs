//! State representations for ODE solving.
//!
//! A model's state is a named, fixed-shape record. The solver only ever works
//! on the flattened [`StateVector`] form; the driver translates between the
//! two at the slope-function boundary. Field order is significant and must
//! match between `write_vector` and `read_vector`.

use std::fmt::Debug;

pub mod state_array;
pub mod state_vector;

pub use state_array::StateArray;
pub use state_vector::StateVector;

/// Trait representing a state that can be flattened to and from a plain
/// numeric vector for use in the ODE solvers.
pub trait OdeState: Clone + Default + Debug + 'static {
    /// Number of scalar fields in the state.
    fn dim(&self) -> usize;

    /// Writes the fields into `out` in field order, resizing `out` to
    /// [`dim`](OdeState::dim) entries.
    fn write_vector(&self, out: &mut StateVector);

    /// Reads the fields from `x` in field order. The driver guarantees
    /// `x.len() == self.dim()` after initial validation.
    fn read_vector(&mut self, x: &StateVector);

    /// Column labels used when writing a trajectory to file.
    fn headers(&self) -> Vec<String> {
        (0..self.dim()).map(|i| format!("x{i}")).collect()
    }
}
