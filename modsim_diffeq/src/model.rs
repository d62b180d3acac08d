use std::fmt::Debug;

use crate::{error::ModelError, state::OdeState};

/// Trait for defining a dynamical system model that can be numerically
/// integrated.
///
/// The implementing type is the system's parameter record (masses, rates,
/// drag coefficients) and is immutable for the duration of one solve; a new
/// configuration is a new value. The associated state is the named record of
/// quantities whose evolution is being modeled.
pub trait OdeModel: Debug {
    type State: OdeState;

    /// Compute the derivative at time `t` and state `state`, storing the
    /// result in `derivative`.
    ///
    /// The derivative must have the same shape as the state, one entry per
    /// field in field order. An error aborts the run immediately.
    fn slope(
        &self,
        t: f64,
        state: &Self::State,
        derivative: &mut Self::State,
    ) -> Result<(), ModelError>;
}
