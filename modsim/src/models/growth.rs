use modsim_diffeq::{ModelError, OdeModel, OdeState, StateVector};
use serde::{Deserialize, Serialize};

/// Quadratic logistic population growth, `dp/dt = alpha p + beta p^2`.
///
/// With `alpha > 0` and `beta < 0` the net growth is zero at the carrying
/// capacity `-alpha / beta`. Population in billions, time in years.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct QuadraticGrowth {
    /// Linear growth rate, 1/year.
    pub alpha: f64,
    /// Quadratic crowding term, 1/(year * billion).
    pub beta: f64,
}

impl QuadraticGrowth {
    /// The equilibrium population at which net growth is zero.
    pub fn carrying_capacity(&self) -> f64 {
        -self.alpha / self.beta
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationState {
    /// Population, billions.
    pub population: f64,
}

impl OdeState for PopulationState {
    fn dim(&self) -> usize {
        1
    }

    fn write_vector(&self, out: &mut StateVector) {
        out.resize(1);
        out[0] = self.population;
    }

    fn read_vector(&mut self, x: &StateVector) {
        self.population = x[0];
    }

    fn headers(&self) -> Vec<String> {
        vec!["population".to_string()]
    }
}

impl OdeModel for QuadraticGrowth {
    type State = PopulationState;

    fn slope(
        &self,
        _t: f64,
        state: &Self::State,
        derivative: &mut Self::State,
    ) -> Result<(), ModelError> {
        let p = state.population;
        derivative.population = self.alpha * p + self.beta * p * p;
        Ok(())
    }
}
