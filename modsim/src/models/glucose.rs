use interpolation::Interpolant;
use modsim_diffeq::{ModelError, OdeModel, OdeState, StateVector};
use serde::{Deserialize, Serialize};

/// Two-compartment minimal model of glucose-insulin kinetics.
///
/// Follows the source measurement units rather than SI: glucose in mg/dL,
/// insulin in uU/mL, time in minutes. Measured insulin drives the model
/// through an interpolant, turning the discrete assay samples into the
/// continuous-time input `I(t)`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MinimalModel {
    /// Glucose effectiveness rate, 1/min.
    pub k1: f64,
    /// Remote insulin decay rate, 1/min.
    pub k2: f64,
    /// Insulin sensitivity rate, 1/min per (uU/mL).
    pub k3: f64,
    /// Basal glucose concentration, mg/dL.
    pub glucose_basal: f64,
    /// Basal insulin concentration, uU/mL.
    pub insulin_basal: f64,
    /// Measured insulin concentration over time.
    pub insulin: Interpolant,
}

/// Concentrations evolved by the minimal model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GlucoseState {
    /// Plasma glucose, mg/dL.
    pub glucose: f64,
    /// Remote insulin activity, 1/min.
    pub remote_insulin: f64,
}

impl GlucoseState {
    /// The basal fixed point of a model.
    pub fn basal(model: &MinimalModel) -> Self {
        Self {
            glucose: model.glucose_basal,
            remote_insulin: 0.0,
        }
    }
}

impl OdeState for GlucoseState {
    fn dim(&self) -> usize {
        2
    }

    fn write_vector(&self, out: &mut StateVector) {
        out.resize(2);
        out[0] = self.glucose;
        out[1] = self.remote_insulin;
    }

    fn read_vector(&mut self, x: &StateVector) {
        self.glucose = x[0];
        self.remote_insulin = x[1];
    }

    fn headers(&self) -> Vec<String> {
        vec!["glucose".to_string(), "remote_insulin".to_string()]
    }
}

impl OdeModel for MinimalModel {
    type State = GlucoseState;

    fn slope(
        &self,
        t: f64,
        state: &Self::State,
        derivative: &mut Self::State,
    ) -> Result<(), ModelError> {
        // A query outside the assay range aborts the run.
        let insulin = self.insulin.eval(t)?;
        derivative.glucose =
            -self.k1 * (state.glucose - self.glucose_basal) - state.remote_insulin * state.glucose;
        derivative.remote_insulin =
            self.k3 * (insulin - self.insulin_basal) - self.k2 * state.remote_insulin;
        Ok(())
    }
}
