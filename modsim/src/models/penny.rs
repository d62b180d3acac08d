use modsim_diffeq::{
    CrossingDirection, ModelError, OdeModel, OdeState, StateVector, ZeroCrossingEvent,
};
use serde::{Deserialize, Serialize};

/// A penny dropped from height, with optional quadratic air drag.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FallingPenny {
    /// Gravitational acceleration, m/s^2.
    pub g: f64,
    /// Mass, kg.
    pub mass: f64,
    /// Drag parameters; `None` models a vacuum.
    pub drag: Option<QuadraticDrag>,
}

impl Default for FallingPenny {
    /// A US penny in standard air.
    fn default() -> Self {
        Self {
            g: 9.8,
            mass: 2.5e-3,
            drag: Some(QuadraticDrag::default()),
        }
    }
}

/// Quadratic drag parameters, force magnitude `rho c_d A v^2 / 2`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct QuadraticDrag {
    /// Air density, kg/m^3.
    pub rho: f64,
    /// Drag coefficient.
    pub c_d: f64,
    /// Cross-sectional area, m^2.
    pub area: f64,
}

impl Default for QuadraticDrag {
    fn default() -> Self {
        // a 19 mm diameter disk falling face-on
        Self {
            rho: 1.2,
            c_d: 0.44,
            area: std::f64::consts::PI * 0.0095 * 0.0095,
        }
    }
}

impl QuadraticDrag {
    /// Drag force opposing the signed vertical velocity `v`.
    pub fn force(&self, v: f64) -> f64 {
        -0.5 * self.rho * self.c_d * self.area * v * v.abs()
    }
}

/// Vertical state of the penny.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PennyState {
    /// Height above the ground, m.
    pub height: f64,
    /// Signed vertical velocity, m/s (negative is downward).
    pub velocity: f64,
}

impl PennyState {
    pub fn dropped_from(height: f64) -> Self {
        Self {
            height,
            velocity: 0.0,
        }
    }
}

impl OdeState for PennyState {
    fn dim(&self) -> usize {
        2
    }

    fn write_vector(&self, out: &mut StateVector) {
        out.resize(2);
        out[0] = self.height;
        out[1] = self.velocity;
    }

    fn read_vector(&mut self, x: &StateVector) {
        self.height = x[0];
        self.velocity = x[1];
    }

    fn headers(&self) -> Vec<String> {
        vec!["height".to_string(), "velocity".to_string()]
    }
}

impl OdeModel for FallingPenny {
    type State = PennyState;

    fn slope(
        &self,
        _t: f64,
        state: &Self::State,
        derivative: &mut Self::State,
    ) -> Result<(), ModelError> {
        let drag_accel = match &self.drag {
            Some(drag) => drag.force(state.velocity) / self.mass,
            None => 0.0,
        };
        derivative.height = state.velocity;
        derivative.velocity = -self.g + drag_accel;
        Ok(())
    }
}

impl FallingPenny {
    /// Speed the drag force balances gravity at.
    pub fn terminal_velocity(&self) -> Option<f64> {
        self.drag
            .map(|drag| (2.0 * self.mass * self.g / (drag.rho * drag.c_d * drag.area)).sqrt())
    }
}

/// Terminal event: the penny reaches the ground.
pub fn ground_strike() -> ZeroCrossingEvent<PennyState> {
    ZeroCrossingEvent::new(|_t, state: &PennyState| state.height)
        .with_direction(CrossingDirection::Falling)
}

#[cfg(test)]
mod tests {
    use super::*;
    use modsim_diffeq::{AdaptiveStepControl, Method, OdeProblem, Status};

    #[test]
    fn test_vacuum_drop_from_381_m() {
        let penny = FallingPenny {
            g: 9.8,
            mass: 2.5e-3,
            drag: None,
        };
        let problem = OdeProblem::new(penny).with_event(ground_strike());
        let solution = problem
            .solve_adaptive(
                &PennyState::dropped_from(381.0),
                (0.0, 60.0),
                AdaptiveStepControl::default(),
                Method::DormandPrince45,
            )
            .unwrap();

        assert!(matches!(solution.status, Status::EventTerminated { .. }));
        let expected = (2.0 * 381.0 / 9.8_f64).sqrt(); // about 8.818 s
        let t_strike = solution.final_time().unwrap();
        assert!(
            (t_strike - expected).abs() < 1e-4,
            "Expected: {}, Actual: {}",
            expected,
            t_strike
        );
        assert!(solution.final_state().unwrap().height.abs() < 1e-6);
    }

    #[test]
    fn test_drag_limits_speed_to_terminal_velocity() {
        let penny = FallingPenny::default();
        let terminal = penny.terminal_velocity().unwrap();
        // about 18 m/s for a penny falling face-on
        assert!(
            (17.0..19.0).contains(&terminal),
            "terminal velocity: {terminal}"
        );

        let problem = OdeProblem::new(penny).with_event(ground_strike());
        let solution = problem
            .solve_adaptive(
                &PennyState::dropped_from(381.0),
                (0.0, 120.0),
                AdaptiveStepControl::default().with_tolerances(1e-8, 1e-10),
                Method::DormandPrince45,
            )
            .unwrap();

        assert!(matches!(solution.status, Status::EventTerminated { .. }));
        // drag makes the fall take far longer than the vacuum 8.8 s
        assert!(solution.final_time().unwrap() > 20.0);
        for (_, state) in solution.trajectory.iter() {
            assert!(state.velocity.abs() <= terminal * (1.0 + 1e-6));
        }
        let final_speed = solution.final_state().unwrap().velocity.abs();
        assert!(
            (final_speed - terminal).abs() < 0.01 * terminal,
            "Expected: {}, Actual: {}",
            terminal,
            final_speed
        );
    }

    #[test]
    fn test_state_round_trip_preserves_field_order() {
        let state = PennyState {
            height: 5.0,
            velocity: -1.0,
        };
        let mut flat = StateVector::zeros(0);
        state.write_vector(&mut flat);
        assert_eq!(*flat, vec![5.0, -1.0]);
        let mut back = PennyState::default();
        back.read_vector(&flat);
        assert_eq!(state, back);
    }
}
