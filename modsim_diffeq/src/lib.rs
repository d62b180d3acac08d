//! Event-aware initial-value-problem solving.
//!
//! A caller builds a model (the typed parameter record plus a slope
//! function), wraps it in an [`OdeProblem`], optionally registers
//! [`ZeroCrossingEvent`]s, and solves over a time span. The result is a
//! time-indexed [`Trajectory`](solution::Trajectory) plus outcome metadata:
//! status, detected event times, and step diagnostics.
//!
//! All quantities follow the workspace unit convention: SI units with time
//! in seconds.

pub mod error;
pub mod events;
pub mod model;
mod rk;
pub mod solution;
mod solver;
pub mod state;
pub mod stepping;
pub mod sweep;
pub mod tableau;

pub use error::{ModelError, OdeError};
pub use events::{CrossingDirection, EventOccurrence, ZeroCrossingEvent};
pub use model::OdeModel;
pub use solution::{FailureReason, OdeSolution, Stats, Status, Trajectory};
pub use state::{OdeState, StateArray, StateVector};
pub use stepping::{AdaptiveStepControl, FixedStepControl, StepPidControl};

use solver::StepMode;
use tableau::ButcherTableau;

/// Enum representing the available integration methods.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Method {
    /// Classical Runge-Kutta 4th-order method. Fixed-step only.
    Rk4,
    /// Bogacki-Shampine 3(2) embedded pair.
    BogackiShampine23,
    /// Dormand-Prince 4(5) embedded pair.
    #[default]
    DormandPrince45,
}

/// Container for a complete ODE simulation problem: the model plus any
/// zero-crossing events.
///
/// Solving borrows the problem immutably, so the same problem can be solved
/// repeatedly (or concurrently from a sweep) with identical results.
pub struct OdeProblem<Model: OdeModel> {
    model: Model,
    events: Vec<ZeroCrossingEvent<Model::State>>,
}

impl<Model: OdeModel> OdeProblem<Model> {
    /// Creates a new `OdeProblem` for the given model.
    pub fn new(model: Model) -> Self {
        Self {
            model,
            events: Vec::new(),
        }
    }

    /// Registers a zero-crossing event, evaluated after every accepted step.
    pub fn with_event(mut self, event: ZeroCrossingEvent<Model::State>) -> Self {
        self.events.push(event);
        self
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Solves with adaptive step-size control.
    ///
    /// # Errors
    ///
    /// `Rk4` has no embedded error estimate and is rejected here; use
    /// [`solve_fixed`](Self::solve_fixed) for it. Shape mismatches and slope
    /// failures are returned as [`OdeError`]; solver-convergence failure is
    /// reported through the solution's status instead.
    pub fn solve_adaptive(
        &self,
        x0: &Model::State,
        tspan: (f64, f64),
        control: AdaptiveStepControl,
        method: Method,
    ) -> Result<OdeSolution<Model::State>, OdeError> {
        match method {
            Method::Rk4 => Err(OdeError::Configuration(
                "Rk4 cannot be used with adaptive step control".to_string(),
            )),
            Method::BogackiShampine23 => solver::integrate(
                &self.model,
                &self.events,
                x0,
                tspan,
                ButcherTableau::<4>::BOGACKISHAMPINE23,
                StepMode::Adaptive(control),
            ),
            Method::DormandPrince45 => solver::integrate(
                &self.model,
                &self.events,
                x0,
                tspan,
                ButcherTableau::<7>::DORMANDPRINCE45,
                StepMode::Adaptive(control),
            ),
        }
    }

    /// Solves with a constant step size, landing exactly on the end time.
    pub fn solve_fixed(
        &self,
        x0: &Model::State,
        tspan: (f64, f64),
        dt: f64,
        method: Method,
    ) -> Result<OdeSolution<Model::State>, OdeError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(OdeError::Configuration(format!(
                "fixed step size must be positive and finite, got {dt}"
            )));
        }
        let control = FixedStepControl::new(dt);
        match method {
            Method::Rk4 => solver::integrate(
                &self.model,
                &self.events,
                x0,
                tspan,
                ButcherTableau::<4>::RK4,
                StepMode::Fixed(control),
            ),
            Method::BogackiShampine23 => solver::integrate(
                &self.model,
                &self.events,
                x0,
                tspan,
                ButcherTableau::<4>::BOGACKISHAMPINE23,
                StepMode::Fixed(control),
            ),
            Method::DormandPrince45 => solver::integrate(
                &self.model,
                &self.events,
                x0,
                tspan,
                ButcherTableau::<7>::DORMANDPRINCE45,
                StepMode::Fixed(control),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Constant downward acceleration; state is [height, velocity].
    #[derive(Debug)]
    struct ConstantAccel {
        g: f64,
    }

    impl OdeModel for ConstantAccel {
        type State = StateArray<2>;

        fn slope(
            &self,
            _t: f64,
            state: &Self::State,
            derivative: &mut Self::State,
        ) -> Result<(), ModelError> {
            derivative[0] = state[1];
            derivative[1] = -self.g;
            Ok(())
        }
    }

    /// dy/dt = -y, solution e^(-t).
    #[derive(Debug)]
    struct ExponentialDecay;

    impl OdeModel for ExponentialDecay {
        type State = StateArray<1>;

        fn slope(
            &self,
            _t: f64,
            state: &Self::State,
            derivative: &mut Self::State,
        ) -> Result<(), ModelError> {
            derivative[0] = -state[0];
            Ok(())
        }
    }

    /// Simple harmonic oscillator; state is [x, v].
    #[derive(Debug)]
    struct Oscillator;

    impl OdeModel for Oscillator {
        type State = StateArray<2>;

        fn slope(
            &self,
            _t: f64,
            state: &Self::State,
            derivative: &mut Self::State,
        ) -> Result<(), ModelError> {
            derivative[0] = state[1];
            derivative[1] = -state[0];
            Ok(())
        }
    }

    /// dy/dt = y^2 blows up at t = 1 from y(0) = 1.
    #[derive(Debug)]
    struct FiniteTimeBlowup;

    impl OdeModel for FiniteTimeBlowup {
        type State = StateArray<1>;

        fn slope(
            &self,
            _t: f64,
            state: &Self::State,
            derivative: &mut Self::State,
        ) -> Result<(), ModelError> {
            derivative[0] = state[0] * state[0];
            Ok(())
        }
    }

    #[test]
    fn test_free_fall_event_time() {
        // 381 m drop under g = 9.8 ignoring drag: strike at sqrt(2 * 381 / 9.8)
        let problem = OdeProblem::new(ConstantAccel { g: 9.8 }).with_event(
            ZeroCrossingEvent::new(|_t, state: &StateArray<2>| state[0])
                .with_direction(CrossingDirection::Falling),
        );
        let x0 = StateArray::new([381.0, 0.0]);
        let solution = problem
            .solve_adaptive(
                &x0,
                (0.0, 30.0),
                AdaptiveStepControl::default(),
                Method::DormandPrince45,
            )
            .unwrap();

        let expected = (2.0 * 381.0 / 9.8_f64).sqrt();
        assert!(solution.success());
        assert!(matches!(
            solution.status,
            Status::EventTerminated { event: 0, .. }
        ));
        let t_strike = solution.final_time().unwrap();
        assert!(
            (t_strike - expected).abs() < 1e-6,
            "Expected: {}, Actual: {}",
            expected,
            t_strike
        );
        let height = solution.final_state().unwrap()[0];
        assert!(height.abs() < 1e-6, "height at strike: {height}");
        assert_eq!(solution.events.len(), 1);
        assert!((solution.events[0].t - expected).abs() < 1e-6);
    }

    #[test]
    fn test_solver_is_deterministic() {
        let problem = OdeProblem::new(ConstantAccel { g: 9.8 });
        let x0 = StateArray::new([100.0, 0.0]);
        let control = AdaptiveStepControl::default();
        let a = problem
            .solve_adaptive(&x0, (0.0, 3.0), control, Method::DormandPrince45)
            .unwrap();
        let b = problem
            .solve_adaptive(&x0, (0.0, 3.0), control, Method::DormandPrince45)
            .unwrap();
        assert_eq!(a.trajectory, b.trajectory);
        assert_eq!(a.stats, b.stats);
    }

    #[test]
    fn test_adaptive_decay_matches_closed_form() {
        let problem = OdeProblem::new(ExponentialDecay);
        let x0 = StateArray::new([1.0]);
        let control = AdaptiveStepControl::default().with_tolerances(1e-8, 1e-10);
        let solution = problem
            .solve_adaptive(&x0, (0.0, 2.0), control, Method::DormandPrince45)
            .unwrap();

        assert_eq!(solution.status, Status::Complete);
        assert_eq!(solution.final_time().unwrap(), 2.0);
        approx::assert_abs_diff_eq!(
            solution.final_state().unwrap()[0],
            (-2.0_f64).exp(),
            epsilon = 1e-7
        );
        assert!(solution.stats.accepted > 0);
        assert!(solution.stats.function_evals > solution.stats.accepted);
    }

    #[test]
    fn test_bogacki_shampine_solves_decay() {
        let problem = OdeProblem::new(ExponentialDecay);
        let x0 = StateArray::new([1.0]);
        let control = AdaptiveStepControl::default().with_tolerances(1e-8, 1e-10);
        let solution = problem
            .solve_adaptive(&x0, (0.0, 2.0), control, Method::BogackiShampine23)
            .unwrap();
        assert_eq!(solution.status, Status::Complete);
        approx::assert_abs_diff_eq!(
            solution.final_state().unwrap()[0],
            (-2.0_f64).exp(),
            epsilon = 1e-5
        );
        // the lower-order pair needs more steps than Dormand-Prince at the
        // same tolerance
        let dp = problem
            .solve_adaptive(&x0, (0.0, 2.0), control, Method::DormandPrince45)
            .unwrap();
        assert!(solution.stats.accepted > dp.stats.accepted);
    }

    #[test]
    fn test_pid_step_control_solves_decay() {
        let problem = OdeProblem::new(ExponentialDecay);
        let x0 = StateArray::new([1.0]);
        let control = AdaptiveStepControl::default()
            .with_tolerances(1e-8, 1e-10)
            .with_pid_control(StepPidControl::default());
        let solution = problem
            .solve_adaptive(&x0, (0.0, 2.0), control, Method::DormandPrince45)
            .unwrap();
        assert_eq!(solution.status, Status::Complete);
        approx::assert_abs_diff_eq!(
            solution.final_state().unwrap()[0],
            (-2.0_f64).exp(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_fixed_step_rk4_decay() {
        let problem = OdeProblem::new(ExponentialDecay);
        let x0 = StateArray::new([1.0]);
        let solution = problem
            .solve_fixed(&x0, (0.0, 2.0), 0.01, Method::Rk4)
            .unwrap();

        assert_eq!(solution.status, Status::Complete);
        let expected = (-2.0_f64).exp();
        let actual = solution.final_state().unwrap()[0];
        assert!(
            (actual - expected).abs() < 1e-9,
            "Expected: {}, Actual: {}",
            expected,
            actual
        );
        // strictly increasing sample times, ending exactly at t_end
        for pair in solution.trajectory.t.windows(2) {
            assert!(pair[1] > pair[0]);
        }
        assert_eq!(*solution.trajectory.t.last().unwrap(), 2.0);
    }

    #[test]
    fn test_fixed_step_event_detection() {
        let problem = OdeProblem::new(ConstantAccel { g: 9.8 }).with_event(
            ZeroCrossingEvent::new(|_t, state: &StateArray<2>| state[0])
                .with_direction(CrossingDirection::Falling),
        );
        let x0 = StateArray::new([381.0, 0.0]);
        let solution = problem
            .solve_fixed(&x0, (0.0, 30.0), 0.05, Method::Rk4)
            .unwrap();

        let expected = (2.0 * 381.0 / 9.8_f64).sqrt();
        assert!(matches!(solution.status, Status::EventTerminated { .. }));
        approx::assert_abs_diff_eq!(solution.final_time().unwrap(), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_rk4_rejects_adaptive_control() {
        let problem = OdeProblem::new(ExponentialDecay);
        let x0 = StateArray::new([1.0]);
        let result = problem.solve_adaptive(
            &x0,
            (0.0, 1.0),
            AdaptiveStepControl::default(),
            Method::Rk4,
        );
        assert!(matches!(result, Err(OdeError::Configuration(_))));
    }

    #[test]
    fn test_non_terminal_event_records_and_continues() {
        // x = cos(t) crosses zero at pi/2, 3pi/2, 5pi/2 within [0, 10]
        let problem = OdeProblem::new(Oscillator).with_event(
            ZeroCrossingEvent::new(|_t, state: &StateArray<2>| state[0]).with_terminal(false),
        );
        let x0 = StateArray::new([1.0, 0.0]);
        let solution = problem
            .solve_adaptive(
                &x0,
                (0.0, 10.0),
                AdaptiveStepControl::default().with_tolerances(1e-8, 1e-10),
                Method::DormandPrince45,
            )
            .unwrap();

        assert_eq!(solution.status, Status::Complete);
        assert_eq!(solution.final_time().unwrap(), 10.0);
        assert_eq!(solution.events.len(), 3);
        let pi = std::f64::consts::PI;
        for (occurrence, expected) in solution
            .events
            .iter()
            .zip([pi / 2.0, 3.0 * pi / 2.0, 5.0 * pi / 2.0])
        {
            assert!(
                (occurrence.t - expected).abs() < 1e-5,
                "Expected: {}, Actual: {}",
                expected,
                occurrence.t
            );
        }
    }

    #[test]
    fn test_direction_filter_skips_falling_crossing() {
        // cos(t) falls through zero at pi/2; the first rising crossing is at
        // 3pi/2.
        let problem = OdeProblem::new(Oscillator).with_event(
            ZeroCrossingEvent::new(|_t, state: &StateArray<2>| state[0])
                .with_direction(CrossingDirection::Rising),
        );
        let x0 = StateArray::new([1.0, 0.0]);
        let solution = problem
            .solve_adaptive(
                &x0,
                (0.0, 10.0),
                AdaptiveStepControl::default().with_tolerances(1e-8, 1e-10),
                Method::DormandPrince45,
            )
            .unwrap();

        let expected = 3.0 * std::f64::consts::PI / 2.0;
        assert!(matches!(solution.status, Status::EventTerminated { .. }));
        let t_stop = solution.final_time().unwrap();
        assert!(
            (t_stop - expected).abs() < 1e-5,
            "Expected: {}, Actual: {}",
            expected,
            t_stop
        );
    }

    #[test]
    fn test_zero_at_initial_state_is_not_a_crossing() {
        // The velocity starts at exactly zero and goes negative; that initial
        // zero must be treated as a baseline, not an event.
        let problem = OdeProblem::new(ConstantAccel { g: 9.8 })
            .with_event(ZeroCrossingEvent::new(|_t, state: &StateArray<2>| state[1]));
        let x0 = StateArray::new([100.0, 0.0]);
        let solution = problem
            .solve_adaptive(
                &x0,
                (0.0, 2.0),
                AdaptiveStepControl::default(),
                Method::DormandPrince45,
            )
            .unwrap();

        assert_eq!(solution.status, Status::Complete);
        assert!(solution.events.is_empty());
    }

    #[test]
    fn test_finite_time_blowup_is_reported_not_silent() {
        let problem = OdeProblem::new(FiniteTimeBlowup);
        let x0 = StateArray::new([1.0]);
        let solution = problem
            .solve_adaptive(
                &x0,
                (0.0, 2.0),
                AdaptiveStepControl::default(),
                Method::DormandPrince45,
            )
            .unwrap();

        assert!(!solution.success());
        assert!(matches!(solution.status, Status::Failed(_)));
        assert!(solution.message().contains("incomplete"));
        // integration stopped before the singularity at t = 1
        assert!(solution.final_time().unwrap() <= 1.0);
        // the partial trajectory holds no poisoned samples
        for (_, state) in solution.trajectory.iter() {
            assert!(state[0].is_finite());
        }
    }

    #[test]
    fn test_max_steps_budget_is_enforced() {
        let problem = OdeProblem::new(Oscillator);
        let x0 = StateArray::new([1.0, 0.0]);
        let control = AdaptiveStepControl::default()
            .with_max_dt(1e-4)
            .with_max_steps(10);
        let solution = problem
            .solve_adaptive(&x0, (0.0, 10.0), control, Method::DormandPrince45)
            .unwrap();
        assert!(matches!(
            solution.status,
            Status::Failed(FailureReason::MaxStepsExceeded { .. })
        ));
    }

    #[derive(Debug)]
    struct WrongShape;

    impl OdeModel for WrongShape {
        type State = StateVector;

        fn slope(
            &self,
            _t: f64,
            _state: &Self::State,
            derivative: &mut Self::State,
        ) -> Result<(), ModelError> {
            // one field too many
            *derivative = StateVector::new(vec![0.0, 0.0, 0.0]);
            Ok(())
        }
    }

    #[test]
    fn test_mismatched_derivative_shape_is_configuration_error() {
        let problem = OdeProblem::new(WrongShape);
        let x0 = StateVector::new(vec![1.0, 2.0]);
        let result = problem.solve_adaptive(
            &x0,
            (0.0, 1.0),
            AdaptiveStepControl::default(),
            Method::DormandPrince45,
        );
        assert!(matches!(result, Err(OdeError::Configuration(_))));
    }

    #[derive(Debug)]
    struct FailingModel;

    impl OdeModel for FailingModel {
        type State = StateArray<1>;

        fn slope(
            &self,
            t: f64,
            _state: &Self::State,
            _derivative: &mut Self::State,
        ) -> Result<(), ModelError> {
            if t > 0.1 {
                return Err("sensor data unavailable".into());
            }
            Ok(())
        }
    }

    #[test]
    fn test_model_error_propagates_immediately() {
        let problem = OdeProblem::new(FailingModel);
        let x0 = StateArray::new([1.0]);
        let result = problem.solve_adaptive(
            &x0,
            (0.0, 1.0),
            AdaptiveStepControl::default(),
            Method::DormandPrince45,
        );
        match result {
            Err(OdeError::Model { t, .. }) => assert!(t > 0.1),
            other => panic!("expected model error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_time_span_is_rejected() {
        let problem = OdeProblem::new(ExponentialDecay);
        let x0 = StateArray::new([1.0]);
        let result = problem.solve_adaptive(
            &x0,
            (1.0, 1.0),
            AdaptiveStepControl::default(),
            Method::DormandPrince45,
        );
        assert!(matches!(result, Err(OdeError::Configuration(_))));
    }
}
