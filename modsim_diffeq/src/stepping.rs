use serde::{Deserialize, Serialize};

/// Fixed-step control configuration.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FixedStepControl {
    /// Constant step size.
    pub dt: f64,
}

impl FixedStepControl {
    /// Constructs a new fixed-step controller with a given step size.
    pub fn new(dt: f64) -> Self {
        Self { dt }
    }
}

/// Adaptive step size controller.
///
/// Uses an internal method (basic or PID) to adjust step size based on
/// normalized error. Provides absolute and relative tolerance configuration,
/// optional step bounds, and a step-count ceiling that turns a runaway
/// integration into a reported failure instead of an endless loop.
#[derive(Clone, Copy, Debug)]
pub struct AdaptiveStepControl {
    method: AdaptiveStepMethod,
    /// Relative tolerance used for error estimation.
    pub rel_tol: f64,
    /// Absolute tolerance used for error estimation.
    pub abs_tol: f64,
    /// Optional minimum allowed step size. Falling below it is a failure.
    pub min_dt: Option<f64>,
    /// Optional maximum allowed step size.
    pub max_dt: Option<f64>,
    /// Optional explicit first step size.
    pub initial_dt: Option<f64>,
    /// Maximum number of attempted steps per solve.
    pub max_steps: usize,
}

impl Default for AdaptiveStepControl {
    fn default() -> Self {
        Self {
            method: AdaptiveStepMethod::Basic,
            rel_tol: 1e-3,
            abs_tol: 1e-6,
            min_dt: None,
            max_dt: None,
            initial_dt: None,
            max_steps: 100_000,
        }
    }
}

impl AdaptiveStepControl {
    /// Computes the next step size based on the current step and estimated
    /// normalized error.
    ///
    /// - `dt`: current step size
    /// - `error`: normalized RMS error, acceptable at 1.0 or below
    /// - `order`: exponent order of the solver
    pub(crate) fn next_step(&mut self, dt: f64, error: f64, order: usize) -> f64 {
        let factor = match &mut self.method {
            AdaptiveStepMethod::Basic => {
                const EPS: f64 = 1e-14;
                let raw = 0.9 * (1.0 / error.max(EPS)).powf(1.0 / order as f64);
                raw.clamp(0.1, 5.0)
            }
            AdaptiveStepMethod::Pid(pid) => pid.factor(error, order),
        };

        let mut new_dt = dt * factor;
        if let Some(min_dt) = self.min_dt {
            new_dt = new_dt.max(min_dt);
        }
        if let Some(max_dt) = self.max_dt {
            new_dt = new_dt.min(max_dt);
        }
        new_dt
    }

    /// First step size: the explicit hint if given, else a conservative
    /// fraction of the span, within the configured bounds.
    pub(crate) fn initial_step(&self, span: f64) -> f64 {
        let mut dt = self.initial_dt.unwrap_or(span * 1e-3);
        if let Some(min_dt) = self.min_dt {
            dt = dt.max(min_dt);
        }
        if let Some(max_dt) = self.max_dt {
            dt = dt.min(max_dt);
        }
        dt.min(span)
    }

    /// Step sizes below this are treated as underflow.
    pub(crate) fn floor(&self) -> f64 {
        self.min_dt.unwrap_or(1e-14)
    }

    pub fn with_abs_tol(mut self, abs_tol: f64) -> Self {
        self.abs_tol = abs_tol;
        self
    }

    pub fn with_rel_tol(mut self, rel_tol: f64) -> Self {
        self.rel_tol = rel_tol;
        self
    }

    pub fn with_tolerances(mut self, rel_tol: f64, abs_tol: f64) -> Self {
        self.rel_tol = rel_tol;
        self.abs_tol = abs_tol;
        self
    }

    pub fn with_min_dt(mut self, min_dt: f64) -> Self {
        self.min_dt = Some(min_dt);
        self
    }

    pub fn with_max_dt(mut self, max_dt: f64) -> Self {
        self.max_dt = Some(max_dt);
        self
    }

    pub fn with_initial_dt(mut self, initial_dt: f64) -> Self {
        self.initial_dt = Some(initial_dt);
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_pid_control(mut self, pid: StepPidControl) -> Self {
        self.method = AdaptiveStepMethod::Pid(pid);
        self
    }
}

/// Enum for selecting the adaptive step control algorithm.
#[derive(Clone, Copy, Debug)]
enum AdaptiveStepMethod {
    Basic,
    Pid(StepPidControl),
}

/// PID controller for adaptive step size growth.
///
/// Allows fine-grained control over how the step size changes in response
/// to recent error estimates.
#[derive(Clone, Copy, Debug)]
pub struct StepPidControl {
    kp: f64,
    ki: f64,
    kd: f64,
    min_growth: f64,
    max_growth: f64,
    err_now: f64,
    err_prev: f64,
    err_prevprev: f64,
}

impl Default for StepPidControl {
    fn default() -> Self {
        Self {
            kp: 0.6,
            ki: 0.01,
            kd: 0.175,
            min_growth: 0.1,
            max_growth: 5.0,
            err_now: 1.0,
            err_prev: 1.0,
            err_prevprev: 1.0,
        }
    }
}

impl StepPidControl {
    /// Creates a new PID step controller with custom gains.
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self {
            kp,
            ki,
            kd,
            ..Self::default()
        }
    }

    pub fn with_growth_limits(mut self, min_growth: f64, max_growth: f64) -> Self {
        self.min_growth = min_growth;
        self.max_growth = max_growth;
        self
    }

    /// Computes the growth factor from PID control of recent error history.
    fn factor(&mut self, err_now: f64, order: usize) -> f64 {
        self.err_prevprev = self.err_prev;
        self.err_prev = self.err_now;
        self.err_now = err_now;

        const EPS: f64 = 1e-14;
        let e0 = 1.0 / self.err_now.max(EPS);
        let e1 = 1.0 / self.err_prev.max(EPS);
        let e2 = 1.0 / self.err_prevprev.max(EPS);

        let inv_order = 1.0 / order as f64;
        let factor = e0.powf(self.kp * inv_order)
            * (e0 / e1).powf(self.kd * inv_order)
            * (e1 / e2).powf(self.ki * inv_order);

        factor.clamp(self.min_growth, self.max_growth)
    }
}
