use std::array;

use crate::{error::OdeError, state::StateVector, tableau::ButcherTableau};

/// Explicit Runge-Kutta stepping engine.
///
/// Works on flattened state vectors with preallocated stage buffers; the
/// driver owns the translation between named states and vectors and supplies
/// the slope evaluation as a closure.
pub(crate) struct RungeKutta<const STAGES: usize> {
    tableau: ButcherTableau<STAGES>,
    k: [StateVector; STAGES],
    y_stage: StateVector,
    y_next: StateVector,
    y_err: StateVector,
}

impl<const STAGES: usize> RungeKutta<STAGES> {
    pub fn new(tableau: ButcherTableau<STAGES>) -> Self {
        Self {
            tableau,
            k: array::from_fn(|_| StateVector::default()),
            y_stage: StateVector::default(),
            y_next: StateVector::default(),
            y_err: StateVector::default(),
        }
    }

    pub fn order(&self) -> usize {
        self.tableau.order
    }

    /// Takes one step of size `h` from `(t, y)`.
    ///
    /// After a successful call the proposed end state is in
    /// [`y_next`](Self::y_next), the embedded error estimate (if the tableau
    /// has one) in [`y_err`](Self::y_err), and the slope at the step start in
    /// [`k0`](Self::k0).
    pub fn step<F>(
        &mut self,
        t: f64,
        y: &StateVector,
        h: f64,
        eval: &mut F,
    ) -> Result<(), OdeError>
    where
        F: FnMut(f64, &StateVector, &mut StateVector) -> Result<(), OdeError>,
    {
        eval(t, y, &mut self.k[0])?;

        for s in 1..STAGES {
            self.y_stage.clone_from(y);
            for i in 0..s {
                let a = self.tableau.a[s][i];
                if a != 0.0 {
                    self.y_stage.scaled_add(a * h, &self.k[i]);
                }
            }
            let ts = t + self.tableau.c[s] * h;
            eval(ts, &self.y_stage, &mut self.k[s])?;
        }

        self.y_next.clone_from(y);
        for s in 0..STAGES {
            let b = self.tableau.b[s];
            if b != 0.0 {
                self.y_next.scaled_add(b * h, &self.k[s]);
            }
        }

        if let Some(b_star) = self.tableau.b_star {
            self.y_err.resize(y.len());
            self.y_err.fill(0.0);
            for s in 0..STAGES {
                let d = self.tableau.b[s] - b_star[s];
                if d != 0.0 {
                    self.y_err.scaled_add(d * h, &self.k[s]);
                }
            }
        }

        Ok(())
    }

    /// Proposed state at the end of the last step.
    pub fn y_next(&self) -> &StateVector {
        &self.y_next
    }

    /// Embedded local error estimate of the last step.
    pub fn y_err(&self) -> &StateVector {
        &self.y_err
    }

    /// Slope at the start of the last step (first stage).
    pub fn k0(&self) -> &StateVector {
        &self.k[0]
    }
}
