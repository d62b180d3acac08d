use std::{error::Error, fmt, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    events::EventOccurrence,
    state::{OdeState, StateVector},
};

/// A time-ordered sequence of state samples produced by integration.
///
/// Times are strictly increasing. The last sample's time equals the detected
/// event time if a terminal event fired, else the requested end time, or the
/// last time the solver reached if it failed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trajectory<State: OdeState> {
    /// Recorded times.
    pub t: Vec<f64>,
    /// Recorded states.
    pub y: Vec<State>,
}

impl<State: OdeState> Trajectory<State> {
    pub fn new() -> Self {
        Self {
            t: Vec::new(),
            y: Vec::new(),
        }
    }

    /// Preallocates room for roughly `n` samples.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            t: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
        }
    }

    pub(crate) fn push(&mut self, t: f64, y: State) {
        debug_assert!(self.t.last().is_none_or(|&last| t > last));
        self.t.push(t);
        self.y.push(y);
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Iterates over `(time, state)` samples.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &State)> {
        self.t.iter().copied().zip(self.y.iter())
    }

    /// The last `(time, state)` sample, if any.
    pub fn last(&self) -> Option<(f64, &State)> {
        match (self.t.last(), self.y.last()) {
            (Some(&t), Some(y)) => Some((t, y)),
            _ => None,
        }
    }

    /// Writes the trajectory as csv: a time column followed by one column
    /// per state field, labeled by [`OdeState::headers`].
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn Error>> {
        let mut writer = csv::Writer::from_path(path)?;
        let Some(first) = self.y.first() else {
            return Ok(());
        };

        let mut header = vec!["t".to_string()];
        header.extend(first.headers());
        writer.write_record(&header)?;

        let mut flat = StateVector::zeros(first.dim());
        for (t, state) in self.iter() {
            state.write_vector(&mut flat);
            let mut record = vec![t.to_string()];
            record.extend(flat.iter().map(|v| v.to_string()));
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// How a solve ended.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Status {
    /// Integration reached the requested end time.
    Complete,
    /// A terminal event stopped the integration at `t`.
    EventTerminated { event: usize, t: f64 },
    /// The solver could not finish; the trajectory is incomplete.
    Failed(FailureReason),
}

/// Why a solve could not reach the end time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum FailureReason {
    /// The controller pushed the step size below its floor at time `t`.
    StepSizeUnderflow { t: f64, dt: f64 },
    /// The step budget ran out at time `t`.
    MaxStepsExceeded { t: f64, steps: usize },
    /// The local error estimate became NaN or infinite at time `t`.
    NonFiniteErrorNorm { t: f64 },
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Complete => write!(f, "integration reached the end of the time span"),
            Status::EventTerminated { event, t } => {
                write!(f, "terminal event {event} stopped the integration at t = {t}")
            }
            Status::Failed(reason) => match reason {
                FailureReason::StepSizeUnderflow { t, dt } => write!(
                    f,
                    "step size underflow at t = {t} (dt = {dt}); result is incomplete"
                ),
                FailureReason::MaxStepsExceeded { t, steps } => write!(
                    f,
                    "step budget of {steps} exhausted at t = {t}; result is incomplete"
                ),
                FailureReason::NonFiniteErrorNorm { t } => write!(
                    f,
                    "non-finite error estimate at t = {t}; result is incomplete"
                ),
            },
        }
    }
}

/// Step and evaluation counts for diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Number of slope-function evaluations.
    pub function_evals: usize,
    /// Number of attempted steps.
    pub steps: usize,
    /// Number of accepted steps.
    pub accepted: usize,
    /// Number of rejected steps.
    pub rejected: usize,
}

/// The output of a solve: the trajectory plus outcome metadata.
#[derive(Clone, Debug)]
pub struct OdeSolution<State: OdeState> {
    pub trajectory: Trajectory<State>,
    pub status: Status,
    /// All detected crossings, terminal or not, in time order.
    pub events: Vec<EventOccurrence>,
    pub stats: Stats,
}

impl<State: OdeState> OdeSolution<State> {
    /// Whether integration covered the intended range (to the end time or a
    /// terminal event).
    pub fn success(&self) -> bool {
        !matches!(self.status, Status::Failed(_))
    }

    /// Human-readable outcome description.
    pub fn message(&self) -> String {
        self.status.to_string()
    }

    pub fn final_time(&self) -> Option<f64> {
        self.trajectory.t.last().copied()
    }

    pub fn final_state(&self) -> Option<&State> {
        self.trajectory.y.last()
    }
}
