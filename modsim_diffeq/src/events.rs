use serde::{Deserialize, Serialize};

use crate::state::OdeState;

/// Which sign changes of the event condition count as a crossing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossingDirection {
    /// Only negative-to-positive crossings.
    Rising,
    /// Only positive-to-negative crossings.
    Falling,
    /// Either direction.
    #[default]
    Any,
}

/// An event that triggers when a user-defined scalar condition of
/// `(t, state)` crosses zero.
///
/// The condition is evaluated after every accepted step. The value at the
/// initial time is a baseline only and never a crossing by itself. Terminal
/// events stop the integration at the refined crossing time; non-terminal
/// events record the occurrence and integration continues.
pub struct ZeroCrossingEvent<State: OdeState> {
    /// A function representing the condition. Should return a signed value.
    condition: Box<dyn Fn(f64, &State) -> f64 + Send + Sync>,
    /// Which sign changes trigger the event.
    pub direction: CrossingDirection,
    /// Whether a crossing stops the integration.
    pub terminal: bool,
    /// Absolute time tolerance for refining the crossing.
    pub refine_tol: f64,
}

impl<State: OdeState> ZeroCrossingEvent<State> {
    /// Creates a new terminal zero-crossing event from a condition function.
    pub fn new<C>(condition: C) -> Self
    where
        C: Fn(f64, &State) -> f64 + Send + Sync + 'static,
    {
        Self {
            condition: Box::new(condition),
            direction: CrossingDirection::default(),
            terminal: true,
            refine_tol: 1e-9,
        }
    }

    /// Restricts which sign changes trigger the event.
    pub fn with_direction(mut self, direction: CrossingDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Sets whether a crossing stops the integration.
    pub fn with_terminal(mut self, terminal: bool) -> Self {
        self.terminal = terminal;
        self
    }

    /// Sets the time tolerance used to refine the crossing.
    pub fn with_refine_tol(mut self, refine_tol: f64) -> Self {
        self.refine_tol = refine_tol;
        self
    }

    pub(crate) fn value(&self, t: f64, state: &State) -> f64 {
        (self.condition)(t, state)
    }
}

/// A detected zero crossing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventOccurrence {
    /// Index of the event in registration order.
    pub event: usize,
    /// Refined crossing time.
    pub t: f64,
}

/// Per-event runtime state across accepted steps. Owned by the driver so
/// that an event registration stays immutable and a problem can be solved
/// repeatedly with identical results.
#[derive(Clone, Copy, Debug)]
pub(crate) struct EventTracker {
    /// Condition value at the last accepted step.
    pub last: f64,
    /// False until a nonzero baseline has been seen.
    armed: bool,
}

impl EventTracker {
    /// Starts tracking from the initial condition value. An exact zero at
    /// the initial state leaves the tracker unarmed until the condition
    /// moves off zero.
    pub fn baseline(value: f64) -> Self {
        Self {
            last: value,
            armed: value != 0.0,
        }
    }

    /// Feeds the condition value at a newly accepted step. Returns `true`
    /// when a crossing consistent with `direction` occurred since the
    /// previous step. The caller is responsible for updating
    /// [`last`](Self::last) after handling a detected crossing.
    pub fn check(&mut self, value: f64, direction: CrossingDirection) -> bool {
        if !self.armed {
            if value != 0.0 {
                self.armed = true;
                self.last = value;
            }
            return false;
        }

        let crossed = (self.last < 0.0 && value >= 0.0) || (self.last > 0.0 && value <= 0.0);
        let direction_ok = match direction {
            CrossingDirection::Any => true,
            CrossingDirection::Rising => self.last < 0.0,
            CrossingDirection::Falling => self.last > 0.0,
        };

        if crossed && direction_ok {
            true
        } else {
            self.last = value;
            false
        }
    }
}
