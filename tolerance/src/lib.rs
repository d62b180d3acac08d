//! Error-tolerance model for adaptive integration.
//!
//! The adaptive stepper accepts a step when the combined scaled error of the
//! embedded estimate is at most one. Each component contributes
//! `|err| / (abs_tol + rel_tol * max(|y0|, |y1|))`; components are combined
//! with an RMS norm.

use serde::{Deserialize, Serialize};

/// Relative and absolute tolerance pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tolerances {
    pub rel_tol: f64,
    pub abs_tol: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            rel_tol: 1e-3,
            abs_tol: 1e-6,
        }
    }
}

impl Tolerances {
    pub fn new(rel_tol: f64, abs_tol: f64) -> Self {
        Self { rel_tol, abs_tol }
    }

    /// Scaled error for one component across a step from `y0` to `y1` with
    /// estimated local error `err`. A value of at most one is acceptable.
    pub fn error_ratio(&self, y0: f64, y1: f64, err: f64) -> f64 {
        scaled_error(y0, y1, err, self.rel_tol, self.abs_tol)
    }
}

pub fn scaled_error(y0: f64, y1: f64, err: f64, rel_tol: f64, abs_tol: f64) -> f64 {
    let scale = abs_tol + rel_tol * y0.abs().max(y1.abs());
    err.abs() / scale
}

/// Root-mean-square of the component ratios. Empty input yields zero.
pub fn rms_norm<I: IntoIterator<Item = f64>>(ratios: I) -> f64 {
    let mut sum_squared = 0.0;
    let mut count = 0usize;
    for ratio in ratios {
        sum_squared += ratio * ratio;
        count += 1;
    }
    if count == 0 {
        return 0.0;
    }
    (sum_squared / count as f64).sqrt()
}
