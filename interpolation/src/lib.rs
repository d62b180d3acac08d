//! Linear interpolation over a sampled time series.
//!
//! An [`Interpolant`] turns discrete `(time, value)` samples into a callable
//! continuous-time input, e.g. for feeding measured data into a slope
//! function. Query times outside the sampled range follow the explicit
//! [`Extrapolation`] policy chosen at construction.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum InterpolationError {
    #[error("interpolant requires at least two samples, got {0}")]
    TooFewSamples(usize),
    #[error("times and values differ in length: {times} vs {values}")]
    LengthMismatch { times: usize, values: usize },
    #[error("sample times must be strictly increasing at index {index}")]
    NonIncreasingTimes { index: usize },
    #[error("sample at index {index} is not finite")]
    NonFiniteSample { index: usize },
    #[error("query time {t} outside sampled range [{t_min}, {t_max}]")]
    OutOfDomain { t: f64, t_min: f64, t_max: f64 },
}

/// Behavior for query times outside the sampled range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Extrapolation {
    /// Out-of-range queries fail with [`InterpolationError::OutOfDomain`].
    #[default]
    Error,
    /// Hold the nearest endpoint value.
    Clamp,
    /// Extend the slope of the boundary segment.
    Linear,
}

/// Piecewise-linear interpolant over strictly increasing sample times.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Interpolant {
    times: Vec<f64>,
    values: Vec<f64>,
    extrapolation: Extrapolation,
}

impl Interpolant {
    /// Builds an interpolant from matched `(time, value)` samples.
    ///
    /// # Errors
    ///
    /// Fails when the slices differ in length, hold fewer than two samples,
    /// contain non-finite entries, or the times are not strictly increasing.
    pub fn new(times: Vec<f64>, values: Vec<f64>) -> Result<Self, InterpolationError> {
        if times.len() != values.len() {
            return Err(InterpolationError::LengthMismatch {
                times: times.len(),
                values: values.len(),
            });
        }
        if times.len() < 2 {
            return Err(InterpolationError::TooFewSamples(times.len()));
        }
        for (index, (&t, &v)) in times.iter().zip(&values).enumerate() {
            if !t.is_finite() || !v.is_finite() {
                return Err(InterpolationError::NonFiniteSample { index });
            }
        }
        for index in 1..times.len() {
            if times[index] <= times[index - 1] {
                return Err(InterpolationError::NonIncreasingTimes { index });
            }
        }
        Ok(Self {
            times,
            values,
            extrapolation: Extrapolation::default(),
        })
    }

    /// Sets the out-of-range policy.
    pub fn with_extrapolation(mut self, extrapolation: Extrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    /// The sampled time range as `(t_min, t_max)`.
    pub fn domain(&self) -> (f64, f64) {
        (self.times[0], self.times[self.times.len() - 1])
    }

    /// Evaluates the interpolant at `t`.
    ///
    /// Query times equal to a sample time return that sample's value exactly.
    pub fn eval(&self, t: f64) -> Result<f64, InterpolationError> {
        match self.times.binary_search_by(|x| x.total_cmp(&t)) {
            // On-sample queries bypass the arithmetic entirely.
            Ok(i) => Ok(self.values[i]),
            Err(0) => self.out_of_range(t, 0, 1),
            Err(i) if i == self.times.len() => self.out_of_range(t, i - 2, i - 1),
            Err(i) => Ok(self.segment(t, i - 1, i)),
        }
    }

    /// Evaluates the interpolant at each query time independently.
    pub fn eval_many(&self, ts: &[f64]) -> Result<Vec<f64>, InterpolationError> {
        ts.iter().map(|&t| self.eval(t)).collect()
    }

    fn segment(&self, t: f64, lo: usize, hi: usize) -> f64 {
        let t0 = self.times[lo];
        let t1 = self.times[hi];
        let v0 = self.values[lo];
        let v1 = self.values[hi];
        v0 + (t - t0) * (v1 - v0) / (t1 - t0)
    }

    fn out_of_range(&self, t: f64, lo: usize, hi: usize) -> Result<f64, InterpolationError> {
        match self.extrapolation {
            Extrapolation::Error => {
                let (t_min, t_max) = self.domain();
                Err(InterpolationError::OutOfDomain { t, t_min, t_max })
            }
            Extrapolation::Clamp => {
                if t < self.times[0] {
                    Ok(self.values[0])
                } else {
                    Ok(self.values[self.values.len() - 1])
                }
            }
            Extrapolation::Linear => Ok(self.segment(t, lo, hi)),
        }
    }
}
