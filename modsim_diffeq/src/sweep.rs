//! Parallel execution of independent simulation cases.
//!
//! Each case owns its model and initial state, so a batch is embarrassingly
//! parallel. Parameter dispersions are sampled sequentially from a seeded
//! RNG before solving, which keeps a sweep reproducible for a given seed;
//! the solves then run on the rayon pool with results returned in input
//! order.

use rand::{SeedableRng, rngs::SmallRng};
use rand_distr::{Distribution, Normal, Uniform};
use rayon::prelude::*;
use thiserror::Error;

use crate::{
    AdaptiveStepControl, Method, OdeModel, OdeProblem, error::OdeError, solution::OdeSolution,
};

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("invalid normal distribution: {0}")]
    Normal(#[from] rand_distr::NormalError),
    #[error("invalid uniform distribution: {0}")]
    Uniform(#[from] rand::distr::uniform::Error),
}

/// How one scalar parameter varies across a sweep.
#[derive(Clone, Copy, Debug)]
pub enum Dispersion {
    /// The same value in every case.
    Fixed(f64),
    /// Normally distributed about `mean`.
    Normal { mean: f64, std: f64 },
    /// Uniformly distributed over `[lower, upper)`.
    Uniform { lower: f64, upper: f64 },
}

impl Dispersion {
    /// Draws one value from the dispersion.
    pub fn sample(&self, rng: &mut SmallRng) -> Result<f64, SweepError> {
        match *self {
            Dispersion::Fixed(value) => Ok(value),
            Dispersion::Normal { mean, std } => Ok(Normal::new(mean, std)?.sample(rng)),
            Dispersion::Uniform { lower, upper } => Ok(Uniform::new(lower, upper)?.sample(rng)),
        }
    }
}

/// Builds `count` cases by drawing from a seeded RNG. The same seed always
/// produces the same cases.
pub fn sample_cases<Case, Build>(
    count: usize,
    seed: u64,
    mut build: Build,
) -> Result<Vec<Case>, SweepError>
where
    Build: FnMut(&mut SmallRng) -> Result<Case, SweepError>,
{
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count).map(|_| build(&mut rng)).collect()
}

/// Runs every `(problem, initial state)` case with adaptive control,
/// in parallel, preserving input order in the output.
pub fn solve_batch<Model>(
    cases: Vec<(OdeProblem<Model>, Model::State)>,
    tspan: (f64, f64),
    control: AdaptiveStepControl,
    method: Method,
) -> Result<Vec<OdeSolution<Model::State>>, OdeError>
where
    Model: OdeModel + Send + Sync,
    Model::State: Send + Sync,
{
    cases
        .into_par_iter()
        .map(|(problem, x0)| problem.solve_adaptive(&x0, tspan, control, method))
        .collect()
}
