use modsim::models::penny::{self, FallingPenny, PennyState, QuadraticDrag};
use modsim_diffeq::{
    AdaptiveStepControl, Method, OdeProblem,
    sweep::{Dispersion, sample_cases, solve_batch},
};

fn main() {
    // disperse the drag coefficient around its nominal value
    let c_d = Dispersion::Normal {
        mean: 0.44,
        std: 0.05,
    };
    let cases = sample_cases(16, 42, |rng| {
        let penny = FallingPenny {
            drag: Some(QuadraticDrag {
                c_d: c_d.sample(rng)?,
                ..QuadraticDrag::default()
            }),
            ..FallingPenny::default()
        };
        Ok((
            OdeProblem::new(penny).with_event(penny::ground_strike()),
            PennyState::dropped_from(381.0),
        ))
    })
    .unwrap();

    let solutions = solve_batch(
        cases,
        (0.0, 120.0),
        AdaptiveStepControl::default(),
        Method::DormandPrince45,
    )
    .unwrap();

    for (run, solution) in solutions.iter().enumerate() {
        println!(
            "run {run:2}     strike at {:8.3} s     {:6} evals",
            solution.final_time().unwrap(),
            solution.stats.function_evals
        );
    }
}
