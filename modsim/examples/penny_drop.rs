use modsim::models::penny::{self, FallingPenny, PennyState};
use modsim_diffeq::{AdaptiveStepControl, Method, OdeProblem};

fn main() {
    let penny = FallingPenny::default();
    println!(
        "terminal velocity: {:.2} m/s",
        penny.terminal_velocity().unwrap()
    );

    let problem = OdeProblem::new(penny).with_event(penny::ground_strike());
    let solution = problem
        .solve_adaptive(
            &PennyState::dropped_from(381.0),
            (0.0, 120.0),
            AdaptiveStepControl::default(),
            Method::DormandPrince45,
        )
        .unwrap();

    println!("{}", solution.message());
    for (t, state) in solution.trajectory.iter() {
        println!("{:10.4}     {:10.3}     {:10.3}", t, state.height, state.velocity);
    }
}
