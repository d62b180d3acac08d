use modsim::models::projectile::{self, BallState, Baseball};
use modsim_diffeq::{AdaptiveStepControl, Method, OdeProblem};
use std::f64::consts::PI;

fn main() {
    let ball = Baseball::default();
    let problem = OdeProblem::new(ball).with_event(projectile::landing());

    // sweep the launch angle and report the range
    for degrees in (20..=60).step_by(5) {
        let angle = degrees as f64 * PI / 180.0;
        let x0 = BallState::launched(0.0, 1.0, 40.0, angle);
        let solution = problem
            .solve_adaptive(
                &x0,
                (0.0, 30.0),
                AdaptiveStepControl::default(),
                Method::DormandPrince45,
            )
            .unwrap();
        let landed = solution.final_state().unwrap();
        println!("{degrees:3} deg     range {:8.2} m", landed.x);
    }
}
