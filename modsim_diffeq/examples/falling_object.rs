use modsim_diffeq::{
    AdaptiveStepControl, CrossingDirection, Method, ModelError, OdeModel, OdeProblem, StateArray,
    ZeroCrossingEvent,
};

/// A dropped object under constant gravity; state is [height, velocity].
#[derive(Debug)]
struct FallingObject {
    g: f64,
}

impl OdeModel for FallingObject {
    type State = StateArray<2>;

    fn slope(
        &self,
        _t: f64,
        state: &Self::State,
        derivative: &mut Self::State,
    ) -> Result<(), ModelError> {
        derivative[0] = state[1];
        derivative[1] = -self.g;
        Ok(())
    }
}

fn main() {
    let problem = OdeProblem::new(FallingObject { g: 9.8 }).with_event(
        ZeroCrossingEvent::new(|_t, state: &StateArray<2>| state[0])
            .with_direction(CrossingDirection::Falling),
    );
    let x0 = StateArray::new([381.0, 0.0]);

    let solution = problem
        .solve_adaptive(
            &x0,
            (0.0, 60.0),
            AdaptiveStepControl::default(),
            Method::DormandPrince45,
        )
        .unwrap();

    println!("{}", solution.message());
    for (t, state) in solution.trajectory.iter() {
        println!("{:10.6}     {:10.3}     {:10.3}", t, state[0], state[1]);
    }
}
