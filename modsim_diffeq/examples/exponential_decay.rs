use modsim_diffeq::{
    AdaptiveStepControl, Method, ModelError, OdeModel, OdeProblem, StateArray,
};

#[derive(Debug)]
struct ExponentialDecay {
    rate: f64,
}

impl OdeModel for ExponentialDecay {
    type State = StateArray<1>;

    fn slope(
        &self,
        _t: f64,
        state: &Self::State,
        derivative: &mut Self::State,
    ) -> Result<(), ModelError> {
        derivative[0] = -self.rate * state[0];
        Ok(())
    }
}

fn main() {
    let problem = OdeProblem::new(ExponentialDecay { rate: 1.0 });
    let x0 = StateArray::new([1.0]);

    let solution = problem
        .solve_adaptive(
            &x0,
            (0.0, 5.0),
            AdaptiveStepControl::default().with_tolerances(1e-9, 1e-12),
            Method::DormandPrince45,
        )
        .unwrap();

    println!("{}", solution.message());
    println!("{:?}", solution.stats);
    for (t, state) in solution.trajectory.iter() {
        println!("{:10.6}     {:10.6}     {:10.3e}", t, state[0], (state[0] - (-t).exp()).abs());
    }
}
