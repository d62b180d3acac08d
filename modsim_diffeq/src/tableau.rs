/// Butcher tableau for an explicit Runge-Kutta method.
///
/// `b_star` holds the embedded lower-order weights for methods with an error
/// estimate. `order` is the exponent order used by adaptive step-size
/// control.
pub struct ButcherTableau<const STAGES: usize> {
    pub a: [[f64; STAGES]; STAGES],
    pub b: [f64; STAGES],
    pub b_star: Option<[f64; STAGES]>,
    pub c: [f64; STAGES],
    pub order: usize,
}

impl ButcherTableau<4> {
    // usage is ButcherTableau::<4>::RK4
    pub const RK4: Self = Self {
        a: [
            [0., 0., 0., 0.],
            [1. / 2., 0., 0., 0.],
            [0., 1. / 2., 0., 0.],
            [0., 0., 1., 0.],
        ],
        b: [1. / 6., 1. / 3., 1. / 3., 1. / 6.],
        b_star: None,
        c: [0., 1. / 2., 1. / 2., 1.],
        order: 4,
    };

    // usage is ButcherTableau::<4>::BOGACKISHAMPINE23
    pub const BOGACKISHAMPINE23: Self = Self {
        a: [
            [0., 0., 0., 0.],
            [1. / 2., 0., 0., 0.],
            [0., 3. / 4., 0., 0.],
            [2. / 9., 1. / 3., 4. / 9., 0.],
        ],
        b: [2. / 9., 1. / 3., 4. / 9., 0.],
        b_star: Some([7. / 24., 1. / 4., 1. / 3., 1. / 8.]),
        c: [0., 1. / 2., 3. / 4., 1.],
        order: 3,
    };
}

impl ButcherTableau<7> {
    // usage is ButcherTableau::<7>::DORMANDPRINCE45
    pub const DORMANDPRINCE45: Self = Self {
        a: [
            [0., 0., 0., 0., 0., 0., 0.],
            [1. / 5., 0., 0., 0., 0., 0., 0.],
            [3. / 40., 9. / 40., 0., 0., 0., 0., 0.],
            [44. / 45., -56. / 15., 32. / 9., 0., 0., 0., 0.],
            [
                19372. / 6561.,
                -25360. / 2187.,
                64448. / 6561.,
                -212. / 729.,
                0.,
                0.,
                0.,
            ],
            [
                9017. / 3168.,
                -355. / 33.,
                46732. / 5247.,
                49. / 176.,
                -5103. / 18656.,
                0.,
                0.,
            ],
            [
                35. / 384.,
                0.,
                500. / 1113.,
                125. / 192.,
                -2187. / 6784.,
                11. / 84.,
                0.,
            ],
        ],
        b: [
            35. / 384.,
            0.,
            500. / 1113.,
            125. / 192.,
            -2187. / 6784.,
            11. / 84.,
            0.,
        ],
        b_star: Some([
            5179. / 57600.,
            0.,
            7571. / 16695.,
            393. / 640.,
            -92097. / 339200.,
            187. / 2100.,
            1. / 40.,
        ]),
        c: [0., 1. / 5., 3. / 10., 4. / 5., 8. / 9., 1., 1.],
        order: 5,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    fn check_consistency<const S: usize>(tableau: &ButcherTableau<S>) {
        let b_sum: f64 = tableau.b.iter().sum();
        assert!(
            (b_sum - 1.0).abs() < TOL,
            "b weights must sum to 1, got {b_sum}"
        );
        if let Some(b_star) = tableau.b_star {
            let sum: f64 = b_star.iter().sum();
            assert!(
                (sum - 1.0).abs() < TOL,
                "embedded weights must sum to 1, got {sum}"
            );
        }
        for s in 0..S {
            let row_sum: f64 = tableau.a[s].iter().sum();
            assert!(
                (row_sum - tableau.c[s]).abs() < 1e-10,
                "row {s}: sum of a ({row_sum}) must equal c ({})",
                tableau.c[s]
            );
        }
    }

    #[test]
    fn test_rk4_consistency() {
        check_consistency(&ButcherTableau::<4>::RK4);
    }

    #[test]
    fn test_bogacki_shampine_consistency() {
        check_consistency(&ButcherTableau::<4>::BOGACKISHAMPINE23);
    }

    #[test]
    fn test_dormand_prince_consistency() {
        check_consistency(&ButcherTableau::<7>::DORMANDPRINCE45);
    }

    #[test]
    fn test_adaptive_tableaus_are_fsal() {
        // last stage row equals b, so k_last is the slope at the step end
        let dp = ButcherTableau::<7>::DORMANDPRINCE45;
        for s in 0..7 {
            assert!((dp.a[6][s] - dp.b[s]).abs() < TOL);
        }
        let bs = ButcherTableau::<4>::BOGACKISHAMPINE23;
        for s in 0..4 {
            assert!((bs.a[3][s] - bs.b[s]).abs() < TOL);
        }
    }
}
