use tolerance::{Tolerances, rms_norm};

use crate::{
    error::OdeError,
    events::{EventOccurrence, EventTracker, ZeroCrossingEvent},
    model::OdeModel,
    rk::RungeKutta,
    solution::{FailureReason, OdeSolution, Stats, Status, Trajectory},
    state::{OdeState, StateVector},
    tableau::ButcherTableau,
};

/// Step-size strategy for one solve.
pub(crate) enum StepMode {
    Fixed(crate::stepping::FixedStepControl),
    Adaptive(crate::stepping::AdaptiveStepControl),
}

/// Integrates `model` from `tspan.0` to `tspan.1`, watching the registered
/// zero-crossing events after every accepted step.
///
/// The model's named state is flattened once up front; the stepping engine
/// only ever sees plain vectors, and the typed form is rebuilt at the slope
/// and event boundaries.
pub(crate) fn integrate<const STAGES: usize, Model: OdeModel>(
    model: &Model,
    events: &[ZeroCrossingEvent<Model::State>],
    x0: &Model::State,
    tspan: (f64, f64),
    tableau: ButcherTableau<STAGES>,
    mut mode: StepMode,
) -> Result<OdeSolution<Model::State>, OdeError> {
    let (t0, t_end) = tspan;
    if !t0.is_finite() || !t_end.is_finite() || t_end <= t0 {
        return Err(OdeError::Configuration(format!(
            "time span ({t0}, {t_end}) must be finite with end after start"
        )));
    }
    let span = t_end - t0;

    // Flatten the initial state; this fixes the problem dimension.
    let mut y = StateVector::zeros(0);
    x0.write_vector(&mut y);
    let n = y.len();
    if n == 0 {
        return Err(OdeError::Configuration(
            "initial state has no fields".to_string(),
        ));
    }

    let mut state_buf = x0.clone();
    let mut deriv_buf = x0.clone();

    // Validate the slope shape once, before any stepping.
    {
        model
            .slope(t0, x0, &mut deriv_buf)
            .map_err(|source| OdeError::Model { t: t0, source })?;
        let mut check = StateVector::zeros(0);
        deriv_buf.write_vector(&mut check);
        if check.len() != n {
            return Err(OdeError::Configuration(format!(
                "slope returned a derivative of dimension {} for a state of dimension {n}",
                check.len()
            )));
        }
    }

    let mut nfev = 1usize;
    let mut eval = |t: f64, yv: &StateVector, dydt: &mut StateVector| -> Result<(), OdeError> {
        state_buf.read_vector(yv);
        model
            .slope(t, &state_buf, &mut deriv_buf)
            .map_err(|source| OdeError::Model { t, source })?;
        deriv_buf.write_vector(dydt);
        nfev += 1;
        if dydt.len() != n {
            return Err(OdeError::Configuration(format!(
                "slope returned a derivative of dimension {} for a state of dimension {n}",
                dydt.len()
            )));
        }
        Ok(())
    };

    let capacity = match &mode {
        StepMode::Fixed(control) => (span / control.dt).ceil() as usize + 1,
        StepMode::Adaptive(control) => {
            if let Some(max_dt) = control.max_dt {
                (span / max_dt).ceil() as usize + 1
            } else {
                span.ceil() as usize + 1
            }
        }
    };
    let mut trajectory = Trajectory::with_capacity(capacity);
    trajectory.push(t0, x0.clone());

    // The initial condition values are baselines, never crossings.
    let mut trackers: Vec<EventTracker> = events
        .iter()
        .map(|event| EventTracker::baseline(event.value(t0, x0)))
        .collect();

    let mut rk = RungeKutta::new(tableau);
    let order = rk.order();
    let mut stats = Stats::default();
    let mut occurrences: Vec<EventOccurrence> = Vec::new();
    let mut status: Option<Status> = None;

    let mut dt = match &mode {
        StepMode::Fixed(control) => control.dt,
        StepMode::Adaptive(control) => control.initial_step(span),
    };

    let mut sample_buf = x0.clone();
    let mut refine_state = x0.clone();
    let mut refine_vec = StateVector::zeros(n);
    let mut f1 = StateVector::zeros(n);
    let mut t = t0;

    while status.is_none() {
        // Land exactly on the requested end time instead of overshooting.
        let (dt_step, t_new) = if t + dt >= t_end {
            (t_end - t, t_end)
        } else {
            (dt, t + dt)
        };
        if t_new <= t {
            status = Some(Status::Failed(FailureReason::StepSizeUnderflow {
                t,
                dt: dt_step,
            }));
            break;
        }

        rk.step(t, &y, dt_step, &mut eval)?;
        stats.steps += 1;

        if rk.y_next().iter().any(|v| !v.is_finite()) {
            status = Some(Status::Failed(FailureReason::NonFiniteErrorNorm { t }));
            break;
        }

        let (accept, err) = match &mode {
            StepMode::Fixed(_) => (true, 0.0),
            StepMode::Adaptive(control) => {
                let tolerances = Tolerances::new(control.rel_tol, control.abs_tol);
                let err = rms_norm(
                    (0..n).map(|i| tolerances.error_ratio(y[i], rk.y_next()[i], rk.y_err()[i])),
                );
                if !err.is_finite() {
                    status = Some(Status::Failed(FailureReason::NonFiniteErrorNorm { t }));
                    break;
                }
                (err <= 1.0, err)
            }
        };

        if accept {
            stats.accepted += 1;
            sample_buf.read_vector(rk.y_next());

            if !events.is_empty() {
                let mut fired: Vec<(usize, f64)> = Vec::new();
                for (i, event) in events.iter().enumerate() {
                    let value = event.value(t_new, &sample_buf);
                    if trackers[i].check(value, event.direction) {
                        fired.push((i, value));
                    }
                }

                if !fired.is_empty() {
                    // Slope at both bracket ends gives a cubic Hermite
                    // interpolant to refine against without further stepping.
                    eval(t_new, rk.y_next(), &mut f1)?;
                    let segment = HermiteSegment {
                        t0: t,
                        t1: t_new,
                        y0: y.clone(),
                        f0: rk.k0().clone(),
                        y1: rk.y_next().clone(),
                        f1: f1.clone(),
                    };

                    let mut crossings: Vec<(usize, f64, f64)> = fired
                        .iter()
                        .map(|&(i, value)| {
                            let t_star = refine_crossing(
                                &segment,
                                &events[i],
                                trackers[i].last,
                                &mut refine_vec,
                                &mut refine_state,
                            );
                            (i, t_star, value)
                        })
                        .collect();
                    crossings.sort_by(|a, b| a.1.total_cmp(&b.1));

                    for &(i, t_star, value) in &crossings {
                        occurrences.push(EventOccurrence { event: i, t: t_star });
                        if events[i].terminal {
                            segment.eval(t_star, &mut refine_vec);
                            refine_state.read_vector(&refine_vec);
                            trajectory.push(t_star, refine_state.clone());
                            status = Some(Status::EventTerminated { event: i, t: t_star });
                            break;
                        }
                        trackers[i].last = value;
                    }
                    if status.is_some() {
                        break;
                    }
                }
            }

            trajectory.push(t_new, sample_buf.clone());
            y.clone_from(rk.y_next());
            t = t_new;

            if t_new >= t_end {
                status = Some(Status::Complete);
                break;
            }
            if let StepMode::Adaptive(control) = &mut mode {
                dt = control.next_step(dt_step, err, order);
            }
        } else {
            stats.rejected += 1;
            let StepMode::Adaptive(control) = &mut mode else {
                unreachable!("fixed steps are always accepted");
            };
            if dt_step <= control.floor() {
                status = Some(Status::Failed(FailureReason::StepSizeUnderflow {
                    t,
                    dt: dt_step,
                }));
                break;
            }
            dt = control.next_step(dt_step, err, order);
        }

        if let StepMode::Adaptive(control) = &mode {
            if status.is_none() && stats.steps >= control.max_steps {
                status = Some(Status::Failed(FailureReason::MaxStepsExceeded {
                    t,
                    steps: stats.steps,
                }));
            }
        }
    }

    stats.function_evals = nfev;
    Ok(OdeSolution {
        trajectory,
        status: status.expect("loop exits with a status"),
        events: occurrences,
        stats,
    })
}

/// Cubic Hermite interpolant over one accepted step, built from the state
/// and slope at both ends.
struct HermiteSegment {
    t0: f64,
    t1: f64,
    y0: StateVector,
    f0: StateVector,
    y1: StateVector,
    f1: StateVector,
}

impl HermiteSegment {
    fn eval(&self, t: f64, out: &mut StateVector) {
        let h = self.t1 - self.t0;
        let theta = (t - self.t0) / h;
        let theta2 = theta * theta;
        let theta3 = theta2 * theta;
        let h00 = 2.0 * theta3 - 3.0 * theta2 + 1.0;
        let h10 = theta3 - 2.0 * theta2 + theta;
        let h01 = -2.0 * theta3 + 3.0 * theta2;
        let h11 = theta3 - theta2;

        out.resize(self.y0.len());
        out.fill(0.0);
        out.scaled_add(h00, &self.y0);
        out.scaled_add(h10 * h, &self.f0);
        out.scaled_add(h01, &self.y1);
        out.scaled_add(h11 * h, &self.f1);
    }
}

/// Bisects the interpolated segment down to the event's time tolerance.
/// Uses no further slope evaluations, so refinement is deterministic.
fn refine_crossing<State: OdeState>(
    segment: &HermiteSegment,
    event: &ZeroCrossingEvent<State>,
    value_at_start: f64,
    scratch_vec: &mut StateVector,
    scratch_state: &mut State,
) -> f64 {
    let mut a = segment.t0;
    let mut b = segment.t1;
    let mut value_a = value_at_start;

    for _ in 0..128 {
        if b - a <= event.refine_tol {
            break;
        }
        let mid = 0.5 * (a + b);
        segment.eval(mid, scratch_vec);
        scratch_state.read_vector(scratch_vec);
        let value_mid = event.value(mid, scratch_state);
        if value_mid == 0.0 {
            return mid;
        }
        if (value_a < 0.0) == (value_mid < 0.0) {
            a = mid;
            value_a = value_mid;
        } else {
            b = mid;
        }
    }

    0.5 * (a + b)
}
