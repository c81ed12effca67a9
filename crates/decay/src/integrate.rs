use halflife_core::Observer;
use halflife_solvers::transient::euler::{self, Action, Span};
use tracing::{debug, warn};

use crate::{DecayInput, DecayModel, DecayOutput, DecayProblem, Error, Run, SimulationRecord};

/// Event reported to an [`integrate_observed`] observer for each record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepEvent {
    /// Number of Euler updates applied before this record.
    pub step: usize,
    pub record: SimulationRecord,
    /// Whether this record is the run's final boundary step.
    pub terminal: bool,
}

/// Integrates `dN/dt = -λN` from `t_initial` to `t_final` with forward Euler.
///
/// Returns one [`SimulationRecord`] per time step, starting at `t_initial`
/// with `N = n0` and ending on the step within half a step of `t_final`.
///
/// `n0` and `lambda` are used as given; only non-finite values are rejected.
///
/// # Errors
///
/// - [`Error::InvalidParameter`] if `delta_t` is not strictly positive or any
///   input is not finite. No records are produced. Also returned when
///   `delta_t` is too small to advance the time at which the run stands.
/// - [`Error::ResourceExhausted`] if the record history cannot grow. The error
///   carries the records produced before the failure.
pub fn integrate(
    n0: f64,
    lambda: f64,
    t_initial: f64,
    t_final: f64,
    delta_t: f64,
) -> Result<Run, Error> {
    integrate_observed(n0, lambda, t_initial, t_final, delta_t, ())
}

/// Integrates like [`integrate`], reporting each record to `observer`.
///
/// The observer sees a [`StepEvent`] as soon as a record is produced and may
/// return [`Action::StopEarly`] to end the run. A stopped run is returned with
/// the records so far and [`Status::StoppedByObserver`](crate::Status).
///
/// # Errors
///
/// Same as [`integrate`].
pub fn integrate_observed<Obs>(
    n0: f64,
    lambda: f64,
    t_initial: f64,
    t_final: f64,
    delta_t: f64,
    mut observer: Obs,
) -> Result<Run, Error>
where
    Obs: Observer<StepEvent, Action>,
{
    let span = Span::new(t_final, delta_t)?;
    for (name, value) in [("t_initial", t_initial), ("n0", n0), ("lambda", lambda)] {
        if !value.is_finite() {
            return Err(Error::non_finite(name, value));
        }
    }

    debug!(n0, lambda, t_initial, t_final, delta_t, "starting decay run");

    let model = DecayModel::new(n0, lambda);
    let estimated_steps = span.estimated_steps(t_initial);

    let solution = euler::solve(
        &model,
        &DecayProblem,
        model.initial_input(t_initial),
        &span,
        |event: &euler::Event<'_, DecayInput, DecayOutput>| {
            observer.observe(&StepEvent {
                step: event.step,
                record: SimulationRecord::from(event.snapshot),
                terminal: event.terminal,
            })
        },
    )
    .map_err(|err| {
        let err = Error::from(err);
        if let Error::ResourceExhausted { records, steps, .. } = &err {
            warn!(records = records.len(), steps, "decay run aborted: {err}");
        }
        err
    })?;

    let records = solution
        .history
        .iter()
        .map(SimulationRecord::from)
        .collect();
    let run = Run::new(
        records,
        delta_t,
        estimated_steps,
        solution.steps,
        solution.status,
    );

    debug!(
        records = run.len(),
        advances = run.advances(),
        status = ?run.status(),
        "decay run finished"
    );

    Ok(run)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::Status;

    #[test]
    fn first_record_is_the_initial_condition() {
        let run = integrate(500.0, 0.1, 0.0, 1.0, 0.1).unwrap();
        let first = run.first().unwrap();

        assert_relative_eq!(first.time, 0.0);
        assert_relative_eq!(first.n_numerical, 500.0);
        assert_relative_eq!(first.n_analytical, 500.0);
        assert_eq!(first.error_absolute, 0.0);
        assert_eq!(first.error_relative_percent, 0.0);
    }

    #[test]
    fn numerical_values_follow_the_euler_recurrence() {
        let (n0, lambda, dt) = (1000.0, 0.2, 0.5);
        let run = integrate(n0, lambda, 0.0, 2.0, dt).unwrap();

        assert_eq!(run.len(), 5);
        for (k, record) in run.iter().enumerate() {
            let expected = n0 * (1.0_f64 - lambda * dt).powi(i32::try_from(k).unwrap());
            assert_relative_eq!(record.n_numerical, expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn zero_step_is_rejected_without_records() {
        let err = integrate(1.0e15, 1.0e-6, 0.0, 100.0, 0.0).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidParameter {
                name: "delta_t",
                ..
            }
        ));
    }

    #[test]
    fn negative_step_is_rejected() {
        assert!(matches!(
            integrate(1.0e15, 1.0e-6, 0.0, 100.0, -5.0),
            Err(Error::InvalidParameter {
                name: "delta_t",
                ..
            })
        ));
    }

    #[test]
    fn rejected_step_never_reaches_the_observer() {
        let mut calls = 0;
        let result = integrate_observed(1.0, 1.0, 0.0, 1.0, -1.0, |_: &StepEvent| {
            calls += 1;
            None
        });

        assert!(result.is_err());
        assert_eq!(calls, 0);
    }

    #[test]
    fn infinite_final_time_is_rejected() {
        assert!(matches!(
            integrate(1.0, 1.0, 0.0, f64::INFINITY, 0.1),
            Err(Error::InvalidParameter {
                name: "t_final",
                ..
            })
        ));
    }

    #[test]
    fn nan_inputs_are_rejected() {
        assert!(matches!(
            integrate(f64::NAN, 1.0, 0.0, 1.0, 0.1),
            Err(Error::InvalidParameter { name: "n0", .. })
        ));
        assert!(matches!(
            integrate(1.0, f64::NAN, 0.0, 1.0, 0.1),
            Err(Error::InvalidParameter { name: "lambda", .. })
        ));
        assert!(matches!(
            integrate(1.0, 1.0, f64::NAN, 1.0, 0.1),
            Err(Error::InvalidParameter {
                name: "t_initial",
                ..
            })
        ));
    }

    #[test]
    fn observer_sees_every_record_and_the_terminal_one_last() {
        let mut events = Vec::new();
        let run = integrate_observed(100.0, 0.5, 0.0, 1.0, 0.25, |event: &StepEvent| {
            events.push(*event);
            None
        })
        .unwrap();

        assert_eq!(events.len(), run.len());
        assert!(events.last().unwrap().terminal);
        assert!(events[..events.len() - 1].iter().all(|e| !e.terminal));
        for (event, record) in events.iter().zip(run.iter()) {
            assert_eq!(event.record, *record);
        }
    }

    #[test]
    fn observer_can_stop_a_run() {
        let run = integrate_observed(100.0, 0.5, 0.0, 10.0, 0.5, |event: &StepEvent| {
            (event.step == 3).then_some(Action::StopEarly)
        })
        .unwrap();

        assert_eq!(run.status(), Status::StoppedByObserver);
        assert_eq!(run.len(), 4);
        assert_eq!(run.advances(), 3);
    }

    #[test]
    fn analytical_zero_gives_zero_relative_error() {
        // e^(-800) underflows to zero while the numerical value does not.
        let run = integrate(1.0, 1.0, 800.0, 801.0, 0.5).unwrap();

        assert!(!run.is_empty());
        for record in &run {
            assert_eq!(record.n_analytical, 0.0);
            assert_eq!(record.error_relative_percent, 0.0);
            assert!(record.error_absolute > 0.0);
        }
    }

    #[test]
    fn zero_population_stays_error_free() {
        let run = integrate(0.0, 1.0e-3, 0.0, 100.0, 10.0).unwrap();

        for record in &run {
            assert_eq!(record.n_numerical, 0.0);
            assert_eq!(record.error_absolute, 0.0);
            assert_eq!(record.error_relative_percent, 0.0);
        }
    }

    #[test]
    fn final_time_before_start_gives_empty_run() {
        let run = integrate(1.0, 1.0, 10.0, 0.0, 1.0).unwrap();

        assert!(run.is_empty());
        assert_eq!(run.status(), Status::Complete);
    }

    #[test]
    fn step_too_small_for_the_start_time_is_rejected() {
        // 1e17 + 1.0 rounds back to 1e17, so time would never advance.
        let mut events = 0;
        let result = integrate_observed(
            1.0,
            1.0e-3,
            1.0e17,
            1.0e17 + 96.0,
            1.0,
            |_: &StepEvent| {
                events += 1;
                None
            },
        );

        assert!(matches!(
            result,
            Err(Error::InvalidParameter {
                name: "delta_t",
                reason: "too small to advance time",
                ..
            })
        ));
        assert_eq!(events, 1);
    }

    #[test]
    fn unreservable_history_is_resource_exhaustion() {
        let err = integrate(1.0, 1.0, 0.0, 1.0e300, 1.0e-300).unwrap_err();

        match &err {
            Error::ResourceExhausted { records, steps, .. } => {
                assert!(records.is_empty());
                assert_eq!(*steps, 0);
            }
            other => panic!("expected resource exhaustion, got {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "failed to grow the record history after 0 steps"
        );
    }

    #[test]
    fn start_on_the_final_boundary_keeps_one_record() {
        // The boundary test needs one update, which then leaves the span.
        let run = integrate(1.0, 1.0, 5.0, 5.0, 1.0).unwrap();

        assert_eq!(run.len(), 1);
        assert_eq!(run.advances(), 1);
        assert_eq!(run.status(), Status::Complete);
    }
}
