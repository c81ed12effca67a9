//! Forward Euler solver for ODE problems over a time span.
//!
//! Steps a model forward in time using explicit Euler:
//!
//! ```text
//! state_{n+1} = state_n + derivative_n * dt
//! time_{n+1}  = time_n  + dt
//! ```
//!
//! Unlike a fixed step-count loop, a run is bounded by a [`Span`]: the solver
//! keeps recording until the current time reaches the final boundary within
//! half a step, so the number of steps never has to be computed up front.
//!
//! # Example
//!
//! ```ignore
//! use halflife_solvers::transient::euler::{self, Span};
//!
//! let span = Span::new(3600.0, 60.0)?;
//! let solution = euler::solve_unobserved(&model, &problem, initial_input, &span)?;
//!
//! for snapshot in &solution.history {
//!     println!("{:?} -> {:?}", snapshot.input, snapshot.output);
//! }
//! ```

mod action;
mod error;
mod event;
mod solution;
mod span;

pub use action::Action;
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};
pub use span::{Span, SpanError};

use halflife_core::{Model, Observer, OdeProblem, Snapshot, StepIntegrable, Temporal};

/// Integrates an ODE problem over a span using forward Euler.
///
/// # Algorithm
///
/// Starting from `initial`, while the current time is inside the span:
///
/// 1. Call the model and record the snapshot.
/// 2. Emit an [`Event`] to the observer.
/// 3. If the snapshot is on the final boundary and at least one step has been
///    taken, stop without advancing.
/// 4. Otherwise step the state by `derivative * dt`, rebuild the input, and
///    continue. A rebuilt input whose time has not moved past the current one
///    ends the run with [`Error::Stalled`].
///
/// The history is sized from [`Span::estimated_steps`] and grows on demand.
/// Growth goes through `try_reserve`, so an allocation failure surfaces as
/// [`Error::ResourceExhausted`] together with the snapshots recorded so far.
///
/// # Observer
///
/// The observer receives an [`Event`] for every recorded snapshot and may
/// return [`Action::StopEarly`] to end the run with the history so far.
///
/// # Errors
///
/// Returns an error if the initial time is not finite, a step does not
/// advance time, the history cannot grow, or the model or problem returns an
/// error at any point.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    initial: M::Input,
    span: &Span,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error<M::Input, M::Output>>
where
    M: Model,
    M::Input: Temporal,
    P: OdeProblem<Input = M::Input, Output = M::Output, Delta = f64>,
    Obs: for<'a> Observer<Event<'a, M::Input, M::Output>, Action>,
{
    let t_initial = initial.time();
    if !t_initial.is_finite() {
        return Err(SpanError::NonFinite {
            name: "t_initial",
            value: t_initial,
        }
        .into());
    }

    let mut history: Vec<Snapshot<M::Input, M::Output>> = Vec::new();
    if let Err(source) = history.try_reserve_exact(span.estimated_steps(t_initial)) {
        return Err(Error::ResourceExhausted {
            history,
            steps: 0,
            source,
        });
    }

    let dt = span.dt();
    let mut input = initial;
    let mut step = 0;

    while span.contains(input.time()) {
        let terminal = step > 0 && span.is_terminal(input.time());
        let output = model.call(&input).map_err(Error::model)?;

        if let Err(source) = history.try_reserve(1) {
            return Err(Error::ResourceExhausted {
                history,
                steps: step,
                source,
            });
        }
        history.push(Snapshot::new(input, output));
        let current = &history[history.len() - 1];

        let event = Event {
            step,
            snapshot: current,
            terminal,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                history,
                steps: step,
            });
        }

        if terminal {
            break;
        }

        let state = problem.state(&current.input).map_err(Error::problem)?;
        let derivative = problem
            .derivative(&current.input, &current.output)
            .map_err(Error::problem)?;
        let next_state = state.step(derivative, dt);

        let next = problem
            .build_input(&current.input, &next_state, &dt)
            .map_err(Error::problem)?;
        if next.time() <= current.input.time() {
            return Err(Error::Stalled {
                time: current.input.time(),
                dt,
            });
        }
        input = next;
        step += 1;
    }

    Ok(Solution {
        status: Status::Complete,
        history,
        steps: step,
    })
}

/// Integrates an ODE problem over a span without observation.
///
/// This is a convenience wrapper around [`solve`] that discards events.
///
/// # Errors
///
/// Returns an error if the initial time is not finite, the history cannot
/// grow, or the model or problem returns an error at any point.
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    initial: M::Input,
    span: &Span,
) -> Result<Solution<M::Input, M::Output>, Error<M::Input, M::Output>>
where
    M: Model,
    M::Input: Temporal,
    P: OdeProblem<Input = M::Input, Output = M::Output, Delta = f64>,
{
    solve(model, problem, initial, span, ())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use halflife_core::DerivativeOf;

    // --- Test fixtures ---

    /// State: position
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Position(f64);

    /// Derivative: velocity
    #[derive(Debug, Clone, Copy)]
    struct Velocity(f64);

    impl StepIntegrable<f64> for Position {
        type Derivative = Velocity;

        fn step(&self, derivative: Velocity, dt: f64) -> Self {
            Position(self.0 + derivative.0 * dt)
        }
    }

    /// Model input: current position and time.
    #[derive(Debug, Clone)]
    struct Input {
        position: Position,
        time: f64,
    }

    impl Temporal for Input {
        fn time(&self) -> f64 {
            self.time
        }
    }

    /// Model output: velocity at the current state.
    #[derive(Debug, Clone)]
    struct Output {
        velocity: Velocity,
    }

    /// Model with constant velocity.
    struct ConstantVelocityModel {
        velocity: f64,
    }

    impl Model for ConstantVelocityModel {
        type Input = Input;
        type Output = Output;
        type Error = Infallible;

        fn call(&self, _input: &Self::Input) -> Result<Self::Output, Self::Error> {
            Ok(Output {
                velocity: Velocity(self.velocity),
            })
        }
    }

    /// Problem that extracts position and velocity.
    struct MotionProblem;

    impl OdeProblem for MotionProblem {
        type Input = Input;
        type Output = Output;
        type Delta = f64;
        type State = Position;
        type Error = Infallible;

        fn state(&self, input: &Self::Input) -> Result<Self::State, Self::Error> {
            Ok(input.position)
        }

        fn derivative(
            &self,
            _input: &Self::Input,
            output: &Self::Output,
        ) -> Result<DerivativeOf<Self::State, Self::Delta>, Self::Error> {
            Ok(output.velocity)
        }

        fn build_input(
            &self,
            base: &Self::Input,
            state: &Self::State,
            delta: &Self::Delta,
        ) -> Result<Self::Input, Self::Error> {
            Ok(Input {
                position: *state,
                time: base.time + delta,
            })
        }
    }

    fn start_at(time: f64) -> Input {
        Input {
            position: Position(0.0),
            time,
        }
    }

    // --- Tests ---

    #[test]
    fn constant_velocity_motion() {
        let model = ConstantVelocityModel { velocity: 2.0 };
        let span = Span::new(1.0, 0.25).unwrap();

        let solution =
            solve_unobserved(&model, &MotionProblem, start_at(0.0), &span).expect("should solve");

        assert_eq!(solution.status, Status::Complete);
        assert_eq!(solution.steps, 4);
        assert_eq!(solution.history.len(), 5); // initial + 4 steps

        let last = solution.history.last().unwrap();
        assert_relative_eq!(last.input.position.0, 2.0);
        assert_relative_eq!(last.input.time, 1.0);
    }

    #[test]
    fn drifting_time_still_ends_on_boundary_step() {
        // Summing 0.1 ten times lands just short of 1.0.
        let model = ConstantVelocityModel { velocity: 1.0 };
        let span = Span::new(1.0, 0.1).unwrap();

        let solution =
            solve_unobserved(&model, &MotionProblem, start_at(0.0), &span).expect("should solve");

        assert_eq!(solution.history.len(), 11);
        assert_eq!(solution.steps, 10);
        assert_relative_eq!(
            solution.history.last().unwrap().input.time,
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn partial_final_step_rounds_to_nearest_boundary() {
        // 0.9 is within half a step of 1.0, so it is the last record.
        let model = ConstantVelocityModel { velocity: 1.0 };
        let span = Span::new(1.0, 0.3).unwrap();

        let solution =
            solve_unobserved(&model, &MotionProblem, start_at(0.0), &span).expect("should solve");

        let times: Vec<f64> = solution.history.iter().map(|s| s.input.time).collect();
        assert_eq!(times.len(), 4);
        assert_relative_eq!(times[3], 0.9, epsilon = 1e-12);
    }

    #[test]
    fn observer_can_stop_early() {
        let model = ConstantVelocityModel { velocity: 1.0 };
        let span = Span::new(100.0, 1.0).unwrap();

        let observer = |event: &Event<'_, Input, Output>| {
            if event.step >= 5 {
                Some(Action::StopEarly)
            } else {
                None
            }
        };

        let solution = solve(&model, &MotionProblem, start_at(0.0), &span, observer)
            .expect("should stop early");

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.steps, 5);
        assert_eq!(solution.history.len(), 6);
    }

    #[test]
    fn events_mark_only_the_boundary_as_terminal() {
        let model = ConstantVelocityModel { velocity: 1.0 };
        let span = Span::new(1.0, 0.25).unwrap();

        let mut seen = Vec::new();
        solve(
            &model,
            &MotionProblem,
            start_at(0.0),
            &span,
            |event: &Event<'_, Input, Output>| {
                seen.push((event.step, event.terminal));
                None
            },
        )
        .expect("should solve");

        assert_eq!(
            seen,
            vec![(0, false), (1, false), (2, false), (3, false), (4, true)]
        );
    }

    #[test]
    fn start_past_the_span_records_nothing() {
        let model = ConstantVelocityModel { velocity: 1.0 };
        let span = Span::new(1.0, 0.25).unwrap();

        let solution =
            solve_unobserved(&model, &MotionProblem, start_at(2.0), &span).expect("should solve");

        assert_eq!(solution.status, Status::Complete);
        assert!(solution.history.is_empty());
        assert_eq!(solution.steps, 0);
    }

    #[test]
    fn start_on_the_boundary_records_initial_state_only() {
        // The boundary check needs at least one step, so the solver advances
        // once and the next time falls outside the span.
        let model = ConstantVelocityModel { velocity: 1.0 };
        let span = Span::new(5.0, 1.0).unwrap();

        let solution =
            solve_unobserved(&model, &MotionProblem, start_at(5.0), &span).expect("should solve");

        assert_eq!(solution.history.len(), 1);
        assert_eq!(solution.steps, 1);
        assert_relative_eq!(solution.history[0].input.time, 5.0);
    }

    #[test]
    fn non_finite_initial_time_is_rejected() {
        let model = ConstantVelocityModel { velocity: 1.0 };
        let span = Span::new(1.0, 0.25).unwrap();

        let result = solve_unobserved(&model, &MotionProblem, start_at(f64::NAN), &span);

        assert!(matches!(
            result,
            Err(Error::InvalidSpan(SpanError::NonFinite {
                name: "t_initial",
                ..
            }))
        ));
    }

    #[test]
    fn step_below_time_resolution_stalls() {
        // Adding 1.0 to 1e17 rounds back to 1e17.
        let model = ConstantVelocityModel { velocity: 1.0 };
        let span = Span::new(1.0e17 + 96.0, 1.0).unwrap();

        let mut events = 0;
        let result = solve(
            &model,
            &MotionProblem,
            start_at(1.0e17),
            &span,
            |_event: &Event<'_, Input, Output>| {
                events += 1;
                None
            },
        );

        match result {
            Err(Error::Stalled { time, dt }) => {
                assert_relative_eq!(time, 1.0e17);
                assert_relative_eq!(dt, 1.0);
            }
            other => panic!("expected a stalled run, got {other:?}"),
        }
        assert_eq!(events, 1);
    }

    #[test]
    fn unreservable_history_reports_resource_exhaustion() {
        let model = ConstantVelocityModel { velocity: 1.0 };
        let span = Span::new(1.0e300, 1.0e-300).unwrap();

        let result = solve_unobserved(&model, &MotionProblem, start_at(0.0), &span);

        match result {
            Err(Error::ResourceExhausted { history, steps, .. }) => {
                assert!(history.is_empty());
                assert_eq!(steps, 0);
            }
            other => panic!("expected resource exhaustion, got {other:?}"),
        }
    }
}
