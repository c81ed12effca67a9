use std::convert::Infallible;

use halflife_core::{DerivativeOf, Model, OdeProblem, StepIntegrable, Temporal};

/// Number of undecayed atoms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Population(pub f64);

impl StepIntegrable<f64> for Population {
    /// Atoms per second.
    type Derivative = f64;

    fn step(&self, rate: f64, dt: f64) -> Self {
        Population(self.0 + dt * rate)
    }
}

/// Model input: the population at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayInput {
    pub time: f64,
    pub population: Population,
}

impl Temporal for DecayInput {
    fn time(&self) -> f64 {
        self.time
    }
}

/// Model output at a given input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayOutput {
    /// Decay rate `dN/dt = -λN` at the input population.
    pub rate: f64,
    /// Closed-form population `N0·e^(-λt)` at the input time.
    pub analytical: f64,
}

/// First-order decay `dN/dt = -λN` with initial population `N0`.
///
/// The model evaluates both the rate that drives the numerical integration and
/// the exact solution that the numerical estimate is compared against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayModel {
    n0: f64,
    lambda: f64,
}

impl DecayModel {
    /// Creates a decay model from the initial population and decay constant (1/s).
    #[must_use]
    pub fn new(n0: f64, lambda: f64) -> Self {
        Self { n0, lambda }
    }

    /// Returns `N0·e^(-λt)`.
    #[must_use]
    pub fn analytical(&self, time: f64) -> f64 {
        self.n0 * (-self.lambda * time).exp()
    }

    /// Returns `-λN`.
    #[must_use]
    pub fn rate(&self, population: Population) -> f64 {
        -self.lambda * population.0
    }

    /// Returns the input holding `N0` at `time`.
    #[must_use]
    pub fn initial_input(&self, time: f64) -> DecayInput {
        DecayInput {
            time,
            population: Population(self.n0),
        }
    }
}

impl Model for DecayModel {
    type Input = DecayInput;
    type Output = DecayOutput;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(DecayOutput {
            rate: self.rate(input.population),
            analytical: self.analytical(input.time),
        })
    }
}

/// Integrates the population of a [`DecayModel`] in time.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecayProblem;

impl OdeProblem for DecayProblem {
    type Input = DecayInput;
    type Output = DecayOutput;
    type Delta = f64;
    type State = Population;
    type Error = Infallible;

    fn state(&self, input: &Self::Input) -> Result<Self::State, Self::Error> {
        Ok(input.population)
    }

    fn derivative(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<DerivativeOf<Self::State, Self::Delta>, Self::Error> {
        Ok(output.rate)
    }

    fn build_input(
        &self,
        base: &Self::Input,
        state: &Self::State,
        delta: &Self::Delta,
    ) -> Result<Self::Input, Self::Error> {
        Ok(DecayInput {
            time: base.time + delta,
            population: *state,
        })
    }
}
