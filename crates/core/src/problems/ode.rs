use crate::{DerivativeOf, StepIntegrable};

/// Defines an initial value problem over a model.
///
/// The problem is the glue between a model and the forward Euler solver. It
/// pulls the integrable state out of the model input, reads the state's
/// derivative from the model output, and rebuilds the next model input once
/// the solver has advanced the state by one step.
pub trait OdeProblem {
    type Input;
    type Output;
    type Delta;
    type State: StepIntegrable<Self::Delta>;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Extracts the state from model input.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the state cannot be extracted from the input.
    fn state(&self, input: &Self::Input) -> Result<Self::State, Self::Error>;

    /// Returns the derivative of the state given the model input and output.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the derivative cannot be computed.
    fn derivative(
        &self,
        input: &Self::Input,
        output: &Self::Output,
    ) -> Result<DerivativeOf<Self::State, Self::Delta>, Self::Error>;

    /// Builds the next model input from the stepped state.
    ///
    /// `base` is the input the step started from and `delta` the step size,
    /// so implementations advance any independent variable (usually time)
    /// alongside the state.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the input cannot be constructed from the state.
    fn build_input(
        &self,
        base: &Self::Input,
        state: &Self::State,
        delta: &Self::Delta,
    ) -> Result<Self::Input, Self::Error>;
}
