/// A trait for types that can be stepped using their derivative.
///
/// Implementing this trait lets the generic forward Euler solver advance the
/// type via `derivative * delta`, where the derivative is taken with respect
/// to `Delta`. For the decay models `Delta` is a time step in seconds.
pub trait StepIntegrable<Delta> {
    /// The derivative of the type with respect to `Delta`.
    type Derivative;

    /// Returns the value after stepping with a derivative and step size.
    #[must_use]
    fn step(&self, derivative: Self::Derivative, delta: Delta) -> Self;
}

/// Type alias for the derivative of a `StepIntegrable` type.
///
/// This is a convenience for accessing the [`StepIntegrable::Derivative`]
/// associated type without writing out the fully qualified syntax.
pub type DerivativeOf<T, Delta> = <T as StepIntegrable<Delta>>::Derivative;
