use thiserror::Error;

/// The end of a fixed-step run and the step used to reach it.
///
/// A run keeps stepping while the current time is within half a step of
/// `t_final`. The half-step tolerance absorbs floating-point drift in the
/// accumulated time, so a span that is a whole number of steps long ends on
/// exactly the boundary step regardless of rounding.
///
/// # Enforcement
///
/// - The step must be strictly positive and finite.
/// - The final time must be finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    t_final: f64,
    dt: f64,
}

/// Error returned when constructing an invalid [`Span`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SpanError {
    #[error("step size must be greater than zero, got {0} s")]
    NotPositive(f64),

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },
}

impl Span {
    /// Creates a span ending at `t_final` with step size `dt`, both in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`SpanError::NotPositive`] if `dt` is zero, negative, or NaN,
    /// and [`SpanError::NonFinite`] if `dt` or `t_final` is infinite or NaN.
    pub fn new(t_final: f64, dt: f64) -> Result<Self, SpanError> {
        if dt.is_nan() || dt <= 0.0 {
            return Err(SpanError::NotPositive(dt));
        }
        if !dt.is_finite() {
            return Err(SpanError::NonFinite {
                name: "dt",
                value: dt,
            });
        }
        if !t_final.is_finite() {
            return Err(SpanError::NonFinite {
                name: "t_final",
                value: t_final,
            });
        }
        Ok(Self { t_final, dt })
    }

    /// Returns the step size in seconds.
    #[must_use]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Returns `true` while a run at time `t` should keep recording.
    #[must_use]
    pub fn contains(&self, t: f64) -> bool {
        t <= self.t_final + 0.5 * self.dt
    }

    /// Returns `true` if a record at time `t` is on the final boundary.
    #[must_use]
    pub fn is_terminal(&self, t: f64) -> bool {
        t >= self.t_final - 0.5 * self.dt
    }

    /// Estimates the number of records a run starting at `t_initial` produces.
    ///
    /// The estimate is `floor((t_final - t_initial) / dt) + 2`, which covers
    /// the initial point and the boundary step. It is only used to size the
    /// history up front; accumulated rounding can make the real count differ.
    #[must_use]
    pub fn estimated_steps(&self, t_initial: f64) -> usize {
        let whole = ((self.t_final - t_initial) / self.dt).max(0.0);

        // Float-to-int casts saturate, so absurd spans clamp to usize::MAX.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let whole = whole as usize;

        whole.saturating_add(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_step_fails() {
        assert_eq!(Span::new(10.0, 0.0), Err(SpanError::NotPositive(0.0)));
    }

    #[test]
    fn negative_step_fails() {
        assert_eq!(Span::new(10.0, -1.0), Err(SpanError::NotPositive(-1.0)));
    }

    #[test]
    fn nan_step_fails() {
        assert!(matches!(
            Span::new(10.0, f64::NAN),
            Err(SpanError::NotPositive(_))
        ));
    }

    #[test]
    fn infinite_values_fail() {
        assert!(matches!(
            Span::new(10.0, f64::INFINITY),
            Err(SpanError::NonFinite { name: "dt", .. })
        ));
        assert!(matches!(
            Span::new(f64::INFINITY, 1.0),
            Err(SpanError::NonFinite {
                name: "t_final",
                ..
            })
        ));
    }

    #[test]
    fn boundary_tests_use_half_step_tolerance() {
        let span = Span::new(10.0, 2.0).unwrap();

        assert!(span.contains(11.0));
        assert!(!span.contains(11.5));

        assert!(span.is_terminal(9.0));
        assert!(!span.is_terminal(8.5));
    }

    #[test]
    fn estimate_covers_initial_and_boundary_steps() {
        let span = Span::new(1.0, 0.25).unwrap();
        assert_eq!(span.estimated_steps(0.0), 6);
    }

    #[test]
    fn estimate_for_empty_span_is_minimal() {
        let span = Span::new(1.0, 0.25).unwrap();
        assert_eq!(span.estimated_steps(5.0), 2);
    }

    #[test]
    fn estimate_saturates_for_tiny_steps() {
        let span = Span::new(1.0e300, 1.0e-300).unwrap();
        assert_eq!(span.estimated_steps(0.0), usize::MAX);
    }
}
