use std::{collections::TryReserveError, error::Error as StdError};

use halflife_core::Snapshot;
use thiserror::Error;

use super::SpanError;

/// Errors that can occur during Euler integration.
#[derive(Debug, Error)]
pub enum Error<I, O> {
    #[error("invalid span: {0}")]
    InvalidSpan(#[from] SpanError),

    #[error("model error: {0}")]
    Model(#[source] Box<dyn StdError + Send + Sync>),

    #[error("problem error: {0}")]
    Problem(#[source] Box<dyn StdError + Send + Sync>),

    /// A step left the time unchanged, so the run could never end.
    ///
    /// Happens when `dt` is below the floating-point resolution at `time`.
    #[error("step size {dt} s does not advance time {time} s")]
    Stalled { time: f64, dt: f64 },

    /// The step history could not grow.
    ///
    /// Carries every snapshot recorded before the failure.
    #[error("failed to grow the step history")]
    ResourceExhausted {
        history: Vec<Snapshot<I, O>>,
        steps: usize,
        #[source]
        source: TryReserveError,
    },
}

impl<I, O> Error<I, O> {
    pub(crate) fn model<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Model(Box::new(err))
    }

    pub(crate) fn problem<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Problem(Box::new(err))
    }
}
