use std::{collections::TryReserveError, error::Error as StdError};

use halflife_solvers::transient::euler::{self, SpanError};
use thiserror::Error;

use crate::{DecayInput, DecayOutput, SimulationRecord};

/// Errors that can occur while integrating a decay run.
#[derive(Debug, Error)]
pub enum Error {
    /// A parameter was rejected before any records were produced.
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// The record history could not grow and the run was aborted.
    ///
    /// `records` holds every record produced before the failure and `steps`
    /// the number of Euler updates reached.
    #[error("failed to grow the record history after {steps} steps")]
    ResourceExhausted {
        records: Vec<SimulationRecord>,
        steps: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("model evaluation failed: {0}")]
    Evaluation(#[source] Box<dyn StdError + Send + Sync>),
}

impl Error {
    pub(crate) fn non_finite(name: &'static str, value: f64) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason: "must be finite",
        }
    }
}

impl From<SpanError> for Error {
    fn from(err: SpanError) -> Self {
        match err {
            SpanError::NotPositive(value) => Self::InvalidParameter {
                name: "delta_t",
                value,
                reason: "must be greater than zero",
            },
            SpanError::NonFinite { name: "dt", value } => Self::non_finite("delta_t", value),
            SpanError::NonFinite { name, value } => Self::non_finite(name, value),
        }
    }
}

impl From<euler::Error<DecayInput, DecayOutput>> for Error {
    fn from(err: euler::Error<DecayInput, DecayOutput>) -> Self {
        match err {
            euler::Error::InvalidSpan(err) => err.into(),
            euler::Error::Model(err) | euler::Error::Problem(err) => Self::Evaluation(err),
            euler::Error::Stalled { dt, .. } => Self::InvalidParameter {
                name: "delta_t",
                value: dt,
                reason: "too small to advance time",
            },
            euler::Error::ResourceExhausted {
                history,
                steps,
                source,
            } => Self::ResourceExhausted {
                records: history.iter().map(SimulationRecord::from).collect(),
                steps,
                source,
            },
        }
    }
}
