use halflife_core::Snapshot;

use crate::{DecayInput, DecayOutput};

/// The numerical and analytical population at one time step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationRecord {
    /// Elapsed simulation time in seconds.
    pub time: f64,
    /// Forward Euler estimate of the population.
    pub n_numerical: f64,
    /// Closed-form population `N0·e^(-λt)`.
    pub n_analytical: f64,
    /// `|n_numerical - n_analytical|`.
    pub error_absolute: f64,
    /// Absolute error as a percentage of the analytical value.
    ///
    /// Zero whenever the analytical value is exactly zero.
    pub error_relative_percent: f64,
}

impl SimulationRecord {
    /// Builds a record and derives both error metrics.
    #[must_use]
    pub fn new(time: f64, n_numerical: f64, n_analytical: f64) -> Self {
        let error_absolute = (n_numerical - n_analytical).abs();
        Self {
            time,
            n_numerical,
            n_analytical,
            error_absolute,
            error_relative_percent: relative_error_percent(error_absolute, n_analytical),
        }
    }
}

impl From<&Snapshot<DecayInput, DecayOutput>> for SimulationRecord {
    fn from(snapshot: &Snapshot<DecayInput, DecayOutput>) -> Self {
        Self::new(
            snapshot.input.time,
            snapshot.input.population.0,
            snapshot.output.analytical,
        )
    }
}

/// Returns `error_absolute / reference × 100`, or zero if `reference` is zero.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn relative_error_percent(error_absolute: f64, reference: f64) -> f64 {
    if reference == 0.0 {
        0.0
    } else {
        error_absolute / reference * 100.0
    }
}
