use std::slice;

use halflife_solvers::transient::euler::Status;

use crate::SimulationRecord;

/// The records produced by one decay integration.
///
/// Records are in time order, one per visited time step, starting at
/// `t_initial` and ending on the final boundary step. A run is read-only once
/// returned.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    records: Vec<SimulationRecord>,
    step_size: f64,
    estimated_steps: usize,
    advances: usize,
    status: Status,
}

impl Run {
    pub(crate) fn new(
        records: Vec<SimulationRecord>,
        step_size: f64,
        estimated_steps: usize,
        advances: usize,
        status: Status,
    ) -> Self {
        Self {
            records,
            step_size,
            estimated_steps,
            advances,
            status,
        }
    }

    #[must_use]
    pub fn records(&self) -> &[SimulationRecord] {
        &self.records
    }

    /// Returns the number of records, including the initial and final steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&SimulationRecord> {
        self.records.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&SimulationRecord> {
        self.records.last()
    }

    pub fn iter(&self) -> slice::Iter<'_, SimulationRecord> {
        self.records.iter()
    }

    /// Returns the step size the run was integrated with, in seconds.
    #[must_use]
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Returns the record count estimated before the run started.
    #[must_use]
    pub fn estimated_steps(&self) -> usize {
        self.estimated_steps
    }

    /// Returns the number of Euler updates applied to the population.
    ///
    /// For a completed run this is `len() - 1`, with one exception. A run that
    /// starts on the final boundary holds one record but counts one update,
    /// because the boundary is only checked once a step has been taken and
    /// that step leaves the span.
    #[must_use]
    pub fn advances(&self) -> usize {
        self.advances
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns the largest relative error over the run, in percent.
    #[must_use]
    pub fn max_relative_error_percent(&self) -> Option<f64> {
        self.records
            .iter()
            .map(|r| r.error_relative_percent)
            .reduce(f64::max)
    }
}

impl<'a> IntoIterator for &'a Run {
    type Item = &'a SimulationRecord;
    type IntoIter = slice::Iter<'a, SimulationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
