use crate::{Run, SimulationRecord};

/// Chooses which records of a run appear in a human-readable table.
///
/// Every `interval`-th record is shown, where the interval is a tenth of the
/// estimated record count (at least one), and the final record is always
/// shown. Sampling only affects display; a [`Run`] always holds every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySampler {
    interval: usize,
}

impl DisplaySampler {
    /// Creates a sampler for a run expected to produce `estimated_steps` records.
    #[must_use]
    pub fn new(estimated_steps: usize) -> Self {
        Self {
            interval: (estimated_steps / 10).max(1),
        }
    }

    /// Creates a sampler from the estimate the run was sized with.
    #[must_use]
    pub fn for_run(run: &Run) -> Self {
        Self::new(run.estimated_steps())
    }

    #[must_use]
    pub fn interval(&self) -> usize {
        self.interval
    }

    /// Returns `true` if record `index` of a run with `len` records is shown.
    #[must_use]
    pub fn shows(&self, index: usize, len: usize) -> bool {
        index % self.interval == 0 || index + 1 == len
    }

    /// Returns the shown records of `run` with their indices.
    pub fn sample(self, run: &Run) -> impl Iterator<Item = (usize, &SimulationRecord)> {
        let len = run.len();
        run.iter()
            .enumerate()
            .filter(move |(index, _)| self.shows(*index, len))
    }
}
