use crate::{Run, SimulationRecord};

/// Summary of one run in a step-size study.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceEntry {
    pub delta_t: f64,
    pub records: usize,
    pub final_record: SimulationRecord,
    pub max_relative_error_percent: f64,
}

/// Observed convergence order between two neighbouring step sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderEstimate {
    pub coarse_dt: f64,
    pub fine_dt: f64,
    /// `None` when either final error is zero or the step sizes coincide.
    pub order: Option<f64>,
}

/// Collects the final errors of runs at different step sizes.
///
/// Forward Euler is first order, so halving the step should roughly halve
/// the final error and the observed order between neighbouring step sizes
/// should be close to one.
#[derive(Debug, Clone, Default)]
pub struct ConvergenceStudy {
    entries: Vec<ConvergenceEntry>,
}

impl ConvergenceStudy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a run to the study.
    ///
    /// Returns `None` and ignores the run if it has no records.
    pub fn add(&mut self, run: &Run) -> Option<&ConvergenceEntry> {
        let final_record = *run.last()?;
        let max_relative_error_percent = run.max_relative_error_percent()?;

        self.entries.push(ConvergenceEntry {
            delta_t: run.step_size(),
            records: run.len(),
            final_record,
            max_relative_error_percent,
        });
        self.entries.last()
    }

    /// Returns the entries in the order they were added.
    #[must_use]
    pub fn entries(&self) -> &[ConvergenceEntry] {
        &self.entries
    }

    /// Returns the entries ordered from the largest step to the smallest.
    #[must_use]
    pub fn by_step_size(&self) -> Vec<ConvergenceEntry> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.delta_t.total_cmp(&a.delta_t));
        sorted
    }

    /// Returns the observed order between each pair of neighbouring step sizes.
    #[must_use]
    pub fn orders(&self) -> Vec<OrderEstimate> {
        self.by_step_size()
            .windows(2)
            .map(|pair| {
                let (coarse, fine) = (&pair[0], &pair[1]);
                OrderEstimate {
                    coarse_dt: coarse.delta_t,
                    fine_dt: fine.delta_t,
                    order: observed_order(
                        coarse.delta_t,
                        coarse.final_record.error_relative_percent,
                        fine.delta_t,
                        fine.final_record.error_relative_percent,
                    ),
                }
            })
            .collect()
    }

    /// Returns `true` if the final relative error shrinks with every smaller step.
    #[must_use]
    pub fn is_converging(&self) -> bool {
        self.by_step_size().windows(2).all(|pair| {
            pair[1].final_record.error_relative_percent
                < pair[0].final_record.error_relative_percent
        })
    }
}

/// Returns `ln(e_coarse / e_fine) / ln(dt_coarse / dt_fine)`.
///
/// Returns `None` if either error is not strictly positive or the step sizes
/// are equal, where the order is undefined.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn observed_order(
    coarse_dt: f64,
    coarse_error: f64,
    fine_dt: f64,
    fine_error: f64,
) -> Option<f64> {
    if !(coarse_error > 0.0 && fine_error > 0.0 && coarse_dt > 0.0 && fine_dt > 0.0) {
        return None;
    }

    let step_ratio = (coarse_dt / fine_dt).ln();
    if step_ratio == 0.0 {
        return None;
    }

    Some((coarse_error / fine_error).ln() / step_ratio)
}
