//! The outer loop of a study: one decay run per step size.

use std::io::{self, Write};

use halflife_decay::{ConvergenceStudy, Error, Nuclide, Run, integrate};
use tracing::{error, info, info_span};

use crate::{config::StudyConfig, export, report};

/// Results of running every step size of a study.
#[derive(Debug, Default)]
pub struct StudyOutcome {
    pub study: ConvergenceStudy,
    /// Completed runs, kept only when requested.
    pub runs: Vec<Run>,
    /// Number of step sizes whose run or export failed.
    pub failures: usize,
}

/// Runs, reports, and exports one decay run per configured step size.
///
/// A failed run or export is reported and the study moves on to the next
/// step size. Runs are dropped after export unless `keep_runs` is set.
///
/// # Errors
///
/// Returns an error only if writing to `out` fails.
pub fn run_study(
    config: &StudyConfig,
    nuclide: &Nuclide,
    out: &mut impl Write,
    keep_runs: bool,
) -> io::Result<StudyOutcome> {
    let lambda = nuclide.lambda_per_second();
    let t_end = config.t_end(nuclide);
    let mut outcome = StudyOutcome::default();

    for delta_t in config.step_sizes(nuclide) {
        let _span = info_span!("run", delta_t).entered();

        let run = match integrate(
            config.initial_population,
            lambda,
            config.t_start,
            t_end,
            delta_t,
        ) {
            Ok(run) => run,
            Err(err) => {
                report_failure(out, delta_t, &err)?;
                outcome.failures += 1;
                writeln!(out, "{}", report::RULE)?;
                continue;
            }
        };

        report::write_run_table(out, &run)?;
        report::write_run_summary(out, &run)?;

        if run.is_empty() {
            outcome.failures += 1;
        } else {
            if config.export {
                match export::export_run(&config.output_dir, &run) {
                    Ok(path) => {
                        info!(path = %path.display(), records = run.len(), "exported run");
                        writeln!(out, "Results saved to {}", path.display())?;
                    }
                    Err(err) => {
                        error!("{err}");
                        writeln!(out, "Export failed: {err}")?;
                        outcome.failures += 1;
                    }
                }
            }
            outcome.study.add(&run);
            if keep_runs {
                outcome.runs.push(run);
            }
        }

        writeln!(out, "{}", report::RULE)?;
    }

    Ok(outcome)
}

fn report_failure(out: &mut impl Write, delta_t: f64, err: &Error) -> io::Result<()> {
    error!("decay run failed: {err}");
    writeln!(out, "Simulation failed for step size {delta_t:.2} s: {err}")?;
    if let Error::ResourceExhausted { records, .. } = err {
        writeln!(
            out,
            "{} records were produced before the run was aborted",
            records.len()
        )?;
    }
    Ok(())
}
