//! Console output of a study: banner, run tables, and the convergence table.

use std::io::{self, Write};

use halflife_decay::{ConvergenceStudy, DisplaySampler, Nuclide, Run};

use crate::{config::StudyConfig, export::sci};

const SECONDS_PER_DAY: f64 = 86_400.0;
const SECONDS_PER_HOUR: f64 = 3_600.0;

pub const RULE: &str =
    "==========================================================================";

/// Writes the description of the simulated system.
pub fn write_banner(
    out: &mut impl Write,
    config: &StudyConfig,
    nuclide: &Nuclide,
) -> io::Result<()> {
    let t_end = config.t_end(nuclide);
    writeln!(out, "{RULE}")?;
    writeln!(
        out,
        "Radioactive decay of {} with the forward Euler method",
        nuclide.name()
    )?;
    writeln!(out, "{RULE}")?;
    writeln!(
        out,
        "Initial population (N0)  : {} atoms",
        sci(config.initial_population, 2)
    )?;
    writeln!(
        out,
        "Half-life                : {:.2} days ({:.2} s)",
        nuclide.half_life_days(),
        nuclide.half_life_seconds()
    )?;
    writeln!(
        out,
        "Decay constant (lambda)  : {} 1/s",
        sci(nuclide.lambda_per_second(), 4)
    )?;
    writeln!(
        out,
        "Simulated span           : {:.1} s to {:.1} s ({:.2} days)",
        config.t_start,
        t_end,
        (t_end - config.t_start) / SECONDS_PER_DAY
    )?;
    writeln!(out, "{RULE}")
}

/// Writes the sampled record table of a run.
pub fn write_run_table(out: &mut impl Write, run: &Run) -> io::Result<()> {
    writeln!(
        out,
        "Step size: {:.2} s ({:.2} hours)",
        run.step_size(),
        run.step_size() / SECONDS_PER_HOUR
    )?;
    writeln!(
        out,
        "| {:>12} | {:>12} | {:>12} | {:>12} | {:>10} |",
        "Time (s)", "N numerical", "N analytical", "Abs. error", "Rel. (%)"
    )?;
    for (_, record) in DisplaySampler::for_run(run).sample(run) {
        writeln!(
            out,
            "| {:>12.2} | {:>12} | {:>12} | {:>12} | {:>10.4} |",
            record.time,
            sci(record.n_numerical, 3),
            sci(record.n_analytical, 3),
            sci(record.error_absolute, 3),
            record.error_relative_percent
        )?;
    }
    Ok(())
}

/// Writes the end-of-run summary.
///
/// An empty run is reported as producing no records.
pub fn write_run_summary(out: &mut impl Write, run: &Run) -> io::Result<()> {
    let Some(last) = run.last() else {
        return writeln!(
            out,
            "No records were produced for step size {:.2} s",
            run.step_size()
        );
    };
    writeln!(out, "Records            : {}", run.len())?;
    writeln!(out, "Euler steps        : {}", run.advances())?;
    writeln!(out, "Final time         : {:.2} s", last.time)?;
    writeln!(out, "Final abs. error   : {}", sci(last.error_absolute, 4))?;
    writeln!(
        out,
        "Final rel. error   : {:.4} %",
        last.error_relative_percent
    )
}

/// Writes the final and maximum errors per step size with the observed order.
pub fn write_convergence(out: &mut impl Write, study: &ConvergenceStudy) -> io::Result<()> {
    writeln!(out, "Convergence across step sizes")?;
    if study.entries().is_empty() {
        return writeln!(out, "No completed runs to compare");
    }

    writeln!(
        out,
        "| {:>12} | {:>8} | {:>14} | {:>14} | {:>6} |",
        "Step (s)", "Records", "Final rel. (%)", "Max rel. (%)", "Order"
    )?;

    let entries = study.by_step_size();
    let orders = study.orders();
    for (index, entry) in entries.iter().enumerate() {
        // Orders pair each entry with its coarser neighbour.
        let order = index
            .checked_sub(1)
            .and_then(|previous| orders.get(previous))
            .and_then(|estimate| estimate.order)
            .map_or_else(|| "-".to_owned(), |order| format!("{order:.3}"));
        writeln!(
            out,
            "| {:>12.2} | {:>8} | {:>14.6} | {:>14.6} | {:>6} |",
            entry.delta_t,
            entry.records,
            entry.final_record.error_relative_percent,
            entry.max_relative_error_percent,
            order
        )?;
    }

    if study.is_converging() {
        writeln!(out, "Final error decreases with every smaller step size")
    } else {
        writeln!(out, "Final error does not decrease monotonically")
    }
}
