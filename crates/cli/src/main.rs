//! Compares forward Euler decay runs at several step sizes against the
//! closed-form solution and exports one CSV file per run.

mod config;
mod export;
mod report;
mod study;

use std::{io, path::PathBuf};

use anyhow::anyhow;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::StudyConfig;

#[derive(Debug, Parser)]
#[command(
    name = "halflife",
    version,
    about = "Forward Euler radioactive decay step-size study",
    allow_negative_numbers = true
)]
struct Cli {
    /// TOML file with study settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Initial number of atoms
    #[arg(long)]
    n0: Option<f64>,

    /// Half-life in days
    #[arg(long)]
    half_life_days: Option<f64>,

    /// Simulated span in half-lives
    #[arg(long)]
    half_lives: Option<f64>,

    /// Step size as a fraction of the half-life (repeatable)
    #[arg(short, long = "divisor")]
    divisors: Vec<f64>,

    /// Directory for the exported CSV files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Skip CSV export
    #[arg(long)]
    no_export: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Open a plot of every run after the study
    #[cfg(feature = "plot")]
    #[arg(long)]
    plot: bool,
}

impl Cli {
    /// Applies command-line overrides on top of `config`.
    fn apply(&self, mut config: StudyConfig) -> StudyConfig {
        if let Some(n0) = self.n0 {
            config.initial_population = n0;
        }
        if let Some(days) = self.half_life_days {
            config.half_life_days = days;
        }
        if let Some(half_lives) = self.half_lives {
            config.half_lives = half_lives;
        }
        if !self.divisors.is_empty() {
            config.step_divisors.clone_from(&self.divisors);
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir.clone_from(dir);
        }
        if self.no_export {
            config.export = false;
        }
        config
    }

    fn resolve_config(&self) -> anyhow::Result<StudyConfig> {
        let base = match &self.config {
            Some(path) => StudyConfig::load(path)?,
            None => StudyConfig::default(),
        };
        let config = self.apply(base);
        config
            .validate()
            .map_err(|reason| anyhow!("invalid configuration: {reason}"))?;
        Ok(config)
    }

    #[cfg(feature = "plot")]
    fn wants_plot(&self) -> bool {
        self.plot
    }

    #[cfg(not(feature = "plot"))]
    fn wants_plot(&self) -> bool {
        false
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = cli.resolve_config()?;
    let nuclide = config.nuclide()?;
    info!(%nuclide, runs = config.step_divisors.len(), "starting study");

    let mut out = io::stdout().lock();
    report::write_banner(&mut out, &config, &nuclide)?;
    let outcome = study::run_study(&config, &nuclide, &mut out, cli.wants_plot())?;
    report::write_convergence(&mut out, &outcome.study)?;

    if outcome.failures > 0 {
        warn!(failures = outcome.failures, "some step sizes did not complete");
    }

    #[cfg(feature = "plot")]
    if cli.plot {
        show_plot(&nuclide, &outcome.runs)?;
    }

    Ok(())
}

/// Opens the population and relative error figures for every completed run.
#[cfg(feature = "plot")]
fn show_plot(
    nuclide: &halflife_decay::Nuclide,
    runs: &[halflife_decay::Run],
) -> anyhow::Result<()> {
    use halflife_plot::{Figure, Window};

    let Some(finest) = runs
        .iter()
        .min_by(|a, b| a.step_size().total_cmp(&b.step_size()))
    else {
        warn!("no completed runs to plot");
        return Ok(());
    };

    let population = runs
        .iter()
        .fold(
            Figure::new(
                format!("Decay of {}: numerical vs analytical", nuclide.name()),
                "N (atoms)",
            ),
            Figure::add_run,
        )
        .add_analytical(finest);
    let error = runs.iter().fold(
        Figure::new("Relative error vs time", "relative error (%)"),
        Figure::add_run_error,
    );

    Window::new(format!("halflife: {}", nuclide.name()))
        .add_figure(population)
        .add_figure(error)
        .show()
        .map_err(|err| anyhow!("failed to open the plot window: {err}"))
}
