//! Plotting utilities for decay runs.
//!
//! A [`Figure`] is one plot of named series against time in days. Runs are
//! added with [`Figure::add_run`] (numerical population),
//! [`Figure::add_analytical`] (the closed-form curve sampled at a run's time
//! steps) and [`Figure::add_run_error`] (relative error in percent).
//!
//! A [`Window`] stacks one or more figures in a blocking egui window.

use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoint};
use halflife_decay::{Run, SimulationRecord};

const SECONDS_PER_DAY: f64 = 86_400.0;
const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Which value of a [`SimulationRecord`] a series plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trace {
    Numerical,
    Analytical,
    RelativeError,
}

impl Trace {
    fn value(self, record: &SimulationRecord) -> f64 {
        match self {
            Trace::Numerical => record.n_numerical,
            Trace::Analytical => record.n_analytical,
            Trace::RelativeError => record.error_relative_percent,
        }
    }
}

/// Returns `[time in days, value]` points for one trace of a run.
#[must_use]
pub fn run_points(run: &Run, trace: Trace) -> Vec<[f64; 2]> {
    run.iter()
        .map(|record| [record.time / SECONDS_PER_DAY, trace.value(record)])
        .collect()
}

fn step_label(run: &Run) -> String {
    format!("Δt = {:.2} h", run.step_size() / SECONDS_PER_HOUR)
}

struct Series {
    name: String,
    points: Vec<PlotPoint>,
}

/// A single plot of named series sharing one y axis.
pub struct Figure {
    title: String,
    y_label: String,
    series: Vec<Series>,
}

impl Figure {
    #[must_use]
    pub fn new(title: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            y_label: y_label.into(),
            series: Vec::new(),
        }
    }

    fn add_series(mut self, name: String, points: &[[f64; 2]]) -> Self {
        self.series.push(Series {
            name,
            points: points.iter().copied().map(Into::into).collect(),
        });
        self
    }

    /// Adds the numerical population of `run`, labelled with its step size.
    #[must_use]
    pub fn add_run(self, run: &Run) -> Self {
        let name = step_label(run);
        self.add_series(name, &run_points(run, Trace::Numerical))
    }

    /// Adds the analytical population sampled at the time steps of `run`.
    #[must_use]
    pub fn add_analytical(self, run: &Run) -> Self {
        self.add_series("Analytical".to_owned(), &run_points(run, Trace::Analytical))
    }

    /// Adds the relative error of `run` in percent, labelled with its step size.
    #[must_use]
    pub fn add_run_error(self, run: &Run) -> Self {
        let name = step_label(run);
        self.add_series(name, &run_points(run, Trace::RelativeError))
    }

    /// Number of series added so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    fn ui(&self, ui: &mut egui::Ui, id: usize, height: f32) {
        ui.heading(self.title.as_str());
        Plot::new(("halflife-figure", id))
            .legend(Legend::default())
            .height(height)
            .x_axis_label("time (days)")
            .y_axis_label(self.y_label.clone())
            .show(ui, |plot_ui| {
                for series in &self.series {
                    plot_ui.line(Line::new(series.points.as_slice()).name(&series.name));
                }
            });
    }
}

/// A runnable egui window stacking figures vertically.
pub struct Window {
    title: String,
    figures: Vec<Figure>,
}

impl Window {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            figures: Vec::new(),
        }
    }

    #[must_use]
    pub fn add_figure(mut self, figure: Figure) -> Self {
        self.figures.push(figure);
        self
    }

    /// Number of figures in the window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.figures.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    /// Opens the window and blocks until it is closed.
    ///
    /// # Errors
    ///
    /// Returns an error if the native window cannot be created.
    pub fn show(self) -> Result<(), eframe::Error> {
        let title = self.title.clone();
        eframe::run_native(
            &title,
            eframe::NativeOptions::default(),
            Box::new(|_cc| Ok(Box::new(self))),
        )
    }
}

impl eframe::App for Window {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            #[allow(clippy::cast_precision_loss)]
            let share = 1.0 / self.figures.len().max(1) as f32;
            // Leave room for each figure's heading.
            let height = (ui.available_height() * share - 32.0).max(120.0);
            for (id, figure) in self.figures.iter().enumerate() {
                figure.ui(ui, id, height);
            }
        });
    }
}
