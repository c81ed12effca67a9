//! CSV export of decay runs.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use halflife_decay::Run;
use thiserror::Error;

/// Column names of an exported run.
pub const HEADER: [&str; 5] = [
    "Time_s",
    "N_Numerical",
    "N_Analytical",
    "Error_Absolute",
    "Error_Relative_Percent",
];

/// Errors that can occur while exporting a run.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create output directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open {} for writing: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Returns the file name for a run with step size `delta_t`.
///
/// The step size is rounded to whole seconds.
#[must_use]
pub fn file_name(delta_t: f64) -> String {
    format!("output_{delta_t:.0}.csv")
}

/// Formats `value` in scientific notation with a signed, two-digit exponent.
///
/// ```text
/// 1e15    -> 1.000000e+15
/// 1.5e-7  -> 1.500000e-07
/// ```
#[must_use]
pub fn sci(value: f64, precision: usize) -> String {
    let formatted = format!("{value:.precision$e}");
    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        return formatted;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

/// Writes the header and one row per record of `run`.
///
/// # Errors
///
/// Returns an error if a row cannot be written or the writer cannot be flushed.
pub fn write_run<W: io::Write>(mut writer: csv::Writer<W>, run: &Run) -> Result<(), csv::Error> {
    writer.write_record(HEADER)?;
    for record in run {
        writer.write_record([
            format!("{:.4}", record.time),
            sci(record.n_numerical, 6),
            sci(record.n_analytical, 6),
            sci(record.error_absolute, 6),
            format!("{:.6}", record.error_relative_percent),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Exports `run` into `dir`, creating the directory if needed.
///
/// Returns the path of the written file.
///
/// # Errors
///
/// Returns an [`ExportError`] if the directory or file cannot be created or
/// written.
pub fn export_run(dir: &Path, run: &Run) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(file_name(run.step_size()));
    let writer = csv::Writer::from_path(&path).map_err(|source| ExportError::Open {
        path: path.clone(),
        source,
    })?;
    write_run(writer, run).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}
