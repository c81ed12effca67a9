use std::{fs, path::Path, path::PathBuf};

use anyhow::Context;
use halflife_decay::{Nuclide, NuclideError};
use serde::Deserialize;
use uom::si::time::day;

/// Settings for a step-size convergence study.
///
/// Every field has a default, so a TOML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StudyConfig {
    /// Label of the simulated isotope.
    pub nuclide: String,
    /// Initial number of atoms.
    pub initial_population: f64,
    pub half_life_days: f64,
    /// Start time of every run, in seconds.
    pub t_start: f64,
    /// Length of every run, in half-lives.
    pub half_lives: f64,
    /// Each run uses `Δt = T½ / divisor`.
    pub step_divisors: Vec<f64>,
    /// Directory receiving one CSV file per run.
    pub output_dir: PathBuf,
    pub export: bool,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            nuclide: "Rn-222".to_owned(),
            initial_population: 1.0e15,
            half_life_days: 3.8235,
            t_start: 0.0,
            half_lives: 4.0,
            step_divisors: vec![10.0, 20.0, 50.0, 100.0, 200.0],
            output_dir: PathBuf::from("."),
            export: true,
        }
    }
}

impl StudyConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or has unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Validates the values shared by every run.
    ///
    /// Individual step sizes are not checked here; a bad step only fails its
    /// own run.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.initial_population.is_finite() {
            return Err("initial_population must be finite");
        }
        if !self.half_life_days.is_finite() || self.half_life_days <= 0.0 {
            return Err("half_life_days must be finite and positive");
        }
        if !self.t_start.is_finite() {
            return Err("t_start must be finite");
        }
        if !self.half_lives.is_finite() || self.half_lives <= 0.0 {
            return Err("half_lives must be finite and positive");
        }
        if self.step_divisors.is_empty() {
            return Err("step_divisors must not be empty");
        }
        Ok(())
    }

    /// Builds the simulated nuclide.
    ///
    /// # Errors
    ///
    /// Returns an error if the half-life is not strictly positive and finite.
    pub fn nuclide(&self) -> Result<Nuclide, NuclideError> {
        Nuclide::with_half_life::<day>(self.nuclide.clone(), self.half_life_days)
    }

    /// Returns the end time of every run, in seconds.
    #[must_use]
    pub fn t_end(&self, nuclide: &Nuclide) -> f64 {
        self.t_start + self.half_lives * nuclide.half_life_seconds()
    }

    /// Returns the step sizes of the study, in seconds.
    #[must_use]
    pub fn step_sizes(&self, nuclide: &Nuclide) -> Vec<f64> {
        let half_life = nuclide.half_life_seconds();
        self.step_divisors
            .iter()
            .map(|divisor| half_life / divisor)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn defaults_describe_the_radon_study() {
        let config = StudyConfig::default();
        let nuclide = config.nuclide().unwrap();

        assert!(config.validate().is_ok());
        assert_relative_eq!(config.t_end(&nuclide), 1_321_401.6, max_relative = 1e-12);

        let steps = config.step_sizes(&nuclide);
        assert_eq!(steps.len(), 5);
        assert_relative_eq!(steps[0], 33_035.04, max_relative = 1e-12);
        assert_relative_eq!(steps[4], 1_651.752, max_relative = 1e-12);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = StudyConfig::from_toml_str(
            r#"
            initial_population = 5.0e10
            step_divisors = [4.0, 8.0]
            output_dir = "results"
            "#,
        )
        .unwrap();

        assert_relative_eq!(config.initial_population, 5.0e10);
        assert_eq!(config.step_divisors, vec![4.0, 8.0]);
        assert_eq!(config.output_dir, PathBuf::from("results"));
        assert_relative_eq!(config.half_life_days, 3.8235);
        assert!(config.export);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(StudyConfig::from_toml_str("half_life = 3.0").is_err());
    }

    #[test]
    fn load_reads_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("study.toml");
        fs::write(&path, "nuclide = \"I-131\"\nhalf_life_days = 8.02\n").unwrap();

        let config = StudyConfig::load(&path).unwrap();

        assert_eq!(config.nuclide, "I-131");
        assert_relative_eq!(config.half_life_days, 8.02);
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = StudyConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }

    #[test]
    fn validation_rejects_bad_shared_values() {
        let no_steps = StudyConfig {
            step_divisors: Vec::new(),
            ..StudyConfig::default()
        };
        assert_eq!(no_steps.validate(), Err("step_divisors must not be empty"));

        let no_half_life = StudyConfig {
            half_life_days: 0.0,
            ..StudyConfig::default()
        };
        assert!(no_half_life.validate().is_err());

        let endless = StudyConfig {
            half_lives: f64::INFINITY,
            ..StudyConfig::default()
        };
        assert!(endless.validate().is_err());
    }

    #[test]
    fn non_positive_divisors_pass_validation() {
        let config = StudyConfig {
            step_divisors: vec![10.0, -1.0],
            ..StudyConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
