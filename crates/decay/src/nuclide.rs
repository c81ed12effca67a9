use std::{f64::consts::LN_2, fmt};

use thiserror::Error;
use uom::{
    Conversion,
    si::{
        f64::{Frequency, Time},
        frequency::hertz,
        time::{self, day, second},
    },
};

/// A radioactive isotope described by its half-life.
///
/// The half-life is kept as a unit-safe [`Time`]; the decay constant
/// `λ = ln 2 / T½` is derived from it on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct Nuclide {
    name: String,
    half_life: Time,
}

/// Error returned when constructing a [`Nuclide`] with an invalid half-life.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum NuclideError {
    #[error("half-life must be greater than zero, got {0} s")]
    NotPositive(f64),

    #[error("half-life must be finite, got {0} s")]
    NonFinite(f64),
}

impl Nuclide {
    /// Creates a nuclide from a half-life given as a [`Time`].
    ///
    /// # Errors
    ///
    /// Returns [`NuclideError`] if the half-life is not strictly positive and
    /// finite.
    pub fn new(name: impl Into<String>, half_life: Time) -> Result<Self, NuclideError> {
        let seconds = half_life.get::<second>();
        if seconds.is_nan() || seconds <= 0.0 {
            return Err(NuclideError::NotPositive(seconds));
        }
        if !seconds.is_finite() {
            return Err(NuclideError::NonFinite(seconds));
        }
        Ok(Self {
            name: name.into(),
            half_life,
        })
    }

    /// Creates a nuclide from a half-life value in the unit `U`.
    ///
    /// ```
    /// use halflife_decay::Nuclide;
    /// use uom::si::time::hour;
    ///
    /// let iodine = Nuclide::with_half_life::<hour>("I-131", 192.5)?;
    /// assert_eq!(iodine.name(), "I-131");
    /// # Ok::<(), halflife_decay::NuclideError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`NuclideError`] if the half-life is not strictly positive and
    /// finite.
    pub fn with_half_life<U>(name: impl Into<String>, value: f64) -> Result<Self, NuclideError>
    where
        U: time::Unit + Conversion<f64, T = f64>,
    {
        Self::new(name, Time::new::<U>(value))
    }

    /// Radon-222, `T½ = 3.8235 d`.
    #[must_use]
    pub fn radon_222() -> Self {
        Self {
            name: "Rn-222".to_owned(),
            half_life: Time::new::<day>(3.8235),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn half_life_seconds(&self) -> f64 {
        self.half_life.get::<second>()
    }

    #[must_use]
    pub fn half_life_days(&self) -> f64 {
        self.half_life.get::<day>()
    }

    /// Returns the decay constant `λ = ln 2 / T½`.
    #[must_use]
    pub fn decay_constant(&self) -> Frequency {
        Frequency::new::<hertz>(LN_2 / self.half_life_seconds())
    }

    /// Returns the decay constant in 1/s.
    #[must_use]
    pub fn lambda_per_second(&self) -> f64 {
        self.decay_constant().get::<hertz>()
    }
}

impl fmt::Display for Nuclide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (T½ = {} d)", self.name, self.half_life_days())
    }
}
