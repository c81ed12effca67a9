//! Radioactive decay integrated with forward Euler.
//!
//! The decay law `dN/dt = -λN` is integrated with explicit Euler steps and
//! every step is compared against the closed-form solution `N0·e^(-λt)`.
//!
//! - [`integrate`]: runs one step size and returns a [`Run`] of
//!   [`SimulationRecord`]s
//! - [`integrate_observed`]: same, reporting each record to an observer
//! - [`Nuclide`]: half-life and decay constant with `uom` units
//! - [`DisplaySampler`]: picks the records shown in a progress table
//! - [`ConvergenceStudy`]: compares runs across step sizes
//!
//! # Example
//!
//! ```
//! use halflife_decay::{Nuclide, integrate};
//!
//! let radon = Nuclide::radon_222();
//! let half_life = radon.half_life_seconds();
//!
//! let run = integrate(
//!     1.0e15,
//!     radon.lambda_per_second(),
//!     0.0,
//!     4.0 * half_life,
//!     half_life / 10.0,
//! )?;
//!
//! assert_eq!(run.len(), 41);
//! # Ok::<(), halflife_decay::Error>(())
//! ```

mod convergence;
mod error;
mod integrate;
mod model;
mod nuclide;
mod record;
mod run;
mod sampling;

pub use convergence::{ConvergenceEntry, ConvergenceStudy, OrderEstimate, observed_order};
pub use error::Error;
pub use integrate::{StepEvent, integrate, integrate_observed};
pub use model::{DecayInput, DecayModel, DecayOutput, DecayProblem, Population};
pub use nuclide::{Nuclide, NuclideError};
pub use record::{SimulationRecord, relative_error_percent};
pub use run::Run;
pub use sampling::DisplaySampler;

pub use halflife_solvers::transient::euler::{Action, Status};
