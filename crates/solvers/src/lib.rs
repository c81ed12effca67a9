//! Numerical solvers for the halflife workspace.
//!
//! # Modules
//!
//! - [`transient`]: explicit time integration of [`OdeProblem`]s over a time
//!   span
//!
//! [`OdeProblem`]: halflife_core::OdeProblem

pub mod transient;
