//! Solvers that march an ODE problem forward in time.
//!
//! # Solvers
//!
//! - [`euler`]: explicit first-order forward Euler over a fixed-step span

pub mod euler;
