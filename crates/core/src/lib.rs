//! Core traits and types for the halflife workspace.
//!
//! This crate defines the shared abstractions that the transient solver and
//! the decay models build on:
//!
//! - [`Model`]: a callable that maps a typed input to a typed output
//! - [`Snapshot`]: a captured input/output pair from a model call
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`OdeProblem`]: adapts a model's input and output to an integrable state
//! - [`StepIntegrable`]: a state that can be advanced by `derivative * delta`
//! - [`Temporal`]: a model input that carries its simulation time

mod model;
mod observer;
mod problems;
mod step;
mod temporal;

pub use model::{Model, Snapshot};
pub use observer::Observer;
pub use problems::OdeProblem;
pub use step::{DerivativeOf, StepIntegrable};
pub use temporal::Temporal;
