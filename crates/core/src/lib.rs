//! Core traits and types for qcar.
//!
//! This crate defines the shared abstractions that integrators and models
//! build on:
//!
//! - [`OdeSystem`]: a fallible derivative function `dy/dt = f(t, y)`
//! - [`Integrator`]: an adapter that advances an [`OdeSystem`] over a
//!   [`TimeSpan`] and reports [`Samples`] at requested times
//! - [`Observer`]: receives solver events and optionally returns control actions

mod integrator;
mod observer;
mod samples;
mod span;
mod system;

pub use integrator::{IntegrateError, Integrator};
pub use observer::Observer;
pub use samples::{Failure, Samples, Stats, Status};
pub use span::{SpanError, TimeSpan, linspace};
pub use system::OdeSystem;
