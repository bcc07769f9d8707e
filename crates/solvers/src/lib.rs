//! Numerical integrators for qcar.
//!
//! Each integrator advances a [`qcar_core::OdeSystem`] across a time span and
//! samples the state at caller-requested times. Integrators are available as
//! observable free functions and as [`qcar_core::Integrator`] adapters.
//!
//! # Modules
//!
//! - [`transient`]: explicit Runge–Kutta integrators for initial value problems

pub mod transient;
