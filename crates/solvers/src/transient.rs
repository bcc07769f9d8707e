//! Solvers for transient problems: integrating ODE systems through time.
//!
//! # Solvers
//!
//! - [`dopri5`]: adaptive Dormand–Prince 5(4) with dense output, for
//!   accurate sampling at arbitrary times
//! - [`rk4`]: classic fixed-step fourth-order Runge–Kutta
//!
//! Both solvers emit an [`Event`] to an [`Observer`] after the initial point
//! and after every accepted step, and stop when it returns
//! [`Action::StopEarly`].
//!
//! [`Observer`]: qcar_core::Observer

mod action;
mod event;
mod sampler;

pub use action::Action;
pub use event::Event;

pub mod dopri5;
pub mod rk4;

/// Returns `true` if every component is finite.
fn all_finite<const N: usize>(values: &[f64; N]) -> bool {
    values.iter().all(|v| v.is_finite())
}

/// Evaluates the derivative and counts the call.
fn evaluate<S, const N: usize>(
    system: &S,
    t: f64,
    state: &[f64; N],
    stats: &mut qcar_core::Stats,
) -> Result<[f64; N], qcar_core::IntegrateError<S::Error>>
where
    S: qcar_core::OdeSystem<N>,
{
    stats.evaluations += 1;
    system
        .derivative(t, state)
        .map_err(qcar_core::IntegrateError::System)
}
