//! Classic fixed-step fourth-order Runge–Kutta solver.
//!
//! Steps have the configured size, except that a step is shortened to land
//! exactly on the next requested sample time or on the end of the span. Every
//! sample is therefore a computed step point and never an interpolation.
//!
//! There is no error control. The step size alone determines accuracy, which
//! makes this solver predictable in cost and suited to targets where a fixed
//! evaluation budget matters more than a tolerance guarantee.

mod config;

pub use config::{Config, ConfigError};

use qcar_core::{
    Failure, IntegrateError, Integrator, Observer, OdeSystem, Samples, Stats, Status, TimeSpan,
};

use super::{Action, Event, all_finite, evaluate, sampler::Sampler};

/// The RK4 solver as an [`Integrator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rk4 {
    config: Config,
}

impl Rk4 {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl<const N: usize> Integrator<N> for Rk4 {
    fn integrate<S: OdeSystem<N>>(
        &self,
        system: &S,
        span: TimeSpan,
        initial: [f64; N],
        eval_times: &[f64],
    ) -> Result<Samples<N>, IntegrateError<S::Error>> {
        solve_unobserved(system, span, initial, eval_times, &self.config)
    }
}

/// Integrates an ODE system using classic RK4.
///
/// The observer receives an [`Event`] for the initial state and after every
/// step, and may return [`Action::StopEarly`] to end the integration.
///
/// # Failures
///
/// The returned [`Samples`] carry [`Status::Failed`] if any stage derivative
/// is not finite.
///
/// # Errors
///
/// Returns an error if `eval_times` is invalid or the system fails to
/// evaluate.
pub fn solve<S, Obs, const N: usize>(
    system: &S,
    span: TimeSpan,
    initial: [f64; N],
    eval_times: &[f64],
    config: &Config,
    mut observer: Obs,
) -> Result<Samples<N>, IntegrateError<S::Error>>
where
    S: OdeSystem<N>,
    Obs: Observer<Event<N>, Action>,
{
    let mut sampler = Sampler::new(span, eval_times)?;
    let mut stats = Stats::default();

    let end = span.end();
    let mut t = span.start();
    let mut y = initial;
    sampler.start(t, &y);

    let event = Event {
        step: 0,
        time: t,
        step_size: 0.0,
        state: y,
    };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        return Ok(sampler.finish(Status::StoppedByObserver, stats));
    }

    let mut step = 0;
    while t < end {
        // Land exactly on the next sample or the end of the span.
        let stop = sampler.peek().map_or(end, |target| target.min(end));
        let (h, t_new) = if t + config.step() >= stop {
            (stop - t, stop)
        } else {
            (config.step(), t + config.step())
        };

        let k1 = evaluate(system, t, &y, &mut stats)?;
        let k2 = evaluate(system, t + 0.5 * h, &offset(&y, 0.5 * h, &k1), &mut stats)?;
        let k3 = evaluate(system, t + 0.5 * h, &offset(&y, 0.5 * h, &k2), &mut stats)?;
        let k4 = evaluate(system, t_new, &offset(&y, h, &k3), &mut stats)?;

        if ![&k1, &k2, &k3, &k4].into_iter().all(all_finite) {
            let failure = Failure::NonFiniteDerivative { t };
            tracing::warn!(%failure, "rk4 integration failed");
            return Ok(sampler.finish(Status::Failed(failure), stats));
        }

        let y_new: [f64; N] =
            std::array::from_fn(|i| y[i] + h / 6.0 * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]));
        sampler.record_step(t_new, &y_new, |_| y_new);

        stats.accepted += 1;
        step += 1;
        t = t_new;
        y = y_new;

        let event = Event {
            step,
            time: t,
            step_size: h,
            state: y,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(sampler.finish(Status::StoppedByObserver, stats));
        }
    }

    tracing::debug!(
        steps = stats.accepted,
        evaluations = stats.evaluations,
        "rk4 integration complete"
    );

    Ok(sampler.finish(Status::Complete, stats))
}

/// Integrates an ODE system using RK4 without observation.
///
/// This is a convenience wrapper around [`solve`] that discards events.
///
/// # Errors
///
/// Returns an error if `eval_times` is invalid or the system fails to
/// evaluate.
pub fn solve_unobserved<S, const N: usize>(
    system: &S,
    span: TimeSpan,
    initial: [f64; N],
    eval_times: &[f64],
    config: &Config,
) -> Result<Samples<N>, IntegrateError<S::Error>>
where
    S: OdeSystem<N>,
{
    solve(system, span, initial, eval_times, config, ())
}

fn offset<const N: usize>(y: &[f64; N], h: f64, k: &[f64; N]) -> [f64; N] {
    std::array::from_fn(|i| y[i] + h * k[i])
}
