//! Adaptive Dormand–Prince 5(4) solver with dense output.
//!
//! Each step evaluates seven stages, advances with the 5th-order solution, and
//! uses the embedded 4th-order solution to estimate the local error. Steps
//! whose scaled RMS error exceeds one are rejected and retried with a smaller
//! step. Requested sample times that fall inside an accepted step are filled
//! in with the method's continuous extension, so sampling does not constrain
//! the step size.
//!
//! # Example
//!
//! ```ignore
//! use qcar_solvers::transient::dopri5::{self, Config};
//!
//! let config = Config::new(1e-6, 1e-6)?;
//! let samples = dopri5::solve_unobserved(&system, span, y0, &times, &config)?;
//!
//! for (t, y) in samples.iter() {
//!     println!("t={t}: {y:?}");
//! }
//! ```

mod config;
mod dense;
mod tableau;


pub use config::{Config, ConfigError};

use qcar_core::{
    Failure, IntegrateError, Integrator, Observer, OdeSystem, Samples, Stats, Status, TimeSpan,
};

use super::{Action, Event, all_finite, evaluate, sampler::Sampler};
use dense::Dense;
use tableau::{
    A21, A31, A32, A41, A42, A43, A51, A52, A53, A54, A61, A62, A63, A64, A65, B1, B3, B4, B5, B6,
    C2, C3, C4, C5, E1, E3, E4, E5, E6, E7, combine,
};

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 10.0;

/// The Dormand–Prince solver as an [`Integrator`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Dopri5 {
    config: Config,
}

impl Dopri5 {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl<const N: usize> Integrator<N> for Dopri5 {
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

/// Integrates an ODE system using adaptive Dormand–Prince 5(4).
///
/// # Algorithm
///
/// 1. Evaluate the derivative at the initial state and choose a first step.
/// 2. For each attempted step:
///    - Evaluate the remaining six stages and the 5th-order solution.
///    - Estimate the error against the embedded 4th-order solution.
///    - If the error is within tolerance, accept the step, sample any
///      requested times it covers, and emit an `Event` to the observer.
///    - Scale the step size by `0.9 · err^(-1/5)`, bounded to `[0.2, 10]` and
///      never growing right after a rejection.
/// 3. Stop once the end of the span is reached, the observer returns
///    `StopEarly`, or the solver fails.
///
/// The final step is clipped, or stretched by at most 1% without exceeding
/// the configured step cap, so that the last accepted time is exactly the
/// end of the span.
///
/// # Failures
///
/// The returned [`Samples`] carry [`Status::Failed`] when the derivative at
/// the initial point is not finite, when the step size underflows, or when the
/// step budget is exhausted. Non-finite stages later on are treated as a
/// rejected step.
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

    let mut k1 = evaluate(system, t, &y, &mut stats)?;
    if !all_finite(&k1) {
        return Ok(fail(sampler, stats, Failure::NonFiniteDerivative { t }));
    }

    let event = Event {
        step: 0,
        time: t,
        step_size: 0.0,
        state: y,
    };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        return Ok(sampler.finish(Status::StoppedByObserver, stats));
    }

    let max_step = config.max_step().map_or(span.duration(), |cap| cap.min(span.duration()));
    let mut h = match config.initial_step() {
        Some(h) => h,
        None => initial_step(system, t, &y, &k1, config, &mut stats)?,
    }
    .min(max_step);

    let mut step = 0;
    let mut previous_rejected = false;

    loop {
        if stats.accepted + stats.rejected >= config.max_steps() {
            let failure = Failure::MaxStepsExceeded {
                t,
                max_steps: config.max_steps(),
            };
            return Ok(fail(sampler, stats, failure));
        }

        // Positive even at t = 0, so a step can never shrink to zero length.
        let min_step = (16.0 * f64::EPSILON * t.abs()).max(f64::MIN_POSITIVE);
        if h <= min_step {
            return Ok(fail(sampler, stats, Failure::StepSizeUnderflow { t, h }));
        }

        // Stretch or clip the last step so it lands exactly on the end of the
        // span, avoiding a sliver step that could underflow. Stretching never
        // exceeds the step cap.
        let (h_step, t_new) = if t + 1.01 * h >= end && end - t <= max_step {
            (end - t, end)
        } else {
            (h, t + h)
        };

        let k2 = evaluate(system, t + C2 * h_step, &combine(&y, h_step, &[(A21, &k1)]), &mut stats)?;
        let k3 = evaluate(
            system,
            t + C3 * h_step,
            &combine(&y, h_step, &[(A31, &k1), (A32, &k2)]),
            &mut stats,
        )?;
        let k4 = evaluate(
            system,
            t + C4 * h_step,
            &combine(&y, h_step, &[(A41, &k1), (A42, &k2), (A43, &k3)]),
            &mut stats,
        )?;
        let k5 = evaluate(
            system,
            t + C5 * h_step,
            &combine(&y, h_step, &[(A51, &k1), (A52, &k2), (A53, &k3), (A54, &k4)]),
            &mut stats,
        )?;
        let k6 = evaluate(
            system,
            t_new,
            &combine(
                &y,
                h_step,
                &[(A61, &k1), (A62, &k2), (A63, &k3), (A64, &k4), (A65, &k5)],
            ),
            &mut stats,
        )?;
        let y_new = combine(
            &y,
            h_step,
            &[(B1, &k1), (B3, &k3), (B4, &k4), (B5, &k5), (B6, &k6)],
        );
        let k7 = evaluate(system, t_new, &y_new, &mut stats)?;

        let err = error_norm(&y, &y_new, h_step, [&k1, &k3, &k4, &k5, &k6, &k7], config);

        if !err.is_finite() || err > 1.0 {
            stats.rejected += 1;
            previous_rejected = true;
            let factor = if err.is_finite() {
                (SAFETY * err.powf(-0.2)).max(MIN_FACTOR)
            } else {
                MIN_FACTOR
            };
            tracing::trace!(t, h = h_step, err, "rejected step");
            h = h_step * factor;
            continue;
        }

        let dense = Dense::new(t, h_step, &y, &y_new, [&k1, &k2, &k3, &k4, &k5, &k6, &k7]);
        sampler.record_step(t_new, &y_new, |s| dense.at(s));

        stats.accepted += 1;
        step += 1;
        t = t_new;
        y = y_new;
        k1 = k7;

        let event = Event {
            step,
            time: t,
            step_size: h_step,
            state: y,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(sampler.finish(Status::StoppedByObserver, stats));
        }

        if t >= end {
            break;
        }

        let mut factor = if err == 0.0 {
            MAX_FACTOR
        } else {
            (SAFETY * err.powf(-0.2)).clamp(MIN_FACTOR, MAX_FACTOR)
        };
        if previous_rejected {
            factor = factor.min(1.0);
        }
        previous_rejected = false;
        h = (h_step * factor).min(max_step);
    }

    tracing::debug!(
        accepted = stats.accepted,
        rejected = stats.rejected,
        evaluations = stats.evaluations,
        "dopri5 integration complete"
    );

    Ok(sampler.finish(Status::Complete, stats))
}

/// Integrates an ODE system using Dormand–Prince without observation.
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

fn fail<const N: usize>(sampler: Sampler<'_, N>, stats: Stats, failure: Failure) -> Samples<N> {
    tracing::warn!(%failure, "dopri5 integration failed");
    sampler.finish(Status::Failed(failure), stats)
}

/// Scaled RMS norm of the embedded error estimate.
fn error_norm<const N: usize>(
    y: &[f64; N],
    y_new: &[f64; N],
    h: f64,
    k: [&[f64; N]; 6],
    config: &Config,
) -> f64 {
    if N == 0 {
        return 0.0;
    }
    let [k1, k3, k4, k5, k6, k7] = k;
    let sum: f64 = (0..N)
        .map(|i| {
            let e = h
                * (E1 * k1[i] + E3 * k3[i] + E4 * k4[i] + E5 * k5[i] + E6 * k6[i] + E7 * k7[i]);
            let ratio = e / config.scale(y[i], y_new[i]);
            ratio * ratio
        })
        .sum();
    #[allow(clippy::cast_precision_loss)]
    let n = N as f64;
    (sum / n).sqrt()
}

/// Scaled RMS norm of a single vector.
fn rms<const N: usize>(values: &[f64; N], scale: &[f64; N]) -> f64 {
    if N == 0 {
        return 0.0;
    }
    let sum: f64 = values
        .iter()
        .zip(scale)
        .map(|(v, s)| (v / s) * (v / s))
        .sum();
    #[allow(clippy::cast_precision_loss)]
    let n = N as f64;
    (sum / n).sqrt()
}

/// Chooses a first step from the size of the state and its derivatives.
///
/// Follows the starting step heuristic of Hairer, Nørsett & Wanner, which
/// probes the derivative once with an explicit Euler step.
fn initial_step<S, const N: usize>(
    system: &S,
    t: f64,
    y: &[f64; N],
    f0: &[f64; N],
    config: &Config,
    stats: &mut Stats,
) -> Result<f64, IntegrateError<S::Error>>
where
    S: OdeSystem<N>,
{
    let scale: [f64; N] = std::array::from_fn(|i| config.scale(y[i], y[i]));
    let d0 = rms(y, &scale);
    let d1 = rms(f0, &scale);

    let h0 = if d0 < 1e-5 || d1 < 1e-5 {
        1e-6
    } else {
        0.01 * d0 / d1
    };

    let y1 = combine(y, h0, &[(1.0, f0)]);
    let f1 = evaluate(system, t + h0, &y1, stats)?;
    let diff: [f64; N] = std::array::from_fn(|i| f1[i] - f0[i]);
    let d2 = rms(&diff, &scale) / h0;

    let h1 = if d1.max(d2) <= 1e-15 {
        (h0 * 1e-3).max(1e-6)
    } else {
        (0.01 / d1.max(d2)).powf(0.2)
    };

    Ok((100.0 * h0).min(h1))
}
