//! Sampled quarter-car trajectories.
//!
//! [`TrajectorySolver`] integrates a [`QuarterCar`] with any [`Integrator`]
//! and pairs every sampled state with its derivative. The derivatives are
//! recomputed from the returned states instead of being taken from the
//! integrator's internal stages, so each one is exactly what
//! [`eval_rhs`](crate::model::eval_rhs) gives for that `(t, x)`.

use qcar_core::{Integrator, OdeSystem, Stats, Status, TimeSpan};
use qcar_solvers::transient::dopri5::{Config, Dopri5};

use crate::{
    error::SimulationError,
    model::QuarterCar,
    params::Parameters,
    road::RoadProfile,
    state::{State, state_from_slice},
};

/// Absolute tolerance of the default solver.
pub const ABS_TOL: f64 = 1e-6;

/// Relative tolerance of the default solver.
pub const REL_TOL: f64 = 1e-6;

/// States and state derivatives sampled over a simulation.
///
/// `times[i]`, `states[i]`, and `derivatives[i]` all describe the same instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    /// How the integration terminated.
    pub status: Status,

    /// Sample times, s.
    pub times: Vec<f64>,

    /// Sampled states `[q1, q2, u1, u2]`.
    pub states: Vec<State>,

    /// State derivatives `[q1', q2', u1', u2']` at each sample.
    pub derivatives: Vec<State>,

    /// Work performed by the integrator.
    pub stats: Stats,
}

impl Trajectory {
    /// Returns `true` if the integration reached the end of the span.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_complete()
    }

    /// Returns a human-readable description of how the integration ended.
    #[must_use]
    pub fn message(&self) -> String {
        self.status.to_string()
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns `true` if no samples were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// Integrates quarter-car models and reports aligned state derivatives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySolver<I = Dopri5> {
    integrator: I,
}

impl Default for TrajectorySolver<Dopri5> {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        let config = Config::new(ABS_TOL, REL_TOL).unwrap();
        Self::new(Dopri5::new(config))
    }
}

impl<I: Integrator<4>> TrajectorySolver<I> {
    #[must_use]
    pub fn new(integrator: I) -> Self {
        Self { integrator }
    }

    #[must_use]
    pub fn integrator(&self) -> &I {
        &self.integrator
    }

    /// Integrates `model` from `initial` over `span`, sampling at `eval_times`.
    ///
    /// Sample times outside the span are dropped. If the integrator fails
    /// partway, the returned trajectory holds the samples computed before the
    /// failure and a [`Status::Failed`] status.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidEvalTimes`] if `eval_times` is not
    /// sorted or contains non-finite values, and [`SimulationError::Road`] if
    /// the road profile fails.
    pub fn solve<R: RoadProfile>(
        &self,
        model: &QuarterCar<R>,
        initial: State,
        span: TimeSpan,
        eval_times: &[f64],
    ) -> Result<Trajectory, SimulationError<R::Error>> {
        let samples = self
            .integrator
            .integrate(model, span, initial, eval_times)?;

        let derivatives = samples
            .iter()
            .map(|(t, x)| model.derivative(t, x))
            .collect::<Result<Vec<_>, _>>()
            .map_err(SimulationError::Road)?;

        tracing::debug!(
            samples = samples.len(),
            status = %samples.status,
            evaluations = samples.stats.evaluations,
            "solved quarter-car trajectory"
        );

        Ok(Trajectory {
            status: samples.status,
            times: samples.times,
            states: samples.states,
            derivatives,
            stats: samples.stats,
        })
    }
}

/// Simulates a quarter car with the default solver.
///
/// This is the positional entry point: `initial` must have exactly four
/// components, the parameters are validated, and the span runs from `t0` to
/// `tf`.
///
/// # Errors
///
/// Returns a [`SimulationError`] if `initial` has the wrong length, the
/// parameters or span are invalid, the evaluation times are not sorted, or the
/// road profile fails.
pub fn simulate<R: RoadProfile>(
    initial: &[f64],
    params: &Parameters,
    t0: f64,
    tf: f64,
    eval_times: &[f64],
    speed: f64,
    road: R,
) -> Result<Trajectory, SimulationError<R::Error>> {
    let initial = state_from_slice(initial)?;
    let span = TimeSpan::new(t0, tf)?;
    let model = QuarterCar::new(*params, speed, road)?;
    TrajectorySolver::default().solve(&model, initial, span, eval_times)
}

#[cfg(test)]
mod tests {
    use super::*;

    use qcar_core::Failure;
    use qcar_solvers::transient::rk4::{self, Rk4};

    use crate::error::DimensionError;

    fn sedan() -> Parameters {
        Parameters {
            sprung_mass: 250.0,
            unsprung_mass: 35.0,
            suspension_stiffness: 16_000.0,
            tire_stiffness: 160_000.0,
            suspension_damping: 1000.0,
        }
    }

    fn flat(_t: f64, _speed: f64) -> f64 {
        0.0
    }

    #[test]
    fn default_solver_uses_tight_tolerances() {
        let solver = TrajectorySolver::default();
        assert_eq!(solver.integrator().config().abs_tol(), 1e-6);
        assert_eq!(solver.integrator().config().rel_tol(), 1e-6);
    }

    #[test]
    fn rows_are_aligned() {
        let trajectory = simulate(
            &[0.01, 0.0, 0.0, 0.0],
            &sedan(),
            0.0,
            1.0,
            &[0.0, 0.25, 0.5, 0.75, 1.0],
            10.0,
            flat,
        )
        .unwrap();

        assert!(trajectory.is_success());
        assert_eq!(trajectory.len(), 5);
        assert_eq!(trajectory.states.len(), 5);
        assert_eq!(trajectory.derivatives.len(), 5);
    }

    #[test]
    fn wrong_state_length_is_rejected() {
        let result = simulate(&[0.0; 3], &sedan(), 0.0, 1.0, &[], 10.0, flat);
        assert!(matches!(
            result,
            Err(SimulationError::InvalidDimension(DimensionError::State {
                actual: 3
            }))
        ));
    }

    #[test]
    fn empty_span_is_rejected() {
        let result = simulate(&[0.0; 4], &sedan(), 1.0, 1.0, &[], 10.0, flat);
        assert!(matches!(result, Err(SimulationError::InvalidTimeSpan(_))));
    }

    #[test]
    fn lenient_model_reports_failed_integration() {
        let params = Parameters {
            unsprung_mass: 0.0,
            ..sedan()
        };
        let model = QuarterCar::unchecked(params, 10.0, flat);
        let span = TimeSpan::new(0.0, 1.0).unwrap();

        let trajectory = TrajectorySolver::default()
            .solve(&model, [0.0; 4], span, &[0.0, 0.5, 1.0])
            .unwrap();

        assert!(!trajectory.is_success());
        assert_eq!(
            trajectory.status,
            Status::Failed(Failure::NonFiniteDerivative { t: 0.0 })
        );
        assert_eq!(trajectory.times, vec![0.0]);
        assert!(trajectory.message().contains("non-finite derivative"));
    }

    #[test]
    fn integrator_can_be_swapped() {
        let model = QuarterCar::new(sedan(), 10.0, |_t: f64, _v: f64| 0.02).unwrap();
        let span = TimeSpan::new(0.0, 1.0).unwrap();
        let times = [0.1, 0.5, 1.0];

        let adaptive = TrajectorySolver::default()
            .solve(&model, [0.0; 4], span, &times)
            .unwrap();
        let fixed = TrajectorySolver::new(Rk4::new(rk4::Config::new(1e-4).unwrap()))
            .solve(&model, [0.0; 4], span, &times)
            .unwrap();

        assert_eq!(adaptive.times, fixed.times);
        for (a, b) in adaptive.states.iter().zip(&fixed.states) {
            for (x, y) in a.iter().zip(b) {
                assert!((x - y).abs() < 1e-4, "{x} vs {y}");
            }
        }
    }
}
