//! Serializable run descriptions.
//!
//! A [`Scenario`] captures everything about a simulation except the road
//! profile, so runs can be kept in configuration files:
//!
//! ```toml
//! speed = 20.0
//! tf = 2.0
//! sampling = { count = 201 }
//!
//! [parameters]
//! sprung_mass = 250.0
//! unsprung_mass = 35.0
//! suspension_stiffness = 16000.0
//! tire_stiffness = 160000.0
//! suspension_damping = 1000.0
//! ```

use serde::{Deserialize, Serialize};

use qcar_core::{TimeSpan, linspace};
use qcar_solvers::transient::dopri5::{self, Dopri5};

use crate::{
    error::SimulationError,
    model::QuarterCar,
    params::Parameters,
    road::RoadProfile,
    state::State,
    trajectory::{ABS_TOL, REL_TOL, Trajectory, TrajectorySolver},
};

/// One quarter-car simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub parameters: Parameters,

    /// Vehicle speed, m/s.
    pub speed: f64,

    /// Initial state `[q1, q2, u1, u2]`, at rest by default.
    #[serde(default)]
    pub initial_state: State,

    /// Start time, s.
    #[serde(default)]
    pub t0: f64,

    /// End time, s.
    pub tf: f64,

    pub sampling: Sampling,

    #[serde(default)]
    pub tolerances: Tolerances,
}

/// Where a scenario samples its trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sampling {
    /// Evenly spaced samples from `t0` to `tf`, inclusive.
    Count(usize),

    /// Explicit sample times.
    Times(Vec<f64>),
}

/// Error tolerances for the adaptive solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tolerances {
    pub abs_tol: f64,
    pub rel_tol: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs_tol: ABS_TOL,
            rel_tol: REL_TOL,
        }
    }
}

/// Errors that can occur when running a [`Scenario`].
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError<E> {
    #[error("invalid tolerances: {0}")]
    Tolerances(#[from] dopri5::ConfigError),

    #[error(transparent)]
    Simulation(#[from] SimulationError<E>),
}

impl Scenario {
    /// Returns the sample times this scenario requests.
    #[must_use]
    pub fn eval_times(&self) -> Vec<f64> {
        match &self.sampling {
            Sampling::Count(count) => linspace(self.t0, self.tf, *count),
            Sampling::Times(times) => times.clone(),
        }
    }

    /// Runs the scenario over `road`.
    ///
    /// # Errors
    ///
    /// Returns a [`ScenarioError`] if the tolerances, parameters, span, or
    /// sample times are invalid, or if the road profile fails.
    pub fn run<R: RoadProfile>(&self, road: R) -> Result<Trajectory, ScenarioError<R::Error>> {
        let config = dopri5::Config::new(self.tolerances.abs_tol, self.tolerances.rel_tol)?;
        let span = TimeSpan::new(self.t0, self.tf).map_err(SimulationError::from)?;
        let model =
            QuarterCar::new(self.parameters, self.speed, road).map_err(SimulationError::from)?;

        let solver = TrajectorySolver::new(Dopri5::new(config));
        let trajectory = solver.solve(&model, self.initial_state, span, &self.eval_times())?;
        Ok(trajectory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEDAN: &str = r"
        speed = 20.0
        tf = 2.0
        sampling = { count = 5 }

        [parameters]
        sprung_mass = 250.0
        unsprung_mass = 35.0
        suspension_stiffness = 16000.0
        tire_stiffness = 160000.0
        suspension_damping = 1000.0
    ";

    #[test]
    fn defaults_fill_in_optional_fields() {
        let scenario: Scenario = toml::from_str(SEDAN).unwrap();

        assert_eq!(scenario.initial_state, [0.0; 4]);
        assert_eq!(scenario.t0, 0.0);
        assert_eq!(scenario.tolerances, Tolerances::default());
        assert_eq!(scenario.eval_times(), vec![0.0, 0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn explicit_times_and_tolerances() {
        let scenario: Scenario = toml::from_str(
            r"
            speed = 10.0
            initial_state = [0.01, 0.0, 0.0, 0.0]
            t0 = 1.0
            tf = 3.0
            sampling = { times = [1.0, 2.5] }
            tolerances = { abs_tol = 1e-8, rel_tol = 1e-8 }

            [parameters]
            sprung_mass = 250.0
            unsprung_mass = 35.0
            suspension_stiffness = 16000.0
            tire_stiffness = 160000.0
            suspension_damping = 1000.0
            ",
        )
        .unwrap();

        assert_eq!(scenario.eval_times(), vec![1.0, 2.5]);

        let trajectory = scenario.run(|_t: f64, _v: f64| 0.0).unwrap();
        assert!(trajectory.is_success());
        assert_eq!(trajectory.times, vec![1.0, 2.5]);
        assert_eq!(trajectory.states[0], [0.01, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn runs_at_rest() {
        let scenario: Scenario = toml::from_str(SEDAN).unwrap();
        let trajectory = scenario.run(|_t: f64, _v: f64| 0.0).unwrap();

        assert_eq!(trajectory.len(), 5);
        assert!(trajectory.states.iter().all(|x| *x == [0.0; 4]));
    }

    #[test]
    fn bad_tolerances_are_reported() {
        let mut scenario: Scenario = toml::from_str(SEDAN).unwrap();
        scenario.tolerances.rel_tol = 0.0;

        let result = scenario.run(|_t: f64, _v: f64| 0.0);
        assert!(matches!(
            result,
            Err(ScenarioError::Tolerances(dopri5::ConfigError::RelTol))
        ));
    }

    #[test]
    fn degenerate_parameters_are_reported() {
        let mut scenario: Scenario = toml::from_str(SEDAN).unwrap();
        scenario.parameters.sprung_mass = 0.0;

        let result = scenario.run(|_t: f64, _v: f64| 0.0);
        assert!(matches!(
            result,
            Err(ScenarioError::Simulation(
                SimulationError::DegenerateParameter(_)
            ))
        ));
    }
}
