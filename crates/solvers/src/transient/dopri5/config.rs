use thiserror::Error;

/// Configuration for the Dormand–Prince solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    abs_tol: f64,
    rel_tol: f64,
    max_steps: usize,
    initial_step: Option<f64>,
    max_step: Option<f64>,
}

/// Errors that can occur when validating a Dormand–Prince solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("abs_tol must be finite and positive")]
    AbsTol,

    #[error("rel_tol must be finite and positive")]
    RelTol,

    #[error("max_steps must be at least 1")]
    MaxSteps,

    #[error("initial_step must be finite and positive")]
    InitialStep,

    #[error("max_step must be positive")]
    MaxStep,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(1e-6, 1e-3).unwrap()
    }
}

impl Config {
    /// Creates a new config with validated tolerances.
    ///
    /// The step budget defaults to 100,000 steps and the initial step size is
    /// chosen automatically from the system's derivative at the start.
    ///
    /// # Errors
    ///
    /// Returns an error if either tolerance is non-positive or non-finite.
    pub fn new(abs_tol: f64, rel_tol: f64) -> Result<Self, ConfigError> {
        if !abs_tol.is_finite() || abs_tol <= 0.0 {
            return Err(ConfigError::AbsTol);
        }
        if !rel_tol.is_finite() || rel_tol <= 0.0 {
            return Err(ConfigError::RelTol);
        }

        Ok(Self {
            abs_tol,
            rel_tol,
            max_steps: 100_000,
            initial_step: None,
            max_step: None,
        })
    }

    /// Limits the number of attempted steps, accepted or rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_steps` is zero.
    pub fn with_max_steps(self, max_steps: usize) -> Result<Self, ConfigError> {
        if max_steps == 0 {
            return Err(ConfigError::MaxSteps);
        }
        Ok(Self { max_steps, ..self })
    }

    /// Fixes the size of the first trial step.
    ///
    /// # Errors
    ///
    /// Returns an error if `initial_step` is non-positive or non-finite.
    pub fn with_initial_step(self, initial_step: f64) -> Result<Self, ConfigError> {
        if !initial_step.is_finite() || initial_step <= 0.0 {
            return Err(ConfigError::InitialStep);
        }
        Ok(Self {
            initial_step: Some(initial_step),
            ..self
        })
    }

    /// Caps the step size.
    ///
    /// Every step, including the final one that lands on the end of the span,
    /// is at most `max_step`.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_step` is not positive. An infinite cap is
    /// allowed and means no cap.
    pub fn with_max_step(self, max_step: f64) -> Result<Self, ConfigError> {
        if max_step.is_nan() || max_step <= 0.0 {
            return Err(ConfigError::MaxStep);
        }
        Ok(Self {
            max_step: Some(max_step),
            ..self
        })
    }

    /// Returns the absolute error tolerance.
    #[must_use]
    pub fn abs_tol(&self) -> f64 {
        self.abs_tol
    }

    /// Returns the relative error tolerance.
    #[must_use]
    pub fn rel_tol(&self) -> f64 {
        self.rel_tol
    }

    /// Returns the maximum number of attempted steps.
    #[must_use]
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Returns the fixed initial step, if one was set.
    #[must_use]
    pub fn initial_step(&self) -> Option<f64> {
        self.initial_step
    }

    /// Returns the step size cap, if one was set.
    #[must_use]
    pub fn max_step(&self) -> Option<f64> {
        self.max_step
    }

    /// Error weight for one component, given its old and new values.
    pub(super) fn scale(&self, old: f64, new: f64) -> f64 {
        self.abs_tol + self.rel_tol * old.abs().max(new.abs())
    }
}
