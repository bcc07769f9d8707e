use thiserror::Error;

/// Configuration for the fixed-step RK4 solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    step: f64,
}

/// Errors that can occur when validating an RK4 solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("step must be finite and positive")]
    Step,
}

impl Config {
    /// Creates a new config with the given nominal step size.
    ///
    /// # Errors
    ///
    /// Returns an error if `step` is non-positive or non-finite.
    pub fn new(step: f64) -> Result<Self, ConfigError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(ConfigError::Step);
        }
        Ok(Self { step })
    }

    /// Returns the nominal step size.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }
}
