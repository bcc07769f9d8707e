use thiserror::Error;

use qcar_core::{IntegrateError, SpanError};

/// A state or parameter vector has the wrong number of components.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DimensionError {
    #[error("state must have exactly 4 components, got {actual}")]
    State { actual: usize },

    #[error("parameter vector must have at least 5 components, got {actual}")]
    Parameters { actual: usize },
}

/// A parameter value the equations of motion cannot use.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ParameterError {
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("{name} must be positive, got {value} kg")]
    NonPositiveMass { name: &'static str, value: f64 },

    #[error("{name} must be non-negative, got {value}")]
    Negative { name: &'static str, value: f64 },
}

/// Errors that can occur while simulating a trajectory.
///
/// Integration failures are not errors. They are reported through the
/// trajectory's status along with the samples computed before the failure.
#[derive(Debug, Error)]
pub enum SimulationError<E> {
    #[error(transparent)]
    InvalidDimension(#[from] DimensionError),

    #[error("degenerate parameter: {0}")]
    DegenerateParameter(#[from] ParameterError),

    #[error("invalid time span: {0}")]
    InvalidTimeSpan(#[from] SpanError),

    #[error("evaluation times must be finite and sorted in non-decreasing order")]
    InvalidEvalTimes,

    /// The road profile failed. The error is passed through as-is.
    #[error("road profile failed")]
    Road(#[source] E),
}

impl<E> From<IntegrateError<E>> for SimulationError<E> {
    fn from(err: IntegrateError<E>) -> Self {
        match err {
            IntegrateError::InvalidEvalTimes => Self::InvalidEvalTimes,
            IntegrateError::System(e) => Self::Road(e),
        }
    }
}
