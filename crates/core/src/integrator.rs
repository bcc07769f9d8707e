use thiserror::Error;

use crate::{OdeSystem, Samples, TimeSpan};

/// An adapter that integrates an [`OdeSystem`] across a [`TimeSpan`].
///
/// Integrators report the state at each requested evaluation time. Times
/// outside the span are dropped. When `eval_times` is empty, the integrator
/// reports the state at the start of the span and after every step it takes.
///
/// A run that cannot reach the end of the span is not an error: it returns
/// [`Samples`] with a [`Status::Failed`](crate::Status::Failed) status and
/// whatever samples were recorded before the failure.
pub trait Integrator<const N: usize> {
    /// Integrates `system` from `initial` over `span`.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrateError::InvalidEvalTimes`] if `eval_times` contains a
    /// non-finite value or is not sorted in non-decreasing order, and
    /// [`IntegrateError::System`] if the system fails to evaluate.
    fn integrate<S: OdeSystem<N>>(
        &self,
        system: &S,
        span: TimeSpan,
        initial: [f64; N],
        eval_times: &[f64],
    ) -> Result<Samples<N>, IntegrateError<S::Error>>;
}

/// Errors that can occur during integration.
#[derive(Debug, Error)]
pub enum IntegrateError<E> {
    #[error("evaluation times must be finite and sorted in non-decreasing order")]
    InvalidEvalTimes,

    #[error("system evaluation failed")]
    System(#[source] E),
}
