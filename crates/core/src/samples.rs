use std::fmt;

/// Indicates how an integration terminated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Status {
    /// Integrated across the whole span.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,

    /// Gave up before reaching the end of the span.
    ///
    /// Samples recorded before the failure point are still returned.
    Failed(Failure),
}

impl Status {
    /// Returns `true` if the integration reached the end of the span.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// The reason an integration could not reach the end of its span.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum Failure {
    /// The adaptive step size shrank below what `t` can resolve.
    #[error("required step size {h:e} is too small at t = {t}")]
    StepSizeUnderflow { t: f64, h: f64 },

    /// The step budget ran out.
    #[error("exceeded {max_steps} steps at t = {t}")]
    MaxStepsExceeded { t: f64, max_steps: usize },

    /// The system produced a NaN or infinite derivative.
    #[error("non-finite derivative at t = {t}")]
    NonFiniteDerivative { t: f64 },
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete => f.write_str("integration complete"),
            Self::StoppedByObserver => f.write_str("stopped by observer"),
            Self::Failed(failure) => write!(f, "integration failed: {failure}"),
        }
    }
}

/// Work counters reported by an integrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Number of derivative evaluations.
    pub evaluations: usize,

    /// Number of accepted steps.
    pub accepted: usize,

    /// Number of rejected steps.
    pub rejected: usize,
}

/// States sampled by an integrator at requested times.
///
/// `times[i]` and `states[i]` describe the same instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Samples<const N: usize> {
    /// How the integration terminated.
    pub status: Status,

    /// Times at which the state was sampled.
    pub times: Vec<f64>,

    /// Sampled states, one per entry in `times`.
    pub states: Vec<[f64; N]>,

    /// Work performed by the integrator.
    pub stats: Stats,
}

impl<const N: usize> Samples<N> {
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

    /// Iterates over `(time, state)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &[f64; N])> + '_ {
        self.times.iter().copied().zip(self.states.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_messages() {
        assert_eq!(Status::Complete.to_string(), "integration complete");
        assert_eq!(
            Status::Failed(Failure::NonFiniteDerivative { t: 0.5 }).to_string(),
            "integration failed: non-finite derivative at t = 0.5"
        );
        assert!(!Status::StoppedByObserver.is_complete());
    }

    #[test]
    fn iterates_aligned_pairs() {
        let samples = Samples {
            status: Status::Complete,
            times: vec![0.0, 1.0],
            states: vec![[1.0], [2.0]],
            stats: Stats::default(),
        };

        let pairs: Vec<_> = samples.iter().map(|(t, y)| (t, y[0])).collect();
        assert_eq!(pairs, vec![(0.0, 1.0), (1.0, 2.0)]);
        assert_eq!(samples.len(), 2);
    }
}
