use qcar_core::{IntegrateError, Samples, Stats, Status, TimeSpan};

/// Collects the states a solver reports at requested times.
///
/// Requested times outside the span are discarded up front. With no
/// requested times, every accepted step is recorded instead.
pub(crate) struct Sampler<'a, const N: usize> {
    targets: &'a [f64],
    next: usize,
    every_step: bool,
    times: Vec<f64>,
    states: Vec<[f64; N]>,
}

impl<'a, const N: usize> Sampler<'a, N> {
    /// Creates a sampler for `eval_times` within `span`.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrateError::InvalidEvalTimes`] if any time is non-finite
    /// or the times are not sorted.
    pub(crate) fn new<E>(span: TimeSpan, eval_times: &'a [f64]) -> Result<Self, IntegrateError<E>> {
        if eval_times.iter().any(|t| !t.is_finite())
            || eval_times.windows(2).any(|pair| pair[1] < pair[0])
        {
            return Err(IntegrateError::InvalidEvalTimes);
        }

        // Sorted, so the in-span times form one contiguous run.
        let first = eval_times.partition_point(|&t| t < span.start());
        let last = eval_times.partition_point(|&t| t <= span.end());
        let targets = &eval_times[first..last];

        Ok(Self {
            targets,
            next: 0,
            every_step: eval_times.is_empty(),
            times: Vec::with_capacity(targets.len()),
            states: Vec::with_capacity(targets.len()),
        })
    }

    /// Records the initial state for every target at `t`.
    pub(crate) fn start(&mut self, t: f64, state: &[f64; N]) {
        if self.every_step {
            self.push(t, *state);
            return;
        }
        while self.peek().is_some_and(|target| target <= t) {
            self.push(t, *state);
            self.next += 1;
        }
    }

    /// Returns the next time still waiting to be sampled.
    pub(crate) fn peek(&self) -> Option<f64> {
        self.targets.get(self.next).copied()
    }

    /// Records every target covered by a step ending at `t_end`.
    ///
    /// Targets landing exactly on `t_end` receive `state` unchanged, while
    /// interior targets are filled in by `interpolate`.
    pub(crate) fn record_step<F>(&mut self, t_end: f64, state: &[f64; N], interpolate: F)
    where
        F: Fn(f64) -> [f64; N],
    {
        if self.every_step {
            self.push(t_end, *state);
            return;
        }
        while let Some(target) = self.peek() {
            if target > t_end {
                break;
            }
            let value = if target == t_end {
                *state
            } else {
                interpolate(target)
            };
            self.push(target, value);
            self.next += 1;
        }
    }

    /// Consumes the sampler and produces the final [`Samples`].
    pub(crate) fn finish(self, status: Status, stats: Stats) -> Samples<N> {
        Samples {
            status,
            times: self.times,
            states: self.states,
            stats,
        }
    }

    fn push(&mut self, t: f64, state: [f64; N]) {
        self.times.push(t);
        self.states.push(state);
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;

    fn sampler(eval_times: &[f64]) -> Sampler<'_, 1> {
        let span = TimeSpan::new(0.0, 1.0).unwrap();
        Sampler::new::<Infallible>(span, eval_times).unwrap()
    }

    #[test]
    fn drops_times_outside_span() {
        let times = [-1.0, 0.0, 0.5, 1.0, 2.0];
        let s = sampler(&times);
        assert_eq!(s.targets, &[0.0, 0.5, 1.0]);
    }

    #[test]
    fn rejects_unsorted_or_non_finite_times() {
        let span = TimeSpan::new(0.0, 1.0).unwrap();
        assert!(matches!(
            Sampler::<1>::new::<Infallible>(span, &[0.5, 0.2]),
            Err(IntegrateError::InvalidEvalTimes)
        ));
        assert!(matches!(
            Sampler::<1>::new::<Infallible>(span, &[0.5, f64::NAN]),
            Err(IntegrateError::InvalidEvalTimes)
        ));
    }

    #[test]
    fn exact_hits_skip_interpolation() {
        let times = [0.0, 0.25, 0.5];
        let mut s = sampler(&times);
        s.start(0.0, &[1.0]);
        s.record_step(0.5, &[3.0], |t| [10.0 * t]);

        let samples = s.finish(Status::Complete, Stats::default());
        assert_eq!(samples.times, vec![0.0, 0.25, 0.5]);
        assert_eq!(samples.states, vec![[1.0], [2.5], [3.0]]);
    }

    #[test]
    fn empty_request_records_every_step() {
        let mut s = sampler(&[]);
        s.start(0.0, &[0.0]);
        s.record_step(0.4, &[1.0], |_| unreachable!());
        s.record_step(1.0, &[2.0], |_| unreachable!());

        let samples = s.finish(Status::Complete, Stats::default());
        assert_eq!(samples.times, vec![0.0, 0.4, 1.0]);
    }
}
