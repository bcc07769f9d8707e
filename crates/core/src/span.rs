use thiserror::Error;

/// A finite, non-empty integration interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSpan {
    start: f64,
    end: f64,
}

/// Errors that can occur when creating a [`TimeSpan`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum SpanError {
    #[error("time span bounds must be finite, got [{start}, {end}]")]
    NonFinite { start: f64, end: f64 },

    #[error("time span must satisfy start < end, got [{start}, {end}]")]
    Empty { start: f64, end: f64 },
}

impl TimeSpan {
    /// Creates a new span from `start` to `end`.
    ///
    /// # Errors
    ///
    /// Returns a [`SpanError`] if either bound is non-finite or if
    /// `start >= end`.
    pub fn new(start: f64, end: f64) -> Result<Self, SpanError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(SpanError::NonFinite { start, end });
        }
        if start >= end {
            return Err(SpanError::Empty { start, end });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Returns the length of the span.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Returns `true` if `t` lies within the closed interval.
    #[must_use]
    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && t <= self.end
    }
}

/// Returns `count` evenly spaced values from `start` to `end`, inclusive.
///
/// The first and last values are exactly `start` and `end`. A `count` of one
/// yields `[start]` and a `count` of zero yields an empty vector.
#[must_use]
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            #[allow(clippy::cast_precision_loss)]
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        end
                    } else {
                        #[allow(clippy::cast_precision_loss)]
                        let offset = i as f64 * step;
                        start + offset
                    }
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn valid_span() {
        let span = TimeSpan::new(0.5, 2.0).unwrap();
        assert_relative_eq!(span.duration(), 1.5);
        assert!(span.contains(0.5));
        assert!(span.contains(2.0));
        assert!(!span.contains(2.1));
    }

    #[test]
    fn rejects_empty_and_reversed_spans() {
        assert_eq!(
            TimeSpan::new(1.0, 1.0),
            Err(SpanError::Empty {
                start: 1.0,
                end: 1.0
            })
        );
        assert!(matches!(
            TimeSpan::new(2.0, 1.0),
            Err(SpanError::Empty { .. })
        ));
    }

    #[test]
    fn rejects_non_finite_bounds() {
        assert!(matches!(
            TimeSpan::new(0.0, f64::INFINITY),
            Err(SpanError::NonFinite { .. })
        ));
        assert!(matches!(
            TimeSpan::new(f64::NAN, 1.0),
            Err(SpanError::NonFinite { .. })
        ));
    }

    #[test]
    fn linspace_hits_both_ends() {
        let ts = linspace(0.0, 2.0, 5);
        assert_eq!(ts, vec![0.0, 0.5, 1.0, 1.5, 2.0]);

        let ts = linspace(0.0, 0.3, 4);
        assert_eq!(ts.len(), 4);
        assert_eq!(ts[3], 0.3);
        assert_relative_eq!(ts[1], 0.1);
    }

    #[test]
    fn linspace_degenerate_counts() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 1.0, 1), vec![3.0]);
    }
}
