//! Road inputs.
//!
//! A road profile gives the vertical elevation under the tire as a function of
//! time and travel speed. Any `Fn(f64, f64) -> f64` closure is a road profile:
//!
//! ```
//! use qcar::road::RoadProfile;
//!
//! let bump = |t: f64, speed: f64| if (t * speed - 10.0).abs() < 0.5 { 0.02 } else { 0.0 };
//! assert_eq!(bump.elevation(1.0, 10.0), Ok(0.02));
//! ```
//!
//! Profiles that can fail, such as lookups into measured data, are wrapped
//! with [`fallible`].

use std::convert::Infallible;

/// Vertical road elevation under the tire, m.
///
/// Profiles are evaluated at arbitrary times chosen by the integrator,
/// including trial points of rejected steps, so implementations should be
/// pure.
pub trait RoadProfile {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the road elevation at time `t` (s) for a vehicle travelling at
    /// `speed` (m/s).
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the elevation cannot be determined.
    fn elevation(&self, t: f64, speed: f64) -> Result<f64, Self::Error>;
}

impl<F> RoadProfile for F
where
    F: Fn(f64, f64) -> f64,
{
    type Error = Infallible;

    fn elevation(&self, t: f64, speed: f64) -> Result<f64, Self::Error> {
        Ok(self(t, speed))
    }
}

/// A road profile backed by a fallible closure.
#[derive(Debug, Clone, Copy)]
pub struct Fallible<F>(F);

/// Wraps a closure returning `Result<f64, E>` as a [`RoadProfile`].
pub fn fallible<F, E>(f: F) -> Fallible<F>
where
    F: Fn(f64, f64) -> Result<f64, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    Fallible(f)
}

impl<F, E> RoadProfile for Fallible<F>
where
    F: Fn(f64, f64) -> Result<f64, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    fn elevation(&self, t: f64, speed: f64) -> Result<f64, Self::Error> {
        (self.0)(t, speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use thiserror::Error;

    #[derive(Debug, Error, PartialEq)]
    #[error("no survey data beyond {0} m")]
    struct OffMap(f64);

    #[test]
    fn closures_are_profiles() {
        let ramp = |t: f64, speed: f64| 0.5 * t * speed;
        assert_eq!(ramp.elevation(2.0, 3.0), Ok(3.0));
    }

    #[test]
    fn fallible_profiles_pass_errors_through() {
        let surveyed = fallible(|t: f64, speed: f64| {
            let distance = t * speed;
            if distance > 100.0 {
                Err(OffMap(100.0))
            } else {
                Ok(0.0)
            }
        });
        assert_eq!(surveyed.elevation(1.0, 20.0), Ok(0.0));
        assert_eq!(surveyed.elevation(10.0, 20.0), Err(OffMap(100.0)));
    }
}
