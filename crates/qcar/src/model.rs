//! Equations of motion for the quarter-car model.
//!
//! With positions `q = [q1, q2]`, velocities `u = [u1, u2]`, and road
//! elevation `zr`, the state derivative is
//!
//! ```text
//! q' = u
//! u' = C·u + K·q + [0, kt/mu · zr]
//! ```
//!
//! where `C` and `K` are the damping and stiffness coupling matrices returned
//! by [`Parameters::damping_matrix`] and [`Parameters::stiffness_matrix`].

use qcar_core::OdeSystem;

use crate::{
    error::ParameterError,
    params::{Matrix2, Parameters},
    road::RoadProfile,
    state::{State, positions, velocities},
};

/// Evaluates the quarter-car state derivative `[q1', q2', u1', u2']`.
///
/// The parameters are used as given. A zero mass yields infinite or NaN
/// accelerations rather than an error; use [`QuarterCar::new`] to reject
/// such parameters up front.
///
/// # Errors
///
/// Returns the road profile's error unchanged if the elevation at `t` cannot
/// be determined.
pub fn eval_rhs<R>(
    t: f64,
    x: &State,
    params: &Parameters,
    speed: f64,
    road: &R,
) -> Result<State, R::Error>
where
    R: RoadProfile + ?Sized,
{
    let q = positions(x);
    let u = velocities(x);

    let zr = road.elevation(t, speed)?;

    let damping = mul(&params.damping_matrix(), &u);
    let stiffness = mul(&params.stiffness_matrix(), &q);
    let forcing = params.tire_stiffness / params.unsprung_mass * zr;

    let ud = [
        damping[0] + stiffness[0],
        damping[1] + stiffness[1] + forcing,
    ];

    Ok([u[0], u[1], ud[0], ud[1]])
}

fn mul(m: &Matrix2, v: &[f64; 2]) -> [f64; 2] {
    [
        m[0][0] * v[0] + m[0][1] * v[1],
        m[1][0] * v[0] + m[1][1] * v[1],
    ]
}

/// A quarter car travelling at a fixed speed over a road profile.
///
/// This bundles everything [`eval_rhs`] needs besides time and state, and
/// implements [`OdeSystem`] so it can be handed to any integrator.
#[derive(Debug, Clone)]
pub struct QuarterCar<R> {
    params: Parameters,
    speed: f64,
    road: R,
}

impl<R: RoadProfile> QuarterCar<R> {
    /// Creates a model after validating its parameters.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] if the parameters fail
    /// [`Parameters::validate`] or the speed is not finite.
    pub fn new(params: Parameters, speed: f64, road: R) -> Result<Self, ParameterError> {
        params.validate()?;
        if !speed.is_finite() {
            return Err(ParameterError::NonFinite {
                name: "speed",
                value: speed,
            });
        }
        Ok(Self::unchecked(params, speed, road))
    }

    /// Creates a model without validating its parameters.
    ///
    /// Degenerate parameters propagate into the derivative as non-finite
    /// values, which integrators report as a failed run.
    #[must_use]
    pub fn unchecked(params: Parameters, speed: f64, road: R) -> Self {
        Self {
            params,
            speed,
            road,
        }
    }

    #[must_use]
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[must_use]
    pub fn road(&self) -> &R {
        &self.road
    }

    /// Returns the total mechanical energy at time `t`, measuring the tire
    /// spring against the road elevation at that time.
    ///
    /// # Errors
    ///
    /// Returns the road profile's error if the elevation cannot be determined.
    pub fn mechanical_energy(&self, t: f64, x: &State) -> Result<f64, R::Error> {
        let zr = self.road.elevation(t, self.speed)?;
        Ok(self.params.mechanical_energy(x, zr))
    }
}

impl<R: RoadProfile> OdeSystem<4> for QuarterCar<R> {
    type Error = R::Error;

    fn derivative(&self, t: f64, state: &State) -> Result<State, Self::Error> {
        eval_rhs(t, state, &self.params, self.speed, &self.road)
    }
}
