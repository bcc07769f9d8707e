//! Unit types for suspension coefficients.
//!
//! `uom` has no named quantities for spring stiffness or viscous damping, so
//! they are defined here from their base dimensions.

use uom::{
    si::{
        Quantity, ISQ, SI,
        f64::{Force, Length, Velocity},
        force::newton,
        length::meter,
        velocity::meter_per_second,
    },
    typenum::{N1, N2, P1, Z0},
};

/// Spring stiffness, N/m in SI.
pub type Stiffness = Quantity<ISQ<Z0, P1, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Viscous damping coefficient, N·s/m in SI.
pub type DampingCoefficient = Quantity<ISQ<Z0, P1, N1, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Creates a [`Stiffness`] from a value in N/m.
#[inline]
#[must_use]
pub fn newtons_per_meter(value: f64) -> Stiffness {
    Force::new::<newton>(value) / Length::new::<meter>(1.0)
}

/// Creates a [`DampingCoefficient`] from a value in N·s/m.
#[inline]
#[must_use]
pub fn newton_seconds_per_meter(value: f64) -> DampingCoefficient {
    Force::new::<newton>(value) / Velocity::new::<meter_per_second>(1.0)
}
