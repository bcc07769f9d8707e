use serde::{Deserialize, Serialize};
use uom::si::{f64::Mass, mass::kilogram};

use crate::{
    error::{DimensionError, ParameterError},
    state::State,
    units::{DampingCoefficient, Stiffness},
};

/// A 2×2 matrix in row-major order.
pub type Matrix2 = [[f64; 2]; 2];

/// Physical coefficients of a quarter-car model, in SI units.
///
/// The sprung mass is the body share carried by one corner's suspension. The
/// unsprung mass is the wheel and axle assembly below it, which rests on the
/// tire spring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Parameters {
    /// Sprung (body) mass, kg.
    pub sprung_mass: f64,

    /// Unsprung (wheel) mass, kg.
    pub unsprung_mass: f64,

    /// Suspension spring stiffness, N/m.
    pub suspension_stiffness: f64,

    /// Tire vertical stiffness, N/m.
    pub tire_stiffness: f64,

    /// Suspension damping coefficient, N·s/m.
    pub suspension_damping: f64,
}

impl Parameters {
    /// Creates parameters from unit-checked quantities.
    #[must_use]
    pub fn from_quantities(
        sprung_mass: Mass,
        unsprung_mass: Mass,
        suspension_stiffness: Stiffness,
        tire_stiffness: Stiffness,
        suspension_damping: DampingCoefficient,
    ) -> Self {
        Self {
            sprung_mass: sprung_mass.get::<kilogram>(),
            unsprung_mass: unsprung_mass.get::<kilogram>(),
            suspension_stiffness: suspension_stiffness.value,
            tire_stiffness: tire_stiffness.value,
            suspension_damping: suspension_damping.value,
        }
    }

    /// Creates parameters from a positional vector.
    ///
    /// The first five entries are, in order: sprung mass, unsprung mass,
    /// suspension stiffness, tire stiffness, and suspension damping. Any
    /// further entries (such as a vehicle speed or road type) are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionError::Parameters`] if fewer than five values are
    /// given.
    pub fn from_slice(values: &[f64]) -> Result<Self, DimensionError> {
        match values {
            [ms, mu, ks, kt, cs, ..] => Ok(Self {
                sprung_mass: *ms,
                unsprung_mass: *mu,
                suspension_stiffness: *ks,
                tire_stiffness: *kt,
                suspension_damping: *cs,
            }),
            _ => Err(DimensionError::Parameters {
                actual: values.len(),
            }),
        }
    }

    /// Checks that the parameters describe a physical system.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] if any value is non-finite, a mass is not
    /// positive, or a stiffness or damping coefficient is negative.
    pub fn validate(&self) -> Result<(), ParameterError> {
        for (name, value) in self.named_values() {
            if !value.is_finite() {
                return Err(ParameterError::NonFinite { name, value });
            }
        }
        for (name, value) in [
            ("sprung_mass", self.sprung_mass),
            ("unsprung_mass", self.unsprung_mass),
        ] {
            if value <= 0.0 {
                return Err(ParameterError::NonPositiveMass { name, value });
            }
        }
        for (name, value) in [
            ("suspension_stiffness", self.suspension_stiffness),
            ("tire_stiffness", self.tire_stiffness),
            ("suspension_damping", self.suspension_damping),
        ] {
            if value < 0.0 {
                return Err(ParameterError::Negative { name, value });
            }
        }
        Ok(())
    }

    /// Returns the damping coupling matrix `C`, which multiplies the
    /// velocities `[u1, u2]` in the acceleration equations.
    #[must_use]
    pub fn damping_matrix(&self) -> Matrix2 {
        let Self {
            sprung_mass: ms,
            unsprung_mass: mu,
            suspension_damping: cs,
            ..
        } = *self;
        [[-cs / ms, cs / ms], [cs / mu, -cs / mu]]
    }

    /// Returns the stiffness coupling matrix `K`, which multiplies the
    /// positions `[q1, q2]` in the acceleration equations.
    #[must_use]
    pub fn stiffness_matrix(&self) -> Matrix2 {
        let Self {
            sprung_mass: ms,
            unsprung_mass: mu,
            suspension_stiffness: ks,
            tire_stiffness: kt,
            ..
        } = *self;
        [[-ks / ms, ks / ms], [ks / mu, -(kt + ks) / mu]]
    }

    /// Returns the total mechanical energy of the system, J.
    ///
    /// This is the kinetic energy of both masses plus the potential energy
    /// stored in the suspension spring (stretched by `q1 - q2`) and the tire
    /// spring (stretched by `q2 - zr`).
    #[must_use]
    pub fn mechanical_energy(&self, state: &State, road_elevation: f64) -> f64 {
        let [q1, q2, u1, u2] = *state;
        let kinetic = 0.5 * (self.sprung_mass * u1 * u1 + self.unsprung_mass * u2 * u2);
        let suspension = 0.5 * self.suspension_stiffness * (q1 - q2).powi(2);
        let tire = 0.5 * self.tire_stiffness * (q2 - road_elevation).powi(2);
        kinetic + suspension + tire
    }

    /// Returns the resting state under a constant road elevation.
    ///
    /// With the road held at `zr`, the tire spring is relaxed only when the
    /// wheel sits at `zr`, and the suspension spring only when the body sits
    /// at the wheel, so both masses settle at `zr`.
    #[must_use]
    pub fn static_equilibrium(&self, road_elevation: f64) -> State {
        [road_elevation, road_elevation, 0.0, 0.0]
    }

    /// Returns the undamped natural frequencies `(body, wheel_hop)`, rad/s.
    ///
    /// These are the square roots of the eigenvalues of `-K`, ordered from
    /// lowest to highest.
    #[must_use]
    pub fn natural_frequencies(&self) -> (f64, f64) {
        let [[a, b], [c, d]] = self.stiffness_matrix();
        let half_trace = -(a + d) / 2.0;
        let det = a * d - b * c;
        let spread = (half_trace * half_trace - det).max(0.0).sqrt();
        let low = (half_trace - spread).max(0.0).sqrt();
        let high = (half_trace + spread).sqrt();
        (low, high)
    }

    fn named_values(&self) -> [(&'static str, f64); 5] {
        [
            ("sprung_mass", self.sprung_mass),
            ("unsprung_mass", self.unsprung_mass),
            ("suspension_stiffness", self.suspension_stiffness),
            ("tire_stiffness", self.tire_stiffness),
            ("suspension_damping", self.suspension_damping),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::units::{newton_seconds_per_meter, newtons_per_meter};

    fn sedan() -> Parameters {
        Parameters {
            sprung_mass: 250.0,
            unsprung_mass: 35.0,
            suspension_stiffness: 16_000.0,
            tire_stiffness: 160_000.0,
            suspension_damping: 1000.0,
        }
    }

    #[test]
    fn from_quantities_converts_to_si() {
        let p = Parameters::from_quantities(
            Mass::new::<kilogram>(250.0),
            Mass::new::<kilogram>(35.0),
            newtons_per_meter(16_000.0),
            newtons_per_meter(160_000.0),
            newton_seconds_per_meter(1000.0),
        );
        assert_eq!(p, sedan());
    }

    #[test]
    fn from_slice_accepts_extended_vectors() {
        let five = Parameters::from_slice(&[250.0, 35.0, 16_000.0, 160_000.0, 1000.0]).unwrap();
        let seven =
            Parameters::from_slice(&[250.0, 35.0, 16_000.0, 160_000.0, 1000.0, 20.0, 2.0]).unwrap();
        assert_eq!(five, sedan());
        assert_eq!(seven, sedan());
    }

    #[test]
    fn from_slice_rejects_short_vectors() {
        assert_eq!(
            Parameters::from_slice(&[250.0, 35.0, 16_000.0]),
            Err(DimensionError::Parameters { actual: 3 })
        );
    }

    #[test]
    fn validation() {
        assert!(sedan().validate().is_ok());

        let zero_mass = Parameters {
            unsprung_mass: 0.0,
            ..sedan()
        };
        assert_eq!(
            zero_mass.validate(),
            Err(ParameterError::NonPositiveMass {
                name: "unsprung_mass",
                value: 0.0
            })
        );

        let negative_damping = Parameters {
            suspension_damping: -1.0,
            ..sedan()
        };
        assert!(matches!(
            negative_damping.validate(),
            Err(ParameterError::Negative {
                name: "suspension_damping",
                ..
            })
        ));

        let infinite_stiffness = Parameters {
            tire_stiffness: f64::INFINITY,
            ..sedan()
        };
        assert!(matches!(
            infinite_stiffness.validate(),
            Err(ParameterError::NonFinite {
                name: "tire_stiffness",
                ..
            })
        ));
    }

    #[test]
    fn coupling_matrices() {
        let c = sedan().damping_matrix();
        let k = sedan().stiffness_matrix();

        assert_relative_eq!(c[0][0], -4.0);
        assert_relative_eq!(c[0][1], 4.0);
        assert_relative_eq!(c[1][0], 1000.0 / 35.0);
        assert_relative_eq!(c[1][1], -1000.0 / 35.0);

        assert_relative_eq!(k[0][0], -64.0);
        assert_relative_eq!(k[0][1], 64.0);
        assert_relative_eq!(k[1][0], 16_000.0 / 35.0);
        assert_relative_eq!(k[1][1], -176_000.0 / 35.0);
    }

    #[test]
    fn energy_of_static_equilibrium_is_zero() {
        let p = sedan();
        let rest = p.static_equilibrium(0.05);
        assert_relative_eq!(p.mechanical_energy(&rest, 0.05), 0.0);
        assert_relative_eq!(
            p.mechanical_energy(&[0.0, 0.0, 1.0, 0.0], 0.0),
            0.5 * 250.0
        );
    }

    #[test]
    fn natural_frequencies_match_eigenvalues() {
        let p = sedan();
        let (body, wheel) = p.natural_frequencies();

        // Product and sum of eigenvalues of -K.
        let det = p.suspension_stiffness * p.tire_stiffness / (p.sprung_mass * p.unsprung_mass);
        let trace = p.suspension_stiffness / p.sprung_mass
            + (p.suspension_stiffness + p.tire_stiffness) / p.unsprung_mass;
        assert_relative_eq!(body.powi(2) * wheel.powi(2), det, max_relative = 1e-10);
        assert_relative_eq!(body.powi(2) + wheel.powi(2), trace, max_relative = 1e-10);

        // Body mode sits near the suspension/tire series rate over the body mass.
        let series = 16_000.0 * 160_000.0 / 176_000.0;
        assert_relative_eq!(body, (series / 250.0_f64).sqrt(), max_relative = 0.05);
        assert!(wheel > body);
    }

    #[test]
    fn deserializes_named_fields() {
        let p: Parameters = toml::from_str(
            r"
            sprung_mass = 250.0
            unsprung_mass = 35.0
            suspension_stiffness = 16000.0
            tire_stiffness = 160000.0
            suspension_damping = 1000.0
            ",
        )
        .unwrap();
        assert_eq!(p, sedan());

        let unknown = toml::from_str::<Parameters>(
            r"
            sprung_mass = 250.0
            unsprung_mass = 35.0
            suspension_stiffness = 16000.0
            tire_stiffness = 160000.0
            suspension_damping = 1000.0
            road_type = 2
            ",
        );
        assert!(unknown.is_err());
    }
}
