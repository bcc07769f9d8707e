//! Vertical dynamics of a quarter-car model.
//!
//! A quarter car is a two-mass system: the sprung mass (a share of the body)
//! rides on a suspension spring and damper above the unsprung mass (wheel and
//! axle), which in turn rests on the tire spring. The road profile moves the
//! bottom of the tire spring.
//!
//! - [`model`]: the equations of motion, [`eval_rhs`] and [`QuarterCar`]
//! - [`trajectory`]: integration over a time grid with [`TrajectorySolver`]
//!   or [`simulate`]
//! - [`road`]: the [`RoadProfile`] input
//! - [`scenario`]: serializable run descriptions
//!
//! # Example
//!
//! ```
//! use qcar::{Parameters, linspace, simulate};
//!
//! let params = Parameters {
//!     sprung_mass: 250.0,
//!     unsprung_mass: 35.0,
//!     suspension_stiffness: 16_000.0,
//!     tire_stiffness: 160_000.0,
//!     suspension_damping: 1000.0,
//! };
//! let step = |t: f64, _speed: f64| if t >= 0.0 { 0.05 } else { 0.0 };
//! let ts = linspace(0.0, 2.0, 201);
//!
//! let trajectory = simulate(&[0.0; 4], &params, 0.0, 2.0, &ts, 20.0, step)?;
//! assert!(trajectory.is_success());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod params;
mod state;

pub mod model;
pub mod road;
pub mod scenario;
pub mod trajectory;
pub mod units;

pub use error::{DimensionError, ParameterError, SimulationError};
pub use model::{QuarterCar, eval_rhs};
pub use params::{Matrix2, Parameters};
pub use road::RoadProfile;
pub use state::{State, positions, state_from_slice, velocities};
pub use trajectory::{Trajectory, TrajectorySolver, simulate};

pub use qcar_core::{Failure, OdeSystem, Status, TimeSpan, linspace};
