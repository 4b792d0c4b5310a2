//! Extensions to [`uom`].
//!
//! All physical inputs and outputs in this crate are [`uom`] quantities.
//! [`uom`] treats an absolute temperature and a temperature difference as
//! different kinds, and does not yet offer subtraction of two absolute
//! temperatures; [`TemperatureDifference`] fills that gap:
//!
//! ```
//! use spacecraft_thermal::support::units::TemperatureDifference;
//! use uom::si::{
//!     f64::ThermodynamicTemperature, temperature_interval::kelvin as delta_kelvin,
//!     thermodynamic_temperature::degree_celsius,
//! };
//!
//! let cell = ThermodynamicTemperature::new::<degree_celsius>(75.0);
//! let reference = ThermodynamicTemperature::new::<degree_celsius>(25.0);
//! assert!((cell.minus(reference).get::<delta_kelvin>() - 50.0).abs() < 1e-9);
//! ```

mod temperature_difference;

pub use temperature_difference::TemperatureDifference;
