//! # Spacecraft Thermal
//!
//! Steady-state thermal equilibrium models for spacecraft power and thermal
//! architectures built on [Twine](https://github.com/isentropic-dev/twine).
//!
//! Heat sources (reactors, solar absorbers, photovoltaics, fixed loads) reject
//! waste heat into radiators that also absorb sunlight. The models here solve
//! for the temperatures at which everything balances.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain-specific models, organized by domain.
//! - [`support`]: Supporting utilities used by models.
//!
//! ## Quick start
//!
//! ```
//! use spacecraft_thermal::models::thermal::{
//!     FixedHeatLoad, HeatSource, Location, Surface, ThermalLoop,
//! };
//! use uom::si::{
//!     angle::degree,
//!     area::square_meter,
//!     f64::{Angle, Area, Length, Power},
//!     length::astronomical_unit,
//!     power::watt,
//!     thermodynamic_temperature::kelvin,
//! };
//!
//! let loc = Location::new(Length::new::<astronomical_unit>(1.0)).unwrap();
//!
//! let load = HeatSource::from(FixedHeatLoad::new(Power::new::<watt>(5_000.0)).unwrap());
//! let radiator = Surface::builder(Area::new::<square_meter>(40.0), Area::new::<square_meter>(20.0))
//!     .emissivity(0.9)
//!     .absorptance(0.1)
//!     .angle_to_sun(Angle::new::<degree>(90.0))
//!     .build()
//!     .unwrap();
//!
//! let mut thermal_loop = ThermalLoop::new(loc, load, radiator).unwrap();
//! let t_c = thermal_loop.cold_side_temperature().unwrap();
//! assert!(t_c.get::<kelvin>() > 0.0);
//! ```

pub mod models;
pub mod support;
