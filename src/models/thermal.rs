//! Spacecraft thermal equilibrium models.
//!
//! This module contains the building blocks of a spacecraft power and thermal
//! architecture and the two equilibrium solvers that tie them together:
//!
//! - [`SolarAbsorber`] solves for the hot-side temperature of a sunlit plate
//!   that feeds a heat engine.
//! - [`ThermalLoop`] solves for the cold-side temperature shared by one or more
//!   heat sources rejecting waste heat into one or more radiators.
//!
//! Everything else ([`Location`], [`Surface`], [`Reactor`], [`Turbine`],
//! [`Photovoltaic`], fixed loads) supplies energy terms to those solvers.
//!
//! # Example
//!
//! A reactor and a solar-thermal absorber sharing one radiator field:
//!
//! ```
//! use spacecraft_thermal::models::thermal::{
//!     HeatSource, Location, Reactor, SolarAbsorber, Surface, ThermalLoop,
//! };
//! use uom::si::{
//!     angle::degree,
//!     area::square_meter,
//!     f64::{Angle, Area, Length, Power},
//!     length::astronomical_unit,
//!     power::megawatt,
//!     thermodynamic_temperature::kelvin,
//! };
//!
//! let loc = Location::new(Length::new::<astronomical_unit>(0.25)).unwrap();
//!
//! let reactor = Reactor::from_catalogue("fission_frontiers", "wyvern").unwrap();
//!
//! let plate = Surface::builder(Area::new::<square_meter>(1000.0), Area::new::<square_meter>(1000.0))
//!     .emissivity(0.12)
//!     .absorptance(0.96)
//!     .angle_to_sun(Angle::new::<degree>(25.0))
//!     .build()
//!     .unwrap();
//! let absorber = SolarAbsorber::new(&loc, Power::new::<megawatt>(1.0), plate).unwrap();
//!
//! let radiator = Surface::builder(
//!     Area::new::<square_meter>(2.0e6),
//!     Area::new::<square_meter>(1.0e6),
//! )
//! .emissivity(0.9)
//! .absorptance(0.09)
//! .angle_to_sun(Angle::new::<degree>(90.0))
//! .build()
//! .unwrap();
//!
//! let sources = vec![HeatSource::from(reactor), HeatSource::from(absorber)];
//! let mut thermal_loop = ThermalLoop::new(loc, sources, radiator).unwrap();
//!
//! let t_c = thermal_loop.equilibrate().unwrap();
//! assert!(t_c.get::<kelvin>() < 600.0);
//! ```

mod absorber;
mod constants;
mod error;
mod heat_source;
mod location;
mod photovoltaic;
mod reactor;
mod surface;
mod thermal_loop;
mod turbine;

pub use absorber::{AbsorberConfig, AbsorberError, SolarAbsorber};
pub use constants::{SOLAR_CONSTANT_AT_1_AU, STEFAN_BOLTZMANN};
pub use error::ConfigError;
pub use heat_source::{
    FixedHeatLoad, FixedPowerSource, HeatSource, HeatSourceKind, HeatSourceModel,
};
pub use location::Location;
pub use photovoltaic::{Photovoltaic, PhotovoltaicParams};
pub use reactor::{CatalogueEntry, Reactor, ReactorSpec, standard_reactors};
pub use surface::{Surface, SurfaceBuilder};
pub use thermal_loop::{LoopConfig, LoopError, LoopSummary, ThermalLoop};
pub use turbine::Turbine;

