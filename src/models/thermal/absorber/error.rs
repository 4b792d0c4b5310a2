use thiserror::Error;
use uom::si::{
    f64::{Power, ThermodynamicTemperature},
    power::watt,
    thermodynamic_temperature::kelvin,
};

use crate::models::thermal::ConfigError;

/// Errors that can occur while solving a solar absorber.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AbsorberError {
    /// The absorber inputs were invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The emitted power has no slope, so the iteration cannot proceed.
    ///
    /// This happens when every absorber surface has zero emissivity or zero
    /// emission area.
    #[error("absorber surfaces cannot radiate: emitted power has no slope at {:.1} K", .temperature.get::<kelvin>())]
    ZeroSlope {
        /// Iterate at which the slope vanished.
        temperature: ThermodynamicTemperature,
    },

    /// The iteration produced a non-finite value.
    #[error("absorber iteration diverged near {:.1} K", .temperature.get::<kelvin>())]
    Diverged {
        /// Last finite iterate.
        temperature: ThermodynamicTemperature,
    },

    /// The solver reached the iteration limit without converging.
    #[error(
        "absorber solve hit iteration limit after {iters} iterations: T={:.3} K, residual={:.3e} W",
        .temperature.get::<kelvin>(),
        .residual.get::<watt>()
    )]
    MaxIters {
        /// Last iterate.
        temperature: ThermodynamicTemperature,

        /// Energy balance residual at the last iterate.
        residual: Power,

        /// Iteration count performed by the solver.
        iters: usize,
    },

    /// The balance converged to a temperature at or below absolute zero.
    ///
    /// Large positive surface temperature offsets can place the root there.
    #[error("absorber settled at a non-physical temperature ({:.1} K)", .temperature.get::<kelvin>())]
    NonPhysicalTemperature {
        /// The converged temperature.
        temperature: ThermodynamicTemperature,
    },
}
