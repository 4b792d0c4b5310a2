use thiserror::Error;
use twine_solvers::equation::bisection;
use uom::si::{
    f64::{Power, ThermodynamicTemperature},
    power::watt,
    thermodynamic_temperature::kelvin,
};

/// Errors that can occur while equilibrating a thermal loop.
#[derive(Debug, Error)]
pub enum LoopError {
    /// The energy balance does not change sign between 0 K and the bound.
    ///
    /// Even at the lowest hot-side temperature in the loop the radiators
    /// cannot reject the waste heat plus the sunlight they absorb.
    #[error(
        "no radiator temperature exists below the minimum hot-side temperature ({:.1} K); \
         the radiator must be larger, more emissive, or less absorptive",
        .max_temperature.get::<kelvin>()
    )]
    Infeasible {
        /// Upper end of the search interval.
        max_temperature: ThermodynamicTemperature,

        /// Energy balance residual at 0 K.
        residual_at_zero: Power,

        /// Energy balance residual at `max_temperature`.
        residual_at_max: Power,
    },

    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The solver reached the iteration limit without converging.
    #[error(
        "loop solve hit iteration limit after {iters} iterations: residual={:.3e} W",
        .residual.get::<watt>()
    )]
    MaxIters {
        /// Energy balance residual at the last iterate.
        residual: Power,

        /// Iteration count performed by the solver.
        iters: usize,
    },
}
