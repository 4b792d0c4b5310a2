use twine_solvers::equation::bisection;
use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
};

/// Solver configuration for the loop cold-side temperature.
#[derive(Debug, Clone, Copy)]
pub struct LoopConfig {
    /// Maximum iteration count for the bisection solve.
    pub max_iters: usize,

    /// Relative tolerance on the cold-side temperature.
    pub temp_rel_tol: f64,

    /// Absolute tolerance on the cold-side temperature.
    pub temp_abs_tol: TemperatureInterval,

    /// Upper search bound used when no heat source has a hot side,
    /// and a cap on the bound otherwise.
    pub max_temperature: ThermodynamicTemperature,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            temp_rel_tol: 1e-3,
            temp_abs_tol: TemperatureInterval::new::<delta_kelvin>(1e-9),
            max_temperature: ThermodynamicTemperature::new::<kelvin>(10_000.0),
        }
    }
}

impl LoopConfig {
    /// Converts this configuration into a bisection solver configuration.
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.temp_abs_tol.get::<delta_kelvin>(),
            x_rel_tol: self.temp_rel_tol,
            residual_tol: 0.0,
        }
    }
}
