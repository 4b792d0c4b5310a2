use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
};

/// Solver configuration for the absorber hot-side temperature.
#[derive(Debug, Clone, Copy)]
pub struct AbsorberConfig {
    /// Temperature the Newton iteration starts from.
    pub initial_guess: ThermodynamicTemperature,

    /// Absolute tolerance on the Newton step.
    pub temp_tol: TemperatureInterval,

    /// Maximum iteration count.
    pub max_iters: usize,
}

impl Default for AbsorberConfig {
    fn default() -> Self {
        Self {
            initial_guess: ThermodynamicTemperature::new::<kelvin>(273.15),
            temp_tol: TemperatureInterval::new::<delta_kelvin>(1e-3),
            max_iters: 2000,
        }
    }
}
