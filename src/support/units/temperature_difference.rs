use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
};

/// Subtraction of absolute temperatures, yielding a [`TemperatureInterval`].
///
/// See [uom#380](https://github.com/iliekturtles/uom/issues/380) for why this
/// is not provided by [`uom`] itself.
pub trait TemperatureDifference {
    /// Returns `self - other`.
    fn minus(self, other: Self) -> TemperatureInterval;
}

impl TemperatureDifference for ThermodynamicTemperature {
    fn minus(self, other: Self) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(self.get::<kelvin>() - other.get::<kelvin>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::thermodynamic_temperature::degree_celsius;

    #[test]
    fn cell_above_and_below_reference() {
        let reference = ThermodynamicTemperature::new::<degree_celsius>(25.0);
        let hot = ThermodynamicTemperature::new::<kelvin>(418.15);
        let cold = ThermodynamicTemperature::new::<degree_celsius>(-100.0);

        assert_relative_eq!(hot.minus(reference).get::<delta_kelvin>(), 120.0, epsilon = 1e-9);
        assert_relative_eq!(cold.minus(reference).get::<delta_kelvin>(), -125.0, epsilon = 1e-9);
        assert_relative_eq!(reference.minus(reference).get::<delta_kelvin>(), 0.0);
    }
}
