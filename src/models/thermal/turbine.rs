use uom::si::{
    f64::{Power, ThermodynamicTemperature},
    thermodynamic_temperature::kelvin,
};

use crate::support::constraint::{NonNegative, StrictlyPositive};

use super::{ConfigError, HeatSourceModel};

/// A heat engine running between a hot reservoir and the loop's cold side.
///
/// The engine converts a fraction of its thermal power into useful work.
/// That fraction is the Carnot efficiency derated by a fixed
/// [practical efficiency](Self::PRACTICAL_EFFICIENCY); everything else is
/// rejected as waste heat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Turbine {
    thermal_power: Power,
    hot_side: ThermodynamicTemperature,
}

impl Turbine {
    /// Fraction of the Carnot efficiency a real engine achieves.
    pub const PRACTICAL_EFFICIENCY: f64 = 0.70;

    /// Creates a turbine with total thermal power `qt` and hot-side temperature `t_h`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Constraint`] if `qt` is negative or `t_h` is not
    /// strictly positive.
    pub fn new(qt: Power, t_h: ThermodynamicTemperature) -> Result<Self, ConfigError> {
        let thermal_power = NonNegative::new(qt)
            .map_err(ConfigError::field("thermal power"))?
            .into_inner();
        StrictlyPositive::new(t_h.get::<kelvin>())
            .map_err(ConfigError::field("hot-side temperature"))?;

        Ok(Self {
            thermal_power,
            hot_side: t_h,
        })
    }

    /// Total thermal power passing through the engine.
    #[must_use]
    pub fn thermal_power(&self) -> Power {
        self.thermal_power
    }

    /// Hot-side reservoir temperature.
    #[must_use]
    pub fn hot_side(&self) -> ThermodynamicTemperature {
        self.hot_side
    }

    /// Carnot efficiency against `cold_side`, floored at zero.
    #[must_use]
    pub fn carnot_efficiency(&self, cold_side: ThermodynamicTemperature) -> f64 {
        if cold_side < self.hot_side {
            1.0 - cold_side.get::<kelvin>() / self.hot_side.get::<kelvin>()
        } else {
            0.0
        }
    }

    /// Overall conversion efficiency against `cold_side`.
    #[must_use]
    pub fn efficiency(&self, cold_side: ThermodynamicTemperature) -> f64 {
        Self::PRACTICAL_EFFICIENCY * self.carnot_efficiency(cold_side)
    }

    /// Useful work delivered against `cold_side`.
    #[must_use]
    pub fn work(&self, cold_side: ThermodynamicTemperature) -> Power {
        self.thermal_power * self.efficiency(cold_side)
    }
}

impl HeatSourceModel for Turbine {
    fn waste_heat(&self, cold_side: ThermodynamicTemperature) -> Power {
        self.thermal_power - self.work(cold_side)
    }

    fn useful_power(&self, cold_side: ThermodynamicTemperature) -> Option<Power> {
        Some(self.work(cold_side))
    }

    fn hot_side_temperature(&self) -> Option<ThermodynamicTemperature> {
        Some(self.hot_side)
    }
}
