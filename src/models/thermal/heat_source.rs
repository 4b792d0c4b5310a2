use std::fmt;

use uom::si::{
    f64::{Power, ThermodynamicTemperature},
    power::watt,
    thermodynamic_temperature::kelvin,
};

use crate::support::{constraint::NonNegative, members::impl_from_single};

use super::{ConfigError, Photovoltaic, Reactor, SolarAbsorber, Turbine};

/// Capabilities of anything that rejects heat into a thermal loop.
///
/// Every heat source reports the waste heat it rejects when its cold side sits
/// at a given interface temperature.
/// Sources that also deliver useful power override [`useful_power`], and
/// sources backed by a heat engine expose a [`hot_side_temperature`], which
/// bounds the cold-side temperature a loop may settle at.
///
/// [`useful_power`]: HeatSourceModel::useful_power
/// [`hot_side_temperature`]: HeatSourceModel::hot_side_temperature
pub trait HeatSourceModel {
    /// Waste heat rejected at the given cold-side temperature.
    fn waste_heat(&self, cold_side: ThermodynamicTemperature) -> Power;

    /// Useful power delivered at the given cold-side temperature, if any.
    fn useful_power(&self, _cold_side: ThermodynamicTemperature) -> Option<Power> {
        None
    }

    /// Hot-side reservoir temperature, if this source has one.
    fn hot_side_temperature(&self) -> Option<ThermodynamicTemperature> {
        None
    }
}

/// A heat load that rejects a fixed amount of heat regardless of temperature.
///
/// Use this for habitat and avionics loads, or any source whose output does
/// not depend on the radiator temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedHeatLoad {
    waste_heat: Power,
}

impl FixedHeatLoad {
    /// Creates a fixed heat load.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Constraint`] if the waste heat is negative.
    pub fn new(waste_heat: Power) -> Result<Self, ConfigError> {
        let waste_heat = NonNegative::new(waste_heat)
            .map_err(ConfigError::field("waste heat"))?
            .into_inner();
        Ok(Self { waste_heat })
    }
}

impl HeatSourceModel for FixedHeatLoad {
    fn waste_heat(&self, _cold_side: ThermodynamicTemperature) -> Power {
        self.waste_heat
    }
}

/// A power source with fixed useful output and fixed waste heat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPowerSource {
    useful_power: Power,
    waste_heat: Power,
}

impl FixedPowerSource {
    /// Creates a fixed power source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Constraint`] if either power is negative.
    pub fn new(useful_power: Power, waste_heat: Power) -> Result<Self, ConfigError> {
        let useful_power = NonNegative::new(useful_power)
            .map_err(ConfigError::field("useful power"))?
            .into_inner();
        let waste_heat = NonNegative::new(waste_heat)
            .map_err(ConfigError::field("waste heat"))?
            .into_inner();
        Ok(Self {
            useful_power,
            waste_heat,
        })
    }
}

impl HeatSourceModel for FixedPowerSource {
    fn waste_heat(&self, _cold_side: ThermodynamicTemperature) -> Power {
        self.waste_heat
    }

    fn useful_power(&self, _cold_side: ThermodynamicTemperature) -> Option<Power> {
        Some(self.useful_power)
    }
}

/// The supported kinds of heat source.
#[derive(Debug, Clone)]
pub enum HeatSourceKind {
    FixedHeatLoad(FixedHeatLoad),
    FixedPowerSource(FixedPowerSource),
    Turbine(Turbine),
    Reactor(Reactor),
    SolarAbsorber(SolarAbsorber),
    Photovoltaic(Photovoltaic),
}

impl HeatSourceKind {
    fn model(&self) -> &dyn HeatSourceModel {
        match self {
            Self::FixedHeatLoad(m) => m,
            Self::FixedPowerSource(m) => m,
            Self::Turbine(m) => m,
            Self::Reactor(m) => m,
            Self::SolarAbsorber(m) => m,
            Self::Photovoltaic(m) => m,
        }
    }
}

impl HeatSourceModel for HeatSourceKind {
    fn waste_heat(&self, cold_side: ThermodynamicTemperature) -> Power {
        self.model().waste_heat(cold_side)
    }

    fn useful_power(&self, cold_side: ThermodynamicTemperature) -> Option<Power> {
        self.model().useful_power(cold_side)
    }

    fn hot_side_temperature(&self) -> Option<ThermodynamicTemperature> {
        self.model().hot_side_temperature()
    }
}

/// A heat source participating in a thermal loop.
///
/// Wraps one [`HeatSourceKind`] together with the cold-side temperature the
/// loop last settled at.
/// The `*_at` methods evaluate the source at any candidate temperature;
/// the plain accessors report values at the settled temperature.
#[derive(Debug, Clone)]
pub struct HeatSource {
    kind: HeatSourceKind,
    cold_side_temperature: Option<ThermodynamicTemperature>,
}

impl HeatSource {
    /// The wrapped source.
    #[must_use]
    pub fn kind(&self) -> &HeatSourceKind {
        &self.kind
    }

    /// Mutable access to the wrapped source.
    pub fn kind_mut(&mut self) -> &mut HeatSourceKind {
        &mut self.kind
    }

    /// Cold-side temperature from the last loop equilibrium, if solved.
    #[must_use]
    pub fn cold_side_temperature(&self) -> Option<ThermodynamicTemperature> {
        self.cold_side_temperature
    }

    /// Hot-side temperature, if this source has one.
    #[must_use]
    pub fn hot_side_temperature(&self) -> Option<ThermodynamicTemperature> {
        self.kind.hot_side_temperature()
    }

    /// Waste heat at a candidate cold-side temperature.
    #[must_use]
    pub fn waste_heat_at(&self, cold_side: ThermodynamicTemperature) -> Power {
        self.kind.waste_heat(cold_side)
    }

    /// Useful power at a candidate cold-side temperature, if this source delivers any.
    #[must_use]
    pub fn useful_power_at(&self, cold_side: ThermodynamicTemperature) -> Option<Power> {
        self.kind.useful_power(cold_side)
    }

    /// Waste heat at the settled cold-side temperature.
    ///
    /// Returns `None` until a loop has been equilibrated.
    #[must_use]
    pub fn waste_heat(&self) -> Option<Power> {
        self.cold_side_temperature.map(|t| self.waste_heat_at(t))
    }

    /// Useful power at the settled cold-side temperature.
    ///
    /// Returns `None` until a loop has been equilibrated, or if the source
    /// delivers no useful power.
    #[must_use]
    pub fn useful_power(&self) -> Option<Power> {
        self.cold_side_temperature
            .and_then(|t| self.useful_power_at(t))
    }

    pub(crate) fn stamp(&mut self, cold_side: ThermodynamicTemperature) {
        self.cold_side_temperature = Some(cold_side);
    }
}

impl From<HeatSourceKind> for HeatSource {
    fn from(kind: HeatSourceKind) -> Self {
        Self {
            kind,
            cold_side_temperature: None,
        }
    }
}

macro_rules! impl_from_kind {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for HeatSource {
                fn from(source: $variant) -> Self {
                    HeatSourceKind::$variant(source).into()
                }
            }
        )*
    };
}

impl_from_kind!(
    FixedHeatLoad,
    FixedPowerSource,
    Turbine,
    Reactor,
    SolarAbsorber,
    Photovoltaic,
);

impl_from_single!(HeatSource);

impl fmt::Display for HeatSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(t_c) = self.cold_side_temperature else {
            return write!(f, "Cold-Side Temperature = unresolved");
        };

        if let HeatSourceKind::Photovoltaic(pv) = &self.kind {
            writeln!(f, "Cell Temperature = {:.1} K", t_c.get::<kelvin>())?;
            writeln!(f, "Efficiency = {:.3}", pv.efficiency(t_c))?;
        } else {
            writeln!(f, "Cold-Side Temperature = {:.1} K", t_c.get::<kelvin>())?;
        }

        write!(f, "Waste Heat = {:.1} W", self.waste_heat_at(t_c).get::<watt>())?;

        if let Some(w) = self.useful_power_at(t_c) {
            write!(f, "\nUseful Power = {:.1} W", w.get::<watt>())?;
        }
        if let Some(t_h) = self.hot_side_temperature() {
            write!(f, "\nHot-Side Temperature = {:.1} K", t_h.get::<kelvin>())?;
        }
        Ok(())
    }
}
