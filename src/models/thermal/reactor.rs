//! Nuclear reactors driving a heat engine.

mod catalogue;

pub use catalogue::{CatalogueEntry, standard_reactors};

use uom::si::{
    f64::{Power, ThermodynamicTemperature},
    power::watt,
    thermodynamic_temperature::kelvin,
};

use super::{ConfigError, HeatSourceModel, Turbine};

/// A reactor: a [`Turbine`] fed by a fission or fusion core.
///
/// A reactor is specified either with a custom thermal power and hot-side
/// temperature, or by naming a standard installation from the
/// [catalogue](standard_reactors).
#[derive(Debug, Clone, PartialEq)]
pub struct Reactor {
    turbine: Turbine,
    designation: Option<(&'static str, &'static str)>,
}

/// Loose reactor specification, validated by [`Reactor::from_spec`].
///
/// Exactly one of the two modes must be complete:
///
/// - custom: both `thermal_power` and `hot_side_temperature`, or
/// - catalogue: both `brand` and `model`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReactorSpec {
    pub thermal_power: Option<Power>,
    pub hot_side_temperature: Option<ThermodynamicTemperature>,
    pub brand: Option<String>,
    pub model: Option<String>,
}

impl Reactor {
    /// Creates a reactor with a custom specification.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the turbine inputs are invalid.
    pub fn custom(qt: Power, t_h: ThermodynamicTemperature) -> Result<Self, ConfigError> {
        Ok(Self {
            turbine: Turbine::new(qt, t_h)?,
            designation: None,
        })
    }

    /// Creates a standard reactor installation by brand and model.
    ///
    /// Both names are matched without regard to case.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownReactor`], listing every valid entry,
    /// if the pair is not in the catalogue.
    pub fn from_catalogue(brand: &str, model: &str) -> Result<Self, ConfigError> {
        let entry =
            catalogue::lookup(brand, model).ok_or_else(|| ConfigError::UnknownReactor {
                brand: brand.to_owned(),
                model: model.to_owned(),
                valid: catalogue::listing(),
            })?;

        let turbine = Turbine::new(
            Power::new::<watt>(entry.thermal_power_w),
            ThermodynamicTemperature::new::<kelvin>(entry.hot_side_k),
        )?;

        Ok(Self {
            turbine,
            designation: Some((entry.brand, entry.model)),
        })
    }

    /// Creates a reactor from a loose specification.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReactorOverSpecified`] if both modes are complete,
    /// [`ConfigError::ReactorUnderSpecified`] if neither is, or any error from
    /// [`Reactor::custom`] and [`Reactor::from_catalogue`].
    pub fn from_spec(spec: &ReactorSpec) -> Result<Self, ConfigError> {
        let custom = spec.thermal_power.zip(spec.hot_side_temperature);
        let library = spec.brand.as_deref().zip(spec.model.as_deref());

        match (custom, library) {
            (Some(_), Some(_)) => Err(ConfigError::ReactorOverSpecified),
            (Some((qt, t_h)), None) => Self::custom(qt, t_h),
            (None, Some((brand, model))) => Self::from_catalogue(brand, model),
            (None, None) => Err(ConfigError::ReactorUnderSpecified),
        }
    }

    /// The underlying heat engine.
    #[must_use]
    pub fn turbine(&self) -> &Turbine {
        &self.turbine
    }

    /// Catalogue brand and model, for standard installations.
    #[must_use]
    pub fn designation(&self) -> Option<(&'static str, &'static str)> {
        self.designation
    }
}

impl HeatSourceModel for Reactor {
    fn waste_heat(&self, cold_side: ThermodynamicTemperature) -> Power {
        self.turbine.waste_heat(cold_side)
    }

    fn useful_power(&self, cold_side: ThermodynamicTemperature) -> Option<Power> {
        self.turbine.useful_power(cold_side)
    }

    fn hot_side_temperature(&self) -> Option<ThermodynamicTemperature> {
        self.turbine.hot_side_temperature()
    }
}
