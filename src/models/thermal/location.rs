use uom::si::{
    f64::{HeatFluxDensity, Length},
    heat_flux_density::watt_per_square_meter,
    length::astronomical_unit,
};

use crate::support::constraint::StrictlyPositive;

use super::{ConfigError, constants::SOLAR_CONSTANT_AT_1_AU};

/// A position in a star system, fixed for the lifetime of a scenario.
///
/// The incident solar flux follows the inverse-square law from the
/// [`SOLAR_CONSTANT_AT_1_AU`](super::SOLAR_CONSTANT_AT_1_AU) reference value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    distance: Length,
    solar_flux: HeatFluxDensity,
}

impl Location {
    /// Creates a location at the given distance from the star.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Constraint`] if the distance is not strictly positive.
    pub fn new(distance: Length) -> Result<Self, ConfigError> {
        let distance = StrictlyPositive::new(distance)
            .map_err(ConfigError::field("distance"))?
            .into_inner();

        let au = distance.get::<astronomical_unit>();
        let solar_flux =
            HeatFluxDensity::new::<watt_per_square_meter>(SOLAR_CONSTANT_AT_1_AU / (au * au));

        Ok(Self {
            distance,
            solar_flux,
        })
    }

    /// Distance from the star.
    #[must_use]
    pub fn distance(&self) -> Length {
        self.distance
    }

    /// Distance from the star in astronomical units.
    #[must_use]
    pub fn distance_au(&self) -> f64 {
        self.distance.get::<astronomical_unit>()
    }

    /// Incident solar flux at this location.
    #[must_use]
    pub fn solar_flux(&self) -> HeatFluxDensity {
        self.solar_flux
    }
}
