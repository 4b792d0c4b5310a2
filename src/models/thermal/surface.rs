use std::fmt;

use uom::si::{
    angle::degree,
    area::square_meter,
    f64::{Angle, Area, Power, TemperatureInterval, ThermodynamicTemperature},
    heat_flux_density::watt_per_square_meter,
    power::watt,
    ratio::ratio,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    constraint::{Constrained, ConstraintError, NonNegative, UnitInterval},
    members::impl_from_single,
};

use super::{ConfigError, Location, constants::STEFAN_BOLTZMANN};

/// A flat radiating and absorbing plate.
///
/// A surface has two areas:
///
/// - the emission area, which radiates (often both faces of a plate), and
/// - the sun-facing area, which absorbs sunlight (only ever one face).
///
/// The sun-facing area stored here is already projected onto the plane normal
/// to the sun, so a plate at 60° to the sun absorbs half as much as one facing
/// it directly.
///
/// The temperature offset shifts the surface's own temperature relative to
/// the system temperature it is solved at.
/// A negative offset represents, for example, a panel that is actively cooled
/// by a loop running colder than the panel itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    emission_area: Area,
    sun_facing_area: Area,
    emissivity: Constrained<f64, UnitInterval>,
    absorptance: Constrained<f64, UnitInterval>,
    temperature_offset: TemperatureInterval,
    temperature: Option<ThermodynamicTemperature>,
}

/// Builder for [`Surface`].
///
/// Optional properties default to an emissivity and absorptance of 0.5, a
/// surface facing the sun head-on, and no temperature offset.
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct SurfaceBuilder {
    emission_area: Area,
    sun_facing_area: Area,
    emissivity: f64,
    absorptance: f64,
    angle_to_sun: Angle,
    temperature_offset: TemperatureInterval,
}

impl Surface {
    /// Starts building a surface with the given radiating and sun-facing areas.
    pub fn builder(emission_area: Area, sun_facing_area: Area) -> SurfaceBuilder {
        SurfaceBuilder {
            emission_area,
            sun_facing_area,
            emissivity: 0.5,
            absorptance: 0.5,
            angle_to_sun: Angle::new::<degree>(0.0),
            temperature_offset: TemperatureInterval::new::<delta_kelvin>(0.0),
        }
    }

    /// Radiating area.
    #[must_use]
    pub fn emission_area(&self) -> Area {
        self.emission_area
    }

    /// Sun-facing area after projection by the angle to the sun.
    #[must_use]
    pub fn sun_facing_area(&self) -> Area {
        self.sun_facing_area
    }

    /// Hemispherical emissivity.
    #[must_use]
    pub fn emissivity(&self) -> f64 {
        *self.emissivity.as_ref()
    }

    /// Solar absorptance.
    #[must_use]
    pub fn absorptance(&self) -> f64 {
        *self.absorptance.as_ref()
    }

    /// Offset between this surface and the system temperature.
    #[must_use]
    pub fn temperature_offset(&self) -> TemperatureInterval {
        self.temperature_offset
    }

    /// Resolved surface temperature, once a solver has run.
    #[must_use]
    pub fn temperature(&self) -> Option<ThermodynamicTemperature> {
        self.temperature
    }

    /// Solar power absorbed at `location`.
    #[must_use]
    pub fn solar_power(&self, location: &Location) -> Power {
        Power::new::<watt>(self.solar_power_w(location))
    }

    /// Power radiated when the system sits at `temperature`.
    ///
    /// The surface's temperature offset is applied before the Stefan–Boltzmann law.
    #[must_use]
    pub fn radiated_power(&self, temperature: ThermodynamicTemperature) -> Power {
        Power::new::<watt>(self.radiated_power_w(temperature.get::<kelvin>()))
    }

    pub(crate) fn solar_power_w(&self, location: &Location) -> f64 {
        location.solar_flux().get::<watt_per_square_meter>()
            * self.absorptance()
            * self.sun_facing_area.get::<square_meter>()
    }

    pub(crate) fn radiated_power_w(&self, system_kelvin: f64) -> f64 {
        let t = system_kelvin + self.temperature_offset.get::<delta_kelvin>();
        self.emissivity() * STEFAN_BOLTZMANN * self.emission_area.get::<square_meter>() * t.powi(4)
    }

    /// Derivative of [`Self::radiated_power_w`] with respect to the system temperature.
    pub(crate) fn radiated_power_slope_w(&self, system_kelvin: f64) -> f64 {
        let t = system_kelvin + self.temperature_offset.get::<delta_kelvin>();
        4.0 * self.emissivity()
            * STEFAN_BOLTZMANN
            * self.emission_area.get::<square_meter>()
            * t.powi(3)
    }

    /// Records the system temperature this surface settled at, shifted by
    /// the surface's offset.
    pub(crate) fn stamp(&mut self, system: ThermodynamicTemperature) {
        self.temperature = Some(system + self.temperature_offset);
    }

    /// Records `temperature` as-is, without applying the offset.
    pub(crate) fn set_temperature(&mut self, temperature: ThermodynamicTemperature) {
        self.temperature = Some(temperature);
    }

    /// Stops this surface from absorbing sunlight as heat.
    ///
    /// Returns `true` if the absorptance was changed.
    pub(crate) fn clear_absorptance(&mut self) -> bool {
        let changed = self.absorptance() != 0.0;
        self.absorptance = UnitInterval::zero();
        changed
    }
}

impl SurfaceBuilder {
    /// Sets the hemispherical emissivity, which must lie in `[0, 1]`.
    pub fn emissivity(mut self, emissivity: f64) -> Self {
        self.emissivity = emissivity;
        self
    }

    /// Sets the solar absorptance, which must lie in `[0, 1]`.
    pub fn absorptance(mut self, absorptance: f64) -> Self {
        self.absorptance = absorptance;
        self
    }

    /// Sets the angle between the surface normal and the sun direction.
    ///
    /// Zero means the surface faces the sun head-on; 90° means edge-on.
    pub fn angle_to_sun(mut self, angle: Angle) -> Self {
        self.angle_to_sun = angle;
        self
    }

    /// Sets the offset of this surface relative to the system temperature.
    pub fn temperature_offset(mut self, offset: TemperatureInterval) -> Self {
        self.temperature_offset = offset;
        self
    }

    /// Validates the inputs and builds the surface.
    ///
    /// The sun-facing area is projected by the cosine of the angle to the sun
    /// here, and only here.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if an area is negative, emissivity or
    /// absorptance lies outside `[0, 1]`, the temperature offset is not
    /// finite, or the angle lies outside ±90°.
    pub fn build(self) -> Result<Surface, ConfigError> {
        let emission_area = NonNegative::new(self.emission_area)
            .map_err(ConfigError::field("emission area"))?
            .into_inner();
        let sun_facing_area = NonNegative::new(self.sun_facing_area)
            .map_err(ConfigError::field("sun-facing area"))?
            .into_inner();
        let emissivity =
            UnitInterval::new(self.emissivity).map_err(ConfigError::field("emissivity"))?;
        let absorptance =
            UnitInterval::new(self.absorptance).map_err(ConfigError::field("absorptance"))?;

        let offset = self.temperature_offset.get::<delta_kelvin>();
        if !offset.is_finite() {
            let source = if offset.is_nan() {
                ConstraintError::NotANumber
            } else {
                ConstraintError::NotFinite
            };
            return Err(ConfigError::Constraint {
                field: "temperature offset",
                source,
            });
        }

        let degrees = self.angle_to_sun.get::<degree>();
        if degrees.is_nan() || degrees.abs() > 90.0 {
            return Err(ConfigError::AngleOutOfRange {
                angle: self.angle_to_sun,
            });
        }

        // cos(90°) is a hair off zero in floating point.
        let projection = self.angle_to_sun.cos().get::<ratio>().max(0.0);

        Ok(Surface {
            emission_area,
            sun_facing_area: sun_facing_area * projection,
            emissivity,
            absorptance,
            temperature_offset: self.temperature_offset,
            temperature: None,
        })
    }
}

impl_from_single!(Surface);

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.temperature {
            Some(t) => write!(f, "Temperature = {:.1} K", t.get::<kelvin>()),
            None => write!(f, "Temperature = unresolved"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::length::astronomical_unit;
    use uom::si::f64::Length;

    fn plate() -> SurfaceBuilder {
        Surface::builder(
            Area::new::<square_meter>(200.0),
            Area::new::<square_meter>(100.0),
        )
    }

    #[test]
    fn defaults() {
        let surface = plate().build().unwrap();

        assert_relative_eq!(surface.emissivity(), 0.5);
        assert_relative_eq!(surface.absorptance(), 0.5);
        assert_relative_eq!(surface.sun_facing_area().get::<square_meter>(), 100.0);
        assert_relative_eq!(surface.temperature_offset().get::<delta_kelvin>(), 0.0);
        assert!(surface.temperature().is_none());
    }

    #[test]
    fn projects_sun_facing_area_once() {
        let surface = plate()
            .angle_to_sun(Angle::new::<degree>(60.0))
            .build()
            .unwrap();
        assert_relative_eq!(
            surface.sun_facing_area().get::<square_meter>(),
            50.0,
            epsilon = 1e-9
        );

        // Rebuilding from the same builder projects from the raw area again.
        let builder = plate().angle_to_sun(Angle::new::<degree>(60.0));
        let a = builder.build().unwrap();
        let b = builder.build().unwrap();
        assert_eq!(a.sun_facing_area(), b.sun_facing_area());

        // Emission area is never projected.
        assert_relative_eq!(a.emission_area().get::<square_meter>(), 200.0);
    }

    #[test]
    fn edge_on_surface_receives_no_sun() {
        let loc = Location::new(Length::new::<astronomical_unit>(1.0)).unwrap();
        let surface = plate()
            .angle_to_sun(Angle::new::<degree>(90.0))
            .build()
            .unwrap();

        assert!(surface.sun_facing_area().get::<square_meter>() >= 0.0);
        assert_relative_eq!(surface.solar_power(&loc).get::<watt>(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn solar_power() {
        let loc = Location::new(Length::new::<astronomical_unit>(1.0)).unwrap();
        let surface = plate().absorptance(0.2).build().unwrap();

        assert_relative_eq!(
            surface.solar_power(&loc).get::<watt>(),
            1380.73 * 0.2 * 100.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn radiated_power_applies_offset() {
        let surface = plate()
            .emissivity(0.8)
            .temperature_offset(TemperatureInterval::new::<delta_kelvin>(-20.0))
            .build()
            .unwrap();

        let q = surface.radiated_power(ThermodynamicTemperature::new::<kelvin>(320.0));
        assert_relative_eq!(
            q.get::<watt>(),
            0.8 * STEFAN_BOLTZMANN * 200.0 * 300.0_f64.powi(4),
            max_relative = 1e-12
        );
    }

    #[test]
    fn slope_matches_finite_difference() {
        let surface = plate().emissivity(0.7).build().unwrap();
        let h = 1e-4;
        let fd = (surface.radiated_power_w(400.0 + h) - surface.radiated_power_w(400.0 - h))
            / (2.0 * h);
        assert_relative_eq!(surface.radiated_power_slope_w(400.0), fd, max_relative = 1e-6);
    }

    #[test]
    fn stamp_records_offset_temperature() {
        let mut surface = plate()
            .temperature_offset(TemperatureInterval::new::<delta_kelvin>(-10.0))
            .build()
            .unwrap();

        surface.stamp(ThermodynamicTemperature::new::<kelvin>(300.0));
        assert_relative_eq!(surface.temperature().unwrap().get::<kelvin>(), 290.0);
        assert_eq!(surface.to_string(), "Temperature = 290.0 K");
    }

    #[test]
    fn rejects_invalid_inputs() {
        assert!(matches!(
            plate().emissivity(1.2).build(),
            Err(ConfigError::Constraint {
                field: "emissivity",
                ..
            })
        ));
        assert!(matches!(
            plate().absorptance(-0.1).build(),
            Err(ConfigError::Constraint {
                field: "absorptance",
                ..
            })
        ));
        assert!(matches!(
            plate().angle_to_sun(Angle::new::<degree>(120.0)).build(),
            Err(ConfigError::AngleOutOfRange { .. })
        ));
        assert!(matches!(
            Surface::builder(
                Area::new::<square_meter>(-1.0),
                Area::new::<square_meter>(1.0)
            )
            .build(),
            Err(ConfigError::Constraint {
                field: "emission area",
                ..
            })
        ));
    }

    #[test]
    fn set_temperature_ignores_offset() {
        let mut surface = plate()
            .temperature_offset(TemperatureInterval::new::<delta_kelvin>(-10.0))
            .build()
            .unwrap();

        surface.set_temperature(ThermodynamicTemperature::new::<kelvin>(300.0));
        assert_relative_eq!(surface.temperature().unwrap().get::<kelvin>(), 300.0);
    }

    #[test]
    fn rejects_non_finite_offset_and_nan_angle() {
        for offset in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                plate()
                    .temperature_offset(TemperatureInterval::new::<delta_kelvin>(offset))
                    .build(),
                Err(ConfigError::Constraint {
                    field: "temperature offset",
                    ..
                })
            ));
        }

        assert!(matches!(
            plate().angle_to_sun(Angle::new::<degree>(f64::NAN)).build(),
            Err(ConfigError::AngleOutOfRange { .. })
        ));
    }

    #[test]
    fn clearing_absorptance_reports_change() {
        let mut surface = plate().absorptance(0.3).build().unwrap();
        assert!(surface.clear_absorptance());
        assert!(!surface.clear_absorptance());
        assert_relative_eq!(surface.absorptance(), 0.0);
    }
}
