use std::cell::OnceCell;

use uom::si::{
    area::square_meter,
    f64::{Area, HeatFluxDensity, Power, ThermodynamicTemperature},
    heat_flux_density::watt_per_square_meter,
    power::watt,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::{degree_celsius, kelvin},
};

use crate::support::{
    constraint::{NonNegative, StrictlyPositive, UnitInterval},
    units::TemperatureDifference,
};

use super::{ConfigError, HeatSourceModel, Location, Surface};

/// Fraction of lab efficiency reached under real, non-ideal illumination.
const ILLUMINATION_FACTOR: f64 = 0.8;

/// Efficiency lost per year of age at 1 AU.
const AGEING_AT_1_AU: f64 = -3.4e-2;

/// Efficiency change per kelvin above the reference temperature.
const TEMPERATURE_COEFFICIENT: f64 = -0.2e-2;

/// Fraction of incident sunlight reflected without heating the panel.
const REFLECTION_FRACTION: f64 = 5e-3;

/// Cell temperature window, in °C, outside which the panel produces nothing.
const OPERATING_WINDOW_C: (f64, f64) = (-100.0, 150.0);

/// Inputs describing a photovoltaic array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotovoltaicParams {
    /// Cell efficiency measured under lab conditions, in `[0, 1]`.
    pub eta_lab: f64,

    /// Temperature at which `eta_lab` was measured.
    pub reference_temperature: ThermodynamicTemperature,

    /// Time in service, in years.
    pub age_years: f64,
}

/// A photovoltaic array whose collection surfaces double as radiators.
///
/// Sunlight landing on the collection surfaces is either converted to
/// electricity or rejected as waste heat, so the surfaces must not also count
/// it as absorbed solar heat.
/// Construction therefore forces their absorptance to zero.
/// The same surfaces should then be given to the [`ThermalLoop`] as radiators.
///
/// Efficiency falls linearly with cell temperature and drops to zero outside
/// the operating window.
/// The upper edge of that window is the lower of 150 °C and the temperature
/// at which the linear model reaches zero efficiency.
/// It is derived on first use and kept per array.
///
/// [`ThermalLoop`]: super::ThermalLoop
#[derive(Debug, Clone)]
pub struct Photovoltaic {
    params: PhotovoltaicParams,
    solar_flux: HeatFluxDensity,
    distance_au: f64,
    collection_area: Area,
    radiative_area: Area,
    limits: OnceCell<Limits>,
}

#[derive(Debug, Clone, Copy)]
struct Limits {
    eta_non_thermal: f64,
    max_temperature: ThermodynamicTemperature,
}

impl Photovoltaic {
    /// Creates an array from its collection surfaces.
    ///
    /// Every surface with a non-zero absorptance has it reset to zero, with a
    /// warning.
    ///
    /// `surfaces` is any iterator of mutable surface references: a lone
    /// surface as `[&mut panel]`, a list as `panels.iter_mut()`, or a map as
    /// `panels.values_mut()`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `eta_lab` lies outside `[0, 1]`, the age is
    /// negative, the reference temperature is not strictly positive, or no
    /// surfaces are given.
    pub fn new<'a>(
        location: &Location,
        params: PhotovoltaicParams,
        surfaces: impl IntoIterator<Item = &'a mut Surface>,
    ) -> Result<Self, ConfigError> {
        UnitInterval::new(params.eta_lab).map_err(ConfigError::field("lab efficiency"))?;
        NonNegative::new(params.age_years).map_err(ConfigError::field("age"))?;
        StrictlyPositive::new(params.reference_temperature.get::<kelvin>())
            .map_err(ConfigError::field("reference temperature"))?;

        let mut count = 0_usize;
        let mut collection_area = Area::new::<square_meter>(0.0);
        let mut radiative_area = Area::new::<square_meter>(0.0);

        for surface in surfaces {
            if surface.clear_absorptance() {
                tracing::warn!(
                    "absorptance of a photovoltaic surface set to zero to avoid double counting \
                     its heat load; include the surface as a radiator in the thermal loop"
                );
            }
            collection_area += surface.sun_facing_area();
            radiative_area += surface.emission_area();
            count += 1;
        }

        if count == 0 {
            return Err(ConfigError::Empty {
                what: "photovoltaic surfaces",
            });
        }

        Ok(Self {
            params,
            solar_flux: location.solar_flux(),
            distance_au: location.distance_au(),
            collection_area,
            radiative_area,
            limits: OnceCell::new(),
        })
    }

    /// Array parameters.
    #[must_use]
    pub fn params(&self) -> &PhotovoltaicParams {
        &self.params
    }

    /// Total projected sun-facing area of the collection surfaces.
    #[must_use]
    pub fn collection_area(&self) -> Area {
        self.collection_area
    }

    /// Total emission area of the collection surfaces.
    #[must_use]
    pub fn radiative_area(&self) -> Area {
        self.radiative_area
    }

    /// Lowest cell temperature at which the array produces power.
    #[must_use]
    pub fn min_temperature() -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(OPERATING_WINDOW_C.0)
    }

    /// Highest cell temperature at which the array produces power.
    #[must_use]
    pub fn max_temperature(&self) -> ThermodynamicTemperature {
        self.limits().max_temperature
    }

    /// Efficiency before temperature effects: derated lab efficiency less ageing.
    #[must_use]
    pub fn non_thermal_efficiency(&self) -> f64 {
        self.limits().eta_non_thermal
    }

    /// Overall conversion efficiency at cell temperature `t`.
    #[must_use]
    pub fn efficiency(&self, t: ThermodynamicTemperature) -> f64 {
        let limits = self.limits();
        if t <= Self::min_temperature() || t >= limits.max_temperature {
            return 0.0;
        }

        let above_ref = t.minus(self.params.reference_temperature);
        limits.eta_non_thermal + TEMPERATURE_COEFFICIENT * above_ref.get::<delta_kelvin>()
    }

    fn incident_power(&self) -> Power {
        Power::new::<watt>(
            self.solar_flux.get::<watt_per_square_meter>()
                * self.collection_area.get::<square_meter>(),
        )
    }

    fn limits(&self) -> &Limits {
        self.limits.get_or_init(|| {
            let ageing = AGEING_AT_1_AU / self.distance_au.powi(2);
            let eta_non_thermal =
                ILLUMINATION_FACTOR * self.params.eta_lab + self.params.age_years * ageing;

            let zero_efficiency = self.params.reference_temperature.get::<kelvin>()
                - eta_non_thermal / TEMPERATURE_COEFFICIENT;
            let window_max =
                ThermodynamicTemperature::new::<degree_celsius>(OPERATING_WINDOW_C.1)
                    .get::<kelvin>();
            let max_k = zero_efficiency
                .min(window_max)
                .max(Self::min_temperature().get::<kelvin>());

            tracing::info!(
                max_temperature_kelvin = max_k,
                max_temperature_celsius = max_k - 273.15,
                "photovoltaic panel maximum temperature"
            );

            Limits {
                eta_non_thermal,
                max_temperature: ThermodynamicTemperature::new::<kelvin>(max_k),
            }
        })
    }
}

impl HeatSourceModel for Photovoltaic {
    fn waste_heat(&self, cold_side: ThermodynamicTemperature) -> Power {
        self.incident_power() * ((1.0 - REFLECTION_FRACTION) * (1.0 - self.efficiency(cold_side)))
    }

    fn useful_power(&self, cold_side: ThermodynamicTemperature) -> Option<Power> {
        Some(self.incident_power() * self.efficiency(cold_side))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{f64::Length, length::astronomical_unit};

    fn location(au: f64) -> Location {
        Location::new(Length::new::<astronomical_unit>(au)).unwrap()
    }

    fn panel() -> Surface {
        Surface::builder(
            Area::new::<square_meter>(100.0),
            Area::new::<square_meter>(50.0),
        )
        .emissivity(0.85)
        .absorptance(0.9)
        .build()
        .unwrap()
    }

    fn params(eta_lab: f64) -> PhotovoltaicParams {
        PhotovoltaicParams {
            eta_lab,
            reference_temperature: ThermodynamicTemperature::new::<degree_celsius>(25.0),
            age_years: 0.0,
        }
    }

    #[test]
    fn clears_absorptance_and_sums_areas() {
        let mut surfaces = vec![panel(), panel()];
        let pv = Photovoltaic::new(&location(1.0), params(0.3), surfaces.iter_mut()).unwrap();

        for surface in &surfaces {
            assert_relative_eq!(surface.absorptance(), 0.0);
        }
        assert_relative_eq!(pv.collection_area().get::<square_meter>(), 100.0);
        assert_relative_eq!(pv.radiative_area().get::<square_meter>(), 200.0);
    }

    #[test]
    fn accepts_single_and_named_surfaces() {
        let mut lone = panel();
        let pv = Photovoltaic::new(&location(1.0), params(0.3), [&mut lone]).unwrap();
        assert_relative_eq!(lone.absorptance(), 0.0);
        assert_relative_eq!(pv.collection_area().get::<square_meter>(), 50.0);

        let mut named = std::collections::BTreeMap::from([
            ("port".to_string(), panel()),
            ("starboard".to_string(), panel()),
        ]);
        let pv = Photovoltaic::new(&location(1.0), params(0.3), named.values_mut()).unwrap();
        assert!(named.values().all(|s| s.absorptance() == 0.0));
        assert_relative_eq!(pv.radiative_area().get::<square_meter>(), 200.0);
    }

    #[test]
    fn efficiency_falls_with_temperature() {
        let mut surface = panel();
        let pv = Photovoltaic::new(&location(1.0), params(0.3), [&mut surface]).unwrap();

        let t_ref = ThermodynamicTemperature::new::<degree_celsius>(25.0);
        assert_relative_eq!(pv.non_thermal_efficiency(), 0.24, epsilon = 1e-12);
        assert_relative_eq!(pv.efficiency(t_ref), 0.24, epsilon = 1e-12);

        let warmer = ThermodynamicTemperature::new::<degree_celsius>(75.0);
        assert_relative_eq!(pv.efficiency(warmer), 0.14, epsilon = 1e-12);
    }

    #[test]
    fn zero_efficiency_outside_window() {
        let mut surface = panel();
        let pv = Photovoltaic::new(&location(1.0), params(0.3), [&mut surface]).unwrap();

        // 0.24 / 0.002 = 120 K above the reference.
        assert_relative_eq!(
            pv.max_temperature().get::<degree_celsius>(),
            145.0,
            epsilon = 1e-9
        );

        for t_c in [-100.0, -150.0, 145.0, 160.0] {
            let t = ThermodynamicTemperature::new::<degree_celsius>(t_c);
            assert_relative_eq!(pv.efficiency(t), 0.0);
        }
    }

    #[test]
    fn max_temperature_is_clamped_to_window() {
        let mut surface = panel();
        let pv = Photovoltaic::new(&location(1.0), params(0.9), [&mut surface]).unwrap();
        assert_relative_eq!(
            pv.max_temperature().get::<degree_celsius>(),
            150.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn limits_are_per_instance() {
        let mut a = panel();
        let mut b = panel();
        let low = Photovoltaic::new(&location(1.0), params(0.1), [&mut a]).unwrap();
        let high = Photovoltaic::new(&location(1.0), params(0.3), [&mut b]).unwrap();

        let low_max = low.max_temperature();
        let high_max = high.max_temperature();
        assert!(low_max < high_max);
        assert_eq!(low.max_temperature(), low_max);
    }

    #[test]
    fn ageing_scales_with_distance() {
        let aged = |au| {
            let mut surface = panel();
            let params = PhotovoltaicParams {
                age_years: 2.0,
                ..params(0.3)
            };
            Photovoltaic::new(&location(au), params, [&mut surface])
                .unwrap()
                .non_thermal_efficiency()
        };

        assert_relative_eq!(aged(1.0), 0.24 - 0.068, epsilon = 1e-12);
        assert_relative_eq!(aged(2.0), 0.24 - 0.017, epsilon = 1e-12);
    }

    #[test]
    fn splits_incident_power() {
        let loc = location(1.0);
        let mut surface = panel();
        let pv = Photovoltaic::new(&loc, params(0.3), [&mut surface]).unwrap();

        let t = ThermodynamicTemperature::new::<degree_celsius>(25.0);
        let incident = 1380.73 * 50.0;

        assert_relative_eq!(
            pv.useful_power(t).unwrap().get::<watt>(),
            0.24 * incident,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            pv.waste_heat(t).get::<watt>(),
            0.995 * 0.76 * incident,
            max_relative = 1e-12
        );
    }

    #[test]
    fn rejects_bad_inputs() {
        let loc = location(1.0);

        assert!(matches!(
            Photovoltaic::new(&loc, params(0.3), Vec::<&mut Surface>::new()),
            Err(ConfigError::Empty { .. })
        ));

        let mut surface = panel();
        assert!(matches!(
            Photovoltaic::new(&loc, params(1.5), [&mut surface]),
            Err(ConfigError::Constraint {
                field: "lab efficiency",
                ..
            })
        ));
    }
}
