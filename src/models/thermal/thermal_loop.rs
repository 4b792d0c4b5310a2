//! Shared radiator loop: one cold-side temperature for many heat sources.
//!
//! Every heat source in a loop rejects its waste heat into the same set of
//! radiators, so they all see one cold-side temperature `T_C`.
//! That temperature solves
//!
//! ```text
//! Q_emitted(T_C) − Q_waste(T_C) − Q_solar = 0
//! ```
//!
//! over `[0, min T_H]`, where `min T_H` is the lowest hot-side temperature of
//! any source in the loop (capped by [`LoopConfig::max_temperature`]).
//! A radiator hotter than some engine's hot side would make that engine run
//! backwards, so no root above the bound is accepted.

mod balance;
mod config;
mod error;
mod summary;

pub use config::LoopConfig;
pub use error::LoopError;
pub use summary::LoopSummary;

use std::fmt;

use twine_solvers::equation::bisection;
use uom::si::{
    f64::{Power, ThermodynamicTemperature},
    power::watt,
    thermodynamic_temperature::kelvin,
};

use crate::support::{constraint::StrictlyPositive, members::Members};

use super::{ConfigError, HeatSource, Location, Surface};

use balance::{BalanceModel, BalanceProblem};

/// Heat sources and radiators sharing one cold-side temperature.
///
/// The loop owns its members.
/// The equilibrium is solved on demand by [`cold_side_temperature`] and
/// cached; [`equilibrate`] always solves again.
/// Mutating members through the `*_mut` accessors leaves the cache alone, so
/// call [`equilibrate`] afterwards to refresh it.
///
/// Once solved, every radiator records `T_C` plus its own offset and every
/// heat source records `T_C` as its cold-side temperature.
///
/// [`cold_side_temperature`]: ThermalLoop::cold_side_temperature
/// [`equilibrate`]: ThermalLoop::equilibrate
#[derive(Debug, Clone)]
pub struct ThermalLoop {
    location: Location,
    heat_sources: Members<HeatSource>,
    radiators: Members<Surface>,
    config: LoopConfig,
    solved: Option<LoopSummary>,
}

impl ThermalLoop {
    /// Assembles a loop at `location`.
    ///
    /// Heat sources and radiators may each be given as a single item, a list,
    /// or a map keyed by name.
    ///
    /// # Errors
    ///
    /// See [`ThermalLoop::with_config`].
    pub fn new(
        location: Location,
        heat_sources: impl Into<Members<HeatSource>>,
        radiators: impl Into<Members<Surface>>,
    ) -> Result<Self, ConfigError> {
        Self::with_config(location, heat_sources, radiators, LoopConfig::default())
    }

    /// Assembles a loop using an explicit solver configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Empty`] if there are no heat sources or no
    /// radiators, and [`ConfigError::Constraint`] if the configured maximum
    /// temperature is not strictly positive.
    pub fn with_config(
        location: Location,
        heat_sources: impl Into<Members<HeatSource>>,
        radiators: impl Into<Members<Surface>>,
        config: LoopConfig,
    ) -> Result<Self, ConfigError> {
        let heat_sources = heat_sources.into();
        let radiators = radiators.into();

        if heat_sources.is_empty() {
            return Err(ConfigError::Empty {
                what: "heat sources",
            });
        }
        if radiators.is_empty() {
            return Err(ConfigError::Empty { what: "radiators" });
        }
        StrictlyPositive::new(config.max_temperature.get::<kelvin>())
            .map_err(ConfigError::field("maximum loop temperature"))?;

        Ok(Self {
            location,
            heat_sources,
            radiators,
            config,
            solved: None,
        })
    }

    /// Cold-side temperature at equilibrium.
    ///
    /// Solves on first call and returns the cached value afterwards.
    ///
    /// # Errors
    ///
    /// See [`ThermalLoop::equilibrate`].
    pub fn cold_side_temperature(&mut self) -> Result<ThermodynamicTemperature, LoopError> {
        Ok(self.summary()?.cold_side_temperature)
    }

    /// Energy totals at equilibrium, solving first if needed.
    ///
    /// # Errors
    ///
    /// See [`ThermalLoop::equilibrate`].
    pub fn summary(&mut self) -> Result<LoopSummary, LoopError> {
        match self.solved {
            Some(summary) => Ok(summary),
            None => self.solve(),
        }
    }

    /// Solves for the cold-side temperature, replacing any cached value.
    ///
    /// # Errors
    ///
    /// Returns [`LoopError::Infeasible`] if the energy balance has the same
    /// sign at 0 K and at the upper bound, [`LoopError::Bisection`] if the
    /// solver fails, or [`LoopError::MaxIters`] if it does not converge.
    pub fn equilibrate(&mut self) -> Result<ThermodynamicTemperature, LoopError> {
        Ok(self.solve()?.cold_side_temperature)
    }

    /// Lowest hot-side temperature among the heat sources, capped by
    /// [`LoopConfig::max_temperature`].
    #[must_use]
    pub fn min_hot_side_temperature(&self) -> ThermodynamicTemperature {
        self.heat_sources
            .iter()
            .filter_map(HeatSource::hot_side_temperature)
            .fold(self.config.max_temperature, |min, t_h| {
                if t_h < min { t_h } else { min }
            })
    }

    /// Solar power absorbed by the radiators.
    #[must_use]
    pub fn solar_power(&self) -> Power {
        Power::new::<watt>(
            self.radiators
                .iter()
                .map(|r| r.solar_power_w(&self.location))
                .sum(),
        )
    }

    /// Energy totals at a candidate cold-side temperature, without solving.
    #[must_use]
    pub fn balance_at(&self, t_c: ThermodynamicTemperature) -> LoopSummary {
        self.model().evaluate(t_c)
    }

    /// Location shared by all members.
    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Solver configuration.
    #[must_use]
    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    /// Heat sources in the loop.
    #[must_use]
    pub fn heat_sources(&self) -> &Members<HeatSource> {
        &self.heat_sources
    }

    /// Mutable heat sources; call [`ThermalLoop::equilibrate`] after changes.
    pub fn heat_sources_mut(&mut self) -> &mut Members<HeatSource> {
        &mut self.heat_sources
    }

    /// Radiators in the loop.
    #[must_use]
    pub fn radiators(&self) -> &Members<Surface> {
        &self.radiators
    }

    /// Mutable radiators; call [`ThermalLoop::equilibrate`] after changes.
    pub fn radiators_mut(&mut self) -> &mut Members<Surface> {
        &mut self.radiators
    }

    fn model(&self) -> BalanceModel<'_> {
        BalanceModel::new(&self.heat_sources, &self.radiators, self.solar_power())
    }

    fn solve(&mut self) -> Result<LoopSummary, LoopError> {
        let t_max = self.min_hot_side_temperature();
        let t_min = ThermodynamicTemperature::new::<kelvin>(0.0);

        let summary = {
            let model = self.model();

            let residual_at_zero = model.evaluate(t_min).residual();
            let residual_at_max = model.evaluate(t_max).residual();

            tracing::debug!(
                max_temperature_kelvin = t_max.get::<kelvin>(),
                residual_at_zero_w = residual_at_zero.get::<watt>(),
                residual_at_max_w = residual_at_max.get::<watt>(),
                "solving thermal loop equilibrium"
            );

            let r0 = residual_at_zero.get::<watt>();
            let r1 = residual_at_max.get::<watt>();
            if (r0 < 0.0 && r1 < 0.0) || (r0 > 0.0 && r1 > 0.0) {
                return Err(LoopError::Infeasible {
                    max_temperature: t_max,
                    residual_at_zero,
                    residual_at_max,
                });
            }

            let solution = bisection::solve(
                &model,
                &BalanceProblem,
                [t_min.get::<kelvin>(), t_max.get::<kelvin>()],
                &self.config.bisection(),
                |_event: &bisection::Event<'_, _, _>| None,
            )?;

            if solution.status != bisection::Status::Converged {
                return Err(LoopError::MaxIters {
                    residual: Power::new::<watt>(solution.residual),
                    iters: solution.iters,
                });
            }

            tracing::debug!(iters = solution.iters, "thermal loop bisection finished");
            solution.snapshot.output
        };

        let t_c = summary.cold_side_temperature;
        for radiator in self.radiators.iter_mut() {
            radiator.stamp(t_c);
        }
        for source in self.heat_sources.iter_mut() {
            source.stamp(t_c);
        }
        self.solved = Some(summary);

        tracing::info!(
            t_c_kelvin = t_c.get::<kelvin>(),
            residual_w = summary.residual().get::<watt>(),
            "thermal loop converged"
        );

        Ok(summary)
    }
}

impl fmt::Display for ThermalLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "heat sources:")?;
        for (i, (name, source)) in self.heat_sources.entries().enumerate() {
            if i > 0 {
                write!(f, "\n\n")?;
            }
            if let Some(name) = name {
                writeln!(f, "{name}:")?;
            }
            write!(f, "{source}")?;
        }

        write!(f, "\n\nradiators:")?;
        for (name, radiator) in self.radiators.entries() {
            match name {
                Some(name) => write!(f, "\n{name}: {radiator}")?,
                None => write!(f, "\n{radiator}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeMap;

    use approx::assert_relative_eq;
    use uom::si::{
        angle::degree,
        area::square_meter,
        f64::{Angle, Area, Length, TemperatureInterval},
        length::astronomical_unit,
        power::{kilowatt, megawatt},
        temperature_interval::kelvin as delta_kelvin,
        thermodynamic_temperature::degree_celsius,
    };

    use crate::models::thermal::{
        FixedHeatLoad, Photovoltaic, PhotovoltaicParams, Reactor, STEFAN_BOLTZMANN,
        SolarAbsorber, Turbine,
    };

    fn location(au: f64) -> Location {
        Location::new(Length::new::<astronomical_unit>(au)).unwrap()
    }

    fn load(kw: f64) -> HeatSource {
        FixedHeatLoad::new(Power::new::<kilowatt>(kw)).unwrap().into()
    }

    fn radiator(emission: f64, sun_facing: f64, emissivity: f64, absorptance: f64) -> Surface {
        Surface::builder(
            Area::new::<square_meter>(emission),
            Area::new::<square_meter>(sun_facing),
        )
        .emissivity(emissivity)
        .absorptance(absorptance)
        .angle_to_sun(Angle::new::<degree>(90.0))
        .build()
        .unwrap()
    }

    fn operational_radiator() -> Surface {
        Surface::builder(
            Area::new::<square_meter>(2000.0),
            Area::new::<square_meter>(1000.0),
        )
        .emissivity(0.92)
        .absorptance(0.12)
        .angle_to_sun(Angle::new::<degree>(90.0))
        .temperature_offset(TemperatureInterval::new::<delta_kelvin>(-20.0))
        .build()
        .unwrap()
    }

    #[test]
    fn operational_loop_of_fixed_loads() {
        let mut thermal_loop = ThermalLoop::new(
            location(0.25),
            vec![load(100.0), load(200.0)],
            operational_radiator(),
        )
        .unwrap();

        let t_c = thermal_loop.equilibrate().unwrap().get::<kelvin>();
        let expected = 20.0 + (300e3 / (0.92 * STEFAN_BOLTZMANN * 2000.0)).powf(0.25);
        assert_relative_eq!(t_c, expected, max_relative = 1e-3);
        assert_relative_eq!(t_c, 251.6, epsilon = 0.3);

        let radiator_t = thermal_loop.radiators().iter().next().unwrap().temperature();
        assert_relative_eq!(radiator_t.unwrap().get::<kelvin>(), t_c - 20.0, epsilon = 1e-9);
        for source in thermal_loop.heat_sources().iter() {
            assert_eq!(source.cold_side_temperature().unwrap().get::<kelvin>(), t_c);
        }
    }

    #[test]
    fn converged_balance_conserves_energy() {
        let mut thermal_loop = ThermalLoop::new(
            location(0.25),
            vec![load(100.0), load(200.0)],
            operational_radiator(),
        )
        .unwrap();

        let summary = thermal_loop.summary().unwrap();
        let t_c = summary.cold_side_temperature.get::<kelvin>();

        // A temperature error of `dt` moves the residual by roughly `dQ/dT * dt`.
        let slope = 4.0 * 0.92 * STEFAN_BOLTZMANN * 2000.0 * (t_c - 20.0).powi(3);
        let allowed = slope * thermal_loop.config().temp_rel_tol * t_c;
        assert!(summary.residual().get::<watt>().abs() <= allowed);
        assert_relative_eq!(summary.waste_heat.get::<kilowatt>(), 300.0, epsilon = 1e-9);
        assert_relative_eq!(summary.useful_power.get::<watt>(), 0.0);
    }

    #[test]
    fn cached_temperature_is_reused() {
        let mut thermal_loop =
            ThermalLoop::new(location(1.0), load(50.0), radiator(400.0, 200.0, 0.8, 0.2))
                .unwrap();

        let first = thermal_loop.cold_side_temperature().unwrap();
        let second = thermal_loop.cold_side_temperature().unwrap();
        assert_eq!(first.get::<kelvin>().to_bits(), second.get::<kelvin>().to_bits());

        let again = thermal_loop.equilibrate().unwrap();
        assert_eq!(first.get::<kelvin>().to_bits(), again.get::<kelvin>().to_bits());
    }

    #[test]
    fn equilibrate_picks_up_member_changes() {
        let mut thermal_loop = ThermalLoop::new(
            location(1.0),
            Members::new().with_named("habitat", load(50.0)),
            radiator(400.0, 200.0, 0.8, 0.2),
        )
        .unwrap();

        let before = thermal_loop.cold_side_temperature().unwrap();

        *thermal_loop.heat_sources_mut().get_mut("habitat").unwrap() = load(150.0);
        assert_eq!(thermal_loop.cold_side_temperature().unwrap(), before);

        let after = thermal_loop.equilibrate().unwrap();
        assert!(after > before);
        assert_eq!(thermal_loop.cold_side_temperature().unwrap(), after);
    }

    #[test]
    fn larger_radiator_runs_cooler() {
        let solve = |emission_area, emissivity| {
            ThermalLoop::new(
                location(1.0),
                load(80.0),
                radiator(emission_area, 100.0, emissivity, 0.1),
            )
            .unwrap()
            .equilibrate()
            .unwrap()
        };

        assert!(solve(800.0, 0.8) < solve(400.0, 0.8));
        assert!(solve(400.0, 0.9) < solve(400.0, 0.5));
    }

    #[test]
    fn undersized_radiator_below_hot_side_is_infeasible() {
        let turbine = Turbine::new(
            Power::new::<watt>(100.0),
            ThermodynamicTemperature::new::<kelvin>(600.0),
        )
        .unwrap();
        let tiny = Surface::builder(
            Area::new::<square_meter>(0.01),
            Area::new::<square_meter>(0.01),
        )
        .emissivity(0.01)
        .build()
        .unwrap();

        let mut thermal_loop =
            ThermalLoop::new(location(1.0), HeatSource::from(turbine), tiny).unwrap();
        let err = thermal_loop.equilibrate().unwrap_err();

        let LoopError::Infeasible {
            max_temperature, ..
        } = &err
        else {
            panic!("expected an infeasible loop, got {err:?}");
        };
        assert_relative_eq!(max_temperature.get::<kelvin>(), 600.0);
        assert!(err.to_string().contains("larger, more emissive, or less absorptive"));

        for radiator in thermal_loop.radiators().iter() {
            assert!(radiator.temperature().is_none());
        }
    }

    #[test]
    fn undersized_radiator_below_cap_is_infeasible() {
        let tiny = Surface::builder(
            Area::new::<square_meter>(0.01),
            Area::new::<square_meter>(0.01),
        )
        .emissivity(0.01)
        .build()
        .unwrap();
        let config = LoopConfig {
            max_temperature: ThermodynamicTemperature::new::<kelvin>(1000.0),
            ..LoopConfig::default()
        };

        let mut thermal_loop = ThermalLoop::with_config(
            location(1.0),
            HeatSource::from(FixedHeatLoad::new(Power::new::<watt>(100.0)).unwrap()),
            tiny,
            config,
        )
        .unwrap();

        assert!(matches!(
            thermal_loop.equilibrate(),
            Err(LoopError::Infeasible { .. })
        ));
    }

    #[test]
    fn bound_is_lowest_hot_side() {
        let thermal_loop = ThermalLoop::new(
            location(1.0),
            vec![
                load(1.0),
                Reactor::from_catalogue("fission_frontiers", "lindworm")
                    .unwrap()
                    .into(),
                Reactor::from_catalogue("fission_frontiers", "wyvern")
                    .unwrap()
                    .into(),
            ],
            radiator(1.0, 1.0, 0.5, 0.5),
        )
        .unwrap();
        assert_relative_eq!(thermal_loop.min_hot_side_temperature().get::<kelvin>(), 600.0);

        let loads_only =
            ThermalLoop::new(location(1.0), load(1.0), radiator(1.0, 1.0, 0.5, 0.5)).unwrap();
        assert_relative_eq!(
            loads_only.min_hot_side_temperature().get::<kelvin>(),
            10_000.0
        );
    }

    #[test]
    fn reactor_and_absorber_share_radiators() {
        let loc = location(0.25);

        let reactor = Reactor::from_catalogue("fission_frontiers", "wyvern").unwrap();
        let plate = |area: f64, angle: f64| {
            Surface::builder(
                Area::new::<square_meter>(area),
                Area::new::<square_meter>(area),
            )
            .emissivity(0.12)
            .absorptance(0.96)
            .angle_to_sun(Angle::new::<degree>(angle))
            .build()
            .unwrap()
        };
        let absorber = SolarAbsorber::new(
            &loc,
            Power::new::<megawatt>(1.0),
            vec![plate(1000.0, 25.0), plate(200.0, 20.0)],
        )
        .unwrap();

        let side = |angle: f64| {
            Surface::builder(
                Area::new::<square_meter>(2.0 * 800.0 * 800.0),
                Area::new::<square_meter>(800.0 * 800.0),
            )
            .emissivity(0.9)
            .absorptance(0.09)
            .angle_to_sun(Angle::new::<degree>(angle))
            .temperature_offset(TemperatureInterval::new::<delta_kelvin>(-20.0))
            .build()
            .unwrap()
        };
        let radiators = vec![
            radiator(2.0e6, 1.0e6, 0.9, 0.09),
            side(70.0),
            side(70.0),
        ];

        let mut thermal_loop = ThermalLoop::new(
            loc,
            BTreeMap::from([
                ("reactor".to_owned(), HeatSource::from(reactor)),
                ("solar thermal".to_owned(), HeatSource::from(absorber)),
            ]),
            radiators,
        )
        .unwrap();

        let summary = thermal_loop.summary().unwrap();
        let t_c = summary.cold_side_temperature;
        assert!(t_c > ThermodynamicTemperature::new::<kelvin>(0.0));
        assert!(t_c < ThermodynamicTemperature::new::<kelvin>(600.0));
        assert!(summary.useful_power > Power::new::<watt>(0.0));

        let reactor = thermal_loop.heat_sources().get("reactor").unwrap();
        let total = reactor.waste_heat().unwrap() + reactor.useful_power().unwrap();
        assert_relative_eq!(total.get::<megawatt>(), 250.0, max_relative = 1e-12);

        let rendered = thermal_loop.to_string();
        assert!(rendered.starts_with("heat sources:\nreactor:\nCold-Side Temperature = "));
        assert!(rendered.contains("\n\nradiators:\nTemperature = "));
    }

    #[test]
    fn photovoltaic_with_active_cooling() {
        let loc = location(0.25);

        let mut panel = Surface::builder(
            Area::new::<square_meter>(200.0),
            Area::new::<square_meter>(100.0),
        )
        .emissivity(0.92)
        .absorptance(0.12)
        .build()
        .unwrap();
        let params = PhotovoltaicParams {
            eta_lab: 0.33,
            reference_temperature: ThermodynamicTemperature::new::<degree_celsius>(25.0),
            age_years: 0.0,
        };
        let pv = Photovoltaic::new(&loc, params, [&mut panel]).unwrap();
        let cooler = Surface::builder(
            Area::new::<square_meter>(2000.0),
            Area::new::<square_meter>(1000.0),
        )
        .emissivity(0.78)
        .absorptance(0.78)
        .angle_to_sun(Angle::new::<degree>(90.0))
        .temperature_offset(TemperatureInterval::new::<delta_kelvin>(-10.0))
        .build()
        .unwrap();

        let mut thermal_loop =
            ThermalLoop::new(loc, HeatSource::from(pv), vec![panel, cooler]).unwrap();
        let summary = thermal_loop.summary().unwrap();

        let panel = thermal_loop.radiators().iter().next().unwrap();
        assert_relative_eq!(panel.absorptance(), 0.0);
        assert_eq!(panel.temperature(), Some(summary.cold_side_temperature));

        let incident = 22_091.68 * 100.0;
        let delivered = summary.useful_power + summary.waste_heat;
        assert!(delivered.get::<watt>() <= incident);

        let source = thermal_loop.heat_sources().iter().next().unwrap();
        assert!(source.to_string().starts_with("Cell Temperature = "));
    }

    #[test]
    fn rejects_empty_members() {
        assert!(matches!(
            ThermalLoop::new(
                location(1.0),
                Vec::<HeatSource>::new(),
                radiator(1.0, 1.0, 0.5, 0.5)
            ),
            Err(ConfigError::Empty { .. })
        ));
        assert!(matches!(
            ThermalLoop::new(location(1.0), load(1.0), Vec::<Surface>::new()),
            Err(ConfigError::Empty { .. })
        ));
    }
}
