//! Solar-thermal absorber: a sunlit plate driving a heat engine.
//!
//! The absorber's hot-side temperature is not given; it is the temperature at
//! which the absorber surfaces' radiated power balances the absorbed solar
//! power and the power extracted to drive the engine:
//!
//! ```text
//! Q_emitted(T_H) − Q_extracted − Q_solar = 0
//! ```
//!
//! `Q_emitted` is quartic in `T_H`, so the balance is solved with a Newton
//! iteration seeded at [`AbsorberConfig::initial_guess`].

mod config;
mod error;
mod newton;

pub use config::AbsorberConfig;
pub use error::AbsorberError;

use uom::si::{
    f64::{Power, ThermodynamicTemperature},
    power::watt,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    constraint::{Constrained, NonNegative},
    members::Members,
};

use super::{ConfigError, HeatSourceModel, Location, Surface, Turbine};

/// A solar absorber feeding a heat engine.
///
/// Construction solves the absorber equilibrium, so a successfully built
/// absorber always knows its hot-side temperature.
/// Afterwards it behaves as a [`Turbine`] whose thermal power is the total
/// extraction and whose hot side is the solved temperature.
#[derive(Debug, Clone)]
pub struct SolarAbsorber {
    turbine: Turbine,
    demands: Members<Power>,
    surfaces: Members<Surface>,
    incident_power: Power,
    emitted_power: Power,
    iters: usize,
}

impl SolarAbsorber {
    /// Builds an absorber and solves for its hot-side temperature.
    ///
    /// `extraction` is the power pulled from the absorber, given as a single
    /// value or as a list or map of individual demands that are summed.
    ///
    /// # Errors
    ///
    /// See [`SolarAbsorber::with_config`].
    pub fn new(
        location: &Location,
        extraction: impl Into<Members<Power>>,
        surfaces: impl Into<Members<Surface>>,
    ) -> Result<Self, AbsorberError> {
        Self::with_config(location, extraction, surfaces, AbsorberConfig::default())
    }

    /// Builds an absorber using an explicit solver configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AbsorberError::Config`] if a demand is negative, there are no
    /// surfaces, or the total extraction exceeds the absorbed solar power.
    /// These checks run before any iteration.
    ///
    /// Returns another [`AbsorberError`] variant if the iteration fails or
    /// converges to a non-physical temperature.
    pub fn with_config(
        location: &Location,
        extraction: impl Into<Members<Power>>,
        surfaces: impl Into<Members<Surface>>,
        config: AbsorberConfig,
    ) -> Result<Self, AbsorberError> {
        let demands = extraction.into();
        let mut surfaces = surfaces.into();

        let extracted = demands
            .iter()
            .map(|&demand| NonNegative::new(demand))
            .collect::<Result<Vec<_>, _>>()
            .map_err(ConfigError::field("extraction"))?
            .into_iter()
            .sum::<Constrained<Power, NonNegative>>()
            .into_inner();

        if surfaces.is_empty() {
            return Err(ConfigError::Empty {
                what: "absorber surfaces",
            }
            .into());
        }

        let q_solar_w: f64 = surfaces.iter().map(|s| s.solar_power_w(location)).sum();
        let q_extracted_w = extracted.get::<watt>();

        if q_extracted_w > q_solar_w {
            return Err(ConfigError::ExtractionExceedsSolarInput {
                extracted,
                available: Power::new::<watt>(q_solar_w),
            }
            .into());
        }

        tracing::debug!(
            q_solar_w,
            q_extracted_w,
            surfaces = surfaces.len(),
            "solving solar absorber equilibrium"
        );

        let balance = |t_h: f64| {
            let (emitted, slope) = surfaces.iter().fold((0.0, 0.0), |(q, dq), s| {
                (q + s.radiated_power_w(t_h), dq + s.radiated_power_slope_w(t_h))
            });
            (emitted - q_extracted_w - q_solar_w, slope)
        };

        let solution = newton::solve(
            balance,
            config.initial_guess.get::<kelvin>(),
            config.temp_tol.get::<delta_kelvin>(),
            config.max_iters,
        )
        .map_err(|failure| match failure {
            newton::Failure::ZeroSlope { x } => AbsorberError::ZeroSlope {
                temperature: ThermodynamicTemperature::new::<kelvin>(x),
            },
            newton::Failure::NonFinite { x } => AbsorberError::Diverged {
                temperature: ThermodynamicTemperature::new::<kelvin>(x),
            },
            newton::Failure::MaxIters { x, residual, iters } => AbsorberError::MaxIters {
                temperature: ThermodynamicTemperature::new::<kelvin>(x),
                residual: Power::new::<watt>(residual),
                iters,
            },
        })?;

        let t_h = ThermodynamicTemperature::new::<kelvin>(solution.x);
        if solution.x <= 0.0 {
            return Err(AbsorberError::NonPhysicalTemperature { temperature: t_h });
        }

        let emitted_w: f64 = surfaces.iter().map(|s| s.radiated_power_w(solution.x)).sum();
        for surface in surfaces.iter_mut() {
            surface.set_temperature(t_h);
        }

        tracing::info!(
            t_h_kelvin = solution.x,
            iters = solution.iters,
            residual_w = solution.residual,
            "solar absorber converged"
        );

        Ok(Self {
            turbine: Turbine::new(extracted, t_h)?,
            demands,
            surfaces,
            incident_power: Power::new::<watt>(q_solar_w),
            emitted_power: Power::new::<watt>(emitted_w),
            iters: solution.iters,
        })
    }

    /// Solved hot-side temperature.
    #[must_use]
    pub fn hot_side(&self) -> ThermodynamicTemperature {
        self.turbine.hot_side()
    }

    /// Total power extracted from the absorber.
    #[must_use]
    pub fn extraction(&self) -> Power {
        self.turbine.thermal_power()
    }

    /// Individual extraction demands, as supplied.
    #[must_use]
    pub fn demands(&self) -> &Members<Power> {
        &self.demands
    }

    /// Absorber surfaces, each recording the solved hot-side temperature.
    #[must_use]
    pub fn surfaces(&self) -> &Members<Surface> {
        &self.surfaces
    }

    /// Solar power absorbed by all surfaces.
    #[must_use]
    pub fn incident_power(&self) -> Power {
        self.incident_power
    }

    /// Power radiated by all surfaces at the solved temperature.
    #[must_use]
    pub fn emitted_power(&self) -> Power {
        self.emitted_power
    }

    /// Newton iterations used by the solve.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iters
    }

    /// The heat engine driven by this absorber.
    #[must_use]
    pub fn turbine(&self) -> &Turbine {
        &self.turbine
    }
}

impl HeatSourceModel for SolarAbsorber {
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
