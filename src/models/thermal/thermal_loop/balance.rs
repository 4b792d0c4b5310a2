//! Energy balance formulation for the loop cold-side temperature.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};
use uom::si::{
    f64::{Power, ThermodynamicTemperature},
    power::watt,
    thermodynamic_temperature::kelvin,
};

use crate::{
    models::thermal::{HeatSource, Surface},
    support::members::Members,
};

use super::LoopSummary;

/// Evaluates every energy term of the loop at a candidate cold-side temperature.
pub(super) struct BalanceModel<'a> {
    heat_sources: &'a Members<HeatSource>,
    radiators: &'a Members<Surface>,
    solar_power: Power,
}

impl<'a> BalanceModel<'a> {
    pub(super) fn new(
        heat_sources: &'a Members<HeatSource>,
        radiators: &'a Members<Surface>,
        solar_power: Power,
    ) -> Self {
        Self {
            heat_sources,
            radiators,
            solar_power,
        }
    }

    pub(super) fn evaluate(&self, t_c: ThermodynamicTemperature) -> LoopSummary {
        let t = t_c.get::<kelvin>();

        let emitted: f64 = self.radiators.iter().map(|r| r.radiated_power_w(t)).sum();
        let (waste, useful) = self
            .heat_sources
            .iter()
            .fold((0.0, 0.0), |(waste, useful), source| {
                (
                    waste + source.waste_heat_at(t_c).get::<watt>(),
                    useful + source.useful_power_at(t_c).map_or(0.0, |w| w.get::<watt>()),
                )
            });

        LoopSummary {
            cold_side_temperature: t_c,
            emitted_power: Power::new::<watt>(emitted),
            waste_heat: Power::new::<watt>(waste),
            solar_power: self.solar_power,
            useful_power: Power::new::<watt>(useful),
        }
    }
}

impl Model for BalanceModel<'_> {
    type Input = ThermodynamicTemperature;
    type Output = LoopSummary;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(self.evaluate(*input))
    }
}

/// Residual `emitted - waste - solar`, positive when the radiators run too hot.
pub(super) struct BalanceProblem;

impl EquationProblem<1> for BalanceProblem {
    type Input = ThermodynamicTemperature;
    type Output = LoopSummary;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(ThermodynamicTemperature::new::<kelvin>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.residual().get::<watt>()])
    }
}
