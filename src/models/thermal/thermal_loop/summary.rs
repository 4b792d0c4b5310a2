use std::fmt;

use uom::si::{
    f64::{Power, ThermodynamicTemperature},
    power::watt,
    thermodynamic_temperature::kelvin,
};

/// Loop energy totals evaluated at one cold-side temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopSummary {
    /// Temperature the totals were evaluated at.
    pub cold_side_temperature: ThermodynamicTemperature,

    /// Power radiated by all radiators.
    pub emitted_power: Power,

    /// Waste heat rejected by all heat sources.
    pub waste_heat: Power,

    /// Solar power absorbed by all radiators.
    pub solar_power: Power,

    /// Useful power delivered by all heat sources.
    pub useful_power: Power,
}

impl LoopSummary {
    /// Energy balance residual, `emitted - waste - solar`.
    ///
    /// Zero at equilibrium.
    #[must_use]
    pub fn residual(&self) -> Power {
        self.emitted_power - self.waste_heat - self.solar_power
    }
}

impl fmt::Display for LoopSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Cold-Side Temperature = {:.1} K",
            self.cold_side_temperature.get::<kelvin>()
        )?;
        writeln!(f, "Emitted Power = {:.1} W", self.emitted_power.get::<watt>())?;
        writeln!(f, "Waste Heat = {:.1} W", self.waste_heat.get::<watt>())?;
        writeln!(f, "Solar Power = {:.1} W", self.solar_power.get::<watt>())?;
        write!(f, "Useful Power = {:.1} W", self.useful_power.get::<watt>())
    }
}
