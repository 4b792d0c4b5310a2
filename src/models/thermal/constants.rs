/// Stefan–Boltzmann constant, W/m²·K⁴.
pub const STEFAN_BOLTZMANN: f64 = 5.670_374_419e-8;

/// Solar flux at one astronomical unit, W/m².
pub const SOLAR_CONSTANT_AT_1_AU: f64 = 1380.73;
