//! Constants module for astronomical calculations

use std::f64::consts::PI;

// Dynamics
/// Gaussian gravitational constant, radians per day for a 1 AU orbit
pub const K: f64 = 0.017_202_098_95;
/// Mean orbital speed for a 1 AU orbit, km/s (Meeus 33.5)
pub const MEAN_ORBITAL_SPEED: f64 = 29.7847;
/// Coefficient of the vis-viva speed formula in km/s (Meeus 33.4)
pub const VIS_VIVA_SPEED: f64 = 42.1219;

// Time constants
/// J2000.0 epoch as Julian date
pub const J2000: f64 = 2_451_545.0;
/// Julian century in days
pub const JULIAN_CENTURY: f64 = 36_525.0;
/// Julian millennium in days, the time unit of VSOP87
pub const JULIAN_MILLENNIUM: f64 = 365_250.0;

// Angles
/// Arcseconds to radians conversion factor
pub const ASEC2RAD: f64 = 4.848_136_811_095_36e-6;
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;
/// Tau (2*PI) for full circle
pub const TAU: f64 = 2.0 * PI;
