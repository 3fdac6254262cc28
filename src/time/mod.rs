//! Time arguments derived from Julian Ephemeris Days
//!
//! The core works on plain JDE values. Calendar conversions are left to the
//! caller; this module only provides the linear time arguments the theories
//! are expressed in.

use crate::constants::{J2000, JULIAN_CENTURY};

/// Number of Julian centuries since J2000.0
///
/// The quantity appears as `T` in a number of time series.
pub fn j2000_century(jde: f64) -> f64 {
    (jde - J2000) / JULIAN_CENTURY
}
