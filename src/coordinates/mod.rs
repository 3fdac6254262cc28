//! Angle reduction and the small coordinate types used by the series and
//! event modules.
//!
//! All angles are radians. Frames are not tracked here: a [`Spherical`]
//! position is whatever frame the series table it came from was built for.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::constants::{DEG2RAD, TAU};

/// Positive modulo: the result has the sign of `y`
///
/// `pmod(-1.0, 360.0) == 359.0`, unlike the `%` operator.
pub fn pmod(x: f64, y: f64) -> f64 {
    let r = x % y;
    if r < 0.0 {
        // r + y can round up to y itself for tiny negative r
        let wrapped = r + y;
        if wrapped >= y {
            0.0
        } else {
            wrapped
        }
    } else {
        r
    }
}

/// Reduce an angle to `(-π, π]`
pub fn wrap_angle(angle: f64) -> f64 {
    let a = pmod(angle, TAU);
    if a > PI {
        a - TAU
    } else {
        a
    }
}

/// Spherical position: longitude, latitude and range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spherical {
    /// Longitude in radians, `[0, 2π)` when produced by this crate
    pub lon: f64,
    /// Latitude in radians
    pub lat: f64,
    /// Distance, in the unit of the source (AU for the bundled tables)
    pub range: f64,
}

impl Spherical {
    pub fn new(lon: f64, lat: f64, range: f64) -> Self {
        Spherical { lon, lat, range }
    }

    /// Rectangular coordinates in the same frame
    ///
    /// - `x = r cos(lat) cos(lon)`
    /// - `y = r cos(lat) sin(lon)`
    /// - `z = r sin(lat)`
    pub fn to_rectangular(&self) -> Vector3<f64> {
        let (sin_lon, cos_lon) = self.lon.sin_cos();
        let (sin_lat, cos_lat) = self.lat.sin_cos();
        Vector3::new(
            self.range * cos_lat * cos_lon,
            self.range * cos_lat * sin_lon,
            self.range * sin_lat,
        )
    }

    /// Inverse of [`Spherical::to_rectangular`], longitude in `[0, 2π)`
    pub fn from_rectangular(v: &Vector3<f64>) -> Self {
        let range = v.norm();
        if range == 0.0 {
            return Spherical::new(0.0, 0.0, 0.0);
        }
        let lon = if v.x == 0.0 && v.y == 0.0 {
            0.0
        } else {
            pmod(v.y.atan2(v.x), TAU)
        };
        Spherical::new(lon, (v.z / range).asin(), range)
    }
}

/// Equatorial direction (right ascension and declination)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Equatorial {
    /// Right ascension in radians
    pub ra: f64,
    /// Declination in radians
    pub dec: f64,
}

impl Equatorial {
    pub fn new(ra: f64, dec: f64) -> Self {
        Equatorial { ra, dec }
    }

    /// Create a new Equatorial coordinate with values in degrees
    pub fn from_degrees(ra_deg: f64, dec_deg: f64) -> Self {
        Self::new(ra_deg * DEG2RAD, dec_deg * DEG2RAD)
    }

    /// Angular separation from another direction in radians
    pub fn angular_distance(&self, other: &Equatorial) -> f64 {
        let a = Spherical::new(self.ra, self.dec, 1.0).to_rectangular();
        let b = Spherical::new(other.ra, other.dec, 1.0).to_rectangular();
        // atan2 form stays accurate for tiny and near-π separations
        a.cross(&b).norm().atan2(a.dot(&b))
    }
}
