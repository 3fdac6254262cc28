//! Periodic-term planetary theories (VSOP87 style)
//!
//! A theory gives each heliocentric coordinate as a polynomial in time whose
//! coefficients are sums of cosine terms:
//!
//! ```text
//! X(τ) = Σ_p τ^p · Σ_i A_i cos(B_i + C_i τ)
//! ```
//!
//! The terms are grouped by coordinate axis and by power of time in a
//! [`SeriesTable`]. Evaluation is a fixed, finite sum, so there is nothing to
//! converge and the same inputs always give bit-identical output.

pub mod earth;

use crate::constants::{ASEC2RAD, DEG2RAD, J2000, JULIAN_MILLENNIUM, TAU};
use crate::coordinates::{pmod, Spherical};
use crate::errors::{AstroError, Result};
use crate::interpolation::horner;
use crate::time::j2000_century;
use log::debug;
use serde::{Deserialize, Serialize};

/// Highest power of time a table may use
pub const MAX_POWER: usize = 5;

/// Coordinate axis of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Longitude,
    Latitude,
    Radius,
}

/// One periodic term `A cos(B + C τ)`
///
/// Serialized as the triple `[A, B, C]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct SeriesTerm {
    /// Amplitude `A`, in radians for angles or AU for the radius
    pub amplitude: f64,
    /// Phase `B` in radians
    pub phase: f64,
    /// Frequency `C` in radians per time unit
    pub frequency: f64,
}

impl SeriesTerm {
    pub const fn new(amplitude: f64, phase: f64, frequency: f64) -> Self {
        Self {
            amplitude,
            phase,
            frequency,
        }
    }

    /// Value of the term at time `tau`
    #[inline]
    pub fn at(&self, tau: f64) -> f64 {
        self.amplitude * (self.phase + self.frequency * tau).cos()
    }
}

impl From<[f64; 3]> for SeriesTerm {
    fn from(t: [f64; 3]) -> Self {
        SeriesTerm::new(t[0], t[1], t[2])
    }
}

impl From<SeriesTerm> for [f64; 3] {
    fn from(t: SeriesTerm) -> Self {
        [t.amplitude, t.phase, t.frequency]
    }
}

fn default_time_unit() -> f64 {
    JULIAN_MILLENNIUM
}

/// Terms of a theory grouped by axis and power of time
///
/// `longitude[p]` holds the terms multiplied by `τ^p`. The time argument is
/// `τ = (JDE − J2000) / time_unit`, Julian millennia unless the table says
/// otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesTable {
    pub longitude: Vec<Vec<SeriesTerm>>,
    pub latitude: Vec<Vec<SeriesTerm>>,
    pub radius: Vec<Vec<SeriesTerm>>,
    /// Length of the time unit in days
    #[serde(default = "default_time_unit")]
    pub time_unit: f64,
}

impl SeriesTable {
    /// Create a table counting time in Julian millennia
    ///
    /// # Errors
    ///
    /// [`AstroError::InvalidTable`] if an axis is empty, has more than
    /// `MAX_POWER + 1` groups, or contains a non-finite term.
    pub fn new(
        longitude: Vec<Vec<SeriesTerm>>,
        latitude: Vec<Vec<SeriesTerm>>,
        radius: Vec<Vec<SeriesTerm>>,
    ) -> Result<Self> {
        let table = Self {
            longitude,
            latitude,
            radius,
            time_unit: JULIAN_MILLENNIUM,
        };
        table.validate()?;
        Ok(table)
    }

    /// Use another time unit, e.g. Julian centuries for older theories
    pub fn with_time_unit(mut self, days: f64) -> Result<Self> {
        self.time_unit = days;
        self.validate()?;
        Ok(self)
    }

    /// Load a table from JSON
    ///
    /// Each axis is an array of power groups, each group an array of
    /// `[amplitude, phase, frequency]` triples.
    pub fn from_json(json: &str) -> Result<Self> {
        let table: SeriesTable = serde_json::from_str(json)
            .map_err(|e| AstroError::InvalidTable(format!("could not parse series table: {}", e)))?;
        table.validate()?;
        Ok(table)
    }

    /// Serialize the table to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| AstroError::InvalidTable(format!("could not serialize series table: {}", e)))
    }

    /// Check the shape of the table
    pub fn validate(&self) -> Result<()> {
        if !(self.time_unit.is_finite() && self.time_unit > 0.0) {
            return Err(AstroError::InvalidTable(format!(
                "time unit must be a positive number of days, got {}",
                self.time_unit
            )));
        }
        for axis in [Axis::Longitude, Axis::Latitude, Axis::Radius] {
            let groups = self.axis(axis);
            if groups.is_empty() {
                return Err(AstroError::InvalidTable(format!("{:?} has no terms", axis)));
            }
            if groups.len() > MAX_POWER + 1 {
                return Err(AstroError::InvalidTable(format!(
                    "{:?} uses power {} of time, the limit is {}",
                    axis,
                    groups.len() - 1,
                    MAX_POWER
                )));
            }
            let finite = groups.iter().flatten().all(|t| {
                t.amplitude.is_finite() && t.phase.is_finite() && t.frequency.is_finite()
            });
            if !finite {
                return Err(AstroError::InvalidTable(format!(
                    "{:?} contains a non-finite term",
                    axis
                )));
            }
        }
        Ok(())
    }

    /// Power groups for one axis
    pub fn axis(&self, axis: Axis) -> &[Vec<SeriesTerm>] {
        match axis {
            Axis::Longitude => &self.longitude,
            Axis::Latitude => &self.latitude,
            Axis::Radius => &self.radius,
        }
    }

    /// Number of terms over all axes and powers
    pub fn term_count(&self) -> usize {
        [&self.longitude, &self.latitude, &self.radius]
            .iter()
            .flat_map(|groups| groups.iter())
            .map(Vec::len)
            .sum()
    }

    /// Time argument τ for a Julian ephemeris day
    pub fn time_argument(&self, jde: f64) -> f64 {
        (jde - J2000) / self.time_unit
    }

    /// Evaluate one axis at time argument `tau`
    pub fn evaluate_axis(&self, axis: Axis, tau: f64) -> f64 {
        let mut sums = [0.0; MAX_POWER + 1];
        let groups = self.axis(axis);
        for (sum, terms) in sums.iter_mut().zip(groups) {
            *sum = terms.iter().map(|t| t.at(tau)).sum();
        }
        horner(tau, &sums[..groups.len().min(MAX_POWER + 1)])
    }
}

/// Heliocentric position from a series table
///
/// Longitude is reduced to `[0, 2π)`; latitude and radius are returned as
/// summed. The result is in the dynamical frame of the theory.
pub fn evaluate_series(table: &SeriesTable, jde: f64) -> Spherical {
    let tau = table.time_argument(jde);
    Spherical::new(
        pmod(table.evaluate_axis(Axis::Longitude, tau), TAU),
        table.evaluate_axis(Axis::Latitude, tau),
        table.evaluate_axis(Axis::Radius, tau),
    )
}

/// Reduce a VSOP87 longitude and latitude to the FK5 system (Meeus 32.3)
///
/// Returns the corrected `(longitude, latitude)`; the longitude is kept in
/// `[0, 2π)`.
pub fn to_fk5(lon: f64, lat: f64, jde: f64) -> (f64, f64) {
    let t = j2000_century(jde);
    let l_prime = lon - (1.397 * t + 0.00031 * t * t) * DEG2RAD;
    let (sin_l, cos_l) = l_prime.sin_cos();
    let d_lon = -0.09033 + 0.03916 * (cos_l + sin_l) * lat.tan();
    let d_lat = 0.03916 * (cos_l - sin_l);
    (pmod(lon + d_lon * ASEC2RAD, TAU), lat + d_lat * ASEC2RAD)
}

/// A named body with its series table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesBody {
    pub name: String,
    table: SeriesTable,
}

impl SeriesBody {
    /// Wrap a table, validating it first
    pub fn new(name: impl Into<String>, table: SeriesTable) -> Result<Self> {
        let name = name.into();
        table.validate()?;
        debug!(
            "series body {} with {} terms",
            name,
            table.term_count()
        );
        Ok(Self { name, table })
    }

    pub fn table(&self) -> &SeriesTable {
        &self.table
    }

    /// Heliocentric position in the dynamical frame of the theory
    pub fn position(&self, jde: f64) -> Spherical {
        evaluate_series(&self.table, jde)
    }

    /// Heliocentric position in the FK5 frame
    pub fn position_fk5(&self, jde: f64) -> Spherical {
        let p = self.position(jde);
        let (lon, lat) = to_fk5(p.lon, p.lat, jde);
        Spherical::new(lon, lat, p.range)
    }
}
