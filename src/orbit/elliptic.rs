//! Elliptical orbits
//!
//! Mean anomaly grows linearly with time; Kepler's equation gives the
//! eccentric anomaly, from which true anomaly and radius follow in closed
//! form. Also hosts the orbital speed and orbit length formulas of Meeus
//! chapter 33.

use super::{AnomalyDistance, AnomalyDistanceModel};
use crate::constants::{K, MEAN_ORBITAL_SPEED, TAU, VIS_VIVA_SPEED};
use crate::coordinates::pmod;
use crate::errors::{AstroError, Result};
use crate::kepler::{self, KeplerStrategy};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Decimal places used when solving Kepler's equation by default
pub const DEFAULT_PLACES: u32 = 12;

/// Keplerian elements needed for anomaly and distance in an elliptical orbit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EllipticalElements {
    /// Semimajor axis `a` in AU
    pub axis: f64,
    /// Eccentricity `e`, in `[0, 1)`
    pub eccentricity: f64,
    /// Time of perihelion passage `T`, JDE
    pub time_perihelion: f64,
}

impl EllipticalElements {
    /// Create a new set of elliptical elements
    ///
    /// # Errors
    ///
    /// [`AstroError::PreconditionViolation`] unless `axis > 0` and
    /// `0 ≤ eccentricity < 1`.
    pub fn new(axis: f64, eccentricity: f64, time_perihelion: f64) -> Result<Self> {
        if !(axis > 0.0) {
            return Err(AstroError::PreconditionViolation(format!(
                "semimajor axis must be positive, got {}",
                axis
            )));
        }
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(AstroError::PreconditionViolation(format!(
                "elliptical orbit needs eccentricity in [0, 1), got {}",
                eccentricity
            )));
        }
        Ok(Self {
            axis,
            eccentricity,
            time_perihelion,
        })
    }

    /// Mean daily motion `n` in radians per day
    pub fn mean_motion(&self) -> f64 {
        K / (self.axis * self.axis.sqrt())
    }

    /// Orbital period in days
    pub fn period(&self) -> f64 {
        TAU / self.mean_motion()
    }

    /// Perihelion distance `q = a(1 − e)`
    pub fn perihelion_distance(&self) -> f64 {
        self.axis * (1.0 - self.eccentricity)
    }

    /// Aphelion distance `Q = a(1 + e)`
    pub fn aphelion_distance(&self) -> f64 {
        self.axis * (1.0 + self.eccentricity)
    }

    /// Mean anomaly at the given time, reduced to `[0, 2π)`
    pub fn mean_anomaly(&self, jde: f64) -> f64 {
        pmod(self.mean_motion() * (jde - self.time_perihelion), TAU)
    }

    /// True anomaly and distance, solving Kepler's equation with the given strategy
    ///
    /// # Errors
    ///
    /// Whatever the selected Kepler strategy reports, typically
    /// [`AstroError::NonConvergence`] for a strategy that diverges.
    pub fn anomaly_distance_with(
        &self,
        jde: f64,
        strategy: KeplerStrategy,
        places: u32,
    ) -> Result<AnomalyDistance> {
        let e = self.eccentricity;
        // Centre M on perihelion so that E stays small where 1 − e·cos E is small
        let m = pmod(self.mean_anomaly(jde) + PI, TAU) - PI;
        let ea = kepler::solve_kepler(strategy, e, m, places)?;

        Ok(AnomalyDistance {
            true_anomaly: pmod(kepler::true_anomaly(e, ea), TAU),
            distance: kepler::radius(e, ea, self.axis),
        })
    }
}

impl AnomalyDistanceModel for EllipticalElements {
    fn anomaly_distance(&self, jde: f64) -> Result<AnomalyDistance> {
        self.anomaly_distance_with(jde, KeplerStrategy::default(), DEFAULT_PLACES)
    }
}

/// Instantaneous speed of a body in an elliptical orbit around the Sun
///
/// # Arguments
///
/// * `a` - Semimajor axis in AU
/// * `r` - Instantaneous distance to the Sun in AU
///
/// # Returns
///
/// Speed in km/s
pub fn velocity(a: f64, r: f64) -> f64 {
    VIS_VIVA_SPEED * (1.0 / r - 0.5 / a).sqrt()
}

/// Speed of a body at perihelion in km/s
pub fn velocity_perihelion(a: f64, e: f64) -> f64 {
    MEAN_ORBITAL_SPEED / a.sqrt() * ((1.0 + e) / (1.0 - e)).sqrt()
}

/// Speed of a body at aphelion in km/s
pub fn velocity_aphelion(a: f64, e: f64) -> f64 {
    MEAN_ORBITAL_SPEED / a.sqrt() * ((1.0 - e) / (1.0 + e)).sqrt()
}

/// Ramanujan's approximation for the length of an elliptical orbit
///
/// Result is in the unit of the semimajor axis.
pub fn length_ramanujan(a: f64, e: f64) -> f64 {
    let b = a * (1.0 - e * e).sqrt();
    PI * (3.0 * (a + b) - ((a + 3.0 * b) * (3.0 * a + b)).sqrt())
}

/// Alternate approximation for the length of an elliptical orbit, from the
/// arithmetic, geometric and harmonic means of the axes
pub fn length_mean(a: f64, e: f64) -> f64 {
    let b = a * (1.0 - e * e).sqrt();
    let arithmetic = 0.5 * (a + b);
    let geometric = (a * b).sqrt();
    let harmonic = 2.0 * a * b / (a + b);
    0.125 * PI * (21.0 * arithmetic - 2.0 * geometric - 3.0 * harmonic)
}

/// Length of an elliptical orbit from the Gauss-Kummer series
///
/// The series is summed until terms no longer change the result.
pub fn length_exact(a: f64, e: f64) -> f64 {
    let b = a * (1.0 - e * e).sqrt();
    let h = ((a - b) / (a + b)).powi(2);

    // Σ binom(1/2, n)² hⁿ
    let mut binomial = 1.0;
    let mut power = 1.0;
    let mut sum = 1.0;
    for n in 1..10_000 {
        let n = n as f64;
        binomial *= (1.5 - n) / n;
        power *= h;
        let term = binomial * binomial * power;
        if term <= f64::EPSILON * sum {
            break;
        }
        sum += term;
    }
    PI * (a + b) * sum
}
