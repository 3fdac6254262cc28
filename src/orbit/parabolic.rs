//! Parabolic orbits
//!
//! For `e = 1` Barker's equation `W = s³ + 3s` with `s = tan(ν/2)` has a
//! closed-form solution, so no iteration is needed (Meeus chapter 34).

use super::{AnomalyDistance, AnomalyDistanceModel};
use crate::constants::{K, TAU};
use crate::coordinates::pmod;
use crate::errors::{AstroError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::SQRT_2;

/// Elements needed for true anomaly and distance in a parabolic orbit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParabolicElements {
    /// Time of perihelion passage `T`, JDE
    pub time_perihelion: f64,
    /// Perihelion distance `q` in AU
    pub perihelion_distance: f64,
}

impl ParabolicElements {
    /// Create a new set of parabolic elements
    ///
    /// # Errors
    ///
    /// [`AstroError::PreconditionViolation`] unless the perihelion distance is positive.
    pub fn new(time_perihelion: f64, perihelion_distance: f64) -> Result<Self> {
        if !(perihelion_distance > 0.0) {
            return Err(AstroError::PreconditionViolation(format!(
                "perihelion distance must be positive, got {}",
                perihelion_distance
            )));
        }
        Ok(Self {
            time_perihelion,
            perihelion_distance,
        })
    }

    /// Solution `s = tan(ν/2)` of Barker's equation at the given time
    pub fn barker(&self, jde: f64) -> f64 {
        let q = self.perihelion_distance;
        let w = 3.0 * K / SQRT_2 * (jde - self.time_perihelion) / (q * q.sqrt());
        let g = 0.5 * w;
        let y = (g + (g * g + 1.0).sqrt()).cbrt();
        y - 1.0 / y
    }
}

impl AnomalyDistanceModel for ParabolicElements {
    fn anomaly_distance(&self, jde: f64) -> Result<AnomalyDistance> {
        let s = self.barker(jde);
        Ok(AnomalyDistance {
            true_anomaly: pmod(2.0 * s.atan(), TAU),
            distance: self.perihelion_distance * (1.0 + s * s),
        })
    }
}
