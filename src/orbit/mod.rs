//! Orbit position models
//!
//! Three orbit families share one capability: given a time, return the true
//! anomaly and heliocentric distance of the body. The caller picks the family
//! matching the body's eccentricity; nothing here switches models
//! automatically.
//!
//! - [`EllipticalElements`]: `e ∈ [0, 1)`, Kepler's equation (chapter 30)
//! - [`ParabolicElements`]: `e = 1`, Barker's equation in closed form (chapter 34)
//! - [`NearParabolicElements`]: `|e − 1| ≤ 0.1`, Landgraf's method (chapter 35)

pub mod elliptic;
pub mod near_parabolic;
pub mod parabolic;

pub use elliptic::EllipticalElements;
pub use near_parabolic::NearParabolicElements;
pub use parabolic::ParabolicElements;

use crate::errors::Result;
use serde::{Deserialize, Serialize};

/// True anomaly and radius vector of a body at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyDistance {
    /// True anomaly ν in radians, in `[0, 2π)`
    pub true_anomaly: f64,
    /// Distance from the Sun, in the unit of the elements (AU)
    pub distance: f64,
}

/// A model giving true anomaly and distance as a function of time
pub trait AnomalyDistanceModel {
    /// True anomaly and distance at the given Julian ephemeris day
    fn anomaly_distance(&self, jde: f64) -> Result<AnomalyDistance>;
}

/// Closed set of orbit families, dispatched explicitly by variant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Orbit {
    Elliptical(EllipticalElements),
    Parabolic(ParabolicElements),
    NearParabolic(NearParabolicElements),
}

impl Orbit {
    /// Time of perihelion passage, JDE
    pub fn time_perihelion(&self) -> f64 {
        match self {
            Orbit::Elliptical(el) => el.time_perihelion,
            Orbit::Parabolic(el) => el.time_perihelion,
            Orbit::NearParabolic(el) => el.time_perihelion,
        }
    }
}

impl AnomalyDistanceModel for Orbit {
    fn anomaly_distance(&self, jde: f64) -> Result<AnomalyDistance> {
        match self {
            Orbit::Elliptical(el) => el.anomaly_distance(jde),
            Orbit::Parabolic(el) => el.anomaly_distance(jde),
            Orbit::NearParabolic(el) => el.anomaly_distance(jde),
        }
    }
}
