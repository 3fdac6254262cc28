//! Passages through the nodes of an orbit (Meeus chapter 39)
//!
//! Closed forms: at the ascending node the true anomaly is `−ω`, at the
//! descending node `π − ω`, with `ω` the argument of perihelion.

use crate::constants::K;
use crate::orbit::{EllipticalElements, ParabolicElements};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Time and heliocentric distance of a node passage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodePassage {
    /// Time of passage, JDE
    pub jde: f64,
    /// Distance from the Sun in AU
    pub distance: f64,
}

/// Passage through the ascending node of an elliptical orbit
///
/// `arg_perihelion` is ω in radians.
pub fn elliptic_ascending(orbit: &EllipticalElements, arg_perihelion: f64) -> NodePassage {
    elliptic(orbit, -arg_perihelion)
}

/// Passage through the descending node of an elliptical orbit
pub fn elliptic_descending(orbit: &EllipticalElements, arg_perihelion: f64) -> NodePassage {
    elliptic(orbit, PI - arg_perihelion)
}

/// Passage through the ascending node of a parabolic orbit
pub fn parabolic_ascending(orbit: &ParabolicElements, arg_perihelion: f64) -> NodePassage {
    parabolic(orbit, -arg_perihelion)
}

/// Passage through the descending node of a parabolic orbit
pub fn parabolic_descending(orbit: &ParabolicElements, arg_perihelion: f64) -> NodePassage {
    parabolic(orbit, PI - arg_perihelion)
}

fn elliptic(orbit: &EllipticalElements, nu: f64) -> NodePassage {
    let e = orbit.eccentricity;
    let ea = 2.0 * (((1.0 - e) / (1.0 + e)).sqrt() * (0.5 * nu).tan()).atan();
    let m = ea - e * ea.sin();
    NodePassage {
        jde: orbit.time_perihelion + m / orbit.mean_motion(),
        distance: orbit.axis * (1.0 - e * ea.cos()),
    }
}

fn parabolic(orbit: &ParabolicElements, nu: f64) -> NodePassage {
    let q = orbit.perihelion_distance;
    let s = (0.5 * nu).tan();
    // days per unit of Barker's W = s³ + 3s, for q = 1
    let days = 2f64.sqrt() / (3.0 * K);
    NodePassage {
        jde: orbit.time_perihelion + days * s * (s * s + 3.0) * q * q.sqrt(),
        distance: q * (1.0 + s * s),
    }
}
