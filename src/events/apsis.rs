//! Perihelion and aphelion of the planets
//!
//! Approximate times come from the mean orbital elements (Meeus chapter 38,
//! Table 38.A). They refer to the planets' unperturbed orbits and can be off
//! by days, by months for the outer planets. The refined variants search a
//! series theory for the actual extremum of the radius vector.

use super::{refine_extremum, ExtremumKind};
use crate::errors::Result;
use crate::series::SeriesBody;
use log::debug;
use serde::{Deserialize, Serialize};

/// Planets covered by Table 38.A
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Planet {
    Mercury,
    Venus,
    /// The Earth-Moon barycenter
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

/// Apsis of an orbit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Apsis {
    Perihelion,
    Aphelion,
}

/// Time and distance of a refined apsis passage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApsisPassage {
    /// Time of passage, JDE
    pub jde: f64,
    /// Distance from the Sun at that time
    pub distance: f64,
}

impl Planet {
    pub const ALL: [Planet; 8] = [
        Planet::Mercury,
        Planet::Venus,
        Planet::Earth,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
        Planet::Uranus,
        Planet::Neptune,
    ];

    /// `k ≈ rate · (year − epoch)`: rate and epoch year
    fn k_coefficients(&self) -> (f64, f64) {
        match self {
            Planet::Mercury => (4.15201, 2000.12),
            Planet::Venus => (1.62549, 2000.53),
            Planet::Earth => (0.99997, 2000.01),
            Planet::Mars => (0.53166, 2001.78),
            Planet::Jupiter => (0.08430, 2011.20),
            Planet::Saturn => (0.03393, 2003.52),
            Planet::Uranus => (0.01190, 2051.1),
            Planet::Neptune => (0.00607, 2047.5),
        }
    }

    /// JDE of apsis `k` as a quadratic in `k`, constant term first
    fn jde_coefficients(&self) -> [f64; 3] {
        match self {
            Planet::Mercury => [2_451_590.257, 87.969_349_63, 0.0],
            Planet::Venus => [2_451_738.233, 224.700_818_8, -0.000_000_032_7],
            Planet::Earth => [2_451_547.507, 365.259_635_8, 0.000_000_015_6],
            Planet::Mars => [2_452_195.026, 686.995_785_7, -0.000_000_118_7],
            Planet::Jupiter => [2_455_636.936, 4332.897_065, 0.000_136_7],
            Planet::Saturn => [2_452_830.12, 10_764.216_76, 0.000_827],
            Planet::Uranus => [2_470_213.5, 30_694.876_7, -0.005_41],
            Planet::Neptune => [2_468_895.1, 60_190.33, 0.034_29],
        }
    }

    /// Anomalistic period in days
    pub fn period(&self) -> f64 {
        self.jde_coefficients()[1]
    }
}

/// Number `k` of the apsis nearest a (decimal) year
///
/// Integer for perihelia, integer plus one half for aphelia.
pub fn apsis_number(planet: Planet, apsis: Apsis, year: f64) -> f64 {
    let (rate, epoch) = planet.k_coefficients();
    let k = rate * (year - epoch);
    match apsis {
        Apsis::Perihelion => k.round(),
        Apsis::Aphelion => k.floor() + 0.5,
    }
}

fn apsis_jde(planet: Planet, k: f64) -> f64 {
    let [c0, c1, c2] = planet.jde_coefficients();
    c0 + k * (c1 + k * c2)
}

/// Approximate JDE of the perihelion passage nearest the given year
pub fn perihelion(planet: Planet, year: f64) -> f64 {
    apsis_jde(planet, apsis_number(planet, Apsis::Perihelion, year))
}

/// Approximate JDE of the aphelion passage nearest the given year
pub fn aphelion(planet: Planet, year: f64) -> f64 {
    apsis_jde(planet, apsis_number(planet, Apsis::Aphelion, year))
}

/// Perihelion passage found in a series theory, starting from the mean-orbit
/// approximation
///
/// `precision` is in days. The body's table must describe `planet`; nothing
/// checks that.
///
/// # Errors
///
/// [`AstroError::NonConvergence`](crate::errors::AstroError::NonConvergence)
/// if the refinement does not settle.
pub fn perihelion_refined(
    planet: Planet,
    year: f64,
    body: &SeriesBody,
    precision: f64,
) -> Result<ApsisPassage> {
    refined(planet, Apsis::Perihelion, year, body, precision)
}

/// Aphelion passage found in a series theory, see [`perihelion_refined`]
pub fn aphelion_refined(
    planet: Planet,
    year: f64,
    body: &SeriesBody,
    precision: f64,
) -> Result<ApsisPassage> {
    refined(planet, Apsis::Aphelion, year, body, precision)
}

fn refined(
    planet: Planet,
    apsis: Apsis,
    year: f64,
    body: &SeriesBody,
    precision: f64,
) -> Result<ApsisPassage> {
    let guess = apsis_jde(planet, apsis_number(planet, apsis, year));
    let kind = match apsis {
        Apsis::Perihelion => ExtremumKind::Minimum,
        Apsis::Aphelion => ExtremumKind::Maximum,
    };
    let (jde, _) = refine_extremum(
        |t| Ok(body.position(t).range),
        guess,
        planet.period() / 100.0,
        precision,
        kind,
    )?;
    debug!(
        "{:?} {:?}: mean orbit {}, {} series {}",
        planet, apsis, guess, body.name, jde
    );
    Ok(ApsisPassage {
        jde,
        distance: body.position(jde).range,
    })
}
