//! Kepler's equation
//!
//! Solvers for `M = E - e·sin(E)`, giving the eccentric anomaly `E` for a mean
//! anomaly `M` and eccentricity `e`, plus the closed-form relations from `E`
//! to true anomaly and radius (Meeus, chapter 30).
//!
//! The strategies differ in convergence domain and robustness:
//!
//! | Strategy | Method | Fails when |
//! |---|---|---|
//! | [`KeplerStrategy::FixedPoint`] | `E₁ = M + e·sin E₀` | `e` near 1 |
//! | [`KeplerStrategy::Newton`] | Newton step | extreme `(e, M)` |
//! | [`KeplerStrategy::NewtonLimited`] | Newton step through `asin(sin(·))` | rarely |
//! | [`KeplerStrategy::NewtonClamped`] | Newton step clamped to ±0.5 | rarely |
//! | [`KeplerStrategy::Bisection`] | bisection on `[M, M + e]` | never for `e ∈ [0, 1)` |
//! | [`KeplerStrategy::SmallEccentricity`] | closed form, no iteration | `e > 0.1` (rejected) |

use crate::constants::TAU;
use crate::errors::{AstroError, Result};
use crate::iterate::{self, ConvergenceBudget};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Largest eccentricity accepted by the closed-form approximation
pub const SMALL_ECCENTRICITY_LIMIT: f64 = 0.1;

/// Selects the method used to solve Kepler's equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KeplerStrategy {
    /// Direct fixed-point iteration (Meeus 30.6)
    FixedPoint,
    /// Newton-like correction (Meeus 30.7)
    Newton,
    /// Newton-like correction with Leingärtner's limiting function
    NewtonLimited,
    /// Newton-like correction with Steele's step clamp
    #[default]
    NewtonClamped,
    /// Binary search over an analytic bracket (Sinnott)
    Bisection,
    /// Closed-form approximation for small eccentricity (Meeus 30.10)
    SmallEccentricity,
}

/// Budget used by [`solve_kepler`] for the given number of decimal places
pub fn default_budget(places: u32) -> ConvergenceBudget {
    ConvergenceBudget::decimal_places(places, (places as usize).max(1) * 5)
}

/// Solve Kepler's equation with the selected strategy
///
/// # Arguments
///
/// * `strategy` - Solution method
/// * `e` - Eccentricity, in `[0, 1)`
/// * `m` - Mean anomaly in radians
/// * `places` - Desired number of decimal places in the result (iterative
///   strategies only)
///
/// # Returns
///
/// Eccentric anomaly `E` in radians
///
/// # Errors
///
/// [`AstroError::NonConvergence`] if an iterative strategy exceeds its budget,
/// [`AstroError::PreconditionViolation`] if `e` is outside the strategy's domain.
pub fn solve_kepler(strategy: KeplerStrategy, e: f64, m: f64, places: u32) -> Result<f64> {
    solve_kepler_with_budget(strategy, e, m, default_budget(places))
}

/// Solve Kepler's equation with an explicit convergence budget
///
/// The budget is ignored by the bisection and closed-form strategies.
pub fn solve_kepler_with_budget(
    strategy: KeplerStrategy,
    e: f64,
    m: f64,
    budget: ConvergenceBudget,
) -> Result<f64> {
    check_eccentricity(e)?;
    match strategy {
        KeplerStrategy::FixedPoint => iterate::converge(fixed_point_step(e, m), m, budget),
        KeplerStrategy::Newton => iterate::converge(newton_step(e, m), m, budget),
        KeplerStrategy::NewtonLimited => iterate::converge(limited_step(e, m), m, budget),
        KeplerStrategy::NewtonClamped => iterate::converge(clamped_step(e, m), m, budget),
        KeplerStrategy::Bisection => kepler3(e, m),
        KeplerStrategy::SmallEccentricity => {
            if e > SMALL_ECCENTRICITY_LIMIT {
                return Err(AstroError::PreconditionViolation(format!(
                    "eccentricity {} too large for the small-eccentricity approximation (max {})",
                    e, SMALL_ECCENTRICITY_LIMIT
                )));
            }
            Ok(kepler4(e, m))
        }
    }
}

fn check_eccentricity(e: f64) -> Result<()> {
    if (0.0..1.0).contains(&e) {
        Ok(())
    } else {
        Err(AstroError::PreconditionViolation(format!(
            "eccentricity {} outside [0, 1)",
            e
        )))
    }
}

fn fixed_point_step(e: f64, m: f64) -> impl Fn(f64) -> f64 {
    move |e0: f64| m + e * e0.sin()
}

fn newton_correction(e: f64, m: f64, e0: f64) -> f64 {
    let (se, ce) = e0.sin_cos();
    (m + e * se - e0) / (1.0 - e * ce)
}

fn newton_step(e: f64, m: f64) -> impl Fn(f64) -> f64 {
    move |e0: f64| e0 + newton_correction(e, m, e0)
}

fn limited_step(e: f64, m: f64) -> impl Fn(f64) -> f64 {
    // Leingärtner, Meeus p. 205
    move |e0: f64| e0 + newton_correction(e, m, e0).sin().asin()
}

fn clamped_step(e: f64, m: f64) -> impl Fn(f64) -> f64 {
    // Steele, Meeus p. 205
    move |e0: f64| e0 + newton_correction(e, m, e0).clamp(-0.5, 0.5)
}

/// Solve Kepler's equation by direct iteration of `E₁ = M + e·sin E₀`
///
/// Fails to converge for some values of `e` and `M`.
pub fn kepler1(e: f64, m: f64, places: u32) -> Result<f64> {
    solve_kepler(KeplerStrategy::FixedPoint, e, m, places)
}

/// Solve Kepler's equation by iterating
/// `E₁ = E₀ + (M + e·sin E₀ − E₀) / (1 − e·cos E₀)`
///
/// Converges over a wider range of inputs than [`kepler1`] but can still fail.
pub fn kepler2(e: f64, m: f64, places: u32) -> Result<f64> {
    solve_kepler(KeplerStrategy::Newton, e, m, places)
}

/// Same iteration as [`kepler2`] with a limiting function avoiding divergence
pub fn kepler2a(e: f64, m: f64, places: u32) -> Result<f64> {
    solve_kepler(KeplerStrategy::NewtonLimited, e, m, places)
}

/// Same iteration as [`kepler2`] with a (different) limiting function
pub fn kepler2b(e: f64, m: f64, places: u32) -> Result<f64> {
    solve_kepler(KeplerStrategy::NewtonClamped, e, m, places)
}

/// Solve Kepler's equation by binary search
///
/// `M` is folded onto `[0, π]`, where the root lies in `[M, M + e]`.
/// The whole turns and the fold are restored afterwards, so
/// `E − e·sin E = M` holds for any `M`.
pub fn kepler3(e: f64, m: f64) -> Result<f64> {
    check_eccentricity(e)?;

    let reduced = m.rem_euclid(TAU);
    let turns = m - reduced;
    let (folded, mirrored) = if reduced > PI {
        (TAU - reduced, true)
    } else {
        (reduced, false)
    };

    let root = iterate::bracketed_root(|ea| ea - e * ea.sin() - folded, folded, folded + e)?;

    let ea = if mirrored { TAU - root } else { root };
    Ok(turns + ea)
}

/// Approximate solution to Kepler's equation, valid only for small `e`
///
/// No iteration; the result is placed on the same turn as `M`.
pub fn kepler4(e: f64, m: f64) -> f64 {
    let (sm, cm) = m.sin_cos();
    let ea = sm.atan2(cm - e);
    ea + TAU * ((m - ea) / TAU).round()
}

/// True anomaly `ν` for a given eccentric anomaly (Meeus 30.1)
///
/// # Arguments
///
/// * `e` - Eccentricity
/// * `ea` - Eccentric anomaly in radians
pub fn true_anomaly(e: f64, ea: f64) -> f64 {
    let half = 0.5 * ea;
    2.0 * ((1.0 + e).sqrt() * half.sin()).atan2((1.0 - e).sqrt() * half.cos())
}

/// Radius `r` for a given eccentric anomaly (Meeus 30.2)
///
/// Result is in the unit of the semimajor axis `a` (typically AU).
pub fn radius(e: f64, ea: f64, a: f64) -> f64 {
    a * (1.0 - e * ea.cos())
}
