//! Iteration engine
//!
//! Generic fixed-point iteration and bisection root finding. Everything that
//! iterates in this crate (Kepler solvers, the near-parabolic orbit model, the
//! interpolation extremum and zero finders) goes through [`converge`], so the
//! stopping rules live in exactly one place.
//!
//! Running out of iterations is not a bug: it is reported as
//! [`AstroError::NonConvergence`] carrying the last value reached.

use crate::errors::{AstroError, Result};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Relative agreement required by [`Tolerance::FullPrecision`].
///
/// 15 significant figures is the most a float64 can hold in full, leaving a
/// couple of bits for floating point jitter.
pub const FULL_PRECISION: f64 = 1e-15;

/// Number of halvings performed by [`binary_root`]
pub const BINARY_ROOT_STEPS: usize = 52;

/// Stopping criterion for an iteration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Tolerance {
    /// Stop when successive values agree to this many decimal places
    DecimalPlaces(u32),
    /// Stop when successive values agree to 15 significant figures
    FullPrecision,
    /// Stop when successive values differ by no more than this amount
    Absolute(f64),
}

impl Tolerance {
    /// Check whether the step from `previous` to `next` satisfies the tolerance
    pub fn is_met(&self, previous: f64, next: f64) -> bool {
        let delta = (next - previous).abs();
        match *self {
            Tolerance::DecimalPlaces(places) => delta < 10f64.powi(-(places as i32)),
            Tolerance::FullPrecision => delta <= FULL_PRECISION * next.abs(),
            Tolerance::Absolute(limit) => delta <= limit,
        }
    }
}

/// Stopping criterion plus the maximum number of iterations allowed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceBudget {
    /// When to consider the iteration converged
    pub tolerance: Tolerance,
    /// Maximum number of calls to the improvement function
    pub max_iterations: usize,
}

impl ConvergenceBudget {
    /// Budget converging to a fixed number of decimal places
    pub fn decimal_places(places: u32, max_iterations: usize) -> Self {
        Self {
            tolerance: Tolerance::DecimalPlaces(places),
            max_iterations,
        }
    }

    /// Budget converging to (nearly) the full precision of a float64
    pub fn full_precision(max_iterations: usize) -> Self {
        Self {
            tolerance: Tolerance::FullPrecision,
            max_iterations,
        }
    }

    /// Budget converging to an absolute difference
    pub fn absolute(limit: f64, max_iterations: usize) -> Self {
        Self {
            tolerance: Tolerance::Absolute(limit),
            max_iterations,
        }
    }
}

impl Default for ConvergenceBudget {
    fn default() -> Self {
        Self::full_precision(100)
    }
}

/// Iterate an improvement function until the budget's tolerance is met
///
/// `better` maps an estimate to an improved estimate. Iteration starts from
/// `start` and stops as soon as two successive values satisfy the tolerance.
///
/// # Errors
///
/// [`AstroError::NonConvergence`] when `budget.max_iterations` is exhausted or
/// the improvement function produces a non-finite value.
pub fn converge<F>(mut better: F, start: f64, budget: ConvergenceBudget) -> Result<f64>
where
    F: FnMut(f64) -> f64,
{
    let mut current = start;
    for iteration in 1..=budget.max_iterations {
        let next = better(current);
        trace!("iteration {}: {} -> {}", iteration, current, next);

        if !next.is_finite() {
            debug!("iteration diverged to {} after {} steps", next, iteration);
            return Err(AstroError::NonConvergence {
                last: next,
                iterations: iteration,
            });
        }
        if budget.tolerance.is_met(current, next) {
            return Ok(next);
        }
        current = next;
    }

    debug!(
        "iteration did not converge within {} steps ({:?}), last value {}",
        budget.max_iterations, budget.tolerance, current
    );
    Err(AstroError::NonConvergence {
        last: current,
        iterations: budget.max_iterations,
    })
}

/// Iterate to a fixed number of decimal places
///
/// # Arguments
///
/// * `better` - Improvement function
/// * `start` - Starting value
/// * `places` - Number of decimal places desired in the result
/// * `max_iterations` - Iteration limit
pub fn decimal_places<F>(better: F, start: f64, places: u32, max_iterations: usize) -> Result<f64>
where
    F: FnMut(f64) -> f64,
{
    converge(
        better,
        start,
        ConvergenceBudget::decimal_places(places, max_iterations),
    )
}

/// Iterate to (nearly) the full precision of a float64
pub fn full_precision<F>(better: F, start: f64, max_iterations: usize) -> Result<f64>
where
    F: FnMut(f64) -> f64,
{
    converge(better, start, ConvergenceBudget::full_precision(max_iterations))
}

/// Find a root between the given bounds by binary search
///
/// The function must change sign between `lower` and `upper`; this is not
/// checked and the result is meaningless otherwise. Use [`bracketed_root`] for
/// a validated search.
pub fn binary_root<F>(f: F, lower: f64, upper: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let mut lower = lower;
    let mut upper = upper;
    let lower_negative = f(lower).is_sign_negative();

    let mut mid = lower;
    for _ in 0..BINARY_ROOT_STEPS {
        mid = 0.5 * (lower + upper);
        if f(mid).is_sign_negative() == lower_negative {
            lower = mid;
        } else {
            upper = mid;
        }
    }
    mid
}

/// Binary search for a root, after checking that the interval brackets one
///
/// # Errors
///
/// [`AstroError::InvalidBracket`] if `f` has the same sign at both bounds or
/// is not finite there.
pub fn bracketed_root<F>(f: F, lower: f64, upper: f64) -> Result<f64>
where
    F: Fn(f64) -> f64,
{
    let f_lower = f(lower);
    let f_upper = f(upper);

    if f_lower == 0.0 {
        return Ok(lower);
    }
    if f_upper == 0.0 {
        return Ok(upper);
    }
    if !f_lower.is_finite() || !f_upper.is_finite() || (f_lower < 0.0) == (f_upper < 0.0) {
        debug!(
            "rejected bracket [{}, {}]: f = ({}, {})",
            lower, upper, f_lower, f_upper
        );
        return Err(AstroError::InvalidBracket { lower, upper });
    }

    Ok(binary_root(f, lower, upper))
}
