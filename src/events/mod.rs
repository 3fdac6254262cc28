//! Event refinement
//!
//! Locating events in time by sampling a function of time and handing the
//! samples to the interpolation layer:
//!
//! - extrema (apsides, declination maxima) with [`refine_extremum`]
//! - zero crossings (node passages, conjunctions) with [`refine_zero`]
//!
//! The sampled function may fail (orbit models report non-convergence), so it
//! returns a `Result` and failures propagate unchanged.

pub mod apsis;
pub mod conjunction;
pub mod node;

use crate::errors::{AstroError, Result};
use crate::interpolation::{Len3, Len5};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Maximum number of parabola fits in [`refine_extremum`]
pub const MAX_REFINEMENTS: usize = 100;

/// Which extremum to look for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtremumKind {
    Minimum,
    Maximum,
}

impl ExtremumKind {
    /// True if `a` is further towards this kind of extremum than `b`
    fn prefers(&self, a: f64, b: f64) -> bool {
        match self {
            ExtremumKind::Minimum => a < b,
            ExtremumKind::Maximum => a > b,
        }
    }
}

/// Locate an extremum of `f` near `guess`
///
/// Repeatedly fits a parabola through `f` at `t − step`, `t`, `t + step` and
/// moves `t` to its vertex, halving `step` each time (but never below
/// `precision`). When the three samples do not bracket an extremum of the
/// requested kind, `t` walks one step towards the better sample instead.
///
/// Returns the time of the extremum and the interpolated value there.
///
/// # Errors
///
/// [`AstroError::PreconditionViolation`] for a non-positive `step` or
/// `precision`, [`AstroError::NonConvergence`] if the vertex has not settled
/// to `precision` after [`MAX_REFINEMENTS`] fits, and any error of `f`.
pub fn refine_extremum<F>(
    mut f: F,
    guess: f64,
    step: f64,
    precision: f64,
    kind: ExtremumKind,
) -> Result<(f64, f64)>
where
    F: FnMut(f64) -> Result<f64>,
{
    if !(step > 0.0 && precision > 0.0) {
        return Err(AstroError::PreconditionViolation(format!(
            "step ({}) and precision ({}) must be positive",
            step, precision
        )));
    }

    let mut t = guess;
    let mut step = step;
    for iteration in 1..=MAX_REFINEMENTS {
        let y = [f(t - step)?, f(t)?, f(t + step)?];
        let curvature = y[0] - 2.0 * y[1] + y[2];
        let right_kind = match kind {
            ExtremumKind::Minimum => curvature > 0.0,
            ExtremumKind::Maximum => curvature < 0.0,
        };

        if right_kind {
            if let Ok((x, value)) = Len3::new(t - step, t + step, y)?.extremum() {
                trace!(
                    "refinement {}: vertex at {} (step {}, value {})",
                    iteration,
                    x,
                    step,
                    value
                );
                if (x - t).abs() <= precision {
                    return Ok((x, value));
                }
                t = x;
                step = (0.5 * step).max(precision);
                continue;
            }
        }

        // No usable vertex between the samples: walk downhill (or uphill)
        t += if kind.prefers(y[2], y[0]) { step } else { -step };
        trace!("refinement {}: no {:?} in bracket, moved to {}", iteration, kind, t);
    }

    debug!(
        "extremum refinement did not settle within {} fits, last time {}",
        MAX_REFINEMENTS, t
    );
    Err(AstroError::NonConvergence {
        last: t,
        iterations: MAX_REFINEMENTS,
    })
}

/// Locate a zero of `f` between `t1` and `t5`
///
/// Samples `f` at five equally spaced times and finds the zero of the
/// interpolating quartic. `strong` selects the Newton estimate, see
/// [`Len5::zero`].
///
/// # Errors
///
/// [`AstroError::ZeroOutside`] when the quartic has no zero within the
/// sampled interval, [`AstroError::NonConvergence`] from the zero finder, and
/// any error of `f`.
pub fn refine_zero<F>(mut f: F, t1: f64, t5: f64, strong: bool) -> Result<f64>
where
    F: FnMut(f64) -> Result<f64>,
{
    let step = (t5 - t1) / 4.0;
    let mut y = [0.0; 5];
    for (i, yi) in y.iter_mut().enumerate() {
        *yi = f(t1 + i as f64 * step)?;
    }
    Len5::new(t1, t5, y)?.zero(strong)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_refine_minimum_of_parabola() {
        let (t, v) = refine_extremum(
            |t| Ok((t - 3.25) * (t - 3.25) + 1.0),
            2.0,
            0.5,
            1e-9,
            ExtremumKind::Minimum,
        )
        .unwrap();
        assert_abs_diff_eq!(t, 3.25, epsilon = 1e-9);
        assert_abs_diff_eq!(v, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_refine_maximum_walks_to_peak() {
        // Peak of cos is 10 steps away from the guess
        let (t, v) = refine_extremum(
            |t: f64| Ok(t.cos()),
            -1.0,
            0.1,
            1e-10,
            ExtremumKind::Maximum,
        )
        .unwrap();
        assert_abs_diff_eq!(t, 0.0, epsilon = 1e-8);
        assert_abs_diff_eq!(v, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_refine_skips_wrong_kind() {
        // Starting on the minimum of sin, look for the maximum
        let (t, _) = refine_extremum(
            |t: f64| Ok(t.sin()),
            -std::f64::consts::FRAC_PI_2,
            0.2,
            1e-9,
            ExtremumKind::Maximum,
        )
        .unwrap();
        let diff = (t - std::f64::consts::FRAC_PI_2)
            .abs()
            .min((t + 3.0 * std::f64::consts::FRAC_PI_2).abs());
        assert!(diff < 1e-7, "t = {}", t);
    }

    #[test]
    fn test_refine_monotonic_function_fails() {
        let err = refine_extremum(|t| Ok(2.0 * t), 0.0, 1.0, 1e-6, ExtremumKind::Minimum)
            .unwrap_err();
        assert!(matches!(err, AstroError::NonConvergence { .. }));
    }

    #[test]
    fn test_refine_propagates_errors() {
        let err = refine_extremum(
            |_| Err(AstroError::ZeroOutside),
            0.0,
            1.0,
            1e-6,
            ExtremumKind::Minimum,
        )
        .unwrap_err();
        assert_eq!(err, AstroError::ZeroOutside);
        assert!(refine_extremum(|t| Ok(t), 0.0, 0.0, 1e-6, ExtremumKind::Minimum).is_err());
    }

    #[test]
    fn test_refine_zero() {
        let t = refine_zero(|t: f64| Ok(t.sin() - 0.5), 0.0, 1.0, true).unwrap();
        assert_abs_diff_eq!(t, std::f64::consts::FRAC_PI_6, epsilon = 1e-5);

        let err = refine_zero(|t: f64| Ok(t + 10.0), 0.0, 1.0, true).unwrap_err();
        assert_eq!(err, AstroError::ZeroOutside);
    }
}
