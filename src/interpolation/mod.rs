//! Interpolation over tabulated values
//!
//! Fixed-width interpolators for equally spaced tables ([`Len3`], [`Len5`]),
//! general Lagrange interpolation for arbitrary abscissae, and the extremum and
//! zero finders the event refinement is built on (Meeus chapter 3).
//!
//! Positions inside a table are expressed either as an absolute x value or as
//! an interpolating factor `n`, the offset from the central row in units of
//! the tabular interval.

pub mod lagrange;
pub mod len3;
pub mod len5;

pub use lagrange::{lagrange, lagrange_checked, lagrange_poly, lagrange_poly_checked};
pub use len3::{len3_interpolate_x, len4_half, Len3};
pub use len5::Len5;

use crate::errors::{AstroError, Result};

/// Evaluate a polynomial with Horner's method
///
/// Coefficients are ordered from the constant term up:
/// `coeffs[0] + coeffs[1]·x + coeffs[2]·x² + ...`
pub fn horner(x: f64, coeffs: &[f64]) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// Linear interpolation in an equally spaced table
///
/// `y` holds the tabulated values, the first at `x1` and the last at `xn`.
/// Queries outside the table extrapolate from the nearest segment.
///
/// # Errors
///
/// [`AstroError::InvalidTable`] for fewer than two values or an empty x range.
pub fn linear(x: f64, x1: f64, xn: f64, y: &[f64]) -> Result<f64> {
    if y.len() < 2 {
        return Err(AstroError::InvalidTable(format!(
            "linear interpolation needs at least 2 values, got {}",
            y.len()
        )));
    }
    if x1 == xn {
        return Err(AstroError::InvalidTable("no x range".to_string()));
    }

    let segments = y.len() - 1;
    let interval = (xn - x1) / segments as f64;
    let position = (x - x1) / interval;
    let i = (position.floor().max(0.0) as usize).min(segments - 1);
    let t = position - i as f64;
    Ok(y[i] + t * (y[i + 1] - y[i]))
}

/// Reject a non-finite value or empty interval in an equally spaced table
pub(crate) fn check_x_range(x1: f64, xn: f64) -> Result<()> {
    if !x1.is_finite() || !xn.is_finite() || x1 == xn {
        return Err(AstroError::InvalidTable(format!(
            "table needs a finite, non-empty x range, got {}..{}",
            x1, xn
        )));
    }
    Ok(())
}

/// Check that a value lies in the closed interval spanned by `a` and `b`
pub(crate) fn check_in_range(value: f64, a: f64, b: f64) -> Result<()> {
    let (min, max) = if a <= b { (a, b) } else { (b, a) };
    if value < min || value > max {
        return Err(AstroError::OutOfRange { value, min, max });
    }
    Ok(())
}
