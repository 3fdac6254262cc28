//! Five-point interpolation using fourth differences (Meeus 3.8 to 3.10)

use super::{check_in_range, check_x_range, horner};
use crate::errors::{AstroError, Result};
use crate::iterate;
use serde::{Deserialize, Serialize};

/// Iteration limit for the extremum
const EXTREMUM_MAX_ITERATIONS: usize = 100;
/// Iteration limit for the zero
const ZERO_MAX_ITERATIONS: usize = 1000;

/// Quartic through five equally spaced samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Len5 {
    x1: f64,
    x5: f64,
    x_sum: f64,
    x_diff: f64,
    // first differences b, c (middle two), second f, third h, j, fourth k
    b: f64,
    c: f64,
    f: f64,
    h: f64,
    j: f64,
    k: f64,
    /// Polynomial in n, constant term first
    coeffs: [f64; 5],
}

impl Len5 {
    /// Build the interpolator from the first and last x and five y values
    ///
    /// # Errors
    ///
    /// [`AstroError::InvalidTable`] when `x1 == x5` or either is not finite.
    pub fn new(x1: f64, x5: f64, y: [f64; 5]) -> Result<Self> {
        check_x_range(x1, x5)?;

        let a = y[1] - y[0];
        let b = y[2] - y[1];
        let c = y[3] - y[2];
        let d = y[4] - y[3];
        let e = b - a;
        let f = c - b;
        let g = d - c;
        let h = f - e;
        let j = g - f;
        let k = j - h;

        let n3 = (h + j) / 12.0;
        let n4 = k / 24.0;
        let coeffs = [y[2], (b + c) / 2.0 - n3, f / 2.0 - n4, n3, n4];

        Ok(Self {
            x1,
            x5,
            x_sum: x1 + x5,
            x_diff: x5 - x1,
            b,
            c,
            f,
            h,
            j,
            k,
            coeffs,
        })
    }

    fn x_of(&self, n: f64) -> f64 {
        0.5 * self.x_sum + 0.25 * self.x_diff * n
    }

    /// Interpolate for a given x value
    pub fn interpolate_x(&self, x: f64) -> f64 {
        let n = (4.0 * x - 2.0 * self.x_sum) / self.x_diff;
        self.interpolate_n(n)
    }

    /// Interpolate for a given x value, restricted to the range `x1..=x5`
    pub fn interpolate_x_strict(&self, x: f64) -> Result<f64> {
        check_in_range(x, self.x1, self.x5)?;
        Ok(self.interpolate_x(x))
    }

    /// Interpolate for an interpolating factor `n`, formula (3.8)
    ///
    /// `n` is `x − x3` in units of the tabular interval.
    pub fn interpolate_n(&self, n: f64) -> f64 {
        horner(n, &self.coeffs)
    }

    /// Interpolate for `n` restricted to `[-1, 1]`
    ///
    /// Only half the range of the table, as Meeus recommends for five rows.
    pub fn interpolate_n_strict(&self, n: f64) -> Result<f64> {
        check_in_range(n, -1.0, 1.0)?;
        Ok(self.interpolate_n(n))
    }

    /// x and y of the extremum of the quartic, iterating formula (3.9)
    ///
    /// # Errors
    ///
    /// [`AstroError::ExtremumOutside`] if there is no extremum within the
    /// table, [`AstroError::NonConvergence`] if the iteration does not settle.
    pub fn extremum(&self) -> Result<(f64, f64)> {
        let numerator = [
            6.0 * (self.b + self.c) - self.h - self.j,
            0.0,
            3.0 * (self.h + self.j),
            2.0 * self.k,
        ];
        let den = self.k - 12.0 * self.f;
        if den == 0.0 {
            return Err(AstroError::ExtremumOutside);
        }

        let n = iterate::full_precision(
            |n0| horner(n0, &numerator) / den,
            0.0,
            EXTREMUM_MAX_ITERATIONS,
        )?;
        if !(-2.0..=2.0).contains(&n) {
            return Err(AstroError::ExtremumOutside);
        }
        Ok((self.x_of(n), self.interpolate_n(n)))
    }

    /// x value at which the quartic crosses zero
    ///
    /// With `strong` each step is a Newton step on the quartic. Otherwise
    /// formula (3.10) is iterated, which only handles gentle curves.
    ///
    /// # Errors
    ///
    /// [`AstroError::NonConvergence`] if the estimates do not settle and
    /// [`AstroError::ZeroOutside`] if the zero lies outside the table.
    pub fn zero(&self, strong: bool) -> Result<f64> {
        let [y3, q, p, n3, n4] = self.coeffs;
        let n = if strong {
            let slope = [q, 2.0 * p, 3.0 * n3, 4.0 * n4];
            iterate::full_precision(
                |n0| n0 - horner(n0, &self.coeffs) / horner(n0, &slope),
                0.0,
                ZERO_MAX_ITERATIONS,
            )?
        } else {
            let rest = [y3, 0.0, p, n3, n4];
            iterate::full_precision(|n0| -horner(n0, &rest) / q, 0.0, ZERO_MAX_ITERATIONS)?
        };
        if !(-2.0..=2.0).contains(&n) {
            return Err(AstroError::ZeroOutside);
        }
        Ok(self.x_of(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn quartic(x: f64) -> f64 {
        0.5 * x.powi(4) - x.powi(3) - 2.0 * x * x + 3.0 * x + 1.0
    }

    fn sampled(f: impl Fn(f64) -> f64, x1: f64, x5: f64) -> Len5 {
        let step = (x5 - x1) / 4.0;
        let y = [0, 1, 2, 3, 4].map(|i| f(x1 + i as f64 * step));
        Len5::new(x1, x5, y).unwrap()
    }

    #[test]
    fn test_quartic_reproduced_exactly() {
        let d = sampled(quartic, -2.0, 2.0);
        for x in [-2.0, -1.3, 0.0, 0.4, 1.99, 2.5] {
            assert_abs_diff_eq!(d.interpolate_x(x), quartic(x), epsilon = 1e-10);
        }
        assert_eq!(d.interpolate_n(0.0), quartic(0.0));
    }

    #[test]
    fn test_interpolating_factor_uses_tabular_interval() {
        // x1 = 10, x5 = 18, so the interval is 2 and x3 = 14
        let d = sampled(|x| x * x, 10.0, 18.0);
        assert_abs_diff_eq!(d.interpolate_n(1.0), 256.0, epsilon = 1e-9);
        assert_abs_diff_eq!(d.interpolate_n(-0.5), 169.0, epsilon = 1e-9);
    }

    #[test]
    fn test_strict_ranges() {
        let d = sampled(quartic, 0.0, 4.0);
        assert!(d.interpolate_x_strict(4.0).is_ok());
        assert!(matches!(
            d.interpolate_x_strict(-0.1),
            Err(AstroError::OutOfRange { .. })
        ));
        // n is limited to the central half of the table
        assert!(d.interpolate_n_strict(1.0).is_ok());
        assert!(d.interpolate_n_strict(1.5).is_err());
    }

    #[test]
    fn test_extremum() {
        // y = 3 - (x - 0.7)² + 0.1 (x - 0.7)⁴ has a maximum at 0.7
        let f = |x: f64| 3.0 - (x - 0.7).powi(2) + 0.1 * (x - 0.7).powi(4);
        let d = sampled(f, -2.0, 2.0);
        let (x, y) = d.extremum().unwrap();
        assert_abs_diff_eq!(x, 0.7, epsilon = 1e-12);
        assert_abs_diff_eq!(y, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_extremum_outside() {
        let d = sampled(|x| 2.0 * x + 1.0, 0.0, 4.0);
        assert_eq!(d.extremum(), Err(AstroError::ExtremumOutside));
    }

    #[test]
    fn test_zero_strong_and_weak() {
        // Gentle curve crossing zero at x = 0.3
        let f = |x: f64| (x - 0.3) * (1.0 + 0.05 * x * x);
        let d = sampled(f, -2.0, 2.0);
        assert_abs_diff_eq!(d.zero(true).unwrap(), 0.3, epsilon = 1e-12);
        assert_abs_diff_eq!(d.zero(false).unwrap(), 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_outside() {
        let d = sampled(|x| x - 10.0, 0.0, 4.0);
        assert_eq!(d.zero(true), Err(AstroError::ZeroOutside));
    }
}
