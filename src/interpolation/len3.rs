//! Three-point interpolation using second differences (Meeus 3.3 to 3.7)

use super::{check_in_range, check_x_range};
use crate::errors::{AstroError, Result};
use crate::iterate;
use serde::{Deserialize, Serialize};

/// Iteration limit when converging on a zero
const ZERO_MAX_ITERATIONS: usize = 1000;

/// Quadratic through three equally spaced samples
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Len3 {
    x1: f64,
    x3: f64,
    y: [f64; 3],
    // first differences, their sum and the second difference
    a: f64,
    b: f64,
    c: f64,
    ab_sum: f64,
    x_sum: f64,
    x_diff: f64,
}

impl Len3 {
    /// Build the interpolator from the first and last x and three y values
    ///
    /// # Errors
    ///
    /// [`AstroError::InvalidTable`] when `x1 == x3` or either is not finite.
    pub fn new(x1: f64, x3: f64, y: [f64; 3]) -> Result<Self> {
        check_x_range(x1, x3)?;
        let a = y[1] - y[0];
        let b = y[2] - y[1];
        Ok(Self {
            x1,
            x3,
            y,
            a,
            b,
            c: b - a,
            ab_sum: a + b,
            x_sum: x1 + x3,
            x_diff: x3 - x1,
        })
    }

    /// Build the interpolator from the three rows of a longer table nearest `x`
    ///
    /// `y` holds every value of an equally spaced table running from `x1` to
    /// `xn`; it must have at least three rows.
    pub fn for_interpolate_x(x: f64, x1: f64, xn: f64, y: &[f64]) -> Result<Self> {
        if y.len() < 3 {
            return Err(AstroError::InvalidTable(format!(
                "three-point interpolation needs at least 3 values, got {}",
                y.len()
            )));
        }
        check_x_range(x1, xn)?;
        if y.len() == 3 {
            return Self::new(x1, xn, [y[0], y[1], y[2]]);
        }

        let interval = (xn - x1) / (y.len() - 1) as f64;
        // index of the middle row, kept one row away from either end
        let nearest = ((x - x1) / interval + 0.5) as i64;
        let middle = nearest.clamp(1, y.len() as i64 - 2) as usize;
        let first = x1 + (middle - 1) as f64 * interval;
        Self::new(
            first,
            first + 2.0 * interval,
            [y[middle - 1], y[middle], y[middle + 1]],
        )
    }

    /// Interpolate for a given x value
    pub fn interpolate_x(&self, x: f64) -> f64 {
        let n = (2.0 * x - self.x_sum) / self.x_diff;
        self.interpolate_n(n)
    }

    /// Interpolate for a given x value, restricted to the range `x1..=x3`
    pub fn interpolate_x_strict(&self, x: f64) -> Result<f64> {
        check_in_range(x, self.x1, self.x3)?;
        Ok(self.interpolate_x(x))
    }

    /// Interpolate for an interpolating factor `n`, formula (3.3)
    ///
    /// `n` is `x − x2` in units of the tabular interval.
    pub fn interpolate_n(&self, n: f64) -> f64 {
        self.y[1] + n * 0.5 * (self.ab_sum + n * self.c)
    }

    /// Interpolate for `n` restricted to `[-1, 1]`, the range of the table
    pub fn interpolate_n_strict(&self, n: f64) -> Result<f64> {
        check_in_range(n, -1.0, 1.0)?;
        Ok(self.interpolate_n(n))
    }

    /// x and y of the extremum of the quadratic, formulas (3.4) and (3.5)
    ///
    /// # Errors
    ///
    /// [`AstroError::ExtremumOutside`] if the samples are collinear or the
    /// extremum lies outside the table.
    pub fn extremum(&self) -> Result<(f64, f64)> {
        if self.c == 0.0 {
            return Err(AstroError::ExtremumOutside);
        }
        let n = self.ab_sum / (-2.0 * self.c);
        if !(-1.0..=1.0).contains(&n) {
            return Err(AstroError::ExtremumOutside);
        }
        let x = 0.5 * (self.x_sum + self.x_diff * n);
        let y = self.y[1] - self.ab_sum * self.ab_sum / (8.0 * self.c);
        Ok((x, y))
    }

    /// x value at which the quadratic crosses zero
    ///
    /// With `strong` the estimate step is Newton's method on the quadratic
    /// (3.7), which converges reliably for steep curves. Otherwise the cheaper
    /// formula (3.6) is used, fine for gentle curves.
    ///
    /// # Errors
    ///
    /// [`AstroError::NonConvergence`] if the estimates do not settle and
    /// [`AstroError::ZeroOutside`] if the zero lies outside the table.
    pub fn zero(&self, strong: bool) -> Result<f64> {
        let (y2, ab_sum, c) = (self.y[1], self.ab_sum, self.c);
        let n = if strong {
            iterate::full_precision(
                |n0| n0 - (2.0 * y2 + n0 * (ab_sum + c * n0)) / (ab_sum + 2.0 * c * n0),
                0.0,
                ZERO_MAX_ITERATIONS,
            )?
        } else {
            iterate::full_precision(
                |n0| -2.0 * y2 / (ab_sum + c * n0),
                0.0,
                ZERO_MAX_ITERATIONS,
            )?
        };
        if !(-1.0..=1.0).contains(&n) {
            return Err(AstroError::ZeroOutside);
        }
        Ok(0.5 * (self.x_sum + self.x_diff * n))
    }
}

/// Interpolate `x` in an equally spaced table of any length of at least 3,
/// using the three rows nearest `x`
pub fn len3_interpolate_x(x: f64, x1: f64, xn: f64, y: &[f64]) -> Result<f64> {
    Ok(Len3::for_interpolate_x(x, x1, xn, y)?.interpolate_x(x))
}

/// Center value of a table of four rows, formula (3.12)
pub fn len4_half(y: [f64; 4]) -> f64 {
    (9.0 * (y[1] + y[2]) - y[0] - y[3]) / 16.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_quadratic_through_three_points() {
        // y = (x + 1)²
        let d = Len3::new(0.0, 2.0, [1.0, 4.0, 9.0]).unwrap();
        assert_eq!(d.interpolate_x(1.0), 4.0);
        for x in [-0.7, 0.25, 1.5, 3.1] {
            assert_abs_diff_eq!(d.interpolate_x(x), (x + 1.0) * (x + 1.0), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_meeus_3a() {
        // Distance of Mars, 1992 November 5 to 9
        let d = Len3::new(7.0, 9.0, [0.884226, 0.877366, 0.870531]).unwrap();
        assert_abs_diff_eq!(d.interpolate_n(4.35 / 24.0), 0.876125, epsilon = 1e-6);
        assert_abs_diff_eq!(d.interpolate_x(8.0 + 4.35 / 24.0), 0.876125, epsilon = 1e-6);
    }

    #[test]
    fn test_strict_mode_rejects_out_of_range() {
        let d = Len3::new(0.0, 2.0, [1.0, 4.0, 9.0]).unwrap();
        assert_eq!(d.interpolate_x_strict(2.0).unwrap(), 9.0);
        assert!(matches!(
            d.interpolate_x_strict(2.5),
            Err(AstroError::OutOfRange { .. })
        ));
        assert!(d.interpolate_n_strict(-1.01).is_err());
        assert_eq!(d.interpolate_n_strict(0.0).unwrap(), 4.0);
    }

    #[test]
    fn test_meeus_3b_extremum() {
        // Distance of Mars to the Earth around 1992 September 26
        let d = Len3::new(12.0, 20.0, [1.3814294, 1.3812213, 1.3812453]).unwrap();
        let (x, y) = d.extremum().unwrap();
        assert_abs_diff_eq!(x, 17.5864, epsilon = 1e-4);
        assert_abs_diff_eq!(y, 1.3812030, epsilon = 1e-7);
    }

    #[test]
    fn test_extremum_outside() {
        let linear = Len3::new(0.0, 2.0, [1.0, 2.0, 3.0]).unwrap();
        assert_eq!(linear.extremum(), Err(AstroError::ExtremumOutside));

        // Vertex of (x - 5)² is far beyond x3
        let far = Len3::new(0.0, 2.0, [25.0, 16.0, 9.0]).unwrap();
        assert_eq!(far.extremum(), Err(AstroError::ExtremumOutside));
    }

    #[test]
    fn test_meeus_3c_zero() {
        // Declination of Mercury in arcseconds, 1988 February 26 to 28
        let y = [-1693.4, 406.3, 2303.2];
        let d = Len3::new(26.0, 28.0, y).unwrap();
        let weak = d.zero(false).unwrap();
        let strong = d.zero(true).unwrap();
        assert_abs_diff_eq!(weak, 26.79873, epsilon = 1e-5);
        assert_abs_diff_eq!(strong, weak, epsilon = 1e-9);
    }

    #[test]
    fn test_meeus_3d_strong_zero() {
        // Steep curve where the strong estimate is needed
        let d = Len3::new(-1.0, 1.0, [-2.0, 3.0, 2.0]).unwrap();
        assert_abs_diff_eq!(d.zero(true).unwrap(), -0.720759220056, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_outside() {
        // (x - 5)² - 1 has its roots at 4 and 6
        let d = Len3::new(0.0, 2.0, [24.0, 15.0, 8.0]).unwrap();
        assert_eq!(d.zero(true), Err(AstroError::ZeroOutside));
    }

    #[test]
    fn test_for_interpolate_x_picks_nearest_rows() {
        // y = x² on x = 0..=5
        let y = [0.0, 1.0, 4.0, 9.0, 16.0, 25.0];
        for x in [-0.5, 0.2, 2.4, 2.6, 4.9, 5.5] {
            assert_abs_diff_eq!(
                len3_interpolate_x(x, 0.0, 5.0, &y).unwrap(),
                x * x,
                epsilon = 1e-12
            );
        }
        let d = Len3::for_interpolate_x(2.4, 0.0, 5.0, &y).unwrap();
        assert_eq!(d.interpolate_n(0.0), 4.0);

        assert!(Len3::for_interpolate_x(1.0, 0.0, 1.0, &y[..2]).is_err());
    }

    #[test]
    fn test_len4_half() {
        // Cubic data is reproduced exactly
        let f = |x: f64| x * x * x - 2.0 * x + 1.0;
        let y = [f(0.0), f(1.0), f(2.0), f(3.0)];
        assert_abs_diff_eq!(len4_half(y), f(1.5), epsilon = 1e-12);
    }
}
