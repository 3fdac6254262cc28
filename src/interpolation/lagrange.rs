//! Lagrange interpolation for unequally spaced abscissae (Meeus 3.12)
//!
//! Table rows are `(x, y)` pairs. The x values need not be ordered or equally
//! spaced but must be distinct: [`lagrange`] and [`lagrange_poly`] do not
//! check this and return non-finite values for duplicates, the `_checked`
//! variants reject such tables.

use crate::errors::{AstroError, Result};

/// Interpolate a y value for `x` from the table
pub fn lagrange(x: f64, table: &[(f64, f64)]) -> f64 {
    let mut sum = 0.0;
    for (i, &(xi, yi)) in table.iter().enumerate() {
        let mut prod = 1.0;
        for (j, &(xj, _)) in table.iter().enumerate() {
            if i != j {
                prod *= (x - xj) / (xi - xj);
            }
        }
        sum += yi * prod;
    }
    sum
}

/// Coefficients of the interpolating polynomial, constant term first
///
/// The polynomial has degree `n − 1` for `n` rows; evaluate it with
/// [`horner`](super::horner).
pub fn lagrange_poly(table: &[(f64, f64)]) -> Vec<f64> {
    let n = table.len();
    let mut sum = vec![0.0; n];
    let mut prod = vec![0.0; n];

    for (i, &(xi, yi)) in table.iter().enumerate() {
        prod.iter_mut().for_each(|c| *c = 0.0);
        prod[0] = 1.0;
        let mut degree = 0;
        let mut denom = 1.0;

        for (j, &(xj, _)) in table.iter().enumerate() {
            if i == j {
                continue;
            }
            // prod *= (x - xj)
            degree += 1;
            for k in (1..=degree).rev() {
                prod[k] = prod[k - 1] - xj * prod[k];
            }
            prod[0] *= -xj;
            denom *= xi - xj;
        }

        let scale = yi / denom;
        for (s, p) in sum.iter_mut().zip(&prod) {
            *s += scale * p;
        }
    }
    sum
}

/// [`lagrange`] after validating the table
///
/// # Errors
///
/// [`AstroError::InvalidTable`] for an empty table and
/// [`AstroError::PreconditionViolation`] for repeated or non-finite x values.
pub fn lagrange_checked(x: f64, table: &[(f64, f64)]) -> Result<f64> {
    check_abscissae(table)?;
    Ok(lagrange(x, table))
}

/// [`lagrange_poly`] after validating the table
pub fn lagrange_poly_checked(table: &[(f64, f64)]) -> Result<Vec<f64>> {
    check_abscissae(table)?;
    Ok(lagrange_poly(table))
}

fn check_abscissae(table: &[(f64, f64)]) -> Result<()> {
    if table.is_empty() {
        return Err(AstroError::InvalidTable(
            "Lagrange interpolation needs at least one row".to_string(),
        ));
    }
    for (i, &(xi, _)) in table.iter().enumerate() {
        if !xi.is_finite() {
            return Err(AstroError::PreconditionViolation(format!(
                "x value {} in row {} is not finite",
                xi, i
            )));
        }
        if let Some(j) = table[..i].iter().position(|&(xj, _)| xj == xi) {
            return Err(AstroError::PreconditionViolation(format!(
                "rows {} and {} share the x value {}",
                j, i, xi
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolation::horner;
    use approx::assert_abs_diff_eq;

    // sin x in degrees, Meeus example 3.g
    fn sine_table() -> Vec<(f64, f64)> {
        vec![
            (29.43, 0.4913598528),
            (30.97, 0.5145891926),
            (27.69, 0.4646875083),
            (28.11, 0.4711658342),
            (31.58, 0.5236885653),
            (33.05, 0.5453707057),
        ]
    }

    #[test]
    fn test_meeus_3g() {
        let y = lagrange(30.0, &sine_table());
        assert_abs_diff_eq!(y, 0.5, epsilon = 1e-9);
        let y = lagrange(0.0, &sine_table());
        assert_abs_diff_eq!(y, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_reproduces_every_row() {
        let table = sine_table();
        for &(x, y) in &table {
            assert_abs_diff_eq!(lagrange(x, &table), y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_poly_matches_direct_evaluation() {
        let table = sine_table();
        let poly = lagrange_poly(&table);
        assert_eq!(poly.len(), table.len());
        for x in [28.0, 29.0, 30.0, 32.5] {
            assert_abs_diff_eq!(horner(x, &poly), lagrange(x, &table), epsilon = 1e-8);
        }
    }

    #[test]
    fn test_poly_coefficients_of_known_quadratic() {
        // y = 2 - 3x + x²
        let table = [(0.0, 2.0), (1.0, 0.0), (3.0, 2.0)];
        let poly = lagrange_poly(&table);
        assert_abs_diff_eq!(poly[0], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(poly[1], -3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(poly[2], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_duplicate_abscissae_rejected() {
        // Stricter behavior: repeated x values are reported instead of dividing by zero
        let table = [(1.0, 2.0), (2.0, 3.0), (1.0, 5.0)];
        assert!(matches!(
            lagrange_checked(1.5, &table),
            Err(AstroError::PreconditionViolation(_))
        ));
        assert!(lagrange_poly_checked(&table).is_err());
        assert!(lagrange_checked(1.5, &[]).is_err());
        assert_abs_diff_eq!(
            lagrange_checked(1.5, &table[..2]).unwrap(),
            2.5,
            epsilon = 1e-12
        );
    }
}
