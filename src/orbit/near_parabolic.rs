//! Near-parabolic orbits
//!
//! Landgraf's method (Meeus chapter 35): start from the parabolic solution
//! and correct it with a series in `(1 − e)/(1 + e)`. Converges quickly near
//! perihelion but can fail far from it; failures are reported as
//! [`AstroError::NonConvergence`] and the caller should switch to the
//! elliptical or parabolic model.

use super::{AnomalyDistance, AnomalyDistanceModel};
use crate::constants::{K, TAU};
use crate::coordinates::pmod;
use crate::errors::{AstroError, Result};
use crate::iterate::{self, ConvergenceBudget};
use log::debug;
use serde::{Deserialize, Serialize};

/// Largest accepted `|e − 1|`
pub const NEAR_PARABOLIC_BAND: f64 = 0.1;

/// Convergence limit on `s = tan(ν/2)`
const PRECISION: f64 = 1e-9;
/// A series term larger than this means the series is diverging
const DIVERGENCE_LIMIT: f64 = 10_000.0;
/// Maximum order of the series in `g`
const MAX_SERIES_ORDER: f64 = 50.0;
/// Maximum number of outer corrections
const MAX_CORRECTIONS: usize = 50;
/// Budget for solving the corrected cubic for `s`
const CUBIC_BUDGET: ConvergenceBudget = ConvergenceBudget {
    tolerance: iterate::Tolerance::Absolute(PRECISION),
    max_iterations: 1000,
};

/// Orbital elements for near-parabolic orbits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearParabolicElements {
    /// Time of perihelion passage `T`, JDE
    pub time_perihelion: f64,
    /// Perihelion distance `q` in AU
    pub perihelion_distance: f64,
    /// Eccentricity, within [`NEAR_PARABOLIC_BAND`] of 1
    pub eccentricity: f64,
}

impl NearParabolicElements {
    /// Create a new set of near-parabolic elements
    ///
    /// # Errors
    ///
    /// [`AstroError::PreconditionViolation`] if the perihelion distance is not
    /// positive or the eccentricity is outside the near-parabolic band.
    pub fn new(time_perihelion: f64, perihelion_distance: f64, eccentricity: f64) -> Result<Self> {
        if !(perihelion_distance > 0.0) {
            return Err(AstroError::PreconditionViolation(format!(
                "perihelion distance must be positive, got {}",
                perihelion_distance
            )));
        }
        if !((eccentricity - 1.0).abs() <= NEAR_PARABOLIC_BAND) {
            return Err(AstroError::PreconditionViolation(format!(
                "eccentricity {} is not within {} of 1",
                eccentricity, NEAR_PARABOLIC_BAND
            )));
        }
        Ok(Self {
            time_perihelion,
            perihelion_distance,
            eccentricity,
        })
    }

    /// Correct a parabolic estimate of `s` for the actual eccentricity
    fn correct(&self, q2: f64, start: f64) -> Result<f64> {
        let e = self.eccentricity;
        let g = (1.0 - e) / (1.0 + e);

        let mut s = start;
        for _ in 0..MAX_CORRECTIONS {
            let s0 = s;
            let y = s * s;
            let mut g1 = -y * s;
            let mut q3 = q2 + 2.0 * g * s * y / 3.0;

            let mut z = 1.0;
            loop {
                z += 1.0;
                g1 = -g1 * g * y;
                let term = (z - (z + 1.0) * g) / (2.0 * z + 1.0) * g1;
                q3 += term;
                if z > MAX_SERIES_ORDER || term.abs() > DIVERGENCE_LIMIT {
                    debug!(
                        "near-parabolic series diverged at order {} (s = {})",
                        z, s
                    );
                    return Err(AstroError::NonConvergence {
                        last: s,
                        iterations: z as usize,
                    });
                }
                if term.abs() <= PRECISION {
                    break;
                }
            }

            s = iterate::converge(|s1| (2.0 * s1 * s1 * s1 / 3.0 + q3) / (s1 * s1 + 1.0), s, CUBIC_BUDGET)?;
            if (s - s0).abs() <= PRECISION {
                return Ok(s);
            }
        }

        debug!("near-parabolic correction did not settle (s = {})", s);
        Err(AstroError::NonConvergence {
            last: s,
            iterations: MAX_CORRECTIONS,
        })
    }
}

impl AnomalyDistanceModel for NearParabolicElements {
    fn anomaly_distance(&self, jde: f64) -> Result<AnomalyDistance> {
        let q = self.perihelion_distance;
        let e = self.eccentricity;

        let t = jde - self.time_perihelion;
        if t == 0.0 {
            return Ok(AnomalyDistance {
                true_anomaly: 0.0,
                distance: q,
            });
        }

        // Parabolic starting value
        let q1 = K * ((1.0 + e) / q).sqrt() / (2.0 * q);
        let q2 = q1 * t;
        let mut s = 2.0 / (3.0 * q2.abs());
        s = 2.0 / (2.0 * ((s.atan() / 2.0).tan().cbrt()).atan()).tan();
        if t < 0.0 {
            s = -s;
        }

        if e != 1.0 {
            s = self.correct(q2, s)?;
        }

        let nu = 2.0 * s.atan();
        Ok(AnomalyDistance {
            true_anomaly: pmod(nu, TAU),
            distance: q * (1.0 + e) / (1.0 + e * nu.cos()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEG2RAD;
    use crate::orbit::ParabolicElements;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    const T: f64 = 2_451_545.0;

    // Test cases from Meeus chapter 35
    #[rstest]
    #[case(0.921_326, 1.0, 138.478_3, 102.744_26, 2.364_192)]
    #[case(0.1, 0.987, 254.9, 164.500_29, 4.063_777)]
    #[case(0.123_456, 0.999_97, -30.47, 221.911_90, 0.965_053)]
    #[case(3.363_943, 1.057_31, 1237.1, 109.405_98, 10.668_551)]
    #[case(0.587_101_8, 0.967_274_6, 20.0, 52.853_31, 0.729_116)]
    fn test_meeus_cases(
        #[case] q: f64,
        #[case] e: f64,
        #[case] dt: f64,
        #[case] nu_deg: f64,
        #[case] r: f64,
    ) {
        let orbit = NearParabolicElements::new(T, q, e).unwrap();
        let ad = orbit.anomaly_distance(T + dt).unwrap();
        assert_abs_diff_eq!(ad.true_anomaly / DEG2RAD, nu_deg, epsilon = 1e-5);
        assert_abs_diff_eq!(ad.distance, r, epsilon = 1e-6);
    }

    #[test]
    fn test_at_perihelion() {
        let orbit = NearParabolicElements::new(T, 0.587_101_8, 0.967_274_6).unwrap();
        let ad = orbit.anomaly_distance(T).unwrap();
        assert_eq!(ad.true_anomaly, 0.0);
        assert_eq!(ad.distance, 0.587_101_8);
    }

    #[test]
    fn test_unit_eccentricity_matches_parabolic_model() {
        let near = NearParabolicElements::new(T, 1.3, 1.0).unwrap();
        let parabolic = ParabolicElements::new(T, 1.3).unwrap();
        for dt in [-400.0, -3.0, 17.0, 250.0] {
            let a = near.anomaly_distance(T + dt).unwrap();
            let b = parabolic.anomaly_distance(T + dt).unwrap();
            assert_abs_diff_eq!(a.true_anomaly, b.true_anomaly, epsilon = 1e-9);
            assert_abs_diff_eq!(a.distance, b.distance, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_far_from_perihelion_fails() {
        // The series in g diverges this far out on a fairly eccentric ellipse
        let orbit = NearParabolicElements::new(T, 0.1, 0.9).unwrap();
        let err = orbit.anomaly_distance(T + 10_000.0).unwrap_err();
        assert!(matches!(err, AstroError::NonConvergence { .. }));
    }

    #[test]
    fn test_eccentricity_outside_band_rejected() {
        // Stricter behavior: the band is validated when the elements are built
        assert!(matches!(
            NearParabolicElements::new(T, 1.0, 0.5),
            Err(AstroError::PreconditionViolation(_))
        ));
        assert!(NearParabolicElements::new(T, 1.0, 1.2).is_err());
        assert!(NearParabolicElements::new(T, 0.0, 1.0).is_err());
    }
}
