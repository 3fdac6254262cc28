//! Conjunctions from five-row ephemerides (Meeus chapter 18)
//!
//! The times of the rows are arbitrary but equally spaced; results are in the
//! same time scale. Coordinates may be equatorial or ecliptic as long as both
//! ephemerides use the same frame.

use crate::coordinates::{wrap_angle, Equatorial};
use crate::errors::Result;
use crate::interpolation::Len5;
use log::debug;

/// Conjunction of two moving bodies
///
/// `first` and `second` are the ephemerides of the two bodies at `t1` and the
/// three following equally spaced times up to `t5`. Returns the time at which
/// the right ascensions are equal and how far the second body is north of the
/// first at that time (radians, negative when south).
///
/// # Errors
///
/// [`AstroError::ZeroOutside`](crate::errors::AstroError::ZeroOutside) if
/// there is no conjunction within the ephemeris, or the interpolation errors
/// of [`Len5`].
pub fn planetary(
    t1: f64,
    t5: f64,
    first: &[Equatorial; 5],
    second: &[Equatorial; 5],
) -> Result<(f64, f64)> {
    let raw = [0, 1, 2, 3, 4].map(|i| second[i].ra - first[i].ra);
    let d_dec = [0, 1, 2, 3, 4].map(|i| second[i].dec - first[i].dec);

    // Reduce the first difference only and unwrap the rest, so the series
    // never jumps by 2π (at RA 0h or at opposition)
    let mut d_ra = [0.0; 5];
    d_ra[0] = wrap_angle(raw[0]);
    for i in 1..5 {
        d_ra[i] = d_ra[i - 1] + wrap_angle(raw[i] - raw[i - 1]);
    }
    conjunction(t1, t5, d_ra, d_dec)
}

/// Conjunction of a moving body with a fixed one such as a star
///
/// Same as [`planetary`] with the ephemeris of the first object replaced by
/// its fixed position.
pub fn stellar(
    t1: f64,
    t5: f64,
    star: &Equatorial,
    body: &[Equatorial; 5],
) -> Result<(f64, f64)> {
    planetary(t1, t5, &[*star; 5], body)
}

fn conjunction(t1: f64, t5: f64, d_ra: [f64; 5], d_dec: [f64; 5]) -> Result<(f64, f64)> {
    let t = Len5::new(t1, t5, d_ra)?.zero(true)?;
    let separation = Len5::new(t1, t5, d_dec)?.interpolate_x_strict(t)?;
    debug!("conjunction at {}, separation {} rad", t, separation);
    Ok((t, separation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEG2RAD, RAD2DEG};
    use crate::errors::AstroError;
    use approx::assert_abs_diff_eq;

    fn hms(h: f64, m: f64, s: f64) -> f64 {
        (h + m / 60.0 + s / 3600.0) * 15.0 * DEG2RAD
    }

    fn dms(d: f64, m: f64, s: f64) -> f64 {
        (d + m / 60.0 + s / 3600.0) * DEG2RAD
    }

    #[test]
    fn test_meeus_18a() {
        // Mercury and Venus, 1991 August 5 to 9 at 0h TD
        let mercury = [
            Equatorial::new(hms(10.0, 24.0, 30.125), dms(6.0, 26.0, 32.05)),
            Equatorial::new(hms(10.0, 25.0, 0.342), dms(6.0, 10.0, 57.72)),
            Equatorial::new(hms(10.0, 25.0, 12.515), dms(5.0, 57.0, 33.08)),
            Equatorial::new(hms(10.0, 25.0, 6.235), dms(5.0, 46.0, 27.07)),
            Equatorial::new(hms(10.0, 24.0, 41.185), dms(5.0, 38.0, 48.59)),
        ];
        let venus = [
            Equatorial::new(hms(10.0, 27.0, 27.175), dms(4.0, 4.0, 41.83)),
            Equatorial::new(hms(10.0, 26.0, 32.410), dms(3.0, 55.0, 54.66)),
            Equatorial::new(hms(10.0, 25.0, 29.042), dms(3.0, 47.0, 3.95)),
            Equatorial::new(hms(10.0, 24.0, 17.191), dms(3.0, 38.0, 9.94)),
            Equatorial::new(hms(10.0, 22.0, 57.024), dms(3.0, 29.0, 13.15)),
        ];
        let (t, separation) = planetary(5.0, 9.0, &mercury, &venus).unwrap();
        // August 7.23797, Mercury 2°09'43" north of Venus
        assert_abs_diff_eq!(t, 7.23797, epsilon = 1e-5);
        assert_abs_diff_eq!(separation * RAD2DEG, -2.16202, epsilon = 1e-4);
    }

    #[test]
    fn test_stellar_linear_motion() {
        // Body moving 0.5° per day in RA and -0.1° per day in Dec, passing the
        // star 2.5 days after t1
        let star = Equatorial::from_degrees(120.0, 20.0);
        let body = [0, 1, 2, 3, 4].map(|i| {
            let day = i as f64;
            Equatorial::from_degrees(118.75 + 0.5 * day, 21.0 - 0.1 * day)
        });
        let (t, separation) = stellar(0.0, 4.0, &star, &body).unwrap();
        assert_abs_diff_eq!(t, 2.5, epsilon = 1e-9);
        assert_abs_diff_eq!(separation * RAD2DEG, 0.75, epsilon = 1e-9);
    }

    #[test]
    fn test_stellar_across_zero_right_ascension() {
        let star = Equatorial::from_degrees(0.2, 0.0);
        let body = [0, 1, 2, 3, 4].map(|i| Equatorial::from_degrees((359.0 + 0.5 * i as f64) % 360.0, 1.0));
        let (t, _) = stellar(10.0, 14.0, &star, &body).unwrap();
        assert_abs_diff_eq!(t, 12.4, epsilon = 1e-9);
    }

    #[test]
    fn test_opposition_is_not_a_conjunction() {
        // Body stays about 180° from the star, crossing exactly opposite it
        let star = Equatorial::from_degrees(0.0, 0.0);
        let body = [0, 1, 2, 3, 4].map(|i| Equatorial::from_degrees(178.0 + i as f64, 1.0));
        assert_eq!(
            stellar(0.0, 4.0, &star, &body),
            Err(AstroError::ZeroOutside)
        );
    }

    #[test]
    fn test_planetary_opposition_across_zero_right_ascension() {
        let first = [0, 1, 2, 3, 4].map(|i| Equatorial::from_degrees(358.0 + i as f64, 0.0));
        // The separation passes through exactly 180° on the middle row
        let second = [0, 1, 2, 3, 4].map(|i| Equatorial::from_degrees(179.0 + 0.5 * i as f64, 0.0));
        assert_eq!(
            planetary(0.0, 4.0, &first, &second),
            Err(AstroError::ZeroOutside)
        );
    }

    #[test]
    fn test_no_conjunction_in_ephemeris() {
        let star = Equatorial::from_degrees(150.0, 0.0);
        let body = [0, 1, 2, 3, 4].map(|i| Equatorial::from_degrees(100.0 + i as f64, 0.0));
        assert_eq!(
            stellar(0.0, 4.0, &star, &body),
            Err(AstroError::ZeroOutside)
        );
    }
}
