// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Numeric primitives shared by every series evaluation in the crate.

use crate::error::{AstroError, AstroResult};

/// Evaluates a polynomial with Horner's scheme.
///
/// Coefficients are ordered **constant term first**:
/// `c[0] + c[1]·x + c[2]·x² + …`.
///
/// # Errors
///
/// [`AstroError::EmptyPolynomial`] when `coeffs` is empty.
#[inline]
pub fn horner(x: f64, coeffs: &[f64]) -> AstroResult<f64> {
    let (last, rest) = coeffs.split_last().ok_or(AstroError::EmptyPolynomial)?;
    Ok(rest.iter().rev().fold(*last, |acc, c| acc * x + c))
}

/// Horner evaluation of a fixed-size coefficient table, constant term first.
///
/// Used for the built-in series, whose tables are never empty.
#[inline]
pub(crate) fn poly<const N: usize>(x: f64, coeffs: &[f64; N]) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Positive modulo: for `y > 0` the result lies in `[0, y)`.
#[inline]
pub fn pmod(x: f64, y: f64) -> f64 {
    let r = x % y;
    // `r + y` can round up to exactly `y` for tiny negative remainders.
    if r < 0.0 {
        let r = r + y;
        if r >= y {
            0.0
        } else {
            r
        }
    } else {
        r
    }
}

/// Splits `v` into integer and fractional parts, both carrying the sign of `v`.
///
/// `modf(-3.7) == (-3.0, -0.7)` (up to rounding of the fraction).
#[inline]
pub fn modf(v: f64) -> (f64, f64) {
    let int = v.trunc();
    (int, v - int)
}

/// Rounds `num` to `digits` decimal places.
#[inline]
pub fn format_num(num: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits as i32);
    (num * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horner_constant_first() {
        // 1 + 2x + 3x² at x = 2
        assert_eq!(horner(2.0, &[1.0, 2.0, 3.0]).unwrap(), 17.0);
        assert_eq!(horner(5.0, &[4.0]).unwrap(), 4.0);
    }

    #[test]
    fn poly_matches_horner() {
        let c = [0.5, -1.25, 3.0, 0.125];
        assert_eq!(poly(1.7, &c), horner(1.7, &c).unwrap());
    }

    #[test]
    fn horner_rejects_empty() {
        assert_eq!(horner(1.0, &[]), Err(AstroError::EmptyPolynomial));
    }

    #[test]
    fn pmod_is_positive() {
        assert_eq!(pmod(370.0, 360.0), 10.0);
        assert_eq!(pmod(-10.0, 360.0), 350.0);
        assert_eq!(pmod(-360.0, 360.0), 0.0);
        assert!(pmod(-1e-18, 360.0) < 360.0);
    }

    #[test]
    fn modf_keeps_sign() {
        let (i, f) = modf(-3.7);
        assert_eq!(i, -3.0);
        assert!((f + 0.7).abs() < 1e-12);

        let (i, f) = modf(2_451_545.25);
        assert_eq!(i, 2_451_545.0);
        assert!((f - 0.25).abs() < 1e-12);
    }

    #[test]
    fn format_num_rounds() {
        assert_eq!(format_num(1.234_56, 4), 1.2346);
        assert_eq!(format_num(-0.000_04, 4), -0.0);
    }
}
