// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Nutation and obliquity of the ecliptic (Meeus, chapter 22).
//!
//! Nutation follows the IAU 1980 theory with terms below 0.0003″ dropped.
//! Two mean-obliquity polynomials are available:
//!
//! | Function | Model | Validity |
//! |----------|-------|----------|
//! | [`mean_obliquity`] | IAU 1980 (22.2) | 1″ over 1000–3000 |
//! | [`mean_obliquity_laskar`] | Laskar 1986 (22.3) | 0.01″ over 1000–3000, a few ″ over −8000…+12000 |
//!
//! The pipelines use the Laskar polynomial for the true obliquity.

use crate::julian_day::JulianDay;
use crate::math::poly;

const ARCSEC_TO_RAD: f64 = std::f64::consts::PI / (180.0 * 3600.0);

// Fundamental arguments in degrees, polynomials in T (centuries of TD).
const ELONGATION: [f64; 4] = [297.850_36, 445_267.111_48, -0.001_914_2, 1.0 / 189_474.0];
const SUN_ANOMALY: [f64; 4] = [357.527_72, 35_999.050_340, -0.000_160_3, -1.0 / 300_000.0];
const MOON_ANOMALY: [f64; 4] = [134.962_98, 477_198.867_398, 0.008_697_2, 1.0 / 5620.0];
const MOON_LATITUDE: [f64; 4] = [93.271_91, 483_202.017_538, -0.003_682_5, 1.0 / 327_270.0];
const NODE: [f64; 4] = [125.044_52, -1934.136_261, 0.002_070_8, 1.0 / 450_000.0];

/// Table 22.A: multipliers of D, M, M′, F, Ω, then Δψ (s0 + s1·T) and
/// Δε (c0 + c1·T) in units of 0.0001″.
#[rustfmt::skip]
static NUTATION_TERMS: [[f64; 9]; 63] = [
    [ 0.0, 0.0, 0.0, 0.0, 1.0, -171996.0, -174.2, 92025.0,  8.9],
    [-2.0, 0.0, 0.0, 2.0, 2.0,  -13187.0,   -1.6,  5736.0, -3.1],
    [ 0.0, 0.0, 0.0, 2.0, 2.0,   -2274.0,   -0.2,   977.0, -0.5],
    [ 0.0, 0.0, 0.0, 0.0, 2.0,    2062.0,    0.2,  -895.0,  0.5],
    [ 0.0, 1.0, 0.0, 0.0, 0.0,    1426.0,   -3.4,    54.0, -0.1],
    [ 0.0, 0.0, 1.0, 0.0, 0.0,     712.0,    0.1,    -7.0,  0.0],
    [-2.0, 1.0, 0.0, 2.0, 2.0,    -517.0,    1.2,   224.0, -0.6],
    [ 0.0, 0.0, 0.0, 2.0, 1.0,    -386.0,   -0.4,   200.0,  0.0],
    [ 0.0, 0.0, 1.0, 2.0, 2.0,    -301.0,    0.0,   129.0, -0.1],
    [-2.0,-1.0, 0.0, 2.0, 2.0,     217.0,   -0.5,   -95.0,  0.3],
    [-2.0, 0.0, 1.0, 0.0, 0.0,    -158.0,    0.0,     0.0,  0.0],
    [-2.0, 0.0, 0.0, 2.0, 1.0,     129.0,    0.1,   -70.0,  0.0],
    [ 0.0, 0.0,-1.0, 2.0, 2.0,     123.0,    0.0,   -53.0,  0.0],
    [ 2.0, 0.0, 0.0, 0.0, 0.0,      63.0,    0.0,     0.0,  0.0],
    [ 0.0, 0.0, 1.0, 0.0, 1.0,      63.0,    0.1,   -33.0,  0.0],
    [ 2.0, 0.0,-1.0, 2.0, 2.0,     -59.0,    0.0,    26.0,  0.0],
    [ 0.0, 0.0,-1.0, 0.0, 1.0,     -58.0,   -0.1,    32.0,  0.0],
    [ 0.0, 0.0, 1.0, 2.0, 1.0,     -51.0,    0.0,    27.0,  0.0],
    [-2.0, 0.0, 2.0, 0.0, 0.0,      48.0,    0.0,     0.0,  0.0],
    [ 0.0, 0.0,-2.0, 2.0, 1.0,      46.0,    0.0,   -24.0,  0.0],
    [ 2.0, 0.0, 0.0, 2.0, 2.0,     -38.0,    0.0,    16.0,  0.0],
    [ 0.0, 0.0, 2.0, 2.0, 2.0,     -31.0,    0.0,    13.0,  0.0],
    [ 0.0, 0.0, 2.0, 0.0, 0.0,      29.0,    0.0,     0.0,  0.0],
    [-2.0, 0.0, 1.0, 2.0, 2.0,      29.0,    0.0,   -12.0,  0.0],
    [ 0.0, 0.0, 0.0, 2.0, 0.0,      26.0,    0.0,     0.0,  0.0],
    [-2.0, 0.0, 0.0, 2.0, 0.0,     -22.0,    0.0,     0.0,  0.0],
    [ 0.0, 0.0,-1.0, 2.0, 1.0,      21.0,    0.0,   -10.0,  0.0],
    [ 0.0, 2.0, 0.0, 0.0, 0.0,      17.0,   -0.1,     0.0,  0.0],
    [ 2.0, 0.0,-1.0, 0.0, 1.0,      16.0,    0.0,    -8.0,  0.0],
    [-2.0, 2.0, 0.0, 2.0, 2.0,     -16.0,    0.1,     7.0,  0.0],
    [ 0.0, 1.0, 0.0, 0.0, 1.0,     -15.0,    0.0,     9.0,  0.0],
    [-2.0, 0.0, 1.0, 0.0, 1.0,     -13.0,    0.0,     7.0,  0.0],
    [ 0.0,-1.0, 0.0, 0.0, 1.0,     -12.0,    0.0,     6.0,  0.0],
    [ 0.0, 0.0, 2.0,-2.0, 0.0,      11.0,    0.0,     0.0,  0.0],
    [ 2.0, 0.0,-1.0, 2.0, 1.0,     -10.0,    0.0,     5.0,  0.0],
    [ 2.0, 0.0, 1.0, 2.0, 2.0,      -8.0,    0.0,     3.0,  0.0],
    [ 0.0, 1.0, 0.0, 2.0, 2.0,       7.0,    0.0,    -3.0,  0.0],
    [-2.0, 1.0, 1.0, 0.0, 0.0,      -7.0,    0.0,     0.0,  0.0],
    [ 0.0,-1.0, 0.0, 2.0, 2.0,      -7.0,    0.0,     3.0,  0.0],
    [ 2.0, 0.0, 0.0, 2.0, 1.0,      -7.0,    0.0,     3.0,  0.0],
    [ 2.0, 0.0, 1.0, 0.0, 0.0,       6.0,    0.0,     0.0,  0.0],
    [-2.0, 0.0, 2.0, 2.0, 2.0,       6.0,    0.0,    -3.0,  0.0],
    [-2.0, 0.0, 1.0, 2.0, 1.0,       6.0,    0.0,    -3.0,  0.0],
    [ 2.0, 0.0,-2.0, 0.0, 1.0,      -6.0,    0.0,     3.0,  0.0],
    [ 2.0, 0.0, 0.0, 0.0, 1.0,      -6.0,    0.0,     3.0,  0.0],
    [ 0.0,-1.0, 1.0, 0.0, 0.0,       5.0,    0.0,     0.0,  0.0],
    [-2.0,-1.0, 0.0, 2.0, 1.0,      -5.0,    0.0,     3.0,  0.0],
    [-2.0, 0.0, 0.0, 0.0, 1.0,      -5.0,    0.0,     3.0,  0.0],
    [ 0.0, 0.0, 2.0, 2.0, 1.0,      -5.0,    0.0,     3.0,  0.0],
    [-2.0, 0.0, 2.0, 0.0, 1.0,       4.0,    0.0,     0.0,  0.0],
    [-2.0, 1.0, 0.0, 2.0, 1.0,       4.0,    0.0,     0.0,  0.0],
    [ 0.0, 0.0, 1.0,-2.0, 0.0,       4.0,    0.0,     0.0,  0.0],
    [-1.0, 0.0, 1.0, 0.0, 0.0,      -4.0,    0.0,     0.0,  0.0],
    [-2.0, 1.0, 0.0, 0.0, 0.0,      -4.0,    0.0,     0.0,  0.0],
    [ 1.0, 0.0, 0.0, 0.0, 0.0,      -4.0,    0.0,     0.0,  0.0],
    [ 0.0, 0.0, 1.0, 2.0, 0.0,       3.0,    0.0,     0.0,  0.0],
    [ 0.0, 0.0,-2.0, 2.0, 2.0,      -3.0,    0.0,     0.0,  0.0],
    [-1.0,-1.0, 1.0, 0.0, 0.0,      -3.0,    0.0,     0.0,  0.0],
    [ 0.0, 1.0, 1.0, 0.0, 0.0,      -3.0,    0.0,     0.0,  0.0],
    [ 0.0,-1.0, 1.0, 2.0, 2.0,      -3.0,    0.0,     0.0,  0.0],
    [ 2.0,-1.0,-1.0, 2.0, 2.0,      -3.0,    0.0,     0.0,  0.0],
    [ 0.0, 0.0, 3.0, 2.0, 2.0,      -3.0,    0.0,     0.0,  0.0],
    [ 2.0,-1.0, 0.0, 2.0, 2.0,      -3.0,    0.0,     0.0,  0.0],];

/// Nutation in longitude and in obliquity, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nutation {
    /// Δψ
    pub delta_lon: f64,
    /// Δε
    pub delta_obliquity: f64,
}

/// Nutation (Δψ, Δε) at the instant's JDE.
///
/// Terms are summed smallest first.
pub fn nutation(jd: &JulianDay) -> Nutation {
    let t = jd.jde_j2000_century().value();
    let d = poly(t, &ELONGATION).to_radians();
    let m = poly(t, &SUN_ANOMALY).to_radians();
    let n = poly(t, &MOON_ANOMALY).to_radians();
    let f = poly(t, &MOON_LATITUDE).to_radians();
    let omega = poly(t, &NODE).to_radians();

    let (dpsi, deps) = NUTATION_TERMS
        .iter()
        .rev()
        .fold((0.0, 0.0), |(dpsi, deps), row| {
            let arg = row[0] * d + row[1] * m + row[2] * n + row[3] * f + row[4] * omega;
            let (s, c) = arg.sin_cos();
            (
                dpsi + s * (row[5] + row[6] * t),
                deps + c * (row[7] + row[8] * t),
            )
        });

    Nutation {
        delta_lon: dpsi * 1e-4 * ARCSEC_TO_RAD,
        delta_obliquity: deps * 1e-4 * ARCSEC_TO_RAD,
    }
}

/// Mean obliquity, IAU 1980 polynomial (22.2).
pub fn mean_obliquity(jd: &JulianDay) -> f64 {
    const COEFFS: [f64; 4] = [84_381.448, -46.815, -0.000_59, 0.001_813];
    poly(jd.jde_j2000_century().value(), &COEFFS) * ARCSEC_TO_RAD
}

/// Mean obliquity, Laskar 1986 polynomial (22.3) in units of 10 000 years.
pub fn mean_obliquity_laskar(jd: &JulianDay) -> f64 {
    #[rustfmt::skip]
    const COEFFS: [f64; 11] = [
        84_381.448, -4680.93, -1.55, 1999.25, -51.38, -249.67,
        -39.05, 7.12, 27.87, 5.79, 2.45,
    ];
    poly(jd.jde_j2000_century().value() * 0.01, &COEFFS) * ARCSEC_TO_RAD
}

/// True obliquity ε = ε₀ (Laskar) + Δε.
pub fn true_obliquity(jd: &JulianDay) -> f64 {
    mean_obliquity_laskar(jd) + nutation(jd).delta_obliquity
}

/// Nutation in right ascension (equation of the equinoxes), Δψ·cos ε.
pub fn nutation_in_ra(jd: &JulianDay) -> f64 {
    let nut = nutation(jd);
    nut.delta_lon * (mean_obliquity_laskar(jd) + nut.delta_obliquity).cos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtty::Seconds;

    fn to_arcsec(rad: f64) -> f64 {
        rad / ARCSEC_TO_RAD
    }

    /// 1987 April 10, 0h TD (Meeus example 22.a).
    fn example_22a() -> JulianDay {
        JulianDay::new(2_446_895.5, Some(Seconds::new(0.0)))
    }

    #[test]
    fn table_shape() {
        assert_eq!(NUTATION_TERMS.len(), 63);
        assert_eq!(NUTATION_TERMS[0][5], -171_996.0);
    }

    #[test]
    fn meeus_example_22a() {
        let jd = example_22a();
        let nut = nutation(&jd);
        assert!((to_arcsec(nut.delta_lon) + 3.788).abs() < 0.01);
        assert!((to_arcsec(nut.delta_obliquity) - 9.443).abs() < 0.01);

        // ε₀ = 23°26′27.407″
        let eps0 = to_arcsec(mean_obliquity(&jd)) - 23.0 * 3600.0 - 26.0 * 60.0;
        assert!((eps0 - 27.407).abs() < 0.01);
        // ε = 23°26′36.850″
        let eps = to_arcsec(true_obliquity(&jd)) - 23.0 * 3600.0 - 26.0 * 60.0;
        assert!((eps - 36.850).abs() < 0.02);
    }

    #[test]
    fn j2000_sanity() {
        let jd = JulianDay::new(2_451_545.0, None);
        let nut = nutation(&jd);
        assert!((to_arcsec(nut.delta_lon) + 13.9).abs() < 0.2);
        assert!((mean_obliquity_laskar(&jd).to_degrees() - 23.4393).abs() < 1.0 / 3600.0);
        assert!((mean_obliquity(&jd) - mean_obliquity_laskar(&jd)).abs() < ARCSEC_TO_RAD);
    }

    #[test]
    fn equation_of_the_equinoxes() {
        let jd = example_22a();
        let nut = nutation(&jd);
        let eq = nutation_in_ra(&jd);
        assert!(eq.abs() < nut.delta_lon.abs());
        assert!((eq / nut.delta_lon - true_obliquity(&jd).cos()).abs() < 1e-12);
    }
}
