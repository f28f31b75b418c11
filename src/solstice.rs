// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Equinoxes and solstices (Meeus, chapter 27).
//!
//! A mean instant from a polynomial in millennia is corrected by 24 periodic
//! terms. Results are JDE (TD) and good to about a minute over 1951–2050,
//! and usable from −1000 to +3000.

use std::f64::consts::PI;

use crate::julian_day::centuries_since_j2000;
use crate::math::poly;

const DEG: f64 = PI / 180.0;

// Table 27.A, years −1000 … +1000, argument Y = year / 1000.
const MARCH_0: [f64; 5] = [1_721_139.291_89, 365_242.137_40, 0.061_34, 0.001_11, -0.000_71];
const JUNE_0: [f64; 5] = [1_721_233.254_01, 365_241.725_62, -0.052_32, 0.009_07, 0.000_25];
const SEPTEMBER_0: [f64; 5] = [1_721_325.704_55, 365_242.495_58, -0.116_77, -0.002_97, 0.000_74];
const DECEMBER_0: [f64; 5] = [1_721_414.399_87, 365_242.882_57, -0.007_69, -0.009_33, -0.000_06];

// Table 27.B, years +1000 … +3000, argument Y = (year − 2000) / 1000.
const MARCH_2: [f64; 5] = [2_451_623.809_84, 365_242.374_04, 0.051_69, -0.004_11, -0.000_57];
const JUNE_2: [f64; 5] = [2_451_716.567_67, 365_241.626_03, 0.003_25, 0.008_88, -0.000_30];
const SEPTEMBER_2: [f64; 5] = [2_451_810.217_15, 365_242.017_67, -0.115_75, 0.003_37, 0.000_78];
const DECEMBER_2: [f64; 5] = [2_451_900.059_52, 365_242.740_49, -0.062_23, -0.008_23, 0.000_32];

/// Table 27.C: amplitude, phase (°), rate (° per century).
#[rustfmt::skip]
static PERIODIC_TERMS: [[f64; 3]; 24] = [
    [485.0, 324.96,   1934.136],
    [203.0, 337.23,  32964.467],
    [199.0, 342.08,     20.186],
    [182.0,  27.85, 445267.112],
    [156.0,  73.14,  45036.886],
    [136.0, 171.52,  22518.443],
    [ 77.0, 222.54,  65928.934],
    [ 74.0, 296.72,   3034.906],
    [ 70.0, 243.58,   9037.513],
    [ 58.0, 119.81,  33718.147],
    [ 52.0, 297.17,    150.678],
    [ 50.0,  21.02,   2281.226],
    [ 45.0, 247.54,  29929.562],
    [ 44.0, 325.15,  31555.956],
    [ 29.0,  60.93,   4443.417],
    [ 18.0, 155.12,  67555.328],
    [ 17.0, 288.79,   4562.452],
    [ 16.0, 198.04,  62894.029],
    [ 14.0, 199.76,  31436.921],
    [ 12.0,  95.39,  14577.848],
    [ 12.0, 287.11,  31931.756],
    [ 12.0, 320.81,  34777.259],
    [  9.0, 227.73,   1222.114],
    [  8.0,  15.45,  16859.074],
];

/// The four cardinal points of the Sun's apparent longitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Season {
    /// March equinox, λ☉ = 0°.
    March,
    /// June solstice, λ☉ = 90°.
    June,
    /// September equinox, λ☉ = 180°.
    September,
    /// December solstice, λ☉ = 270°.
    December,
}

impl Season {
    fn tables(self) -> (&'static [f64; 5], &'static [f64; 5]) {
        match self {
            Self::March => (&MARCH_0, &MARCH_2),
            Self::June => (&JUNE_0, &JUNE_2),
            Self::September => (&SEPTEMBER_0, &SEPTEMBER_2),
            Self::December => (&DECEMBER_0, &DECEMBER_2),
        }
    }
}

/// JDE of the given equinox or solstice in `year`.
pub fn season(year: i32, season: Season) -> f64 {
    let (early, late) = season.tables();
    let (y, coeffs) = if year < 1000 {
        (year as f64, early)
    } else {
        ((year - 2000) as f64, late)
    };
    let jde = corrected(poly(y * 0.001, coeffs));
    log::trace!("{season:?} {year}: JDE {jde}");
    jde
}

/// Mean instant `J0` plus the periodic correction of table 27.C.
fn corrected(j0: f64) -> f64 {
    let t = centuries_since_j2000(j0).value();
    let w = 35_999.373 * DEG * t - 2.47 * DEG;
    let dl = 1.0 + 0.0334 * w.cos() + 0.0007 * (2.0 * w).cos();
    let s = PERIODIC_TERMS
        .iter()
        .rev()
        .fold(0.0, |acc, &[a, b, c]| acc + a * ((b + c * t) * DEG).cos());
    j0 + 0.000_01 * s / dl
}

#[inline]
pub fn march(year: i32) -> f64 {
    season(year, Season::March)
}

#[inline]
pub fn june(year: i32) -> f64 {
    season(year, Season::June)
}

#[inline]
pub fn september(year: i32) -> f64 {
    season(year, Season::September)
}

#[inline]
pub fn december(year: i32) -> f64 {
    season(year, Season::December)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meeus_example_27a() {
        // June solstice 1962: J0 = 2437837.38589, corrected 2437837.39245
        assert!((poly(-0.038, &JUNE_2) - 2_437_837.385_89).abs() < 1e-5);
        assert!((june(1962) - 2_437_837.392_45).abs() < 1e-5);
    }

    #[test]
    fn march_2000() {
        // 2000 March 20, 7h36m TD
        assert!((march(2000) - 2_451_623.817).abs() < 1e-3);
    }

    #[test]
    fn seasons_are_ordered() {
        for year in [-500, 0, 999, 1000, 1582, 2024, 2500] {
            let (m, j, s, d) = (march(year), june(year), september(year), december(year));
            assert!(m < j && j < s && s < d, "year {year}");
            assert!(d - m > 270.0 && d - m < 280.0);
        }
    }

    #[test]
    fn table_switch_is_continuous() {
        // the early and late polynomials describe the same year 1000
        let early = corrected(poly(1.0, &MARCH_0));
        let late = march(1000);
        assert!((early - late).abs() < 0.01);
    }

    #[test]
    fn tropical_year_spacing() {
        let gap = march(2001) - march(2000);
        assert!((gap - 365.2422).abs() < 0.05);
    }
}
