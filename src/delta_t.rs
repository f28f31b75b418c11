// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # ΔT (Delta T): UT↔TD correction layer
//!
//! Piecewise polynomial model for **ΔT = TD − UT** from Espenak & Meeus,
//! *Five Millennium Canon of Solar Eclipses: −1999 to +3000*
//! (NASA/TP-2006-214141).
//!
//! The model is keyed by the decimal year `y + (m − 0.5)/12` of the calendar
//! date, and every branch is a polynomial in a locally shifted year:
//!
//! | Decimal year | Variable |
//! |--------------|----------|
//! | < −500 | `u = (y − 1820)/100` |
//! | < 500 | `u = y/100` |
//! | < 1600 | `u = (y − 1000)/100` |
//! | < 1700 … < 2050 | `t = y − epoch` (years) |
//! | < 2150 | parabola blended towards the long-term formula |
//! | ≥ 2150 | `u = (y − 1820)/100` |
//!
//! Out-of-table years never fail: they fall through to the long-term parabola.
//!
//! ## Quick Example
//! ```rust
//! use solunar::delta_t;
//!
//! let dt = delta_t::estimate(2_451_545.0);
//! assert!((dt.value() - 63.87).abs() < 0.1);
//! ```

use crate::calendar::jd_to_calendar;
use qtty::{Day, Seconds};

// ------------------------------------------------------------------------------------
// ΔT Approximation Sections by Time Interval
// ------------------------------------------------------------------------------------

/// Long-term parabola `−20 + 32u²`, `u` in centuries since 1820.
#[inline]
fn delta_t_long_term(year: f64) -> f64 {
    let u = (year - 1820.0) / 100.0;
    -20.0 + 32.0 * u * u
}

/// **−500 … 500**
#[inline]
fn delta_t_antiquity(year: f64) -> f64 {
    let u = year / 100.0;
    10_583.6 - 1_014.41 * u + 33.783_11 * u.powi(2) - 5.952_053 * u.powi(3)
        - 0.179_845_2 * u.powi(4)
        + 0.022_174_192 * u.powi(5)
        + 0.009_031_652_1 * u.powi(6)
}

/// **500 … 1600**
#[inline]
fn delta_t_medieval(year: f64) -> f64 {
    let u = (year - 1000.0) / 100.0;
    1_574.2 - 556.01 * u + 71.234_72 * u.powi(2) + 0.319_781 * u.powi(3)
        - 0.850_346_3 * u.powi(4)
        - 0.005_050_998 * u.powi(5)
        + 0.008_357_207_3 * u.powi(6)
}

/// **1600 … 1860**, telescopic era.
#[inline]
fn delta_t_telescopic(year: f64) -> f64 {
    if year < 1700.0 {
        let t = year - 1600.0;
        120.0 - 0.9808 * t - 0.01532 * t.powi(2) + t.powi(3) / 7129.0
    } else if year < 1800.0 {
        let t = year - 1700.0;
        8.83 + 0.1603 * t - 0.005_928_5 * t.powi(2) + 0.000_133_36 * t.powi(3)
            - t.powi(4) / 1_174_000.0
    } else {
        let t = year - 1800.0;
        13.72 - 0.332_447 * t + 0.006_861_2 * t.powi(2) + 0.004_111_6 * t.powi(3)
            - 0.000_374_36 * t.powi(4)
            + 0.000_012_127_2 * t.powi(5)
            - 0.000_000_169_9 * t.powi(6)
            + 0.000_000_000_875 * t.powi(7)
    }
}

/// **1860 … 1986**
#[inline]
fn delta_t_modern(year: f64) -> f64 {
    if year < 1900.0 {
        let t = year - 1860.0;
        7.62 + 0.5737 * t - 0.251_754 * t.powi(2) + 0.016_806_68 * t.powi(3)
            - 0.000_447_362_4 * t.powi(4)
            + t.powi(5) / 233_174.0
    } else if year < 1920.0 {
        let t = year - 1900.0;
        -2.79 + 1.494_119 * t - 0.059_893_9 * t.powi(2) + 0.006_196_6 * t.powi(3)
            - 0.000_197 * t.powi(4)
    } else if year < 1941.0 {
        let t = year - 1920.0;
        21.20 + 0.844_93 * t - 0.076_100 * t.powi(2) + 0.002_093_6 * t.powi(3)
    } else if year < 1961.0 {
        let t = year - 1950.0;
        29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2547.0
    } else {
        let t = year - 1975.0;
        45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0
    }
}

/// **1986 … 2150**
#[inline]
fn delta_t_recent(year: f64) -> f64 {
    if year < 2005.0 {
        let t = year - 2000.0;
        63.86 + 0.3345 * t - 0.060_374 * t.powi(2)
            + 0.001_727_5 * t.powi(3)
            + 0.000_651_814 * t.powi(4)
            + 0.000_023_735_99 * t.powi(5)
    } else if year < 2050.0 {
        let t = year - 2000.0;
        62.92 + 0.322_17 * t + 0.005_589 * t.powi(2)
    } else {
        delta_t_long_term(year) - 0.5628 * (2150.0 - year)
    }
}

/// Decimal year `y + (m − 0.5)/12` of a Julian Day.
#[inline]
pub fn decimal_year(jd: f64) -> f64 {
    let cal = jd_to_calendar(jd);
    cal.year as f64 + (cal.month as f64 - 0.5) / 12.0
}

/// Estimated **ΔT** in seconds for a Julian Day.
pub fn estimate(jd: f64) -> Seconds {
    let year = decimal_year(jd);
    let dt = match year {
        y if y < -500.0 => delta_t_long_term(y),
        y if y < 500.0 => delta_t_antiquity(y),
        y if y < 1600.0 => delta_t_medieval(y),
        y if y < 1860.0 => delta_t_telescopic(y),
        y if y < 1986.0 => delta_t_modern(y),
        y if y < 2150.0 => delta_t_recent(y),
        y => delta_t_long_term(y),
    };
    log::trace!("ΔT({year:.3}) = {dt:.3} s");
    Seconds::new(dt)
}

/// `jde = jd + ΔT`.
#[inline]
pub fn jd_to_jde(jd: f64, delta_t: Seconds) -> f64 {
    jd + delta_t.to::<Day>().value()
}

/// `jd = jde − ΔT`.
#[inline]
pub fn jde_to_jd(jde: f64, delta_t: Seconds) -> f64 {
    jde - delta_t.to::<Day>().value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{calendar_gregorian_to_jd, calendar_julian_to_jd};

    fn at(year: i32, month: u32) -> Seconds {
        estimate(calendar_gregorian_to_jd(year, month, 1.0))
    }

    #[test]
    fn delta_t_2000() {
        let dt = estimate(2_451_545.0);
        assert!((dt - Seconds::new(63.87)).abs() < Seconds::new(0.1));
    }

    #[test]
    fn delta_t_1990_sample() {
        // Espenak & Meeus tabulate 56.9 s for 1990.
        let dt = at(1990, 1);
        assert!((dt - Seconds::new(56.9)).abs() < Seconds::new(0.5));
    }

    #[test]
    fn delta_t_1900_sample() {
        let dt = at(1900, 1);
        assert!((dt - Seconds::new(-2.7)).abs() < Seconds::new(0.5));
    }

    #[test]
    fn delta_t_medieval_sample() {
        // u = 0 at year 1000
        let dt = estimate(calendar_gregorian_to_jd(1000, 1, 1.0));
        assert!((dt - Seconds::new(1574.2)).abs() < Seconds::new(5.0));
    }

    #[test]
    fn delta_t_far_future_uses_parabola() {
        let jd = calendar_gregorian_to_jd(2500, 7, 1.0);
        let year = decimal_year(jd);
        let expected = delta_t_long_term(year);
        assert!((estimate(jd).value() - expected).abs() < 1e-9);
    }

    /// ΔT on the 15th of `month`, on the calendar `jd_to_calendar` reads back.
    fn mid_month(year: i32, month: u32) -> f64 {
        let jd = if year < 1583 {
            calendar_julian_to_jd(year, month, 15.0)
        } else {
            calendar_gregorian_to_jd(year, month, 15.0)
        };
        estimate(jd).value()
    }

    #[test]
    fn delta_t_antiquity_sample() {
        // year 0: 10 583.6 s at u = 0
        assert!((mid_month(0, 7) - 10_578.1).abs() < 1.0);
    }

    #[test]
    fn delta_t_before_500_bc_uses_parabola() {
        assert!((mid_month(-1000, 7) - 25_417.9).abs() < 1.0);
    }

    #[test]
    fn delta_t_2100_sample() {
        // long-term parabola minus 0.5628 (2150 − y)
        assert!((mid_month(2100, 7) - 204.0).abs() < 1.0);
    }

    #[test]
    fn branch_boundaries_are_nearly_continuous() {
        let seams = [
            -500, 500, 1600, 1700, 1800, 1860, 1900, 1920, 1941, 1961, 1986, 2005, 2050, 2150,
        ];
        for year in seams {
            // December of the previous year against January of the seam year
            let below = mid_month(year - 1, 12);
            let above = mid_month(year, 1);
            assert!(
                (below - above).abs() < 5.0,
                "jump of {} s at {year}",
                below - above
            );
        }
    }

    #[test]
    fn jde_roundtrip() {
        let dt = Seconds::new(64.0);
        let jde = jd_to_jde(2_451_545.0, dt);
        assert!((jde - 2_451_545.0 - 64.0 / 86_400.0).abs() < 1e-9);
        assert!((jde_to_jd(jde, dt) - 2_451_545.0).abs() < 1e-9);
    }
}
