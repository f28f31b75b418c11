// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar ⇄ Julian Day conversions (Meeus, chapter 7).
//!
//! | Function | Calendar |
//! |----------|----------|
//! | [`calendar_gregorian_to_jd`] | Gregorian (on/after 1582-10-15) |
//! | [`calendar_julian_to_jd`] | Julian (before 1582-10-05) |
//! | [`jd_to_calendar`] | whichever applies to the JD |
//!
//! Negative years are valid back to JD 0. Days are fractional: the time of
//! day is carried in the fractional part of [`CalendarDate::day`].

use qtty::Seconds;

/// First Julian Day counted on the Gregorian calendar (1582-10-15).
pub const GREGORIAN_START_JD: f64 = 2_299_160.5;

/// A calendar date with a fractional day of month.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: f64,
}

#[inline]
fn shift_january_february(y: i32, m: u32) -> (f64, f64) {
    if m == 1 || m == 2 {
        ((y - 1) as f64, (m + 12) as f64)
    } else {
        (y as f64, m as f64)
    }
}

/// Gregorian year, month, fractional day → Julian Day (Meeus 7.1).
pub fn calendar_gregorian_to_jd(y: i32, m: u32, d: f64) -> f64 {
    let (y, m) = shift_january_february(y, m);
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (36_525.0 * (y + 4716.0) / 100.0).floor() + (306.0 * (m + 1.0) / 10.0).floor() + b + d
        - 1524.5
}

/// Julian-calendar year, month, fractional day → Julian Day.
pub fn calendar_julian_to_jd(y: i32, m: u32, d: f64) -> f64 {
    let (y, m) = shift_january_february(y, m);
    (36_525.0 * (y + 4716.0) / 100.0).floor() + (306.0 * (m + 1.0) / 10.0).floor() + d - 1524.5
}

/// Julian Day → calendar date, Julian before the reform and Gregorian after.
pub fn jd_to_calendar(jd: f64) -> CalendarDate {
    let (z, f) = crate::math::modf(jd + 0.5);
    let a = if z >= 2_299_151.0 {
        let alpha = ((z * 100.0 - 186_721_625.0) / 3_652_425.0).floor();
        z + 1.0 + alpha - (alpha / 4.0).floor()
    } else {
        z
    };
    let b = a + 1524.0;
    let c = ((b * 100.0 - 12_210.0) / 36_525.0).floor();
    let d = (36_525.0 * c / 100.0).floor();
    let e = ((b - d) * 1e4 / 306_001.0).floor();

    let day = (b - d) - (306_001.0 * e / 1e4).floor() + f;
    let month = if e == 14.0 || e == 15.0 { e - 13.0 } else { e - 1.0 } as u32;
    let year = if month <= 2 { c - 4715.0 } else { c - 4716.0 } as i32;
    CalendarDate { year, month, day }
}

/// Gregorian leap-year rule.
#[inline]
pub fn is_leap_year_gregorian(y: i32) -> bool {
    (y % 4 == 0 && y % 100 != 0) || y % 400 == 0
}

/// Day number within the year (1-based, Meeus p. 65).
///
/// Calendar-agnostic: the caller states whether the year is a leap year.
pub fn day_of_year(m: u32, d: u32, leap: bool) -> u32 {
    let k = if leap { 1 } else { 2 };
    275 * m / 9 - k * ((m + 9) / 12) + d - 30
}

/// `h·3600 + m·60 + s` as a typed quantity.
#[inline]
pub fn seconds_from_hms(h: u32, m: u32, s: f64) -> Seconds {
    Seconds::new(h as f64 * 3600.0 + m as f64 * 60.0 + s)
}
