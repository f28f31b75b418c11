// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Presentation helpers: degrees for display and clock strings.

use crate::math::pmod;

const DAY_SECONDS: f64 = 86_400.0;

#[inline]
pub fn radians_to_degrees(rad: f64) -> f64 {
    rad.to_degrees()
}

/// Flips a direction by 180°, staying in `[0, 360)`.
#[inline]
pub fn invert_degree(deg: f64) -> f64 {
    pmod(deg + 180.0, 360.0)
}

/// Azimuth measured from the south (as computed) → compass bearing in
/// `[0, 360)` with north at 0° and east at 90°.
///
/// `correction` degrees are subtracted first.
#[inline]
pub fn radians_to_corrected_degrees(rad: f64, correction: f64) -> f64 {
    invert_degree(pmod(rad.to_degrees() - correction, 360.0))
}

/// Whole days, hours, minutes, seconds of `sec`, the last three within a day.
fn split_clock(sec: f64) -> (i64, u32, u32, u32) {
    let days = (sec / DAY_SECONDS).floor() as i64;
    let s = pmod(sec, DAY_SECONDS);
    let hours = (s / 3600.0).floor() as u32 % 24;
    let minutes = (s / 60.0).floor() as u32 % 60;
    let seconds = (s % 60.0).floor() as u32;
    (days, hours, minutes, seconds)
}

/// `"HH:MM:SS"`, prefixed with `"Nd "` when `show_days` and the value spans
/// whole days.
pub fn seconds_to_hms_str(sec: f64, show_days: bool) -> String {
    let (days, h, m, s) = split_clock(sec);
    let prefix = if show_days && days != 0 {
        format!("{days}d ")
    } else {
        String::new()
    };
    format!("{prefix}{h:02}:{m:02}:{s:02}")
}

/// `"HH:MM"`, with the same day prefix rule as [`seconds_to_hms_str`].
pub fn seconds_to_hm_str(sec: f64, show_days: bool) -> String {
    let (days, h, m, _) = split_clock(sec);
    let prefix = if show_days && days != 0 {
        format!("{days}d ")
    } else {
        String::new()
    };
    format!("{prefix}{h:02}:{m:02}")
}

/// Fixed-point rendering with thousands separators in the integer part.
///
/// ```
/// assert_eq!(solunar::format::number_with_commas(384_400.126, 2), "384,400.13");
/// ```
pub fn number_with_commas(value: f64, decimals: usize) -> String {
    let text = format!("{value:.decimals$}");
    let (sign, body) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int, frac) = match body.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (body, None),
    };

    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}
