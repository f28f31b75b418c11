// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Greenwich sidereal time (Meeus, chapter 12).
//!
//! Mean sidereal time at 0h UT is the IAU 1982 polynomial (12.2) in Julian
//! centuries; the elapsed fraction of the UT day is scaled by the ratio of
//! the sidereal to the solar day. Apparent time adds the equation of the
//! equinoxes.
//!
//! Time-domain results are seconds in `[0, 86400)`; [`apparent_in_ra`]
//! returns radians in `[0, 2π)` for direct use in hour angles.

use std::f64::consts::{PI, TAU};

use qtty::Seconds;

use crate::julian_day::{centuries_since_j2000, JulianDay};
use crate::math::{modf, pmod, poly};
use crate::nutation::nutation_in_ra;

/// IAU 1982 coefficients, seconds of time.
const IAU82: [f64; 4] = [24_110.548_41, 8_640_184.812_866, 0.093_104, 0.000_006_2];

/// Sidereal day / solar day.
pub const SIDEREAL_RATIO: f64 = 1.002_737_909_35;

const DAY_SECONDS: f64 = 86_400.0;

/// Seconds of time per radian of hour angle.
pub(crate) const SECONDS_PER_RADIAN: f64 = 43_200.0 / PI;

/// Mean sidereal seconds at the preceding 0h UT, and the elapsed day fraction.
#[inline]
fn mean_0ut_parts(jd: f64) -> (f64, f64) {
    let (midnight, fraction) = modf(jd + 0.5);
    let t = centuries_since_j2000(midnight - 0.5).value();
    (poly(t, &IAU82), fraction)
}

#[inline]
fn mean_unreduced(jd: &JulianDay) -> f64 {
    let (s, f) = mean_0ut_parts(jd.jd());
    s + f * SIDEREAL_RATIO * DAY_SECONDS
}

/// Equation of the equinoxes converted to seconds of time.
#[inline]
fn nutation_seconds(jd: &JulianDay) -> f64 {
    nutation_in_ra(jd) * SECONDS_PER_RADIAN
}

/// Mean sidereal time at Greenwich.
pub fn mean(jd: &JulianDay) -> Seconds {
    Seconds::new(pmod(mean_unreduced(jd), DAY_SECONDS))
}

/// Mean sidereal time at Greenwich at the preceding 0h UT.
pub fn mean_0ut(jd: &JulianDay) -> Seconds {
    Seconds::new(pmod(mean_0ut_parts(jd.jd()).0, DAY_SECONDS))
}

/// Apparent sidereal time at Greenwich.
pub fn apparent(jd: &JulianDay) -> Seconds {
    Seconds::new(pmod(mean_unreduced(jd) + nutation_seconds(jd), DAY_SECONDS))
}

/// Apparent sidereal time at Greenwich as an angle in `[0, 2π)`.
pub fn apparent_in_ra(jd: &JulianDay) -> f64 {
    let (s, f) = mean_0ut_parts(jd.jd());
    let mean = s / SECONDS_PER_RADIAN + f * SIDEREAL_RATIO * TAU;
    pmod(mean + nutation_in_ra(jd), TAU)
}

/// Apparent local sidereal time for a west-positive longitude in radians.
pub fn apparent_local(jd: &JulianDay, lon: f64) -> Seconds {
    let greenwich = apparent(jd).value();
    Seconds::new(pmod(greenwich - lon * SECONDS_PER_RADIAN, DAY_SECONDS))
}

/// Apparent sidereal time at Greenwich at 0h UT of the instant's day.
///
/// The equation of the equinoxes is taken at the integral part of
/// `jde + 0.5`, which is what the rise solver expects.
pub fn apparent_0ut(jd: &JulianDay) -> Seconds {
    let (midnight, fraction) = modf(jd.jd() + 0.5);
    let (jde_day, _) = modf(jd.jde() + 0.5);

    let t = centuries_since_j2000(midnight - 0.5).value();
    let s = poly(t, &IAU82) + fraction * SIDEREAL_RATIO * DAY_SECONDS;
    let n = nutation_seconds(&JulianDay::new(jde_day, None));
    Seconds::new(pmod(s + n, DAY_SECONDS))
}
