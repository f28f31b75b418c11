// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Rising, transit and setting (Meeus, chapter 15).
//!
//! The solver works in seconds of UT from 0h of the day of interest. Inputs
//! that depend on the date are computed by the caller:
//!
//! | Input | Meaning |
//! |-------|---------|
//! | `th0` | apparent Greenwich sidereal time at 0h UT, seconds |
//! | `h0` | standard altitude of the body, radians |
//! | `eq` / `eq3` | place of the body at 0h TD (day before, day, day after) |
//! | `delta_t` | ΔT of the day |
//!
//! Event times are reduced to `[0, 86400)` and carry a day offset telling
//! whether the unreduced value fell before (−1) or after (+1) the day.
//! A body that never crosses `h0` yields [`RiseSetResult::NeverRises`] or
//! [`RiseSetResult::NeverSets`].

use std::f64::consts::{PI, TAU};

use qtty::Seconds;

use crate::coord::{EquatorialCoord, GeoLocation};
use crate::error::AstroResult;
use crate::interp::Len3;
use crate::math::pmod;
use crate::sidereal::{SECONDS_PER_RADIAN, SIDEREAL_RATIO};

const DAY_SECONDS: f64 = 86_400.0;
const HALF_DAY_SECONDS: f64 = 43_200.0;

// ═══════════════════════════════════════════════════════════════════════════
// Standard altitudes
// ═══════════════════════════════════════════════════════════════════════════

/// Mean refraction at the horizon, 34′.
pub const MEAN_REFRACTION: f64 = 0.5667 * PI / 180.0;

/// Standard altitude of stars and planets.
pub const STD_H0_STELLAR: f64 = -0.5667 * PI / 180.0;

/// Standard altitude of the Sun's upper limb.
pub const STD_H0_SOLAR: f64 = -0.8333 * PI / 180.0;

/// Standard altitude of the Moon at mean distance.
pub const STD_H0_LUNAR_MEAN: f64 = 0.125 * PI / 180.0;

/// Standard altitude of the Moon for a horizontal parallax in radians.
#[inline]
pub fn std_h0_lunar(parallax: f64) -> f64 {
    0.7275 * parallax - MEAN_REFRACTION
}

// ═══════════════════════════════════════════════════════════════════════════
// Results
// ═══════════════════════════════════════════════════════════════════════════

/// Time of day of one event plus the day it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventTime {
    /// Seconds of UT in `[0, 86400)`.
    pub seconds: Seconds,
    /// Whole days between the requested day and the unreduced event time.
    pub day_offset: i32,
}

impl EventTime {
    /// Splits an unreduced number of seconds from 0h into day and time.
    pub fn from_raw(seconds: f64) -> Self {
        Self {
            seconds: Seconds::new(pmod(seconds, DAY_SECONDS)),
            day_offset: (seconds / DAY_SECONDS).floor() as i32,
        }
    }

    /// Same event shifted by a refinement of `delta` seconds.
    fn refined(self, delta: f64) -> Self {
        let raw = self.seconds.value() + delta;
        let carry = Self::from_raw(raw);
        Self {
            seconds: carry.seconds,
            day_offset: self.day_offset + carry.day_offset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiseTransitSet {
    pub rise: EventTime,
    pub transit: EventTime,
    pub set: EventTime,
}

/// Outcome of the solver for one day.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RiseSetResult {
    Events(RiseTransitSet),
    /// The body stays below `h0` all day.
    NeverRises,
    /// The body stays above `h0` all day.
    NeverSets,
}

impl RiseSetResult {
    /// The event times, if the body crosses `h0`.
    #[inline]
    pub fn events(&self) -> Option<&RiseTransitSet> {
        match self {
            Self::Events(e) => Some(e),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Solver
// ═══════════════════════════════════════════════════════════════════════════

#[inline]
fn cos_hour_angle(lat: f64, h0: f64, dec: f64) -> f64 {
    let (slat, clat) = lat.sin_cos();
    let (sdec, cdec) = dec.sin_cos();
    (h0.sin() - slat * sdec) / (clat * cdec)
}

/// Cosine of the hour angle at which a body of declination `dec` reaches
/// `h0` (15.1), or `None` when it never does.
pub fn circumpolar(lat: f64, h0: f64, dec: f64) -> Option<f64> {
    let c = cos_hour_angle(lat, h0, dec);
    (-1.0..=1.0).contains(&c).then_some(c)
}

/// Hour angle of the crossing in seconds, or the circumpolar outcome.
fn semi_diurnal_arc(lat: f64, h0: f64, dec: f64) -> Result<f64, RiseSetResult> {
    match circumpolar(lat, h0, dec) {
        Some(c) => Ok(c.acos() * SECONDS_PER_RADIAN),
        None => {
            let result = if cos_hour_angle(lat, h0, dec) < -1.0 {
                RiseSetResult::NeverSets
            } else {
                RiseSetResult::NeverRises
            };
            log::debug!(
                "circumpolar day at lat {:.4} rad, dec {:.4} rad: {:?}",
                lat,
                dec,
                result
            );
            Err(result)
        }
    }
}

/// Approximate transit (15.2), in seconds from 0h UT.
///
/// The value is not reduced: a negative result means the transit falls on
/// the previous day.
#[inline]
pub fn approx_transit(location: &GeoLocation, th0: Seconds, eq: &EquatorialCoord) -> Seconds {
    Seconds::new((eq.ra + location.lon()) * SECONDS_PER_RADIAN - th0.value())
}

/// Approximate rise, transit and set from the place of the body at 0h TD.
pub fn approx_times(
    location: &GeoLocation,
    h0: f64,
    th0: Seconds,
    eq: &EquatorialCoord,
) -> RiseSetResult {
    let arc = match semi_diurnal_arc(location.lat(), h0, eq.dec) {
        Ok(arc) => arc,
        Err(outcome) => return outcome,
    };
    let mt = approx_transit(location, th0, eq).value();

    RiseSetResult::Events(RiseTransitSet {
        rise: EventTime::from_raw(mt - arc),
        transit: EventTime::from_raw(mt),
        set: EventTime::from_raw(mt + arc),
    })
}

/// Brings the outer right ascensions within π of the middle one.
fn unwrap_ra(eq3: &[EquatorialCoord; 3]) -> [f64; 3] {
    let mid = eq3[1].ra;
    let near = |ra: f64| {
        if ra - mid > PI {
            ra - TAU
        } else if mid - ra > PI {
            ra + TAU
        } else {
            ra
        }
    };
    [near(eq3[0].ra), mid, near(eq3[2].ra)]
}

/// Rise, transit and set with one interpolated correction step each.
///
/// `eq3` holds the place of the body at 0h TD of the day before, the day of
/// interest, and the day after.
///
/// # Errors
///
/// Only if the internal interpolation table cannot be built, which does not
/// happen for the fixed ±1 day abscissas.
pub fn times(
    location: &GeoLocation,
    delta_t: Seconds,
    h0: f64,
    th0: Seconds,
    eq3: &[EquatorialCoord; 3],
) -> AstroResult<RiseSetResult> {
    let approx = match approx_times(location, h0, th0, &eq3[1]) {
        RiseSetResult::Events(e) => e,
        outcome => return Ok(outcome),
    };

    let ra = Len3::new(-DAY_SECONDS, DAY_SECONDS, &unwrap_ra(eq3))?;
    let dec = Len3::new(
        -DAY_SECONDS,
        DAY_SECONDS,
        &[eq3[0].dec, eq3[1].dec, eq3[2].dec],
    )?;
    let dt = delta_t.value();
    let th0 = th0.value();
    let lon = location.lon();
    let (slat, clat) = location.lat().sin_cos();

    // ── transit: drive the hour angle to zero ──
    let transit = {
        let m = approx.transit.seconds.value();
        let theta = th0 + m * SIDEREAL_RATIO;
        let alpha = ra.interpolate_x(m + dt);
        let h = theta - (lon + alpha) * SECONDS_PER_RADIAN;
        let h = pmod(h + HALF_DAY_SECONDS, DAY_SECONDS) - HALF_DAY_SECONDS;
        approx.transit.refined(-h)
    };

    // ── rise and set: drive the altitude to h0 ──
    let adjust = |event: EventTime| {
        let m = event.seconds.value();
        let theta = pmod(th0 + m * SIDEREAL_RATIO, DAY_SECONDS);
        let ut = m + dt;
        let alpha = ra.interpolate_x(ut);
        let delta = dec.interpolate_x(ut);
        let h = theta / SECONDS_PER_RADIAN - (lon + alpha);
        let (sdec, cdec) = delta.sin_cos();

        let alt = (slat * sdec + clat * cdec * h.cos()).asin();
        let dm = (alt - h0) / (cdec * clat * h.sin());
        event.refined(dm * SECONDS_PER_RADIAN)
    };

    Ok(RiseSetResult::Events(RiseTransitSet {
        rise: adjust(approx.rise),
        transit,
        set: adjust(approx.set),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boston() -> GeoLocation {
        GeoLocation::new(
            (42.0 + 20.0 / 60.0f64).to_radians(),
            (71.0 + 5.0 / 60.0f64).to_radians(),
            0.0,
        )
        .unwrap()
    }

    fn venus() -> [EquatorialCoord; 3] {
        // Meeus example 15.a, 1988 March 19–21 at 0h TD
        [
            (40.680_21, 18.047_61),
            (41.731_29, 18.440_92),
            (42.782_04, 18.827_42),
        ]
        .map(|(ra, dec): (f64, f64)| EquatorialCoord {
            ra: ra.to_radians(),
            dec: dec.to_radians(),
        })
    }

    fn th0() -> Seconds {
        Seconds::new(177.742_08 / 360.0 * DAY_SECONDS)
    }

    fn day_fraction(e: &EventTime) -> f64 {
        e.seconds.value() / DAY_SECONDS
    }

    #[test]
    fn standard_altitudes() {
        assert!((STD_H0_SOLAR.to_degrees() + 0.8333).abs() < 1e-12);
        assert!((std_h0_lunar(0.0) + MEAN_REFRACTION).abs() < 1e-15);
        assert!(STD_H0_LUNAR_MEAN > 0.0);
    }

    #[test]
    fn venus_approximate_times() {
        let eq = venus();
        let result = approx_times(&boston(), STD_H0_STELLAR, th0(), &eq[1]);
        let e = result.events().expect("Venus rises at Boston");
        assert!((day_fraction(&e.transit) - 0.819_65).abs() < 1e-4);
        assert!((day_fraction(&e.rise) - 0.518_17).abs() < 1e-4);
        assert!((day_fraction(&e.set) - 0.121_13).abs() < 1e-4);
        assert_eq!(e.rise.day_offset, -1);
        assert_eq!(e.set.day_offset, 0);
    }

    #[test]
    fn venus_refined_times() {
        let result = times(
            &boston(),
            Seconds::new(56.0),
            STD_H0_STELLAR,
            th0(),
            &venus(),
        )
        .unwrap();
        let e = result.events().expect("Venus rises at Boston");
        // 19h40m, 12h25m, 2h55m UT
        assert!((day_fraction(&e.transit) - 0.819_80).abs() < 2e-5);
        assert!((day_fraction(&e.rise) - 0.517_66).abs() < 2e-5);
        assert!((day_fraction(&e.set) - 0.121_30).abs() < 2e-5);
        assert_eq!(e.transit.day_offset, -1);
    }

    #[test]
    fn circumpolar_outcomes() {
        let north = GeoLocation::new(80f64.to_radians(), 0.0, 0.0).unwrap();
        let summer = EquatorialCoord { ra: 1.6, dec: 23f64.to_radians() };
        let winter = EquatorialCoord { ra: 4.7, dec: -23f64.to_radians() };

        assert_eq!(
            approx_times(&north, STD_H0_SOLAR, Seconds::new(0.0), &summer),
            RiseSetResult::NeverSets
        );
        assert_eq!(
            approx_times(&north, STD_H0_SOLAR, Seconds::new(0.0), &winter),
            RiseSetResult::NeverRises
        );
        assert!(circumpolar(north.lat(), STD_H0_SOLAR, summer.dec).is_none());
        assert_eq!(
            times(&north, Seconds::new(60.0), STD_H0_SOLAR, Seconds::new(0.0), &[winter; 3])
                .unwrap(),
            RiseSetResult::NeverRises
        );
    }

    #[test]
    fn zero_cosine_is_a_crossing() {
        // equator, body on the celestial equator, h0 = 0: cos H0 is exactly 0
        assert_eq!(circumpolar(0.0, 0.0, 0.0), Some(0.0));
    }

    #[test]
    fn ra_unwrap_across_seam() {
        let eq3 = [
            EquatorialCoord { ra: TAU - 0.01, dec: 0.0 },
            EquatorialCoord { ra: 0.005, dec: 0.0 },
            EquatorialCoord { ra: 0.02, dec: 0.0 },
        ];
        let ra = unwrap_ra(&eq3);
        assert!((ra[0] + 0.01).abs() < 1e-12);
        assert_eq!(ra[2], 0.02);
    }

    #[test]
    fn event_time_split() {
        let e = EventTime::from_raw(-3600.0);
        assert_eq!(e.seconds, Seconds::new(82_800.0));
        assert_eq!(e.day_offset, -1);
        let e = EventTime::from_raw(90_000.0);
        assert_eq!(e.seconds, Seconds::new(3600.0));
        assert_eq!(e.day_offset, 1);
    }
}
