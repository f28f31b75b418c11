// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Low-accuracy position of the Sun (Meeus, chapter 25) and its daily
//! rise, transit and set.
//!
//! Accuracy is about 0.01°. The series are evaluated in Julian centuries of
//! **UT**; the difference to TD is far below that accuracy.

use std::f64::consts::TAU;

use qtty::{Days, Kilometers};

use crate::coord::{
    ecl_to_eq, eq_to_hz, EclipticCoord, EquatorialCoord, GeoLocation, HorizontalCoord,
};
use crate::error::AstroResult;
use crate::julian_day::JulianDay;
use crate::math::{pmod, poly};
use crate::nutation::mean_obliquity_laskar;
use crate::parallax::{topocentric2, EARTH_SUN_PARALLAX};
use crate::refraction::bennett2;
use crate::rise::{self, RiseSetResult, STD_H0_SOLAR};
use crate::sidereal;

/// Mean Earth–Sun distance used for the phase angle of the Moon.
pub const EARTH_SUN_DISTANCE: Kilometers = Kilometers::new(149_597_870.0);

const DEG: f64 = std::f64::consts::PI / 180.0;

const MEAN_ANOMALY: [f64; 3] = [357.529_11, 35_999.050_29, -0.000_153_7];
const MEAN_LONGITUDE: [f64; 3] = [280.466_46, 36_000.769_83, 0.000_303_2];
const CENTER_SIN_M: [f64; 3] = [1.914_602, -0.004_817, -0.000_014];

/// True geometric longitude and true anomaly, radians in `[0, 2π)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrueLongitude {
    pub lon: f64,
    pub anomaly: f64,
}

/// Topocentric place of the Sun for an observer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolarPosition {
    pub hz: HorizontalCoord,
    pub eq: EquatorialCoord,
}

// ═══════════════════════════════════════════════════════════════════════════
// Series
// ═══════════════════════════════════════════════════════════════════════════

/// Mean anomaly (25.3), radians. `t` in Julian centuries.
#[inline]
pub fn mean_anomaly(t: f64) -> f64 {
    poly(t, &MEAN_ANOMALY) * DEG
}

/// True longitude and true anomaly (25.2 plus the equation of the centre).
pub fn true_longitude(t: f64) -> TrueLongitude {
    let l0 = poly(t, &MEAN_LONGITUDE) * DEG;
    let m = mean_anomaly(t);
    let c = (poly(t, &CENTER_SIN_M) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin())
        * DEG;
    TrueLongitude {
        lon: pmod(l0 + c, TAU),
        anomaly: pmod(m + c, TAU),
    }
}

/// Longitude of the ascending node of the lunar orbit, low precision.
#[inline]
pub fn node(t: f64) -> f64 {
    (125.04 - 1934.136 * t) * DEG
}

/// Apparent longitude: true longitude corrected for nutation and aberration.
#[inline]
pub fn apparent_longitude(t: f64, node: f64) -> f64 {
    true_longitude(t).lon - 0.005_69 * DEG - 0.004_78 * DEG * node.sin()
}

// ═══════════════════════════════════════════════════════════════════════════
// Positions
// ═══════════════════════════════════════════════════════════════════════════

/// Apparent geocentric right ascension and declination (25.6, 25.7), with
/// right ascension in `[0, 2π)`.
pub fn apparent_equatorial(jd: &JulianDay) -> EquatorialCoord {
    let t = jd.jd_j2000_century().value();
    let omega = node(t);
    let lon = apparent_longitude(t, omega);
    let obliquity = mean_obliquity_laskar(jd) + 0.002_56 * DEG * omega.cos();

    let (slon, clon) = lon.sin_cos();
    let (se, ce) = obliquity.sin_cos();
    EquatorialCoord {
        ra: pmod((ce * slon).atan2(clon), TAU),
        dec: (se * slon).asin(),
    }
}

/// Apparent place corrected for the observer's parallax.
///
/// `sidereal` is apparent Greenwich sidereal time in radians.
pub fn apparent_topocentric(
    jd: &JulianDay,
    location: &GeoLocation,
    sidereal: f64,
) -> EquatorialCoord {
    let eq = apparent_equatorial(jd);
    topocentric2(&eq, EARTH_SUN_PARALLAX, location, sidereal)
}

/// Horizontal and topocentric equatorial place, optionally with refraction
/// added to the altitude.
pub fn topocentric_position(
    jd: &JulianDay,
    location: &GeoLocation,
    refraction: bool,
) -> SolarPosition {
    let st = sidereal::apparent_in_ra(jd);
    let eq = apparent_topocentric(jd, location, st);
    let mut hz = eq_to_hz(&eq, location, st);
    if refraction {
        hz.alt += bennett2(hz.alt);
    }
    SolarPosition { hz, eq }
}

/// Apparent ecliptic longitude at the instant as an [`EclipticCoord`]
/// with zero latitude.
pub fn apparent_ecliptic(jd: &JulianDay) -> EclipticCoord {
    let t = jd.jd_j2000_century().value();
    EclipticCoord {
        lon: pmod(apparent_longitude(t, node(t)), TAU),
        lat: 0.0,
    }
}

/// Equatorial place from [`apparent_ecliptic`] through the true obliquity.
///
/// Agrees with [`apparent_equatorial`] to well under the series accuracy.
pub fn apparent_equatorial_via_ecliptic(jd: &JulianDay) -> EquatorialCoord {
    let t = jd.jd_j2000_century().value();
    let obliquity = mean_obliquity_laskar(jd) + 0.002_56 * DEG * node(t).cos();
    ecl_to_eq(&apparent_ecliptic(jd), obliquity)
}

// ═══════════════════════════════════════════════════════════════════════════
// Rise, transit, set
// ═══════════════════════════════════════════════════════════════════════════

fn topocentric_at(jd: &JulianDay, location: &GeoLocation) -> EquatorialCoord {
    apparent_topocentric(jd, location, sidereal::apparent_in_ra(jd))
}

/// Approximate UT transit in seconds from 0h of the instant's day. Negative
/// values mean the transit falls on the previous day.
pub fn approx_transit(jd: &JulianDay, location: &GeoLocation) -> qtty::Seconds {
    let jd0 = jd.start_of_day();
    rise::approx_transit(
        location,
        sidereal::apparent_0ut(&jd0),
        &topocentric_at(&jd0, location),
    )
}

/// Approximate rise, transit and set for the instant's day.
pub fn approx_times(jd: &JulianDay, location: &GeoLocation) -> RiseSetResult {
    let jd0 = jd.start_of_day();
    rise::approx_times(
        location,
        STD_H0_SOLAR,
        sidereal::apparent_0ut(&jd0),
        &topocentric_at(&jd0, location),
    )
}

/// Interpolated rise, transit and set for the instant's day.
pub fn times(jd: &JulianDay, location: &GeoLocation) -> AstroResult<RiseSetResult> {
    let jd0 = jd.start_of_day();
    let one = Days::new(1.0);
    let eq3 = [
        topocentric_at(&(jd0 - one), location),
        topocentric_at(&jd0, location),
        topocentric_at(&(jd0 + one), location),
    ];
    rise::times(
        location,
        jd0.delta_t(),
        STD_H0_SOLAR,
        sidereal::apparent_0ut(&jd0),
        &eq3,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtty::Seconds;

    #[test]
    fn meeus_example_25a() {
        // 1992 October 13.0 TD
        let jd = JulianDay::new(2_448_908.5, Some(Seconds::new(0.0)));
        let t = jd.jd_j2000_century().value();
        assert!((t + 0.072_183_436).abs() < 1e-9);

        let tl = true_longitude(t);
        assert!((tl.lon.to_degrees() - 199.909_88).abs() < 1e-4);
        assert!((pmod(mean_anomaly(t), TAU).to_degrees() - 278.993_97).abs() < 1e-4);

        let lambda = apparent_longitude(t, node(t));
        assert!((lambda.to_degrees() - 199.908_95).abs() < 1e-4);

        let eq = apparent_equatorial(&jd);
        assert!((pmod(eq.ra, TAU).to_degrees() - 198.380_83).abs() < 1e-4);
        assert!((eq.dec.to_degrees() + 7.785_07).abs() < 1e-4);
    }

    #[test]
    fn ecliptic_route_agrees() {
        let jd = JulianDay::new(2_448_908.5, Some(Seconds::new(0.0)));
        let a = apparent_equatorial(&jd);
        let b = apparent_equatorial_via_ecliptic(&jd);
        assert!((a.ra - b.ra).abs() < 1e-9);
        assert!((a.dec - b.dec).abs() < 1e-9);
    }

    #[test]
    fn j2000_place() {
        let jd = JulianDay::new(2_451_545.0, None);
        let eq = apparent_equatorial(&jd);
        assert!((pmod(eq.ra, TAU).to_degrees() - 281.28).abs() < 0.02);
        assert!((eq.dec.to_degrees() + 23.03).abs() < 0.02);
    }

    #[test]
    fn refraction_raises_the_sun() {
        let jd = JulianDay::new(2_451_545.0, None);
        let loc = GeoLocation::from_wgs84(0.0, 0.0, 0.0).unwrap();
        let plain = topocentric_position(&jd, &loc, false);
        let refracted = topocentric_position(&jd, &loc, true);
        assert!(refracted.hz.alt > plain.hz.alt);
        assert_eq!(refracted.eq, plain.eq);
        // local noon at the equator, Sun high in the south
        assert!(plain.hz.alt.to_degrees() > 60.0);
    }

    #[test]
    fn equinox_day_at_the_equator() {
        // 2000 March 20, Greenwich meridian
        let jd = JulianDay::from_gregorian(2000, 3, 20.0);
        let loc = GeoLocation::from_wgs84(0.0, 0.0, 0.0).unwrap();
        let result = times(&jd, &loc).unwrap();
        let e = result.events().expect("the Sun rises at the equator");

        let rise = e.rise.seconds.value();
        let transit = e.transit.seconds.value();
        let set = e.set.seconds.value();
        // equation of time is about −7.5 min
        assert!((transit - (12.0 * 3600.0 + 450.0)).abs() < 120.0);
        assert!(((rise + set) / 2.0 - transit).abs() < 60.0);
        let day = set - rise;
        assert!(day > 12.0 * 3600.0 && day < 12.0 * 3600.0 + 900.0);

        let approx = approx_times(&jd, &loc);
        let a = approx.events().expect("approximate events");
        assert!((a.transit.seconds.value() - transit).abs() < 300.0);
    }

    #[test]
    fn polar_night() {
        let jd = JulianDay::from_gregorian(2000, 12, 21.0);
        let loc = GeoLocation::from_wgs84(80.0, 15.0, 0.0).unwrap();
        assert_eq!(times(&jd, &loc).unwrap(), RiseSetResult::NeverRises);
        let summer = JulianDay::from_gregorian(2000, 6, 21.0);
        assert_eq!(approx_times(&summer, &loc), RiseSetResult::NeverSets);
    }
}
