// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Geocentric and topocentric position of the Moon (Meeus, chapter 47).
//!
//! The series are the abridged ELP-2000/82 terms of tables 47.A and 47.B,
//! accurate to about 10″ in longitude and 4″ in latitude. Arguments are
//! evaluated in Julian centuries of **TD**.
//!
//! | Function | Result |
//! |----------|--------|
//! | [`geocentric_position`] | λ, β (mean equinox of date), Δ |
//! | [`apparent_equatorial`] | α, δ with nutation applied, Δ |
//! | [`apparent_topocentric`] | α′, δ′ corrected for parallax, Δ |
//! | [`topocentric_position`] | azimuth/altitude, α′, δ′, Δ, parallactic angle |

use std::f64::consts::TAU;

use qtty::{Days, Kilometers, Seconds};

use crate::coord::{
    ecl_to_eq, eq_to_hz, EclipticCoord, EquatorialCoord, GeoLocation, HorizontalCoord,
};
use crate::error::{AstroError, AstroResult};
use crate::julian_day::JulianDay;
use crate::math::{pmod, poly};
use crate::moon_terms::{LAT_TERMS, LON_DIST_TERMS};
use crate::nutation::{mean_obliquity_laskar, nutation};
use crate::parallax::{topocentric, EARTH_RADIUS_KM};
use crate::refraction::bennett2;
use crate::rise::{self, std_h0_lunar, RiseSetResult};
use crate::sidereal;

const DEG: f64 = std::f64::consts::PI / 180.0;

/// Mean distance of the Moon's centre, km.
const MEAN_DISTANCE_KM: f64 = 385_000.56;

// Fundamental arguments in degrees, polynomials in T.
#[rustfmt::skip]
const MEAN_LONGITUDE: [f64; 5] = [218.316_447_7, 481_267.881_234_21, -0.001_578_6, 1.0 / 538_841.0, -1.0 / 65_194_000.0];
#[rustfmt::skip]
const ELONGATION: [f64; 5] = [297.850_192_1, 445_267.111_403_4, -0.001_881_9, 1.0 / 545_868.0, -1.0 / 113_065_000.0];
#[rustfmt::skip]
const SUN_ANOMALY: [f64; 4] = [357.529_109_2, 35_999.050_290_9, -0.000_153_5, 1.0 / 24_490_000.0];
#[rustfmt::skip]
const MOON_ANOMALY: [f64; 5] = [134.963_396_4, 477_198.867_505_5, 0.008_741_4, 1.0 / 69_699.0, -1.0 / 14_712_000.0];
#[rustfmt::skip]
const ARG_LATITUDE: [f64; 5] = [93.272_095, 483_202.017_523_3, -0.003_653_9, -1.0 / 3_526_000.0, 1.0 / 863_310_000.0];

/// Eccentricity of the Earth's orbit, as the factor `E` of 47.6.
const ECCENTRICITY: [f64; 3] = [1.0, -0.002_516, -0.000_007_4];

/// Geocentric ecliptic place of the Moon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarGeocentric {
    /// Longitude, radians.
    pub lon: f64,
    /// Latitude, radians.
    pub lat: f64,
    /// Distance between the centres of the Earth and the Moon.
    pub delta: Kilometers,
}

/// Equatorial place with the distance it was computed for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarEquatorial {
    pub eq: EquatorialCoord,
    pub delta: Kilometers,
}

/// Topocentric place of the Moon for an observer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LunarPosition {
    pub hz: HorizontalCoord,
    pub eq: EquatorialCoord,
    /// Distance in km.
    pub delta: Kilometers,
    /// Parallactic angle, radians.
    pub q: f64,
}

// ═══════════════════════════════════════════════════════════════════════════
// Series
// ═══════════════════════════════════════════════════════════════════════════

/// Fundamental argument in radians, reduced to `[0, 2π)`.
#[inline]
fn argument<const N: usize>(t: f64, coeffs: &[f64; N]) -> f64 {
    pmod(poly(t, coeffs) * DEG, TAU)
}

/// Power of `E` applied to a term with the given multiplier of M.
#[inline]
fn eccentricity_factor(table: &'static str, row: usize, m: i32, e: f64) -> AstroResult<f64> {
    match m.abs() {
        0 => Ok(1.0),
        1 => Ok(e),
        2 => Ok(e * e),
        _ => Err(AstroError::UnsupportedMultiplier {
            table,
            row,
            multiplier: m,
        }),
    }
}

/// Geocentric longitude, latitude and distance (47.A, 47.B).
///
/// # Errors
///
/// [`AstroError::UnsupportedMultiplier`] if a table row multiplies M by
/// anything other than 0, ±1 or ±2.
pub fn geocentric_position(jd: &JulianDay) -> AstroResult<LunarGeocentric> {
    let t = jd.jde_j2000_century().value();
    let l = argument(t, &MEAN_LONGITUDE);
    let d = argument(t, &ELONGATION);
    let m = argument(t, &SUN_ANOMALY);
    let mp = argument(t, &MOON_ANOMALY);
    let f = argument(t, &ARG_LATITUDE);

    let a1 = (119.75 + 131.849 * t) * DEG;
    let a2 = (53.09 + 479_264.29 * t) * DEG;
    let a3 = (313.45 + 481_266.484 * t) * DEG;
    let e = poly(t, &ECCENTRICITY);

    let mut sum_l = 3958.0 * a1.sin() + 1962.0 * (l - f).sin() + 318.0 * a2.sin();
    let mut sum_r = 0.0;
    let mut sum_b = -2235.0 * l.sin()
        + 382.0 * a3.sin()
        + 175.0 * (a1 - f).sin()
        + 175.0 * (a1 + f).sin()
        + 127.0 * (l - mp).sin()
        - 115.0 * (l + mp).sin();

    for (row, &[cd, cm, cmp, cf, sl, sr]) in LON_DIST_TERMS.iter().enumerate() {
        let x = eccentricity_factor("47.A", row, cm, e)?;
        let a = d * cd as f64 + m * cm as f64 + mp * cmp as f64 + f * cf as f64;
        let (sa, ca) = a.sin_cos();
        sum_l += sl as f64 * sa * x;
        sum_r += sr as f64 * ca * x;
    }

    for (row, &[cd, cm, cmp, cf, sb]) in LAT_TERMS.iter().enumerate() {
        let x = eccentricity_factor("47.B", row, cm, e)?;
        let b = d * cd as f64 + m * cm as f64 + mp * cmp as f64 + f * cf as f64;
        sum_b += sb as f64 * b.sin() * x;
    }

    Ok(LunarGeocentric {
        lon: l + sum_l * 1e-6 * DEG,
        lat: sum_b * 1e-6 * DEG,
        delta: Kilometers::new(MEAN_DISTANCE_KM + sum_r * 1e-3),
    })
}

/// Equatorial horizontal parallax for a distance (p. 337), radians.
#[inline]
pub fn parallax(delta: Kilometers) -> f64 {
    (EARTH_RADIUS_KM / delta.value()).asin()
}

/// Parallactic angle `q` (14.1) for latitude, hour angle and declination.
#[inline]
pub fn parallactic_angle(lat: f64, h: f64, dec: f64) -> f64 {
    h.sin().atan2(lat.tan() * dec.cos() - dec.sin() * h.cos())
}

// ═══════════════════════════════════════════════════════════════════════════
// Positions
// ═══════════════════════════════════════════════════════════════════════════

/// Apparent geocentric α, δ: nutation in longitude and the true obliquity
/// applied to the geometric place.
pub fn apparent_equatorial(jd: &JulianDay) -> AstroResult<LunarEquatorial> {
    let moon = geocentric_position(jd)?;
    let nut = nutation(jd);
    let obliquity = mean_obliquity_laskar(jd) + nut.delta_obliquity;
    let ecl = EclipticCoord::new(moon.lon + nut.delta_lon, moon.lat)?;

    Ok(LunarEquatorial {
        eq: ecl_to_eq(&ecl, obliquity),
        delta: moon.delta,
    })
}

/// Apparent place seen by an observer. `sidereal` is apparent Greenwich
/// sidereal time in radians.
pub fn apparent_topocentric(
    jd: &JulianDay,
    location: &GeoLocation,
    sidereal: f64,
) -> AstroResult<LunarEquatorial> {
    let ae = apparent_equatorial(jd)?;
    Ok(LunarEquatorial {
        eq: topocentric(&ae.eq, parallax(ae.delta), location, sidereal),
        delta: ae.delta,
    })
}

/// Horizontal and topocentric equatorial place with the parallactic angle.
pub fn topocentric_position(
    jd: &JulianDay,
    location: &GeoLocation,
    refraction: bool,
) -> AstroResult<LunarPosition> {
    let st = sidereal::apparent_in_ra(jd);
    let at = apparent_topocentric(jd, location, st)?;

    let mut hz = eq_to_hz(&at.eq, location, st);
    if refraction {
        hz.alt += bennett2(hz.alt);
    }
    let h = st - (location.lon() + at.eq.ra);

    Ok(LunarPosition {
        hz,
        eq: at.eq,
        delta: at.delta,
        q: parallactic_angle(location.lat(), h, at.eq.dec),
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// Rise, transit, set
// ═══════════════════════════════════════════════════════════════════════════

fn topocentric_at(jd: &JulianDay, location: &GeoLocation) -> AstroResult<LunarEquatorial> {
    apparent_topocentric(jd, location, sidereal::apparent_in_ra(jd))
}

/// Approximate UT transit in seconds from 0h of the instant's day.
pub fn approx_transit(jd: &JulianDay, location: &GeoLocation) -> AstroResult<Seconds> {
    let jd0 = jd.start_of_day();
    let at = topocentric_at(&jd0, location)?;
    Ok(rise::approx_transit(
        location,
        sidereal::apparent_0ut(&jd0),
        &at.eq,
    ))
}

/// Approximate rise, transit and set for the instant's day.
pub fn approx_times(jd: &JulianDay, location: &GeoLocation) -> AstroResult<RiseSetResult> {
    let jd0 = jd.start_of_day();
    let at = topocentric_at(&jd0, location)?;
    let h0 = std_h0_lunar(parallax(at.delta));
    Ok(rise::approx_times(
        location,
        h0,
        sidereal::apparent_0ut(&jd0),
        &at.eq,
    ))
}

/// Interpolated rise, transit and set for the instant's day.
///
/// The standard altitude uses the parallax at 0h of the day.
pub fn times(jd: &JulianDay, location: &GeoLocation) -> AstroResult<RiseSetResult> {
    let jd0 = jd.start_of_day();
    let one = Days::new(1.0);
    let before = topocentric_at(&(jd0 - one), location)?;
    let today = topocentric_at(&jd0, location)?;
    let after = topocentric_at(&(jd0 + one), location)?;

    let h0 = std_h0_lunar(parallax(today.delta));
    rise::times(
        location,
        jd0.delta_t(),
        h0,
        sidereal::apparent_0ut(&jd0),
        &[before.eq, today.eq, after.eq],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meeus_47a() -> JulianDay {
        // 1992 April 12, 0h TD
        JulianDay::new(2_448_724.5, Some(Seconds::new(0.0)))
    }

    #[test]
    fn geocentric_example() {
        let p = geocentric_position(&meeus_47a()).unwrap();
        assert!((pmod(p.lon, TAU).to_degrees() - 133.162_655).abs() < 1e-5);
        assert!((p.lat.to_degrees() + 3.229_126).abs() < 1e-5);
        assert!((p.delta.value() - 368_409.7).abs() < 0.1);
    }

    #[test]
    fn parallax_example() {
        let p = geocentric_position(&meeus_47a()).unwrap();
        assert!((parallax(p.delta).to_degrees() - 0.991_990).abs() < 1e-5);
    }

    #[test]
    fn apparent_example() {
        let ae = apparent_equatorial(&meeus_47a()).unwrap();
        assert!((ae.eq.ra.to_degrees() - 134.688_470).abs() < 1e-4);
        assert!((ae.eq.dec.to_degrees() - 13.768_368).abs() < 1e-4);
    }

    #[test]
    fn unsupported_multiplier_is_reported() {
        assert_eq!(eccentricity_factor("47.A", 0, -2, 0.5).unwrap(), 0.25);
        assert_eq!(
            eccentricity_factor("47.B", 7, 3, 0.99),
            Err(AstroError::UnsupportedMultiplier {
                table: "47.B",
                row: 7,
                multiplier: 3
            })
        );
    }

    #[test]
    fn tables_only_use_supported_multipliers() {
        assert!(LON_DIST_TERMS.iter().all(|r| r[1].abs() <= 2));
        assert!(LAT_TERMS.iter().all(|r| r[1].abs() <= 2));
    }

    #[test]
    fn topocentric_shift_is_bounded_by_parallax() {
        let jd = meeus_47a();
        let loc = GeoLocation::from_wgs84(48.0, 11.0, 500.0).unwrap();
        let geo = apparent_equatorial(&jd).unwrap();
        let topo = topocentric_position(&jd, &loc, false).unwrap();
        let shift = (topo.eq.dec - geo.eq.dec).abs();
        assert!(shift <= parallax(geo.delta));
        assert_eq!(topo.delta, geo.delta);

        let refracted = topocentric_position(&jd, &loc, true).unwrap();
        assert!(refracted.hz.alt >= topo.hz.alt);
    }

    #[test]
    fn parallactic_angle_on_the_meridian() {
        assert_eq!(parallactic_angle(0.8, 0.0, 0.2), 0.0);
        assert!(parallactic_angle(0.8, 0.5, 0.2) > 0.0);
    }

    #[test]
    fn moon_rises_and_sets_at_mid_latitude() {
        let jd = JulianDay::from_gregorian(2024, 4, 15.0);
        let loc = GeoLocation::from_wgs84(40.0, -3.7, 650.0).unwrap();
        let result = times(&jd, &loc).unwrap();
        let e = result.events().expect("the Moon crosses the horizon");
        for t in [e.rise, e.transit, e.set] {
            assert!((0.0..86_400.0).contains(&t.seconds.value()));
        }
        let approx = approx_times(&jd, &loc).unwrap();
        let a = approx.events().expect("approximate events");
        // the refinement moves the transit by well under an hour
        let diff = (a.transit.seconds.value() - e.transit.seconds.value()).abs();
        assert!(diff.min(86_400.0 - diff) < 3600.0);
    }
}
