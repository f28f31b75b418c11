// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Coordinate records and the spherical-trigonometry transforms between them
//! (Meeus, chapter 13).
//!
//! | Type | Components | Notes |
//! |------|------------|-------|
//! | [`EquatorialCoord`] | right ascension, declination | radians |
//! | [`EclipticCoord`] | celestial longitude, latitude | radians |
//! | [`HorizontalCoord`] | azimuth, altitude | azimuth from the **south**, westward positive |
//! | [`GeoLocation`] | geodetic latitude, longitude, height | longitude **positive westward** |
//!
//! Geographic and celestial ecliptic frames are separate types.
//! [`GeoLocation::from_wgs84`] is the single entry point that accepts
//! east-positive WGS84 degrees and flips the longitude sign.
//!
//! The celestial records keep public fields: the pipelines build them from
//! values they have just computed. Their `new` constructors are the checked
//! path for outside input, and deserialization goes through them.
//! [`GeoLocation`] keeps its fields private, so every value is validated.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::error::{AstroError, AstroResult, CoordinateKind};
use crate::math::{format_num, pmod};

const DISPLAY_DIGITS: u32 = 4;

// ═══════════════════════════════════════════════════════════════════════════
// Sexagesimal helpers
// ═══════════════════════════════════════════════════════════════════════════

/// Parsed sexagesimal components → decimal degrees.
#[inline]
pub fn dms_to_deg(neg: bool, d: f64, m: f64, s: f64) -> f64 {
    let deg = ((d * 60.0 + m) * 60.0 + s) / 3600.0;
    if neg {
        -deg
    } else {
        deg
    }
}

/// Sexagesimal angle → radians.
#[inline]
pub fn calc_angle(neg: bool, d: f64, m: f64, s: f64) -> f64 {
    dms_to_deg(neg, d, m, s).to_radians()
}

/// Right ascension in hours, minutes, seconds → radians.
///
/// Values of 24h and more wrap into `[0, 24)`.
#[inline]
pub fn calc_ra(h: f64, m: f64, s: f64) -> f64 {
    (dms_to_deg(false, h, m, s) % 24.0 * 15.0).to_radians()
}

// ═══════════════════════════════════════════════════════════════════════════
// Records
// ═══════════════════════════════════════════════════════════════════════════

/// Right ascension and declination, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "raw::Equatorial")
)]
pub struct EquatorialCoord {
    pub ra: f64,
    pub dec: f64,
}

impl EquatorialCoord {
    /// Checked constructor: both angles must be finite.
    pub fn new(ra: f64, dec: f64) -> AstroResult<Self> {
        if !ra.is_finite() || !dec.is_finite() {
            return Err(AstroError::invalid_coordinate(
                CoordinateKind::Equatorial,
                ra,
                dec,
            ));
        }
        Ok(Self { ra, dec })
    }
}

impl std::fmt::Display for EquatorialCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ra:{}, dec:{}",
            format_num(self.ra.to_degrees(), DISPLAY_DIGITS),
            format_num(self.dec.to_degrees(), DISPLAY_DIGITS)
        )
    }
}

/// Celestial ecliptic longitude and latitude, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "raw::Ecliptic")
)]
pub struct EclipticCoord {
    pub lon: f64,
    pub lat: f64,
}

impl EclipticCoord {
    /// Checked constructor: both angles must be finite.
    pub fn new(lon: f64, lat: f64) -> AstroResult<Self> {
        if !lon.is_finite() || !lat.is_finite() {
            return Err(AstroError::invalid_coordinate(
                CoordinateKind::Ecliptic,
                lon,
                lat,
            ));
        }
        Ok(Self { lon, lat })
    }
}

/// Azimuth (from the south, westward) and altitude, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "raw::Horizontal")
)]
pub struct HorizontalCoord {
    pub az: f64,
    pub alt: f64,
}

impl HorizontalCoord {
    /// Checked constructor: both angles must be finite.
    pub fn new(az: f64, alt: f64) -> AstroResult<Self> {
        if !az.is_finite() || !alt.is_finite() {
            return Err(AstroError::invalid_coordinate(
                CoordinateKind::Horizontal,
                az,
                alt,
            ));
        }
        Ok(Self { az, alt })
    }
}

impl std::fmt::Display for HorizontalCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "azi:{}, alt:{}",
            format_num(self.az.to_degrees(), DISPLAY_DIGITS),
            format_num(self.alt.to_degrees(), DISPLAY_DIGITS)
        )
    }
}

/// Observer position on the Earth.
///
/// Latitude and longitude in radians, **longitude positive westward**,
/// height in meters above the reference ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "raw::Geo")
)]
pub struct GeoLocation {
    lat: f64,
    lon: f64,
    height: f64,
}

impl GeoLocation {
    /// Validates `lat ∈ [−π/2, π/2]` and finiteness of both angles.
    ///
    /// A non-finite `height` is not an error: it is read as 0 m, the
    /// reference ellipsoid.
    pub fn new(lat: f64, lon: f64, height: f64) -> AstroResult<Self> {
        if !lat.is_finite() || !lon.is_finite() || lat.abs() > FRAC_PI_2 {
            return Err(AstroError::invalid_coordinate(
                CoordinateKind::Geodetic,
                lat,
                lon,
            ));
        }
        Ok(Self {
            lat,
            lon,
            height: if height.is_finite() { height } else { 0.0 },
        })
    }

    /// From WGS84 degrees with **east-positive** longitude.
    pub fn from_wgs84(lat_deg: f64, lon_deg: f64, height: f64) -> AstroResult<Self> {
        Self::new(lat_deg.to_radians(), -lon_deg.to_radians(), height)
    }

    #[inline]
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in radians, positive westward.
    #[inline]
    pub const fn lon(&self) -> f64 {
        self.lon
    }

    /// Height in meters.
    #[inline]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// WGS84 latitude and east-positive longitude, in degrees.
    pub fn to_wgs84(&self) -> (f64, f64) {
        (self.lat.to_degrees(), -self.lon.to_degrees())
    }
}

impl std::fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (lat, lon) = self.to_wgs84();
        write!(
            f,
            "{}, {}",
            format_num(lat, DISPLAY_DIGITS),
            format_num(lon, DISPLAY_DIGITS)
        )
    }
}

// ── Deserialization ──────────────────────────────────────────────────────

#[cfg(feature = "serde")]
mod raw {
    #[derive(serde::Deserialize)]
    pub struct Equatorial {
        pub ra: f64,
        pub dec: f64,
    }

    #[derive(serde::Deserialize)]
    pub struct Ecliptic {
        pub lon: f64,
        pub lat: f64,
    }

    #[derive(serde::Deserialize)]
    pub struct Horizontal {
        pub az: f64,
        pub alt: f64,
    }

    #[derive(serde::Deserialize)]
    pub struct Geo {
        pub lat: f64,
        pub lon: f64,
        pub height: f64,
    }
}

#[cfg(feature = "serde")]
impl TryFrom<raw::Equatorial> for EquatorialCoord {
    type Error = AstroError;
    fn try_from(r: raw::Equatorial) -> AstroResult<Self> {
        Self::new(r.ra, r.dec)
    }
}

#[cfg(feature = "serde")]
impl TryFrom<raw::Ecliptic> for EclipticCoord {
    type Error = AstroError;
    fn try_from(r: raw::Ecliptic) -> AstroResult<Self> {
        Self::new(r.lon, r.lat)
    }
}

#[cfg(feature = "serde")]
impl TryFrom<raw::Horizontal> for HorizontalCoord {
    type Error = AstroError;
    fn try_from(r: raw::Horizontal) -> AstroResult<Self> {
        Self::new(r.az, r.alt)
    }
}

#[cfg(feature = "serde")]
impl TryFrom<raw::Geo> for GeoLocation {
    type Error = AstroError;
    fn try_from(r: raw::Geo) -> AstroResult<Self> {
        Self::new(r.lat, r.lon, r.height)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Transforms
// ═══════════════════════════════════════════════════════════════════════════

/// Ecliptic → equatorial (Meeus 13.3, 13.4). Right ascension in `[0, 2π)`.
pub fn ecl_to_eq(ecl: &EclipticCoord, obliquity: f64) -> EquatorialCoord {
    let (slon, clon) = ecl.lon.sin_cos();
    let (slat, clat) = ecl.lat.sin_cos();
    let (se, ce) = obliquity.sin_cos();

    let ra = (slon * ce - (slat / clat) * se).atan2(clon);
    EquatorialCoord {
        ra: pmod(ra, TAU),
        dec: (slat * ce + clat * se * slon).asin(),
    }
}

/// Equatorial → ecliptic (Meeus 13.1, 13.2).
pub fn eq_to_ecl(eq: &EquatorialCoord, obliquity: f64) -> EclipticCoord {
    let (sra, cra) = eq.ra.sin_cos();
    let (sdec, cdec) = eq.dec.sin_cos();
    let (se, ce) = obliquity.sin_cos();

    EclipticCoord {
        lon: (sra * ce + (sdec / cdec) * se).atan2(cra),
        lat: (sdec * ce - cdec * se * sra).asin(),
    }
}

/// Local hour angle `H = θ − L − α` for a west-positive longitude.
#[inline]
pub fn hour_angle(sidereal: f64, location: &GeoLocation, ra: f64) -> f64 {
    sidereal - location.lon - ra
}

/// Equatorial → horizontal (Meeus 13.5, 13.6).
///
/// `sidereal` is Greenwich sidereal time in radians; apparent coordinates
/// need apparent sidereal time.
pub fn eq_to_hz(eq: &EquatorialCoord, location: &GeoLocation, sidereal: f64) -> HorizontalCoord {
    let h = hour_angle(sidereal, location, eq.ra);
    let (sh, ch) = h.sin_cos();
    let (slat, clat) = location.lat.sin_cos();
    let (sdec, cdec) = eq.dec.sin_cos();

    HorizontalCoord {
        az: sh.atan2(ch * slat - (sdec / cdec) * clat),
        alt: (slat * sdec + clat * cdec * ch).asin(),
    }
}

/// Azimuth measured from the north, eastward, in `[0, 2π)`.
#[inline]
pub fn azimuth_from_north(hz: &HorizontalCoord) -> f64 {
    pmod(hz.az + PI, TAU)
}
