// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Geocentric → topocentric correction for a nearby body (Meeus, chapters 11
//! and 40).
//!
//! The observer's place on the IAU 1976 ellipsoid enters through the two
//! quantities ρ·sin φ′ and ρ·cos φ′ ([`ParallaxConstants`]). Parallaxes are
//! equatorial horizontal parallaxes in radians.

use std::f64::consts::TAU;

use crate::coord::{hour_angle, EquatorialCoord, GeoLocation};
use crate::math::pmod;

/// Equatorial radius of the Earth, km (IAU 1976).
pub const EARTH_RADIUS_KM: f64 = 6378.14;

/// Flattening of the Earth (IAU 1976).
pub const FLATTENING: f64 = 1.0 / 298.257;

/// Horizontal parallax of the Sun at 1 AU, radians (8.794″).
pub const EARTH_SUN_PARALLAX: f64 = 8.794 / 3600.0 * std::f64::consts::PI / 180.0;

/// ρ·sin φ′ and ρ·cos φ′ of an observer, in Earth equatorial radii.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxConstants {
    pub rho_sin_lat: f64,
    pub rho_cos_lat: f64,
}

impl ParallaxConstants {
    /// Meeus 11.1 / 11.2 for a geodetic latitude (radians) and a height in
    /// meters.
    pub fn new(lat: f64, height_m: f64) -> Self {
        let boa = 1.0 - FLATTENING;
        let u = (boa * lat.tan()).atan();
        let hoa = height_m * 1e-3 / EARTH_RADIUS_KM;
        let (slat, clat) = lat.sin_cos();
        let (su, cu) = u.sin_cos();
        Self {
            rho_sin_lat: su * boa + hoa * slat,
            rho_cos_lat: cu + hoa * clat,
        }
    }

    #[inline]
    pub fn for_location(location: &GeoLocation) -> Self {
        Self::new(location.lat(), location.height())
    }
}

/// Free-function form of [`ParallaxConstants::new`].
#[inline]
pub fn parallax_constants(lat: f64, height_m: f64) -> ParallaxConstants {
    ParallaxConstants::new(lat, height_m)
}

/// Equatorial horizontal parallax of a body at `distance_au` astronomical
/// units.
#[inline]
pub fn horizontal(distance_au: f64) -> f64 {
    EARTH_SUN_PARALLAX / distance_au
}

/// Rigorous topocentric place (Meeus 40.2, 40.3).
///
/// `sidereal` is apparent Greenwich sidereal time in radians.
pub fn topocentric(
    eq: &EquatorialCoord,
    parallax: f64,
    location: &GeoLocation,
    sidereal: f64,
) -> EquatorialCoord {
    let pc = ParallaxConstants::for_location(location);
    let h = pmod(hour_angle(sidereal, location, eq.ra), TAU);
    let (sh, ch) = h.sin_cos();
    let (sdec, cdec) = eq.dec.sin_cos();
    let sp = parallax.sin();

    let den = cdec - pc.rho_cos_lat * sp * ch;
    let d_ra = (-pc.rho_cos_lat * sp * sh).atan2(den);
    EquatorialCoord {
        ra: eq.ra + d_ra,
        dec: ((sdec - pc.rho_sin_lat * sp) * d_ra.cos()).atan2(den),
    }
}

/// First-order topocentric place (Meeus 40.4, 40.5). Adequate for the Sun.
pub fn topocentric2(
    eq: &EquatorialCoord,
    parallax: f64,
    location: &GeoLocation,
    sidereal: f64,
) -> EquatorialCoord {
    let pc = ParallaxConstants::for_location(location);
    let h = pmod(hour_angle(sidereal, location, eq.ra), TAU);
    let (sh, ch) = h.sin_cos();
    let (sdec, cdec) = eq.dec.sin_cos();

    EquatorialCoord {
        ra: eq.ra - parallax * pc.rho_cos_lat * sh / cdec,
        dec: eq.dec - parallax * (pc.rho_sin_lat * cdec - pc.rho_cos_lat * ch * sdec),
    }
}
