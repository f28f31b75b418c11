// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Illuminated fraction of the Moon's disk (Meeus, chapter 48).

use qtty::Kilometers;

use crate::coord::EquatorialCoord;

/// Cosine of the geocentric elongation of the Moon from the Sun (48.2).
#[inline]
fn cos_elongation(moon: &EquatorialCoord, sun: &EquatorialCoord) -> f64 {
    let (sdm, cdm) = moon.dec.sin_cos();
    let (sds, cds) = sun.dec.sin_cos();
    sds * sdm + cds * cdm * (sun.ra - moon.ra).cos()
}

/// Phase angle `i` (48.3) from the places and distances of both bodies.
pub fn phase_angle_eq(
    moon: &EquatorialCoord,
    moon_delta: Kilometers,
    sun: &EquatorialCoord,
    sun_delta: Kilometers,
) -> f64 {
    let cos_psi = cos_elongation(moon, sun);
    let psi = cos_psi.acos();
    let r = sun_delta.value();
    (r * psi.sin()).atan2(moon_delta.value() - r * cos_psi)
}

/// Phase angle neglecting the Moon's distance (48.4).
#[inline]
pub fn phase_angle_eq2(moon: &EquatorialCoord, sun: &EquatorialCoord) -> f64 {
    (-cos_elongation(moon, sun)).acos()
}

/// Illuminated fraction `k` of the disk for phase angle `i` (48.1).
#[inline]
pub fn illuminated(i: f64) -> f64 {
    (1.0 + i.cos()) / 2.0
}

/// Position angle χ of the bright limb (48.5), measured from north towards
/// east, in `(−π, π]`.
pub fn position_angle(moon: &EquatorialCoord, sun: &EquatorialCoord) -> f64 {
    let (sdm, cdm) = moon.dec.sin_cos();
    let (sds, cds) = sun.dec.sin_cos();
    let d_ra = sun.ra - moon.ra;
    (cds * d_ra.sin()).atan2(sds * cdm - cds * sdm * d_ra.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::pmod;
    use std::f64::consts::TAU;

    fn deg(ra: f64, dec: f64) -> EquatorialCoord {
        EquatorialCoord {
            ra: ra.to_radians(),
            dec: dec.to_radians(),
        }
    }

    #[test]
    fn meeus_example_48a() {
        // 1992 April 12, 0h TD
        let moon = deg(134.6885, 13.7684);
        let sun = deg(20.6579, 8.6964);
        let i = phase_angle_eq(
            &moon,
            Kilometers::new(368_408.0),
            &sun,
            Kilometers::new(149_971_520.0),
        );
        assert!((i.to_degrees() - 69.0756).abs() < 1e-3);
        assert!((illuminated(i) - 0.6786).abs() < 1e-4);

        let chi = pmod(position_angle(&moon, &sun), TAU).to_degrees();
        assert!((chi - 285.0).abs() < 0.1);
    }

    #[test]
    fn distance_free_phase_angle_is_close() {
        let moon = deg(134.6885, 13.7684);
        let sun = deg(20.6579, 8.6964);
        let exact = phase_angle_eq(
            &moon,
            Kilometers::new(368_408.0),
            &sun,
            Kilometers::new(149_971_520.0),
        );
        let approx = phase_angle_eq2(&moon, &sun);
        assert!((exact - approx).abs().to_degrees() < 0.2);
    }

    #[test]
    fn illuminated_bounds() {
        assert_eq!(illuminated(0.0), 1.0);
        assert!(illuminated(std::f64::consts::PI).abs() < 1e-15);
    }
}
