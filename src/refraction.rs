// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Atmospheric refraction (Meeus, chapter 16). All angles in radians.
//!
//! | Function | Input | Use |
//! |----------|-------|-----|
//! | [`bennett`] | apparent altitude | subtract to get the true altitude, 0.07′ |
//! | [`bennett2`] | apparent altitude | same, corrected to 0.015′ |
//! | [`saemundsson`] | true (airless) altitude | add to get the apparent altitude |

const DEG: f64 = std::f64::consts::PI / 180.0;
const ARCMIN: f64 = DEG / 60.0;

/// Bennett (16.3). Negative altitudes are clamped to the horizon: the formula
/// has a pole at h₀ ≈ −4.4°.
#[inline]
pub fn bennett(h0: f64) -> f64 {
    let h0 = h0.max(0.0);
    ARCMIN / (h0 + 7.31 * DEG * DEG / (h0 + 4.4 * DEG)).tan()
}

/// Bennett with the Sinclair correction term.
#[inline]
pub fn bennett2(h0: f64) -> f64 {
    let r = bennett(h0);
    // the correction is expressed in arc minutes of R
    let r_min = r / ARCMIN;
    r - 0.06 * ARCMIN * ((14.7 * r_min + 13.0) * DEG).sin()
}

/// Saemundsson (16.4).
#[inline]
pub fn saemundsson(h: f64) -> f64 {
    1.02 * ARCMIN / (h + 10.3 * DEG * DEG / (h + 5.11 * DEG)).tan()
}
