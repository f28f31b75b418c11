// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Low-precision Sun and Moon model for twilight events and lunar phase.
//!
//! This is the compact model popularised by the SunCalc library: fixed
//! obliquity, a three-term equation of the centre, and a five-term Moon.
//! It is fast and good to about a minute for event times, which is all
//! the named sun events need. Positions for astronomy proper live in
//! [`crate::solar`] and [`crate::moon`].
//!
//! Twilight thresholds are plain data ([`SunEventConfig`]); callers extend
//! the default list with [`SunEventConfig::with_event`].

use std::f64::consts::PI;

use chrono::{DateTime, Utc};
use qtty::Kilometers;

use crate::coord::EquatorialCoord;
use crate::julian_day::J2000;

const DEG: f64 = PI / 180.0;
const DAY_MS: f64 = 86_400_000.0;

/// Julian Day of the Unix epoch, at noon.
const J1970: f64 = 2_440_588.0;

/// Fixed obliquity of the ecliptic used by the model.
const OBLIQUITY: f64 = 23.4397 * DEG;

/// Earth–Sun distance used for the phase angle, km.
const SUN_DISTANCE_KM: f64 = 149_598_000.0;

// ═══════════════════════════════════════════════════════════════════════════
// Configuration
// ═══════════════════════════════════════════════════════════════════════════

/// Solar altitude at which a pair of named events happens.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SunEventThreshold {
    /// Altitude of the Sun's centre, degrees.
    pub angle_deg: f64,
    /// Name of the morning event.
    pub rise_name: String,
    /// Name of the evening event.
    pub set_name: String,
}

impl SunEventThreshold {
    pub fn new(angle_deg: f64, rise_name: impl Into<String>, set_name: impl Into<String>) -> Self {
        Self {
            angle_deg,
            rise_name: rise_name.into(),
            set_name: set_name.into(),
        }
    }
}

/// Ordered list of event thresholds.
///
/// The default holds seven rows:
///
/// | Angle | Morning | Evening |
/// |-------|---------|---------|
/// | −0.833° | `sunriseStart` | `sunsetStart` |
/// | −0.3° | `sunRiseEnd` | `sunSetStart` |
/// | −12° | `nauticalDawn` | `nauticalDusk` |
/// | −18° | `nightEnd` | `nightStart` |
/// | −6° | `dawnStart` | `duskStart` |
/// | −4° | `goldenHourAmStart` | `goldenHourPmEnd` |
/// | 6° | `goldenHourAmEnd` | `goldenHourPmStart` |
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SunEventConfig {
    thresholds: Vec<SunEventThreshold>,
}

impl Default for SunEventConfig {
    fn default() -> Self {
        Self {
            thresholds: vec![
                SunEventThreshold::new(-0.833, "sunriseStart", "sunsetStart"),
                SunEventThreshold::new(-0.3, "sunRiseEnd", "sunSetStart"),
                SunEventThreshold::new(-12.0, "nauticalDawn", "nauticalDusk"),
                SunEventThreshold::new(-18.0, "nightEnd", "nightStart"),
                SunEventThreshold::new(-6.0, "dawnStart", "duskStart"),
                SunEventThreshold::new(-4.0, "goldenHourAmStart", "goldenHourPmEnd"),
                SunEventThreshold::new(6.0, "goldenHourAmEnd", "goldenHourPmStart"),
            ],
        }
    }
}

impl SunEventConfig {
    /// A configuration with no thresholds.
    pub fn empty() -> Self {
        Self {
            thresholds: Vec::new(),
        }
    }

    /// Appends a threshold.
    ///
    /// ```
    /// use solunar::suncalc::SunEventConfig;
    ///
    /// let config = SunEventConfig::default()
    ///     .with_event(-18.0, "astronomicalDawn", "astronomicalDusk");
    /// assert_eq!(config.thresholds().len(), 8);
    /// ```
    pub fn with_event(
        mut self,
        angle_deg: f64,
        rise_name: impl Into<String>,
        set_name: impl Into<String>,
    ) -> Self {
        self.thresholds
            .push(SunEventThreshold::new(angle_deg, rise_name, set_name));
        self
    }

    #[inline]
    pub fn thresholds(&self) -> &[SunEventThreshold] {
        &self.thresholds
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Results
// ═══════════════════════════════════════════════════════════════════════════

/// One named event. `time` is `None` when the Sun never reaches the angle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SunEvent {
    pub name: String,
    pub time: Option<DateTime<Utc>>,
}

/// Named events in configuration order (morning then evening of each
/// threshold), plus solar noon and nadir.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SunEvents {
    pub events: Vec<SunEvent>,
    pub solar_noon: Option<DateTime<Utc>>,
    pub nadir: Option<DateTime<Utc>>,
}

impl SunEvents {
    /// Time of the first event called `name`.
    pub fn get(&self, name: &str) -> Option<DateTime<Utc>> {
        self.events
            .iter()
            .find(|e| e.name == name)
            .and_then(|e| e.time)
    }
}

/// Phase of the Moon.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoonIllumination {
    /// Illuminated fraction of the disk, `[0, 1]`.
    pub fraction: f64,
    /// 0 new, 0.25 first quarter, 0.5 full, 0.75 last quarter.
    pub phase: f64,
    /// Position angle of the bright limb, radians.
    pub angle: f64,
}

/// Place and distance from the simplified lunar model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonCoords {
    pub eq: EquatorialCoord,
    pub dist: Kilometers,
}

// ═══════════════════════════════════════════════════════════════════════════
// Model
// ═══════════════════════════════════════════════════════════════════════════

/// Julian Day of a UTC instant.
#[inline]
pub fn to_julian(date: DateTime<Utc>) -> f64 {
    date.timestamp_millis() as f64 / DAY_MS - 0.5 + J1970
}

/// UTC instant of a Julian Day, to the millisecond.
#[inline]
pub fn from_julian(j: f64) -> Option<DateTime<Utc>> {
    let ms = (j + 0.5 - J1970) * DAY_MS;
    if !ms.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(ms.round() as i64)
}

#[inline]
fn to_days(date: DateTime<Utc>) -> f64 {
    to_julian(date) - J2000
}

#[inline]
fn right_ascension(l: f64, b: f64) -> f64 {
    (l.sin() * OBLIQUITY.cos() - b.tan() * OBLIQUITY.sin()).atan2(l.cos())
}

#[inline]
fn declination(l: f64, b: f64) -> f64 {
    (b.sin() * OBLIQUITY.cos() + b.cos() * OBLIQUITY.sin() * l.sin()).asin()
}

#[inline]
fn solar_mean_anomaly(d: f64) -> f64 {
    DEG * (357.5291 + 0.985_600_28 * d)
}

fn ecliptic_longitude(m: f64) -> f64 {
    let c = DEG * (1.9148 * m.sin() + 0.02 * (2.0 * m).sin() + 0.0003 * (3.0 * m).sin());
    let perihelion = DEG * 102.9372;
    m + c + perihelion + PI
}

/// Sun place for `d` days since J2000.0.
pub fn sun_coords(d: f64) -> EquatorialCoord {
    let l = ecliptic_longitude(solar_mean_anomaly(d));
    EquatorialCoord {
        ra: right_ascension(l, 0.0),
        dec: declination(l, 0.0),
    }
}

/// Moon place and distance for `d` days since J2000.0.
pub fn moon_coords(d: f64) -> MoonCoords {
    let l0 = DEG * (218.316 + 13.176_396 * d);
    let m = DEG * (134.963 + 13.064_993 * d);
    let f = DEG * (93.272 + 13.229_350 * d);

    let l = l0 + DEG * 6.289 * m.sin();
    let b = DEG * 5.128 * f.sin();
    MoonCoords {
        eq: EquatorialCoord {
            ra: right_ascension(l, b),
            dec: declination(l, b),
        },
        dist: Kilometers::new(385_001.0 - 20_905.0 * m.cos()),
    }
}

/// Illuminated fraction, phase and bright-limb angle at an instant.
pub fn moon_illumination(date: DateTime<Utc>) -> MoonIllumination {
    let d = to_days(date);
    let s = sun_coords(d);
    let m = moon_coords(d);

    let (sds, cds) = s.dec.sin_cos();
    let (sdm, cdm) = m.eq.dec.sin_cos();
    let d_ra = s.ra - m.eq.ra;

    let phi = (sds * sdm + cds * cdm * d_ra.cos()).acos();
    let inc = (SUN_DISTANCE_KM * phi.sin()).atan2(m.dist.value() - SUN_DISTANCE_KM * phi.cos());
    let angle = (cds * d_ra.sin()).atan2(sds * cdm - cds * sdm * d_ra.cos());
    let sign = if angle < 0.0 { -1.0 } else { 1.0 };

    MoonIllumination {
        fraction: (1.0 + inc.cos()) / 2.0,
        phase: 0.5 + 0.5 * inc * sign / PI,
        angle,
    }
}

// ── sun events ────────────────────────────────────────────────────────────

#[inline]
fn julian_cycle(d: f64, lw: f64) -> f64 {
    (d - 0.0009 - lw / (2.0 * PI)).round()
}

#[inline]
fn approx_transit(ht: f64, lw: f64, n: f64) -> f64 {
    0.0009 + (ht + lw) / (2.0 * PI) + n
}

#[inline]
fn solar_transit_j(ds: f64, m: f64, l: f64) -> f64 {
    J2000 + ds + 0.0053 * m.sin() - 0.0069 * (2.0 * l).sin()
}

/// Hour angle at which the Sun reaches altitude `h`; NaN if it never does.
#[inline]
fn hour_angle(h: f64, phi: f64, dec: f64) -> f64 {
    ((h.sin() - phi.sin() * dec.sin()) / (phi.cos() * dec.cos())).acos()
}

/// Dip of the horizon for an observer `height` meters up, degrees.
#[inline]
fn observer_angle(height: f64) -> f64 {
    -2.076 * height.max(0.0).sqrt() / 60.0
}

/// Named sun events of the day containing `date`.
///
/// `lat_deg`/`lon_deg` are WGS84 degrees with east-positive longitude;
/// `height` in meters lowers the horizon.
pub fn sun_events(
    date: DateTime<Utc>,
    lat_deg: f64,
    lon_deg: f64,
    height: f64,
    config: &SunEventConfig,
) -> SunEvents {
    let lw = DEG * -lon_deg;
    let phi = DEG * lat_deg;
    let dh = observer_angle(height);

    let d = to_days(date);
    let n = julian_cycle(d, lw);
    let ds = approx_transit(0.0, lw, n);
    let m = solar_mean_anomaly(ds);
    let l = ecliptic_longitude(m);
    let dec = declination(l, 0.0);
    let noon = solar_transit_j(ds, m, l);

    let mut events = Vec::with_capacity(config.thresholds.len() * 2);
    for t in &config.thresholds {
        let h0 = (t.angle_deg + dh) * DEG;
        let w = hour_angle(h0, phi, dec);
        let (rise, set) = if w.is_nan() {
            (None, None)
        } else {
            let set = solar_transit_j(approx_transit(w, lw, n), m, l);
            (from_julian(noon - (set - noon)), from_julian(set))
        };
        events.push(SunEvent {
            name: t.rise_name.clone(),
            time: rise,
        });
        events.push(SunEvent {
            name: t.set_name.clone(),
            time: set,
        });
    }

    SunEvents {
        events,
        solar_noon: from_julian(noon),
        nadir: from_julian(noon - 0.5),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn julian_conversions() {
        let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(to_julian(j2000), J2000);
        assert_eq!(from_julian(J2000), Some(j2000));
        assert_eq!(from_julian(f64::NAN), None);
    }

    #[test]
    fn default_config_has_seven_rows() {
        let config = SunEventConfig::default();
        assert_eq!(config.thresholds().len(), 7);
        assert_eq!(config.thresholds()[0].rise_name, "sunriseStart");
        let extended = config.with_event(-9.0, "a", "b");
        assert_eq!(extended.thresholds().len(), 8);
        assert_eq!(extended.thresholds()[7].angle_deg, -9.0);
        assert!(SunEventConfig::empty().thresholds().is_empty());
    }

    #[test]
    fn events_are_ordered_at_mid_latitude() {
        // the Julian cycle is picked from the day count at local noon
        let date = Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();
        let ev = sun_events(date, 40.0, 0.0, 0.0, &SunEventConfig::default());
        assert_eq!(ev.events.len(), 14);

        let noon = ev.solar_noon.unwrap();
        let order = [
            ev.get("nightEnd").unwrap(),
            ev.get("nauticalDawn").unwrap(),
            ev.get("dawnStart").unwrap(),
            ev.get("sunriseStart").unwrap(),
            ev.get("goldenHourAmEnd").unwrap(),
            noon,
            ev.get("goldenHourPmStart").unwrap(),
            ev.get("sunsetStart").unwrap(),
            ev.get("duskStart").unwrap(),
            ev.get("nauticalDusk").unwrap(),
            ev.get("nightStart").unwrap(),
        ];
        assert!(order.windows(2).all(|w| w[0] < w[1]));

        // the two-term equation of the centre puts noon near 12:08:41
        let expected = Utc.with_ymd_and_hms(2024, 3, 20, 12, 8, 41).unwrap();
        assert!((noon - expected).num_seconds().abs() < 30);
        let nadir = ev.nadir.unwrap();
        assert!((nadir - (noon - chrono::Duration::hours(12))).num_milliseconds().abs() <= 1);
    }

    #[test]
    fn midnight_input_selects_the_previous_transit() {
        let config = SunEventConfig::default();
        let midnight = Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap();
        let noon = sun_events(midnight, 40.0, 0.0, 0.0, &config).solar_noon.unwrap();
        assert_eq!(noon.date_naive(), midnight.date_naive().pred_opt().unwrap());

        let next_midnight = Utc.with_ymd_and_hms(2024, 3, 21, 0, 0, 0).unwrap();
        let noon = sun_events(next_midnight, 40.0, 0.0, 0.0, &config).solar_noon.unwrap();
        assert_eq!(noon.date_naive(), midnight.date_naive());
    }

    #[test]
    fn white_nights_have_no_darkness() {
        let date = Utc.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap();
        let ev = sun_events(date, 65.0, 25.0, 0.0, &SunEventConfig::default());
        assert_eq!(ev.get("nightEnd"), None);
        assert!(ev.get("sunriseStart").is_some());
    }

    #[test]
    fn height_advances_sunrise() {
        let date = Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap();
        let config = SunEventConfig::default();
        let low = sun_events(date, 40.0, 0.0, 0.0, &config);
        let high = sun_events(date, 40.0, 0.0, 2000.0, &config);
        assert!(high.get("sunriseStart").unwrap() < low.get("sunriseStart").unwrap());
    }

    #[test]
    fn moon_phases() {
        // full Moon 2024 April 23, 23:49 UTC; new Moon 2024 April 8, 18:21 UTC
        let full = moon_illumination(Utc.with_ymd_and_hms(2024, 4, 23, 23, 49, 0).unwrap());
        assert!(full.fraction > 0.98);
        assert!((full.phase - 0.5).abs() < 0.03);

        let new = moon_illumination(Utc.with_ymd_and_hms(2024, 4, 8, 18, 21, 0).unwrap());
        assert!(new.fraction < 0.02);
        assert!((0.0..=1.0).contains(&new.phase));
    }

    #[test]
    fn moon_distance_range() {
        for d in 0..60 {
            let km = moon_coords(d as f64).dist.value();
            assert!((364_000.0..406_000.0).contains(&km));
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_serde_roundtrip() {
        let config = SunEventConfig::default().with_event(-9.0, "x", "y");
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"angle_deg\":-0.833"));
        let back: SunEventConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
