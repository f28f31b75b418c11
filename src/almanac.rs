// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Degree-based convenience layer over the Sun and Moon pipelines.
//!
//! Every function takes a `chrono::DateTime<Utc>` and, where an observer is
//! needed, WGS84 latitude and **east-positive** longitude in degrees plus a
//! height in meters. Azimuths in degrees are compass bearings (north 0°,
//! east 90°); the radian fields keep the south-based convention of
//! [`crate::coord::HorizontalCoord`].
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use solunar::almanac;
//!
//! let date = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
//! let sun = almanac::sun_position(date, 48.85, 2.35, 35.0).unwrap();
//! assert!(sun.altitude_deg > 60.0);
//! ```

use chrono::{DateTime, Duration, Utc};
use qtty::{Kilometers, Mile, Miles, Seconds};

use crate::coord::GeoLocation;
use crate::error::AstroResult;
use crate::format::{radians_to_corrected_degrees, radians_to_degrees};
use crate::julian_day::JulianDay;
use crate::math::pmod;
use crate::rise::RiseSetResult;
use crate::solstice::{self, Season};
use crate::suncalc::{self, MoonCoords, SunEventConfig, SunEvents};
use crate::{moon, solar};

const DAY_SECONDS: f64 = 86_400.0;

// ═══════════════════════════════════════════════════════════════════════════
// Reports
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SunPosition {
    pub azimuth_rad: f64,
    pub azimuth_deg: f64,
    pub altitude_rad: f64,
    pub altitude_deg: f64,
    /// Topocentric right ascension, radians.
    pub ra: f64,
    /// Topocentric declination, radians.
    pub dec: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoonPosition {
    pub azimuth_rad: f64,
    pub azimuth_deg: f64,
    pub altitude_rad: f64,
    pub altitude_deg: f64,
    pub ra: f64,
    pub dec: f64,
    /// Distance between the centres of the Earth and the Moon.
    pub delta: Kilometers,
    pub parallactic_angle: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LunarDistance {
    pub kilometers: Kilometers,
    pub miles: Miles,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoonIlluminationReport {
    /// Bright-limb position angle, radians.
    pub phase_angle: f64,
    /// Illuminated fraction, `[0, 1]`.
    pub fraction: f64,
    /// `fraction` as a percentage.
    pub illumination: f64,
    /// 0 new, 0.25 first quarter, 0.5 full, 0.75 last quarter.
    pub phase: f64,
}

/// Rise, transit and set on the requested UTC day. All three are `None` on
/// a circumpolar day.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayEvents {
    pub rise: Option<DateTime<Utc>>,
    pub transit: Option<DateTime<Utc>>,
    pub set: Option<DateTime<Utc>>,
}

/// Named twilight events with the precise transit and the day length.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SunEventsReport {
    pub events: SunEvents,
    pub transit: Option<DateTime<Utc>>,
    pub day_length: Seconds,
    pub night_length: Seconds,
}

// ═══════════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════════

/// Midnight of `date` plus `seconds`, rounded to the second.
fn instant_on(date: DateTime<Utc>, seconds: Seconds) -> Option<DateTime<Utc>> {
    let midnight = date.date_naive().and_hms_opt(0, 0, 0)?.and_utc();
    let instant = midnight.checked_add_signed(Duration::seconds(seconds.value().round() as i64));
    if instant.is_none() {
        log::warn!("event at {seconds} after {midnight} is not representable");
    }
    instant
}

fn day_events(date: DateTime<Utc>, result: &RiseSetResult) -> DayEvents {
    match result.events() {
        Some(e) => DayEvents {
            rise: instant_on(date, e.rise.seconds),
            transit: instant_on(date, e.transit.seconds),
            set: instant_on(date, e.set.seconds),
        },
        None => DayEvents {
            rise: None,
            transit: None,
            set: None,
        },
    }
}

fn season_instant(year: i32, season: Season) -> Option<DateTime<Utc>> {
    let jde = solstice::season(year, season);
    let instant = JulianDay::from_jde(jde).to_utc();
    if instant.is_none() {
        log::warn!("{season:?} {year} (JDE {jde}) is not representable");
    }
    instant
}

// ═══════════════════════════════════════════════════════════════════════════
// Positions
// ═══════════════════════════════════════════════════════════════════════════

/// Topocentric place of the Sun, refraction included.
pub fn sun_position(
    date: DateTime<Utc>,
    lat: f64,
    lon: f64,
    height: f64,
) -> AstroResult<SunPosition> {
    let location = GeoLocation::from_wgs84(lat, lon, height)?;
    let p = solar::topocentric_position(&JulianDay::from_utc(date), &location, true);
    Ok(SunPosition {
        azimuth_rad: p.hz.az,
        azimuth_deg: radians_to_corrected_degrees(p.hz.az, 0.0),
        altitude_rad: p.hz.alt,
        altitude_deg: radians_to_degrees(p.hz.alt),
        ra: p.eq.ra,
        dec: p.eq.dec,
    })
}

/// Topocentric place of the Moon, refraction included.
pub fn moon_position(
    date: DateTime<Utc>,
    lat: f64,
    lon: f64,
    height: f64,
) -> AstroResult<MoonPosition> {
    let location = GeoLocation::from_wgs84(lat, lon, height)?;
    let p = moon::topocentric_position(&JulianDay::from_utc(date), &location, true)?;
    Ok(MoonPosition {
        azimuth_rad: p.hz.az,
        azimuth_deg: radians_to_corrected_degrees(p.hz.az, 0.0),
        altitude_rad: p.hz.alt,
        altitude_deg: radians_to_degrees(p.hz.alt),
        ra: p.eq.ra,
        dec: p.eq.dec,
        delta: p.delta,
        parallactic_angle: p.q,
    })
}

/// Earth–Moon distance from the single-term model, good to a few thousand km.
pub fn lunar_distance(date: DateTime<Utc>) -> LunarDistance {
    let d = suncalc::to_julian(date) - crate::julian_day::J2000;
    let kilometers = suncalc::moon_coords(d).dist;
    LunarDistance {
        kilometers,
        miles: kilometers.to::<Mile>(),
    }
}

pub fn moon_illumination(date: DateTime<Utc>) -> MoonIlluminationReport {
    let m = suncalc::moon_illumination(date);
    MoonIlluminationReport {
        phase_angle: m.angle,
        fraction: m.fraction,
        illumination: m.fraction * 100.0,
        phase: m.phase,
    }
}

/// Geocentric Moon place and distance from the simplified model.
pub fn moon_coordinates(date: DateTime<Utc>) -> MoonCoords {
    suncalc::moon_coords(suncalc::to_julian(date) - crate::julian_day::J2000)
}

// ═══════════════════════════════════════════════════════════════════════════
// Events
// ═══════════════════════════════════════════════════════════════════════════

/// Sunrise, transit and sunset on the UTC day of `date`.
pub fn sun_times(date: DateTime<Utc>, lat: f64, lon: f64, height: f64) -> AstroResult<DayEvents> {
    let location = GeoLocation::from_wgs84(lat, lon, height)?;
    let result = solar::times(&JulianDay::from_utc(date), &location)?;
    Ok(day_events(date, &result))
}

/// Moonrise, transit and moonset on the UTC day of `date`.
pub fn moon_times(date: DateTime<Utc>, lat: f64, lon: f64, height: f64) -> AstroResult<DayEvents> {
    let location = GeoLocation::from_wgs84(lat, lon, height)?;
    let result = moon::times(&JulianDay::from_utc(date), &location)?;
    Ok(day_events(date, &result))
}

/// Named twilight events from `config`, the transit from the precise solver
/// and the lengths of day and night.
pub fn sun_events(
    date: DateTime<Utc>,
    lat: f64,
    lon: f64,
    height: f64,
    config: &SunEventConfig,
) -> AstroResult<SunEventsReport> {
    let location = GeoLocation::from_wgs84(lat, lon, height)?;
    let result = solar::times(&JulianDay::from_utc(date), &location)?;

    let (transit, day) = match &result {
        RiseSetResult::Events(e) => (
            instant_on(date, e.transit.seconds),
            pmod(e.set.seconds.value() - e.rise.seconds.value(), DAY_SECONDS),
        ),
        RiseSetResult::NeverRises => (None, 0.0),
        RiseSetResult::NeverSets => (None, DAY_SECONDS),
    };

    Ok(SunEventsReport {
        events: suncalc::sun_events(date, lat, lon, height, config),
        transit,
        day_length: Seconds::new(day),
        night_length: Seconds::new(DAY_SECONDS - day),
    })
}

// ── seasons ───────────────────────────────────────────────────────────────

/// June solstice, UTC.
pub fn summer_solstice(year: i32) -> Option<DateTime<Utc>> {
    season_instant(year, Season::June)
}

/// December solstice, UTC.
pub fn winter_solstice(year: i32) -> Option<DateTime<Utc>> {
    season_instant(year, Season::December)
}

/// March equinox, UTC.
pub fn vernal_equinox(year: i32) -> Option<DateTime<Utc>> {
    season_instant(year, Season::March)
}

/// September equinox, UTC.
pub fn fall_equinox(year: i32) -> Option<DateTime<Utc>> {
    season_instant(year, Season::September)
}
