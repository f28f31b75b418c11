// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Julian Day instant carrying both the UT and the TD (ephemeris) axis.
//!
//! A [`JulianDay`] stores the Julian Day on the **UT** axis together with the
//! **ΔT** used to reach the dynamical axis, so that
//!
//! ```text
//! jde = jd + ΔT / 86400
//! ```
//!
//! holds for every value. Instants are immutable: century fractions and the
//! start of day are derived on demand.
//!
//! | Constructor | Source |
//! |-------------|--------|
//! | [`JulianDay::new`] | raw JD (UT), optional precomputed ΔT |
//! | [`JulianDay::from_utc`] | `chrono::DateTime<Utc>` |
//! | [`JulianDay::from_gregorian`] / [`JulianDay::from_julian`] | calendar date |
//! | [`JulianDay::from_jde`] | JDE (TD) |

use chrono::{DateTime, Duration, NaiveDate, Utc};
use qtty::*;
use std::ops::{Add, Sub};

#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer};

use crate::calendar::{self, CalendarDate};
use crate::delta_t;
use crate::math::modf;

/// J2000.0 epoch: 2000-01-01T12:00:00 TD (JD 2 451 545.0).
pub const J2000: f64 = 2_451_545.0;

/// One Julian century expressed in days.
pub const JULIAN_CENTURY: Days = Days::new(36_525.0);

/// 1582-10-04T00:00:00Z as a Unix timestamp: the last Julian-calendar day.
const GREGORIAN_TIME_START: i64 = -12_220_243_200;

/// Julian centuries elapsed from J2000.0 to `jd`.
#[inline]
pub(crate) fn centuries_since_j2000(jd: f64) -> Centuries {
    Centuries::new(
        ((Days::new(jd) - Days::new(J2000)) / JULIAN_CENTURY)
            .simplify()
            .value(),
    )
}

// ═══════════════════════════════════════════════════════════════════════════
// JulianDay
// ═══════════════════════════════════════════════════════════════════════════

/// An instant on the Julian Day axis (UT) with its ΔT.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct JulianDay {
    jd: Days,
    delta_t: Seconds,
}

impl JulianDay {
    // ── constructors ──────────────────────────────────────────────────

    /// Create from a Julian Day on the UT axis.
    ///
    /// When `delta_t` is `None` it is estimated with [`delta_t::estimate`].
    #[inline]
    pub fn new(jd: f64, delta_t: Option<Seconds>) -> Self {
        Self {
            jd: Days::new(jd),
            delta_t: delta_t.unwrap_or_else(|| delta_t::estimate(jd)),
        }
    }

    /// Create from a Julian Ephemeris Day (TD).
    ///
    /// ΔT is estimated from the JDE value itself.
    pub fn from_jde(jde: f64) -> Self {
        let delta_t = delta_t::estimate(jde);
        Self::new(delta_t::jde_to_jd(jde, delta_t), Some(delta_t))
    }

    /// Gregorian year, month and fractional day.
    #[inline]
    pub fn from_gregorian(y: i32, m: u32, d: f64) -> Self {
        Self::new(calendar::calendar_gregorian_to_jd(y, m, d), None)
    }

    /// Julian-calendar year, month and fractional day.
    #[inline]
    pub fn from_julian(y: i32, m: u32, d: f64) -> Self {
        Self::new(calendar::calendar_julian_to_jd(y, m, d), None)
    }

    /// Build an instant from a `chrono::DateTime<Utc>`.
    ///
    /// The UTC fields are read as a calendar date; dates before 1582-10-04 use
    /// the Julian-calendar formula, later ones the Gregorian formula.
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        Self::new(Self::utc_to_jd(datetime), None)
    }

    /// Julian Day number (UT) of a `chrono::DateTime<Utc>`.
    pub fn utc_to_jd(datetime: DateTime<Utc>) -> f64 {
        use chrono::{Datelike, Timelike};
        let seconds = calendar::seconds_from_hms(
            datetime.hour(),
            datetime.minute(),
            datetime.second() as f64 + datetime.nanosecond() as f64 / 1e9,
        );
        let day = datetime.day() as f64 + seconds.to::<Day>().value();

        if datetime.timestamp() < GREGORIAN_TIME_START {
            calendar::calendar_julian_to_jd(datetime.year(), datetime.month(), day)
        } else {
            calendar::calendar_gregorian_to_jd(datetime.year(), datetime.month(), day)
        }
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// Julian Day on the UT axis.
    #[inline]
    pub const fn jd(&self) -> f64 {
        self.jd.value()
    }

    /// Julian Ephemeris Day on the TD axis.
    #[inline]
    pub fn jde(&self) -> f64 {
        delta_t::jd_to_jde(self.jd.value(), self.delta_t)
    }

    /// ΔT = TD − UT.
    #[inline]
    pub const fn delta_t(&self) -> Seconds {
        self.delta_t
    }

    /// Julian centuries since J2000.0 on the UT axis.
    #[inline]
    pub fn jd_j2000_century(&self) -> Centuries {
        centuries_since_j2000(self.jd())
    }

    /// Julian centuries since J2000.0 on the TD axis.
    ///
    /// This is the `T` of most periodic series.
    #[inline]
    pub fn jde_j2000_century(&self) -> Centuries {
        centuries_since_j2000(self.jde())
    }

    /// The preceding 0h, `floor(jde − 0.5) + 0.5`, keeping the same ΔT.
    #[inline]
    pub fn start_of_day(&self) -> Self {
        let start = (self.jde() - 0.5).floor() + 0.5;
        Self::new(start, Some(self.delta_t))
    }

    /// Calendar date of the UT Julian Day.
    #[inline]
    pub fn to_calendar(&self) -> CalendarDate {
        calendar::jd_to_calendar(self.jd())
    }

    /// Convert to a `chrono::DateTime<Utc>`, rounded to the nearest second.
    ///
    /// Returns `None` if the value falls outside chrono's representable range.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        Self::jd_to_utc(self.jd())
    }

    /// Julian Day (UT) → `chrono::DateTime<Utc>`, rounded to the nearest second.
    pub fn jd_to_utc(jd: f64) -> Option<DateTime<Utc>> {
        let cal = calendar::jd_to_calendar(jd);
        let (_, day_fraction) = modf(jd + 0.5);
        let seconds = (Days::new(day_fraction).to::<Second>().value()).round() as i64;

        let midnight = NaiveDate::from_ymd_opt(cal.year, cal.month, cal.day.floor() as u32)?
            .and_hms_opt(0, 0, 0)?
            .and_utc();
        midnight.checked_add_signed(Duration::seconds(seconds))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait implementations
// ═══════════════════════════════════════════════════════════════════════════

// ── Display ───────────────────────────────────────────────────────────────

impl std::fmt::Display for JulianDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JD {} (ΔT {})", self.jd, self.delta_t)
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl Serialize for JulianDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("JulianDay", 2)?;
        s.serialize_field("jd", &self.jd())?;
        s.serialize_field("delta_t", &self.delta_t.value())?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for JulianDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            jd: f64,
            delta_t: Option<f64>,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(JulianDay::new(raw.jd, raw.delta_t.map(Seconds::new)))
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl Add<Days> for JulianDay {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Days) -> Self::Output {
        Self {
            jd: self.jd + rhs,
            delta_t: self.delta_t,
        }
    }
}

impl Sub<Days> for JulianDay {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Days) -> Self::Output {
        Self {
            jd: self.jd - rhs,
            delta_t: self.delta_t,
        }
    }
}

impl Sub for JulianDay {
    type Output = Days;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.jd - rhs.jd
    }
}

impl From<DateTime<Utc>> for JulianDay {
    #[inline]
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::from_utc(datetime)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
