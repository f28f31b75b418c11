// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Solar and lunar ephemerides
//!
//! Apparent places of the Sun and the Moon, their rise, transit and set
//! times, and the instants of the equinoxes and solstices, following the
//! series of Meeus' *Astronomical Algorithms*.
//!
//! # Conventions
//!
//! - Angles are radians internally. Degrees appear only at the
//!   [`almanac`] and [`format`] boundaries.
//! - Observer longitude is **positive westward** inside [`GeoLocation`];
//!   [`GeoLocation::from_wgs84`] takes the usual east-positive degrees.
//! - Azimuth is measured from the **south**, positive westward.
//! - [`JulianDay`] carries a UT Julian day and its ΔT; the dynamical day
//!   (JDE) is derived on demand.
//!
//! # Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`math`] | Horner evaluation, positive modulo |
//! | [`calendar`] | Gregorian/Julian calendar ↔ Julian day |
//! | [`delta_t`] | ΔT = TT − UT estimate |
//! | [`julian_day`] | [`JulianDay`] |
//! | [`coord`] | Equatorial, ecliptic, horizontal frames and observer location |
//! | [`nutation`] | Nutation and obliquity of the ecliptic |
//! | [`sidereal`] | Mean and apparent sidereal time |
//! | [`interp`] | Three-point interpolation |
//! | [`refraction`] | Atmospheric refraction |
//! | [`parallax`] | Topocentric parallax corrections |
//! | [`rise`] | Rise/transit/set solver |
//! | [`solar`] | Low-precision solar position and events |
//! | [`moon`] | Lunar position (ELP-2000/82 truncated) and events |
//! | [`moon_illum`] | Phase angle and illuminated fraction |
//! | [`solstice`] | Equinoxes and solstices |
//! | [`suncalc`] | Named twilight events and simplified Moon model |
//! | [`format`] | Display helpers |
//! | [`almanac`] | Degree-based entry points over `chrono` dates |
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use solunar::{solar, GeoLocation, JulianDay};
//!
//! let jd = JulianDay::from_utc(Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap());
//! let sun = solar::apparent_equatorial(&jd);
//! assert!((sun.dec.to_degrees() + 23.03).abs() < 0.05);
//!
//! let greenwich = GeoLocation::from_wgs84(51.4779, 0.0, 46.0).unwrap();
//! assert!(solar::times(&jd, &greenwich).unwrap().events().is_some());
//! ```

pub mod almanac;
pub mod calendar;
pub mod coord;
pub mod delta_t;
pub mod error;
pub mod format;
pub mod interp;
pub mod julian_day;
pub mod math;
pub mod moon;
pub mod moon_illum;
mod moon_terms;
pub mod nutation;
pub mod parallax;
pub mod refraction;
pub mod rise;
pub mod sidereal;
pub mod solar;
pub mod solstice;
pub mod suncalc;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use coord::{EclipticCoord, EquatorialCoord, GeoLocation, HorizontalCoord};
pub use error::{AstroError, AstroResult, CoordinateKind};
pub use julian_day::{JulianDay, J2000};
pub use rise::{EventTime, RiseSetResult, RiseTransitSet};
pub use solstice::Season;
