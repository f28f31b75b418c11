// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error taxonomy for the solar/lunar pipelines.
//!
//! | Variant | Raised by | Meaning |
//! |---------|-----------|---------|
//! | [`InvalidCoordinate`](AstroError::InvalidCoordinate) | coordinate constructors | non-finite angle or latitude out of range |
//! | [`EmptyPolynomial`](AstroError::EmptyPolynomial) | [`horner`](crate::math::horner) | no coefficients supplied |
//! | [`UnsupportedMultiplier`](AstroError::UnsupportedMultiplier) | lunar series | table row outside the E-factor domain |
//! | [`InvalidInterpolation`](AstroError::InvalidInterpolation) | [`Len3`](crate::interp::Len3) | degenerate 3-point table |
//!
//! A body that never crosses the requested altitude is **not** an error: the
//! rise solver reports it through [`RiseSetResult`](crate::rise::RiseSetResult).

/// Result type used by every fallible operation in the crate.
pub type AstroResult<T> = Result<T, AstroError>;

/// Coordinate record that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateKind {
    Equatorial,
    Ecliptic,
    Horizontal,
    Geodetic,
}

impl std::fmt::Display for CoordinateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Equatorial => "equatorial",
            Self::Ecliptic => "ecliptic",
            Self::Horizontal => "horizontal",
            Self::Geodetic => "geodetic",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AstroError {
    #[error("invalid {kind} coordinate: ({a}, {b})")]
    InvalidCoordinate { kind: CoordinateKind, a: f64, b: f64 },

    #[error("polynomial evaluation requires at least one coefficient")]
    EmptyPolynomial,

    #[error("{table} row {row}: unsupported mean-anomaly multiplier {multiplier}")]
    UnsupportedMultiplier {
        table: &'static str,
        row: usize,
        multiplier: i32,
    },

    #[error("invalid interpolation table: {0}")]
    InvalidInterpolation(&'static str),
}

impl AstroError {
    #[inline]
    pub(crate) fn invalid_coordinate(kind: CoordinateKind, a: f64, b: f64) -> Self {
        Self::InvalidCoordinate { kind, a, b }
    }
}
