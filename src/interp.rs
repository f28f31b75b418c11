// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Three-point interpolation over equally spaced abscissas (Meeus, chapter 3).

use crate::error::{AstroError, AstroResult};

/// A three-row table `(x₁, y₀), (x₂, y₁), (x₃, y₂)` with `x₂` the midpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Len3 {
    x1: f64,
    x3: f64,
    y: [f64; 3],
    a: f64,
    b: f64,
    c: f64,
}

impl Len3 {
    /// Builds the table from the outer abscissas and exactly three ordinates.
    ///
    /// # Errors
    ///
    /// [`AstroError::InvalidInterpolation`] when `y` does not hold three values
    /// or when `x1 == x3`.
    pub fn new(x1: f64, x3: f64, y: &[f64]) -> AstroResult<Self> {
        let y: [f64; 3] = y
            .try_into()
            .map_err(|_| AstroError::InvalidInterpolation("exactly three ordinates required"))?;
        if x3 == x1 {
            return Err(AstroError::InvalidInterpolation("empty abscissa range"));
        }
        let a = y[1] - y[0];
        let b = y[2] - y[1];
        Ok(Self {
            x1,
            x3,
            y,
            a,
            b,
            c: b - a,
        })
    }

    /// Interpolated value at `x`.
    #[inline]
    pub fn interpolate_x(&self, x: f64) -> f64 {
        let n = (2.0 * x - (self.x3 + self.x1)) / (self.x3 - self.x1);
        self.interpolate_n(n)
    }

    /// Interpolated value at factor `n = x − x₂` in table intervals (3.3).
    #[inline]
    pub fn interpolate_n(&self, n: f64) -> f64 {
        self.y[1] + n * 0.5 * (self.a + self.b + n * self.c)
    }
}
