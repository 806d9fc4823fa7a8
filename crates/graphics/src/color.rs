use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GeometryError;

/// An sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const GRAY: Self = Self::rgb(128, 128, 128);
    pub const LIGHT_GRAY: Self = Self::rgb(192, 192, 192);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Scale the RGB channels by `shade`, clamped to `[0, 1]`. Alpha is kept.
    pub fn shaded(self, shade: f64) -> Self {
        let s = if shade.is_nan() { 0.0 } else { shade.clamp(0.0, 1.0) };
        let scale = |c: u8| (f64::from(c) * s).round() as u8;
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
            a: self.a,
        }
    }

    /// A darker variant, used for strokes drawn over a fill.
    pub fn darker(self) -> Self {
        self.shaded(0.7)
    }

    /// `#rrggbb` form; alpha is dropped.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as an opacity in `[0, 1]`.
    pub fn opacity(&self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl FromStr for Color {
    type Err = GeometryError;

    /// Parse `#rrggbb` or `#rrggbbaa`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GeometryError::InvalidConfig {
            reason: format!("invalid color '{s}'"),
        };
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if (hex.len() != 6 && hex.len() != 8) || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }
}
