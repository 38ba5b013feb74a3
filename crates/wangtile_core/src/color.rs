//! Display colors for terrain classes

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Returned when a `#RRGGBB` / `#AARRGGBB` string cannot be decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color '{0}': expected #RRGGBB or #AARRGGBB")]
pub struct ParseColorError(pub String);

/// Simple RGBA color for terrain visualization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);

    /// Parse Tiled's hex notation. Tiled writes alpha first (`#AARRGGBB`).
    pub fn from_hex(s: &str) -> Result<Self, ParseColorError> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        let channel = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|c| u8::from_str_radix(c, 16).ok())
                .map(|v| v as f32 / 255.0)
                .ok_or_else(|| ParseColorError(s.to_string()))
        };

        match hex.len() {
            6 => Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Self::rgba(channel(2)?, channel(4)?, channel(6)?, channel(0)?)),
            _ => Err(ParseColorError(s.to_string())),
        }
    }

    /// Format as `#RRGGBB`, or `#AARRGGBB` when not fully opaque
    pub fn to_hex(&self) -> String {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        if byte(self.a) == 255 {
            format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                byte(self.a),
                byte(self.r),
                byte(self.g),
                byte(self.b)
            )
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
