//! sRGB colour values parsed from hex strings.
//!
//! Style descriptions carry colours as `#RRGGBB` or `#RRGGBBAA`. They are
//! held as straight-alpha floats (0.0-1.0) so the layer effects can work in
//! the same f32 space as the rest of the raster code.

use std::fmt;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Error returned by [`Rgba::from_hex`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex colour {0:?}: expected #RRGGBB or #RRGGBBAA")]
pub struct ColorParseError(pub String);

/// Straight-alpha RGBA colour, all channels 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque colour from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (case-insensitive, leading `#` required).
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let err = || ColorParseError(hex.to_string());
        let digits = hex.strip_prefix('#').ok_or_else(err)?;
        if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
            return Err(err());
        }

        let channel = |i: usize| -> Result<f32, ColorParseError> {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| err())
        };

        let a = if digits.len() == 8 { channel(6)? } else { 1.0 };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Linear interpolation between two colours, `t` in 0.0-1.0.
    #[inline]
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        Rgba::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Returns the colour with its alpha multiplied by `factor`.
    #[inline]
    pub fn with_alpha_scaled(self, factor: f32) -> Rgba {
        Rgba { a: (self.a * factor).clamp(0.0, 1.0), ..self }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let to8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        write!(f, "#{:02x}{:02x}{:02x}", to8(self.r), to8(self.g), to8(self.b))?;
        if self.a < 1.0 {
            write!(f, "{:02x}", to8(self.a))?;
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgba::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb_hex() {
        let c = Rgba::from_hex("#FF8000").unwrap();
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_parse_rgba_hex_lowercase() {
        let c = Rgba::from_hex("#00ff0080").unwrap();
        assert_eq!(c.g, 1.0);
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_malformed_hex() {
        assert!(Rgba::from_hex("ff0000").is_err());
        assert!(Rgba::from_hex("#ff00").is_err());
        assert!(Rgba::from_hex("#gg0000").is_err());
        assert!(Rgba::from_hex("#ff0000ff00").is_err());
    }

    #[test]
    fn test_display_round_trips_through_hex() {
        assert_eq!(Rgba::from_rgb8(18, 52, 86).to_string(), "#123456");
        assert_eq!(Rgba::new(1.0, 0.0, 0.0, 0.0).to_string(), "#ff000000");
    }

    #[test]
    fn test_lerp_midpoint() {
        let mid = Rgba::BLACK.lerp(Rgba::WHITE, 0.5);
        assert!((mid.r - 0.5).abs() < 1e-6);
        assert_eq!(mid.a, 1.0);
    }
}
