//! Color parsing for the configuration file.
//!
//! Colors are written as strings and accept the formats `#RGB`, `#RRGGBB`,
//! `#AARRGGBB` and `0xAARRGGBB` (the window-server native ARGB layout).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// The string does not start with `#` or `0x`.
    #[error("color `{0}` must start with `#` or `0x`")]
    MissingPrefix(String),
    /// The number of hex digits is not supported for the prefix.
    #[error("color `{0}` has an unsupported number of digits")]
    InvalidLength(String),
    /// The string contains non-hex characters.
    #[error("color `{0}` contains invalid hex digits")]
    InvalidDigits(String),
}

/// An RGBA color with normalized (0.0-1.0) components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "String", into = "String")]
#[schemars(with = "String")]
pub struct Rgba {
    /// Red component.
    pub r: f64,
    /// Green component.
    pub g: f64,
    /// Blue component.
    pub b: f64,
    /// Alpha component.
    pub a: f64,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::from_argb(0x0000_0000);

    /// Creates a color from a packed `0xAARRGGBB` value.
    #[must_use]
    pub const fn from_argb(argb: u32) -> Self {
        let [a, r, g, b] = argb.to_be_bytes();
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: a as f64 / 255.0,
        }
    }

    /// Packs the color back into `0xAARRGGBB`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_argb(self) -> u32 {
        // Components are clamped to 0.0-1.0 so the scaled values fit a u8
        let channel = |value: f64| u32::from((value.clamp(0.0, 1.0) * 255.0).round() as u8);
        (channel(self.a) << 24) | (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Returns whether the color is fully transparent.
    #[must_use]
    pub fn is_transparent(self) -> bool { self.a <= 0.0 }
}

impl Default for Rgba {
    fn default() -> Self { Self::TRANSPARENT }
}

impl TryFrom<String> for Rgba {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> { parse_color(&value) }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self { format!("0x{:08X}", color.to_argb()) }
}

/// Parses a color string in any supported format.
///
/// # Errors
///
/// Returns a [`ColorParseError`] when the prefix, length or digits are invalid.
pub fn parse_color(value: &str) -> Result<Rgba, ColorParseError> {
    let trimmed = value.trim();

    if let Some(digits) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        if digits.len() != 8 {
            return Err(ColorParseError::InvalidLength(value.to_string()));
        }
        return parse_digits(digits, value).map(Rgba::from_argb);
    }

    if trimmed.starts_with('#') {
        return parse_hex_color(trimmed);
    }

    Err(ColorParseError::MissingPrefix(value.to_string()))
}

/// Parses a `#`-prefixed hex color: `#RGB`, `#RRGGBB` or `#AARRGGBB`.
///
/// # Errors
///
/// Returns a [`ColorParseError`] when the string is not a valid hex color.
pub fn parse_hex_color(value: &str) -> Result<Rgba, ColorParseError> {
    let Some(digits) = value.trim().strip_prefix('#') else {
        return Err(ColorParseError::MissingPrefix(value.to_string()));
    };

    let argb = match digits.len() {
        3 => {
            let rgb = parse_digits(digits, value)?;
            let expand = |nibble: u32| (nibble << 4) | nibble;
            0xFF00_0000
                | (expand((rgb >> 8) & 0xF) << 16)
                | (expand((rgb >> 4) & 0xF) << 8)
                | expand(rgb & 0xF)
        }
        6 => 0xFF00_0000 | parse_digits(digits, value)?,
        8 => parse_digits(digits, value)?,
        _ => return Err(ColorParseError::InvalidLength(value.to_string())),
    };

    Ok(Rgba::from_argb(argb))
}

fn parse_digits(digits: &str, original: &str) -> Result<u32, ColorParseError> {
    u32::from_str_radix(digits, 16).map_err(|_| ColorParseError::InvalidDigits(original.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_window_server_argb() {
        let color = parse_color("0xff1e1e2e").unwrap();
        assert_eq!(color.to_argb(), 0xFF1E_1E2E);
    }

    #[test]
    fn parses_short_hex() {
        let color = parse_hex_color("#fff").unwrap();
        assert_eq!(color.to_argb(), 0xFFFF_FFFF);
    }

    #[test]
    fn six_digit_hex_is_opaque() {
        let color = parse_color("#102030").unwrap();
        assert_eq!(color.to_argb(), 0xFF10_2030);
        assert!((color.a - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn eight_digit_hex_keeps_alpha() {
        let color = parse_color("#80000000").unwrap();
        assert_eq!(color.to_argb(), 0x8000_0000);
    }

    #[test]
    fn rejects_missing_prefix() {
        assert!(matches!(parse_color("ffffff"), Err(ColorParseError::MissingPrefix(_))));
    }

    #[test]
    fn rejects_bad_length_and_digits() {
        assert!(matches!(parse_color("#12345"), Err(ColorParseError::InvalidLength(_))));
        assert!(matches!(parse_color("0x123"), Err(ColorParseError::InvalidLength(_))));
        assert!(matches!(parse_color("#zzzzzz"), Err(ColorParseError::InvalidDigits(_))));
    }

    #[test]
    fn default_is_transparent() {
        assert!(Rgba::default().is_transparent());
    }

    #[test]
    fn deserializes_from_string() {
        let color: Rgba = serde_json::from_str("\"#ff0000\"").unwrap();
        assert_eq!(color.to_argb(), 0xFFFF_0000);

        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, "\"0xFFFF0000\"");
    }
}
