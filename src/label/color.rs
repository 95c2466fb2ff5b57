//! Hex color parsing.
//!
//! Label colors are given as six hex digits (`RRGGBB`), optionally prefixed
//! with `#`. Each two-digit pair at offsets 0, 2 and 4 becomes one byte.

use std::fmt;
use std::str::FromStr;

use crate::error::LabelError;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// White color.
    pub const fn white() -> Self {
        Self::new(255, 255, 255)
    }

    /// Black color.
    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }

    /// Default label foreground (`e50000`).
    pub const fn label_red() -> Self {
        Self::new(0xe5, 0x00, 0x00)
    }

    /// Lowercase `rrggbb` form without a leading `#`.
    pub fn to_hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

impl FromStr for Color {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_color(s)
    }
}

/// Parse a hex color string into RGB components.
///
/// Accepts `RRGGBB` or `#RRGGBB`, case-insensitive. Anything else, including
/// non-hex characters, is rejected with [`LabelError::InvalidColor`].
///
/// # Examples
///
/// ```
/// use image_labeler::label::{parse_hex_color, Color};
///
/// assert_eq!(parse_hex_color("00ff00").unwrap(), Color::new(0, 255, 0));
/// assert_eq!(parse_hex_color("#E50000").unwrap(), Color::new(229, 0, 0));
/// ```
pub fn parse_hex_color(value: &str) -> Result<Color, LabelError> {
    let trimmed = value.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);

    if hex.len() != 6 {
        return Err(LabelError::invalid_color(
            value,
            format!("expected 6 hex digits, got {} characters", hex.len()),
        ));
    }

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(LabelError::invalid_color(value, "non-hex digit"));
    }

    let byte_at = |offset: usize| {
        u8::from_str_radix(&hex[offset..offset + 2], 16)
            .map_err(|e| LabelError::invalid_color(value, e.to_string()))
    };

    Ok(Color::new(byte_at(0)?, byte_at(2)?, byte_at(4)?))
}
