//! Drawing colors and per-pixel color space math.

use super::types::{ColorMode, OperationError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An RGBA drawing color.
///
/// Deserializes from `"#rrggbb"`, `"#rrggbbaa"`, `[r, g, b]` or `[r, g, b, a]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr", into = "ColorRepr")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Gray level with full opacity.
    pub const fn gray(level: u8) -> Self {
        Self::rgb(level, level, level)
    }

    /// Samples for this color in the given mode.
    ///
    /// Only the first `mode.channels()` entries are meaningful.
    pub fn to_samples(self, mode: ColorMode) -> [u8; 4] {
        match mode {
            ColorMode::Grayscale => [rgb_to_luma(self.r, self.g, self.b), 0, 0, 0],
            ColorMode::Rgb => [self.r, self.g, self.b, 0],
            ColorMode::Rgba => [self.r, self.g, self.b, self.a],
            ColorMode::Cmyk => rgb_to_cmyk(self.r, self.g, self.b),
        }
    }
}

impl FromStr for Color {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || OperationError::InvalidParameter(format!("invalid color `{s}`"));
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Rgb([u8; 3]),
    Rgba([u8; 4]),
}

impl TryFrom<ColorRepr> for Color {
    type Error = OperationError;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Hex(s) => s.parse(),
            ColorRepr::Rgb([r, g, b]) => Ok(Color::rgb(r, g, b)),
            ColorRepr::Rgba([r, g, b, a]) => Ok(Color::rgba(r, g, b, a)),
        }
    }
}

impl From<Color> for ColorRepr {
    fn from(color: Color) -> Self {
        ColorRepr::Rgba([color.r, color.g, color.b, color.a])
    }
}

/// Luma using ITU-R 601-2 weights in 16-bit fixed point.
///
/// `L = R * 299/1000 + G * 587/1000 + B * 114/1000`, rounded.
#[inline]
pub fn rgb_to_luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16) as u8
}

/// Naive RGB to CMYK: inverted channels with no black generation.
#[inline]
pub fn rgb_to_cmyk(r: u8, g: u8, b: u8) -> [u8; 4] {
    [255 - r, 255 - g, 255 - b, 0]
}

/// CMYK to RGB: each channel is `(255 - k) - c * (255 - k) / 255`.
#[inline]
pub fn cmyk_to_rgb(c: u8, m: u8, y: u8, k: u8) -> [u8; 3] {
    let nk = 255 - k as u32;
    let channel = |v: u8| (nk - mul_div_255(v as u32, nk)) as u8;
    [channel(c), channel(m), channel(y)]
}

/// `a * b / 255` with rounding, exact for 8-bit inputs.
#[inline]
fn mul_div_255(a: u32, b: u32) -> u32 {
    let tmp = a * b + 128;
    ((tmp >> 8) + tmp) >> 8
}
