//! Semi-transparent text watermark.
//!
//! The text is drawn at half opacity onto a transparent overlay the size of
//! the image, and the overlay is then composited over the image. The result
//! is always RGBA.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::composite::alpha_composite;
use super::font::{TextBounds, TextRasterizer};
use super::text::paste_mask;
use crate::buffer::{convert_mode, Color, ColorMode, ImageBuffer, OperationError};

/// Watermark text is always measured and drawn at this size.
pub const WATERMARK_FONT_SIZE: u32 = 36;

/// Distance from the right and bottom edges for [`WatermarkPosition::BottomRight`].
pub const WATERMARK_MARGIN: i32 = 10;

/// 50% opaque white.
pub const WATERMARK_INK: Color = Color::rgba(255, 255, 255, 128);

/// Where the watermark text goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WatermarkPosition {
    #[default]
    Center,
    BottomRight,
}

impl WatermarkPosition {
    pub fn name(self) -> &'static str {
        match self {
            WatermarkPosition::Center => "center",
            WatermarkPosition::BottomRight => "bottom_right",
        }
    }
}

impl fmt::Display for WatermarkPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WatermarkPosition {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        match normalized.as_str() {
            "center" | "centre" => Ok(WatermarkPosition::Center),
            "bottom_right" | "bottomright" => Ok(WatermarkPosition::BottomRight),
            _ => Err(OperationError::InvalidParameter(format!(
                "unknown watermark position `{s}`"
            ))),
        }
    }
}

impl TryFrom<String> for WatermarkPosition {
    type Error = OperationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<WatermarkPosition> for String {
    fn from(position: WatermarkPosition) -> Self {
        position.name().to_string()
    }
}

/// Drawing position for text of size `bounds` on a `width` x `height` image.
///
/// Centering uses floor division, so odd leftovers go to the right and bottom.
/// The position can be negative when the text is larger than the image.
pub fn watermark_origin(
    width: u32,
    height: u32,
    bounds: TextBounds,
    position: WatermarkPosition,
) -> (i32, i32) {
    let free_x = width as i64 - bounds.width as i64;
    let free_y = height as i64 - bounds.height as i64;

    let (x, y) = match position {
        WatermarkPosition::Center => (free_x.div_euclid(2), free_y.div_euclid(2)),
        WatermarkPosition::BottomRight => (
            free_x - WATERMARK_MARGIN as i64,
            free_y - WATERMARK_MARGIN as i64,
        ),
    };
    (clamp_i32(x), clamp_i32(y))
}

fn clamp_i32(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Stamp `text` onto `image` at `position`.
pub fn add_watermark(
    image: ImageBuffer,
    text: &str,
    position: WatermarkPosition,
    font: &dyn TextRasterizer,
) -> Result<ImageBuffer, OperationError> {
    let image = convert_mode(image, ColorMode::Rgba);
    let (width, height) = image.dimensions();

    let bounds = font.measure(text, WATERMARK_FONT_SIZE)?;
    let origin = watermark_origin(width, height, bounds, position);

    let mut overlay = ImageBuffer::filled(width, height, ColorMode::Rgba, [255, 255, 255, 0]);
    let mask = font.rasterize(text, WATERMARK_FONT_SIZE)?;
    paste_mask(
        &mut overlay,
        &mask,
        origin,
        &WATERMARK_INK.to_samples(ColorMode::Rgba),
    );

    log::trace!("watermark `{text}` at {origin:?} ({position})");
    alpha_composite(&image, &overlay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::font::testing::{BlockFont, MissingFont};
    use crate::draw::font::BitmapFont;

    fn bounds(width: u32, height: u32) -> TextBounds {
        TextBounds {
            offset_x: 0,
            offset_y: 0,
            width,
            height,
        }
    }

    #[test]
    fn test_bottom_right_origin() {
        let origin = watermark_origin(200, 100, bounds(40, 20), WatermarkPosition::BottomRight);
        assert_eq!(origin, (150, 70));
    }

    #[test]
    fn test_center_origin_floors() {
        let origin = watermark_origin(201, 101, bounds(40, 20), WatermarkPosition::Center);
        assert_eq!(origin, (80, 40));

        // Text wider than the image: floor, not truncation toward zero
        let origin = watermark_origin(10, 10, bounds(15, 13), WatermarkPosition::Center);
        assert_eq!(origin, (-3, -2));
    }

    #[test]
    fn test_watermark_pixels() {
        let img = ImageBuffer::filled(200, 100, ColorMode::Rgb, [0; 4]);
        let font = BlockFont {
            width: 40,
            height: 20,
        };
        let out = add_watermark(img, "x", WatermarkPosition::BottomRight, &font).unwrap();

        assert_eq!(out.mode(), ColorMode::Rgba);
        assert_eq!(out.pixel(150, 70), &[128, 128, 128, 255]);
        assert_eq!(out.pixel(189, 89), &[128, 128, 128, 255]);
        assert_eq!(out.pixel(149, 70), &[0, 0, 0, 255]);
        assert_eq!(out.pixel(190, 90), &[0, 0, 0, 255]);
    }

    #[test]
    fn test_watermark_is_always_rgba() {
        for mode in [ColorMode::Grayscale, ColorMode::Rgba, ColorMode::Cmyk] {
            let img = ImageBuffer::filled(120, 60, mode, [0; 4]);
            let out =
                add_watermark(img, "wm", WatermarkPosition::Center, &BitmapFont::new()).unwrap();
            assert_eq!(out.mode(), ColorMode::Rgba);
            assert_eq!(out.dimensions(), (120, 60));
        }
    }

    #[test]
    fn test_watermark_on_transparent_image() {
        let img = ImageBuffer::filled(50, 50, ColorMode::Rgba, [0; 4]);
        let font = BlockFont {
            width: 10,
            height: 10,
        };
        let out = add_watermark(img, "x", WatermarkPosition::Center, &font).unwrap();
        assert_eq!(out.pixel(20, 20), &[255, 255, 255, 128]);
        assert_eq!(out.pixel(0, 0), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_missing_font() {
        let img = ImageBuffer::filled(10, 10, ColorMode::Rgb, [0; 4]);
        let err = add_watermark(img, "x", WatermarkPosition::Center, &MissingFont).unwrap_err();
        assert!(matches!(err, OperationError::FontUnavailable(_)));
    }

    #[test]
    fn test_position_parsing() {
        for s in ["bottom_right", "Bottom Right", "BOTTOM-RIGHT", "bottomright"] {
            assert_eq!(s.parse::<WatermarkPosition>().unwrap(), WatermarkPosition::BottomRight);
        }
        assert_eq!("Center".parse::<WatermarkPosition>().unwrap(), WatermarkPosition::Center);
        assert!("top_left".parse::<WatermarkPosition>().is_err());
    }
}
