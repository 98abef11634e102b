//! Text drawing onto an image.

use super::font::{GlyphMask, TextRasterizer};
use crate::buffer::{Color, ImageBuffer, OperationError};

/// Draw `text` with its drawing position at `(x, y)`.
///
/// Glyph pixels are blended over the image by their coverage in the image's
/// own color mode; anything falling outside the image is clipped.
pub fn draw_text(
    mut image: ImageBuffer,
    text: &str,
    position: (i32, i32),
    size: u32,
    color: Color,
    font: &dyn TextRasterizer,
) -> Result<ImageBuffer, OperationError> {
    let mask = font.rasterize(text, size)?;
    let samples = color.to_samples(image.mode());
    let channels = image.channels();
    paste_mask(&mut image, &mask, position, &samples[..channels]);

    log::trace!(
        "drew {}x{} text at ({}, {})",
        mask.bounds.width,
        mask.bounds.height,
        position.0,
        position.1
    );
    Ok(image)
}

/// Blend `ink` into `image` through a glyph mask placed at `position`.
///
/// Every channel, alpha included, moves toward `ink` by `coverage / 255`.
pub(crate) fn paste_mask(
    image: &mut ImageBuffer,
    mask: &GlyphMask,
    position: (i32, i32),
    ink: &[u8],
) {
    debug_assert_eq!(ink.len(), image.channels());

    let left = position.0 as i64 + mask.bounds.offset_x as i64;
    let top = position.1 as i64 + mask.bounds.offset_y as i64;
    let (width, height) = (image.width() as i64, image.height() as i64);

    for (mx, my, coverage) in mask.coverage.enumerate_pixels() {
        let coverage = coverage[0] as u32;
        if coverage == 0 {
            continue;
        }

        let x = left + mx as i64;
        let y = top + my as i64;
        if x < 0 || y < 0 || x >= width || y >= height {
            continue;
        }

        let px = image.pixel_mut(x as u32, y as u32);
        for (dst, &src) in px.iter_mut().zip(ink) {
            let blended = *dst as u32 * (255 - coverage) + src as u32 * coverage;
            *dst = ((blended + 127) / 255) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::ColorMode;
    use crate::draw::font::testing::{BlockFont, MissingFont};
    use crate::draw::font::{BitmapFont, TextBounds};
    use image::{GrayImage, Luma};

    #[test]
    fn test_block_text_placement() {
        let img = ImageBuffer::filled(10, 10, ColorMode::Rgb, [0; 4]);
        let font = BlockFont {
            width: 3,
            height: 2,
        };
        let out = draw_text(img, "x", (4, 5), 36, Color::WHITE, &font).unwrap();

        assert_eq!(out.pixel(4, 5), &[255, 255, 255]);
        assert_eq!(out.pixel(6, 6), &[255, 255, 255]);
        assert_eq!(out.pixel(7, 6), &[0, 0, 0]);
        assert_eq!(out.pixel(4, 7), &[0, 0, 0]);
        assert_eq!(out.pixel(3, 5), &[0, 0, 0]);
    }

    #[test]
    fn test_text_clipped_at_edges() {
        let img = ImageBuffer::filled(4, 4, ColorMode::Grayscale, [0; 4]);
        let font = BlockFont {
            width: 10,
            height: 10,
        };
        let out = draw_text(img, "x", (-2, 2), 36, Color::WHITE, &font).unwrap();
        assert_eq!(out.pixel(0, 1), &[0]);
        assert_eq!(out.pixel(0, 2), &[255]);
        assert_eq!(out.pixel(3, 3), &[255]);
    }

    #[test]
    fn test_text_color_follows_mode() {
        let img = ImageBuffer::filled(2, 2, ColorMode::Cmyk, [0; 4]);
        let font = BlockFont {
            width: 1,
            height: 1,
        };
        let out = draw_text(img, "x", (0, 0), 36, Color::RED, &font).unwrap();
        assert_eq!(out.pixel(0, 0), &[0, 255, 255, 0]);
    }

    #[test]
    fn test_builtin_font_draws_something() {
        let img = ImageBuffer::filled(200, 60, ColorMode::Rgb, [0; 4]);
        let out = draw_text(
            img.clone(),
            "Sample Text",
            (10, 10),
            36,
            Color::WHITE,
            &BitmapFont::new(),
        )
        .unwrap();
        assert_ne!(out, img);
        // Nothing is drawn above the drawing position
        assert!(out.pixels()[..10 * out.stride()].iter().all(|&v| v == 0));
    }

    #[test]
    fn test_missing_font_is_font_unavailable() {
        let img = ImageBuffer::filled(2, 2, ColorMode::Rgb, [0; 4]);
        let err = draw_text(img, "x", (0, 0), 36, Color::WHITE, &MissingFont).unwrap_err();
        assert!(matches!(err, OperationError::FontUnavailable(_)));
    }

    #[test]
    fn test_partial_coverage_blends() {
        let mut img = ImageBuffer::filled(1, 1, ColorMode::Rgba, [0, 0, 0, 0]);
        let mask = GlyphMask {
            bounds: TextBounds {
                offset_x: 0,
                offset_y: 0,
                width: 1,
                height: 1,
            },
            coverage: GrayImage::from_pixel(1, 1, Luma([128])),
        };
        paste_mask(&mut img, &mask, (0, 0), &[255, 255, 255, 255]);
        assert_eq!(img.pixel(0, 0), &[128, 128, 128, 128]);
    }
}
