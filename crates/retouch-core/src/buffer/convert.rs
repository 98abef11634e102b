//! Color mode conversion.
//!
//! Conversions reinterpret channels only. In particular RGBA to RGB drops the
//! alpha channel without compositing over a background, so fully transparent
//! pixels keep whatever RGB values they carried.

use super::color::{cmyk_to_rgb, rgb_to_cmyk, rgb_to_luma};
use super::types::{ColorMode, ImageBuffer};
use crate::encode::ExportFormat;

/// Convert an image to another color mode.
///
/// Returns the input untouched when it is already in `target` mode.
pub fn convert_mode(image: ImageBuffer, target: ColorMode) -> ImageBuffer {
    let source = image.mode();
    if source == target {
        return image;
    }

    let (width, height) = image.dimensions();
    let out_channels = target.channels();
    let mut output = Vec::with_capacity(image.pixel_count() * out_channels);

    for px in image.pixels().chunks_exact(source.channels()) {
        let converted = convert_pixel(px, source, target);
        output.extend_from_slice(&converted[..out_channels]);
    }

    log::trace!("converted {width}x{height} image from {source} to {target}");
    ImageBuffer::from_parts(width, height, target, output)
}

/// Normalize an image before export in `format`.
///
/// JPEG has no alpha channel, so JPEG targets force RGB; every other format
/// leaves the mode alone.
pub fn apply_format_tag(image: ImageBuffer, format: ExportFormat) -> ImageBuffer {
    if format == ExportFormat::Jpeg {
        convert_mode(image, ColorMode::Rgb)
    } else {
        image
    }
}

fn convert_pixel(px: &[u8], from: ColorMode, to: ColorMode) -> [u8; 4] {
    use ColorMode::*;

    match (from, to) {
        (Grayscale, Rgb) => [px[0], px[0], px[0], 0],
        (Grayscale, Rgba) => [px[0], px[0], px[0], 255],
        (Grayscale, Cmyk) => [0, 0, 0, 255 - px[0]],

        (Rgb | Rgba, Grayscale) => [rgb_to_luma(px[0], px[1], px[2]), 0, 0, 0],
        (Rgb, Rgba) => [px[0], px[1], px[2], 255],
        (Rgba, Rgb) => [px[0], px[1], px[2], 0],
        (Rgb | Rgba, Cmyk) => rgb_to_cmyk(px[0], px[1], px[2]),

        (Cmyk, _) => {
            let [r, g, b] = cmyk_to_rgb(px[0], px[1], px[2], px[3]);
            match to {
                Grayscale => [rgb_to_luma(r, g, b), 0, 0, 0],
                Rgba => [r, g, b, 255],
                _ => [r, g, b, 0],
            }
        }

        // Same-mode pairs are handled by the caller.
        (Grayscale, Grayscale) | (Rgb, Rgb) | (Rgba, Rgba) => {
            let mut out = [0u8; 4];
            out[..px.len()].copy_from_slice(px);
            out
        }
    }
}
