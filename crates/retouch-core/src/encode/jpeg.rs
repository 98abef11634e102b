//! JPEG encoding for export.
//!
//! This module provides JPEG encoding using the `image` crate's JPEG encoder.
//! JPEG stores grayscale or RGB only; RGBA buffers must be flattened first.

use super::{check_encodable, EncodeError, ExportFormat};
use crate::buffer::{ColorMode, ImageBuffer};
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};
use std::io::Cursor;

/// Quality used when the caller does not pick one.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Encode a grayscale or RGB image to JPEG bytes.
///
/// # Arguments
///
/// * `image` - Image to encode (mode `L` or `RGB`)
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival or further editing
/// * 80-90: Good quality, recommended for most uses
/// * 60-80: Medium quality, acceptable for web/social media
/// * Below 60: Low quality, visible artifacts
pub fn encode_jpeg(image: &ImageBuffer, quality: u8) -> Result<Vec<u8>, EncodeError> {
    check_encodable(
        image,
        ExportFormat::Jpeg,
        &[ColorMode::Grayscale, ColorMode::Rgb],
    )?;

    let color_type = match image.mode() {
        ColorMode::Grayscale => ExtendedColorType::L8,
        _ => ExtendedColorType::Rgb8,
    };

    // Clamp quality to valid range (1-100)
    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(image.pixels(), image.width(), image.height(), color_type)
        .map_err(|e| EncodeError::EncodingFailed {
            format: ExportFormat::Jpeg,
            message: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}
