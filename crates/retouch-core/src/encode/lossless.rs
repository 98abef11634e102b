//! PNG, BMP and GIF encoding.

use super::{check_encodable, EncodeError, ExportFormat};
use crate::buffer::{convert_mode, ColorMode, ImageBuffer};
use image::codecs::gif::GifEncoder;
use image::{ExtendedColorType, ImageFormat};
use std::io::Cursor;

const GRAY_RGB_RGBA: &[ColorMode] = &[ColorMode::Grayscale, ColorMode::Rgb, ColorMode::Rgba];

/// Encode an image as PNG.
pub fn encode_png(image: &ImageBuffer) -> Result<Vec<u8>, EncodeError> {
    write_with_format(image, ExportFormat::Png, ImageFormat::Png)
}

/// Encode an image as an uncompressed BMP.
pub fn encode_bmp(image: &ImageBuffer) -> Result<Vec<u8>, EncodeError> {
    write_with_format(image, ExportFormat::Bmp, ImageFormat::Bmp)
}

/// Encode an image as a single-frame GIF.
///
/// The GIF encoder quantizes RGBA input, so grayscale and RGB buffers are
/// widened before encoding.
pub fn encode_gif(image: &ImageBuffer) -> Result<Vec<u8>, EncodeError> {
    check_encodable(image, ExportFormat::Gif, GRAY_RGB_RGBA)?;

    let rgba = convert_mode(image.clone(), ColorMode::Rgba);
    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut bytes);
        encoder
            .encode(
                rgba.pixels(),
                rgba.width(),
                rgba.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(|e| EncodeError::EncodingFailed {
                format: ExportFormat::Gif,
                message: e.to_string(),
            })?;
    }
    Ok(bytes)
}

fn write_with_format(
    image: &ImageBuffer,
    format: ExportFormat,
    image_format: ImageFormat,
) -> Result<Vec<u8>, EncodeError> {
    check_encodable(image, format, GRAY_RGB_RGBA)?;

    let color_type = match image.mode() {
        ColorMode::Grayscale => ExtendedColorType::L8,
        ColorMode::Rgba => ExtendedColorType::Rgba8,
        _ => ExtendedColorType::Rgb8,
    };

    let mut buffer = Cursor::new(Vec::new());
    image::write_buffer_with_format(
        &mut buffer,
        image.pixels(),
        image.width(),
        image.height(),
        color_type,
        image_format,
    )
    .map_err(|e| EncodeError::EncodingFailed {
        format,
        message: e.to_string(),
    })?;

    Ok(buffer.into_inner())
}
