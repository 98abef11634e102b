//! Decoding uploaded files into an [`ImageBuffer`].
//!
//! Format detection and decompression are delegated to the `image` crate;
//! this module only maps its output onto the engine's four color modes.
//!
//! # Examples
//!
//! ```ignore
//! use retouch_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} {} image", image.width(), image.height(), image.mode());
//! ```

use crate::buffer::ImageBuffer;
use crate::encode::ExportFormat;
use image::ImageError;
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The decoded image would exceed the decoder's memory limits.
    #[error("Image too large to decode: {0}")]
    TooLarge(String),
}

impl From<ImageError> for DecodeError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::Unsupported(_) => DecodeError::InvalidFormat,
            ImageError::Limits(e) => DecodeError::TooLarge(e.to_string()),
            other => DecodeError::CorruptedFile(other.to_string()),
        }
    }
}

/// Decode an uploaded file (PNG, JPEG, BMP or GIF) from memory.
///
/// 8-bit grayscale, RGB and RGBA images keep their mode; gray+alpha,
/// 16-bit and float images are widened to RGBA or RGB.
pub fn decode_image(bytes: &[u8]) -> Result<ImageBuffer, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }

    let decoded = image::load_from_memory(bytes)?;
    let image = ImageBuffer::from_dynamic(decoded);

    log::debug!(
        "decoded {}x{} {} image from {} bytes",
        image.width(),
        image.height(),
        image.mode(),
        bytes.len()
    );
    Ok(image)
}

/// Guess the export format matching an uploaded file's contents.
pub fn detect_format(bytes: &[u8]) -> Option<ExportFormat> {
    match image::guess_format(bytes).ok()? {
        image::ImageFormat::Png => Some(ExportFormat::Png),
        image::ImageFormat::Jpeg => Some(ExportFormat::Jpeg),
        image::ImageFormat::Bmp => Some(ExportFormat::Bmp),
        image::ImageFormat::Gif => Some(ExportFormat::Gif),
        _ => None,
    }
}
