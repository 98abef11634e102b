//! Image encoding for export.
//!
//! This module turns the pipeline's final [`ImageBuffer`] into a downloadable
//! byte stream:
//! - PNG (the default export format)
//! - JPEG with configurable quality
//! - BMP and GIF
//!
//! Encoding never changes pixels. Buffers whose mode the target format cannot
//! store fail with [`EncodeError::UnsupportedMode`]; use the pipeline's format
//! conversion slot (or [`crate::buffer::apply_format_tag`]) to normalize first.
//!
//! # Examples
//!
//! ```ignore
//! use retouch_core::encode::{encode_image, ExportFormat};
//!
//! let png_bytes = encode_image(&image, ExportFormat::Png).unwrap();
//! println!("Encoded {} bytes", png_bytes.len());
//! ```

mod format;
mod jpeg;
mod lossless;

pub use format::ExportFormat;
pub use jpeg::{encode_jpeg, DEFAULT_JPEG_QUALITY};
pub use lossless::{encode_bmp, encode_gif, encode_png};

use crate::buffer::{ColorMode, ImageBuffer};
use thiserror::Error;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The target format cannot store this color mode
    #[error("{format} cannot store {mode} images")]
    UnsupportedMode {
        format: ExportFormat,
        mode: ColorMode,
    },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("{format} encoding failed: {message}")]
    EncodingFailed {
        format: ExportFormat,
        message: String,
    },
}

/// Encode an image in the given format, using default settings.
pub fn encode_image(image: &ImageBuffer, format: ExportFormat) -> Result<Vec<u8>, EncodeError> {
    let bytes = match format {
        ExportFormat::Png => encode_png(image),
        ExportFormat::Jpeg => encode_jpeg(image, DEFAULT_JPEG_QUALITY),
        ExportFormat::Bmp => encode_bmp(image),
        ExportFormat::Gif => encode_gif(image),
    }?;

    log::debug!(
        "encoded {}x{} {} image as {format} ({} bytes)",
        image.width(),
        image.height(),
        image.mode(),
        bytes.len()
    );
    Ok(bytes)
}

/// Shared validation: non-empty dimensions and a mode the format accepts.
fn check_encodable(
    image: &ImageBuffer,
    format: ExportFormat,
    accepted: &[ColorMode],
) -> Result<(), EncodeError> {
    if image.is_empty() {
        return Err(EncodeError::InvalidDimensions {
            width: image.width(),
            height: image.height(),
        });
    }
    if !accepted.contains(&image.mode()) {
        return Err(EncodeError::UnsupportedMode {
            format,
            mode: image.mode(),
        });
    }
    Ok(())
}
