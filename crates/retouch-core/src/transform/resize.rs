//! Exact-size resizing and aspect-preserving thumbnails.
//!
//! Resampling uses the `image` crate's filters, applied to each channel
//! plane separately so every color mode resizes the same way.

use crate::buffer::{merge_planes, split_planes, ImageBuffer, OperationError};
use serde::{Deserialize, Serialize};

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    Bilinear,
    /// Catmull-Rom bicubic interpolation.
    #[default]
    Bicubic,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Bicubic => image::imageops::FilterType::CatmullRom,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Resize an image to exact dimensions. Aspect ratio is not preserved.
///
/// # Errors
///
/// Returns `OperationError::InvalidParameter` if either target dimension is zero.
pub fn resize(
    image: &ImageBuffer,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<ImageBuffer, OperationError> {
    if width == 0 || height == 0 {
        return Err(OperationError::InvalidParameter(format!(
            "resize target must be at least 1x1, got {width}x{height}"
        )));
    }

    // Fast path: if dimensions match, just clone
    if image.dimensions() == (width, height) {
        return Ok(image.clone());
    }

    let planes: Vec<_> = split_planes(image)
        .iter()
        .map(|plane| image::imageops::resize(plane, width, height, filter.to_image_filter()))
        .collect();

    Ok(merge_planes(&planes, image.mode()))
}

/// Shrink an image to fit inside a `max_size` x `max_size` box.
///
/// Never upscales: images that already fit are returned unchanged.
///
/// # Errors
///
/// Returns `OperationError::InvalidParameter` if `max_size` is zero.
pub fn thumbnail(image: &ImageBuffer, max_size: u32) -> Result<ImageBuffer, OperationError> {
    if max_size == 0 {
        return Err(OperationError::InvalidParameter(
            "thumbnail size must be at least 1".to_string(),
        ));
    }

    let (width, height) = thumbnail_dimensions(image.width(), image.height(), max_size);
    resize(image, width, height, FilterType::Bicubic)
}

/// Dimensions of a thumbnail bounded by `max_size`.
///
/// `scale = min(1, max_size / width, max_size / height)`; each side is
/// `round(side * scale)`, never less than 1.
pub fn thumbnail_dimensions(width: u32, height: u32, max_size: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width, height);
    }

    let max = max_size as f64;
    let scale = (max / width as f64).min(max / height as f64).min(1.0);
    if scale >= 1.0 {
        return (width, height);
    }

    let new_width = (width as f64 * scale).round() as u32;
    let new_height = (height as f64 * scale).round() as u32;
    (new_width.max(1), new_height.max(1))
}
