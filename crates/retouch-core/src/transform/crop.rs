//! Image cropping by integer pixel region.
//!
//! # Coordinate System
//!
//! - (0, 0) = top-left corner
//! - `right` and `bottom` are exclusive edges
//! - the region must satisfy `left < right <= width` and `top < bottom <= height`
//!
//! Out-of-bounds regions are rejected rather than clamped.

use crate::buffer::{ImageBuffer, OperationError, Region};

/// Crop an image to `region`.
///
/// # Returns
///
/// A new `ImageBuffer` of exactly `(right - left, bottom - top)` pixels in
/// the same color mode as the source.
///
/// # Errors
///
/// `OperationError::InvalidRegion` when the region is empty or extends past
/// the image.
pub fn apply_crop(image: &ImageBuffer, region: Region) -> Result<ImageBuffer, OperationError> {
    region.validate_within(image.width(), image.height())?;

    // Fast path: full crop returns a clone
    if region == Region::full(image.width(), image.height()) {
        return Ok(image.clone());
    }

    let out_width = region.width();
    let out_height = region.height();
    let channels = image.channels();
    let row_bytes = out_width as usize * channels;
    let mut output = Vec::with_capacity(row_bytes * out_height as usize);

    // Copy pixel data row by row
    for y in region.top..region.bottom {
        let start = y as usize * image.stride() + region.left as usize * channels;
        output.extend_from_slice(&image.pixels()[start..start + row_bytes]);
    }

    Ok(ImageBuffer::from_parts(
        out_width,
        out_height,
        image.mode(),
        output,
    ))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
