//! Expand the canvas with a solid frame.

use crate::buffer::{Color, ImageBuffer, OperationError};

/// Add a `size`-pixel border of `color` on all four sides.
///
/// The result is `(width + 2 * size) x (height + 2 * size)` with the
/// original content centered and untouched.
///
/// # Errors
///
/// `OperationError::InvalidParameter` when `size` is zero or the expanded
/// canvas would overflow `u32`.
pub fn add_border(
    image: &ImageBuffer,
    size: u32,
    color: Color,
) -> Result<ImageBuffer, OperationError> {
    if size == 0 {
        return Err(OperationError::InvalidParameter(
            "border size must be at least 1".to_string(),
        ));
    }

    let grow = |side: u32| {
        size.checked_mul(2)
            .and_then(|s| side.checked_add(s))
            .ok_or_else(|| {
                OperationError::InvalidParameter(format!("border size {size} is too large"))
            })
    };
    let out_width = grow(image.width())?;
    let out_height = grow(image.height())?;

    let mut output = ImageBuffer::filled(
        out_width,
        out_height,
        image.mode(),
        color.to_samples(image.mode()),
    );

    let row_bytes = image.stride();
    let out_stride = output.stride();
    let offset = size as usize * image.channels();
    let dst = output.pixels_mut();
    for (y, row) in image.pixels().chunks_exact(row_bytes.max(1)).enumerate() {
        let start = (y + size as usize) * out_stride + offset;
        dst[start..start + row_bytes].copy_from_slice(row);
    }

    Ok(output)
}
