//! Rectangle outlines.

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyleBuilder, Rectangle, StrokeAlignment},
};

use super::canvas::Canvas;
use crate::buffer::{Color, ImageBuffer, OperationError, Region};

/// Default outline width in pixels.
pub const DEFAULT_STROKE_WIDTH: u32 = 5;

/// Draw an unfilled rectangle outline.
///
/// `region` corners are inclusive and the stroke grows inward from them, so
/// the default full-image region `(0, 0, width, height)` frames the image
/// with its right and bottom edges clipped away.
///
/// # Errors
///
/// - `InvalidRegion` if the region is empty or reaches past the image
/// - `InvalidParameter` for a zero stroke width
pub fn draw_rectangle(
    mut image: ImageBuffer,
    region: Region,
    color: Color,
    stroke_width: u32,
) -> Result<ImageBuffer, OperationError> {
    region.validate_within(image.width(), image.height())?;
    if stroke_width == 0 {
        return Err(OperationError::InvalidParameter(
            "rectangle stroke width must be at least 1".to_string(),
        ));
    }

    let rect = Rectangle::with_corners(
        Point::new(region.left as i32, region.top as i32),
        Point::new(region.right as i32, region.bottom as i32),
    );
    let style = PrimitiveStyleBuilder::new()
        .stroke_color(BinaryColor::On)
        .stroke_width(stroke_width)
        .stroke_alignment(StrokeAlignment::Inside)
        .build();

    let samples = color.to_samples(image.mode());
    match rect
        .into_styled(style)
        .draw(&mut Canvas::new(&mut image, samples))
    {
        Ok(_) => {}
        Err(infallible) => match infallible {},
    }

    Ok(image)
}
