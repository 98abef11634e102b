//! Drawing and compositing: text, rectangle outlines and watermarks.
//!
//! Text goes through the [`TextRasterizer`] capability so callers decide
//! which fonts exist. Shapes are rasterized with `embedded-graphics`.

mod canvas;
mod composite;
mod font;
mod rectangle;
mod text;
mod watermark;

pub use composite::alpha_composite;
pub use font::{
    BitmapFont, FontError, FontLibrary, GlyphMask, TextBounds, TextRasterizer, BUILTIN_FONT,
    DEFAULT_FONT_SIZE,
};
pub use rectangle::{draw_rectangle, DEFAULT_STROKE_WIDTH};
pub use text::draw_text;
pub use watermark::{
    add_watermark, watermark_origin, WatermarkPosition, WATERMARK_FONT_SIZE, WATERMARK_INK,
    WATERMARK_MARGIN,
};

#[cfg(test)]
pub(crate) use font::testing;
