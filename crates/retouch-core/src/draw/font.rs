//! Text rasterization capability and the font registry.
//!
//! Drawing code never loads fonts itself. It asks a [`FontLibrary`] for a
//! [`TextRasterizer`] by name and uses it to measure and rasterize text into
//! a coverage mask. A library built with [`FontLibrary::with_builtin`] carries
//! a scalable bitmap font, so text drawing works with no font files.

use std::collections::BTreeMap;
use std::fmt;

use embedded_graphics::{
    mono_font::{ascii::FONT_10X20, MonoFont, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use image::imageops::{self, FilterType};
use image::GrayImage;
use thiserror::Error;

use super::canvas::MaskCanvas;
use crate::buffer::OperationError;

/// Font size used when none is given.
pub const DEFAULT_FONT_SIZE: u32 = 36;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FontError {
    #[error("font `{0}` is not registered")]
    NotFound(String),

    #[error("font size must be at least 1")]
    InvalidSize,

    #[error("could not rasterize text: {0}")]
    Rasterization(String),
}

impl From<FontError> for OperationError {
    fn from(err: FontError) -> Self {
        match err {
            FontError::InvalidSize => OperationError::InvalidParameter(err.to_string()),
            _ => OperationError::FontUnavailable(err.to_string()),
        }
    }
}

/// Bounding box of rendered text relative to the drawing position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextBounds {
    /// Offset of the box's left edge from the drawing position.
    pub offset_x: i32,
    /// Offset of the box's top edge from the drawing position.
    pub offset_y: i32,
    pub width: u32,
    pub height: u32,
}

/// Rasterized text: a coverage mask plus its placement.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphMask {
    pub bounds: TextBounds,
    /// 0 = untouched, 255 = fully covered. Same size as `bounds`.
    pub coverage: GrayImage,
}

/// Something that can turn a string into pixels.
pub trait TextRasterizer {
    /// Measure `text` at `size` without rasterizing it.
    fn measure(&self, text: &str, size: u32) -> Result<TextBounds, FontError>;

    /// Rasterize `text` at `size` into a coverage mask.
    fn rasterize(&self, text: &str, size: u32) -> Result<GlyphMask, FontError>;
}

/// Monospace bitmap font scaled to any pixel size.
///
/// Glyphs come from the 10x20 ASCII font; `size` is the target line height
/// in pixels and glyphs are scaled with nearest-neighbor sampling.
#[derive(Debug, Clone, Copy)]
pub struct BitmapFont {
    font: &'static MonoFont<'static>,
}

impl BitmapFont {
    pub fn new() -> Self {
        Self { font: &FONT_10X20 }
    }

    fn text<'t>(&self, text: &'t str) -> Text<'t, MonoTextStyle<'static, BinaryColor>> {
        let style = MonoTextStyle::new(self.font, BinaryColor::On);
        Text::with_baseline(text, Point::zero(), style, Baseline::Top)
    }

    /// Scale a native length to `size`, rounding to the nearest pixel.
    fn scale(&self, length: u32, size: u32) -> u32 {
        let native = self.font.character_size.height as u64;
        ((length as u64 * size as u64 + native / 2) / native) as u32
    }

    fn scaled_bounds(&self, text: &str, size: u32) -> Result<(TextBounds, Point, Size), FontError> {
        if size == 0 {
            return Err(FontError::InvalidSize);
        }

        let native = self.text(text).bounding_box();
        let bounds = TextBounds {
            offset_x: self.scale_signed(native.top_left.x, size),
            offset_y: self.scale_signed(native.top_left.y, size),
            width: self.scale(native.size.width, size),
            height: self.scale(native.size.height, size),
        };
        Ok((bounds, native.top_left, native.size))
    }

    fn scale_signed(&self, offset: i32, size: u32) -> i32 {
        let scaled = self.scale(offset.unsigned_abs(), size) as i32;
        if offset < 0 {
            -scaled
        } else {
            scaled
        }
    }
}

impl Default for BitmapFont {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRasterizer for BitmapFont {
    fn measure(&self, text: &str, size: u32) -> Result<TextBounds, FontError> {
        self.scaled_bounds(text, size).map(|(bounds, _, _)| bounds)
    }

    fn rasterize(&self, text: &str, size: u32) -> Result<GlyphMask, FontError> {
        let (bounds, origin, native_size) = self.scaled_bounds(text, size)?;

        let mut native = GrayImage::new(native_size.width, native_size.height);
        match self.text(text).draw(&mut MaskCanvas::new(&mut native, origin)) {
            Ok(_) => {}
            Err(infallible) => match infallible {},
        }

        let coverage = if bounds.width == 0 || bounds.height == 0 {
            GrayImage::new(bounds.width, bounds.height)
        } else {
            imageops::resize(&native, bounds.width, bounds.height, FilterType::Nearest)
        };

        Ok(GlyphMask { bounds, coverage })
    }
}

/// Name of the font registered by [`FontLibrary::with_builtin`].
pub const BUILTIN_FONT: &str = "mono";

/// Named text rasterizers with one default.
pub struct FontLibrary {
    fonts: BTreeMap<String, Box<dyn TextRasterizer>>,
    default: String,
}

impl FontLibrary {
    /// A library with no fonts. Every lookup fails until one is registered.
    pub fn empty() -> Self {
        Self {
            fonts: BTreeMap::new(),
            default: BUILTIN_FONT.to_string(),
        }
    }

    /// A library holding the built-in [`BitmapFont`] as its default.
    pub fn with_builtin() -> Self {
        let mut library = Self::empty();
        library.register(BUILTIN_FONT, BitmapFont::new());
        library
    }

    /// Add or replace the font called `name`.
    pub fn register(&mut self, name: impl Into<String>, font: impl TextRasterizer + 'static) {
        self.fonts.insert(name.into(), Box::new(font));
    }

    /// Make `name` the font used when a slot does not ask for one.
    pub fn set_default(&mut self, name: impl Into<String>) {
        self.default = name.into();
    }

    pub fn default_name(&self) -> &str {
        &self.default
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fonts.keys().map(String::as_str)
    }

    /// Look up a font by name, or the default when `name` is `None`.
    pub fn resolve(&self, name: Option<&str>) -> Result<&dyn TextRasterizer, FontError> {
        let name = name.unwrap_or(&self.default);
        self.fonts
            .get(name)
            .map(|font| font.as_ref())
            .ok_or_else(|| FontError::NotFound(name.to_string()))
    }
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl fmt::Debug for FontLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontLibrary")
            .field("fonts", &self.fonts.keys().collect::<Vec<_>>())
            .field("default", &self.default)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Rasterizer that renders every string as a solid block of fixed size.
    #[derive(Debug, Clone, Copy)]
    pub(crate) struct BlockFont {
        pub width: u32,
        pub height: u32,
    }

    impl TextRasterizer for BlockFont {
        fn measure(&self, _text: &str, _size: u32) -> Result<TextBounds, FontError> {
            Ok(TextBounds {
                offset_x: 0,
                offset_y: 0,
                width: self.width,
                height: self.height,
            })
        }

        fn rasterize(&self, text: &str, size: u32) -> Result<GlyphMask, FontError> {
            let bounds = self.measure(text, size)?;
            let coverage = GrayImage::from_pixel(bounds.width, bounds.height, image::Luma([255]));
            Ok(GlyphMask { bounds, coverage })
        }
    }

    /// Rasterizer whose resource is always missing.
    #[derive(Debug, Clone, Copy)]
    pub(crate) struct MissingFont;

    impl TextRasterizer for MissingFont {
        fn measure(&self, _text: &str, _size: u32) -> Result<TextBounds, FontError> {
            Err(FontError::Rasterization("font file is corrupt".to_string()))
        }

        fn rasterize(&self, _text: &str, _size: u32) -> Result<GlyphMask, FontError> {
            Err(FontError::Rasterization("font file is corrupt".to_string()))
        }
    }

    /// Library whose default font is a [`BlockFont`].
    pub(crate) fn block_library(width: u32, height: u32) -> FontLibrary {
        let mut library = FontLibrary::empty();
        library.register("block", BlockFont { width, height });
        library.set_default("block");
        library
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitmap_font_native_size() {
        let font = BitmapFont::new();
        let bounds = font.measure("Hi", 20).unwrap();
        assert_eq!(bounds.width, 20);
        assert_eq!(bounds.height, 20);
        assert_eq!((bounds.offset_x, bounds.offset_y), (0, 0));
    }

    #[test]
    fn test_bitmap_font_scales() {
        let font = BitmapFont::new();
        let bounds = font.measure("abc", 40).unwrap();
        assert_eq!((bounds.width, bounds.height), (60, 40));

        let bounds = font.measure("abc", 36).unwrap();
        assert_eq!((bounds.width, bounds.height), (54, 36));
    }

    #[test]
    fn test_rasterize_matches_measure() {
        let font = BitmapFont::new();
        let mask = font.rasterize("Sample Text", 36).unwrap();
        assert_eq!(mask.bounds, font.measure("Sample Text", 36).unwrap());
        assert_eq!(
            mask.coverage.dimensions(),
            (mask.bounds.width, mask.bounds.height)
        );

        // Some pixels are lit, but not all of them
        let lit = mask.coverage.pixels().filter(|p| p[0] == 255).count();
        assert!(lit > 0);
        assert!(lit < mask.coverage.pixels().len());
    }

    #[test]
    fn test_empty_text_has_no_area() {
        let font = BitmapFont::new();
        let mask = font.rasterize("", 36).unwrap();
        assert_eq!(mask.bounds.width, 0);
        assert!(mask.coverage.is_empty());
    }

    #[test]
    fn test_zero_size_is_invalid_parameter() {
        let err = BitmapFont::new().measure("x", 0).unwrap_err();
        assert_eq!(err, FontError::InvalidSize);
        assert!(matches!(
            OperationError::from(err),
            OperationError::InvalidParameter(_)
        ));
    }

    #[test]
    fn test_library_resolution() {
        let library = FontLibrary::default();
        assert_eq!(library.default_name(), BUILTIN_FONT);
        assert!(library.resolve(None).is_ok());
        assert!(library.resolve(Some("mono")).is_ok());

        let err = library.resolve(Some("arial.ttf")).err().unwrap();
        assert_eq!(err, FontError::NotFound("arial.ttf".to_string()));
        assert!(matches!(
            OperationError::from(err),
            OperationError::FontUnavailable(_)
        ));
    }

    #[test]
    fn test_empty_library_has_no_default() {
        let library = FontLibrary::empty();
        assert!(library.resolve(None).is_err());
        assert_eq!(library.names().count(), 0);
    }

    #[test]
    fn test_custom_default() {
        let library = testing::block_library(40, 20);
        let bounds = library.resolve(None).unwrap().measure("x", 36).unwrap();
        assert_eq!((bounds.width, bounds.height), (40, 20));
    }
}
