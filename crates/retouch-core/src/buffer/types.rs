//! Core raster types: color modes, regions, and the image buffer itself.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error types for a single image operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OperationError {
    /// A crop or rectangle region does not fit inside the image, or is empty.
    #[error(
        "Invalid region ({left}, {top}, {right}, {bottom}) for a {width}x{height} image"
    )]
    InvalidRegion {
        left: u32,
        top: u32,
        right: u32,
        bottom: u32,
        width: u32,
        height: u32,
    },

    /// The font needed for text drawing could not be loaded.
    #[error("Font unavailable: {0}")]
    FontUnavailable(String),

    /// The requested color mode is not one this engine can represent.
    #[error("Unsupported color mode conversion: {0}")]
    UnsupportedModeConversion(String),

    /// A numeric parameter is out of range (zero size, negative factor, ...).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Channel layout of an [`ImageBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColorMode {
    /// Single luma channel ("L").
    Grayscale,
    /// Red, green, blue.
    #[default]
    Rgb,
    /// Red, green, blue, straight (non-premultiplied) alpha.
    Rgba,
    /// Cyan, magenta, yellow, key.
    Cmyk,
}

impl ColorMode {
    /// Number of samples per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            ColorMode::Grayscale => 1,
            ColorMode::Rgb => 3,
            ColorMode::Rgba | ColorMode::Cmyk => 4,
        }
    }

    /// Returns true if the last channel is an alpha channel.
    #[inline]
    pub fn has_alpha(self) -> bool {
        self == ColorMode::Rgba
    }

    /// Short mode name as shown to users ("L", "RGB", "RGBA", "CMYK").
    pub fn name(self) -> &'static str {
        match self {
            ColorMode::Grayscale => "L",
            ColorMode::Rgb => "RGB",
            ColorMode::Rgba => "RGBA",
            ColorMode::Cmyk => "CMYK",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorMode {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" | "GRAY" | "GRAYSCALE" => Ok(ColorMode::Grayscale),
            "RGB" => Ok(ColorMode::Rgb),
            "RGBA" => Ok(ColorMode::Rgba),
            "CMYK" => Ok(ColorMode::Cmyk),
            other => Err(OperationError::UnsupportedModeConversion(format!(
                "unknown color mode `{other}`"
            ))),
        }
    }
}

impl TryFrom<String> for ColorMode {
    type Error = OperationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ColorMode> for String {
    fn from(mode: ColorMode) -> Self {
        mode.name().to_string()
    }
}

/// A rectangular pixel region given by its edges.
///
/// `right` and `bottom` are exclusive for cropping and inclusive for
/// rectangle outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Region {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Region {
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Region covering a whole `width` x `height` image.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Check `left < right <= width` and `top < bottom <= height`.
    pub fn validate_within(&self, width: u32, height: u32) -> Result<(), OperationError> {
        if self.left < self.right
            && self.right <= width
            && self.top < self.bottom
            && self.bottom <= height
        {
            Ok(())
        } else {
            Err(OperationError::InvalidRegion {
                left: self.left,
                top: self.top,
                right: self.right,
                bottom: self.bottom,
                width,
                height,
            })
        }
    }
}

/// An 8-bit raster with an explicit color mode.
///
/// The pixel buffer always holds exactly `width * height * mode.channels()`
/// samples in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    mode: ColorMode,
    pixels: Vec<u8>,
}

impl ImageBuffer {
    /// Create a buffer from raw samples, checking the length invariant.
    pub fn new(
        width: u32,
        height: u32,
        mode: ColorMode,
        pixels: Vec<u8>,
    ) -> Result<Self, OperationError> {
        let expected = expected_len(width, height, mode);
        if pixels.len() != expected {
            return Err(OperationError::InvalidParameter(format!(
                "pixel buffer holds {} bytes, a {width}x{height} {mode} image needs {expected}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            mode,
            pixels,
        })
    }

    /// Create a buffer where every pixel has the same samples.
    ///
    /// Only the first `mode.channels()` entries of `samples` are used.
    pub fn filled(width: u32, height: u32, mode: ColorMode, samples: [u8; 4]) -> Self {
        let channels = mode.channels();
        let pixel = &samples[..channels];
        let mut pixels = Vec::with_capacity(expected_len(width, height, mode));
        for _ in 0..(width as usize * height as usize) {
            pixels.extend_from_slice(pixel);
        }
        Self {
            width,
            height,
            mode,
            pixels,
        }
    }

    /// Internal constructor for operations that have already sized the buffer.
    pub(crate) fn from_parts(width: u32, height: u32, mode: ColorMode, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            expected_len(width, height, mode),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            mode,
            pixels,
        }
    }

    /// Convert from an `image` crate buffer, widening layouts this engine does
    /// not model (gray+alpha, 16-bit, float) to RGB or RGBA.
    pub fn from_dynamic(image: image::DynamicImage) -> Self {
        use image::DynamicImage;

        let (width, height) = (image.width(), image.height());
        match image {
            DynamicImage::ImageLuma8(img) => {
                Self::from_parts(width, height, ColorMode::Grayscale, img.into_raw())
            }
            DynamicImage::ImageRgb8(img) => {
                Self::from_parts(width, height, ColorMode::Rgb, img.into_raw())
            }
            DynamicImage::ImageRgba8(img) => {
                Self::from_parts(width, height, ColorMode::Rgba, img.into_raw())
            }
            other if other.color().has_alpha() => {
                Self::from_parts(width, height, ColorMode::Rgba, other.to_rgba8().into_raw())
            }
            other => Self::from_parts(width, height, ColorMode::Rgb, other.to_rgb8().into_raw()),
        }
    }

    /// Convert to an `image` crate buffer. CMYK has no counterpart there.
    pub fn to_dynamic(&self) -> Option<image::DynamicImage> {
        use image::DynamicImage;

        let pixels = self.pixels.clone();
        match self.mode {
            ColorMode::Grayscale => image::GrayImage::from_raw(self.width, self.height, pixels)
                .map(DynamicImage::ImageLuma8),
            ColorMode::Rgb => image::RgbImage::from_raw(self.width, self.height, pixels)
                .map(DynamicImage::ImageRgb8),
            ColorMode::Rgba => image::RgbaImage::from_raw(self.width, self.height, pixels)
                .map(DynamicImage::ImageRgba8),
            ColorMode::Cmyk => None,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.mode.channels()
    }

    /// Raw samples in row-major order.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Consume the buffer and return its raw samples.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Number of bytes in one row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * self.channels()
    }

    /// Samples of the pixel at `(x, y)`. Panics when out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let idx = self.index(x, y);
        &self.pixels[idx..idx + self.channels()]
    }

    #[inline]
    pub(crate) fn pixel_mut(&mut self, x: u32, y: u32) -> &mut [u8] {
        let idx = self.index(x, y);
        let channels = self.channels();
        &mut self.pixels[idx..idx + channels]
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels()
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

fn expected_len(width: u32, height: u32, mode: ColorMode) -> usize {
    width as usize * height as usize * mode.channels()
}
