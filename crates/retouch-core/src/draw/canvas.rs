//! `embedded-graphics` draw targets over image buffers and glyph masks.

use std::convert::Infallible;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*, primitives::Rectangle};
use image::{GrayImage, Luma};

use crate::buffer::ImageBuffer;

/// `embedded-graphics` target that paints fixed samples onto an [`ImageBuffer`].
///
/// `On` pixels are painted, `Off` pixels are skipped, and anything outside
/// the image is clipped.
pub(crate) struct Canvas<'a> {
    image: &'a mut ImageBuffer,
    samples: [u8; 4],
}

impl<'a> Canvas<'a> {
    /// `samples` must already be in the image's color mode.
    pub(crate) fn new(image: &'a mut ImageBuffer, samples: [u8; 4]) -> Self {
        Self { image, samples }
    }
}

impl Dimensions for Canvas<'_> {
    fn bounding_box(&self) -> Rectangle {
        let (width, height) = self.image.dimensions();

        Rectangle {
            top_left: Point { x: 0, y: 0 },
            size: Size { width, height },
        }
    }
}

impl DrawTarget for Canvas<'_> {
    type Color = BinaryColor;

    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let channels = self.image.channels();
        for Pixel(point, color) in pixels {
            if color.is_on()
                && point.x >= 0
                && (point.x as u32) < self.image.width()
                && point.y >= 0
                && (point.y as u32) < self.image.height()
            {
                self.image
                    .pixel_mut(point.x as u32, point.y as u32)
                    .copy_from_slice(&self.samples[..channels]);
            }
        }

        Ok(())
    }
}

/// Target that records `On` pixels as full coverage in a glyph mask.
///
/// `origin` is the drawing-space point that maps to mask pixel (0, 0).
pub(crate) struct MaskCanvas<'a> {
    mask: &'a mut GrayImage,
    origin: Point,
}

impl<'a> MaskCanvas<'a> {
    pub(crate) fn new(mask: &'a mut GrayImage, origin: Point) -> Self {
        Self { mask, origin }
    }
}

impl Dimensions for MaskCanvas<'_> {
    fn bounding_box(&self) -> Rectangle {
        let (width, height) = self.mask.dimensions();

        Rectangle {
            top_left: self.origin,
            size: Size { width, height },
        }
    }
}

impl DrawTarget for MaskCanvas<'_> {
    type Color = BinaryColor;

    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let local = point - self.origin;
            if color.is_on()
                && local.x >= 0
                && (local.x as u32) < self.mask.width()
                && local.y >= 0
                && (local.y as u32) < self.mask.height()
            {
                self.mask.put_pixel(local.x as u32, local.y as u32, Luma([255]));
            }
        }

        Ok(())
    }
}
