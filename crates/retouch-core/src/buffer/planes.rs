//! Split interleaved buffers into single-channel `image` crate planes.
//!
//! The `image` crate has no CMYK pixel type, and its RGBA resampling treats
//! the fourth channel as alpha. Resampling each channel as an independent
//! luma plane works the same for every mode.

use super::types::{ColorMode, ImageBuffer};
use image::{GrayImage, Luma};

pub(crate) fn split_planes(image: &ImageBuffer) -> Vec<GrayImage> {
    (0..image.channels())
        .map(|c| {
            GrayImage::from_fn(image.width(), image.height(), |x, y| {
                Luma([image.pixel(x, y)[c]])
            })
        })
        .collect()
}

/// Interleave planes of identical size back into a buffer of `mode`.
pub(crate) fn merge_planes(planes: &[GrayImage], mode: ColorMode) -> ImageBuffer {
    debug_assert_eq!(planes.len(), mode.channels());
    let (width, height) = planes[0].dimensions();
    let raw: Vec<&[u8]> = planes.iter().map(|p| p.as_raw().as_slice()).collect();

    let mut pixels = Vec::with_capacity(width as usize * height as usize * raw.len());
    for i in 0..(width as usize * height as usize) {
        for plane in &raw {
            pixels.push(plane[i]);
        }
    }

    ImageBuffer::from_parts(width, height, mode, pixels)
}
