//! Fixed filters: grayscale, sepia and blur.
//!
//! Also hosts the small integer convolution used by the blur filter and by
//! the sharpness enhancement's smoothed reference.

use crate::buffer::{convert_mode, ColorMode, ImageBuffer, OperationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Filter applied by the filter slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FilterKind {
    /// Luminance only; output is single-channel.
    #[default]
    Grayscale,
    /// Warm brown tone; output is RGB.
    Sepia,
    /// 5x5 ring blur; mode unchanged.
    Blur,
}

impl FilterKind {
    pub fn name(self) -> &'static str {
        match self {
            FilterKind::Grayscale => "grayscale",
            FilterKind::Sepia => "sepia",
            FilterKind::Blur => "blur",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grayscale" | "greyscale" | "gray" | "grey" => Ok(FilterKind::Grayscale),
            "sepia" => Ok(FilterKind::Sepia),
            "blur" => Ok(FilterKind::Blur),
            _ => Err(OperationError::InvalidParameter(format!(
                "unknown filter `{s}`"
            ))),
        }
    }
}

impl TryFrom<String> for FilterKind {
    type Error = OperationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<FilterKind> for String {
    fn from(kind: FilterKind) -> Self {
        kind.name().to_string()
    }
}

/// Apply one of the fixed filters.
pub fn apply_filter(image: ImageBuffer, kind: FilterKind) -> ImageBuffer {
    match kind {
        FilterKind::Grayscale => convert_mode(image, ColorMode::Grayscale),
        FilterKind::Sepia => apply_sepia(image),
        FilterKind::Blur => convolve(&image, &BLUR),
    }
}

/// Sepia tone matrix. Rows produce r, g, b from the source (r, g, b).
const SEPIA: [[f64; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Convert to RGB and apply the sepia matrix.
///
/// Each weighted sum is truncated, then clamped to 255. The inputs are
/// non-negative so only the upper bound can be hit.
pub fn apply_sepia(image: ImageBuffer) -> ImageBuffer {
    let mut image = convert_mode(image, ColorMode::Rgb);

    for px in image.pixels_mut().chunks_exact_mut(3) {
        let (r, g, b) = (px[0] as f64, px[1] as f64, px[2] as f64);
        for (out, row) in px.iter_mut().zip(SEPIA.iter()) {
            let v = (row[0] * r + row[1] * g + row[2] * b) as u32;
            *out = v.min(255) as u8;
        }
    }

    image
}

/// A square convolution kernel with integer weights.
#[derive(Debug)]
pub(crate) struct Kernel {
    size: usize,
    weights: &'static [i32],
    scale: i32,
}

#[rustfmt::skip]
const BLUR_WEIGHTS: [i32; 25] = [
    1, 1, 1, 1, 1,
    1, 0, 0, 0, 1,
    1, 0, 0, 0, 1,
    1, 0, 0, 0, 1,
    1, 1, 1, 1, 1,
];

#[rustfmt::skip]
const SMOOTH_WEIGHTS: [i32; 9] = [
    1, 1, 1,
    1, 5, 1,
    1, 1, 1,
];

/// 5x5 blur: ones on the outer ring, zeros inside.
pub(crate) const BLUR: Kernel = Kernel {
    size: 5,
    weights: &BLUR_WEIGHTS,
    scale: 16,
};

/// 3x3 smoothing kernel used as the zero point for sharpness.
pub(crate) const SMOOTH: Kernel = Kernel {
    size: 3,
    weights: &SMOOTH_WEIGHTS,
    scale: 13,
};

/// Convolve every channel of `image` with `kernel`.
///
/// Pixels closer to the edge than the kernel radius are copied from the
/// source, as is any image smaller than the kernel.
pub(crate) fn convolve(image: &ImageBuffer, kernel: &Kernel) -> ImageBuffer {
    let (width, height) = (image.width() as usize, image.height() as usize);
    let size = kernel.size;
    let mut output = image.clone();
    if width < size || height < size {
        return output;
    }

    let radius = size / 2;
    let channels = image.channels();
    let stride = image.stride();
    let src = image.pixels();
    let dst = output.pixels_mut();

    for y in radius..height - radius {
        for x in radius..width - radius {
            for c in 0..channels {
                let mut sum = 0i32;
                for ky in 0..size {
                    let row = (y + ky - radius) * stride;
                    for kx in 0..size {
                        let weight = kernel.weights[ky * size + kx];
                        if weight != 0 {
                            let sample = src[row + (x + kx - radius) * channels + c];
                            sum += weight * sample as i32;
                        }
                    }
                }
                // Round to nearest
                let value = (sum + kernel.scale / 2) / kernel.scale;
                dst[y * stride + x * channels + c] = value.clamp(0, 255) as u8;
            }
        }
    }

    log::trace!(
        "convolved {width}x{height} image with {size}x{size} kernel (scale {})",
        kernel.scale
    );
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 3]) -> ImageBuffer {
        let mut pixels = Vec::new();
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&f(x, y));
            }
        }
        ImageBuffer::new(width, height, ColorMode::Rgb, pixels).unwrap()
    }

    #[test]
    fn test_kernel_weights_sum_to_scale() {
        for kernel in [&BLUR, &SMOOTH] {
            assert_eq!(kernel.weights.len(), kernel.size * kernel.size);
            assert_eq!(kernel.weights.iter().sum::<i32>(), kernel.scale);
        }
    }

    #[test]
    fn test_grayscale_is_single_channel() {
        let img = ImageBuffer::filled(3, 3, ColorMode::Rgba, [255, 0, 0, 10]);
        let out = apply_filter(img, FilterKind::Grayscale);
        assert_eq!(out.mode(), ColorMode::Grayscale);
        assert_eq!(out.pixels(), &[76; 9]);
    }

    #[test]
    fn test_sepia_known_value() {
        let img = ImageBuffer::filled(1, 1, ColorMode::Rgb, [100, 100, 100, 0]);
        let out = apply_sepia(img);
        // 135.1, 120.3, 93.7 truncated
        assert_eq!(out.pixels(), &[135, 120, 93]);
    }

    #[test]
    fn test_sepia_clamps_white() {
        let img = ImageBuffer::filled(1, 1, ColorMode::Rgb, [255, 255, 255, 0]);
        assert_eq!(apply_sepia(img).pixels(), &[255, 255, 238]);
    }

    #[test]
    fn test_sepia_converts_to_rgb() {
        for mode in [ColorMode::Grayscale, ColorMode::Rgba, ColorMode::Cmyk] {
            let img = ImageBuffer::filled(2, 2, mode, [50, 60, 70, 80]);
            assert_eq!(apply_sepia(img).mode(), ColorMode::Rgb);
        }
    }

    #[test]
    fn test_sepia_is_not_idempotent() {
        let img = rgb(4, 4, |x, y| [(x * 60) as u8, (y * 60) as u8, 90]);
        let once = apply_sepia(img);
        let twice = apply_sepia(once.clone());
        assert_ne!(once, twice);
    }

    #[test]
    fn test_blur_uniform_image_unchanged() {
        let img = ImageBuffer::filled(8, 8, ColorMode::Rgba, [40, 80, 120, 200]);
        assert_eq!(apply_filter(img.clone(), FilterKind::Blur), img);
    }

    #[test]
    fn test_blur_softens_edge() {
        // Left half black, right half white
        let img = rgb(10, 10, |x, _| if x < 5 { [0; 3] } else { [255; 3] });
        let out = apply_filter(img.clone(), FilterKind::Blur);

        assert_eq!(out.mode(), ColorMode::Rgb);
        assert_eq!(out.dimensions(), img.dimensions());
        let near_edge = out.pixel(4, 5)[0];
        assert!(near_edge > 0 && near_edge < 255, "got {near_edge}");
        // Border rows are copied from the source
        assert_eq!(out.pixel(4, 0), img.pixel(4, 0));
    }

    #[test]
    fn test_blur_small_image_is_copied() {
        let img = rgb(4, 4, |x, y| [(x * 50) as u8, (y * 50) as u8, 0]);
        assert_eq!(convolve(&img, &BLUR), img);
    }

    #[test]
    fn test_filter_kind_parsing() {
        assert_eq!("Grayscale".parse::<FilterKind>().unwrap(), FilterKind::Grayscale);
        assert_eq!("SEPIA".parse::<FilterKind>().unwrap(), FilterKind::Sepia);
        assert_eq!(" blur ".parse::<FilterKind>().unwrap(), FilterKind::Blur);
        assert!("None".parse::<FilterKind>().is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: sepia output stays in range for any input pixel.
        #[test]
        fn prop_sepia_channels_bounded(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
            let img = ImageBuffer::filled(1, 1, ColorMode::Rgb, [r, g, b, 0]);
            let out = apply_sepia(img);

            let (fr, fg, fb) = (r as f64, g as f64, b as f64);
            let expected_r = ((0.393 * fr + 0.769 * fg + 0.189 * fb) as u32).min(255) as u8;
            prop_assert_eq!(out.pixels()[0], expected_r);
            prop_assert_eq!(out.byte_size(), 3);
        }

        /// Property: blur keeps dimensions and mode.
        #[test]
        fn prop_blur_keeps_shape(w in 1u32..=12, h in 1u32..=12, seed in 0u8..=255) {
            let pixels = (0..w * h).map(|i| (i as u8).wrapping_mul(seed)).collect();
            let img = ImageBuffer::new(w, h, ColorMode::Grayscale, pixels).unwrap();
            let out = apply_filter(img, FilterKind::Blur);
            prop_assert_eq!(out.dimensions(), (w, h));
            prop_assert_eq!(out.mode(), ColorMode::Grayscale);
        }
    }
}
