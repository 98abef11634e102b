//! Brightness, contrast and sharpness enhancement.
//!
//! Each enhancement interpolates between a degenerate reference image and the
//! original:
//!
//! ```text
//! output = reference + factor * (original - reference)
//! ```
//!
//! | Enhancement | Reference                                   |
//! |-------------|---------------------------------------------|
//! | Brightness  | black                                       |
//! | Contrast    | flat gray at the image's mean luminance     |
//! | Sharpness   | the image smoothed with a 3x3 kernel        |
//!
//! A factor of 1.0 returns the original, 0.0 returns the reference, and
//! larger factors extrapolate. Results are clamped to `0..=255` and then
//! truncated. The alpha channel of RGBA images is never touched.

use crate::buffer::{convert_mode, ColorMode, ImageBuffer, OperationError};
use crate::filter::{convolve, SMOOTH};

/// Scale overall brightness. 0.0 gives a black image.
pub fn adjust_brightness(image: ImageBuffer, factor: f32) -> Result<ImageBuffer, OperationError> {
    check_factor("brightness", factor)?;
    let reference = flat_gray(&image, 0);
    Ok(blend(&reference, image, factor))
}

/// Scale contrast around the mean luminance. 0.0 gives a flat gray image.
pub fn adjust_contrast(image: ImageBuffer, factor: f32) -> Result<ImageBuffer, OperationError> {
    check_factor("contrast", factor)?;
    let reference = flat_gray(&image, mean_luminance(&image));
    Ok(blend(&reference, image, factor))
}

/// Scale edge detail. 0.0 gives a smoothed image, 2.0 a sharpened one.
pub fn adjust_sharpness(image: ImageBuffer, factor: f32) -> Result<ImageBuffer, OperationError> {
    check_factor("sharpness", factor)?;
    let reference = convolve(&image, &SMOOTH);
    Ok(blend(&reference, image, factor))
}

fn check_factor(name: &str, factor: f32) -> Result<(), OperationError> {
    if factor.is_finite() && factor >= 0.0 {
        Ok(())
    } else {
        Err(OperationError::InvalidParameter(format!(
            "{name} factor must be a finite value >= 0, got {factor}"
        )))
    }
}

/// Mean luminance over all pixels, rounded half up.
fn mean_luminance(image: &ImageBuffer) -> u8 {
    let count = image.pixel_count();
    if count == 0 {
        return 0;
    }

    let gray = convert_mode(image.clone(), ColorMode::Grayscale);
    let sum: u64 = gray.pixels().iter().map(|&v| v as u64).sum();
    let mean = sum as f64 / count as f64;
    (mean + 0.5).floor().min(255.0) as u8
}

/// A uniform gray image converted into `image`'s mode.
///
/// Conversion goes through the regular mode conversion, so gray 0 in CMYK is
/// full key rather than zero ink.
fn flat_gray(image: &ImageBuffer, level: u8) -> ImageBuffer {
    let gray = ImageBuffer::filled(
        image.width(),
        image.height(),
        ColorMode::Grayscale,
        [level, 0, 0, 0],
    );
    convert_mode(gray, image.mode())
}

/// Interpolate from `reference` toward `image` by `factor`, in place on
/// `image`. Alpha samples are left as they are.
fn blend(reference: &ImageBuffer, mut image: ImageBuffer, factor: f32) -> ImageBuffer {
    debug_assert_eq!(reference.dimensions(), image.dimensions());
    debug_assert_eq!(reference.mode(), image.mode());

    let channels = image.channels();
    let color_channels = if image.mode().has_alpha() {
        channels - 1
    } else {
        channels
    };

    for (dst, refp) in image
        .pixels_mut()
        .chunks_exact_mut(channels)
        .zip(reference.pixels().chunks_exact(channels))
    {
        for c in 0..color_channels {
            let base = refp[c] as f32;
            let v = base + factor * (dst[c] as f32 - base);
            dst[c] = v.clamp(0.0, 255.0) as u8;
        }
    }

    image
}
