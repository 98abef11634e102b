//! Rotation about the image center onto a canvas grown to fit.
//!
//! Positive angles turn the picture counter-clockwise as seen on screen.
//! Multiples of 90 degrees are remapped index by index without resampling.
//! Other angles walk the output grid and pull each pixel from the source.
//! With y pointing down, a counter-clockwise turn by θ sends an output
//! offset `(dx, dy)` from the output center back to:
//! ```text
//! sx = dx * cos θ - dy * sin θ
//! sy = dx * sin θ + dy * cos θ
//! ```
//! measured from the source center, so the source's right edge ends up on
//! top. Positions outside the source read as zero samples: black for L and
//! RGB, transparent for RGBA.

use crate::buffer::{ImageBuffer, OperationError};
use serde::{Deserialize, Serialize};

/// Interpolation filter for rotation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationFilter {
    /// Nearest source pixel, no blending.
    Nearest,
    /// Bilinear interpolation over the 4 nearest pixels.
    #[default]
    Bilinear,
    /// High-quality Lanczos3 interpolation over a 6x6 neighborhood.
    Lanczos3,
}

/// Largest sample count per pixel across all modes.
const MAX_CHANNELS: usize = 4;

/// Compute the dimensions of the bounding box for a rotated image.
///
/// # Returns
///
/// Tuple of (new_width, new_height) for the rotated bounding box.
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    if let Some(turns) = quarter_turns(angle_degrees) {
        return if turns % 2 == 0 {
            (width, height)
        } else {
            (height, width)
        };
    }

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    // The bounding box of a rotated rectangle is:
    // new_w = |w*cos| + |h*sin|
    // new_h = |w*sin| + |h*cos|
    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Number of counter-clockwise quarter turns if `angle_degrees` is a
/// multiple of 90 (within 0.001 degrees).
fn quarter_turns(angle_degrees: f64) -> Option<u32> {
    let normalized = angle_degrees.rem_euclid(360.0);
    let turns = (normalized / 90.0).round();
    if (normalized - turns * 90.0).abs() < 0.001 {
        Some(turns as u32 % 4)
    } else {
        None
    }
}

/// Rotate an image counter-clockwise about its center.
///
/// The output canvas is expanded to fit the entire rotated image (no
/// clipping), so rotating by 0 or 360 degrees keeps the input dimensions.
///
/// # Errors
///
/// Returns `OperationError::InvalidParameter` for a non-finite angle.
pub fn apply_rotation(
    image: &ImageBuffer,
    angle_degrees: f64,
    filter: InterpolationFilter,
) -> Result<ImageBuffer, OperationError> {
    if !angle_degrees.is_finite() {
        return Err(OperationError::InvalidParameter(format!(
            "rotation angle must be finite, got {angle_degrees}"
        )));
    }

    if let Some(turns) = quarter_turns(angle_degrees) {
        return Ok(rotate_quarter_turns(image, turns));
    }

    let (src_w, src_h) = (image.width() as f64, image.height() as f64);
    let (dst_w, dst_h) = compute_rotated_bounds(image.width(), image.height(), angle_degrees);

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    let src_cx = src_w / 2.0;
    let src_cy = src_h / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let channels = image.channels();
    let mut output = vec![0u8; dst_w as usize * dst_h as usize * channels];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            // Work on pixel centers
            let dx = dst_x as f64 + 0.5 - dst_cx;
            let dy = dst_y as f64 + 0.5 - dst_cy;

            let src_x = dx * cos - dy * sin + src_cx - 0.5;
            let src_y = dx * sin + dy * cos + src_cy - 0.5;

            let pixel = match filter {
                InterpolationFilter::Nearest => sample_nearest(image, src_x, src_y),
                InterpolationFilter::Bilinear => sample_bilinear(image, src_x, src_y),
                InterpolationFilter::Lanczos3 => sample_lanczos3(image, src_x, src_y),
            };

            let dst_idx = (dst_y as usize * dst_w as usize + dst_x as usize) * channels;
            output[dst_idx..dst_idx + channels].copy_from_slice(&pixel[..channels]);
        }
    }

    Ok(ImageBuffer::from_parts(dst_w, dst_h, image.mode(), output))
}

/// Lossless counter-clockwise rotation by `turns` * 90 degrees.
fn rotate_quarter_turns(image: &ImageBuffer, turns: u32) -> ImageBuffer {
    let (w, h) = image.dimensions();
    let (dst_w, dst_h) = if turns % 2 == 0 { (w, h) } else { (h, w) };
    let channels = image.channels();
    let mut output = Vec::with_capacity(image.byte_size());

    for y in 0..dst_h {
        for x in 0..dst_w {
            let (sx, sy) = match turns {
                1 => (w - 1 - y, x),
                2 => (w - 1 - x, h - 1 - y),
                3 => (y, h - 1 - x),
                _ => (x, y),
            };
            output.extend_from_slice(image.pixel(sx, sy));
        }
    }

    debug_assert_eq!(output.len(), dst_w as usize * dst_h as usize * channels);
    ImageBuffer::from_parts(dst_w, dst_h, image.mode(), output)
}

/// Get a pixel as f64 samples from an image at the given coordinates.
#[inline]
fn get_pixel_f64(image: &ImageBuffer, px: usize, py: usize) -> [f64; MAX_CHANNELS] {
    let mut out = [0.0; MAX_CHANNELS];
    for (o, v) in out.iter_mut().zip(image.pixel(px as u32, py as u32)) {
        *o = *v as f64;
    }
    out
}

fn sample_nearest(image: &ImageBuffer, x: f64, y: f64) -> [u8; MAX_CHANNELS] {
    let (px, py) = (x.round(), y.round());
    if px < 0.0 || py < 0.0 || px >= image.width() as f64 || py >= image.height() as f64 {
        return [0; MAX_CHANNELS];
    }

    let mut result = [0u8; MAX_CHANNELS];
    let src = image.pixel(px as u32, py as u32);
    result[..src.len()].copy_from_slice(src);
    result
}

/// Sample a pixel using bilinear interpolation.
///
/// Bilinear interpolation considers the 4 nearest pixels and weights
/// their contribution based on distance.
fn sample_bilinear(image: &ImageBuffer, x: f64, y: f64) -> [u8; MAX_CHANNELS] {
    let (w, h) = (image.width() as f64, image.height() as f64);

    // Out-of-bounds positions take the zero fill
    if x <= -0.5 || x >= w - 0.5 || y <= -0.5 || y >= h - 0.5 {
        return [0; MAX_CHANNELS];
    }

    let x = x.clamp(0.0, w - 1.0);
    let y = y.clamp(0.0, h - 1.0);

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(image.width() as usize - 1);
    let y1 = (y0 + 1).min(image.height() as usize - 1);

    // Fractional distances
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = get_pixel_f64(image, x0, y0);
    let p10 = get_pixel_f64(image, x1, y0);
    let p01 = get_pixel_f64(image, x0, y1);
    let p11 = get_pixel_f64(image, x1, y1);

    let mut result = [0u8; MAX_CHANNELS];
    for i in 0..image.channels() {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    result
}

/// Sample a pixel using Lanczos3 interpolation.
///
/// Lanczos3 considers a 6x6 neighborhood of pixels, providing
/// higher quality results especially for sharp edges.
fn sample_lanczos3(image: &ImageBuffer, x: f64, y: f64) -> [u8; MAX_CHANNELS] {
    let (w, h) = (image.width() as i64, image.height() as i64);

    // Near the edges the kernel runs off the image - fall back to bilinear
    if x < 2.0 || x >= (w - 3) as f64 || y < 2.0 || y >= (h - 3) as f64 {
        return sample_bilinear(image, x, y);
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let channels = image.channels();

    let mut sum = [0.0f64; MAX_CHANNELS];
    let mut weight_sum = 0.0;

    for ky in -2..=3 {
        for kx in -2..=3 {
            let px = x0 + kx;
            let py = y0 + ky;

            if px >= 0 && px < w && py >= 0 && py < h {
                let dx = x - px as f64;
                let dy = y - py as f64;
                let weight = lanczos_weight(dx, 3.0) * lanczos_weight(dy, 3.0);

                let pixel = get_pixel_f64(image, px as usize, py as usize);
                for c in 0..channels {
                    sum[c] += pixel[c] * weight;
                }
                weight_sum += weight;
            }
        }
    }

    let mut result = [0u8; MAX_CHANNELS];
    if weight_sum > 0.0 {
        for c in 0..channels {
            result[c] = (sum[c] / weight_sum).clamp(0.0, 255.0).round() as u8;
        }
    }

    result
}

/// Lanczos kernel weight function.
///
/// ```text
/// L(x) = sinc(x) * sinc(x/a)  for |x| < a
/// L(x) = 0                     for |x| >= a
/// ```
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    let pi_x_a = pi_x / a;

    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}
