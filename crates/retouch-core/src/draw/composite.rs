//! Porter-Duff "over" compositing of straight-alpha RGBA images.

use crate::buffer::{ColorMode, ImageBuffer, OperationError};

/// Fixed-point precision of the blend coefficients.
const PRECISION_BITS: u32 = 7;

/// `(a + 128) / 255` style rounding division used by the blend.
#[inline]
fn shift_for_div_255(a: u32) -> u32 {
    ((a >> 8) + a) >> 8
}

/// Composite `src` over `dst`.
///
/// Where `src` is fully transparent the `dst` pixel is kept as is. Elsewhere
/// the output alpha is `src_a + dst_a * (1 - src_a)` and each color channel is
/// the alpha-weighted mix of the two.
///
/// # Errors
///
/// `InvalidParameter` unless both images are RGBA of the same size.
pub fn alpha_composite(dst: &ImageBuffer, src: &ImageBuffer) -> Result<ImageBuffer, OperationError> {
    if dst.mode() != ColorMode::Rgba || src.mode() != ColorMode::Rgba {
        return Err(OperationError::InvalidParameter(format!(
            "alpha compositing needs two RGBA images, got {} and {}",
            dst.mode(),
            src.mode()
        )));
    }
    if dst.dimensions() != src.dimensions() {
        return Err(OperationError::InvalidParameter(format!(
            "cannot composite a {}x{} image over a {}x{} image",
            src.width(),
            src.height(),
            dst.width(),
            dst.height()
        )));
    }

    let mut output = dst.clone();
    for (out, s) in output
        .pixels_mut()
        .chunks_exact_mut(4)
        .zip(src.pixels().chunks_exact(4))
    {
        let src_a = s[3] as u32;
        if src_a == 0 {
            continue;
        }

        let dst_a = out[3] as u32;
        let blend = dst_a * (255 - src_a);
        let out_a_255 = src_a * 255 + blend;

        let coef1 = src_a * 255 * 255 * (1 << PRECISION_BITS) / out_a_255;
        let coef2 = 255 * (1 << PRECISION_BITS) - coef1;

        for c in 0..3 {
            let tmp = s[c] as u32 * coef1 + out[c] as u32 * coef2;
            out[c] = (shift_for_div_255(tmp + (0x80 << PRECISION_BITS)) >> PRECISION_BITS) as u8;
        }
        out[3] = shift_for_div_255(out_a_255 + 0x80) as u8;
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba(samples: [u8; 4]) -> ImageBuffer {
        ImageBuffer::filled(1, 1, ColorMode::Rgba, samples)
    }

    #[test]
    fn test_transparent_source_keeps_destination() {
        let dst = rgba([10, 20, 30, 40]);
        let out = alpha_composite(&dst, &rgba([255, 255, 255, 0])).unwrap();
        assert_eq!(out, dst);
    }

    #[test]
    fn test_opaque_source_replaces_destination() {
        let out = alpha_composite(&rgba([10, 20, 30, 255]), &rgba([200, 100, 50, 255])).unwrap();
        assert_eq!(out.pixels(), &[200, 100, 50, 255]);
    }

    #[test]
    fn test_half_white_over_opaque_black() {
        let out = alpha_composite(&rgba([0, 0, 0, 255]), &rgba([255, 255, 255, 128])).unwrap();
        assert_eq!(out.pixels(), &[128, 128, 128, 255]);
    }

    #[test]
    fn test_half_white_over_transparent() {
        // Nothing underneath: the source shows through unchanged
        let out = alpha_composite(&rgba([0, 0, 0, 0]), &rgba([255, 255, 255, 128])).unwrap();
        assert_eq!(out.pixels(), &[255, 255, 255, 128]);
    }

    #[test]
    fn test_mode_and_size_checked() {
        let rgb = ImageBuffer::filled(1, 1, ColorMode::Rgb, [0; 4]);
        assert!(alpha_composite(&rgb, &rgba([0; 4])).is_err());

        let big = ImageBuffer::filled(2, 1, ColorMode::Rgba, [0; 4]);
        assert!(alpha_composite(&big, &rgba([0; 4])).is_err());
    }
}
