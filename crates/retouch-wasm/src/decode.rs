//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode a PNG, JPEG, BMP or GIF upload
//! - [`detect_format`] - Guess the format of an upload from its header
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, detect_format } from '@retouch/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const format = detect_format(bytes); // "PNG", "JPEG", ... or undefined
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height} ${image.mode}`);
//! ```

use crate::types::{js_error, JsImage};
use retouch_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an uploaded image file.
///
/// Grayscale, RGB and RGBA files keep their mode; other layouts are widened
/// to RGB or RGBA.
///
/// # Errors
///
/// Returns an error if the bytes are not a supported image or are corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsImage::from_core)
        .map_err(js_error)
}

/// Guess the format name of an upload, or `undefined` if it is not supported.
#[wasm_bindgen]
pub fn detect_format(bytes: &[u8]) -> Option<String> {
    decode::detect_format(bytes).map(|format| format.name().to_string())
}


/// WASM-specific tests that require JsValue.
///
/// Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use retouch_core::{encode_image, ColorMode, ExportFormat, ImageBuffer};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_decode_image_invalid() {
        assert!(decode_image(&[0, 1, 2, 3]).is_err());
        assert!(decode_image(&[]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_decode_image_png() {
        let source = ImageBuffer::filled(6, 4, ColorMode::Rgba, [1, 2, 3, 4]);
        let png = encode_image(&source, ExportFormat::Png).unwrap();

        let image = decode_image(&png).unwrap();
        assert_eq!(image.width(), 6);
        assert_eq!(image.height(), 4);
        assert_eq!(image.mode(), "RGBA");
    }
}
