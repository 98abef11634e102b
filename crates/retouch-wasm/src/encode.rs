//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_image`] - Encode an image as PNG, JPEG, BMP or GIF
//! - [`encode_jpeg`] - Encode an image as JPEG with a chosen quality
//! - [`mime_type`] - MIME type for a format name, for download blobs
//!
//! # Example
//!
//! ```typescript
//! import { encode_image, mime_type } from '@retouch/wasm';
//!
//! const bytes = encode_image(result, "PNG");
//! const blob = new Blob([bytes], { type: mime_type("PNG") });
//! ```

use crate::types::{js_error, JsImage};
use retouch_core::encode::{self, ExportFormat};
use retouch_core::OperationError;
use wasm_bindgen::prelude::*;

/// Encode an image in the named format (`"PNG"`, `"JPEG"`, `"BMP"`, `"GIF"`).
///
/// # Errors
///
/// Returns an error if the format name is unknown or the format cannot store
/// the image's color mode (run the pipeline's format slot first).
#[wasm_bindgen]
pub fn encode_image(image: &JsImage, format: &str) -> Result<Vec<u8>, JsValue> {
    let format = parse_format(format).map_err(js_error)?;
    encode::encode_image(image.as_core(), format).map_err(js_error)
}

/// Encode a grayscale or RGB image to JPEG bytes.
///
/// # Arguments
///
/// * `image` - The image to encode
/// * `quality` - JPEG quality (1-100, recommended: 90)
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(image.as_core(), quality).map_err(js_error)
}

/// MIME type for a format name.
#[wasm_bindgen]
pub fn mime_type(format: &str) -> Result<String, JsValue> {
    parse_format(format)
        .map(|format| format.mime_type().to_string())
        .map_err(js_error)
}

fn parse_format(name: &str) -> Result<ExportFormat, OperationError> {
    name.parse()
}
