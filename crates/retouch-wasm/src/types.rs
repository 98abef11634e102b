//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core Retouch
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use retouch_core::{ColorMode, ImageBuffer};
use std::fmt;
use wasm_bindgen::prelude::*;

/// An image wrapper for JavaScript.
///
/// Wraps the core `ImageBuffer` and exposes its dimensions, color mode and
/// samples.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is
/// made to JavaScript memory as a `Uint8Array`. Keep images in WASM memory
/// between pipeline runs and only extract pixels for display.
#[wasm_bindgen]
pub struct JsImage {
    inner: ImageBuffer,
}

#[wasm_bindgen]
impl JsImage {
    /// Create an image from dimensions, a mode name and raw samples.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `mode` - One of `"L"`, `"RGB"`, `"RGBA"`, `"CMYK"`
    /// * `pixels` - Row-major samples, `width * height * channels` bytes
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, mode: &str, pixels: Vec<u8>) -> Result<JsImage, JsValue> {
        build_image(width, height, mode, pixels)
            .map(Self::from_core)
            .map_err(js_error)
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Color mode name: `"L"`, `"RGB"`, `"RGBA"` or `"CMYK"`
    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        self.inner.mode().name().to_string()
    }

    /// Number of bytes in the pixel buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.byte_size()
    }

    /// Returns the samples as a Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels().to_vec()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {}
}

impl JsImage {
    pub(crate) fn from_core(inner: ImageBuffer) -> Self {
        Self { inner }
    }

    pub(crate) fn as_core(&self) -> &ImageBuffer {
        &self.inner
    }
}

fn build_image(
    width: u32,
    height: u32,
    mode: &str,
    pixels: Vec<u8>,
) -> Result<ImageBuffer, retouch_core::OperationError> {
    let mode: ColorMode = mode.parse()?;
    ImageBuffer::new(width, height, mode, pixels)
}

/// Turn any core error into a JavaScript exception value.
pub(crate) fn js_error(err: impl fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}
