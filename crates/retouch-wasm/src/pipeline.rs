//! Pipeline WASM bindings.
//!
//! Parameters cross the boundary as plain JavaScript objects with one key per
//! slot, each `{ enabled, ...params }`. Missing keys take their defaults.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const session = new JsEditSession(bytes);
//! const preview = session.render({
//!   rotate: { enabled: true, angle: 90 },
//!   filter: { enabled: true, filter: "sepia" },
//! });
//! const png = session.export("PNG");
//! ```

use crate::types::{js_error, JsImage};
use retouch_core::pipeline::SlotKind;
use retouch_core::{EditSession, FontLibrary, Pipeline, PipelineParams};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn parse_params(params: JsValue) -> Result<PipelineParams, JsValue> {
    if params.is_undefined() || params.is_null() {
        return Ok(PipelineParams::default());
    }
    serde_wasm_bindgen::from_value(params).map_err(js_error)
}

/// Run the pipeline once over `image` with the built-in fonts.
///
/// # Errors
///
/// Returns an error naming the failing slot, or a parameter error if `params`
/// does not have the expected shape.
#[wasm_bindgen]
pub fn apply_pipeline(image: &JsImage, params: JsValue) -> Result<JsImage, JsValue> {
    let params = parse_params(params)?;
    Pipeline::from_params(&params)
        .apply(image.as_core().clone(), &FontLibrary::default())
        .map(JsImage::from_core)
        .map_err(js_error)
}

/// The default parameter object, every slot disabled.
#[wasm_bindgen]
pub fn default_params() -> Result<JsValue, JsValue> {
    // Flattened slots serialize as maps; emit plain objects instead of `Map`
    PipelineParams::default()
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(js_error)
}

/// Slot names in application order.
#[wasm_bindgen]
pub fn slot_names() -> Vec<String> {
    SlotKind::ALL
        .iter()
        .map(|kind| kind.name().to_string())
        .collect()
}

/// An upload being edited, re-rendered from the original on every change.
#[wasm_bindgen]
pub struct JsEditSession {
    inner: EditSession,
}

#[wasm_bindgen]
impl JsEditSession {
    /// Decode `bytes` and start a session.
    #[wasm_bindgen(constructor)]
    pub fn new(bytes: &[u8]) -> Result<JsEditSession, JsValue> {
        EditSession::from_bytes(bytes)
            .map(|inner| Self { inner })
            .map_err(js_error)
    }

    /// Start a session on an already decoded image.
    pub fn from_image(image: &JsImage) -> JsEditSession {
        Self {
            inner: EditSession::new(image.as_core().clone()),
        }
    }

    pub fn original(&self) -> JsImage {
        JsImage::from_core(self.inner.original().clone())
    }

    /// The last successful render, or the original.
    pub fn current(&self) -> JsImage {
        JsImage::from_core(self.inner.current().clone())
    }

    /// Re-render from the original. On error the previous render is kept.
    pub fn render(&mut self, params: JsValue) -> Result<JsImage, JsValue> {
        let params = parse_params(params)?;
        self.inner
            .render(&params)
            .map(|image| JsImage::from_core(image.clone()))
            .map_err(js_error)
    }

    /// Encode the current image in the named format.
    pub fn export(&self, format: &str) -> Result<Vec<u8>, JsValue> {
        let format = format.parse().map_err(js_error)?;
        self.inner.export(format).map_err(js_error)
    }

    /// Names of the fonts text slots may reference.
    pub fn font_names(&self) -> Vec<String> {
        self.inner.fonts().names().map(str::to_string).collect()
    }
}
