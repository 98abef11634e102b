//! Retouch WASM - WebAssembly bindings for Retouch
//!
//! This crate exposes the retouch-core pipeline to JavaScript/TypeScript
//! applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper for image buffers
//! - `decode` - Upload decoding and format detection
//! - `encode` - Export encoding
//! - `pipeline` - One-shot pipeline runs and edit sessions
//! - `logging` - Routes engine logs to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditSession } from '@retouch/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const session = new JsEditSession(bytes);
//! const image = session.render({ border: { enabled: true, size: 20 } });
//! console.log(`Rendered ${image.width}x${image.height}`);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod logging;
mod pipeline;
mod types;

// Re-export public types
pub use decode::{decode_image, detect_format};
pub use encode::{encode_image, encode_jpeg, mime_type};
pub use logging::set_log_level;
pub use pipeline::{apply_pipeline, default_params, slot_names, JsEditSession};
pub use types::JsImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logging::install(log::LevelFilter::Warn);
    log::info!("retouch-wasm {} ready", version());
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
