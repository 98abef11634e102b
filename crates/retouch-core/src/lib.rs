//! Retouch Core - Single-image transform pipeline
//!
//! This crate decodes one uploaded image, runs it through a fixed sequence of
//! fifteen optional operations (geometry, tone, drawing, color and filters)
//! and encodes the result for download.
//!
//! The entry points are [`Pipeline`] for a one-shot run and [`EditSession`]
//! for repeated renders of the same upload.

pub mod buffer;
pub mod decode;
pub mod draw;
pub mod encode;
pub mod enhance;
pub mod filter;
pub mod pipeline;
pub mod transform;

pub use buffer::{convert_mode, Color, ColorMode, ImageBuffer, OperationError, Region};
pub use decode::{decode_image, DecodeError};
pub use draw::{FontLibrary, TextRasterizer};
pub use encode::{encode_image, EncodeError, ExportFormat};
pub use pipeline::{
    EditSession, Operation, Pipeline, PipelineError, PipelineParams, Slot, SlotKind,
};
