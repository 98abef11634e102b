//! The fixed-order transform pipeline.
//!
//! A [`Pipeline`] has exactly [`SLOT_COUNT`] slots, one per [`SlotKind`].
//! Each slot is either empty (disabled) or holds an [`Operation`]. Applying
//! the pipeline folds the image through the filled slots in
//! [`SlotKind::ALL`] order:
//!
//! ```text
//! resize -> rotate -> crop -> flip -> brightness -> contrast -> sharpness
//!   -> text -> rectangle -> border -> thumbnail -> color_mode -> format
//!   -> filter -> watermark
//! ```
//!
//! The order never depends on the order slots were filled or toggled. The
//! first failing slot aborts the run and no partial result is returned.

mod params;
mod session;
mod slots;

pub use params::{
    BorderParams, Bounds, ColorModeParams, CropParams, EnhanceParams, FilterParams, FlipParams,
    FormatParams, PipelineParams, RectangleParams, ResizeParams, RotateParams, Slot, TextParams,
    ThumbnailParams, WatermarkParams,
};
pub use session::EditSession;
pub use slots::{Operation, SlotKind, SLOT_COUNT};

use thiserror::Error;

use crate::buffer::{ImageBuffer, OperationError};
use crate::draw::FontLibrary;

/// A slot failed while applying the pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{slot} failed: {source}")]
pub struct PipelineError {
    pub slot: SlotKind,
    #[source]
    pub source: OperationError,
}

/// Fifteen operation slots applied in a fixed order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pipeline {
    slots: [Option<Operation>; SLOT_COUNT],
}

impl Pipeline {
    /// A pipeline with every slot disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pipeline from a parameter set, filling the enabled slots.
    pub fn from_params(params: &PipelineParams) -> Self {
        let mut pipeline = Self::new();

        macro_rules! fill {
            ($($field:ident => $variant:ident),* $(,)?) => {
                $(
                    if let Some(p) = params.$field.active() {
                        pipeline.set(Operation::$variant(p.clone()));
                    }
                )*
            };
        }

        fill!(
            resize => Resize,
            rotate => Rotate,
            crop => Crop,
            flip => Flip,
            brightness => Brightness,
            contrast => Contrast,
            sharpness => Sharpness,
            text => Text,
            rectangle => Rectangle,
            border => Border,
            thumbnail => Thumbnail,
            color_mode => ColorMode,
            format => Format,
            filter => Filter,
            watermark => Watermark,
        );

        pipeline
    }

    /// Put `operation` into its slot, replacing whatever was there.
    pub fn set(&mut self, operation: Operation) {
        let index = operation.kind().index();
        self.slots[index] = Some(operation);
    }

    /// Empty a slot.
    pub fn disable(&mut self, kind: SlotKind) {
        self.slots[kind.index()] = None;
    }

    pub fn get(&self, kind: SlotKind) -> Option<&Operation> {
        self.slots[kind.index()].as_ref()
    }

    pub fn is_enabled(&self, kind: SlotKind) -> bool {
        self.get(kind).is_some()
    }

    /// Filled slots in application order.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.slots.iter().flatten()
    }

    /// Run every enabled slot over `image` in order.
    ///
    /// # Errors
    ///
    /// The first slot that fails, with its error. The input image is consumed
    /// either way.
    pub fn apply(
        &self,
        image: ImageBuffer,
        fonts: &FontLibrary,
    ) -> Result<ImageBuffer, PipelineError> {
        let mut image = image;

        for operation in self.operations() {
            let slot = operation.kind();
            let (width, height) = image.dimensions();
            let mode = image.mode();

            image = operation.apply(image, fonts).map_err(|source| {
                log::warn!("{slot} failed on {width}x{height} {mode} image: {source}");
                PipelineError { slot, source }
            })?;

            log::debug!(
                "{slot}: {width}x{height} {mode} -> {}x{} {}",
                image.width(),
                image.height(),
                image.mode()
            );
        }

        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{Color, ColorMode};
    use crate::draw::testing::block_library;
    use crate::filter::FilterKind;
    use crate::transform::FlipAxis;

    fn gradient(width: u32, height: u32) -> ImageBuffer {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x * 5) as u8, (y * 5) as u8, ((x + y) * 3) as u8]);
            }
        }
        ImageBuffer::new(width, height, ColorMode::Rgb, pixels).unwrap()
    }

    fn everything_enabled() -> PipelineParams {
        let mut params = PipelineParams::default();
        params.resize = Slot::enabled(ResizeParams {
            width: Some(60),
            height: Some(40),
            ..ResizeParams::default()
        });
        params.rotate = Slot::enabled(RotateParams {
            angle: 30.0,
            ..RotateParams::default()
        });
        params.crop = Slot::enabled(CropParams {
            bounds: Bounds::new(5, 5, 50, 40),
        });
        params.flip = Slot::enabled(FlipParams {
            axis: FlipAxis::Vertical,
        });
        params.brightness = Slot::enabled(EnhanceParams { factor: 1.2 });
        params.contrast = Slot::enabled(EnhanceParams { factor: 0.8 });
        params.sharpness = Slot::enabled(EnhanceParams { factor: 1.5 });
        params.text.enabled = true;
        params.rectangle.enabled = true;
        params.border.enabled = true;
        params.thumbnail = Slot::enabled(ThumbnailParams { max_size: 32 });
        params.color_mode = Slot::enabled(ColorModeParams {
            mode: ColorMode::Rgba,
        });
        params.format.enabled = true;
        params.filter = Slot::enabled(FilterParams {
            filter: FilterKind::Sepia,
        });
        params.watermark.enabled = true;
        params
    }

    #[test]
    fn test_all_disabled_is_identity() {
        let img = gradient(20, 10);
        let pipeline = Pipeline::from_params(&PipelineParams::default());
        assert_eq!(pipeline.operations().count(), 0);
        assert_eq!(pipeline.apply(img.clone(), &FontLibrary::empty()).unwrap(), img);
    }

    #[test]
    fn test_every_slot_enabled() {
        let params = everything_enabled();
        let pipeline = Pipeline::from_params(&params);
        assert_eq!(pipeline.operations().count(), SLOT_COUNT);

        let out = pipeline
            .apply(gradient(80, 60), &FontLibrary::default())
            .unwrap();
        // Watermark runs last and always yields RGBA
        assert_eq!(out.mode(), ColorMode::Rgba);
        assert!(out.width() <= 32 && out.height() <= 32);
    }

    #[test]
    fn test_apply_is_deterministic() {
        let pipeline = Pipeline::from_params(&everything_enabled());
        let fonts = FontLibrary::default();
        let a = pipeline.apply(gradient(80, 60), &fonts).unwrap();
        let b = pipeline.apply(gradient(80, 60), &fonts).unwrap();
        assert_eq!(a.pixels(), b.pixels());
    }

    #[test]
    fn test_operations_follow_slot_order() {
        let mut pipeline = Pipeline::new();
        pipeline.set(Operation::Watermark(WatermarkParams::default()));
        pipeline.set(Operation::Flip(FlipParams::default()));
        pipeline.set(Operation::Resize(ResizeParams::default()));

        let kinds: Vec<_> = pipeline.operations().map(Operation::kind).collect();
        assert_eq!(
            kinds,
            vec![SlotKind::Resize, SlotKind::Flip, SlotKind::Watermark]
        );
    }

    #[test]
    fn test_order_matters() {
        // Thumbnail is set first, yet the border still runs before it
        let mut pipeline = Pipeline::new();
        pipeline.set(Operation::Thumbnail(ThumbnailParams { max_size: 10 }));
        pipeline.set(Operation::Border(BorderParams {
            size: 5,
            color: Color::WHITE,
        }));

        let out = pipeline
            .apply(gradient(10, 10), &FontLibrary::empty())
            .unwrap();
        assert_eq!(out.dimensions(), (10, 10));
    }

    #[test]
    fn test_failing_slot_is_identified() {
        let mut params = PipelineParams::default();
        params.flip.enabled = true;
        params.crop = Slot::enabled(CropParams {
            bounds: Bounds::new(0, 0, 100, 5),
        });
        params.filter.enabled = true;

        let err = Pipeline::from_params(&params)
            .apply(gradient(20, 10), &FontLibrary::empty())
            .unwrap_err();
        assert_eq!(err.slot, SlotKind::Crop);
        assert!(matches!(err.source, OperationError::InvalidRegion { .. }));
        assert!(err.to_string().starts_with("crop failed"));
    }

    #[test]
    fn test_missing_font_fails_only_text_slots() {
        let mut params = PipelineParams::default();
        params.border.enabled = true;
        params.text.enabled = true;

        let err = Pipeline::from_params(&params)
            .apply(gradient(20, 10), &FontLibrary::empty())
            .unwrap_err();
        assert_eq!(err.slot, SlotKind::Text);
        assert!(matches!(err.source, OperationError::FontUnavailable(_)));

        // The same parameters succeed once a font is available
        let out = Pipeline::from_params(&params)
            .apply(gradient(20, 10), &block_library(4, 4))
            .unwrap();
        assert_eq!(out.dimensions(), (40, 30));
    }

    #[test]
    fn test_disable_and_set_replace() {
        let mut pipeline = Pipeline::new();
        pipeline.set(Operation::Brightness(EnhanceParams { factor: 0.5 }));
        pipeline.set(Operation::Brightness(EnhanceParams { factor: 0.7 }));
        assert_eq!(
            pipeline.get(SlotKind::Brightness),
            Some(&Operation::Brightness(EnhanceParams { factor: 0.7 }))
        );

        pipeline.disable(SlotKind::Brightness);
        assert!(!pipeline.is_enabled(SlotKind::Brightness));
    }

    #[test]
    fn test_from_json_params() {
        let json = r#"{
            "thumbnail": { "enabled": true, "max_size": 8 },
            "filter": { "enabled": true, "filter": "grayscale" }
        }"#;
        let params: PipelineParams = serde_json::from_str(json).unwrap();
        let out = Pipeline::from_params(&params)
            .apply(gradient(32, 16), &FontLibrary::empty())
            .unwrap();
        assert_eq!(out.dimensions(), (8, 4));
        assert_eq!(out.mode(), ColorMode::Grayscale);
    }
}
