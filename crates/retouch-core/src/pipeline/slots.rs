//! Slot kinds and the operations bound to them.

use std::fmt;

use super::params::{
    BorderParams, ColorModeParams, CropParams, EnhanceParams, FilterParams, FlipParams,
    FormatParams, RectangleParams, ResizeParams, RotateParams, TextParams, ThumbnailParams,
    WatermarkParams,
};
use crate::buffer::{apply_format_tag, convert_mode, ImageBuffer, OperationError};
use crate::draw::{add_watermark, draw_rectangle, draw_text, FontLibrary};
use crate::enhance::{adjust_brightness, adjust_contrast, adjust_sharpness};
use crate::filter::apply_filter;
use crate::transform::{add_border, apply_crop, apply_flip, apply_rotation, resize, thumbnail};

/// Number of slots in a pipeline.
pub const SLOT_COUNT: usize = 15;

/// A fixed position in the pipeline. Declaration order is application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SlotKind {
    Resize,
    Rotate,
    Crop,
    Flip,
    Brightness,
    Contrast,
    Sharpness,
    Text,
    Rectangle,
    Border,
    Thumbnail,
    ColorMode,
    Format,
    Filter,
    Watermark,
}

impl SlotKind {
    /// Every slot, in application order.
    pub const ALL: [SlotKind; SLOT_COUNT] = [
        SlotKind::Resize,
        SlotKind::Rotate,
        SlotKind::Crop,
        SlotKind::Flip,
        SlotKind::Brightness,
        SlotKind::Contrast,
        SlotKind::Sharpness,
        SlotKind::Text,
        SlotKind::Rectangle,
        SlotKind::Border,
        SlotKind::Thumbnail,
        SlotKind::ColorMode,
        SlotKind::Format,
        SlotKind::Filter,
        SlotKind::Watermark,
    ];

    /// Position of this slot in [`SlotKind::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            SlotKind::Resize => "resize",
            SlotKind::Rotate => "rotate",
            SlotKind::Crop => "crop",
            SlotKind::Flip => "flip",
            SlotKind::Brightness => "brightness",
            SlotKind::Contrast => "contrast",
            SlotKind::Sharpness => "sharpness",
            SlotKind::Text => "text",
            SlotKind::Rectangle => "rectangle",
            SlotKind::Border => "border",
            SlotKind::Thumbnail => "thumbnail",
            SlotKind::ColorMode => "color_mode",
            SlotKind::Format => "format",
            SlotKind::Filter => "filter",
            SlotKind::Watermark => "watermark",
        }
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One transform with its bound parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Resize(ResizeParams),
    Rotate(RotateParams),
    Crop(CropParams),
    Flip(FlipParams),
    Brightness(EnhanceParams),
    Contrast(EnhanceParams),
    Sharpness(EnhanceParams),
    Text(TextParams),
    Rectangle(RectangleParams),
    Border(BorderParams),
    Thumbnail(ThumbnailParams),
    ColorMode(ColorModeParams),
    Format(FormatParams),
    Filter(FilterParams),
    Watermark(WatermarkParams),
}

impl Operation {
    /// The slot this operation occupies.
    pub fn kind(&self) -> SlotKind {
        match self {
            Operation::Resize(_) => SlotKind::Resize,
            Operation::Rotate(_) => SlotKind::Rotate,
            Operation::Crop(_) => SlotKind::Crop,
            Operation::Flip(_) => SlotKind::Flip,
            Operation::Brightness(_) => SlotKind::Brightness,
            Operation::Contrast(_) => SlotKind::Contrast,
            Operation::Sharpness(_) => SlotKind::Sharpness,
            Operation::Text(_) => SlotKind::Text,
            Operation::Rectangle(_) => SlotKind::Rectangle,
            Operation::Border(_) => SlotKind::Border,
            Operation::Thumbnail(_) => SlotKind::Thumbnail,
            Operation::ColorMode(_) => SlotKind::ColorMode,
            Operation::Format(_) => SlotKind::Format,
            Operation::Filter(_) => SlotKind::Filter,
            Operation::Watermark(_) => SlotKind::Watermark,
        }
    }

    /// Run this operation on `image`.
    ///
    /// `fonts` is only consulted by the text and watermark operations.
    pub fn apply(
        &self,
        image: ImageBuffer,
        fonts: &FontLibrary,
    ) -> Result<ImageBuffer, OperationError> {
        match self {
            Operation::Resize(p) => {
                let width = p.width.unwrap_or(image.width());
                let height = p.height.unwrap_or(image.height());
                resize(&image, width, height, p.filter)
            }
            Operation::Rotate(p) => {
                if !(0.0..=360.0).contains(&p.angle) {
                    return Err(OperationError::InvalidParameter(format!(
                        "rotation angle must be within 0..=360 degrees, got {}",
                        p.angle
                    )));
                }
                apply_rotation(&image, p.angle, p.interpolation)
            }
            Operation::Crop(p) => {
                let region = p.bounds.resolve(image.width(), image.height());
                apply_crop(&image, region)
            }
            Operation::Flip(p) => Ok(apply_flip(image, p.axis)),
            Operation::Brightness(p) => adjust_brightness(image, p.factor),
            Operation::Contrast(p) => adjust_contrast(image, p.factor),
            Operation::Sharpness(p) => adjust_sharpness(image, p.factor),
            Operation::Text(p) => {
                let font = fonts.resolve(p.font.as_deref())?;
                draw_text(image, &p.text, (p.x, p.y), p.size, p.color, font)
            }
            Operation::Rectangle(p) => {
                let region = p.bounds.resolve(image.width(), image.height());
                draw_rectangle(image, region, p.outline, p.width)
            }
            Operation::Border(p) => add_border(&image, p.size, p.color),
            Operation::Thumbnail(p) => thumbnail(&image, p.max_size),
            Operation::ColorMode(p) => Ok(convert_mode(image, p.mode)),
            Operation::Format(p) => Ok(apply_format_tag(image, p.format)),
            Operation::Filter(p) => Ok(apply_filter(image, p.filter)),
            Operation::Watermark(p) => {
                let font = fonts.resolve(p.font.as_deref())?;
                add_watermark(image, &p.text, p.position, font)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{Color, ColorMode};
    use crate::draw::testing::block_library;
    use crate::pipeline::params::Bounds;

    #[test]
    fn test_all_is_in_index_order() {
        for (i, kind) in SlotKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
        let mut sorted = SlotKind::ALL;
        sorted.sort();
        assert_eq!(sorted, SlotKind::ALL);
    }

    #[test]
    fn test_rotate_angle_range() {
        let img = ImageBuffer::filled(4, 4, ColorMode::Rgb, [0; 4]);
        let fonts = FontLibrary::empty();
        for angle in [-1.0, 360.5, f64::NAN] {
            let op = Operation::Rotate(RotateParams {
                angle,
                ..RotateParams::default()
            });
            assert!(matches!(
                op.apply(img.clone(), &fonts),
                Err(OperationError::InvalidParameter(_))
            ));
        }
        let op = Operation::Rotate(RotateParams {
            angle: 360.0,
            ..RotateParams::default()
        });
        assert_eq!(op.apply(img.clone(), &fonts).unwrap(), img);
    }

    #[test]
    fn test_resize_defaults_to_current_size() {
        let img = ImageBuffer::filled(7, 5, ColorMode::Rgb, [3; 4]);
        let op = Operation::Resize(ResizeParams {
            width: Some(14),
            ..ResizeParams::default()
        });
        let out = op.apply(img, &FontLibrary::empty()).unwrap();
        assert_eq!(out.dimensions(), (14, 5));
    }

    #[test]
    fn test_crop_with_open_edges() {
        let img = ImageBuffer::filled(10, 8, ColorMode::Grayscale, [0; 4]);
        let op = Operation::Crop(CropParams {
            bounds: Bounds {
                left: 3,
                top: 2,
                ..Bounds::default()
            },
        });
        let out = op.apply(img, &FontLibrary::empty()).unwrap();
        assert_eq!(out.dimensions(), (7, 6));
    }

    #[test]
    fn test_text_uses_named_font() {
        let img = ImageBuffer::filled(20, 20, ColorMode::Rgb, [0; 4]);
        let fonts = block_library(2, 2);

        let op = Operation::Text(TextParams {
            x: 1,
            y: 1,
            color: Color::RED,
            ..TextParams::default()
        });
        let out = op.apply(img.clone(), &fonts).unwrap();
        assert_eq!(out.pixel(2, 2), &[255, 0, 0]);

        let op = Operation::Text(TextParams {
            font: Some("arial.ttf".to_string()),
            ..TextParams::default()
        });
        assert!(matches!(
            op.apply(img, &fonts),
            Err(OperationError::FontUnavailable(_))
        ));
    }
}
