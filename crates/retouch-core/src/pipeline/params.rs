//! Per-slot parameter records.
//!
//! Every slot is `{ "enabled": bool, ...params }`. Missing slots and missing
//! fields take the defaults below, so `{}` is a valid (all disabled) parameter
//! set. Dimensions left unset (`width`, `right`, ...) default to the size of
//! the image reaching that slot.

use serde::{Deserialize, Serialize};

use crate::buffer::{Color, ColorMode, Region};
use crate::draw::{WatermarkPosition, DEFAULT_FONT_SIZE, DEFAULT_STROKE_WIDTH};
use crate::encode::ExportFormat;
use crate::filter::FilterKind;
use crate::transform::{FilterType, FlipAxis, InterpolationFilter};

/// One slot: an enable flag plus that slot's parameters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Slot<P> {
    #[serde(default)]
    pub enabled: bool,
    #[serde(flatten)]
    pub params: P,
}

impl<P> Slot<P> {
    pub fn enabled(params: P) -> Self {
        Self {
            enabled: true,
            params,
        }
    }

    pub fn disabled(params: P) -> Self {
        Self {
            enabled: false,
            params,
        }
    }

    /// The parameters, if the slot is switched on.
    pub fn active(&self) -> Option<&P> {
        self.enabled.then_some(&self.params)
    }
}

/// The full parameter surface, one field per slot in application order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    pub resize: Slot<ResizeParams>,
    pub rotate: Slot<RotateParams>,
    pub crop: Slot<CropParams>,
    pub flip: Slot<FlipParams>,
    pub brightness: Slot<EnhanceParams>,
    pub contrast: Slot<EnhanceParams>,
    pub sharpness: Slot<EnhanceParams>,
    pub text: Slot<TextParams>,
    pub rectangle: Slot<RectangleParams>,
    pub border: Slot<BorderParams>,
    pub thumbnail: Slot<ThumbnailParams>,
    pub color_mode: Slot<ColorModeParams>,
    pub format: Slot<FormatParams>,
    pub filter: Slot<FilterParams>,
    pub watermark: Slot<WatermarkParams>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeParams {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub filter: FilterType,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RotateParams {
    /// Degrees counter-clockwise, `0..=360`.
    pub angle: f64,
    pub interpolation: InterpolationFilter,
}

/// Rectangle edges; `right` and `bottom` default to the image size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounds {
    pub left: u32,
    pub top: u32,
    pub right: Option<u32>,
    pub bottom: Option<u32>,
}

impl Bounds {
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right: Some(right),
            bottom: Some(bottom),
        }
    }

    /// Fill unset edges from a `width` x `height` image.
    pub fn resolve(&self, width: u32, height: u32) -> Region {
        Region::new(
            self.left,
            self.top,
            self.right.unwrap_or(width),
            self.bottom.unwrap_or(height),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CropParams {
    #[serde(flatten)]
    pub bounds: Bounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlipParams {
    pub axis: FlipAxis,
}

/// Brightness, contrast and sharpness share one shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhanceParams {
    pub factor: f32,
}

impl Default for EnhanceParams {
    fn default() -> Self {
        Self { factor: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextParams {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub size: u32,
    pub color: Color,
    /// Font name in the [`FontLibrary`](crate::draw::FontLibrary); `None` is
    /// the library default.
    pub font: Option<String>,
}

impl Default for TextParams {
    fn default() -> Self {
        Self {
            text: "Sample Text".to_string(),
            x: 10,
            y: 10,
            size: DEFAULT_FONT_SIZE,
            color: Color::WHITE,
            font: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectangleParams {
    #[serde(flatten)]
    pub bounds: Bounds,
    pub outline: Color,
    /// Stroke width in pixels.
    pub width: u32,
}

impl Default for RectangleParams {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            outline: Color::RED,
            width: DEFAULT_STROKE_WIDTH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderParams {
    pub size: u32,
    pub color: Color,
}

impl Default for BorderParams {
    fn default() -> Self {
        Self {
            size: 10,
            color: Color::BLACK,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailParams {
    pub max_size: u32,
}

impl Default for ThumbnailParams {
    fn default() -> Self {
        Self { max_size: 512 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorModeParams {
    pub mode: ColorMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatParams {
    pub format: ExportFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParams {
    pub filter: FilterKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatermarkParams {
    pub text: String,
    pub position: WatermarkPosition,
    pub font: Option<String>,
}

impl Default for WatermarkParams {
    fn default() -> Self {
        Self {
            text: "Sample Watermark".to_string(),
            position: WatermarkPosition::Center,
            font: None,
        }
    }
}
