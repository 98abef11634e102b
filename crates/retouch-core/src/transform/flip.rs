//! Mirror an image along one axis.

use crate::buffer::{ImageBuffer, OperationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Axis to mirror across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FlipAxis {
    /// Mirror columns left to right.
    #[default]
    Horizontal,
    /// Mirror rows top to bottom.
    Vertical,
}

impl FlipAxis {
    pub fn name(self) -> &'static str {
        match self {
            FlipAxis::Horizontal => "horizontal",
            FlipAxis::Vertical => "vertical",
        }
    }
}

impl fmt::Display for FlipAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FlipAxis {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" | "h" => Ok(FlipAxis::Horizontal),
            "vertical" | "v" => Ok(FlipAxis::Vertical),
            _ => Err(OperationError::InvalidParameter(format!(
                "unknown flip axis `{s}`"
            ))),
        }
    }
}

impl TryFrom<String> for FlipAxis {
    type Error = OperationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<FlipAxis> for String {
    fn from(axis: FlipAxis) -> Self {
        axis.name().to_string()
    }
}

/// Mirror `image` in place along `axis`. Dimensions are unchanged.
pub fn apply_flip(mut image: ImageBuffer, axis: FlipAxis) -> ImageBuffer {
    let channels = image.channels();
    let stride = image.stride();
    let (width, height) = image.dimensions();
    let pixels = image.pixels_mut();

    match axis {
        FlipAxis::Horizontal => {
            for row in pixels.chunks_exact_mut(stride.max(1)) {
                for x in 0..(width as usize / 2) {
                    let mirror = width as usize - 1 - x;
                    for c in 0..channels {
                        row.swap(x * channels + c, mirror * channels + c);
                    }
                }
            }
        }
        FlipAxis::Vertical => {
            let height = height as usize;
            for y in 0..height / 2 {
                let (upper, lower) = pixels.split_at_mut((height - 1 - y) * stride);
                upper[y * stride..(y + 1) * stride].swap_with_slice(&mut lower[..stride]);
            }
        }
    }

    image
}
