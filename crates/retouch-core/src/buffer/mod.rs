//! The in-memory raster every operation reads and produces.
//!
//! An [`ImageBuffer`] is a row-major array of 8-bit samples whose channel
//! layout is given by its [`ColorMode`]. Buffers are threaded through the
//! pipeline by value: an operation either mutates the buffer it was handed
//! or returns a fresh one, never both.
//!
//! # Modes
//!
//! | Mode | Channels | Layout |
//! |---|---|---|
//! | `L` (grayscale) | 1 | luma |
//! | `RGB` | 3 | red, green, blue |
//! | `RGBA` | 4 | red, green, blue, straight alpha |
//! | `CMYK` | 4 | cyan, magenta, yellow, key |

mod color;
mod convert;
mod planes;
mod types;

pub use color::{cmyk_to_rgb, rgb_to_cmyk, rgb_to_luma, Color};
pub use convert::{apply_format_tag, convert_mode};
pub(crate) use planes::{merge_planes, split_planes};
pub use types::{ColorMode, ImageBuffer, OperationError, Region};
