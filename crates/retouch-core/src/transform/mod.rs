//! Geometry operations: resampling, rotation, cropping, mirroring and framing.
//!
//! Every operation here preserves the color mode of its input.
//!
//! # Transform Order
//!
//! Inside the pipeline the geometry slots run in this order:
//! 1. Resize
//! 2. Rotate
//! 3. Crop
//! 4. Flip
//! 5. (enhancements and drawing)
//! 6. Border
//! 7. Thumbnail
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = counter-clockwise
//! - Crop coordinates are integer pixel edges, `right`/`bottom` exclusive
//! - Origin is top-left corner

mod border;
mod crop;
mod flip;
mod resize;
mod rotation;

pub use border::add_border;
pub use crop::apply_crop;
pub use flip::{apply_flip, FlipAxis};
pub use resize::{resize, thumbnail, thumbnail_dimensions, FilterType};
pub use rotation::{apply_rotation, compute_rotated_bounds, InterpolationFilter};
