//! Geometric operations: rotation, flip and crop.
//!
//! # Coordinate System
//!
//! - Origin is the top-left pixel, `y` grows downward
//! - Rotation angles are in degrees, positive = counter-clockwise
//! - Rotation and flip keep the canvas size; crop uses pixel rectangles

mod crop;
mod flip;
mod rotation;

pub use crop::{crop, CropRect};
pub use flip::{flip, FlipAxis};
pub use rotation::{rotate, InterpolationFilter};
