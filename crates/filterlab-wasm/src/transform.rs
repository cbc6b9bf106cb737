//! WASM bindings for image transformation operations.
//!
//! This module provides JavaScript bindings for rotation, flip and crop.

use crate::types::{to_js_error, to_js_result, JsPixelBuffer};
use filterlab_core::{CropRect, FlipAxis, InterpolationFilter};
use wasm_bindgen::prelude::*;

/// Rotate an image about its center.
///
/// The canvas keeps its size; corners that rotate out are cut off and
/// uncovered areas become black (transparent for RGBA).
///
/// # Arguments
///
/// * `image` - Source image to rotate
/// * `angle_degrees` - Rotation angle in degrees (positive = counter-clockwise)
/// * `use_nearest` - Nearest-neighbour sampling (lossless for quarter turns), otherwise bilinear
///
/// # Example (TypeScript)
///
/// ```typescript
/// const turned = rotate(image, 90.0, true);
/// ```
#[wasm_bindgen]
pub fn rotate(
    image: &JsPixelBuffer,
    angle_degrees: f64,
    use_nearest: bool,
) -> Result<JsPixelBuffer, JsValue> {
    let filter = if use_nearest {
        InterpolationFilter::Nearest
    } else {
        InterpolationFilter::Bilinear
    };
    to_js_result(filterlab_core::rotate(image.buffer(), angle_degrees, filter))
}

/// Mirror an image. `axis` is `"horizontal"`, `"vertical"` or `"both"`.
#[wasm_bindgen]
pub fn flip(image: &JsPixelBuffer, axis: &str) -> Result<JsPixelBuffer, JsValue> {
    let axis: FlipAxis = axis.parse().map_err(to_js_error)?;
    to_js_result(filterlab_core::flip(image.buffer(), axis))
}

/// Cut out a rectangle given in pixels.
///
/// # Errors
/// Returns an error if the rectangle is empty or extends past the image.
#[wasm_bindgen]
pub fn crop(
    image: &JsPixelBuffer,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> Result<JsPixelBuffer, JsValue> {
    let rect = CropRect::new(x, y, width, height);
    to_js_result(filterlab_core::crop(image.buffer(), rect))
}
