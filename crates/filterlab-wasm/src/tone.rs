//! Contrast and brightness bindings.

use crate::types::{to_js_result, JsPixelBuffer};
use filterlab_core::ToneParams;
use wasm_bindgen::prelude::*;

/// Apply contrast then brightness to an image.
///
/// Call this on the unedited original whenever a slider moves; the result
/// replaces the displayed image.
///
/// # Arguments
///
/// * `image` - Source image
/// * `contrast` - Multiplier from 0.5 to 2.0 (1.0 = unchanged)
/// * `brightness` - Offset from -1.0 to 1.0 as a fraction of full scale (0.0 = unchanged)
#[wasm_bindgen]
pub fn adjust_tone(
    image: &JsPixelBuffer,
    contrast: f32,
    brightness: f32,
) -> Result<JsPixelBuffer, JsValue> {
    let tone = ToneParams {
        contrast,
        brightness,
    };
    to_js_result(filterlab_core::adjust_tone(image.buffer(), &tone))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(value: u8) -> JsPixelBuffer {
        JsPixelBuffer::new(1, 1, 1, vec![value]).unwrap()
    }

    #[test]
    fn test_identity() {
        let result = adjust_tone(&gray(77), 1.0, 0.0).unwrap();
        assert_eq!(result.pixels(), vec![77]);
    }

    #[test]
    fn test_contrast_clamps() {
        let result = adjust_tone(&gray(200), 2.0, 0.0).unwrap();
        assert_eq!(result.pixels(), vec![255]);
    }

    #[test]
    fn test_brightness_clamps() {
        let result = adjust_tone(&gray(100), 1.0, -1.0).unwrap();
        assert_eq!(result.pixels(), vec![0]);
    }
}
