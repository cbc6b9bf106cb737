//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core Filterlab
//! types and converts engine errors into `JsValue`s.

use filterlab_core::{ChannelCount, EngineError, PixelBuffer};
use wasm_bindgen::prelude::*;

/// An in-memory image for JavaScript.
///
/// Wraps the core `PixelBuffer`. Samples are 8-bit, row-major and interleaved
/// with 1 (gray), 3 (RGB) or 4 (RGBA) channels per pixel.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. `pixels()` copies it out to a
/// `Uint8Array`; keep images in WASM memory while chaining operations and
/// only extract pixels for display.
#[wasm_bindgen]
pub struct JsPixelBuffer {
    inner: PixelBuffer,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Create an image from dimensions, channel count and sample data.
    ///
    /// # Errors
    /// Returns an error if `channels` is not 1, 3 or 4, or if `pixels` does
    /// not hold exactly `width * height * channels` bytes.
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: u32,
        height: u32,
        channels: u8,
        pixels: Vec<u8>,
    ) -> Result<JsPixelBuffer, JsValue> {
        let inner = core_buffer(width, height, channels, pixels).map_err(to_js_error)?;
        Ok(JsPixelBuffer { inner })
    }

    /// Wrap the RGBA bytes of a canvas `ImageData`.
    ///
    /// # Example (TypeScript)
    ///
    /// ```typescript
    /// const data = ctx.getImageData(0, 0, w, h);
    /// const image = JsPixelBuffer.from_image_data(w, h, data.data);
    /// ```
    pub fn from_image_data(
        width: u32,
        height: u32,
        data: &js_sys::Uint8ClampedArray,
    ) -> Result<JsPixelBuffer, JsValue> {
        Self::new(width, height, 4, data.to_vec())
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Samples per pixel (1, 3 or 4)
    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> u8 {
        self.inner.channels().get() as u8
    }

    /// Get the number of bytes in the pixel buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.data().len()
    }

    /// Returns the sample data as a Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.data().to_vec()
    }
}

impl JsPixelBuffer {
    pub(crate) fn from_buffer(inner: PixelBuffer) -> Self {
        Self { inner }
    }

    pub(crate) fn buffer(&self) -> &PixelBuffer {
        &self.inner
    }
}

fn core_buffer(
    width: u32,
    height: u32,
    channels: u8,
    pixels: Vec<u8>,
) -> Result<PixelBuffer, EngineError> {
    let channels = ChannelCount::try_from(channels as usize)?;
    PixelBuffer::new(width, height, channels, pixels)
}

/// Log an engine error to the browser console and convert it for JavaScript.
pub(crate) fn to_js_error(err: EngineError) -> JsValue {
    js_warning(&err.to_string())
}

/// Log `message` to the browser console and return it as a `JsValue`.
pub(crate) fn js_warning(message: &str) -> JsValue {
    let message = JsValue::from_str(message);
    web_sys::console::warn_1(&message);
    message
}

/// Convert an engine result into a JS-facing image.
pub(crate) fn to_js_result(
    result: filterlab_core::Result<PixelBuffer>,
) -> Result<JsPixelBuffer, JsValue> {
    result.map(JsPixelBuffer::from_buffer).map_err(to_js_error)
}
