//! Filterlab WASM - WebAssembly bindings for Filterlab
//!
//! This crate exposes the filterlab-core pixel-transform engine to
//! JavaScript/TypeScript applications. Engine errors are logged to the
//! browser console and returned as rejected `JsValue` strings.
//!
//! # Module Structure
//!
//! - `types` - `JsPixelBuffer`, the JS-facing image wrapper
//! - `filters` - color filters and modifications routed by name
//! - `tone` - contrast and brightness
//! - `transform` - rotate, flip and crop
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsPixelBuffer, apply_filter } from '@filterlab/wasm';
//!
//! await init();
//!
//! const data = ctx.getImageData(0, 0, w, h);
//! const image = JsPixelBuffer.from_image_data(w, h, data.data);
//! const sepia = apply_filter(image, "sepia");
//! ```

use wasm_bindgen::prelude::*;

mod filters;
mod tone;
mod transform;
mod types;

// Re-export public types
pub use filters::{apply_filter, apply_modification, is_expensive_filter};
pub use tone::adjust_tone;
pub use transform::{crop, flip, rotate};
pub use types::JsPixelBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str(&format!(
        "filterlab-wasm {} loaded",
        version()
    )));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
