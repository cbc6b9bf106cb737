//! WASM bindings for the filter dispatcher.
//!
//! Filter and modification tags arrive as strings (`"sepia"`, `"rotate"`).
//! Settings arrive as an optional object with camelCase keys; missing keys
//! keep their defaults.

use crate::types::{js_warning, to_js_error, to_js_result, JsPixelBuffer};
use filterlab_core::{
    EngineError, FilterKind, FilterSettings, FlipAxis, InterpolationFilter, ModificationKind,
};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

/// Helper struct for deserializing JS filter settings via serde.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct FilterSettingsJs {
    median_kernel: Option<u32>,
    gaussian_kernel: Option<u32>,
    rotation_degrees: Option<f64>,
    flip_axis: Option<String>,
    interpolation: Option<String>,
}

impl FilterSettingsJs {
    fn into_settings(self) -> Result<FilterSettings, EngineError> {
        let defaults = FilterSettings::default();
        let settings = FilterSettings {
            median_kernel: self.median_kernel.unwrap_or(defaults.median_kernel),
            gaussian_kernel: self.gaussian_kernel.unwrap_or(defaults.gaussian_kernel),
            rotation_degrees: self.rotation_degrees.unwrap_or(defaults.rotation_degrees),
            flip_axis: match self.flip_axis {
                Some(axis) => axis.parse::<FlipAxis>()?,
                None => defaults.flip_axis,
            },
            interpolation: match self.interpolation {
                Some(filter) => filter.parse::<InterpolationFilter>()?,
                None => defaults.interpolation,
            },
        };
        settings.validate()?;
        Ok(settings)
    }
}

fn decode_settings(settings: JsValue) -> Result<FilterSettings, JsValue> {
    if settings.is_undefined() || settings.is_null() {
        return Ok(FilterSettings::default());
    }
    let settings: FilterSettingsJs = serde_wasm_bindgen::from_value(settings)
        .map_err(|e| js_warning(&format!("Invalid filter settings: {}", e)))?;
    settings.into_settings().map_err(to_js_error)
}

fn decode_tag(tag: JsValue) -> Result<String, JsValue> {
    serde_wasm_bindgen::from_value(tag)
        .map_err(|e| js_warning(&format!("Expected an operation name: {}", e)))
}

/// Apply a color filter.
///
/// # Arguments
///
/// * `image` - Source image
/// * `kind` - One of `"grayscale"`, `"negative"`, `"median"`, `"gaussian"`, `"sepia"`
/// * `settings` - Optional `{ medianKernel, gaussianKernel }` overrides
///
/// # Example (TypeScript)
///
/// ```typescript
/// const blurred = apply_filter(image, "gaussian", { gaussianKernel: 9 });
/// ```
#[wasm_bindgen]
pub fn apply_filter(
    image: &JsPixelBuffer,
    kind: JsValue,
    settings: JsValue,
) -> Result<JsPixelBuffer, JsValue> {
    let kind: FilterKind = decode_tag(kind)?.parse().map_err(to_js_error)?;
    let settings = decode_settings(settings)?;
    to_js_result(filterlab_core::apply_filter(kind, image.buffer(), &settings))
}

/// Apply a geometric modification.
///
/// `kind` is `"rotate"` or `"flip"`. `settings` may carry `rotationDegrees`,
/// `interpolation` (`"nearest"` or `"bilinear"`) and `flipAxis`
/// (`"horizontal"`, `"vertical"` or `"both"`).
#[wasm_bindgen]
pub fn apply_modification(
    image: &JsPixelBuffer,
    kind: JsValue,
    settings: JsValue,
) -> Result<JsPixelBuffer, JsValue> {
    let kind: ModificationKind = decode_tag(kind)?.parse().map_err(to_js_error)?;
    let settings = decode_settings(settings)?;
    to_js_result(filterlab_core::apply_modification(
        kind,
        image.buffer(),
        &settings,
    ))
}

/// Whether a filter is slow enough to run in a Web Worker.
#[wasm_bindgen]
pub fn is_expensive_filter(kind: &str) -> bool {
    kind.parse::<FilterKind>()
        .map(FilterKind::is_expensive)
        .unwrap_or(false)
}
