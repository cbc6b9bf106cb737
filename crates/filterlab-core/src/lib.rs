//! Filterlab Core - pixel-transform engine
//!
//! This crate provides deterministic, stateless image operations over an
//! in-memory [`PixelBuffer`]: color filters, tone adjustments and geometric
//! transforms, plus the editor-state reducer and background worker that drive
//! them from a UI.
//!
//! Every operation borrows its input and returns a new buffer, so calls are
//! safe to run concurrently on independent images.

pub mod buffer;
pub mod color;
pub mod dispatch;
pub mod error;
pub mod filters;
pub mod kernel;
pub mod state;
pub mod tone;
pub mod transform;
#[cfg(feature = "worker")]
pub mod worker;

pub use buffer::{ChannelCount, PixelBuffer};
pub use dispatch::{apply_filter, apply_modification, FilterKind, ModificationKind};
pub use error::{EngineError, Result};
pub use state::{reduce, EditorState, Event};
pub use tone::{adjust_brightness, adjust_contrast, adjust_tone};
pub use transform::{crop, flip, rotate, CropRect, FlipAxis, InterpolationFilter};
#[cfg(feature = "worker")]
pub use worker::{FilterTask, FilterWorker};

use kernel::validate_kernel_size;

/// Contrast and brightness applied to the original image.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToneParams {
    /// Contrast multiplier (0.5 to 2.0)
    pub contrast: f32,
    /// Brightness offset as a fraction of full scale (-1.0 to 1.0)
    pub brightness: f32,
}

impl Default for ToneParams {
    fn default() -> Self {
        Self {
            contrast: 1.0,
            brightness: 0.0,
        }
    }
}

impl ToneParams {
    /// Create tone params with identity values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if both values are at their identity defaults
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Check that both values lie in their documented ranges.
    pub fn validate(&self) -> Result<()> {
        tone::validate_contrast(self.contrast)?;
        tone::validate_brightness(self.brightness)
    }
}

/// Parameters for the operations the dispatcher routes to.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Median window side (odd, at least 3)
    pub median_kernel: u32,
    /// Gaussian kernel side (odd, at least 1)
    pub gaussian_kernel: u32,
    /// Rotation applied by [`ModificationKind::Rotate`], counter-clockwise degrees
    pub rotation_degrees: f64,
    /// Axis used by [`ModificationKind::Flip`]
    pub flip_axis: FlipAxis,
    /// Sampling used for rotation
    pub interpolation: InterpolationFilter,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            median_kernel: 5,
            gaussian_kernel: 15,
            rotation_degrees: 90.0,
            flip_axis: FlipAxis::Horizontal,
            interpolation: InterpolationFilter::Bilinear,
        }
    }
}

impl FilterSettings {
    /// Create settings with the default kernel sizes and a 90° rotation
    pub fn new() -> Self {
        Self::default()
    }

    /// Check kernel sizes and rotation angle.
    pub fn validate(&self) -> Result<()> {
        validate_kernel_size("median_kernel", self.median_kernel, 3)?;
        validate_kernel_size("gaussian_kernel", self.gaussian_kernel, 1)?;
        if !self.rotation_degrees.is_finite() {
            return Err(EngineError::invalid(
                "rotation_degrees",
                format!("must be finite, got {}", self.rotation_degrees),
            ));
        }
        Ok(())
    }
}
