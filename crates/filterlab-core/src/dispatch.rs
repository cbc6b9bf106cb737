//! Route a requested operation to the engine function that implements it.
//!
//! Both tag sets are closed enums matched without a wildcard arm, so adding a
//! variant forces every routing site to handle it.

use crate::buffer::PixelBuffer;
use crate::error::{EngineError, Result};
use crate::filters::{gaussian_blur, grayscale, median_blur, negative, sepia};
use crate::transform::{flip, rotate};
use crate::FilterSettings;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Color filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Grayscale,
    Negative,
    Median,
    Gaussian,
    Sepia,
}

impl FilterKind {
    pub const ALL: [FilterKind; 5] = [
        FilterKind::Grayscale,
        FilterKind::Negative,
        FilterKind::Median,
        FilterKind::Gaussian,
        FilterKind::Sepia,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FilterKind::Grayscale => "grayscale",
            FilterKind::Negative => "negative",
            FilterKind::Median => "median",
            FilterKind::Gaussian => "gaussian",
            FilterKind::Sepia => "sepia",
        }
    }

    /// Filters slow enough that callers should run them off the UI thread.
    pub fn is_expensive(self) -> bool {
        match self {
            FilterKind::Median | FilterKind::Gaussian => true,
            FilterKind::Grayscale | FilterKind::Negative | FilterKind::Sepia => false,
        }
    }
}

/// Geometric modifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModificationKind {
    Rotate,
    Flip,
}

impl ModificationKind {
    pub const ALL: [ModificationKind; 2] = [ModificationKind::Rotate, ModificationKind::Flip];

    pub fn name(self) -> &'static str {
        match self {
            ModificationKind::Rotate => "rotate",
            ModificationKind::Flip => "flip",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for ModificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        FilterKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EngineError::invalid("filter", format!("unknown filter `{s}`")))
    }
}

impl FromStr for ModificationKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        ModificationKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                EngineError::invalid("modification", format!("unknown modification `{s}`"))
            })
    }
}

/// Run the color filter `kind` on `buffer`.
///
/// Kernel sizes come from `settings` (median 5 and Gaussian 15 by default).
pub fn apply_filter(
    kind: FilterKind,
    buffer: &PixelBuffer,
    settings: &FilterSettings,
) -> Result<PixelBuffer> {
    log::debug!(
        "applying {} filter to {}x{} image",
        kind,
        buffer.width(),
        buffer.height()
    );
    match kind {
        FilterKind::Grayscale => grayscale(buffer),
        FilterKind::Negative => negative(buffer),
        FilterKind::Median => median_blur(buffer, settings.median_kernel),
        FilterKind::Gaussian => gaussian_blur(buffer, settings.gaussian_kernel),
        FilterKind::Sepia => sepia(buffer),
    }
}

/// Run the geometric modification `kind` on `buffer`.
///
/// Rotation uses `settings.rotation_degrees` (90° by default) and flip uses
/// `settings.flip_axis` (horizontal by default).
pub fn apply_modification(
    kind: ModificationKind,
    buffer: &PixelBuffer,
    settings: &FilterSettings,
) -> Result<PixelBuffer> {
    log::debug!(
        "applying {} to {}x{} image",
        kind,
        buffer.width(),
        buffer.height()
    );
    match kind {
        ModificationKind::Rotate => rotate(buffer, settings.rotation_degrees, settings.interpolation),
        ModificationKind::Flip => flip(buffer, settings.flip_axis),
    }
}
