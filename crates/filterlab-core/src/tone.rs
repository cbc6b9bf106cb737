//! Linear tone adjustments: contrast and brightness.
//!
//! Both adjustments are meant to be computed from the unmodified source image,
//! never from an already-adjusted one, so repeated slider moves do not
//! accumulate.
//!
//! Formula per color sample: `out = clamp(round(in * contrast + brightness * 255), 0, 255)`.
//! The alpha channel of RGBA images passes through.

use crate::buffer::{ChannelCount, PixelBuffer};
use crate::error::{EngineError, Result};
use crate::ToneParams;

/// Allowed contrast multipliers.
pub const CONTRAST_RANGE: (f32, f32) = (0.5, 2.0);

/// Allowed brightness offsets, as a fraction of full scale.
pub const BRIGHTNESS_RANGE: (f32, f32) = (-1.0, 1.0);

/// Scale every color sample by `contrast`. Identity at `1.0`.
pub fn adjust_contrast(buffer: &PixelBuffer, contrast: f32) -> Result<PixelBuffer> {
    validate_contrast(contrast)?;
    apply_linear(buffer, contrast, 0.0)
}

/// Offset every color sample by `brightness * 255`. Identity at `0.0`.
pub fn adjust_brightness(buffer: &PixelBuffer, brightness: f32) -> Result<PixelBuffer> {
    validate_brightness(brightness)?;
    apply_linear(buffer, 1.0, brightness)
}

/// Apply contrast and brightness in a single pass.
pub fn adjust_tone(buffer: &PixelBuffer, params: &ToneParams) -> Result<PixelBuffer> {
    params.validate()?;
    apply_linear(buffer, params.contrast, params.brightness)
}

pub(crate) fn validate_contrast(contrast: f32) -> Result<()> {
    let (lo, hi) = CONTRAST_RANGE;
    if !(lo..=hi).contains(&contrast) {
        return Err(EngineError::invalid(
            "contrast",
            format!("must be in [{lo}, {hi}], got {contrast}"),
        ));
    }
    Ok(())
}

pub(crate) fn validate_brightness(brightness: f32) -> Result<()> {
    let (lo, hi) = BRIGHTNESS_RANGE;
    if !(lo..=hi).contains(&brightness) {
        return Err(EngineError::invalid(
            "brightness",
            format!("must be in [{lo}, {hi}], got {brightness}"),
        ));
    }
    Ok(())
}

fn apply_linear(buffer: &PixelBuffer, contrast: f32, brightness: f32) -> Result<PixelBuffer> {
    buffer.ensure_valid()?;

    // Precompute the 256-entry mapping; every sample goes through the same curve.
    let offset = brightness * 255.0;
    let mut lut = [0u8; 256];
    for (i, slot) in lut.iter_mut().enumerate() {
        *slot = (i as f32 * contrast + offset).round().clamp(0.0, 255.0) as u8;
    }

    let mut out = buffer.data().to_vec();
    match buffer.channels() {
        ChannelCount::One | ChannelCount::Three => {
            out.iter_mut().for_each(|v| *v = lut[*v as usize]);
        }
        ChannelCount::Four => {
            for px in out.chunks_exact_mut(4) {
                for v in &mut px[..3] {
                    *v = lut[*v as usize];
                }
            }
        }
    }

    Ok(PixelBuffer::from_raw(
        buffer.width(),
        buffer.height(),
        buffer.channels(),
        out,
    ))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
