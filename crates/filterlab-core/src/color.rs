//! Color-space conversion and channel split/merge.
//!
//! HSV samples use the common 8-bit packing:
//! - `H` = hue in degrees / 2, so 0..=179
//! - `S` = 255 * chroma / max
//! - `V` = max(R, G, B)
//!
//! Split and merge are byte-for-byte copies, so
//! `merge_channels(&split_channels(x)?)? == x` holds exactly.

use crate::buffer::{ChannelCount, PixelBuffer};
use crate::error::{EngineError, Result};

/// Convert an RGB or RGBA buffer to a 3-channel `[H, S, V]` buffer.
///
/// Alpha, if present, is dropped.
pub fn rgb_to_hsv(buffer: &PixelBuffer) -> Result<PixelBuffer> {
    buffer.ensure_valid()?;
    if !buffer.channels().is_color() {
        return Err(EngineError::invalid(
            "buffer",
            "HSV conversion needs an RGB or RGBA image",
        ));
    }

    let mut out = Vec::with_capacity(buffer.pixel_count() * 3);
    for px in buffer.data().chunks_exact(buffer.channels().get()) {
        out.extend_from_slice(&rgb_to_hsv_pixel(px[0], px[1], px[2]));
    }
    Ok(PixelBuffer::from_raw(
        buffer.width(),
        buffer.height(),
        ChannelCount::Three,
        out,
    ))
}

/// Convert a 3-channel `[H, S, V]` buffer back to RGB.
pub fn hsv_to_rgb(buffer: &PixelBuffer) -> Result<PixelBuffer> {
    buffer.ensure_valid()?;
    if buffer.channels() != ChannelCount::Three {
        return Err(EngineError::invalid(
            "buffer",
            "RGB conversion needs a 3-channel HSV image",
        ));
    }

    let mut out = Vec::with_capacity(buffer.pixel_count() * 3);
    for px in buffer.data().chunks_exact(3) {
        out.extend_from_slice(&hsv_to_rgb_pixel(px[0], px[1], px[2]));
    }
    Ok(PixelBuffer::from_raw(
        buffer.width(),
        buffer.height(),
        ChannelCount::Three,
        out,
    ))
}

/// Split an interleaved buffer into one single-channel plane per channel.
pub fn split_channels(buffer: &PixelBuffer) -> Result<Vec<PixelBuffer>> {
    buffer.ensure_valid()?;
    let n = buffer.channels().get();
    let mut planes: Vec<Vec<u8>> = (0..n)
        .map(|_| Vec::with_capacity(buffer.pixel_count()))
        .collect();

    for px in buffer.data().chunks_exact(n) {
        for (plane, &sample) in planes.iter_mut().zip(px) {
            plane.push(sample);
        }
    }

    Ok(planes
        .into_iter()
        .map(|plane| {
            PixelBuffer::from_raw(buffer.width(), buffer.height(), ChannelCount::One, plane)
        })
        .collect())
}

/// Interleave single-channel planes into one buffer.
///
/// All planes must share the same dimensions; 1, 3 or 4 planes are accepted.
pub fn merge_channels(planes: &[PixelBuffer]) -> Result<PixelBuffer> {
    let first = planes.first().ok_or(EngineError::EmptyInput)?;
    let channels = ChannelCount::try_from(planes.len())?;
    let (width, height) = first.dimensions();

    for plane in planes {
        plane.ensure_valid()?;
        if plane.channels() != ChannelCount::One {
            return Err(EngineError::DimensionMismatch {
                expected: plane.pixel_count(),
                actual: plane.data().len(),
            });
        }
        if plane.dimensions() != (width, height) {
            return Err(EngineError::DimensionMismatch {
                expected: first.pixel_count(),
                actual: plane.pixel_count(),
            });
        }
    }

    let n = planes.len();
    let mut out = vec![0u8; first.pixel_count() * n];
    for (c, plane) in planes.iter().enumerate() {
        for (dst, &sample) in out.iter_mut().skip(c).step_by(n).zip(plane.data()) {
            *dst = sample;
        }
    }
    Ok(PixelBuffer::from_raw(width, height, channels, out))
}

/// Convert one RGB pixel to packed 8-bit HSV.
#[inline]
pub(crate) fn rgb_to_hsv_pixel(r: u8, g: u8, b: u8) -> [u8; 3] {
    let (rf, gf, bf) = (r as f32, g as f32, b as f32);
    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let s = if max > 0.0 { 255.0 * delta / max } else { 0.0 };

    let mut h = if delta == 0.0 {
        0.0
    } else if max == rf {
        60.0 * (gf - bf) / delta
    } else if max == gf {
        120.0 + 60.0 * (bf - rf) / delta
    } else {
        240.0 + 60.0 * (rf - gf) / delta
    };
    if h < 0.0 {
        h += 360.0;
    }

    let h8 = (h / 2.0).round() as u32 % 180;
    [h8 as u8, s.round().clamp(0.0, 255.0) as u8, max as u8]
}

/// Convert one packed 8-bit HSV pixel to RGB.
#[inline]
pub(crate) fn hsv_to_rgb_pixel(h: u8, s: u8, v: u8) -> [u8; 3] {
    let h = (h as f32 * 2.0).rem_euclid(360.0);
    let s = s as f32 / 255.0;
    let v = v as f32 / 255.0;

    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    [to_u8(r + m), to_u8(g + m), to_u8(b + m)]
}

#[inline]
fn to_u8(unit: f32) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}


// ============================================================================
// Property-Based Tests
// ============================================================================
