//! Image rotation on a fixed canvas.
//!
//! The rotation uses inverse mapping: for each pixel in the output image we
//! compute the source position and sample it. With `(cx, cy)` the center of
//! the pixel grid, `((w - 1) / 2, (h - 1) / 2)`, and θ the counter-clockwise
//! angle:
//! ```text
//! src_x = (dst_x - cx) * cos(θ) - (dst_y - cy) * sin(θ) + cx
//! src_y = (dst_x - cx) * sin(θ) + (dst_y - cy) * cos(θ) + cy
//! ```
//! The output has the same width and height as the input. Content rotated
//! off the canvas is clipped; exposed corners are filled with zero
//! (transparent black for RGBA).
//!
//! Using the pixel-grid center means quarter turns of a square image map
//! pixels onto pixels exactly.

use crate::buffer::PixelBuffer;
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Slack allowed when a source coordinate lands just outside the image
/// because of floating-point error in `sin`/`cos`.
const EDGE_EPSILON: f64 = 1e-6;

/// Interpolation filter for rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterpolationFilter {
    /// Nearest source pixel. Lossless for quarter turns.
    Nearest,
    /// Weighted average of the four nearest pixels.
    #[default]
    Bilinear,
}

impl FromStr for InterpolationFilter {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(InterpolationFilter::Nearest),
            "bilinear" => Ok(InterpolationFilter::Bilinear),
            _ => Err(EngineError::invalid(
                "interpolation",
                format!("unknown filter `{s}`"),
            )),
        }
    }
}

/// Rotate `buffer` about its center by `angle_degrees` (counter-clockwise).
///
/// The canvas keeps its size. Angles that are whole turns return a copy.
pub fn rotate(
    buffer: &PixelBuffer,
    angle_degrees: f64,
    filter: InterpolationFilter,
) -> Result<PixelBuffer> {
    buffer.ensure_valid()?;
    if !angle_degrees.is_finite() {
        return Err(EngineError::invalid(
            "angle_degrees",
            format!("must be finite, got {angle_degrees}"),
        ));
    }

    // Fast path: whole turns
    let normalized = angle_degrees.rem_euclid(360.0);
    if normalized < 0.001 || 360.0 - normalized < 0.001 {
        return Ok(buffer.clone());
    }

    let (w, h) = buffer.dimensions();
    let n = buffer.channels().get();
    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();
    let cx = (w as f64 - 1.0) / 2.0;
    let cy = (h as f64 - 1.0) / 2.0;

    let mut output = vec![0u8; buffer.data().len()];

    for dst_y in 0..h {
        for dst_x in 0..w {
            let dx = dst_x as f64 - cx;
            let dy = dst_y as f64 - cy;

            let src_x = dx * cos - dy * sin + cx;
            let src_y = dx * sin + dy * cos + cy;

            let pixel = match filter {
                InterpolationFilter::Nearest => sample_nearest(buffer, src_x, src_y),
                InterpolationFilter::Bilinear => sample_bilinear(buffer, src_x, src_y),
            };

            if let Some(pixel) = pixel {
                let dst_idx = buffer.offset(dst_x, dst_y);
                output[dst_idx..dst_idx + n].copy_from_slice(&pixel[..n]);
            }
        }
    }

    Ok(PixelBuffer::from_raw(w, h, buffer.channels(), output))
}

/// Clamp a coordinate that is inside `[0, max]` up to [`EDGE_EPSILON`].
#[inline]
fn in_bounds(v: f64, max: f64) -> Option<f64> {
    if v < -EDGE_EPSILON || v > max + EDGE_EPSILON {
        None
    } else {
        Some(v.clamp(0.0, max))
    }
}

fn sample_nearest(image: &PixelBuffer, x: f64, y: f64) -> Option<[u8; 4]> {
    let x = in_bounds(x, image.width() as f64 - 1.0)?.round() as u32;
    let y = in_bounds(y, image.height() as f64 - 1.0)?.round() as u32;

    let mut result = [0u8; 4];
    let px = image.pixel(x, y);
    result[..px.len()].copy_from_slice(px);
    Some(result)
}

/// Sample a pixel using bilinear interpolation. Returns `None` outside the
/// image.
fn sample_bilinear(image: &PixelBuffer, x: f64, y: f64) -> Option<[u8; 4]> {
    let (w, h) = image.dimensions();
    let x = in_bounds(x, w as f64 - 1.0)?;
    let y = in_bounds(y, h as f64 - 1.0)?;

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(w - 1);
    let y1 = (y0 + 1).min(h - 1);

    // Fractional distances
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = image.pixel(x0, y0);
    let p10 = image.pixel(x1, y0);
    let p01 = image.pixel(x0, y1);
    let p11 = image.pixel(x1, y1);

    let mut result = [0u8; 4];
    for i in 0..p00.len() {
        let v = p00[i] as f64 * (1.0 - fx) * (1.0 - fy)
            + p10[i] as f64 * fx * (1.0 - fy)
            + p01[i] as f64 * (1.0 - fx) * fy
            + p11[i] as f64 * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    Some(result)
}
