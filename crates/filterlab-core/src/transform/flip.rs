//! Mirror images along an axis.

use crate::buffer::PixelBuffer;
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Axis to mirror along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FlipAxis {
    /// Left-right mirror.
    #[default]
    Horizontal,
    /// Top-bottom mirror.
    Vertical,
    /// Both axes (same as a half turn).
    Both,
}

impl FlipAxis {
    fn mirrors_columns(self) -> bool {
        matches!(self, FlipAxis::Horizontal | FlipAxis::Both)
    }

    fn mirrors_rows(self) -> bool {
        matches!(self, FlipAxis::Vertical | FlipAxis::Both)
    }
}

impl FromStr for FlipAxis {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" => Ok(FlipAxis::Horizontal),
            "vertical" => Ok(FlipAxis::Vertical),
            "both" => Ok(FlipAxis::Both),
            _ => Err(EngineError::invalid("flip_axis", format!("unknown axis `{s}`"))),
        }
    }
}

/// Mirror `buffer` along `axis`. Flipping twice on the same axis restores
/// the input exactly.
pub fn flip(buffer: &PixelBuffer, axis: FlipAxis) -> Result<PixelBuffer> {
    buffer.ensure_valid()?;

    let (w, h) = (buffer.width() as usize, buffer.height() as usize);
    let n = buffer.channels().get();
    let row_len = w * n;
    let src = buffer.data();
    let mut output = Vec::with_capacity(src.len());

    for y in 0..h {
        let src_y = if axis.mirrors_rows() { h - 1 - y } else { y };
        let row = &src[src_y * row_len..(src_y + 1) * row_len];
        if axis.mirrors_columns() {
            for px in row.chunks_exact(n).rev() {
                output.extend_from_slice(px);
            }
        } else {
            output.extend_from_slice(row);
        }
    }

    Ok(PixelBuffer::from_raw(
        buffer.width(),
        buffer.height(),
        buffer.channels(),
        output,
    ))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
