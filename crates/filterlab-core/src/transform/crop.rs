//! Rectangular crop in pixel coordinates.

use crate::buffer::PixelBuffer;
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// A pixel rectangle. `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Copy the pixels inside `rect` into a new buffer.
///
/// The rectangle must be non-empty and lie entirely inside the image.
///
/// # Example
///
/// ```ignore
/// let region = crop(&image, CropRect::new(10, 10, 64, 48))?;
/// assert_eq!(region.dimensions(), (64, 48));
/// ```
pub fn crop(buffer: &PixelBuffer, rect: CropRect) -> Result<PixelBuffer> {
    buffer.ensure_valid()?;

    if rect.width == 0 || rect.height == 0 {
        return Err(EngineError::invalid(
            "rect",
            format!("must be non-empty, got {}x{}", rect.width, rect.height),
        ));
    }
    let right = rect.x.checked_add(rect.width);
    let bottom = rect.y.checked_add(rect.height);
    let fits = matches!((right, bottom), (Some(r), Some(b)) if r <= buffer.width() && b <= buffer.height());
    if !fits {
        return Err(EngineError::invalid(
            "rect",
            format!(
                "{}x{} at ({}, {}) exceeds {}x{} image",
                rect.width,
                rect.height,
                rect.x,
                rect.y,
                buffer.width(),
                buffer.height()
            ),
        ));
    }

    // Fast path: full crop returns a clone
    if rect.width == buffer.width() && rect.height == buffer.height() {
        return Ok(buffer.clone());
    }

    let n = buffer.channels().get();
    let row_bytes = rect.width as usize * n;
    let mut output = Vec::with_capacity(row_bytes * rect.height as usize);

    // Copy pixel data row by row
    for y in rect.y..rect.y + rect.height {
        let start = buffer.offset(rect.x, y);
        output.extend_from_slice(&buffer.data()[start..start + row_bytes]);
    }

    Ok(PixelBuffer::from_raw(
        rect.width,
        rect.height,
        buffer.channels(),
        output,
    ))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
