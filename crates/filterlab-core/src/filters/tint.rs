//! Per-pixel color filters.

use crate::buffer::{ChannelCount, PixelBuffer};
use crate::error::{EngineError, Result};
use crate::kernel::ColorMatrix;

/// Average the color channels into a single-channel image.
///
/// `gray = (R + G + B) / 3` with integer truncation (not luma-weighted).
/// A single-channel input is returned unchanged.
pub fn grayscale(buffer: &PixelBuffer) -> Result<PixelBuffer> {
    buffer.ensure_valid()?;
    let n = buffer.channels().get();
    if n == 1 {
        return Ok(buffer.clone());
    }

    let out = buffer
        .data()
        .chunks_exact(n)
        .map(|px| ((px[0] as u16 + px[1] as u16 + px[2] as u16) / 3) as u8)
        .collect();
    Ok(PixelBuffer::from_raw(
        buffer.width(),
        buffer.height(),
        ChannelCount::One,
        out,
    ))
}

/// Invert every color channel: `out = 255 - in`.
///
/// The alpha channel of an RGBA image passes through. Applying the filter
/// twice reproduces the input exactly.
pub fn negative(buffer: &PixelBuffer) -> Result<PixelBuffer> {
    buffer.ensure_valid()?;
    let mut out = buffer.data().to_vec();
    match buffer.channels() {
        ChannelCount::One | ChannelCount::Three => {
            out.iter_mut().for_each(|v| *v = 255 - *v);
        }
        ChannelCount::Four => {
            for px in out.chunks_exact_mut(4) {
                px[0] = 255 - px[0];
                px[1] = 255 - px[1];
                px[2] = 255 - px[2];
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

/// Apply the fixed sepia matrix to each pixel.
///
/// RGB input is treated as opaque and stays RGB; RGBA keeps its alpha.
pub fn sepia(buffer: &PixelBuffer) -> Result<PixelBuffer> {
    apply_color_matrix(buffer, &ColorMatrix::SEPIA)
}

/// Multiply every `[R, G, B, A]` pixel by `matrix`, clamping to `[0, 255]`.
pub(crate) fn apply_color_matrix(buffer: &PixelBuffer, matrix: &ColorMatrix) -> Result<PixelBuffer> {
    buffer.ensure_valid()?;
    let n = buffer.channels().get();
    if n == 1 {
        return Err(EngineError::invalid(
            "buffer",
            "color matrix needs an RGB or RGBA image",
        ));
    }

    let mut out = Vec::with_capacity(buffer.data().len());
    for px in buffer.data().chunks_exact(n) {
        let alpha = if n == 4 { px[3] as f32 } else { 255.0 };
        let result = matrix.apply([px[0] as f32, px[1] as f32, px[2] as f32, alpha]);
        out.extend(result[..n].iter().map(|v| v.round().clamp(0.0, 255.0) as u8));
    }
    Ok(PixelBuffer::from_raw(
        buffer.width(),
        buffer.height(),
        buffer.channels(),
        out,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::gradient;

    #[test]
    fn test_grayscale_truncates_average() {
        let buf = PixelBuffer::new(1, 1, ChannelCount::Three, vec![30, 60, 90]).unwrap();
        let gray = grayscale(&buf).unwrap();
        assert_eq!(gray.channels(), ChannelCount::One);
        assert_eq!(gray.data(), &[60]);

        // 1 + 1 + 2 = 4, 4 / 3 truncates to 1
        let buf = PixelBuffer::new(1, 1, ChannelCount::Three, vec![1, 1, 2]).unwrap();
        assert_eq!(grayscale(&buf).unwrap().data(), &[1]);
    }

    #[test]
    fn test_grayscale_no_overflow_on_white() {
        let buf = PixelBuffer::filled(2, 2, ChannelCount::Four, 255);
        let gray = grayscale(&buf).unwrap();
        assert!(gray.data().iter().all(|&v| v == 255));
    }

    #[test]
    fn test_grayscale_ignores_alpha() {
        let buf = PixelBuffer::new(1, 1, ChannelCount::Four, vec![90, 90, 90, 0]).unwrap();
        assert_eq!(grayscale(&buf).unwrap().data(), &[90]);
    }

    #[test]
    fn test_grayscale_of_gray_is_copy() {
        let buf = PixelBuffer::filled(3, 3, ChannelCount::One, 42);
        assert_eq!(grayscale(&buf).unwrap(), buf);
    }

    #[test]
    fn test_negative_white_to_black() {
        let buf = PixelBuffer::filled(4, 4, ChannelCount::Three, 255);
        let neg = negative(&buf).unwrap();
        assert_eq!(neg.dimensions(), (4, 4));
        assert!(neg.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_negative_keeps_alpha() {
        let buf = PixelBuffer::new(1, 1, ChannelCount::Four, vec![10, 20, 30, 200]).unwrap();
        assert_eq!(negative(&buf).unwrap().data(), &[245, 235, 225, 200]);
    }

    #[test]
    fn test_negative_does_not_touch_input() {
        let buf = gradient(8, 8);
        let before = buf.clone();
        let _ = negative(&buf).unwrap();
        assert_eq!(buf, before);
    }

    #[test]
    fn test_sepia_clamps_bright_pixels() {
        let buf = PixelBuffer::filled(2, 2, ChannelCount::Three, 255);
        let out = sepia(&buf).unwrap();
        assert_eq!(out.channels(), ChannelCount::Three);
        // 255 * 0.937 = 238.9
        assert_eq!(out.pixel(0, 0), &[255, 255, 239]);
    }

    #[test]
    fn test_sepia_known_pixel() {
        let buf = PixelBuffer::new(1, 1, ChannelCount::Four, vec![100, 50, 20, 128]).unwrap();
        let out = sepia(&buf).unwrap();
        // R: 39.3 + 38.45 + 3.78 = 81.53
        // G: 34.9 + 34.3 + 3.36 = 72.56
        // B: 27.2 + 26.7 + 2.62 = 56.52
        assert_eq!(out.data(), &[82, 73, 57, 128]);
    }

    #[test]
    fn test_sepia_black_stays_black() {
        let buf = PixelBuffer::filled(2, 1, ChannelCount::Three, 0);
        assert!(sepia(&buf).unwrap().data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_sepia_rejects_grayscale() {
        let buf = PixelBuffer::filled(2, 2, ChannelCount::One, 100);
        assert!(matches!(
            sepia(&buf),
            Err(EngineError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_empty_input_rejected() {
        let empty = PixelBuffer::new(0, 0, ChannelCount::Three, vec![]).unwrap();
        assert_eq!(grayscale(&empty), Err(EngineError::EmptyInput));
        assert_eq!(negative(&empty), Err(EngineError::EmptyInput));
        assert_eq!(sepia(&empty), Err(EngineError::EmptyInput));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
