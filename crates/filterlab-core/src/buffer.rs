//! In-memory pixel buffer shared by every engine operation.
//!
//! A [`PixelBuffer`] is a flat, row-major sequence of 8-bit samples plus its
//! width, height and channel count. Pixel `(x, y)` channel `c` lives at
//! `(y * width + x) * channels + c`.
//!
//! Buffers are produced by a collaborator (camera, decoder, canvas) and are
//! never mutated by the engine: every operation borrows its input and returns
//! a freshly allocated buffer.

use crate::error::{EngineError, Result};
use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};

/// Number of interleaved samples per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelCount {
    /// Single plane (grayscale, or one HSV component).
    One,
    /// RGB or HSV.
    Three,
    /// RGBA.
    Four,
}

impl ChannelCount {
    /// Number of samples per pixel.
    #[inline]
    pub fn get(self) -> usize {
        match self {
            ChannelCount::One => 1,
            ChannelCount::Three => 3,
            ChannelCount::Four => 4,
        }
    }

    /// True when the buffer carries red, green and blue samples.
    #[inline]
    pub fn is_color(self) -> bool {
        !matches!(self, ChannelCount::One)
    }
}

impl TryFrom<usize> for ChannelCount {
    type Error = EngineError;

    fn try_from(value: usize) -> Result<Self> {
        match value {
            1 => Ok(ChannelCount::One),
            3 => Ok(ChannelCount::Three),
            4 => Ok(ChannelCount::Four),
            other => Err(EngineError::invalid(
                "channels",
                format!("must be 1, 3 or 4, got {other}"),
            )),
        }
    }
}

/// An 8-bit image held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: ChannelCount,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer, checking that `data` holds exactly
    /// `width * height * channels` samples.
    pub fn new(width: u32, height: u32, channels: ChannelCount, data: Vec<u8>) -> Result<Self> {
        let expected = sample_len(width, height, channels)?;
        if data.len() != expected {
            return Err(EngineError::DimensionMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Create a buffer filled with a single sample value.
    pub fn filled(width: u32, height: u32, channels: ChannelCount, value: u8) -> Self {
        Self {
            width,
            height,
            channels,
            data: vec![value; saturating_sample_len(width, height, channels)],
        }
    }

    /// Create a buffer from a per-pixel generator. `f` receives `(x, y)` and
    /// returns the samples of that pixel.
    pub fn from_fn<F>(width: u32, height: u32, channels: ChannelCount, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> [u8; 4],
    {
        let n = channels.get();
        let mut data = Vec::with_capacity(saturating_sample_len(width, height, channels));
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y)[..n]);
            }
        }
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// Internal constructor for buffers whose length is correct by
    /// construction.
    pub(crate) fn from_raw(width: u32, height: u32, channels: ChannelCount, data: Vec<u8>) -> Self {
        debug_assert_eq!(
            Ok(data.len()),
            sample_len(width, height, channels),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn channels(&self) -> ChannelCount {
        self.channels
    }

    /// Raw samples in row-major order.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer and return its samples.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// True if the buffer has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Sample offset of pixel `(x, y)`.
    #[inline]
    pub fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels.get()
    }

    /// Samples of pixel `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the image.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let idx = self.offset(x, y);
        &self.data[idx..idx + self.channels.get()]
    }

    /// Reject zero-size buffers and re-check the length invariant.
    pub fn ensure_valid(&self) -> Result<()> {
        if self.is_empty() {
            return Err(EngineError::EmptyInput);
        }
        let expected = sample_len(self.width, self.height, self.channels)?;
        if self.data.len() != expected {
            return Err(EngineError::DimensionMismatch {
                expected,
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    /// Convert a decoded `image` crate image. Images with alpha become
    /// 4-channel buffers, grayscale stays 1-channel, everything else is RGB.
    pub fn from_dynamic_image(img: DynamicImage) -> Self {
        match img {
            DynamicImage::ImageLuma8(gray) => Self::from_gray_image(gray),
            DynamicImage::ImageRgb8(rgb) => Self::from_rgb_image(rgb),
            DynamicImage::ImageRgba8(rgba) => Self::from_rgba_image(rgba),
            other if other.color().has_alpha() => Self::from_rgba_image(other.to_rgba8()),
            other => Self::from_rgb_image(other.to_rgb8()),
        }
    }

    pub fn from_gray_image(img: GrayImage) -> Self {
        let (width, height) = img.dimensions();
        Self::from_raw(width, height, ChannelCount::One, img.into_raw())
    }

    pub fn from_rgb_image(img: RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self::from_raw(width, height, ChannelCount::Three, img.into_raw())
    }

    pub fn from_rgba_image(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self::from_raw(width, height, ChannelCount::Four, img.into_raw())
    }

    /// Convert into an `image` crate image for encoding or display.
    pub fn into_dynamic_image(self) -> Result<DynamicImage> {
        let expected = sample_len(self.width, self.height, self.channels)?;
        let actual = self.data.len();
        let (w, h) = (self.width, self.height);
        let img = match self.channels {
            ChannelCount::One => GrayImage::from_raw(w, h, self.data).map(DynamicImage::from),
            ChannelCount::Three => RgbImage::from_raw(w, h, self.data).map(DynamicImage::from),
            ChannelCount::Four => RgbaImage::from_raw(w, h, self.data).map(DynamicImage::from),
        };
        img.ok_or(EngineError::DimensionMismatch { expected, actual })
    }
}

/// `width * height * channels`, or an error when that does not fit in
/// `usize` (32 bits on wasm32).
fn sample_len(width: u32, height: u32, channels: ChannelCount) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(channels.get()))
        .ok_or_else(|| {
            EngineError::invalid(
                "dimensions",
                format!("{width}x{height}x{} samples overflow usize", channels.get()),
            )
        })
}

/// Allocation size for the infallible constructors. An overflowing size
/// saturates so the allocation fails loudly instead of wrapping.
#[inline]
fn saturating_sample_len(width: u32, height: u32, channels: ChannelCount) -> usize {
    (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(channels.get())
}
