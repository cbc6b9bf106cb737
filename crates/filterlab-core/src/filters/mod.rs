//! Color filters: grayscale, negative, sepia, median and Gaussian blur.
//!
//! Every filter borrows its input and returns a new [`PixelBuffer`]. Zero-size
//! input fails with [`EngineError::EmptyInput`](crate::EngineError::EmptyInput).
//!
//! # Border policies
//!
//! - **Median**: edge replication. Window coordinates are clamped to the
//!   image, so border pixels are filtered like interior ones.
//! - **Gaussian**: only pixels whose full `k×k` window lies inside the image
//!   are convolved. The band of width `k/2` along every edge is left at zero
//!   in each HSV plane, which renders as a black frame.

mod blur;
mod tint;

pub use blur::{gaussian_blur, median_blur};
pub use tint::{grayscale, negative, sepia};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::buffer::{ChannelCount, PixelBuffer};

    /// RGB gradient where every pixel differs from its neighbours.
    pub fn gradient(width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::from_fn(width, height, ChannelCount::Three, |x, y| {
            [
                ((x * 255) / width.max(1)) as u8,
                ((y * 255) / height.max(1)) as u8,
                ((x + y) * 8 % 256) as u8,
                255,
            ]
        })
    }
}
