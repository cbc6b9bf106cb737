//! Neighborhood filters: median and Gaussian blur.

use crate::buffer::{ChannelCount, PixelBuffer};
use crate::color::{hsv_to_rgb, merge_channels, rgb_to_hsv, split_channels};
use crate::error::Result;
use crate::kernel::{gaussian_kernel, validate_kernel_size, Kernel};

/// Replace each sample with the median of its `kernel_size × kernel_size`
/// neighborhood, channel by channel.
///
/// `kernel_size` must be odd and at least 3; the requested size is honored.
/// Borders use edge replication. Alpha is filtered like any other channel.
pub fn median_blur(buffer: &PixelBuffer, kernel_size: u32) -> Result<PixelBuffer> {
    buffer.ensure_valid()?;
    validate_kernel_size("kernel_size", kernel_size, 3)?;

    let (w, h) = (buffer.width() as i64, buffer.height() as i64);
    let n = buffer.channels().get();
    let radius = (kernel_size / 2) as i64;
    let src = buffer.data();

    let mut out = vec![0u8; src.len()];
    let mut window = Vec::with_capacity((kernel_size * kernel_size) as usize);

    for y in 0..h {
        for x in 0..w {
            let dst_idx = (y * w + x) as usize * n;
            for c in 0..n {
                window.clear();
                for dy in -radius..=radius {
                    let sy = (y + dy).clamp(0, h - 1);
                    for dx in -radius..=radius {
                        let sx = (x + dx).clamp(0, w - 1);
                        window.push(src[(sy * w + sx) as usize * n + c]);
                    }
                }
                let mid = window.len() / 2;
                let (_, median, _) = window.select_nth_unstable(mid);
                out[dst_idx + c] = *median;
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

/// Blur a color image in HSV space with a Gaussian kernel of side
/// `kernel_size` (odd, at least 1).
///
/// The image is converted to HSV, split into planes, each plane is convolved
/// independently, and the result is merged and converted back to RGB. Only
/// pixels whose full window fits inside the image are convolved; the border
/// band of width `kernel_size / 2` is zero in every HSV plane.
///
/// Single-channel images are convolved directly. The alpha channel of an
/// RGBA image is carried over unchanged.
pub fn gaussian_blur(buffer: &PixelBuffer, kernel_size: u32) -> Result<PixelBuffer> {
    buffer.ensure_valid()?;
    let kernel = gaussian_kernel(kernel_size)?;
    let (w, h) = buffer.dimensions();

    if buffer.channels() == ChannelCount::One {
        let plane = convolve_interior(buffer.data(), w as usize, h as usize, &kernel);
        return Ok(PixelBuffer::from_raw(w, h, ChannelCount::One, plane));
    }

    let hsv = rgb_to_hsv(buffer)?;
    let planes = split_channels(&hsv)?
        .iter()
        .map(|plane| {
            let blurred = convolve_interior(plane.data(), w as usize, h as usize, &kernel);
            PixelBuffer::from_raw(w, h, ChannelCount::One, blurred)
        })
        .collect::<Vec<_>>();
    let rgb = hsv_to_rgb(&merge_channels(&planes)?)?;

    if buffer.channels() == ChannelCount::Three {
        return Ok(rgb);
    }

    let mut out = Vec::with_capacity(buffer.data().len());
    for (color, src) in rgb.data().chunks_exact(3).zip(buffer.data().chunks_exact(4)) {
        out.extend_from_slice(color);
        out.push(src[3]);
    }
    Ok(PixelBuffer::from_raw(w, h, ChannelCount::Four, out))
}

/// Convolve a single plane, writing only pixels whose window lies fully
/// inside the image. Everything else stays zero.
fn convolve_interior(src: &[u8], width: usize, height: usize, kernel: &Kernel) -> Vec<u8> {
    let size = kernel.size();
    let middle = kernel.radius();
    let mut dest = vec![0u8; width * height];

    if width < size || height < size {
        return dest;
    }

    for i in middle..height - middle {
        for j in middle..width - middle {
            let mut sum = 0.0f64;
            for ki in 0..size {
                let row = (i + ki - middle) * width;
                for kj in 0..size {
                    sum += kernel.weight(ki, kj) * src[row + j + kj - middle] as f64;
                }
            }
            dest[i * width + j] = sum.round().clamp(0.0, 255.0) as u8;
        }
    }

    dest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::filters::test_support::gradient;

    #[test]
    fn test_median_constant_image_unchanged() {
        let buf = PixelBuffer::filled(6, 5, ChannelCount::Four, 77);
        assert_eq!(median_blur(&buf, 5).unwrap(), buf);
    }

    #[test]
    fn test_median_removes_outlier() {
        let mut data = vec![50u8; 7 * 7];
        data[3 * 7 + 3] = 255;
        let buf = PixelBuffer::new(7, 7, ChannelCount::One, data).unwrap();
        let out = median_blur(&buf, 3).unwrap();
        assert!(out.data().iter().all(|&v| v == 50));
    }

    #[test]
    fn test_median_honors_kernel_size() {
        // A 3-pixel-wide bright stripe survives a 3x3 median but not a 7x7 one.
        let buf = PixelBuffer::from_fn(9, 9, ChannelCount::One, |x, _| {
            [if (3..6).contains(&x) { 200 } else { 0 }, 0, 0, 0]
        });
        let small = median_blur(&buf, 3).unwrap();
        let large = median_blur(&buf, 7).unwrap();
        assert_eq!(small.pixel(4, 4), &[200]);
        assert_eq!(large.pixel(4, 4), &[0]);
    }

    #[test]
    fn test_median_replicates_edges() {
        // Top-left corner of a 3x3 window with clamped coordinates
        let buf = PixelBuffer::new(2, 2, ChannelCount::One, vec![10, 20, 30, 40]).unwrap();
        let out = median_blur(&buf, 3).unwrap();
        // Window at (0,0): 10,10,20,10,10,20,30,30,40 -> sorted median 20
        assert_eq!(out.pixel(0, 0), &[20]);
    }

    #[test]
    fn test_median_rejects_bad_sizes() {
        let buf = gradient(8, 8);
        assert!(matches!(
            median_blur(&buf, 4),
            Err(EngineError::InvalidParameter { .. })
        ));
        assert!(matches!(
            median_blur(&buf, 1),
            Err(EngineError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_gaussian_border_band_is_black() {
        let buf = PixelBuffer::filled(12, 10, ChannelCount::Three, 180);
        let out = gaussian_blur(&buf, 5).unwrap();
        assert_eq!(out.dimensions(), (12, 10));

        for y in 0..10 {
            for x in 0..12 {
                let border = x < 2 || y < 2 || x >= 10 || y >= 8;
                if border {
                    assert_eq!(out.pixel(x, y), &[0, 0, 0], "({}, {})", x, y);
                } else {
                    assert_eq!(out.pixel(x, y), &[180, 180, 180], "({}, {})", x, y);
                }
            }
        }
    }

    #[test]
    fn test_gaussian_interior_matches_weighted_average() {
        let buf = PixelBuffer::from_fn(9, 9, ChannelCount::One, |x, y| {
            [((x * 29 + y * 13) % 256) as u8, 0, 0, 0]
        });
        let kernel = gaussian_kernel(3).unwrap();
        let out = gaussian_blur(&buf, 3).unwrap();

        for y in 1..8u32 {
            for x in 1..8u32 {
                let mut expected = 0.0;
                for ki in 0..3u32 {
                    for kj in 0..3u32 {
                        let v = buf.pixel(x + kj - 1, y + ki - 1)[0] as f64;
                        expected += kernel.weight(ki as usize, kj as usize) * v;
                    }
                }
                let got = out.pixel(x, y)[0] as f64;
                assert!((got - expected).abs() <= 0.5 + 1e-9, "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_gaussian_color_blurs_each_hsv_plane() {
        use crate::color::{hsv_to_rgb_pixel, rgb_to_hsv_pixel};

        let buf = gradient(12, 10);
        let planes = split_channels(&rgb_to_hsv(&buf).unwrap()).unwrap();
        assert!(planes[0].data().iter().any(|&h| h != planes[0].data()[0]));
        assert!(planes[1].data().iter().any(|&s| s > 0));

        for size in [3u32, 5] {
            let kernel = gaussian_kernel(size).unwrap();
            let r = size / 2;
            let out = gaussian_blur(&buf, size).unwrap();
            assert_eq!(out.channels(), ChannelCount::Three);

            for y in 0..10u32 {
                for x in 0..12u32 {
                    if x < r || y < r || x >= 12 - r || y >= 10 - r {
                        assert_eq!(out.pixel(x, y), &[0, 0, 0], "k={} ({}, {})", size, x, y);
                        continue;
                    }
                    let mut hsv = [0u8; 3];
                    for (c, plane) in planes.iter().enumerate() {
                        let mut sum = 0.0f64;
                        for ki in 0..size {
                            for kj in 0..size {
                                let v = plane.pixel(x + kj - r, y + ki - r)[0] as f64;
                                sum += kernel.weight(ki as usize, kj as usize) * v;
                            }
                        }
                        hsv[c] = sum.round().clamp(0.0, 255.0) as u8;
                    }

                    let got = out.pixel(x, y);
                    assert_eq!(
                        got,
                        &hsv_to_rgb_pixel(hsv[0], hsv[1], hsv[2]),
                        "k={} ({}, {})",
                        size,
                        x,
                        y
                    );
                    let value = rgb_to_hsv_pixel(got[0], got[1], got[2])[2];
                    assert!(value.abs_diff(hsv[2]) <= 1, "k={} ({}, {})", size, x, y);
                }
            }
        }
    }

    #[test]
    fn test_gaussian_small_image_all_zero() {
        let buf = PixelBuffer::filled(4, 4, ChannelCount::One, 99);
        let out = gaussian_blur(&buf, 15).unwrap();
        assert!(out.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_gaussian_keeps_alpha() {
        let buf = PixelBuffer::filled(8, 8, ChannelCount::Four, 120);
        let out = gaussian_blur(&buf, 3).unwrap();
        assert_eq!(out.channels(), ChannelCount::Four);
        assert_eq!(out.pixel(0, 0), &[0, 0, 0, 120]);
        assert_eq!(out.pixel(4, 4), &[120, 120, 120, 120]);
    }

    #[test]
    fn test_gaussian_rejects_even_kernel() {
        let buf = gradient(8, 8);
        assert!(matches!(
            gaussian_blur(&buf, 6),
            Err(EngineError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_empty_input_rejected() {
        let empty = PixelBuffer::new(5, 0, ChannelCount::Three, vec![]).unwrap();
        assert_eq!(median_blur(&empty, 5), Err(EngineError::EmptyInput));
        assert_eq!(gaussian_blur(&empty, 5), Err(EngineError::EmptyInput));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
