//! Convolution kernels and fixed color-transform matrices.

use crate::error::{EngineError, Result};

/// A square, normalized convolution kernel.
///
/// Weights are stored row-major; `size` is always odd.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f64>,
}

impl Kernel {
    /// Side length of the kernel.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance from the center to an edge (`size / 2`).
    #[inline]
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    /// Weight at `(row, col)`.
    #[inline]
    pub fn weight(&self, row: usize, col: usize) -> f64 {
        self.weights[row * self.size + col]
    }

    /// All weights, row-major.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Sum of all weights (1.0 up to floating-point error).
    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }
}

/// Build a normalized 2D Gaussian kernel of side `size`.
///
/// The weight at `(i, j)` is
/// ```text
/// exp(-((i-m)² + (j-m)²) / (2σ²)) / (2πσ²),  m = size/2,  σ = size/6
/// ```
/// divided by the sum of all weights.
pub fn gaussian_kernel(size: u32) -> Result<Kernel> {
    validate_kernel_size("kernel_size", size, 1)?;

    let size = size as usize;
    let middle = (size / 2) as f64;
    let sigma = size as f64 / 6.0;
    let two_sigma_sq = 2.0 * sigma * sigma;
    let norm = std::f64::consts::PI * two_sigma_sq;

    let mut weights = Vec::with_capacity(size * size);
    for i in 0..size {
        for j in 0..size {
            let di = i as f64 - middle;
            let dj = j as f64 - middle;
            weights.push((-(di * di + dj * dj) / two_sigma_sq).exp() / norm);
        }
    }

    let sum: f64 = weights.iter().sum();
    for w in weights.iter_mut() {
        *w /= sum;
    }

    Ok(Kernel { size, weights })
}

/// Check that a window size is odd and at least `min`.
pub(crate) fn validate_kernel_size(name: &'static str, size: u32, min: u32) -> Result<()> {
    if size < min {
        return Err(EngineError::invalid(
            name,
            format!("must be at least {min}, got {size}"),
        ));
    }
    if size % 2 == 0 {
        return Err(EngineError::invalid(
            name,
            format!("must be odd, got {size}"),
        ));
    }
    Ok(())
}

/// A 4×4 matrix applied to `[R, G, B, A]` column vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix(pub [[f32; 4]; 4]);

impl ColorMatrix {
    /// Leaves every channel unchanged.
    pub const IDENTITY: ColorMatrix = ColorMatrix([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    /// Classic warm-brown sepia tone. Alpha passes through.
    pub const SEPIA: ColorMatrix = ColorMatrix([
        [0.393, 0.769, 0.189, 0.0],
        [0.349, 0.686, 0.168, 0.0],
        [0.272, 0.534, 0.131, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    /// Matrix-vector product. The result is not clamped.
    #[inline]
    pub fn apply(&self, px: [f32; 4]) -> [f32; 4] {
        let mut out = [0.0f32; 4];
        for (o, row) in out.iter_mut().zip(self.0.iter()) {
            *o = row[0] * px[0] + row[1] * px[1] + row[2] * px[2] + row[3] * px[3];
        }
        out
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
