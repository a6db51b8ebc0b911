use crate::math::matrix::MatrixHelper;
use ndarray::{Array1, Array2};
use std::f32::consts::PI;

/// Symmetric Hann window `0.5 - 0.5 cos(2 pi n / (M - 1))`.
///
/// A single-point window is `[1.0]`, an empty one stays empty.
pub fn hann(size: usize) -> Array1<f32> {
    if size == 1 {
        return Array1::ones(1);
    }
    let denom = size.saturating_sub(1) as f32;
    Array1::from_shape_fn(size, |n| 0.5 - 0.5 * (2.0 * PI * n as f32 / denom).cos())
}

/// Separable 2-D Hann window shaped `[samples, chirps]`.
pub fn hann_2d(samples: usize, chirps: usize) -> Array2<f32> {
    MatrixHelper::outer(hann(samples).view(), hann(chirps).view())
}
