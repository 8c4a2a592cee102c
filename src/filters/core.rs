//! Core utilities shared by the layer effects.
//!
//! This module provides the raster primitives every effect is built from:
//! - Gaussian kernel generation and separable alpha blur
//! - Euclidean dilation of coverage masks
//! - Integer translation of masks
//! - Porter-Duff "over" blending
//!
//! Masks are `Array2<f32>` in 0.0-1.0, rasters are `Array3<f32>` shaped
//! `(height, width, 4)` with straight (non-premultiplied) alpha.

use ndarray::Array2;
use rayon::prelude::*;

/// Generate a 1D Gaussian kernel.
///
/// # Arguments
/// * `sigma` - Standard deviation of the Gaussian
///
/// # Returns
/// Normalized odd-length kernel. `sigma <= 0` yields the identity kernel `[1.0]`.
pub fn gaussian_kernel_1d(sigma: f32) -> Vec<f32> {
    if sigma <= 0.0 {
        return vec![1.0];
    }

    // 6 sigma covers 99.7% of the distribution; force odd length
    let kernel_size = ((sigma * 6.0).ceil() as usize) | 1;
    let half = (kernel_size / 2) as f32;
    let denom = 2.0 * sigma * sigma;

    let mut kernel: Vec<f32> = (0..kernel_size)
        .map(|i| {
            let x = i as f32 - half;
            (-x * x / denom).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    kernel.iter_mut().for_each(|v| *v /= sum);
    kernel
}

/// Standard deviation used for a blur of the given extent.
///
/// The style's blur radius is the visible reach of the blur, which is about
/// three standard deviations.
#[inline]
pub fn sigma_for_radius(radius: f32) -> f32 {
    radius / 3.0
}

/// Apply separable Gaussian blur to a single-channel mask.
///
/// Horizontal pass first, then vertical. Samples past the border are
/// clamped to the edge pixel. Rows are processed in parallel; every output
/// value depends only on the immutable input, so results are identical to
/// a sequential run.
pub fn blur_alpha_f32(alpha: &Array2<f32>, sigma: f32) -> Array2<f32> {
    let (height, width) = alpha.dim();
    if sigma <= 0.0 || height == 0 || width == 0 {
        return alpha.clone();
    }

    let kernel = gaussian_kernel_1d(sigma);
    let half = (kernel.len() / 2) as isize;
    let src: Vec<f32> = alpha.iter().copied().collect();

    // Horizontal pass
    let mut temp = vec![0.0f32; height * width];
    temp.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        let src_row = &src[y * width..(y + 1) * width];
        for (x, out) in row.iter_mut().enumerate() {
            let mut sum = 0.0f32;
            for (ki, &kv) in kernel.iter().enumerate() {
                let sx = (x as isize + ki as isize - half).clamp(0, width as isize - 1) as usize;
                sum += src_row[sx] * kv;
            }
            *out = sum;
        }
    });

    // Vertical pass
    let mut result = Array2::<f32>::zeros((height, width));
    if let Some(buf) = result.as_slice_mut() {
        buf.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
            for (x, out) in row.iter_mut().enumerate() {
                let mut sum = 0.0f32;
                for (ki, &kv) in kernel.iter().enumerate() {
                    let sy = (y as isize + ki as isize - half).clamp(0, height as isize - 1) as usize;
                    sum += temp[sy * width + x] * kv;
                }
                *out = sum.clamp(0.0, 1.0);
            }
        });
    }

    result
}

/// Dilate a coverage mask by `radius` pixels using a Euclidean disk.
///
/// Every pixel within `radius` of a covered pixel takes that pixel's
/// coverage. Pixels between `radius` and `radius + 1` receive a linearly
/// falling share so the outline edge stays anti-aliased.
pub fn dilate_alpha(alpha: &Array2<f32>, radius: f32) -> Array2<f32> {
    let (height, width) = alpha.dim();
    if radius <= 0.0 || height == 0 || width == 0 {
        return alpha.clone();
    }

    // Structuring element: (dx, dy, weight), strongest first for early exit
    let reach = radius.ceil() as isize + 1;
    let mut element: Vec<(isize, isize, f32)> = Vec::new();
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let dist = ((dx * dx + dy * dy) as f32).sqrt();
            let weight = (radius + 1.0 - dist).clamp(0.0, 1.0);
            if weight > 0.0 {
                element.push((dx, dy, weight));
            }
        }
    }
    element.sort_by(|a, b| b.2.total_cmp(&a.2));

    let mut result = Array2::<f32>::zeros((height, width));
    if let Some(buf) = result.as_slice_mut() {
        buf.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
            for (x, out) in row.iter_mut().enumerate() {
                let mut max_val = 0.0f32;
                for &(dx, dy, weight) in &element {
                    if weight <= max_val {
                        break;
                    }
                    let sx = x as isize + dx;
                    let sy = y as isize + dy;
                    if sx < 0 || sy < 0 || sx >= width as isize || sy >= height as isize {
                        continue;
                    }
                    let v = alpha[[sy as usize, sx as usize]] * weight;
                    if v > max_val {
                        max_val = v;
                        if max_val >= 1.0 {
                            break;
                        }
                    }
                }
                *out = max_val;
            }
        });
    }

    result
}

/// Shift a mask by whole pixels.
///
/// Output pixel `(x, y)` reads input `(x - dx, y - dy)`; pixels shifted in
/// from outside the mask take `fill`.
pub fn translate_alpha(alpha: &Array2<f32>, dx: i32, dy: i32, fill: f32) -> Array2<f32> {
    let (height, width) = alpha.dim();
    if dx == 0 && dy == 0 {
        return alpha.clone();
    }

    Array2::from_shape_fn((height, width), |(y, x)| {
        let sx = x as i64 - dx as i64;
        let sy = y as i64 - dy as i64;
        if sx < 0 || sy < 0 || sx >= width as i64 || sy >= height as i64 {
            fill
        } else {
            alpha[[sy as usize, sx as usize]]
        }
    })
}

/// Porter-Duff "over" on straight-alpha pixels.
///
/// `out_a = src_a + dst_a * (1 - src_a)`; colour is the alpha-weighted mix
/// of both, divided back out by `out_a`. Alpha stays within 0.0-1.0.
#[inline]
pub fn blend_over_f32(dst: [f32; 4], src: [f32; 4]) -> [f32; 4] {
    let src_a = src[3].clamp(0.0, 1.0);
    if src_a <= 0.0 {
        return dst;
    }
    if src_a >= 1.0 {
        return [src[0], src[1], src[2], 1.0];
    }

    let dst_a = dst[3].clamp(0.0, 1.0);
    let out_a = (src_a + dst_a * (1.0 - src_a)).clamp(0.0, 1.0);
    if out_a <= 0.0 {
        return [0.0; 4];
    }

    let mix = |s: f32, d: f32| (s * src_a + d * dst_a * (1.0 - src_a)) / out_a;
    [mix(src[0], dst[0]), mix(src[1], dst[1]), mix(src[2], dst[2]), out_a]
}
