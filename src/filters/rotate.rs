//! Rotation of placed RGBA rasters around an arbitrary pivot.
//!
//! A placed raster is an `Array3<f32>` plus the image-space position of its
//! top-left pixel. Rotation keeps the pivot pixel fixed and grows the output
//! canvas to hold the rotated corners.
//!
//! ## Rotation Direction
//!
//! Positive angles rotate counter-clockwise as seen on screen (y grows
//! downward), matching common image editors:
//! - 90°: a pixel right of the pivot moves above it
//! - -90°: a pixel right of the pivot moves below it

use ndarray::Array3;
use rayon::prelude::*;

/// Exact sine/cosine for multiples of 90°, libm otherwise.
fn sin_cos_degrees(degrees: f32) -> (f32, f32) {
    let d = degrees.rem_euclid(360.0);
    if d == 0.0 {
        (0.0, 1.0)
    } else if d == 90.0 {
        (1.0, 0.0)
    } else if d == 180.0 {
        (0.0, -1.0)
    } else if d == 270.0 {
        (-1.0, 0.0)
    } else {
        d.to_radians().sin_cos()
    }
}

/// Bilinear sample at continuous pixel index `(u, v)`.
///
/// Interpolates premultiplied colour so transparent neighbours do not bleed
/// their RGB into the edge. Samples outside the raster are transparent.
fn sample_bilinear(pixels: &Array3<f32>, u: f32, v: f32) -> [f32; 4] {
    let (height, width, _) = pixels.dim();
    let x0 = u.floor();
    let y0 = v.floor();
    let fx = u - x0;
    let fy = v - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let mut acc = [0.0f32; 4];
    for (dy, wy) in [(0i64, 1.0 - fy), (1, fy)] {
        for (dx, wx) in [(0i64, 1.0 - fx), (1, fx)] {
            let w = wx * wy;
            if w == 0.0 {
                continue;
            }
            let (sx, sy) = (x0 + dx, y0 + dy);
            if sx < 0 || sy < 0 || sx >= width as i64 || sy >= height as i64 {
                continue;
            }
            let (sx, sy) = (sx as usize, sy as usize);
            let a = pixels[[sy, sx, 3]];
            acc[0] += pixels[[sy, sx, 0]] * a * w;
            acc[1] += pixels[[sy, sx, 1]] * a * w;
            acc[2] += pixels[[sy, sx, 2]] * a * w;
            acc[3] += a * w;
        }
    }

    if acc[3] <= 0.0 {
        return [0.0; 4];
    }
    [acc[0] / acc[3], acc[1] / acc[3], acc[2] / acc[3], acc[3].min(1.0)]
}

/// Rotate a placed raster around `pivot` (image-space pixel coordinates).
///
/// # Arguments
/// * `pixels` - RGBA raster (height, width, 4), straight alpha
/// * `origin` - Image-space position of `pixels[[0, 0]]`
/// * `pivot` - Image-space pixel that stays fixed
/// * `degrees` - Counter-clockwise angle
///
/// # Returns
/// The rotated raster and its new image-space origin
pub fn rotate_about(
    pixels: &Array3<f32>,
    origin: (i32, i32),
    pivot: (i32, i32),
    degrees: f32,
) -> (Array3<f32>, (i32, i32)) {
    let (height, width, _) = pixels.dim();
    let (sin, cos) = sin_cos_degrees(degrees);
    if (sin, cos) == (0.0, 1.0) || height == 0 || width == 0 {
        return (pixels.clone(), origin);
    }

    // Pivot at the centre of its pixel
    let px = pivot.0 as f32 + 0.5;
    let py = pivot.1 as f32 + 0.5;
    let forward = |x: f32, y: f32| {
        let (rx, ry) = (x - px, y - py);
        (px + rx * cos + ry * sin, py - rx * sin + ry * cos)
    };

    let (ox, oy) = (origin.0 as f32, origin.1 as f32);
    let corners = [
        forward(ox, oy),
        forward(ox + width as f32, oy),
        forward(ox, oy + height as f32),
        forward(ox + width as f32, oy + height as f32),
    ];
    let min_x = corners.iter().map(|c| c.0).fold(f32::INFINITY, f32::min).floor();
    let min_y = corners.iter().map(|c| c.1).fold(f32::INFINITY, f32::min).floor();
    let max_x = corners.iter().map(|c| c.0).fold(f32::NEG_INFINITY, f32::max).ceil();
    let max_y = corners.iter().map(|c| c.1).fold(f32::NEG_INFINITY, f32::max).ceil();

    let new_w = (max_x - min_x).max(0.0) as usize;
    let new_h = (max_y - min_y).max(0.0) as usize;
    let new_origin = (min_x as i32, min_y as i32);

    let mut result = Array3::<f32>::zeros((new_h, new_w, 4));
    if new_w == 0 {
        return (result, new_origin);
    }
    if let Some(buf) = result.as_slice_mut() {
        buf.par_chunks_mut(new_w * 4).enumerate().for_each(|(y, row)| {
            let cy = new_origin.1 as f32 + y as f32 + 0.5;
            for (x, out) in row.chunks_mut(4).enumerate() {
                let cx = new_origin.0 as f32 + x as f32 + 0.5;
                // Inverse rotation back into source space
                let (rx, ry) = (cx - px, cy - py);
                let sx = px + rx * cos - ry * sin;
                let sy = py + rx * sin + ry * cos;
                let sample = sample_bilinear(pixels, sx - ox - 0.5, sy - oy - 0.5);
                out.copy_from_slice(&sample);
            }
        });
    }

    (result, new_origin)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker_raster() -> Array3<f32> {
        // 5x3 raster, opaque red at (1, 1), green tail to the right of it
        let mut img = Array3::<f32>::zeros((3, 5, 4));
        img[[1, 1, 0]] = 1.0;
        img[[1, 1, 3]] = 1.0;
        img[[1, 3, 1]] = 1.0;
        img[[1, 3, 3]] = 1.0;
        img
    }

    #[test]
    fn test_zero_rotation_is_identity() {
        let img = marker_raster();
        let (out, origin) = rotate_about(&img, (10, 20), (11, 21), 0.0);
        assert_eq!(out, img);
        assert_eq!(origin, (10, 20));
        let (out, _) = rotate_about(&img, (10, 20), (11, 21), 360.0);
        assert_eq!(out, img);
    }

    #[test]
    fn test_pivot_pixel_fixed_at_90() {
        let img = marker_raster();
        let origin = (10, 20);
        let pivot = (11, 21); // the red pixel
        let (out, new_origin) = rotate_about(&img, origin, pivot, 90.0);

        let lx = (pivot.0 - new_origin.0) as usize;
        let ly = (pivot.1 - new_origin.1) as usize;
        assert_eq!(out[[ly, lx, 3]], 1.0);
        assert!((out[[ly, lx, 0]] - 1.0).abs() < 1e-6);

        // Green was 2px right of the pivot; counter-clockwise puts it 2px above
        assert_eq!(out[[ly - 2, lx, 3]], 1.0);
        assert!((out[[ly - 2, lx, 1]] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_90_swaps_dimensions() {
        let img = marker_raster();
        let (out, _) = rotate_about(&img, (0, 0), (2, 1), 90.0);
        assert_eq!(out.dim(), (5, 3, 4));
    }

    #[test]
    fn test_arbitrary_angle_keeps_alpha_in_range() {
        let img = Array3::<f32>::from_elem((8, 8, 4), 1.0);
        let (out, _) = rotate_about(&img, (0, 0), (4, 4), 33.0);
        assert!(out.iter().all(|v| (0.0..=1.0).contains(v)));
        assert!(out.dim().0 > 8);
    }
}
