//! Blur-based effects: drop shadow, outer glow and inner shadow.
//!
//! All three run the same steps:
//! 1. Pick the source mask (coverage, or inverted coverage for inner)
//! 2. Offset it by whole pixels
//! 3. Separable Gaussian blur, sigma = blur / 3
//! 4. Scale by opacity and colourise
//!
//! Inner shadows are then multiplied by the original, un-offset coverage so
//! the shading stays inside the glyphs.

use super::{Layer, ZOrder};
use crate::error::InternalError;
use crate::filters::core::{blur_alpha_f32, sigma_for_radius, translate_alpha};
use crate::style::{EffectSpec, MAX_EFFECT_OFFSET};
use crate::text::CoverageMask;

/// Which side of the glyph edge the blur lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlurMode {
    /// Shadow and glow: blur spreads outward, painted behind the text.
    Outer,
    /// Inner shadow: blur of the uncovered area, confined to the glyphs.
    Inner,
}

/// Blurred alpha for `spec`, before opacity.
fn blurred_source(mask: &CoverageMask, spec: &EffectSpec, mode: BlurMode) -> ndarray::Array2<f32> {
    let [dx, dy] = spec.offset;
    let sigma = sigma_for_radius(spec.blur);
    match mode {
        BlurMode::Outer => blur_alpha_f32(&translate_alpha(mask.data(), dx, dy, 0.0), sigma),
        BlurMode::Inner => {
            // Everything off-canvas counts as uncovered
            let inverted = mask.data().mapv(|v| 1.0 - v);
            let blurred = blur_alpha_f32(&translate_alpha(&inverted, dx, dy, 1.0), sigma);
            blurred * mask.data()
        }
    }
}

/// Render one blur effect layer on the mask's canvas.
///
/// Disabled specs return `Ok(None)` without touching the mask. A negative
/// blur radius or an out-of-range offset means validation was bypassed and
/// is reported as an internal error.
pub fn blur_effect_layer(
    mask: &CoverageMask,
    spec: &EffectSpec,
    mode: BlurMode,
    z: ZOrder,
) -> Result<Option<Layer>, InternalError> {
    if !spec.enabled {
        return Ok(None);
    }
    if spec.blur < 0.0 || spec.blur.is_nan() {
        return Err(InternalError::NegativeBlurRadius(spec.blur));
    }
    if spec.offset.iter().any(|v| v.unsigned_abs() > MAX_EFFECT_OFFSET as u32) {
        return Err(InternalError::EffectOffsetOutOfRange(spec.offset, MAX_EFFECT_OFFSET));
    }

    let alpha = blurred_source(mask, spec, mode);
    Ok(Some(Layer::colorized(z, mask.origin(), &alpha, spec.color, spec.opacity)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use ndarray::{s, Array2};

    fn square_mask() -> CoverageMask {
        let mut data = Array2::<f32>::zeros((40, 40));
        data.slice_mut(s![15..25, 15..25]).fill(1.0);
        CoverageMask::from_array(data, (100, 100))
    }

    fn spec(offset: [i32; 2], blur: f32, opacity: f32) -> EffectSpec {
        EffectSpec { enabled: true, offset, blur, color: Rgba::from_rgb8(10, 20, 30), opacity }
    }

    #[test]
    fn test_zero_blur_is_offset_copy() {
        let mask = square_mask();
        let layer = blur_effect_layer(&mask, &spec([3, -2], 0.0, 0.5), BlurMode::Outer, ZOrder::DropShadow)
            .unwrap()
            .unwrap();
        let expected = translate_alpha(mask.data(), 3, -2, 0.0) * 0.5;
        for ((y, x), &a) in expected.indexed_iter() {
            assert_eq!(layer.alpha(x, y), a);
        }
        assert!((layer.pixels()[[0, 0, 0]] - 10.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_outer_blur_softens_edges() {
        let mask = square_mask();
        let layer = blur_effect_layer(&mask, &spec([0, 0], 6.0, 1.0), BlurMode::Outer, ZOrder::OuterGlow)
            .unwrap()
            .unwrap();
        // Leaks outside the square, fades with distance
        assert!(layer.alpha(13, 20) > 0.0);
        assert!(layer.alpha(13, 20) > layer.alpha(11, 20));
        assert!(layer.alpha(20, 20) > 0.9);
        assert!(layer.alpha(2, 2) < 1e-4);
    }

    #[test]
    fn test_inner_shadow_confined_to_coverage() {
        let mask = square_mask();
        let layer = blur_effect_layer(&mask, &spec([2, 2], 4.0, 1.0), BlurMode::Inner, ZOrder::InnerShadow)
            .unwrap()
            .unwrap();
        for y in 0..40 {
            for x in 0..40 {
                if mask.data()[[y, x]] == 0.0 {
                    assert_eq!(layer.alpha(x, y), 0.0);
                }
            }
        }
        // Offset down-right: shading is heavier near the top-left inner edge
        assert!(layer.alpha(15, 15) > layer.alpha(24, 24));
        assert!(layer.alpha(15, 15) > 0.0);
    }

    #[test]
    fn test_negative_blur_is_internal_error() {
        let err = blur_effect_layer(&square_mask(), &spec([0, 0], -1.0, 1.0), BlurMode::Outer, ZOrder::DropShadow)
            .unwrap_err();
        assert_eq!(err, InternalError::NegativeBlurRadius(-1.0));
    }

    #[test]
    fn test_unvalidated_offset_is_internal_error() {
        let err = blur_effect_layer(&square_mask(), &spec([0, 4000], 2.0, 1.0), BlurMode::Outer, ZOrder::DropShadow)
            .unwrap_err();
        assert_eq!(err, InternalError::EffectOffsetOutOfRange([0, 4000], MAX_EFFECT_OFFSET));
    }

    #[test]
    fn test_disabled_skips_work() {
        let mut off = spec([0, 0], -5.0, 1.0);
        off.enabled = false;
        assert!(blur_effect_layer(&square_mask(), &off, BlurMode::Inner, ZOrder::InnerShadow)
            .unwrap()
            .is_none());
    }
}
