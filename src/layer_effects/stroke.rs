//! Stroke layer: an outline around the glyphs.
//!
//! The glyph coverage is dilated by the stroke width with a Euclidean disk
//! (round corners) and painted in the stroke colour. Nothing is subtracted:
//! the fill is painted over the stroke, so the outline reads as a band of
//! `width` pixels outside the glyph edge and shows through wherever the
//! fill's anti-aliased edge is partially transparent.

use super::{Layer, ZOrder};
use crate::filters::core::dilate_alpha;
use crate::style::StrokeSpec;
use crate::text::CoverageMask;

/// Coverage grown by `width` pixels.
pub fn outline_mask(mask: &CoverageMask, width: u32) -> CoverageMask {
    CoverageMask::from_array(dilate_alpha(mask.data(), width as f32), mask.origin())
}

/// Render the stroke layer; `None` when disabled or zero width.
pub fn stroke_layer(mask: &CoverageMask, spec: &StrokeSpec) -> Option<Layer> {
    if !spec.enabled || spec.width == 0 {
        return None;
    }
    let outline = outline_mask(mask, spec.width);
    Some(Layer::colorized(ZOrder::Stroke, outline.origin(), outline.data(), spec.color, 1.0))
}
