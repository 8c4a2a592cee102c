//! Style effect pipeline: from text and style to the final image.
//!
//! Layout produces the glyph coverage on a working canvas large enough for
//! every enabled effect; each enabled effect turns that coverage into one
//! layer; the compositor stacks the layers and blends them onto the base.
//! Nothing here keeps state between calls and identical inputs give
//! identical output.

use ndarray::Array3;

use crate::compositor::{Compositor, RenderResult};
use crate::error::{InternalError, RenderError};
use crate::layer_effects::{Layer, LayerEffect};
use crate::style::{StyleConfig, MAX_EFFECT_OFFSET};
use crate::text::{layout_text, FontdueRasterizer, GlyphRasterizer};

/// Enabled effects of `style` in back-to-front order.
pub fn effect_stack(style: &StyleConfig) -> Vec<LayerEffect<'_>> {
    [
        LayerEffect::OuterGlow(&style.outer_glow),
        LayerEffect::DropShadow(&style.shadow),
        LayerEffect::Stroke(&style.stroke),
        LayerEffect::Fill(&style.fill),
        LayerEffect::InnerShadow(&style.inner_shadow),
    ]
    .into_iter()
    .filter(LayerEffect::is_enabled)
    .collect()
}

/// Padding around the text so no enabled effect is cut off by the canvas.
///
/// Offsets count at most [`MAX_EFFECT_OFFSET`], so the canvas stays bounded
/// by the text size even for a style that skipped validation; such a style
/// is rejected when its layer is produced.
pub fn canvas_margin(style: &StyleConfig) -> usize {
    let mut margin = 0usize;
    if style.stroke.enabled {
        margin = margin.max(style.stroke.width as usize);
    }
    for spec in [&style.shadow, &style.outer_glow] {
        if spec.enabled {
            let reach = spec.offset[0].unsigned_abs().max(spec.offset[1].unsigned_abs());
            let reach = reach.min(MAX_EFFECT_OFFSET as u32) as usize;
            margin = margin.max(reach + spec.blur.max(0.0).ceil() as usize);
        }
    }
    margin + 2
}

/// Lay out `text` and produce every enabled layer.
///
/// Returns `None` when the text has no visible glyphs.
pub fn render_layers<R: GlyphRasterizer + ?Sized>(
    text: &str,
    style: &StyleConfig,
    rasterizer: &R,
) -> Result<Option<(Compositor, Vec<Layer>)>, InternalError> {
    let layout = layout_text(text, rasterizer, &style.layout_params());
    let Some(mask) = layout.canvas_mask(canvas_margin(style)) else {
        return Ok(None);
    };

    let mut layers = Vec::new();
    for effect in effect_stack(style) {
        if let Some(layer) = effect.produce_layer(&mask)? {
            layers.push(layer);
        }
    }
    log::debug!(
        "produced {} layers on {}x{} canvas: {:?}",
        layers.len(),
        mask.width(),
        mask.height(),
        layers.iter().map(Layer::z).collect::<Vec<_>>()
    );

    Ok(Some((Compositor::new(mask.rect()), layers)))
}

/// Render styled `text` onto `base`.
///
/// `text` must already be in display order (see
/// [`display_order`](crate::text::bidi::display_order)). `base` is RGBA u8
/// shaped `(height, width, 4)`; the result has the same shape.
pub fn render_text<R: GlyphRasterizer + ?Sized>(
    base: &Array3<u8>,
    text: &str,
    style: &StyleConfig,
    rasterizer: &R,
) -> Result<RenderResult, RenderError> {
    if base.dim().2 != 4 {
        return Err(InternalError::BaseImageShape(base.shape().to_vec()).into());
    }

    let Some((compositor, layers)) = render_layers(text, style, rasterizer)? else {
        log::warn!("text {text:?} has no visible glyphs; image left unchanged");
        return Ok(RenderResult { image: base.clone() });
    };

    let result = compositor.composite(base, layers, style.opacity, style.rotation, style.anchor())?;
    Ok(result)
}

/// [`render_text`] with the font named by `style.font_path`.
pub fn render_text_with_style_font(
    base: &Array3<u8>,
    text: &str,
    style: &StyleConfig,
) -> Result<RenderResult, RenderError> {
    let rasterizer = FontdueRasterizer::from_path(&style.font_path)?;
    render_text(base, text, style, &rasterizer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer_effects::ZOrder;
    use crate::testing::{sample_style_json, BlockRasterizer};

    fn style() -> StyleConfig {
        StyleConfig::from_json_str(&sample_style_json()).unwrap()
    }

    #[test]
    fn test_effect_stack_order_and_filtering() {
        let mut s = style();
        let zs: Vec<ZOrder> = effect_stack(&s).iter().map(LayerEffect::z_order).collect();
        assert_eq!(zs, vec![ZOrder::DropShadow, ZOrder::Stroke, ZOrder::Fill]);

        s.outer_glow.enabled = true;
        s.inner_shadow.enabled = true;
        s.stroke.width = 0;
        let zs: Vec<ZOrder> = effect_stack(&s).iter().map(LayerEffect::z_order).collect();
        assert_eq!(zs, vec![ZOrder::OuterGlow, ZOrder::DropShadow, ZOrder::Fill, ZOrder::InnerShadow]);
    }

    #[test]
    fn test_margin_covers_offset_and_blur() {
        let mut s = style();
        // shadow: offset 5 + blur 6
        assert_eq!(canvas_margin(&s), 13);
        s.shadow.enabled = false;
        assert_eq!(canvas_margin(&s), 6);
        s.stroke.enabled = false;
        assert_eq!(canvas_margin(&s), 2);
    }

    #[test]
    fn test_huge_offset_does_not_grow_canvas() {
        let mut s = style();
        s.shadow.offset = [4000, 0];
        assert_eq!(canvas_margin(&s), MAX_EFFECT_OFFSET as usize + 6 + 2);

        let err = render_layers("A", &s, &BlockRasterizer).unwrap_err();
        assert_eq!(err, InternalError::EffectOffsetOutOfRange([4000, 0], MAX_EFFECT_OFFSET));

        let base = Array3::<u8>::zeros((900, 1600, 4));
        assert!(render_text(&base, "A", &s, &BlockRasterizer).unwrap_err().is_internal());
    }

    #[test]
    fn test_all_layers_share_canvas() {
        let mut s = style();
        s.outer_glow.enabled = true;
        s.inner_shadow.enabled = true;
        let (compositor, layers) = render_layers("Hi", &s, &BlockRasterizer).unwrap().unwrap();
        assert_eq!(layers.len(), 5);
        let canvas = compositor.canvas();
        for layer in &layers {
            assert_eq!(layer.dim(), (canvas.height, canvas.width));
            assert_eq!(layer.origin(), (canvas.x, canvas.y));
        }
    }

    #[test]
    fn test_empty_text_leaves_base_untouched() {
        let base = Array3::<u8>::from_elem((50, 60, 4), 77);
        let out = render_text(&base, "", &style(), &BlockRasterizer).unwrap();
        assert_eq!(out.image, base);
    }

    #[test]
    fn test_rgb_base_rejected_as_internal() {
        let base = Array3::<u8>::zeros((10, 10, 3));
        let err = render_text(&base, "A", &style(), &BlockRasterizer).unwrap_err();
        assert!(err.is_internal());
    }

    #[test]
    fn test_missing_font_file_is_font_error() {
        let base = Array3::<u8>::zeros((10, 10, 4));
        let err = render_text_with_style_font(&base, "A", &style()).unwrap_err();
        assert!(matches!(err, RenderError::Font(_)));
    }
}
