//! Layer effects for styled text (Photoshop-style layer styles).
//!
//! Five effects, each turning the glyph coverage mask into one RGBA layer:
//!
//! ## Shadow and glow (`shadow.rs`)
//! - **Outer Glow** - soft colour halo around the glyphs
//! - **Drop Shadow** - offset, blurred copy behind the glyphs
//! - **Inner Shadow** - blur of the inverted coverage, kept inside the glyphs
//!
//! ## Outline (`stroke.rs`)
//! - **Stroke** - dilated coverage painted beneath the fill
//!
//! ## Fill (`fill.rs`)
//! - **Fill** - solid colour or linear gradient
//!
//! ## Stacking
//!
//! Layers are composited back to front in [`ZOrder`] order:
//! outer glow, drop shadow, stroke, fill, inner shadow. Every layer of a
//! render shares the canvas of the mask it was made from.

pub mod fill;
pub mod shadow;
pub mod stroke;

use ndarray::{Array2, Array3};

use crate::color::Rgba;
use crate::error::InternalError;
use crate::style::{EffectSpec, FillSpec, StrokeSpec};
use crate::text::CoverageMask;

use self::shadow::BlurMode;

/// Stacking position of a layer, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ZOrder {
    OuterGlow,
    DropShadow,
    Stroke,
    Fill,
    InnerShadow,
}

/// One effect's RGBA raster on the shared working canvas.
///
/// Straight alpha, shape `(height, width, 4)`. Not modified after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    z: ZOrder,
    origin: (i32, i32),
    pixels: Array3<f32>,
}

impl Layer {
    pub fn new(z: ZOrder, origin: (i32, i32), pixels: Array3<f32>) -> Self {
        Self { z, origin, pixels }
    }

    /// Layer of a single colour whose alpha is `alpha * color.a * opacity`.
    pub fn colorized(z: ZOrder, origin: (i32, i32), alpha: &Array2<f32>, color: Rgba, opacity: f32) -> Self {
        let (height, width) = alpha.dim();
        let scale = color.a * opacity;
        let pixels = Array3::from_shape_fn((height, width, 4), |(y, x, c)| match c {
            0 => color.r,
            1 => color.g,
            2 => color.b,
            _ => (alpha[[y, x]] * scale).clamp(0.0, 1.0),
        });
        Self::new(z, origin, pixels)
    }

    pub fn z(&self) -> ZOrder {
        self.z
    }

    pub fn origin(&self) -> (i32, i32) {
        self.origin
    }

    pub fn pixels(&self) -> &Array3<f32> {
        &self.pixels
    }

    /// `(height, width)` of the canvas.
    pub fn dim(&self) -> (usize, usize) {
        let (h, w, _) = self.pixels.dim();
        (h, w)
    }

    /// Alpha at local `(x, y)`.
    pub fn alpha(&self, x: usize, y: usize) -> f32 {
        self.pixels[[y, x, 3]]
    }
}

/// The five effect kinds, each borrowing its part of the style.
///
/// Every variant derives its own mask from the glyph coverage: direct for
/// fill, drop shadow and outer glow, dilated for stroke, inverted for inner
/// shadow.
#[derive(Debug, Clone, Copy)]
pub enum LayerEffect<'a> {
    OuterGlow(&'a EffectSpec),
    DropShadow(&'a EffectSpec),
    Stroke(&'a StrokeSpec),
    Fill(&'a FillSpec),
    InnerShadow(&'a EffectSpec),
}

impl LayerEffect<'_> {
    pub fn z_order(&self) -> ZOrder {
        match self {
            LayerEffect::OuterGlow(_) => ZOrder::OuterGlow,
            LayerEffect::DropShadow(_) => ZOrder::DropShadow,
            LayerEffect::Stroke(_) => ZOrder::Stroke,
            LayerEffect::Fill(_) => ZOrder::Fill,
            LayerEffect::InnerShadow(_) => ZOrder::InnerShadow,
        }
    }

    pub fn is_enabled(&self) -> bool {
        match self {
            LayerEffect::OuterGlow(spec) | LayerEffect::DropShadow(spec) | LayerEffect::InnerShadow(spec) => {
                spec.enabled
            }
            LayerEffect::Stroke(spec) => spec.enabled && spec.width > 0,
            LayerEffect::Fill(spec) => spec.enabled,
        }
    }

    /// Render this effect from the glyph coverage.
    ///
    /// `Ok(None)` when the effect is disabled or has nothing to draw.
    pub fn produce_layer(&self, mask: &CoverageMask) -> Result<Option<Layer>, InternalError> {
        if !self.is_enabled() {
            return Ok(None);
        }
        match *self {
            LayerEffect::OuterGlow(spec) => shadow::blur_effect_layer(mask, spec, BlurMode::Outer, ZOrder::OuterGlow),
            LayerEffect::DropShadow(spec) => shadow::blur_effect_layer(mask, spec, BlurMode::Outer, ZOrder::DropShadow),
            LayerEffect::Stroke(spec) => Ok(stroke::stroke_layer(mask, spec)),
            LayerEffect::Fill(spec) => fill::fill_layer(mask, spec),
            LayerEffect::InnerShadow(spec) => shadow::blur_effect_layer(mask, spec, BlurMode::Inner, ZOrder::InnerShadow),
        }
    }
}
