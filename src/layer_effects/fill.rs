//! Fill layer: the glyph interior in a solid colour or linear gradient.
//!
//! Alpha is the glyph coverage times the colour's own alpha. Gradients are
//! laid across the tight box of covered pixels, not the padded canvas, so
//! the first and last stops land on the edges of the ink.

use ndarray::Array3;

use super::{Layer, ZOrder};
use crate::error::InternalError;
use crate::filters::gradient::{gradient_t, GradientRamp};
use crate::style::{FillSpec, Paint};
use crate::text::CoverageMask;

/// Render the fill layer.
///
/// Returns `Ok(None)` when the fill is disabled or the mask has no ink.
pub fn fill_layer(mask: &CoverageMask, spec: &FillSpec) -> Result<Option<Layer>, InternalError> {
    if !spec.enabled {
        return Ok(None);
    }

    match &spec.paint {
        Paint::Solid(color) => Ok(Some(Layer::colorized(ZOrder::Fill, mask.origin(), mask.data(), *color, 1.0))),
        Paint::Gradient { colors, direction } => {
            let ramp = GradientRamp::new(colors)?;
            let Some(ink) = mask.content_bounds() else {
                return Ok(None);
            };

            let coverage = mask.data();
            let (height, width) = coverage.dim();
            let mut pixels = Array3::<f32>::zeros((height, width, 4));

            for y in 0..height {
                let ly = (y as i32 - ink.y).max(0) as usize;
                for x in 0..width {
                    let a = coverage[[y, x]];
                    if a <= 0.0 {
                        continue;
                    }
                    let lx = (x as i32 - ink.x).max(0) as usize;
                    let t = gradient_t(lx, ly, ink.width, ink.height, *direction);
                    let c = ramp.sample(t);
                    pixels[[y, x, 0]] = c.r;
                    pixels[[y, x, 1]] = c.g;
                    pixels[[y, x, 2]] = c.b;
                    pixels[[y, x, 3]] = (a * c.a).clamp(0.0, 1.0);
                }
            }

            Ok(Some(Layer::new(ZOrder::Fill, mask.origin(), pixels)))
        }
    }
}
