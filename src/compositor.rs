//! Compositor: stacks effect layers and blends the block onto the photo.
//!
//! Steps, in order:
//! 1. Sort layers back to front by [`ZOrder`]
//! 2. Porter-Duff "over" each layer onto a transparent working canvas
//! 3. Scale the block's alpha by the global opacity
//! 4. Rotate the block around the anchor
//! 5. "Over" the block onto the base image
//!
//! The working canvas comes from the layout; a layer of any other size or
//! position is a pipeline defect and aborts with [`InternalError`].

use ndarray::Array3;

use crate::error::InternalError;
use crate::filters::core::blend_over_f32;
use crate::filters::rotate::rotate_about;
use crate::layer_effects::Layer;
use crate::text::PixelRect;

/// Final image: the base photo with the styled text blended in.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderResult {
    /// RGBA u8, same shape as the base image.
    pub image: Array3<u8>,
}

/// Block-level compositing on a fixed working canvas.
#[derive(Debug, Clone, Copy)]
pub struct Compositor {
    canvas: PixelRect,
}

impl Compositor {
    pub fn new(canvas: PixelRect) -> Self {
        Self { canvas }
    }

    pub fn canvas(&self) -> PixelRect {
        self.canvas
    }

    fn check_layer(&self, layer: &Layer) -> Result<(), InternalError> {
        let expected = (self.canvas.height, self.canvas.width);
        let expected_origin = (self.canvas.x, self.canvas.y);
        if layer.dim() != expected || layer.origin() != expected_origin {
            return Err(InternalError::CanvasMismatch {
                layer: layer.z(),
                expected,
                expected_origin,
                found: layer.dim(),
                found_origin: layer.origin(),
            });
        }
        Ok(())
    }

    /// Stack `layers` back to front onto a transparent canvas.
    pub fn composite_layers(&self, mut layers: Vec<Layer>) -> Result<Array3<f32>, InternalError> {
        for layer in &layers {
            self.check_layer(layer)?;
        }
        layers.sort_by_key(|l| l.z());

        let (height, width) = (self.canvas.height, self.canvas.width);
        let mut block = Array3::<f32>::zeros((height, width, 4));

        for layer in &layers {
            let src = layer.pixels();
            for y in 0..height {
                for x in 0..width {
                    let sa = src[[y, x, 3]];
                    if sa <= 0.0 {
                        continue;
                    }
                    let dst = [block[[y, x, 0]], block[[y, x, 1]], block[[y, x, 2]], block[[y, x, 3]]];
                    let out = blend_over_f32(dst, [src[[y, x, 0]], src[[y, x, 1]], src[[y, x, 2]], sa]);
                    for c in 0..4 {
                        block[[y, x, c]] = out[c];
                    }
                }
            }
            log::trace!("composited {:?} layer", layer.z());
        }

        Ok(block)
    }

    /// Multiply the block's alpha by `opacity`.
    pub fn apply_opacity(block: Array3<f32>, opacity: f32) -> Array3<f32> {
        if opacity >= 1.0 {
            return block;
        }
        let opacity = opacity.max(0.0);
        let mut block = block;
        block.slice_mut(ndarray::s![.., .., 3]).mapv_inplace(|a| a * opacity);
        block
    }

    /// Rotate the block around `anchor`; returns the new raster and origin.
    pub fn rotate(&self, block: &Array3<f32>, anchor: (i32, i32), degrees: f32) -> (Array3<f32>, (i32, i32)) {
        rotate_about(block, (self.canvas.x, self.canvas.y), anchor, degrees)
    }

    /// "Over" a placed block onto a copy of `base`. Parts of the block
    /// outside the image are dropped.
    pub fn blend_onto(base: &Array3<u8>, block: &Array3<f32>, origin: (i32, i32)) -> Array3<u8> {
        let mut out = base.clone();
        let (img_h, img_w, _) = base.dim();
        let (blk_h, blk_w, _) = block.dim();

        for by in 0..blk_h {
            let y = origin.1 as i64 + by as i64;
            if y < 0 || y >= img_h as i64 {
                continue;
            }
            for bx in 0..blk_w {
                let x = origin.0 as i64 + bx as i64;
                if x < 0 || x >= img_w as i64 {
                    continue;
                }
                let sa = block[[by, bx, 3]];
                if sa <= 0.0 {
                    continue;
                }

                let (y, x) = (y as usize, x as usize);
                let dst = [
                    out[[y, x, 0]] as f32 / 255.0,
                    out[[y, x, 1]] as f32 / 255.0,
                    out[[y, x, 2]] as f32 / 255.0,
                    out[[y, x, 3]] as f32 / 255.0,
                ];
                let src = [block[[by, bx, 0]], block[[by, bx, 1]], block[[by, bx, 2]], sa];
                let blended = blend_over_f32(dst, src);
                for c in 0..4 {
                    out[[y, x, c]] = (blended[c].clamp(0.0, 1.0) * 255.0).round() as u8;
                }
            }
        }

        out
    }

    /// Run every compositing step and blend onto `base`.
    pub fn composite(
        &self,
        base: &Array3<u8>,
        layers: Vec<Layer>,
        opacity: f32,
        rotation: f32,
        anchor: (i32, i32),
    ) -> Result<RenderResult, InternalError> {
        if base.dim().2 != 4 {
            return Err(InternalError::BaseImageShape(base.shape().to_vec()));
        }

        let block = self.composite_layers(layers)?;
        let block = Self::apply_opacity(block, opacity);
        let (block, origin) = if rotation == 0.0 {
            (block, (self.canvas.x, self.canvas.y))
        } else {
            self.rotate(&block, anchor, rotation)
        };
        log::debug!("blending {:?} block at {origin:?}", block.dim());

        Ok(RenderResult { image: Self::blend_onto(base, &block, origin) })
    }
}
