//! Raster primitives the layer effects are built from.
//!
//! ## Formats
//!
//! | Kind | Type | Shape | Range |
//! |------|------|-------|-------|
//! | Coverage / alpha mask | `Array2<f32>` | (H, W) | 0.0-1.0 |
//! | Working raster | `Array3<f32>` | (H, W, 4) | 0.0-1.0, straight alpha |
//! | Base image | `Array3<u8>` | (H, W, 4) | 0-255 |
//!
//! ## Modules
//!
//! - **core** - Gaussian kernel, separable blur, dilation, translation, "over" blending
//! - **gradient** - Linear gradient stops and axis parameterisation
//! - **rotate** - Pivoted rotation with bilinear resampling
//!
//! Row loops use rayon where rows are independent; output never depends on
//! scheduling.

pub mod core;
pub mod gradient;
pub mod rotate;
