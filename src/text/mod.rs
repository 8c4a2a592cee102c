//! Text to coverage: rasterizer seam, layout engine and masks.

pub mod bidi;
pub mod layout;
pub mod mask;
pub mod rasterizer;

pub use layout::{layout_text, LayoutParams, LineLayout, TextLayout};
pub use mask::{CoverageMask, PixelRect};
pub use rasterizer::{FontdueRasterizer, GlyphBitmap, GlyphRasterizer, LineMetrics};
