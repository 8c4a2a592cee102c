//! Glyph rasterization seam.
//!
//! Layout only needs per-character coverage bitmaps and advances; where they
//! come from is behind [`GlyphRasterizer`]. [`FontdueRasterizer`] is the
//! TrueType/OpenType implementation used in production.

use std::path::Path;

use crate::error::FontError;

/// Coverage bitmap and placement of one glyph.
///
/// `left` is the bitmap's horizontal offset from the pen position; `top` is
/// the height of the bitmap's top edge above the baseline (y up).
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphBitmap {
    pub width: usize,
    pub height: usize,
    /// Row-major coverage, `width * height` values in 0.0-1.0.
    pub coverage: Vec<f32>,
    pub left: i32,
    pub top: i32,
    pub advance: f32,
}

impl GlyphBitmap {
    /// A glyph with no ink, e.g. a space.
    pub fn blank(advance: f32) -> Self {
        Self { width: 0, height: 0, coverage: Vec::new(), left: 0, top: 0, advance }
    }
}

/// Vertical metrics of a font at a given size, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    /// Distance from the top of the line to the baseline.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the line (positive).
    pub descent: f32,
}

/// Turns characters into coverage bitmaps.
pub trait GlyphRasterizer {
    fn rasterize(&self, ch: char, size: f32) -> GlyphBitmap;

    fn line_metrics(&self, size: f32) -> LineMetrics;
}

/// Rasterizer backed by a `fontdue::Font`.
pub struct FontdueRasterizer {
    font: fontdue::Font,
}

impl FontdueRasterizer {
    /// Parse a TrueType or OpenType font from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FontError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontError::Parse(e.to_string()))?;
        Ok(Self { font })
    }

    /// Read and parse a font file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FontError> {
        let bytes = std::fs::read(path.as_ref())?;
        log::debug!("loaded font {} ({} bytes)", path.as_ref().display(), bytes.len());
        Self::from_bytes(&bytes)
    }
}

impl GlyphRasterizer for FontdueRasterizer {
    fn rasterize(&self, ch: char, size: f32) -> GlyphBitmap {
        let (metrics, bitmap) = self.font.rasterize(ch, size);
        GlyphBitmap {
            width: metrics.width,
            height: metrics.height,
            coverage: bitmap.into_iter().map(|v| v as f32 / 255.0).collect(),
            left: metrics.xmin,
            top: metrics.ymin + metrics.height as i32,
            advance: metrics.advance_width,
        }
    }

    fn line_metrics(&self, size: f32) -> LineMetrics {
        match self.font.horizontal_line_metrics(size) {
            Some(m) => LineMetrics { ascent: m.ascent, descent: -m.descent },
            // Fonts without hhea metrics: conventional 80/20 split
            None => LineMetrics { ascent: size * 0.8, descent: size * 0.2 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_are_a_font_error() {
        let err = FontdueRasterizer::from_bytes(b"definitely not a font").err();
        assert!(matches!(err, Some(FontError::Parse(_))));
    }

    #[test]
    fn test_missing_font_file_is_io_error() {
        let err = FontdueRasterizer::from_path("/nonexistent/font.ttf").err();
        assert!(matches!(err, Some(FontError::Io(_))));
    }

    fn dejavu_path() -> String {
        format!("{}/tests/fixtures/DejaVuSans.ttf", env!("CARGO_MANIFEST_DIR"))
    }

    fn dejavu() -> FontdueRasterizer {
        FontdueRasterizer::from_path(dejavu_path()).unwrap()
    }

    #[test]
    fn test_capital_sits_on_baseline() {
        let g = dejavu().rasterize('A', 90.0);
        assert!(g.width > 0 && g.height > 0);
        assert_eq!(g.coverage.len(), g.width * g.height);
        assert!(g.top > 0);
        // Bottom edge (top - height, y up) within a pixel of the baseline
        assert!((g.top - g.height as i32).abs() <= 1);
        assert!(g.advance > 0.0);
        let peak = g.coverage.iter().copied().fold(0.0f32, f32::max);
        assert!(peak > 0.99 && peak <= 1.0);
    }

    #[test]
    fn test_descender_reaches_below_baseline() {
        let g = dejavu().rasterize('g', 90.0);
        assert!(g.top > 0);
        assert!(g.top - (g.height as i32) < -5);
    }

    #[test]
    fn test_space_has_advance_but_no_ink() {
        let g = dejavu().rasterize(' ', 90.0);
        assert!(g.advance > 0.0);
        assert!(g.coverage.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_line_metrics_are_positive() {
        let m = dejavu().line_metrics(90.0);
        assert!(m.ascent > 60.0 && m.ascent < 100.0, "ascent {}", m.ascent);
        assert!(m.descent > 10.0 && m.descent < 40.0, "descent {}", m.descent);
    }

    #[test]
    fn test_bytes_and_path_agree() {
        let bytes = std::fs::read(dejavu_path()).unwrap();
        let from_bytes = FontdueRasterizer::from_bytes(&bytes).unwrap();
        assert_eq!(from_bytes.rasterize('Q', 40.0), dejavu().rasterize('Q', 40.0));
    }

    #[test]
    fn test_blank_glyph() {
        let g = GlyphBitmap::blank(12.0);
        assert_eq!(g.coverage.len(), 0);
        assert_eq!(g.advance, 12.0);
    }
}
