//! Fixtures shared by the unit tests and the scenario tests under `tests/`.
//!
//! Not part of the public API.

use crate::text::{GlyphBitmap, GlyphRasterizer, LineMetrics};

/// Draws every non-whitespace character as a solid block.
///
/// At size `s` a glyph is `0.5 s` wide and `0.7 s` tall, sits on the
/// baseline one pixel right of the pen, and advances `0.5 s + 2`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BlockRasterizer;

impl GlyphRasterizer for BlockRasterizer {
    fn rasterize(&self, ch: char, size: f32) -> GlyphBitmap {
        let advance = (size * 0.5).round() + 2.0;
        if ch.is_whitespace() {
            return GlyphBitmap::blank(advance);
        }
        let width = (size * 0.5).round() as usize;
        let height = (size * 0.7).round() as usize;
        GlyphBitmap {
            width,
            height,
            coverage: vec![1.0; width * height],
            left: 1,
            top: height as i32,
            advance,
        }
    }

    fn line_metrics(&self, size: f32) -> LineMetrics {
        LineMetrics { ascent: size * 0.8, descent: size * 0.2 }
    }
}

/// A valid style with solid white fill, black stroke and drop shadow on,
/// glow and inner shadow off.
pub fn sample_style_json() -> String {
    r##"{
        "font_path": "fonts/test.ttf",
        "font_size": 90,
        "center": [800, 450],
        "fill": {"type": "solid", "color": "#ffffff"},
        "stroke": {"enabled": true, "width": 4, "color": "#000000"},
        "shadow": {"enabled": true, "offset": [5, 5], "blur": 6, "color": "#202020", "opacity": 0.6},
        "outer_glow": {"enabled": false, "offset": [0, 0], "blur": 20, "color": "#ffff00", "opacity": 0.5},
        "inner_shadow": {"enabled": false, "offset": [2, 2], "blur": 4, "color": "#400000", "opacity": 0.5},
        "letter_spacing": 2,
        "line_height": 1.2,
        "rotation": 0,
        "opacity": 1.0
    }"##
    .to_string()
}
