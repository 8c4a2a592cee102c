//! Layout engine: display-ordered text to positioned coverage masks.
//!
//! Text is split on `\n` into lines. Each line is rasterized glyph by glyph
//! from left to right with `letter_spacing` extra pixels between glyphs;
//! baselines sit `line_height * font_size` apart. The ink box of the whole
//! block is then centred on the anchor.
//!
//! The block's bounds are the single source of truth for canvas size: every
//! effect layer of a render is built on [`TextLayout::canvas_mask`].

use super::mask::{CoverageMask, PixelRect};
use super::rasterizer::GlyphRasterizer;

/// Layout inputs taken from the style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub font_size: f32,
    /// Extra horizontal gap between consecutive glyphs, in pixels.
    pub letter_spacing: f32,
    /// Baseline distance as a multiple of `font_size`.
    pub line_height: f32,
    /// Image-space point the block is centred on.
    pub anchor: (i32, i32),
}

/// One laid-out line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineLayout {
    /// Ink of the line. Zero-sized for lines without visible glyphs.
    pub mask: CoverageMask,
    /// Image-space y of the baseline.
    pub baseline: i32,
}

/// Result of laying out a text block.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub lines: Vec<LineLayout>,
    /// Union of all line ink boxes; `None` when nothing is visible.
    pub bounds: Option<PixelRect>,
}

impl TextLayout {
    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    /// All lines merged onto one working mask: the block bounds grown by
    /// `margin` on every side.
    pub fn canvas_mask(&self, margin: usize) -> Option<CoverageMask> {
        let rect = self.bounds?.inflated(margin);
        let mut canvas = CoverageMask::new(rect.width, rect.height, (rect.x, rect.y));
        for line in &self.lines {
            canvas.blit_max(&line.mask);
        }
        Some(canvas)
    }
}

/// Rasterize a single line with its baseline at `baseline`.
fn layout_line<R: GlyphRasterizer + ?Sized>(
    line: &str,
    rasterizer: &R,
    params: &LayoutParams,
    baseline: i32,
) -> CoverageMask {
    let mut pen = 0.0f32;
    let mut placed = Vec::new();

    for (i, ch) in line.chars().enumerate() {
        if i > 0 {
            pen += params.letter_spacing;
        }
        let glyph = rasterizer.rasterize(ch, params.font_size);
        let advance = glyph.advance;
        if glyph.width > 0 && glyph.height > 0 {
            let x = pen.round() as i32 + glyph.left;
            let y = baseline - glyph.top;
            placed.push((PixelRect::new(x, y, glyph.width, glyph.height), glyph));
        }
        pen += advance;
    }

    let Some(ink) = placed.iter().map(|(r, _)| *r).reduce(|a, b| a.union(&b)) else {
        return CoverageMask::new(0, 0, (0, baseline));
    };

    let mut mask = CoverageMask::new(ink.width, ink.height, (ink.x, ink.y));
    for (rect, glyph) in &placed {
        let data = ndarray::Array2::from_shape_fn((rect.height, rect.width), |(y, x)| {
            glyph.coverage.get(y * glyph.width + x).copied().unwrap_or(0.0)
        });
        mask.blit_max(&CoverageMask::from_array(data, (rect.x, rect.y)));
    }
    mask
}

/// Lay out display-ordered `text` and centre it on `params.anchor`.
///
/// Empty text, or text with no visible glyphs, yields a layout with
/// `bounds == None`.
pub fn layout_text<R: GlyphRasterizer + ?Sized>(
    text: &str,
    rasterizer: &R,
    params: &LayoutParams,
) -> TextLayout {
    let metrics = rasterizer.line_metrics(params.font_size);
    let advance = params.line_height * params.font_size;

    let mut lines = Vec::new();
    let mut bounds: Option<PixelRect> = None;

    for (i, line) in text.split('\n').enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let baseline = (metrics.ascent + i as f32 * advance).round() as i32;
        let mask = layout_line(line, rasterizer, params, baseline);

        if mask.width() > 0 {
            let rect = mask.rect();
            bounds = Some(bounds.map_or(rect, |b| b.union(&rect)));
        }
        log::trace!("line {i}: {} chars, ink {:?}", line.chars().count(), mask.rect());
        lines.push(LineLayout { mask, baseline });
    }

    let Some(block) = bounds else {
        return TextLayout { lines, bounds: None };
    };

    let (cx, cy) = block.center();
    let (dx, dy) = (params.anchor.0 - cx, params.anchor.1 - cy);
    let lines = lines
        .into_iter()
        .map(|l| LineLayout { mask: l.mask.shifted(dx, dy), baseline: l.baseline + dy })
        .collect();
    let bounds = block.translated(dx, dy);
    log::debug!("laid out text block {bounds:?} around anchor {:?}", params.anchor);

    TextLayout { lines, bounds: Some(bounds) }
}
