//! Coverage masks: single-channel glyph coverage anchored in image space.

use ndarray::Array2;

/// Axis-aligned pixel rectangle in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: usize,
    pub height: usize,
}

impl PixelRect {
    pub const fn new(x: i32, y: i32, width: usize, height: usize) -> Self {
        Self { x, y, width, height }
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &PixelRect) -> PixelRect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        PixelRect::new(x, y, (right - x) as usize, (bottom - y) as usize)
    }

    /// Same size, moved by `(dx, dy)`.
    pub fn translated(&self, dx: i32, dy: i32) -> PixelRect {
        PixelRect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Grown by `margin` pixels on every side.
    pub fn inflated(&self, margin: usize) -> PixelRect {
        let m = margin as i32;
        PixelRect::new(self.x - m, self.y - m, self.width + 2 * margin, self.height + 2 * margin)
    }

    /// Midpoint, `x + width / 2` in integer pixels.
    pub fn center(&self) -> (i32, i32) {
        (self.x + (self.width / 2) as i32, self.y + (self.height / 2) as i32)
    }
}

/// Per-pixel coverage in 0.0-1.0, positioned so that `data[[0, 0]]` sits at
/// `origin` in image space.
///
/// A mask belongs to the stage that produced it; downstream stages only
/// read it and build new masks rather than editing shared ones.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageMask {
    data: Array2<f32>,
    origin: (i32, i32),
}

impl CoverageMask {
    /// Fully transparent mask.
    pub fn new(width: usize, height: usize, origin: (i32, i32)) -> Self {
        Self { data: Array2::zeros((height, width)), origin }
    }

    /// Wrap an existing `(height, width)` array. Values are clamped to 0.0-1.0.
    pub fn from_array(data: Array2<f32>, origin: (i32, i32)) -> Self {
        Self { data: data.mapv(|v| v.clamp(0.0, 1.0)), origin }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// `(height, width)`, ndarray order.
    pub fn dim(&self) -> (usize, usize) {
        self.data.dim()
    }

    pub fn origin(&self) -> (i32, i32) {
        self.origin
    }

    /// Image-space rectangle covered by the mask's grid.
    pub fn rect(&self) -> PixelRect {
        PixelRect::new(self.origin.0, self.origin.1, self.width(), self.height())
    }

    pub fn data(&self) -> &Array2<f32> {
        &self.data
    }

    pub fn into_data(self) -> Array2<f32> {
        self.data
    }

    /// The same coverage moved by `(dx, dy)` in image space.
    pub fn shifted(self, dx: i32, dy: i32) -> Self {
        Self { origin: (self.origin.0 + dx, self.origin.1 + dy), ..self }
    }

    /// True when the grid has no pixels or every pixel is uncovered.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty() || self.data.iter().all(|&v| v <= 0.0)
    }

    /// Coverage at local `(x, y)`, zero outside the grid.
    pub fn get(&self, x: i64, y: i64) -> f32 {
        if x < 0 || y < 0 {
            return 0.0;
        }
        self.data.get((y as usize, x as usize)).copied().unwrap_or(0.0)
    }

    /// Paint `other` into this mask at its image-space position, keeping the
    /// larger coverage where they overlap. Parts outside this grid are cut.
    pub fn blit_max(&mut self, other: &CoverageMask) {
        let dx = (other.origin.0 - self.origin.0) as i64;
        let dy = (other.origin.1 - self.origin.1) as i64;
        let (h, w) = (self.height() as i64, self.width() as i64);

        for ((oy, ox), &v) in other.data.indexed_iter() {
            if v <= 0.0 {
                continue;
            }
            let tx = ox as i64 + dx;
            let ty = oy as i64 + dy;
            if tx < 0 || ty < 0 || tx >= w || ty >= h {
                continue;
            }
            let cell = &mut self.data[[ty as usize, tx as usize]];
            if v > *cell {
                *cell = v;
            }
        }
    }

    /// Tight local-space box around pixels with coverage above zero.
    pub fn content_bounds(&self) -> Option<PixelRect> {
        let mut min_x = usize::MAX;
        let mut min_y = usize::MAX;
        let mut max_x = 0usize;
        let mut max_y = 0usize;
        let mut any = false;

        for ((y, x), &v) in self.data.indexed_iter() {
            if v > 0.0 {
                any = true;
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
            }
        }

        any.then(|| {
            PixelRect::new(min_x as i32, min_y as i32, max_x - min_x + 1, max_y - min_y + 1)
        })
    }
}
