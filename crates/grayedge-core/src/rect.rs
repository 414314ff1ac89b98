//! Integer bounding rectangles
//!
//! A [`Rect`] is the half-open region `[min_x, max_x) × [min_y, max_y)`.
//! Every raster carries one, and images used together in an operator call
//! are matched by comparing their rectangles.

use std::fmt;

/// Half-open integer rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Inclusive left edge
    pub min_x: i32,
    /// Inclusive top edge
    pub min_y: i32,
    /// Exclusive right edge
    pub max_x: i32,
    /// Exclusive bottom edge
    pub max_y: i32,
}

impl Rect {
    /// Create a rectangle from two corners.
    ///
    /// Corners are swapped as needed so that `min <= max` on both axes.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Rect {
            min_x: x0.min(x1),
            min_y: y0.min(y1),
            max_x: x0.max(x1),
            max_y: y0.max(y1),
        }
    }

    /// Create a rectangle anchored at the origin.
    pub fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }

    /// Number of pixels covered.
    #[inline]
    pub fn area(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.width() as usize * self.height() as usize
        }
    }

    /// True when the rectangle covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min_x >= self.max_x || self.min_y >= self.max_y
    }

    /// Check whether `(x, y)` lies inside the rectangle.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.min_x <= x && x < self.max_x && self.min_y <= y && y < self.max_y
    }

    /// Same rectangle shifted by `(dx, dy)`.
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Rect {
            min_x: self.min_x + dx,
            min_y: self.min_y + dy,
            max_x: self.max_x + dx,
            max_y: self.max_y + dy,
        }
    }

    /// Iterate over every `(x, y)` in row-major order.
    pub fn points(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let Rect {
            min_x,
            min_y,
            max_x,
            max_y,
        } = *self;
        (min_y..max_y).flat_map(move |y| (min_x..max_x).map(move |x| (x, y)))
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{})-({},{})",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}
