//! GrayImage - single-channel 8-bit raster
//!
//! The `GrayImage` is the raster every edge operator reads and writes.
//!
//! # Pixel layout
//!
//! - One byte per pixel
//! - Rows are `stride` bytes apart; `stride >= width`
//! - Pixel `(x, y)` lives at `(y - min_y) * stride + (x - min_x)`
//!
//! # Ownership model
//!
//! Rasters are plain owned buffers. Operators borrow sources immutably and
//! destinations mutably, so a destination can never alias a source within
//! one call.

mod access;

use crate::Rect;
use crate::error::{Error, Result};

/// Single-channel 8-bit image with explicit bounds.
///
/// # Examples
///
/// ```
/// use grayedge_core::{GrayImage, Rect};
///
/// let img = GrayImage::new(Rect::new(10, 10, 20, 15));
/// assert_eq!(img.width(), 10);
/// assert_eq!(img.height(), 5);
/// assert_eq!(img.stride(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GrayImage {
    rect: Rect,
    stride: usize,
    pix: Vec<u8>,
}

impl GrayImage {
    /// Create a zero-filled image covering `rect`.
    ///
    /// An empty `rect` yields an image with no pixel storage.
    pub fn new(rect: Rect) -> Self {
        if rect.is_empty() {
            return GrayImage {
                rect,
                stride: 0,
                pix: Vec::new(),
            };
        }
        let stride = rect.width() as usize;
        GrayImage {
            rect,
            stride,
            pix: vec![0; rect.area()],
        }
    }

    /// Create a zero-filled `width x height` image anchored at the origin.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either dimension is not positive.
    pub fn from_size(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self::new(Rect::from_size(width, height)))
    }

    /// Wrap an existing buffer.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidStride`] if `stride < width`
    /// - [`Error::BufferTooSmall`] if `pix.len() < stride * height`
    pub fn from_raw(rect: Rect, stride: usize, pix: Vec<u8>) -> Result<Self> {
        let width = rect.width().max(0) as usize;
        let height = rect.height().max(0) as usize;
        if !rect.is_empty() && stride < width {
            return Err(Error::InvalidStride { stride, width });
        }
        let required = stride * height;
        if pix.len() < required {
            return Err(Error::BufferTooSmall {
                len: pix.len(),
                required,
            });
        }
        Ok(GrayImage { rect, stride, pix })
    }

    /// Create a zero-filled image with the same bounds as `self`.
    pub fn create_template(&self) -> Self {
        Self::new(self.rect)
    }

    /// Get the bounding rectangle.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.rect
    }

    /// Get the width in pixels.
    #[inline]
    pub fn width(&self) -> i32 {
        self.rect.width()
    }

    /// Get the height in pixels.
    #[inline]
    pub fn height(&self) -> i32 {
        self.rect.height()
    }

    /// Get the byte distance between vertically adjacent pixels.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Get raw access to the pixel buffer.
    #[inline]
    pub fn pix(&self) -> &[u8] {
        &self.pix
    }

    /// Get mutable raw access to the pixel buffer.
    #[inline]
    pub fn pix_mut(&mut self) -> &mut [u8] {
        &mut self.pix
    }

    /// True when the image has no pixels, the analogue of a missing image.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rect.is_empty() || self.pix.is_empty()
    }

    /// Check whether `other` covers exactly the same rectangle.
    #[inline]
    pub fn same_bounds(&self, other: &GrayImage) -> bool {
        self.rect == other.rect
    }

    /// Buffer offset of pixel `(x, y)`.
    ///
    /// The caller guarantees that `(x, y)` is inside the bounds.
    #[inline]
    pub fn pix_offset(&self, x: i32, y: i32) -> usize {
        (y - self.rect.min_y) as usize * self.stride + (x - self.rect.min_x) as usize
    }

    /// Get one row of pixels.
    ///
    /// # Panics
    ///
    /// Panics if `y` is outside the bounds.
    pub fn row(&self, y: i32) -> &[u8] {
        assert!(
            self.rect.min_y <= y && y < self.rect.max_y,
            "row {y} outside {}",
            self.rect
        );
        let start = self.pix_offset(self.rect.min_x, y);
        &self.pix[start..start + self.rect.width() as usize]
    }

    /// Get one row of pixels for writing.
    ///
    /// # Panics
    ///
    /// Panics if `y` is outside the bounds.
    pub fn row_mut(&mut self, y: i32) -> &mut [u8] {
        assert!(
            self.rect.min_y <= y && y < self.rect.max_y,
            "row {y} outside {}",
            self.rect
        );
        let start = self.pix_offset(self.rect.min_x, y);
        let width = self.rect.width() as usize;
        &mut self.pix[start..start + width]
    }

    /// Set every pixel to `val`.
    pub fn fill(&mut self, val: u8) {
        for y in self.rect.min_y..self.rect.max_y {
            self.row_mut(y).fill(val);
        }
    }

    /// Count pixels with a non-zero value.
    pub fn count_nonzero(&self) -> usize {
        (self.rect.min_y..self.rect.max_y)
            .map(|y| self.row(y).iter().filter(|&&v| v != 0).count())
            .sum()
    }
}
