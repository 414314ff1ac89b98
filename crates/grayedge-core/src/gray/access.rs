//! Pixel access functions
//!
//! Bounds-checked and unchecked getters/setters for [`GrayImage`], plus the
//! open-boundary lookup used by neighborhood operators.

use super::GrayImage;
use crate::error::{Error, Result};

impl GrayImage {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if the coordinates are out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        if !self.rect.contains(x, y) {
            return None;
        }
        Some(self.pix[self.pix_offset(x, y)])
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the offset falls outside the buffer.
    #[inline]
    pub fn get_unchecked(&self, x: i32, y: i32) -> u8 {
        self.pix[self.pix_offset(x, y)]
    }

    /// Get a pixel value, reading 0 outside the bounds.
    ///
    /// This is the open boundary policy: neighbors past the edge of the
    /// image contribute magnitude zero instead of being reflected or clamped.
    #[inline]
    pub fn at_or_zero(&self, x: i32, y: i32) -> u8 {
        self.get(x, y).unwrap_or(0)
    }

    /// Set a pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the coordinates are out of bounds.
    pub fn set(&mut self, x: i32, y: i32, val: u8) -> Result<()> {
        if !self.rect.contains(x, y) {
            return Err(Error::OutOfBounds {
                x,
                y,
                bounds: self.rect,
            });
        }
        let off = self.pix_offset(x, y);
        self.pix[off] = val;
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the offset falls outside the buffer.
    #[inline]
    pub fn set_unchecked(&mut self, x: i32, y: i32, val: u8) {
        let off = self.pix_offset(x, y);
        self.pix[off] = val;
    }
}
