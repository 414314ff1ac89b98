//! Convolution kernels
//!
//! Two kernel shapes are supported:
//!
//! - [`SeparableKernel`] - a pair of 1D weight vectors whose outer product is
//!   the 2D kernel, evaluated as a vertical then a horizontal pass
//! - [`Kernel2D`] - an explicit square matrix with a normalization factor
//!
//! Both store their weights as `Cow<'static, [f64]>` so that fixed kernels
//! can live in `static` items while computed kernels own their data.

use crate::{FilterError, FilterResult};
use std::borrow::Cow;

/// A linearly separable, square convolution kernel.
///
/// `x` holds the horizontal weights and `y` the vertical weights. Both must
/// have the same odd length; the middle element weights the center pixel.
/// The horizontal Sobel kernel, for instance, is `x = [-1, 0, 1]`,
/// `y = [1, 2, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SeparableKernel {
    x: Cow<'static, [f64]>,
    y: Cow<'static, [f64]>,
}

impl SeparableKernel {
    /// Create a kernel from owned weight vectors.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if the lengths differ or are
    /// not odd.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> FilterResult<Self> {
        let kernel = SeparableKernel {
            x: Cow::Owned(x),
            y: Cow::Owned(y),
        };
        kernel.validate()?;
        Ok(kernel)
    }

    /// Create a kernel from static weights without validation.
    ///
    /// Used for the fixed derivative kernels; their shape is checked by unit
    /// tests instead of at every call.
    pub const fn from_static(x: &'static [f64], y: &'static [f64]) -> Self {
        SeparableKernel {
            x: Cow::Borrowed(x),
            y: Cow::Borrowed(y),
        }
    }

    /// Horizontal weights.
    #[inline]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Vertical weights.
    #[inline]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Number of taps on each side of the center.
    #[inline]
    pub fn radius(&self) -> usize {
        self.x.len() / 2
    }

    /// Check the kernel shape.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if the lengths differ or are
    /// not odd.
    pub fn validate(&self) -> FilterResult<()> {
        if self.x.len() != self.y.len() {
            return Err(FilterError::InvalidKernel(format!(
                "kernel not square: {} horizontal vs {} vertical weights",
                self.x.len(),
                self.y.len()
            )));
        }
        if self.x.len() % 2 != 1 {
            return Err(FilterError::InvalidKernel(format!(
                "kernel length is not odd: {}",
                self.x.len()
            )));
        }
        Ok(())
    }
}

/// An explicit square convolution kernel.
///
/// The convolution sum at each pixel is divided by `normalization` before
/// rounding.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel2D {
    size: usize,
    data: Cow<'static, [f64]>,
    normalization: f64,
}

impl Kernel2D {
    /// Smallest accepted side length.
    pub const MIN_SIZE: usize = 3;

    /// Build a square kernel from a flat row-major coefficient list.
    ///
    /// The normalization factor is the coefficient sum, or 1 when the sum
    /// is zero (derivative kernels).
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if the length is not a perfect
    /// square, if the side is even, or if the side is below
    /// [`Kernel2D::MIN_SIZE`].
    pub fn new(coefficients: Vec<f64>) -> FilterResult<Self> {
        let size = Self::side_of(coefficients.len())?;
        let sum: f64 = coefficients.iter().sum();
        let normalization = if sum == 0.0 { 1.0 } else { sum };
        Ok(Kernel2D {
            size,
            data: Cow::Owned(coefficients),
            normalization,
        })
    }

    /// Build a kernel with an explicit normalization factor.
    ///
    /// # Errors
    ///
    /// Same shape rules as [`Kernel2D::new`]; additionally fails if
    /// `normalization` is zero or not finite.
    pub fn with_normalization(coefficients: Vec<f64>, normalization: f64) -> FilterResult<Self> {
        if normalization == 0.0 || !normalization.is_finite() {
            return Err(FilterError::InvalidKernel(format!(
                "normalization must be finite and non-zero, got {normalization}"
            )));
        }
        let size = Self::side_of(coefficients.len())?;
        Ok(Kernel2D {
            size,
            data: Cow::Owned(coefficients),
            normalization,
        })
    }

    /// Create a kernel from static coefficients without validation.
    pub const fn from_static(size: usize, data: &'static [f64], normalization: f64) -> Self {
        Kernel2D {
            size,
            data: Cow::Borrowed(data),
            normalization,
        }
    }

    fn side_of(len: usize) -> FilterResult<usize> {
        let size = (len as f64).sqrt().round() as usize;
        if size * size != len {
            return Err(FilterError::InvalidKernel(format!(
                "{len} coefficients do not form a square"
            )));
        }
        if size < Self::MIN_SIZE {
            return Err(FilterError::InvalidKernel(format!(
                "kernel size {size} is below the minimum of {}",
                Self::MIN_SIZE
            )));
        }
        if size % 2 != 1 {
            return Err(FilterError::InvalidKernel(format!(
                "kernel size must be odd, got {size}"
            )));
        }
        Ok(size)
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of taps on each side of the center.
    #[inline]
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    /// Divisor applied to each convolution sum.
    #[inline]
    pub fn normalization(&self) -> f64 {
        self.normalization
    }

    /// Row-major coefficients.
    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Coefficient at column `kx`, row `ky`.
    ///
    /// Returns `None` outside the kernel.
    #[inline]
    pub fn get(&self, kx: usize, ky: usize) -> Option<f64> {
        if kx >= self.size || ky >= self.size {
            return None;
        }
        Some(self.data[ky * self.size + kx])
    }

    /// Check the kernel shape and normalization.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] on any inconsistency.
    pub fn validate(&self) -> FilterResult<()> {
        let size = Self::side_of(self.data.len())?;
        if size != self.size {
            return Err(FilterError::InvalidKernel(format!(
                "declared size {} does not match {} coefficients",
                self.size,
                self.data.len()
            )));
        }
        if self.normalization == 0.0 || !self.normalization.is_finite() {
            return Err(FilterError::InvalidKernel(format!(
                "normalization must be finite and non-zero, got {}",
                self.normalization
            )));
        }
        Ok(())
    }
}
