//! Gaussian blur
//!
//! Smooths an 8-bit grayscale image with a separable Gaussian kernel. The
//! kernel has `2 * size + 1` taps with weights `exp(-i² / (2·σ²))`,
//! normalized to sum to one.

use crate::convolve::convolve;
use crate::{FilterError, FilterResult, SeparableKernel};
use grayedge_core::GrayImage;

/// Standard deviation used when no options are given.
pub const DEFAULT_STD_DEV: f64 = 0.5;

/// Largest kernel radius [`gaussian_kernel`] accepts.
pub const MAX_RADIUS: usize = 1 << 16;

/// Parameters of [`blur`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlurOptions {
    /// Standard deviation of the Gaussian, in pixels
    pub std_dev: f64,
    /// Taps on each side of the center; 0 selects `ceil(6·std_dev)`
    pub size: usize,
}

impl Default for BlurOptions {
    fn default() -> Self {
        BlurOptions {
            std_dev: DEFAULT_STD_DEV,
            size: 0,
        }
    }
}

impl BlurOptions {
    /// Options with the given standard deviation and an automatic size.
    pub fn with_std_dev(std_dev: f64) -> Self {
        BlurOptions {
            std_dev,
            ..Default::default()
        }
    }

    /// Taps on each side of the center after resolving the automatic size.
    pub fn radius(&self) -> usize {
        if self.size >= 1 {
            self.size
        } else {
            (self.std_dev * 6.0).ceil() as usize
        }
    }
}

/// Build the separable Gaussian kernel described by `opts`.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] if `std_dev` is not a
/// positive finite number, or if the radius exceeds [`MAX_RADIUS`].
pub fn gaussian_kernel(opts: &BlurOptions) -> FilterResult<SeparableKernel> {
    let sd = opts.std_dev;
    if !(sd.is_finite() && sd > 0.0) {
        return Err(FilterError::InvalidParameters(format!(
            "blur standard deviation must be positive, got {sd}"
        )));
    }
    // The automatic radius saturates at usize::MAX for huge deviations.
    let size = opts.radius();
    if size > MAX_RADIUS {
        return Err(FilterError::InvalidParameters(format!(
            "blur radius {size} exceeds {MAX_RADIUS} (std_dev {sd})"
        )));
    }
    let mut weights = vec![0.0f64; 2 * size + 1];
    for i in 0..=size {
        let x = i as f64 / sd;
        let w = (-0.5 * x * x).exp();
        weights[size - i] = w;
        weights[size + i] = w;
    }
    let sum: f64 = weights.iter().sum();
    for w in weights.iter_mut() {
        *w /= sum;
    }
    SeparableKernel::new(weights.clone(), weights)
}

/// Gaussian-blur `src` into `dst`.
///
/// # Arguments
/// * `dst` - Output image with the bounds of `src`
/// * `src` - Input 8-bit grayscale image
/// * `opts` - Blur parameters; `None` selects [`BlurOptions::default`]
///
/// # Errors
///
/// - [`FilterError::InvalidParameters`] for a bad standard deviation
/// - [`FilterError::IncompatibleBounds`] if `dst` and `src` bounds differ
pub fn blur(dst: &mut GrayImage, src: &GrayImage, opts: Option<&BlurOptions>) -> FilterResult<()> {
    let opts = opts.copied().unwrap_or_default();
    let kernel = gaussian_kernel(&opts)?;
    convolve(dst, src, &kernel)
}
