//! Gradient magnitude and direction
//!
//! Sobel, Scharr and Prewitt are the same operator with different smoothing
//! weights: the X-derivative kernel differentiates horizontally and smooths
//! vertically, the Y-derivative kernel does the opposite.
//!
//! | Operator | X-kernel (x / y weights)  | Y-kernel (x / y weights)  |
//! |----------|---------------------------|---------------------------|
//! | Sobel    | `[-1, 0, 1]` / `[1, 2, 1]`  | `[1, 2, 1]` / `[-1, 0, 1]`  |
//! | Scharr   | `[-1, 0, 1]` / `[3, 10, 3]` | `[3, 10, 3]` / `[-1, 0, 1]` |
//! | Prewitt  | `[-1, 0, 1]` / `[1, 1, 1]`  | `[1, 1, 1]` / `[-1, 0, 1]`  |
//!
//! The two derivative rasters are 8-bit convolution outputs. From them each
//! pixel gets a magnitude `sqrt(gx² + gy²)`, cast by truncation, and a
//! direction quantized to 0, 45, 90 or 135 degrees from `atan(gy / gx)`.

use crate::check::{check_present, check_same_bounds};
use crate::convolve::{convolve, truncate_to_u8};
use crate::{FilterResult, SeparableKernel};
use grayedge_core::{GrayImage, Image, to_gray};
use std::f64::consts::PI;

const DERIV: &[f64] = &[-1.0, 0.0, 1.0];

/// Sobel X-derivative kernel.
pub static SOBEL_X: SeparableKernel = SeparableKernel::from_static(DERIV, &[1.0, 2.0, 1.0]);
/// Sobel Y-derivative kernel.
pub static SOBEL_Y: SeparableKernel = SeparableKernel::from_static(&[1.0, 2.0, 1.0], DERIV);
/// Scharr X-derivative kernel.
pub static SCHARR_X: SeparableKernel = SeparableKernel::from_static(DERIV, &[3.0, 10.0, 3.0]);
/// Scharr Y-derivative kernel.
pub static SCHARR_Y: SeparableKernel = SeparableKernel::from_static(&[3.0, 10.0, 3.0], DERIV);
/// Prewitt X-derivative kernel.
pub static PREWITT_X: SeparableKernel = SeparableKernel::from_static(DERIV, &[1.0, 1.0, 1.0]);
/// Prewitt Y-derivative kernel.
pub static PREWITT_Y: SeparableKernel = SeparableKernel::from_static(&[1.0, 1.0, 1.0], DERIV);

/// Quantized gradient orientation.
///
/// The discriminant is the code stored in direction rasters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    /// Horizontal gradient (vertical edge)
    Deg0 = 0,
    /// Gradient along the rising diagonal
    Deg45 = 45,
    /// Vertical gradient (horizontal edge)
    Deg90 = 90,
    /// Gradient along the falling diagonal
    Deg135 = 135,
}

impl Direction {
    /// All four orientations in code order.
    pub const ALL: [Direction; 4] = [
        Direction::Deg0,
        Direction::Deg45,
        Direction::Deg90,
        Direction::Deg135,
    ];

    /// The 8-bit code written to direction rasters.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Parse a direction raster code.
    ///
    /// Returns `None` for anything but 0, 45, 90 or 135.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Direction::Deg0),
            45 => Some(Direction::Deg45),
            90 => Some(Direction::Deg90),
            135 => Some(Direction::Deg135),
            _ => None,
        }
    }

    /// The two neighbor offsets `(dx, dy)` lying along the gradient.
    ///
    /// Image rows grow downward, so the 45 degree pair is north-east and
    /// south-west.
    pub fn neighbor_offsets(self) -> [(i32, i32); 2] {
        match self {
            Direction::Deg0 => [(-1, 0), (1, 0)],
            Direction::Deg45 => [(1, -1), (-1, 1)],
            Direction::Deg90 => [(0, -1), (0, 1)],
            Direction::Deg135 => [(-1, -1), (1, 1)],
        }
    }
}

/// Quantize the gradient `(gx, gy)` to one of four orientations.
///
/// The angle is `atan(gy / gx)` rather than `atan2`, so opposite quadrants
/// share a bucket; `gx == 0` gives ±90° and `0 / 0` falls through to 0°. The
/// angle is reduced modulo 2π and bucketed at π/8, 3π/8, 5π/8 and 7π/8,
/// upper bounds inclusive.
pub fn quantize_direction(gx: f64, gy: f64) -> Direction {
    let angle = (gy / gx).atan() % (2.0 * PI);
    if angle <= PI / 8.0 {
        Direction::Deg0
    } else if angle <= PI * 3.0 / 8.0 {
        Direction::Deg45
    } else if angle <= PI * 5.0 / 8.0 {
        Direction::Deg90
    } else if angle <= PI * 7.0 / 8.0 {
        Direction::Deg135
    } else {
        Direction::Deg0
    }
}

/// Gradient magnitude `sqrt(gx² + gy²)` cast to 8 bits by truncation.
#[inline]
pub fn gradient_magnitude(gx: f64, gy: f64) -> u8 {
    truncate_to_u8((gx * gx + gy * gy).sqrt())
}

/// The three first-derivative operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradientOperator {
    /// `[1, 2, 1]` smoothing
    Sobel,
    /// `[3, 10, 3]` smoothing, lower angular error
    Scharr,
    /// `[1, 1, 1]` smoothing
    Prewitt,
}

impl GradientOperator {
    /// The X- and Y-derivative kernels of this operator.
    pub fn kernels(self) -> (&'static SeparableKernel, &'static SeparableKernel) {
        match self {
            GradientOperator::Sobel => (&SOBEL_X, &SOBEL_Y),
            GradientOperator::Scharr => (&SCHARR_X, &SCHARR_Y),
            GradientOperator::Prewitt => (&PREWITT_X, &PREWITT_Y),
        }
    }

    /// Lower-case operator name.
    pub fn name(self) -> &'static str {
        match self {
            GradientOperator::Sobel => "sobel",
            GradientOperator::Scharr => "scharr",
            GradientOperator::Prewitt => "prewitt",
        }
    }

    /// Run this operator; see [`compute_gradient`].
    pub fn apply(
        self,
        mag: Option<&mut GrayImage>,
        dir: Option<&mut GrayImage>,
        src: &dyn Image,
    ) -> FilterResult<()> {
        let (kx, ky) = self.kernels();
        compute_gradient(mag, dir, src, kx, ky)
    }
}

/// Compute gradient magnitude and/or direction of `src`.
///
/// `src` is normalized to 8-bit gray first. Direction pixels receive the
/// codes of [`Direction`].
///
/// # Arguments
/// * `mag` - Optional magnitude output with the bounds of `src`
/// * `dir` - Optional direction output with the bounds of `src`
/// * `src` - Input image of any layout
/// * `kernel_x` - Horizontal-derivative kernel
/// * `kernel_y` - Vertical-derivative kernel
///
/// # Errors
///
/// - [`crate::FilterError::NullInput`] if `src` has no pixels
/// - [`crate::FilterError::IncompatibleBounds`] if an output's bounds differ
/// - any convolution error, unchanged
pub fn compute_gradient(
    mut mag: Option<&mut GrayImage>,
    mut dir: Option<&mut GrayImage>,
    src: &dyn Image,
    kernel_x: &SeparableKernel,
    kernel_y: &SeparableKernel,
) -> FilterResult<()> {
    check_present(src, "src")?;
    if let Some(m) = mag.as_deref() {
        check_same_bounds(src, m)?;
    }
    if let Some(d) = dir.as_deref() {
        check_same_bounds(src, d)?;
    }

    let srcg = to_gray(src);
    let b = srcg.bounds();

    let mut mx = GrayImage::new(b);
    convolve(&mut mx, &srcg, kernel_x)?;
    let mut my = GrayImage::new(b);
    convolve(&mut my, &srcg, kernel_y)?;

    for y in b.min_y..b.max_y {
        for x in b.min_x..b.max_x {
            let cx = mx.get_unchecked(x, y) as f64;
            let cy = my.get_unchecked(x, y) as f64;

            if let Some(m) = mag.as_deref_mut() {
                m.set_unchecked(x, y, gradient_magnitude(cx, cy));
            }
            if let Some(d) = dir.as_deref_mut() {
                d.set_unchecked(x, y, quantize_direction(cx, cy).code());
            }
        }
    }
    Ok(())
}

/// Sobel gradient magnitude and direction.
///
/// # Arguments
/// * `mag` - Optional magnitude output with the bounds of `src`
/// * `dir` - Optional direction output; pixels hold 0, 45, 90 or 135
/// * `src` - Input image of any layout
///
/// # Errors
///
/// As [`compute_gradient`].
pub fn sobel(
    mag: Option<&mut GrayImage>,
    dir: Option<&mut GrayImage>,
    src: &dyn Image,
) -> FilterResult<()> {
    compute_gradient(mag, dir, src, &SOBEL_X, &SOBEL_Y)
}

/// Scharr gradient magnitude and direction.
///
/// Like [`sobel`] with less angular error.
pub fn scharr(
    mag: Option<&mut GrayImage>,
    dir: Option<&mut GrayImage>,
    src: &dyn Image,
) -> FilterResult<()> {
    compute_gradient(mag, dir, src, &SCHARR_X, &SCHARR_Y)
}

/// Prewitt gradient magnitude and direction.
pub fn prewitt(
    mag: Option<&mut GrayImage>,
    dir: Option<&mut GrayImage>,
    src: &dyn Image,
) -> FilterResult<()> {
    compute_gradient(mag, dir, src, &PREWITT_X, &PREWITT_Y)
}
