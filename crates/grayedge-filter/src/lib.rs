//! grayedge-filter - Edge detection and Gaussian filtering
//!
//! This crate provides the edge operators and the filters they are built on:
//!
//! - Convolution with separable and full 2D kernels
//! - Gaussian blur
//! - Gradient operators (Sobel, Scharr, Prewitt) with quantized directions
//! - Non-maximum suppression and Canny edge detection
//! - Laplacian-of-Gaussian and Difference-of-Gaussians
//!
//! Every operator accepts any [`grayedge_core::Image`] as its source and
//! writes 8-bit gray destinations whose bounds must match the source.

pub mod blur;
pub mod canny;
mod check;
pub mod convolve;
mod error;
pub mod gauss;
pub mod gradient;
pub mod kernel;
pub mod nms;

pub use error::{FilterError, FilterResult};
pub use kernel::{Kernel2D, SeparableKernel};

// Re-export commonly used functions
pub use blur::{BlurOptions, DEFAULT_STD_DEV, MAX_RADIUS, blur, gaussian_kernel};
pub use canny::{canny, canny_with_options};
pub use convolve::{Convolution, convolve, truncate_to_u8};
pub use gauss::{LOG_KERNEL, difference_of_gaussians, laplacian_of_gaussian};
pub use gradient::{
    Direction, GradientOperator, compute_gradient, gradient_magnitude, prewitt,
    quantize_direction, scharr, sobel,
};
pub use nms::{EDGE, NOT_EDGE, POSSIBLE_EDGE, classify, non_max_suppress};
