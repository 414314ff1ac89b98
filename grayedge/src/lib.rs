//! grayedge - Edge detection for 8-bit grayscale rasters
//!
//! # Overview
//!
//! - Gradient operators (Sobel, Scharr, Prewitt) producing magnitude and
//!   quantized direction rasters
//! - Non-maximum suppression and Canny edge detection
//! - Laplacian-of-Gaussian and Difference-of-Gaussians filters
//! - Gaussian blur and general convolution
//! - PNG and PGM I/O
//!
//! # Example
//!
//! ```
//! use grayedge::{GrayImage, Rect, canny};
//!
//! let mut src = GrayImage::new(Rect::from_size(16, 16));
//! for (x, y) in src.bounds().points() {
//!     src.set_unchecked(x, y, if x < 8 { 30 } else { 220 });
//! }
//! let mut edges = src.create_template();
//! canny(&mut edges, &src).unwrap();
//! assert!(edges.count_nonzero() > 0);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use grayedge_core::*;

// Re-export the operators at the top level
pub use grayedge_filter::{
    BlurOptions, Direction, FilterError, FilterResult, GradientOperator, blur, canny,
    canny_with_options, convolve, difference_of_gaussians, laplacian_of_gaussian,
    non_max_suppress, prewitt, quantize_direction, scharr, sobel,
};

// Re-export domain crates as modules to avoid name conflicts
pub use grayedge_filter as filter;
pub use grayedge_io as io;
