//! Error types for grayedge-filter
//!
//! Kernel construction, convolution and blur failures are reported through
//! the same enum as the edge operators, so they propagate unchanged through
//! `?` from any stage of a pipeline.

use grayedge_core::Rect;
use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] grayedge_core::Error),

    /// A required image is missing (has no pixels)
    #[error("{0} is nil")]
    NullInput(&'static str),

    /// A direction code outside {0, 45, 90, 135} reached suppression
    #[error("bad direction ({x}, {y}): {code}")]
    InvalidDirection {
        /// Column of the offending pixel
        x: i32,
        /// Row of the offending pixel
        y: i32,
        /// The code found in the direction raster
        code: u8,
    },

    /// A destination does not cover the same rectangle as the source
    #[error("incompatible bounds: expected {expected}, got {actual}")]
    IncompatibleBounds {
        /// Bounds of the source
        expected: Rect,
        /// Bounds of the offending destination
        actual: Rect,
    },

    /// Invalid kernel
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
