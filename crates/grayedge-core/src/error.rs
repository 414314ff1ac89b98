//! Error types for grayedge-core
//!
//! Provides a unified error type for raster construction, pixel access and
//! raster comparison. Each variant captures enough context for diagnostics
//! without exposing internal layout details.

use crate::Rect;
use thiserror::Error;

/// grayedge-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: i32, height: i32 },

    /// Row stride shorter than the image width
    #[error("stride {stride} is smaller than width {width}")]
    InvalidStride { stride: usize, width: usize },

    /// Pixel buffer too short for the declared bounds and stride
    #[error("pixel buffer too small: {len} < {required}")]
    BufferTooSmall { len: usize, required: usize },

    /// Coordinates outside the image bounds
    #[error("point ({x}, {y}) outside bounds {bounds}")]
    OutOfBounds { x: i32, y: i32, bounds: Rect },

    /// Two images that must share bounds do not
    #[error("bounds mismatch: expected {expected}, got {actual}")]
    BoundsMismatch { expected: Rect, actual: Rect },

    /// Pixel comparison exceeded the allowed tolerance
    #[error("got {got:?} want {want:?} at ({x}, {y}), tolerance {tolerance:#x}")]
    PixelMismatch {
        x: i32,
        y: i32,
        got: [u16; 4],
        want: [u16; 4],
        tolerance: u32,
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for grayedge-core operations
pub type Result<T> = std::result::Result<T, Error>;
