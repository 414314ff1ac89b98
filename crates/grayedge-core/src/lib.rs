//! grayedge core - raster data structures for edge detection
//!
//! This crate provides the data types shared by every grayedge operator:
//!
//! - [`Rect`] - Half-open integer bounds
//! - [`GrayImage`] - Single-channel 8-bit raster with explicit bounds
//! - [`Image`] - Read-only source abstraction accepted by the operators
//! - [`Gray16Image`] / [`RgbaImage`] / [`AnyImage`] - Non-gray sources
//! - [`convert::to_gray`] - Normalization of any source to 8-bit gray
//! - [`compare::within_tolerance`] - Channel-wise raster comparison

pub mod compare;
pub mod convert;
pub mod error;
pub mod gray;
pub mod image;
pub mod rect;

pub use compare::{ONE_LEVEL_TOLERANCE, max_channel_diff, within_tolerance};
pub use convert::{convert_to_gray, to_gray};
pub use error::{Error, Result};
pub use gray::GrayImage;
pub use image::{AnyImage, Gray16Image, Image, RgbaImage, expand_to_16, luma_from_rgb16};
pub use rect::Rect;
