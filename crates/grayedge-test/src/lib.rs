//! grayedge-test - Regression test framework for grayedge
//!
//! This crate provides a regression test framework supporting three modes:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files
//! - **Display**: Run tests without comparison (visual inspection)
//!
//! # Usage
//!
//! ```ignore
//! use grayedge_test::RegParams;
//!
//! let mut rp = RegParams::new("canny");
//! rp.compare_within_tolerance(&dst, &reference, 0x101);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use grayedge_core::{AnyImage, GrayImage, Rect};
use rand::prelude::*;

/// Load a test image from the test data directory
///
/// # Arguments
///
/// * `name` - Image filename (e.g., "reference.png")
pub fn load_test_image(name: &str) -> TestResult<AnyImage> {
    let path = test_data_path(name);
    grayedge_io::read_image(&path).map_err(|e| TestError::ImageLoad {
        path: path.clone(),
        message: e.to_string(),
    })
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // grayedge-test is at crates/grayedge-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to a test data file
pub fn test_data_path(name: &str) -> String {
    format!("{}/tests/data/images/{}", workspace_root(), name)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// Build a `width` x `height` gray image of uniformly random samples.
///
/// The same `seed` always yields the same image.
pub fn random_gray_image(seed: u64, width: i32, height: i32) -> TestResult<GrayImage> {
    if width <= 0 || height <= 0 {
        return Err(TestError::InvalidSize { width, height });
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut img = GrayImage::new(Rect::from_size(width, height));
    for y in 0..height {
        rng.fill_bytes(img.row_mut(y));
    }
    Ok(img)
}
