//! Gradient operator regression test
//!
//! Runs Sobel, Scharr and Prewitt on the color reference image and checks
//! magnitude and direction rasters against the stored references within
//! one 8-bit level.

use grayedge_core::{GrayImage, Image, ONE_LEVEL_TOLERANCE};
use grayedge_filter::{Direction, GradientOperator, non_max_suppress};
use grayedge_io::ImageFormat;
use grayedge_test::{RegParams, load_test_image};

const OPERATORS: [GradientOperator; 3] = [
    GradientOperator::Sobel,
    GradientOperator::Scharr,
    GradientOperator::Prewitt,
];

#[test]
fn edge_reg() {
    let mut rp = RegParams::new("edge");

    let src = load_test_image("reference.png").expect("load reference.png");
    let b = src.bounds();
    eprintln!("Image size: {}x{}", b.width(), b.height());

    for op in OPERATORS {
        let name = op.name();
        let mut mag = GrayImage::new(b);
        let mut dir = GrayImage::new(b);
        op.apply(Some(&mut mag), Some(&mut dir), &src)
            .unwrap_or_else(|e| panic!("{name}: {e}"));

        // --- Magnitude and direction against the references ---
        let want_mag = load_test_image(&format!("reference-{name}-mag.png"))
            .unwrap_or_else(|e| panic!("{name} mag: {e}"));
        rp.compare_within_tolerance(&mag, &want_mag, ONE_LEVEL_TOLERANCE);
        let want_dir = load_test_image(&format!("reference-{name}-dir.png"))
            .unwrap_or_else(|e| panic!("{name} dir: {e}"));
        rp.compare_within_tolerance(&dir, &want_dir, ONE_LEVEL_TOLERANCE);

        // --- Direction codes are always valid ---
        let invalid = dir
            .pix()
            .iter()
            .filter(|&&c| Direction::from_code(c).is_none())
            .count();
        rp.compare_values(0.0, invalid as f64, 0.0);

        // --- Suppression accepts the operator's own output ---
        let mut thin = GrayImage::new(b);
        rp.compare_values(
            1.0,
            if non_max_suppress(&mut thin, &mag, &dir).is_ok() { 1.0 } else { 0.0 },
            0.0,
        );

        let histogram =
            Direction::ALL.map(|d| dir.pix().iter().filter(|&&c| c == d.code()).count());
        eprintln!("  {name}: direction histogram {histogram:?}");

        rp.write_pix_and_check(&mag, ImageFormat::Png)
            .unwrap_or_else(|e| panic!("{name} write: {e}"));
        rp.write_pix_and_check(&dir, ImageFormat::Png)
            .unwrap_or_else(|e| panic!("{name} write: {e}"));
    }

    // --- Each output is optional and independent of the other ---
    let mut mag_only = GrayImage::new(b);
    let mut both_mag = GrayImage::new(b);
    let mut both_dir = GrayImage::new(b);
    grayedge_filter::sobel(Some(&mut mag_only), None, &src).expect("sobel mag only");
    grayedge_filter::sobel(Some(&mut both_mag), Some(&mut both_dir), &src).expect("sobel");
    rp.compare_pix(&mag_only, &both_mag);

    assert!(rp.cleanup(), "edge regression test failed");
}

#[test]
fn edge_null_reg() {
    let mut rp = RegParams::new("edge_null");

    let empty = GrayImage::default();
    for op in OPERATORS {
        let mut mag = GrayImage::new(grayedge_core::Rect::from_size(4, 4));
        mag.fill(0x55);
        let mut dir = mag.clone();
        let failed = op.apply(Some(&mut mag), Some(&mut dir), &empty).is_err();
        rp.compare_values(1.0, if failed { 1.0 } else { 0.0 }, 0.0);

        // Buffers are untouched on error.
        let kept = |img: &GrayImage| img.pix().iter().filter(|&&v| v == 0x55).count() as f64;
        rp.compare_values(16.0, kept(&mag), 0.0);
        rp.compare_values(16.0, kept(&dir), 0.0);
    }

    assert!(rp.cleanup(), "edge null regression test failed");
}
