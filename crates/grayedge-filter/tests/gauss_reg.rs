//! Laplacian-of-Gaussian and Difference-of-Gaussians regression test

use grayedge_core::{GrayImage, Image, ONE_LEVEL_TOLERANCE, Rect};
use grayedge_filter::{
    FilterError, Kernel2D, LOG_KERNEL, difference_of_gaussians, laplacian_of_gaussian,
};
use grayedge_io::ImageFormat;
use grayedge_test::{RegParams, load_test_image, random_gray_image};

#[test]
fn log_reg() {
    let mut rp = RegParams::new("log");

    let src = load_test_image("reference.png").expect("load reference.png");
    let mut dst = GrayImage::new(src.bounds());
    laplacian_of_gaussian(&mut dst, &src).expect("laplacian_of_gaussian");

    let want = load_test_image("reference-log.png").expect("load reference-log.png");
    rp.compare_within_tolerance(&dst, &want, ONE_LEVEL_TOLERANCE);
    rp.write_pix_and_check(&dst, ImageFormat::Png)
        .expect("write log");

    // The fixed kernel is what the general constructor builds.
    let coefficients = LOG_KERNEL.data().to_vec();
    let built = Kernel2D::new(coefficients).expect("LoG coefficients");
    rp.compare_values(1.0, built.normalization(), 0.0);
    rp.compare_values(5.0, built.size() as f64, 0.0);

    // Destination bounds must match.
    let mut wrong = GrayImage::new(Rect::from_size(3, 3));
    rp.compare_values(
        1.0,
        if matches!(
            laplacian_of_gaussian(&mut wrong, &src),
            Err(FilterError::IncompatibleBounds { .. })
        ) {
            1.0
        } else {
            0.0
        },
        0.0,
    );

    assert!(rp.cleanup(), "log regression test failed");
}

#[test]
fn dog_reg() {
    let mut rp = RegParams::new("dog");

    let src = load_test_image("reference.png").expect("load reference.png");
    let mut dst = GrayImage::new(src.bounds());
    difference_of_gaussians(&mut dst, &src, 0.9, 1.2).expect("difference_of_gaussians");

    let want = load_test_image("reference-dog.png").expect("load reference-dog.png");
    rp.compare_within_tolerance(&dst, &want, ONE_LEVEL_TOLERANCE);
    rp.write_pix_and_check(&dst, ImageFormat::Png)
        .expect("write dog");

    // Swapping the deviations gives the same raster.
    let mut swapped = GrayImage::new(src.bounds());
    difference_of_gaussians(&mut swapped, &src, 1.2, 0.9).expect("difference_of_gaussians");
    rp.compare_pix(&dst, &swapped);

    assert!(rp.cleanup(), "dog regression test failed");
}

#[test]
fn dog_symmetry_reg() {
    let mut rp = RegParams::new("dog_symmetry");

    let cases = [(1u64, 17, 11, 0.6, 1.6), (2, 32, 32, 1.0, 2.5), (3, 5, 40, 0.3, 0.8)];
    for (seed, w, h, a, b) in cases {
        let src = random_gray_image(seed, w, h).expect("random image");
        let mut d0 = src.create_template();
        let mut d1 = src.create_template();
        difference_of_gaussians(&mut d0, &src, a, b).expect("dog a, b");
        difference_of_gaussians(&mut d1, &src, b, a).expect("dog b, a");
        rp.compare_pix(&d0, &d1);

        // Equal deviations cancel exactly.
        difference_of_gaussians(&mut d0, &src, a, a).expect("dog a, a");
        rp.compare_values(0.0, d0.count_nonzero() as f64, 0.0);
    }

    assert!(rp.cleanup(), "dog symmetry regression test failed");
}
