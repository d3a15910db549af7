//! Blur regression test

use imagebox_core::Color;
use imagebox_filter::{box_blur, gaussian_blur};
use imagebox_test::{RegParams, patterns};

#[test]
fn blur_reg() {
    let mut rp = RegParams::new("blur");

    let board = patterns::checkerboard(32, 32, 8, Color::BLACK, Color::WHITE).expect("board");

    // blurring preserves size and keeps the mean brightness
    let mean = |b: &imagebox_core::Bitmap| {
        b.data()
            .iter()
            .map(|&p| imagebox_core::color::red(p) as f64)
            .sum::<f64>()
            / b.pixel_count() as f64
    };
    for radius in [1.0f32, 2.0, 3.5] {
        let out = gaussian_blur(&board, radius).expect("gaussian");
        rp.compare_values(32.0, out.width() as f64, 0.0);
        eprintln!("  radius {}: mean {:.2} -> {:.2}", radius, mean(&board), mean(&out));
        rp.compare_values(mean(&board), mean(&out), 2.0);
    }

    // zero radius is a no-op
    let out = box_blur(&board, 0.0, 3).expect("box 0");
    rp.compare_bitmaps(&board, &out);

    let out = gaussian_blur(&board, 2.0).expect("gaussian 2");
    rp.write_bitmap_and_check(&out).expect("write blur");

    assert!(rp.cleanup(), "blur regression test failed");
}
