//! Compositor regression test
//!
//! Canvas sizes for the three layout modes, single-item identity, rank
//! ordering and background fill.

use imagebox_core::Color;
use imagebox_layout::{
    Alignment, LayoutError, StitchItem, StitchLayout, order_by_rank, stitch,
};
use imagebox_test::{RegParams, patterns};

fn item(w: u32, h: u32, n: u32) -> StitchItem {
    StitchItem::new(patterns::solid(w, h, patterns::tile_color(n)).expect("solid"))
}

#[test]
fn stitch_reg() {
    let mut rp = RegParams::new("stitch");

    // --- vertical, stretch: 100x50 + 200x50 ---
    for padding in [0u32, 10] {
        let items = [item(100, 50, 1), item(200, 50, 2)];
        let out = stitch(&items, &StitchLayout::vertical().with_padding(padding))
            .expect("vertical stitch");
        rp.compare_values(200.0, out.width() as f64, 0.0);
        rp.compare_values((50 + 100 + padding) as f64, out.height() as f64, 0.0);
    }

    // keep-original: the narrow item is centered, the rest is background
    let items = [item(100, 50, 1), item(200, 50, 2)];
    let layout = StitchLayout::vertical()
        .with_alignment(Alignment::Original)
        .with_background(Color::new(0, 0, 0));
    let out = stitch(&items, &layout).expect("vertical original");
    rp.compare_values(100.0, out.height() as f64, 0.0);
    let c1 = patterns::tile_color(1);
    rp.compare_values(0.0, out.get_rgb(49, 10).map_or(1, |(r, _, _)| r) as f64, 0.0);
    let centered = out.get_rgb(50, 10) == Some((c1.r, c1.g, c1.b));
    rp.compare_values(1.0, if centered { 1.0 } else { 0.0 }, 0.0);
    rp.write_bitmap_and_check(&out).expect("write vertical");

    // --- horizontal, stretch ---
    let items = [item(40, 30, 3), item(20, 60, 4)];
    let out = stitch(&items, &StitchLayout::horizontal().with_padding(5)).expect("horizontal");
    rp.compare_values(60.0, out.height() as f64, 0.0);
    rp.compare_values((80 + 5 + 20) as f64, out.width() as f64, 0.0);

    // keep-original: the short item is centered vertically
    let layout = StitchLayout::horizontal()
        .with_padding(5)
        .with_alignment(Alignment::Original)
        .with_background(Color::WHITE);
    let out = stitch(&items, &layout).expect("horizontal original");
    rp.compare_values(60.0, out.height() as f64, 0.0);
    rp.compare_values((40 + 5 + 20) as f64, out.width() as f64, 0.0);
    let c3 = patterns::tile_color(3);
    let c4 = patterns::tile_color(4);
    let white = Some((255, 255, 255));
    let short = Some((c3.r, c3.g, c3.b));
    let bands = [
        out.get_rgb(20, 0) == white,
        out.get_rgb(20, 14) == white,
        out.get_rgb(20, 15) == short,
        out.get_rgb(20, 44) == short,
        out.get_rgb(20, 45) == white,
        out.get_rgb(20, 59) == white,
        out.get_rgb(42, 30) == white,
        out.get_rgb(45, 0) == Some((c4.r, c4.g, c4.b)),
        out.get_rgb(64, 59) == Some((c4.r, c4.g, c4.b)),
    ];
    let bands_ok = bands.iter().all(|&b| b);
    rp.compare_values(1.0, if bands_ok { 1.0 } else { 0.0 }, 0.0);
    rp.write_bitmap_and_check(&out).expect("write horizontal");

    // --- grid: 5 equal items, 2 columns ---
    for padding in [0u32, 8] {
        let items: Vec<StitchItem> = (0..5).map(|n| item(100, 100, n)).collect();
        let out = stitch(&items, &StitchLayout::grid(2).with_padding(padding)).expect("grid");
        rp.compare_values((2 * 100 + padding) as f64, out.width() as f64, 0.0);
        rp.compare_values((3 * 100 + 2 * padding) as f64, out.height() as f64, 0.0);
    }

    // fewer items than columns still reserves every column
    let items = [item(30, 20, 1), item(30, 20, 2)];
    let out = stitch(&items, &StitchLayout::grid(3).with_padding(2)).expect("sparse grid");
    rp.compare_values((3 * 30 + 2 * 2) as f64, out.width() as f64, 0.0);
    rp.compare_values(20.0, out.height() as f64, 0.0);

    // --- a single item comes back unchanged in every mode ---
    let single = patterns::gradient(64, 48).expect("gradient");
    for layout in [
        StitchLayout::vertical(),
        StitchLayout::horizontal().with_padding(12),
        StitchLayout::grid(1).with_padding(3),
        StitchLayout::vertical().with_alignment(Alignment::Original),
    ] {
        let out = stitch(&[StitchItem::new(single.clone())], &layout).expect("single");
        rp.compare_bitmaps(&single, &out);
    }

    // --- rank ordering drives placement ---
    let a = patterns::solid(10, 10, Color::new(255, 0, 0)).expect("a");
    let b = patterns::solid(10, 10, Color::new(0, 0, 255)).expect("b");
    let ordered: Vec<StitchItem> = order_by_rank(vec![(a, 2), (b, 1)])
        .into_iter()
        .map(StitchItem::from)
        .collect();
    let out = stitch(&ordered, &StitchLayout::vertical()).expect("ranked");
    let top_is_blue = out.get_rgb(5, 5) == Some((0, 0, 255));
    rp.compare_values(1.0, if top_is_blue { 1.0 } else { 0.0 }, 0.0);

    // --- whole-call failures ---
    let empty: [StitchItem; 0] = [];
    let failed = matches!(stitch(&empty, &StitchLayout::default()), Err(LayoutError::EmptyInput));
    rp.compare_values(1.0, if failed { 1.0 } else { 0.0 }, 0.0);
    let bad_color = StitchLayout::default().with_background_str("rgb(1,2)").is_err();
    rp.compare_values(1.0, if bad_color { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "stitch regression test failed");
}
