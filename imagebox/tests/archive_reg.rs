//! Batch archive regression test
//!
//! Slices and free crops end up as ZIP archives of PNGs named
//! `slice_<n>.png` / `crop_<n>.png`, one entry per surviving bitmap.

use std::io::{Cursor, Read};

use imagebox::io::archive::{ArchiveCompression, CROP_PREFIX, SLICE_PREFIX, png_archive_mem};
use imagebox::io::read_image_mem;
use imagebox::layout::{GuideSet, Rectangle, crop_rectangles, slice};
use imagebox_test::{RegParams, patterns};
use zip::ZipArchive;

fn entry(zip: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> Vec<u8> {
    let mut f = zip.by_name(name).expect("entry present");
    let mut buf = Vec::new();
    f.read_to_end(&mut buf).expect("read entry");
    buf
}

#[test]
fn archive_reg() {
    let mut rp = RegParams::new("archive");
    let src = patterns::numbered_tiles(3, 2, 100, 100).expect("numbered tiles");

    // --- slice archive ---
    let guides = GuideSet::from_axes(vec![100, 200], vec![100]);
    let tiles = slice(&src, &guides).expect("slice");
    let bytes = png_archive_mem(SLICE_PREFIX, &tiles, ArchiveCompression::Stored).expect("zip");
    let mut zip = ZipArchive::new(Cursor::new(bytes)).expect("open zip");
    rp.compare_values(6.0, zip.len() as f64, 0.0);

    // row-major: slice_4 is the first tile of the second row
    let png = entry(&mut zip, "slice_4.png");
    let decoded = read_image_mem(&png).expect("decode slice_4");
    rp.compare_bitmaps(&tiles[3], &decoded);
    let c3 = patterns::tile_color(3);
    let is_tile3 = decoded.get_rgb(50, 50) == Some((c3.r, c3.g, c3.b));
    rp.compare_values(1.0, if is_tile3 { 1.0 } else { 0.0 }, 0.0);

    // --- crop archive: N valid of M drawn ---
    let rects = [
        Rectangle::new(0.0, 0.0, 50.0, 50.0),
        Rectangle::new(10.0, 10.0, 0.0, 40.0),
        Rectangle::new(150.0, 50.0, 100.0, 100.0),
        Rectangle::new(20.0, 20.0, 30.0, -5.0),
        Rectangle::new(1000.0, 0.0, 10.0, 10.0),
    ];
    let batch = crop_rectangles(&src, &rects).expect("crop");
    let bytes =
        png_archive_mem(CROP_PREFIX, batch.bitmaps(), ArchiveCompression::Deflated).expect("zip");
    let mut zip = ZipArchive::new(Cursor::new(bytes)).expect("open zip");
    rp.compare_values(2.0, zip.len() as f64, 0.0);
    let mut names: Vec<String> = zip.file_names().map(str::to_string).collect();
    names.sort();
    rp.compare_strings(names.join(" ").as_bytes(), b"crop_1.png crop_2.png");

    let decoded = read_image_mem(&entry(&mut zip, "crop_2.png")).expect("decode crop_2");
    rp.compare_values(100.0, decoded.width() as f64, 0.0);
    rp.compare_values(100.0, decoded.height() as f64, 0.0);
    rp.compare_bitmaps(&batch.crops[1].bitmap, &decoded);

    assert!(rp.cleanup(), "archive regression test failed");
}
