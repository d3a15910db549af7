//! Image format regression test
//!
//! Encodes synthetic patterns, reads them back through the format
//! detector and checks that orientation metadata and transparency are
//! normalized on decode.

use imagebox_core::Color;
use imagebox_io::{ImageFormat, read_image_mem, write_image_mem};
use imagebox_test::{RegParams, patterns};

/// CRC-32 (IEEE) as used by PNG chunks
fn crc32(data: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &b in data {
        crc ^= b as u32;
        for _ in 0..8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ 0xEDB8_8320
            } else {
                crc >> 1
            };
        }
    }
    !crc
}

/// Insert an eXIf chunk carrying `orientation` right after IHDR.
fn with_exif_orientation(png: &[u8], orientation: u16) -> Vec<u8> {
    let mut exif = Vec::new();
    exif.extend_from_slice(b"II");
    exif.extend_from_slice(&42u16.to_le_bytes());
    exif.extend_from_slice(&8u32.to_le_bytes());
    exif.extend_from_slice(&1u16.to_le_bytes());
    exif.extend_from_slice(&0x0112u16.to_le_bytes());
    exif.extend_from_slice(&3u16.to_le_bytes());
    exif.extend_from_slice(&1u32.to_le_bytes());
    exif.extend_from_slice(&orientation.to_le_bytes());
    exif.extend_from_slice(&[0, 0]);
    exif.extend_from_slice(&0u32.to_le_bytes());

    let mut chunk = Vec::new();
    chunk.extend_from_slice(&(exif.len() as u32).to_be_bytes());
    let mut body = b"eXIf".to_vec();
    body.extend_from_slice(&exif);
    chunk.extend_from_slice(&body);
    chunk.extend_from_slice(&crc32(&body).to_be_bytes());

    // signature (8) + IHDR chunk (4 + 4 + 13 + 4)
    let split = 8 + 25;
    let mut out = png[..split].to_vec();
    out.extend_from_slice(&chunk);
    out.extend_from_slice(&png[split..]);
    out
}

#[test]
fn ioformats_reg() {
    let mut rp = RegParams::new("ioformats");

    let gradient = patterns::gradient(64, 40).expect("gradient");

    // --- PNG is lossless ---
    let png = write_image_mem(&gradient, ImageFormat::Png).expect("write png");
    let back = read_image_mem(&png).expect("read png");
    rp.compare_bitmaps(&gradient, &back);

    // --- JPEG at quality 100 / 4:4:4 stays close ---
    let jpg = write_image_mem(&gradient, ImageFormat::Jpeg).expect("write jpeg");
    let back = read_image_mem(&jpg).expect("read jpeg");
    rp.compare_values(64.0, back.width() as f64, 0.0);
    rp.compare_values(40.0, back.height() as f64, 0.0);
    let diff = gradient.diff(&back).expect("diff");
    eprintln!("  jpeg max channel diff: {}", diff.max_channel_diff);
    rp.compare_values(0.0, diff.max_channel_diff as f64, 8.0);

    // --- EXIF orientation 6 turns the image clockwise on decode ---
    let mut marked = gradient.to_mut();
    marked.set_rgb(0, 0, 255, 0, 255).expect("mark");
    let marked: imagebox_core::Bitmap = marked.into();
    let png = write_image_mem(&marked, ImageFormat::Png).expect("write png");
    let rotated = read_image_mem(&with_exif_orientation(&png, 6)).expect("read exif png");
    rp.compare_values(40.0, rotated.width() as f64, 0.0);
    rp.compare_values(64.0, rotated.height() as f64, 0.0);
    let corner = rotated.get_rgb(39, 0).expect("corner");
    rp.compare_values(1.0, if corner == (255, 0, 255) { 1.0 } else { 0.0 }, 0.0);

    // orientation 1 leaves the image untouched
    let upright = read_image_mem(&with_exif_orientation(&png, 1)).expect("read exif png");
    rp.compare_bitmaps(&marked, &upright);

    // --- solid color survives both encoders exactly at the sample level ---
    let solid = patterns::solid(16, 16, Color::new(0, 128, 255)).expect("solid");
    let png = write_image_mem(&solid, ImageFormat::Png).expect("write png");
    rp.compare_bitmaps(&solid, &read_image_mem(&png).expect("read png"));

    rp.write_bitmap_and_check(&gradient).expect("write gradient");

    assert!(rp.cleanup(), "ioformats regression test failed");
}
