//! Synthetic test images
//!
//! Deterministic patterns so the regression tests need no binary fixtures.

use crate::{TestError, TestResult};
use imagebox_core::{Bitmap, BitmapMut, Color};

fn canvas(name: &str, width: u32, height: u32) -> TestResult<BitmapMut> {
    BitmapMut::new_filled(width, height, Color::BLACK).map_err(|e| TestError::Pattern {
        name: name.to_string(),
        message: e.to_string(),
    })
}

/// Red ramps left to right, green top to bottom, blue along the diagonal.
pub fn gradient(width: u32, height: u32) -> TestResult<Bitmap> {
    let mut m = canvas("gradient", width, height)?;
    let wd = (width - 1).max(1);
    let hd = (height - 1).max(1);
    for y in 0..height {
        let row = m.row_data_mut(y);
        for (x, p) in row.iter_mut().enumerate() {
            let x = x as u32;
            let r = (x * 255 / wd) as u8;
            let g = (y * 255 / hd) as u8;
            let b = ((x + y) * 255 / (wd + hd)) as u8;
            *p = Color::new(r, g, b).to_pixel();
        }
    }
    Ok(m.into())
}

/// Alternating `a` / `b` squares of side `cell`, `a` in the top-left corner.
pub fn checkerboard(width: u32, height: u32, cell: u32, a: Color, b: Color) -> TestResult<Bitmap> {
    let mut m = canvas("checkerboard", width, height)?;
    let cell = cell.max(1);
    for y in 0..height {
        let row = m.row_data_mut(y);
        for (x, p) in row.iter_mut().enumerate() {
            let even = (x as u32 / cell + y / cell) % 2 == 0;
            *p = if even { a } else { b }.to_pixel();
        }
    }
    Ok(m.into())
}

/// A single flat color.
pub fn solid(width: u32, height: u32, fill: Color) -> TestResult<Bitmap> {
    Bitmap::new_filled(width, height, fill).map_err(|e| TestError::Pattern {
        name: "solid".to_string(),
        message: e.to_string(),
    })
}

/// Color used for tile `n` by [`numbered_tiles`].
pub fn tile_color(n: u32) -> Color {
    Color::new(
        (n.wrapping_mul(53) % 256) as u8,
        (n.wrapping_mul(97) % 256) as u8,
        (n.wrapping_mul(193) % 256) as u8,
    )
}

/// `columns` x `rows` tiles of `tile_w` x `tile_h`, each flat-filled with
/// [`tile_color`] of its row-major index.
pub fn numbered_tiles(columns: u32, rows: u32, tile_w: u32, tile_h: u32) -> TestResult<Bitmap> {
    let mut m = canvas("numbered_tiles", columns * tile_w, rows * tile_h)?;
    for y in 0..rows * tile_h {
        let row = m.row_data_mut(y);
        for (x, p) in row.iter_mut().enumerate() {
            let n = (y / tile_h) * columns + x as u32 / tile_w;
            *p = tile_color(n).to_pixel();
        }
    }
    Ok(m.into())
}
