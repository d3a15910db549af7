//! Box blur and Gaussian blur
//!
//! The box blur supports fractional radii: the `2 * trunc(r) + 1` inner
//! taps get a full weight and the two taps just outside share the
//! fractional remainder. Edges are extended by repeating the border pixel.
//! Weights are 8.24 fixed point.
//!
//! The Gaussian blur is approximated by three box passes per axis whose
//! radius is chosen so the combined variance matches `radius^2`
//! (Gwosdek et al., "Theoretical foundations of Gaussian convolution by
//! extended box filtering").

use crate::{FilterError, FilterResult};
use imagebox_core::color::{self, BLUE, GREEN, RED};
use imagebox_core::{Bitmap, BitmapMut, Color};
use imagebox_transform::transpose;

/// Number of box passes used to approximate a Gaussian
pub const GAUSSIAN_PASSES: u32 = 3;

/// Blur with a (possibly fractional) box of half-width `radius`, repeated
/// `passes` times horizontally and then `passes` times vertically.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] for a negative or non-finite
/// radius.
pub fn box_blur(bitmap: &Bitmap, radius: f32, passes: u32) -> FilterResult<Bitmap> {
    if !radius.is_finite() || radius < 0.0 {
        return Err(FilterError::InvalidParameters(format!(
            "blur radius must be finite and non-negative, got {radius}"
        )));
    }
    if radius == 0.0 || passes == 0 {
        return Ok(bitmap.clone());
    }

    let mut img = bitmap.clone();
    for _ in 0..passes {
        img = horizontal_pass(&img, radius)?;
    }
    let mut img = transpose(&img)?;
    for _ in 0..passes {
        img = horizontal_pass(&img, radius)?;
    }
    Ok(transpose(&img)?)
}

/// Gaussian blur with standard deviation `radius`.
pub fn gaussian_blur(bitmap: &Bitmap, radius: f32) -> FilterResult<Bitmap> {
    if !radius.is_finite() || radius < 0.0 {
        return Err(FilterError::InvalidParameters(format!(
            "blur radius must be finite and non-negative, got {radius}"
        )));
    }
    let box_radius = gaussian_box_radius(radius, GAUSSIAN_PASSES);
    box_blur(bitmap, box_radius, GAUSSIAN_PASSES)
}

/// Box radius whose `passes`-fold repetition has variance `sigma^2`.
pub fn gaussian_box_radius(sigma: f32, passes: u32) -> f32 {
    let sigma2 = sigma * sigma / passes as f32;
    // ideal box length
    let big_l = (12.0 * sigma2 + 1.0).sqrt();
    let l = ((big_l - 1.0) / 2.0).floor();
    let mut a = (2.0 * l + 1.0) * (l * (l + 1.0) - 3.0 * sigma2);
    a /= 6.0 * (sigma2 - (l + 1.0) * (l + 1.0));
    l + a
}

fn horizontal_pass(bitmap: &Bitmap, radius: f32) -> FilterResult<Bitmap> {
    let (w, h) = bitmap.dimensions();
    let r = radius as usize;
    let ww = ((1u32 << 24) as f32 / (radius * 2.0 + 1.0)) as u64;
    let fw = ((1u64 << 24) - (r as u64 * 2 + 1) * ww) / 2;
    let n = w as usize;
    let edge_a = (r + 1).min(n);
    let edge_b = n.saturating_sub(r + 1);

    let mut out = BitmapMut::new_filled(w, h, Color::BLACK)?;
    for y in 0..h {
        blur_line(
            out.row_data_mut(y),
            bitmap.row_data(y),
            r,
            edge_a,
            edge_b,
            ww,
            fw,
        );
    }
    Ok(out.into())
}

fn blur_line(
    out: &mut [u32],
    line: &[u32],
    r: usize,
    edge_a: usize,
    edge_b: usize,
    ww: u64,
    fw: u64,
) {
    let last = line.len() - 1;
    let ch = |i: usize, c: usize| color::channel(line[i], c) as u64;

    // window sum centered on the virtual pixel at x = -1
    let mut acc = [0u64; 3];
    for (c, a) in acc.iter_mut().enumerate() {
        *a = ch(0, c) * (r as u64 + 1);
        for x in 0..edge_a - 1 {
            *a += ch(x, c);
        }
        *a += ch(last, c) * (r + 1 - edge_a) as u64;
    }

    let mut emit = |x: usize, sub: usize, add: usize, left: usize, right: usize| {
        let mut px = [0u8; 3];
        for c in [RED, GREEN, BLUE] {
            acc[c] = acc[c] + ch(add, c) - ch(sub, c);
            let bulk = acc[c] * ww + (ch(left, c) + ch(right, c)) * fw;
            px[c] = ((bulk + (1 << 23)) >> 24) as u8;
        }
        out[x] = color::compose_rgb(px[RED], px[GREEN], px[BLUE]);
    };

    if edge_a <= edge_b {
        for x in 0..edge_a {
            emit(x, 0, x + r, 0, x + r + 1);
        }
        for x in edge_a..edge_b {
            emit(x, x - r - 1, x + r, x - r - 1, x + r + 1);
        }
        for x in edge_b..=last {
            emit(x, x - r - 1, last, x - r - 1, last);
        }
    } else {
        for x in 0..edge_b {
            emit(x, 0, x + r, 0, x + r + 1);
        }
        for x in edge_b..edge_a {
            emit(x, 0, last, 0, last);
        }
        for x in edge_a..=last {
            emit(x, x - r - 1, last, x - r - 1, last);
        }
    }
}
