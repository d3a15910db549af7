//! Image scaling operations
//!
//! Provides separable convolution resampling with the usual filter family:
//! - Sampling (nearest neighbor)
//! - Bilinear (triangle filter, support 1)
//! - Bicubic (Keys cubic with a = -0.5, support 2)
//! - Lanczos (3-lobed windowed sinc, support 3)
//!
//! When downscaling, the filter support is widened by the scale ratio so
//! every source pixel contributes. Weights are normalized per output pixel
//! and applied in 22-bit fixed point, horizontal pass first, with round
//! half up on the way back to 8 bits.

use crate::{TransformError, TransformResult};
use imagebox_core::color::{self, BLUE, GREEN, RED};
use imagebox_core::{Bitmap, BitmapMut, Color};
use tracing::debug;

/// Fixed-point precision of the filter weights
const PRECISION_BITS: u32 = 32 - 8 - 2;

/// Scaling method to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleMethod {
    /// Nearest-neighbor sampling (fastest, pixelated results)
    Sampling,
    /// Bilinear interpolation
    Bilinear,
    /// Bicubic interpolation (plain display resizes)
    Bicubic,
    /// Lanczos-3 (highest quality, used for every content-preserving resize)
    #[default]
    Lanczos,
}

impl ScaleMethod {
    /// Half-width of the filter kernel at scale 1
    fn support(self) -> f64 {
        match self {
            ScaleMethod::Sampling => 0.0,
            ScaleMethod::Bilinear => 1.0,
            ScaleMethod::Bicubic => 2.0,
            ScaleMethod::Lanczos => 3.0,
        }
    }

    fn weight(self, x: f64) -> f64 {
        match self {
            ScaleMethod::Sampling => 0.0,
            ScaleMethod::Bilinear => {
                let x = x.abs();
                if x < 1.0 { 1.0 - x } else { 0.0 }
            }
            ScaleMethod::Bicubic => {
                const A: f64 = -0.5;
                let x = x.abs();
                if x < 1.0 {
                    ((A + 2.0) * x - (A + 3.0)) * x * x + 1.0
                } else if x < 2.0 {
                    (((x - 5.0) * x + 8.0) * x - 4.0) * A
                } else {
                    0.0
                }
            }
            ScaleMethod::Lanczos => {
                if (-3.0..3.0).contains(&x) {
                    sinc(x) * sinc(x / 3.0)
                } else {
                    0.0
                }
            }
        }
    }
}

fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        let px = x * std::f64::consts::PI;
        px.sin() / px
    }
}

/// Scale an image by the given factors
///
/// The output size is `trunc(width * scale_x)` by `trunc(height * scale_y)`,
/// never less than 1.
///
/// # Arguments
/// * `bitmap` - Input image
/// * `scale_x` - Horizontal scale factor (e.g., 2.0 = double width)
/// * `scale_y` - Vertical scale factor
/// * `method` - Scaling algorithm to use
///
/// # Errors
///
/// Returns [`TransformError::InvalidScaleFactor`] unless both factors are
/// finite and positive.
pub fn scale(
    bitmap: &Bitmap,
    scale_x: f64,
    scale_y: f64,
    method: ScaleMethod,
) -> TransformResult<Bitmap> {
    for (axis, factor) in [("x", scale_x), ("y", scale_y)] {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(TransformError::InvalidScaleFactor(format!(
                "{axis} factor must be finite and positive, got {factor}"
            )));
        }
    }
    let w = scaled_len(bitmap.width(), scale_x);
    let h = scaled_len(bitmap.height(), scale_y);
    resize(bitmap, w, h, method)
}

/// Scale an image to a specific size
///
/// # Arguments
/// * `bitmap` - Input image
/// * `width` - Target width (0 to maintain aspect ratio)
/// * `height` - Target height (0 to maintain aspect ratio)
/// * `method` - Scaling algorithm to use
pub fn scale_to_size(
    bitmap: &Bitmap,
    width: u32,
    height: u32,
    method: ScaleMethod,
) -> TransformResult<Bitmap> {
    match (width, height) {
        (0, 0) => Err(TransformError::InvalidParameters(
            "width and height cannot both be 0".to_string(),
        )),
        (w, 0) => scale_to_width(bitmap, w, method),
        (0, h) => scale_to_height(bitmap, h, method),
        (w, h) => resize(bitmap, w, h, method),
    }
}

/// Resize to `width`, scaling the height by the same ratio.
///
/// The new height is `trunc(height * width / old_width)`, at least 1.
pub fn scale_to_width(bitmap: &Bitmap, width: u32, method: ScaleMethod) -> TransformResult<Bitmap> {
    if width == 0 {
        return Err(TransformError::InvalidParameters(
            "target width must be positive".to_string(),
        ));
    }
    let ratio = width as f64 / bitmap.width() as f64;
    let height = scaled_len(bitmap.height(), ratio);
    resize(bitmap, width, height, method)
}

/// Resize to `height`, scaling the width by the same ratio.
pub fn scale_to_height(
    bitmap: &Bitmap,
    height: u32,
    method: ScaleMethod,
) -> TransformResult<Bitmap> {
    if height == 0 {
        return Err(TransformError::InvalidParameters(
            "target height must be positive".to_string(),
        ));
    }
    let ratio = height as f64 / bitmap.height() as f64;
    let width = scaled_len(bitmap.width(), ratio);
    resize(bitmap, width, height, method)
}

fn scaled_len(len: u32, factor: f64) -> u32 {
    ((len as f64 * factor) as u32).max(1)
}

fn resize(bitmap: &Bitmap, width: u32, height: u32, method: ScaleMethod) -> TransformResult<Bitmap> {
    let (w, h) = bitmap.dimensions();
    if (w, h) == (width, height) {
        return Ok(bitmap.clone());
    }
    debug!(from_w = w, from_h = h, to_w = width, to_h = height, ?method, "resize");

    if method == ScaleMethod::Sampling {
        return sample_nearest(bitmap, width, height);
    }

    let horizontal = if width != w {
        resample_horizontal(bitmap, width, method)?
    } else {
        bitmap.clone()
    };
    if height != h {
        resample_vertical(&horizontal, height, method)
    } else {
        Ok(horizontal)
    }
}

fn sample_nearest(bitmap: &Bitmap, width: u32, height: u32) -> TransformResult<Bitmap> {
    let (w, h) = bitmap.dimensions();
    let sx = w as f64 / width as f64;
    let sy = h as f64 / height as f64;
    let xs: Vec<u32> = (0..width)
        .map(|x| (((x as f64 + 0.5) * sx) as u32).min(w - 1))
        .collect();

    let mut out = BitmapMut::new_filled(width, height, Color::BLACK)?;
    for y in 0..height {
        let src_y = (((y as f64 + 0.5) * sy) as u32).min(h - 1);
        let src = bitmap.row_data(src_y);
        let dst = out.row_data_mut(y);
        for (d, &x) in dst.iter_mut().zip(&xs) {
            *d = src[x as usize];
        }
    }
    Ok(out.into())
}

/// Fixed-point taps for one output sample
struct Taps {
    start: usize,
    weights: Vec<i64>,
}

fn precompute_taps(in_size: u32, out_size: u32, method: ScaleMethod) -> Vec<Taps> {
    let scale = in_size as f64 / out_size as f64;
    let filterscale = scale.max(1.0);
    let support = method.support() * filterscale;
    let ss = 1.0 / filterscale;

    (0..out_size)
        .map(|xx| {
            let center = (xx as f64 + 0.5) * scale;
            let xmin = ((center - support + 0.5) as i64).max(0) as usize;
            let xmax = ((center + support + 0.5) as i64).min(in_size as i64) as usize;

            let mut k: Vec<f64> = (xmin..xmax.max(xmin))
                .map(|x| method.weight((x as f64 - center + 0.5) * ss))
                .collect();
            let total: f64 = k.iter().sum();
            if total != 0.0 {
                k.iter_mut().for_each(|w| *w /= total);
            }

            let one = (1i64 << PRECISION_BITS) as f64;
            let weights = k
                .iter()
                .map(|&w| {
                    if w < 0.0 {
                        (-0.5 + w * one) as i64
                    } else {
                        (0.5 + w * one) as i64
                    }
                })
                .collect();
            Taps {
                start: xmin,
                weights,
            }
        })
        .collect()
}

#[inline]
fn clip8(acc: i64) -> u8 {
    if acc >= (1i64 << PRECISION_BITS << 8) {
        255
    } else if acc <= 0 {
        0
    } else {
        (acc >> PRECISION_BITS) as u8
    }
}

/// Convolve one run of pixels `src[start..]` with `weights`.
#[inline]
fn convolve<I>(pixels: I, weights: &[i64]) -> u32
where
    I: Iterator<Item = u32>,
{
    let half = 1i64 << (PRECISION_BITS - 1);
    let mut acc = [half; 3];
    for (p, &k) in pixels.zip(weights) {
        acc[RED] += color::channel(p, RED) as i64 * k;
        acc[GREEN] += color::channel(p, GREEN) as i64 * k;
        acc[BLUE] += color::channel(p, BLUE) as i64 * k;
    }
    color::compose_rgb(clip8(acc[RED]), clip8(acc[GREEN]), clip8(acc[BLUE]))
}

fn resample_horizontal(bitmap: &Bitmap, width: u32, method: ScaleMethod) -> TransformResult<Bitmap> {
    let taps = precompute_taps(bitmap.width(), width, method);
    let mut out = BitmapMut::new_filled(width, bitmap.height(), Color::BLACK)?;
    for y in 0..bitmap.height() {
        let src = bitmap.row_data(y);
        let dst = out.row_data_mut(y);
        for (d, t) in dst.iter_mut().zip(&taps) {
            *d = convolve(src[t.start..].iter().copied(), &t.weights);
        }
    }
    Ok(out.into())
}

fn resample_vertical(bitmap: &Bitmap, height: u32, method: ScaleMethod) -> TransformResult<Bitmap> {
    let taps = precompute_taps(bitmap.height(), height, method);
    let width = bitmap.width();
    let mut out = BitmapMut::new_filled(width, height, Color::BLACK)?;
    for (y, t) in taps.iter().enumerate() {
        let dst = out.row_data_mut(y as u32);
        for (x, d) in dst.iter_mut().enumerate() {
            let column = (t.start as u32..bitmap.height())
                .map(|sy| bitmap.get_pixel_unchecked(x as u32, sy));
            *d = convolve(column, &t.weights);
        }
    }
    Ok(out.into())
}
