//! Image enhancement
//!
//! Every enhancer interpolates between the image and a "degenerate"
//! version of it with [`blend`]: a factor of 0 gives the degenerate image,
//! 1 the original, and larger factors extrapolate away from the
//! degenerate image.
//!
//! | Enhancer | Degenerate image |
//! |---|---|
//! | contrast | flat gray at the mean luma |
//! | color | grayscale copy |
//! | sharpness | 3x3 smoothed copy |
//! | brightness | black |

use crate::convolve::convolve;
use crate::unsharp::{UnsharpParams, unsharp_mask};
use crate::{FilterError, FilterResult, Kernel};
use imagebox_core::color::{self, BLUE, GREEN, RED};
use imagebox_core::{Bitmap, Color, Error};
use imagebox_transform::{ScaleMethod, scale};
use tracing::debug;

/// Parameters of the fixed enhancement pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnhanceParams {
    /// Resize factor applied first when greater than 1
    pub upscale: f64,
    /// Sharpness factor (1 = unchanged)
    pub sharpness: f32,
    /// Contrast factor (1 = unchanged)
    pub contrast: f32,
    /// Saturation factor (1 = unchanged)
    pub color: f32,
}

impl Default for EnhanceParams {
    fn default() -> Self {
        Self {
            upscale: 2.0,
            sharpness: 2.0,
            contrast: 1.1,
            color: 1.1,
        }
    }
}

impl EnhanceParams {
    /// Check that every factor is finite and non-negative.
    pub fn validate(&self) -> FilterResult<()> {
        let factors = [
            ("upscale", self.upscale),
            ("sharpness", self.sharpness as f64),
            ("contrast", self.contrast as f64),
            ("color", self.color as f64),
        ];
        for (name, v) in factors {
            if !v.is_finite() || v < 0.0 {
                return Err(FilterError::InvalidParameters(format!(
                    "{name} must be finite and non-negative, got {v}"
                )));
            }
        }
        Ok(())
    }
}

/// Run the enhancement pipeline.
///
/// In order: optional Lanczos upscale (only when `upscale > 1`), an
/// unsharp mask with the default [`UnsharpParams`], then contrast, color
/// and sharpness enhancement. The unsharp mask always runs, whatever the
/// other factors are.
pub fn enhance(bitmap: &Bitmap, params: &EnhanceParams) -> FilterResult<Bitmap> {
    params.validate()?;
    debug!(?params, width = bitmap.width(), height = bitmap.height(), "enhance");

    let base = if params.upscale > 1.0 {
        scale(bitmap, params.upscale, params.upscale, ScaleMethod::Lanczos)?
    } else {
        bitmap.clone()
    };
    let img = unsharp_mask(&base, &UnsharpParams::default())?;
    let img = enhance_contrast(&img, params.contrast)?;
    let img = enhance_color(&img, params.color)?;
    enhance_sharpness(&img, params.sharpness)
}

/// Interpolate per channel: `a + alpha * (b - a)`.
///
/// Results are truncated toward zero and clamped to `0..=255`.
///
/// # Errors
///
/// Returns a [`Error::DimensionMismatch`] if the sizes differ.
pub fn blend(a: &Bitmap, b: &Bitmap, alpha: f32) -> FilterResult<Bitmap> {
    if a.dimensions() != b.dimensions() {
        return Err(Error::DimensionMismatch {
            expected: a.dimensions(),
            actual: b.dimensions(),
        }
        .into());
    }
    let mut out = a.to_mut();
    for (dst, &pb) in out.data_mut().iter_mut().zip(b.data()) {
        let pa = *dst;
        let mut px = [0u8; 3];
        for c in [RED, GREEN, BLUE] {
            let va = color::channel(pa, c) as i32;
            let vb = color::channel(pb, c) as i32;
            let t = va as f32 + alpha * (vb - va) as f32;
            px[c] = if t <= 0.0 {
                0
            } else if t >= 255.0 {
                255
            } else {
                t as u8
            };
        }
        *dst = color::compose_rgb(px[RED], px[GREEN], px[BLUE]);
    }
    Ok(out.into())
}

/// Scale contrast around the mean luma.
pub fn enhance_contrast(bitmap: &Bitmap, factor: f32) -> FilterResult<Bitmap> {
    let sum: u64 = bitmap.data().iter().map(|&p| color::luma_of(p) as u64).sum();
    let mean = (sum as f64 / bitmap.pixel_count() as f64 + 0.5) as u8;
    let gray = Bitmap::new_filled(bitmap.width(), bitmap.height(), Color::new(mean, mean, mean))?;
    blend(&gray, bitmap, factor)
}

/// Scale saturation; 0 gives grayscale.
pub fn enhance_color(bitmap: &Bitmap, factor: f32) -> FilterResult<Bitmap> {
    let mut gray = bitmap.to_mut();
    for p in gray.data_mut() {
        let l = color::luma_of(*p);
        *p = color::compose_rgb(l, l, l);
    }
    blend(&gray.into(), bitmap, factor)
}

/// Scale sharpness; 0 gives a smoothed image.
pub fn enhance_sharpness(bitmap: &Bitmap, factor: f32) -> FilterResult<Bitmap> {
    let smooth = convolve(bitmap, &Kernel::smooth())?;
    blend(&smooth, bitmap, factor)
}

/// Scale brightness; 0 gives black.
pub fn enhance_brightness(bitmap: &Bitmap, factor: f32) -> FilterResult<Bitmap> {
    let black = Bitmap::new(bitmap.width(), bitmap.height())?;
    blend(&black, bitmap, factor)
}
