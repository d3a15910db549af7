//! Unsharp masking
//!
//! Each channel is pushed away from its Gaussian-blurred value:
//! `out = in + (in - blurred) * percent / 100`, but only where
//! `|in - blurred| > threshold`; flatter areas are left alone so noise is
//! not amplified.

use crate::blur::gaussian_blur;
use crate::{FilterError, FilterResult};
use imagebox_core::color::{self, BLUE, GREEN, RED};
use imagebox_core::Bitmap;
use tracing::debug;

/// Unsharp mask parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnsharpParams {
    /// Gaussian blur radius (standard deviation)
    pub radius: f32,
    /// Strength in percent of the difference to add back
    pub percent: i32,
    /// Minimum per-channel difference that gets sharpened
    pub threshold: i32,
}

impl Default for UnsharpParams {
    /// radius 2, 150 %, threshold 3
    fn default() -> Self {
        Self {
            radius: 2.0,
            percent: 150,
            threshold: 3,
        }
    }
}

#[inline]
fn clip8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

/// Sharpen `bitmap` with an unsharp mask.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] for a negative radius or
/// threshold.
pub fn unsharp_mask(bitmap: &Bitmap, params: &UnsharpParams) -> FilterResult<Bitmap> {
    if params.threshold < 0 {
        return Err(FilterError::InvalidParameters(format!(
            "unsharp threshold must be non-negative, got {}",
            params.threshold
        )));
    }
    debug!(?params, "unsharp mask");
    let blurred = gaussian_blur(bitmap, params.radius)?;

    let mut out = blurred.into_mut();
    for (dst, &src) in out.data_mut().iter_mut().zip(bitmap.data()) {
        let mut px = [0u8; 3];
        for c in [RED, GREEN, BLUE] {
            let v = color::channel(src, c) as i32;
            let diff = v - color::channel(*dst, c) as i32;
            px[c] = if diff.abs() > params.threshold {
                clip8(v + diff * params.percent / 100)
            } else {
                v as u8
            };
        }
        *dst = color::compose_rgb(px[RED], px[GREEN], px[BLUE]);
    }
    Ok(out.into())
}
