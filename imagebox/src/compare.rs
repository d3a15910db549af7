//! Before/after comparison views
//!
//! The enhanced image is usually larger than the original (the pipeline
//! upscales first), so both are resampled to the same display size before
//! they can be overlaid.

use crate::ToolResult;
use imagebox_core::{Bitmap, Error};
use imagebox_layout::preview::{MAX_ZOOM, MIN_ZOOM};
use imagebox_transform::{ScaleMethod, scale_to_size};
use tracing::debug;

/// Resize `original` and `enhanced` to a common display size.
///
/// The display size is the enhanced image's size times
/// `zoom_percent / 100`, truncated. Both images use Lanczos resampling.
///
/// # Errors
///
/// Returns an invalid-parameter error if `zoom_percent` is outside 10..=100.
pub fn comparison_pair(
    original: &Bitmap,
    enhanced: &Bitmap,
    zoom_percent: u32,
) -> ToolResult<(Bitmap, Bitmap)> {
    if !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom_percent) {
        return Err(Error::InvalidParameter(format!(
            "zoom {zoom_percent}% outside {MIN_ZOOM}..={MAX_ZOOM}"
        ))
        .into());
    }
    let w = ((enhanced.width() as u64 * zoom_percent as u64 / 100) as u32).max(1);
    let h = ((enhanced.height() as u64 * zoom_percent as u64 / 100) as u32).max(1);
    debug!(width = w, height = h, zoom_percent, "comparison size");

    let before = scale_to_size(original, w, h, ScaleMethod::Lanczos)?;
    let after = scale_to_size(enhanced, w, h, ScaleMethod::Lanczos)?;
    Ok((before, after))
}

/// Compose a slider view: columns left of `fraction * width` come from
/// `before`, the rest from `after`.
///
/// # Errors
///
/// Fails if the images differ in size or `fraction` is not in `[0, 1]`.
pub fn split_view(before: &Bitmap, after: &Bitmap, fraction: f64) -> ToolResult<Bitmap> {
    if before.dimensions() != after.dimensions() {
        return Err(Error::DimensionMismatch {
            expected: before.dimensions(),
            actual: after.dimensions(),
        }
        .into());
    }
    if !(0.0..=1.0).contains(&fraction) {
        return Err(Error::InvalidParameter(format!(
            "split fraction must be within [0, 1], got {fraction}"
        ))
        .into());
    }

    let split = (before.width() as f64 * fraction) as usize;
    let mut out = after.to_mut();
    for y in 0..before.height() {
        out.row_data_mut(y)[..split].copy_from_slice(&before.row_data(y)[..split]);
    }
    Ok(out.into())
}
