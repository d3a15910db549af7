//! Zoomed previews and guide overlays

use crate::guides::GuideSet;
use crate::LayoutResult;
use imagebox_core::{Bitmap, Color, Error, Rect};
use imagebox_transform::{self as transform, ScaleMethod};

/// Smallest accepted zoom, in percent
pub const MIN_ZOOM: u32 = 10;
/// Largest accepted zoom, in percent
pub const MAX_ZOOM: u32 = 100;

/// Width of a drawn guide line in preview pixels
pub const GUIDE_WIDTH: i32 = 3;

const VERTICAL_GUIDE: Color = Color::new(255, 0, 0);
const HORIZONTAL_GUIDE: Color = Color::new(0, 0, 255);

fn check_zoom(zoom_percent: u32) -> LayoutResult<f64> {
    if !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom_percent) {
        return Err(Error::InvalidParameter(format!(
            "zoom {zoom_percent}% outside {MIN_ZOOM}..={MAX_ZOOM}"
        ))
        .into());
    }
    Ok(zoom_percent as f64 / 100.0)
}

/// Shrink `bitmap` for display.
///
/// The preview is `trunc(width * zoom / 100)` by `trunc(height * zoom / 100)`
/// (at least 1 x 1). At 100% the input is returned as is.
///
/// # Errors
///
/// Returns an invalid-parameter error if `zoom_percent` is outside 10..=100.
pub fn preview(bitmap: &Bitmap, zoom_percent: u32) -> LayoutResult<Bitmap> {
    let ratio = check_zoom(zoom_percent)?;
    if zoom_percent == MAX_ZOOM {
        return Ok(bitmap.clone());
    }
    let w = ((bitmap.width() as f64 * ratio) as u32).max(1);
    let h = ((bitmap.height() as f64 * ratio) as u32).max(1);
    Ok(transform::scale_to_size(bitmap, w, h, ScaleMethod::Bicubic)?)
}

/// Draw `guides` over a zoomed preview of `bitmap`.
///
/// Vertical guides are red and horizontal guides blue, each
/// [`GUIDE_WIDTH`] pixels wide and centered on the guide's preview
/// position. Horizontal guides are drawn last and cover crossings.
pub fn render_guides(bitmap: &Bitmap, guides: &GuideSet, zoom_percent: u32) -> LayoutResult<Bitmap> {
    let ratio = check_zoom(zoom_percent)?;
    let mut canvas = preview(bitmap, zoom_percent)?.into_mut();
    let (w, h) = (canvas.width() as i32, canvas.height() as i32);
    let half = GUIDE_WIDTH / 2;

    for &x in guides.xs() {
        let dx = (x as f64 * ratio) as i32;
        let line = Rect::new_unchecked(dx.saturating_sub(half), 0, GUIDE_WIDTH, h);
        canvas.fill_rect(&line, VERTICAL_GUIDE);
    }
    for &y in guides.ys() {
        let dy = (y as f64 * ratio) as i32;
        let line = Rect::new_unchecked(0, dy.saturating_sub(half), w, GUIDE_WIDTH);
        canvas.fill_rect(&line, HORIZONTAL_GUIDE);
    }
    Ok(canvas.into())
}
