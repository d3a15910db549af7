//! Free-crop rectangles
//!
//! Rectangles are drawn on a scaled preview, so each one carries the
//! factor that maps drawing units back to source pixels. A batch crop
//! keeps every rectangle that still covers part of the bitmap after that
//! mapping and reports the rest as [`LayoutError::DegenerateRegion`]
//! without aborting.
//!
//! Drawing tools hand rectangles over as a canvas JSON document
//! (`{"objects": [{"type": "rect", "left": .., ...}]}`);
//! [`rectangles_from_canvas_json`] turns that into typed [`Rectangle`]s.

use crate::{LayoutError, LayoutResult};
use imagebox_core::{Bitmap, Rect};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A rectangle in drawing coordinates plus the drawing-to-source scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Source pixels per drawing unit
    #[serde(default = "unit_scale")]
    pub scale: f64,
}

fn unit_scale() -> f64 {
    1.0
}

impl Rectangle {
    /// A rectangle drawn directly in source pixels.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
            scale: 1.0,
        }
    }

    /// Same rectangle with a different drawing-to-source scale.
    pub fn with_scale(self, scale: f64) -> Self {
        Self { scale, ..self }
    }

    /// Map into source pixels: every field becomes `trunc(value * scale)`.
    ///
    /// The result may have a negative or zero extent.
    pub fn to_source(&self) -> Rect {
        let px = |v: f64| (v * self.scale) as i32;
        Rect::new_unchecked(px(self.left), px(self.top), px(self.width), px(self.height))
    }

    /// The source region this rectangle selects inside a `width` x `height`
    /// bitmap.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::DegenerateRegion`] tagged with `index` if the
    /// mapped rectangle has no positive area inside the bitmap.
    pub fn region(&self, index: usize, width: u32, height: u32) -> LayoutResult<Rect> {
        let src = self.to_source();
        let degenerate = || LayoutError::DegenerateRegion {
            index,
            width: src.w as i64,
            height: src.h as i64,
        };
        if src.is_empty() {
            return Err(degenerate());
        }
        src.clip_to(width, height).ok_or_else(degenerate)
    }
}

/// One successful crop
#[derive(Debug, Clone)]
pub struct Crop {
    /// Position of the rectangle in the input list
    pub index: usize,
    /// Source region actually cut
    pub region: Rect,
    pub bitmap: Bitmap,
}

/// Result of cropping a list of rectangles
#[derive(Debug, Default)]
pub struct CropBatch {
    /// Surviving crops in drawing order
    pub crops: Vec<Crop>,
    /// One [`LayoutError::DegenerateRegion`] per dropped rectangle
    pub skipped: Vec<LayoutError>,
}

impl CropBatch {
    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }

    /// Cropped bitmaps in drawing order
    pub fn bitmaps(&self) -> impl Iterator<Item = &Bitmap> {
        self.crops.iter().map(|c| &c.bitmap)
    }
}

/// Cut every rectangle out of `bitmap`.
///
/// Degenerate rectangles are logged and collected in
/// [`CropBatch::skipped`]; they never fail the batch.
pub fn crop_rectangles(bitmap: &Bitmap, rects: &[Rectangle]) -> LayoutResult<CropBatch> {
    let mut batch = CropBatch::default();
    for (index, rect) in rects.iter().enumerate() {
        match rect.region(index, bitmap.width(), bitmap.height()) {
            Ok(region) => {
                let cut = bitmap.clip_rect(&region)?;
                batch.crops.push(Crop {
                    index,
                    region,
                    bitmap: cut,
                });
            }
            Err(e) => {
                warn!(index, error = %e, "skipping crop rectangle");
                batch.skipped.push(e);
            }
        }
    }
    debug!(
        kept = batch.crops.len(),
        skipped = batch.skipped.len(),
        "crop batch"
    );
    Ok(batch)
}

/// Rectangles read from a canvas document
#[derive(Debug, Default)]
pub struct CanvasRectangles {
    pub rectangles: Vec<Rectangle>,
    /// One [`LayoutError::MalformedRectangle`] per unreadable `rect` object
    pub rejected: Vec<LayoutError>,
}

#[derive(Deserialize)]
struct CanvasDocument {
    #[serde(default)]
    objects: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct CanvasRect {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    #[serde(rename = "scaleX", default = "unit_scale")]
    scale_x: f64,
    #[serde(rename = "scaleY", default = "unit_scale")]
    scale_y: f64,
}

/// Parse drawing-tool canvas JSON into rectangles.
///
/// Only objects whose `type` is `"rect"` are considered. The object's
/// `scaleX` / `scaleY` are folded into its width and height, and every
/// rectangle gets `scale` as its drawing-to-source factor.
///
/// # Errors
///
/// Returns [`LayoutError::CanvasJson`] if `json` is not a canvas document
/// at all. A single `rect` object with missing or non-numeric fields is
/// reported in [`CanvasRectangles::rejected`] instead.
pub fn rectangles_from_canvas_json(json: &str, scale: f64) -> LayoutResult<CanvasRectangles> {
    let doc: CanvasDocument = serde_json::from_str(json)?;
    let mut out = CanvasRectangles::default();

    for (index, object) in doc.objects.into_iter().enumerate() {
        if object.get("type").and_then(serde_json::Value::as_str) != Some("rect") {
            continue;
        }
        match serde_json::from_value::<CanvasRect>(object) {
            Ok(r) => out.rectangles.push(Rectangle {
                left: r.left,
                top: r.top,
                width: r.width * r.scale_x,
                height: r.height * r.scale_y,
                scale,
            }),
            Err(e) => {
                let err = LayoutError::MalformedRectangle {
                    index,
                    reason: e.to_string(),
                };
                warn!(error = %err, "rejecting canvas object");
                out.rejected.push(err);
            }
        }
    }
    Ok(out)
}
