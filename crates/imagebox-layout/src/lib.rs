//! imagebox-layout - Slicing, cropping and stitching geometry
//!
//! This crate provides:
//!
//! - [`GuideSet`] and the guillotine slicer ([`slice`], [`slice_regions`])
//! - Free-crop [`Rectangle`]s, batch cropping and canvas-JSON parsing
//! - The compositor ([`stitch`]) with vertical, horizontal and grid layouts
//! - An undo/redo command log for guide and rectangle editing
//! - Zoomed previews with guide overlays
//!
//! Every operation takes its inputs by reference and returns new bitmaps.

pub mod crop;
mod error;
pub mod guides;
pub mod history;
pub mod preview;
pub mod slice;
pub mod stitch;

pub use crop::{
    CanvasRectangles, Crop, CropBatch, Rectangle, crop_rectangles, rectangles_from_canvas_json,
};
pub use error::{LayoutError, LayoutResult};
pub use guides::{Axis, Cuts, GuideSet};
pub use history::{CropEdit, CropLog, Edit, EditLog, GuideEdit, GuideLog};
pub use preview::{preview, render_guides};
pub use slice::{slice, slice_columns, slice_regions};
pub use stitch::{Alignment, StitchItem, StitchLayout, StitchMode, order_by_rank, stitch};
