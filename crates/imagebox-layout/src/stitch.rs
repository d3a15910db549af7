//! Compositor
//!
//! Lays a list of bitmaps out on one canvas as a vertical stack, a
//! horizontal strip or a row-major grid.
//!
//! # Layout rules
//!
//! Each item is first rotated (quarter turns only, so nothing is clipped)
//! and scaled. Then:
//!
//! - **Vertical**: the canvas is as wide as the widest item. With
//!   [`Alignment::Stretch`] narrower items are resized to that width,
//!   keeping their aspect ratio. Items are stacked top to bottom and
//!   centered horizontally.
//! - **Horizontal**: the same on the other axis.
//! - **Grid**: items always get the widest item's width. Each row is as
//!   tall as its tallest member, and every item is centered in its cell.
//!
//! `padding` pixels separate neighbouring items; uncovered canvas is
//! filled with the background color.

use crate::{LayoutError, LayoutResult};
use imagebox_core::{Bitmap, BitmapMut, Color};
use imagebox_transform::{self as transform, ScaleMethod};
use tracing::debug;

/// One input of [`stitch`]
#[derive(Debug, Clone)]
pub struct StitchItem {
    pub bitmap: Bitmap,
    /// Resize factor applied before layout; must be finite and positive
    pub scale: f64,
    /// Clockwise rotation in degrees; must be a multiple of 90
    pub rotation: i32,
}

impl StitchItem {
    pub fn new(bitmap: Bitmap) -> Self {
        Self {
            bitmap,
            scale: 1.0,
            rotation: 0,
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation(mut self, degrees: i32) -> Self {
        self.rotation = degrees;
        self
    }

    /// Apply rotation, then scale.
    fn prepare(&self, index: usize) -> LayoutResult<Bitmap> {
        if self.rotation % 90 != 0 {
            return Err(LayoutError::InvalidLayout(format!(
                "item {index}: rotation {} is not a multiple of 90",
                self.rotation
            )));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(LayoutError::InvalidLayout(format!(
                "item {index}: scale {} must be finite and positive",
                self.scale
            )));
        }

        let rotated = transform::rotate_degrees(&self.bitmap, self.rotation)?;
        if self.scale == 1.0 {
            return Ok(rotated);
        }
        Ok(transform::scale(
            &rotated,
            self.scale,
            self.scale,
            ScaleMethod::Lanczos,
        )?)
    }
}

impl From<Bitmap> for StitchItem {
    fn from(bitmap: Bitmap) -> Self {
        StitchItem::new(bitmap)
    }
}

/// Arrangement of the items on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StitchMode {
    /// Top to bottom
    Vertical,
    /// Left to right
    Horizontal,
    /// Row-major with a fixed number of columns
    Grid { columns: u32 },
}

/// Whether items are resized to a common extent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Resize to the largest width (vertical) or height (horizontal)
    #[default]
    Stretch,
    /// Keep each item's size and center it
    Original,
}

/// Parameters for [`stitch`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StitchLayout {
    pub mode: StitchMode,
    /// Ignored in grid mode, which always stretches
    pub alignment: Alignment,
    /// Gap between neighbouring items in pixels
    pub padding: u32,
    pub background: Color,
}

impl Default for StitchLayout {
    fn default() -> Self {
        Self::vertical()
    }
}

impl StitchLayout {
    fn with_mode(mode: StitchMode) -> Self {
        Self {
            mode,
            alignment: Alignment::Stretch,
            padding: 0,
            background: Color::WHITE,
        }
    }

    pub fn vertical() -> Self {
        Self::with_mode(StitchMode::Vertical)
    }

    pub fn horizontal() -> Self {
        Self::with_mode(StitchMode::Horizontal)
    }

    pub fn grid(columns: u32) -> Self {
        Self::with_mode(StitchMode::Grid { columns })
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Set the background from a color string such as `"#ffeedd"`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidColor`] if `value` does not parse.
    pub fn with_background_str(self, value: &str) -> LayoutResult<Self> {
        match Color::parse(value) {
            Ok(c) => Ok(self.with_background(c)),
            Err(imagebox_core::Error::InvalidColor { value, reason }) => {
                Err(LayoutError::InvalidColor { value, reason })
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Sort items by caller-assigned rank.
///
/// Ranks are 1-based positions; equal ranks keep their input order.
pub fn order_by_rank<T>(mut ranked: Vec<(T, u32)>) -> Vec<T> {
    ranked.sort_by_key(|(_, rank)| *rank);
    ranked.into_iter().map(|(item, _)| item).collect()
}

/// Compose `items` onto one canvas according to `layout`.
///
/// # Errors
///
/// - [`LayoutError::EmptyInput`] if `items` is empty
/// - [`LayoutError::InvalidLayout`] for a zero grid column count, an item
///   rotation that is not a multiple of 90, or a non-positive item scale
pub fn stitch(items: &[StitchItem], layout: &StitchLayout) -> LayoutResult<Bitmap> {
    if items.is_empty() {
        return Err(LayoutError::EmptyInput);
    }
    if layout.mode == (StitchMode::Grid { columns: 0 }) {
        return Err(LayoutError::InvalidLayout(
            "grid needs at least one column".to_string(),
        ));
    }

    let working = items
        .iter()
        .enumerate()
        .map(|(i, item)| item.prepare(i))
        .collect::<LayoutResult<Vec<_>>>()?;

    match layout.mode {
        StitchMode::Vertical => stack(&working, layout, Axis::Vertical),
        StitchMode::Horizontal => stack(&working, layout, Axis::Horizontal),
        StitchMode::Grid { columns } => grid(&working, layout, columns),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Vertical,
    Horizontal,
}

fn stack(bitmaps: &[Bitmap], layout: &StitchLayout, axis: Axis) -> LayoutResult<Bitmap> {
    // `cross` is the extent shared by all items, `along` the stacking one
    let cross = |b: &Bitmap| match axis {
        Axis::Vertical => b.width(),
        Axis::Horizontal => b.height(),
    };
    let along = |b: &Bitmap| match axis {
        Axis::Vertical => b.height(),
        Axis::Horizontal => b.width(),
    };

    let target = bitmaps.iter().map(cross).max().unwrap_or(1);
    let placed = bitmaps
        .iter()
        .map(|b| {
            if layout.alignment == Alignment::Stretch && cross(b) != target {
                match axis {
                    Axis::Vertical => transform::scale_to_width(b, target, ScaleMethod::Lanczos),
                    Axis::Horizontal => {
                        transform::scale_to_height(b, target, ScaleMethod::Lanczos)
                    }
                }
            } else {
                Ok(b.clone())
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    let gaps = layout.padding as u64 * (placed.len() as u64 - 1);
    let total = placed.iter().map(|b| along(b) as u64).sum::<u64>() + gaps;
    let total = u32::try_from(total)
        .map_err(|_| LayoutError::InvalidLayout(format!("canvas extent {total} is too large")))?;

    let (cw, ch) = match axis {
        Axis::Vertical => (target, total),
        Axis::Horizontal => (total, target),
    };
    debug!(width = cw, height = ch, items = placed.len(), ?axis, "stack canvas");
    let mut canvas = BitmapMut::new_filled(cw, ch, layout.background)?;

    let mut offset = 0i64;
    for b in &placed {
        let centered = ((target - cross(b)) / 2) as i32;
        match axis {
            Axis::Vertical => canvas.paste(b, centered, offset as i32),
            Axis::Horizontal => canvas.paste(b, offset as i32, centered),
        }
        offset += along(b) as i64 + layout.padding as i64;
    }
    Ok(canvas.into())
}

fn grid(bitmaps: &[Bitmap], layout: &StitchLayout, columns: u32) -> LayoutResult<Bitmap> {
    let target = bitmaps.iter().map(Bitmap::width).max().unwrap_or(1);
    let cells = bitmaps
        .iter()
        .map(|b| {
            if b.width() != target {
                transform::scale_to_width(b, target, ScaleMethod::Lanczos)
            } else {
                Ok(b.clone())
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    let cols = columns as usize;
    let row_heights: Vec<u32> = cells
        .chunks(cols)
        .map(|row| row.iter().map(Bitmap::height).max().unwrap_or(0))
        .collect();
    let rows = row_heights.len() as u64;
    let pad = layout.padding as u64;

    let width = columns as u64 * target as u64 + (columns as u64 - 1) * pad;
    let height = row_heights.iter().map(|&h| h as u64).sum::<u64>() + (rows - 1) * pad;
    let too_large =
        |v: u64| LayoutError::InvalidLayout(format!("canvas extent {v} is too large"));
    let width = u32::try_from(width).map_err(|_| too_large(width))?;
    let height = u32::try_from(height).map_err(|_| too_large(height))?;
    debug!(width, height, columns, rows, "grid canvas");

    let mut canvas = BitmapMut::new_filled(width, height, layout.background)?;
    let mut row_y = 0i64;
    for (row, row_h) in cells.chunks(cols).zip(&row_heights) {
        for (col, b) in row.iter().enumerate() {
            let x = col as i64 * (target as i64 + pad as i64) + ((target - b.width()) / 2) as i64;
            let y = row_y + ((row_h - b.height()) / 2) as i64;
            canvas.paste(b, x as i32, y as i32);
        }
        row_y += *row_h as i64 + pad as i64;
    }
    Ok(canvas.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, c: Color) -> Bitmap {
        Bitmap::new_filled(w, h, c).unwrap()
    }

    const RED: Color = Color::new(255, 0, 0);
    const GRAY: Color = Color::new(128, 128, 128);

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            stitch(&[], &StitchLayout::default()),
            Err(LayoutError::EmptyInput)
        ));
    }

    #[test]
    fn test_zero_columns() {
        let items = [StitchItem::new(solid(4, 4, RED))];
        assert!(matches!(
            stitch(&items, &StitchLayout::grid(0)),
            Err(LayoutError::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_bad_item_parameters() {
        let b = solid(4, 4, RED);
        let rot = [StitchItem::new(b.clone()).with_rotation(45)];
        assert!(matches!(
            stitch(&rot, &StitchLayout::default()),
            Err(LayoutError::InvalidLayout(_))
        ));
        let sc = [StitchItem::new(b).with_scale(0.0)];
        assert!(matches!(
            stitch(&sc, &StitchLayout::default()),
            Err(LayoutError::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_vertical_original_centers() {
        let items = [
            StitchItem::new(solid(10, 4, RED)),
            StitchItem::new(solid(4, 2, GRAY)),
        ];
        let layout = StitchLayout::vertical()
            .with_alignment(Alignment::Original)
            .with_padding(1);
        let out = stitch(&items, &layout).unwrap();
        assert_eq!(out.dimensions(), (10, 7));
        // padding row
        assert_eq!(out.get_rgb(5, 4), Some((255, 255, 255)));
        // narrow item sits at x = (10 - 4) / 2
        assert_eq!(out.get_rgb(2, 5), Some((255, 255, 255)));
        assert_eq!(out.get_rgb(3, 5), Some((128, 128, 128)));
        assert_eq!(out.get_rgb(6, 6), Some((128, 128, 128)));
        assert_eq!(out.get_rgb(7, 6), Some((255, 255, 255)));
    }

    #[test]
    fn test_horizontal_stretch() {
        let items = [
            StitchItem::new(solid(10, 20, RED)),
            StitchItem::new(solid(5, 10, GRAY)),
        ];
        let out = stitch(&items, &StitchLayout::horizontal().with_padding(2)).unwrap();
        // second item grows to 10x20
        assert_eq!(out.dimensions(), (22, 20));
        assert_eq!(out.get_rgb(11, 10), Some((255, 255, 255)));
        assert_eq!(out.get_rgb(12, 0), Some((128, 128, 128)));
        assert_eq!(out.get_rgb(21, 19), Some((128, 128, 128)));
    }

    #[test]
    fn test_rotation_and_scale_prepass() {
        let items = [StitchItem::new(solid(6, 2, RED))
            .with_rotation(-90)
            .with_scale(2.0)];
        let out = stitch(&items, &StitchLayout::default()).unwrap();
        assert_eq!(out.dimensions(), (4, 12));
    }

    #[test]
    fn test_background_from_string() {
        let layout = StitchLayout::grid(2)
            .with_padding(3)
            .with_background_str("#000")
            .unwrap();
        let items = [
            StitchItem::new(solid(4, 4, RED)),
            StitchItem::new(solid(4, 4, RED)),
            StitchItem::new(solid(4, 4, RED)),
        ];
        let out = stitch(&items, &layout).unwrap();
        assert_eq!(out.dimensions(), (11, 11));
        // empty fourth cell
        assert_eq!(out.get_rgb(9, 9), Some((0, 0, 0)));
        assert_eq!(out.get_rgb(2, 9), Some((255, 0, 0)));

        assert!(matches!(
            StitchLayout::default().with_background_str("nope"),
            Err(LayoutError::InvalidColor { .. })
        ));
    }

    #[test]
    fn test_grid_centers_short_items() {
        let items = [
            StitchItem::new(solid(4, 6, RED)),
            StitchItem::new(solid(4, 2, GRAY)),
        ];
        let out = stitch(&items, &StitchLayout::grid(2)).unwrap();
        assert_eq!(out.dimensions(), (8, 6));
        // gray item offset by (6 - 2) / 2 = 2 rows
        assert_eq!(out.get_rgb(5, 1), Some((255, 255, 255)));
        assert_eq!(out.get_rgb(5, 2), Some((128, 128, 128)));
        assert_eq!(out.get_rgb(5, 3), Some((128, 128, 128)));
        assert_eq!(out.get_rgb(5, 4), Some((255, 255, 255)));
    }

    #[test]
    fn test_order_by_rank() {
        let ordered = order_by_rank(vec![("a", 3), ("b", 1), ("c", 3), ("d", 2)]);
        assert_eq!(ordered, vec!["b", "d", "a", "c"]);
    }
}
