//! Guillotine slicer
//!
//! Full-width and full-height cuts at every guide partition the bitmap
//! into a grid of tiles. Tiles are emitted row by row, left to right, so
//! re-stitching them as a grid with as many columns as there are cut
//! intervals rebuilds the original exactly.

use crate::guides::GuideSet;
use crate::{LayoutError, LayoutResult};
use imagebox_core::{Bitmap, Rect};
use tracing::debug;

/// Tile rectangles for a `width` x `height` image, in row-major order.
///
/// # Errors
///
/// Returns [`LayoutError::EmptyBitmap`] if either dimension is 0.
pub fn slice_regions(width: u32, height: u32, guides: &GuideSet) -> LayoutResult<Vec<Rect>> {
    if width == 0 || height == 0 {
        return Err(LayoutError::EmptyBitmap { width, height });
    }
    let cuts = guides.cuts(width, height);
    debug!(xs = ?cuts.xs, ys = ?cuts.ys, "slice cuts");

    let mut regions = Vec::with_capacity((cuts.xs.len() - 1) * (cuts.ys.len() - 1));
    for ys in cuts.ys.windows(2) {
        for xs in cuts.xs.windows(2) {
            // windows over sorted, deduplicated cuts are never empty
            regions.push(Rect::from_corners(
                xs[0] as i32,
                ys[0] as i32,
                xs[1] as i32,
                ys[1] as i32,
            ));
        }
    }
    Ok(regions)
}

/// Number of tile columns `guides` produce on an image `width` wide.
pub fn slice_columns(width: u32, guides: &GuideSet) -> usize {
    guides.cuts(width, 1).xs.len() - 1
}

/// Cut `bitmap` along `guides`.
///
/// With no guides the result is a single tile equal to the input.
pub fn slice(bitmap: &Bitmap, guides: &GuideSet) -> LayoutResult<Vec<Bitmap>> {
    let regions = slice_regions(bitmap.width(), bitmap.height(), guides)?;
    let tiles = regions
        .iter()
        .map(|r| bitmap.clip_rect(r))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(tiles = tiles.len(), "sliced");
    Ok(tiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use imagebox_core::Color;

    #[test]
    fn test_no_guides_single_tile() {
        let b = Bitmap::new_filled(30, 20, Color::new(1, 2, 3)).unwrap();
        let tiles = slice(&b, &GuideSet::new()).unwrap();
        assert_eq!(tiles.len(), 1);
        assert!(tiles[0].equals(&b));
    }

    #[test]
    fn test_regions_row_major() {
        let g = GuideSet::from_axes(vec![100, 200], vec![100]);
        let r = slice_regions(300, 200, &g).unwrap();
        assert_eq!(r.len(), 6);
        assert_eq!(r[0], Rect::new_unchecked(0, 0, 100, 100));
        assert_eq!(r[2], Rect::new_unchecked(200, 0, 100, 100));
        assert_eq!(r[3], Rect::new_unchecked(0, 100, 100, 100));
        let area: i64 = r.iter().map(Rect::area).sum();
        assert_eq!(area, 60000);
    }

    #[test]
    fn test_edge_and_outside_guides_are_ignored() {
        let g = GuideSet::from_axes(vec![0, 50, 50, 120, -7], vec![40, 999]);
        let r = slice_regions(100, 40, &g).unwrap();
        assert_eq!(r, vec![Rect::new_unchecked(0, 0, 50, 40), Rect::new_unchecked(50, 0, 50, 40)]);
        assert_eq!(slice_columns(100, &g), 2);
    }

    #[test]
    fn test_empty_dimensions_rejected() {
        assert!(matches!(
            slice_regions(0, 10, &GuideSet::new()),
            Err(LayoutError::EmptyBitmap { width: 0, height: 10 })
        ));
    }
}
