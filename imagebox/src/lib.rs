//! imagebox - Image toolbox
//!
//! Stitches several images into one canvas, cuts an image along guide
//! lines or drawn rectangles, and runs a fixed sharpen/contrast/upscale
//! pipeline with a before/after comparison view.
//!
//! # Overview
//!
//! - Decoding with orientation and transparency normalization ([`io`])
//! - Rotation and resampling ([`transform`])
//! - Unsharp mask and enhancers ([`filter`])
//! - Guillotine slicing, free crops and stitching ([`layout`])
//! - Before/after views ([`compare`])
//!
//! # Example
//!
//! ```
//! use imagebox::layout::{GuideSet, slice};
//! use imagebox::{Bitmap, Color};
//!
//! let bmp = Bitmap::new_filled(300, 200, Color::WHITE).unwrap();
//! let guides = GuideSet::from_axes(vec![100, 200], vec![100]);
//! let tiles = slice(&bmp, &guides).unwrap();
//! assert_eq!(tiles.len(), 6);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use imagebox_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use imagebox_filter as filter;
pub use imagebox_io as io;
pub use imagebox_layout as layout;
pub use imagebox_transform as transform;

pub mod compare;
pub mod config;
mod error;

pub use error::{ToolError, ToolResult};
