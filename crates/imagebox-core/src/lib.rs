//! imagebox Core - Basic data structures for the image toolbox
//!
//! This crate provides the fundamental types shared by every imagebox
//! crate:
//!
//! - [`Bitmap`] / [`BitmapMut`] - 8-bit RGB image container (immutable / mutable)
//! - [`Rect`] - Rectangle regions
//! - [`Color`] - RGB colors and color-string parsing
//! - [`color`] - Packed pixel helpers

pub mod bitmap;
pub mod color;
pub mod error;
pub mod rect;

pub use bitmap::{Bitmap, BitmapMut, PixelDiff};
pub use color::Color;
pub use error::{Error, Result};
pub use rect::Rect;
