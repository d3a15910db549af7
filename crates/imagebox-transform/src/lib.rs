//! imagebox-transform - Geometric transformations
//!
//! This crate provides the geometric operations the toolbox needs:
//!
//! - Orthogonal rotations (90, 180, 270 degrees) and rotation by a
//!   multiple of 90 degrees
//! - Horizontal and vertical flips, transpose and transverse (used to
//!   normalize embedded orientation metadata)
//! - Resampling (nearest neighbor, bilinear, bicubic, Lanczos)

mod error;
pub mod rotate;
pub mod scale;

pub use error::{TransformError, TransformResult};
pub use rotate::{
    flip_lr, flip_tb, rotate_90, rotate_180, rotate_degrees, rotate_orth, transpose, transverse,
};
pub use scale::{ScaleMethod, scale, scale_to_height, scale_to_size, scale_to_width};
