//! imagebox-filter - Image filtering and enhancement
//!
//! This crate provides:
//!
//! - Convolution with small odd-sized kernels ([`Kernel`], [`convolve`])
//! - Box blur and its three-pass Gaussian approximation
//! - Unsharp masking with a threshold
//! - Multiplicative enhancers (contrast, color, sharpness, brightness)
//!   built on [`blend`]
//! - The fixed enhancement pipeline ([`enhance`])

pub mod blur;
pub mod convolve;
pub mod enhance;
mod error;
pub mod kernel;
pub mod unsharp;

pub use blur::{box_blur, gaussian_blur};
pub use convolve::convolve;
pub use enhance::{
    EnhanceParams, blend, enhance, enhance_brightness, enhance_color, enhance_contrast,
    enhance_sharpness,
};
pub use error::{FilterError, FilterResult};
pub use kernel::Kernel;
pub use unsharp::{UnsharpParams, unsharp_mask};
