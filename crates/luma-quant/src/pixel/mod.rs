//! Pixel types and luminosity evaluation
//!
//! This module provides the in-memory image representation consumed and
//! produced by the quantizer.
//!
//! - [`Rgba`]: a single 8-bit-per-channel pixel
//! - [`PixelBuffer`]: a validated, row-major grid of RGBA pixels
//! - [`luminosity`] / [`luminosity_level`]: the 0.299/0.587/0.114 weighting
//!
//! # Example
//!
//! ```
//! use luma_quant::{PixelBuffer, Rgba};
//!
//! let buffer = PixelBuffer::filled(2, 2, Rgba::opaque(255, 255, 255)).unwrap();
//! assert_eq!(buffer.pixel_count(), 4);
//! assert_eq!(buffer.pixel(1, 1).unwrap().luminosity_level(), 255);
//! ```

mod buffer;
mod luminosity;
mod rgba;

pub use buffer::{PixelBuffer, CHANNELS};
pub use luminosity::{luminosity, luminosity_level, BLUE_WEIGHT, GREEN_WEIGHT, RED_WEIGHT};
pub use rgba::Rgba;
