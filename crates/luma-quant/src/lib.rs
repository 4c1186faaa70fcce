//! luma-quant: luminosity bit-depth quantization for RGBA images
//!
//! This library reduces the effective luminosity resolution of an image to a
//! requested bit depth and reports the resulting luminosity histogram. It is
//! the computational core behind a colour-banding visualiser: decoding,
//! display and export belong to the host.
//!
//! # Quick Start
//!
//! The [`Quantizer`] runs both stages for one bit depth:
//!
//! ```
//! use luma_quant::{BitDepth, PixelBuffer, Quantizer, Rgba};
//!
//! let original = PixelBuffer::from_pixels(2, 1, &[Rgba::WHITE, Rgba::BLACK]).unwrap();
//! let result = Quantizer::new(BitDepth::new(1).unwrap()).run(&original);
//!
//! assert_eq!(result.buffer().pixel(0, 0), Some(Rgba::opaque(128, 128, 128)));
//! // 128-grey evaluates to luminosity 127.99999999999999
//! assert_eq!(result.histogram().get(127), 1);
//! assert_eq!(result.histogram().get(0), 1);
//! ```
//!
//! # Stages
//!
//! ```text
//! original PixelBuffer ──> quantize() ──> quantized PixelBuffer ──> build_histogram() ──> Histogram
//!                                               │
//!                                               └──> display / export (host)
//! ```
//!
//! Both stages are pure single-pass scans. The original is never modified,
//! no state survives between calls, and identical inputs give identical
//! output on every platform.
//!
//! # Quantization
//!
//! With `L = 0.299 R + 0.587 G + 0.114 B` and `step = 256 / 2^bits`, each
//! pixel's colour channels are multiplied by `floor(L / step) * step / L` and
//! floored. Black (`L = 0`) maps to black. Alpha is copied.
//!
//! All three channels share one factor, so hue ratios survive while the
//! brightness collapses onto a few levels. That hue-preserving,
//! brightness-banding look is the artifact being visualised.
//!
//! Everything is evaluated in `f64` exactly as written above, including the
//! `L > 0` guard. The weights are not exact binary fractions, so about a
//! quarter of the greys evaluate a hair below their channel value and drop
//! one level (or one whole bucket, when they sit on a boundary). Output
//! luminosity lands in `(Q - 1, Q]` because each channel is floored on its
//! own.
//!
//! # Errors
//!
//! Invalid parameters (bit depth outside `1..=8`, zero-area or mis-sized
//! buffers) are reported as [`QuantizeError`] at construction time:
//! [`BitDepth::new`] and [`PixelBuffer::new`] are the only fallible steps,
//! and everything downstream of them is total.
//!
//! # Features
//!
//! - `parallel`: split both scans into row bands on the rayon thread pool.
//!   Every pixel depends only on itself, so output is byte-identical.

pub mod api;
pub mod histogram;
pub mod output;
pub mod pixel;
pub mod quantize;

#[cfg(feature = "parallel")]
mod bands;

#[cfg(test)]
mod domain_tests;

pub use api::{QuantizeError, Quantizer};
pub use histogram::{build_histogram, Histogram, BUCKETS};
pub use output::QuantizedImage;
pub use pixel::{luminosity, luminosity_level, PixelBuffer, Rgba, CHANNELS};
pub use quantize::{quantize, quantize_bits, quantize_pixel, BitDepth};
