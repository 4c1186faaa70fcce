//! Bit-depth reduction of pixel luminosity.
//!
//! - [`BitDepth`]: validated number of luminosity bits (1..=8)
//! - [`quantize`] / [`quantize_pixel`]: the scale-factor quantizer
//! - [`quantize_bits`]: convenience entry point for unvalidated integers

mod bit_depth;
mod scale;

pub use bit_depth::BitDepth;
pub use scale::{quantize, quantize_pixel};

#[cfg(feature = "parallel")]
pub(crate) use scale::quantize_parallel;

use crate::api::QuantizeError;
use crate::pixel::PixelBuffer;

/// Validate `bits` and quantize in one call.
///
/// Out-of-range depths are rejected, never clamped.
///
/// # Example
///
/// ```
/// use luma_quant::{quantize_bits, PixelBuffer, QuantizeError, Rgba};
///
/// let buffer = PixelBuffer::filled(1, 1, Rgba::WHITE).unwrap();
/// assert!(quantize_bits(&buffer, 4).is_ok());
/// assert_eq!(
///     quantize_bits(&buffer, 0),
///     Err(QuantizeError::BitDepthOutOfRange { bits: 0, max: 8 })
/// );
/// ```
pub fn quantize_bits(original: &PixelBuffer, bits: u8) -> Result<PixelBuffer, QuantizeError> {
    let depth = BitDepth::new(bits)?;
    Ok(quantize(original, depth))
}
