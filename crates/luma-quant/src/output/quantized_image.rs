//! QuantizedImage: quantized pixels plus their histogram.

use crate::histogram::Histogram;
use crate::pixel::PixelBuffer;
use crate::quantize::BitDepth;

/// Result of [`Quantizer::run`](crate::Quantizer::run).
///
/// Both parts are derived from the same `(original, bit depth)` pair: the
/// histogram is computed over the quantized pixels, never the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedImage {
    buffer: PixelBuffer,
    histogram: Histogram,
    bit_depth: BitDepth,
}

impl QuantizedImage {
    pub(crate) fn new(buffer: PixelBuffer, histogram: Histogram, bit_depth: BitDepth) -> Self {
        debug_assert_eq!(histogram.total(), buffer.pixel_count() as u64);
        Self {
            buffer,
            histogram,
            bit_depth,
        }
    }

    /// The quantized pixels, ready for display or export.
    #[inline]
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Luminosity histogram of [`buffer()`](Self::buffer).
    #[inline]
    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    /// Depth the pixels were quantized to.
    #[inline]
    pub fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }

    /// Split into owned buffer and histogram.
    pub fn into_parts(self) -> (PixelBuffer, Histogram) {
        (self.buffer, self.histogram)
    }
}
