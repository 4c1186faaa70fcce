//! Quantizer builder -- the primary entry point for the crate.
//!
//! [`Quantizer`] fixes a bit depth and runs the Quantizer and
//! HistogramBuilder stages in sequence over an original buffer.

use crate::histogram::{build_histogram, Histogram};
use crate::output::QuantizedImage;
use crate::pixel::PixelBuffer;
use crate::quantize::{quantize, BitDepth};

/// Reusable quantize-then-histogram pipeline for one bit depth.
///
/// - Constructor requires a validated [`BitDepth`] (no invalid states)
/// - [`run()`](Self::run) takes `&self`, so one quantizer serves many images
/// - Each call is independent: nothing is cached between runs
///
/// With the `parallel` feature the scans are split into row bands and run
/// on the rayon pool; [`parallel(false)`](Self::parallel) forces the
/// sequential path. Both paths produce identical output.
///
/// # Example
///
/// ```
/// use luma_quant::{BitDepth, PixelBuffer, Quantizer, Rgba};
///
/// let original = PixelBuffer::from_pixels(2, 1, &[Rgba::WHITE, Rgba::BLACK]).unwrap();
/// let result = Quantizer::new(BitDepth::new(1).unwrap()).run(&original);
///
/// assert_eq!(result.buffer().pixel(0, 0), Some(Rgba::opaque(128, 128, 128)));
/// assert_eq!(result.histogram().get(128), 1);
/// assert_eq!(result.histogram().get(0), 1);
/// assert_eq!(result.histogram().total(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Quantizer {
    depth: BitDepth,
    parallel: bool,
}

impl Quantizer {
    /// Create a quantizer for the given depth.
    ///
    /// Parallel scanning is on by default when the `parallel` feature is
    /// compiled in.
    pub fn new(depth: BitDepth) -> Self {
        Self {
            depth,
            parallel: cfg!(feature = "parallel"),
        }
    }

    /// Enable or disable banded parallel scans.
    ///
    /// Has no effect unless the `parallel` feature is enabled.
    #[inline]
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled && cfg!(feature = "parallel");
        self
    }

    /// Depth this quantizer reduces to.
    #[inline]
    pub fn bit_depth(&self) -> BitDepth {
        self.depth
    }

    /// Whether scans run on the rayon pool.
    #[inline]
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Quantizer stage only: a new buffer, same dimensions, alpha preserved.
    pub fn quantize(&self, original: &PixelBuffer) -> PixelBuffer {
        #[cfg(feature = "parallel")]
        if self.parallel {
            return crate::quantize::quantize_parallel(original, self.depth);
        }
        quantize(original, self.depth)
    }

    /// HistogramBuilder stage only.
    pub fn histogram(&self, buffer: &PixelBuffer) -> Histogram {
        #[cfg(feature = "parallel")]
        if self.parallel {
            return crate::histogram::build_histogram_parallel(buffer);
        }
        build_histogram(buffer)
    }

    /// Quantize `original`, then build the histogram of the result.
    pub fn run(&self, original: &PixelBuffer) -> QuantizedImage {
        let buffer = self.quantize(original);
        let histogram = self.histogram(&buffer);
        QuantizedImage::new(buffer, histogram, self.depth)
    }
}
