//! Luminosity-preserving scale-factor quantization.
//!
//! For each pixel with luminosity `L`:
//!
//! ```text
//! step = 256 / 2^bits
//! Q    = floor(L / step) * step
//! f    = Q / L        (L > 0)
//!      = 0            (L == 0)
//! out  = min(255, floor(channel * f))   for R, G, B; alpha copied
//! ```
//!
//! All three colour channels share the scale factor, so a pixel keeps its
//! hue ratios while its brightness snaps down to the bucket floor. Because
//! each channel is floored separately, the output luminosity lands in
//! `(Q - 1, Q]`.
//!
//! Every quantity is an `f64` evaluated as written, with `L > 0` as the only
//! guard. A grey whose luminosity evaluates just under its channel value
//! (see [`luminosity`]) is therefore floored into the bucket below.

use super::bit_depth::BitDepth;
use crate::pixel::{luminosity, PixelBuffer, Rgba, CHANNELS};

/// Scale one pixel's colour channels onto the bucket floor of its luminosity.
#[inline]
pub(crate) fn scale_rgb(r: u8, g: u8, b: u8, depth: BitDepth) -> [u8; 3] {
    let l = luminosity(r, g, b);
    let factor = if l > 0.0 {
        depth.bucket_floor(l) / l
    } else {
        0.0
    };
    let scale = |channel: u8| (channel as f64 * factor).floor().min(255.0) as u8;
    [scale(r), scale(g), scale(b)]
}

/// Quantize a single pixel. Alpha passes through unchanged.
///
/// # Example
///
/// ```
/// use luma_quant::{quantize_pixel, BitDepth, Rgba};
///
/// let one_bit = BitDepth::new(1).unwrap();
/// assert_eq!(quantize_pixel(Rgba::WHITE, one_bit), Rgba::opaque(128, 128, 128));
/// assert_eq!(quantize_pixel(Rgba::new(0, 0, 0, 7), one_bit), Rgba::new(0, 0, 0, 7));
/// ```
#[inline]
pub fn quantize_pixel(pixel: Rgba, depth: BitDepth) -> Rgba {
    let [r, g, b] = scale_rgb(pixel.r, pixel.g, pixel.b, depth);
    Rgba::new(r, g, b, pixel.a)
}

/// Quantize a run of RGBA bytes into an equally sized destination slice.
pub(crate) fn quantize_into(src: &[u8], dst: &mut [u8], depth: BitDepth) {
    debug_assert_eq!(src.len(), dst.len());
    for (s, d) in src.chunks_exact(CHANNELS).zip(dst.chunks_exact_mut(CHANNELS)) {
        let [r, g, b] = scale_rgb(s[0], s[1], s[2], depth);
        d[0] = r;
        d[1] = g;
        d[2] = b;
        d[3] = s[3];
    }
}

/// Quantize a whole buffer in a single sequential pass.
///
/// The original is left untouched; the result has identical dimensions.
///
/// # Example
///
/// ```
/// use luma_quant::{quantize, BitDepth, PixelBuffer, Rgba};
///
/// let original = PixelBuffer::from_pixels(2, 1, &[Rgba::WHITE, Rgba::BLACK]).unwrap();
/// let quantized = quantize(&original, BitDepth::new(1).unwrap());
///
/// assert_eq!(quantized.pixel(0, 0), Some(Rgba::opaque(128, 128, 128)));
/// assert_eq!(quantized.pixel(1, 0), Some(Rgba::BLACK));
/// assert_eq!(original.pixel(0, 0), Some(Rgba::WHITE));
/// ```
pub fn quantize(original: &PixelBuffer, depth: BitDepth) -> PixelBuffer {
    let src = original.as_bytes();
    let mut data = vec![0u8; src.len()];
    quantize_into(src, &mut data, depth);
    PixelBuffer::from_parts(original.width(), original.height(), data)
}

/// Quantize using rayon, one row band per task.
///
/// Produces exactly the same bytes as [`quantize`].
#[cfg(feature = "parallel")]
pub(crate) fn quantize_parallel(original: &PixelBuffer, depth: BitDepth) -> PixelBuffer {
    use rayon::prelude::*;

    let src = original.as_bytes();
    let band = crate::bands::band_bytes(original);
    let mut data = vec![0u8; src.len()];
    data.par_chunks_mut(band)
        .zip(src.par_chunks(band))
        .for_each(|(dst, src)| quantize_into(src, dst, depth));
    PixelBuffer::from_parts(original.width(), original.height(), data)
}
