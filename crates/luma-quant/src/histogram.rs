//! 256-bucket luminosity histogram.
//!
//! [`build_histogram`] scans every pixel once, computes the integer
//! luminosity level `floor(0.299 R + 0.587 G + 0.114 B)`, and counts it.
//! The table starts at zero on every call; there is no incremental update
//! and no sampling, so the counts always sum to `width * height`.
//!
//! The builder is normally run on quantizer output. Renderers draw bucket
//! heights relative to [`Histogram::max`]; the core only exposes the raw
//! counts.

use crate::pixel::{luminosity_level, PixelBuffer, CHANNELS};

/// Number of luminosity buckets.
pub const BUCKETS: usize = 256;

/// Pixel counts per luminosity level (0 = black, 255 = white).
///
/// # Example
///
/// ```
/// use luma_quant::{build_histogram, PixelBuffer, Rgba};
///
/// let buffer = PixelBuffer::from_pixels(3, 1, &[Rgba::WHITE, Rgba::WHITE, Rgba::BLACK]).unwrap();
/// let histogram = build_histogram(&buffer);
///
/// assert_eq!(histogram.get(255), 2);
/// assert_eq!(histogram.get(0), 1);
/// assert_eq!(histogram.total(), 3);
/// assert_eq!(histogram.occupied_levels(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; BUCKETS],
}

impl Histogram {
    /// An all-zero histogram.
    pub fn empty() -> Self {
        Self {
            counts: [0; BUCKETS],
        }
    }

    /// Wrap precomputed counts.
    pub fn from_counts(counts: [u64; BUCKETS]) -> Self {
        Self { counts }
    }

    /// All 256 counts, indexed by luminosity level.
    #[inline]
    pub fn counts(&self) -> &[u64; BUCKETS] {
        &self.counts
    }

    /// Count for one luminosity level.
    #[inline]
    pub fn get(&self, level: u8) -> u64 {
        self.counts[level as usize]
    }

    /// Sum of all buckets; equals the pixel count of the scanned buffer.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Largest bucket count (0 for an empty histogram).
    pub fn max(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Number of levels with a non-zero count.
    pub fn occupied_levels(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// `(level, count)` pairs for every bucket, darkest first.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(level, &count)| (level as u8, count))
    }

    fn accumulate(&mut self, bytes: &[u8]) {
        for px in bytes.chunks_exact(CHANNELS) {
            self.counts[luminosity_level(px[0], px[1], px[2]) as usize] += 1;
        }
    }

    #[cfg(feature = "parallel")]
    fn merge(mut self, other: Self) -> Self {
        for (a, b) in self.counts.iter_mut().zip(other.counts.iter()) {
            *a += b;
        }
        self
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Self::empty()
    }
}

/// Count luminosity levels over the whole buffer.
pub fn build_histogram(buffer: &PixelBuffer) -> Histogram {
    let mut histogram = Histogram::empty();
    histogram.accumulate(buffer.as_bytes());
    histogram
}

/// Parallel variant of [`build_histogram`]: one partial table per row band,
/// summed at the end.
#[cfg(feature = "parallel")]
pub(crate) fn build_histogram_parallel(buffer: &PixelBuffer) -> Histogram {
    use rayon::prelude::*;

    let band = crate::bands::band_bytes(buffer);
    buffer
        .as_bytes()
        .par_chunks(band)
        .map(|chunk| {
            let mut partial = Histogram::empty();
            partial.accumulate(chunk);
            partial
        })
        .reduce(Histogram::empty, Histogram::merge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Rgba;

    #[test]
    fn test_counts_sum_to_pixel_count() {
        let pixels: Vec<Rgba> = (0..=255u8).map(|v| Rgba::opaque(v, 255 - v, v / 2)).collect();
        let buffer = PixelBuffer::from_pixels(16, 16, &pixels).unwrap();
        let histogram = build_histogram(&buffer);
        assert_eq!(histogram.total(), 256);
    }

    #[test]
    fn test_grey_ramp_levels() {
        let pixels: Vec<Rgba> = (0..=255u8).map(|v| Rgba::opaque(v, v, v)).collect();
        let buffer = PixelBuffer::from_pixels(256, 1, &pixels).unwrap();
        let histogram = build_histogram(&buffer);
        assert_eq!(histogram.total(), 256);
        // 65 greys evaluate just under their value and share the level below
        assert_eq!(histogram.occupied_levels(), 204);
        assert_eq!(histogram.max(), 2);
        assert_eq!(histogram.get(0), 2);
        assert_eq!(histogram.get(2), 0);
        assert_eq!(histogram.get(3), 2);
        assert_eq!(histogram.get(128), 0);
        assert_eq!(histogram.get(255), 1);
    }

    #[test]
    fn test_level_uses_floor() {
        // L = 124.2 lands in bucket 124; L = 29.07 in bucket 29
        let buffer =
            PixelBuffer::from_pixels(2, 1, &[Rgba::opaque(200, 100, 50), Rgba::opaque(0, 0, 255)])
                .unwrap();
        let histogram = build_histogram(&buffer);
        assert_eq!(histogram.get(124), 1);
        assert_eq!(histogram.get(29), 1);
        assert_eq!(histogram.total(), 2);
    }

    #[test]
    fn test_alpha_does_not_affect_level() {
        let buffer =
            PixelBuffer::from_pixels(2, 1, &[Rgba::new(90, 90, 90, 0), Rgba::new(90, 90, 90, 255)])
                .unwrap();
        assert_eq!(build_histogram(&buffer).get(90), 2);
    }

    #[test]
    fn test_repeated_builds_do_not_leak() {
        let buffer = PixelBuffer::filled(4, 4, Rgba::WHITE).unwrap();
        let first = build_histogram(&buffer);
        let second = build_histogram(&buffer);
        assert_eq!(first, second);
        assert_eq!(second.get(255), 16);
    }

    #[test]
    fn test_iter_and_empty() {
        let empty = Histogram::default();
        assert_eq!(empty.total(), 0);
        assert_eq!(empty.max(), 0);
        assert_eq!(empty.occupied_levels(), 0);
        assert_eq!(empty.iter().count(), BUCKETS);

        let mut counts = [0u64; BUCKETS];
        counts[7] = 3;
        let histogram = Histogram::from_counts(counts);
        let occupied: Vec<(u8, u64)> = histogram.iter().filter(|&(_, c)| c > 0).collect();
        assert_eq!(occupied, vec![(7, 3)]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let pixels: Vec<Rgba> = (0..64 * 48)
            .map(|i| Rgba::opaque((i * 7) as u8, (i * 13) as u8, (i * 29) as u8))
            .collect();
        let buffer = PixelBuffer::from_pixels(64, 48, &pixels).unwrap();
        assert_eq!(build_histogram_parallel(&buffer), build_histogram(&buffer));
    }
}
