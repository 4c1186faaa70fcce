//! Validated quantization bit depth.

use std::fmt;
use std::str::FromStr;

use crate::api::QuantizeError;

/// Number of luminosity bits kept by the quantizer, in `1..=source`.
///
/// The source depth is 8 unless a caller supplies a different one through
/// [`BitDepth::with_source`]; no attempt is made to read it from image
/// metadata.
///
/// Derived quantities:
///
/// | bits | levels | step |
/// |------|--------|------|
/// | 1    | 2      | 128  |
/// | 4    | 16     | 16   |
/// | 8    | 256    | 1    |
///
/// # Example
///
/// ```
/// use luma_quant::BitDepth;
///
/// let depth = BitDepth::new(3).unwrap();
/// assert_eq!(depth.levels(), 8);
/// assert_eq!(depth.step(), 32.0);
/// assert_eq!(depth.to_string(), "3-bit");
///
/// assert!(BitDepth::new(0).is_err());
/// assert!(BitDepth::new(9).is_err());
/// assert!(BitDepth::with_source(6, 5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitDepth(u8);

impl BitDepth {
    /// Coarsest depth: two levels.
    pub const MIN: Self = Self(1);
    /// Depth assumed for every source image, and the finest depth accepted.
    pub const ORIGINAL: Self = Self(8);

    /// Validate `bits` against the default 8-bit source.
    pub fn new(bits: u8) -> Result<Self, QuantizeError> {
        Self::with_source(bits, Self::ORIGINAL.0)
    }

    /// Validate `bits` against an explicit source bit depth.
    ///
    /// `source_bits` must itself be in `1..=8`, and `bits` must not exceed it.
    pub fn with_source(bits: u8, source_bits: u8) -> Result<Self, QuantizeError> {
        if source_bits < Self::MIN.0 || source_bits > Self::ORIGINAL.0 {
            return Err(QuantizeError::UnsupportedSourceDepth { bits: source_bits });
        }
        if bits < Self::MIN.0 || bits > source_bits {
            return Err(QuantizeError::BitDepthOutOfRange {
                bits,
                max: source_bits,
            });
        }
        Ok(Self(bits))
    }

    /// Every accepted depth, coarsest first.
    pub fn all() -> impl DoubleEndedIterator<Item = Self> {
        (Self::MIN.0..=Self::ORIGINAL.0).map(Self)
    }

    /// Number of bits.
    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Number of luminosity levels, `2^bits`.
    #[inline]
    pub fn levels(self) -> u32 {
        1 << self.0
    }

    /// Width of one luminosity bucket, `256 / levels`.
    #[inline]
    pub fn step(self) -> f64 {
        256.0 / self.levels() as f64
    }

    /// Representative luminosity of the bucket containing `luminosity`:
    /// `floor(luminosity / step) * step`.
    #[inline]
    pub fn bucket_floor(self, luminosity: f64) -> f64 {
        let step = self.step();
        (luminosity / step).floor() * step
    }
}

impl Default for BitDepth {
    fn default() -> Self {
        Self::ORIGINAL
    }
}

impl TryFrom<u8> for BitDepth {
    type Error = QuantizeError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Self::new(bits)
    }
}

impl From<BitDepth> for u8 {
    fn from(depth: BitDepth) -> Self {
        depth.0
    }
}

impl FromStr for BitDepth {
    type Err = QuantizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_suffix("-bit")
            .or_else(|| trimmed.strip_suffix("bit"))
            .unwrap_or(trimmed);
        // Anything numeric but too large for u8 is a range error, not a parse error
        match digits.parse::<u32>() {
            Ok(n) => Self::new(u8::try_from(n).unwrap_or(u8::MAX)),
            Err(_) => Err(QuantizeError::UnparsableBitDepth {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.0)
    }
}
