//! Error type for the luma-quant public API.
//!
//! Every failure the core can report is a caller contract violation: an
//! out-of-range bit depth or a pixel buffer with an impossible shape. The
//! core never clamps such inputs silently; it returns a [`QuantizeError`]
//! so the host can surface a validation message.

use std::fmt;

/// Invalid-parameter conditions rejected by the core.
///
/// # Example
///
/// ```
/// use luma_quant::{BitDepth, QuantizeError};
///
/// let err = BitDepth::new(9).unwrap_err();
/// assert_eq!(err, QuantizeError::BitDepthOutOfRange { bits: 9, max: 8 });
/// assert_eq!(err.to_string(), "bit depth 9 is out of range (expected 1..=8)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantizeError {
    /// Requested bit depth is below 1 or above the source bit depth
    BitDepthOutOfRange {
        /// The requested number of bits
        bits: u8,
        /// Largest accepted value (the source bit depth)
        max: u8,
    },
    /// Declared source bit depth is outside 1..=8
    UnsupportedSourceDepth {
        /// The declared source depth
        bits: u8,
    },
    /// Bit depth text could not be parsed as an integer
    UnparsableBitDepth {
        /// The rejected input, verbatim
        input: String,
    },
    /// Width or height is zero
    EmptyImage {
        /// Declared width
        width: u32,
        /// Declared height
        height: u32,
    },
    /// Byte length does not equal width * height * 4
    BufferLength {
        /// Length implied by the dimensions
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },
}

impl fmt::Display for QuantizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantizeError::BitDepthOutOfRange { bits, max } => {
                write!(f, "bit depth {} is out of range (expected 1..={})", bits, max)
            }
            QuantizeError::UnsupportedSourceDepth { bits } => {
                write!(f, "source bit depth {} is not supported (expected 1..=8)", bits)
            }
            QuantizeError::UnparsableBitDepth { input } => {
                write!(f, "invalid bit depth {:?} (expected an integer)", input)
            }
            QuantizeError::EmptyImage { width, height } => {
                write!(f, "image has zero area ({}x{})", width, height)
            }
            QuantizeError::BufferLength { expected, actual } => {
                write!(
                    f,
                    "pixel buffer length mismatch: expected {} bytes, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for QuantizeError {}
