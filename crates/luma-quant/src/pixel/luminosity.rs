//! Luminosity weighting.
//!
//! Luminosity is `0.299 R + 0.587 G + 0.114 B`, evaluated in `f64` left to
//! right. The weights are not exact binary fractions, so some greys come out
//! a hair below their channel value: `(128, 128, 128)` has luminosity
//! `127.99999999999999` and lands in level 127. Quantization and the
//! histogram both read this same value, so they always agree on a pixel's
//! level.

/// Red weight.
pub const RED_WEIGHT: f64 = 0.299;
/// Green weight.
pub const GREEN_WEIGHT: f64 = 0.587;
/// Blue weight.
pub const BLUE_WEIGHT: f64 = 0.114;

/// Luminosity in the 0.0..=255.0 range.
///
/// Zero only for pure black.
///
/// # Example
/// ```
/// use luma_quant::luminosity;
/// assert_eq!(luminosity(0, 0, 0), 0.0);
/// assert_eq!(luminosity(255, 255, 255), 255.0);
/// assert_eq!(luminosity(200, 100, 50), 124.2);
/// assert!(luminosity(128, 128, 128) < 128.0);
/// ```
#[inline]
pub fn luminosity(r: u8, g: u8, b: u8) -> f64 {
    RED_WEIGHT * r as f64 + GREEN_WEIGHT * g as f64 + BLUE_WEIGHT * b as f64
}

/// Integer luminosity level (floor of [`luminosity`]), used as histogram index.
///
/// # Example
/// ```
/// use luma_quant::luminosity_level;
/// assert_eq!(luminosity_level(255, 0, 0), 76);
/// assert_eq!(luminosity_level(128, 128, 128), 127);
/// ```
#[inline]
pub fn luminosity_level(r: u8, g: u8, b: u8) -> u8 {
    // White evaluates to exactly 255.0; the cast saturates regardless
    luminosity(r, g, b).floor() as u8
}
