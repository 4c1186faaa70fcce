//! Single RGBA pixel.

use super::luminosity::{luminosity, luminosity_level};

/// An 8-bit-per-channel RGBA pixel.
///
/// Channels are raw byte values; no gamma handling is applied anywhere in
/// the quantizer, matching how browsers and PNG decoders hand pixels over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
    /// Alpha channel (0..=255), never modified by quantization
    pub a: u8,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    /// Create a pixel from all four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque pixel.
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a pixel from `[r, g, b, a]` bytes.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    /// Channels as `[r, g, b, a]` bytes.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Luminosity of the colour channels (alpha is ignored).
    #[inline]
    pub fn luminosity(self) -> f64 {
        luminosity(self.r, self.g, self.b)
    }

    /// Integer luminosity level (histogram bucket) of this pixel.
    #[inline]
    pub fn luminosity_level(self) -> u8 {
        luminosity_level(self.r, self.g, self.b)
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(bytes: [u8; 4]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Rgba> for [u8; 4] {
    fn from(pixel: Rgba) -> Self {
        pixel.to_bytes()
    }
}
