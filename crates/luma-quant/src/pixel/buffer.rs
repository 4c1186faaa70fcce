//! Validated RGBA pixel buffer.

use super::rgba::Rgba;
use crate::api::QuantizeError;

/// Bytes per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// A row-major grid of RGBA8 pixels with non-zero area.
///
/// The invariants are checked once at construction and hold for the life of
/// the value:
///
/// - `width > 0` and `height > 0`
/// - the byte length is exactly `width * height * 4`
///
/// Buffers are plain owned values. Quantization borrows the original and
/// returns a new buffer; nothing in this crate mutates a buffer after it has
/// been built.
///
/// # Example
///
/// ```
/// use luma_quant::{PixelBuffer, QuantizeError, Rgba};
///
/// let buffer = PixelBuffer::new(2, 1, vec![255, 255, 255, 255, 0, 0, 0, 255]).unwrap();
/// assert_eq!(buffer.pixel(0, 0), Some(Rgba::WHITE));
/// assert_eq!(buffer.pixel(1, 0), Some(Rgba::BLACK));
///
/// let err = PixelBuffer::new(0, 1, Vec::new()).unwrap_err();
/// assert_eq!(err, QuantizeError::EmptyImage { width: 0, height: 1 });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes after validating the shape.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, QuantizeError> {
        if width == 0 || height == 0 {
            return Err(QuantizeError::EmptyImage { width, height });
        }
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(CHANNELS);
        if data.len() != expected {
            return Err(QuantizeError::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a buffer from row-major pixels.
    pub fn from_pixels(width: u32, height: u32, pixels: &[Rgba]) -> Result<Self, QuantizeError> {
        let data = pixels.iter().flat_map(|p| p.to_bytes()).collect();
        Self::new(width, height, data)
    }

    /// Build a buffer where every pixel has the same value.
    pub fn filled(width: u32, height: u32, pixel: Rgba) -> Result<Self, QuantizeError> {
        if width == 0 || height == 0 {
            return Err(QuantizeError::EmptyImage { width, height });
        }
        let count = width as usize * height as usize;
        let data = pixel.to_bytes().repeat(count);
        Self::new(width, height, data)
    }

    /// Construct from parts already known to satisfy the invariants.
    ///
    /// Used for quantizer output, which always copies the shape of a valid
    /// input buffer.
    pub(crate) fn from_parts(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert!(width > 0 && height > 0);
        debug_assert_eq!(data.len(), width as usize * height as usize * CHANNELS);
        Self {
            width,
            height,
            data,
        }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.data.len() / CHANNELS
    }

    /// Bytes per row.
    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let px = &self.data[offset..offset + CHANNELS];
        Some(Rgba::new(px[0], px[1], px[2], px[3]))
    }

    /// Iterate over all pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgba> + '_ {
        self.data
            .chunks_exact(CHANNELS)
            .map(|px| Rgba::new(px[0], px[1], px[2], px[3]))
    }

    /// Raw RGBA bytes, row-major.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer and return its raw RGBA bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_dimensions() {
        assert_eq!(
            PixelBuffer::new(3, 0, Vec::new()),
            Err(QuantizeError::EmptyImage {
                width: 3,
                height: 0
            })
        );
        assert_eq!(
            PixelBuffer::new(2, 2, vec![0; 15]),
            Err(QuantizeError::BufferLength {
                expected: 16,
                actual: 15
            })
        );
        assert!(PixelBuffer::new(2, 2, vec![0; 16]).is_ok());
    }

    #[test]
    fn test_from_pixels_layout() {
        let pixels = [Rgba::new(1, 2, 3, 4), Rgba::new(5, 6, 7, 8)];
        let buffer = PixelBuffer::from_pixels(1, 2, &pixels).unwrap();
        assert_eq!(buffer.as_bytes(), &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(buffer.pixel(0, 1), Some(Rgba::new(5, 6, 7, 8)));
        assert_eq!(buffer.pixels().collect::<Vec<_>>(), pixels.to_vec());
    }

    #[test]
    fn test_from_pixels_wrong_count() {
        let pixels = [Rgba::BLACK; 3];
        assert_eq!(
            PixelBuffer::from_pixels(2, 2, &pixels),
            Err(QuantizeError::BufferLength {
                expected: 16,
                actual: 12
            })
        );
    }

    #[test]
    fn test_filled() {
        let buffer = PixelBuffer::filled(3, 2, Rgba::new(9, 8, 7, 6)).unwrap();
        assert_eq!(buffer.pixel_count(), 6);
        assert_eq!(buffer.row_bytes(), 12);
        assert!(buffer.pixels().all(|p| p == Rgba::new(9, 8, 7, 6)));
        assert!(PixelBuffer::filled(0, 0, Rgba::BLACK).is_err());
    }

    #[test]
    fn test_pixel_out_of_bounds() {
        let buffer = PixelBuffer::filled(2, 3, Rgba::WHITE).unwrap();
        assert!(buffer.pixel(1, 2).is_some());
        assert_eq!(buffer.pixel(2, 0), None);
        assert_eq!(buffer.pixel(0, 3), None);
    }

    #[test]
    fn test_into_bytes_round_trip() {
        let bytes: Vec<u8> = (0..24).collect();
        let buffer = PixelBuffer::new(3, 2, bytes.clone()).unwrap();
        assert_eq!(buffer.into_bytes(), bytes);
    }
}
