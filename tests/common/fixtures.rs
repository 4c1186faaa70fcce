//! Test fixtures: small PNG images built in memory.

use luma_quant::{PixelBuffer, Rgba};
use lumabits::codec::{encode_png, ExportOptions};

/// Encode pixels as an RGBA PNG
pub fn png(width: u32, height: u32, pixels: &[Rgba]) -> Vec<u8> {
    let buffer = PixelBuffer::from_pixels(width, height, pixels).unwrap();
    encode_png(&buffer, &ExportOptions::default()).unwrap()
}

/// 2x1 white/black image
pub fn white_black() -> Vec<u8> {
    png(2, 1, &[Rgba::WHITE, Rgba::BLACK])
}

/// 16x16 grey ramp covering every level 0..=255 once
pub fn grey_ramp() -> Vec<u8> {
    let pixels: Vec<Rgba> = (0..=255u8).map(|v| Rgba::opaque(v, v, v)).collect();
    png(16, 16, &pixels)
}

/// Single-colour image
pub fn solid(width: u32, height: u32, pixel: Rgba) -> Vec<u8> {
    png(width, height, &vec![pixel; (width * height) as usize])
}

/// Build a raw greyscale PNG of any size without allocating RGBA pixels
pub fn grey_png(width: u32, height: u32) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer
            .write_image_data(&vec![128u8; (width * height) as usize])
            .unwrap();
    }
    out
}
