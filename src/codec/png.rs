use luma_quant::{BitDepth, PixelBuffer};
use std::io::Cursor;

use crate::error::CodecError;

const PNG_SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";

/// Decoder limits applied before any pixel data is allocated.
#[derive(Debug, Clone, Copy)]
pub struct DecodeLimits {
    /// Largest accepted width or height
    pub max_dimension: u32,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_dimension: 8192,
        }
    }
}

/// A decoded PNG, normalised to RGBA8.
#[derive(Debug)]
pub struct DecodedPng {
    pub buffer: PixelBuffer,
    /// Per-channel bit depth from the PNG header
    pub source_bit_depth: u8,
}

/// Export settings for [`encode_png`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    /// Depth recorded in the `Comment` text chunk
    pub bit_depth: Option<BitDepth>,
    /// Run oxipng over the encoded file
    pub optimize: bool,
}

/// Check the 8-byte PNG signature.
pub fn is_png(bytes: &[u8]) -> bool {
    bytes.len() >= PNG_SIGNATURE.len() && &bytes[..PNG_SIGNATURE.len()] == PNG_SIGNATURE
}

/// Decode any PNG colour type into an RGBA8 pixel buffer.
///
/// Palette and low-bit-depth images are expanded, 16-bit samples are
/// stripped to 8 bits, and a `tRNS` chunk becomes the alpha channel.
pub fn decode_png(bytes: &[u8], limits: DecodeLimits) -> Result<DecodedPng, CodecError> {
    if !is_png(bytes) {
        return Err(CodecError::NotPng);
    }

    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| CodecError::Decode(e.to_string()))?;

    let (width, height, source_bit_depth) = {
        let info = reader.info();
        (info.width, info.height, info.bit_depth as u8)
    };
    if width > limits.max_dimension || height > limits.max_dimension {
        return Err(CodecError::TooLarge {
            width,
            height,
            max: limits.max_dimension,
        });
    }

    let mut raw = vec![0u8; reader.output_buffer_size()];
    let frame = reader
        .next_frame(&mut raw)
        .map_err(|e| CodecError::Decode(e.to_string()))?;
    raw.truncate(frame.buffer_size());

    let rgba = to_rgba8(&raw, frame.color_type)?;
    let buffer = PixelBuffer::new(frame.width, frame.height, rgba)?;

    tracing::debug!(
        width = frame.width,
        height = frame.height,
        color_type = ?frame.color_type,
        source_bit_depth,
        "Decoded PNG"
    );

    Ok(DecodedPng {
        buffer,
        source_bit_depth,
    })
}

/// Expand 8-bit samples of any colour type to RGBA.
fn to_rgba8(raw: &[u8], color_type: png::ColorType) -> Result<Vec<u8>, CodecError> {
    let rgba = match color_type {
        png::ColorType::Rgba => raw.to_vec(),
        png::ColorType::Rgb => raw
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => raw
            .chunks_exact(2)
            .flat_map(|px| [px[0], px[0], px[0], px[1]])
            .collect(),
        png::ColorType::Grayscale => raw.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::Indexed => {
            return Err(CodecError::Decode("palette was not expanded".to_string()))
        }
    };
    Ok(rgba)
}

/// Encode an RGBA8 buffer as PNG.
///
/// When `options.bit_depth` is set, a `tEXt` chunk with keyword `Comment`
/// records it. With `options.optimize`, oxipng re-compresses the file
/// losslessly; if that fails the unoptimized bytes are returned.
pub fn encode_png(buffer: &PixelBuffer, options: &ExportOptions) -> Result<Vec<u8>, CodecError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, buffer.width(), buffer.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        if options.optimize {
            // oxipng picks filters and compression itself
            encoder.set_compression(png::Compression::Fast);
        }
        if let Some(depth) = options.bit_depth {
            encoder
                .add_text_chunk("Comment".to_string(), depth_comment(depth))
                .map_err(|e| CodecError::Encode(e.to_string()))?;
        }
        let mut writer = encoder
            .write_header()
            .map_err(|e| CodecError::Encode(e.to_string()))?;
        writer
            .write_image_data(buffer.as_bytes())
            .map_err(|e| CodecError::Encode(e.to_string()))?;
    }
    let png_bytes = buf.into_inner();

    if !options.optimize {
        return Ok(png_bytes);
    }

    match oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::None,
            optimize_alpha: false,
            ..Default::default()
        },
    ) {
        Ok(optimized) => {
            tracing::debug!(
                before = png_bytes.len(),
                after = optimized.len(),
                "Optimized PNG"
            );
            Ok(optimized)
        }
        Err(e) => {
            tracing::warn!(%e, "oxipng failed, keeping unoptimized PNG");
            Ok(png_bytes)
        }
    }
}

/// Text stored in the `Comment` chunk of exported files.
pub fn depth_comment(depth: BitDepth) -> String {
    format!("luminosity quantized to {depth}")
}

/// Export file name for a quantized rendition: `<stem>-<N>bit.png`.
pub fn export_file_name(stem: &str, depth: BitDepth) -> String {
    format!("{stem}-{}bit.png", depth.bits())
}
