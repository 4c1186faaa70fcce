//! PNG decoding and export for the host.

pub mod png;

pub use self::png::{
    decode_png, depth_comment, encode_png, export_file_name, is_png, DecodeLimits, DecodedPng,
    ExportOptions,
};
