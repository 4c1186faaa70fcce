use luma_quant::PixelBuffer;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Content-derived image identifier (16 hex chars of the upload's SHA-256)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageId(String);

impl ImageId {
    const LEN: usize = 16;

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive the id of an upload from its raw bytes.
    ///
    /// Identical bytes always give the same id.
    pub fn for_content(bytes: &[u8]) -> Self {
        let digest = Sha256::digest(bytes);
        let mut id = hex::encode(digest);
        id.truncate(Self::LEN);
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An uploaded original, decoded once and never modified
#[derive(Debug)]
pub struct StoredImage {
    pub id: ImageId,
    /// File stem used for export names
    pub name: String,
    /// The PNG exactly as uploaded
    pub png_bytes: Vec<u8>,
    /// Decoded RGBA8 pixels
    pub buffer: PixelBuffer,
    /// Bit depth declared in the PNG header (informational only)
    pub source_bit_depth: u8,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

/// Reduce an upload name to a safe file stem.
///
/// Drops any directory part and a trailing `.png`, and replaces characters
/// outside `[A-Za-z0-9._-]` with `_`. Empty results become `"image"`.
pub fn sanitize_stem(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let stem = match base.len().checked_sub(4) {
        Some(cut) if base.is_char_boundary(cut) && base[cut..].eq_ignore_ascii_case(".png") => {
            &base[..cut]
        }
        _ => base,
    };
    let cleaned: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_matches('.').to_string();
    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned
    }
}
