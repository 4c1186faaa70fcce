use luma_quant::{BitDepth, Histogram};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::ImageId;

/// A quantized export ready to be served
#[derive(Debug)]
pub struct Rendition {
    /// Encoded quantized PNG
    pub png_bytes: Vec<u8>,
    /// Histogram of the quantized pixels
    pub histogram: Histogram,
    pub bit_depth: BitDepth,
    pub width: u32,
    pub height: u32,
    /// When this rendition was computed
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Cache of renditions, keyed by image and bit depth
pub struct RenditionCache {
    cache: Arc<RwLock<HashMap<(ImageId, BitDepth), Arc<Rendition>>>>,
}

impl RenditionCache {
    pub fn new() -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Store a rendition
    pub async fn store(&self, id: &ImageId, rendition: Arc<Rendition>) {
        let mut cache = self.cache.write().await;
        cache.insert((id.clone(), rendition.bit_depth), rendition);
    }

    /// Retrieve a cached rendition
    pub async fn get(&self, id: &ImageId, depth: BitDepth) -> Option<Arc<Rendition>> {
        let cache = self.cache.read().await;
        cache.get(&(id.clone(), depth)).cloned()
    }

    /// Drop every rendition of one image
    pub async fn invalidate(&self, id: &ImageId) {
        let mut cache = self.cache.write().await;
        cache.retain(|(cached_id, _), _| cached_id != id);
    }

    pub async fn count(&self) -> usize {
        self.cache.read().await.len()
    }
}

impl Default for RenditionCache {
    fn default() -> Self {
        Self::new()
    }
}
