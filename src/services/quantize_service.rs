use luma_quant::{BitDepth, Quantizer};
use std::sync::Arc;

use crate::codec::{decode_png, encode_png, DecodeLimits, ExportOptions};
use crate::error::ServiceError;
use crate::models::{sanitize_stem, AppConfig, ImageId, StoredImage};
use crate::services::{ImageRepository, Rendition, RenditionCache};

/// Upload and quantize pipeline shared by the HTTP handlers
///
/// Originals are decoded once on upload. Each `(image, depth)` rendition is
/// computed on the blocking pool the first time it is requested and served
/// from the [`RenditionCache`] afterwards.
pub struct QuantizeService {
    store: Arc<dyn ImageRepository>,
    cache: Arc<RenditionCache>,
    limits: DecodeLimits,
    max_upload_bytes: usize,
    default_depth: BitDepth,
    optimize_png: bool,
}

impl QuantizeService {
    pub fn new(
        store: Arc<dyn ImageRepository>,
        cache: Arc<RenditionCache>,
        config: &AppConfig,
    ) -> Self {
        Self {
            store,
            cache,
            limits: DecodeLimits {
                max_dimension: config.max_dimension,
            },
            max_upload_bytes: config.max_upload_bytes,
            default_depth: config.default_depth(),
            optimize_png: config.optimize_png,
        }
    }

    /// Depth used when a request does not specify one
    pub fn default_depth(&self) -> BitDepth {
        self.default_depth
    }

    /// Parse an optional `bits` request value, falling back to the default.
    pub fn resolve_depth(&self, bits: Option<&str>) -> Result<BitDepth, ServiceError> {
        match bits {
            Some(bits) => Ok(bits.parse::<BitDepth>()?),
            None => Ok(self.default_depth),
        }
    }

    /// Decode and store an uploaded PNG.
    ///
    /// Re-uploading identical bytes returns the stored original untouched.
    pub async fn upload(
        &self,
        name: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<Arc<StoredImage>, ServiceError> {
        if bytes.len() > self.max_upload_bytes {
            return Err(ServiceError::UploadTooLarge {
                size: bytes.len(),
                max: self.max_upload_bytes,
            });
        }

        let id = ImageId::for_content(&bytes);
        if let Some(existing) = self.store.find_by_id(&id).await? {
            tracing::debug!(id = %id, "Upload matches stored image");
            return Ok(existing);
        }

        let name = sanitize_stem(name.unwrap_or("image"));
        let limits = self.limits;
        let image = tokio::task::spawn_blocking(move || {
            let decoded = decode_png(&bytes, limits)?;
            Ok::<_, ServiceError>(StoredImage {
                id,
                name,
                png_bytes: bytes,
                buffer: decoded.buffer,
                source_bit_depth: decoded.source_bit_depth,
                uploaded_at: chrono::Utc::now(),
            })
        })
        .await
        .map_err(|e| ServiceError::Task(e.to_string()))??;

        let outcome = self.store.insert(image).await?;
        for evicted in &outcome.evicted {
            self.cache.invalidate(evicted).await;
        }

        tracing::info!(
            id = %outcome.image.id,
            name = %outcome.image.name,
            width = outcome.image.buffer.width(),
            height = outcome.image.buffer.height(),
            source_bit_depth = outcome.image.source_bit_depth,
            evicted = outcome.evicted.len(),
            "Image stored"
        );

        Ok(outcome.image)
    }

    /// Look up a stored original.
    pub async fn original(&self, id: &ImageId) -> Result<Arc<StoredImage>, ServiceError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(id.clone()))
    }

    /// Quantized PNG and histogram for one image at one depth.
    pub async fn render(
        &self,
        id: &ImageId,
        depth: BitDepth,
    ) -> Result<Arc<Rendition>, ServiceError> {
        if let Some(cached) = self.cache.get(id, depth).await {
            tracing::debug!(id = %id, bit_depth = depth.bits(), "Rendition cache hit");
            return Ok(cached);
        }

        let original = self.original(id).await?;
        let options = ExportOptions {
            bit_depth: Some(depth),
            optimize: self.optimize_png,
        };

        let started = std::time::Instant::now();
        let rendition = tokio::task::spawn_blocking(move || {
            let result = Quantizer::new(depth).run(&original.buffer);
            let png_bytes = encode_png(result.buffer(), &options)?;
            let (buffer, histogram) = result.into_parts();
            Ok::<_, ServiceError>(Rendition {
                png_bytes,
                histogram,
                bit_depth: depth,
                width: buffer.width(),
                height: buffer.height(),
                generated_at: chrono::Utc::now(),
            })
        })
        .await
        .map_err(|e| ServiceError::Task(e.to_string()))??;

        tracing::info!(
            id = %id,
            bit_depth = depth.bits(),
            occupied = rendition.histogram.occupied_levels(),
            size_bytes = rendition.png_bytes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Rendition generated"
        );

        let rendition = Arc::new(rendition);
        self.cache.store(id, rendition.clone()).await;
        // The original may have been evicted while rendering
        if self.store.find_by_id(id).await?.is_none() {
            tracing::debug!(id = %id, "Original evicted during render");
            self.cache.invalidate(id).await;
        }
        Ok(rendition)
    }
}
