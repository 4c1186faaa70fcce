use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use base64::Engine;
use luma_quant::Histogram;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use super::images::DepthQuery;
use crate::error::ApiError;
use crate::models::ImageId;
use crate::services::{QuantizeService, Rendition};

/// Luminosity histogram of a quantized image
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HistogramResponse {
    pub id: String,
    /// Bits kept by the quantizer
    pub bit_depth: u8,
    /// Number of luminosity levels, 2^bit_depth
    pub levels: u32,
    /// Bucket width in luminosity units
    pub step: f64,
    pub width: u32,
    pub height: u32,
    /// Sum of all counts (= width * height)
    pub total: u64,
    /// Largest bucket count, for scaling bars
    pub max: u64,
    /// Number of non-empty buckets
    pub occupied: usize,
    /// 256 pixel counts indexed by luminosity level
    pub counts: Vec<u64>,
    /// When the rendition was computed; unchanged across cache hits
    #[schema(value_type = String, format = DateTime)]
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

impl HistogramResponse {
    pub fn new(id: &ImageId, rendition: &Rendition) -> Self {
        let histogram: &Histogram = &rendition.histogram;
        let depth = rendition.bit_depth;
        Self {
            id: id.to_string(),
            bit_depth: depth.bits(),
            levels: depth.levels(),
            step: depth.step(),
            width: rendition.width,
            height: rendition.height,
            total: histogram.total(),
            max: histogram.max(),
            occupied: histogram.occupied_levels(),
            counts: histogram.counts().to_vec(),
            generated_at: rendition.generated_at,
        }
    }
}

/// Histogram plus an inline preview of the quantized image
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RenderResponse {
    pub histogram: HistogramResponse,
    /// `data:image/png;base64,...` URL of the quantized PNG
    pub image: String,
    /// Size of the encoded PNG
    pub size_bytes: usize,
}

/// Get the luminosity histogram at a bit depth
#[utoipa::path(
    get,
    path = "/api/images/{id}/histogram",
    responses(
        (status = 200, description = "Histogram of the quantized image", body = HistogramResponse),
        (status = 400, description = "Invalid bit depth"),
        (status = 404, description = "Unknown image id"),
    ),
    params(
        ("id" = String, Path, description = "Image id from upload"),
        ("bits" = Option<u8>, Query, description = "Bit depth 1-8 (default from config)"),
    ),
    tag = "Histogram"
)]
pub async fn handle_histogram(
    State(service): State<Arc<QuantizeService>>,
    Path(id): Path<String>,
    Query(query): Query<DepthQuery>,
) -> Result<Json<HistogramResponse>, ApiError> {
    let id = ImageId::new(id);
    let depth = service.resolve_depth(query.bits.as_deref())?;
    let rendition = service.render(&id, depth).await?;
    Ok(Json(HistogramResponse::new(&id, &rendition)))
}

/// Get histogram and quantized preview in one call
///
/// Intended for interactive bit-depth sliders: one round-trip per change.
#[utoipa::path(
    get,
    path = "/api/images/{id}/render",
    responses(
        (status = 200, description = "Histogram and preview", body = RenderResponse),
        (status = 400, description = "Invalid bit depth"),
        (status = 404, description = "Unknown image id"),
    ),
    params(
        ("id" = String, Path, description = "Image id from upload"),
        ("bits" = Option<u8>, Query, description = "Bit depth 1-8 (default from config)"),
    ),
    tag = "Histogram"
)]
pub async fn handle_render(
    State(service): State<Arc<QuantizeService>>,
    Path(id): Path<String>,
    Query(query): Query<DepthQuery>,
) -> Result<Json<RenderResponse>, ApiError> {
    let id = ImageId::new(id);
    let depth = service.resolve_depth(query.bits.as_deref())?;
    let rendition = service.render(&id, depth).await?;

    let encoded = base64::engine::general_purpose::STANDARD.encode(&rendition.png_bytes);
    Ok(Json(RenderResponse {
        histogram: HistogramResponse::new(&id, &rendition),
        image: format!("data:image/png;base64,{encoded}"),
        size_bytes: rendition.png_bytes.len(),
    }))
}
