use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::codec::export_file_name;
use crate::error::ApiError;
use crate::models::ImageId;
use crate::services::QuantizeService;

/// Header carrying the bit depth of a quantized PNG
pub const BIT_DEPTH_HEADER: &str = "x-bit-depth";

/// Query parameters for upload
#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    /// Original file name, used for export names
    #[serde(default)]
    pub name: Option<String>,
}

/// Query parameters selecting a bit depth
#[derive(Debug, Deserialize)]
pub struct DepthQuery {
    /// Bit depth 1-8; parsed by the handler so bad values get a JSON error
    #[serde(default)]
    pub bits: Option<String>,
}

/// Response from a successful upload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    /// Content-derived image id
    pub id: String,
    /// Sanitised file stem
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Per-channel bit depth declared by the PNG header
    pub source_bit_depth: u8,
    /// When the original was first stored (RFC 3339)
    #[schema(value_type = String, format = DateTime)]
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

/// Upload a PNG image
///
/// The body is the raw PNG file. Identical uploads share one id.
#[utoipa::path(
    post,
    path = "/api/images",
    request_body(content = Vec<u8>, content_type = "image/png"),
    responses(
        (status = 201, description = "Image stored", body = UploadResponse),
        (status = 413, description = "Upload or dimensions too large"),
        (status = 415, description = "Body is not a PNG"),
        (status = 422, description = "PNG could not be decoded"),
    ),
    params(
        ("name" = Option<String>, Query, description = "Original file name"),
    ),
    tag = "Images"
)]
pub async fn handle_upload(
    State(service): State<Arc<QuantizeService>>,
    Query(query): Query<UploadQuery>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    // Over-limit bodies surface here rather than as axum's plain-text 413
    let body = body?;
    tracing::info!(
        size_bytes = body.len(),
        name = ?query.name,
        "Upload received"
    );

    let image = service.upload(query.name.as_deref(), body.to_vec()).await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            id: image.id.to_string(),
            name: image.name.clone(),
            width: image.buffer.width(),
            height: image.buffer.height(),
            source_bit_depth: image.source_bit_depth,
            uploaded_at: image.uploaded_at,
        }),
    )
        .into_response())
}

/// Get the original PNG
#[utoipa::path(
    get,
    path = "/api/images/{id}",
    responses(
        (status = 200, description = "Original PNG as uploaded", content_type = "image/png"),
        (status = 404, description = "Unknown image id"),
    ),
    params(
        ("id" = String, Path, description = "Image id from upload"),
    ),
    tag = "Images"
)]
pub async fn handle_original(
    State(service): State<Arc<QuantizeService>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let image = service.original(&ImageId::new(id)).await?;
    Ok(png_response(image.png_bytes.clone()))
}

/// Get the quantized PNG
///
/// Served as an attachment named `<name>-<N>bit.png`.
#[utoipa::path(
    get,
    path = "/api/images/{id}/quantized",
    responses(
        (status = 200, description = "Quantized PNG", content_type = "image/png"),
        (status = 400, description = "Invalid bit depth"),
        (status = 404, description = "Unknown image id"),
    ),
    params(
        ("id" = String, Path, description = "Image id from upload"),
        ("bits" = Option<u8>, Query, description = "Bit depth 1-8 (default from config)"),
    ),
    tag = "Images"
)]
pub async fn handle_quantized(
    State(service): State<Arc<QuantizeService>>,
    Path(id): Path<String>,
    Query(query): Query<DepthQuery>,
) -> Result<Response, ApiError> {
    let id = ImageId::new(id);
    let depth = service.resolve_depth(query.bits.as_deref())?;
    let image = service.original(&id).await?;
    let rendition = service.render(&id, depth).await?;

    let mut response = png_response(rendition.png_bytes.clone());
    let headers = response.headers_mut();
    headers.insert(BIT_DEPTH_HEADER, HeaderValue::from(u16::from(depth.bits())));
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export_file_name(&image.name, depth)
    );
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }
    Ok(response)
}

/// Binary PNG response
fn png_response(png_bytes: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "image/png")],
        Bytes::from(png_bytes),
    )
        .into_response()
}
