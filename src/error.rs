use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use luma_quant::QuantizeError;
use serde_json::json;
use thiserror::Error;

use crate::models::ImageId;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid bit depth: {0}")]
    InvalidBitDepth(String),

    #[error("Image not found: {0}")]
    ImageNotFound(ImageId),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Unprocessable image: {0}")]
    Unprocessable(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(id) => ApiError::ImageNotFound(id),
            ServiceError::UploadTooLarge { .. } => ApiError::PayloadTooLarge(e.to_string()),
            ServiceError::Codec(codec) => match codec {
                CodecError::NotPng => ApiError::UnsupportedMediaType(codec.to_string()),
                CodecError::TooLarge { .. } => ApiError::PayloadTooLarge(codec.to_string()),
                CodecError::Decode(_) | CodecError::Pixels(_) => {
                    ApiError::Unprocessable(codec.to_string())
                }
                CodecError::Encode(_) => ApiError::Internal(codec.to_string()),
            },
            ServiceError::Quantize(err) => match err {
                QuantizeError::EmptyImage { .. } | QuantizeError::BufferLength { .. } => {
                    ApiError::Unprocessable(err.to_string())
                }
                _ => ApiError::InvalidBitDepth(err.to_string()),
            },
            ServiceError::Task(_) => ApiError::Internal(e.to_string()),
        }
    }
}

/// Body extraction failures, including the router's body limit.
impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(rejection.body_text())
        } else {
            ApiError::Unprocessable(rejection.body_text())
        }
    }
}

/// Errors from PNG decoding and encoding.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Not a PNG file")]
    NotPng,

    #[error("PNG decode error: {0}")]
    Decode(String),

    #[error("Image too large: {width}x{height} (max {max} per side)")]
    TooLarge { width: u32, height: u32, max: u32 },

    #[error("PNG encode error: {0}")]
    Encode(String),

    #[error("Invalid pixel data: {0}")]
    Pixels(#[from] QuantizeError),
}

/// Errors from the image store and quantize service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Image not found: {0}")]
    NotFound(ImageId),

    #[error("Upload too large: {size} bytes (max {max})")]
    UploadTooLarge { size: usize, max: usize },

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Quantize(#[from] QuantizeError),

    #[error("Quantize task failed: {0}")]
    Task(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidBitDepth(_) => StatusCode::BAD_REQUEST,
            ApiError::ImageNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
