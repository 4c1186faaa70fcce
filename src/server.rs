//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::models::AppConfig;
use crate::services::{ImageRepository, InMemoryImageStore, QuantizeService, RenditionCache};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<InMemoryImageStore>,
    pub cache: Arc<RenditionCache>,
    pub service: Arc<QuantizeService>,
}

impl FromRef<AppState> for Arc<QuantizeService> {
    fn from_ref(state: &AppState) -> Self {
        state.service.clone()
    }
}

/// Create application state from configuration.
pub fn create_app_state(config: AppConfig) -> AppState {
    let config = Arc::new(config);
    let store = Arc::new(InMemoryImageStore::new(config.store_capacity));
    let cache = Arc::new(RenditionCache::new());
    let repository: Arc<dyn ImageRepository> = store.clone();
    let service = Arc::new(QuantizeService::new(repository, cache.clone(), &config));

    AppState {
        config,
        store,
        cache,
        service,
    }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/api/images", post(api::handle_upload))
        .route("/api/images/:id", get(api::handle_original))
        .route("/api/images/:id/quantized", get(api::handle_quantized))
        .route("/api/images/:id/histogram", get(api::handle_histogram))
        .route("/api/images/:id/render", get(api::handle_render))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
