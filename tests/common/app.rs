//! In-process Lumabits router for integration tests.

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, Response, StatusCode};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use lumabits::models::AppConfig;
use lumabits::server::{build_router, create_app_state};
use lumabits::services::{InMemoryImageStore, RenditionCache};

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Production router plus handles on the store and rendition cache
pub struct TestApp {
    router: axum::Router,
    pub store: Arc<InMemoryImageStore>,
    pub cache: Arc<RenditionCache>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let state = create_app_state(config);
        let (store, cache) = (state.store.clone(), state.cache.clone());
        Self {
            router: build_router(state),
            store,
            cache,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    /// POST raw PNG bytes
    pub async fn post_png(&self, uri: &str, png: Vec<u8>) -> TestResponse {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "image/png")
            .body(Body::from(png))
            .unwrap();
        self.send(request).await
    }

    /// Upload under `name`, asserting 201, and return the content id
    pub async fn upload(&self, name: &str, png: Vec<u8>) -> String {
        let response = self
            .post_png(&format!("/api/images?name={name}"), png)
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "upload of {name} failed: {}",
            response.text()
        );
        let json: serde_json::Value = response.json();
        json["id"]
            .as_str()
            .expect("upload response carries an id")
            .to_string()
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        TestResponse::collect(response).await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Fully buffered response
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    async fn collect(response: Response<Body>) -> Self {
        let (parts, body) = response.into_parts();
        let bytes = body
            .collect()
            .await
            .expect("body collects")
            .to_bytes();
        Self {
            status: parts.status,
            headers: parts.headers,
            body: bytes.to_vec(),
        }
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body)
            .unwrap_or_else(|e| panic!("body is not JSON ({e}): {}", self.text()))
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn is_png(&self) -> bool {
        self.body.starts_with(PNG_SIGNATURE)
    }
}
