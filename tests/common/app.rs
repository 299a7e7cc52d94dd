//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use std::sync::Arc;

use inkseal::models::AppConfig;
use inkseal::server::{build_router, AppState};
use inkseal::services::{DocumentWriter, PdfPageRenderer};

/// Test application with router and direct access to shared state
#[derive(Clone)]
pub struct TestApp {
    router: axum::Router,
    pub state: AppState,
}

impl TestApp {
    /// Application with the default configuration
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Application whose page rasters are one pixel per point, so view
    /// coordinates and PDF points coincide
    pub fn at_72_dpi() -> Self {
        let mut config = AppConfig::default();
        config.viewer.render_dpi = 72.0;
        Self::with_config(config)
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self::from_state(AppState::new(config))
    }

    /// 72 dpi application whose exports go through `writer`
    pub fn with_writer(writer: Arc<dyn DocumentWriter>) -> Self {
        let mut config = AppConfig::default();
        config.viewer.render_dpi = 72.0;
        let renderer = Arc::new(PdfPageRenderer::new(config.viewer.render_dpi));
        Self::from_state(AppState::with_collaborators(config, renderer, writer))
    }

    fn from_state(state: AppState) -> Self {
        let router = build_router(state.clone());
        Self { router, state }
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a DELETE request to the given path
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request(Request::delete(path).body(Body::empty()).unwrap())
            .await
    }

    /// POST a raw body, with `Content-Type` when given
    pub async fn post_bytes(
        &self,
        path: &str,
        content_type: Option<&str>,
        body: Vec<u8>,
    ) -> TestResponse {
        let mut builder = Request::post(path);
        if let Some(content_type) = content_type {
            builder = builder.header("Content-Type", content_type);
        }
        self.request(builder.body(Body::from(body)).unwrap()).await
    }

    /// POST with an empty body
    pub async fn post(&self, path: &str) -> TestResponse {
        self.request(Request::post(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, path: &str, body: Value) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(request).await
    }

    /// Make a PUT request with JSON body
    pub async fn put_json(&self, path: &str, body: Value) -> TestResponse {
        let request = Request::put(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(request).await
    }

    /// Upload a PDF and return the page list
    pub async fn load_document(&self, pdf: Vec<u8>) -> Value {
        let response = self
            .post_bytes("/api/document", Some("application/pdf"), pdf)
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text());
        response.json()
    }

    /// Upload a PNG signature and return the signature JSON
    pub async fn load_signature(&self, png: Vec<u8>) -> Value {
        let response = self
            .post_bytes("/api/signature", Some("image/png"), png)
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text());
        response.json()
    }

    /// Press, move through `path`, and release
    pub async fn drag(&self, from: (f64, f64), path: &[(f64, f64)]) -> Value {
        self.post_json(
            "/api/pointer/down",
            serde_json::json!({ "x": from.0, "y": from.1 }),
        )
        .await;
        for (x, y) in path {
            self.post_json("/api/pointer/move", serde_json::json!({ "x": x, "y": y }))
                .await;
        }
        self.post("/api/pointer/up").await.json()
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Check if response is a PNG image
    pub fn is_png(&self) -> bool {
        self.body.len() >= 8 && &self.body[0..8] == b"\x89PNG\r\n\x1a\n"
    }

    /// Check if response is a PDF document
    pub fn is_pdf(&self) -> bool {
        self.body.starts_with(b"%PDF-")
    }
}
