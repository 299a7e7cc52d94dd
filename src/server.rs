//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    http::{header::CACHE_CONTROL, HeaderValue},
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::api;
use crate::assets::ConfigSource;
use crate::models::AppConfig;
use crate::services::{
    DocumentWriter, ExportGate, PageRenderer, PdfPageRenderer, PdfStampWriter, SigningSession,
};

/// Largest accepted upload body.
pub const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// The one signing session, behind an async lock.
pub type SharedSession = Arc<Mutex<SigningSession>>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub session: SharedSession,
    pub renderer: Arc<dyn PageRenderer>,
    pub writer: Arc<dyn DocumentWriter>,
    pub export_gate: Arc<ExportGate>,
}

impl AppState {
    /// State with the lopdf-backed collaborators.
    pub fn new(config: AppConfig) -> Self {
        let renderer = Arc::new(PdfPageRenderer::new(config.viewer.render_dpi));
        Self::with_collaborators(config, renderer, Arc::new(PdfStampWriter::new()))
    }

    pub fn with_collaborators(
        config: AppConfig,
        renderer: Arc<dyn PageRenderer>,
        writer: Arc<dyn DocumentWriter>,
    ) -> Self {
        let config = Arc::new(config);
        Self {
            session: Arc::new(Mutex::new(SigningSession::new(config.clone()))),
            config,
            renderer,
            writer,
            export_gate: Arc::new(ExportGate::new()),
        }
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for SharedSession {
    fn from_ref(state: &AppState) -> Self {
        state.session.clone()
    }
}

impl FromRef<AppState> for Arc<dyn PageRenderer> {
    fn from_ref(state: &AppState) -> Self {
        state.renderer.clone()
    }
}

impl FromRef<AppState> for Arc<dyn DocumentWriter> {
    fn from_ref(state: &AppState) -> Self {
        state.writer.clone()
    }
}

impl FromRef<AppState> for Arc<ExportGate> {
    fn from_ref(state: &AppState) -> Self {
        state.export_gate.clone()
    }
}

/// Create application state from a config source.
pub fn create_app_state(source: &ConfigSource) -> AppState {
    let config = AppConfig::load(source);
    tracing::info!(
        origin = %source.origin(),
        render_dpi = config.viewer.render_dpi,
        "Configuration loaded"
    );
    AppState::new(config)
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests. Responses
/// carry `Cache-Control: no-store` since every answer reflects live
/// session state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Document
        .route("/api/document", post(api::handle_upload_document))
        .route("/api/pages", get(api::handle_pages))
        .route("/api/pages/:index/preview", get(api::handle_preview))
        .route("/api/pages/:index/click", post(api::handle_page_click))
        // Signature
        .route(
            "/api/signature",
            post(api::handle_upload_signature)
                .get(api::handle_signature)
                .delete(api::handle_clear_signature),
        )
        .route("/api/signature/color", put(api::handle_set_color))
        .route("/api/colors", get(api::handle_colors))
        // Gestures
        .route("/api/pointer/down", post(api::handle_pointer_down))
        .route("/api/pointer/move", post(api::handle_pointer_move))
        .route("/api/pointer/up", post(api::handle_pointer_up))
        .route("/api/placement", get(api::handle_placement))
        // Export
        .route("/api/export", post(api::handle_export))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}
