use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sig_composite::{DecodeError, ExportError, PlacementError, RecolorError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Upload rejected: {0}")]
    Intake(#[from] IntakeError),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("{0}")]
    Session(#[from] SessionError),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),
}

/// Rejections of uploaded files. Raised before any state is touched.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("{0} upload is empty")]
    Empty(&'static str),

    #[error("{kind} upload has unsupported type {mime}")]
    UnsupportedMime { kind: &'static str, mime: String },

    #[error("signature image cannot be decoded: {0}")]
    Decode(String),
}

/// Failures of the document render and write collaborators.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("document has no pages")]
    NoPages,

    #[error("page {index} does not exist (document has {count} pages)")]
    MissingPage { index: usize, count: usize },

    #[error("unsupported signature image format: {0}")]
    UnsupportedImageFormat(String),

    #[error("invalid draw instruction: {0}")]
    InvalidInstruction(String),

    #[error("failed to write document: {0}")]
    Write(String),

    #[error("document task failed: {0}")]
    Task(String),
}

/// Signing session state errors.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no document loaded")]
    NoDocument,

    #[error("no signature loaded")]
    NoSignature,

    #[error("signature has not been placed")]
    NoPlacement,

    #[error("an export is already in progress")]
    ExportInProgress,

    #[error("recolor failed: {0}")]
    Recolor(#[from] RecolorError),

    #[error("placement failed: {0}")]
    Placement(#[from] PlacementError),

    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to allocate pixmap")]
    PixmapAllocation,

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Invalid raster: {0}")]
    Raster(#[from] DecodeError),

    #[error("Render task failed: {0}")]
    Task(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Intake(IntakeError::UnsupportedMime { .. }) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            ApiError::Intake(IntakeError::Empty(_)) => StatusCode::BAD_REQUEST,
            ApiError::Intake(IntakeError::Decode(_)) => StatusCode::UNPROCESSABLE_ENTITY,

            ApiError::Document(DocumentError::InvalidDocument(_))
            | ApiError::Document(DocumentError::NoPages)
            | ApiError::Document(DocumentError::UnsupportedImageFormat(_))
            | ApiError::Document(DocumentError::InvalidInstruction(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Document(DocumentError::MissingPage { .. }) => StatusCode::CONFLICT,
            ApiError::Document(_) => StatusCode::INTERNAL_SERVER_ERROR,

            ApiError::Session(SessionError::Recolor(RecolorError::InvalidColor { .. })) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Session(SessionError::Placement(PlacementError::PageOutOfRange {
                ..
            })) => StatusCode::NOT_FOUND,
            ApiError::Session(SessionError::Recolor(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Session(_) => StatusCode::CONFLICT,

            ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
