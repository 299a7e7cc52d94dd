use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::Json,
};
use std::sync::Arc;

use super::headers::HeaderMapExt;
use crate::error::ApiError;
use crate::models::PagesResponse;
use crate::server::SharedSession;
use crate::services::{intake, FileKind, PageRenderer};

/// Upload the document to sign
///
/// The body is the raw PDF. Every page is rendered before the session is
/// touched; a document that fails to render leaves the previous one in place.
#[utoipa::path(
    post,
    path = "/api/document",
    request_body(content = Vec<u8>, content_type = "application/pdf", description = "PDF file"),
    responses(
        (status = 200, description = "Document loaded", body = PagesResponse),
        (status = 400, description = "Empty upload"),
        (status = 415, description = "Not a PDF"),
        (status = 422, description = "PDF could not be parsed or has no pages"),
    ),
    tag = "Document"
)]
pub async fn handle_upload_document(
    State(session): State<SharedSession>,
    State(renderer): State<Arc<dyn PageRenderer>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<PagesResponse>, ApiError> {
    let mime = intake::check_mime(FileKind::Document, headers.content_type(), &body)?;
    let pages = renderer.render(&body).await?;

    tracing::info!(%mime, bytes = body.len(), pages = pages.len(), "Document received");

    let mut session = session.lock().await;
    session.load_document(body.to_vec(), pages)?;
    Ok(Json(session.pages_view()?))
}

/// List the pages of the loaded document
#[utoipa::path(
    get,
    path = "/api/pages",
    responses(
        (status = 200, description = "Page sizes and viewer state", body = PagesResponse),
        (status = 409, description = "No document loaded"),
    ),
    tag = "Document"
)]
pub async fn handle_pages(
    State(session): State<SharedSession>,
) -> Result<Json<PagesResponse>, ApiError> {
    let session = session.lock().await;
    Ok(Json(session.pages_view()?))
}
