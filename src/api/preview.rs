use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::rendering::PreviewRenderer;
use crate::server::SharedSession;

/// Render one page with the signature where it currently sits
#[utoipa::path(
    get,
    path = "/api/pages/{index}/preview",
    responses(
        (status = 200, description = "PNG preview", body = Vec<u8>, content_type = "image/png"),
        (status = 404, description = "Page does not exist"),
        (status = 409, description = "No document loaded"),
    ),
    params(
        ("index" = usize, Path, description = "0-based page index"),
    ),
    tag = "Document"
)]
pub async fn handle_preview(
    State(session): State<SharedSession>,
    Path(index): Path<usize>,
) -> Result<Response, ApiError> {
    // Lock released before rasterizing.
    let job = session.lock().await.preview_job(index)?;
    let stamped = job.stamp.is_some();
    let png = PreviewRenderer::new().render_job(job).await?;

    tracing::debug!(page = index, stamped, bytes = png.len(), "Rendered preview");
    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}
