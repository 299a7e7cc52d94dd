use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::error::{ApiError, SessionError};
use crate::server::SharedSession;
use crate::services::{DocumentWriter, ExportGate};

/// Export the signed document
///
/// Stamps the signature onto the page it sits on and returns the new PDF.
/// A successful export consumes the signature and its placement. Only one
/// export runs at a time.
#[utoipa::path(
    post,
    path = "/api/export",
    responses(
        (status = 200, description = "Signed PDF", body = Vec<u8>, content_type = "application/pdf"),
        (status = 409, description = "Nothing to export, the page is missing, or an export is running"),
        (status = 422, description = "The stamp cannot be embedded"),
    ),
    tag = "Export"
)]
pub async fn handle_export(
    State(session): State<SharedSession>,
    State(writer): State<Arc<dyn DocumentWriter>>,
    State(gate): State<Arc<ExportGate>>,
) -> Result<Response, ApiError> {
    let _guard = gate.try_begin().ok_or(SessionError::ExportInProgress)?;

    let job = session.lock().await.prepare_export()?;
    let signed = writer.write(&job.source, &job.instruction).await?;
    let consumed = session.lock().await.finish_export(&job);

    tracing::info!(
        page = job.instruction.page_index,
        bytes = signed.len(),
        filename = %job.filename,
        consumed,
        "Exported signed document"
    );

    let disposition = format!("attachment; filename=\"{}\"", job.filename.replace('"', ""));
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        signed,
    )
        .into_response())
}
