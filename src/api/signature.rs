use axum::{
    body::Bytes,
    extract::{Query, State},
    http::HeaderMap,
    response::Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use super::headers::HeaderMapExt;
use crate::error::ApiError;
use crate::models::{AppConfig, ColorEntry, ColorRequest, ControllerView, SignatureResponse};
use crate::server::SharedSession;
use crate::services::SignatureIntake;

/// Query parameters for signature upload
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SignatureQuery {
    /// Remove the paper background (default: true)
    #[serde(default)]
    pub mask: Option<bool>,
}

/// Upload a signature image
///
/// The background is removed unless `mask=false`. If removal fails the
/// original image is used as is. The signature starts out in the default
/// color, centred on the viewed page.
#[utoipa::path(
    post,
    path = "/api/signature",
    request_body(content = Vec<u8>, content_type = "image/*", description = "Signature image"),
    responses(
        (status = 200, description = "Signature loaded", body = SignatureResponse),
        (status = 400, description = "Empty upload"),
        (status = 415, description = "Not an image"),
        (status = 422, description = "Image could not be decoded"),
    ),
    params(SignatureQuery),
    tag = "Signature"
)]
pub async fn handle_upload_signature(
    State(session): State<SharedSession>,
    State(config): State<Arc<AppConfig>>,
    Query(query): Query<SignatureQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SignatureResponse>, ApiError> {
    let intake = SignatureIntake::new(config.pipeline()).remove_background(query.mask.unwrap_or(true));
    let signature = intake
        .accept_blocking(body.to_vec(), headers.content_type().map(str::to_string))
        .await?;

    let mut session = session.lock().await;
    session.load_signature(signature)?;
    Ok(Json(session.signature_view()?))
}

/// Get the loaded signature
#[utoipa::path(
    get,
    path = "/api/signature",
    responses(
        (status = 200, description = "Current signature", body = SignatureResponse),
        (status = 409, description = "No signature loaded"),
    ),
    tag = "Signature"
)]
pub async fn handle_signature(
    State(session): State<SharedSession>,
) -> Result<Json<SignatureResponse>, ApiError> {
    let session = session.lock().await;
    Ok(Json(session.signature_view()?))
}

/// Remove the signature and its placement
#[utoipa::path(
    delete,
    path = "/api/signature",
    responses(
        (status = 200, description = "Signature removed", body = ControllerView),
    ),
    tag = "Signature"
)]
pub async fn handle_clear_signature(State(session): State<SharedSession>) -> Json<ControllerView> {
    let mut session = session.lock().await;
    session.clear_signature();
    Json(session.controller_view())
}

/// Change the signature's ink color
///
/// Accepts a palette name, a built-in color name or a hex value. An invalid
/// color leaves the current one in place.
#[utoipa::path(
    put,
    path = "/api/signature/color",
    request_body = ColorRequest,
    responses(
        (status = 200, description = "Signature recolored", body = SignatureResponse),
        (status = 400, description = "Unknown color"),
        (status = 409, description = "No signature loaded"),
    ),
    tag = "Signature"
)]
pub async fn handle_set_color(
    State(session): State<SharedSession>,
    Json(request): Json<ColorRequest>,
) -> Result<Json<SignatureResponse>, ApiError> {
    let mut session = session.lock().await;
    session.set_color(&request.color)?;
    Ok(Json(session.signature_view()?))
}

/// List the configured ink colors
#[utoipa::path(
    get,
    path = "/api/colors",
    responses(
        (status = 200, description = "Palette", body = Vec<ColorEntry>),
    ),
    tag = "Signature"
)]
pub async fn handle_colors(State(config): State<Arc<AppConfig>>) -> Json<Vec<ColorEntry>> {
    Json(
        config
            .palette()
            .into_iter()
            .map(|(name, rgb)| ColorEntry {
                name,
                hex: rgb.to_string(),
            })
            .collect(),
    )
}
