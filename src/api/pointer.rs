//! Pointer events driving the placement gestures.
//!
//! Coordinates are view-space pixels: pages stacked top to bottom with the
//! configured gap between them, matching `top` in the page list.

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::error::ApiError;
use crate::models::{ControllerView, PointerRequest, PointerResponse};
use crate::server::SharedSession;

/// Press the pointer
///
/// Starts a drag, resize or rotate gesture depending on what is under the
/// pointer (or on `target`). Ignored while another gesture is active.
#[utoipa::path(
    post,
    path = "/api/pointer/down",
    request_body = PointerRequest,
    responses(
        (status = 200, description = "Controller state", body = PointerResponse),
    ),
    tag = "Placement"
)]
pub async fn handle_pointer_down(
    State(session): State<SharedSession>,
    Json(request): Json<PointerRequest>,
) -> Json<PointerResponse> {
    let mut session = session.lock().await;
    let consumed = session.pointer_down(request.x, request.y, request.target.map(Into::into));
    respond(consumed, session.controller_view())
}

/// Move the pointer
#[utoipa::path(
    post,
    path = "/api/pointer/move",
    request_body = PointerRequest,
    responses(
        (status = 200, description = "Controller state", body = PointerResponse),
    ),
    tag = "Placement"
)]
pub async fn handle_pointer_move(
    State(session): State<SharedSession>,
    Json(request): Json<PointerRequest>,
) -> Json<PointerResponse> {
    let mut session = session.lock().await;
    let consumed = session.pointer_move(request.x, request.y);
    respond(consumed, session.controller_view())
}

/// Release the pointer, ending the active gesture
#[utoipa::path(
    post,
    path = "/api/pointer/up",
    responses(
        (status = 200, description = "Controller state", body = PointerResponse),
    ),
    tag = "Placement"
)]
pub async fn handle_pointer_up(State(session): State<SharedSession>) -> Json<PointerResponse> {
    let mut session = session.lock().await;
    let consumed = session.pointer_up();
    respond(consumed, session.controller_view())
}

/// Click a page to view it
///
/// Suppressed while a gesture is in progress. Does not move the signature.
#[utoipa::path(
    post,
    path = "/api/pages/{index}/click",
    responses(
        (status = 200, description = "Controller state", body = PointerResponse),
        (status = 404, description = "Page does not exist"),
        (status = 409, description = "No document loaded"),
    ),
    params(
        ("index" = usize, Path, description = "0-based page index"),
    ),
    tag = "Placement"
)]
pub async fn handle_page_click(
    State(session): State<SharedSession>,
    Path(index): Path<usize>,
) -> Result<Json<PointerResponse>, ApiError> {
    let mut session = session.lock().await;
    let consumed = session.click_page(index)?;
    Ok(respond(consumed, session.controller_view()))
}

/// Current placement and gesture state
#[utoipa::path(
    get,
    path = "/api/placement",
    responses(
        (status = 200, description = "Controller state", body = ControllerView),
    ),
    tag = "Placement"
)]
pub async fn handle_placement(State(session): State<SharedSession>) -> Json<ControllerView> {
    let session = session.lock().await;
    Json(session.controller_view())
}

fn respond(consumed: bool, controller: ControllerView) -> Json<PointerResponse> {
    tracing::trace!(consumed, state = ?controller.state, "Pointer event");
    Json(PointerResponse {
        consumed,
        controller,
    })
}
