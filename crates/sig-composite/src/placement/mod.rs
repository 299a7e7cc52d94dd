//! Interactive placement of the signature overlay.
//!
//! Pages are stacked vertically in a single scrolling view, separated by a
//! fixed gap. Pointer coordinates arrive in that view space; the
//! [`PlacementController`] converts them into the raster pixel space of the
//! page the signature sits on and keeps exactly one [`Placement`] up to date.
//!
//! ```text
//!            pointer_down(Body)        pointer_move*       pointer_up
//!   Idle ─────────────────────────▶ Dragging ──────▶ Dragging ──────▶ Idle
//!     │   pointer_down(ResizeHandle)
//!     ├───────────────────────────▶ Resizing ── … ──▶ Idle
//!     │   pointer_down(RotateHandle)
//!     └───────────────────────────▶ Rotating ── … ──▶ Idle
//! ```
//!
//! A pointer-down while any session is active is ignored, and so is a page
//! click.

mod controller;
mod error;
mod gesture;
mod layout;
mod model;

pub use controller::{GestureState, PlacementController};
pub use error::PlacementError;
pub use gesture::{GestureSession, HitTarget, HANDLE_RADIUS, ROTATE_HANDLE_OFFSET};
pub use layout::{PageLayout, PageSize, Point};
pub use model::{normalize_rotation, Placement, MIN_STAMP_WIDTH};
