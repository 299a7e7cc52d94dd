//! Pointer gesture sessions.

use super::layout::Point;

/// Radius of the circular grab area around each handle, in pixels.
pub const HANDLE_RADIUS: f64 = 10.0;

/// Distance of the rotate handle above the overlay's top edge.
pub const ROTATE_HANDLE_OFFSET: f64 = 24.0;

/// Which part of the overlay a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Body,
    ResizeHandle,
    RotateHandle,
}

/// State of one pointer-down to pointer-up cycle.
///
/// Holds only what the incremental update needs; nothing here survives the
/// pointer-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureSession {
    Drag {
        /// Pointer position minus overlay top-left, in page pixels.
        grab: Point,
    },
    Resize {
        start_width: f64,
        start_pointer_x: f64,
    },
    Rotate {
        /// Overlay centre in view space, fixed for the whole gesture.
        center: Point,
        start_rotation: f64,
        /// Pointer angle around `center` at pointer-down, degrees.
        start_angle: f64,
    },
}

/// Angle of `point` around `center`, degrees, clockwise on a y-down screen.
pub(crate) fn pointer_angle(center: Point, point: Point) -> f64 {
    (point.y - center.y).atan2(point.x - center.x).to_degrees()
}

/// Hit-test a point given in the overlay's unrotated page-local frame.
///
/// Handles take precedence over the body so a handle overlapping the
/// stamp's corner is still grabbable.
pub(crate) fn hit_unrotated(local: Point, x: f64, y: f64, width: f64, height: f64) -> Option<HitTarget> {
    let near = |hx: f64, hy: f64| (local.x - hx).hypot(local.y - hy) <= HANDLE_RADIUS;

    if near(x + width, y + height) {
        return Some(HitTarget::ResizeHandle);
    }
    if near(x + width / 2.0, y - ROTATE_HANDLE_OFFSET) {
        return Some(HitTarget::RotateHandle);
    }
    let inside = local.x >= x && local.x <= x + width && local.y >= y && local.y <= y + height;
    inside.then_some(HitTarget::Body)
}
