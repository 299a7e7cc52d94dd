//! The placement state machine.

use super::error::PlacementError;
use super::gesture::{hit_unrotated, pointer_angle, GestureSession, HitTarget};
use super::layout::{PageLayout, Point};
use super::model::{normalize_rotation, Placement, MIN_STAMP_WIDTH};

/// Externally visible gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    Dragging,
    Resizing,
    Rotating,
}

/// Owns the single [`Placement`] and the at-most-one active gesture.
///
/// Gesture callbacks call methods on the controller directly; there are no
/// snapshots of its state held elsewhere, so an update never works from a
/// stale copy. Every pointer method returns whether the event was consumed.
#[derive(Debug, Clone, Default)]
pub struct PlacementController {
    layout: PageLayout,
    placement: Option<Placement>,
    /// Signature `height / width`, fixed while a signature is loaded.
    aspect: f64,
    session: Option<GestureSession>,
    viewed_page: usize,
}

impl PlacementController {
    pub fn new(layout: PageLayout) -> Self {
        Self {
            layout,
            aspect: 1.0,
            ..Default::default()
        }
    }

    /// Swap in a new page stack. Any placement and gesture are discarded.
    pub fn set_layout(&mut self, layout: PageLayout) {
        self.layout = layout;
        self.placement = None;
        self.session = None;
        self.viewed_page = 0;
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }

    pub fn aspect(&self) -> f64 {
        self.aspect
    }

    pub fn state(&self) -> GestureState {
        match self.session {
            None => GestureState::Idle,
            Some(GestureSession::Drag { .. }) => GestureState::Dragging,
            Some(GestureSession::Resize { .. }) => GestureState::Resizing,
            Some(GestureSession::Rotate { .. }) => GestureState::Rotating,
        }
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// Page the user is looking at.
    pub fn viewed_page(&self) -> usize {
        self.viewed_page
    }

    /// Page that export targets: wherever the signature currently sits,
    /// falling back to the viewed page when nothing is placed.
    pub fn active_page(&self) -> usize {
        self.placement
            .map(|p| p.page_index)
            .unwrap_or(self.viewed_page)
    }

    /// Height of the stamp for the current placement.
    pub fn stamp_height(&self) -> Option<f64> {
        self.placement.map(|p| p.size_height(self.aspect))
    }

    /// Drop a freshly loaded signature onto the viewed page, centred.
    ///
    /// `width` is clamped to `[MIN_STAMP_WIDTH, page width]`. Any gesture in
    /// progress is abandoned since it referred to the previous signature.
    pub fn place_signature(&mut self, aspect: f64, width: f64) -> Result<Placement, PlacementError> {
        let page_index = self.viewed_page.min(self.layout.len().saturating_sub(1));
        let page = self.layout.page(page_index).ok_or(PlacementError::NoPages)?;

        self.aspect = sanitize_aspect(aspect);
        self.session = None;

        let size_width = width.min(page.width).max(MIN_STAMP_WIDTH);
        let size_height = size_width * self.aspect;
        let placement = Placement {
            page_index,
            x: ((page.width - size_width) / 2.0).max(0.0),
            y: ((page.height - size_height) / 2.0).max(0.0),
            size_width,
            rotation: 0.0,
        };

        tracing::debug!(
            page = page_index,
            x = placement.x,
            y = placement.y,
            width = size_width,
            "Placed signature"
        );

        self.placement = Some(placement);
        Ok(placement)
    }

    /// Set the placement explicitly (scripted use, no gesture involved).
    ///
    /// The page index must exist; width is floored at [`MIN_STAMP_WIDTH`],
    /// rotation normalized and the position clamped onto the page.
    pub fn set_placement(&mut self, placement: Placement, aspect: f64) -> Result<Placement, PlacementError> {
        let page = self
            .layout
            .page(placement.page_index)
            .ok_or(PlacementError::PageOutOfRange {
                index: placement.page_index,
                count: self.layout.len(),
            })?;

        self.aspect = sanitize_aspect(aspect);
        self.session = None;

        let size_width = placement.size_width.max(MIN_STAMP_WIDTH);
        let size_height = size_width * self.aspect;
        let placement = Placement {
            page_index: placement.page_index,
            x: clamp_axis(placement.x, page.width - size_width),
            y: clamp_axis(placement.y, page.height - size_height),
            size_width,
            rotation: normalize_rotation(placement.rotation),
        };

        self.viewed_page = placement.page_index;
        self.placement = Some(placement);
        Ok(placement)
    }

    /// Discard the placement and any gesture in progress.
    pub fn clear(&mut self) {
        self.placement = None;
        self.session = None;
        self.aspect = 1.0;
    }

    /// Which part of the overlay, if any, lies under a view-space point.
    ///
    /// The point is un-rotated around the overlay centre first, so handles
    /// follow the stamp when it is turned.
    pub fn hit_test(&self, point: Point) -> Option<HitTarget> {
        let placement = self.placement?;
        let local = self.layout.to_page_local(point, placement.page_index)?;
        let (cx, cy) = placement.center(self.aspect);
        let unrotated = local.rotated_about(Point::new(cx, cy), -placement.rotation);
        hit_unrotated(
            unrotated,
            placement.x,
            placement.y,
            placement.size_width,
            placement.size_height(self.aspect),
        )
    }

    /// Start a gesture.
    ///
    /// `target` is what the caller's UI says was pressed; when `None`, the
    /// controller hit-tests the point itself. Ignored while another session
    /// is active, when nothing is placed, or when the pointer misses.
    pub fn pointer_down(&mut self, point: Point, target: Option<HitTarget>) -> bool {
        if self.session.is_some() {
            tracing::trace!("Pointer down ignored: gesture already active");
            return false;
        }
        let Some(placement) = self.placement else {
            return false;
        };
        let Some(target) = target.or_else(|| self.hit_test(point)) else {
            return false;
        };

        let session = match target {
            HitTarget::Body => {
                let Some(local) = self.layout.to_page_local(point, placement.page_index) else {
                    return false;
                };
                GestureSession::Drag {
                    grab: Point::new(local.x - placement.x, local.y - placement.y),
                }
            }
            HitTarget::ResizeHandle => GestureSession::Resize {
                start_width: placement.size_width,
                start_pointer_x: point.x,
            },
            HitTarget::RotateHandle => {
                let (cx, cy) = placement.center(self.aspect);
                let Some(center) = self.layout.to_view(Point::new(cx, cy), placement.page_index)
                else {
                    return false;
                };
                GestureSession::Rotate {
                    center,
                    start_rotation: placement.rotation,
                    start_angle: pointer_angle(center, point),
                }
            }
        };

        tracing::trace!(?target, "Gesture started");
        self.session = Some(session);
        true
    }

    /// Feed a pointer position to the active gesture.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        let (Some(session), Some(mut placement)) = (self.session, self.placement) else {
            return false;
        };

        match session {
            GestureSession::Drag { grab } => {
                let Some(page_index) = self.layout.page_at(point.y) else {
                    return false;
                };
                if page_index != placement.page_index {
                    tracing::debug!(
                        from = placement.page_index,
                        to = page_index,
                        "Signature moved to another page"
                    );
                    placement.page_index = page_index;
                }
                let (Some(page), Some(local)) = (
                    self.layout.page(page_index),
                    self.layout.to_page_local(point, page_index),
                ) else {
                    return false;
                };
                let height = placement.size_height(self.aspect);
                placement.x = clamp_axis(local.x - grab.x, page.width - placement.size_width);
                placement.y = clamp_axis(local.y - grab.y, page.height - height);
                self.viewed_page = page_index;
            }
            GestureSession::Resize {
                start_width,
                start_pointer_x,
            } => {
                let dx = point.x - start_pointer_x;
                placement.size_width = (start_width + dx).max(MIN_STAMP_WIDTH);
            }
            GestureSession::Rotate {
                center,
                start_rotation,
                start_angle,
            } => {
                let angle = pointer_angle(center, point);
                placement.rotation = normalize_rotation(start_rotation + angle - start_angle);
            }
        }

        self.placement = Some(placement);
        true
    }

    /// End the active gesture, wherever the pointer is.
    pub fn pointer_up(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                tracing::trace!(?session, "Gesture ended");
                true
            }
            None => false,
        }
    }

    /// Switch the viewed page. Suppressed while a gesture is in progress;
    /// never touches the placement.
    pub fn click_page(&mut self, index: usize) -> bool {
        if self.session.is_some() || index >= self.layout.len() {
            return false;
        }
        self.viewed_page = index;
        true
    }
}

/// Clamp a coordinate into `[0, max]`, pinning to 0 when the stamp is larger
/// than the page along that axis.
fn clamp_axis(value: f64, max: f64) -> f64 {
    value.min(max).max(0.0)
}

fn sanitize_aspect(aspect: f64) -> f64 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}
