//! JSON shapes exchanged with the front-end.

use serde::{Deserialize, Serialize};
use sig_composite::{GestureState, HitTarget, PageLayout, PageSurface, Placement};
use utoipa::ToSchema;

/// One page of the loaded document
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PageInfo {
    /// 0-based page index
    pub index: usize,
    /// Raster width in pixels
    pub width_px: f64,
    /// Raster height in pixels
    pub height_px: f64,
    /// Page width in points
    pub width_pt: f64,
    /// Page height in points
    pub height_pt: f64,
    /// Offset of the page's top edge in the stacked view
    pub top: f64,
}

impl PageInfo {
    pub fn list(surfaces: &[PageSurface], layout: &PageLayout) -> Vec<Self> {
        surfaces
            .iter()
            .enumerate()
            .map(|(index, s)| PageInfo {
                index,
                width_px: s.width_px,
                height_px: s.height_px,
                width_pt: s.width_pt,
                height_pt: s.height_pt,
                top: layout.page_top(index).unwrap_or(0.0),
            })
            .collect()
    }
}

/// Page list with viewer state
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PagesResponse {
    pub pages: Vec<PageInfo>,
    /// Vertical gap between pages in pixels
    pub page_gap: f64,
    pub viewed_page: usize,
    /// Page the export will stamp
    pub active_page: usize,
}

/// The signature's position on its page, in raster pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlacementView {
    pub page_index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    /// Derived from the signature's aspect ratio
    pub height: f64,
    /// Clockwise degrees in `[0, 360)`
    pub rotation: f64,
}

impl PlacementView {
    pub fn new(placement: &Placement, aspect: f64) -> Self {
        Self {
            page_index: placement.page_index,
            x: placement.x,
            y: placement.y,
            width: placement.size_width,
            height: placement.size_height(aspect),
            rotation: placement.rotation,
        }
    }
}

/// Gesture state as reported over the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GestureView {
    Idle,
    Dragging,
    Resizing,
    Rotating,
}

impl From<GestureState> for GestureView {
    fn from(state: GestureState) -> Self {
        match state {
            GestureState::Idle => GestureView::Idle,
            GestureState::Dragging => GestureView::Dragging,
            GestureState::Resizing => GestureView::Resizing,
            GestureState::Rotating => GestureView::Rotating,
        }
    }
}

/// Placement controller snapshot
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ControllerView {
    pub state: GestureView,
    pub viewed_page: usize,
    pub active_page: usize,
    pub placement: Option<PlacementView>,
}

/// Result of a pointer or page-click event
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PointerResponse {
    /// Whether the event changed anything
    pub consumed: bool,
    #[serde(flatten)]
    pub controller: ControllerView,
}

/// Which part of the overlay the pointer went down on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Body,
    Resize,
    Rotate,
}

impl From<TargetKind> for HitTarget {
    fn from(kind: TargetKind) -> Self {
        match kind {
            TargetKind::Body => HitTarget::Body,
            TargetKind::Resize => HitTarget::ResizeHandle,
            TargetKind::Rotate => HitTarget::RotateHandle,
        }
    }
}

/// Pointer position in view space (pages stacked top to bottom)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct PointerRequest {
    pub x: f64,
    pub y: f64,
    /// Part pressed, when the client already knows; hit-tested otherwise
    #[serde(default)]
    pub target: Option<TargetKind>,
}

/// The loaded signature
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignatureResponse {
    /// Pixel width of the signature image
    pub width: u32,
    pub height: u32,
    /// False when background removal failed and the original is used
    pub masked: bool,
    /// Current ink color as `#RRGGBB`
    pub color: String,
    pub placement: Option<PlacementView>,
}

/// Color change request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ColorRequest {
    /// Palette name, built-in color name or hex value
    pub color: String,
}

/// One entry of the configured palette
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ColorEntry {
    pub name: String,
    /// `#RRGGBB`
    pub hex: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_request_target_optional() {
        let req: PointerRequest = serde_json::from_str(r#"{"x": 1.5, "y": 2}"#).unwrap();
        assert!(req.target.is_none());
        let req: PointerRequest =
            serde_json::from_str(r#"{"x": 0, "y": 0, "target": "rotate"}"#).unwrap();
        assert_eq!(req.target, Some(TargetKind::Rotate));
        assert_eq!(HitTarget::from(TargetKind::Resize), HitTarget::ResizeHandle);
    }

    #[test]
    fn test_pointer_response_flattens_controller() {
        let resp = PointerResponse {
            consumed: true,
            controller: ControllerView {
                state: GestureView::Dragging,
                viewed_page: 0,
                active_page: 1,
                placement: None,
            },
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["consumed"], true);
        assert_eq!(json["state"], "dragging");
        assert_eq!(json["active_page"], 1);
    }
}
