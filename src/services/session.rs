//! The signing session: one document, one signature, one placement.

use sig_composite::{
    DrawInstruction, ExportCompositor, HitTarget, MaskedSignature, PageLayout, PageSurface,
    Placement, PlacementController, PlacementError, Point, RasterImage, RecolorCache, RecolorError,
    Rgb,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::SessionError;
use crate::models::{
    AppConfig, ControllerView, PageInfo, PagesResponse, PlacementView, SignatureResponse,
};
use crate::services::renderer::RenderedPage;

struct LoadedDocument {
    bytes: Arc<Vec<u8>>,
    pages: Vec<RenderedPage>,
}

struct LoadedSignature {
    cache: RecolorCache,
    color: Rgb,
    /// Last successfully recolored raster; what the viewer and export use.
    displayed: Arc<RasterImage>,
}

/// Everything a preview needs, detached from the session lock.
#[derive(Debug, Clone)]
pub struct PreviewJob {
    pub page: RenderedPage,
    pub stamp: Option<(Arc<RasterImage>, Placement)>,
}

/// Snapshot handed to the document writer.
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub source: Arc<Vec<u8>>,
    pub instruction: DrawInstruction,
    pub filename: String,
    /// Session revision the snapshot was taken at.
    pub revision: u64,
}

/// Canonical state of a signing session.
///
/// The placement lives only inside the [`PlacementController`]; views and
/// exports read it through the session and never hold a copy across calls.
pub struct SigningSession {
    config: Arc<AppConfig>,
    document: Option<LoadedDocument>,
    signature: Option<LoadedSignature>,
    controller: PlacementController,
    /// Bumped whenever the document, signature or placement changes.
    revision: u64,
}

impl SigningSession {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            document: None,
            signature: None,
            controller: PlacementController::default(),
            revision: 0,
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }

    pub fn has_signature(&self) -> bool {
        self.signature.is_some()
    }

    pub fn controller(&self) -> &PlacementController {
        &self.controller
    }

    pub fn surfaces(&self) -> Vec<PageSurface> {
        self.document
            .as_ref()
            .map(|d| d.pages.iter().map(|p| p.surface).collect())
            .unwrap_or_default()
    }

    /// Replace the document and its pages wholesale.
    ///
    /// Any placement is discarded. A loaded signature is placed again,
    /// centred on the first page.
    pub fn load_document(
        &mut self,
        bytes: Vec<u8>,
        pages: Vec<RenderedPage>,
    ) -> Result<(), SessionError> {
        let surfaces: Vec<PageSurface> = pages.iter().map(|p| p.surface).collect();
        let layout = PageLayout::from_surfaces(&surfaces, self.config.viewer.page_gap);
        if layout.is_empty() {
            return Err(PlacementError::NoPages.into());
        }

        self.touch();
        self.controller.set_layout(layout);
        self.document = Some(LoadedDocument {
            bytes: Arc::new(bytes),
            pages,
        });
        tracing::info!(pages = surfaces.len(), "Document loaded");

        if let Some(aspect) = self.signature.as_ref().map(|s| s.displayed.aspect_ratio()) {
            self.controller
                .place_signature(aspect, self.config.viewer.default_signature_width)?;
        }
        Ok(())
    }

    /// Replace the signature wholesale. The color resets to the default and
    /// the placement is recentred on the viewed page.
    pub fn load_signature(
        &mut self,
        signature: MaskedSignature,
    ) -> Result<Option<Placement>, SessionError> {
        let color = self.config.default_color();
        let mut cache = self.config.pipeline().cache(signature);
        let displayed = cache.get(color)?;
        let aspect = displayed.aspect_ratio();

        tracing::info!(
            width = displayed.width(),
            height = displayed.height(),
            masked = cache.signature().is_masked(),
            %color,
            "Signature loaded"
        );
        self.touch();
        self.signature = Some(LoadedSignature {
            cache,
            color,
            displayed,
        });

        if self.document.is_none() {
            self.controller.clear();
            return Ok(None);
        }
        let placement = self
            .controller
            .place_signature(aspect, self.config.viewer.default_signature_width)?;
        Ok(Some(placement))
    }

    /// Recolor the signature. On failure the last good color stays.
    pub fn set_color(&mut self, input: &str) -> Result<Rgb, SessionError> {
        let resolved = self.config.resolve_color(input);
        let signature = self.signature.as_mut().ok_or(SessionError::NoSignature)?;
        let color = resolved.map_err(|source| RecolorError::InvalidColor {
            input: input.to_string(),
            source,
        })?;

        let displayed = signature.cache.get(color)?;
        signature.color = color;
        signature.displayed = displayed;
        tracing::debug!(%color, cached = signature.cache.len(), "Signature recolored");
        self.touch();
        Ok(color)
    }

    /// Place the signature explicitly, without a gesture.
    pub fn set_placement(&mut self, placement: Placement) -> Result<Placement, SessionError> {
        let aspect = self
            .signature
            .as_ref()
            .map(|s| s.displayed.aspect_ratio())
            .ok_or(SessionError::NoSignature)?;
        let placed = self.controller.set_placement(placement, aspect)?;
        self.touch();
        Ok(placed)
    }

    pub fn clear_signature(&mut self) {
        self.signature = None;
        self.controller.clear();
        self.touch();
        tracing::debug!("Signature cleared");
    }

    pub fn pointer_down(&mut self, x: f64, y: f64, target: Option<HitTarget>) -> bool {
        self.controller.pointer_down(Point::new(x, y), target)
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        let consumed = self.controller.pointer_move(Point::new(x, y));
        if consumed {
            self.touch();
        }
        consumed
    }

    pub fn pointer_up(&mut self) -> bool {
        self.controller.pointer_up()
    }

    /// Change the viewed page. Ignored while a gesture is active.
    pub fn click_page(&mut self, index: usize) -> Result<bool, SessionError> {
        let count = self.controller.layout().len();
        if self.document.is_none() {
            return Err(SessionError::NoDocument);
        }
        if index >= count {
            return Err(PlacementError::PageOutOfRange { index, count }.into());
        }
        Ok(self.controller.click_page(index))
    }

    pub fn pages_view(&self) -> Result<PagesResponse, SessionError> {
        if self.document.is_none() {
            return Err(SessionError::NoDocument);
        }
        Ok(PagesResponse {
            pages: PageInfo::list(&self.surfaces(), self.controller.layout()),
            page_gap: self.controller.layout().gap(),
            viewed_page: self.controller.viewed_page(),
            active_page: self.controller.active_page(),
        })
    }

    pub fn placement_view(&self) -> Option<PlacementView> {
        self.controller
            .placement()
            .map(|p| PlacementView::new(p, self.controller.aspect()))
    }

    pub fn controller_view(&self) -> ControllerView {
        ControllerView {
            state: self.controller.state().into(),
            viewed_page: self.controller.viewed_page(),
            active_page: self.controller.active_page(),
            placement: self.placement_view(),
        }
    }

    pub fn signature_view(&self) -> Result<SignatureResponse, SessionError> {
        let signature = self.signature.as_ref().ok_or(SessionError::NoSignature)?;
        Ok(SignatureResponse {
            width: signature.displayed.width(),
            height: signature.displayed.height(),
            masked: signature.cache.signature().is_masked(),
            color: signature.color.to_string(),
            placement: self.placement_view(),
        })
    }

    /// Page raster plus the stamp, when the stamp sits on that page.
    pub fn preview_job(&self, index: usize) -> Result<PreviewJob, SessionError> {
        let document = self.document.as_ref().ok_or(SessionError::NoDocument)?;
        let page = document
            .pages
            .get(index)
            .cloned()
            .ok_or(PlacementError::PageOutOfRange {
                index,
                count: document.pages.len(),
            })?;

        let stamp = match (self.signature.as_ref(), self.controller.placement()) {
            (Some(signature), Some(placement)) if placement.page_index == index => {
                Some((Arc::clone(&signature.displayed), *placement))
            }
            _ => None,
        };
        Ok(PreviewJob { page, stamp })
    }

    /// Compose the draw instruction for the current placement.
    ///
    /// Nothing is mutated; call [`finish_export`](Self::finish_export) once
    /// the document has been written.
    pub fn prepare_export(&self) -> Result<ExportJob, SessionError> {
        let document = self.document.as_ref().ok_or(SessionError::NoDocument)?;
        let signature = self.signature.as_ref().ok_or(SessionError::NoSignature)?;
        let placement = self.controller.placement().ok_or(SessionError::NoPlacement)?;

        let instruction =
            ExportCompositor::new().compose(placement, &signature.displayed, &self.surfaces())?;

        tracing::debug!(
            page = instruction.page_index,
            x = instruction.x,
            y = instruction.y,
            width = instruction.width,
            height = instruction.height,
            rotation = instruction.rotation,
            "Prepared export"
        );
        Ok(ExportJob {
            source: Arc::clone(&document.bytes),
            instruction,
            filename: self.config.export.filename.clone(),
            revision: self.revision,
        })
    }

    /// A completed export consumes the signature and its placement.
    ///
    /// Returns `false` and keeps everything when the session changed after
    /// `job` was prepared; that newer state was not part of the export.
    pub fn finish_export(&mut self, job: &ExportJob) -> bool {
        if job.revision != self.revision {
            tracing::debug!(
                prepared = job.revision,
                current = self.revision,
                "Session changed during export, keeping current state"
            );
            return false;
        }
        self.signature = None;
        self.controller.clear();
        self.touch();
        true
    }
}

/// Admits one export at a time.
#[derive(Debug, Default)]
pub struct ExportGate {
    busy: AtomicBool,
}

impl ExportGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` while another export holds the gate.
    pub fn try_begin(&self) -> Option<ExportGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ExportGuard { gate: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Releases the [`ExportGate`] on drop.
#[derive(Debug)]
pub struct ExportGuard<'a> {
    gate: &'a ExportGate,
}

impl Drop for ExportGuard<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GestureView;
    use pretty_assertions::assert_eq;

    fn session() -> SigningSession {
        SigningSession::new(Arc::new(AppConfig::default()))
    }

    fn page(width_px: u32, height_px: u32) -> RenderedPage {
        RenderedPage {
            surface: PageSurface::new(
                width_px as f64,
                height_px as f64,
                width_px as f64 * 0.68,
                height_px as f64 * 0.68,
            ),
            raster: Arc::new(RasterImage::filled(width_px, height_px, [255, 255, 255, 255])),
        }
    }

    fn signature() -> MaskedSignature {
        MaskedSignature::masked(RasterImage::filled(120, 60, [0, 0, 0, 255]))
    }

    fn loaded() -> SigningSession {
        let mut s = session();
        s.load_document(b"%PDF".to_vec(), vec![page(300, 400), page(300, 400)])
            .unwrap();
        s.load_signature(signature()).unwrap();
        s
    }

    #[test]
    fn test_signature_centred_on_viewed_page() {
        let mut s = session();
        s.load_document(b"%PDF".to_vec(), vec![page(300, 400), page(300, 400)])
            .unwrap();
        s.click_page(1).unwrap();

        let placement = s.load_signature(signature()).unwrap().unwrap();
        assert_eq!(placement.page_index, 1);
        assert_eq!(placement.size_width, 200.0);
        assert_eq!(placement.x, 50.0);
        assert_eq!(placement.y, 150.0);
        assert_eq!(s.controller().active_page(), 1);
    }

    #[test]
    fn test_signature_before_document_is_placed_on_load() {
        let mut s = session();
        assert_eq!(s.load_signature(signature()).unwrap(), None);
        assert!(s.placement_view().is_none());

        s.load_document(b"%PDF".to_vec(), vec![page(300, 400)]).unwrap();
        let view = s.placement_view().unwrap();
        assert_eq!(view.page_index, 0);
        assert_eq!(view.height, 100.0);
    }

    #[test]
    fn test_new_document_replaces_placement() {
        let mut s = loaded();
        s.pointer_down(150.0, 200.0, Some(HitTarget::Body));
        s.pointer_move(160.0, 210.0);
        s.pointer_up();
        assert_eq!(s.placement_view().unwrap().x, 60.0);

        s.load_document(b"%PDF".to_vec(), vec![page(500, 500)]).unwrap();
        let view = s.placement_view().unwrap();
        assert_eq!(view.x, 150.0);
        assert_eq!(s.pages_view().unwrap().pages.len(), 1);
    }

    #[test]
    fn test_set_color_keeps_last_good() {
        let mut s = loaded();
        assert_eq!(s.set_color("Blue").unwrap(), Rgb::new(0x00, 0x66, 0xCC));

        let err = s.set_color("not-a-color").unwrap_err();
        assert!(matches!(
            err,
            SessionError::Recolor(RecolorError::InvalidColor { .. })
        ));
        assert_eq!(s.signature_view().unwrap().color, "#0066CC");
    }

    #[test]
    fn test_set_color_without_signature() {
        let mut s = session();
        assert!(matches!(
            s.set_color("Red").unwrap_err(),
            SessionError::NoSignature
        ));
    }

    #[test]
    fn test_new_signature_resets_color() {
        let mut s = loaded();
        s.set_color("#CC0000").unwrap();
        s.load_signature(signature()).unwrap();
        assert_eq!(s.signature_view().unwrap().color, "#000000");
    }

    #[test]
    fn test_gesture_state_reported() {
        let mut s = loaded();
        assert!(s.pointer_down(150.0, 200.0, None));
        assert_eq!(s.controller_view().state, GestureView::Dragging);
        assert!(!s.click_page(1).unwrap());
        assert!(s.pointer_up());
        assert_eq!(s.controller_view().state, GestureView::Idle);
        assert!(s.click_page(1).unwrap());
        assert_eq!(s.controller_view().viewed_page, 1);
        assert_eq!(s.controller_view().active_page, 0);
    }

    #[test]
    fn test_click_page_out_of_range() {
        let mut s = loaded();
        let err = s.click_page(7).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Placement(PlacementError::PageOutOfRange { index: 7, count: 2 })
        ));
    }

    #[test]
    fn test_preview_job_only_stamps_its_page() {
        let s = loaded();
        assert!(s.preview_job(0).unwrap().stamp.is_some());
        assert!(s.preview_job(1).unwrap().stamp.is_none());
        assert!(s.preview_job(2).is_err());
    }

    #[test]
    fn test_prepare_export_requires_everything() {
        let mut s = session();
        assert!(matches!(s.prepare_export().unwrap_err(), SessionError::NoDocument));
        s.load_document(b"%PDF".to_vec(), vec![page(300, 400)]).unwrap();
        assert!(matches!(s.prepare_export().unwrap_err(), SessionError::NoSignature));
        s.load_signature(signature()).unwrap();
        s.controller.clear();
        assert!(matches!(s.prepare_export().unwrap_err(), SessionError::NoPlacement));
    }

    #[test]
    fn test_prepare_and_finish_export() {
        let mut s = loaded();
        let job = s.prepare_export().unwrap();
        assert_eq!(job.filename, "signed.pdf");
        assert_eq!(job.instruction.page_index, 0);
        assert!((job.instruction.width - 136.0).abs() < 1e-9);
        assert_eq!(job.source.as_slice(), b"%PDF");

        assert!(s.finish_export(&job));
        assert!(!s.has_signature());
        assert!(s.placement_view().is_none());
        assert!(s.has_document());
    }

    #[test]
    fn test_finish_export_keeps_newer_signature() {
        let mut s = loaded();
        let job = s.prepare_export().unwrap();

        s.load_signature(signature()).unwrap();
        assert!(!s.finish_export(&job));
        assert!(s.has_signature());
        assert!(s.placement_view().is_some());
    }

    #[test]
    fn test_finish_export_keeps_moved_placement() {
        let mut s = loaded();
        let job = s.prepare_export().unwrap();

        assert!(s.pointer_down(150.0, 200.0, Some(HitTarget::Body)));
        assert!(s.pointer_move(160.0, 210.0));
        s.pointer_up();
        assert!(!s.finish_export(&job));
        assert_eq!(s.placement_view().unwrap().x, 60.0);
    }

    #[test]
    fn test_views_do_not_change_revision() {
        let mut s = loaded();
        let before = s.revision();
        s.pages_view().unwrap();
        s.signature_view().unwrap();
        s.click_page(1).unwrap();
        let job = s.prepare_export().unwrap();
        assert_eq!(job.revision, before);
        assert!(s.finish_export(&job));
    }

    #[test]
    fn test_set_placement_is_clamped() {
        let mut s = loaded();
        let placed = s
            .set_placement(Placement {
                page_index: 1,
                x: 500.0,
                y: -20.0,
                size_width: 10.0,
                rotation: 370.0,
            })
            .unwrap();
        assert_eq!(placed.page_index, 1);
        assert_eq!(placed.size_width, 40.0);
        assert_eq!(placed.x, 260.0);
        assert_eq!(placed.y, 0.0);
        assert_eq!(placed.rotation, 10.0);
        assert_eq!(s.controller_view().active_page, 1);
    }

    #[test]
    fn test_export_gate_admits_one() {
        let gate = ExportGate::new();
        let first = gate.try_begin();
        assert!(first.is_some());
        assert!(gate.try_begin().is_none());
        assert!(gate.is_busy());
        drop(first);
        assert!(!gate.is_busy());
        assert!(gate.try_begin().is_some());
    }
}
