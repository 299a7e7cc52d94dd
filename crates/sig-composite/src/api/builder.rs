//! SignaturePipeline builder -- the primary entry point for the crate.

use crate::export::{DrawInstruction, ExportCompositor, PageSurface};
use crate::mask::{BackgroundClassifier, MaskOptions, MaskedSignature};
use crate::placement::Placement;
use crate::raster::{DecodeError, RasterImage, Rgb};
use crate::recolor::{ColorRemapper, RecolorCache, RecolorError, RecolorOptions};

use super::error::CompositeError;

/// Result of background removal.
///
/// Classification failing is not fatal: the original image is used as the
/// signature instead, and the error is kept for reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum MaskOutcome {
    Masked(MaskedSignature),
    Unmasked {
        signature: MaskedSignature,
        error: DecodeError,
    },
}

impl MaskOutcome {
    pub fn signature(&self) -> &MaskedSignature {
        match self {
            MaskOutcome::Masked(signature) => signature,
            MaskOutcome::Unmasked { signature, .. } => signature,
        }
    }

    pub fn into_signature(self) -> MaskedSignature {
        match self {
            MaskOutcome::Masked(signature) => signature,
            MaskOutcome::Unmasked { signature, .. } => signature,
        }
    }

    pub fn error(&self) -> Option<&DecodeError> {
        match self {
            MaskOutcome::Masked(_) => None,
            MaskOutcome::Unmasked { error, .. } => Some(error),
        }
    }
}

/// Mask, recolor and export configuration in one reusable value.
///
/// # Example
///
/// ```
/// use sig_composite::{RasterImage, Rgb, SignaturePipeline};
///
/// let pipeline = SignaturePipeline::new().threshold(230).preserve_alpha(true);
///
/// let scan = RasterImage::from_rgba(2, 1, vec![255, 255, 255, 255, 20, 20, 20, 255]);
/// let signature = pipeline.mask(&scan).into_signature();
/// assert!(signature.is_masked());
///
/// let red = pipeline.recolor(&signature, Rgb::new(0xCC, 0, 0)).unwrap();
/// assert_eq!(red.pixel(1, 0), Some([0xCC, 0, 0, 255]));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignaturePipeline {
    mask: MaskOptions,
    recolor: RecolorOptions,
}

impl SignaturePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all background options at once.
    #[inline]
    pub fn mask_options(mut self, options: MaskOptions) -> Self {
        self.mask = options;
        self
    }

    /// Replace all recolor options at once.
    #[inline]
    pub fn recolor_options(mut self, options: RecolorOptions) -> Self {
        self.recolor = options;
        self
    }

    /// Set the background brightness threshold.
    #[inline]
    pub fn threshold(mut self, threshold: u8) -> Self {
        self.mask = self.mask.threshold(threshold);
        self
    }

    /// Set the background neutrality tolerance.
    #[inline]
    pub fn tolerance(mut self, tolerance: u8) -> Self {
        self.mask = self.mask.tolerance(tolerance);
        self
    }

    #[inline]
    pub fn edge_smoothing(mut self, enabled: bool) -> Self {
        self.mask = self.mask.edge_smoothing(enabled);
        self
    }

    /// Set the recolor ink threshold (ink is darker than `255 - threshold`).
    #[inline]
    pub fn ink_threshold(mut self, threshold: u8) -> Self {
        self.recolor = self.recolor.threshold(threshold);
        self
    }

    #[inline]
    pub fn preserve_alpha(mut self, enabled: bool) -> Self {
        self.recolor = self.recolor.preserve_alpha(enabled);
        self
    }

    pub fn mask_settings(&self) -> &MaskOptions {
        &self.mask
    }

    pub fn recolor_settings(&self) -> &RecolorOptions {
        &self.recolor
    }

    pub fn classifier(&self) -> BackgroundClassifier {
        BackgroundClassifier::new(self.mask)
    }

    pub fn remapper(&self) -> ColorRemapper {
        ColorRemapper::new(self.recolor)
    }

    /// Remove the background of `image`, falling back to the original.
    pub fn mask(&self, image: &RasterImage) -> MaskOutcome {
        match self.classifier().classify(image) {
            Ok(raster) => MaskOutcome::Masked(MaskedSignature::masked(raster)),
            Err(error) => {
                tracing::warn!(%error, "Background removal failed, using original image");
                MaskOutcome::Unmasked {
                    signature: MaskedSignature::unmasked(image.clone()),
                    error,
                }
            }
        }
    }

    /// Skip background removal entirely.
    pub fn passthrough(&self, image: RasterImage) -> MaskedSignature {
        MaskedSignature::unmasked(image)
    }

    pub fn recolor(
        &self,
        signature: &MaskedSignature,
        color: Rgb,
    ) -> Result<RasterImage, RecolorError> {
        self.remapper().recolor(signature, color)
    }

    /// A memoizing recolorer that owns `signature`.
    pub fn cache(&self, signature: MaskedSignature) -> RecolorCache {
        RecolorCache::new(signature, self.remapper())
    }

    /// Mask, recolor and compose in one go.
    pub fn stamp(
        &self,
        image: &RasterImage,
        color: Rgb,
        placement: &Placement,
        pages: &[PageSurface],
    ) -> Result<DrawInstruction, CompositeError> {
        let signature = self.mask(image).into_signature();
        let recolored = self.recolor(&signature, color)?;
        Ok(ExportCompositor::new().compose(placement, &recolored, pages)?)
    }
}
