use std::sync::Arc;

use crate::raster::RasterImage;

/// The canonical, background-free signature every recolor starts from.
///
/// Created once per uploaded image, either from the classifier's output or,
/// when classification fails, from the unmasked original. Cloning is cheap
/// and shares the raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedSignature {
    raster: Arc<RasterImage>,
    masked: bool,
}

impl MaskedSignature {
    /// Wrap the classifier's output.
    pub fn masked(raster: RasterImage) -> Self {
        Self {
            raster: Arc::new(raster),
            masked: true,
        }
    }

    /// Wrap an original image whose background could not be removed.
    pub fn unmasked(raster: RasterImage) -> Self {
        Self {
            raster: Arc::new(raster),
            masked: false,
        }
    }

    pub fn raster(&self) -> &RasterImage {
        &self.raster
    }

    /// Whether background removal actually ran on this signature.
    pub fn is_masked(&self) -> bool {
        self.masked
    }

    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.raster.aspect_ratio()
    }
}
