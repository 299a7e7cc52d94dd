use std::collections::HashMap;
use std::sync::Arc;

use crate::mask::MaskedSignature;
use crate::raster::{RasterImage, Rgb};

use super::error::RecolorError;
use super::remapper::ColorRemapper;

/// Memoized recolor results for one [`MaskedSignature`].
///
/// Purely a performance aid: every entry equals what
/// [`ColorRemapper::recolor()`] would return for the same color. The cache
/// owns its signature, so replacing the signature means building a new cache.
#[derive(Debug)]
pub struct RecolorCache {
    signature: MaskedSignature,
    remapper: ColorRemapper,
    entries: HashMap<Rgb, Arc<RasterImage>>,
}

impl RecolorCache {
    pub fn new(signature: MaskedSignature, remapper: ColorRemapper) -> Self {
        Self {
            signature,
            remapper,
            entries: HashMap::new(),
        }
    }

    pub fn signature(&self) -> &MaskedSignature {
        &self.signature
    }

    /// Recolored raster for `color`, computed on first use.
    ///
    /// A failed recolor is not cached.
    pub fn get(&mut self, color: Rgb) -> Result<Arc<RasterImage>, RecolorError> {
        if let Some(hit) = self.entries.get(&color) {
            tracing::trace!(%color, "Recolor cache hit");
            return Ok(hit.clone());
        }
        let raster = Arc::new(self.remapper.recolor(&self.signature, color)?);
        self.entries.insert(color, raster.clone());
        Ok(raster)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
