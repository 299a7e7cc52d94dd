//! Recoloring options.

/// Configuration for [`ColorRemapper`](super::ColorRemapper).
///
/// # Defaults
///
/// - Threshold: 50 (pixels darker than `255 - 50 = 205` count as ink)
/// - Preserve alpha: enabled (anti-aliased edges keep their transparency)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecolorOptions {
    /// Distance from white a pixel's brightness must exceed to be ink.
    pub threshold: u8,

    /// Keep each ink pixel's alpha instead of forcing it opaque.
    pub preserve_alpha: bool,
}

impl Default for RecolorOptions {
    fn default() -> Self {
        Self {
            threshold: 50,
            preserve_alpha: true,
        }
    }
}

impl RecolorOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    #[inline]
    pub fn preserve_alpha(mut self, enabled: bool) -> Self {
        self.preserve_alpha = enabled;
        self
    }

    /// Brightness below which a pixel is recolored.
    #[inline]
    pub fn ink_cutoff(&self) -> f32 {
        255.0 - self.threshold as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let opts = RecolorOptions::default();
        assert_eq!(opts.threshold, 50);
        assert!(opts.preserve_alpha);
        assert_eq!(opts.ink_cutoff(), 205.0);
    }

    #[test]
    fn test_builder_chaining() {
        let opts = RecolorOptions::new().threshold(80).preserve_alpha(false);
        assert_eq!(opts.threshold, 80);
        assert!(!opts.preserve_alpha);
        assert_eq!(opts.ink_cutoff(), 175.0);
    }
}
