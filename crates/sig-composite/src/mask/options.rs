//! Background classification options.

/// Configuration for [`BackgroundClassifier`](super::BackgroundClassifier).
///
/// # Defaults
///
/// - Threshold: 240 (pixels brighter than this are "white-ish")
/// - Tolerance: 10 (channel spread below this is "neutral")
/// - Edge smoothing: enabled
///
/// # Example
///
/// ```
/// use sig_composite::MaskOptions;
///
/// let options = MaskOptions::new().threshold(230).tolerance(15);
/// assert_eq!(options.threshold, 230);
/// assert!(options.edge_smoothing);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskOptions {
    /// Brightness above which a neutral pixel counts as background (0-255).
    pub threshold: u8,

    /// Maximum channel variation a background pixel may have.
    pub tolerance: u8,

    /// Whether ink pixels get graded alpha near the threshold.
    pub edge_smoothing: bool,
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self {
            threshold: 240,
            tolerance: 10,
            edge_smoothing: true,
        }
    }
}

impl MaskOptions {
    /// Create options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the brightness threshold.
    #[inline]
    pub fn threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the color variation tolerance.
    #[inline]
    pub fn tolerance(mut self, tolerance: u8) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Enable or disable edge smoothing.
    #[inline]
    pub fn edge_smoothing(mut self, enabled: bool) -> Self {
        self.edge_smoothing = enabled;
        self
    }
}
