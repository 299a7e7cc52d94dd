use crate::assets::ConfigSource;
use serde::{Deserialize, Serialize};
use sig_composite::{
    MaskOptions, ParseColorError, RecolorOptions, Rgb, SignaturePipeline, SIGNATURE_COLORS,
};

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub background: BackgroundConfig,

    #[serde(default)]
    pub recolor: RecolorConfig,

    #[serde(default)]
    pub viewer: ViewerConfig,

    #[serde(default)]
    pub export: ExportConfig,

    /// Palette offered to the user; the first entry is the default color
    #[serde(default = "default_colors")]
    pub colors: Vec<ColorConfig>,
}

/// Background removal settings
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct BackgroundConfig {
    pub threshold: u8,
    pub tolerance: u8,
    pub edge_smoothing: bool,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        let opts = MaskOptions::default();
        Self {
            threshold: opts.threshold,
            tolerance: opts.tolerance,
            edge_smoothing: opts.edge_smoothing,
        }
    }
}

/// Ink recoloring settings
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct RecolorConfig {
    pub threshold: u8,
    pub preserve_alpha: bool,
}

impl Default for RecolorConfig {
    fn default() -> Self {
        let opts = RecolorOptions::default();
        Self {
            threshold: opts.threshold,
            preserve_alpha: opts.preserve_alpha,
        }
    }
}

/// Page viewer settings
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    /// Gap between stacked pages in raster pixels
    pub page_gap: f64,
    /// Raster pixels per inch for page surfaces
    pub render_dpi: f64,
    /// Width of a freshly placed signature in raster pixels
    pub default_signature_width: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            page_gap: 20.0,
            render_dpi: 108.0,
            default_signature_width: 200.0,
        }
    }
}

/// Export settings
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ExportConfig {
    /// Download name of the signed document
    pub filename: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename: "signed.pdf".to_string(),
        }
    }
}

/// One palette entry
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ColorConfig {
    pub name: String,
    pub hex: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            background: BackgroundConfig::default(),
            recolor: RecolorConfig::default(),
            viewer: ViewerConfig::default(),
            export: ExportConfig::default(),
            colors: default_colors(),
        }
    }
}

fn default_colors() -> Vec<ColorConfig> {
    SIGNATURE_COLORS
        .iter()
        .map(|c| ColorConfig {
            name: c.name.to_string(),
            hex: c.rgb.to_string(),
        })
        .collect()
}

impl AppConfig {
    /// Load configuration from a ConfigSource (embedded or external)
    pub fn load(source: &ConfigSource) -> Self {
        match source.read_config_string() {
            Ok(content) => match Self::parse(&content) {
                Ok(config) => {
                    tracing::info!(
                        colors = config.colors.len(),
                        render_dpi = config.viewer.render_dpi,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse YAML, dropping palette entries with invalid hex values.
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        let mut config: Self = serde_yaml::from_str(content)?;
        config.colors.retain(|c| match c.hex.parse::<Rgb>() {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(name = %c.name, hex = %c.hex, %e, "Ignoring invalid palette color");
                false
            }
        });
        if config.colors.is_empty() {
            config.colors = default_colors();
        }
        config.viewer = config.viewer.sanitized();
        Ok(config)
    }

    /// Signature processing settings as a pipeline.
    pub fn pipeline(&self) -> SignaturePipeline {
        SignaturePipeline::new()
            .threshold(self.background.threshold)
            .tolerance(self.background.tolerance)
            .edge_smoothing(self.background.edge_smoothing)
            .ink_threshold(self.recolor.threshold)
            .preserve_alpha(self.recolor.preserve_alpha)
    }

    /// Palette with parsed colors.
    pub fn palette(&self) -> Vec<(String, Rgb)> {
        self.colors
            .iter()
            .filter_map(|c| c.hex.parse().ok().map(|rgb| (c.name.clone(), rgb)))
            .collect()
    }

    /// Color a new signature starts out in.
    pub fn default_color(&self) -> Rgb {
        self.palette()
            .first()
            .map(|(_, rgb)| *rgb)
            .unwrap_or(Rgb::BLACK)
    }

    /// Resolve a palette name, a built-in color name, or a hex value.
    pub fn resolve_color(&self, input: &str) -> Result<Rgb, ParseColorError> {
        let wanted = input.trim();
        if let Some((_, rgb)) = self
            .palette()
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
        {
            return Ok(rgb);
        }
        Rgb::resolve(wanted)
    }
}

impl ViewerConfig {
    /// Replace non-positive or non-finite values with defaults.
    fn sanitized(self) -> Self {
        let defaults = Self::default();
        let pick = |v: f64, d: f64| if v.is_finite() && v > 0.0 { v } else { d };
        Self {
            page_gap: if self.page_gap.is_finite() && self.page_gap >= 0.0 {
                self.page_gap
            } else {
                defaults.page_gap
            },
            render_dpi: pick(self.render_dpi, defaults.render_dpi),
            default_signature_width: pick(
                self.default_signature_width,
                defaults.default_signature_width,
            ),
        }
    }
}
