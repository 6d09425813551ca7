use std::path::{Path, PathBuf};

use mosaic_color::{Palette, Rgb};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Lowest and highest accepted sampling precision.
pub const PRECISION_RANGE: (u32, u32) = (1, 10);

/// Mosaic build parameters, loadable from YAML.
///
/// Every field has a default, so an empty document is a valid config.
///
/// ```yaml
/// image: photos/harbor.jpg
/// rows: 12
/// columns: 16
/// width: 2.5
/// height: 2.5
/// precision: 7
/// palette_size: 6
/// palette: ["#1d3557", "#e63946"]   # optional, skips extraction
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MosaicConfig {
    /// Source image; empty means no image.
    pub image: PathBuf,

    pub rows: usize,

    pub columns: usize,

    /// Cell width in frame units
    pub width: f64,

    /// Cell height in frame units
    pub height: f64,

    /// Sampling density, clamped to 1..=10 at build time
    pub precision: i64,

    pub palette_size: usize,

    /// Palette extractor pixel stride (1 = every pixel)
    pub quality: usize,

    /// Skip near-white pixels during palette extraction
    pub ignore_white: bool,

    /// Fixed palette as hex strings; replaces extraction when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palette: Option<Vec<String>>,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            image: PathBuf::new(),
            rows: 5,
            columns: 5,
            width: 10.0,
            height: 10.0,
            precision: 5,
            palette_size: 5,
            quality: 1,
            ignore_white: false,
            palette: None,
        }
    }
}

impl MosaicConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as an empty map.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            rows = config.rows,
            columns = config.columns,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Like [`MosaicConfig::load`], but falls back to defaults on failure.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), %e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// The configured precision clamped into [`PRECISION_RANGE`].
    pub fn clamped_precision(&self) -> u32 {
        clamp_precision(self.precision)
    }

    /// Parsed fixed palette, if one is configured.
    pub fn fixed_palette(&self) -> Result<Option<Vec<Rgb>>, ConfigError> {
        match &self.palette {
            Some(hex) => Ok(Some(Palette::from_hex(hex.as_slice())?.into_colors())),
            None => Ok(None),
        }
    }
}

/// Out-of-range precision is clamped, never rejected.
pub fn clamp_precision(precision: i64) -> u32 {
    let (lo, hi) = PRECISION_RANGE;
    precision.clamp(lo as i64, hi as i64) as u32
}
