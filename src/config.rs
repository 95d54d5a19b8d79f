//! Site configuration module.
//!
//! Handles loading and validating `config.toml`. The file lives at
//! the project root and is optional: stock defaults apply to every key it
//! does not set.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! assets_dir = "src/assets"  # Where relative asset paths are looked up
//!
//! [lqip]
//! width = 20                 # Placeholder width in pixels
//! blur = 10.0                # Gaussian blur sigma
//! grayscale = false
//! quality = 20               # JPEG quality (1-100)
//! format = "webp"            # "webp" or "jpeg"
//!
//! [works]
//! pin_hint = "Click to pin the content"
//! link_hint = "Click again to open the link"
//!
//! [processing]
//! max_processes = 4          # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [lqip]
//! grayscale = true
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::lqip::{LqipOptions, OutputFormat, Quality};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Assets directory, relative to the project root.
    pub assets_dir: String,
    /// Placeholder generation settings.
    pub lqip: LqipConfig,
    /// Works list copy.
    pub works: WorksConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            assets_dir: crate::lqip::DEFAULT_ASSETS_DIR.to_string(),
            lqip: LqipConfig::default(),
            works: WorksConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lqip.width == 0 || self.lqip.width > 64 {
            return Err(ConfigError::Validation("lqip.width must be 1-64".into()));
        }
        if self.lqip.quality == 0 || self.lqip.quality > 100 {
            return Err(ConfigError::Validation("lqip.quality must be 1-100".into()));
        }
        if !self.lqip.blur.is_finite() || self.lqip.blur < 0.0 {
            return Err(ConfigError::Validation(
                "lqip.blur must be a non-negative number".into(),
            ));
        }
        if self.assets_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "assets_dir must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Placeholder generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LqipConfig {
    /// Placeholder width in pixels; height follows the source aspect ratio.
    pub width: u32,
    /// Gaussian blur sigma.
    pub blur: f32,
    /// Convert placeholders to grayscale.
    pub grayscale: bool,
    /// Lossy quality, used by the JPEG format.
    pub quality: u32,
    /// Output format of the data URL.
    pub format: OutputFormat,
}

impl Default for LqipConfig {
    fn default() -> Self {
        let opts = LqipOptions::default();
        Self {
            width: opts.width,
            blur: opts.blur,
            grayscale: opts.grayscale,
            quality: opts.quality.value(),
            format: opts.format,
        }
    }
}

impl From<&LqipConfig> for LqipOptions {
    fn from(config: &LqipConfig) -> Self {
        LqipOptions {
            width: config.width.max(1),
            blur: config.blur,
            grayscale: config.grayscale,
            quality: Quality::new(config.quality),
            format: config.format,
        }
    }
}

/// Hint copy shown under the works detail panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorksConfig {
    /// Shown while hovering (not locked) on non-mobile layouts.
    pub pin_hint: String,
    /// Shown while a work with a link is locked.
    pub link_hint: String,
}

impl Default for WorksConfig {
    fn default() -> Self {
        Self {
            pin_hint: "Click to pin the content".to_string(),
            link_hint: "Click again to open the link".to_string(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel placeholder workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, at least one
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading and validation
// =============================================================================

/// Parse and validate config text. Keys it leaves out keep their defaults.
pub fn parse_config(content: &str) -> Result<SiteConfig, ConfigError> {
    let config: SiteConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the project root.
///
/// A missing file yields the validated defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = root.join("config.toml");
    if !config_path.exists() {
        return Ok(SiteConfig::default());
    }
    parse_config(&fs::read_to_string(&config_path)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Folio Configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Directory (relative to the project root) that relative asset paths
# are resolved against.
assets_dir = "src/assets"

# ---------------------------------------------------------------------------
# Low-quality image placeholders
# ---------------------------------------------------------------------------
[lqip]
# Placeholder width in pixels. Height follows the source aspect ratio.
width = 20

# Gaussian blur sigma applied after resizing. 0 disables the blur.
blur = 10.0

# Render placeholders in grayscale.
grayscale = false

# Lossy quality (1-100). Only used by the "jpeg" format.
quality = 20

# Data URL format: "webp" (lossless) or "jpeg".
format = "webp"

# ---------------------------------------------------------------------------
# Works list
# ---------------------------------------------------------------------------
[works]
# Shown under the details while hovering, on desktop layouts.
pin_hint = "Click to pin the content"

# Shown while a work with an external link is pinned.
link_hint = "Click again to open the link"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel placeholder workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
