//! Tool configuration.
//!
//! Handles loading and validating an optional TOML file that sets the
//! defaults the CLI uses when a flag is not given. Nothing is read unless a
//! path is passed with `--config`.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [output]
//! format = "jpeg"           # jpeg | png | gif | webp
//! quality = 75              # JPEG quality (0-100), ignored by other formats
//! # permissions = 0o644     # Unix mode applied to written files
//!
//! [resize]
//! filter = "triangle"       # nearest | triangle | catmullrom | gaussian | lanczos3
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use crate::imaging::{ImageType, Quality, ResampleFilter, SaveOptions};
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

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Encoding defaults for `convert`.
    pub output: OutputConfig,
    /// Resampling settings.
    pub resize: ResizeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: ImageType,
    pub quality: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<u32>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ImageType::Jpeg,
            quality: Quality::default().value() as u32,
            permissions: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeConfig {
    pub filter: ResampleFilter,
}

impl Config {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.quality > 100 {
            return Err(ConfigError::Validation(
                "output.quality must be 0-100".into(),
            ));
        }
        if let Some(mode) = self.output.permissions.filter(|&m| m > 0o7777) {
            return Err(ConfigError::Validation(format!(
                "output.permissions must be a file mode (got {mode:#o})"
            )));
        }
        Ok(())
    }

    /// Save options built from the `[output]` table.
    pub fn save_options(&self) -> SaveOptions {
        SaveOptions {
            format: self.output.format,
            quality: Quality::new(self.output.quality),
            permissions: self.output.permissions,
        }
    }
}

/// Parse and validate config from a TOML string.
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, or stock defaults when `path` is `None`.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            let config = parse_config(&content)?;
            tracing::debug!(path = %path.display(), ?config, "Loaded config");
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

/// Returns a fully-commented stock config with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# imghandle configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Output encoding (used by `convert` when a flag is not given)
# ---------------------------------------------------------------------------
[output]
# Output format: "jpeg", "png", "gif" or "webp".
format = "jpeg"

# JPEG quality (0 = worst, 100 = best). PNG, GIF and WebP are lossless
# and ignore this value.
quality = 75

# Unix permission bits applied to written files. Omit to keep the umask
# default.
# permissions = 0o644

# ---------------------------------------------------------------------------
# Resampling
# ---------------------------------------------------------------------------
[resize]
# Filter used for resize/scale: "nearest", "triangle", "catmullrom",
# "gaussian" or "lanczos3". "triangle" averages every covered source pixel.
filter = "triangle"
"##
}
