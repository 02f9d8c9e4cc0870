//! Tool configuration module.
//!
//! Handles loading and validating `photomark.toml`. Configuration is
//! optional: stock defaults cover everything, and a config file overrides
//! only the values it names.
//!
//! ## Config File Location
//!
//! `photomark.toml` in the working directory is picked up automatically;
//! `--config <path>` points anywhere else.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [output]
//! filename = "watermarked-image.jpg"  # Output name when --output is absent
//! quality = 90                        # JPEG quality (1-100)
//!
//! [logos]
//! dir = "logos"                       # Directory with brand logo PNGs
//! ```
//!
//! The band proportions are deliberately *not* configurable — they are the
//! visual-compatibility contract, not preferences.
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::export::DEFAULT_OUTPUT_NAME;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `photomark.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkConfig {
    pub output: OutputConfig,
    pub logos: LogoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Output filename used when the CLI doesn't pass `--output`.
    pub filename: String,
    /// JPEG quality for the exported image (1-100).
    pub quality: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            filename: DEFAULT_OUTPUT_NAME.to_string(),
            quality: 90,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogoConfig {
    /// Directory holding brand logo PNGs (`apple.png`, `canon.png`, ...).
    /// Logos are trademarked artwork and not bundled with the binary.
    pub dir: PathBuf,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("logos"),
        }
    }
}

impl MarkConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.output.quality) {
            return Err(ConfigError::Validation(
                "output.quality must be 1-100".into(),
            ));
        }
        if self.output.filename.is_empty() {
            return Err(ConfigError::Validation(
                "output.filename must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Default config filename searched for in the working directory.
pub const CONFIG_FILE_NAME: &str = "photomark.toml";

/// Load configuration.
///
/// - explicit path → must exist and parse
/// - no path → `photomark.toml` in the working directory if present,
///   otherwise stock defaults
pub fn load(explicit: Option<&Path>) -> Result<MarkConfig, ConfigError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let implied = PathBuf::from(CONFIG_FILE_NAME);
            if !implied.exists() {
                return Ok(MarkConfig::default());
            }
            implied
        }
    };
    let text = std::fs::read_to_string(&path)?;
    let config: MarkConfig = toml::from_str(&text)?;
    config.validate()?;
    Ok(config)
}

/// A documented stock config, printed by `photomark gen-config`.
pub fn stock_config_toml() -> String {
    format!(
        r#"# photomark configuration
# All options are optional - the values below are the defaults.

[output]
# Filename used when --output is not passed.
filename = "{DEFAULT_OUTPUT_NAME}"
# JPEG quality for the exported image (1-100).
quality = 90

[logos]
# Directory holding brand logo PNGs (apple.png, canon.png, nikon.png,
# sony.png, hasselblad.png). Logo artwork is trademarked and therefore not
# shipped with photomark; drop your own files here.
dir = "logos"
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_are_valid() {
        let config = MarkConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.output.filename, DEFAULT_OUTPUT_NAME);
        assert_eq!(config.output.quality, 90);
        assert_eq!(config.logos.dir, PathBuf::from("logos"));
    }

    #[test]
    fn partial_file_overrides_only_named_values() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("photomark.toml");
        fs::write(&path, "[output]\nquality = 80\n").unwrap();

        let config = load(Some(&path)).unwrap();
        assert_eq!(config.output.quality, 80);
        assert_eq!(config.output.filename, DEFAULT_OUTPUT_NAME);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("photomark.toml");
        fs::write(&path, "[output]\nqualty = 80\n").unwrap();

        assert!(matches!(load(Some(&path)), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn out_of_range_quality_is_rejected() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("photomark.toml");
        fs::write(&path, "[output]\nquality = 250\n").unwrap();

        assert!(matches!(load(Some(&path)), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn missing_explicit_path_errors() {
        assert!(matches!(
            load(Some(Path::new("/nonexistent/photomark.toml"))),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let parsed: MarkConfig = toml::from_str(&stock_config_toml()).unwrap();
        assert_eq!(parsed.output.quality, MarkConfig::default().output.quality);
        assert_eq!(parsed.logos.dir, MarkConfig::default().logos.dir);
    }
}
