//! Configuration schema types for `favpack.toml`
//!
//! Defines the structure and validation rules for favpack configuration.
//! Every section and field is optional.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::catalog::Category;
use crate::models::{DisplayMode, PwaConfig};
use crate::output::{is_valid_archive_name, DEFAULT_ARCHIVE_NAME};
use crate::validate::{
    validate_pwa_color, validate_pwa_description, validate_pwa_name, ValidationError,
};

/// Default PWA theme and background color
pub const DEFAULT_PWA_COLOR: &str = "#ffffff";

/// Output placement section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output directory (current directory when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    /// Archive file name
    #[serde(default = "default_archive_name")]
    pub archive_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { dir: None, archive_name: default_archive_name() }
    }
}

fn default_archive_name() -> String {
    DEFAULT_ARCHIVE_NAME.to_string()
}

/// Generation defaults section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Extra categories generated on top of the baseline set
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Optimize the embedded SVG for vector sources
    #[serde(default = "default_true")]
    pub optimize_svg: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self { categories: Vec::new(), optimize_svg: true }
    }
}

fn default_true() -> bool {
    true
}

/// PWA section. Its presence enables PWA outputs by default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PwaSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl PwaSection {
    /// Build validated PWA metadata, filling display and color with defaults.
    ///
    /// Name and description have no default; a missing one fails like an empty one.
    pub fn to_pwa_config(&self) -> Result<PwaConfig, ValidationError> {
        PwaConfig::new(
            self.name.clone().unwrap_or_default(),
            self.description.clone().unwrap_or_default(),
            self.display.unwrap_or_default(),
            self.color.as_deref().unwrap_or(DEFAULT_PWA_COLOR),
        )
    }
}

/// Complete favpack.toml configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FavpackConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub generate: GenerateConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pwa: Option<PwaSection>,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "pwa.color")
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "favpack.toml: '{}' {}", self.field, self.message)
    }
}

impl ConfigValidationError {
    fn new(field: &str, message: impl std::fmt::Display) -> Self {
        Self { field: field.to_string(), message: message.to_string() }
    }
}

impl FavpackConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if !is_valid_archive_name(&self.output.archive_name) {
            errors.push(ConfigValidationError::new(
                "output.archive_name",
                "must be a file name ending in .zip",
            ));
        }

        if let Some(dir) = &self.output.dir {
            if dir.as_os_str().is_empty() {
                errors.push(ConfigValidationError::new("output.dir", "must not be empty"));
            }
        }

        // Name and description may come from the command line, so only
        // values that are present are checked here.
        if let Some(pwa) = &self.pwa {
            if let Some(name) = &pwa.name {
                if let Err(e) = validate_pwa_name(name) {
                    errors.push(ConfigValidationError::new("pwa.name", e));
                }
            }
            if let Some(description) = &pwa.description {
                if let Err(e) = validate_pwa_description(description) {
                    errors.push(ConfigValidationError::new("pwa.description", e));
                }
            }
            if let Some(color) = &pwa.color {
                if let Err(e) = validate_pwa_color(color) {
                    errors.push(ConfigValidationError::new("pwa.color", e));
                }
            }
        }

        errors
    }
}
