//! Configuration loading and discovery for `favpack.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::{FavpackConfig, PwaSection};
use crate::catalog::Category;
use crate::models::DisplayMode;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "favpack.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// TOML parsing error
    #[error("Failed to parse favpack.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// Command-line values that override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub output_dir: Option<PathBuf>,
    /// Replaces the configured categories when present
    pub categories: Option<Vec<Category>>,
    pub optimize_svg: Option<bool>,
    pub archive_name: Option<String>,
    pub pwa_name: Option<String>,
    pub pwa_description: Option<String>,
    pub pwa_display: Option<DisplayMode>,
    pub pwa_color: Option<String>,
    /// Disable PWA outputs even if the config has a `[pwa]` table
    pub no_pwa: bool,
}

impl CliOverrides {
    fn has_pwa_fields(&self) -> bool {
        self.pwa_name.is_some()
            || self.pwa_description.is_some()
            || self.pwa_display.is_some()
            || self.pwa_color.is_some()
    }
}

/// Find favpack.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for favpack.toml
/// 2. Check XDG_CONFIG_HOME/favpack/favpack.toml (or ~/.config/favpack/favpack.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find favpack.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("favpack").join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find favpack.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.is_file() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a favpack.toml file.
///
/// If a path is provided, loads from that file (and fails if it is missing).
/// Otherwise uses [`find_config`]; when nothing is found the defaults apply.
pub fn load_config(path: Option<&Path>) -> Result<FavpackConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            tracing::debug!(path = %p.display(), "loading config");
            load_config_file(&p)
        }
        None => Ok(default_config()),
    }
}

fn load_config_file(path: &Path) -> Result<FavpackConfig, ConfigError> {
    let contents = fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    let config: FavpackConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Configuration used when no favpack.toml is found.
pub fn default_config() -> FavpackConfig {
    FavpackConfig::default()
}

/// Merge CLI overrides into a config. CLI values always win.
///
/// Any `--pwa-*` value enables the PWA section; `no_pwa` removes it.
pub fn merge_cli_overrides(config: &mut FavpackConfig, overrides: &CliOverrides) {
    if let Some(ref dir) = overrides.output_dir {
        config.output.dir = Some(dir.clone());
    }

    if let Some(ref categories) = overrides.categories {
        config.generate.categories = categories.clone();
    }

    if let Some(optimize_svg) = overrides.optimize_svg {
        config.generate.optimize_svg = optimize_svg;
    }

    if let Some(ref archive_name) = overrides.archive_name {
        config.output.archive_name = archive_name.clone();
    }

    if overrides.no_pwa {
        config.pwa = None;
        return;
    }

    if overrides.has_pwa_fields() {
        let pwa = config.pwa.get_or_insert_with(PwaSection::default);
        if let Some(ref name) = overrides.pwa_name {
            pwa.name = Some(name.clone());
        }
        if let Some(ref description) = overrides.pwa_description {
            pwa.description = Some(description.clone());
        }
        if let Some(display) = overrides.pwa_display {
            pwa.display = Some(display);
        }
        if let Some(ref color) = overrides.pwa_color {
            pwa.color = Some(color.clone());
        }
    }
}
