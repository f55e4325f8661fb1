//! Exporter configuration.
//!
//! Settings are read from `json-pages.toml` in the project directory. Every
//! key is optional; the file is merged over the stock defaults and the result
//! is validated:
//!
//! ```toml
//! per_page = 10                       # Posts per pagination page (>= 1)
//! content_root = "source"             # Generated-content root
//! pagination_dir = "json/pagination"  # Relative to content_root
//! post_dir = "json/post"              # Relative to content_root
//! file_naming = "all-separators"      # or "first-slash"
//! pretty = false                      # Pretty-print JSON output
//! atomic = false                      # Stage output, then swap into place
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::naming::FileNaming;
use crate::paginate::DEFAULT_PER_PAGE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Name of the config file looked up in the project directory.
pub const CONFIG_FILE: &str = "json-pages.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Everything the exporter needs besides the posts themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Posts per pagination page.
    pub per_page: usize,
    /// Root of the generated content, usually the host's source directory.
    pub content_root: PathBuf,
    /// Pagination output directory, relative to `content_root`.
    pub pagination_dir: PathBuf,
    /// Post detail output directory, relative to `content_root`.
    pub post_dir: PathBuf,
    /// How post paths become filenames.
    pub file_naming: FileNaming,
    /// Indent JSON output.
    pub pretty: bool,
    /// Write into staging directories and swap them in on success.
    pub atomic: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            content_root: PathBuf::from("source"),
            pagination_dir: PathBuf::from("json/pagination"),
            post_dir: PathBuf::from("json/post"),
            file_naming: FileNaming::default(),
            pretty: false,
            atomic: false,
        }
    }
}

impl ExportConfig {
    /// Where pagination pages are written.
    pub fn pagination_output_dir(&self) -> PathBuf {
        self.content_root.join(&self.pagination_dir)
    }

    /// Where post detail files are written.
    pub fn post_output_dir(&self) -> PathBuf {
        self.content_root.join(&self.post_dir)
    }

    /// Resolve a relative `content_root` against `project_dir`.
    pub fn rooted_at(mut self, project_dir: &Path) -> Self {
        self.content_root = project_dir.join(&self.content_root);
        self
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.per_page == 0 {
            return Err(ConfigError::Validation(
                "per_page must be at least 1".into(),
            ));
        }
        self.validate_output_dirs()
    }

    /// Check the two output directories can be reset independently.
    ///
    /// Both are wiped on every export, so neither may be the content root
    /// itself and neither may contain the other. Only plain path segments are
    /// allowed, which keeps the containment check purely lexical.
    pub fn validate_output_dirs(&self) -> Result<(), ConfigError> {
        for (key, dir) in [
            ("pagination_dir", &self.pagination_dir),
            ("post_dir", &self.post_dir),
        ] {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
            if dir.is_absolute() {
                return Err(ConfigError::Validation(format!(
                    "{key} must be relative to content_root"
                )));
            }
            if !dir.components().all(|c| matches!(c, Component::Normal(_))) {
                return Err(ConfigError::Validation(format!(
                    "{key} must not contain `.` or `..` segments: {}",
                    dir.display()
                )));
            }
        }
        if self.pagination_dir.starts_with(&self.post_dir)
            || self.post_dir.starts_with(&self.pagination_dir)
        {
            return Err(ConfigError::Validation(
                "pagination_dir and post_dir must not overlap".into(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(ExportConfig::default())?)
}

/// Merge `overlay` on top of `base`: keys set in the user's file replace the
/// stock value, all others keep it.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            base_table.extend(overlay_table);
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read `json-pages.toml` from `dir`, or `None` when the project has none.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Apply the user's keys to the defaults, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ExportConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ExportConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Stock defaults overridden by the project's `json-pages.toml`.
///
/// Paths stay as written; see [`ExportConfig::rooted_at`].
pub fn load_config(dir: &Path) -> Result<ExportConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `json-pages.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# json-pages configuration
# ========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Posts per pagination page. Must be at least 1.
per_page = 10

# Root of the generated content, relative to the project directory.
content_root = "source"

# Output directories, relative to content_root. Both are emptied on
# every export, so they must not overlap.
pagination_dir = "json/pagination"
post_dir = "json/post"

# How a post's `path` becomes its filename:
#   "all-separators"  every / and \ becomes _   (2021/03/hi -> 2021_03_hi.json)
#   "first-slash"     only the first / becomes _, the rest nest directories
file_naming = "all-separators"

# Indent the JSON output.
pretty = false

# Write each directory to a hidden staging sibling and swap it into place
# only after every file was written.
atomic = false
"##
}
