//! Configuration module for Ribbon.
//!
//! This module provides the configuration types and the process-wide
//! configuration instance, loaded once on first use.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.

mod path;
pub mod types;

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub use path::resolve_config_path;
pub use types::{
    BackgroundStyle, BarPlacement, BarStyle, ColorParseError, ConfigError, ItemConfig, Rgba,
    RibbonConfig, config_paths, load_config as load_config_default, load_config_from_path,
    mask_from_indices, parse_color, parse_config, parse_hex_color,
};

/// Global configuration instance, loaded once at startup.
static CONFIG: OnceLock<RibbonConfig> = OnceLock::new();

/// Path to the currently loaded configuration file.
static CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Custom config path override (set via CLI --config flag).
static CUSTOM_CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Sets a custom configuration file path to use instead of the default search paths.
///
/// This must be called before the first `get_config()` to take effect.
///
/// Returns `false` if a path was already set.
pub fn set_custom_config_path(path: PathBuf) -> bool { CUSTOM_CONFIG_PATH.set(path).is_ok() }

/// Loads the configuration from `custom` or from the default search paths.
///
/// A missing file yields the defaults silently; an unreadable or invalid
/// file yields the defaults with a warning.
#[must_use]
pub fn load_or_default_from(custom: Option<&Path>) -> (RibbonConfig, Option<PathBuf>) {
    let result = custom.map_or_else(load_config_default, load_config_from_path);

    match result {
        Ok((config, path)) => (config, Some(path)),
        Err(ConfigError::NotFound) => {
            if let Some(path) = custom {
                tracing::warn!(path = %path.display(), "configuration file not found, using defaults");
            } else {
                tracing::debug!("no configuration file found, using defaults");
            }
            (RibbonConfig::default(), None)
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to load configuration, using defaults");
            (RibbonConfig::default(), None)
        }
    }
}

fn load_or_default() -> RibbonConfig {
    let (config, path) = load_or_default_from(CUSTOM_CONFIG_PATH.get().map(PathBuf::as_path));
    if let Some(path) = path {
        let _ = CONFIG_PATH.set(path);
    }
    config
}

/// Returns the global configuration instance, loading it on first use.
///
/// Every call returns the same instance.
pub fn get_config() -> &'static RibbonConfig { CONFIG.get_or_init(load_or_default) }

/// Returns the path to the loaded configuration file, if any.
pub fn get_config_path() -> Option<&'static PathBuf> { CONFIG_PATH.get() }

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_custom_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, path) = load_or_default_from(Some(&dir.path().join("nope.jsonc")));

        assert!(config.items.is_empty());
        assert!(path.is_none());
    }

    #[test]
    fn invalid_custom_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ \"bar\": [ }}").unwrap();

        let (config, path) = load_or_default_from(Some(file.path()));

        assert_eq!(config.bar.background.height, 32);
        assert!(path.is_none());
    }

    #[test]
    fn custom_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "items": [ {{ "name": "a" }}, {{ "name": "b" }} ] }}"#).unwrap();

        let (config, path) = load_or_default_from(Some(file.path()));

        assert_eq!(config.items.len(), 2);
        assert_eq!(path.as_deref(), Some(file.path()));
    }

    #[test]
    fn config_error_message() {
        let msg = ConfigError::NotFound.to_string();
        assert!(msg.contains("no configuration file found"));
    }
}
