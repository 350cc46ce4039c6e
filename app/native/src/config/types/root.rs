//! Root configuration and file loading.

use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::bar::BarStyle;
use super::items::ItemConfig;

/// Root configuration for Ribbon.
///
/// Every field is optional; a missing configuration file yields the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RibbonConfig {
    /// Optional JSON schema reference for editor support.
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Style shared by every bar.
    pub bar: BarStyle,

    /// Items in layout order.
    ///
    /// Left and center items are placed left to right, right items right to
    /// left starting at the right edge.
    pub items: Vec<ItemConfig>,
}

/// Errors that can occur when loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    #[error(
        "no configuration file found; expected ~/.config/ribbon/config.jsonc or ~/.ribbon.jsonc"
    )]
    NotFound,

    /// The configuration file exists but could not be read.
    #[error("failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// The configuration file contains invalid JSON.
    #[error("failed to parse configuration file: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Configuration file names to search for (in priority order).
const CONFIG_FILE_NAMES: &[&str] = &["config.jsonc", "config.json"];

/// Configuration file names in the home directory.
const HOME_CONFIG_FILE_NAMES: &[&str] = &[".ribbon.jsonc", ".ribbon.json"];

/// Returns the possible configuration file paths in priority order.
///
/// 1. `$XDG_CONFIG_HOME/ribbon/config.jsonc` or `config.json`, when set
/// 2. `~/.config/ribbon/config.jsonc` or `config.json`
/// 3. the platform configuration directory, e.g.
///    `~/Library/Application Support/ribbon/` on macOS
/// 4. `~/.ribbon.jsonc` or `~/.ribbon.json`
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    fn push_dir(dir: &Path, paths: &mut Vec<PathBuf>) {
        for filename in CONFIG_FILE_NAMES {
            let path = dir.join(filename);
            // XDG_CONFIG_HOME may well be ~/.config
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }

    let mut paths = Vec::new();

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        push_dir(&PathBuf::from(xdg_config).join("ribbon"), &mut paths);
    }

    if let Some(home) = dirs::home_dir() {
        push_dir(&home.join(".config").join("ribbon"), &mut paths);
    }

    if let Some(config_dir) = dirs::config_dir() {
        push_dir(&config_dir.join("ribbon"), &mut paths);
    }

    if let Some(home) = dirs::home_dir() {
        for filename in HOME_CONFIG_FILE_NAMES {
            paths.push(home.join(filename));
        }
    }

    paths
}

/// Parses a JSONC document.
///
/// # Errors
///
/// Returns `ConfigError::ParseError` if the document is not valid JSON once
/// comments are stripped.
pub fn parse_config(source: &str) -> Result<RibbonConfig, ConfigError> {
    let reader = json_comments::StripComments::new(source.as_bytes());
    Ok(serde_json::from_reader(reader)?)
}

/// Loads the configuration from a specific file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the file does not exist,
/// `ConfigError::IoError` if it cannot be read and
/// `ConfigError::ParseError` if it is not valid JSONC.
pub fn load_config_from_path(path: &Path) -> Result<(RibbonConfig, PathBuf), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound);
    }
    let config = read_config(path)?;
    Ok((config, path.to_path_buf()))
}

/// Loads the configuration from the first available config file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if no configuration file exists in any of
/// the expected locations, or the errors of [`load_config_from_path`].
pub fn load_config() -> Result<(RibbonConfig, PathBuf), ConfigError> {
    config_paths()
        .into_iter()
        .find(|path| path.exists())
        .map_or(Err(ConfigError::NotFound), |path| load_config_from_path(&path))
}

fn read_config(path: &Path) -> Result<RibbonConfig, ConfigError> {
    let file = fs::File::open(path)?;
    let reader = json_comments::StripComments::new(file);
    let config = serde_json::from_reader(reader)?;
    tracing::debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::config::BarPlacement;
    use crate::items::Position;

    #[test]
    fn default_config_has_no_items() {
        let config = RibbonConfig::default();
        assert!(config.items.is_empty());
        assert_eq!(config.bar.position, BarPlacement::Top);
    }

    #[test]
    fn parse_strips_comments() {
        let config = parse_config(
            r#"{
                // bar style
                "bar": { "position": "bottom", "margin": 6 },
                /* items */
                "items": [
                    { "name": "clock", "position": "right", "length": 60 },
                    { "name": "spaces", "spaceIndicator": true }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.bar.position, BarPlacement::Bottom);
        assert_eq!(config.bar.margin, 6);
        assert_eq!(config.items.len(), 2);
        assert_eq!(config.items[0].position, Position::Right);
        assert!(config.items[1].space_indicator);
    }

    #[test]
    fn parse_error_keeps_source() {
        let err = parse_config("{ \"bar\": ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn load_from_path_reads_jsonc_file() {
        let mut file = tempfile::Builder::new().suffix(".jsonc").tempfile().unwrap();
        writeln!(file, "// comment\n{{ \"bar\": {{ \"blurRadius\": 12 }} }}").unwrap();

        let (config, path) = load_config_from_path(file.path()).unwrap();

        assert_eq!(config.bar.blur_radius, 12);
        assert_eq!(path, file.path());
    }

    #[test]
    fn load_from_missing_path_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from_path(&dir.path().join("missing.jsonc")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound));
    }

    #[test]
    fn config_paths_end_with_home_files() {
        let paths = config_paths();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(paths.last(), Some(&home.join(".ribbon.json")));
        }
        assert!(paths.iter().all(|path| path.to_string_lossy().contains("ribbon")));
    }
}
