//! Error types for Ribbon.
//!
//! The bar core itself has no recoverable errors; these types cover the outer
//! layers: configuration, the command line and the platform backends.

use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur during application execution.
///
/// Serializes as `{ "kind": ..., "message": ... }` so `--json` output can
/// report failures in a structured way.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum RibbonError {
    /// Invalid command arguments.
    #[error("{0}")]
    InvalidArguments(String),
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// IO error.
    #[error("IO error: {0}")]
    IoError(String),
    /// The platform cannot run bars (unsupported OS, no displays).
    #[error("Platform error: {0}")]
    PlatformError(String),
    /// Generic command error.
    #[error("{0}")]
    CommandError(String),
}

impl From<std::io::Error> for RibbonError {
    fn from(err: std::io::Error) -> Self { Self::IoError(err.to_string()) }
}

impl From<serde_json::Error> for RibbonError {
    fn from(err: serde_json::Error) -> Self { Self::CommandError(err.to_string()) }
}

impl From<ConfigError> for RibbonError {
    fn from(err: ConfigError) -> Self { Self::ConfigError(err.to_string()) }
}

impl From<String> for RibbonError {
    fn from(msg: String) -> Self { Self::CommandError(msg) }
}

impl From<&str> for RibbonError {
    fn from(msg: &str) -> Self { Self::CommandError(msg.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_arguments_display() {
        let err = RibbonError::InvalidArguments("width must be positive".to_string());
        assert_eq!(err.to_string(), "width must be positive");
    }

    #[test]
    fn test_config_error_conversion() {
        let err: RibbonError = ConfigError::NotFound.into();
        let msg = err.to_string();
        assert!(msg.starts_with("Configuration error"));
        assert!(msg.contains("no configuration file found"));
    }

    #[test]
    fn test_io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        let err: RibbonError = io_err.into();
        assert!(matches!(err, RibbonError::IoError(_)));
    }

    #[test]
    fn test_platform_error_display() {
        let err = RibbonError::PlatformError("no active displays".to_string());
        assert!(err.to_string().contains("Platform error"));
    }

    #[test]
    fn test_from_string() {
        let err: RibbonError = "test error".into();
        assert!(matches!(err, RibbonError::CommandError(_)));
    }

    #[test]
    fn test_error_serializes_with_kind() {
        let err = RibbonError::PlatformError("unsupported".to_string());
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("PlatformError"));
        assert!(json.contains("unsupported"));
    }
}
