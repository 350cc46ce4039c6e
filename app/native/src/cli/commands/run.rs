//! `ribbon run`: one bar per active display.

use crate::error::RibbonError;

/// Execute `ribbon run`.
///
/// # Errors
///
/// Returns `RibbonError::PlatformError` when the window server is unavailable
/// or no display is active.
#[cfg(target_os = "macos")]
pub fn execute() -> Result<(), RibbonError> {
    crate::platform::skylight::run_bars(crate::config::get_config())
}

/// Execute `ribbon run`.
///
/// # Errors
///
/// Always fails: bars need the macOS window server.
#[cfg(not(target_os = "macos"))]
pub fn execute() -> Result<(), RibbonError> {
    Err(RibbonError::PlatformError("`ribbon run` is only supported on macOS".to_string()))
}
