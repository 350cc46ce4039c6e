//! Resolution of user-supplied configuration paths.

use std::path::{Path, PathBuf};

/// Resolves a `--config` argument to a file path.
///
/// A leading `~` is expanded to the home directory; relative paths are
/// resolved against `cwd`. Blank input yields `None`.
#[must_use]
pub fn resolve_config_path(raw: &str, cwd: &Path) -> Option<PathBuf> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let expanded = PathBuf::from(shellexpand::tilde(raw).as_ref());
    if expanded.is_absolute() {
        Some(expanded)
    } else {
        Some(cwd.join(expanded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CWD: &str = "/work/dir";

    #[test]
    fn blank_input_is_rejected() {
        assert_eq!(resolve_config_path("", Path::new(CWD)), None);
        assert_eq!(resolve_config_path("   ", Path::new(CWD)), None);
    }

    #[test]
    fn absolute_paths_are_kept() {
        let path = resolve_config_path("/etc/ribbon.jsonc", Path::new(CWD));
        assert_eq!(path, Some(PathBuf::from("/etc/ribbon.jsonc")));
    }

    #[test]
    fn relative_paths_resolve_against_cwd() {
        let path = resolve_config_path(" ribbon/config.jsonc ", Path::new(CWD));
        assert_eq!(path, Some(PathBuf::from("/work/dir/ribbon/config.jsonc")));
    }

    #[test]
    fn tilde_expands_to_home() {
        let path = resolve_config_path("~/.ribbon.jsonc", Path::new(CWD)).unwrap_or_default();
        let display = path.to_string_lossy();

        assert!(!display.starts_with('~'));
        assert!(!display.contains(CWD));
        assert!(display.ends_with(".ribbon.jsonc"));
    }
}
