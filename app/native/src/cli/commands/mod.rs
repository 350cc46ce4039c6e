//! CLI command definitions using Clap.
//!
//! - `config` - configuration file commands
//! - `layout` - headless layout preview
//! - `run` - bars on the macOS window server

use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};

use crate::error::RibbonError;
use crate::{config, schema};

pub mod config_cmd;
pub mod layout;
pub mod run;

pub use config_cmd::ConfigCommands;
pub use layout::LayoutArgs;

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Ribbon CLI - per-display status bars.
#[derive(Parser, Debug)]
#[command(name = "ribbon")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a custom configuration file.
    ///
    /// Overrides the default configuration file search paths.
    /// Supports JSONC format (JSON with comments) and `~` expansion.
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// Preview the bar layout without a window server.
    ///
    /// Builds one bar on a simulated display from the configuration, runs a
    /// layout and draw pass and prints where every item was placed.
    #[command(after_long_help = r#"Examples:
  ribbon layout                          # 1440x900 display, bar 1, space 1
  ribbon layout --width 2560 --space 3   # Wider display, third space
  ribbon layout --display-index 2 --json # Second bar, JSON output"#)]
    Layout(LayoutArgs),

    /// Configuration file management commands.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Output Ribbon configuration JSON Schema.
    ///
    /// Outputs a JSON Schema to stdout that describes the structure of the
    /// Ribbon configuration file. Can be redirected to a file for use with
    /// editors that support JSON Schema validation.
    Schema,

    /// Generate shell completions.
    ///
    /// Usage:
    ///   eval "$(ribbon completions --shell zsh)"
    ///   ribbon completions --shell fish > ~/.config/fish/completions/ribbon.fish
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },

    /// Show one bar per active display (macOS only).
    ///
    /// Creates the bars on the window server, draws them once and keeps
    /// running until interrupted.
    Run,
}

impl Cli {
    /// Returns the custom config path if specified via --config flag.
    ///
    /// `~` is expanded and relative paths are resolved against the current
    /// directory.
    #[must_use]
    pub fn config_path(&self) -> Option<PathBuf> {
        let raw = self.config.as_deref()?;
        let cwd = std::env::current_dir().unwrap_or_default();
        config::resolve_config_path(raw, &cwd)
    }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command execution fails.
    pub fn execute(&self) -> Result<(), RibbonError> {
        if let Some(raw) = self.config.as_deref() {
            let path = self.config_path().ok_or_else(|| {
                RibbonError::InvalidArguments("--config needs a non-empty path".to_string())
            })?;
            if !path.exists() {
                return Err(RibbonError::ConfigError(format!(
                    "Configuration file not found: {raw}"
                )));
            }
            config::set_custom_config_path(path);
        }

        match &self.command {
            Commands::Layout(args) => layout::execute(args),
            Commands::Config(cmd) => config_cmd::execute(cmd),
            Commands::Schema => {
                println!("{}", schema::generate_schema_json());
                Ok(())
            }
            Commands::Completions { shell } => {
                Self::print_completions(*shell);
                Ok(())
            }
            Commands::Run => run::execute(),
        }
    }

    /// Print shell completions to stdout.
    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, "ribbon", &mut io::stdout());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_schema() {
        let cli = Cli::try_parse_from(["ribbon", "schema"]).unwrap();
        assert!(matches!(cli.command, Commands::Schema));
    }

    #[test]
    fn test_cli_parses_run() {
        let cli = Cli::try_parse_from(["ribbon", "run"]).unwrap();
        assert!(matches!(cli.command, Commands::Run));
    }

    #[test]
    fn test_cli_parses_completions_zsh() {
        let cli = Cli::try_parse_from(["ribbon", "completions", "--shell", "zsh"]).unwrap();
        match cli.command {
            Commands::Completions { shell } => assert_eq!(shell, Shell::Zsh),
            _ => panic!("Expected Completions command"),
        }
    }

    #[test]
    fn test_cli_parses_layout_defaults() {
        let cli = Cli::try_parse_from(["ribbon", "layout"]).unwrap();
        match cli.command {
            Commands::Layout(args) => {
                assert!((args.width - 1440.0).abs() < f64::EPSILON);
                assert!((args.height - 900.0).abs() < f64::EPSILON);
                assert_eq!(args.display_index, 1);
                assert_eq!(args.space, 1);
                assert!(!args.menu_bar);
                assert!(!args.json);
            }
            _ => panic!("Expected Layout command"),
        }
    }

    #[test]
    fn test_cli_parses_layout_options() {
        let cli = Cli::try_parse_from([
            "ribbon",
            "layout",
            "--width",
            "1000",
            "--display-index",
            "2",
            "--space",
            "4",
            "--menu-bar",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Layout(args) => {
                assert!((args.width - 1000.0).abs() < f64::EPSILON);
                assert_eq!(args.display_index, 2);
                assert_eq!(args.space, 4);
                assert!(args.menu_bar);
                assert!(args.json);
            }
            _ => panic!("Expected Layout command"),
        }
    }

    #[test]
    fn test_cli_parses_config_path() {
        let cli = Cli::try_parse_from(["ribbon", "config", "path"]).unwrap();
        assert!(matches!(cli.command, Commands::Config(ConfigCommands::Path)));
    }

    #[test]
    fn test_cli_parses_config_flag_after_subcommand() {
        let cli =
            Cli::try_parse_from(["ribbon", "layout", "--config", "/path/to/config.jsonc"]).unwrap();
        assert_eq!(cli.config, Some("/path/to/config.jsonc".to_string()));
        assert_eq!(cli.config_path(), Some(PathBuf::from("/path/to/config.jsonc")));
    }

    #[test]
    fn test_cli_config_path_returns_none_when_not_specified() {
        let cli = Cli::try_parse_from(["ribbon", "schema"]).unwrap();
        assert!(cli.config_path().is_none());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.jsonc");
        let cli = Cli::try_parse_from(["ribbon", "-c", missing.to_str().unwrap(), "schema"]).unwrap();

        let err = cli.execute().unwrap_err();
        assert!(matches!(err, RibbonError::ConfigError(_)));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_app_version_is_not_empty() {
        assert!(!APP_VERSION.is_empty());
    }
}
