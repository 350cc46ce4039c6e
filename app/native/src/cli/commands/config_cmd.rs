//! Config CLI commands.

use clap::Subcommand;
use colored::Colorize;

use crate::cli::output;
use crate::config::{self, config_paths};
use crate::error::RibbonError;

/// Config management commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum ConfigCommands {
    /// Show the configuration file search paths.
    ///
    /// Lists every location Ribbon looks at, in priority order, and marks
    /// the file currently in use.
    Path,

    /// Print the effective configuration as JSON.
    ///
    /// Defaults are filled in for every option missing from the file.
    Show,
}

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized.
pub fn execute(cmd: &ConfigCommands) -> Result<(), RibbonError> {
    match cmd {
        ConfigCommands::Path => {
            show_config_path();
            Ok(())
        }
        ConfigCommands::Show => {
            let value = serde_json::to_value(config::get_config())?;
            output::print_highlighted_json(&value);
            Ok(())
        }
    }
}

fn show_config_path() {
    // Loading records which file is active.
    config::get_config();

    if let Some(custom) = config::get_config_path().filter(|path| !config_paths().contains(*path)) {
        println!("Using {} {}\n", custom.display(), "(--config)".dimmed());
    }

    println!("Configuration file search paths (in priority order):\n");

    let mut found_config = false;
    for (index, path) in config_paths().iter().enumerate() {
        let marker = match (path.exists(), found_config) {
            (true, false) => {
                found_config = true;
                " (active)".green().to_string()
            }
            (true, true) => " (exists)".dimmed().to_string(),
            (false, _) => String::new(),
        };
        println!("  {}. {}{marker}", index + 1, path.display());
    }

    if !found_config {
        println!("\nNo configuration file found; defaults are used.");
        println!("Run 'ribbon schema' to get the schema for a new file.");
    }
}
