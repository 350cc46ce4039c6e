//! CLI module for Ribbon.
//!
//! Every command runs in-process: `layout` previews bars on the headless
//! backend, `run` drives the real window server on macOS.

mod commands;
mod output;

use clap::Parser;
pub use commands::Cli;
pub use commands::layout::{LayoutArgs, LayoutReport, PlacedItem, preview};

use crate::error::RibbonError;

/// Runs the CLI.
///
/// Parses command-line arguments and executes the appropriate command.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run() -> Result<(), RibbonError> {
    let cli = Cli::parse();
    cli.execute()
}
