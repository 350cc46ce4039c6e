//! Ribbon - per-display status bars.
//!
//! The binary is a thin wrapper around the CLI in `ribbon_lib`.

fn main() {
    ribbon_lib::logging::init();

    if let Err(err) = ribbon_lib::cli::run() {
        eprintln!("ribbon: {err}");
        std::process::exit(1);
    }
}
