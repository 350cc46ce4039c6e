//! Logging setup.
//!
//! Logs go to stderr so that `--json` output on stdout stays parseable.
//! `RIBBON_LOG` takes an `EnvFilter` directive, e.g. `RIBBON_LOG=ribbon_lib=debug`.

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "RIBBON_LOG";

/// Filter used when `RIBBON_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "ribbon=info,ribbon_lib=info";

/// Builds the filter from `RIBBON_LOG`, falling back to [`DEFAULT_FILTER`].
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber.
///
/// Does nothing when a subscriber is already installed.
pub fn init() {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    let _ = tracing_subscriber::registry().with(env_filter()).with(stderr_layer).try_init();
}
