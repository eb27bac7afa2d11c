//! Diagnostic logging setup
//!
//! Logs go to stderr so they never mix with analysis output on stdout.

use crate::cli::Verbosity;
use tracing_subscriber::EnvFilter;

/// Filter directive used when `RUST_LOG` is not set
pub fn default_filter(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => "warn",
        Verbosity::Verbose => "healthbuddy=info,warn",
        Verbosity::VeryVerbose => "healthbuddy=debug,info",
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbosity: Verbosity) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity))),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
