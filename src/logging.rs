//! Diagnostic logging setup.
//!
//! Progress lines ("Extracting: ...", "Saved: ...") and parse warnings are
//! `tracing` events written to stderr. stdout is reserved for command
//! summaries.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `podcat=debug`.
pub const LOG_ENV: &str = "PODCAT_LOG";

/// Install the global subscriber. `verbose` raises the default level to
/// `debug`; an explicit `PODCAT_LOG` always wins.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}
