//! Tracing subscriber setup for the command line.
//!
//! Events go to stderr so JSON written to stdout stays machine-readable.
//! `NAVCLASS_LOG` takes `tracing` filter directives, for example
//! `NAVCLASS_LOG=navclass_core::merge=debug`.

use tracing_subscriber::EnvFilter;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "NAVCLASS_LOG";

/// Filter used when `NAVCLASS_LOG` is unset.
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "navclass=debug,navclass_core=debug"
    } else {
        "warn"
    }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
