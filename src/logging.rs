use std::io::{self, IsTerminal};
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable that overrides the level picked from the flags
pub const LOG_ENV: &str = "PARSEL_LOG";

/// Level directive used when `PARSEL_LOG` is not set
pub fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "parsel=trace"
    } else if quiet {
        "error"
    } else {
        "warn"
    }
}

/// Initialize diagnostics on stderr.
///
/// Warnings (unreadable inputs, unparseable lines) are shown by default;
/// `--verbose` adds the per-predicate trace, `--quiet` keeps only errors.
/// Stdout stays reserved for records.
pub fn init_logging(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    // A subscriber may already be set when called twice in one process
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();
}
