//! Diagnostics on stderr via tracing
//!
//! `RUST_LOG` wins when set; otherwise the level follows --quiet/--verbose.

use tracing_subscriber::EnvFilter;

/// Level used when RUST_LOG is unset
pub fn default_level(quiet: bool, verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    }
}

/// Install the global subscriber; later calls are no-ops
pub fn init(quiet: bool, verbose: bool, color: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(quiet, verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(color)
        .with_target(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(false, false), "warn");
        assert_eq!(default_level(true, false), "error");
        assert_eq!(default_level(false, true), "debug");
        assert_eq!(default_level(true, true), "debug");
    }
}
