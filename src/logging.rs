//! Logging setup
//!
//! Status messages go through `tracing` to stderr so stdout only carries the
//! match summary. `RUST_LOG` overrides the default `info` level; `--quiet`
//! pins the level to `warn`.

use std::io;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

/// Filter directive used when `RUST_LOG` is unset (or when quiet)
pub fn default_directive(quiet: bool) -> &'static str {
    if quiet {
        "warn"
    } else {
        "info"
    }
}

fn env_filter(quiet: bool) -> EnvFilter {
    if quiet {
        return EnvFilter::new(default_directive(true));
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(false)))
}

/// Installs the global subscriber
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init_logging(quiet: bool) -> Result<(), TryInitError> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter(quiet))
        .with(stderr_layer)
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(default_directive(false), "info");
        assert_eq!(default_directive(true), "warn");
    }

    #[test]
    fn test_quiet_filter_ignores_environment() {
        let filter = env_filter(true);
        assert_eq!(filter.to_string(), "warn");
    }

    #[test]
    fn test_second_init_fails() {
        let _ = init_logging(true);
        assert!(init_logging(true).is_err());
    }
}
