//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins when set. Otherwise the level is `info`, or `debug` with
//! `--verbose`. Logs go to stderr so command output on stdout stays parseable.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn default_directive(verbose: bool) -> &'static str {
    if verbose { "folio=debug,info" } else { "info" }
}

pub fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

/// Install the global subscriber. Calling it twice is harmless; the second
/// call is ignored.
pub fn init_tracing(verbose: bool, json: bool) {
    let filter = env_filter(verbose);
    let result = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init()
    };
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "info");
        assert!(default_directive(true).contains("folio=debug"));
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init_tracing(false, false);
        init_tracing(true, true);
    }
}
