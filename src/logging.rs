//! Logging setup
//!
//! Log lines go to stderr so they never mix with the stdout of the tools the
//! pipeline runs. The filter comes from `BOOTSTRAP_LOG` (`EnvFilter` syntax),
//! falling back to `warn`, or `debug` with `--verbose`.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "BOOTSTRAP_LOG";

/// Default filter directive for the given verbosity
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

/// Install the global subscriber
pub fn init(verbose: bool) {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // A second initialisation (as in tests) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_level(true)
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}
