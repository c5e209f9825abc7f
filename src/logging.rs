//! Diagnostic output via `tracing`.
//!
//! All events go to stderr so that a palette run never mixes log lines into
//! anything written to stdout.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "info"
    }
}

/// Initialize the global subscriber. `RUST_LOG` takes precedence over `debug`.
pub fn init_logging(debug: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(debug)
        .with_level(true)
        .without_time();

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init();
}
