//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Initialize the secvul tracing/logging system.
///
/// Reads the `SECVUL_LOG` environment variable for per-crate log levels.
/// Format: `SECVUL_LOG=secvul_storage=debug,secvul_extract=info`
///
/// Falls back to `secvul=info` (`secvul=debug` when `verbose`) if `SECVUL_LOG`
/// is not set or is invalid. Logs go to stderr so stdout stays free for data.
///
/// Calling it more than once is a no-op.
pub fn init_tracing(verbose: bool, json: bool) {
    INIT.call_once(|| {
        let fallback = if verbose { "secvul=debug" } else { "secvul=info" };
        let filter =
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(fallback));

        let registry = tracing_subscriber::registry().with(filter);
        if json {
            registry
                .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
                .init();
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_line_number(verbose)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}
