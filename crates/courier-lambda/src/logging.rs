//! Logging setup
//!
//! Structured JSON lines on stdout, which the Lambda platform forwards to
//! CloudWatch. The filter comes from `RUST_LOG` and defaults to `info`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const DEFAULT_LOG_LEVEL: &str = "info";

pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(true)
                .with_ansi(false),
        )
        .with(filter)
        .init();
}
