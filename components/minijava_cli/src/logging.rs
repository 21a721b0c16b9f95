//! Log output setup for the binary

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when neither `-v` nor `RUST_LOG` is given.
pub const DEFAULT_FILTER: &str = "warn";

/// Level directive for a `-v` count, if it overrides the environment.
pub fn verbosity_filter(verbosity: u8) -> Option<&'static str> {
    match verbosity {
        0 => None,
        1 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Install a stderr subscriber. Later calls are ignored.
pub fn init_logging(verbosity: u8) {
    let filter = match verbosity_filter(verbosity) {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}
