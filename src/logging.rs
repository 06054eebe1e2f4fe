use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::KbError;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the crate logs at `info`, or `debug`
/// with `verbose`. Logs go to stderr so stdout stays clean for results.
pub fn setup_logging(verbose: bool) -> Result<(), KbError> {
    let default_directive = if verbose { "nfl_kb=debug" } else { "nfl_kb=info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(
            fmt::Layer::new()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(filter),
        )
        .try_init()
        .map_err(|e| KbError::LogSetup(e.to_string()))
}
