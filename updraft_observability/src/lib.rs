//! Logging setup shared by the updraft binaries.

use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, Layer, prelude::*, registry::LookupSpan};

pub type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync>;

/// Install the process-wide tracing subscriber.
///
/// Filtering follows `RUST_LOG` (default `info`). Setting
/// `RUST_LOG_FORMAT=json` switches the human-readable output to one JSON
/// object per event. Call once, before the first invocation starts.
pub fn init_logging() {
    tracing_subscriber::registry().with(vec![stdout()]).init();
}

fn stdout<S>() -> BoxedLayer<S>
where
    S: Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    let log_env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json_fmt = std::env::var("RUST_LOG_FORMAT")
        .map(|val| val == "json")
        .unwrap_or(false);

    if json_fmt {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .json()
            .with_filter(log_env_filter)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_ansi(true)
            .with_filter(log_env_filter)
            .boxed()
    }
}
