use tracing_subscriber::{fmt, EnvFilter};

/// Resolve the log filter: `RUST_LOG` wins, then `LOG_LEVEL`, then `default_level`.
fn resolve_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env("RUST_LOG")
        .or_else(|_| EnvFilter::try_from_env("LOG_LEVEL"))
        .unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Initialize the tracing subscriber with env-based filtering.
///
/// Logs go to stderr so the chart path printed on success stays clean on stdout.
/// A second call is a no-op.
pub fn init_tracing(default_level: &str) {
    let _ = fmt()
        .with_env_filter(resolve_filter(default_level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
