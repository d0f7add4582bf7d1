use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber. Logs go to stderr so the trace printed on
/// stdout stays machine readable. `RUST_LOG` overrides the level.
pub fn init(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init()
}
