//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// `level` is an `EnvFilter` directive such as `info` or
/// `tinyurl=debug,tower_http=info`; an unparsable directive falls back to
/// `info`. `format` is `json` for one JSON object per line, anything else
/// gives the human-readable formatter.
pub fn init_tracing(level: &str, format: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    if format == "json" {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
