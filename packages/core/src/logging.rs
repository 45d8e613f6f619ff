use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Watcher logs at `info`, dependencies (reqwest, hyper, html5ever) only
/// when they warn.
pub const DEFAULT_LOG_FILTER: &str = "warn,wbc_ticket_watch=info";

/// `RUST_LOG` if set and valid, otherwise [`DEFAULT_LOG_FILTER`].
pub fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Initialize logging for the watcher. Call once from main.rs, before
/// the first check run.
pub fn init_logging() {
    fmt()
        .with_env_filter(log_filter())
        .with_target(false)
        .compact()
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Logging initialized"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_parses_and_scopes_to_this_crate() {
        let filter = EnvFilter::try_new(DEFAULT_LOG_FILTER).unwrap();
        let rendered = filter.to_string();
        assert!(rendered.contains("wbc_ticket_watch=info"));
        assert!(rendered.contains("warn"));
    }
}
