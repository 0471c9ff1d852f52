//! Diagnostic logging setup.
//!
//! Logs go to stderr so that `gitdraw export` can stream instructions on
//! stdout. The filter comes from `GITDRAW_LOG`, then `RUST_LOG`, and
//! defaults to warnings only.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Environment variable with the preferred log filter.
pub const LOG_ENV: &str = "GITDRAW_LOG";

const DEFAULT_FILTER: &str = "warn";

static INIT: Once = Once::new();

/// Installs the global subscriber. Later calls are no-ops.
pub fn init() {
    INIT.call_once(|| {
        let filter = filter_from(
            std::env::var(LOG_ENV).ok().or_else(|| std::env::var("RUST_LOG").ok()).as_deref(),
        );
        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
        if installed.is_err() {
            // Another subscriber (e.g. a test harness) already owns the slot.
            tracing::debug!("tracing subscriber already installed");
        }
    });
}

fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_default_filter() {
        assert_eq!(filter_from(None).to_string(), DEFAULT_FILTER);
        assert_eq!(filter_from(Some("gitdraw=loudest")).to_string(), DEFAULT_FILTER);
    }

    #[test]
    fn accepts_custom_directives() {
        assert_eq!(filter_from(Some("gitdraw=debug")).to_string(), "gitdraw=debug");
    }

    #[test]
    fn init_is_idempotent() {
        init();
        init();
    }
}
