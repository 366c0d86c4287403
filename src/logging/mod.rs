//! Structured logging via the `tracing` crate.
//!
//! Initialization is idempotent so embedding hosts and tests can call it
//! freely; `RUST_LOG` overrides the default filter when set.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install the global subscriber with an `info` default filter.
pub fn init_tracing() {
    init_tracing_with("info");
}

/// Install the global subscriber, using `default_filter` when `RUST_LOG` is
/// unset. Later calls are no-ops.
pub fn init_tracing_with(default_filter: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    });
}
