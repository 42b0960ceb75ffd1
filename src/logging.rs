//! Tracing subscriber setup for binaries and demos.
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the application. [`init`] installs a plain fmt subscriber filtered by
//! `RUST_LOG` (default `info`).

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: OnceCell<()> = OnceCell::new();

/// Installs the global subscriber. Later calls are no-ops, and an already
/// installed subscriber is left in place.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(false))
            .with(filter)
            .try_init();
    });
}
