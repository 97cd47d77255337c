//! Logging initialisation.
//!
//! Standard `tracing` + `tracing-subscriber` setup: human-readable output,
//! level controlled by `RUST_LOG` (defaults to `info` when unset).

use tracing_subscriber::filter::{EnvFilter, LevelFilter};

pub fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
