//! Logging setup for binaries built on the catalog.
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is left to the process that owns `main`.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Guards subscriber installation
static INIT: Once = Once::new();

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON structured logs
    Json,
    /// Human-readable logs
    #[default]
    Pretty,
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` controls the filter; without it `default_directive` is used
/// (for example `info` or `shelf_catalog=debug`). Safe to call more than
/// once; later calls do nothing.
pub fn init_logging(format: LogFormat, default_directive: &str) {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive));

        match format {
            LogFormat::Json => {
                tracing_subscriber::registry().with(env_filter).with(fmt::layer().json()).init();
            }
            LogFormat::Pretty => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().with_target(false).compact())
                    .init();
            }
        }
    });
}
