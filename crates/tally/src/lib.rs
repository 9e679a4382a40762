//! tally
//!
//! Umbrella crate: re-exports the domain, engine, storage, and config
//! layers, and hosts the CLI presentation layer.

pub mod cli;

pub use tally_config::{Config, ConfigManager, Theme};
pub use tally_core::{CoreError, LedgerEngine, MemoryStore, StateStore, SummaryService};
pub use tally_domain as domain;
pub use tally_storage_json::FileStore;

use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the tracing subscriber once per process. Safe to call from
/// tests and the binary alike.
pub fn init() {
    INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    });
}
