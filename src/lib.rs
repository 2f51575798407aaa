//! Offline-tolerant content synchronization for a small hospitality site:
//! one JSON document as the system of record on a remote store, a SQLite
//! snapshot cache on the device, debounced write-backs, shape migration for
//! older documents, and a media existence checker with a cleanup pass.

pub mod config;
pub mod content;
pub mod core;
pub mod db;
pub mod media;
pub mod security;
pub mod store;

pub use crate::config::{EngineConfig, LoadStrategy};
pub use crate::content::{migrate, ContentEngine};
pub use crate::core::errors::{SyncError, SyncResult};
pub use crate::core::types::{ContentDocument, PersistOutcome, SyncStatus};
pub use crate::db::Database;
pub use crate::store::{ContentStore, HttpContentStore, PutOutcome};

fn sqlx_debug_enabled() -> bool {
    matches!(
        std::env::var("INNKEEP_SQLX_DEBUG")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Installs the global tracing subscriber. The `INNKEEP_LOG` environment
/// variable takes an `EnvFilter` directive (`info` when unset); sqlx query
/// logging stays at warn unless `INNKEEP_SQLX_DEBUG` asks for it.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let directives = std::env::var("INNKEEP_LOG").unwrap_or_else(|_| "info".to_string());
    let mut filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"));
    if !sqlx_debug_enabled() {
        filter = filter.add_directive(
            "sqlx::query=warn"
                .parse()
                .expect("static directive parses"),
        );
    }
    fmt().with_env_filter(filter).init();
}
