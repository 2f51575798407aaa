//! Remote content store contract: one JSON document, fetched and replaced
//! whole. The trait seam lets tests drive the engine with an in-memory
//! store.

use std::future::Future;

use serde_json::Value;

use crate::core::{errors::SyncResult, types::ContentDocument};

pub mod http;

pub use http::HttpContentStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    Stored { version: u64 },
    /// The remote document advanced past `expected_version` since our last
    /// load; the write was not applied.
    Conflict,
}

pub trait ContentStore: Send + Sync {
    /// Fetches the raw document. `Ok(None)` means the store is reachable but
    /// holds no document yet (first run). A malformed body is an error; the
    /// engine treats it the same as an unreachable store.
    fn get(&self, bust_cache: bool) -> impl Future<Output = SyncResult<Option<Value>>> + Send;

    /// Replaces the document, compare-and-swap style: the write only applies
    /// if the remote version still equals `expected_version`.
    fn put(
        &self,
        doc: &ContentDocument,
        expected_version: u64,
    ) -> impl Future<Output = SyncResult<PutOutcome>> + Send;
}
