//! Media reference auditing: collect every URL the document points at,
//! probe the locally-hosted ones for existence, and prune the dead ones.

use std::future::Future;

use crate::core::errors::SyncResult;

pub mod checker;
pub mod cleanup;
pub mod probe;

pub use probe::{FsProbe, HttpProbe};

/// Answers whether a locally-hosted URL resolves to a real file. `Ok(false)`
/// is a definitive miss; `Err` is a probe failure, which the checker also
/// counts as missing.
pub trait ExistenceProbe: Send + Sync {
    fn exists(&self, url: &str) -> impl Future<Output = SyncResult<bool>> + Send;
}
