//! Key-value persistence for credentials and sync state
//!
//! The engine only needs an async get/set/remove/clear capability over JSON
//! values. Two implementations ship with the crate:
//! - [`MemoryStore`] for tests and embedding
//! - [`FileStore`], a single JSON document on disk, used by the CLI

mod credentials;
mod file;
mod ledger;
mod memory;

pub use credentials::{
    CredentialStore, KEY_ACCESS_TOKEN, KEY_OWNER_LOGIN, KEY_REPOSITORY, KEY_SUBDIRECTORY,
};
pub(crate) use credentials::normalize_subdirectory;
pub use file::FileStore;
pub use ledger::{KEY_LAST_SOLVED, KEY_PROBLEMS_SOLVED, SyncLedger};
pub use memory::MemoryStore;

use crate::error::Result;
use async_trait::async_trait;

/// A set of key/value pairs read from or written to a store
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Asynchronous key-value store
///
/// Values are opaque to the store. A write must be durable before its future
/// resolves. Failures surface as `Error::Store` and are never retried here.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the given keys; absent keys are simply missing from the record
    async fn get(&self, keys: &[&str]) -> Result<Record>;

    /// Insert or overwrite every key in `items`
    async fn set(&self, items: Record) -> Result<()>;

    /// Delete the given keys; missing keys are ignored
    async fn remove(&self, keys: &[&str]) -> Result<()>;

    /// Delete everything
    async fn clear(&self) -> Result<()>;
}
