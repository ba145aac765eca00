//! Local record of synced problems

use super::{KeyValueStore, Record};
use crate::error::{Error, Result};
use crate::types::{LastSolved, LedgerEntry};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Store key for the slug -> entry mapping
pub const KEY_PROBLEMS_SOLVED: &str = "problemsSolved";
/// Store key for the most recent sync
pub const KEY_LAST_SOLVED: &str = "lastSolved";

/// Sync ledger over a [`KeyValueStore`]
#[derive(Clone)]
pub struct SyncLedger {
    store: Arc<dyn KeyValueStore>,
}

impl SyncLedger {
    /// Wrap a key-value store
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// All recorded problems keyed by slug
    pub async fn entries(&self) -> Result<BTreeMap<String, LedgerEntry>> {
        let record = self.store.get(&[KEY_PROBLEMS_SOLVED]).await?;
        match record.get(KEY_PROBLEMS_SOLVED) {
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|e| Error::Store(format!("corrupt {KEY_PROBLEMS_SOLVED}: {e}"))),
            None => Ok(BTreeMap::new()),
        }
    }

    /// The most recently synced problem, if any
    pub async fn last_solved(&self) -> Result<Option<LastSolved>> {
        let record = self.store.get(&[KEY_LAST_SOLVED]).await?;
        record
            .get(KEY_LAST_SOLVED)
            .map(|value| {
                serde_json::from_value(value.clone())
                    .map_err(|e| Error::Store(format!("corrupt {KEY_LAST_SOLVED}: {e}")))
            })
            .transpose()
    }

    /// Merge `entry` under `slug` and move the last-solved pointer to it
    ///
    /// Other slugs are preserved; an existing entry for `slug` is overwritten.
    pub async fn record(&self, slug: &str, entry: LedgerEntry) -> Result<()> {
        let mut entries = self.entries().await?;
        let last = LastSolved {
            slug: slug.to_string(),
            timestamp: entry.timestamp,
        };
        entries.insert(slug.to_string(), entry);

        let mut items = Record::new();
        items.insert(KEY_LAST_SOLVED.to_string(), serde_json::to_value(&last)?);
        items.insert(
            KEY_PROBLEMS_SOLVED.to_string(),
            serde_json::to_value(&entries)?,
        );
        self.store.set(items).await?;

        debug!(slug, total = entries.len(), "recorded ledger entry");
        Ok(())
    }
}
