//! In-memory key-value store

use super::{KeyValueStore, Record};
use crate::error::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Key-value store held in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<Record>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `data`
    pub fn with_data(data: Record) -> Self {
        Self {
            data: Mutex::new(data),
        }
    }

    /// Copy of everything currently stored
    pub async fn snapshot(&self) -> Record {
        self.data.lock().await.clone()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, keys: &[&str]) -> Result<Record> {
        let data = self.data.lock().await;
        Ok(keys
            .iter()
            .filter_map(|k| data.get(*k).map(|v| ((*k).to_string(), v.clone())))
            .collect())
    }

    async fn set(&self, items: Record) -> Result<()> {
        self.data.lock().await.extend(items);
        Ok(())
    }

    async fn remove(&self, keys: &[&str]) -> Result<()> {
        let mut data = self.data.lock().await;
        for key in keys {
            data.remove(*key);
        }
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.data.lock().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_returns_only_present_keys() {
        let store = MemoryStore::new();
        let mut items = Record::new();
        items.insert("a".into(), json!(1));
        store.set(items).await.unwrap();

        let got = store.get(&["a", "b"]).await.unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got["a"], json!(1));
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let mut data = Record::new();
        data.insert("a".into(), json!("x"));
        data.insert("b".into(), json!("y"));
        let store = MemoryStore::with_data(data);

        store.remove(&["a", "missing"]).await.unwrap();
        assert_eq!(store.snapshot().await.len(), 1);

        store.clear().await.unwrap();
        assert!(store.snapshot().await.is_empty());
    }
}
