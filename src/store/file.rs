//! JSON file backed key-value store

use super::{KeyValueStore, Record};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

/// Key-value store persisted as one JSON object on disk
///
/// Each write rewrites the whole document through a temp file and a rename,
/// so a crash never leaves a half-written state file behind.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Open (lazily) the store at `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Record> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Record::new()),
            Err(e) => {
                return Err(Error::Store(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )));
            }
        };

        if raw.trim().is_empty() {
            return Ok(Record::new());
        }

        serde_json::from_str(&raw).map_err(|e| {
            Error::Store(format!("corrupt state file {}: {e}", self.path.display()))
        })
    }

    async fn write_all(&self, data: &Record) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::Store(format!("failed to create {}: {e}", parent.display())))?;
        }

        let body = serde_json::to_vec_pretty(data)
            .map_err(|e| Error::Store(format!("failed to encode state: {e}")))?;

        let tmp = self.path.with_extension("json.tmp");
        match tokio::fs::remove_file(&tmp).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(Error::Store(format!(
                    "failed to remove stale {}: {e}",
                    tmp.display()
                )));
            }
        }

        // The document holds the access token; it is private from creation
        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        options.mode(0o600);

        let write_err =
            |e: std::io::Error| Error::Store(format!("failed to write {}: {e}", tmp.display()));
        let mut file = options.open(&tmp).await.map_err(write_err)?;
        file.write_all(&body).await.map_err(write_err)?;
        file.sync_all().await.map_err(write_err)?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| Error::Store(format!("failed to replace {}: {e}", self.path.display())))?;

        debug!(path = %self.path.display(), keys = data.len(), "wrote state file");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, keys: &[&str]) -> Result<Record> {
        let _guard = self.lock.lock().await;
        let data = self.read_all().await?;
        Ok(keys
            .iter()
            .filter_map(|k| data.get(*k).map(|v| ((*k).to_string(), v.clone())))
            .collect())
    }

    async fn set(&self, items: Record) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut data = self.read_all().await?;
        data.extend(items);
        self.write_all(&data).await
    }

    async fn remove(&self, keys: &[&str]) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut data = self.read_all().await?;
        for key in keys {
            data.remove(*key);
        }
        self.write_all(&data).await
    }

    async fn clear(&self) -> Result<()> {
        let _guard = self.lock.lock().await;
        self.write_all(&Record::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("state.json"));
        assert!(store.get(&["anything"]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let store = FileStore::new(&path);
        let mut items = Record::new();
        items.insert("github_username".into(), json!("octocat"));
        store.set(items).await.unwrap();

        let reopened = FileStore::new(&path);
        let got = reopened.get(&["github_username"]).await.unwrap();
        assert_eq!(got["github_username"], json!("octocat"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_set_merges_existing_keys() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("state.json"));

        let mut first = Record::new();
        first.insert("a".into(), json!(1));
        store.set(first).await.unwrap();
        let mut second = Record::new();
        second.insert("b".into(), json!(2));
        store.set(second).await.unwrap();

        let got = store.get(&["a", "b"]).await.unwrap();
        assert_eq!(got.len(), 2);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_store_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        let err = store.get(&["a"]).await.unwrap_err();
        assert!(matches!(err, Error::Store(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_state_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        let store = FileStore::new(&path);
        store.set(Record::new()).await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stale_temp_file_is_not_reused() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, "stale").unwrap();
        std::fs::set_permissions(&tmp, std::fs::Permissions::from_mode(0o644)).unwrap();

        let store = FileStore::new(&path);
        let mut items = Record::new();
        items.insert("github_leetsync_token".into(), json!("ghp_secret"));
        store.set(items).await.unwrap();

        assert!(!tmp.exists());
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.get(&["github_leetsync_token"]).await.unwrap().len(), 1);
    }
}
