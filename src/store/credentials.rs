//! Typed access to the credential record

use super::{KeyValueStore, Record};
use crate::error::Result;
use crate::types::{AccessToken, CredentialRecord, ReadyCredentials};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Store key for the access token
pub const KEY_ACCESS_TOKEN: &str = "github_leetsync_token";
/// Store key for the owner login
pub const KEY_OWNER_LOGIN: &str = "github_username";
/// Store key for the selected repository
pub const KEY_REPOSITORY: &str = "github_leetsync_repo";
/// Store key for the target subdirectory
pub const KEY_SUBDIRECTORY: &str = "github_leetsync_subdirectory";

const CREDENTIAL_KEYS: [&str; 4] = [
    KEY_ACCESS_TOKEN,
    KEY_OWNER_LOGIN,
    KEY_REPOSITORY,
    KEY_SUBDIRECTORY,
];

/// Credential adapter over a [`KeyValueStore`]
///
/// Holds no state of its own: every read goes to the underlying store, so two
/// adapters over the same store always agree.
#[derive(Clone)]
pub struct CredentialStore {
    store: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    /// Wrap a key-value store
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Read the credential record; empty values count as absent
    pub async fn load(&self) -> Result<CredentialRecord> {
        let record = self.store.get(&CREDENTIAL_KEYS).await?;
        Ok(CredentialRecord {
            access_token: string_field(&record, KEY_ACCESS_TOKEN).map(AccessToken::new),
            owner_login: string_field(&record, KEY_OWNER_LOGIN),
            repository: string_field(&record, KEY_REPOSITORY),
            subdirectory: string_field(&record, KEY_SUBDIRECTORY),
        })
    }

    /// Load and require token, owner and repository
    pub async fn ready(&self) -> Result<ReadyCredentials> {
        self.load().await?.require_ready()
    }

    /// Persist a validated token and the login it belongs to
    pub async fn save_identity(&self, token: &AccessToken, login: &str) -> Result<()> {
        let mut items = Record::new();
        items.insert(
            KEY_ACCESS_TOKEN.to_string(),
            Value::String(token.expose().to_string()),
        );
        items.insert(KEY_OWNER_LOGIN.to_string(), Value::String(login.to_string()));
        self.store.set(items).await?;
        debug!(login, "stored GitHub identity");
        Ok(())
    }

    /// Persist the selected repository
    pub async fn save_repository(&self, name: &str) -> Result<()> {
        let mut items = Record::new();
        items.insert(KEY_REPOSITORY.to_string(), Value::String(name.to_string()));
        self.store.set(items).await?;
        debug!(repository = name, "stored repository selection");
        Ok(())
    }

    /// Persist the target subdirectory; `None` or blank removes it
    pub async fn save_subdirectory(&self, subdirectory: Option<&str>) -> Result<()> {
        match subdirectory.map(normalize_subdirectory).filter(|s| !s.is_empty()) {
            Some(dir) => {
                let mut items = Record::new();
                items.insert(KEY_SUBDIRECTORY.to_string(), Value::String(dir.clone()));
                self.store.set(items).await?;
                debug!(subdirectory = %dir, "stored subdirectory");
            }
            None => {
                self.store.remove(&[KEY_SUBDIRECTORY]).await?;
                debug!("cleared subdirectory");
            }
        }
        Ok(())
    }

    /// Remove every credential key, leaving the ledger untouched
    pub async fn clear(&self) -> Result<()> {
        self.store.remove(&CREDENTIAL_KEYS).await?;
        debug!("cleared stored credentials");
        Ok(())
    }
}

/// Strip whitespace and surrounding slashes from a repository subdirectory
pub(crate) fn normalize_subdirectory(dir: &str) -> String {
    dir.trim().trim_matches('/').to_string()
}

fn string_field(record: &Record, key: &str) -> Option<String> {
    record
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}
