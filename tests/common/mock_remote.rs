//! In-memory GitHub double and a store that fails on demand

#![allow(dead_code)]

use async_trait::async_trait;
use leetsync::error::{Error, Result};
use leetsync::platform::{NewRepository, PutContent, RemoteApi};
use leetsync::store::{KeyValueStore, MemoryStore, Record};
use leetsync::types::{AccessToken, RemoteIdentity, RepositoryDescriptor, VersionToken};
use std::collections::HashMap;
use std::sync::Mutex;

/// A call made against [`MockRemote`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    /// `GET /user`
    CurrentUser,
    /// `GET /user/repos`
    ListRepositories,
    /// `POST /user/repos`
    CreateRepository(NewRepository),
    /// `GET /repos/{owner}/{name}`
    GetRepository { owner: String, name: String },
    /// `GET .../contents/{path}`
    ContentVersion { repo: String, path: String },
    /// `PUT .../contents/{path}`
    PutContent { repo: String, path: String, body: PutContent },
}

/// Remote API double keeping files in memory
///
/// Files get a sha of the form `sha-<n>`; a `PUT` without the current sha on an
/// existing file is rejected with 422, as GitHub does.
#[derive(Default)]
pub struct MockRemote {
    calls: Mutex<Vec<RemoteCall>>,
    files: Mutex<HashMap<String, (String, String)>>,
    identity: Mutex<Option<RemoteIdentity>>,
    repositories: Mutex<Vec<RepositoryDescriptor>>,
    fail_put_suffix: Mutex<Option<String>>,
    fail_version_checks: Mutex<bool>,
    fail_listing: Mutex<bool>,
    next_sha: Mutex<u32>,
}

impl MockRemote {
    /// Empty remote that rejects every token
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept tokens as `identity`
    #[must_use]
    pub fn with_identity(self, identity: RemoteIdentity) -> Self {
        *self.identity.lock().unwrap() = Some(identity);
        self
    }

    /// Add repositories owned by the user
    #[must_use]
    pub fn with_repositories(self, repos: Vec<RepositoryDescriptor>) -> Self {
        *self.repositories.lock().unwrap() = repos;
        self
    }

    /// Make `PUT` fail for paths ending in `suffix`
    pub fn fail_put_for(&self, suffix: &str) {
        *self.fail_put_suffix.lock().unwrap() = Some(suffix.to_string());
    }

    /// Make every existence check fail with a 500
    pub fn fail_version_checks(&self) {
        *self.fail_version_checks.lock().unwrap() = true;
    }

    /// Make repository listing fail with a 500
    pub fn fail_listing(&self) {
        *self.fail_listing.lock().unwrap() = true;
    }

    /// Seed an existing file
    pub fn insert_file(&self, path: &str, content: &str) -> String {
        let sha = self.allocate_sha();
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), (sha.clone(), content.to_string()));
        sha
    }

    /// Every call made so far
    pub fn calls(&self) -> Vec<RemoteCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Only the `PUT` calls, as `(path, body)`
    pub fn puts(&self) -> Vec<(String, PutContent)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RemoteCall::PutContent { path, body, .. } => Some((path, body)),
                _ => None,
            })
            .collect()
    }

    /// Paths currently stored
    pub fn file_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.files.lock().unwrap().keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Current sha of a stored file
    pub fn sha_of(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(path).map(|(sha, _)| sha.clone())
    }

    fn record(&self, call: RemoteCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn allocate_sha(&self) -> String {
        let mut next = self.next_sha.lock().unwrap();
        *next += 1;
        format!("sha-{next}")
    }

    fn check_token(&self, token: &AccessToken) -> Result<RemoteIdentity> {
        match self.identity.lock().unwrap().clone() {
            Some(identity) if !token.is_empty() => Ok(identity),
            _ => Err(Error::Auth("Bad credentials".to_string())),
        }
    }
}

#[async_trait]
impl RemoteApi for MockRemote {
    async fn current_user(&self, token: &AccessToken) -> Result<RemoteIdentity> {
        self.record(RemoteCall::CurrentUser);
        self.check_token(token)
    }

    async fn list_repositories(&self, token: &AccessToken) -> Result<Vec<RepositoryDescriptor>> {
        self.record(RemoteCall::ListRepositories);
        self.check_token(token)?;
        if *self.fail_listing.lock().unwrap() {
            return Err(Error::GitHubApi {
                status: 500,
                message: "repositories: server error".to_string(),
            });
        }
        Ok(self.repositories.lock().unwrap().clone())
    }

    async fn create_repository(
        &self,
        token: &AccessToken,
        repository: &NewRepository,
    ) -> Result<RepositoryDescriptor> {
        self.record(RemoteCall::CreateRepository(repository.clone()));
        let identity = self.check_token(token)?;
        let mut repos = self.repositories.lock().unwrap();
        if repos.iter().any(|r| r.name == repository.name) {
            return Err(Error::GitHubApi {
                status: 422,
                message: "name already exists on this account".to_string(),
            });
        }
        let repo = RepositoryDescriptor {
            id: 1000 + repos.len() as u64,
            name: repository.name.clone(),
            full_name: format!("{}/{}", identity.login, repository.name),
            is_private: repository.private,
            html_url: format!("https://github.com/{}/{}", identity.login, repository.name),
            description: Some(repository.description.clone()),
            fork: false,
            default_branch: Some("main".to_string()),
            updated_at: None,
        };
        repos.push(repo.clone());
        Ok(repo)
    }

    async fn get_repository(
        &self,
        token: &AccessToken,
        owner: &str,
        name: &str,
    ) -> Result<RepositoryDescriptor> {
        self.record(RemoteCall::GetRepository {
            owner: owner.to_string(),
            name: name.to_string(),
        });
        self.check_token(token)?;
        self.repositories
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.name == name)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("{owner}/{name}")))
    }

    async fn content_version(
        &self,
        token: &AccessToken,
        _owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<VersionToken> {
        self.record(RemoteCall::ContentVersion {
            repo: repo.to_string(),
            path: path.to_string(),
        });
        self.check_token(token)?;
        if *self.fail_version_checks.lock().unwrap() {
            return Err(Error::GitHubApi {
                status: 500,
                message: format!("{path}: server error"),
            });
        }
        self.files
            .lock()
            .unwrap()
            .get(path)
            .map(|(sha, _)| VersionToken(sha.clone()))
            .ok_or_else(|| Error::NotFound(path.to_string()))
    }

    async fn put_content(
        &self,
        token: &AccessToken,
        _owner: &str,
        repo: &str,
        path: &str,
        body: &PutContent,
    ) -> Result<()> {
        self.record(RemoteCall::PutContent {
            repo: repo.to_string(),
            path: path.to_string(),
            body: body.clone(),
        });
        self.check_token(token)?;

        let failing = self.fail_put_suffix.lock().unwrap().clone();
        if failing.is_some_and(|suffix| path.ends_with(&suffix)) {
            return Err(Error::GitHubApi {
                status: 500,
                message: format!("{path}: server error"),
            });
        }

        let current = self.sha_of(path);
        if current.is_some() && current != body.sha {
            return Err(Error::GitHubApi {
                status: 422,
                message: format!("{path}: \"sha\" wasn't supplied"),
            });
        }

        let sha = self.allocate_sha();
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), (sha, body.content.clone()));
        Ok(())
    }
}

/// Store whose writes fail once a given key is part of the write
pub struct FailingStore {
    inner: MemoryStore,
    fail_on_key: String,
}

impl FailingStore {
    /// Wrap `inner`, failing any `set` that touches `key`
    pub fn new(inner: MemoryStore, key: &str) -> Self {
        Self {
            inner,
            fail_on_key: key.to_string(),
        }
    }

    /// Copy of everything successfully stored
    pub async fn snapshot(&self) -> Record {
        self.inner.snapshot().await
    }
}

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, keys: &[&str]) -> Result<Record> {
        self.inner.get(keys).await
    }

    async fn set(&self, items: Record) -> Result<()> {
        if items.contains_key(&self.fail_on_key) {
            return Err(Error::Store("quota exceeded".to_string()));
        }
        self.inner.set(items).await
    }

    async fn remove(&self, keys: &[&str]) -> Result<()> {
        self.inner.remove(keys).await
    }

    async fn clear(&self) -> Result<()> {
        self.inner.clear().await
    }
}
