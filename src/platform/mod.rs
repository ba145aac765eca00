//! Remote repository host API
//!
//! Wire-level operations against the GitHub REST API. The resolver and the
//! upsert engine only see the [`RemoteApi`] trait, so they can run against a
//! mock in tests.

mod github;

pub use github::{DEFAULT_API_URL, GitHubService};

use crate::error::Result;
use crate::types::{AccessToken, RemoteIdentity, RepositoryDescriptor, VersionToken};
use async_trait::async_trait;
use serde::Serialize;

/// Maximum page size accepted by the repository listing endpoint
pub const REPO_PAGE_SIZE: u8 = 100;

/// Body of `POST /user/repos`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRepository {
    /// Repository name
    pub name: String,
    /// Repository description
    pub description: String,
    /// Create as private
    pub private: bool,
    /// Create with an initial commit so contents can be written immediately
    pub auto_init: bool,
}

/// Body of `PUT /repos/{owner}/{repo}/contents/{path}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PutContent {
    /// Commit message
    pub message: String,
    /// Base64 encoded file content
    pub content: String,
    /// Current blob sha; required when updating an existing file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

/// GitHub REST operations used by the sync engine
///
/// Every call takes the token explicitly; implementations keep no
/// credential state. A 404 surfaces as `Error::NotFound` and a rejected token
/// as `Error::Auth`.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// `GET /user`
    async fn current_user(&self, token: &AccessToken) -> Result<RemoteIdentity>;

    /// `GET /user/repos`, most recently updated first
    async fn list_repositories(&self, token: &AccessToken) -> Result<Vec<RepositoryDescriptor>>;

    /// `POST /user/repos`
    async fn create_repository(
        &self,
        token: &AccessToken,
        repository: &NewRepository,
    ) -> Result<RepositoryDescriptor>;

    /// `GET /repos/{owner}/{name}`
    async fn get_repository(
        &self,
        token: &AccessToken,
        owner: &str,
        name: &str,
    ) -> Result<RepositoryDescriptor>;

    /// `GET /repos/{owner}/{repo}/contents/{path}`, returning the blob sha
    async fn content_version(
        &self,
        token: &AccessToken,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<VersionToken>;

    /// `PUT /repos/{owner}/{repo}/contents/{path}`
    async fn put_content(
        &self,
        token: &AccessToken,
        owner: &str,
        repo: &str,
        path: &str,
        body: &PutContent,
    ) -> Result<()>;
}
