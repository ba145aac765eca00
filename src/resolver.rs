//! Identity validation and repository selection
//!
//! Every public call re-reads the credential record from the store, so a
//! resolver never acts on stale credentials written by another instance.

use crate::error::{Error, Result};
use crate::platform::{NewRepository, RemoteApi};
use crate::store::CredentialStore;
use crate::types::{AccessToken, Outcome, ReadyCredentials, RemoteIdentity, RepositoryDescriptor};
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::{debug, error, info, warn};

/// Characters GitHub accepts in a repository name
static RE_REPO_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").unwrap());

/// Default description for repositories created by the CLI
pub const DEFAULT_DESCRIPTION: &str = "My LeetCode solutions synchronized by LeetSync";

/// Validates tokens and manages the selected repository
pub struct RepositoryResolver {
    api: Arc<dyn RemoteApi>,
    credentials: CredentialStore,
}

impl RepositoryResolver {
    /// Create a resolver
    pub fn new(api: Arc<dyn RemoteApi>, credentials: CredentialStore) -> Self {
        Self { api, credentials }
    }

    /// Underlying credential store
    pub const fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Check a token against `GET /user` and persist it with its login
    ///
    /// `Outcome::Failure(Error::Auth(_))` means the token was rejected; any
    /// other failure is transport, API or store trouble.
    pub async fn validate_credential(&self, token: &str) -> Outcome<RemoteIdentity> {
        let token = AccessToken::new(token);
        if token.is_empty() {
            return Outcome::Failure(Error::InvalidArgument(
                "access token is empty".to_string(),
            ));
        }

        let identity = match self.api.current_user(&token).await {
            Ok(identity) => identity,
            Err(e) => {
                warn!(error = %e, "token validation failed");
                return Outcome::Failure(e);
            }
        };

        if let Err(e) = self.credentials.save_identity(&token, &identity.login).await {
            error!(error = %e, "failed to persist validated credential");
            return Outcome::Failure(e);
        }

        info!(login = %identity.login, "GitHub user authenticated");
        Outcome::Success(identity)
    }

    /// Repositories of the authenticated user, most recently updated first
    ///
    /// Requires full readiness (token, owner and selected repository).
    /// Discovery degrades to an empty list on any failure.
    pub async fn list_repositories(&self) -> Vec<RepositoryDescriptor> {
        match self.credentials.ready().await {
            Ok(ready) => self.fetch_repositories(&ready.token).await,
            Err(e) => {
                warn!(error = %e, "cannot list repositories");
                Vec::new()
            }
        }
    }

    /// Repositories a signed-in user can select from
    ///
    /// Only needs the token and owner login, so it works before the first
    /// repository is chosen. Degrades to an empty list like
    /// [`list_repositories`](Self::list_repositories).
    pub async fn list_selectable_repositories(&self) -> Vec<RepositoryDescriptor> {
        let record = match self.credentials.load().await {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "cannot list repositories");
                return Vec::new();
            }
        };
        match record.require_identity() {
            Ok((token, _)) => self.fetch_repositories(token).await,
            Err(e) => {
                warn!(error = %e, "cannot list repositories");
                Vec::new()
            }
        }
    }

    async fn fetch_repositories(&self, token: &AccessToken) -> Vec<RepositoryDescriptor> {
        match self.api.list_repositories(token).await {
            Ok(repos) => repos,
            Err(e) => {
                warn!(error = %e, "failed to list repositories");
                Vec::new()
            }
        }
    }

    /// Create a repository (initialized with a commit) and select it
    pub async fn create_repository(
        &self,
        name: &str,
        description: &str,
        private: bool,
    ) -> Outcome<RepositoryDescriptor> {
        let name = match normalize_repository_name(name) {
            Ok(name) => name,
            Err(e) => return Outcome::Failure(e),
        };
        let record = match self.credentials.load().await {
            Ok(record) => record,
            Err(e) => return Outcome::Failure(e),
        };
        let token = match record.require_token() {
            Ok(token) => token,
            Err(e) => return Outcome::Failure(e),
        };

        let request = NewRepository {
            name,
            description: description.to_string(),
            private,
            auto_init: true,
        };
        let repo = match self.api.create_repository(token, &request).await {
            Ok(repo) => repo,
            Err(e) => {
                error!(name = %request.name, error = %e, "failed to create repository");
                return Outcome::Failure(e);
            }
        };

        if let Err(e) = self.credentials.save_repository(&repo.name).await {
            error!(error = %e, "failed to persist created repository");
            return Outcome::Failure(e);
        }

        info!(repository = %repo.name, "repository created and selected");
        Outcome::Success(repo)
    }

    /// Select an existing repository owned by the authenticated user
    pub async fn select_repository(&self, name: &str) -> Outcome<RepositoryDescriptor> {
        let name = match normalize_repository_name(name) {
            Ok(name) => name,
            Err(e) => return Outcome::Failure(e),
        };
        let record = match self.credentials.load().await {
            Ok(record) => record,
            Err(e) => return Outcome::Failure(e),
        };
        let (token, owner) = match record.require_identity() {
            Ok(identity) => identity,
            Err(e) => return Outcome::Failure(e),
        };

        let repo = match self.api.get_repository(token, owner, &name).await {
            Ok(repo) => repo,
            Err(e) if e.is_not_found() => {
                info!(owner, name = %name, "repository not found");
                return Outcome::NotFound;
            }
            Err(e) => {
                error!(owner, name = %name, error = %e, "unexpected error checking repository");
                return Outcome::Failure(e);
            }
        };

        if let Err(e) = self.credentials.save_repository(&name).await {
            error!(error = %e, "failed to persist repository selection");
            return Outcome::Failure(e);
        }

        info!(repository = %name, "repository selected");
        Outcome::Success(repo)
    }

    /// Readiness check: token, owner and repository must all be stored
    pub async fn readiness(&self) -> Result<ReadyCredentials> {
        let ready = self.credentials.ready().await?;
        debug!(owner = %ready.owner, repository = %ready.repository, "credentials ready");
        Ok(ready)
    }

    /// Set or clear the directory submissions are written under
    pub async fn set_subdirectory(&self, subdirectory: Option<&str>) -> Result<()> {
        self.credentials.save_subdirectory(subdirectory).await
    }

    /// Forget the stored token, login, repository and subdirectory
    pub async fn sign_out(&self) -> Result<()> {
        self.credentials.clear().await?;
        info!("signed out");
        Ok(())
    }
}

/// Trim whitespace and a trailing `.git`, then check GitHub's naming rules
pub fn normalize_repository_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed).trim();

    if trimmed.is_empty() {
        return Err(Error::InvalidArgument(
            "repository name is empty".to_string(),
        ));
    }
    if !RE_REPO_NAME.is_match(trimmed) {
        return Err(Error::InvalidArgument(format!(
            "invalid repository name: {trimmed}"
        )));
    }
    Ok(trimmed.to_string())
}
