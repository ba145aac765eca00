//! Create-or-update of single files in the selected repository

use crate::error::Result;
use crate::platform::{PutContent, RemoteApi};
use crate::store::CredentialStore;
use crate::types::{Outcome, ReadyCredentials, VersionToken, WriteKind};
use base64::Engine;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Writes files through the contents API
///
/// Every write re-checks the remote version immediately before the `PUT`;
/// version tokens are never cached between calls. There are no retries.
#[derive(Clone)]
pub struct FileUpserter {
    api: Arc<dyn RemoteApi>,
    credentials: CredentialStore,
}

impl FileUpserter {
    /// Create an upserter
    pub fn new(api: Arc<dyn RemoteApi>, credentials: CredentialStore) -> Self {
        Self { api, credentials }
    }

    /// Current version of `path/file_name`
    ///
    /// `NotFound` when the file does not exist. Any other failure is logged
    /// and returned as `Failure`; callers deciding create-vs-update treat it
    /// like `NotFound`.
    pub async fn check_exists(&self, path: &str, file_name: &str) -> Outcome<VersionToken> {
        match self.credentials.ready().await {
            Ok(ready) => self.version_at(&ready, &join_path(path, file_name)).await,
            Err(e) => {
                warn!(error = %e, "cannot check file");
                Outcome::Failure(e)
            }
        }
    }

    /// Write `content` to `path/file_name`, creating or updating it
    pub async fn upsert(
        &self,
        path: &str,
        file_name: &str,
        content: &str,
        commit_message: &str,
    ) -> Result<WriteKind> {
        let ready = self.credentials.ready().await?;
        let full_path = join_path(path, file_name);

        let sha = self.version_at(&ready, &full_path).await.success();
        let kind = if sha.is_some() {
            WriteKind::Updated
        } else {
            WriteKind::Created
        };

        let body = PutContent {
            message: commit_message.to_string(),
            content: base64::engine::general_purpose::STANDARD.encode(content.as_bytes()),
            sha: sha.map(|token| token.0),
        };

        if let Err(e) = self
            .api
            .put_content(
                &ready.token,
                &ready.owner,
                &ready.repository,
                &full_path,
                &body,
            )
            .await
        {
            error!(path = %full_path, error = %e, "failed to upload file");
            return Err(e);
        }

        info!(path = %full_path, %kind, "uploaded file");
        Ok(kind)
    }

    async fn version_at(&self, ready: &ReadyCredentials, full_path: &str) -> Outcome<VersionToken> {
        let result = self
            .api
            .content_version(&ready.token, &ready.owner, &ready.repository, full_path)
            .await;

        let outcome = Outcome::from_result(result);
        match &outcome {
            Outcome::Success(sha) => debug!(path = full_path, sha = sha.as_str(), "file exists"),
            Outcome::NotFound => debug!(path = full_path, "file does not exist"),
            Outcome::Failure(e) => {
                warn!(path = full_path, error = %e, "existence check degraded, assuming absent");
            }
        }
        outcome
    }
}

/// Join a directory and file name with exactly one slash
pub fn join_path(path: &str, file_name: &str) -> String {
    let dir = path.trim_matches('/');
    if dir.is_empty() {
        file_name.to_string()
    } else {
        format!("{dir}/{file_name}")
    }
}
