//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::{NewRepository, PutContent, REPO_PAGE_SIZE, RemoteApi};
use crate::types::{AccessToken, RemoteIdentity, RepositoryDescriptor, VersionToken};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Public GitHub API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Longest response body kept in an error message
const MAX_ERROR_BODY: usize = 300;

#[derive(Deserialize)]
struct ContentMetadata {
    sha: String,
}

/// GitHub service using reqwest
pub struct GitHubService {
    client: Client,
    base_url: String,
}

impl GitHubService {
    /// Create a service for `base_url` (e.g. `https://api.github.com`)
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("invalid API url '{base_url}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "API url must be http(s), got: {base_url}"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("leetsync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Service for the public GitHub API with the default timeout
    pub fn github() -> Result<Self> {
        Self::new(DEFAULT_API_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, token: &AccessToken) -> RequestBuilder {
        self.client
            .request(method, format!("{}{path}", self.base_url))
            .header(AUTHORIZATION, format!("token {}", token.expose()))
            .header(ACCEPT, "application/vnd.github+json")
    }

    fn contents_path(owner: &str, repo: &str, path: &str) -> String {
        let encoded: Vec<_> = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!(
            "/repos/{}/{}/contents/{}",
            urlencoding::encode(owner),
            urlencoding::encode(repo),
            encoded.join("/")
        )
    }
}

/// Map a non-success response onto the error taxonomy
async fn check_status(response: Response, what: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let mut message: String = body.chars().take(MAX_ERROR_BODY).collect();
    if message.is_empty() {
        message = status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_string();
    }

    match status {
        StatusCode::NOT_FOUND => Err(Error::NotFound(what.to_string())),
        StatusCode::UNAUTHORIZED => Err(Error::Auth(format!("{what}: {message}"))),
        _ => Err(Error::GitHubApi {
            status: status.as_u16(),
            message: format!("{what}: {message}"),
        }),
    }
}

#[async_trait]
impl RemoteApi for GitHubService {
    async fn current_user(&self, token: &AccessToken) -> Result<RemoteIdentity> {
        debug!("fetching authenticated user");
        let response = self.request(Method::GET, "/user", token).send().await?;
        let user: RemoteIdentity = check_status(response, "user").await?.json().await?;
        debug!(login = %user.login, "fetched authenticated user");
        Ok(user)
    }

    async fn list_repositories(&self, token: &AccessToken) -> Result<Vec<RepositoryDescriptor>> {
        debug!("listing repositories");
        let response = self
            .request(Method::GET, "/user/repos", token)
            .query(&[
                ("sort", "updated".to_string()),
                ("per_page", REPO_PAGE_SIZE.to_string()),
            ])
            .send()
            .await?;
        let repos: Vec<RepositoryDescriptor> =
            check_status(response, "repositories").await?.json().await?;
        debug!(count = repos.len(), "listed repositories");
        Ok(repos)
    }

    async fn create_repository(
        &self,
        token: &AccessToken,
        repository: &NewRepository,
    ) -> Result<RepositoryDescriptor> {
        debug!(name = %repository.name, private = repository.private, "creating repository");
        let response = self
            .request(Method::POST, "/user/repos", token)
            .json(repository)
            .send()
            .await?;
        let repo: RepositoryDescriptor = check_status(response, &repository.name)
            .await?
            .json()
            .await?;
        debug!(full_name = %repo.full_name, "created repository");
        Ok(repo)
    }

    async fn get_repository(
        &self,
        token: &AccessToken,
        owner: &str,
        name: &str,
    ) -> Result<RepositoryDescriptor> {
        debug!(owner, name, "fetching repository");
        let path = format!(
            "/repos/{}/{}",
            urlencoding::encode(owner),
            urlencoding::encode(name)
        );
        let response = self.request(Method::GET, &path, token).send().await?;
        let repo = check_status(response, &format!("{owner}/{name}"))
            .await?
            .json()
            .await?;
        Ok(repo)
    }

    async fn content_version(
        &self,
        token: &AccessToken,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<VersionToken> {
        debug!(path, "checking content version");
        let response = self
            .request(Method::GET, &Self::contents_path(owner, repo, path), token)
            .send()
            .await?;
        let metadata: ContentMetadata = check_status(response, path).await?.json().await?;
        debug!(path, sha = %metadata.sha, "found existing content");
        Ok(VersionToken(metadata.sha))
    }

    async fn put_content(
        &self,
        token: &AccessToken,
        owner: &str,
        repo: &str,
        path: &str,
        body: &PutContent,
    ) -> Result<()> {
        debug!(path, update = body.sha.is_some(), "writing content");
        let response = self
            .request(Method::PUT, &Self::contents_path(owner, repo, path), token)
            .json(body)
            .send()
            .await?;
        check_status(response, path).await?;
        debug!(path, "wrote content");
        Ok(())
    }
}
