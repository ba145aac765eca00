//! Core types for leetsync

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status code the upstream tracker uses for a fully accepted submission
pub const ACCEPTED_STATUS_CODE: i64 = 10;

/// Personal access token
///
/// `Debug` and `Display` never print the secret; call [`expose`](Self::expose)
/// when the raw value is needed for a request header.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw token, trimming surrounding whitespace
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into().trim().to_string())
    }

    /// Raw token value
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// True if the token is empty after trimming
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(****)")
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

/// Credentials persisted in the key-value store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialRecord {
    /// GitHub access token
    pub access_token: Option<AccessToken>,
    /// Login of the authenticated identity
    pub owner_login: Option<String>,
    /// Selected repository name
    pub repository: Option<String>,
    /// Optional directory inside the repository
    pub subdirectory: Option<String>,
}

impl CredentialRecord {
    /// True when token, owner and repository are all present
    pub const fn is_ready(&self) -> bool {
        self.access_token.is_some() && self.owner_login.is_some() && self.repository.is_some()
    }

    /// Require a token, ignoring owner and repository
    pub fn require_token(&self) -> Result<&AccessToken> {
        self.access_token
            .as_ref()
            .ok_or_else(|| Error::NotInitialized("no access token stored".to_string()))
    }

    /// Require an authenticated identity (token + owner)
    pub fn require_identity(&self) -> Result<(&AccessToken, &str)> {
        let token = self.require_token()?;
        let owner = self
            .owner_login
            .as_deref()
            .ok_or_else(|| Error::NotInitialized("no GitHub login stored".to_string()))?;
        Ok((token, owner))
    }

    /// Require full readiness and return the values needed for writes
    pub fn require_ready(&self) -> Result<ReadyCredentials> {
        let mut missing = Vec::new();
        if self.access_token.is_none() {
            missing.push("access token");
        }
        if self.owner_login.is_none() {
            missing.push("owner login");
        }
        if self.repository.is_none() {
            missing.push("repository");
        }

        match (&self.access_token, &self.owner_login, &self.repository) {
            (Some(token), Some(owner), Some(repository)) => Ok(ReadyCredentials {
                token: token.clone(),
                owner: owner.clone(),
                repository: repository.clone(),
                subdirectory: self.subdirectory.clone(),
            }),
            _ => Err(Error::NotInitialized(format!(
                "missing {}",
                missing.join(", ")
            ))),
        }
    }
}

/// Credentials that passed the readiness check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyCredentials {
    /// GitHub access token
    pub token: AccessToken,
    /// Repository owner login
    pub owner: String,
    /// Repository name
    pub repository: String,
    /// Optional directory inside the repository
    pub subdirectory: Option<String>,
}

/// Authenticated GitHub user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteIdentity {
    /// Numeric user id
    pub id: u64,
    /// Login name
    pub login: String,
    /// Profile page
    #[serde(rename = "html_url", default)]
    pub profile_url: String,
    /// Avatar image
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Repository as listed by the GitHub API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryDescriptor {
    /// Numeric repository id
    pub id: u64,
    /// Short name
    pub name: String,
    /// `owner/name`
    #[serde(default)]
    pub full_name: String,
    /// Private repository flag
    #[serde(rename = "private", default)]
    pub is_private: bool,
    /// Web URL
    #[serde(default)]
    pub html_url: String,
    /// Description, if any
    #[serde(default)]
    pub description: Option<String>,
    /// Fork flag
    #[serde(default)]
    pub fork: bool,
    /// Default branch
    #[serde(default)]
    pub default_branch: Option<String>,
    /// Last update timestamp (RFC 3339)
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Content version (blob sha) of a file in the remote repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionToken(pub String);

impl VersionToken {
    /// Raw sha string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Whether an upsert created a new file or updated an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    /// The path did not exist
    Created,
    /// The path existed and was written with its version token
    Updated,
}

impl fmt::Display for WriteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Updated => write!(f, "updated"),
        }
    }
}

/// Result of a component operation that can find nothing
///
/// Separates "the resource does not exist" from "the call failed", which a
/// plain `Option` cannot.
#[derive(Debug)]
pub enum Outcome<T> {
    /// Operation succeeded
    Success(T),
    /// Remote reported 404
    NotFound,
    /// Operation failed
    Failure(Error),
}

impl<T> Outcome<T> {
    /// Classify a result, mapping `Error::NotFound` to [`Outcome::NotFound`]
    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(e) if e.is_not_found() => Self::NotFound,
            Err(e) => Self::Failure(e),
        }
    }

    /// True for [`Outcome::Success`]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// True for [`Outcome::NotFound`]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// The success value, discarding the reason for absence
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::NotFound | Self::Failure(_) => None,
        }
    }

    /// The failure, if any
    pub const fn failure(&self) -> Option<&Error> {
        match self {
            Self::Failure(e) => Some(e),
            Self::Success(_) | Self::NotFound => None,
        }
    }

    /// Map the success value
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success(value) => Outcome::Success(f(value)),
            Self::NotFound => Outcome::NotFound,
            Self::Failure(e) => Outcome::Failure(e),
        }
    }
}

/// Problem difficulty
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    /// Easy
    Easy,
    /// Medium
    Medium,
    /// Hard
    Hard,
    /// Any other label, kept verbatim
    Other(String),
}

impl From<String> for Difficulty {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Easy" => Self::Easy,
            "Medium" => Self::Medium,
            "Hard" => Self::Hard,
            _ => Self::Other(label),
        }
    }
}

impl From<Difficulty> for String {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.to_string()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => write!(f, "Easy"),
            Self::Medium => write!(f, "Medium"),
            Self::Hard => write!(f, "Hard"),
            Self::Other(label) => write!(f, "{label}"),
        }
    }
}

/// Language descriptor attached to a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionLanguage {
    /// Human readable name, e.g. "Python3"
    pub verbose_name: String,
}

/// Runtime or memory measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    /// Raw value
    #[serde(default)]
    pub value: f64,
    /// Preformatted display string, e.g. "52 ms"
    #[serde(default)]
    pub display: String,
    /// Percentile beaten
    #[serde(default)]
    pub percentile: f64,
}

/// Problem the submission solves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Id shown on the website
    #[serde(default)]
    pub question_frontend_id: Option<String>,
    /// Internal id
    #[serde(default)]
    pub question_id: Option<String>,
    /// URL slug, e.g. "two-sum"
    pub title_slug: String,
    /// Display title
    pub title: String,
    /// Statement body (HTML)
    #[serde(default)]
    pub content: String,
    /// Difficulty label
    pub difficulty: Difficulty,
}

/// One solved-problem event from the upstream tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionEvent {
    /// Source code
    pub code: String,
    /// Language descriptor
    pub lang: SubmissionLanguage,
    /// Runtime measurement
    pub runtime: Metric,
    /// Memory measurement
    pub memory: Metric,
    /// Upstream judge status
    pub status_code: i64,
    /// Problem descriptor
    pub question: Question,
    /// Optional user notes
    #[serde(default)]
    pub notes: Option<String>,
}

impl SubmissionEvent {
    /// True when the judge fully accepted the solution
    pub const fn is_accepted(&self) -> bool {
        self.status_code == ACCEPTED_STATUS_CODE
    }

    /// Notes, if present and not blank
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref().filter(|n| !n.trim().is_empty())
    }
}

/// Ledger entry for one synced problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    /// Difficulty at sync time
    pub difficulty: Difficulty,
    /// Internal problem id
    pub question_id: Option<String>,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

/// Pointer to the most recently synced problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastSolved {
    /// Problem slug
    pub slug: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}
