//! GitHub token discovery

use crate::auth::AuthSource;
use crate::error::{Error, Result};
use crate::types::AccessToken;
use std::env;
use tokio::process::Command;
use tracing::debug;

/// Environment variables checked for a token, in order
const TOKEN_ENV_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// A discovered GitHub token
#[derive(Debug, Clone)]
pub struct GitHubAuthConfig {
    /// Authentication token
    pub token: AccessToken,
    /// Where the token was obtained from
    pub source: AuthSource,
}

/// Find a GitHub token without prompting
///
/// Priority:
/// 1. `GITHUB_TOKEN` environment variable
/// 2. `GH_TOKEN` environment variable
/// 3. `gh auth token`
pub async fn get_github_auth() -> Result<GitHubAuthConfig> {
    for var in TOKEN_ENV_VARS {
        debug!(var, "checking env var");
        if let Some(token) = env::var(var)
            .ok()
            .map(AccessToken::new)
            .filter(|t| !t.is_empty())
        {
            debug!(var, "obtained GitHub token from env var");
            return Ok(GitHubAuthConfig {
                token,
                source: AuthSource::EnvVar,
            });
        }
    }

    debug!("environment variables not found, attempting gh CLI");
    if let Some(token) = get_gh_cli_token().await {
        debug!("obtained GitHub token from gh CLI");
        return Ok(GitHubAuthConfig {
            token: AccessToken::new(token),
            source: AuthSource::Cli,
        });
    }

    debug!("no GitHub authentication found");
    Err(Error::Auth(
        "No GitHub token found. Pass --token, set GITHUB_TOKEN, or run `gh auth login`"
            .to_string(),
    ))
}

async fn get_gh_cli_token() -> Option<String> {
    let output = Command::new("gh")
        .args(["auth", "token"])
        .output()
        .await
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() { None } else { Some(token) }
}
