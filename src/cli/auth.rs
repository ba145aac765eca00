//! Auth commands - log in, show status, log out

use crate::cli::Context;
use crate::cli::style::{Stylize, check, cross, link, spinner_style};
use anstream::println;
use dialoguer::Password;
use indicatif::ProgressBar;
use leetsync::auth::{AuthSource, GitHubAuthConfig, get_github_auth};
use leetsync::error::{Error, Result};
use leetsync::types::{AccessToken, Outcome};
use std::io::IsTerminal;
use std::time::Duration;

/// Validate a token and store it with the login it belongs to
pub async fn run_auth_login(ctx: &Context, token: Option<String>) -> Result<()> {
    let auth = resolve_token(token).await?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message("Validating GitHub token...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let resolver = ctx.resolver();
    let outcome = resolver.validate_credential(auth.token.expose()).await;
    spinner.finish_and_clear();

    let identity = match outcome {
        Outcome::Success(identity) => identity,
        Outcome::Failure(e) if e.is_auth() => {
            println!("{} GitHub rejected the token", cross());
            return Err(e);
        }
        Outcome::Failure(e) => {
            println!("{} Could not validate the token (network or API problem)", cross());
            return Err(e);
        }
        Outcome::NotFound => {
            return Err(Error::Auth("GitHub returned no user for this token".to_string()));
        }
    };

    println!(
        "{} Authenticated as: {}",
        check(),
        link(&identity.login, &identity.profile_url).accent()
    );
    println!("  {} {}", "Token source:".muted(), auth.source);

    let record = resolver.credentials().load().await?;
    match record.repository {
        Some(repo) => println!("  {} {}", "Repository:".muted(), repo.accent()),
        None => println!(
            "  {}",
            "Next: run `leetsync repo select` or `leetsync repo create <name>`".muted()
        ),
    }
    Ok(())
}

/// Show the stored identity and readiness
pub async fn run_auth_status(ctx: &Context) -> Result<()> {
    let record = ctx.credentials().load().await?;

    let Some(login) = record.owner_login.as_deref() else {
        println!("{} Not logged in", cross());
        println!("  {}", "Run `leetsync auth login`".muted());
        return Ok(());
    };

    println!("{} Logged in as: {}", check(), login.accent());
    println!(
        "  {} {}",
        "Repository:".muted(),
        record.repository.as_deref().unwrap_or("(none selected)")
    );
    if let Some(dir) = record.subdirectory.as_deref() {
        println!("  {} {}", "Subdirectory:".muted(), dir);
    }
    if record.is_ready() {
        println!("  {}", "Ready to sync".muted());
    } else {
        println!("  {}", "Not ready: select a repository first".warn());
    }
    Ok(())
}

/// Forget stored credentials; the sync ledger is kept
pub async fn run_auth_logout(ctx: &Context) -> Result<()> {
    ctx.resolver().sign_out().await?;
    println!("{} Logged out", check());
    Ok(())
}

/// Token from the flag, the environment, `gh`, or an interactive prompt
async fn resolve_token(token: Option<String>) -> Result<GitHubAuthConfig> {
    if let Some(token) = token {
        return Ok(GitHubAuthConfig {
            token: AccessToken::new(token),
            source: AuthSource::Argument,
        });
    }

    match get_github_auth().await {
        Ok(auth) => Ok(auth),
        Err(e) if !std::io::stdin().is_terminal() => Err(e),
        Err(_) => {
            println!(
                "Create a token with {} scope at {}",
                "repo".emphasis(),
                "https://github.com/settings/tokens".accent()
            );
            let token = Password::new()
                .with_prompt("GitHub personal access token")
                .interact()
                .map_err(|e| Error::InvalidArgument(format!("Failed to read token: {e}")))?;
            Ok(GitHubAuthConfig {
                token: AccessToken::new(token),
                source: AuthSource::Prompt,
            })
        }
    }
}
