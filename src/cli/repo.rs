//! Repository commands - list, create, select, subdirectory

use crate::cli::Context;
use crate::cli::style::{Stylize, check, cross, link, spinner_style};
use anstream::println;
use dialoguer::Select;
use indicatif::ProgressBar;
use leetsync::error::{Error, Result};
use leetsync::types::{Outcome, RepositoryDescriptor};
use std::time::Duration;

fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

fn visibility(repo: &RepositoryDescriptor) -> &'static str {
    if repo.is_private { "Private" } else { "Public" }
}

/// List the user's repositories, marking the selected one
pub async fn run_repo_list(ctx: &Context) -> Result<()> {
    let resolver = ctx.resolver();
    let record = resolver.credentials().load().await?;
    record.require_identity()?;

    let spinner = spinner("Fetching repositories...");
    let repos = if record.is_ready() {
        resolver.list_repositories().await
    } else {
        resolver.list_selectable_repositories().await
    };
    spinner.finish_and_clear();

    if repos.is_empty() {
        println!("No repositories found");
        return Ok(());
    }

    for repo in &repos {
        let selected = record.repository.as_deref() == Some(repo.name.as_str());
        let marker = if selected { check() } else { " ".to_string() };
        println!(
            "{marker} {} {}",
            repo.name.accent(),
            format!("({})", visibility(repo)).muted()
        );
    }
    Ok(())
}

/// Create a repository and select it
pub async fn run_repo_create(
    ctx: &Context,
    name: &str,
    description: Option<&str>,
    private: bool,
) -> Result<()> {
    let description = description.unwrap_or(&ctx.config.default_description);

    let spinner = spinner("Creating repository...");
    let outcome = ctx
        .resolver()
        .create_repository(name, description, private)
        .await;
    spinner.finish_and_clear();

    match outcome {
        Outcome::Success(repo) => {
            println!(
                "{} Created and selected {} {}",
                check(),
                link(&repo.full_name, &repo.html_url).accent(),
                format!("({})", visibility(&repo)).muted()
            );
            Ok(())
        }
        Outcome::NotFound => Err(Error::NotFound(format!("cannot create {name}"))),
        Outcome::Failure(e) => {
            println!("{} Failed to create repository", cross());
            Err(e)
        }
    }
}

/// Select a repository by name, or interactively from the user's list
pub async fn run_repo_select(ctx: &Context, name: Option<&str>) -> Result<()> {
    let resolver = ctx.resolver();

    let name = match name {
        Some(name) => name.to_string(),
        None => {
            let spinner = spinner("Fetching repositories...");
            let repos = resolver.list_selectable_repositories().await;
            spinner.finish_and_clear();
            if repos.is_empty() {
                return Err(Error::NotFound(
                    "no repositories available; create one with `leetsync repo create`"
                        .to_string(),
                ));
            }
            let items: Vec<String> = repos
                .iter()
                .map(|r| format!("{} ({})", r.name, visibility(r)))
                .collect();
            let index = Select::new()
                .with_prompt("Select a repository")
                .items(&items)
                .default(0)
                .interact()
                .map_err(|e| Error::InvalidArgument(format!("Failed to read selection: {e}")))?;
            repos[index].name.clone()
        }
    };

    match resolver.select_repository(&name).await {
        Outcome::Success(repo) => {
            println!(
                "{} Selected {}",
                check(),
                link(&repo.full_name, &repo.html_url).accent()
            );
            Ok(())
        }
        Outcome::NotFound => {
            println!("{} Repository not found: {}", cross(), name.accent());
            Err(Error::NotFound(format!("repository {name}")))
        }
        Outcome::Failure(e) => Err(e),
    }
}

/// Show, set or clear the subdirectory submissions are written under
pub async fn run_repo_subdir(ctx: &Context, path: Option<&str>, clear: bool) -> Result<()> {
    let resolver = ctx.resolver();

    if clear {
        resolver.set_subdirectory(None).await?;
        println!("{} Submissions will be written at the repository root", check());
        return Ok(());
    }

    match path {
        Some(path) => {
            resolver.set_subdirectory(Some(path)).await?;
            let record = resolver.credentials().load().await?;
            match record.subdirectory {
                Some(dir) => println!("{} Submissions will be written under {}", check(), dir.accent()),
                None => println!("{} Submissions will be written at the repository root", check()),
            }
        }
        None => {
            let record = resolver.credentials().load().await?;
            match record.subdirectory {
                Some(dir) => println!("{dir}"),
                None => println!("{}", "(repository root)".muted()),
            }
        }
    }
    Ok(())
}
