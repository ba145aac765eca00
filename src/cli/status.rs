//! Status and languages commands

use crate::cli::Context;
use crate::cli::style::{Stylize, check, cross};
use anstream::println;
use chrono::{DateTime, Local, Utc};
use leetsync::error::Result;
use leetsync::types::{Difficulty, LedgerEntry};

/// Show readiness and the sync ledger, most recent first
pub async fn run_status(ctx: &Context) -> Result<()> {
    let record = ctx.credentials().load().await?;
    match (record.owner_login.as_deref(), record.repository.as_deref()) {
        (Some(owner), Some(repo)) => {
            println!("{} Syncing to {}", check(), format!("{owner}/{repo}").accent());
        }
        (Some(owner), None) => {
            println!("{} Logged in as {} but no repository is selected", cross(), owner.accent());
        }
        _ => println!("{} Not logged in", cross()),
    }

    let ledger = ctx.ledger();
    let entries = ledger.entries().await?;
    if entries.is_empty() {
        println!();
        println!("No problems synced yet");
        return Ok(());
    }

    let (easy, medium, hard) = count_by_difficulty(entries.values());
    println!();
    println!(
        "{} {} synced ({} easy, {} medium, {} hard)",
        entries.len().to_string().emphasis(),
        if entries.len() == 1 { "problem" } else { "problems" },
        easy,
        medium,
        hard
    );

    if let Some(last) = ledger.last_solved().await? {
        println!("  {} {} at {}", "Last:".muted(), last.slug.accent(), format_timestamp(last.timestamp));
    }

    let mut sorted: Vec<(&String, &LedgerEntry)> = entries.iter().collect();
    sorted.sort_by(|a, b| b.1.timestamp.cmp(&a.1.timestamp));

    println!();
    for (slug, entry) in sorted {
        println!(
            "  {:<8} {} {}",
            entry.difficulty.to_string(),
            slug,
            format_timestamp(entry.timestamp).muted()
        );
    }
    Ok(())
}

/// Print the language to extension table in effect
#[allow(clippy::unused_async)]
pub async fn run_languages(ctx: &Context) -> Result<()> {
    let table = ctx.config.language_table();
    for (language, extension) in table.entries() {
        println!("{language:<12} {extension}");
    }
    Ok(())
}

fn count_by_difficulty<'a>(entries: impl Iterator<Item = &'a LedgerEntry>) -> (usize, usize, usize) {
    entries.fold((0, 0, 0), |(easy, medium, hard), entry| match entry.difficulty {
        Difficulty::Easy => (easy + 1, medium, hard),
        Difficulty::Medium => (easy, medium + 1, hard),
        Difficulty::Hard => (easy, medium, hard + 1),
        Difficulty::Other(_) => (easy, medium, hard),
    })
}

fn format_timestamp(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis).map_or_else(
        || millis.to_string(),
        |t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
    )
}
