//! Submit command - sync one solved-problem event

use crate::cli::style::{Stylize, check, cross};
use crate::cli::{CliProgress, Context};
use anstream::{eprintln, println};
use leetsync::error::{Error, Result};
use leetsync::submit::{SyncResult, SyncStatus};
use leetsync::types::SubmissionEvent;
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Options for the submit command
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmitOptions {
    /// Only print written files and errors
    pub quiet: bool,
}

/// Read a submission event from `input` (`-` for stdin) and sync it
pub async fn run_submit(
    ctx: &Context,
    input: &Path,
    notes_file: Option<&Path>,
    options: SubmitOptions,
) -> Result<SyncResult> {
    let raw = read_input(input).await?;
    let mut event: SubmissionEvent = serde_json::from_str(&raw).map_err(|e| {
        Error::InvalidArgument(format!("invalid submission event in {}: {e}", input.display()))
    })?;

    if let Some(path) = notes_file {
        event.notes = Some(tokio::fs::read_to_string(path).await?);
    }

    let progress = if options.quiet {
        CliProgress::compact()
    } else {
        CliProgress::verbose()
    };

    if !options.quiet {
        println!(
            "Syncing {} ({})",
            event.question.title.emphasis(),
            event.lang.verbose_name.muted()
        );
    }

    let result = ctx.pipeline().submit(&event, &progress).await;
    print_summary(&result);
    Ok(result)
}

async fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut raw = String::new();
        tokio::io::stdin().read_to_string(&mut raw).await?;
        Ok(raw)
    } else {
        Ok(tokio::fs::read_to_string(input).await?)
    }
}

fn print_summary(result: &SyncResult) {
    println!();
    match result.status {
        SyncStatus::Synced => {
            println!(
                "{} Synced {} file{} to {}",
                check(),
                result.written.len(),
                if result.written.len() == 1 { "" } else { "s" },
                result.directory.as_deref().unwrap_or("").accent()
            );
            if !result.errors.is_empty() {
                println!("  {}", "Some optional files were not written:".warn());
                for err in &result.errors {
                    println!("    {err}");
                }
            }
        }
        SyncStatus::Skipped { status_code } => {
            println!("Skipped: submission status {status_code} is not accepted");
        }
        SyncStatus::Failed { stage } => {
            eprintln!("{} Sync failed while {}", cross(), stage.to_string().to_lowercase());
            for err in &result.errors {
                eprintln!("  {err}");
            }
        }
    }
}
