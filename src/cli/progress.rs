//! Shared CLI progress callback

use crate::cli::style::{Stylize, check, cross};
use anstream::{eprintln, println};
use async_trait::async_trait;
use leetsync::error::Error;
use leetsync::submit::{ProgressCallback, Stage, WrittenFile};

/// CLI progress callback that prints to stdout
///
/// Two modes:
/// - verbose: shows every stage
/// - compact: only files and errors
pub struct CliProgress {
    /// Verbose mode shows all stages
    pub verbose: bool,
}

impl CliProgress {
    /// Create verbose progress
    pub const fn verbose() -> Self {
        Self { verbose: true }
    }

    /// Create compact progress
    pub const fn compact() -> Self {
        Self { verbose: false }
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_stage(&self, stage: Stage) {
        if self.verbose {
            match stage {
                Stage::Done => {}
                _ => println!("{stage}..."),
            }
        }
    }

    async fn on_file_written(&self, file: &WrittenFile) {
        if self.verbose {
            println!("  {} {} {}", check(), file.kind, file.path.accent());
        } else {
            println!("  {} {}", file.kind, file.path);
        }
    }

    async fn on_error(&self, stage: Stage, error: &Error) {
        if self.verbose {
            eprintln!("  {} {stage} failed: {error}", cross());
        } else {
            eprintln!("  Error ({stage}): {error}");
        }
    }

    async fn on_message(&self, message: &str) {
        if self.verbose {
            println!("{}", message.muted());
        } else {
            println!("  {message}");
        }
    }
}
