//! Progress callback trait for interface-agnostic updates
//!
//! This trait allows different interfaces (CLI, background service, etc.) to
//! receive progress updates while a submission is synced.

use crate::error::Error;
use crate::submit::WrittenFile;
use async_trait::async_trait;

/// Pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Checking status code and credentials
    Validating,
    /// Writing README.md
    WritingStatement,
    /// Writing Notes.md
    WritingNotes,
    /// Writing the solution source
    WritingSolution,
    /// Updating the local ledger
    RecordingLedger,
    /// Submission synced
    Done,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validating => write!(f, "Validating"),
            Self::WritingStatement => write!(f, "Writing problem statement"),
            Self::WritingNotes => write!(f, "Writing notes"),
            Self::WritingSolution => write!(f, "Writing solution"),
            Self::RecordingLedger => write!(f, "Recording sync"),
            Self::Done => write!(f, "Done"),
        }
    }
}

/// Progress callback trait
///
/// Implement this trait to receive progress updates during a sync.
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when entering a new stage
    async fn on_stage(&self, stage: Stage);

    /// Called after a file was written to the repository
    async fn on_file_written(&self, file: &WrittenFile);

    /// Called when a stage fails; fatal or not is decided by the pipeline
    async fn on_error(&self, stage: Stage, error: &Error);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_stage(&self, _stage: Stage) {}
    async fn on_file_written(&self, _file: &WrittenFile) {}
    async fn on_error(&self, _stage: Stage, _error: &Error) {}
    async fn on_message(&self, _message: &str) {}
}
