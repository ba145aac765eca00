//! Submission sync engine
//!
//! Turns one accepted submission into repository files:
//! 1. Validating - status code policy and credential readiness
//! 2. Writing - statement, optional notes, solution
//! 3. Recording - local ledger of synced problems

mod paths;
mod pipeline;
mod progress;

pub use paths::{problem_directory, solution_file_name};
pub use pipeline::{SubmissionPipeline, SyncResult, SyncStatus, WrittenFile};
pub use progress::{NoopProgress, ProgressCallback, Stage};
