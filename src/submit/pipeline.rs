//! Multi-file submission pipeline

use crate::error::Error;
use crate::format::{
    self, DEFAULT_PROBLEM_URL, NOTES_FILE, STATEMENT_FILE, notes_document, problem_link,
    statement_document,
};
use crate::language::LanguageTable;
use crate::platform::RemoteApi;
use crate::store::{CredentialStore, KeyValueStore, SyncLedger};
use crate::submit::paths::{problem_directory, solution_file_name};
use crate::submit::progress::{ProgressCallback, Stage};
use crate::types::{LedgerEntry, SubmissionEvent, WriteKind};
use crate::upsert::{FileUpserter, join_path};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// A file written during a sync
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    /// Repository-relative path
    pub path: String,
    /// Created or updated
    pub kind: WriteKind,
}

/// Terminal state of a sync
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// Solution written and ledger recorded
    Synced,
    /// Submission was not accepted by the judge; nothing was done
    Skipped {
        /// Status code that caused the skip
        status_code: i64,
    },
    /// A fatal stage failed
    Failed {
        /// Stage that failed
        stage: Stage,
    },
}

/// Result of syncing one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncResult {
    /// Terminal state
    pub status: SyncStatus,
    /// Problem directory in the repository, once derived
    pub directory: Option<String>,
    /// Files written, in order
    pub written: Vec<WrittenFile>,
    /// Stage-tagged error messages, fatal and non-fatal
    pub errors: Vec<String>,
}

impl SyncResult {
    fn new(status: SyncStatus) -> Self {
        Self {
            status,
            directory: None,
            written: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// True only when the submission was fully synced
    pub const fn success(&self) -> bool {
        matches!(self.status, SyncStatus::Synced)
    }

    /// True when the submission was intentionally not synced
    pub const fn skipped(&self) -> bool {
        matches!(self.status, SyncStatus::Skipped { .. })
    }
}

/// Syncs solved-problem events into the selected repository
///
/// Stages run strictly in order: statement, notes (optional), solution,
/// ledger. Statement and notes failures are recorded and skipped over; a
/// solution or ledger failure ends the sync as failed.
pub struct SubmissionPipeline {
    credentials: CredentialStore,
    upserter: FileUpserter,
    ledger: SyncLedger,
    languages: LanguageTable,
    problem_url: String,
}

impl SubmissionPipeline {
    /// Create a pipeline over a remote API and a key-value store
    pub fn new(
        api: Arc<dyn RemoteApi>,
        store: Arc<dyn KeyValueStore>,
        languages: LanguageTable,
    ) -> Self {
        let credentials = CredentialStore::new(store.clone());
        Self {
            upserter: FileUpserter::new(api, credentials.clone()),
            credentials,
            ledger: SyncLedger::new(store),
            languages,
            problem_url: DEFAULT_PROBLEM_URL.to_string(),
        }
    }

    /// Use a different base URL for problem links in README.md
    #[must_use]
    pub fn with_problem_url(mut self, url: impl Into<String>) -> Self {
        self.problem_url = url.into();
        self
    }

    /// Language table in use
    pub const fn languages(&self) -> &LanguageTable {
        &self.languages
    }

    /// Sync one submission
    pub async fn submit(
        &self,
        event: &SubmissionEvent,
        progress: &dyn ProgressCallback,
    ) -> SyncResult {
        let question = &event.question;

        // Validating
        progress.on_stage(Stage::Validating).await;
        if !event.is_accepted() {
            info!(
                slug = %question.title_slug,
                status_code = event.status_code,
                "submission not accepted, not syncing"
            );
            progress
                .on_message("Submission was not accepted; nothing to sync")
                .await;
            return SyncResult::new(SyncStatus::Skipped {
                status_code: event.status_code,
            });
        }

        let ready = match self.credentials.ready().await {
            Ok(ready) => ready,
            Err(e) => {
                let result = SyncResult::new(SyncStatus::Synced);
                return Self::fail(result, Stage::Validating, e, progress).await;
            }
        };

        let directory = problem_directory(ready.subdirectory.as_deref(), question);
        let extension = self.languages.extension_for(&event.lang.verbose_name);
        if !self.languages.contains(&event.lang.verbose_name) {
            warn!(
                language = %event.lang.verbose_name,
                extension,
                "unmapped language, using fallback extension"
            );
        }
        debug!(directory = %directory, extension, "derived repository layout");

        let mut result = SyncResult::new(SyncStatus::Synced);
        result.directory = Some(directory.clone());

        // WritingStatement: non-fatal
        progress.on_stage(Stage::WritingStatement).await;
        let statement = statement_document(
            &problem_link(&self.problem_url, &question.title_slug),
            &question.title,
            &question.difficulty,
            &question.content,
        );
        self.write_file(
            &mut result,
            Stage::WritingStatement,
            &directory,
            STATEMENT_FILE,
            &statement,
            &format::statement_commit_message(&question.title),
            progress,
        )
        .await;

        // WritingNotes: only with notes, non-fatal
        if let Some(notes) = event.notes() {
            progress.on_stage(Stage::WritingNotes).await;
            self.write_file(
                &mut result,
                Stage::WritingNotes,
                &directory,
                NOTES_FILE,
                &notes_document(&question.title, notes),
                &format::notes_commit_message(&question.title),
                progress,
            )
            .await;
        }

        // WritingSolution: fatal
        progress.on_stage(Stage::WritingSolution).await;
        let solution_name = solution_file_name(&question.title_slug, extension);
        let solution = self
            .upserter
            .upsert(
                &directory,
                &solution_name,
                &event.code,
                &format::solution_commit_message(&event.runtime, &event.memory),
            )
            .await;
        match solution {
            Ok(kind) => {
                let file = Self::written(&mut result, &directory, &solution_name, kind);
                progress.on_file_written(&file).await;
            }
            Err(e) => return Self::fail(result, Stage::WritingSolution, e, progress).await,
        }

        // RecordingLedger: fatal, even though the remote already has the files
        progress.on_stage(Stage::RecordingLedger).await;
        let entry = LedgerEntry {
            difficulty: question.difficulty.clone(),
            question_id: question.question_id.clone(),
            timestamp: Utc::now().timestamp_millis(),
        };
        if let Err(e) = self.ledger.record(&question.title_slug, entry).await {
            return Self::fail(result, Stage::RecordingLedger, e, progress).await;
        }

        progress.on_stage(Stage::Done).await;
        info!(
            title = %question.title,
            files = result.written.len(),
            "synced submission"
        );
        result
    }

    /// Upsert one non-fatal document, recording success or failure
    #[allow(clippy::too_many_arguments)]
    async fn write_file(
        &self,
        result: &mut SyncResult,
        stage: Stage,
        directory: &str,
        file_name: &str,
        content: &str,
        message: &str,
        progress: &dyn ProgressCallback,
    ) {
        match self.upserter.upsert(directory, file_name, content, message).await {
            Ok(kind) => {
                let file = Self::written(result, directory, file_name, kind);
                progress.on_file_written(&file).await;
            }
            Err(e) => {
                warn!(stage = %stage, error = %e, "non-fatal stage failed, continuing");
                result.errors.push(format!("{stage}: {e}"));
                progress.on_error(stage, &e).await;
            }
        }
    }

    fn written(
        result: &mut SyncResult,
        directory: &str,
        file_name: &str,
        kind: WriteKind,
    ) -> WrittenFile {
        let file = WrittenFile {
            path: join_path(directory, file_name),
            kind,
        };
        result.written.push(file.clone());
        file
    }

    async fn fail(
        mut result: SyncResult,
        stage: Stage,
        error: Error,
        progress: &dyn ProgressCallback,
    ) -> SyncResult {
        error!(stage = %stage, error = %error, "sync failed");
        result.errors.push(format!("{stage}: {error}"));
        result.status = SyncStatus::Failed { stage };
        progress.on_error(stage, &error).await;
        result
    }
}
