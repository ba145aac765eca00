//! CLI command implementations

mod auth;
mod progress;
mod repo;
pub mod style;
mod status;
mod submit;

pub use auth::{run_auth_login, run_auth_logout, run_auth_status};
pub use progress::CliProgress;
pub use repo::{run_repo_create, run_repo_list, run_repo_select, run_repo_subdir};
pub use status::{run_languages, run_status};
pub use submit::{SubmitOptions, run_submit};

use leetsync::config::Config;
use leetsync::error::Result;
use leetsync::platform::GitHubService;
use leetsync::resolver::RepositoryResolver;
use leetsync::store::{CredentialStore, FileStore, SyncLedger};
use leetsync::submit::SubmissionPipeline;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Everything a command needs: config, state file and GitHub client
pub struct Context {
    /// Loaded configuration
    pub config: Config,
    store: Arc<FileStore>,
    api: Arc<GitHubService>,
}

impl Context {
    /// Load config, apply the `--state` override and build the clients
    pub fn open(config_path: Option<&Path>, state: Option<PathBuf>) -> Result<Self> {
        let mut config = Config::load(config_path)?;
        if state.is_some() {
            config.state_file = state;
        }

        let state_path = config.state_path()?;
        debug!(state = %state_path.display(), api = %config.api_url, "opening context");

        let api = Arc::new(GitHubService::new(&config.api_url, config.timeout())?);
        Ok(Self {
            config,
            store: Arc::new(FileStore::new(state_path)),
            api,
        })
    }

    /// Typed credential access
    pub fn credentials(&self) -> CredentialStore {
        CredentialStore::new(self.store.clone())
    }

    /// Resolver over the state file
    pub fn resolver(&self) -> RepositoryResolver {
        RepositoryResolver::new(self.api.clone(), self.credentials())
    }

    /// Ledger over the state file
    pub fn ledger(&self) -> SyncLedger {
        SyncLedger::new(self.store.clone())
    }

    /// Submission pipeline configured from the loaded config
    pub fn pipeline(&self) -> SubmissionPipeline {
        SubmissionPipeline::new(
            self.api.clone(),
            self.store.clone(),
            self.config.language_table(),
        )
        .with_problem_url(self.config.problem_url.clone())
    }
}
