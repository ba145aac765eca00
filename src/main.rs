//! leetsync - sync accepted LeetCode submissions to GitHub
//!
//! CLI binary for linking a GitHub repository and pushing solved problems.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use leetsync::submit::SyncStatus;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "leetsync")]
#[command(about = "Sync accepted LeetCode submissions to a GitHub repository")]
#[command(version)]
struct Cli {
    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to the state file holding credentials and the sync ledger
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// GitHub authentication
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Choose the repository solutions are synced to
    Repo {
        #[command(subcommand)]
        action: RepoAction,
    },

    /// Sync one submission event (JSON file, or `-` for stdin)
    Submit {
        /// Submission event file
        file: PathBuf,

        /// Read notes for Notes.md from this file
        #[arg(long)]
        notes_file: Option<PathBuf>,

        /// Only print written files and errors
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Show readiness and synced problems
    Status,

    /// Show the language to file extension table
    Languages,
}

#[derive(Subcommand)]
enum AuthAction {
    /// Validate and store a GitHub token
    Login {
        /// Token to use instead of the environment, `gh` or a prompt
        #[arg(long)]
        token: Option<String>,
    },
    /// Show the stored identity
    Status,
    /// Forget stored credentials
    Logout,
}

#[derive(Subcommand)]
enum RepoAction {
    /// List your repositories
    List,
    /// Create a repository and select it
    Create {
        /// Repository name
        name: String,

        /// Repository description
        #[arg(long, short = 'd')]
        description: Option<String>,

        /// Create a private repository
        #[arg(long)]
        private: bool,
    },
    /// Select an existing repository (interactive when NAME is omitted)
    Select {
        /// Repository name
        name: Option<String>,
    },
    /// Show or set the directory solutions are written under
    Subdir {
        /// Directory inside the repository
        path: Option<String>,

        /// Write solutions at the repository root
        #[arg(long, conflicts_with = "path")]
        clear: bool,
    },
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "warn,leetsync=info",
            _ => "warn,leetsync=debug",
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = cli::Context::open(cli.config.as_deref(), cli.state)?;

    match cli.command {
        Commands::Auth { action } => match action {
            AuthAction::Login { token } => cli::run_auth_login(&ctx, token).await?,
            AuthAction::Status => cli::run_auth_status(&ctx).await?,
            AuthAction::Logout => cli::run_auth_logout(&ctx).await?,
        },
        Commands::Repo { action } => match action {
            RepoAction::List => cli::run_repo_list(&ctx).await?,
            RepoAction::Create {
                name,
                description,
                private,
            } => cli::run_repo_create(&ctx, &name, description.as_deref(), private).await?,
            RepoAction::Select { name } => cli::run_repo_select(&ctx, name.as_deref()).await?,
            RepoAction::Subdir { path, clear } => {
                cli::run_repo_subdir(&ctx, path.as_deref(), clear).await?;
            }
        },
        Commands::Submit {
            file,
            notes_file,
            quiet,
        } => {
            let result = cli::run_submit(
                &ctx,
                &file,
                notes_file.as_deref(),
                cli::SubmitOptions { quiet },
            )
            .await?;
            if let SyncStatus::Failed { stage } = result.status {
                bail!("submission sync failed at stage: {stage}");
            }
        }
        Commands::Status => cli::run_status(&ctx).await?,
        Commands::Languages => cli::run_languages(&ctx).await?,
    }

    Ok(())
}
