//! leetsync - archive accepted LeetCode solutions in a GitHub repository
//!
//! The engine validates a GitHub token, selects or creates a repository,
//! and writes each accepted submission as a problem statement, optional
//! notes and a solution file. Writes are idempotent create-or-update calls
//! against the contents API, and every synced problem is recorded in a local
//! ledger.
//!
//! Persistence goes through the [`store::KeyValueStore`] trait and remote
//! calls through [`platform::RemoteApi`], so both can be swapped out.

pub mod auth;
pub mod config;
pub mod error;
pub mod format;
pub mod language;
pub mod platform;
pub mod resolver;
pub mod store;
pub mod submit;
pub mod types;
pub mod upsert;
