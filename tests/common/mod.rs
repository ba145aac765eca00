//! Common test utilities for leetsync tests

pub mod fixtures;
pub mod mock_remote;

// Re-exports for convenience - not all test binaries use all exports
#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use mock_remote::{FailingStore, MockRemote, RemoteCall};
