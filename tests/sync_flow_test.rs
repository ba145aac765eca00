//! Full submission sync through the real HTTP client against a mock server

mod common;

use common::{EventBuilder, TEST_OWNER, TEST_REPO, ready_record};
use leetsync::language::LanguageTable;
use leetsync::platform::GitHubService;
use leetsync::store::{MemoryStore, SyncLedger};
use leetsync::submit::{NoopProgress, SubmissionPipeline, SyncStatus};
use leetsync::types::WriteKind;
use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn contents(path: &str) -> String {
    format!("/repos/{TEST_OWNER}/{TEST_REPO}/contents/{path}")
}

#[tokio::test]
async fn test_sync_creates_statement_and_updates_solution() {
    let mut server = Server::new_async().await;

    let readme_check = server
        .mock("GET", contents("1-two-sum/README.md").as_str())
        .match_header("authorization", "token ghp_test_token")
        .with_status(404)
        .with_body(r#"{"message":"Not Found"}"#)
        .create_async()
        .await;
    let readme_put = server
        .mock("PUT", contents("1-two-sum/README.md").as_str())
        .match_body(Matcher::Regex(r#"^\{"message":"Added README.md file for Two Sum","content":"[A-Za-z0-9+/=]+"\}$"#.to_string()))
        .with_status(201)
        .with_body("{}")
        .create_async()
        .await;
    let solution_check = server
        .mock("GET", contents("1-two-sum/two-sum.py").as_str())
        .with_status(200)
        .with_body(json!({ "sha": "95b966ae" }).to_string())
        .create_async()
        .await;
    let solution_put = server
        .mock("PUT", contents("1-two-sum/two-sum.py").as_str())
        .match_body(Matcher::PartialJson(json!({
            "message": "Time: 52 ms (91.20%) | Memory: 14.1 MB (45.00%) - LeetSync",
            "sha": "95b966ae"
        })))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let api = Arc::new(GitHubService::new(&server.url(), Duration::from_secs(5)).unwrap());
    let store = Arc::new(MemoryStore::with_data(ready_record(None)));
    let pipeline = SubmissionPipeline::new(api, store.clone(), LanguageTable::default());

    let result = pipeline
        .submit(&EventBuilder::two_sum().build(), &NoopProgress)
        .await;

    assert_eq!(result.status, SyncStatus::Synced, "errors: {:?}", result.errors);
    let kinds: Vec<WriteKind> = result.written.iter().map(|f| f.kind).collect();
    assert_eq!(kinds, vec![WriteKind::Created, WriteKind::Updated]);

    readme_check.assert_async().await;
    readme_put.assert_async().await;
    solution_check.assert_async().await;
    solution_put.assert_async().await;

    let entries = SyncLedger::new(store).entries().await.unwrap();
    assert!(entries.contains_key("two-sum"));
}

#[tokio::test]
async fn test_rejected_token_fails_the_solution_stage() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", Matcher::Any)
        .with_status(401)
        .with_body(r#"{"message":"Bad credentials"}"#)
        .create_async()
        .await;
    server
        .mock("PUT", Matcher::Any)
        .with_status(401)
        .with_body(r#"{"message":"Bad credentials"}"#)
        .create_async()
        .await;

    let api = Arc::new(GitHubService::new(&server.url(), Duration::from_secs(5)).unwrap());
    let store = Arc::new(MemoryStore::with_data(ready_record(None)));
    let pipeline = SubmissionPipeline::new(api, store.clone(), LanguageTable::default());

    let result = pipeline
        .submit(&EventBuilder::two_sum().build(), &NoopProgress)
        .await;

    assert!(matches!(result.status, SyncStatus::Failed { .. }));
    assert!(result.written.is_empty());
    assert_eq!(result.errors.len(), 2);
    assert!(SyncLedger::new(store).entries().await.unwrap().is_empty());
}
