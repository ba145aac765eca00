//! Test fixtures for submission events, repositories and stores

#![allow(dead_code)]

use leetsync::store::{
    KEY_ACCESS_TOKEN, KEY_OWNER_LOGIN, KEY_REPOSITORY, KEY_SUBDIRECTORY, MemoryStore, Record,
};
use leetsync::types::{
    Difficulty, Metric, Question, RemoteIdentity, RepositoryDescriptor, SubmissionEvent,
    SubmissionLanguage,
};
use serde_json::json;

/// Token stored by [`ready_store`]
pub const TEST_TOKEN: &str = "ghp_test_token";
/// Owner stored by [`ready_store`]
pub const TEST_OWNER: &str = "octocat";
/// Repository stored by [`ready_store`]
pub const TEST_REPO: &str = "leetcode";

/// Builder for submission events
pub struct EventBuilder {
    event: SubmissionEvent,
}

impl EventBuilder {
    /// Accepted Python3 "Two Sum" submission
    pub fn two_sum() -> Self {
        Self {
            event: SubmissionEvent {
                code: "class Solution:\n    def twoSum(self, nums, target):\n        pass\n"
                    .to_string(),
                lang: SubmissionLanguage {
                    verbose_name: "Python3".to_string(),
                },
                runtime: metric(52.0, "52 ms", 91.2),
                memory: metric(14.1, "14.1 MB", 45.0),
                status_code: 10,
                question: Question {
                    question_frontend_id: Some("1".to_string()),
                    question_id: Some("1".to_string()),
                    title_slug: "two-sum".to_string(),
                    title: "Two Sum".to_string(),
                    content: "<p>Given an array of integers...</p>".to_string(),
                    difficulty: Difficulty::Easy,
                },
                notes: None,
            },
        }
    }

    /// Set the judge status code
    pub const fn status(mut self, code: i64) -> Self {
        self.event.status_code = code;
        self
    }

    /// Set the language name
    pub fn language(mut self, name: &str) -> Self {
        self.event.lang.verbose_name = name.to_string();
        self
    }

    /// Attach notes
    pub fn notes(mut self, notes: &str) -> Self {
        self.event.notes = Some(notes.to_string());
        self
    }

    /// Set both problem ids
    pub fn ids(mut self, frontend: Option<&str>, internal: Option<&str>) -> Self {
        self.event.question.question_frontend_id = frontend.map(str::to_string);
        self.event.question.question_id = internal.map(str::to_string);
        self
    }

    /// Finish
    pub fn build(self) -> SubmissionEvent {
        self.event
    }
}

/// Metric with a display string and percentile
pub fn metric(value: f64, display: &str, percentile: f64) -> Metric {
    Metric {
        value,
        display: display.to_string(),
        percentile,
    }
}

/// Identity returned by the mock `GET /user`
pub fn make_identity(login: &str) -> RemoteIdentity {
    RemoteIdentity {
        id: 583_231,
        login: login.to_string(),
        profile_url: format!("https://github.com/{login}"),
        avatar_url: None,
    }
}

/// Repository descriptor owned by [`TEST_OWNER`]
pub fn make_repo(name: &str, private: bool) -> RepositoryDescriptor {
    RepositoryDescriptor {
        id: 1_296_269,
        name: name.to_string(),
        full_name: format!("{TEST_OWNER}/{name}"),
        is_private: private,
        html_url: format!("https://github.com/{TEST_OWNER}/{name}"),
        description: None,
        fork: false,
        default_branch: Some("main".to_string()),
        updated_at: None,
    }
}

/// Credential keys for a fully configured user
pub fn ready_record(subdirectory: Option<&str>) -> Record {
    let mut record = Record::new();
    record.insert(KEY_ACCESS_TOKEN.to_string(), json!(TEST_TOKEN));
    record.insert(KEY_OWNER_LOGIN.to_string(), json!(TEST_OWNER));
    record.insert(KEY_REPOSITORY.to_string(), json!(TEST_REPO));
    if let Some(dir) = subdirectory {
        record.insert(KEY_SUBDIRECTORY.to_string(), json!(dir));
    }
    record
}

/// Memory store holding a ready credential record
pub fn ready_store() -> MemoryStore {
    MemoryStore::with_data(ready_record(None))
}

/// Raw JSON of an accepted submission, as the CLI reads it
pub fn submission_json(status_code: i64) -> String {
    json!({
        "code": "print(42)",
        "lang": { "verboseName": "Python3" },
        "runtime": { "value": 40.0, "display": "40 ms", "percentile": 80.0 },
        "memory": { "value": 16.0, "display": "16 MB", "percentile": 50.0 },
        "statusCode": status_code,
        "question": {
            "questionFrontendId": "1",
            "questionId": "1",
            "titleSlug": "two-sum",
            "title": "Two Sum",
            "content": "<p>Given an array</p>",
            "difficulty": "Easy"
        }
    })
    .to_string()
}
