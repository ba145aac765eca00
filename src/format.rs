//! Markdown documents and commit messages written to the repository

use crate::types::{Difficulty, Metric};

/// Default page for problem links
pub const DEFAULT_PROBLEM_URL: &str = "https://leetcode.com/problems";

/// File name of the problem statement document
pub const STATEMENT_FILE: &str = "README.md";

/// File name of the notes document
pub const NOTES_FILE: &str = "Notes.md";

/// shields.io color for a difficulty
pub const fn difficulty_color(difficulty: &Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "brightgreen",
        Difficulty::Medium => "orange",
        Difficulty::Hard => "red",
        Difficulty::Other(_) => "blue",
    }
}

/// Badge image tag for a difficulty
pub fn difficulty_badge(difficulty: &Difficulty) -> String {
    let label = difficulty.to_string();
    format!(
        "<img src='https://img.shields.io/badge/Difficulty-{}-{}' alt='Difficulty: {label}' />",
        urlencoding::encode(&label),
        difficulty_color(difficulty),
    )
}

/// Link to a problem page
pub fn problem_link(base_url: &str, slug: &str) -> String {
    format!("{}/{slug}", base_url.trim_end_matches('/'))
}

/// `README.md` body: linked title, difficulty badge, then the statement
pub fn statement_document(
    problem_url: &str,
    title: &str,
    difficulty: &Difficulty,
    body: &str,
) -> String {
    format!(
        "<h2><a href=\"{problem_url}\">{title}</a></h2> {}<hr>{body}",
        difficulty_badge(difficulty)
    )
}

/// `Notes.md` body
pub fn notes_document(title: &str, notes: &str) -> String {
    format!("<h2>{title} Notes</h2><hr>{notes}")
}

/// Commit message for the statement document
pub fn statement_commit_message(title: &str) -> String {
    format!("Added {STATEMENT_FILE} file for {title}")
}

/// Commit message for the notes document
pub fn notes_commit_message(title: &str) -> String {
    format!("Added {NOTES_FILE} file for {title}")
}

/// Commit message for the solution, with percentiles at two decimals
pub fn solution_commit_message(runtime: &Metric, memory: &Metric) -> String {
    format!(
        "Time: {} ({:.2}%) | Memory: {} ({:.2}%) - LeetSync",
        runtime.display, runtime.percentile, memory.display, memory.percentile
    )
}
