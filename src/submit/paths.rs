//! Repository layout for a synced problem

use crate::store::normalize_subdirectory;
use crate::types::Question;

/// Directory for a problem: `[subdirectory/]{id}-{slug}`
///
/// The id is the frontend id, then the internal id, then `unknown`. The result
/// only depends on the problem, so resubmitting updates the same files.
pub fn problem_directory(subdirectory: Option<&str>, question: &Question) -> String {
    let id = [&question.question_frontend_id, &question.question_id]
        .into_iter()
        .flatten()
        .map(|id| id.trim())
        .find(|id| !id.is_empty())
        .unwrap_or("unknown");

    let base = format!("{id}-{}", question.title_slug);
    match subdirectory
        .map(normalize_subdirectory)
        .filter(|dir| !dir.is_empty())
    {
        Some(dir) => format!("{dir}/{base}"),
        None => base,
    }
}

/// Solution file name: the slug plus the language extension
pub fn solution_file_name(slug: &str, extension: &str) -> String {
    format!("{slug}{extension}")
}
