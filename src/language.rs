//! Language label to file extension mapping

use std::collections::HashMap;

/// Extension used when a language has no entry
pub const DEFAULT_EXTENSION: &str = ".txt";

/// Built-in mapping from the tracker's verbose language names
const BUILTIN: &[(&str, &str)] = &[
    ("Python", ".py"),
    ("Python3", ".py"),
    ("C++", ".cpp"),
    ("C++03", ".cpp"),
    ("C++11", ".cpp"),
    ("C++14", ".cpp"),
    ("C++17", ".cpp"),
    ("C++20", ".cpp"),
    ("C++98", ".cpp"),
    ("C++1a", ".cpp"),
    ("C++1x", ".cpp"),
    ("C++1y", ".cpp"),
    ("C++1z", ".cpp"),
    ("CPP", ".cpp"),
    ("C", ".c"),
    ("Java", ".java"),
    ("C#", ".cs"),
    ("JavaScript", ".js"),
    ("Javascript", ".js"),
    ("TypeScript", ".ts"),
    ("Ruby", ".rb"),
    ("Swift", ".swift"),
    ("Go", ".go"),
    ("Kotlin", ".kt"),
    ("Scala", ".scala"),
    ("Rust", ".rs"),
    ("PHP", ".php"),
    ("Dart", ".dart"),
    ("Elixir", ".ex"),
    ("MySQL", ".sql"),
    ("MS SQL Server", ".sql"),
    ("Oracle", ".sql"),
    ("PostgreSQL", ".sql"),
];

/// Immutable language table, built once and handed to the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTable {
    extensions: HashMap<String, String>,
}

impl Default for LanguageTable {
    fn default() -> Self {
        Self::from_entries(
            BUILTIN
                .iter()
                .map(|(lang, ext)| ((*lang).to_string(), (*ext).to_string())),
        )
    }
}

impl LanguageTable {
    /// Table containing only `entries`
    pub fn from_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            extensions: entries
                .into_iter()
                .map(|(lang, ext)| (lang, normalize_extension(&ext)))
                .collect(),
        }
    }

    /// Built-in table with `overrides` added on top
    pub fn with_overrides(overrides: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut table = Self::default();
        for (lang, ext) in overrides {
            table.extensions.insert(lang, normalize_extension(&ext));
        }
        table
    }

    /// Extension for `language`, or [`DEFAULT_EXTENSION`] when unmapped
    pub fn extension_for(&self, language: &str) -> &str {
        self.extensions
            .get(language)
            .map_or(DEFAULT_EXTENSION, String::as_str)
    }

    /// True if `language` has an explicit entry
    pub fn contains(&self, language: &str) -> bool {
        self.extensions.contains_key(language)
    }

    /// All entries sorted by language name
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<_> = self
            .extensions
            .iter()
            .map(|(lang, ext)| (lang.as_str(), ext.as_str()))
            .collect();
        entries.sort_unstable();
        entries
    }
}

fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim();
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{ext}")
    }
}
