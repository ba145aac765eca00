//! Configuration loaded from a TOML file and environment variables
//!
//! Every field has a default, so the file is optional. Lookup order for the
//! file: explicit path, `LEETSYNC_CONFIG`, then
//! `<config dir>/leetsync/config.toml`.

use crate::error::{Error, Result};
use crate::format::DEFAULT_PROBLEM_URL;
use crate::language::LanguageTable;
use crate::platform::DEFAULT_API_URL;
use crate::resolver::DEFAULT_DESCRIPTION;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Env var naming the config file
pub const ENV_CONFIG: &str = "LEETSYNC_CONFIG";
/// Env var overriding `api_url`
pub const ENV_API_URL: &str = "LEETSYNC_API_URL";
/// Env var overriding `state_file`
pub const ENV_STATE_FILE: &str = "LEETSYNC_STATE_FILE";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// GitHub REST API base URL
    pub api_url: String,
    /// Base URL for problem links in README.md
    pub problem_url: String,
    /// Path of the JSON state file
    pub state_file: Option<PathBuf>,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
    /// Description used by `repo create` when none is given
    pub default_description: String,
    /// Extra language -> extension entries
    pub languages: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            problem_url: DEFAULT_PROBLEM_URL.to_string(),
            state_file: None,
            timeout_secs: 30,
            default_description: DEFAULT_DESCRIPTION.to_string(),
            languages: HashMap::new(),
        }
    }
}

impl Config {
    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("leetsync").join("config.toml"))
    }

    /// Load configuration and apply environment overrides
    ///
    /// An explicitly named file must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(ENV_CONFIG).map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        config.apply_overrides(|key| env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml(&raw)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Parse config TOML
    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::Config(e.to_string()))
    }

    /// Apply `LEETSYNC_*` overrides using `lookup` to read variables
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(api_url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api_url = api_url.trim().to_string();
        }
        if let Some(state) = lookup(ENV_STATE_FILE).filter(|v| !v.trim().is_empty()) {
            self.state_file = Some(PathBuf::from(state.trim()));
        }
    }

    /// Check URLs and limits
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("api_url", &self.api_url), ("problem_url", &self.problem_url)] {
            let url = Url::parse(value)
                .map_err(|e| Error::Config(format!("{name} '{value}' is not a URL: {e}")))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(Error::Config(format!("{name} must be http(s): {value}")));
            }
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be positive".to_string()));
        }
        Ok(())
    }

    /// State file location, defaulting to `<data dir>/leetsync/state.json`
    pub fn state_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.state_file {
            return Ok(path.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join("leetsync").join("state.json"))
            .ok_or_else(|| {
                Error::Config("no data directory; set state_file or LEETSYNC_STATE_FILE".into())
            })
    }

    /// HTTP request timeout
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Built-in language table plus configured entries
    pub fn language_table(&self) -> LanguageTable {
        LanguageTable::with_overrides(self.languages.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api_url, "https://api.github.com");
        config.validate().unwrap();
    }

    #[test]
    fn test_full_file() {
        let config = Config::from_toml(
            r#"
            api_url = "https://ghe.example.com/api/v3"
            problem_url = "https://leetcode.cn/problems"
            state_file = "/tmp/leetsync.json"
            timeout_secs = 5

            [languages]
            Racket = ".rkt"
            "#,
        )
        .unwrap();
        assert_eq!(config.api_url, "https://ghe.example.com/api/v3");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.state_path().unwrap(), PathBuf::from("/tmp/leetsync.json"));
        assert_eq!(config.language_table().extension_for("Racket"), ".rkt");
        assert_eq!(config.language_table().extension_for("Rust"), ".rs");
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(matches!(
            Config::from_toml("api_uri = \"x\""),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            ENV_API_URL => Some("http://127.0.0.1:9999".to_string()),
            ENV_STATE_FILE => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config.api_url, "http://127.0.0.1:9999");
        assert_eq!(config.state_file, None);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = Config {
            api_url: "github".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            timeout_secs: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
