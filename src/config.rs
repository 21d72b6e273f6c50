//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::client::{ClientConfig, DEFAULT_API_BASE};
use crate::prefs::FileStore;
use crate::tracker::DEFAULT_CONTENT_URL;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub tracker: TrackerConfig,

    #[serde(default)]
    pub preferences: PreferencesConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            request_timeout_ms: self.request_timeout_secs.saturating_mul(1000),
        }
    }
}

/// Tracker behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerConfig {
    /// Site opened after a session starts
    #[serde(default = "default_content_url")]
    pub content_url: String,

    /// Launch the system browser on start instead of only printing the URL
    #[serde(default = "default_open_browser")]
    pub open_browser: bool,
}

fn default_content_url() -> String {
    DEFAULT_CONTENT_URL.to_string()
}

fn default_open_browser() -> bool {
    true
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            content_url: default_content_url(),
            open_browser: default_open_browser(),
        }
    }
}

/// Local preference storage
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreferencesConfig {
    /// Preference file; defaults to the platform data directory
    pub path: Option<String>,
}

impl PreferencesConfig {
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(FileStore::default_path)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse TOML config content
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment.
    ///
    /// A config file that exists but cannot be loaded is skipped; its error
    /// is returned with the fallback config so the caller can report it once
    /// logging is up.
    pub fn load_default() -> (Self, Option<ConfigError>) {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("reeltrack").join("config.toml")),
            Some(PathBuf::from("./reeltrack.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    /// Load the first existing file in `paths`, else defaults plus environment
    pub fn load_first(paths: &[PathBuf]) -> (Self, Option<ConfigError>) {
        let mut failure = None;

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => return (config, failure),
                Err(e) => {
                    failure.get_or_insert(e);
                }
            }
        }

        (Self::from_env(), failure)
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any `REELTRACK_*` lookup
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("REELTRACK_API_URL") {
            self.api.base_url = url;
        }
        if let Some(timeout) = lookup("REELTRACK_API_TIMEOUT_SECS") {
            if let Ok(t) = timeout.parse() {
                self.api.request_timeout_secs = t;
            }
        }

        if let Some(url) = lookup("REELTRACK_CONTENT_URL") {
            self.tracker.content_url = url;
        }

        if let Some(path) = lookup("REELTRACK_PREFS_PATH") {
            self.preferences.path = Some(path);
        }

        if let Some(level) = lookup("REELTRACK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("REELTRACK_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# reeltrack configuration
#
# Environment variables override these settings:
# - REELTRACK_API_URL
# - REELTRACK_API_TIMEOUT_SECS
# - REELTRACK_CONTENT_URL
# - REELTRACK_PREFS_PATH
# - REELTRACK_LOG_LEVEL
# - REELTRACK_LOG_FORMAT

[api]
# Tracking backend base URL
base_url = "http://localhost:8000"

# Request timeout in seconds
request_timeout_secs = 30

[tracker]
# Opened when a session starts
content_url = "https://www.instagram.com/reels/"

# Launch the system browser (false = only print the URL)
open_browser = true

[preferences]
# Where the seconds-per-reel rate is stored
# path = "~/.local/share/reeltrack/preferences.json"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty or json
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_broken_file_is_reported_with_fallback() {
        let dir = tempdir().unwrap();
        let broken = dir.path().join("reeltrack.toml");
        std::fs::write(&broken, "[api\nbase_url = 1").unwrap();

        let (config, failure) = Config::load_first(&[broken.clone()]);

        assert!(matches!(failure, Some(ConfigError::Parse { ref path, .. }) if *path == broken));
        assert!(config.tracker.open_browser);
    }

    #[test]
    fn test_first_loadable_file_wins() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let broken = dir.path().join("broken.toml");
        let good = dir.path().join("good.toml");
        std::fs::write(&broken, "not = [toml").unwrap();
        std::fs::write(&good, "[tracker]\nopen_browser = false\n").unwrap();

        let (config, failure) = Config::load_first(&[missing, broken, good]);

        assert!(!config.tracker.open_browser);
        assert!(matches!(failure, Some(ConfigError::Parse { .. })));

        let (_, failure) = Config::load_first(&[dir.path().join("good.toml")]);
        assert!(failure.is_none());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.tracker.content_url, "https://www.instagram.com/reels/");
        assert!(config.tracker.open_browser);
        assert_eq!(config.logging.level, "warn");
        assert!(config.preferences.path.is_none());
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_API_BASE);
        assert_eq!(config.tracker.content_url, DEFAULT_CONTENT_URL);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse(
            r#"
            [api]
            base_url = "http://tracker.lan:9000"

            [tracker]
            open_browser = false
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "http://tracker.lan:9000");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert!(!config.tracker.open_browser);
        assert_eq!(config.tracker.content_url, DEFAULT_CONTENT_URL);
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("REELTRACK_API_URL", "http://override:1234"),
            ("REELTRACK_API_TIMEOUT_SECS", "not-a-number"),
            ("REELTRACK_PREFS_PATH", "/tmp/prefs.json"),
            ("REELTRACK_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://override:1234");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.preferences.resolved_path(), PathBuf::from("/tmp/prefs.json"));
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_client_config() {
        let api = ApiConfig {
            base_url: "http://x".to_string(),
            request_timeout_secs: 5,
        };
        let client = api.client_config();
        assert_eq!(client.base_url, "http://x");
        assert_eq!(client.request_timeout_ms, 5000);
    }

    #[test]
    fn test_load_errors_name_the_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let err = Config::load(&missing).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[api\nbase_url = 1").unwrap();
        let err = Config::load(&bad).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }
}
