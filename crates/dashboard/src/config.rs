//! Dashboard configuration
//!
//! Loaded from `~/.config/dashboard/config.yaml` (or an explicit path), then
//! `DASHBOARD_BASE_URL` from the environment, then whatever the frontend's CLI
//! flags override. Every field has a default, so an empty or missing file is
//! a valid configuration.

use crate::notifications::{DEFAULT_EXIT_DELAY, NotificationPolicy};
use dashboard_jsonplaceholder::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

pub const BASE_URL_ENV: &str = "DASHBOARD_BASE_URL";
pub const CONFIG_FILE_NAME: &str = "config.yaml";
pub const THEME_FILE_NAME: &str = "preferences.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config YAML {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub success_ms: u64,
    pub info_ms: u64,
    pub warning_ms: u64,
    pub error_ms: u64,
    /// Time between closing a notification and dropping it
    pub exit_delay_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        let policy = NotificationPolicy::default();
        Self {
            success_ms: policy.success_ms,
            info_ms: policy.info_ms,
            warning_ms: policy.warning_ms,
            error_ms: policy.error_ms,
            exit_delay_ms: DEFAULT_EXIT_DELAY.as_millis() as u64,
        }
    }
}

impl NotificationConfig {
    pub fn policy(&self) -> NotificationPolicy {
        NotificationPolicy {
            success_ms: self.success_ms,
            info_ms: self.info_ms,
            warning_ms: self.warning_ms,
            error_ms: self.error_ms,
        }
    }

    pub fn exit_delay(&self) -> Duration {
        Duration::from_millis(self.exit_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    /// Where the theme preference lives; defaults to the config directory
    pub theme_file: Option<PathBuf>,
    pub notifications: NotificationConfig,
    /// Buffer of the domain event broadcast channel
    pub event_capacity: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            theme_file: None,
            notifications: NotificationConfig::default(),
            event_capacity: 256,
        }
    }
}

impl DashboardConfig {
    /// `~/.config/dashboard` (platform equivalent), if the platform has one
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dashboard"))
    }

    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from a YAML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        // an empty file deserializes to unit, not to an empty map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: DashboardConfig =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;

        debug!("[Config] Loaded {}", path.display());
        Ok(config)
    }

    /// Resolve the effective configuration
    ///
    /// An explicit path must exist; the default path is used only if present.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::load_from_file(path)?,
            None => match Self::default_path().filter(|path| path.exists()) {
                Some(path) => Self::load_from_file(&path)?,
                None => {
                    info!("[Config] No config file, using defaults");
                    Self::default()
                }
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides through `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(BASE_URL_ENV).filter(|url| !url.trim().is_empty()) {
            debug!("[Config] {} overrides base URL", BASE_URL_ENV);
            self.base_url = url.trim().to_string();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url must not be empty".to_string()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "base_url must be an http(s) URL, got {}",
                self.base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        if self.event_capacity == 0 {
            return Err(ConfigError::Invalid("event_capacity must be positive".to_string()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Explicit theme file, else `preferences.json` in the config directory
    pub fn theme_file_path(&self) -> Option<PathBuf> {
        self.theme_file
            .clone()
            .or_else(|| Self::config_dir().map(|dir| dir.join(THEME_FILE_NAME)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "base_url: http://localhost:3000\nnotifications:\n  error_ms: 8000\n",
        )
        .unwrap();

        let config = DashboardConfig::load_from_file(&path).unwrap();

        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.notifications.error_ms, 8000);
        assert_eq!(config.notifications.success_ms, 3000);
        assert_eq!(config.notifications.exit_delay(), Duration::from_millis(300));
    }

    #[test]
    fn empty_file_is_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "").unwrap();

        assert_eq!(
            DashboardConfig::load_from_file(&path).unwrap(),
            DashboardConfig::default()
        );
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = DashboardConfig::load(Some(&dir.path().join("nope.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "base_url: [unclosed").unwrap();

        let err = DashboardConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn env_overrides_base_url() {
        let mut config = DashboardConfig::default();
        config.apply_env(|key| (key == BASE_URL_ENV).then(|| " http://127.0.0.1:8080 ".to_string()));
        assert_eq!(config.base_url, "http://127.0.0.1:8080");

        config.apply_env(|_| Some("   ".to_string()));
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn rejects_non_http_base_url() {
        let config = DashboardConfig {
            base_url: "ftp://example.com".to_string(),
            ..DashboardConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
