//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Monitoring API connection
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Unset means requests never time out
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Host page and refresh behavior
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_container_id")]
    pub container_id: String,

    #[serde(default = "default_refresh_id")]
    pub refresh_id: String,

    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// Where rendered HTML is written (stdout when unset)
    #[serde(default)]
    pub output: Option<PathBuf>,
}

fn default_container_id() -> String {
    "dashboard-container".to_string()
}

fn default_refresh_id() -> String {
    "refresh-btn".to_string()
}

fn default_refresh_interval() -> u64 {
    30
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            container_id: default_container_id(),
            refresh_id: default_refresh_id(),
            refresh_interval_secs: default_refresh_interval(),
            output: None,
        }
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
    "info".to_string()
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

    fn parse(content: &str) -> Result<Self, String> {
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

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("guardian-dashboard").join("config.toml")),
            Some(PathBuf::from("./guardian.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("GUARDIAN_API_URL") {
            self.api.base_url = url;
        }

        if let Some(id) = var("GUARDIAN_CONTAINER_ID") {
            self.dashboard.container_id = id;
        }
        if let Some(interval) = var("GUARDIAN_REFRESH_INTERVAL") {
            match interval.parse() {
                Ok(secs) => self.dashboard.refresh_interval_secs = secs,
                Err(_) => tracing::warn!("Ignoring invalid GUARDIAN_REFRESH_INTERVAL: {}", interval),
            }
        }

        if let Some(level) = var("GUARDIAN_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("GUARDIAN_LOG_FORMAT") {
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
    r#"# Guardian Dashboard Configuration
#
# Environment variables override these settings:
# - GUARDIAN_API_URL
# - GUARDIAN_CONTAINER_ID
# - GUARDIAN_REFRESH_INTERVAL
# - GUARDIAN_LOG_LEVEL
# - GUARDIAN_LOG_FORMAT

[api]
# Monitoring API base URL
base_url = "http://localhost:5000"

# Request timeout in seconds (unset: wait forever)
# request_timeout_secs = 30

[dashboard]
# Id of the dashboard container element
container_id = "dashboard-container"

# Id of the manual refresh control
refresh_id = "refresh-btn"

# Reload interval for `watch` (seconds)
refresh_interval_secs = 30

# Write rendered HTML here instead of stdout
# output = "dashboard.html"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert!(config.api.request_timeout().is_none());
        assert_eq!(config.dashboard.container_id, "dashboard-container");
        assert_eq!(config.dashboard.refresh_id, "refresh-btn");
        assert_eq!(config.dashboard.refresh_interval_secs, 30);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.dashboard.refresh_interval_secs, 30);
        assert!(config.dashboard.output.is_none());
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse(
            r#"
            [api]
            base_url = "http://parent.local:8000"
            request_timeout_secs = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://parent.local:8000");
        assert_eq!(config.api.request_timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.dashboard.container_id, "dashboard-container");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[dashboard]\ncontainer_id = \"main\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.dashboard.container_id, "main");
    }

    #[test]
    fn test_load_errors() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nbase_url = ").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("GUARDIAN_API_URL", "http://override:9000"),
            ("GUARDIAN_REFRESH_INTERVAL", "5"),
            ("GUARDIAN_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://override:9000");
        assert_eq!(config.dashboard.refresh_interval_secs, 5);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_interval_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| {
            (key == "GUARDIAN_REFRESH_INTERVAL").then(|| "soon".to_string())
        });
        assert_eq!(config.dashboard.refresh_interval_secs, 30);
    }
}
