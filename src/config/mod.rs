//! Configuration module for the control panel
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`PANEL_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use panel::config::PanelConfig;
//!
//! let config = PanelConfig::default();
//! assert_eq!(config.poll.interval_ms, 5000);
//!
//! let toml = r#"
//! [api]
//! base_url = "http://backend:8000"
//! "#;
//! let config: PanelConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.api.base_url, "http://backend:8000");
//! ```

pub mod api;
pub mod error;
pub mod logging;
pub mod poll;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LogSink, LoggingConfig};
pub use poll::{OverlapPolicy, PollConfig};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the control panel.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PanelConfig {
    /// Backend location and request settings
    pub api: ApiConfig,
    /// Refresh timer settings
    pub poll: PollConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl PanelConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("PANEL_API_URL") {
            self.api.base_url = url;
        }
        if let Ok(interval) = std::env::var("PANEL_INTERVAL_MS") {
            if let Ok(ms) = interval.parse() {
                self.poll.interval_ms = ms;
            }
        }
        if let Ok(level) = std::env::var("PANEL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("PANEL_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }
        if let Ok(file) = std::env::var("PANEL_LOG_FILE") {
            self.logging.file = Some(file.into());
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.is_empty() {
            return Err(ConfigError::Validation {
                field: "api.base_url".to_string(),
                message: "URL cannot be empty".to_string(),
            });
        }
        if let Err(e) = reqwest::Url::parse(&self.api.base_url) {
            return Err(ConfigError::Validation {
                field: "api.base_url".to_string(),
                message: e.to_string(),
            });
        }
        if self.api.jobs_limit == 0 {
            return Err(ConfigError::Validation {
                field: "api.jobs_limit".to_string(),
                message: "limit must be non-zero".to_string(),
            });
        }
        if self.api.timeout_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "api.timeout_seconds".to_string(),
                message: "timeout must be non-zero".to_string(),
            });
        }
        if self.poll.interval_ms == 0 {
            return Err(ConfigError::Validation {
                field: "poll.interval_ms".to_string(),
                message: "interval must be non-zero".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_panel_config_defaults() {
        let config = PanelConfig::default();
        assert_eq!(config.api.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.poll.interval_ms, 5000);
        assert_eq!(config.logging.level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_parse_example_toml() {
        let toml = include_str!("../../panel.example.toml");
        let config: PanelConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.api.jobs_limit, 10);
        assert_eq!(config.poll.overlap, OverlapPolicy::Allow);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_load_from_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[poll]\ninterval_ms = 1000").unwrap();

        let config = PanelConfig::load(Some(temp.path())).unwrap();
        assert_eq!(config.poll.interval_ms, 1000);
        assert_eq!(config.api.path_prefix, "/api");
    }

    #[test]
    fn test_config_load_invalid_toml() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[poll\ninterval_ms = ").unwrap();

        let result = PanelConfig::load(Some(temp.path()));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_missing_file_error() {
        let result = PanelConfig::load(Some(Path::new("/nonexistent/panel.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_config_load_none_returns_defaults() {
        let config = PanelConfig::load(None).unwrap();
        assert_eq!(config.poll.interval_ms, 5000);
    }

    #[test]
    fn test_config_env_override_url() {
        std::env::set_var("PANEL_API_URL", "http://override:1234");
        let config = PanelConfig::default().with_env_overrides();
        std::env::remove_var("PANEL_API_URL");

        assert_eq!(config.api.base_url, "http://override:1234");
    }

    #[test]
    fn test_config_env_override_interval() {
        std::env::set_var("PANEL_INTERVAL_MS", "250");
        let config = PanelConfig::default().with_env_overrides();
        assert_eq!(config.poll.interval_ms, 250);

        // Invalid value keeps the default
        std::env::set_var("PANEL_INTERVAL_MS", "soon");
        let config = PanelConfig::default().with_env_overrides();
        std::env::remove_var("PANEL_INTERVAL_MS");
        assert_eq!(config.poll.interval_ms, 5000);
    }

    #[test]
    fn test_config_env_override_log_format() {
        std::env::set_var("PANEL_LOG_FORMAT", "json");
        let config = PanelConfig::default().with_env_overrides();
        assert_eq!(config.logging.format, LogFormat::Json);

        std::env::set_var("PANEL_LOG_FORMAT", "xml");
        let config = PanelConfig::default().with_env_overrides();
        std::env::remove_var("PANEL_LOG_FORMAT");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_config_env_override_log_file() {
        std::env::set_var("PANEL_LOG_FILE", "/tmp/panel-watch.log");
        let config = PanelConfig::default().with_env_overrides();
        std::env::remove_var("PANEL_LOG_FILE");
        assert_eq!(
            config.logging.sink(),
            LogSink::File(Path::new("/tmp/panel-watch.log"))
        );
    }

    #[test]
    fn test_config_validation_bad_url() {
        let mut config = PanelConfig::default();
        config.api.base_url = "not a url".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field == "api.base_url"
        ));

        config.api.base_url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_interval() {
        let mut config = PanelConfig::default();
        config.poll.interval_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field == "poll.interval_ms"
        ));
    }

    #[test]
    fn test_config_validation_zero_limit_and_timeout() {
        let mut config = PanelConfig::default();
        config.api.jobs_limit = 0;
        assert!(config.validate().is_err());

        let mut config = PanelConfig::default();
        config.api.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }
}
