//! Backend API configuration

use serde::{Deserialize, Serialize};

/// Where the backend lives and how to talk to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Scheme, host and port of the backend
    pub base_url: String,
    /// Prefix prepended to every endpoint path
    pub path_prefix: String,
    /// `limit` query parameter sent to the jobs endpoint
    pub jobs_limit: u32,
    /// Per-request timeout
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            path_prefix: "/api".to_string(),
            jobs_limit: 10,
            timeout_seconds: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_config_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.path_prefix, "/api");
        assert_eq!(config.jobs_limit, 10);
    }

    #[test]
    fn test_api_config_partial_toml() {
        let config: ApiConfig = toml::from_str(r#"base_url = "http://panel:9000""#).unwrap();
        assert_eq!(config.base_url, "http://panel:9000");
        assert_eq!(config.jobs_limit, 10);
    }
}
