//! Polling configuration

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What to do when a refresh is due while another is still in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Start it anyway; the last cycle to finish wins
    #[default]
    Allow,
    /// Skip it
    Skip,
}

impl FromStr for OverlapPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "allow" => Ok(OverlapPolicy::Allow),
            "skip" => Ok(OverlapPolicy::Skip),
            _ => Err(format!("Invalid overlap policy: {}", s)),
        }
    }
}

/// Refresh timer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    pub interval_ms: u64,
    pub overlap: OverlapPolicy,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: 5000,
            overlap: OverlapPolicy::Allow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_config_defaults() {
        let config = PollConfig::default();
        assert_eq!(config.interval_ms, 5000);
        assert_eq!(config.overlap, OverlapPolicy::Allow);
    }

    #[test]
    fn test_overlap_policy_serde() {
        let config: PollConfig = toml::from_str(r#"overlap = "skip""#).unwrap();
        assert_eq!(config.overlap, OverlapPolicy::Skip);
        assert_eq!(config.interval_ms, 5000);
    }

    #[test]
    fn test_overlap_policy_from_str() {
        assert_eq!(OverlapPolicy::from_str("SKIP").unwrap(), OverlapPolicy::Skip);
        assert_eq!(OverlapPolicy::from_str("allow").unwrap(), OverlapPolicy::Allow);
        assert!(OverlapPolicy::from_str("queue").is_err());
    }
}
