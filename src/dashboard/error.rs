//! Error types for refresh cycles.

use thiserror::Error;

/// Errors that abort a refresh cycle.
///
/// The endpoint is the short name shown to the user (`health/live`,
/// `summary`, `jobs`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshError {
    /// Endpoint answered with a non-success HTTP status
    #[error("{endpoint} failed: {status}")]
    Status { endpoint: &'static str, status: u16 },

    /// Request never produced a response
    #[error("{endpoint} request failed: {message}")]
    Transport {
        endpoint: &'static str,
        message: String,
    },

    /// Response body was not valid JSON
    #[error("{endpoint} returned invalid JSON: {message}")]
    Parse {
        endpoint: &'static str,
        message: String,
    },
}

impl RefreshError {
    /// Classify a reqwest error raised while sending or reading a response.
    pub fn from_reqwest(endpoint: &'static str, e: reqwest::Error, timeout_seconds: u64) -> Self {
        let message = if e.is_timeout() {
            format!("timed out after {}s", timeout_seconds)
        } else {
            e.to_string()
        };
        RefreshError::Transport { endpoint, message }
    }

    /// Endpoint the error refers to.
    pub fn endpoint(&self) -> &'static str {
        match self {
            RefreshError::Status { endpoint, .. }
            | RefreshError::Transport { endpoint, .. }
            | RefreshError::Parse { endpoint, .. } => endpoint,
        }
    }
}
