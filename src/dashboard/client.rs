//! HTTP client for the backend status endpoints.

use super::error::RefreshError;
use super::types::{jobs_from_value, LiveStatus, Snapshot};
use crate::config::ApiConfig;
use serde_json::Value;
use std::time::Duration;

/// The three endpoints polled on every refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Live,
    Summary,
    Jobs,
}

impl Endpoint {
    /// Short name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::Live => "health/live",
            Endpoint::Summary => "summary",
            Endpoint::Jobs => "jobs",
        }
    }

    /// Path relative to the API prefix.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Live => "/health/live",
            Endpoint::Summary => "/summary",
            Endpoint::Jobs => "/jobs",
        }
    }
}

/// Fetches live status, summary and recent jobs from the backend.
#[derive(Debug, Clone)]
pub struct StatusClient {
    client: reqwest::Client,
    base: String,
    jobs_limit: u32,
    timeout_seconds: u64,
}

impl StatusClient {
    /// Create a client with its own connection pool and request timeout.
    pub fn new(config: &ApiConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self::with_client(config, client))
    }

    /// Create a client around an existing reqwest client (for testing).
    pub fn with_client(config: &ApiConfig, client: reqwest::Client) -> Self {
        let base = format!(
            "{}/{}",
            config.base_url.trim_end_matches('/'),
            config.path_prefix.trim_matches('/')
        );
        Self {
            client,
            base: base.trim_end_matches('/').to_string(),
            jobs_limit: config.jobs_limit,
            timeout_seconds: config.timeout_seconds,
        }
    }

    /// Full URL of an endpoint, without query string.
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base, endpoint.path())
    }

    async fn get(&self, endpoint: Endpoint) -> Result<reqwest::Response, RefreshError> {
        let mut request = self.client.get(self.url(endpoint));
        if endpoint == Endpoint::Jobs {
            request = request.query(&[("limit", self.jobs_limit)]);
        }
        request
            .send()
            .await
            .map_err(|e| RefreshError::from_reqwest(endpoint.name(), e, self.timeout_seconds))
    }

    async fn read_json(
        &self,
        endpoint: Endpoint,
        response: reqwest::Response,
    ) -> Result<Value, RefreshError> {
        let body = response
            .text()
            .await
            .map_err(|e| RefreshError::from_reqwest(endpoint.name(), e, self.timeout_seconds))?;
        serde_json::from_str(&body).map_err(|e| RefreshError::Parse {
            endpoint: endpoint.name(),
            message: e.to_string(),
        })
    }

    /// Run the fetch half of a refresh cycle.
    ///
    /// All three requests are in flight together. Statuses are checked in
    /// the order live, summary, jobs before any body is read, so the first
    /// failing endpoint in that order is the one reported.
    pub async fn fetch_snapshot(&self) -> Result<Snapshot, RefreshError> {
        let (live, summary, jobs) = tokio::try_join!(
            self.get(Endpoint::Live),
            self.get(Endpoint::Summary),
            self.get(Endpoint::Jobs),
        )?;

        for (endpoint, response) in [
            (Endpoint::Live, &live),
            (Endpoint::Summary, &summary),
            (Endpoint::Jobs, &jobs),
        ] {
            let status = response.status();
            if !status.is_success() {
                return Err(RefreshError::Status {
                    endpoint: endpoint.name(),
                    status: status.as_u16(),
                });
            }
        }

        let live = self.read_json(Endpoint::Live, live).await?;
        let summary = self.read_json(Endpoint::Summary, summary).await?;
        let jobs = self.read_json(Endpoint::Jobs, jobs).await?;

        Ok(Snapshot {
            live: LiveStatus::from_value(&live),
            summary,
            jobs: jobs_from_value(&jobs),
        })
    }
}
