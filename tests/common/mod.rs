//! Shared test utilities for control panel integration tests.
//!
//! Provides mock backend helpers and controller builders to reduce
//! duplication across test files.

#![allow(dead_code)]

use panel::config::{ApiConfig, OverlapPolicy, PollConfig};
use panel::dashboard::{DashboardController, StatusClient};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const LIVE_PATH: &str = "/api/health/live";
pub const SUMMARY_PATH: &str = "/api/summary";
pub const JOBS_PATH: &str = "/api/jobs";

// =============================================================================
// Payloads
// =============================================================================

pub fn live_ok() -> Value {
    json!({"status": "ok", "ts": 1700000000})
}

pub fn summary_kv() -> Value {
    json!({"k": "v"})
}

pub fn one_job() -> Value {
    json!([{"job_id": "j1", "backend": "b1", "status": "done"}])
}

// =============================================================================
// Mock backend
// =============================================================================

/// Mount a GET endpoint answering with the given template.
pub async fn mount(server: &MockServer, endpoint: &str, response: ResponseTemplate) {
    if endpoint == JOBS_PATH {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .and(query_param("limit", "10"))
            .respond_with(response)
            .mount(server)
            .await;
    } else {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(response)
            .mount(server)
            .await;
    }
}

/// Mount all three endpoints with 200 JSON bodies.
pub async fn mount_backend(server: &MockServer, live: Value, summary: Value, jobs: Value) {
    mount(server, LIVE_PATH, ResponseTemplate::new(200).set_body_json(live)).await;
    mount(server, SUMMARY_PATH, ResponseTemplate::new(200).set_body_json(summary)).await;
    mount(server, JOBS_PATH, ResponseTemplate::new(200).set_body_json(jobs)).await;
}

/// Mount all three endpoints with 200 JSON bodies after a delay.
pub async fn mount_slow_backend(server: &MockServer, delay: Duration) {
    mount(
        server,
        LIVE_PATH,
        ResponseTemplate::new(200).set_body_json(live_ok()).set_delay(delay),
    )
    .await;
    mount(
        server,
        SUMMARY_PATH,
        ResponseTemplate::new(200).set_body_json(summary_kv()).set_delay(delay),
    )
    .await;
    mount(
        server,
        JOBS_PATH,
        ResponseTemplate::new(200).set_body_json(one_job()).set_delay(delay),
    )
    .await;
}

/// Number of requests the server has received for a path.
pub async fn request_count(server: &MockServer, endpoint: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == endpoint)
        .count()
}

// =============================================================================
// Controller builders
// =============================================================================

pub fn api_config(server: &MockServer) -> ApiConfig {
    ApiConfig {
        base_url: server.uri(),
        timeout_seconds: 5,
        ..Default::default()
    }
}

pub fn make_controller(server: &MockServer, poll: PollConfig) -> DashboardController {
    let client = StatusClient::new(&api_config(server)).unwrap();
    DashboardController::new(client, poll)
}

/// Controller whose requests give up after `timeout_seconds`.
pub fn timeout_controller(server: &MockServer, timeout_seconds: u64) -> DashboardController {
    let api = ApiConfig {
        timeout_seconds,
        ..api_config(server)
    };
    DashboardController::new(StatusClient::new(&api).unwrap(), PollConfig::default())
}

pub fn default_controller(server: &MockServer) -> DashboardController {
    make_controller(server, PollConfig::default())
}

pub fn fast_controller(server: &MockServer, interval_ms: u64) -> DashboardController {
    make_controller(
        server,
        PollConfig {
            interval_ms,
            overlap: OverlapPolicy::Allow,
        },
    )
}
