//! View state types for the control panel

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Health snapshot from `/health/live`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveStatus {
    /// Reported status label, `None` when missing, empty or zero
    pub status: Option<String>,
    /// Unix timestamp in seconds, `None` when missing or zero
    pub ts: Option<f64>,
}

impl LiveStatus {
    /// Build a snapshot from an arbitrary JSON payload.
    ///
    /// A numeric status is shown as-is. Other unexpected types are treated as
    /// absent, as are an empty status string and a zero timestamp.
    pub fn from_value(value: &Value) -> Self {
        let status = display_field(value, "status");
        let ts = value
            .get("ts")
            .and_then(Value::as_f64)
            .filter(|ts| *ts != 0.0);

        Self { status, ts }
    }

    /// True when the backend reports exactly `"ok"`.
    pub fn is_ok(&self) -> bool {
        self.status.as_deref() == Some("ok")
    }
}

/// One row of job metadata from `/jobs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub job_id: Option<String>,
    pub id: Option<String>,
    pub backend: Option<String>,
    pub status: Option<String>,
}

impl JobRecord {
    /// Build a record from one element of the jobs array.
    ///
    /// Numbers are stringified. Empty strings, zero, booleans and null count
    /// as absent, and non-object elements produce a record with every field
    /// absent.
    pub fn from_value(value: &Value) -> Self {
        Self {
            job_id: display_field(value, "job_id"),
            id: display_field(value, "id"),
            backend: display_field(value, "backend"),
            status: display_field(value, "status"),
        }
    }

    /// Identity used for the Job ID column: `job_id`, then `id`.
    pub fn key(&self) -> Option<&str> {
        self.job_id.as_deref().or(self.id.as_deref())
    }
}

/// Coerce a jobs payload into records; anything but an array yields none.
pub fn jobs_from_value(value: &Value) -> Vec<JobRecord> {
    match value {
        Value::Array(items) => items.iter().map(JobRecord::from_value).collect(),
        _ => Vec::new(),
    }
}

fn display_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// Snapshot consumed by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub live: Option<LiveStatus>,
    pub summary: Option<Value>,
    pub jobs: Vec<JobRecord>,
    pub error: Option<String>,
    pub loading: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            live: None,
            summary: None,
            jobs: Vec::new(),
            error: None,
            loading: true,
        }
    }
}

/// Parsed payloads of one successful refresh cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub live: LiveStatus,
    pub summary: Value,
    pub jobs: Vec<JobRecord>,
}

impl ViewState {
    /// Mark the start of a refresh cycle.
    pub fn begin_cycle(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Apply the outcome of a refresh cycle.
    ///
    /// A failed cycle keeps the previous data and only records the error.
    pub fn finish_cycle(&mut self, outcome: Result<Snapshot, String>) {
        match outcome {
            Ok(snapshot) => {
                self.live = Some(snapshot.live);
                self.summary = Some(snapshot.summary);
                self.jobs = snapshot.jobs;
            }
            Err(message) => self.error = Some(message),
        }
        self.loading = false;
    }
}
