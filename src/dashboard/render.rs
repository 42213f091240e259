//! Terminal rendering of the view state

use super::types::{JobRecord, LiveStatus, ViewState};
use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::Value;

pub const TITLE: &str = "P1 Control Panel";
pub const NO_JOBS: &str = "No jobs found.";
pub const SUMMARY_LOADING: &str = "Loading...";
const MISSING: &str = "-";

/// Styling of the live status pill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PillStyle {
    Ok,
    Bad,
}

/// "ok" styling only when the backend reports exactly `ok`.
pub fn pill_style(live: Option<&LiveStatus>) -> PillStyle {
    match live {
        Some(live) if live.is_ok() => PillStyle::Ok,
        _ => PillStyle::Bad,
    }
}

pub fn live_label(live: Option<&LiveStatus>) -> &str {
    live.and_then(|l| l.status.as_deref()).unwrap_or("unknown")
}

/// Local date-time of a Unix timestamp in seconds, or `-`.
pub fn format_timestamp(ts: Option<f64>) -> String {
    ts.and_then(|ts| DateTime::<Utc>::from_timestamp_millis((ts * 1000.0) as i64))
        .map(|dt| {
            dt.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| MISSING.to_string())
}

/// Pretty-printed summary, or the loading placeholder.
///
/// `null`, `false`, `0` and `""` all show the placeholder. Empty objects and
/// arrays are printed.
pub fn summary_text(summary: Option<&Value>) -> String {
    match summary {
        Some(value) if !is_blank(value) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        _ => SUMMARY_LOADING.to_string(),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

pub fn refresh_label(loading: bool) -> &'static str {
    if loading {
        "Refreshing..."
    } else {
        "[r] Refresh"
    }
}

/// Format jobs as a table
pub fn format_jobs_table(jobs: &[JobRecord]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Job ID", "Backend", "Status"]);

    for job in jobs {
        table.add_row(vec![
            Cell::new(job.key().unwrap_or(MISSING)),
            Cell::new(job.backend.as_deref().unwrap_or(MISSING)),
            Cell::new(job.status.as_deref().unwrap_or(MISSING)),
        ]);
    }

    table.to_string()
}

fn render_pill(live: Option<&LiveStatus>) -> String {
    let text = format!(" {} ", live_label(live));
    match pill_style(live) {
        PillStyle::Ok => text.black().on_green().bold().to_string(),
        PillStyle::Bad => text.white().on_red().bold().to_string(),
    }
}

/// Render the whole dashboard for one state snapshot.
pub fn render_dashboard(state: &ViewState) -> String {
    let live = state.live.as_ref();
    let mut lines = vec![
        format!("{}    {}", TITLE.bold(), refresh_label(state.loading).dimmed()),
        String::new(),
    ];

    if let Some(error) = state.error.as_deref().filter(|e| !e.is_empty()) {
        lines.push(format!("{} {}", "Error:".red().bold(), error.red()));
        lines.push(String::new());
    }

    lines.push("Backend Live".bold().underline().to_string());
    lines.push(render_pill(live));
    lines.push(format!(
        "Timestamp: {}",
        format_timestamp(live.and_then(|l| l.ts))
    ));
    lines.push(String::new());

    lines.push("Summary".bold().underline().to_string());
    lines.push(summary_text(state.summary.as_ref()));
    lines.push(String::new());

    lines.push("Recent Jobs".bold().underline().to_string());
    if state.jobs.is_empty() {
        lines.push(NO_JOBS.to_string());
    } else {
        lines.push(format_jobs_table(&state.jobs));
    }

    lines.join("\n")
}
