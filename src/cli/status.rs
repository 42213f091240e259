//! Status command implementation

use crate::cli::{load_config_with_overrides, StatusArgs};
use crate::dashboard::{render_dashboard, CycleOutcome, DashboardController, ViewState};

/// Format a view state for the `status` command
pub fn format_status(state: &ViewState, json: bool) -> Result<String, serde_json::Error> {
    if json {
        serde_json::to_string_pretty(state)
    } else {
        Ok(render_dashboard(state))
    }
}

/// Handle `panel status`: run exactly one refresh cycle.
///
/// Returns the formatted dashboard and whether the cycle succeeded.
pub async fn handle_status(
    args: &StatusArgs,
) -> Result<(String, bool), Box<dyn std::error::Error>> {
    let config = load_config_with_overrides(&args.connection)?;
    config.validate()?;
    crate::logging::init_tracing(&config.logging)?;

    let controller = DashboardController::from_config(&config)?;
    let outcome = controller.refresh().await;
    let output = format_status(&controller.snapshot(), args.json)?;

    Ok((output, outcome == CycleOutcome::Completed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{JobRecord, LiveStatus};
    use serde_json::json;

    fn loaded_state() -> ViewState {
        ViewState {
            live: Some(LiveStatus {
                status: Some("ok".to_string()),
                ts: Some(1_700_000_000.0),
            }),
            summary: Some(json!({"jobs_total": 3})),
            jobs: vec![JobRecord {
                job_id: Some("j1".to_string()),
                ..Default::default()
            }],
            error: None,
            loading: false,
        }
    }

    #[test]
    fn test_format_status_json_valid() {
        let output = format_status(&loaded_state(), true).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["live"]["status"], "ok");
        assert_eq!(parsed["jobs"][0]["job_id"], "j1");
        assert_eq!(parsed["loading"], false);
        assert!(parsed["error"].is_null());
    }

    #[test]
    fn test_format_status_pretty() {
        let output = format_status(&loaded_state(), false).unwrap();
        assert!(output.contains("P1 Control Panel"));
        assert!(output.contains("jobs_total"));
        assert!(output.contains("j1"));
    }
}
