//! Completion reports posted to the activity backend.

#[cfg(test)]
#[path = "report_test.rs"]
mod report_test;

use canvas::activity::CompletionReport;
use canvas::engine::EngineCore;
use serde_json::Value;
use tracing::info;

use crate::error::CliError;

/// Backend route recording a completed activity.
pub const COMPLETE_PATH: &str = "/v1/auth/activities/complete";

pub fn endpoint(api_url: &str) -> String {
    format!("{}{COMPLETE_PATH}", api_url.trim_end_matches('/'))
}

/// Build the report for a completed session.
pub fn build(core: &EngineCore, mood_before: u8, mood_after: u8, notes: Option<String>) -> Result<CompletionReport, CliError> {
    let state = core.progress();
    if !state.complete {
        return Err(CliError::NotComplete(core.activity.id.clone(), state.adjusted_percent));
    }
    Ok(core.completion_report(mood_before, mood_after, notes)?)
}

/// POST `report` with bearer auth and return the server's JSON body.
pub async fn submit(api_url: &str, token: Option<&str>, report: &CompletionReport) -> Result<Value, CliError> {
    let token = token.ok_or(CliError::MissingToken)?;
    let client = reqwest::Client::new();
    let response = client.post(endpoint(api_url)).bearer_auth(token).json(report).send().await?;
    let status = response.status();
    let value = response.json::<Value>().await.unwrap_or_else(|_| Value::Null);

    if !status.is_success() {
        return Err(CliError::Server { status: status.as_u16(), message: value.to_string() });
    }
    info!(activity = %report.activity_id, duration = report.duration, "completion submitted");
    Ok(value)
}
