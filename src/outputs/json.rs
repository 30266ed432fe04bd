//! JSON run report.
//!
//! Reports are grouped by date so repeated runs on the same day sit side
//! by side: `{json_output_dir}/{YYYY-MM-DD}/{HHMMSS}.json`.

use crate::models::RunReport;
use chrono::{DateTime, Local};
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

/// Path the report for a run finished at `at` is written to.
pub fn report_path(json_output_dir: &str, at: &DateTime<Local>) -> PathBuf {
    PathBuf::from(json_output_dir)
        .join(at.format("%Y-%m-%d").to_string())
        .join(format!("{}.json", at.format("%H%M%S")))
}

/// Write a [`RunReport`] as pretty-printed JSON.
///
/// # Returns
///
/// The path written to, or an error if directory creation or writing fails.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_report(
    report: &RunReport,
    json_output_dir: &str,
    at: &DateTime<Local>,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(report)?;
    let path = report_path(json_output_dir, at);

    if let Some(dir) = path.parent() {
        if let Err(e) = fs::create_dir_all(dir).await {
            error!(dir = %dir.display(), error = %e, "Failed to create report dir");
            return Err(e.into());
        }
    }

    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote JSON run report");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Outcome, StopReason};
    use chrono::TimeZone;

    fn sample_report() -> RunReport {
        RunReport {
            checked_at: "2025-05-06T14:30:12+00:00".to_string(),
            listing_url: "https://news.ycombinator.com/newest".to_string(),
            target_count: 100,
            collected_count: 100,
            attempts: 4,
            stop_reason: StopReason::TargetReached,
            outcome: Outcome::Pass,
            violation: None,
            context: vec![],
            unparsed_ages: vec![],
        }
    }

    #[test]
    fn test_report_path_layout() {
        let at = Local.with_ymd_and_hms(2025, 5, 6, 14, 30, 12).unwrap();
        let path = report_path("/tmp/reports", &at);
        assert_eq!(path, PathBuf::from("/tmp/reports/2025-05-06/143012.json"));
    }

    #[tokio::test]
    async fn test_write_report_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let at = Local.with_ymd_and_hms(2025, 5, 6, 9, 15, 0).unwrap();

        let path = write_report(&sample_report(), dir.path().to_str().unwrap(), &at).await.unwrap();
        let written = tokio::fs::read_to_string(&path).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();

        assert_eq!(value["outcome"], "pass");
        assert_eq!(value["stop_reason"], "target_reached");
        assert_eq!(value["collected_count"], 100);
        assert!(value["violation"].is_null());
        assert_eq!(path, dir.path().join("2025-05-06").join("091500.json"));
    }
}
