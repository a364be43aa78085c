//! Pipeline metrics.
//!
//! Recorded through the `metrics` facade; the embedding binary decides
//! whether an exporter is installed.

use std::time::Duration;

use metrics::{counter, histogram};

use adgen_models::Stage;

use crate::error::ErrorKind;

/// Metric name constants for consistency.
pub mod names {
    /// Runs accepted by the controller.
    pub const RUNS_STARTED_TOTAL: &str = "adgen_runs_started_total";

    /// Runs that produced a result.
    pub const RUNS_COMPLETED_TOTAL: &str = "adgen_runs_completed_total";

    /// Runs that ended in an error, by kind.
    pub const RUNS_FAILED_TOTAL: &str = "adgen_runs_failed_total";

    /// Time spent in each stage, in seconds.
    pub const STAGE_DURATION_SECONDS: &str = "adgen_stage_duration_seconds";

    /// Operation status refreshes issued by the poller.
    pub const POLL_REFRESHES_TOTAL: &str = "adgen_poll_refreshes_total";

    /// Runs that continued with the original image.
    pub const ASSET_FALLBACKS_TOTAL: &str = "adgen_asset_fallbacks_total";
}

pub fn record_run_started(platform: &str) {
    counter!(names::RUNS_STARTED_TOTAL, "platform" => platform.to_string()).increment(1);
}

pub fn record_run_completed(platform: &str) {
    counter!(names::RUNS_COMPLETED_TOTAL, "platform" => platform.to_string()).increment(1);
}

pub fn record_run_failed(kind: ErrorKind) {
    counter!(names::RUNS_FAILED_TOTAL, "kind" => kind.as_str()).increment(1);
}

/// Record how long a stage took.
pub fn record_stage_duration(stage: Stage, elapsed: Duration) {
    histogram!(names::STAGE_DURATION_SECONDS, "stage" => stage.as_str())
        .record(elapsed.as_secs_f64());
}

pub fn record_poll_refresh() {
    counter!(names::POLL_REFRESHES_TOTAL).increment(1);
}

pub fn record_asset_fallback() {
    counter!(names::ASSET_FALLBACKS_TOTAL).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names() {
        assert!(names::RUNS_FAILED_TOTAL.ends_with("_total"));
        assert!(names::STAGE_DURATION_SECONDS.contains("seconds"));
        assert!(names::POLL_REFRESHES_TOTAL.starts_with("adgen_"));
    }

    #[test]
    fn test_recording_without_recorder() {
        // No recorder installed: calls are no-ops.
        record_run_started("youtube_shorts");
        record_run_failed(ErrorKind::PollTimeout);
        record_stage_duration(Stage::Analyzing, Duration::from_millis(1500));
    }
}
