//! Pipeline configuration.

use std::time::Duration;

/// Bounds and cadence for operation polling.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay between status refreshes
    pub interval: Duration,
    /// Total wait before giving up (`None` = unbounded)
    pub max_wait: Option<Duration>,
    /// Maximum number of status refreshes (`None` = unbounded)
    pub max_attempts: Option<u32>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_wait: Some(Duration::from_secs(900)), // 15 minutes
            max_attempts: None,
        }
    }
}

impl PollConfig {
    /// Poll forever at the given interval.
    pub fn unbounded(interval: Duration) -> Self {
        Self {
            interval,
            max_wait: None,
            max_attempts: None,
        }
    }
}

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub poll: PollConfig,
    /// Check the final video locator before reporting success
    pub verify_access: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            poll: PollConfig::default(),
            verify_access: true,
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            poll: PollConfig {
                interval: Duration::from_secs(
                    std::env::var("ADGEN_POLL_INTERVAL_SECS")
                        .ok()
                        .and_then(|s| s.parse().ok())
                        .unwrap_or(5),
                ),
                max_wait: std::env::var("ADGEN_POLL_MAX_WAIT_SECS")
                    .ok()
                    .and_then(|s| s.parse::<u64>().ok())
                    .map_or(Some(Duration::from_secs(900)), |secs| {
                        (secs > 0).then(|| Duration::from_secs(secs))
                    }),
                max_attempts: std::env::var("ADGEN_POLL_MAX_ATTEMPTS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .filter(|n: &u32| *n > 0),
            },
            verify_access: std::env::var("ADGEN_VERIFY_ACCESS")
                .ok()
                .map(|s| !matches!(s.trim().to_lowercase().as_str(), "false" | "0" | "no"))
                .unwrap_or(true),
        }
    }
}
