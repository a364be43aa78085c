//! Drives a long-running video operation to a terminal state.

use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use adgen_genai::{ApiKey, GenerativeBackend, VideoOperation};

use crate::cancel::CancelToken;
use crate::classifier::classify;
use crate::config::PollConfig;
use crate::error::{PipelineError, RunResult};
use crate::metrics;

/// Serial status poller for one operation.
#[derive(Debug, Clone)]
pub struct OperationPoller {
    config: PollConfig,
}

impl OperationPoller {
    pub fn new(config: PollConfig) -> Self {
        Self { config }
    }

    /// Refresh `operation` until it is done.
    ///
    /// Returns the terminal handle. An operation error, a failed refresh call,
    /// an exceeded bound or cancellation ends polling with an error.
    pub async fn wait(
        &self,
        backend: &dyn GenerativeBackend,
        key: &ApiKey,
        mut operation: VideoOperation,
        cancel: &CancelToken,
    ) -> RunResult<VideoOperation> {
        let started = Instant::now();
        let mut refreshes: u32 = 0;

        check_operation_error(&operation)?;

        while !operation.is_terminal() {
            if cancel.is_cancelled() {
                return Err(PipelineError::cancelled());
            }

            if let Some(max) = self.config.max_attempts {
                if refreshes >= max {
                    return Err(PipelineError::poll_timeout(format!(
                        "Video generation still running after {} status checks",
                        refreshes
                    )));
                }
            }

            if let Some(max_wait) = self.config.max_wait {
                if started.elapsed() + self.config.interval > max_wait {
                    return Err(PipelineError::poll_timeout(format!(
                        "Video generation did not finish within {}s",
                        max_wait.as_secs()
                    )));
                }
            }

            if cancel
                .run_until_cancelled(sleep(self.config.interval))
                .await
                .is_none()
            {
                return Err(PipelineError::cancelled());
            }

            refreshes += 1;
            metrics::record_poll_refresh();
            debug!(operation = %operation.name, refreshes, "Refreshing video operation");

            operation = match cancel
                .run_until_cancelled(backend.refresh_operation(key, &operation))
                .await
            {
                Some(result) => result.map_err(|e| classify(&e))?,
                None => return Err(PipelineError::cancelled()),
            };

            check_operation_error(&operation)?;
        }

        info!(
            operation = %operation.name,
            refreshes,
            elapsed_secs = started.elapsed().as_secs(),
            "Video operation finished"
        );
        Ok(operation)
    }
}

fn check_operation_error(operation: &VideoOperation) -> RunResult<()> {
    match &operation.error {
        Some(err) => Err(PipelineError::remote_operation(err.message.clone())),
        None => Ok(()),
    }
}
