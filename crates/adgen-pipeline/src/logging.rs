//! Structured run logging.

use tracing::{error, info, warn, Span};

use adgen_models::{RunId, SocialPlatform, Stage};

/// Per-run logger carrying the run ID and target platform.
#[derive(Debug, Clone)]
pub struct RunLogger {
    run_id: String,
    platform: &'static str,
}

impl RunLogger {
    pub fn new(run_id: &RunId, platform: SocialPlatform) -> Self {
        Self {
            run_id: run_id.to_string(),
            platform: platform.as_str(),
        }
    }

    pub fn log_start(&self, message: &str) {
        info!(run_id = %self.run_id, platform = self.platform, "Run started: {}", message);
    }

    /// Log the start of a stage.
    pub fn log_stage(&self, stage: Stage) {
        info!(
            run_id = %self.run_id,
            stage = %stage,
            "Stage started: {}", stage.default_message()
        );
    }

    pub fn log_warning(&self, message: &str) {
        warn!(run_id = %self.run_id, platform = self.platform, "Run warning: {}", message);
    }

    pub fn log_error(&self, message: &str) {
        error!(run_id = %self.run_id, platform = self.platform, "Run failed: {}", message);
    }

    pub fn log_completion(&self, message: &str) {
        info!(run_id = %self.run_id, platform = self.platform, "Run completed: {}", message);
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Span wrapping everything a run does.
    pub fn create_span(&self) -> Span {
        tracing::info_span!("run", run_id = %self.run_id, platform = self.platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_logger_creation() {
        let run_id = RunId::from_string("run-42");
        let logger = RunLogger::new(&run_id, SocialPlatform::LinkedinFeed);
        assert_eq!(logger.run_id(), "run-42");
        logger.log_stage(Stage::Analyzing);
        let _span = logger.create_span();
    }
}
