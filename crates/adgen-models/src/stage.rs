//! Pipeline stages and progress events.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of a pipeline run.
///
/// The working stages run strictly in order:
/// `Analyzing -> GeneratingAsset -> GeneratingVideo -> Complete`.
/// `Failed` and `Cancelled` are out-of-band terminal tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Vision analysis and creative brief drafting
    Analyzing,
    /// Ad visual generation
    GeneratingAsset,
    /// Video synthesis and polling
    GeneratingVideo,
    /// Run finished with a result
    Complete,
    /// Run aborted with an error
    Failed,
    /// Run aborted by the caller
    Cancelled,
}

impl Stage {
    /// Stages of a successful run, in order.
    pub const ORDERED: &'static [Stage] = &[
        Stage::Analyzing,
        Stage::GeneratingAsset,
        Stage::GeneratingVideo,
        Stage::Complete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Analyzing => "analyzing",
            Stage::GeneratingAsset => "generating_asset",
            Stage::GeneratingVideo => "generating_video",
            Stage::Complete => "complete",
            Stage::Failed => "failed",
            Stage::Cancelled => "cancelled",
        }
    }

    /// Check if this is a terminal stage (no more events expected).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Complete | Stage::Failed | Stage::Cancelled)
    }

    /// Position in the ordered sequence, `None` for the abort tags.
    pub fn position(&self) -> Option<usize> {
        Self::ORDERED.iter().position(|s| s == self)
    }

    /// Whether `next` may directly follow `previous` (`None` = run start).
    pub fn is_valid_transition(previous: Option<Stage>, next: Stage) -> bool {
        match previous {
            None => matches!(next, Stage::Analyzing | Stage::Failed | Stage::Cancelled),
            Some(prev) if prev.is_terminal() => false,
            Some(prev) => match next {
                Stage::Failed | Stage::Cancelled => true,
                _ => match (prev.position(), next.position()) {
                    (Some(p), Some(n)) => n == p + 1,
                    _ => false,
                },
            },
        }
    }

    /// Default status line shown to the user when the stage begins.
    pub fn default_message(&self) -> &'static str {
        match self {
            Stage::Analyzing => "Analyzing product and drafting creative brief...",
            Stage::GeneratingAsset => "Creating high-fidelity ad visual...",
            Stage::GeneratingVideo => "Rendering cinematic video (this may take a minute)...",
            Stage::Complete => "Ad generation complete!",
            Stage::Failed => "An error occurred.",
            Stage::Cancelled => "Generation cancelled.",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Progress notification emitted by the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProgressEvent {
    /// Stage that is starting (or the terminal tag)
    pub stage: Stage,
    /// Human-readable status line
    pub message: String,
    /// When the event was emitted
    pub timestamp: DateTime<Utc>,
}

impl ProgressEvent {
    pub fn new(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Event carrying the stage's default message.
    pub fn for_stage(stage: Stage) -> Self {
        Self::new(stage, stage.default_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_transitions() {
        assert!(Stage::is_valid_transition(None, Stage::Analyzing));
        assert!(!Stage::is_valid_transition(None, Stage::GeneratingAsset));
        // Precondition failures abort before the first stage.
        assert!(Stage::is_valid_transition(None, Stage::Failed));
        assert!(Stage::is_valid_transition(Some(Stage::Analyzing), Stage::GeneratingAsset));
        assert!(Stage::is_valid_transition(Some(Stage::GeneratingVideo), Stage::Complete));
        assert!(!Stage::is_valid_transition(Some(Stage::Analyzing), Stage::GeneratingVideo));
        assert!(!Stage::is_valid_transition(Some(Stage::GeneratingAsset), Stage::Analyzing));
    }

    #[test]
    fn test_abort_tags() {
        for stage in &Stage::ORDERED[..3] {
            assert!(Stage::is_valid_transition(Some(*stage), Stage::Failed));
            assert!(Stage::is_valid_transition(Some(*stage), Stage::Cancelled));
        }
        // Nothing follows a terminal tag.
        assert!(!Stage::is_valid_transition(Some(Stage::Failed), Stage::Failed));
        assert!(!Stage::is_valid_transition(Some(Stage::Complete), Stage::Failed));
    }

    #[test]
    fn test_terminal() {
        assert!(Stage::Complete.is_terminal());
        assert!(Stage::Failed.is_terminal());
        assert!(Stage::Cancelled.is_terminal());
        assert!(!Stage::GeneratingVideo.is_terminal());
        assert_eq!(Stage::Failed.position(), None);
    }

    #[test]
    fn test_event_serialization() {
        let event = ProgressEvent::for_stage(Stage::GeneratingAsset);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["stage"], "generating_asset");
        assert_eq!(json["message"], "Creating high-fidelity ad visual...");
    }
}
