//! Pipeline error taxonomy.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use adgen_models::ModelError;

pub type RunResult<T> = Result<T, PipelineError>;

const GENERIC_FAILURE: &str = "Failed to generate video. Please try again.";

/// Category of a terminal pipeline failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing image or description, or description too long
    InputInvalid,
    /// No usable credential at run start
    EmptyCredential,
    /// Analysis output could not be parsed into a complete brief
    BriefIncomplete,
    /// The long-running operation reported an error
    RemoteOperationError,
    /// The operation finished without a video locator
    MissingResult,
    /// A remote call rejected the credential
    CredentialRejected,
    /// The finished video cannot be downloaded with this credential
    PermissionDenied,
    /// Polling exceeded its configured bounds
    PollTimeout,
    /// The caller cancelled the run
    Cancelled,
    /// Any other remote failure
    Unclassified,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InputInvalid => "input_invalid",
            ErrorKind::EmptyCredential => "empty_credential",
            ErrorKind::BriefIncomplete => "brief_incomplete",
            ErrorKind::RemoteOperationError => "remote_operation_error",
            ErrorKind::MissingResult => "missing_result",
            ErrorKind::CredentialRejected => "credential_rejected",
            ErrorKind::PermissionDenied => "permission_denied",
            ErrorKind::PollTimeout => "poll_timeout",
            ErrorKind::Cancelled => "cancelled",
            ErrorKind::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Terminal failure of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct PipelineError {
    kind: ErrorKind,
    message: String,
    credential_should_be_invalidated: bool,
}

impl PipelineError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            credential_should_be_invalidated: kind == ErrorKind::CredentialRejected,
        }
    }

    pub fn input_invalid(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InputInvalid, msg)
    }

    pub fn empty_credential() -> Self {
        Self::new(
            ErrorKind::EmptyCredential,
            "API key not valid (empty). Please enter a valid API key.",
        )
    }

    pub fn brief_incomplete(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::BriefIncomplete, msg)
    }

    /// Error reported by the operation itself; the message is kept verbatim.
    pub fn remote_operation(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::RemoteOperationError, msg)
    }

    pub fn missing_result() -> Self {
        Self::new(
            ErrorKind::MissingResult,
            "Video generation completed but no URI returned.",
        )
    }

    pub fn credential_rejected(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialRejected, msg)
    }

    pub fn permission_denied() -> Self {
        Self::new(
            ErrorKind::PermissionDenied,
            "Permission Denied (403). The generated video exists but the API Key does not \
             have permission to download it. Please check your API key permissions.",
        )
    }

    pub fn poll_timeout(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::PollTimeout, msg)
    }

    pub fn cancelled() -> Self {
        Self::new(ErrorKind::Cancelled, "Generation cancelled.")
    }

    pub fn unclassified(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unclassified, msg)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the caller should discard the credential it used.
    pub fn credential_should_be_invalidated(&self) -> bool {
        self.credential_should_be_invalidated
    }

    /// Text suitable for showing to the person who started the run.
    pub fn user_message(&self) -> String {
        match self.kind {
            ErrorKind::CredentialRejected => {
                format!("API Permission Error: {}. Try a different API key.", self.message)
            }
            ErrorKind::RemoteOperationError => {
                let detail = if self.message.is_empty() {
                    "Unknown error"
                } else {
                    self.message.as_str()
                };
                format!("Video Generation Error: {}", detail)
            }
            ErrorKind::BriefIncomplete => {
                format!("Failed to generate complete creative brief ({}).", self.message)
            }
            _ if self.message.is_empty() => GENERIC_FAILURE.to_string(),
            _ => self.message.clone(),
        }
    }
}

impl From<ModelError> for PipelineError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::IncompleteBrief(msg) => Self::brief_incomplete(msg),
            ModelError::InvalidRequest(msg) | ModelError::InvalidImage(msg) => {
                Self::input_invalid(msg)
            }
            other => Self::input_invalid(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_rejection_invalidates_credential() {
        assert!(PipelineError::credential_rejected("API key not valid").credential_should_be_invalidated());
        assert!(!PipelineError::permission_denied().credential_should_be_invalidated());
        assert!(!PipelineError::unclassified("timeout").credential_should_be_invalidated());
    }

    #[test]
    fn test_user_messages() {
        let err = PipelineError::credential_rejected("API key not valid");
        assert_eq!(
            err.user_message(),
            "API Permission Error: API key not valid. Try a different API key."
        );

        let err = PipelineError::remote_operation("quota");
        assert_eq!(err.message(), "quota");
        assert_eq!(err.user_message(), "Video Generation Error: quota");

        assert_eq!(
            PipelineError::unclassified("").user_message(),
            "Failed to generate video. Please try again."
        );
        assert!(PipelineError::permission_denied().user_message().contains("403"));
    }

    #[test]
    fn test_from_model_error() {
        let err: PipelineError = ModelError::invalid_request("Please upload a product image.").into();
        assert_eq!(err.kind(), ErrorKind::InputInvalid);
        assert_eq!(err.message(), "Please upload a product image.");

        let err: PipelineError = ModelError::incomplete_brief("missing video_prompt").into();
        assert_eq!(err.kind(), ErrorKind::BriefIncomplete);
    }

    #[test]
    fn test_display_includes_kind() {
        let err = PipelineError::poll_timeout("gave up after 3 refreshes");
        assert_eq!(err.to_string(), "poll_timeout: gave up after 3 refreshes");
    }
}
