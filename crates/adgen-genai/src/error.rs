//! Generation client error types.

use thiserror::Error;

pub type GenAiResult<T> = Result<T, GenAiError>;

#[derive(Debug, Error)]
pub enum GenAiError {
    /// Non-success HTTP status with the service's error payload.
    #[error("Gemini API returned {status}: {message}")]
    Api {
        status: u16,
        /// Machine-readable reason such as `API_KEY_INVALID`
        reason: Option<String>,
        message: String,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GenAiError {
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// HTTP status reported by the service, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            GenAiError::Api { status, .. } => Some(*status),
            GenAiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Machine-readable failure reason, if the service supplied one.
    pub fn reason(&self) -> Option<&str> {
        match self {
            GenAiError::Api { reason, .. } => reason.as_deref(),
            _ => None,
        }
    }

    /// Whether the failure came from the transport rather than the service.
    pub fn is_transport(&self) -> bool {
        matches!(self, GenAiError::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_accessors() {
        let err = GenAiError::Api {
            status: 400,
            reason: Some("API_KEY_INVALID".into()),
            message: "API key not valid. Please pass a valid API key.".into(),
        };
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.reason(), Some("API_KEY_INVALID"));
        assert!(!err.is_transport());
        assert!(err.to_string().starts_with("Gemini API returned 400"));
    }

    #[test]
    fn test_unstructured_error_has_no_status() {
        let err = GenAiError::invalid_response("No content in Gemini response");
        assert_eq!(err.status(), None);
        assert_eq!(err.reason(), None);
    }
}
