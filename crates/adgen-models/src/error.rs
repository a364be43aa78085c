//! Model-level error types.

use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Incomplete creative brief: {0}")]
    IncompleteBrief(String),

    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("Unknown quality: {0}")]
    UnknownQuality(String),
}

impl ModelError {
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn invalid_image(msg: impl Into<String>) -> Self {
        Self::InvalidImage(msg.into())
    }

    pub fn incomplete_brief(msg: impl Into<String>) -> Self {
        Self::IncompleteBrief(msg.into())
    }
}
