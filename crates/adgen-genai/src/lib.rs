//! Client for the Gemini and Veo generation services.
//!
//! The pipeline talks to the remote models through the [`GenerativeBackend`]
//! trait. [`GeminiClient`] is the REST implementation used in production;
//! tests substitute scripted backends.

pub mod backend;
pub mod client;
pub mod config;
pub mod credential;
pub mod error;
pub mod types;

pub use backend::GenerativeBackend;
pub use client::GeminiClient;
pub use config::GenAiConfig;
pub use credential::ApiKey;
pub use error::{GenAiError, GenAiResult};
pub use types::{GeneratedPart, OperationError, VideoOperation, VideoSynthesisRequest};
