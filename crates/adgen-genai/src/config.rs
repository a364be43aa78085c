//! Generation service configuration.

use std::time::Duration;

/// Default REST endpoint for the Gemini API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for [`GeminiClient`](crate::GeminiClient).
#[derive(Debug, Clone)]
pub struct GenAiConfig {
    /// Base URL of the REST API (no trailing slash)
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Model used for product analysis
    pub analysis_model: String,
    /// Model used for the ad visual
    pub image_model: String,
    /// Model used for video synthesis
    pub video_model: String,
}

impl Default for GenAiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(120),
            analysis_model: "gemini-3-flash-preview".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            video_model: "veo-3.1-fast-generate-preview".to_string(),
        }
    }
}

impl GenAiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("GEMINI_BASE_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            timeout: Duration::from_secs(
                std::env::var("GEMINI_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(120),
            ),
            analysis_model: std::env::var("ADGEN_ANALYSIS_MODEL").unwrap_or(defaults.analysis_model),
            image_model: std::env::var("ADGEN_IMAGE_MODEL").unwrap_or(defaults.image_model),
            video_model: std::env::var("ADGEN_VIDEO_MODEL").unwrap_or(defaults.video_model),
        }
    }

    /// Point the client at a different endpoint (used by tests and proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = GenAiConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert!(config.video_model.starts_with("veo"));
    }

    #[test]
    fn test_with_base_url_strips_slash() {
        let config = GenAiConfig::default().with_base_url("http://127.0.0.1:9000/");
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
    }
}
