//! Request/response types for the generation services.
//!
//! The `wire` module mirrors the REST payloads; the public types are what
//! the [`GenerativeBackend`](crate::GenerativeBackend) trait hands back.

use adgen_models::{AspectRatio, ProductImage, Resolution};

/// One part of a model response.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedPart {
    Text(String),
    Image(ProductImage),
}

impl GeneratedPart {
    /// The image payload, if this part carries one.
    pub fn as_image(&self) -> Option<&ProductImage> {
        match self {
            GeneratedPart::Image(image) if image.mime_type().starts_with("image/") => Some(image),
            _ => None,
        }
    }
}

/// Input to the video synthesis call.
#[derive(Debug, Clone)]
pub struct VideoSynthesisRequest {
    /// Animation prompt from the creative brief
    pub prompt: String,
    /// Starting frame
    pub image: ProductImage,
    pub aspect_ratio: AspectRatio,
    pub resolution: Resolution,
    /// Number of videos requested
    pub sample_count: u32,
}

/// Error reported by a long-running operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationError {
    pub code: Option<i32>,
    pub message: String,
}

/// Handle to a long-running video synthesis job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoOperation {
    /// Operation resource name, e.g. `models/veo/operations/abc`
    pub name: String,
    pub done: bool,
    pub error: Option<OperationError>,
    /// Locator of the first generated video
    pub video_uri: Option<String>,
}

impl VideoOperation {
    /// A freshly started, not yet finished operation.
    pub fn pending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            done: false,
            error: None,
            video_uri: None,
        }
    }

    /// Whether no further refresh can change the outcome.
    pub fn is_terminal(&self) -> bool {
        self.done || self.error.is_some()
    }
}

pub(crate) mod wire {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize)]
    pub struct GenerateContentRequest {
        pub contents: Vec<Content>,
        #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
        pub generation_config: Option<GenerationConfig>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Content {
        #[serde(default)]
        pub parts: Vec<Part>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Part {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub text: Option<String>,
        #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
        pub inline_data: Option<InlineData>,
    }

    impl Part {
        pub fn text(text: impl Into<String>) -> Self {
            Self {
                text: Some(text.into()),
                inline_data: None,
            }
        }

        pub fn inline(mime_type: impl Into<String>, data: String) -> Self {
            Self {
                text: None,
                inline_data: Some(InlineData {
                    mime_type: mime_type.into(),
                    data,
                }),
            }
        }
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InlineData {
        #[serde(rename = "mimeType")]
        pub mime_type: String,
        /// Base64 encoded payload
        pub data: String,
    }

    #[derive(Debug, Default, Serialize)]
    pub struct GenerationConfig {
        #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
        pub response_mime_type: Option<String>,
        #[serde(rename = "responseSchema", skip_serializing_if = "Option::is_none")]
        pub response_schema: Option<serde_json::Value>,
        #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
        pub max_output_tokens: Option<u32>,
    }

    #[derive(Debug, Deserialize)]
    pub struct GenerateContentResponse {
        #[serde(default)]
        pub candidates: Vec<Candidate>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Candidate {
        pub content: Option<Content>,
    }

    #[derive(Debug, Serialize)]
    pub struct PredictLongRunningRequest {
        pub instances: Vec<VideoInstance>,
        pub parameters: VideoParameters,
    }

    #[derive(Debug, Serialize)]
    pub struct VideoInstance {
        pub prompt: String,
        pub image: VideoImage,
    }

    #[derive(Debug, Serialize)]
    pub struct VideoImage {
        #[serde(rename = "bytesBase64Encoded")]
        pub bytes_base64_encoded: String,
        #[serde(rename = "mimeType")]
        pub mime_type: String,
    }

    #[derive(Debug, Serialize)]
    pub struct VideoParameters {
        #[serde(rename = "aspectRatio")]
        pub aspect_ratio: String,
        pub resolution: String,
        #[serde(rename = "sampleCount")]
        pub sample_count: u32,
    }

    #[derive(Debug, Deserialize)]
    pub struct Operation {
        pub name: String,
        #[serde(default)]
        pub done: bool,
        pub error: Option<Status>,
        pub response: Option<OperationResponse>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Status {
        pub code: Option<i32>,
        #[serde(default)]
        pub message: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct OperationResponse {
        #[serde(rename = "generateVideoResponse")]
        pub generate_video_response: Option<GenerateVideoResponse>,
    }

    #[derive(Debug, Deserialize)]
    pub struct GenerateVideoResponse {
        #[serde(rename = "generatedSamples", default)]
        pub generated_samples: Vec<GeneratedSample>,
    }

    #[derive(Debug, Deserialize)]
    pub struct GeneratedSample {
        pub video: Option<VideoRef>,
    }

    #[derive(Debug, Deserialize)]
    pub struct VideoRef {
        pub uri: Option<String>,
    }

    /// Error envelope returned with non-success statuses.
    #[derive(Debug, Deserialize)]
    pub struct ErrorEnvelope {
        pub error: ErrorBody,
    }

    #[derive(Debug, Deserialize)]
    pub struct ErrorBody {
        #[serde(default)]
        pub message: String,
        pub status: Option<String>,
        #[serde(default)]
        pub details: Vec<ErrorDetail>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ErrorDetail {
        pub reason: Option<String>,
    }
}

impl From<wire::Operation> for VideoOperation {
    fn from(op: wire::Operation) -> Self {
        let video_uri = op
            .response
            .and_then(|r| r.generate_video_response)
            .and_then(|r| r.generated_samples.into_iter().next())
            .and_then(|s| s.video)
            .and_then(|v| v.uri)
            .filter(|uri| !uri.is_empty());

        Self {
            name: op.name,
            done: op.done,
            error: op.error.map(|e| OperationError {
                code: e.code,
                message: e.message,
            }),
            video_uri,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_from_wire_done() {
        let json = r#"{
            "name": "models/veo/operations/abc",
            "done": true,
            "response": {
                "generateVideoResponse": {
                    "generatedSamples": [{"video": {"uri": "https://files.example/v1:download?alt=media"}}]
                }
            }
        }"#;
        let op: VideoOperation = serde_json::from_str::<wire::Operation>(json).unwrap().into();
        assert!(op.done);
        assert!(op.is_terminal());
        assert_eq!(
            op.video_uri.as_deref(),
            Some("https://files.example/v1:download?alt=media")
        );
    }

    #[test]
    fn test_operation_from_wire_pending_and_error() {
        let pending: VideoOperation =
            serde_json::from_str::<wire::Operation>(r#"{"name":"ops/1"}"#).unwrap().into();
        assert!(!pending.is_terminal());
        assert_eq!(pending, VideoOperation::pending("ops/1"));

        let failed: VideoOperation = serde_json::from_str::<wire::Operation>(
            r#"{"name":"ops/1","done":true,"error":{"code":8,"message":"quota"}}"#,
        )
        .unwrap()
        .into();
        assert_eq!(failed.error.unwrap().message, "quota");
        assert_eq!(failed.video_uri, None);
    }

    #[test]
    fn test_part_serialization_skips_empty_fields() {
        let json = serde_json::to_value(wire::Part::text("hi")).unwrap();
        assert_eq!(json, serde_json::json!({"text": "hi"}));

        let json = serde_json::to_value(wire::Part::inline("image/png", "AA==".into())).unwrap();
        assert_eq!(json["inlineData"]["mimeType"], "image/png");
    }

    #[test]
    fn test_as_image_ignores_text() {
        let text = GeneratedPart::Text("caption".into());
        assert!(text.as_image().is_none());

        let image = GeneratedPart::Image(ProductImage::new(vec![1], "image/png"));
        assert!(image.as_image().is_some());

        let other = GeneratedPart::Image(ProductImage::new(vec![1], "application/octet-stream"));
        assert!(other.as_image().is_none());
    }
}
