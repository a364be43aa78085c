//! Gemini / Veo REST client.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use adgen_models::{ProductImage, SocialPlatform};

use crate::backend::GenerativeBackend;
use crate::config::GenAiConfig;
use crate::credential::ApiKey;
use crate::error::{GenAiError, GenAiResult};
use crate::types::wire;
use crate::types::{GeneratedPart, VideoOperation, VideoSynthesisRequest};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini generation endpoints.
pub struct GeminiClient {
    http: Client,
    config: GenAiConfig,
}

impl GeminiClient {
    /// Create a new client.
    pub fn new(config: GenAiConfig) -> GenAiResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .referer(false)
            .build()
            .map_err(GenAiError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> GenAiResult<Self> {
        Self::new(GenAiConfig::from_env())
    }

    pub fn config(&self) -> &GenAiConfig {
        &self.config
    }

    /// Download the artifact behind a resolved locator.
    pub async fn download(&self, locator: &str) -> GenAiResult<Vec<u8>> {
        let response = self
            .http
            .get(locator)
            .send()
            .await
            .map_err(|e| GenAiError::Network(e.without_url()))?;
        let response = ensure_success(response).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| GenAiError::Network(e.without_url()))?;
        Ok(bytes.to_vec())
    }

    fn model_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.config.base_url, model, method)
    }

    async fn generate_content(
        &self,
        key: &ApiKey,
        model: &str,
        request: &wire::GenerateContentRequest,
    ) -> GenAiResult<Vec<wire::Part>> {
        let url = self.model_url(model, "generateContent");
        debug!("Sending generateContent request to {}", url);

        let response: wire::GenerateContentResponse =
            send_json(authorized(self.http.post(&url), key).json(request)).await?;

        Ok(response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts)
            .unwrap_or_default())
    }
}

fn authorized(builder: RequestBuilder, key: &ApiKey) -> RequestBuilder {
    builder.header(API_KEY_HEADER, key.expose())
}

async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> GenAiResult<T> {
    let response = builder.send().await?;
    let response = ensure_success(response).await?;
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Turn a non-success status into a structured [`GenAiError::Api`].
async fn ensure_success(response: Response) -> GenAiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(api_error(status.as_u16(), &body))
}

fn api_error(status: u16, body: &str) -> GenAiError {
    match serde_json::from_str::<wire::ErrorEnvelope>(body) {
        Ok(envelope) => {
            let reason = envelope
                .error
                .details
                .iter()
                .find_map(|d| d.reason.clone())
                .or(envelope.error.status);
            GenAiError::Api {
                status,
                reason,
                message: envelope.error.message,
            }
        }
        Err(_) => GenAiError::Api {
            status,
            reason: None,
            message: body.trim().to_string(),
        },
    }
}

fn build_analysis_prompt(description: &str, platform: SocialPlatform) -> String {
    format!(
        r#"You are an expert creative director. Analyze this product image and the user's description: "{description}".

Target Platform: {platform}

Create a creative brief for a short video ad. Return a JSON object with:
1. "image_prompt": A detailed prompt for a polished, cinematic version of this product image suitable for a high-end ad. Describe lighting, environment and composition. Enhance the product, do not replace it.
2. "video_prompt": A prompt for a video generation model to animate the scene. Describe camera movement (slow pan, zoom, orbit) and subject motion (steam rising, light glimmering, cloth moving) that fits the mood."#,
        description = description,
        platform = platform.label(),
    )
}

fn brief_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "image_prompt": { "type": "STRING" },
            "video_prompt": { "type": "STRING" }
        },
        "required": ["image_prompt", "video_prompt"]
    })
}

fn image_part(image: &ProductImage) -> wire::Part {
    wire::Part::inline(image.mime_type(), image.to_base64())
}

fn decode_parts(parts: Vec<wire::Part>) -> Vec<GeneratedPart> {
    let mut decoded = Vec::with_capacity(parts.len());
    for part in parts {
        if let Some(inline) = part.inline_data {
            match STANDARD.decode(inline.data.as_bytes()) {
                Ok(bytes) => decoded.push(GeneratedPart::Image(ProductImage::new(
                    bytes,
                    inline.mime_type,
                ))),
                Err(e) => warn!("Discarding undecodable inline part: {}", e),
            }
        } else if let Some(text) = part.text {
            decoded.push(GeneratedPart::Text(text));
        }
    }
    decoded
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn analyze_product(
        &self,
        key: &ApiKey,
        image: &ProductImage,
        description: &str,
        platform: SocialPlatform,
    ) -> GenAiResult<String> {
        let request = wire::GenerateContentRequest {
            contents: vec![wire::Content {
                parts: vec![
                    image_part(image),
                    wire::Part::text(build_analysis_prompt(description, platform)),
                ],
            }],
            generation_config: Some(wire::GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(brief_schema()),
                ..Default::default()
            }),
        };

        let parts = self
            .generate_content(key, &self.config.analysis_model, &request)
            .await?;

        let text: String = parts.into_iter().filter_map(|p| p.text).collect();
        info!("Analysis returned {} chars", text.len());
        Ok(text)
    }

    async fn generate_asset(
        &self,
        key: &ApiKey,
        image: &ProductImage,
        image_prompt: &str,
    ) -> GenAiResult<Vec<GeneratedPart>> {
        let request = wire::GenerateContentRequest {
            contents: vec![wire::Content {
                parts: vec![
                    image_part(image),
                    wire::Part::text(format!(
                        "Generate a high-quality social media ad image based on this input image. {}",
                        image_prompt
                    )),
                ],
            }],
            generation_config: None,
        };

        let parts = self
            .generate_content(key, &self.config.image_model, &request)
            .await?;
        Ok(decode_parts(parts))
    }

    async fn start_video(
        &self,
        key: &ApiKey,
        request: &VideoSynthesisRequest,
    ) -> GenAiResult<VideoOperation> {
        let url = self.model_url(&self.config.video_model, "predictLongRunning");
        let body = wire::PredictLongRunningRequest {
            instances: vec![wire::VideoInstance {
                prompt: request.prompt.clone(),
                image: wire::VideoImage {
                    bytes_base64_encoded: request.image.to_base64(),
                    mime_type: request.image.mime_type().to_string(),
                },
            }],
            parameters: wire::VideoParameters {
                aspect_ratio: request.aspect_ratio.to_string(),
                resolution: request.resolution.as_str().to_string(),
                sample_count: request.sample_count,
            },
        };

        info!(
            "Starting video synthesis ({} {}) with {}",
            request.aspect_ratio, request.resolution, self.config.video_model
        );
        let operation: wire::Operation =
            send_json(authorized(self.http.post(&url), key).json(&body)).await?;
        Ok(operation.into())
    }

    async fn refresh_operation(
        &self,
        key: &ApiKey,
        operation: &VideoOperation,
    ) -> GenAiResult<VideoOperation> {
        let url = format!("{}/{}", self.config.base_url, operation.name);
        let refreshed: wire::Operation = send_json(authorized(self.http.get(&url), key)).await?;

        if refreshed.name != operation.name {
            return Err(GenAiError::invalid_response(format!(
                "Operation refresh returned {} instead of {}",
                refreshed.name, operation.name
            )));
        }
        Ok(refreshed.into())
    }

    async fn check_access(&self, locator: &str) -> GenAiResult<u16> {
        // The locator embeds the key, so strip it from any transport error.
        let response = self
            .http
            .head(locator)
            .send()
            .await
            .map_err(|e| GenAiError::Network(e.without_url()))?;
        Ok(response.status().as_u16())
    }

    async fn check_credential(&self, key: &ApiKey) -> GenAiResult<()> {
        let request = wire::GenerateContentRequest {
            contents: vec![wire::Content {
                parts: vec![wire::Part::text("test")],
            }],
            generation_config: Some(wire::GenerationConfig {
                max_output_tokens: Some(1),
                ..Default::default()
            }),
        };

        self.generate_content(key, &self.config.analysis_model, &request)
            .await
            .map(|_| ())
    }
}
