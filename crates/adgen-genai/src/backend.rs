//! Remote-call seam used by the pipeline.

use async_trait::async_trait;

use adgen_models::{ProductImage, SocialPlatform};

use crate::credential::ApiKey;
use crate::error::GenAiResult;
use crate::types::{GeneratedPart, VideoOperation, VideoSynthesisRequest};

/// The generation services the pipeline drives.
///
/// Every call takes the credential explicitly; implementations must not
/// cache or mutate it.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Analyze the product and return the model's raw text, expected to be a
    /// JSON creative brief (possibly fenced).
    async fn analyze_product(
        &self,
        key: &ApiKey,
        image: &ProductImage,
        description: &str,
        platform: SocialPlatform,
    ) -> GenAiResult<String>;

    /// Produce an ad visual from the product image. May return no image part.
    async fn generate_asset(
        &self,
        key: &ApiKey,
        image: &ProductImage,
        image_prompt: &str,
    ) -> GenAiResult<Vec<GeneratedPart>>;

    /// Start video synthesis and return the long-running operation handle.
    async fn start_video(
        &self,
        key: &ApiKey,
        request: &VideoSynthesisRequest,
    ) -> GenAiResult<VideoOperation>;

    /// Re-read the state of an existing operation. Idempotent.
    async fn refresh_operation(
        &self,
        key: &ApiKey,
        operation: &VideoOperation,
    ) -> GenAiResult<VideoOperation>;

    /// Header-only request against a locator; returns the HTTP status code.
    async fn check_access(&self, locator: &str) -> GenAiResult<u16>;

    /// Minimal request that succeeds only for a usable key.
    async fn check_credential(&self, key: &ApiKey) -> GenAiResult<()>;
}
