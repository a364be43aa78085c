//! Scripted backend shared by the pipeline tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use adgen_genai::{
    ApiKey, GenAiError, GenAiResult, GeneratedPart, GenerativeBackend, OperationError,
    VideoOperation, VideoSynthesisRequest,
};
use adgen_models::{ProductImage, SocialPlatform};

pub const VIDEO_URI: &str = "https://files.example/v1beta/files/abc:download?alt=media";

pub fn done_with(name: &str, uri: &str) -> VideoOperation {
    VideoOperation {
        name: name.to_string(),
        done: true,
        error: None,
        video_uri: Some(uri.to_string()),
    }
}

pub fn failed_op(name: &str, message: &str) -> VideoOperation {
    VideoOperation {
        name: name.to_string(),
        done: true,
        error: Some(OperationError {
            code: Some(8),
            message: message.to_string(),
        }),
        video_uri: None,
    }
}

pub fn generated_image() -> ProductImage {
    ProductImage::new(vec![0x89, b'P', b'N', b'G', 7, 7], "image/png")
}

/// Backend replaying queued responses, with sensible defaults once a queue
/// runs dry.
#[derive(Default)]
pub struct ScriptedBackend {
    analysis: Mutex<VecDeque<GenAiResult<String>>>,
    assets: Mutex<VecDeque<GenAiResult<Vec<GeneratedPart>>>>,
    starts: Mutex<VecDeque<GenAiResult<VideoOperation>>>,
    refreshes: Mutex<VecDeque<GenAiResult<VideoOperation>>>,
    access_status: Mutex<Option<GenAiResult<u16>>>,
    access_delay: Mutex<Option<Duration>>,
    pending_forever: AtomicBool,
    refresh_calls: AtomicUsize,
    calls: Mutex<Vec<&'static str>>,
    video_requests: Mutex<Vec<VideoSynthesisRequest>>,
    checked: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_analysis(self, result: GenAiResult<String>) -> Self {
        self.analysis.lock().unwrap().push_back(result);
        self
    }

    pub fn with_asset(self, result: GenAiResult<Vec<GeneratedPart>>) -> Self {
        self.assets.lock().unwrap().push_back(result);
        self
    }

    pub fn with_start(self, result: GenAiResult<VideoOperation>) -> Self {
        self.starts.lock().unwrap().push_back(result);
        self
    }

    pub fn with_refresh(self, result: GenAiResult<VideoOperation>) -> Self {
        self.refreshes.lock().unwrap().push_back(result);
        self
    }

    pub fn with_access_status(self, result: GenAiResult<u16>) -> Self {
        *self.access_status.lock().unwrap() = Some(result);
        self
    }

    /// Make the accessibility check take `delay` before answering.
    pub fn with_slow_access_check(self, delay: Duration) -> Self {
        *self.access_delay.lock().unwrap() = Some(delay);
        self
    }

    /// Every refresh reports the operation as still running.
    pub fn always_pending(self) -> Self {
        self.pending_forever.store(true, Ordering::SeqCst);
        self
    }

    pub fn refresh_count(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    /// Remote calls in the order they were made.
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn video_requests(&self) -> Vec<VideoSynthesisRequest> {
        self.video_requests.lock().unwrap().clone()
    }

    pub fn checked(&self) -> Vec<String> {
        self.checked.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl GenerativeBackend for ScriptedBackend {
    async fn analyze_product(
        &self,
        _key: &ApiKey,
        _image: &ProductImage,
        _description: &str,
        _platform: SocialPlatform,
    ) -> GenAiResult<String> {
        self.record("analyze");
        self.analysis.lock().unwrap().pop_front().unwrap_or_else(|| {
            Ok("```json\n{\"image_prompt\":\"studio shot\",\"video_prompt\":\"slow orbit\"}\n```"
                .to_string())
        })
    }

    async fn generate_asset(
        &self,
        _key: &ApiKey,
        _image: &ProductImage,
        _image_prompt: &str,
    ) -> GenAiResult<Vec<GeneratedPart>> {
        self.record("asset");
        self.assets
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(vec![GeneratedPart::Image(generated_image())]))
    }

    async fn start_video(
        &self,
        _key: &ApiKey,
        request: &VideoSynthesisRequest,
    ) -> GenAiResult<VideoOperation> {
        self.record("start_video");
        self.video_requests.lock().unwrap().push(request.clone());
        self.starts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(VideoOperation::pending("operations/op1")))
    }

    async fn refresh_operation(
        &self,
        _key: &ApiKey,
        operation: &VideoOperation,
    ) -> GenAiResult<VideoOperation> {
        self.record("refresh");
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        if self.pending_forever.load(Ordering::SeqCst) {
            return Ok(VideoOperation::pending(operation.name.clone()));
        }
        self.refreshes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(done_with(&operation.name, VIDEO_URI)))
    }

    async fn check_access(&self, locator: &str) -> GenAiResult<u16> {
        self.record("check_access");
        self.checked.lock().unwrap().push(locator.to_string());
        let delay = *self.access_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.access_status
            .lock()
            .unwrap()
            .take()
            .unwrap_or(Ok(200))
    }

    async fn check_credential(&self, key: &ApiKey) -> GenAiResult<()> {
        self.record("check_credential");
        if key.expose() == "good-key" {
            Ok(())
        } else {
            Err(GenAiError::Api {
                status: 400,
                reason: Some("API_KEY_INVALID".into()),
                message: "API key not valid. Please pass a valid API key.".into(),
            })
        }
    }
}
