//! Pipeline controller: sequences the stages of one ad generation run.

use std::future::Future;
use std::sync::Arc;

use tokio::time::Instant;
use tracing::{info, warn, Instrument};

use adgen_genai::{ApiKey, GenerativeBackend, VideoSynthesisRequest};
use adgen_models::{
    CreativeBrief, GeneratedAsset, GenerationRequest, PipelineResult, ProductImage, RunId, Stage,
};

use crate::cancel::CancelToken;
use crate::classifier::classify;
use crate::config::PipelineConfig;
use crate::credential::is_usable;
use crate::error::{ErrorKind, PipelineError, RunResult};
use crate::locator::with_credential;
use crate::logging::RunLogger;
use crate::metrics;
use crate::poller::OperationPoller;
use crate::progress::ProgressSender;
use crate::verifier::verify_access;

/// Videos requested per synthesis call.
const SAMPLE_COUNT: u32 = 1;

/// Orchestrates analysis, asset generation, video synthesis and verification.
pub struct Pipeline {
    backend: Arc<dyn GenerativeBackend>,
    config: PipelineConfig,
    poller: OperationPoller,
}

/// State shared by the stages of a single run.
struct RunContext<'a> {
    key: &'a ApiKey,
    progress: &'a ProgressSender,
    cancel: &'a CancelToken,
    logger: RunLogger,
}

impl<'a> RunContext<'a> {
    /// Announce a stage, unless the run was cancelled first.
    fn enter(&self, stage: Stage) -> RunResult<Instant> {
        if self.cancel.is_cancelled() {
            return Err(PipelineError::cancelled());
        }
        self.logger.log_stage(stage);
        self.progress.stage(stage);
        Ok(Instant::now())
    }

    /// Await a remote call, abandoning it on cancellation.
    async fn remote<T, F>(&self, call: F) -> RunResult<T>
    where
        F: Future<Output = adgen_genai::GenAiResult<T>>,
    {
        match self.cancel.run_until_cancelled(call).await {
            Some(result) => result.map_err(|e| classify(&e)),
            None => Err(PipelineError::cancelled()),
        }
    }
}

impl Pipeline {
    pub fn new(backend: Arc<dyn GenerativeBackend>, config: PipelineConfig) -> Self {
        let poller = OperationPoller::new(config.poll.clone());
        Self {
            backend,
            config,
            poller,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full pipeline for one request.
    ///
    /// Progress is reported through `progress`, ending in exactly one of
    /// `Complete`, `Failed` or `Cancelled`.
    pub async fn run(
        &self,
        request: &GenerationRequest,
        key: &ApiKey,
        progress: &ProgressSender,
        cancel: &CancelToken,
    ) -> RunResult<PipelineResult> {
        let run_id = RunId::new();
        let logger = RunLogger::new(&run_id, request.platform);
        let span = logger.create_span();
        let ctx = RunContext {
            key,
            progress,
            cancel,
            logger,
        };

        metrics::record_run_started(request.platform.as_str());
        ctx.logger.log_start(&format!(
            "{} at {}, key length {}",
            request.platform.label(),
            request.quality.resolution(),
            key.len()
        ));

        match self.execute(request, &ctx).instrument(span).await {
            Ok(result) => {
                metrics::record_run_completed(request.platform.as_str());
                ctx.logger.log_completion("video ready");
                Ok(result)
            }
            Err(err) => {
                metrics::record_run_failed(err.kind());
                if err.kind() == ErrorKind::Cancelled {
                    ctx.logger.log_warning("cancelled by caller");
                    progress.cancelled();
                } else {
                    ctx.logger.log_error(&err.to_string());
                    progress.failed(err.user_message());
                }
                Err(err)
            }
        }
    }

    async fn execute(
        &self,
        request: &GenerationRequest,
        ctx: &RunContext<'_>,
    ) -> RunResult<PipelineResult> {
        request.validate()?;
        let image = request
            .image()
            .ok_or_else(|| PipelineError::input_invalid("Please upload a product image."))?;
        if !is_usable(ctx.key) {
            return Err(PipelineError::empty_credential());
        }

        let brief = self.analyze(request, image, ctx).await?;
        let asset = self.generate_asset(image, &brief, ctx).await?;
        let video_locator = self.synthesize_video(request, &brief, &asset, ctx).await?;

        ctx.progress.stage(Stage::Complete);
        Ok(PipelineResult {
            video_locator,
            image_locator: Some(asset.to_data_url()),
        })
    }

    async fn analyze(
        &self,
        request: &GenerationRequest,
        image: &ProductImage,
        ctx: &RunContext<'_>,
    ) -> RunResult<CreativeBrief> {
        let started = ctx.enter(Stage::Analyzing)?;

        let text = ctx
            .remote(self.backend.analyze_product(
                ctx.key,
                image,
                &request.description,
                request.platform,
            ))
            .await?;
        let brief = CreativeBrief::from_model_text(&text)?;

        info!(
            image_prompt_len = brief.image_prompt.len(),
            video_prompt_len = brief.video_prompt.len(),
            "Creative brief ready"
        );
        metrics::record_stage_duration(Stage::Analyzing, started.elapsed());
        Ok(brief)
    }

    async fn generate_asset(
        &self,
        image: &ProductImage,
        brief: &CreativeBrief,
        ctx: &RunContext<'_>,
    ) -> RunResult<GeneratedAsset> {
        let started = ctx.enter(Stage::GeneratingAsset)?;

        let generated = match ctx
            .remote(self.backend.generate_asset(ctx.key, image, &brief.image_prompt))
            .await
        {
            Ok(parts) => parts
                .iter()
                .filter_map(|part| part.as_image())
                .find(|candidate| !candidate.is_empty())
                .cloned(),
            Err(err)
                if matches!(
                    err.kind(),
                    ErrorKind::CredentialRejected | ErrorKind::Cancelled
                ) =>
            {
                return Err(err);
            }
            Err(err) => {
                ctx.logger
                    .log_warning(&format!("asset generation failed: {}", err.message()));
                None
            }
        };

        let asset = match generated {
            Some(asset) => GeneratedAsset::generated(asset),
            None => {
                warn!("No image generated, falling back to original");
                metrics::record_asset_fallback();
                GeneratedAsset::fallback(image.clone())
            }
        };

        metrics::record_stage_duration(Stage::GeneratingAsset, started.elapsed());
        Ok(asset)
    }

    async fn synthesize_video(
        &self,
        request: &GenerationRequest,
        brief: &CreativeBrief,
        asset: &GeneratedAsset,
        ctx: &RunContext<'_>,
    ) -> RunResult<String> {
        let started = ctx.enter(Stage::GeneratingVideo)?;

        let synthesis = VideoSynthesisRequest {
            prompt: brief.video_prompt.clone(),
            image: asset.image().clone(),
            aspect_ratio: request.platform.aspect_ratio(),
            resolution: request.quality.resolution(),
            sample_count: SAMPLE_COUNT,
        };

        let operation = ctx
            .remote(self.backend.start_video(ctx.key, &synthesis))
            .await?;
        info!(operation = %operation.name, "Video synthesis started");

        let operation = self
            .poller
            .wait(self.backend.as_ref(), ctx.key, operation, ctx.cancel)
            .await?;
        let video_uri = operation
            .video_uri
            .ok_or_else(PipelineError::missing_result)?;

        let locator = with_credential(&video_uri, ctx.key);
        if self.config.verify_access {
            ctx.cancel
                .run_until_cancelled(verify_access(self.backend.as_ref(), &locator))
                .await
                .ok_or_else(PipelineError::cancelled)??;
        }

        metrics::record_stage_duration(Stage::GeneratingVideo, started.elapsed());
        Ok(locator)
    }
}
