//! Subcommand implementations.

use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use tracing::{info, warn};

use adgen_genai::{ApiKey, GeminiClient};
use adgen_models::{GenerationRequest, ProductImage, ProgressEvent, Stage};
use adgen_pipeline::{
    mailto_link, resolve_credential, validate_credential, CancelHandle, Pipeline,
    PipelineConfig, PipelineError, ProgressSender,
};

use crate::cli::{GenerateArgs, KeyArgs};

/// Environment variables consulted for the key, in order.
const KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

pub async fn generate(args: GenerateArgs) -> Result<()> {
    let key = resolve_key(&args.key)?;
    let image = load_image(&args.image)?;

    let mut request =
        GenerationRequest::new(image, args.description, args.platform, args.quality);
    if let Some(email) = args.email {
        request = request.with_notify_email(email);
    }

    let client = Arc::new(GeminiClient::from_env()?);
    let pipeline = Pipeline::new(client.clone(), PipelineConfig::from_env());
    info!("Pipeline config: {:?}", pipeline.config());

    let cancel = CancelHandle::new();
    let token = cancel.token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received interrupt, cancelling run");
            cancel.cancel();
        }
    });

    let (progress, mut rx) = ProgressSender::channel();
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            println!("{}", render_event(&event));
        }
    });

    let outcome = pipeline.run(&request, &key, &progress, &token).await;
    drop(progress);
    printer.await.ok();

    let result = match outcome {
        Ok(result) => result,
        Err(err) => {
            // The progress printer already showed the user-facing message.
            if let Some(hint) = failure_hint(&err) {
                eprintln!("{}", hint);
            }
            return Err(err.into());
        }
    };

    println!("Video: {}", result.video_locator);

    if let Some(path) = &args.output {
        let bytes = client
            .download(&result.video_locator)
            .await
            .context("Failed to download video")?;
        tokio::fs::write(path, &bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Saved video to {} ({} bytes)", path.display(), bytes.len());
    }

    if let (Some(path), Some(locator)) = (&args.image_output, &result.image_locator) {
        write_data_url(path, locator).await?;
        println!("Saved ad visual to {}", path.display());
    }

    if let Some(email) = &request.notify_email {
        println!("Share: {}", mailto_link(email, &result.video_locator));
    }

    Ok(())
}

pub async fn validate_key(args: KeyArgs) -> Result<()> {
    let key = resolve_key(&args)?;
    let client = GeminiClient::from_env()?;

    if validate_credential(&client, &key).await {
        println!("API key is valid.");
        Ok(())
    } else {
        Err(anyhow!("API key is not valid."))
    }
}

fn resolve_key(args: &KeyArgs) -> Result<ApiKey> {
    let environment = env_credential();
    Ok(resolve_credential(
        args.api_key.as_deref(),
        environment.as_deref(),
    )?)
}

fn env_credential() -> Option<String> {
    KEY_ENV_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}

/// Read a product image from disk. Files holding a data URL are decoded.
pub fn load_image(path: &Path) -> Result<ProductImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    if bytes.starts_with(b"data:") {
        let text = String::from_utf8(bytes).context("Data URL is not valid UTF-8")?;
        return Ok(ProductImage::from_data_url(&text)?);
    }

    let image = ProductImage::from_bytes(bytes);
    if image.is_empty() {
        warn!("{} is empty", path.display());
    }
    Ok(image)
}

async fn write_data_url(path: &Path, data_url: &str) -> Result<()> {
    let image = ProductImage::from_data_url(data_url)?;
    tokio::fs::write(path, image.bytes())
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Extra advice printed after a failed run, beyond the progress line.
fn failure_hint(err: &PipelineError) -> Option<&'static str> {
    err.credential_should_be_invalidated()
        .then_some("The API key was rejected; pass a different one with --api-key.")
}

/// One line of progress output.
pub fn render_event(event: &ProgressEvent) -> String {
    let marker = match event.stage {
        Stage::Complete => "done",
        Stage::Failed => "failed",
        Stage::Cancelled => "cancelled",
        stage => match stage.position() {
            Some(index) => return format!("[{}/3] {}", index + 1, event.message),
            None => "",
        },
    };
    format!("[{}] {}", marker, event.message)
}
