//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use adgen_models::{SocialPlatform, VideoQuality};

#[derive(Debug, Parser)]
#[command(name = "adgen")]
#[command(about = "Turn a product photo into a short video ad", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a video ad from a product image
    Generate(GenerateArgs),
    /// Check whether an API key is accepted by the service
    ValidateKey(KeyArgs),
}

#[derive(Debug, Args)]
pub struct KeyArgs {
    /// API key (falls back to GEMINI_API_KEY, then API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Product image (PNG, JPEG, WEBP, GIF, or a file holding a data URL)
    #[arg(long)]
    pub image: PathBuf,

    /// Product description, at most 300 characters
    #[arg(long)]
    pub description: String,

    /// Target platform: youtube_shorts, instagram_reels, linkedin_feed, portrait_generic
    #[arg(long, default_value = "youtube_shorts")]
    pub platform: SocialPlatform,

    /// Output quality: standard (720p) or high (1080p)
    #[arg(long, default_value = "standard")]
    pub quality: VideoQuality,

    /// Address to share the finished video with
    #[arg(long)]
    pub email: Option<String>,

    #[command(flatten)]
    pub key: KeyArgs,

    /// Download the finished video to this path
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Write the generated ad visual to this path
    #[arg(long)]
    pub image_output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "adgen",
            "generate",
            "--image",
            "mug.png",
            "--description",
            "Ceramic mug",
            "--platform",
            "linkedin",
            "--quality",
            "1080p",
            "--api-key",
            "k",
        ])
        .unwrap();

        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.platform, SocialPlatform::LinkedinFeed);
                assert_eq!(args.quality, VideoQuality::High);
                assert_eq!(args.key.api_key.as_deref(), Some("k"));
                assert!(args.output.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_platform_is_rejected() {
        let result = Cli::try_parse_from([
            "adgen",
            "generate",
            "--image",
            "mug.png",
            "--description",
            "Ceramic mug",
            "--platform",
            "myspace",
        ]);
        assert!(result.is_err());
    }
}
