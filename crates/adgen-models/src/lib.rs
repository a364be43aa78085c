//! Shared data models for the adgen pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Generation requests and product images
//! - Target platforms, quality tiers and the video parameters they imply
//! - Creative briefs produced by the analysis stage
//! - The generated ad visual
//! - Pipeline stages and progress events
//! - Run identifiers and terminal results

pub mod asset;
pub mod brief;
pub mod error;
pub mod platform;
pub mod request;
pub mod run;
pub mod stage;

// Re-export common types
pub use asset::GeneratedAsset;
pub use brief::{strip_code_fences, CreativeBrief};
pub use error::{ModelError, ModelResult};
pub use platform::{AspectRatio, Resolution, SocialPlatform, VideoQuality};
pub use request::{GenerationRequest, ProductImage, MAX_DESCRIPTION_CHARS};
pub use run::{PipelineResult, RunId};
pub use stage::{ProgressEvent, Stage};
