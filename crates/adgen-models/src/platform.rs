//! Target platform and quality definitions.
//!
//! The platform selector drives the video aspect ratio and the quality
//! selector drives the output resolution. Both mappings are total.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Social platform the ad is produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SocialPlatform {
    /// Short-form vertical video
    YoutubeShorts,
    /// Short-form vertical video
    InstagramReels,
    /// Landscape feed post
    LinkedinFeed,
    /// Any other portrait placement
    PortraitGeneric,
}

impl SocialPlatform {
    pub const ALL: &'static [SocialPlatform] = &[
        SocialPlatform::YoutubeShorts,
        SocialPlatform::InstagramReels,
        SocialPlatform::LinkedinFeed,
        SocialPlatform::PortraitGeneric,
    ];

    /// Identifier used on the command line and in serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            SocialPlatform::YoutubeShorts => "youtube_shorts",
            SocialPlatform::InstagramReels => "instagram_reels",
            SocialPlatform::LinkedinFeed => "linkedin_feed",
            SocialPlatform::PortraitGeneric => "portrait_generic",
        }
    }

    /// Human-readable label, also handed to the analysis model.
    pub fn label(&self) -> &'static str {
        match self {
            SocialPlatform::YoutubeShorts => "YouTube Shorts",
            SocialPlatform::InstagramReels => "Instagram Reels",
            SocialPlatform::LinkedinFeed => "LinkedIn/Feed",
            SocialPlatform::PortraitGeneric => "Portrait Generic",
        }
    }

    /// Aspect ratio of the generated video.
    pub fn aspect_ratio(&self) -> AspectRatio {
        match self {
            SocialPlatform::YoutubeShorts
            | SocialPlatform::InstagramReels
            | SocialPlatform::PortraitGeneric => AspectRatio::PORTRAIT,
            SocialPlatform::LinkedinFeed => AspectRatio::LANDSCAPE,
        }
    }
}

impl fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SocialPlatform {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "youtube_shorts" | "shorts" => Ok(SocialPlatform::YoutubeShorts),
            "instagram_reels" | "reels" => Ok(SocialPlatform::InstagramReels),
            "linkedin_feed" | "linkedin" | "feed" | "landscape" => Ok(SocialPlatform::LinkedinFeed),
            "portrait_generic" | "portrait" => Ok(SocialPlatform::PortraitGeneric),
            _ => Err(ModelError::UnknownPlatform(s.to_string())),
        }
    }
}

/// Requested output quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum VideoQuality {
    /// 720p output
    #[default]
    Standard,
    /// 1080p output
    High,
}

impl VideoQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoQuality::Standard => "standard",
            VideoQuality::High => "high",
        }
    }

    /// Resolution of the generated video.
    pub fn resolution(&self) -> Resolution {
        match self {
            VideoQuality::Standard => Resolution::P720,
            VideoQuality::High => Resolution::P1080,
        }
    }
}

impl fmt::Display for VideoQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VideoQuality {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "720p" | "720" => Ok(VideoQuality::Standard),
            "high" | "1080p" | "1080" => Ok(VideoQuality::High),
            _ => Err(ModelError::UnknownQuality(s.to_string())),
        }
    }
}

/// Output resolution understood by the video model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Resolution {
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "1080p")]
    P1080,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::P720 => "720p",
            Resolution::P1080 => "1080p",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aspect ratio specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct AspectRatio {
    pub width: u32,
    pub height: u32,
}

impl AspectRatio {
    /// Vertical video (9:16) for Shorts/Reels
    pub const PORTRAIT: AspectRatio = AspectRatio {
        width: 9,
        height: 16,
    };

    /// Landscape video (16:9) for feeds
    pub const LANDSCAPE: AspectRatio = AspectRatio {
        width: 16,
        height: 9,
    };

    /// Returns the aspect ratio as a decimal.
    pub fn as_f64(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio_mapping_is_total() {
        for platform in SocialPlatform::ALL {
            let ratio = platform.aspect_ratio().to_string();
            match platform {
                SocialPlatform::LinkedinFeed => assert_eq!(ratio, "16:9"),
                _ => assert_eq!(ratio, "9:16"),
            }
        }
    }

    #[test]
    fn test_portrait_generic_is_vertical() {
        // Listed as 3:4 in some UIs, but the video model only renders 9:16 or 16:9.
        assert_eq!(SocialPlatform::PortraitGeneric.aspect_ratio(), AspectRatio::PORTRAIT);
        assert!(AspectRatio::PORTRAIT.as_f64() < 1.0);
    }

    #[test]
    fn test_quality_resolution() {
        assert_eq!(VideoQuality::Standard.resolution().as_str(), "720p");
        assert_eq!(VideoQuality::High.resolution().as_str(), "1080p");
        assert_eq!(VideoQuality::default(), VideoQuality::Standard);
    }

    #[test]
    fn test_platform_parse() {
        assert_eq!("shorts".parse::<SocialPlatform>().unwrap(), SocialPlatform::YoutubeShorts);
        assert_eq!(
            "Instagram Reels".parse::<SocialPlatform>().unwrap(),
            SocialPlatform::InstagramReels
        );
        assert_eq!("linkedin-feed".parse::<SocialPlatform>().unwrap(), SocialPlatform::LinkedinFeed);
        assert!("tiktok".parse::<SocialPlatform>().is_err());
    }

    #[test]
    fn test_quality_parse() {
        assert_eq!("1080p".parse::<VideoQuality>().unwrap(), VideoQuality::High);
        assert_eq!("STANDARD".parse::<VideoQuality>().unwrap(), VideoQuality::Standard);
        assert!("4k".parse::<VideoQuality>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&SocialPlatform::LinkedinFeed).unwrap();
        assert_eq!(json, "\"linkedin_feed\"");
        let json = serde_json::to_string(&Resolution::P1080).unwrap();
        assert_eq!(json, "\"1080p\"");
    }
}
