//! Generation request and product image types.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::platform::{SocialPlatform, VideoQuality};

/// Maximum description length accepted by the pipeline.
pub const MAX_DESCRIPTION_CHARS: usize = 300;

const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Product image supplied by the user, kept as raw bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct ProductImage {
    bytes: Vec<u8>,
    mime_type: String,
}

impl ProductImage {
    /// Create an image with an explicit MIME type.
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Create an image, sniffing the MIME type from the leading bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let mime_type = sniff_mime(&bytes).unwrap_or(DEFAULT_IMAGE_MIME).to_string();
        Self { bytes, mime_type }
    }

    /// Parse a `data:<mime>;base64,<payload>` URL.
    ///
    /// A bare base64 payload (no `data:` prefix) is accepted as well.
    pub fn from_data_url(data_url: &str) -> ModelResult<Self> {
        let data_url = data_url.trim();
        let (mime, payload) = match data_url.strip_prefix("data:") {
            Some(rest) => {
                let (header, payload) = rest
                    .split_once(',')
                    .ok_or_else(|| ModelError::invalid_image("data URL has no payload"))?;
                let mime = header.strip_suffix(";base64").ok_or_else(|| {
                    ModelError::invalid_image("only base64 data URLs are supported")
                })?;
                (Some(mime), payload)
            }
            None => (None, data_url),
        };

        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| ModelError::invalid_image(format!("invalid base64 payload: {}", e)))?;

        Ok(match mime {
            Some(mime) if !mime.is_empty() => Self::new(bytes, mime),
            _ => Self::from_bytes(bytes),
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Base64 payload without the data URL header.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// Encode as a `data:` URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }
}

impl fmt::Debug for ProductImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductImage")
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else if bytes.starts_with(b"GIF8") {
        Some("image/gif")
    } else {
        None
    }
}

/// Input to one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Product image
    #[serde(skip)]
    pub image: Option<ProductImage>,
    /// Free-text product description
    pub description: String,
    /// Target platform (drives aspect ratio)
    pub platform: SocialPlatform,
    /// Output quality (drives resolution)
    #[serde(default)]
    pub quality: VideoQuality,
    /// Address to share the finished video with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_email: Option<String>,
}

impl GenerationRequest {
    pub fn new(
        image: ProductImage,
        description: impl Into<String>,
        platform: SocialPlatform,
        quality: VideoQuality,
    ) -> Self {
        Self {
            image: Some(image),
            description: description.into(),
            platform,
            quality,
            notify_email: None,
        }
    }

    /// Attach a notification address. Blank addresses are ignored.
    pub fn with_notify_email(mut self, email: impl Into<String>) -> Self {
        let email = email.into();
        let email = email.trim();
        self.notify_email = if email.is_empty() {
            None
        } else {
            Some(email.to_string())
        };
        self
    }

    /// Check that the request may start a pipeline run.
    pub fn validate(&self) -> ModelResult<()> {
        match &self.image {
            Some(image) if !image.is_empty() => {}
            _ => return Err(ModelError::invalid_request("Please upload a product image.")),
        }

        if self.description.trim().is_empty() {
            return Err(ModelError::invalid_request(
                "Please provide a product description.",
            ));
        }

        let chars = self.description.chars().count();
        if chars > MAX_DESCRIPTION_CHARS {
            return Err(ModelError::invalid_request(format!(
                "Product description is {} characters; the limit is {}.",
                chars, MAX_DESCRIPTION_CHARS
            )));
        }

        Ok(())
    }

    /// The product image. Only valid after [`validate`](Self::validate) succeeded.
    pub fn image(&self) -> Option<&ProductImage> {
        self.image.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn request(description: &str) -> GenerationRequest {
        GenerationRequest::new(
            ProductImage::from_bytes(PNG_HEADER.to_vec()),
            description,
            SocialPlatform::YoutubeShorts,
            VideoQuality::Standard,
        )
    }

    #[test]
    fn test_mime_sniffing() {
        assert_eq!(ProductImage::from_bytes(PNG_HEADER.to_vec()).mime_type(), "image/png");
        assert_eq!(
            ProductImage::from_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0]).mime_type(),
            "image/jpeg"
        );
        assert_eq!(ProductImage::from_bytes(vec![1, 2, 3]).mime_type(), "image/jpeg");
    }

    #[test]
    fn test_data_url_parsing() {
        let image = ProductImage::from_data_url("data:image/webp;base64,AAEC").unwrap();
        assert_eq!(image.mime_type(), "image/webp");
        assert_eq!(image.bytes(), &[0, 1, 2]);
        assert_eq!(image.to_data_url(), "data:image/webp;base64,AAEC");

        let bare = ProductImage::from_data_url("AAEC").unwrap();
        assert_eq!(bare.bytes(), &[0, 1, 2]);

        assert!(ProductImage::from_data_url("data:image/png,raw").is_err());
        assert!(ProductImage::from_data_url("data:image/png;base64,@@@").is_err());
    }

    #[test]
    fn test_validate_accepts_complete_request() {
        assert!(request("A ceramic mug").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_parts() {
        assert!(request("   ").validate().is_err());

        let mut missing_image = request("A ceramic mug");
        missing_image.image = None;
        assert!(missing_image.validate().is_err());

        let mut empty_image = request("A ceramic mug");
        empty_image.image = Some(ProductImage::new(Vec::new(), "image/png"));
        assert!(empty_image.validate().is_err());
    }

    #[test]
    fn test_validate_description_limit() {
        let at_limit = "x".repeat(MAX_DESCRIPTION_CHARS);
        assert!(request(&at_limit).validate().is_ok());

        let over = "x".repeat(MAX_DESCRIPTION_CHARS + 1);
        let err = request(&over).validate().unwrap_err();
        assert!(err.to_string().contains("301"));
    }

    #[test]
    fn test_blank_email_is_dropped() {
        assert_eq!(request("mug").with_notify_email("  ").notify_email, None);
        assert_eq!(
            request("mug").with_notify_email(" a@b.co ").notify_email.as_deref(),
            Some("a@b.co")
        );
    }

    #[test]
    fn test_debug_hides_bytes() {
        let image = ProductImage::new(vec![7; 64], "image/png");
        let debug = format!("{:?}", image);
        assert!(debug.contains("len: 64"));
        assert!(!debug.contains("7, 7"));
    }
}
