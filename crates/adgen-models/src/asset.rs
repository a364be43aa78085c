//! Ad visual produced by the asset generation stage.

use crate::request::ProductImage;

/// Image the video is animated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAsset {
    image: ProductImage,
    fallback: bool,
}

impl GeneratedAsset {
    /// Asset returned by the image model.
    pub fn generated(image: ProductImage) -> Self {
        Self {
            image,
            fallback: false,
        }
    }

    /// The user's original image, used when the image model produced nothing usable.
    pub fn fallback(original: ProductImage) -> Self {
        Self {
            image: original,
            fallback: true,
        }
    }

    pub fn image(&self) -> &ProductImage {
        &self.image
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// `data:` URL handed back in the run result.
    pub fn to_data_url(&self) -> String {
        self.image.to_data_url()
    }
}
