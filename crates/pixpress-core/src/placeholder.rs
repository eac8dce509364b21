//! Low-resolution placeholder: a contain-fit thumbnail and its ThumbHash.
//!
//! Independent of which candidate wins, so it can run alongside encoding.

use serde::{Deserialize, Serialize};

use crate::decode::{resize, DecodeError, FilterType, FitMethod, RawImage};

/// Largest thumbnail edge ThumbHash accepts.
pub const MAX_THUMBNAIL_EDGE: u32 = 100;

/// Thumbnail box settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailOptions {
    /// Box width, 1-100. Default: 100.
    pub width: u32,
    /// Box height, 1-100. Default: 100.
    pub height: u32,
    /// Downsampling filter. Default: bilinear.
    pub filter: FilterType,
}

impl Default for ThumbnailOptions {
    fn default() -> Self {
        Self {
            width: MAX_THUMBNAIL_EDGE,
            height: MAX_THUMBNAIL_EDGE,
            filter: FilterType::default(),
        }
    }
}

/// Compact perceptual fingerprint of an image, for blurred placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PerceptualHash(Vec<u8>);

impl PerceptualHash {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lower-case hex, suitable for a header value.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Downsample `image` into the thumbnail box.
pub fn thumbnail(image: &RawImage, options: &ThumbnailOptions) -> Result<RawImage, DecodeError> {
    resize(
        image,
        options.width,
        options.height,
        FitMethod::Contain,
        options.filter,
    )
}

/// Hash a thumbnail's pixels. Deterministic for identical input.
pub fn perceptual_hash(thumbnail: &RawImage) -> PerceptualHash {
    PerceptualHash(thumbhash::rgba_to_thumb_hash(
        thumbnail.width() as usize,
        thumbnail.height() as usize,
        thumbnail.pixels(),
    ))
}

/// Build the thumbnail and hash it. The thumbnail itself is discarded.
pub fn generate_placeholder(
    image: &RawImage,
    options: &ThumbnailOptions,
) -> Result<PerceptualHash, DecodeError> {
    let thumb = thumbnail(image, options)?;
    Ok(perceptual_hash(&thumb))
}
