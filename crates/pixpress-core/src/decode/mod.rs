//! Source decoding and resizing.
//!
//! This module provides:
//! - Per-format decoders (PNG, JPEG, WebP, and AVIF with `avif-decode`)
//! - [`decode_source`], which dispatches on the declared media type
//! - Contain-fit resizing used for placeholder thumbnails
//!
//! Every decoder yields a [`RawImage`]: RGBA8, 4 bytes per pixel. The declared
//! media type is trusted; the byte stream is never sniffed.
//!
//! # Examples
//!
//! ```ignore
//! use pixpress_core::decode::{decode_source, DecodeOptions};
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let (image, format) = decode_source(&bytes, "image/png", &DecodeOptions::default())?;
//! println!("Decoded {}x{} {}", image.width(), image.height(), format);
//! ```

mod resize;
mod source;
mod types;

#[cfg(test)]
pub(crate) use source::samples;

#[cfg(feature = "avif-decode")]
pub use source::decode_avif;
pub use resize::resize;
pub use source::{decode_jpeg, decode_png, decode_webp};
pub use types::{
    DecodeError, DecodeOptions, FilterType, FitMethod, Orientation, RawImage, CHANNELS,
};

use crate::codec::registry;
use crate::error::OptimizeError;
use crate::format::ImageFormat;

/// Decode an upload according to its declared media type.
///
/// Returns the image together with its canonical format tag.
///
/// # Errors
///
/// `OptimizeError::UnsupportedOrInvalidSource` when the type is unknown, has no
/// decoder in this build, or the bytes do not decode.
pub fn decode_source(
    bytes: &[u8],
    media_type: &str,
    options: &DecodeOptions,
) -> Result<(RawImage, ImageFormat), OptimizeError> {
    let format = ImageFormat::from_media_type(media_type)
        .filter(|format| registry().supports_decode(*format))
        .ok_or_else(|| OptimizeError::unsupported_type(media_type))?;

    let image = registry()
        .decode(format, bytes, options)
        .map_err(|e| OptimizeError::invalid_source(media_type, e))?;

    Ok((image, format))
}
