//! Encoders for every candidate output format.
//!
//! Each encoder takes a borrowed [`RawImage`](crate::decode::RawImage) and its
//! own options struct and returns the encoded bytes:
//! - AVIF (lossy, ravif)
//! - WebP (lossless)
//! - JPEG (lossy, alpha dropped)
//! - PNG (lossless, optimised)
//!
//! # Examples
//!
//! ```ignore
//! use pixpress_core::decode::RawImage;
//! use pixpress_core::encode::{encode_jpeg, JpegOptions};
//!
//! let image = RawImage::new(100, 100, vec![128u8; 100 * 100 * 4])?;
//! let jpeg_bytes = encode_jpeg(&image, &JpegOptions::default())?;
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod avif;
mod jpeg;
mod options;
mod png;
mod webp;

use thiserror::Error;

use crate::format::ImageFormat;

pub use avif::encode_avif;
pub use jpeg::encode_jpeg;
pub use options::{AvifOptions, EncodeOptions, JpegOptions, PngOptions, WebpOptions};
pub use png::encode_png;
pub use webp::encode_webp;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// No encoder is registered for the format.
    #[error("No encoder available for {0}")]
    UnsupportedFormat(ImageFormat),

    /// The codec rejected the image.
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

#[cfg(test)]
pub(crate) fn test_image(width: u32, height: u32) -> crate::decode::RawImage {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.push(((x * 255) / width.max(1)) as u8);
            pixels.push(((y * 255) / height.max(1)) as u8);
            pixels.push(((x + y) * 127 / (width + height)) as u8);
            pixels.push(255);
        }
    }
    crate::decode::RawImage::new(width, height, pixels).unwrap()
}
