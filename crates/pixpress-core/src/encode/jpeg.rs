//! JPEG encoding.
//!
//! JPEG carries no alpha channel, so the alpha byte of every pixel is dropped
//! before encoding.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::{EncodeError, JpegOptions};
use crate::decode::RawImage;

/// Encode a RawImage to JPEG bytes.
///
/// Quality is clamped to 1-100.
pub fn encode_jpeg(image: &RawImage, options: &JpegOptions) -> Result<Vec<u8>, EncodeError> {
    let rgb: Vec<u8> = image
        .pixels()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let quality = options.quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(&rgb, image.width(), image.height(), ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
