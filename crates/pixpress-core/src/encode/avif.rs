//! AVIF encoding via ravif/rav1e.

use std::io::Cursor;

use image::codecs::avif::AvifEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::{AvifOptions, EncodeError};
use crate::decode::RawImage;

/// Encode a RawImage to AVIF bytes.
///
/// Quality is clamped to 1-100 and speed to 1-10.
pub fn encode_avif(image: &RawImage, options: &AvifOptions) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = Cursor::new(Vec::new());
    let encoder = AvifEncoder::new_with_speed_quality(
        &mut buffer,
        options.speed.clamp(1, 10),
        options.quality.clamp(1, 100),
    );

    encoder
        .write_image(
            image.pixels(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
