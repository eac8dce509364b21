//! WebP encoding (lossless, pure Rust).

use std::io::Cursor;

use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::{EncodeError, WebpOptions};
use crate::decode::RawImage;

/// Encode a RawImage to lossless WebP bytes.
pub fn encode_webp(image: &RawImage, _options: &WebpOptions) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = Cursor::new(Vec::new());

    WebPEncoder::new_lossless(&mut buffer)
        .write_image(
            image.pixels(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::test_image;

    #[test]
    fn test_encode_webp_riff_header() {
        let webp = encode_webp(&test_image(24, 16), &WebpOptions::default()).unwrap();

        assert_eq!(&webp[0..4], b"RIFF");
        assert_eq!(&webp[8..12], b"WEBP");
    }

    #[test]
    fn test_encode_webp_is_lossless() {
        let img = test_image(9, 7);
        let webp = encode_webp(&img, &WebpOptions::default()).unwrap();
        let decoded = image::load_from_memory_with_format(&webp, image::ImageFormat::WebP)
            .unwrap()
            .into_rgba8();

        assert_eq!(decoded.as_raw().as_slice(), img.pixels());
    }
}
