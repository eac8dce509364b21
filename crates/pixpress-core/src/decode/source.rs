//! Per-format decoders producing RGBA8 with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, DecodeOptions, Orientation, RawImage};
use crate::format::ImageFormat;

/// Decode PNG bytes.
pub fn decode_png(bytes: &[u8], options: &DecodeOptions) -> Result<RawImage, DecodeError> {
    decode_as(ImageFormat::Png, bytes, options)
}

/// Decode JPEG bytes.
pub fn decode_jpeg(bytes: &[u8], options: &DecodeOptions) -> Result<RawImage, DecodeError> {
    decode_as(ImageFormat::Jpeg, bytes, options)
}

/// Decode WebP bytes (lossy or lossless).
pub fn decode_webp(bytes: &[u8], options: &DecodeOptions) -> Result<RawImage, DecodeError> {
    decode_as(ImageFormat::Webp, bytes, options)
}

/// Decode AVIF bytes through dav1d.
#[cfg(feature = "avif-decode")]
pub fn decode_avif(bytes: &[u8], options: &DecodeOptions) -> Result<RawImage, DecodeError> {
    decode_as(ImageFormat::Avif, bytes, options)
}

/// Decode `bytes` as exactly `format`. The byte stream is never sniffed:
/// data that does not match the declared format is reported as corrupt.
fn decode_as(
    format: ImageFormat,
    bytes: &[u8],
    options: &DecodeOptions,
) -> Result<RawImage, DecodeError> {
    let reader = ImageReader::with_format(Cursor::new(bytes), format.to_image_format());

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let img = if options.apply_orientation {
        apply_orientation(img, extract_orientation(bytes))
    } else {
        img
    };

    RawImage::from_rgba_image(img.into_rgba8())
}

/// Extract EXIF orientation from any container kamadak-exif understands
/// (JPEG, PNG, WebP, HEIF).
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
