//! Lossless PNG re-encoding with an optimisation level and alpha cleanup.

use std::borrow::Cow;
use std::io::Cursor;

use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};

use super::{EncodeError, PngOptions};
use crate::decode::RawImage;

/// Encode a RawImage to an optimised PNG.
///
/// Output stays pixel-exact except that, with `optimise_alpha`, the colour of
/// fully transparent pixels is zeroed (it is invisible anyway) and opaque
/// images are written without an alpha channel.
pub fn encode_png(image: &RawImage, options: &PngOptions) -> Result<Vec<u8>, EncodeError> {
    let (pixels, color) = if options.optimise_alpha {
        optimise_alpha(image)
    } else {
        (Cow::Borrowed(image.pixels()), ExtendedColorType::Rgba8)
    };

    let mut buffer = Cursor::new(Vec::new());
    let encoder = PngEncoder::new_with_quality(
        &mut buffer,
        compression_for_level(options.level),
        PngFilter::Adaptive,
    );

    encoder
        .write_image(&pixels, image.width(), image.height(), color)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

fn compression_for_level(level: u8) -> CompressionType {
    match level {
        0 | 1 => CompressionType::Fast,
        2 | 3 => CompressionType::Default,
        _ => CompressionType::Best,
    }
}

fn optimise_alpha(image: &RawImage) -> (Cow<'_, [u8]>, ExtendedColorType) {
    if image.is_opaque() {
        let rgb = image
            .pixels()
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        return (Cow::Owned(rgb), ExtendedColorType::Rgb8);
    }

    let mut pixels = image.pixels().to_vec();
    for px in pixels.chunks_exact_mut(4) {
        if px[3] == 0 {
            px[..3].fill(0);
        }
    }
    (Cow::Owned(pixels), ExtendedColorType::Rgba8)
}
