//! Image resizing for thumbnail generation.
//!
//! Uses the `image` crate's resampling filters. All functions return new
//! `RawImage` instances without modifying the input.

use super::{DecodeError, FilterType, FitMethod, RawImage};

/// Resize an image into a `width x height` box.
///
/// With [`FitMethod::Contain`] the result preserves the source aspect ratio:
/// the limiting axis equals the box edge and the other axis is at most the
/// box edge (never below 1px). Images smaller than the box are scaled up.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if the box is empty.
pub fn resize(
    image: &RawImage,
    width: u32,
    height: u32,
    fit: FitMethod,
    filter: FilterType,
) -> Result<RawImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    let (target_width, target_height) = match fit {
        FitMethod::Contain => contain_dimensions(image.width(), image.height(), width, height),
    };

    // Fast path: if dimensions match, just clone
    if image.width() == target_width && image.height() == target_height {
        return Ok(image.clone());
    }

    let view = image.as_rgba_view().ok_or(DecodeError::BufferMismatch {
        expected: image.pixel_count() * super::CHANNELS,
        actual: image.byte_len(),
    })?;

    let resized = image::imageops::resize(
        &view,
        target_width,
        target_height,
        filter.to_image_filter(),
    );

    RawImage::from_rgba_image(resized)
}

/// Calculate dimensions that fit `width x height` inside the box while
/// preserving aspect ratio.
pub(crate) fn contain_dimensions(width: u32, height: u32, box_width: u32, box_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let (w, h) = (u64::from(width), u64::from(height));
    let (bw, bh) = (u64::from(box_width), u64::from(box_height));

    if w * bh >= h * bw {
        // Relatively wider than the box: constrain by width
        let new_height = (h * bw + w / 2) / w;
        (box_width, new_height.clamp(1, bh) as u32)
    } else {
        // Relatively taller: constrain by height
        let new_width = (w * bh + h / 2) / h;
        (new_width.clamp(1, bw) as u32, box_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_image(width: u32, height: u32) -> RawImage {
        // Create a simple gradient image for testing
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8); // R
                pixels.push(((y * 255) / height.max(1)) as u8); // G
                pixels.push(128); // B
                pixels.push(255); // A
            }
        }
        RawImage::new(width, height, pixels).unwrap()
    }

    #[test]
    fn test_contain_wide_image() {
        let img = create_test_image(400, 100);
        let resized = resize(&img, 100, 100, FitMethod::Contain, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width(), 100);
        assert_eq!(resized.height(), 25);
        assert_eq!(resized.byte_len(), 100 * 25 * 4);
    }

    #[test]
    fn test_contain_tall_image() {
        let img = create_test_image(60, 240);
        let resized = resize(&img, 100, 100, FitMethod::Contain, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width(), 25);
        assert_eq!(resized.height(), 100);
    }

    #[test]
    fn test_contain_upscales_small_image() {
        let img = create_test_image(10, 5);
        let resized = resize(&img, 100, 100, FitMethod::Contain, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width(), 100);
        assert_eq!(resized.height(), 50);
    }

    #[test]
    fn test_contain_same_dimensions() {
        let img = create_test_image(100, 100);
        let resized = resize(&img, 100, 100, FitMethod::Contain, FilterType::Bilinear).unwrap();

        assert_eq!(resized, img);
    }

    #[test]
    fn test_resize_zero_box_error() {
        let img = create_test_image(100, 50);

        assert!(resize(&img, 0, 50, FitMethod::Contain, FilterType::Bilinear).is_err());
        assert!(resize(&img, 50, 0, FitMethod::Contain, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_contain_dimensions_extreme_ratio() {
        // Never collapses to zero on the short axis
        assert_eq!(contain_dimensions(10_000, 1, 100, 100), (100, 1));
        assert_eq!(contain_dimensions(1, 10_000, 100, 100), (1, 100));
    }

    #[test]
    fn test_contain_dimensions_non_square_box() {
        assert_eq!(contain_dimensions(6000, 4000, 200, 100), (150, 100));
        assert_eq!(contain_dimensions(4000, 1000, 200, 100), (200, 50));
    }

    #[test]
    fn test_contain_dimensions_zero_input() {
        assert_eq!(contain_dimensions(0, 0, 100, 100), (0, 0));
    }

    #[test]
    fn test_all_filter_types() {
        let img = create_test_image(100, 50);

        for filter in [
            FilterType::Nearest,
            FilterType::Bilinear,
            FilterType::Lanczos3,
        ] {
            let resized = resize(&img, 50, 50, FitMethod::Contain, filter).unwrap();
            assert_eq!(resized.width(), 50);
            assert_eq!(resized.height(), 25);
        }
    }
}
