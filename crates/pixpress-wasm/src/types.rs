//! WASM-compatible wrapper types for optimisation results.

use pixpress_core::{OptimizationResult, OptimizeError};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// The selected candidate plus the metadata a response needs.
///
/// # Memory Management
///
/// The encoded bytes live in WASM memory. `bytes()` copies them to a JS
/// `Uint8Array`; call it once and keep the result.
#[wasm_bindgen]
pub struct JsOptimizedImage {
    width: u32,
    height: u32,
    content_type: String,
    extension: String,
    bytes: Vec<u8>,
    size_reduced: i64,
    hash_hex: String,
    candidate_count: usize,
}

#[wasm_bindgen]
impl JsOptimizedImage {
    /// Source width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Source height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Media type of the selected encoding
    #[wasm_bindgen(getter)]
    pub fn content_type(&self) -> String {
        self.content_type.clone()
    }

    /// Extension tag of the uploaded source, e.g. `.png`
    #[wasm_bindgen(getter)]
    pub fn extension(&self) -> String {
        self.extension.clone()
    }

    /// Raw RGBA length minus encoded length, as a JS number.
    #[wasm_bindgen(getter)]
    pub fn size_reduced(&self) -> f64 {
        self.size_reduced as f64
    }

    /// ThumbHash of the source as lower-case hex
    #[wasm_bindgen(getter)]
    pub fn hash_hex(&self) -> String {
        self.hash_hex.clone()
    }

    /// Number of candidates that were encoded
    #[wasm_bindgen(getter)]
    pub fn candidate_count(&self) -> usize {
        self.candidate_count
    }

    /// Encoded bytes of the selected candidate (copied into JS memory).
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Response headers as a plain object:
    /// `Content-Type` and the `X-Image-*` metadata headers.
    pub fn headers(&self) -> Result<js_sys::Object, JsValue> {
        let headers = js_sys::Object::new();
        for (name, value) in self.header_entries() {
            js_sys::Reflect::set(&headers, &JsValue::from_str(name), &JsValue::from_str(&value))?;
        }
        Ok(headers)
    }
}

impl JsOptimizedImage {
    /// Build from a core result, keeping only the selected candidate.
    pub(crate) fn from_result(result: OptimizationResult) -> Self {
        let width = result.width();
        let height = result.height();
        let extension = result.extension().to_string();
        let hash_hex = result.hash().to_hex();
        let candidate_count = result.candidates().len();
        let best = result.into_best();

        Self {
            width,
            height,
            content_type: best.content_type().to_string(),
            extension,
            size_reduced: best.size_delta(),
            hash_hex,
            candidate_count,
            bytes: best.into_data(),
        }
    }

    pub(crate) fn header_entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Content-Type", self.content_type.clone()),
            ("X-Image-Width", self.width.to_string()),
            ("X-Image-Height", self.height.to_string()),
            ("X-Image-Size-Reduced", self.size_reduced.to_string()),
            ("X-Image-Hash", self.hash_hex.clone()),
        ]
    }
}

/// JSON-shaped error thrown to JavaScript: `{ ok: 0, status, message }`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub(crate) struct ErrorBody {
    pub ok: u8,
    pub status: u16,
    pub message: String,
}

impl ErrorBody {
    /// 400 for a bad upload, 500 when nothing could be produced.
    pub(crate) fn from_error(err: &OptimizeError) -> Self {
        Self {
            ok: 0,
            status: if err.is_client_error() { 400 } else { 500 },
            message: err.to_string(),
        }
    }

    pub(crate) fn config(message: String) -> Self {
        Self {
            ok: 0,
            status: 400,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixpress_core::optimize_with_defaults;

    fn png_bytes() -> Vec<u8> {
        let img = image_fixture();
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    fn image_fixture() -> image::DynamicImage {
        image::DynamicImage::ImageRgba8(image::RgbaImage::from_fn(20, 10, |x, y| {
            image::Rgba([(x * 12) as u8, (y * 25) as u8, 90, 255])
        }))
    }

    #[test]
    fn test_from_result_keeps_best() {
        let result = optimize_with_defaults(&png_bytes(), "image/png", "image/webp").unwrap();
        let expected_len = result.best().byte_length();

        let js = JsOptimizedImage::from_result(result);
        assert_eq!(js.width(), 20);
        assert_eq!(js.height(), 10);
        assert_eq!(js.content_type(), "image/webp");
        assert_eq!(js.extension(), ".png");
        assert_eq!(js.bytes().len(), expected_len);
        assert_eq!(js.candidate_count(), 1);
    }

    #[test]
    fn test_header_entries() {
        let result = optimize_with_defaults(&png_bytes(), "image/png", "image/png").unwrap();
        let js = JsOptimizedImage::from_result(result);
        let headers = js.header_entries();

        let names: Vec<_> = headers.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "Content-Type",
                "X-Image-Width",
                "X-Image-Height",
                "X-Image-Size-Reduced",
                "X-Image-Hash"
            ]
        );
        assert_eq!(headers[0].1, "image/png");
        assert_eq!(headers[1].1, "20");
        assert_eq!(headers[2].1, "10");
        assert_eq!(headers[4].1, js.hash_hex());
    }

    #[test]
    fn test_error_status_mapping() {
        let err = optimize_with_defaults(&png_bytes(), "image/gif", "").unwrap_err();
        let body = ErrorBody::from_error(&err);
        assert_eq!(body.ok, 0);
        assert_eq!(body.status, 400);

        let err = optimize_with_defaults(&png_bytes(), "image/png", "image/jxl").unwrap_err();
        let body = ErrorBody::from_error(&err);
        assert_eq!(body.status, 500);
        assert_eq!(
            body.message,
            "Cannot produce any encoded candidate for the accepted formats"
        );
    }
}
