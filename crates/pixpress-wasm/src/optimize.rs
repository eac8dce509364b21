//! Optimisation WASM bindings.
//!
//! Exposes the pixpress-core pipeline to a JavaScript request handler: hand it
//! the uploaded file, its declared content type, and the request's `Accept`
//! header, then answer with the returned bytes and headers.
//!
//! # Example
//!
//! ```typescript
//! import { optimize } from '@pixpress/wasm';
//!
//! const file = (await request.formData()).get('file') as File;
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! try {
//!   const image = optimize(bytes, file.type, request.headers.get('accept'));
//!   return new Response(image.bytes(), { headers: image.headers() });
//! } catch (err) {
//!   return new Response(JSON.stringify(err), { status: err.status });
//! }
//! ```

use pixpress_core::OptimizeConfig;
use tracing::warn;
use wasm_bindgen::prelude::*;

use crate::types::{ErrorBody, JsOptimizedImage};

/// Optimise an uploaded image for the requesting client.
///
/// # Arguments
///
/// * `bytes` - The uploaded file as a `Uint8Array`
/// * `content_type` - The file's declared media type (trusted, not sniffed)
/// * `accept` - The request's `Accept` header; missing means the default list
/// * `config` - Optional partial `OptimizeConfig` object, e.g.
///   `{ policy: "legacy_ascending", encode: { jpeg: { quality: 80 } } }`
///
/// # Errors
///
/// Throws `{ ok: 0, status, message }`: status 400 for an unsupported or
/// undecodable upload (or a bad config), 500 when no candidate could be built.
#[wasm_bindgen]
pub fn optimize(
    bytes: &[u8],
    content_type: &str,
    accept: Option<String>,
    config: JsValue,
) -> Result<JsOptimizedImage, JsValue> {
    let config = parse_config(config)?;
    let accept = accept.unwrap_or_default();

    pixpress_core::optimize(bytes, content_type, &accept, &config)
        .map(JsOptimizedImage::from_result)
        .map_err(|e| {
            let body = ErrorBody::from_error(&e);
            warn!(status = body.status, error = %e, content_type, "optimisation failed");
            to_js_error(&body)
        })
}

/// Media types this build accepts as uploads.
#[wasm_bindgen]
pub fn supported_source_types() -> Vec<String> {
    pixpress_core::registry()
        .decodable_formats()
        .map(|format| format.media_type().to_string())
        .collect()
}

fn parse_config(config: JsValue) -> Result<OptimizeConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(OptimizeConfig::default());
    }
    serde_wasm_bindgen::from_value(config).map_err(|e| {
        warn!(error = %e, "rejected optimisation config");
        to_js_error(&ErrorBody::config(format!("Invalid configuration: {}", e)))
    })
}

fn to_js_error(body: &ErrorBody) -> JsValue {
    serde_wasm_bindgen::to_value(body).unwrap_or_else(|_| JsValue::from_str(&body.message))
}
