//! Pixpress WASM - WebAssembly bindings for Pixpress
//!
//! This crate exposes the pixpress-core optimisation pipeline to
//! JavaScript/TypeScript request handlers.
//!
//! # Module Structure
//!
//! - `optimize` - The upload-to-response optimisation entry point
//! - `types` - WASM-compatible wrapper types for results and errors
//!
//! # Usage
//!
//! ```typescript
//! import init, { optimize, JsOptimizedImage } from '@pixpress/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image: JsOptimizedImage = optimize(bytes, file.type, accept);
//! console.log(`${image.content_type} saved ${image.size_reduced} bytes`);
//! ```

use wasm_bindgen::prelude::*;

mod optimize;
mod types;

// Re-export public types
pub use optimize::{optimize, supported_source_types};
pub use types::JsOptimizedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
