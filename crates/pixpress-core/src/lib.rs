//! Pixpress Core - content-negotiated image optimisation
//!
//! Decodes an uploaded image according to its declared media type, re-encodes
//! it into every format the requesting client can display, ranks the
//! candidates by size reduction, and attaches a ThumbHash placeholder.
//!
//! # Usage
//!
//! ```ignore
//! use pixpress_core::{optimize, OptimizeConfig};
//!
//! let bytes = std::fs::read("photo.png")?;
//! let result = optimize(&bytes, "image/png", "image/avif,image/webp", &OptimizeConfig::default())?;
//! let best = result.best();
//! println!("{} saved {} bytes", best.content_type(), best.size_delta());
//! ```
//!
//! # Features
//!
//! - `parallel` (default): run candidate encodes and hashing on rayon
//! - `avif-decode` (default): accept AVIF uploads (needs the native dav1d library)

pub mod candidate;
pub mod codec;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod format;
pub mod negotiate;
pub mod pipeline;
pub mod placeholder;
pub mod select;

pub use candidate::EncodedCandidate;
pub use codec::{registry, CodecRegistry};
pub use config::{ConfigError, OptimizeConfig};
pub use decode::{DecodeError, DecodeOptions, RawImage};
pub use encode::{EncodeError, EncodeOptions};
pub use error::OptimizeError;
pub use format::ImageFormat;
pub use negotiate::ClientCapabilities;
pub use pipeline::{optimize, optimize_with_defaults, OptimizationResult};
pub use placeholder::{PerceptualHash, ThumbnailOptions};
pub use select::SelectionPolicy;
