//! Encoder settings.
//!
//! Every struct deserialises with `#[serde(default)]`, so a config only has to
//! name the fields it overrides.

use serde::{Deserialize, Serialize};

/// JPEG encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JpegOptions {
    /// Quality 1-100. Default: 75.
    pub quality: u8,
}

impl Default for JpegOptions {
    fn default() -> Self {
        Self { quality: 75 }
    }
}

/// WebP encoder settings.
///
/// The pure-Rust WebP encoder is lossless only, so there is nothing to tune yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebpOptions {}

/// AVIF encoder settings (rav1e through ravif).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvifOptions {
    /// Quality 1-100. Default: 60.
    pub quality: u8,
    /// Encoder speed 1 (slowest, smallest) to 10 (fastest). Default: 6.
    pub speed: u8,
}

impl Default for AvifOptions {
    fn default() -> Self {
        Self {
            quality: 60,
            speed: 6,
        }
    }
}

/// Lossless PNG optimiser settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PngOptions {
    /// Optimisation level: 0-1 fast, 2-3 default, 4 and above best. Default: 2.
    pub level: u8,
    /// Clear colour in fully transparent pixels and drop the alpha channel
    /// from fully opaque images. Default: `true`.
    pub optimise_alpha: bool,
}

impl Default for PngOptions {
    fn default() -> Self {
        Self {
            level: 2,
            optimise_alpha: true,
        }
    }
}

/// Settings for every encoder, handed to whichever one the registry calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    pub jpeg: JpegOptions,
    pub webp: WebpOptions,
    pub avif: AvifOptions,
    pub png: PngOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = EncodeOptions::default();
        assert_eq!(options.jpeg.quality, 75);
        assert_eq!(options.avif.quality, 60);
        assert_eq!(options.avif.speed, 6);
        assert_eq!(options.png.level, 2);
        assert!(options.png.optimise_alpha);
    }
}
