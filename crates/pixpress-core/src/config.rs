//! Pipeline configuration.
//!
//! `OptimizeConfig` is plain data with serde support so it can come from a
//! config file or a JS object. Missing fields fall back to their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::DecodeOptions;
use crate::encode::EncodeOptions;
use crate::format::ImageFormat;
use crate::placeholder::{ThumbnailOptions, MAX_THUMBNAIL_EDGE};
use crate::select::SelectionPolicy;

/// Default candidate order.
pub const DEFAULT_TARGETS: [ImageFormat; 4] = [
    ImageFormat::Avif,
    ImageFormat::Jpeg,
    ImageFormat::Webp,
    ImageFormat::Png,
];

/// Configuration problems detected before any decoding starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("thumbnail box {width}x{height} must be between 1 and 100 on each edge")]
    ThumbnailBox { width: u32, height: u32 },

    #[error("no candidate target formats configured")]
    NoTargets,

    #[error("target {0} listed more than once")]
    DuplicateTarget(ImageFormat),

    #[error("{codec} quality {value} must be between 1 and 100")]
    Quality { codec: &'static str, value: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizeConfig {
    pub decode: DecodeOptions,
    pub encode: EncodeOptions,
    pub thumbnail: ThumbnailOptions,
    /// Formats considered for candidates, in generation order.
    pub targets: Vec<ImageFormat>,
    /// Format produced even when the client did not list it.
    pub fallback: Option<ImageFormat>,
    pub policy: SelectionPolicy,
}

impl Default for OptimizeConfig {
    fn default() -> Self {
        Self {
            decode: DecodeOptions::default(),
            encode: EncodeOptions::default(),
            thumbnail: ThumbnailOptions::default(),
            targets: DEFAULT_TARGETS.to_vec(),
            fallback: None,
            policy: SelectionPolicy::default(),
        }
    }
}

impl OptimizeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ThumbnailOptions { width, height, .. } = self.thumbnail;
        let edge = 1..=MAX_THUMBNAIL_EDGE;
        if !edge.contains(&width) || !edge.contains(&height) {
            return Err(ConfigError::ThumbnailBox { width, height });
        }

        if self.targets.is_empty() {
            return Err(ConfigError::NoTargets);
        }
        for (i, target) in self.targets.iter().enumerate() {
            if self.targets[..i].contains(target) {
                return Err(ConfigError::DuplicateTarget(*target));
            }
        }

        check_quality("jpeg", self.encode.jpeg.quality)?;
        check_quality("avif", self.encode.avif.quality)?;
        Ok(())
    }
}

fn check_quality(codec: &'static str, value: u8) -> Result<(), ConfigError> {
    if (1..=100).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Quality { codec, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::FilterType;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(OptimizeConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_default_targets() {
        let config = OptimizeConfig::new();
        assert_eq!(config.targets, DEFAULT_TARGETS.to_vec());
        assert_eq!(config.fallback, None);
        assert_eq!(config.policy, SelectionPolicy::MaxReduction);
        assert_eq!(config.thumbnail.width, 100);
        assert_eq!(config.thumbnail.height, 100);
        assert_eq!(config.thumbnail.filter, FilterType::Bilinear);
    }

    #[test]
    fn test_oversized_thumbnail_rejected() {
        let mut config = OptimizeConfig::default();
        config.thumbnail.width = 101;
        assert_eq!(
            config.validate(),
            Err(ConfigError::ThumbnailBox {
                width: 101,
                height: 100
            })
        );
    }

    #[test]
    fn test_empty_thumbnail_rejected() {
        let mut config = OptimizeConfig::default();
        config.thumbnail.height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_no_targets_rejected() {
        let mut config = OptimizeConfig::default();
        config.targets.clear();
        assert_eq!(config.validate(), Err(ConfigError::NoTargets));
    }

    #[test]
    fn test_duplicate_target_rejected() {
        let mut config = OptimizeConfig::default();
        config.targets.push(ImageFormat::Webp);
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicateTarget(ImageFormat::Webp))
        );
    }

    #[test]
    fn test_zero_quality_rejected() {
        let mut config = OptimizeConfig::default();
        config.encode.jpeg.quality = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::Quality {
                codec: "jpeg",
                value: 0
            })
        );
    }
}
