//! Pipeline-level errors.
//!
//! Every variant is fatal to the invocation that produced it. The caller
//! decides how to surface it (see [`OptimizeError::is_client_error`]).

use thiserror::Error;

use crate::config::ConfigError;
use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::format::ImageFormat;

#[derive(Debug, Error)]
pub enum OptimizeError {
    /// The declared media type has no decoder, or the bytes failed to decode.
    #[error("Unsupported or invalid source image ({media_type}): {reason}")]
    UnsupportedOrInvalidSource { media_type: String, reason: String },

    /// A candidate encoder failed. No partial candidate set is returned.
    #[error("Failed to encode {format} candidate: {source}")]
    EncodeFailure {
        format: ImageFormat,
        #[source]
        source: EncodeError,
    },

    /// Negotiation left no format the encoder could produce.
    #[error("Cannot produce any encoded candidate for the accepted formats")]
    NoEncodableCandidate,

    /// The thumbnail could not be built from the decoded image.
    #[error("Failed to build placeholder thumbnail: {0}")]
    Placeholder(#[source] DecodeError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

impl OptimizeError {
    pub(crate) fn unsupported_type(media_type: &str) -> Self {
        OptimizeError::UnsupportedOrInvalidSource {
            media_type: media_type.to_string(),
            reason: "no decoder for declared type".to_string(),
        }
    }

    pub(crate) fn invalid_source(media_type: &str, err: DecodeError) -> Self {
        OptimizeError::UnsupportedOrInvalidSource {
            media_type: media_type.to_string(),
            reason: err.to_string(),
        }
    }

    /// True when the request itself was at fault (bad upload), false when the
    /// server could not produce a result.
    pub fn is_client_error(&self) -> bool {
        matches!(self, OptimizeError::UnsupportedOrInvalidSource { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_is_client_error() {
        assert!(OptimizeError::unsupported_type("image/gif").is_client_error());
    }

    #[test]
    fn test_server_side_errors() {
        assert!(!OptimizeError::NoEncodableCandidate.is_client_error());

        let err = OptimizeError::EncodeFailure {
            format: ImageFormat::Avif,
            source: EncodeError::EncodingFailed("boom".to_string()),
        };
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_error_display() {
        let err = OptimizeError::unsupported_type("image/gif");
        assert_eq!(
            err.to_string(),
            "Unsupported or invalid source image (image/gif): no decoder for declared type"
        );

        let err = OptimizeError::EncodeFailure {
            format: ImageFormat::Webp,
            source: EncodeError::EncodingFailed("boom".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Failed to encode image/webp candidate: Encoding failed: boom"
        );
    }
}
