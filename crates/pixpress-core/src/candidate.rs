//! Candidate generation: encode the decoded image in every format the client
//! may receive.

use tracing::debug;

use crate::codec::registry;
use crate::config::OptimizeConfig;
use crate::decode::RawImage;
use crate::error::OptimizeError;
use crate::format::ImageFormat;
use crate::negotiate::ClientCapabilities;

/// One encoded representation of the source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedCandidate {
    format: ImageFormat,
    data: Vec<u8>,
    size_delta: i64,
}

impl EncodedCandidate {
    /// Build a candidate, computing its size delta against the raw buffer length.
    pub fn new(format: ImageFormat, data: Vec<u8>, raw_byte_len: usize) -> Self {
        let size_delta = raw_byte_len as i64 - data.len() as i64;
        Self {
            format,
            data,
            size_delta,
        }
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn content_type(&self) -> &'static str {
        self.format.media_type()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn byte_length(&self) -> usize {
        self.data.len()
    }

    /// Raw RGBA length minus encoded length. Higher means more compression.
    pub fn size_delta(&self) -> i64 {
        self.size_delta
    }
}

/// Decide whether `target` should be encoded for this request.
///
/// A target qualifies when the client accepts it (or it is the configured
/// fallback). PNG is never produced from a JPEG source: the lossless path
/// gains nothing over an already lossy upload.
pub fn should_encode(
    target: ImageFormat,
    source: ImageFormat,
    capabilities: &ClientCapabilities,
    fallback: Option<ImageFormat>,
) -> bool {
    let allowed = capabilities.accepts(target) || fallback == Some(target);
    let lossless_from_lossy = target == ImageFormat::Png && source == ImageFormat::Jpeg;
    allowed && !lossless_from_lossy
}

/// The targets that will be encoded, in configured order.
pub fn plan_targets(
    source: ImageFormat,
    capabilities: &ClientCapabilities,
    config: &OptimizeConfig,
) -> Vec<ImageFormat> {
    config
        .targets
        .iter()
        .copied()
        .filter(|target| should_encode(*target, source, capabilities, config.fallback))
        .collect()
}

/// Encode every planned target.
///
/// Returns candidates in plan order, or the first encoder failure. With the
/// `parallel` feature the encodes run concurrently; each only reads `image`.
pub fn generate_candidates(
    image: &RawImage,
    source: ImageFormat,
    capabilities: &ClientCapabilities,
    config: &OptimizeConfig,
) -> Result<Vec<EncodedCandidate>, OptimizeError> {
    let targets = plan_targets(source, capabilities, config);
    debug!(?source, ?targets, "planned candidate formats");

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        targets
            .par_iter()
            .map(|target| encode_candidate(image, *target, config))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        targets
            .iter()
            .map(|target| encode_candidate(image, *target, config))
            .collect()
    }
}

fn encode_candidate(
    image: &RawImage,
    format: ImageFormat,
    config: &OptimizeConfig,
) -> Result<EncodedCandidate, OptimizeError> {
    let data = registry()
        .encode(format, image, &config.encode)
        .map_err(|source| OptimizeError::EncodeFailure { format, source })?;

    let candidate = EncodedCandidate::new(format, data, image.byte_len());
    debug!(
        format = %format,
        bytes = candidate.byte_length(),
        delta = candidate.size_delta(),
        "encoded candidate"
    );
    Ok(candidate)
}
