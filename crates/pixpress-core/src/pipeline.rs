//! The end-to-end optimisation pipeline.
//!
//! decode → negotiate → (encode candidates ‖ placeholder hash) → rank.
//! All-or-nothing: any stage failure aborts the invocation.

use tracing::{debug, debug_span};

use crate::candidate::{generate_candidates, EncodedCandidate};
use crate::config::OptimizeConfig;
use crate::decode::{decode_source, DecodeError, RawImage};
use crate::error::OptimizeError;
use crate::format::ImageFormat;
use crate::negotiate::ClientCapabilities;
use crate::placeholder::{generate_placeholder, PerceptualHash};
use crate::select::select_candidates;

/// Everything produced for one upload.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    width: u32,
    height: u32,
    source_format: ImageFormat,
    raw_byte_length: usize,
    hash: PerceptualHash,
    /// Ranked, never empty.
    candidates: Vec<EncodedCandidate>,
}

impl OptimizationResult {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn source_format(&self) -> ImageFormat {
        self.source_format
    }

    /// Extension tag of the source, e.g. `.png`.
    pub fn extension(&self) -> &'static str {
        self.source_format.extension()
    }

    /// Length of the decoded RGBA buffer every size delta is measured against.
    pub fn raw_byte_length(&self) -> usize {
        self.raw_byte_length
    }

    pub fn hash(&self) -> &PerceptualHash {
        &self.hash
    }

    /// All candidates, best first.
    pub fn candidates(&self) -> &[EncodedCandidate] {
        &self.candidates
    }

    /// The selected candidate.
    pub fn best(&self) -> &EncodedCandidate {
        &self.candidates[0]
    }

    /// Consume the result, keeping only the selected candidate.
    pub fn into_best(mut self) -> EncodedCandidate {
        self.candidates.swap_remove(0)
    }
}

/// Optimise an upload for a client.
///
/// * `bytes` - The uploaded file
/// * `media_type` - Its declared type; the bytes are decoded as exactly this
/// * `accept` - The client's capability declaration (an `Accept` header)
///
/// # Errors
///
/// See [`OptimizeError`]; every variant is fatal and no partial result is
/// returned. Errors are not logged here; the caller decides how to report them.
pub fn optimize(
    bytes: &[u8],
    media_type: &str,
    accept: &str,
    config: &OptimizeConfig,
) -> Result<OptimizationResult, OptimizeError> {
    debug_span!("optimize", media_type, input_bytes = bytes.len())
        .in_scope(|| run(bytes, media_type, accept, config))
}

/// [`optimize`] with the default configuration.
pub fn optimize_with_defaults(
    bytes: &[u8],
    media_type: &str,
    accept: &str,
) -> Result<OptimizationResult, OptimizeError> {
    optimize(bytes, media_type, accept, &OptimizeConfig::default())
}

fn run(
    bytes: &[u8],
    media_type: &str,
    accept: &str,
    config: &OptimizeConfig,
) -> Result<OptimizationResult, OptimizeError> {
    config.validate()?;

    let (raw, source_format) = debug_span!("decode")
        .in_scope(|| decode_source(bytes, media_type, &config.decode))?;
    debug!(
        format = %source_format,
        width = raw.width(),
        height = raw.height(),
        "decoded source"
    );

    let capabilities = ClientCapabilities::parse(accept);
    debug!(
        accepted = ?capabilities.iter().collect::<Vec<_>>(),
        defaulted = capabilities.is_default(),
        "negotiated client capabilities"
    );

    let (candidates, hash) = debug_span!("encode")
        .in_scope(|| encode_and_hash(&raw, source_format, &capabilities, config));
    let candidates = candidates?;
    let hash = hash.map_err(OptimizeError::Placeholder)?;

    let candidates = select_candidates(candidates, config.policy)?;
    let best = &candidates[0];
    debug!(
        policy = ?config.policy,
        format = %best.format(),
        bytes = best.byte_length(),
        delta = best.size_delta(),
        considered = candidates.len(),
        "selected candidate"
    );

    Ok(OptimizationResult {
        width: raw.width(),
        height: raw.height(),
        source_format,
        raw_byte_length: raw.byte_len(),
        hash,
        candidates,
    })
}

type StageResults = (
    Result<Vec<EncodedCandidate>, OptimizeError>,
    Result<PerceptualHash, DecodeError>,
);

/// Candidate encodes and the placeholder only read `raw`, so they may overlap.
fn encode_and_hash(
    raw: &RawImage,
    source_format: ImageFormat,
    capabilities: &ClientCapabilities,
    config: &OptimizeConfig,
) -> StageResults {
    let encode = || generate_candidates(raw, source_format, capabilities, config);
    let hash = || generate_placeholder(raw, &config.thumbnail);

    #[cfg(feature = "parallel")]
    {
        rayon::join(encode, hash)
    }

    #[cfg(not(feature = "parallel"))]
    {
        (encode(), hash())
    }
}
