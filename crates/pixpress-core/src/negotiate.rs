//! Client capability negotiation.
//!
//! Turns an HTTP `Accept`-style declaration into the set of media types a
//! client may receive. The set is a membership test only: weights are
//! discarded and the declared order is kept purely for display. Which of the
//! allowed formats wins is decided later, by encoded size.

use crate::format::ImageFormat;

/// The universal wildcard media range.
pub const WILDCARD: &str = "*/*";

/// Preference list substituted for an empty or wildcard-first declaration.
pub const DEFAULT_CAPABILITIES: [&str; 4] = ["image/avif", "image/webp", "image/png", WILDCARD];

/// Normalised media types a client declared it can display.
///
/// Tokens are lower-cased, stripped of parameters, and deduplicated in order
/// of first appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCapabilities {
    media_types: Vec<String>,
}

impl ClientCapabilities {
    /// Parse a raw declaration such as `"image/webp, image/png;q=0.5"`.
    ///
    /// An empty declaration, or one whose first entry is `*/*`, is replaced
    /// by [`DEFAULT_CAPABILITIES`] verbatim.
    pub fn parse(raw: &str) -> Self {
        let mut media_types: Vec<String> = Vec::new();

        for token in raw.split(',') {
            let essence = token.trim().split(';').next().unwrap_or("").trim();
            if essence.is_empty() {
                continue;
            }
            let essence = essence.to_ascii_lowercase();
            if !media_types.contains(&essence) {
                media_types.push(essence);
            }
        }

        if media_types.first().map_or(true, |first| first == WILDCARD) {
            return Self::default();
        }

        Self { media_types }
    }

    /// Exact membership test on a normalised media type.
    pub fn contains(&self, media_type: &str) -> bool {
        self.media_types.iter().any(|m| m == media_type)
    }

    /// Whether the client explicitly listed `format`. Wildcards do not count.
    pub fn accepts(&self, format: ImageFormat) -> bool {
        self.contains(format.media_type())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.media_types.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.media_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.media_types.is_empty()
    }

    /// True when this is the substituted default list.
    pub fn is_default(&self) -> bool {
        self.iter().eq(DEFAULT_CAPABILITIES.iter().copied())
    }
}

impl Default for ClientCapabilities {
    fn default() -> Self {
        Self {
            media_types: DEFAULT_CAPABILITIES.iter().map(|m| m.to_string()).collect(),
        }
    }
}
