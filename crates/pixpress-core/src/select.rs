//! Candidate ordering and selection.

use serde::{Deserialize, Serialize};

use crate::candidate::EncodedCandidate;
use crate::error::OptimizeError;

/// How candidates are ranked. The head of the ranking is the "best" result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Largest size reduction first (descending by size delta).
    #[default]
    MaxReduction,
    /// Smallest size reduction first (ascending by size delta).
    ///
    /// Reproduces the ordering of the service this pipeline replaces, where
    /// the weakest compression result was returned. Kept for clients that
    /// depend on that behaviour.
    LegacyAscending,
}

/// Order candidates according to `policy`.
///
/// The sort is stable, so candidates with equal deltas keep their generation
/// order.
pub fn rank_candidates(candidates: &mut [EncodedCandidate], policy: SelectionPolicy) {
    match policy {
        SelectionPolicy::MaxReduction => {
            candidates.sort_by(|a, b| b.size_delta().cmp(&a.size_delta()))
        }
        SelectionPolicy::LegacyAscending => candidates.sort_by_key(EncodedCandidate::size_delta),
    }
}

/// Rank candidates, refusing an empty list.
///
/// # Errors
///
/// `OptimizeError::NoEncodableCandidate` when `candidates` is empty.
pub fn select_candidates(
    mut candidates: Vec<EncodedCandidate>,
    policy: SelectionPolicy,
) -> Result<Vec<EncodedCandidate>, OptimizeError> {
    if candidates.is_empty() {
        return Err(OptimizeError::NoEncodableCandidate);
    }
    rank_candidates(&mut candidates, policy);
    Ok(candidates)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::format::ImageFormat;
    use proptest::prelude::*;

    fn candidates_strategy() -> impl Strategy<Value = Vec<EncodedCandidate>> {
        prop::collection::vec(0usize..2000, 1..6).prop_map(|lens| {
            lens.into_iter()
                .map(|len| EncodedCandidate::new(ImageFormat::Webp, vec![0u8; len], 1000))
                .collect()
        })
    }

    proptest! {
        /// Property: MaxReduction puts the largest delta at the head.
        #[test]
        fn prop_max_reduction_head_is_max(candidates in candidates_strategy()) {
            let max = candidates.iter().map(EncodedCandidate::size_delta).max();
            let ranked = select_candidates(candidates, SelectionPolicy::MaxReduction).unwrap();

            prop_assert_eq!(Some(ranked[0].size_delta()), max);
            prop_assert!(ranked.windows(2).all(|w| w[0].size_delta() >= w[1].size_delta()));
        }

        /// Property: LegacyAscending sorts ascending by delta.
        #[test]
        fn prop_legacy_ascending_sorted(candidates in candidates_strategy()) {
            let ranked = select_candidates(candidates, SelectionPolicy::LegacyAscending).unwrap();

            prop_assert!(ranked.windows(2).all(|w| w[0].size_delta() <= w[1].size_delta()));
        }

        /// Property: ranking never drops or invents candidates.
        #[test]
        fn prop_ranking_is_permutation(candidates in candidates_strategy()) {
            let mut before: Vec<i64> = candidates.iter().map(EncodedCandidate::size_delta).collect();
            let ranked = select_candidates(candidates, SelectionPolicy::MaxReduction).unwrap();
            let mut after: Vec<i64> = ranked.iter().map(EncodedCandidate::size_delta).collect();

            before.sort_unstable();
            after.sort_unstable();
            prop_assert_eq!(before, after);
        }
    }
}
