//! Weighted target selection over a [`CandidateMap`].

use bio_core::NodeId;
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

use crate::{CandidateMap, ReactionError, ReactionResult};

/// Draw one candidate with probability proportional to its propensity.
///
/// - An empty map yields `Ok(None)` and consumes no randomness.
/// - Weights need not sum to one; they are normalized by `WeightedIndex`.
/// - For a fixed RNG state and map order the draw is reproducible.
///
/// Negative, NaN, or infinite weights, or an all-zero map, are rejected with
/// [`ReactionError::InvalidWeights`].
pub fn select_target<R: Rng + ?Sized>(
    candidates: &CandidateMap,
    rng: &mut R,
) -> ReactionResult<Option<NodeId>> {
    if candidates.is_empty() {
        return Ok(None);
    }
    if let Some((node, weight)) = candidates.iter().find(|(_, w)| !w.is_finite()) {
        return Err(ReactionError::InvalidWeights(format!(
            "{node} has non-finite propensity {weight}"
        )));
    }
    let dist = WeightedIndex::new(candidates.iter().map(|(_, w)| w))
        .map_err(|e| ReactionError::InvalidWeights(e.to_string()))?;
    Ok(candidates.nth(dist.sample(rng)).map(|(node, _)| node))
}
