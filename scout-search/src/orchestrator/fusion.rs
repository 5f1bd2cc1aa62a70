//! Hybrid score fusion: weighted sum plus Reciprocal Rank Fusion.
//!
//! ```text
//! weighted = w_dense * dense + w_sparse * sparse
//! rrf      = Σ over lists containing the item of 1 / (k + rank)     (rank is 1-based)
//! hybrid   = weighted + rrf
//! ```
//!
//! `hybrid` is deliberately not normalised; it feeds the final score
//! directly as the relevance factor.

use std::collections::{HashMap, HashSet};

use crate::config::{HybridWeights, ResearchConfig};
use crate::types::{finite_or_zero, MergedResult};

use super::fanout::RetrievedSets;

/// Weighted sum of the dense and sparse scores. Non-finite inputs count as 0.0.
pub fn weighted_score(dense: f64, sparse: f64, weights: &HybridWeights) -> f64 {
    weights.dense * finite_or_zero(dense) + weights.sparse * finite_or_zero(sparse)
}

/// RRF contribution of an item at 1-based `rank` in one list.
pub fn rrf_contribution(rank: usize, k: f64) -> f64 {
    1.0 / (k + rank as f64)
}

/// Accumulate RRF scores over several ranked id lists.
///
/// Each list is taken in its given order. An id repeated within one list
/// contributes only at its first rank. Ids absent from a list get nothing
/// from it.
pub fn rrf_scores<'a>(ranked_lists: &[Vec<&'a str>], k: f64) -> HashMap<&'a str, f64> {
    let mut scores: HashMap<&'a str, f64> = HashMap::new();

    for list in ranked_lists {
        let mut seen: HashSet<&str> = HashSet::with_capacity(list.len());
        for (position, &id) in list.iter().enumerate() {
            if !seen.insert(id) {
                continue;
            }
            *scores.entry(id).or_default() += rrf_contribution(position + 1, k);
        }
    }

    scores
}

/// Set `rrf_score` and `hybrid_score` on every merged result, using the
/// backends' native orders in `sets`.
pub fn fuse(results: &mut [MergedResult], sets: &RetrievedSets, config: &ResearchConfig) {
    let ranked_lists = [
        sets.keyword.iter().map(|r| r.key()).collect::<Vec<_>>(),
        sets.dense.iter().map(|r| r.key()).collect::<Vec<_>>(),
    ];
    let rrf = rrf_scores(&ranked_lists, config.rrf.k);

    for result in results.iter_mut() {
        result.rrf_score = rrf.get(result.id.as_str()).copied().unwrap_or(0.0);
        result.hybrid_score = weighted_score(
            result.dense_score,
            result.sparse_score,
            &config.hybrid_weights,
        ) + result.rrf_score;
    }
}
