//! Lexical similarity ranking for candidate generation.
//!
//! The review loop does not care how similarity is computed; it asks a
//! [`SimilarityRanker`] for the pool members close enough to the current
//! target, ranked best first. The concrete algorithm is swappable and
//! independently testable.

use serde::{Deserialize, Serialize};

/// A pool member scored against a target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatch {
    pub name: String,
    /// Similarity in `[0.0, 1.0]`; 1.0 is an exact match.
    pub score: f64,
}

/// Ranks candidate names by lexical similarity to a target.
pub trait SimilarityRanker {
    /// Members of `pool` scoring at or above the cutoff, in descending score
    /// order. Ties keep the pool's order; the exact tie-break is not a
    /// contract.
    fn rank(&self, target: &str, pool: &[String]) -> Vec<RankedMatch>;

    /// The minimum similarity for a name to be considered a candidate.
    fn cutoff(&self) -> f64;
}

/// Default ranker: normalized Levenshtein ratio.
///
/// The cutoff of 0.6 matches the threshold the reconciliation workflow has
/// always used for "worth asking a human about".
#[derive(Debug, Clone)]
pub struct RatioRanker {
    cutoff: f64,
}

impl RatioRanker {
    pub const DEFAULT_CUTOFF: f64 = 0.6;

    pub fn new() -> Self {
        Self {
            cutoff: Self::DEFAULT_CUTOFF,
        }
    }

    pub fn with_cutoff(cutoff: f64) -> Self {
        Self { cutoff }
    }
}

impl Default for RatioRanker {
    fn default() -> Self {
        Self::new()
    }
}

impl SimilarityRanker for RatioRanker {
    fn rank(&self, target: &str, pool: &[String]) -> Vec<RankedMatch> {
        let mut matches: Vec<RankedMatch> = pool
            .iter()
            .map(|name| RankedMatch {
                score: strsim::normalized_levenshtein(target, name),
                name: name.clone(),
            })
            .filter(|m| m.score >= self.cutoff)
            .collect();

        // Stable sort keeps pool order for equal scores
        matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        matches
    }

    fn cutoff(&self) -> f64 {
        self.cutoff
    }
}
