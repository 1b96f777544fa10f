//! Historical analogs supplied by the similarity-search collaborator.

use serde::{Deserialize, Serialize};

/// A retrieved historical episode with its similarity to the current one.
///
/// Similarity lives in `[-1, 1]`. Negative similarities are kept at the
/// data level; the blender zeroes them when summing support rather than
/// clamping them here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetrievalEpisode {
    /// Cosine-style similarity weight in `[-1, 1]`.
    pub similarity: f64,
    /// Outcome value observed in the historical episode.
    pub value: f64,
}

impl RetrievalEpisode {
    pub fn new(similarity: f64, value: f64) -> Self {
        Self { similarity, value }
    }

    /// Support this episode contributes to a blend: negatives count as zero.
    pub fn support(&self) -> f64 {
        self.similarity.max(0.0)
    }
}
