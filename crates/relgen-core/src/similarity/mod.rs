//! Tag-overlap similarity and ranked top-K selection
//!
//! Scoring is pure: nothing in this module touches the store. The annotator
//! feeds it in-memory snapshots of both collections.

mod select;
mod tags;

pub use select::{select_related, SimilarityEngine};
pub use tags::{similarity, TagSet};

/// Similarity score of one candidate against a source item
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityResult {
    /// Candidate item ID
    pub id: String,
    /// Jaccard score (0.0 to 1.0)
    pub score: f64,
}
