use crate::item::{Item, RelatedReference};
use crate::similarity::tags::TagSet;
use crate::similarity::SimilarityResult;

/// Ranks a fixed pool of candidate items against arbitrary source items.
///
/// Candidate tag sets are folded once up front so each source only pays for
/// the set intersections.
#[derive(Debug)]
pub struct SimilarityEngine<'a> {
    candidates: &'a [Item],
    tag_sets: Vec<TagSet>,
    min_score: f64,
}

impl<'a> SimilarityEngine<'a> {
    /// Create an engine over `candidates`, keeping their order for tie-breaks
    pub fn new(candidates: &'a [Item]) -> Self {
        let tag_sets = candidates.iter().map(|c| TagSet::new(&c.tags)).collect();
        SimilarityEngine {
            candidates,
            tag_sets,
            min_score: 0.0,
        }
    }

    /// Drop candidates scoring below `min_score`
    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    /// Indices of the candidates worth scoring for `source_id`, in pool order.
    ///
    /// Every candidate except the source itself is returned. A tag-indexed
    /// prefilter would narrow this list without changing how results rank.
    pub fn candidates_for<'s>(&'s self, source_id: &'s str) -> impl Iterator<Item = usize> + 's {
        self.candidates
            .iter()
            .enumerate()
            .filter(move |(_, c)| c.id != source_id)
            .map(|(i, _)| i)
    }

    /// Score every eligible candidate, best first.
    ///
    /// Equal scores keep pool order (the sort is stable), so identical inputs
    /// always rank identically.
    pub fn rank(&self, source: &Item) -> Vec<(usize, SimilarityResult)> {
        let source_tags = TagSet::new(&source.tags);

        let mut results: Vec<(usize, SimilarityResult)> = self
            .candidates_for(&source.id)
            .filter_map(|i| {
                let score = source_tags.jaccard(&self.tag_sets[i]);
                (score >= self.min_score).then(|| {
                    (
                        i,
                        SimilarityResult {
                            id: self.candidates[i].id.clone(),
                            score,
                        },
                    )
                })
            })
            .collect();

        results.sort_by(|a, b| b.1.score.total_cmp(&a.1.score));
        results
    }

    /// Top `k` related references for `source`
    pub fn related_to(&self, source: &Item, k: usize) -> Vec<RelatedReference> {
        if k == 0 {
            return Vec::new();
        }

        let mut ranked = self.rank(source);
        ranked.truncate(k);
        ranked
            .into_iter()
            .map(|(i, _)| self.candidates[i].to_reference())
            .collect()
    }
}

/// Select the `k` candidates most similar to `source`.
///
/// The source is never returned, even if it appears in `candidates`. Fewer
/// than `k` references are returned when the pool is smaller, and none when
/// `k` is zero.
pub fn select_related(source: &Item, candidates: &[Item], k: usize) -> Vec<RelatedReference> {
    SimilarityEngine::new(candidates).related_to(source, k)
}
