use std::collections::BTreeSet;

/// A case-folded, de-duplicated set of tags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: BTreeSet<String>,
}

impl TagSet {
    /// Fold every tag to lowercase and collapse duplicates
    pub fn new<S: AsRef<str>>(tags: &[S]) -> Self {
        TagSet {
            tags: tags.iter().map(|t| t.as_ref().to_lowercase()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Jaccard index against another set
    ///
    /// Two empty sets share no signal, so their score is 0 rather than 1.
    pub fn jaccard(&self, other: &TagSet) -> f64 {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };

        let shared_count = small.iter().filter(|t| large.contains(t)).count();
        let union_count = self.len() + other.len() - shared_count;

        if union_count == 0 {
            return 0.0;
        }

        shared_count as f64 / union_count as f64
    }
}

/// Jaccard similarity between two raw tag lists
///
/// Tags are compared case-insensitively and duplicates within one list are
/// ignored. The result is symmetric and always within `[0, 1]`.
pub fn similarity<A: AsRef<str>, B: AsRef<str>>(tags_a: &[A], tags_b: &[B]) -> f64 {
    TagSet::new(tags_a).jaccard(&TagSet::new(tags_b))
}
