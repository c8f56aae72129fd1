use std::fmt;

use serde::Serialize;

use crate::item::CollectionKind;
use crate::store::CollectionStore;

/// Stage of an annotator run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Loading,
    Scoring,
    WritingBack,
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Loading => "loading",
            Phase::Scoring => "scoring",
            Phase::WritingBack => "writing_back",
            Phase::Done => "done",
        };
        f.write_str(name)
    }
}

/// What happened to a single item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// Related references were computed and written (or would be, on a dry run)
    Updated,
    /// The record could not be loaded and took no part in the run
    Skipped,
    /// The record was scored but could not be written back
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemOutcome {
    pub collection: CollectionKind,
    pub id: String,
    pub status: ItemStatus,
    pub phase: Phase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ItemOutcome {
    pub fn updated(collection: CollectionKind, id: &str) -> Self {
        ItemOutcome {
            collection,
            id: id.to_string(),
            status: ItemStatus::Updated,
            phase: Phase::WritingBack,
            reason: None,
        }
    }

    pub fn skipped(collection: CollectionKind, id: &str, reason: String) -> Self {
        ItemOutcome {
            collection,
            id: id.to_string(),
            status: ItemStatus::Skipped,
            phase: Phase::Loading,
            reason: Some(reason),
        }
    }

    pub fn failed(collection: CollectionKind, id: &str, reason: String) -> Self {
        ItemOutcome {
            collection,
            id: id.to_string(),
            status: ItemStatus::Failed,
            phase: Phase::WritingBack,
            reason: Some(reason),
        }
    }
}

/// Per-collection counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionSummary {
    pub collection: CollectionKind,
    pub location: String,
    /// `None` when the collection was listed, otherwise why it was not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unavailable: Option<String>,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl CollectionSummary {
    /// Items that made it through scoring
    pub fn processed(&self) -> usize {
        self.updated + self.failed
    }
}

/// Report of a finished (or interrupted) run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub products: CollectionSummary,
    pub blogs: CollectionSummary,
    pub dry_run: bool,
    pub interrupted: bool,
    pub items: Vec<ItemOutcome>,
}

impl RunSummary {
    pub(crate) fn build(
        collections: [(&dyn CollectionStore, Option<String>); 2],
        items: Vec<ItemOutcome>,
        dry_run: bool,
        interrupted: bool,
    ) -> Self {
        let [products, blogs] =
            collections.map(|(store, unavailable)| summarize(store, unavailable, &items));

        RunSummary {
            products,
            blogs,
            dry_run,
            interrupted,
            items,
        }
    }

    pub fn collection(&self, kind: CollectionKind) -> &CollectionSummary {
        match kind {
            CollectionKind::Products => &self.products,
            CollectionKind::Blogs => &self.blogs,
        }
    }

    /// Outcomes that were not successful updates
    pub fn issues(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.items
            .iter()
            .filter(|item| item.status != ItemStatus::Updated)
    }
}

fn summarize(
    store: &dyn CollectionStore,
    unavailable: Option<String>,
    items: &[ItemOutcome],
) -> CollectionSummary {
    let kind = store.kind();
    let count = |status: ItemStatus| {
        items
            .iter()
            .filter(|item| item.collection == kind && item.status == status)
            .count()
    };

    CollectionSummary {
        collection: kind,
        location: store.location(),
        unavailable,
        updated: count(ItemStatus::Updated),
        skipped: count(ItemStatus::Skipped),
        failed: count(ItemStatus::Failed),
    }
}
