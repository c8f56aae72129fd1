//! Related-content annotator
//!
//! A run moves through `Loading -> Scoring -> WritingBack -> Done`. Per-item
//! problems (malformed records, failed writes) are recorded as outcomes and
//! never stop the batch. Only configuration errors, or both collections being
//! unavailable, abort a run.

mod summary;

pub use summary::{CollectionSummary, ItemOutcome, ItemStatus, Phase, RunSummary};

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::RunConfig;
use crate::error::{RelgenError, Result};
use crate::item::{CollectionKind, Item, RelatedReference};
use crate::similarity::SimilarityEngine;
use crate::store::CollectionStore;
use crate::trace_time;

/// Items loaded from one collection at the start of a run
#[derive(Debug, Default)]
pub struct CollectionSnapshot {
    pub items: Vec<Item>,
    /// Load failures, one per skipped record
    pub skipped: Vec<ItemOutcome>,
    /// Set when the collection could not be listed at all
    pub unavailable: Option<String>,
}

/// Computed related references for one item, not yet persisted
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub collection: CollectionKind,
    pub id: String,
    pub related_products: Vec<RelatedReference>,
    pub related_blogs: Vec<RelatedReference>,
}

impl Annotation {
    fn references_into(&self, kind: CollectionKind) -> &[RelatedReference] {
        match kind {
            CollectionKind::Products => &self.related_products,
            CollectionKind::Blogs => &self.related_blogs,
        }
    }

    /// Set both related fields on `record`, leaving every other field as is.
    ///
    /// Existing fields keep their position; missing ones are appended with
    /// references into the item's own collection first.
    pub fn apply(&self, record: &mut Value) -> std::result::Result<(), String> {
        let obj = record
            .as_object_mut()
            .ok_or_else(|| "record is no longer a JSON object".to_string())?;

        for kind in self.collection.field_order() {
            let refs = serde_json::to_value(self.references_into(kind))
                .map_err(|e| e.to_string())?;
            obj.insert(kind.related_field().to_string(), refs);
        }
        Ok(())
    }
}

/// Install a Ctrl-C handler that raises the returned flag
pub fn interrupt_flag() -> Arc<AtomicBool> {
    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_clone = Arc::clone(&interrupted);

    if let Err(e) = ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::SeqCst);
    }) {
        warn!(error = %e, "failed to install interrupt handler");
    }

    interrupted
}

/// Annotates every product and blog with its most similar items
pub struct Annotator<'a> {
    products: &'a dyn CollectionStore,
    blogs: &'a dyn CollectionStore,
    config: &'a RunConfig,
    interrupted: Option<Arc<AtomicBool>>,
}

impl<'a> Annotator<'a> {
    pub fn new(
        products: &'a dyn CollectionStore,
        blogs: &'a dyn CollectionStore,
        config: &'a RunConfig,
    ) -> Self {
        Annotator {
            products,
            blogs,
            config,
            interrupted: None,
        }
    }

    /// Stop writing once `flag` is raised
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupted = Some(flag);
        self
    }

    fn store(&self, kind: CollectionKind) -> &'a dyn CollectionStore {
        match kind {
            CollectionKind::Products => self.products,
            CollectionKind::Blogs => self.blogs,
        }
    }

    fn is_interrupted(&self) -> bool {
        self.interrupted
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    /// Run the whole batch
    #[tracing::instrument(skip(self), fields(dry_run = self.config.dry_run))]
    pub fn run(&self) -> Result<RunSummary> {
        let start = Instant::now();

        debug!(phase = %Phase::Loading, "entering phase");
        let products = self.load(CollectionKind::Products);
        let blogs = self.load(CollectionKind::Blogs);

        if products.unavailable.is_some() && blogs.unavailable.is_some() {
            return Err(RelgenError::AllCollectionsUnavailable {
                products: PathBuf::from(self.products.location()),
                blogs: PathBuf::from(self.blogs.location()),
            });
        }
        trace_time!(start, "load_collections");

        debug!(phase = %Phase::Scoring, "entering phase");
        let annotations = self.plan(&products, &blogs);
        trace_time!(start, "score_collections", annotations = annotations.len());

        debug!(phase = %Phase::WritingBack, "entering phase");
        let mut outcomes = Vec::with_capacity(annotations.len());
        outcomes.extend(products.skipped.iter().cloned());
        outcomes.extend(blogs.skipped.iter().cloned());

        let mut interrupted = false;
        for annotation in &annotations {
            if self.is_interrupted() {
                warn!("interrupt received, stopping before remaining writes");
                interrupted = true;
                break;
            }
            outcomes.push(self.write_back(annotation));
        }
        trace_time!(start, "write_back");

        debug!(phase = %Phase::Done, "entering phase");
        let summary = RunSummary::build(
            [
                (self.products, products.unavailable),
                (self.blogs, blogs.unavailable),
            ],
            outcomes,
            self.config.dry_run,
            interrupted,
        );

        info!(
            products_updated = summary.products.updated,
            blogs_updated = summary.blogs.updated,
            skipped = summary.products.skipped + summary.blogs.skipped,
            failed = summary.products.failed + summary.blogs.failed,
            elapsed = ?start.elapsed(),
            "annotation finished"
        );

        Ok(summary)
    }

    /// Load every readable item of `kind`, recording the ones that are not
    pub fn load(&self, kind: CollectionKind) -> CollectionSnapshot {
        let store = self.store(kind);
        let mut snapshot = CollectionSnapshot::default();

        let ids = match store.try_list_ids() {
            Ok(ids) => ids,
            Err(e) => {
                warn!(collection = %kind, location = %store.location(), error = %e, "collection unavailable, treating as empty");
                snapshot.unavailable = Some(e.to_string());
                return snapshot;
            }
        };

        for id in ids {
            match store.load_item(&id) {
                Ok(item) => snapshot.items.push(item),
                Err(e) => {
                    warn!(collection = %kind, id = %id, error = %e, "skipping unreadable record");
                    snapshot.skipped.push(ItemOutcome::skipped(kind, &id, e.to_string()));
                }
            }
        }

        debug!(
            collection = %kind,
            loaded = snapshot.items.len(),
            skipped = snapshot.skipped.len(),
            "loaded collection"
        );
        snapshot
    }

    /// Compute related references for every loaded item
    pub fn plan(
        &self,
        products: &CollectionSnapshot,
        blogs: &CollectionSnapshot,
    ) -> Vec<Annotation> {
        let product_engine =
            SimilarityEngine::new(&products.items).with_min_score(self.config.min_score);
        let blog_engine = SimilarityEngine::new(&blogs.items).with_min_score(self.config.min_score);
        let k_products = self.config.limit_for(CollectionKind::Products);
        let k_blogs = self.config.limit_for(CollectionKind::Blogs);

        let sources = products
            .items
            .iter()
            .map(|item| (CollectionKind::Products, item))
            .chain(blogs.items.iter().map(|item| (CollectionKind::Blogs, item)));

        sources
            .map(|(collection, item)| Annotation {
                collection,
                id: item.id.clone(),
                related_products: product_engine.related_to(item, k_products),
                related_blogs: blog_engine.related_to(item, k_blogs),
            })
            .collect()
    }

    /// Persist one annotation on top of the item's current record
    fn write_back(&self, annotation: &Annotation) -> ItemOutcome {
        let kind = annotation.collection;
        let store = self.store(kind);

        let mut record = match store.load_record(&annotation.id) {
            Ok(record) => record,
            Err(e) => {
                warn!(collection = %kind, id = %annotation.id, error = %e, "record changed before write-back");
                return ItemOutcome::failed(kind, &annotation.id, e.to_string());
            }
        };

        if let Err(reason) = annotation.apply(&mut record) {
            let e = RelgenError::malformed(kind, &annotation.id, reason);
            warn!(collection = %kind, id = %annotation.id, error = %e, "cannot annotate record");
            return ItemOutcome::failed(kind, &annotation.id, e.to_string());
        }

        if self.config.dry_run {
            debug!(collection = %kind, id = %annotation.id, "dry run, not writing");
            return ItemOutcome::updated(kind, &annotation.id);
        }

        match store.save_record(&annotation.id, &record) {
            Ok(()) => {
                debug!(collection = %kind, id = %annotation.id, "updated record");
                ItemOutcome::updated(kind, &annotation.id)
            }
            Err(e) => {
                warn!(collection = %kind, id = %annotation.id, error = %e, "write failed");
                ItemOutcome::failed(kind, &annotation.id, e.to_string())
            }
        }
    }
}
