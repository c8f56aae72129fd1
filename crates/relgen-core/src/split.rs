//! Seed per-item collections from one combined export
//!
//! The combined file is a JSON array whose entries may carry a product and/or
//! a blog:
//!
//! ```json
//! [{"product_slug": "ghee", "product": {...}, "blog_slug": "why-ghee", "blog": {...}}]
//! ```
//!
//! Every non-empty object with a slug becomes `<slug>.json` in its
//! collection. Entries with a slug but no content are counted as skipped.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{RelgenError, Result};
use crate::item::{validate_id, CollectionKind};
use crate::store::CollectionStore;

/// Counts for one collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SplitCounts {
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Report of a split run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SplitSummary {
    pub entries: usize,
    pub products: SplitCounts,
    pub blogs: SplitCounts,
}

impl SplitSummary {
    fn counts_mut(&mut self, kind: CollectionKind) -> &mut SplitCounts {
        match kind {
            CollectionKind::Products => &mut self.products,
            CollectionKind::Blogs => &mut self.blogs,
        }
    }
}

/// Keys carrying the slug and the record of each collection within an entry
fn entry_keys(kind: CollectionKind) -> (&'static str, &'static str) {
    match kind {
        CollectionKind::Products => ("product_slug", "product"),
        CollectionKind::Blogs => ("blog_slug", "blog"),
    }
}

/// Read a combined export and write its records into the two stores
pub fn split_file(
    input: &Path,
    products: &dyn CollectionStore,
    blogs: &dyn CollectionStore,
) -> Result<SplitSummary> {
    let invalid = |reason: String| RelgenError::InvalidInput {
        path: input.to_path_buf(),
        reason,
    };

    let content = fs::read_to_string(input).map_err(|e| invalid(e.to_string()))?;
    let data: Value = serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?;
    let entries = data
        .as_array()
        .ok_or_else(|| invalid("expected a JSON array of entries".to_string()))?;

    Ok(split_entries(entries, products, blogs))
}

/// Write every product and blog found in `entries`
pub fn split_entries(
    entries: &[Value],
    products: &dyn CollectionStore,
    blogs: &dyn CollectionStore,
) -> SplitSummary {
    let mut summary = SplitSummary {
        entries: entries.len(),
        ..Default::default()
    };

    for entry in entries {
        // blogs first, as the export lists them
        for store in [blogs, products] {
            let kind = store.kind();
            let (slug_key, record_key) = entry_keys(kind);

            let Some(slug) = entry.get(slug_key).and_then(Value::as_str) else {
                continue;
            };
            if slug.is_empty() {
                continue;
            }

            let counts = summary.counts_mut(kind);

            if let Err(e) = validate_id(slug) {
                warn!(collection = %kind, error = %e, "skipping entry with unusable slug");
                counts.skipped += 1;
                continue;
            }

            let record = match entry.get(record_key) {
                Some(record @ Value::Object(obj)) if !obj.is_empty() => record,
                _ => {
                    debug!(collection = %kind, id = slug, "skipping empty entry");
                    counts.skipped += 1;
                    continue;
                }
            };

            match store.save_record(slug, record) {
                Ok(()) => {
                    debug!(collection = %kind, id = slug, "wrote record");
                    counts.written += 1;
                }
                Err(e) => {
                    warn!(collection = %kind, id = slug, error = %e, "write failed");
                    counts.failed += 1;
                }
            }
        }
    }

    summary
}
