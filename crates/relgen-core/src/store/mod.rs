//! Collection storage for relgen
//!
//! A collection is a set of JSON records keyed by item id. The annotator only
//! needs three capabilities from it: enumerate ids, read a record, and replace
//! a record. [`DirectoryStore`] keeps one `<id>.json` file per item;
//! [`MemoryStore`] keeps records in memory for tests and embedding.

mod directory;
mod memory;

pub use directory::{DirectoryStore, RECORD_EXTENSION};
pub use memory::MemoryStore;

use serde_json::Value;

use crate::error::{RelgenError, Result};
use crate::item::{CollectionKind, Item};

/// Storage backend for one collection
pub trait CollectionStore {
    /// Which collection this store holds
    fn kind(&self) -> CollectionKind;

    /// Human-readable location, used in logs and error messages
    fn location(&self) -> String;

    /// Enumerate every item id in a stable order.
    ///
    /// Fails with [`RelgenError::CollectionUnavailable`] when the collection
    /// itself cannot be read.
    fn try_list_ids(&self) -> Result<Vec<String>>;

    /// Read the full record for `id`
    fn load_record(&self, id: &str) -> Result<Value>;

    /// Replace the full record for `id`.
    ///
    /// Readers see either the previous record or the new one, never a
    /// partial write.
    fn save_record(&self, id: &str, record: &Value) -> Result<()>;

    /// Enumerate ids, treating an unreadable collection as empty
    fn list_ids(&self) -> Vec<String> {
        match self.try_list_ids() {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!(collection = %self.kind(), error = %e, "collection unavailable");
                Vec::new()
            }
        }
    }

    /// Load the `{id, title, tags}` view of a record
    fn load_item(&self, id: &str) -> Result<Item> {
        let record = self.load_record(id)?;
        Item::from_record(id, &record)
            .map_err(|reason| RelgenError::malformed(self.kind(), id, reason))
    }
}
