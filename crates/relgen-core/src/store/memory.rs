use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};

use serde_json::Value;

use crate::error::{RelgenError, Result};
use crate::item::CollectionKind;
use crate::store::CollectionStore;

/// An in-memory collection
///
/// Ids enumerate in sorted order, matching [`super::DirectoryStore`]. Writes
/// can be made to fail per id, and the whole collection can be marked
/// unavailable.
#[derive(Debug)]
pub struct MemoryStore {
    kind: CollectionKind,
    records: RefCell<BTreeMap<String, Value>>,
    failing_writes: HashSet<String>,
    available: bool,
}

impl MemoryStore {
    pub fn new(kind: CollectionKind) -> Self {
        MemoryStore {
            kind,
            records: RefCell::new(BTreeMap::new()),
            failing_writes: HashSet::new(),
            available: true,
        }
    }

    /// A collection whose listing always fails
    pub fn unavailable(kind: CollectionKind) -> Self {
        MemoryStore {
            available: false,
            ..MemoryStore::new(kind)
        }
    }

    pub fn with_record(self, id: impl Into<String>, record: Value) -> Self {
        self.records.borrow_mut().insert(id.into(), record);
        self
    }

    /// Make every write to `id` fail
    pub fn fail_writes_for(mut self, id: impl Into<String>) -> Self {
        self.failing_writes.insert(id.into());
        self
    }

    /// Current record for `id`, if any
    pub fn get(&self, id: &str) -> Option<Value> {
        self.records.borrow().get(id).cloned()
    }
}

impl CollectionStore for MemoryStore {
    fn kind(&self) -> CollectionKind {
        self.kind
    }

    fn location(&self) -> String {
        format!("memory:{}", self.kind)
    }

    fn try_list_ids(&self) -> Result<Vec<String>> {
        if !self.available {
            return Err(RelgenError::CollectionUnavailable {
                collection: self.kind,
                path: self.location().into(),
                reason: "collection marked unavailable".to_string(),
            });
        }
        Ok(self.records.borrow().keys().cloned().collect())
    }

    fn load_record(&self, id: &str) -> Result<Value> {
        self.get(id).ok_or_else(|| RelgenError::RecordNotFound {
            collection: self.kind,
            id: id.to_string(),
        })
    }

    fn save_record(&self, id: &str, record: &Value) -> Result<()> {
        if self.failing_writes.contains(id) {
            return Err(RelgenError::write_failure(
                self.kind,
                id,
                "simulated write failure",
            ));
        }
        self.records
            .borrow_mut()
            .insert(id.to_string(), record.clone());
        Ok(())
    }
}
