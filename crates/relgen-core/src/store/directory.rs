use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use walkdir::WalkDir;

use crate::error::{RelgenError, Result};
use crate::item::{validate_id, CollectionKind};
use crate::store::CollectionStore;

/// File extension of record files
pub const RECORD_EXTENSION: &str = "json";

/// A collection stored as a directory of `<id>.json` files
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    kind: CollectionKind,
    dir: PathBuf,
}

impl DirectoryStore {
    pub fn new(kind: CollectionKind, dir: impl Into<PathBuf>) -> Self {
        DirectoryStore {
            kind,
            dir: dir.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the collection directory if it does not exist yet
    pub fn create(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    /// Path of the record file for `id`
    pub fn record_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.{RECORD_EXTENSION}"))
    }

    fn temp_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.{RECORD_EXTENSION}.tmp"))
    }

    fn unavailable(&self, reason: impl std::fmt::Display) -> RelgenError {
        RelgenError::CollectionUnavailable {
            collection: self.kind,
            path: self.dir.clone(),
            reason: reason.to_string(),
        }
    }

    fn write_temp(&self, path: &Path, record: &Value) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, record)?;
        writer.flush()?;
        writer
            .into_inner()
            .map_err(|e| RelgenError::Io(e.into_error()))?
            .sync_all()?;
        Ok(())
    }
}

impl CollectionStore for DirectoryStore {
    fn kind(&self) -> CollectionKind {
        self.kind
    }

    fn location(&self) -> String {
        self.dir.display().to_string()
    }

    #[tracing::instrument(skip(self), fields(collection = %self.kind, dir = %self.dir.display()))]
    fn try_list_ids(&self) -> Result<Vec<String>> {
        match fs::metadata(&self.dir) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(self.unavailable("not a directory")),
            Err(e) => return Err(self.unavailable(e)),
        }

        let mut ids = Vec::new();
        for entry in WalkDir::new(&self.dir).min_depth(1).max_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(self.unavailable(e)),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }

            // Unusable names are still listed so loading reports them as skipped
            let Some(stem) = path.file_stem() else {
                continue;
            };
            ids.push(stem.to_string_lossy().into_owned());
        }

        ids.sort();
        tracing::debug!(count = ids.len(), "listed records");
        Ok(ids)
    }

    fn load_record(&self, id: &str) -> Result<Value> {
        validate_id(id)?;
        let content = match fs::read_to_string(self.record_path(id)) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(RelgenError::RecordNotFound {
                    collection: self.kind,
                    id: id.to_string(),
                })
            }
            Err(e) => return Err(RelgenError::malformed(self.kind, id, e)),
        };

        serde_json::from_str(&content).map_err(|e| RelgenError::malformed(self.kind, id, e))
    }

    fn save_record(&self, id: &str, record: &Value) -> Result<()> {
        validate_id(id)?;
        let temp = self.temp_path(id);

        if let Err(e) = self.write_temp(&temp, record) {
            let _ = fs::remove_file(&temp);
            return Err(RelgenError::write_failure(self.kind, id, e));
        }

        if let Err(e) = fs::rename(&temp, self.record_path(id)) {
            let _ = fs::remove_file(&temp);
            return Err(RelgenError::write_failure(self.kind, id, e));
        }

        Ok(())
    }
}
