//! Error types and exit codes for relgen
//!
//! Exit codes:
//! - 0: Success (including runs where individual items were skipped)
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args, invalid configuration)
//! - 3: Data error (no collection could be loaded, unreadable split input)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

use crate::item::CollectionKind;

/// Exit codes for the relgen binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args or configuration (2)
    Usage = 2,
    /// Data error - collections unavailable, unreadable input (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during relgen operations
#[derive(Error, Debug)]
pub enum RelgenError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    // Data errors (exit code 3)
    #[error("{collection} collection unavailable at {path:?}: {reason}")]
    CollectionUnavailable {
        collection: CollectionKind,
        path: PathBuf,
        reason: String,
    },

    #[error("no collection could be loaded (products: {products:?}, blogs: {blogs:?})")]
    AllCollectionsUnavailable { products: PathBuf, blogs: PathBuf },

    #[error("malformed {collection} record {id}: {reason}")]
    MalformedRecord {
        collection: CollectionKind,
        id: String,
        reason: String,
    },

    #[error("{collection} record not found: {id}")]
    RecordNotFound {
        collection: CollectionKind,
        id: String,
    },

    #[error("invalid item id: {id:?}")]
    InvalidId { id: String },

    #[error("invalid input {path:?}: {reason}")]
    InvalidInput { path: PathBuf, reason: String },

    // Generic failures (exit code 1)
    #[error("failed to write {collection} record {id}: {reason}")]
    WriteFailure {
        collection: CollectionKind,
        id: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("run interrupted before all records were written; rerun to finish")]
    Interrupted,
}

impl RelgenError {
    /// Create a malformed-record error
    pub fn malformed(collection: CollectionKind, id: &str, reason: impl std::fmt::Display) -> Self {
        RelgenError::MalformedRecord {
            collection,
            id: id.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a write-failure error
    pub fn write_failure(
        collection: CollectionKind,
        id: &str,
        reason: impl std::fmt::Display,
    ) -> Self {
        RelgenError::WriteFailure {
            collection,
            id: id.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid-configuration error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        RelgenError::InvalidConfiguration(reason.into())
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            RelgenError::UsageError(_)
            | RelgenError::InvalidConfiguration(_) => ExitCode::Usage,

            RelgenError::CollectionUnavailable { .. }
            | RelgenError::AllCollectionsUnavailable { .. }
            | RelgenError::MalformedRecord { .. }
            | RelgenError::RecordNotFound { .. }
            | RelgenError::InvalidId { .. }
            | RelgenError::InvalidInput { .. } => ExitCode::Data,

            RelgenError::WriteFailure { .. }
            | RelgenError::Io(_)
            | RelgenError::Json(_)
            | RelgenError::Interrupted => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            RelgenError::UsageError(_) => "usage_error",
            RelgenError::InvalidConfiguration(_) => "invalid_configuration",
            RelgenError::CollectionUnavailable { .. } => "collection_unavailable",
            RelgenError::AllCollectionsUnavailable { .. } => "all_collections_unavailable",
            RelgenError::MalformedRecord { .. } => "malformed_record",
            RelgenError::RecordNotFound { .. } => "record_not_found",
            RelgenError::InvalidId { .. } => "invalid_id",
            RelgenError::InvalidInput { .. } => "invalid_input",
            RelgenError::WriteFailure { .. } => "write_failure",
            RelgenError::Io(_) => "io_error",
            RelgenError::Json(_) => "json_error",
            RelgenError::Interrupted => "interrupted",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for relgen operations
pub type Result<T> = std::result::Result<T, RelgenError>;
