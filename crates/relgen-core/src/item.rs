//! Item model shared by the similarity engine and the annotator
//!
//! An [`Item`] is a product or blog record reduced to the three fields the
//! engine looks at. The full record stays opaque and is only touched during
//! write-back.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RelgenError;

/// Record field holding related product references
pub const RELATED_PRODUCTS_FIELD: &str = "relatedProducts";

/// Record field holding related blog references
pub const RELATED_BLOGS_FIELD: &str = "relatedBlogs";

/// The two disjoint collections an item can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Products,
    Blogs,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 2] = [CollectionKind::Products, CollectionKind::Blogs];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::Products => "products",
            CollectionKind::Blogs => "blogs",
        }
    }

    /// Record field that stores references *into* this collection
    pub fn related_field(&self) -> &'static str {
        match self {
            CollectionKind::Products => RELATED_PRODUCTS_FIELD,
            CollectionKind::Blogs => RELATED_BLOGS_FIELD,
        }
    }

    /// Order in which the related fields are added to a record of this kind
    ///
    /// A record lists references into its own collection first.
    pub fn field_order(&self) -> [CollectionKind; 2] {
        match self {
            CollectionKind::Products => [CollectionKind::Products, CollectionKind::Blogs],
            CollectionKind::Blogs => [CollectionKind::Blogs, CollectionKind::Products],
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product or blog as seen by the similarity engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub tags: Vec<String>,
}

impl Item {
    pub fn new(id: impl Into<String>, title: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tags,
        }
    }

    /// Build an item view from a persisted record.
    ///
    /// The record must be a JSON object. `title` falls back to `id` when it is
    /// missing, not a string, or empty. `tags` may be missing or null, but if
    /// present it must be an array of strings.
    pub fn from_record(id: &str, record: &Value) -> Result<Self, String> {
        let obj = record
            .as_object()
            .ok_or_else(|| format!("expected a JSON object, found {}", json_kind(record)))?;

        let title = match obj.get("title") {
            Some(Value::String(title)) if !title.is_empty() => title.clone(),
            _ => id.to_string(),
        };

        let tags = match obj.get("tags") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(values)) => values
                .iter()
                .map(|v| {
                    v.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| format!("tag is not a string: {v}"))
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => {
                return Err(format!(
                    "`tags` must be an array of strings, found {}",
                    json_kind(other)
                ))
            }
        };

        Ok(Item {
            id: id.to_string(),
            title,
            tags,
        })
    }

    /// Snapshot this item as a reference stored on another record
    pub fn to_reference(&self) -> RelatedReference {
        RelatedReference {
            id: self.id.clone(),
            title: self.title.clone(),
        }
    }
}

/// A `{id, title}` pointer from one record to a related item.
///
/// The title is copied at computation time and is not kept in sync afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedReference {
    pub id: String,
    pub title: String,
}

/// Validate that an id can be used as a record file stem
pub fn validate_id(id: &str) -> crate::error::Result<()> {
    let invalid = id.is_empty()
        || id == "."
        || id == ".."
        || id.contains(['/', '\\', '\0'])
        || id.trim() != id;
    if invalid {
        return Err(RelgenError::InvalidId { id: id.to_string() });
    }
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
