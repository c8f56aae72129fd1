//! Configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Name of the optional config file looked up in the root directory
pub const CONFIG_FILE: &str = "relgen.toml";

/// Default location of the products collection, relative to the root
pub const DEFAULT_PRODUCTS_DIR: &str = "data/products";

/// Default location of the blogs collection, relative to the root
pub const DEFAULT_BLOGS_DIR: &str = "data/blogs";

/// Default number of related products kept per item
pub const DEFAULT_K_PRODUCTS: i64 = 4;

/// Default number of related blogs kept per item
pub const DEFAULT_K_BLOGS: i64 = 3;

/// Contents of `relgen.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub collections: CollectionsConfig,
    pub limits: LimitsConfig,
}

/// `[collections]` table: where each collection lives
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollectionsConfig {
    pub products: Option<PathBuf>,
    pub blogs: Option<PathBuf>,
}

/// `[limits]` table: how many references to keep
///
/// Counts are signed so a negative value can be reported rather than
/// rejected by the parser with a less useful message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    pub products: Option<i64>,
    pub blogs: Option<i64>,
    pub min_score: Option<f64>,
}

/// Values supplied on the command line; each one wins over the file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub products_dir: Option<PathBuf>,
    pub blogs_dir: Option<PathBuf>,
    pub k_products: Option<i64>,
    pub k_blogs: Option<i64>,
    pub min_score: Option<f64>,
    pub dry_run: bool,
}

/// Fully resolved and validated settings for one annotator run
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub products_dir: PathBuf,
    pub blogs_dir: PathBuf,
    pub k_products: usize,
    pub k_blogs: usize,
    pub min_score: f64,
    pub dry_run: bool,
}
