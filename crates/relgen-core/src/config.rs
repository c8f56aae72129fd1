//! Run configuration for relgen
//!
//! Settings come from three layers: built-in defaults, an optional
//! `relgen.toml` in the root directory, and command-line overrides. The
//! result is validated before any collection is touched.

pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

use crate::bail_config;
use crate::error::{RelgenError, Result};
use crate::item::CollectionKind;

pub use types::{
    CollectionsConfig, ConfigOverrides, FileConfig, LimitsConfig, RunConfig, CONFIG_FILE,
    DEFAULT_BLOGS_DIR, DEFAULT_K_BLOGS, DEFAULT_K_PRODUCTS, DEFAULT_PRODUCTS_DIR,
};

impl FileConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            RelgenError::invalid_config(format!("cannot read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            RelgenError::invalid_config(format!("cannot parse {}: {}", path.display(), e))
        })
    }

    /// Load the explicit config file, or `relgen.toml` in `root` if present
    pub fn discover(root: &Path, explicit: Option<&Path>) -> Result<Option<Self>> {
        if let Some(path) = explicit {
            return Self::load(&resolve_against(root, path)).map(Some);
        }

        let default_path = root.join(CONFIG_FILE);
        if default_path.is_file() {
            tracing::debug!(path = %default_path.display(), "using config file");
            return Self::load(&default_path).map(Some);
        }

        Ok(None)
    }
}

impl RunConfig {
    /// Merge defaults, file and overrides, then validate
    pub fn resolve(
        root: &Path,
        file: Option<&FileConfig>,
        overrides: &ConfigOverrides,
    ) -> Result<Self> {
        let file = file.cloned().unwrap_or_default();

        let products_dir = overrides
            .products_dir
            .clone()
            .or(file.collections.products)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PRODUCTS_DIR));
        let blogs_dir = overrides
            .blogs_dir
            .clone()
            .or(file.collections.blogs)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BLOGS_DIR));

        let k_products = overrides
            .k_products
            .or(file.limits.products)
            .unwrap_or(DEFAULT_K_PRODUCTS);
        let k_blogs = overrides
            .k_blogs
            .or(file.limits.blogs)
            .unwrap_or(DEFAULT_K_BLOGS);
        let min_score = overrides.min_score.or(file.limits.min_score).unwrap_or(0.0);

        Ok(RunConfig {
            products_dir: resolve_against(root, &products_dir),
            blogs_dir: resolve_against(root, &blogs_dir),
            k_products: validate_limit("products limit", k_products)?,
            k_blogs: validate_limit("blogs limit", k_blogs)?,
            min_score: validate_min_score(min_score)?,
            dry_run: overrides.dry_run,
        })
    }

    /// Directory holding `kind`
    pub fn dir_for(&self, kind: CollectionKind) -> &Path {
        match kind {
            CollectionKind::Products => &self.products_dir,
            CollectionKind::Blogs => &self.blogs_dir,
        }
    }

    /// Number of references kept into `kind`
    pub fn limit_for(&self, kind: CollectionKind) -> usize {
        match kind {
            CollectionKind::Products => self.k_products,
            CollectionKind::Blogs => self.k_blogs,
        }
    }
}

/// Resolve `path` against `root` unless it is already absolute
pub fn resolve_against(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

fn validate_limit(name: &str, value: i64) -> Result<usize> {
    if value < 0 {
        bail_config!("{name} must be >= 0, got {value}");
    }
    usize::try_from(value)
        .map_err(|_| RelgenError::invalid_config(format!("{name} is too large: {value}")))
}

fn validate_min_score(value: f64) -> Result<f64> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        bail_config!("min score must be within [0, 1], got {value}");
    }
    Ok(value)
}
