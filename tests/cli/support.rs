use assert_cmd::{cargo::cargo_bin_cmd, Command};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Get a Command for relgen
pub fn relgen() -> Command {
    cargo_bin_cmd!("relgen")
}

/// A site root with `data/products` and `data/blogs` collections
pub struct Site {
    pub root: PathBuf,
}

impl Site {
    pub fn new(root: &Path) -> Self {
        fs::create_dir_all(root.join("data/products")).unwrap();
        fs::create_dir_all(root.join("data/blogs")).unwrap();
        Site {
            root: root.to_path_buf(),
        }
    }

    pub fn products_dir(&self) -> PathBuf {
        self.root.join("data/products")
    }

    pub fn blogs_dir(&self) -> PathBuf {
        self.root.join("data/blogs")
    }

    pub fn product(&self, id: &str, record: Value) -> &Self {
        write_record(&self.products_dir(), id, &record);
        self
    }

    pub fn blog(&self, id: &str, record: Value) -> &Self {
        write_record(&self.blogs_dir(), id, &record);
        self
    }

    pub fn read_product(&self, id: &str) -> Value {
        read_record(&self.products_dir(), id)
    }

    pub fn read_blog(&self, id: &str) -> Value {
        read_record(&self.blogs_dir(), id)
    }

    pub fn raw_product(&self, id: &str) -> String {
        fs::read_to_string(self.products_dir().join(format!("{id}.json"))).unwrap()
    }

    /// relgen command rooted at this site
    pub fn relgen(&self) -> Command {
        let mut cmd = relgen();
        cmd.arg("--root").arg(&self.root).env_remove("RELGEN_ROOT");
        cmd
    }
}

pub fn write_record(dir: &Path, id: &str, record: &Value) {
    fs::write(
        dir.join(format!("{id}.json")),
        serde_json::to_string_pretty(record).unwrap(),
    )
    .unwrap();
}

pub fn read_record(dir: &Path, id: &str) -> Value {
    let content = fs::read_to_string(dir.join(format!("{id}.json"))).unwrap();
    serde_json::from_str(&content).unwrap()
}

/// Ids listed under `field` of a record
pub fn related_ids(record: &Value, field: &str) -> Vec<String> {
    record[field]
        .as_array()
        .unwrap_or_else(|| panic!("{field} missing from {record}"))
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect()
}
