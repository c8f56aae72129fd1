use crate::cli::support::{related_ids, Site};
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use tempfile::tempdir;

fn write_export(site: &Site, data: &Value) {
    fs::write(
        site.root.join("data/data.json"),
        serde_json::to_string_pretty(data).unwrap(),
    )
    .unwrap();
}

// ============================================================================
// Split command
// ============================================================================

#[test]
fn test_split_writes_per_item_records() {
    let dir = tempdir().unwrap();
    let site = Site::new(dir.path());
    write_export(
        &site,
        &json!([
            {
                "product_slug": "ghee",
                "product": {"title": "A2 Ghee", "tags": ["dairy"]},
                "blog_slug": "why-ghee",
                "blog": {"title": "Why Ghee", "tags": ["dairy"]}
            },
            {"product_slug": "draft", "product": {}, "blog_slug": "empty-post", "blog": {}}
        ]),
    );

    site.relgen()
        .arg("split")
        .assert()
        .success()
        .stdout(predicate::str::contains("Entries processed: 2"))
        .stdout(predicate::str::contains("Products: 1 written, 1 skipped, 0 failed"))
        .stdout(predicate::str::contains("Blogs: 1 written, 1 skipped, 0 failed"));

    assert_eq!(site.read_product("ghee")["title"], "A2 Ghee");
    assert_eq!(site.read_blog("why-ghee")["title"], "Why Ghee");
    assert!(!site.products_dir().join("draft.json").exists());
}

#[test]
fn test_split_then_generate() {
    let dir = tempdir().unwrap();
    let site = Site::new(dir.path());
    write_export(
        &site,
        &json!([
            {"product_slug": "ghee", "product": {"title": "A2 Ghee", "tags": ["dairy"]}},
            {"product_slug": "paneer", "product": {"title": "Paneer", "tags": ["Dairy"]},
             "blog_slug": "dairy-101", "blog": {"title": "Dairy 101", "tags": ["dairy"]}}
        ]),
    );

    site.relgen().arg("split").assert().success();
    site.relgen().assert().success();

    let ghee = site.read_product("ghee");
    assert_eq!(related_ids(&ghee, "relatedProducts"), vec!["paneer"]);
    assert_eq!(related_ids(&ghee, "relatedBlogs"), vec!["dairy-101"]);
}

#[test]
fn test_split_creates_missing_directories() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("export.json"),
        r#"[{"blog_slug": "hello", "blog": {"title": "Hello"}}]"#,
    )
    .unwrap();

    crate::cli::support::relgen()
        .arg("--root")
        .arg(dir.path())
        .args(["split", "--input", "export.json"])
        .assert()
        .success();

    assert!(dir.path().join("data/blogs/hello.json").exists());
    assert!(dir.path().join("data/products").is_dir());
}

#[test]
fn test_split_missing_input_is_data_error() {
    let dir = tempdir().unwrap();
    let site = Site::new(dir.path());

    site.relgen()
        .arg("split")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid input"));
}

#[test]
fn test_split_json_output() {
    let dir = tempdir().unwrap();
    let site = Site::new(dir.path());
    write_export(
        &site,
        &json!([{"product_slug": "ghee", "product": {"title": "Ghee"}}]),
    );

    let output = site
        .relgen()
        .args(["--format", "json", "split"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["entries"], 1);
    assert_eq!(summary["products"]["written"], 1);
    assert_eq!(summary["blogs"]["written"], 0);
}

#[test]
fn test_split_rejects_shared_directory() {
    let dir = tempdir().unwrap();
    let site = Site::new(dir.path());

    site.relgen()
        .args(["--products-dir", "data/items", "--blogs-dir", "data/items", "split"])
        .assert()
        .code(2);
}
