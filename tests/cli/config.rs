use crate::cli::support::{related_ids, Site};
use serde_json::json;
use std::fs;
use tempfile::tempdir;

// ============================================================================
// Config file handling
// ============================================================================

fn tagged_site(site: &Site) {
    for id in ["a", "b", "c", "d"] {
        site.product(id, json!({"tags": ["shared"]}));
    }
}

#[test]
fn test_config_file_limits_apply() {
    let dir = tempdir().unwrap();
    let site = Site::new(dir.path());
    tagged_site(&site);
    fs::write(dir.path().join("relgen.toml"), "[limits]\nproducts = 2\n").unwrap();

    site.relgen().assert().success();

    assert_eq!(related_ids(&site.read_product("a"), "relatedProducts"), vec!["b", "c"]);
}

#[test]
fn test_cli_flag_beats_config_file() {
    let dir = tempdir().unwrap();
    let site = Site::new(dir.path());
    tagged_site(&site);
    fs::write(dir.path().join("relgen.toml"), "[limits]\nproducts = 2\n").unwrap();

    site.relgen().args(["--k-products", "1"]).assert().success();

    assert_eq!(related_ids(&site.read_product("a"), "relatedProducts"), vec!["b"]);
}

#[test]
fn test_config_file_collection_paths() {
    let dir = tempdir().unwrap();
    let products = dir.path().join("content/products");
    fs::create_dir_all(&products).unwrap();
    crate::cli::support::write_record(&products, "x", &json!({"tags": ["t"]}));
    crate::cli::support::write_record(&products, "y", &json!({"tags": ["t"]}));
    fs::write(
        dir.path().join("site.toml"),
        "[collections]\nproducts = \"content/products\"\n",
    )
    .unwrap();

    crate::cli::support::relgen()
        .arg("--root")
        .arg(dir.path())
        .args(["--config", "site.toml"])
        .assert()
        .success();

    let x = crate::cli::support::read_record(&products, "x");
    assert_eq!(related_ids(&x, "relatedProducts"), vec!["y"]);
}

#[test]
fn test_invalid_config_file_is_usage_error() {
    let dir = tempdir().unwrap();
    let site = Site::new(dir.path());
    fs::write(dir.path().join("relgen.toml"), "[limits]\nproducts = -4\n").unwrap();

    site.relgen().assert().code(2);
}

#[test]
fn test_unknown_config_key_is_usage_error() {
    let dir = tempdir().unwrap();
    let site = Site::new(dir.path());
    fs::write(dir.path().join("relgen.toml"), "[output]\nindent = 4\n").unwrap();

    site.relgen().assert().code(2);
}
