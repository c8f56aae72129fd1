use crate::cli::support::Site;
use predicates::prelude::*;
use serde_json::json;
use tempfile::tempdir;

// ============================================================================
// Logging
// ============================================================================

#[test]
fn test_log_level_debug_shows_debug_messages() {
    let dir = tempdir().unwrap();
    let site = Site::new(dir.path());

    site.relgen()
        .env_remove("RUST_LOG")
        .env_remove("RELGEN_LOG")
        .args(["--log-level", "debug"])
        .assert()
        .success()
        .stderr(predicate::str::contains("parse_args"));
}

#[test]
fn test_default_level_hides_debug_messages() {
    let dir = tempdir().unwrap();
    let site = Site::new(dir.path());

    site.relgen()
        .env_remove("RUST_LOG")
        .env_remove("RELGEN_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("parse_args").not());
}

#[test]
fn test_malformed_record_logs_warning() {
    let dir = tempdir().unwrap();
    let site = Site::new(dir.path());
    site.product("fine", json!({"tags": ["x"]}));
    site.product("bad", json!({"tags": {"not": "a list"}}));

    site.relgen()
        .env_remove("RUST_LOG")
        .env_remove("RELGEN_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping unreadable record"));
}

#[test]
fn test_log_json_emits_json_lines() {
    let dir = tempdir().unwrap();
    let site = Site::new(dir.path());

    site.relgen()
        .env_remove("RUST_LOG")
        .env_remove("RELGEN_LOG")
        .args(["--verbose", "--log-json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("\"level\":\"DEBUG\""));
}
