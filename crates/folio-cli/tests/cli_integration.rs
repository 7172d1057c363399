//! CLI Integration Tests
//!
//! These tests verify the CLI commands work correctly end-to-end.
//! They test the "wiring" between the CLI and the core library.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

fn cli_cmd() -> Command {
    Command::cargo_bin("folio").expect("Failed to find folio binary")
}

/// Write a config override into a temp dir and return its path
fn write_config(dir: &TempDir, json: &str) -> std::path::PathBuf {
    let path = dir.path().join("site.json");
    std::fs::write(&path, json).unwrap();
    path
}

// ============================================================================
// Frames Command Tests
// ============================================================================

#[test]
fn test_frames_default_roles() {
    cli_cmd()
        .args(["frames", "--count", "3"])
        .assert()
        .success()
        .stdout("120ms\tC\n120ms\tCl\n120ms\tClo\n");
}

#[test]
fn test_frames_with_override() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, r#"{"roles": ["hi"], "typing": {"hold_ms": 500}}"#);

    cli_cmd()
        .arg("--config")
        .arg(&config)
        .args(["frames", "-n", "5"])
        .assert()
        .success()
        .stdout("120ms\th\n500ms\thi\n60ms\th\n200ms\t\n120ms\th\n");
}

// ============================================================================
// Config Command Tests
// ============================================================================

#[test]
fn test_config_prints_defaults() {
    cli_cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"certificateModal\""))
        .stdout(predicate::str::contains("assets/bg-hero.jpg"))
        .stdout(predicate::str::contains("#108f73ff"))
        .stdout(predicate::str::contains("0.55"));
}

#[test]
fn test_config_rejects_invalid_override() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, r#"{"roles": []}"#);

    cli_cmd()
        .arg("--config")
        .arg(&config)
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("roles must not be empty"));
}

#[test]
fn test_config_missing_file() {
    let dir = TempDir::new().unwrap();

    cli_cmd()
        .arg("--config")
        .arg(dir.path().join("absent.json"))
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("loading config"));
}

// ============================================================================
// Extract Command Tests
// ============================================================================

#[test]
fn test_extract_legacy_trigger() {
    cli_cmd()
        .args(["extract", "openCertificate('assets/cert.jpg')"])
        .assert()
        .success()
        .stdout("assets/cert.jpg\n");
}

#[test]
fn test_extract_no_match_fails() {
    cli_cmd()
        .args(["extract", "showModal()"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no openCertificate"));
}

// ============================================================================
// Play Command Tests
// ============================================================================

#[test]
fn test_play_short_phrase() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        &dir,
        r#"{"roles": ["ok"], "typing": {"type_ms": 1, "delete_ms": 1, "hold_ms": 1, "advance_ms": 1}}"#,
    );

    cli_cmd()
        .arg("--config")
        .arg(&config)
        .args(["play", "--cycles", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ok"));
}
