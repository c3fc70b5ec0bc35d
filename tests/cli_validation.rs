//! CLI-level tests for argument parsing and configuration validation.
//!
//! These run the real binary with temporary config files and assert on
//! exit status and diagnostics. No network calls are made: every scenario
//! fails during argument parsing or config validation.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// Write `contents` to a temp YAML file and return it (kept alive by the caller).
fn temp_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_help_succeeds() {
    let mut cmd = Command::cargo_bin("emprendobot").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("ask"));
}

#[test]
fn test_version_succeeds() {
    let mut cmd = Command::cargo_bin("emprendobot").unwrap();
    cmd.arg("--version");
    cmd.assert().success();
}

#[test]
fn test_missing_subcommand_fails() {
    let mut cmd = Command::cargo_bin("emprendobot").unwrap();
    cmd.assert().failure();
}

#[test]
fn test_ask_requires_prompt() {
    let mut cmd = Command::cargo_bin("emprendobot").unwrap();
    cmd.arg("ask");
    cmd.assert().failure();
}

#[test]
fn test_invalid_window_size_is_rejected() {
    let config = temp_config("chat:\n  window_size: 1\n");

    let mut cmd = Command::cargo_bin("emprendobot").unwrap();
    cmd.arg("--config")
        .arg(config.path())
        .arg("ask")
        .arg("hola");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("window_size"));
}

#[test]
fn test_zero_timeout_is_rejected() {
    let config = temp_config("provider:\n  timeout_seconds: 0\n");

    let mut cmd = Command::cargo_bin("emprendobot").unwrap();
    // Make sure the environment override does not mask the bad value.
    cmd.env_remove("EMPRENDOBOT_TIMEOUT_SECONDS");
    cmd.arg("--config")
        .arg(config.path())
        .arg("ask")
        .arg("hola");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("timeout_seconds"));
}

#[test]
fn test_history_smaller_than_window_is_rejected() {
    let config = temp_config("chat:\n  history_limit: 5\n  window_size: 15\n");

    let mut cmd = Command::cargo_bin("emprendobot").unwrap();
    cmd.arg("--config")
        .arg(config.path())
        .arg("ask")
        .arg("hola");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("history_limit"));
}

#[test]
fn test_bad_api_url_is_rejected() {
    let config = temp_config("provider:\n  api_url: not-a-valid-url\n");

    let mut cmd = Command::cargo_bin("emprendobot").unwrap();
    // Make sure the environment override does not mask the bad value.
    cmd.env_remove("EMPRENDOBOT_API_URL");
    cmd.arg("--config")
        .arg(config.path())
        .arg("ask")
        .arg("hola");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("api_url"));
}
