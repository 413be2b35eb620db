//! End-to-end CLI tests for the harvester binary.

use assert_cmd::Command;
use predicates::prelude::*;

/// Test that the binary can be invoked with no input and exits with code 0.
#[test]
fn test_binary_invocation_returns_zero() {
    let mut cmd = Command::cargo_bin("harvester").unwrap();
    cmd.assert().success();
}

/// Test that --help displays usage information and exits with code 0.
#[test]
fn test_binary_help_displays_usage() {
    let mut cmd = Command::cargo_bin("harvester").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Discover and bulk-download numbered gallery images",
        ));
}

/// Test that --version displays version and exits with code 0.
#[test]
fn test_binary_version_displays_version() {
    let mut cmd = Command::cargo_bin("harvester").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("harvester"));
}

/// Test that invalid flags cause non-zero exit.
#[test]
fn test_binary_invalid_flag_returns_error() {
    let mut cmd = Command::cargo_bin("harvester").unwrap();
    cmd.arg("--invalid-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

/// Test that a zero threshold is rejected at argument parse time.
#[test]
fn test_binary_rejects_zero_threshold() {
    let mut cmd = Command::cargo_bin("harvester").unwrap();
    cmd.args(["--threshold", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

/// Test that out-of-range concurrency is rejected at argument parse time.
#[test]
fn test_binary_rejects_excessive_concurrency() {
    let mut cmd = Command::cargo_bin("harvester").unwrap();
    cmd.args(["--concurrency", "101"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

/// Test that a malformed URL exits with a non-zero code and a parse error.
#[test]
fn test_binary_malformed_url_fails() {
    let mut cmd = Command::cargo_bin("harvester").unwrap();
    cmd.args(["not-a-url", "-q"]).assert().failure();
}

/// Test that -v flag works with no input (verbose mode).
#[test]
fn test_binary_verbose_flag_accepted() {
    let mut cmd = Command::cargo_bin("harvester").unwrap();
    cmd.arg("-v").assert().success();
}

/// Test that -q flag works with no input (quiet mode).
#[test]
fn test_binary_quiet_flag_accepted() {
    let mut cmd = Command::cargo_bin("harvester").unwrap();
    cmd.arg("-q").assert().success();
}
