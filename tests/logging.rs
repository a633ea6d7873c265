mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::checker_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn temp_dir_with_file() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("file.txt"), "hello").unwrap();
    temp
}

#[test]
fn baseline_without_flags_respects_rust_log_info() {
    let temp = temp_dir_with_file();

    checker_cmd(temp.path())
        .env("RUST_LOG", "info")
        .arg("baseline")
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved baseline of 1 files"));
}

#[test]
fn baseline_without_flags_respects_rust_log_warn() {
    let temp = temp_dir_with_file();

    checker_cmd(temp.path())
        .env("RUST_LOG", "warn")
        .arg("baseline")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn verbose_overrides_rust_log_warn() {
    let temp = temp_dir_with_file();

    checker_cmd(temp.path())
        .env("RUST_LOG", "warn")
        .arg("-v")
        .arg("baseline")
        .assert()
        .success()
        .stderr(predicate::str::contains("INFO: "))
        .stderr(predicate::str::contains("Saved baseline of 1 files"));
}

#[test]
fn verbose_debug_shows_checksums() {
    let temp = temp_dir_with_file();

    checker_cmd(temp.path())
        .env("RUST_LOG", "warn")
        .arg("-vv")
        .arg("baseline")
        .assert()
        .success()
        .stderr(predicate::str::contains("Checksum of"));
}

#[test]
fn log_level_overrides_rust_log_warn() {
    let temp = temp_dir_with_file();

    checker_cmd(temp.path())
        .env("RUST_LOG", "warn")
        .arg("--log-level")
        .arg("info")
        .arg("baseline")
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved baseline of 1 files"));
}

#[test]
fn log_level_conflicts_with_verbose() {
    cargo_bin_cmd!("integrity-checker")
        .arg("--log-level")
        .arg("info")
        .arg("-v")
        .arg("scan")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--log-level <LEVEL>"))
        .stderr(predicate::str::contains("--verbose"));
}

#[test]
fn help_mentions_rust_log_precedence_for_logging_flags() {
    cargo_bin_cmd!("integrity-checker")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("-v, --verbose"))
        .stdout(predicate::str::contains("--log-level <LEVEL>"))
        .stdout(predicate::str::contains("Takes precedence over RUST_LOG"));
}

#[test]
fn errors_have_ascii_prefix_when_not_tty() {
    let temp = TempDir::new().unwrap();

    // capture() makes stdout/stderr non-tty
    let output = checker_cmd(temp.path())
        .arg("scan")
        .assert()
        .code(2)
        .get_output()
        .clone();

    let stderr = String::from_utf8_lossy(&output.stderr);

    for ch in stderr.chars() {
        assert!(
            ch.is_ascii(),
            "stderr unexpectedly contains non-ASCII character: {ch:?}"
        );
    }
    assert!(
        stderr.contains("ERROR:"),
        "stderr should include the error prefix"
    );
}
