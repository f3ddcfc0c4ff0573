//! Integration tests for the CLI

use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{temp_config, tubekeys};

// ============================================================================
// time
// ============================================================================

#[test]
fn time_prints_seconds_and_clock() {
    let dir = TempDir::new().unwrap();
    tubekeys(&dir.path().join("config.toml"))
        .args(["time", "1h03m12s"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("3792\t1:03:12"));
}

#[test]
fn time_accepts_fractional_components() {
    let dir = TempDir::new().unwrap();
    tubekeys(&dir.path().join("config.toml"))
        .args(["time", "4m22.5s"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("262.5\t04:22"));
}

#[test]
fn time_rejects_malformed_input() {
    let dir = TempDir::new().unwrap();
    tubekeys(&dir.path().join("config.toml"))
        .args(["time", "abc"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no numeric component"));
}

#[test]
fn time_without_argument_is_usage_error() {
    let dir = TempDir::new().unwrap();
    tubekeys(&dir.path().join("config.toml"))
        .arg("time")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<SPEC>"));
}

// ============================================================================
// keys
// ============================================================================

#[test]
fn keys_lists_default_bindings() {
    let dir = TempDir::new().unwrap();
    tubekeys(&dir.path().join("absent.toml"))
        .arg("keys")
        .assert()
        .success()
        .stdout(predicate::str::contains("playlist-next"))
        .stdout(predicate::str::contains("Space"))
        .stdout(predicate::str::contains("seek -6"));
}

#[test]
fn keys_reflects_config_overrides() {
    let (_dir, path) = temp_config("[keys]\n\"x\" = \"frames 5\"\n");
    tubekeys(&path)
        .arg("keys")
        .assert()
        .success()
        .stdout(predicate::str::contains("frames 5"));
}

#[test]
fn keys_fails_on_invalid_action() {
    let (_dir, path) = temp_config("[keys]\n\"x\" = \"warp 9\"\n");
    tubekeys(&path)
        .arg("keys")
        .assert()
        .failure()
        .stderr(predicate::str::contains("warp"));
}

// ============================================================================
// config
// ============================================================================

#[test]
fn config_path_honours_env_override() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    tubekeys(&path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn config_show_prints_defaults() {
    let dir = TempDir::new().unwrap();
    tubekeys(&dir.path().join("absent.toml"))
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("seek_offset = 10.0"))
        .stdout(predicate::str::contains("interval_ms = 1000"));
}

#[test]
fn config_edit_creates_default_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    tubekeys(&path)
        .args(["config", "edit"])
        .env("EDITOR", "true")
        .assert()
        .success();
    assert!(path.exists());
}

// ============================================================================
// completions / help
// ============================================================================

#[test]
fn completions_generate_for_bash() {
    let dir = TempDir::new().unwrap();
    tubekeys(&dir.path().join("config.toml"))
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tubekeys"));
}

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    tubekeys(&dir.path().join("config.toml"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("keys"))
        .stdout(predicate::str::contains("time"))
        .stdout(predicate::str::contains("demo"));
}

#[test]
fn time_accepts_plain_seconds() {
    let dir = TempDir::new().unwrap();
    tubekeys(&dir.path().join("config.toml"))
        .args(["time", "45"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("45\t00:45"));
}

#[test]
fn time_rejects_overflowing_seconds() {
    let dir = TempDir::new().unwrap();
    tubekeys(&dir.path().join("config.toml"))
        .args(["time", "1e400"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no numeric component"));
}
