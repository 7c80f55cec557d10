//! Configuration integration tests.
//!
//! These tests verify config discovery, format parsing, and precedence
//! from an end-to-end perspective using the compiled binary. Tests use
//! `info --json` to assert actual config values, not just process success.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

/// Run `info --json` from a directory and parse the JSON output.
fn info_json(dir: &std::path::Path) -> Value {
    let output = cmd()
        .args(["-C", dir.to_str().unwrap(), "info", "--json"])
        .output()
        .expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

#[test]
fn runs_without_config_file() {
    let tmp = TempDir::new().unwrap();
    let json = info_json(tmp.path());

    assert_eq!(json["config"]["log_level"], "info");
    assert_eq!(json["config"]["num_stopwords"], 300);
    assert_eq!(json["config"]["http_port"], 8080);
    assert!(json["config"]["config_file"].is_null());
}

#[test]
fn discovers_dotfile_config_in_current_dir() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".wordcloud.toml"), "num_stopwords = 120\n").unwrap();

    let json = info_json(tmp.path());

    assert_eq!(json["config"]["num_stopwords"], 120);
    let reported = json["config"]["config_file"].as_str().unwrap();
    assert!(reported.ends_with(".wordcloud.toml"), "{reported}");
}

#[test]
fn discovers_config_in_parent_directory() {
    let tmp = TempDir::new().unwrap();
    let sub_dir = tmp.path().join("nested").join("deep");
    fs::create_dir_all(&sub_dir).unwrap();
    fs::write(tmp.path().join("wordcloud.toml"), "http_port = 9090\n").unwrap();

    let json = info_json(&sub_dir);

    assert_eq!(json["config"]["http_port"], 9090);
}

#[test]
fn yaml_config_is_read() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("wordcloud.yaml"),
        "log_level: warn\nmax_request_bytes: 2048\n",
    )
    .unwrap();

    let json = info_json(tmp.path());

    assert_eq!(json["config"]["log_level"], "warn");
    assert_eq!(json["config"]["max_request_bytes"], 2048);
}

#[test]
fn explicit_config_flag_wins() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("wordcloud.toml"), "num_stopwords = 10\n").unwrap();
    let explicit = tmp.path().join("custom.toml");
    fs::write(&explicit, "num_stopwords = 20\n").unwrap();

    let output = cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "--config"])
        .arg(&explicit)
        .args(["info", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["num_stopwords"], 20);
}

#[test]
fn data_dir_from_config_is_used() {
    let tmp = TempDir::new().unwrap();
    let data = tmp.path().join("corpus");
    fs::create_dir_all(data.join("Spanish")).unwrap();
    fs::write(tmp.path().join("wordcloud.toml"), "data_dir = \"corpus\"\n").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "languages", "--names-only"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Spanish\n"));
}

#[test]
fn invalid_config_value_fails() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("wordcloud.toml"), "http_port = \"high\"\n").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}

#[test]
fn env_var_overrides_config_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("wordcloud.toml"), "num_stopwords = 10\n").unwrap();

    let output = cmd()
        .env("WORDCLOUD_NUM_STOPWORDS", "77")
        .args(["-C", tmp.path().to_str().unwrap(), "info", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["num_stopwords"], 77);
}
