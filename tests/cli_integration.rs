// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Integration tests for the maintainers CLI commands

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Run maintainers inside `dir` with an empty config file
fn maintainers(dir: &TempDir) -> Command {
    let config = dir.path().join("config.toml");
    if !config.exists() {
        fs::write(&config, "").unwrap();
    }
    let mut cmd = Command::cargo_bin("maintainers").unwrap();
    cmd.current_dir(dir.path())
        .env("MAINTAINERS_CONFIG", &config)
        .env_remove("MAINTAINERS_FILE")
        .env_remove("RUST_LOG");
    cmd
}

fn people(dir: &TempDir) -> serde_json::Value {
    let content = fs::read_to_string(dir.path().join("MAINTAINERS")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&content).unwrap();
    doc["people"].clone()
}

#[test]
fn test_create_then_validate() {
    let dir = TempDir::new().unwrap();

    maintainers(&dir)
        .args(["create", "--issues", "https://tickets.example.com/browse/PUP"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    maintainers(&dir)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));

    let content = fs::read_to_string(dir.path().join("MAINTAINERS")).unwrap();
    assert!(content.contains("\"version\": 1"));
    assert!(content.contains("http://pup.pt/maintainers"));
}

#[test]
fn test_create_requires_issues() {
    let dir = TempDir::new().unwrap();
    maintainers(&dir).arg("create").assert().failure();
    assert!(!dir.path().join("MAINTAINERS").exists());
}

#[test]
fn test_create_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    maintainers(&dir).args(["create", "--issues", "first"]).assert().success();

    maintainers(&dir)
        .args(["create", "--issues", "second"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    maintainers(&dir)
        .args(["create", "--issues", "second", "--force"])
        .assert()
        .success();
    let content = fs::read_to_string(dir.path().join("MAINTAINERS")).unwrap();
    assert!(content.contains("second"));
}

#[test]
fn test_maintainer_lifecycle() {
    let dir = TempDir::new().unwrap();
    maintainers(&dir).args(["create", "--issues", "issues"]).assert().success();

    maintainers(&dir)
        .args(["add", "--github", "alice", "--name", "Alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added alice"));
    maintainers(&dir)
        .args(["add", "--github", "bob", "--email", "bob@example.com"])
        .assert()
        .success();
    let before = people(&dir);

    maintainers(&dir)
        .args(["add", "--github", "carol"])
        .assert()
        .success();
    maintainers(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout("alice - Alice\nbob <bob@example.com>\ncarol\n");

    maintainers(&dir)
        .args(["remove", "--github", "carol"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed carol"));
    assert_eq!(people(&dir), before);
}

#[test]
fn test_add_existing_keeps_old_values() {
    let dir = TempDir::new().unwrap();
    maintainers(&dir).args(["create", "--issues", "issues"]).assert().success();
    maintainers(&dir)
        .args(["add", "-g", "a", "-n", "Old"])
        .assert()
        .success();

    maintainers(&dir)
        .args(["add", "-g", "a", "-n", "New", "-e", "new@x.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated a"));

    assert_eq!(
        people(&dir),
        serde_json::json!([{ "github": "a", "email": "new@x.com", "name": "Old" }])
    );
}

#[test]
fn test_remove_absent_is_noop() {
    let dir = TempDir::new().unwrap();
    maintainers(&dir).args(["create", "--issues", "issues"]).assert().success();
    let before = fs::read_to_string(dir.path().join("MAINTAINERS")).unwrap();

    maintainers(&dir)
        .args(["remove", "--github", "ghost"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not listed"));

    assert_eq!(fs::read_to_string(dir.path().join("MAINTAINERS")).unwrap(), before);
}

#[test]
fn test_validate_rejects_malformed_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("MAINTAINERS"),
        "{\n  \"version\": 1,\n  \"maintained\": false\n  \"issues\": \"x\",\n  \"people\": []\n}\n",
    )
    .unwrap();

    maintainers(&dir)
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid MAINTAINERS"));
}

#[test]
fn test_add_to_invalid_file_leaves_it_untouched() {
    let dir = TempDir::new().unwrap();
    let broken = r#"{"version": 3, "issues": "x", "people": []}"#;
    fs::write(dir.path().join("MAINTAINERS"), broken).unwrap();

    maintainers(&dir).args(["add", "--github", "a"]).assert().failure();

    assert_eq!(fs::read_to_string(dir.path().join("MAINTAINERS")).unwrap(), broken);
}

#[test]
fn test_custom_file_path() {
    let dir = TempDir::new().unwrap();
    maintainers(&dir)
        .args(["--file", "OWNERS.json", "create", "--issues", "issues", "--unmaintained"])
        .assert()
        .success();

    maintainers(&dir)
        .args(["list", "-f", "OWNERS.json"])
        .assert()
        .success()
        .stdout("(unmaintained)\n");
    assert!(!dir.path().join("MAINTAINERS").exists());
}

#[test]
fn test_config_shows_effective_settings() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "organization = \"acme\"\n").unwrap();

    maintainers(&dir)
        .args(["config", "organization"])
        .assert()
        .success()
        .stdout("acme\n");

    maintainers(&dir)
        .env("MAINTAINERS_FORK_THRESHOLD", "12")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("fork_threshold = 12"));

    maintainers(&dir).args(["config", "nonsense"]).assert().failure();
}

#[test]
fn test_completions() {
    let dir = TempDir::new().unwrap();
    maintainers(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("maintainers"));
}
