// SPDX-License-Identifier: Apache-2.0

use assert_cmd::cargo::cargo_bin_cmd;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::json;

/// Command with an isolated config directory and no ambient credentials.
fn issuelens(config_home: &tempfile::TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("issuelens");
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("GITHUB_TOKEN")
        .env_remove("GH_TOKEN")
        .env_remove("GOOGLE_API_KEY")
        .env_remove("GEMINI_API_KEY")
        .env_remove("ISSUELENS_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_version() {
    let mut cmd = cargo_bin_cmd!("issuelens");
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("issuelens"));
}

#[test]
fn test_help_contains_all_commands() {
    let mut cmd = cargo_bin_cmd!("issuelens");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("analyze"));
}

#[test]
fn test_analyze_invalid_url_fails() {
    let home = tempfile::tempdir().unwrap();
    issuelens(&home)
        .args(["analyze", "https://github.com/octocat", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Error: Invalid GitHub URL. Use format: github.com/owner/repo",
        ));
}

#[test]
fn test_analyze_rejects_non_numeric_issue() {
    let home = tempfile::tempdir().unwrap();
    issuelens(&home)
        .args(["analyze", "https://github.com/octocat/Hello-World", "abc"])
        .assert()
        .failure();
}

#[test]
fn test_analyze_prints_json_result() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/repos/octocat/Hello-World/issues/3");
        then.status(200)
            .json_body(json!({"title": "Docs typo", "body": "README says 'teh'"}));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/repos/octocat/Hello-World/issues/3/comments");
        then.status(200).json_body(json!([]));
    });

    let home = tempfile::tempdir().unwrap();
    let output = issuelens(&home)
        .env("ISSUELENS_GITHUB__API_URL", server.base_url())
        .args(["analyze", "https://github.com/octocat/Hello-World", "3"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["summary"], "Server Error: LLM API key not configured");
    assert_eq!(parsed["type"], "other");
    assert!(parsed["suggested_labels"].as_array().unwrap().is_empty());
}

#[test]
fn test_analyze_uses_config_file() {
    let server = MockServer::start();
    let issue = server.mock(|when, then| {
        when.method(GET).path("/repos/octocat/Hello-World/issues/8");
        then.status(404);
    });

    let home = tempfile::tempdir().unwrap();
    let config_path = home.path().join("custom.toml");
    std::fs::write(
        &config_path,
        format!("[github]\napi_url = \"{}\"\n", server.base_url()),
    )
    .unwrap();

    issuelens(&home)
        .arg("--config")
        .arg(&config_path)
        .args(["analyze", "https://github.com/octocat/Hello-World", "8"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Issue not found"));
    issue.assert();
}
