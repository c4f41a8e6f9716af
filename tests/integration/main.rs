//! Integration tests for the issue-digest CLI
//!
//! These run the binary against a throwaway config file. Nothing here
//! reaches the network: every command either stays local or fails before
//! a request is made.

use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper function to create an issue-digest command isolated from the
/// user's config and credentials
fn issue_digest(home: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("issue-digest"));
    cmd.env("ISSUE_DIGEST_CONFIG", home.join("config.toml"))
        .env("NO_COLOR", "1")
        .env_remove("GITHUB_TOKEN")
        .env_remove("GH_TOKEN")
        .current_dir(home);
    cmd
}

// =============================================================================
// BASICS
// =============================================================================

#[test]
fn test_help_lists_commands() {
    let temp = TempDir::new().unwrap();

    issue_digest(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("onboard"))
        .stdout(predicate::str::contains("repo"));
}

#[test]
fn test_version_command() {
    let temp = TempDir::new().unwrap();

    issue_digest(temp.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("issue-digest v{}", env!("CARGO_PKG_VERSION"))));

    issue_digest(temp.path())
        .args(["--json", "version"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"version\""));
}

// =============================================================================
// INPUT VALIDATION
// =============================================================================

#[test]
fn test_plan_rejects_bad_milestone() {
    let temp = TempDir::new().unwrap();

    issue_digest(temp.path())
        .args(["plan", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid milestone number: abc"));
}

#[test]
fn test_plan_rejects_bad_repo() {
    let temp = TempDir::new().unwrap();

    issue_digest(temp.path())
        .args(["--repo", "bad", "plan", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid repository format"));
}

#[test]
fn test_plan_without_token_fails_before_network() {
    let temp = TempDir::new().unwrap();

    issue_digest(temp.path())
        .args(["--repo", "octo/widgets", "plan", "1", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no GitHub token found"));
}

#[test]
fn test_pr_flags_conflict() {
    let temp = TempDir::new().unwrap();

    issue_digest(temp.path())
        .args(["plan", "1", "--exclude-pr", "--include-pr"])
        .assert()
        .failure();
}

// =============================================================================
// REPOSITORY MANAGEMENT
// =============================================================================

#[test]
fn test_repo_lifecycle() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();

    issue_digest(home)
        .args(["repo", "add", "octo/widgets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully added repository octo/widgets"));
    issue_digest(home).args(["repo", "add", "octo/gadgets"]).assert().success();

    // The last added repository is selected
    issue_digest(home)
        .args(["repo", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  octo/widgets"))
        .stdout(predicate::str::contains("* octo/gadgets"));

    issue_digest(home).args(["repo", "switch", "octo/widgets"]).assert().success();
    issue_digest(home)
        .args(["repo", "current"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current repository: octo/widgets"));

    // Removing the selected repository falls back to the first remaining one
    issue_digest(home).args(["repo", "remove", "octo/widgets"]).assert().success();
    issue_digest(home)
        .args(["repo", "current"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current repository: octo/gadgets"));

    issue_digest(home)
        .args(["repo", "remove", "octo/widgets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));

    let content = fs::read_to_string(home.join("config.toml")).unwrap();
    assert!(content.contains("current = \"octo/gadgets\""));
}

#[test]
fn test_repo_switch_unknown_fails() {
    let temp = TempDir::new().unwrap();

    issue_digest(temp.path())
        .args(["repo", "switch", "octo/unknown"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found in config"));
}

#[test]
fn test_repo_list_json() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    issue_digest(home).args(["repo", "add", "octo/widgets"]).assert().success();

    let output = issue_digest(home).args(["--json", "repo", "list"]).output().unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["current"], "octo/widgets");
    assert_eq!(json["repositories"][0], "octo/widgets");
}

// =============================================================================
// AUTHENTICATION
// =============================================================================

#[test]
fn test_auth_login_status_logout() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();

    issue_digest(home)
        .args(["auth", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));

    issue_digest(home)
        .args(["auth", "login", "--with-token"])
        .write_stdin("ghp_example\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Token saved"));

    issue_digest(home)
        .args(["auth", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in (token from config file)"));

    // The stored token never appears in config output
    issue_digest(home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("********"))
        .stdout(predicate::str::contains("ghp_example").not());

    issue_digest(home)
        .args(["auth", "logout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Token removed"));
    issue_digest(home)
        .args(["auth", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn test_env_token_takes_precedence() {
    let temp = TempDir::new().unwrap();

    issue_digest(temp.path())
        .env("GH_TOKEN", "from-env")
        .args(["auth", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("environment variable GH_TOKEN"));
}

#[test]
fn test_empty_login_is_rejected() {
    let temp = TempDir::new().unwrap();

    issue_digest(temp.path())
        .args(["auth", "login", "--with-token"])
        .write_stdin("\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no token received"));
}

#[test]
fn test_config_path_follows_override() {
    let temp = TempDir::new().unwrap();

    issue_digest(temp.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}
