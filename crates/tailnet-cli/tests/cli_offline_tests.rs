//! Commands that never reach the API

use assert_cmd::Command;
use predicates::prelude::*;
use tailnet_api::CredentialStore;
use tailnet_test_utils::TestConfigDir;

/// Get a Command for the tailnet-admin binary
fn admin_cmd(config_dir: &TestConfigDir) -> Command {
    let mut cmd = Command::cargo_bin("tailnet-admin").expect("Failed to find tailnet-admin binary");
    cmd.arg("--config-dir")
        .arg(config_dir.path())
        .env("NO_COLOR", "1")
        .env_remove("TAILSCALE_API_URL")
        .env_remove("TAILNET_ADMIN_CONFIG_DIR");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = TestConfigDir::new();
    admin_cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("tags"))
        .stdout(predicate::str::contains("test-auth"));
}

#[test]
fn test_tags_help_lists_actions() {
    let dir = TestConfigDir::new();
    admin_cmd(&dir)
        .args(["tags", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("add-if-missing"))
        .stdout(predicate::str::contains("device-tags"));
}

#[test]
fn test_version_flag() {
    let dir = TestConfigDir::new();
    admin_cmd(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_command_prints_hint() {
    let dir = TestConfigDir::new();
    admin_cmd(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("tailnet-admin --help"));
}

#[test]
fn test_completions_bash() {
    let dir = TestConfigDir::new();
    admin_cmd(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tailnet-admin"));
}

#[test]
fn test_status_when_not_authenticated() {
    let dir = TestConfigDir::new();
    admin_cmd(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not authenticated"));
}

#[test]
fn test_status_with_missing_token() {
    let dir = TestConfigDir::new();
    CredentialStore::new(dir.path())
        .save("example.com", "tskey", None)
        .unwrap();
    std::fs::remove_file(dir.file("token")).unwrap();

    admin_cmd(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("example.com"))
        .stdout(predicate::str::contains("Missing"));
}

#[test]
fn test_logout_clears_credentials() {
    let dir = TestConfigDir::new();
    CredentialStore::new(dir.path())
        .save("example.com", "tskey", None)
        .unwrap();

    admin_cmd(&dir)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));

    dir.assert_file_not_exists("config.json");
    dir.assert_file_not_exists("token");

    admin_cmd(&dir)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("No stored authentication found"));
}

#[test]
fn test_set_without_ids_is_rejected() {
    let dir = TestConfigDir::new();
    admin_cmd(&dir)
        .args(["tags", "set", ",", "--tag", "tag:x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("At least one device id is required"));
}

#[test]
fn test_invalid_api_url_fails() {
    let dir = TestConfigDir::new();
    admin_cmd(&dir)
        .args(["--api-url", "not a url", "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid URL"));
}
