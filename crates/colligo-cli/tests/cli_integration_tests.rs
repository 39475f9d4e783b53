//! CLI integration tests for colligo
//!
//! Tests the colligo CLI commands end-to-end using assert_cmd. Commands
//! that would talk to a live backend are covered by the core crate's
//! service tests; here we exercise argument handling and configuration.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to create a command with an isolated config directory
fn colligo_cmd(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("colligo").unwrap();
    cmd.env("COLLIGO_CONFIG_DIR", config_dir.path());
    cmd
}

#[test]
fn test_help_command() {
    let config_dir = TempDir::new().unwrap();

    colligo_cmd(&config_dir)
        .args(["--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Hybrid search over heritage collections",
        ));
}

#[test]
fn test_version_output() {
    let config_dir = TempDir::new().unwrap();

    colligo_cmd(&config_dir)
        .args(["--version"])
        .assert()
        .success()
        .stdout(predicate::str::contains("colligo"));
}

#[test]
fn test_kinds_command_lists_all_kinds() {
    let config_dir = TempDir::new().unwrap();

    colligo_cmd(&config_dir)
        .args(["kinds"])
        .assert()
        .success()
        .stdout(predicate::str::contains("datasets"))
        .stdout(predicate::str::contains("heritage-objects"))
        .stdout(predicate::str::contains("provenance-events"))
        .stdout(predicate::str::contains("owners"));
}

#[test]
fn test_config_path_respects_env_override() {
    let config_dir = TempDir::new().unwrap();

    colligo_cmd(&config_dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            config_dir.path().to_str().unwrap(),
        ));
}

#[test]
fn test_config_list_shows_all_keys() {
    let config_dir = TempDir::new().unwrap();

    colligo_cmd(&config_dir)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("locale"))
        .stdout(predicate::str::contains("graph.endpoint"))
        .stdout(predicate::str::contains("search.endpoint"));
}

#[test]
fn test_config_set_get_round_trip() {
    let config_dir = TempDir::new().unwrap();

    colligo_cmd(&config_dir)
        .args(["config", "set", "locale", "nl"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set locale = nl"));

    colligo_cmd(&config_dir)
        .args(["config", "get", "locale"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nl"));
}

#[test]
fn test_config_set_rejects_invalid_endpoint() {
    let config_dir = TempDir::new().unwrap();

    colligo_cmd(&config_dir)
        .args(["config", "set", "graph.endpoint", "not a url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid URL"));
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let config_dir = TempDir::new().unwrap();

    colligo_cmd(&config_dir)
        .args(["config", "set", "graph.unknown", "value"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn test_config_reset_restores_defaults() {
    let config_dir = TempDir::new().unwrap();

    colligo_cmd(&config_dir)
        .args(["config", "set", "locale", "nl"])
        .assert()
        .success();

    colligo_cmd(&config_dir)
        .args(["config", "reset"])
        .assert()
        .success();

    colligo_cmd(&config_dir)
        .args(["config", "get", "locale"])
        .assert()
        .success()
        .stdout(predicate::str::contains("en"));
}

#[test]
fn test_search_rejects_unknown_kind() {
    let config_dir = TempDir::new().unwrap();

    colligo_cmd(&config_dir)
        .args(["search", "paintings"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown entity kind"));
}

#[test]
fn test_search_rejects_invalid_sort_field() {
    let config_dir = TempDir::new().unwrap();

    colligo_cmd(&config_dir)
        .args(["search", "datasets", "--sort", "color"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid sort field"));
}

#[test]
fn test_search_rejects_malformed_filter() {
    let config_dir = TempDir::new().unwrap();

    colligo_cmd(&config_dir)
        .args(["search", "datasets", "--filter", "owners"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid filter"));
}

#[test]
fn test_get_requires_at_least_one_id() {
    let config_dir = TempDir::new().unwrap();

    colligo_cmd(&config_dir)
        .args(["get", "datasets"])
        .assert()
        .failure();
}

#[test]
fn test_get_rejects_unknown_kind() {
    let config_dir = TempDir::new().unwrap();

    colligo_cmd(&config_dir)
        .args(["get", "paintings", "https://example.org/d/1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown entity kind"));
}
