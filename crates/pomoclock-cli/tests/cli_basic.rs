//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Each test
//! points POMOCLOCK_CONFIG_DIR at its own temp directory so nothing
//! touches the real user config.

use std::path::Path;
use std::process::Command;

/// Run a CLI command against the given config dir and return
/// (stdout, stderr, exit code).
fn run_cli(config_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "pomoclock-cli", "--"])
        .args(args)
        .env("POMOCLOCK_CONFIG_DIR", config_dir)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_config_list_is_json() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "list"]);
    assert_eq!(code, 0, "Config list failed");
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["timer"]["session_length"], 25);
    assert_eq!(json["timer"]["break_length"], 5);
}

#[test]
fn test_config_get_default() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "timer.session_length"]);
    assert_eq!(code, 0, "Config get failed");
    assert_eq!(stdout.trim(), "25");
}

#[test]
fn test_config_set_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["config", "set", "timer.break_length", "10"]);
    assert_eq!(code, 0, "Config set failed");

    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "timer.break_length"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "10");
}

#[test]
fn test_config_set_rejects_out_of_range() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "timer.session_length", "61"]);
    assert_ne!(code, 0, "Out-of-range set unexpectedly succeeded");
    assert!(stderr.contains("Invalid configuration value"));
}

#[test]
fn test_config_get_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["config", "get", "timer.nonexistent"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_reset() {
    let dir = tempfile::tempdir().unwrap();
    let _ = run_cli(dir.path(), &["config", "set", "timer.session_length", "40"]);
    let (_, _, code) = run_cli(dir.path(), &["config", "reset"]);
    assert_eq!(code, 0, "Config reset failed");

    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "timer.session_length"]);
    assert_eq!(stdout.trim(), "25");
}

#[test]
fn test_run_ticks_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["run", "--ticks", "3"]);
    assert_eq!(code, 0, "Run --ticks failed");
    // No zero-crossing in 3 ticks: stdout is a single pretty snapshot.
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["type"], "state_snapshot");
    assert_eq!(json["phase"], "session");
    assert_eq!(json["remaining_secs"], 1497);
    assert_eq!(json["display"], "24:57");
}

#[test]
fn test_run_ticks_session_completion() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        dir.path(),
        &["run", "--ticks", "60", "--session", "1", "--break", "1"],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("\"type\":\"session_completed\""));
    assert!(stdout.contains("\"phase\": \"break\""));
}

#[test]
fn test_run_ticks_flag_overrides_config() {
    let dir = tempfile::tempdir().unwrap();
    let _ = run_cli(dir.path(), &["config", "set", "timer.session_length", "50"]);
    let (stdout, _, code) = run_cli(dir.path(), &["run", "--ticks", "0", "--session", "2"]);
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["session_length_min"], 2);
}

#[test]
fn test_run_rejects_out_of_range_length() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["run", "--ticks", "0", "--session", "61"]);
    assert_ne!(code, 0, "Out-of-range --session unexpectedly accepted");
}

#[test]
fn test_completions_bash() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["completions", "bash"]);
    assert_eq!(code, 0, "Completions failed");
    assert!(stdout.contains("pomoclock"));
}
