//! Basic CLI E2E tests.
//!
//! Each test runs the built binary with HOME pointed at a fresh temp
//! directory so config and database never touch the real profile.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (code, stdout, stderr).
fn run_cli(home: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_forgefocus"))
        .args(args)
        .env("HOME", home)
        .env_remove("FORGEFOCUS_ENV")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

#[test]
fn test_presets_list() {
    let home = tempfile::TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["presets"]);
    assert_eq!(code, 0, "presets failed");
    assert!(stdout.contains("Short Burst"));
    assert!(stdout.contains("* 3"));
}

#[test]
fn test_presets_json() {
    let home = tempfile::TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["presets", "--json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 4);
    assert_eq!(parsed[0]["focus_minutes"], 10);
}

#[test]
fn test_history_empty() {
    let home = tempfile::TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["history", "list"]);
    assert_eq!(code, 0, "history list failed");
    assert!(stdout.contains("No sessions recorded yet"));

    let (code, stdout, _) = run_cli(home.path(), &["history", "summary", "--json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["total_points"], 0);
}

#[test]
fn test_history_day_rejects_bad_date() {
    let home = tempfile::TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["history", "day", "yesterday"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("invalid date"));
}

#[test]
fn test_timer_check_fresh_name() {
    let home = tempfile::TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["timer", "check", "Read"]);
    assert_eq!(code, 0, "timer check failed");
    assert!(stdout.contains("available"));
}

#[test]
fn test_timer_run_rejects_blank_task() {
    let home = tempfile::TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["timer", "run", "--task", "   "]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Give your quest a name!"));
}

#[test]
fn test_timer_run_rejects_unknown_preset() {
    let home = tempfile::TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(
        home.path(),
        &["timer", "run", "--task", "Read", "--preset", "9"],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("out of bounds"));
}

#[test]
fn test_config_get_set() {
    let home = tempfile::TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["config", "get", "timer.default_preset"]);
    assert_eq!(code, 0, "config get failed");
    assert_eq!(stdout.trim(), "3");

    let (code, _, _) = run_cli(home.path(), &["config", "set", "timer.default_preset", "1"]);
    assert_eq!(code, 0, "config set failed");

    let (_, stdout, _) = run_cli(home.path(), &["config", "get", "timer.default_preset"]);
    assert_eq!(stdout.trim(), "1");
}

#[test]
fn test_config_unknown_key() {
    let home = tempfile::TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["config", "get", "ui.dark_mode"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown config key: ui.dark_mode"));
}

#[test]
fn test_config_list_and_path() {
    let home = tempfile::TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["config", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("timer.default_preset = 3"));
    assert!(stdout.contains("notifications.enabled = true"));

    let (code, stdout, _) = run_cli(home.path(), &["config", "path"]);
    assert_eq!(code, 0);
    assert!(stdout.trim().ends_with("config.toml"));
}

#[test]
fn test_completions() {
    let home = tempfile::TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("forgefocus"));
}
