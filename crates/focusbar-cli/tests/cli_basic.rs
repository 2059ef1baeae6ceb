//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against a throwaway config
//! directory and verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command with `FOCUSBAR_CONFIG_DIR` pointed at `dir`.
fn run_cli(dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new("cargo")
        .args(["run", "-q", "-p", "focusbar-cli", "--"])
        .args(args)
        .env("FOCUSBAR_CONFIG_DIR", dir)
        .env("FOCUSBAR_LOG", "error")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn parse_json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_config_path_points_into_config_dir() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["config", "path"]);
    assert_eq!(code, 0);
    assert_eq!(
        stdout.trim(),
        dir.path().join("config.toml").display().to_string()
    );
}

#[test]
fn test_config_get_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["config", "get", "timer.work_minutes"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "50");
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_config_get_unknown_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["config", "get", "timer.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown configuration key: timer.nope"));
}

#[test]
fn test_config_set_persists() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(dir.path(), &["config", "set", "timer.break_minutes", "15"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(dir.path(), &["config", "get", "timer.break_minutes"]);
    assert_eq!(stdout.trim(), "15");
}

#[test]
fn test_config_set_rejects_invalid_schedule() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["config", "set", "schedule.lunch_start_hour", "14"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
    let (_, stdout, _) = run_cli(dir.path(), &["config", "get", "schedule.lunch_start_hour"]);
    assert_eq!(stdout.trim(), "11");
}

#[test]
fn test_config_validate_reports_broken_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[schedule]\ndaily_start = \"18:00\"\n",
    )
    .unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["config", "validate"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("schedule.daily_start"));
}

#[test]
fn test_schedule_check_lunch_forces_idle() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        dir.path(),
        &["schedule", "check", "--at", "11:30", "--mode", "work"],
    );
    assert_eq!(code, 0);
    let json = parse_json(&stdout);
    assert_eq!(json["verdict"]["verdict"], "force_idle");
    assert_eq!(json["verdict"]["reason"], "lunch");
    assert_eq!(json["boundary"], "lunch");
}

#[test]
fn test_schedule_check_morning_should_start() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["schedule", "check", "--at", "09:00"]);
    assert_eq!(code, 0);
    let json = parse_json(&stdout);
    assert_eq!(json["mode"], "idle");
    assert_eq!(json["verdict"]["verdict"], "should_start");
    assert!(json["boundary"].is_null());
}

#[test]
fn test_schedule_check_rejects_bad_time() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["schedule", "check", "--at", "noon"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid time of day for '--at': 'noon'"));
}

#[test]
fn test_schedule_show() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["schedule", "show"]);
    assert_eq!(code, 0);
    let json = parse_json(&stdout);
    assert_eq!(json["daily_start"], "07:00");
    assert_eq!(json["lunch"], serde_json::json!([11, 13]));
    assert_eq!(json["work_minutes"], 50);
}

#[test]
fn test_sound_paths_missing_assets_are_null() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["sound", "paths"]);
    assert_eq!(code, 0);
    let json = parse_json(&stdout);
    assert!(json["alarm"].is_null());
    assert!(json["soon"].is_null());
}
