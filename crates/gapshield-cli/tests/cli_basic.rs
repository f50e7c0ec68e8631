//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary config dir.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (code, stdout, stderr).
fn run_cli(config_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_gapshield"))
        .env("GAPSHIELD_CONFIG_DIR", config_dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn schedule_json(dir: &Path, child: &str) -> serde_json::Value {
    let (code, stdout, stderr) = run_cli(
        dir,
        &["schedule", "show", "--child", child, "--date", "2025-12-16", "--json"],
    );
    assert_eq!(code, 0, "schedule show failed: {stderr}");
    serde_json::from_str(&stdout).expect("schedule output is JSON")
}

#[test]
fn test_schedule_show_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    let first = schedule_json(dir.path(), "child-alpha");
    let second = schedule_json(dir.path(), "child-alpha");
    assert_eq!(first["gaps"], second["gaps"]);
    assert_eq!(first["date"], "2025-12-16");

    let beta = schedule_json(dir.path(), "child-beta");
    assert_ne!(first["gaps"], beta["gaps"]);
}

#[test]
fn test_schedule_show_table() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        dir.path(),
        &["schedule", "show", "--child", "child-alpha", "--date", "2025-12-16"],
    );
    assert_eq!(code, 0);
    assert!(stdout.starts_with("child-alpha 2025-12-16:"));
}

#[test]
fn test_check_prints_only_decision() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        dir.path(),
        &[
            "check",
            "--child",
            "child-alpha",
            "--url",
            "https://988lifeline.org",
            "--at",
            "2025-12-16T03:00:00Z",
        ],
    );
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), r#"{"suppress":true}"#);

    let (code, stdout, _) = run_cli(
        dir.path(),
        &[
            "check",
            "--child",
            "child-alpha",
            "--url",
            "https://example.com",
            "--at",
            "2025-12-16T03:00:00Z",
        ],
    );
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), r#"{"suppress":false}"#);
}

#[test]
fn test_check_in_gap_matches_crisis_output() {
    let dir = tempfile::tempdir().unwrap();
    let schedule = schedule_json(dir.path(), "child-alpha");
    let start = schedule["gaps"][0]["start_time"].as_str().unwrap().to_string();

    let (_, plain, _) = run_cli(
        dir.path(),
        &["check", "--child", "child-alpha", "--url", "https://example.com", "--at", &start],
    );
    let (_, crisis, _) = run_cli(
        dir.path(),
        &["check", "--child", "child-alpha", "--url", "https://rainn.org", "--at", &start],
    );
    assert_eq!(plain.trim(), r#"{"suppress":true}"#);
    assert_eq!(plain, crisis);
}

#[test]
fn test_check_rejects_bad_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(
        dir.path(),
        &["check", "--child", "kid", "--url", "https://example.com", "--at", "noon"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid timestamp"));
}

#[test]
fn test_config_set_get_and_validate() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["config", "set", "privacy_gaps.max_daily_gaps", "3"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "ok");

    let (_, stdout, _) = run_cli(dir.path(), &["config", "get", "privacy_gaps.max_daily_gaps"]);
    assert_eq!(stdout.trim(), "3");

    let (code, _, stderr) = run_cli(dir.path(), &["config", "set", "privacy_gaps.min_daily_gaps", "7"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid configuration value"));

    let (code, stdout, _) = run_cli(dir.path(), &["config", "validate"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "config ok");
}

#[test]
fn test_config_list_is_json() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["config", "list"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["privacy_gaps"]["waking_hours_end"], 22);
}

#[test]
fn test_keygen_save_changes_schedule() {
    let dir = tempfile::tempdir().unwrap();
    let before = schedule_json(dir.path(), "child-alpha");

    let (code, stdout, _) = run_cli(dir.path(), &["keygen"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim().len(), 64);

    let (code, _, _) = run_cli(dir.path(), &["keygen", "--save"]);
    assert_eq!(code, 0);
    let after = schedule_json(dir.path(), "child-alpha");
    assert_ne!(before["gaps"], after["gaps"]);
}

#[test]
fn test_keygen_clear_restores_unkeyed_schedule() {
    let dir = tempfile::tempdir().unwrap();
    let unkeyed = schedule_json(dir.path(), "child-alpha");

    let (code, _, _) = run_cli(dir.path(), &["keygen", "--save"]);
    assert_eq!(code, 0);
    assert_ne!(schedule_json(dir.path(), "child-alpha")["gaps"], unkeyed["gaps"]);

    let (code, _, stderr) = run_cli(dir.path(), &["keygen", "--clear"]);
    assert_eq!(code, 0, "keygen --clear failed: {stderr}");
    assert_eq!(schedule_json(dir.path(), "child-alpha")["gaps"], unkeyed["gaps"]);

    let (code, _, _) = run_cli(dir.path(), &["config", "get", "privacy_gaps.seed_key"]);
    assert_ne!(code, 0);
}
