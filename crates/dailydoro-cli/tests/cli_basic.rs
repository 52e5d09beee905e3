//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and
//! verify outputs.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    run_cli_with_stdin(home, args, "")
}

fn run_cli_with_stdin(home: &Path, args: &[&str], stdin: &str) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_dailydoro"))
        .args(args)
        .env("DAILYDORO_HOME", home)
        .env_remove("DAILYDORO_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");

    let output = child.wait_with_output().expect("Failed to wait for CLI");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Invoke a CLI command and expect success.
fn run_cli_success(home: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "CLI command failed: {:?}\n{}", args, stderr);
    stdout
}

fn assert_contains(haystack: &str, needle: &str) {
    assert!(
        haystack.contains(needle),
        "Expected '{}' to contain '{}'",
        haystack,
        needle
    );
}

#[test]
fn test_task_list_has_ten_slots() {
    let home = TempDir::new().unwrap();
    let stdout = run_cli_success(home.path(), &["task", "list", "--json"]);
    let tasks: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(tasks.as_array().unwrap().len(), 10);
}

#[test]
fn test_task_set_and_done_persist() {
    let home = TempDir::new().unwrap();
    run_cli_success(home.path(), &["task", "set", "3", "Water plants"]);
    run_cli_success(home.path(), &["task", "done", "3"]);

    let stdout = run_cli_success(home.path(), &["task", "list", "--json"]);
    let tasks: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(tasks[2]["description"], "Water plants");
    assert_eq!(tasks[2]["completed"], true);
    assert_eq!(tasks[0]["description"], "");

    let stdout = run_cli_success(home.path(), &["task", "list"]);
    assert_contains(&stdout, " 3. [x] Water plants");
    assert_contains(&stdout, " 1. [ ] Task 1");
    assert_contains(&stdout, "1/10 done");
}

#[test]
fn test_task_slot_out_of_range_fails() {
    let home = TempDir::new().unwrap();
    let (_, _, code) = run_cli(home.path(), &["task", "set", "11", "Nope"]);
    assert_ne!(code, 0);
    let (_, _, code) = run_cli(home.path(), &["task", "done", "0"]);
    assert_ne!(code, 0);
}

#[test]
fn test_history_starts_empty() {
    let home = TempDir::new().unwrap();
    let stdout = run_cli_success(home.path(), &["history", "list"]);
    assert_contains(&stdout, "No sessions logged.");
    let stdout = run_cli_success(home.path(), &["history", "list", "--json"]);
    assert_eq!(stdout.trim(), "[]");
    let stdout = run_cli_success(home.path(), &["history", "clear"]);
    assert_contains(&stdout, "Cleared 0 session(s).");
}

#[test]
fn test_export_to_stdout() {
    let home = TempDir::new().unwrap();
    run_cli_success(home.path(), &["task", "set", "1", "Stretch"]);
    let stdout = run_cli_success(
        home.path(),
        &[
            "export",
            "--stdout",
            "--date",
            "2026-03-02",
            "--activity",
            "Thesis",
            "--reflection",
            "Sunny day",
        ],
    );
    assert!(stdout.starts_with("# Daily Summary - 2026-03-02\n"));
    assert_contains(&stdout, "## Main activity\nThesis\n");
    assert_contains(&stdout, "## Completed cycles\n0\n");
    assert_contains(&stdout, "- [ ] Stretch");
    assert_contains(&stdout, "## Gratitude and reflection\nSunny day\n");
}

#[test]
fn test_export_writes_markdown_file() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("exports");
    let stdout = run_cli_success(
        home.path(),
        &[
            "export",
            "--format",
            "md",
            "--date",
            "2026-03-02",
            "--out",
            out.to_str().unwrap(),
        ],
    );
    let path = out.join("Pomodoro_Summary_2026-03-02.md");
    assert_contains(&stdout, "Pomodoro_Summary_2026-03-02.md");
    let content = std::fs::read_to_string(path).unwrap();
    assert_contains(&content, "## Tasks of the day");
}

#[test]
fn test_export_print_view_without_opening() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("exports");
    run_cli_success(
        home.path(),
        &[
            "export",
            "--format",
            "print",
            "--no-open",
            "--date",
            "2026-03-02",
            "--out",
            out.to_str().unwrap(),
        ],
    );
    let html = std::fs::read_to_string(out.join("Pomodoro_Summary_2026-03-02.html")).unwrap();
    assert_contains(&html, "<pre style=\"font-family:monospace;\"># Daily Summary - 2026-03-02");
}

#[test]
fn test_export_rejects_long_reflection() {
    let home = TempDir::new().unwrap();
    let long = "a".repeat(501);
    let (_, stderr, code) = run_cli(home.path(), &["export", "--stdout", "--reflection", &long]);
    assert_ne!(code, 0);
    assert_contains(&stderr, "max 500");
}

#[test]
fn test_config_get_and_set() {
    let home = TempDir::new().unwrap();
    let stdout = run_cli_success(home.path(), &["config", "get", "schedule.long_break"]);
    assert_eq!(stdout.trim(), "20");

    run_cli_success(home.path(), &["config", "set", "schedule.focus_duration", "50"]);
    let stdout = run_cli_success(home.path(), &["config", "get", "schedule.focus_duration"]);
    assert_eq!(stdout.trim(), "50");
    assert!(home.path().join("config.toml").exists());
}

#[test]
fn test_config_unset_directory_prints_empty() {
    let home = TempDir::new().unwrap();
    let stdout = run_cli_success(home.path(), &["config", "get", "export.directory"]);
    assert_eq!(stdout.trim(), "");

    run_cli_success(home.path(), &["config", "set", "export.directory", "/tmp/summaries"]);
    let stdout = run_cli_success(home.path(), &["config", "get", "export.directory"]);
    assert_eq!(stdout.trim(), "/tmp/summaries");
}

#[test]
fn test_config_rejects_unknown_key_and_zero_duration() {
    let home = TempDir::new().unwrap();
    let (_, _, code) = run_cli(home.path(), &["config", "get", "schedule.nope"]);
    assert_ne!(code, 0);
    let (_, _, code) = run_cli(home.path(), &["config", "set", "schedule.short_break", "0"]);
    assert_ne!(code, 0);
}

#[test]
fn test_config_list_and_reset() {
    let home = TempDir::new().unwrap();
    run_cli_success(home.path(), &["config", "set", "notifications.sound", "false"]);
    let stdout = run_cli_success(home.path(), &["config", "list"]);
    assert_contains(&stdout, "[notifications]");
    assert_contains(&stdout, "sound = false");
    let on_disk = std::fs::read_to_string(home.path().join("config.toml")).unwrap();
    assert_eq!(stdout, on_disk);

    let stdout = run_cli_success(home.path(), &["config", "list", "--json"]);
    let config: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(config["notifications"]["sound"], false);

    run_cli_success(home.path(), &["config", "reset"]);
    let stdout = run_cli_success(home.path(), &["config", "get", "notifications.sound"]);
    assert_eq!(stdout.trim(), "true");
}

#[test]
fn test_run_quits_on_command() {
    let home = TempDir::new().unwrap();
    let (stdout, stderr, code) = run_cli_with_stdin(
        home.path(),
        &["run", "--json", "--activity", "Reading"],
        "p\nr\nq\n",
    );
    assert_eq!(code, 0, "{stderr}");

    let events: Vec<serde_json::Value> = stdout
        .lines()
        .filter_map(|l| serde_json::from_str(l).ok())
        .collect();
    let types: Vec<&str> = events.iter().filter_map(|e| e["type"].as_str()).collect();
    assert_eq!(types, vec!["timer_started", "timer_paused", "timer_reset"]);
    assert_eq!(events[0]["phase"], "focus");
    assert_eq!(events[0]["remaining_secs"], 1500);
}

#[test]
fn test_run_exits_when_input_closes_while_idle() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli_with_stdin(home.path(), &["run", "--json", "--no-autostart"], "");
    assert_eq!(code, 0, "{stderr}");
}

#[test]
fn test_run_can_edit_tasks() {
    let home = TempDir::new().unwrap();
    run_cli_success(home.path(), &["task", "set", "2", "Laundry"]);
    let (_, stderr, code) = run_cli_with_stdin(home.path(), &["run", "--no-autostart"], "x 2\nq\n");
    assert_eq!(code, 0, "{stderr}");

    let stdout = run_cli_success(home.path(), &["task", "list", "--json"]);
    let tasks: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(tasks[1]["completed"], true);
}
