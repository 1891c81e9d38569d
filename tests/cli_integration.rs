//! Integration tests for the `tb` CLI.
//!
//! Each test creates a temp data directory, runs `tb` as a subprocess,
//! and verifies stdout and/or file contents.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Get the path to the built `tb` binary.
fn tb_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("tb");
    path
}

/// Run `tb` as `alice` against `dir`, returning (stdout, stderr, success).
fn run_tb(dir: &Path, args: &[&str]) -> (String, String, bool) {
    run_tb_as(dir, "alice", "s3cret", args)
}

fn run_tb_as(dir: &Path, user: &str, password: &str, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(tb_bin())
        .args(["-C", dir.to_str().unwrap(), "-u", user, "-p", password])
        .args(args)
        .env_remove("TASKBOOK_DIR")
        .env_remove("TASKBOOK_USER")
        .env_remove("TASKBOOK_PASSWORD")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run tb");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `tb` expecting success, return stdout.
fn run_tb_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_tb(dir, args);
    if !success {
        panic!(
            "tb {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// A data directory with `alice` registered and three tasks added.
fn setup() -> tempfile::TempDir {
    let tmp = tempfile::TempDir::new().unwrap();
    run_tb_ok(tmp.path(), &["register"]);
    run_tb_ok(
        tmp.path(),
        &["add", "Feb low", "--due", "2024-02-01", "--priority", "low"],
    );
    run_tb_ok(
        tmp.path(),
        &["add", "Feb high", "--due", "2024-02-01", "--priority", "HIGH"],
    );
    run_tb_ok(
        tmp.path(),
        &["add", "Jan", "--due", "2024-01-01", "-d", "quarterly report"],
    );
    tmp
}

fn listed_titles(out: &str) -> Vec<String> {
    let parsed: serde_json::Value = serde_json::from_str(out).unwrap();
    parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

#[test]
fn test_register_creates_layout() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_tb_ok(tmp.path(), &["register"]);
    assert!(out.contains("registered alice"));
    assert_eq!(
        fs::read_to_string(tmp.path().join("users.txt")).unwrap(),
        "alice|s3cret\n"
    );
    assert!(tmp.path().join("UserData").is_dir());
}

#[test]
fn test_register_duplicate_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_tb_ok(tmp.path(), &["register"]);
    let (_, stderr, success) = run_tb_as(tmp.path(), "ALICE", "other", &["register"]);
    assert!(!success);
    assert!(stderr.contains("already exists"));
}

#[test]
fn test_login() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_tb_ok(tmp.path(), &["register"]);

    let (out, _, success) = run_tb_as(tmp.path(), "Alice", "s3cret", &["login"]);
    assert!(success);
    assert!(out.contains("logged in as alice"));

    let (_, stderr, success) = run_tb_as(tmp.path(), "alice", "S3CRET", &["login"]);
    assert!(!success);
    assert!(stderr.contains("invalid username or password"));
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[test]
fn test_list_sorted() {
    let tmp = setup();
    let out = run_tb_ok(tmp.path(), &["list", "--json"]);
    assert_eq!(listed_titles(&out), vec!["Jan", "Feb high", "Feb low"]);

    let text = run_tb_ok(tmp.path(), &["list"]);
    assert!(text.contains("  1. [ ] 2024-01-01 MEDIUM Jan  (quarterly report)"));
}

#[test]
fn test_search() {
    let tmp = setup();
    let out = run_tb_ok(tmp.path(), &["list", "--search", "REPORT", "--json"]);
    assert_eq!(listed_titles(&out), vec!["Jan"]);
}

#[test]
fn test_toggle_hides_then_all_shows() {
    let tmp = setup();
    let out = run_tb_ok(tmp.path(), &["toggle", "1"]);
    assert!(out.contains("completed: Jan"));

    let pending = run_tb_ok(tmp.path(), &["list", "--json"]);
    assert_eq!(listed_titles(&pending), vec!["Feb high", "Feb low"]);

    let all = run_tb_ok(tmp.path(), &["list", "--all", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&all).unwrap();
    assert_eq!(parsed[0]["title"], "Jan");
    assert_eq!(parsed[0]["completed"], true);
    assert!(parsed[0]["completed_at"].is_string());

    let back = run_tb_ok(tmp.path(), &["toggle", "1", "--all"]);
    assert!(back.contains("pending: Jan"));
}

#[test]
fn test_delete() {
    let tmp = setup();
    let out = run_tb_ok(tmp.path(), &["delete", "2"]);
    assert!(out.contains("deleted: Feb high"));

    let remaining = run_tb_ok(tmp.path(), &["list", "--all", "--json"]);
    assert_eq!(listed_titles(&remaining), vec!["Jan", "Feb low"]);

    let file = fs::read_to_string(tmp.path().join("UserData/alice.txt")).unwrap();
    assert_eq!(file.lines().count(), 2);
}

#[test]
fn test_pick_out_of_range() {
    let tmp = setup();
    let (_, stderr, success) = run_tb(tmp.path(), &["toggle", "9"]);
    assert!(!success);
    assert!(stderr.contains("no task #9"));
}

#[test]
fn test_add_requires_title_text() {
    let tmp = setup();
    let (_, stderr, success) = run_tb(tmp.path(), &["add", "   "]);
    assert!(!success);
    assert!(stderr.contains("title is required"));
}

#[test]
fn test_unknown_user_cannot_list() {
    let tmp = setup();
    let (_, _, success) = run_tb_as(tmp.path(), "mallory", "s3cret", &["list"]);
    assert!(!success);
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

#[test]
fn test_history_newest_first() {
    let tmp = setup();
    run_tb_ok(tmp.path(), &["delete", "1"]);

    let out = run_tb_ok(tmp.path(), &["history", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    let commands: Vec<&str> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["command"].as_str().unwrap())
        .collect();
    assert_eq!(
        commands,
        vec![
            "Deleted task: Jan",
            "Added task: Jan",
            "Added task: Feb high",
            "Added task: Feb low",
        ]
    );
}

#[test]
fn test_config_window_zero_hides_history() {
    let tmp = setup();
    fs::write(
        tmp.path().join("taskbook.toml"),
        "[audit]\nrecent_window_hours = 0\n",
    )
    .unwrap();
    // Entries from this same second still fall inside a zero-length window,
    // so backdate the log instead of racing the clock.
    let log = fs::read_to_string(tmp.path().join("command_log.txt")).unwrap();
    let backdated: String = log
        .lines()
        .map(|l| format!("2000-01-01 00:00:00{}\n", &l[19..]))
        .collect();
    fs::write(tmp.path().join("command_log.txt"), backdated).unwrap();

    let out = run_tb_ok(tmp.path(), &["history"]);
    assert_eq!(out, "no recent activity\n");
}
