//! Integration tests for termdeck-cli
//!
//! These tests run the binary end-to-end: script replay, keybinding
//! listing, configuration output and error exit codes.

#![allow(clippy::uninlined_format_args)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper to run the CLI with given arguments
fn run_cli(args: &[&str], config_dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_termdeck"))
        .env("TERMDECK_CONFIG_DIR", config_dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

/// Helper to get stdout as string
fn stdout_str(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Helper to get stderr as string
fn stderr_str(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn write_script(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("script.toml");
    std::fs::write(&path, content).expect("Failed to write script");
    path
}

// ============================================================================
// Help Command Tests
// ============================================================================

#[test]
fn test_help_command() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&["--help"], dir.path());

    assert!(output.status.success(), "Help command should succeed");
    let stdout = stdout_str(&output);
    for command in ["run", "keys", "config", "completions"] {
        assert!(stdout.contains(command), "Help should mention {}", command);
    }
}

// ============================================================================
// Run Command Tests
// ============================================================================

#[test]
fn test_run_prints_layout() {
    let dir = TempDir::new().unwrap();
    let script = write_script(
        &dir,
        r#"
        [[command]]
        op = "new-local-tab"

        [[command]]
        op = "split-pane"
        direction = "vertical"

        [[command]]
        op = "bind-local"

        [[command]]
        op = "split-group"
        direction = "horizontal"
        "#,
    );

    let output = run_cli(&["run", script.to_str().unwrap()], dir.path());

    assert!(output.status.success(), "stderr: {}", stderr_str(&output));
    let stdout = stdout_str(&output);
    assert!(stdout.contains("new-local-tab"));
    assert!(stdout.contains("split horizontal") || stdout.contains(" horizontal [50, 50]"));
    assert!(stdout.contains("(no tabs)"));
    assert!(stdout.contains("live sessions (2):"));
}

#[test]
fn test_run_json_output() {
    let dir = TempDir::new().unwrap();
    let script = write_script(
        &dir,
        r#"
        [[command]]
        op = "open-settings"

        [[command]]
        action = "win.local-shell"
        "#,
    );

    let output = run_cli(
        &["run", script.to_str().unwrap(), "--format", "json"],
        dir.path(),
    );

    assert!(output.status.success(), "stderr: {}", stderr_str(&output));
    let report: serde_json::Value =
        serde_json::from_str(&stdout_str(&output)).expect("Output should be JSON");
    assert_eq!(report["steps"].as_array().unwrap().len(), 2);
    assert_eq!(report["live_sessions"].as_array().unwrap().len(), 1);
    let tabs = report["workspace"]["groups"][0]["tabs"].as_array().unwrap();
    assert_eq!(tabs.len(), 2);
    assert_eq!(tabs[0]["kind"], "settings");
}

#[test]
fn test_run_uses_configured_titles() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[tabs]\nlocal_title = \"zsh\"\n",
    )
    .unwrap();
    let script = write_script(&dir, "[[command]]\nop = \"new-local-tab\"\n");

    let output = run_cli(&["run", script.to_str().unwrap()], dir.path());

    assert!(output.status.success());
    assert!(stdout_str(&output).contains("\"zsh\""));
}

#[test]
fn test_run_failing_creates_exit_code() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "[[command]]\nop = \"new-local-tab\"\n");

    let output = run_cli(
        &["run", script.to_str().unwrap(), "--fail-creates"],
        dir.path(),
    );

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_str(&output).contains("failed: create-pty"));
    assert!(stdout_str(&output).contains("live sessions: none"));
}

#[test]
fn test_run_bad_script_exit_code() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "[[command]]\nop = \"warp-drive\"\n");

    let output = run_cli(&["run", script.to_str().unwrap()], dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_str(&output).contains("Script error"));
}

#[test]
fn test_run_quiet_suppresses_output() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "[[command]]\nop = \"new-local-tab\"\n");

    let output = run_cli(&["--quiet", "run", script.to_str().unwrap()], dir.path());

    assert!(output.status.success());
    assert!(stdout_str(&output).is_empty());
}

// ============================================================================
// Keys and Config Command Tests
// ============================================================================

#[test]
fn test_keys_lists_overrides() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[keybindings.overrides]\n\"win.next-tab\" = \"<Alt>Right\"\n",
    )
    .unwrap();

    let output = run_cli(&["keys"], dir.path());

    assert!(output.status.success());
    let stdout = stdout_str(&output);
    assert!(stdout.contains("Pane Groups"));
    assert!(stdout.contains("<Alt>Right"));
}

#[test]
fn test_config_prints_defaults() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&["config", "--defaults"], dir.path());

    assert!(output.status.success());
    let stdout = stdout_str(&output);
    assert!(stdout.contains("[tabs]"));
    assert!(stdout.contains("local_title = \"Local Shell\""));
}

#[test]
fn test_invalid_config_exit_code() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[tabs\n").unwrap();

    let output = run_cli(&["config"], dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_str(&output).contains("Configuration error"));
}

#[test]
fn test_completions_bash() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&["completions", "bash"], dir.path());

    assert!(output.status.success());
    assert!(stdout_str(&output).contains("termdeck"));
}
