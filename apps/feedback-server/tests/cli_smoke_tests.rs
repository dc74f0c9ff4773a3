//! CLI smoke tests for the feedback-server binary
//!
//! These tests verify help output, configuration validation and that the
//! server actually starts with an in-memory database.

use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::timeout;

fn run_feedback_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_feedback-server"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute feedback-server")
}

async fn run_feedback_server_with_timeout(
    args: &[&str],
    timeout_duration: Duration,
) -> Result<std::process::Output, Box<dyn std::error::Error>> {
    let mut cmd = tokio::process::Command::new(env!("CARGO_BIN_EXE_feedback-server"));
    cmd.args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    match timeout(timeout_duration, cmd.output()).await {
        Ok(result) => result.map_err(|e| e.into()),
        Err(elapsed) => Err(elapsed.into()),
    }
}

/// Config whose home_dir lives inside the temp dir so logs and databases stay there.
fn write_config(dir: &Path, name: &str, body: &str) -> String {
    let home = dir.join("home").to_string_lossy().replace('\\', "/");
    let content = format!("server:\n  home_dir: \"{home}\"\n  host: \"127.0.0.1\"\n  port: 0\n{body}");
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write config file");
    path.to_string_lossy().to_string()
}

#[test]
fn test_cli_help_command() {
    let output = run_feedback_server(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("feedback-server"), "Should contain binary name");
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("--config"), "Should mention config option");
    assert!(stdout.contains("--mock"), "Should mention mock option");
}

#[test]
fn test_cli_version_command() {
    let output = run_feedback_server(&["--version"]);

    assert!(output.status.success(), "Version command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("feedback-server 0.1.0"));
}

#[test]
fn test_cli_invalid_command() {
    let output = run_feedback_server(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"), "unexpected stderr: {stderr}");
}

#[test]
fn test_cli_config_validation_missing_file() {
    for flag in ["--config", "-c"] {
        let output = run_feedback_server(&[flag, "/nonexistent/config.yaml", "check"]);

        assert!(!output.status.success(), "Should fail with missing config");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(
            stderr.contains("config file not found"),
            "Should mention config file issue: {stderr}"
        );
    }
}

#[test]
fn test_cli_config_validation_invalid_yaml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("invalid.yaml");
    std::fs::write(&config_path, "invalid: yaml: content: [unclosed")
        .expect("Failed to write file");

    let output = run_feedback_server(&["--config", config_path.to_str().unwrap(), "check"]);

    assert!(!output.status.success(), "Should fail with invalid YAML");
}

#[test]
fn test_cli_config_validation_valid_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        temp_dir.path(),
        "valid.yaml",
        r#"
database:
  url: "sqlite://database/feedback.db"

logging:
  default:
    console_level: info
    file: "logs/feedback.log"
    file_level: info
    max_backups: 3
    max_size_mb: 100

modules:
  feedback_mgt:
    default_search_limit: 50
"#,
    );

    let output = run_feedback_server(&["--config", &config_path, "check"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "Should succeed with valid config: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.contains("Configuration check passed"));
    assert!(stdout.contains("default_search_limit: 50"));
}

#[test]
fn test_cli_check_rejects_bad_module_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        temp_dir.path(),
        "bad-module.yaml",
        r#"
modules:
  feedback_mgt:
    default_search_limit: "lots"
"#,
    );

    let output = run_feedback_server(&["--config", &config_path, "check"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("feedback_mgt"), "unexpected stderr: {stderr}");
}

#[test]
fn test_cli_check_rejects_unsupported_database() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        temp_dir.path(),
        "mysql.yaml",
        "database:\n  url: \"mysql://localhost/feedback\"\n",
    );

    let output = run_feedback_server(&["--config", &config_path, "check"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unsupported database type"), "unexpected stderr: {stderr}");

    // --mock ignores the configured database entirely
    let output = run_feedback_server(&["--config", &config_path, "--mock", "check"]);
    assert!(output.status.success());
}

#[test]
fn test_cli_print_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(temp_dir.path(), "print.yaml", "");

    let output = run_feedback_server(&["--config", &config_path, "--port", "9191", "--print-config"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("port: 9191"), "unexpected stdout: {stdout}");
}

#[tokio::test]
async fn test_cli_run_command_with_mock_database() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(temp_dir.path(), "run.yaml", "");

    let result = run_feedback_server_with_timeout(
        &["--config", &config_path, "--mock", "run"],
        Duration::from_secs(5),
    )
    .await;

    match result {
        // still serving when the timeout hit
        Err(err) => assert!(
            err.to_string().contains("elapsed"),
            "Server failed to start: {err}"
        ),
        Ok(output) => panic!(
            "Server exited early: {}",
            String::from_utf8_lossy(&output.stderr)
        ),
    }
}

#[test]
fn test_cli_run_rejects_invalid_bind_address() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let home = temp_dir.path().join("home").to_string_lossy().replace('\\', "/");
    let config_path = temp_dir.path().join("bad-host.yaml");
    std::fs::write(
        &config_path,
        format!("server:\n  home_dir: \"{home}\"\n  host: \"not an address\"\n  port: 8087\n"),
    )
    .expect("Failed to write config file");

    let output = run_feedback_server(&["--config", config_path.to_str().unwrap(), "--mock", "run"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid bind address"), "unexpected stderr: {stderr}");
}

#[test]
fn test_cli_subcommand_help() {
    let output = run_feedback_server(&["run", "--help"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Start the server"));

    let output = run_feedback_server(&["check", "--help"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Check configuration"));
}
