//! CLI integration tests

use std::process::Command;

fn video_interview_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_video-interview"))
}

#[test]
fn help_output() {
    let output = video_interview_bin()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("interview"));
    assert!(stdout.contains("--questions"));
    assert!(stdout.contains("--countdown"));
    assert!(stdout.contains("--max-duration"));
    assert!(stdout.contains("--player"));
    assert!(stdout.contains("--json"));
    assert!(stdout.contains("--notify"));
}

#[test]
fn version_output() {
    let output = video_interview_bin()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("video-interview"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_path_command() {
    let output = video_interview_bin()
        .args(["config", "path"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("video-interview"));
    assert!(stdout.contains("config.toml"));
}

#[test]
fn config_help() {
    let output = video_interview_bin()
        .args(["config", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("init"));
    assert!(stdout.contains("set"));
    assert!(stdout.contains("get"));
    assert!(stdout.contains("list"));
    assert!(stdout.contains("path"));
}

#[test]
fn questions_lists_builtin_set() {
    let home = tempfile::tempdir().unwrap();
    let output = video_interview_bin()
        .arg("questions")
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("1. "), "got: {}", stdout);
    assert!(stdout.contains("\n2. "));
}

#[test]
fn questions_read_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("panel.txt");
    std::fs::write(&path, "# screening\nWhy this role?\nWhat did you ship last?\n").unwrap();

    let output = video_interview_bin()
        .arg("--questions")
        .arg(&path)
        .arg("questions")
        .env("XDG_CONFIG_HOME", dir.path())
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "1. Why this role?\n2. What did you ship last?\n");
}

#[test]
fn invalid_countdown_error() {
    let home = tempfile::tempdir().unwrap();
    let output = video_interview_bin()
        .args(["--countdown", "invalid"])
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid countdown"),
        "Expected error about invalid countdown, got: {}",
        stderr
    );
}

#[test]
fn countdown_over_limit_error() {
    let home = tempfile::tempdir().unwrap();
    let output = video_interview_bin()
        .args(["--countdown", "1m"])
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn missing_questions_file_error() {
    let home = tempfile::tempdir().unwrap();
    let output = video_interview_bin()
        .args(["--questions", "/nonexistent/questions.txt"])
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("questions file"), "got: {}", stderr);
}

// Valid arguments start a real capture session, so the interactive path is
// covered through the library with mock adapters instead.
