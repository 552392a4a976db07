//! Error scenario integration tests

use std::process::Command;

fn video_interview_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_video-interview"))
}

#[test]
fn config_get_unknown_key() {
    let output = video_interview_bin()
        .args(["config", "get", "unknown_key"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown") || stderr.contains("Valid"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_set_unknown_key() {
    let output = video_interview_bin()
        .args(["config", "set", "unknown_key", "value"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown") || stderr.contains("Valid"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_max_duration() {
    let output = video_interview_bin()
        .args(["config", "set", "max_duration", "forever"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("max_duration"),
        "Expected error about max_duration, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_boolean() {
    let output = video_interview_bin()
        .args(["config", "set", "notify", "maybe"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("true") || stderr.contains("false"),
        "Expected error about invalid boolean, got: {}",
        stderr
    );
}

#[test]
fn config_list_with_no_file() {
    let home = tempfile::tempdir().unwrap();
    let output = video_interview_bin()
        .args(["config", "list"])
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("not set"), "got: {}", stdout);
    assert!(stdout.contains("capture.video_device"));
}
