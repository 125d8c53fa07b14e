//! End-to-end checks for everything that works without a backend.

use assert_cmd::Command;
use std::path::Path;

fn eegview(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("eegview").unwrap();
    cmd.current_dir(dir);
    // Keep host configuration out of the tests.
    cmd.env_remove("EEGVIEW_BASE_URL");
    cmd.env_remove("EEGVIEW_SOCKET_URL");
    cmd.env_remove("EEGVIEW_MAX_UPLOAD_MB");
    cmd.env_remove("EEGVIEW_ANALYSIS_TIMEOUT_SECS");
    cmd.env_remove("EEGVIEW_RECONNECT_ATTEMPTS");
    cmd
}

fn stdout_of(assert: assert_cmd::assert::Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stdout).to_string()
}

#[test]
fn init_creates_the_profile_once() {
    let dir = tempfile::tempdir().unwrap();

    eegview(dir.path()).arg("init").assert().success();
    assert!(dir.path().join(".eegview/settings.json").exists());
    assert!(dir.path().join(".eegview/theme.json").exists());
    assert!(dir.path().join(".eegview/config.toml").exists());

    // A second init refuses without --force.
    eegview(dir.path()).arg("init").assert().failure();
    eegview(dir.path()).args(["init", "--force"]).assert().success();
}

#[test]
fn commands_outside_a_profile_fail_with_guidance() {
    let dir = tempfile::tempdir().unwrap();
    let assert = eegview(dir.path()).arg("status").assert().failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("eegview init"));
}

#[test]
fn settings_set_persists_across_invocations() {
    let dir = tempfile::tempdir().unwrap();
    eegview(dir.path()).arg("init").assert().success();

    eegview(dir.path())
        .args(["settings", "set", "filter-low", "2"])
        .assert()
        .success();

    let stdout = stdout_of(
        eegview(dir.path())
            .args(["--json", "settings", "show"])
            .assert()
            .success(),
    );
    let doc: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(doc["data"]["filterRange"][0], 2.0);
    assert_eq!(doc["data"]["filterRange"][1], 40.0);
}

#[test]
fn invalid_settings_are_rejected_and_not_saved() {
    let dir = tempfile::tempdir().unwrap();
    eegview(dir.path()).arg("init").assert().success();

    // Default high edge is 40; a low edge of 50 inverts the range.
    eegview(dir.path())
        .args(["settings", "set", "filter-low", "50"])
        .assert()
        .failure();

    let stdout = stdout_of(
        eegview(dir.path())
            .args(["--json", "settings", "show"])
            .assert()
            .success(),
    );
    // The stored settings still hold the default low edge.
    let doc: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(doc["data"]["filterRange"][0], 1.0);
}

#[test]
fn custom_band_grammar_is_enforced_at_set_time() {
    let dir = tempfile::tempdir().unwrap();
    eegview(dir.path()).arg("init").assert().success();

    eegview(dir.path())
        .args(["settings", "set", "type", "custom"])
        .assert()
        .failure(); // custom without bands is invalid

    eegview(dir.path())
        .args(["settings", "set", "bands", "delta:1-4,theta:4-8"])
        .assert()
        .success();
    eegview(dir.path())
        .args(["settings", "set", "type", "custom"])
        .assert()
        .success();

    eegview(dir.path())
        .args(["settings", "set", "bands", "delta:4-1"])
        .assert()
        .failure();
}

#[test]
fn theme_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    eegview(dir.path()).arg("init").assert().success();

    eegview(dir.path())
        .args(["theme", "set", "dark"])
        .assert()
        .success();

    let stdout = stdout_of(
        eegview(dir.path())
            .args(["--json", "theme", "show"])
            .assert()
            .success(),
    );
    assert!(stdout.contains("\"preference\": \"dark\""));
    assert!(stdout.contains("#1F2937"));
}

#[test]
fn upload_rejects_bad_extensions_locally() {
    let dir = tempfile::tempdir().unwrap();
    eegview(dir.path()).arg("init").assert().success();
    std::fs::write(dir.path().join("notes.txt"), b"not a recording").unwrap();

    let assert = eegview(dir.path())
        .args(["upload", "notes.txt"])
        .assert()
        .failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains(".edf"));
}

#[test]
fn status_reports_empty_state() {
    let dir = tempfile::tempdir().unwrap();
    eegview(dir.path()).arg("init").assert().success();

    let stdout = stdout_of(eegview(dir.path()).arg("status").assert().success());
    assert!(stdout.contains("No dataset uploaded"));
    assert!(stdout.contains("No analysis results"));
    assert!(stdout.contains("http://localhost:5000"));
}

#[test]
fn show_without_results_points_at_analyze() {
    let dir = tempfile::tempdir().unwrap();
    eegview(dir.path()).arg("init").assert().success();

    let assert = eegview(dir.path()).arg("show").assert().failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("eegview analyze"));
}
