//! Basic CLI E2E tests.
//!
//! Tests run the built binary against a throwaway data directory and verify
//! outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(data_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_monday-cli"))
        .args(args)
        .env("MONDAY_DATA_DIR", data_dir)
        .env("RUST_LOG", "off")
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
fn test_checkin_then_duplicate() {
    let dir = tempfile::tempdir().unwrap();

    let (code, stdout, _) = run_cli(dir.path(), &["checkin", "u1", "--today", "2024-03-04"]);
    assert_eq!(code, 0, "checkin failed");
    let reply = parse_json(&stdout);
    assert_eq!(reply["evaluation"]["newStreak"], 1);
    assert_eq!(reply["evaluation"]["increased"], true);
    assert_eq!(reply["evaluation"]["outcome"], "updated");
    assert_eq!(reply["category"]["category"], "first_streak");

    let (code, stdout, _) = run_cli(dir.path(), &["checkin", "u1", "--today", "2024-03-04"]);
    assert_eq!(code, 0);
    let reply = parse_json(&stdout);
    assert_eq!(reply["evaluation"]["outcome"], "duplicate");
    assert_eq!(reply["evaluation"]["increased"], false);
    assert_eq!(reply["speech"]["shouldEndSession"], true);
}

#[test]
fn test_checkin_next_day_extends() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["checkin", "u1", "--today", "2024-03-04"]);
    let (code, stdout, _) = run_cli(dir.path(), &["checkin", "u1", "--today", "2024-03-05"]);
    assert_eq!(code, 0);
    let reply = parse_json(&stdout);
    assert_eq!(reply["evaluation"]["newStreak"], 2);
    assert!(reply["speech"]["ssml"].as_str().unwrap().contains("2-day streak"));
}

#[test]
fn test_checkin_rejects_bad_date() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(dir.path(), &["checkin", "u1", "--today", "March 4th"]);
    assert_ne!(code, 0);
}

#[test]
fn test_checkin_rejects_empty_user() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["checkin", "", "--today", "2024-03-04"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_streak_show_and_reset() {
    let dir = tempfile::tempdir().unwrap();

    let (code, stdout, _) = run_cli(dir.path(), &["streak", "show", "u1"]);
    assert_eq!(code, 0);
    assert_eq!(parse_json(&stdout), serde_json::Value::Null);

    run_cli(dir.path(), &["checkin", "u1", "--today", "2024-03-04"]);
    let (_, stdout, _) = run_cli(dir.path(), &["streak", "show", "u1"]);
    let record = parse_json(&stdout);
    assert_eq!(record["userId"], "u1");
    assert_eq!(record["lastCheckDate"], "2024-03-04");
    assert_eq!(record["streak"], 1);

    let (code, stdout, _) = run_cli(dir.path(), &["streak", "reset", "u1"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("streak reset"));
    let (_, stdout, _) = run_cli(dir.path(), &["streak", "show", "u1"]);
    assert_eq!(parse_json(&stdout), serde_json::Value::Null);
}

#[test]
fn test_invoke_event_file() {
    let dir = tempfile::tempdir().unwrap();
    let event_path = dir.path().join("event.json");
    std::fs::write(
        &event_path,
        r#"{
            "request": { "type": "LaunchRequest" },
            "session": { "user": { "userId": "voice-user" } },
            "context": { "System": { "device": { "supportedInterfaces": {
                "Alexa.Presentation.APL": { "runtime": { "maxVersion": "1.1" } }
            } } } }
        }"#,
    )
    .unwrap();

    let (code, stdout, _) = run_cli(
        dir.path(),
        &["invoke", "--event", event_path.to_str().unwrap(), "--today", "2024-03-04"],
    );
    assert_eq!(code, 0);
    let envelope = parse_json(&stdout);
    assert_eq!(envelope["version"], "1.0");
    assert_eq!(envelope["response"]["shouldEndSession"], false);
    assert_eq!(envelope["response"]["outputSpeech"]["type"], "SSML");
    assert_eq!(
        envelope["response"]["directives"][0]["datasources"]["payload"]["meter"]["level"],
        1
    );
}

#[test]
fn test_invoke_garbage_gets_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let event_path = dir.path().join("event.json");
    std::fs::write(&event_path, "not json at all").unwrap();

    let (code, stdout, _) =
        run_cli(dir.path(), &["invoke", "--event", event_path.to_str().unwrap()]);
    assert_eq!(code, 0);
    let envelope = parse_json(&stdout);
    assert_eq!(envelope["response"]["outputSpeech"]["type"], "PlainText");
    assert_eq!(envelope["response"]["shouldEndSession"], true);
}

#[test]
fn test_invoke_unopenable_store_gets_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();
    let db_path = blocker.join("streaks.db");

    let (code, _, _) = run_cli(
        dir.path(),
        &["config", "set", "store.path", db_path.to_str().unwrap()],
    );
    assert_eq!(code, 0);

    let event_path = dir.path().join("event.json");
    std::fs::write(
        &event_path,
        r#"{ "request": { "type": "LaunchRequest" }, "session": { "user": { "userId": "u1" } } }"#,
    )
    .unwrap();

    let (code, stdout, stderr) =
        run_cli(dir.path(), &["invoke", "--event", event_path.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert!(!stderr.contains("error:"));
    let envelope = parse_json(&stdout);
    assert_eq!(envelope["response"]["outputSpeech"]["type"], "PlainText");
    assert_eq!(
        envelope["response"]["outputSpeech"]["text"],
        "Something exploded. Monday is reviewing the damage."
    );
    assert_eq!(envelope["response"]["shouldEndSession"], true);
}

#[test]
fn test_config_get_set() {
    let dir = tempfile::tempdir().unwrap();

    let (code, stdout, _) = run_cli(dir.path(), &["config", "get", "voice.name"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "Joanna");

    let (code, _, _) = run_cli(dir.path(), &["config", "set", "voice.name", "Matthew"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(dir.path(), &["config", "get", "voice.name"]);
    assert_eq!(stdout.trim(), "Matthew");

    let (code, _, _) = run_cli(dir.path(), &["config", "set", "voice.accent", "southern"]);
    assert_ne!(code, 0);

    let (code, stdout, _) = run_cli(dir.path(), &["config", "reset"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("reset"));
    let (_, stdout, _) = run_cli(dir.path(), &["config", "get", "voice.name"]);
    assert_eq!(stdout.trim(), "Joanna");
}

#[test]
fn test_memory_backend_forgets_between_runs() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["config", "set", "store.backend", "memory"]);

    run_cli(dir.path(), &["checkin", "u1", "--today", "2024-03-04"]);
    let (_, stdout, _) = run_cli(dir.path(), &["checkin", "u1", "--today", "2024-03-04"]);
    assert_eq!(parse_json(&stdout)["evaluation"]["outcome"], "updated");
}
