//! Integration tests for top-level CLI behavior.

use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::Utc;
use serde_json::json;

use listwise::cassette::{Cassette, Interaction};
use listwise::ports::{RemoteRequest, RemoteResponse};

fn listwise(args: &[&str], replay: Option<&Path>) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_listwise");
    let mut command = Command::new(bin);
    command
        .args(args)
        // Nothing in these tests may reach a real store.
        .env("LISTWISE_API_URL", "http://127.0.0.1:9")
        .env("LISTWISE_TIMEOUT_SECS", "2")
        .env_remove("LISTWISE_RECORD")
        .env_remove("LISTWISE_REPLAY");
    if let Some(path) = replay {
        command.env("LISTWISE_REPLAY", path);
    }
    command.output().expect("failed to run listwise binary")
}

fn interaction(
    seq: u64,
    request: RemoteRequest,
    status: u16,
    body: serde_json::Value,
) -> Interaction {
    Interaction::new(seq, request, Ok(RemoteResponse { status, body }))
}

fn write_cassette(name: &str, interactions: Vec<Interaction>) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("listwise_cli_{name}"));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("remote.cassette.yaml");
    Cassette {
        name: name.into(),
        recorded_at: Utc::now(),
        base_url: "http://store.test".into(),
        interactions,
    }
    .save(&path)
    .unwrap();
    path
}

#[test]
fn lists_show_replays_recorded_store() {
    let path = write_cassette(
        "lists_show",
        vec![interaction(
            0,
            RemoteRequest::get("/lists"),
            200,
            json!([{"id": "1", "name": "Home"}, {"id": "2", "name": "Work"}]),
        )],
    );

    let output = listwise(&["lists"], Some(&path));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(stdout, "    1  Home\n    2  Work\n");
}

#[test]
fn todos_show_renders_placeholders() {
    let path = write_cassette(
        "todos_show",
        vec![
            interaction(0, RemoteRequest::get("/lists/1"), 200, json!({"id": "1", "name": "Home"})),
            interaction(
                1,
                RemoteRequest::get("/todos"),
                200,
                json!([
                    {
                        "id": "1",
                        "title": "Buy milk",
                        "priority": null,
                        "dueDate": "not a date",
                        "listId": 1
                    },
                    {"id": "2", "title": "Elsewhere", "listId": "2"}
                ]),
            ),
        ],
    );

    let output = listwise(&["todos"], Some(&path));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.starts_with("Home (1 todos)\n"));
    assert!(stdout.contains("#1 Buy milk [low]"));
    assert!(stdout.contains("No description provided"));
    assert!(stdout.contains("Due: No date"));
    assert!(!stdout.contains("Elsewhere"));
}

#[test]
fn invalid_todo_is_rejected_before_any_request() {
    let output = listwise(&["todos", "add", "--estimate=-2"], None);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("title: Title is required (REQUIRED_FIELD)"));
    assert!(stderr.contains("estimatedTime: Must be a positive number (OUT_OF_RANGE)"));
}

#[test]
fn missing_record_is_reported() {
    let path = write_cassette(
        "not_found",
        vec![interaction(0, RemoteRequest::delete("/lists/2"), 404, json!("Not found"))],
    );

    let output = listwise(&["lists", "rm", "2"], Some(&path));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("list 2 not found"));
}

#[test]
fn bad_configuration_fails_fast() {
    let output = Command::new(env!("CARGO_BIN_EXE_listwise"))
        .arg("lists")
        .env("LISTWISE_TIMEOUT_SECS", "soon")
        .env_remove("LISTWISE_RECORD")
        .env_remove("LISTWISE_REPLAY")
        .output()
        .expect("failed to run listwise binary");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("LISTWISE_TIMEOUT_SECS"));
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let output = listwise(&["nonsense"], None);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
}
