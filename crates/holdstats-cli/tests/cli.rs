#![allow(deprecated)]
//! Contract tests for the `holdstats` binary: exit codes, output formats and
//! an end-to-end run against mocked holder and scoring APIs.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::path::Path;
use tempfile::tempdir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENV_VARS: [&str; 7] = [
    "HOLDSTATS_SOURCE_URL",
    "HOLDSTATS_SCORER_URL",
    "HOLDSTATS_TOKEN",
    "HOLDSTATS_TIMEOUT",
    "HOLDSTATS_CONFIG",
    "HOLDSTATS_STORE",
    "HOLDSTATS_FRESHNESS_HOURS",
];

fn holdstats(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("holdstats").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG");
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn holdstats_against(dir: &Path, server_uri: &str) -> Command {
    let mut cmd = holdstats(dir);
    cmd.env("HOLDSTATS_SOURCE_URL", server_uri)
        .env("HOLDSTATS_SCORER_URL", server_uri)
        .env("HOLDSTATS_TIMEOUT", "5");
    cmd
}

async fn mount_collection(server: &MockServer, scores: &[(&str, f64)]) {
    let addresses: Vec<&str> = scores.iter().map(|(a, _)| *a).collect();

    Mock::given(method("GET"))
        .and(path("/collections/78"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "holders_count": scores.len() })),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/collections/78/holders"))
        .and(query_param("limit", scores.len().to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "holders": addresses })))
        .mount(server)
        .await;

    for (address, score) in scores {
        Mock::given(method("GET"))
            .and(path(format!("/holders/{address}/score")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "score": score })))
            .expect(1)
            .mount(server)
            .await;
    }
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

#[test]
fn test_version() {
    let dir = tempdir().unwrap();
    holdstats(dir.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cache_list_empty_ephemeral() {
    let dir = tempdir().unwrap();
    holdstats(dir.path())
        .args(["cache", "list", "--ephemeral"])
        .assert()
        .success()
        .stderr(predicate::str::contains("no cached scores in memory"));
}

#[test]
fn test_unsupported_config_version_exits_2() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("holdstats.yaml"), "version: 2\n").unwrap();

    holdstats(dir.path())
        .args(["cache", "list", "--ephemeral"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unsupported config version 2"));
}

#[test]
fn test_missing_explicit_config_exits_2() {
    let dir = tempdir().unwrap();
    holdstats(dir.path())
        .args(["--config", "absent.yaml", "cache", "list", "--ephemeral"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to read config"));
}

#[test]
fn test_zero_freshness_window_exits_2() {
    let dir = tempdir().unwrap();
    holdstats(dir.path())
        .args(["stats", "78", "--ephemeral", "--freshness-hours", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("freshness window must be positive"));
}

#[test]
fn test_unreachable_source_exits_1() {
    let dir = tempdir().unwrap();
    holdstats_against(dir.path(), "http://127.0.0.1:1")
        .args(["stats", "78", "--ephemeral"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("resolve: source.holders_count"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stats_json_then_served_from_store() {
    let server = MockServer::start().await;
    mount_collection(&server, &[("0xa", 5.0), ("0xb", 15.0), ("0xc", 95.0)]).await;

    let dir = tempdir().unwrap();
    let root = dir.path().to_path_buf();
    let uri = server.uri();

    let (first, second, cached) = tokio::task::spawn_blocking(move || {
        let run = |args: &[&str]| {
            let output = holdstats_against(&root, &uri).args(args).output().unwrap();
            assert!(
                output.status.success(),
                "holdstats {:?} failed: {}",
                args,
                String::from_utf8_lossy(&output.stderr)
            );
            stdout_json(&output)
        };
        (
            run(&["stats", "78", "--format", "json"]),
            run(&["stats", "78", "--format", "json"]),
            run(&["cache", "list", "--format", "json"]),
        )
    })
    .await
    .unwrap();

    assert_eq!(first["collection"], "78");
    assert_eq!(first["holders_count"], 3);
    assert_eq!(first["distribution"]["total"], 3);

    let buckets = first["distribution"]["buckets"].as_array().unwrap();
    assert_eq!(buckets.len(), 10);
    assert_eq!(buckets[0]["label"], "0-10");
    assert_eq!(buckets[0]["holders"], 1);
    assert_eq!(buckets[1]["holders"], 1);
    assert_eq!(buckets[9]["label"], "90+");
    assert_eq!(buckets[9]["holders"], 1);

    assert_eq!(first, second);
    assert_eq!(cached.as_array().unwrap().len(), 3);
    assert!(dir.path().join(".holdstats/scores.db").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_holders_text_output() {
    let server = MockServer::start().await;
    mount_collection(&server, &[("0xa", 12.0), ("0xbb", 40.25)]).await;

    let dir = tempdir().unwrap();
    let root = dir.path().to_path_buf();
    let uri = server.uri();

    let output = tokio::task::spawn_blocking(move || {
        holdstats_against(&root, &uri)
            .args(["holders", "78", "--ephemeral"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("0xa        12.00  "));
    assert!(lines[1].starts_with("0xbb       40.25  "));
}
