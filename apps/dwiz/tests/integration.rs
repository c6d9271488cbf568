//! Integration tests for dwiz CLI

use httpmock::prelude::*;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Config file pointing at `api_url` with a short busy delay
fn write_config(dir: &TempDir, api_url: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        format!("[network]\napi_url = \"{api_url}\"\nretries = 0\nbusy_retry_delay_ms = 10\n"),
    )
    .unwrap();
    path
}

fn dwiz(config: &PathBuf, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dwiz"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("DWIZ_OUTPUT")
        .env_remove("DWIZ_COLOR")
        .env_remove("DWIZ_API_URL")
        .env_remove("DWIZ_STABLE_LINE")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute dwiz")
}

fn envelope(data: Value) -> Value {
    json!({"success": true, "code": 200, "msg": "", "data": data})
}

fn artifact(version: &str, release: &str, md5: &str) -> Value {
    json!({
        "version": version,
        "release": release,
        "md5": md5,
        "version_type": "ce",
        "type": "remote",
        "estimated_size": 1_048_576
    })
}

#[test]
fn test_cli_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_dwiz"))
        .arg("--version")
        .output()
        .expect("Failed to execute dwiz");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("dwiz"));
}

#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_dwiz"))
        .arg("--help")
        .output()
        .expect("Failed to execute dwiz");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("versions"));
    assert!(stdout.contains("drafts"));
    assert!(stdout.contains("connection"));
}

#[test]
fn test_cli_invalid_command() {
    let output = Command::new(env!("CARGO_BIN_EXE_dwiz"))
        .arg("invalid-command")
        .output()
        .expect("Failed to execute dwiz");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unrecognized subcommand"));
}

#[test]
fn test_versions_json_ready() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/components");
        then.status(200).json_body(envelope(json!({
            "total": 3,
            "items": [
                {"name": "core", "info": [artifact("4.2.1.0", "1.el7", "c1")]},
                {"name": "proxy", "info": [artifact("4.2.2.0", "1.el7", "p1")]},
                {"name": "manager", "info": [artifact("4.2.1", "1", "m1")]}
            ]
        })));
    });

    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &server.base_url());
    let output = dwiz(&config, &["--json", "versions"]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["type"], "session");
    assert_eq!(result["data"]["ready"], true);
    assert_eq!(result["data"]["selection"]["proxy"]["version"], "4.2.2.0");
}

#[test]
fn test_versions_not_ready_reports_mirrors() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/components");
        then.status(200).json_body(envelope(json!({
            "total": 1,
            "items": [{"name": "manager", "info": [artifact("4.2.1", "1", "m1")]}]
        })));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/mirrors");
        then.status(200).json_body(envelope(json!({
            "total": 1,
            "items": [{"section_name": "community.stable", "available": true}]
        })));
    });

    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &server.base_url());
    let output = dwiz(&config, &["--json", "versions"]);

    assert_eq!(output.status.code(), Some(2));
    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["data"]["ready"], false);
    assert_eq!(result["data"]["missing"], json!(["core", "proxy"]));
    assert_eq!(
        result["data"]["diagnostics"],
        json!([{"mirror_name": "development-kit", "reason": "not-configured"}])
    );

    // Upgrade only needs the manager
    let output = dwiz(&config, &["--json", "versions", "--flow", "upgrade"]);
    assert!(output.status.success());
}

#[test]
fn test_unknown_selection_fails() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/components");
        then.status(200).json_body(envelope(json!({
            "total": 1,
            "items": [{"name": "manager", "info": [artifact("4.2.1", "1", "m1")]}]
        })));
    });

    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &server.base_url());
    let output = dwiz(
        &config,
        &["versions", "--flow", "upgrade", "--select", "manager=4.9.9-1-zz"],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"));
}

#[test]
fn test_select_key_with_dashed_checksum() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/components");
        then.status(200).json_body(envelope(json!({
            "total": 1,
            "items": [{"name": "manager", "info": [
                artifact("4.2.2", "1", "md5-4.2.2"),
                artifact("4.2.1", "1", "md5-4.2.1")
            ]}]
        })));
    });

    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &server.base_url());
    let output = dwiz(
        &config,
        &[
            "--json",
            "versions",
            "--flow",
            "upgrade",
            "--select",
            "manager=4.2.1-1-md5-4.2.1",
        ],
    );

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["data"]["selection"]["manager"]["version"], "4.2.1");
}

#[test]
fn test_drafts_list_json() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/deployments")
            .query_param("task_status", "DRAFT");
        then.status(200).json_body(envelope(json!({
            "total": 1,
            "items": [{"name": "demo", "status": "DRAFT"}]
        })));
    });

    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &server.base_url());
    let output = dwiz(&config, &["--json", "drafts", "list"]);

    assert!(output.status.success());
    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["data"]["drafts"][0]["name"], "demo");
}

#[test]
fn test_invalid_api_url_flag() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "http://127.0.0.1:1");
    let output = dwiz(&config, &["--api-url", "ftp://nowhere", "drafts", "list"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--api-url"));
}
