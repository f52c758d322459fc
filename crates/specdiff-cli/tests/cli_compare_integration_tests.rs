//! CLI compare integration tests
//!
//! These tests drive the built `specdiff` binary against documents written
//! into a scratch directory.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

const OLD_SPEC: &str = r#"{
  "openapi": "3.0.0",
  "info": {"title": "Users", "version": "1"},
  "paths": {
    "/users": {
      "get": {
        "parameters": [{"name": "limit", "in": "query", "schema": {"type": "integer"}}],
        "responses": {"200": {"description": "ok"}}
      }
    }
  }
}"#;

const NEW_SPEC_BREAKING: &str = r#"{
  "openapi": "3.0.0",
  "info": {"title": "Users", "version": "2"},
  "paths": {
    "/users": {
      "get": {
        "parameters": [{"name": "limit", "in": "query", "schema": {"type": "string"}}],
        "responses": {"200": {"description": "ok"}}
      }
    }
  }
}"#;

const NEW_SPEC_ADDITIVE_YAML: &str = "\
openapi: 3.0.0
info:
  title: Users
  version: '2'
paths:
  /users:
    get:
      parameters:
        - name: limit
          in: query
          schema:
            type: integer
      responses:
        200:
          description: ok
  /posts:
    get:
      responses:
        200:
          description: ok
";

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn run(dir: &TempDir, args: &[&str]) -> Output {
    let cli_bin = env!("CARGO_BIN_EXE_specdiff");
    Command::new(cli_bin)
        .current_dir(dir.path())
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

#[test]
fn test_cli_breaking_change_exits_1_with_json_result() {
    // When: `specdiff compare old.json new.json`
    // Then: the JSON result lists the type change and the exit status is 1
    let dir = TempDir::new().unwrap();
    write(&dir, "old.json", OLD_SPEC);
    write(&dir, "new.json", NEW_SPEC_BREAKING);

    let output = run(&dir, &["compare", "old.json", "new.json"]);

    assert_eq!(
        output.status.code(),
        Some(1),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["summary"]["breaking"], 1);
    assert_eq!(result["summary"]["potentially_breaking"], 0);
    assert_eq!(result["summary"]["non_breaking"], 0);
    let change = &result["changes"][0];
    assert_eq!(change["type"], "breaking");
    assert_eq!(change["category"], "parameter");
    assert_eq!(change["path"], "/users");
    assert_eq!(change["method"], "GET");
    assert_eq!(change["field"], "limit");
}

#[test]
fn test_cli_additive_change_exits_0() {
    // Given: a YAML new document that only adds an endpoint
    let dir = TempDir::new().unwrap();
    write(&dir, "old.json", OLD_SPEC);
    write(&dir, "new.yaml", NEW_SPEC_ADDITIVE_YAML);

    let output = run(&dir, &["compare", "old.json", "new.yaml", "--output", "text"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("[non_breaking] endpoint: New endpoint: /posts"), "{}", stdout);
    assert!(stdout.ends_with("Summary: 0 breaking, 0 potentially breaking, 1 non-breaking\n"));
}

#[test]
fn test_cli_fail_on_never_exits_0() {
    let dir = TempDir::new().unwrap();
    write(&dir, "old.json", OLD_SPEC);
    write(&dir, "new.json", NEW_SPEC_BREAKING);

    let output = run(&dir, &["compare", "old.json", "new.json", "--fail-on", "never"]);

    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_cli_config_file_sets_threshold() {
    // Given: specdiff.toml in the working directory lowering the threshold
    let dir = TempDir::new().unwrap();
    write(&dir, "old.json", OLD_SPEC);
    write(&dir, "new.yaml", NEW_SPEC_ADDITIVE_YAML);
    write(&dir, "specdiff.toml", "fail_on = \"never\"\n");

    let clean = run(&dir, &["compare", "old.json", "new.yaml"]);
    assert_eq!(clean.status.code(), Some(0));

    // And: flags still override the file
    write(&dir, "new.json", NEW_SPEC_BREAKING);
    let overridden = run(&dir, &["compare", "old.json", "new.json", "--fail-on", "breaking"]);
    assert_eq!(overridden.status.code(), Some(1));
}

#[test]
fn test_cli_invalid_config_exits_2() {
    let dir = TempDir::new().unwrap();
    write(&dir, "old.json", OLD_SPEC);
    write(&dir, "new.json", OLD_SPEC);
    let config = write(&dir, "custom.toml", "fail_on = [1, 2]\n");

    let output = run(
        &dir,
        &["compare", "old.json", "new.json", "--config", config.to_str().unwrap()],
    );

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid config file"), "{}", stderr);
}

#[test]
fn test_cli_structure_error_names_side_and_exits_2() {
    let dir = TempDir::new().unwrap();
    write(&dir, "old.json", OLD_SPEC);
    write(&dir, "new.json", r#"{"openapi": "3.0.0", "paths": {}}"#);

    let output = run(&dir, &["compare", "old.json", "new.json"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[ERR_STRUCTURE] new document"), "{}", stderr);
    assert!(stderr.contains("Specification must include 'info' field"), "{}", stderr);
}

#[test]
fn test_cli_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    write(&dir, "new.json", OLD_SPEC);

    let output = run(&dir, &["compare", "absent.json", "new.json"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[ERR_IO] old document"), "{}", stderr);
}

#[test]
fn test_cli_format_hint_rejects_mismatched_document() {
    let dir = TempDir::new().unwrap();
    write(&dir, "old.json", OLD_SPEC);
    write(&dir, "new.yaml", NEW_SPEC_ADDITIVE_YAML);

    let output = run(
        &dir,
        &["compare", "old.json", "new.yaml", "--new-format", "json"],
    );

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[ERR_PARSE] new document"), "{}", stderr);
}

#[test]
fn test_cli_broken_old_reported_before_missing_new() {
    let dir = TempDir::new().unwrap();
    write(&dir, "old.json", r#"{"openapi": "3.0.0", "#);

    let output = run(&dir, &["compare", "old.json", "absent.json"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[ERR_PARSE] old document"), "{}", stderr);
    assert!(!stderr.contains("ERR_IO"), "{}", stderr);
}
