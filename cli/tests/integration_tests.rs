use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;

use tempfile::TempDir;

const TEST_SCHEMA: &str = r#"description: "This is a test program"
options:
  - name: opt1
    aliases: ["1"]
    kind: int
    help: "Set the first option of our test program."
  - name: opt2
    aliases: ["2"]
    kind: string
  - name: opt3
    kind: vector<string>
    help: "A vector of strings."
  - name: ratio
    kind: float
    default: 0.5
  - name: a
    kind: bool
  - name: b
    kind: bool
required: [opt1]
positionals: [opt1, opt2]
"#;

fn write_schema(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("failed to write schema");
    path
}

fn optbind(args: &[&str]) -> Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_optbind"))
        .args(args)
        .output()
        .expect("failed to run optbind")
}

fn parse_with(schema: &Path, extra: &[&str]) -> Output {
    let mut args = vec!["parse", "--schema", schema.to_str().unwrap(), "--"];
    args.extend_from_slice(extra);
    optbind(&args)
}

#[test]
fn parse_prints_bound_options_as_json() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, "schema.yaml", TEST_SCHEMA);

    let out = parse_with(
        &schema,
        &["12", "abc", "--opt3", "x", "--opt3=y", "-ab", "--ratio", "2"],
    );
    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "opt1": 12,
            "opt2": "abc",
            "opt3": ["x", "y"],
            "ratio": 2.0,
            "a": true,
            "b": true,
        })
    );
}

#[test]
fn parse_applies_defaults_and_omits_unbound_scalars() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, "schema.yaml", TEST_SCHEMA);

    let out = parse_with(&schema, &["-1", "7"]);
    assert!(out.status.success());

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "opt1": 7, "opt3": [], "ratio": 0.5 })
    );
}

#[test]
fn parse_table_and_yaml_formats() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, "schema.yaml", TEST_SCHEMA);
    let path = schema.to_str().unwrap();

    let table = optbind(&["parse", "--schema", path, "--format", "table", "--", "3"]);
    assert!(table.status.success());
    let stdout = String::from_utf8_lossy(&table.stdout);
    assert!(stdout.contains("opt1   3\n"), "stdout: {stdout}");
    assert!(stdout.contains("ratio  0.5\n"), "stdout: {stdout}");

    let yaml = optbind(&["parse", "--schema", path, "--format", "yaml", "--", "3"]);
    assert!(yaml.status.success());
    let stdout = String::from_utf8_lossy(&yaml.stdout);
    assert!(stdout.contains("opt1: 3\n"), "stdout: {stdout}");
}

#[test]
fn parse_help_request_prints_usage() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, "schema.yaml", TEST_SCHEMA);

    let out = optbind(&[
        "parse",
        "--schema",
        schema.to_str().unwrap(),
        "--program",
        "./test_program",
        "--",
        "--help",
    ]);
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with(
        "Usage: ./test_program [options...] [opt1] [opt2]\nThis is a test program\n\n"
    ));
    assert!(stdout.contains("[REQUIRED] Set the first option of our test program.\n"));
}

#[test]
fn parse_errors_are_printed_verbatim() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, "schema.yaml", TEST_SCHEMA);

    let cases: [(&[&str], &str); 4] = [
        (&["--opt2", "x"], "Error missing required command line parameter opt1\n"),
        (&["1", "--nope"], "Error unknown command line parameter nope\n"),
        (
            &["twelve"],
            "Error invalid value 'twelve' for command line parameter opt1 (expected int)\n",
        ),
        (&["1", "x", "surplus"], "Error unexpected positional argument surplus\n"),
    ];

    for (args, expected) in cases {
        let out = parse_with(&schema, args);
        assert_eq!(out.status.code(), Some(2), "args: {args:?}");
        assert_eq!(String::from_utf8_lossy(&out.stderr), expected);
        assert!(out.stdout.is_empty());
    }
}

#[test]
fn help_command_wraps_text() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, "schema.yaml", TEST_SCHEMA);

    let out = optbind(&[
        "help",
        "--schema",
        schema.to_str().unwrap(),
        "--program",
        "tool",
        "--wrap",
        "50",
    ]);
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("Usage: tool [options...] [opt1] [opt2]\n"));
    for line in stdout.lines().skip(3) {
        assert!(line.chars().count() <= 50, "line too wide: {line:?}");
    }
}

#[test]
fn check_accepts_json_schema_and_writes_yaml() {
    let dir = TempDir::new().unwrap();
    let json = serde_json::json!({
        "options": [
            { "name": "count", "aliases": ["c"], "kind": "int", "default": 3 },
            { "name": "names", "kind": "vector<string>" }
        ],
        "positionals": ["names"]
    });
    let schema = write_schema(&dir, "schema.json", &json.to_string());
    let normalized = dir.path().join("normalized.yaml");

    let out = optbind(&[
        "check",
        "--schema",
        schema.to_str().unwrap(),
        "--write",
        normalized.to_str().unwrap(),
    ]);
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("Options: 2  Required: 0  Positional: 1\n"));
    assert!(stdout.contains("count"));

    let written = fs::read_to_string(&normalized).unwrap();
    assert!(written.contains("vector<string>"));

    let reparsed = parse_with(&normalized, &["a", "b", "-c", "5"]);
    assert!(reparsed.status.success());
    let value: serde_json::Value = serde_json::from_slice(&reparsed.stdout).unwrap();
    assert_eq!(value, serde_json::json!({ "count": 5, "names": ["a", "b"] }));
}

#[test]
fn check_rejects_inconsistent_schema() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(
        &dir,
        "schema.yaml",
        "options:\n  - name: opt1\n    kind: int\nrequired: [missing]\n",
    );

    let out = optbind(&["check", "--schema", schema.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.starts_with("error: invalid schema:"), "stderr: {stderr}");
    assert!(stderr.contains("missing"));
}

#[test]
fn missing_schema_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.yaml");

    let out = parse_with(&path, &[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).starts_with("error: I/O error:"));
}
