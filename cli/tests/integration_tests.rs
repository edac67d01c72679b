//! Integration tests for the `grammar-check` binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const GRAMMAR_YAML: &str = r#"name: app
description: an example app
version: "1.4.0"
arguments:
  - name: file
    description: input file
options:
  - short: "-o"
    long: "--opt"
    description: an option
subcommands:
  - name: build
    description: build things
    arguments:
      - name: target
        description: build target
"#;

fn grammar_check_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_grammar-check"))
}

fn write_grammar(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("failed to write grammar");
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(grammar_check_bin())
        .args(args)
        .output()
        .expect("failed to run grammar-check")
}

#[test]
fn test_help_output() {
    let dir = tempfile::tempdir().unwrap();
    let grammar = write_grammar(dir.path(), "grammar.yaml", GRAMMAR_YAML);

    let output = run(&["help", "--grammar", grammar.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "help failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("app - an example app\n\nusage: app <file> [options] [command]\n"));
    assert!(stdout.contains("  -o, --opt    an option\n"));
    assert!(stdout.contains("  build    build things\n"));
}

#[test]
fn test_subcommand_help_output() {
    let dir = tempfile::tempdir().unwrap();
    let grammar = write_grammar(dir.path(), "grammar.yaml", GRAMMAR_YAML);

    let output = run(&[
        "help",
        "--grammar",
        grammar.to_str().unwrap(),
        "--command",
        "build",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("usage: app build <target>\n"));
}

#[test]
fn test_version_output() {
    let dir = tempfile::tempdir().unwrap();
    let grammar = write_grammar(dir.path(), "grammar.yaml", GRAMMAR_YAML);

    let output = run(&["version", "--grammar", grammar.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1.4.0\n");
}

#[test]
fn test_validate_reports_counts() {
    let dir = tempfile::tempdir().unwrap();
    let grammar = write_grammar(dir.path(), "grammar.yaml", GRAMMAR_YAML);

    let output = run(&["validate", "--grammar", grammar.to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1 argument(s), 1 option(s), 1 subcommand(s)"));
}

#[test]
fn test_validate_rejects_bad_grammar() {
    let dir = tempfile::tempdir().unwrap();
    let grammar = write_grammar(
        dir.path(),
        "grammar.json",
        r#"{"name": "app", "description": "x", "arguments": [{"name": "-bad", "description": "x"}]}"#,
    );

    let output = run(&["validate", "--grammar", grammar.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid declaration"), "stderr: {stderr}");
}

#[test]
fn test_parse_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let grammar = write_grammar(dir.path(), "grammar.yaml", GRAMMAR_YAML);

    let output = run(&[
        "parse",
        "--grammar",
        grammar.to_str().unwrap(),
        "--",
        "--opt",
        "5",
        "build",
        "target",
        "release",
    ]);
    assert!(
        output.status.success(),
        "parse failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("Invalid JSON output: {e}\n{stdout}"));
    assert_eq!(parsed["options"][0]["name"], "--opt");
    assert_eq!(parsed["options"][0]["value"], "5");
    assert_eq!(parsed["command"]["name"], "build");
    assert_eq!(parsed["command"]["arguments"][0]["value"], "release");
}

#[test]
fn test_parse_yaml_output() {
    let dir = tempfile::tempdir().unwrap();
    let grammar = write_grammar(dir.path(), "grammar.yaml", GRAMMAR_YAML);

    let output = run(&[
        "parse",
        "--grammar",
        grammar.to_str().unwrap(),
        "--format",
        "yaml",
        "--",
        "file",
        "x.txt",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("name: file"));
    assert!(stdout.contains("value: x.txt"));
}

#[test]
fn test_parse_failure_prints_usage() {
    let dir = tempfile::tempdir().unwrap();
    let grammar = write_grammar(dir.path(), "grammar.yaml", GRAMMAR_YAML);

    let output = run(&[
        "parse",
        "--grammar",
        grammar.to_str().unwrap(),
        "--",
        "bogus",
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: app <file> [options] [command]"));
    assert!(stderr.contains("error: unexpected argument: bogus"));
}

#[test]
fn test_parse_without_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let grammar = write_grammar(dir.path(), "grammar.yaml", GRAMMAR_YAML);

    let output = run(&["parse", "--grammar", grammar.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no tokens given"));
}
