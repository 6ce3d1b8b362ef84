//! End-to-end tests for the `table` binary
//!
//! Runs the built binary and inspects what it prints.

use similar_asserts::assert_eq;
use std::process::Command;

fn run_demo(args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_table"))
        .arg("demo")
        .args(args)
        .output()
        .expect("Failed to run table binary");
    assert!(output.status.success(), "demo failed: {output:?}");
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in stdout")
}

#[test]
fn test_demo_json_output_format() {
    let stdout = run_demo(&["--seed", "7", "--verbosity", "normal", "--output-format", "json"]);

    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .filter(|line| line.starts_with('{'))
        .map(|line| serde_json::from_str(line).expect("session log line is a JSON object"))
        .collect();
    assert!(!lines.is_empty(), "no JSON lines in:\n{stdout}");
    for line in &lines {
        assert!(line["level"].is_string(), "{line}");
        assert!(line["message"].is_string(), "{line}");
    }
    assert!(lines
        .iter()
        .any(|line| line["level"] == "normal" && line["message"] == "Undid modify_life"));
}

#[test]
fn test_demo_text_output_is_default() {
    let text = run_demo(&["--seed", "7", "--verbosity", "normal"]);
    let explicit = run_demo(&["--seed", "7", "--verbosity", "normal", "--output-format", "text"]);

    assert_eq!(text, explicit);
    assert!(!text.lines().any(|line| line.starts_with('{')));
}

#[test]
fn test_demo_rejects_unknown_output_format() {
    let output = Command::new(env!("CARGO_BIN_EXE_table"))
        .args(["demo", "--output-format", "yaml"])
        .output()
        .expect("Failed to run table binary");
    assert!(!output.status.success());
}
