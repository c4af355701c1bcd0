//! End-to-end tests for `folio export`.

use std::fs;
use std::process::Command;

mod fixtures;
use fixtures::*;

/// Path to the folio binary
fn folio_bin() -> &'static str {
    env!("CARGO_BIN_EXE_folio")
}

#[test]
fn test_export_markdown_to_stdout() {
    let output = Command::new(folio_bin())
        .args(["export", "--format", "markdown"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("# Yatheesh Gowda {#home}"));
    assert!(stdout.contains("{#contact}"));
}

#[test]
fn test_export_json_to_file() {
    let (content_path, temp_dir) = create_temp_content_file(MINIMAL_CONTENT);
    let output_path = temp_dir.path().join("portfolio.json");

    let output = Command::new(folio_bin())
        .args([
            "export",
            "--format",
            "json",
            "--content",
            content_path.to_str().unwrap(),
            "--output",
            output_path.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty(), "Nothing is printed when writing a file");

    let json = fs::read_to_string(&output_path).expect("Export file should exist");
    let result: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(result["content"]["profile"]["name"], "Ada Example");
    assert_eq!(result["sections"].as_array().unwrap().len(), 6);
    assert_eq!(result["certification_summary"]["count"], 1);
}

#[test]
fn test_export_text() {
    let (content_path, _temp_dir) = create_temp_content_file(MINIMAL_CONTENT);

    let output = Command::new(folio_bin())
        .args([
            "export",
            "-f",
            "text",
            "--content",
            content_path.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Ada Example\n==========="));
    assert!(stdout.contains("> Say Hello: mailto:ada@example.com?subject=Hello"));
}

#[test]
fn test_export_invalid_content() {
    let (content_path, _temp_dir) = create_temp_content_file(&content_with_error());

    let output = Command::new(folio_bin())
        .args(["export", "--content", content_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_export_unknown_format() {
    let output = Command::new(folio_bin())
        .args(["export", "--format", "pdf"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2), "clap usage errors exit with 2");
}
