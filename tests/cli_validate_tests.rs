//! End-to-end tests for `folio validate`.

use std::process::Command;

mod fixtures;
use fixtures::*;

/// Path to the folio binary
fn folio_bin() -> &'static str {
    env!("CARGO_BIN_EXE_folio")
}

#[test]
fn test_validate_builtin_content() {
    let output = Command::new(folio_bin())
        .args(["validate"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "Built-in content should validate. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✓ Validation passed"));
    assert!(stdout.contains("Certifications: 5"));
}

#[test]
fn test_validate_content_file_json() {
    let (path, _temp_dir) = create_temp_content_file(MINIMAL_CONTENT);

    let output = Command::new(folio_bin())
        .args(["validate", "--content", path.to_str().unwrap(), "--json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let result: serde_json::Value =
        serde_json::from_str(&stdout).expect("Should parse JSON output");
    assert_eq!(result["valid"], true);
    assert!(result["errors"].as_array().unwrap().is_empty());
    assert_eq!(result["counts"]["projects"], 1);
}

#[test]
fn test_validate_reports_errors() {
    let (path, _temp_dir) = create_temp_content_file(&content_with_error());

    let output = Command::new(folio_bin())
        .args(["validate", "--content", path.to_str().unwrap(), "--json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1), "Validation errors exit with 1");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let result: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(result["valid"], false);
    let first = &result["errors"][0];
    assert_eq!(first["severity"], "error");
    assert_eq!(first["location"], "projects[0].title");
}

#[test]
fn test_validate_warnings_only_fail_in_strict_mode() {
    let (path, _temp_dir) = create_temp_content_file(&content_with_warning());
    let path = path.to_str().unwrap();

    let output = Command::new(folio_bin())
        .args(["validate", "--content", path])
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("  ⚠ [projects[0].tags]"));

    let output = Command::new(folio_bin())
        .args(["validate", "--content", path, "--strict"])
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_validate_missing_file() {
    let output = Command::new(folio_bin())
        .args(["validate", "--content", "/nonexistent/portfolio.toml"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2), "I/O errors exit with 2");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read content file"));
}

#[test]
fn test_validate_malformed_file() {
    let (path, _temp_dir) = create_temp_content_file("[profile]\nname = 3\n");

    let output = Command::new(folio_bin())
        .args(["validate", "--content", path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}
