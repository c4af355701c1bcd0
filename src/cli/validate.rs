//! Validation command for content tables.

use crate::cli::common::{read_content, CliError, CliResult};
use crate::content::{Content, ValidationReport};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Validate a content table for errors and warnings
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Content table to check (defaults to the built-in one)
    #[arg(short, long, value_name = "FILE")]
    pub content: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,
}

/// One reported problem.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationMessage {
    /// "error" or "warning"
    pub severity: &'static str,
    /// Dotted path of the field
    pub location: String,
    /// What is wrong
    pub message: String,
}

/// JSON shape of `folio validate --json`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResponse {
    /// No errors were found
    pub valid: bool,
    /// Errors and warnings, errors first
    pub errors: Vec<ValidationMessage>,
    /// Record counts per section
    pub counts: ContentCounts,
}

/// Number of records per list.
#[derive(Debug, Clone, Serialize)]
pub struct ContentCounts {
    /// Skill categories
    pub skills: usize,
    /// Experience entries
    pub experience: usize,
    /// Projects
    pub projects: usize,
    /// Certifications
    pub certifications: usize,
    /// Contact entries
    pub contacts: usize,
}

impl ContentCounts {
    fn of(content: &Content) -> Self {
        Self {
            skills: content.skills.len(),
            experience: content.experience.len(),
            projects: content.projects.len(),
            certifications: content.certifications.len(),
            contacts: content.contacts.len(),
        }
    }
}

impl ValidationResponse {
    /// Builds the response for a parsed table and its report.
    #[must_use]
    pub fn new(content: &Content, report: &ValidationReport) -> Self {
        let errors = report
            .errors
            .iter()
            .map(|error| ValidationMessage {
                severity: "error",
                location: error.location.clone(),
                message: format!("{}: {}", error.kind, error.message),
            })
            .chain(report.warnings.iter().map(|warning| ValidationMessage {
                severity: "warning",
                location: warning.location.clone(),
                message: warning.message.clone(),
            }))
            .collect();

        Self {
            valid: report.is_valid(),
            errors,
            counts: ContentCounts::of(content),
        }
    }

    fn has_warnings(&self) -> bool {
        self.errors.iter().any(|m| m.severity == "warning")
    }
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let content = read_content(self.content.as_deref())?;
        let report = content.validate();
        let response = ValidationResponse::new(&content, &report);

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            if response.valid {
                println!("✓ Validation passed");
            } else {
                println!("✗ Validation failed");
            }

            let counts = &response.counts;
            println!("\nRecords:");
            println!("  Skills:         {}", counts.skills);
            println!("  Experience:     {}", counts.experience);
            println!("  Projects:       {}", counts.projects);
            println!("  Certifications: {}", counts.certifications);
            println!("  Contacts:       {}", counts.contacts);

            if !response.errors.is_empty() {
                println!("\nIssues:");
                for msg in &response.errors {
                    let prefix = if msg.severity == "error" {
                        "  ✗"
                    } else {
                        "  ⚠"
                    };
                    println!("{prefix} [{}] {}", msg.location, msg.message);
                }
            }
        }

        if !response.valid {
            return Err(CliError::validation("Validation failed"));
        }

        if self.strict && response.has_warnings() {
            return Err(CliError::validation("Warnings found in strict mode"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ValidationError, ValidationErrorKind, ValidationWarning};

    #[test]
    fn test_response_orders_errors_first() {
        let content = Content::builtin().unwrap();
        let mut report = ValidationReport::new();
        report.add_warning(ValidationWarning::new("contacts[0].href", "odd scheme"));
        report.add_error(ValidationError::new(
            ValidationErrorKind::EmptyField,
            "projects[0].title",
            "title is empty",
        ));

        let response = ValidationResponse::new(&content, &report);
        assert!(!response.valid);
        assert_eq!(response.errors[0].severity, "error");
        assert_eq!(response.errors[0].message, "Empty Field: title is empty");
        assert_eq!(response.errors[1].severity, "warning");
        assert!(response.has_warnings());
    }

    #[test]
    fn test_builtin_counts() {
        let content = Content::builtin().unwrap();
        let response = ValidationResponse::new(&content, &content.validate());
        assert!(response.valid);
        assert_eq!(response.counts.certifications, 5);
    }
}
