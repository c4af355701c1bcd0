//! Content validation.
//!
//! Broken content (missing text, duplicate keys) is rejected before any
//! section mounts. Suspicious but usable content only produces warnings.

// Allow format! appended to String - more readable for building messages
#![allow(clippy::format_push_string)]

use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::OnceLock;

use super::Content;

/// Validation result with specific errors and warnings.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Problems that prevent the content from being shown
    pub errors: Vec<ValidationError>,
    /// Non-critical warnings
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Creates a new empty validation report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Returns true if there are no errors (warnings are allowed).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Adds an error to the report.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Adds a warning to the report.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Formats the report as a user-friendly message.
    #[must_use]
    pub fn format_message(&self) -> String {
        let mut message = String::new();

        if !self.errors.is_empty() {
            message.push_str(&format!("❌ {} validation errors:\n", self.errors.len()));
            for (idx, error) in self.errors.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, error));
            }
        }

        if !self.warnings.is_empty() {
            message.push_str(&format!("\n⚠️  {} warnings:\n", self.warnings.len()));
            for (idx, warning) in self.warnings.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, warning));
            }
        }

        message
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validation error with the location it was found at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Type of validation error
    pub kind: ValidationErrorKind,
    /// Dotted path of the offending field (`projects[1].title`)
    pub location: String,
    /// Human-readable message
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(
        kind: ValidationErrorKind,
        location: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            location: location.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.location, self.kind, self.message)
    }
}

/// Types of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// Required text is empty
    EmptyField,
    /// A list that must have entries is empty
    EmptyList,
    /// Two records share a key that must be unique
    DuplicateKey,
}

impl std::fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField => write!(f, "Empty Field"),
            Self::EmptyList => write!(f, "Empty List"),
            Self::DuplicateKey => write!(f, "Duplicate Key"),
        }
    }
}

/// Validation warning (non-blocking).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationWarning {
    /// Dotted path of the field
    pub location: String,
    /// Warning message
    pub message: String,
}

impl ValidationWarning {
    /// Creates a new validation warning
    pub fn new(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.location, self.message)
    }
}

fn href_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r"^(mailto:[^\s?]+(\?.*)?|tel:\+?[0-9][0-9 ()-]*|https?://\S*|#\S*)$").ok()
        })
        .as_ref()
}

/// Checks a [`Content`] table for structural problems.
pub struct ContentValidator<'a> {
    content: &'a Content,
}

impl<'a> ContentValidator<'a> {
    /// Creates a validator for `content`.
    #[must_use]
    pub const fn new(content: &'a Content) -> Self {
        Self { content }
    }

    /// Runs every check and collects the findings.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        self.validate_profile(&mut report);
        self.validate_skills(&mut report);
        self.validate_experience(&mut report);
        self.validate_projects(&mut report);
        self.validate_certifications(&mut report);
        self.validate_contacts(&mut report);

        report
    }

    fn validate_profile(&self, report: &mut ValidationReport) {
        let profile = &self.content.profile;
        for (field, value) in [
            ("name", &profile.name),
            ("headline", &profile.headline),
            ("tagline", &profile.tagline),
            ("location", &profile.location),
            ("email", &profile.email),
            ("phone", &profile.phone),
            ("bio", &profile.bio),
        ] {
            require_text(report, &format!("profile.{field}"), value);
        }
    }

    fn validate_skills(&self, report: &mut ValidationReport) {
        let mut seen = HashSet::new();
        for (idx, skill) in self.content.skills.iter().enumerate() {
            let location = format!("skills[{idx}]");
            require_text(report, &format!("{location}.category"), &skill.category);
            require_text(report, &format!("{location}.icon"), &skill.icon);

            if skill.skills.is_empty() {
                report.add_error(ValidationError::new(
                    ValidationErrorKind::EmptyList,
                    format!("{location}.skills"),
                    format!("Skill category '{}' lists no skills", skill.category),
                ));
            }
            for (sub, name) in skill.skills.iter().enumerate() {
                require_text(report, &format!("{location}.skills[{sub}]"), name);
            }

            check_unique(report, &mut seen, &location, "Skill category", &skill.category);
        }
    }

    fn validate_experience(&self, report: &mut ValidationReport) {
        let mut seen = HashSet::new();
        for (idx, item) in self.content.experience.iter().enumerate() {
            let location = format!("experience[{idx}]");
            require_text(report, &format!("{location}.company"), &item.company);
            require_text(report, &format!("{location}.role"), &item.role);
            require_text(report, &format!("{location}.period"), &item.period);

            let key = format!("{} ({})", item.company, item.period);
            check_unique(report, &mut seen, &location, "Experience entry", &key);
        }
    }

    fn validate_projects(&self, report: &mut ValidationReport) {
        let mut seen = HashSet::new();
        for (idx, project) in self.content.projects.iter().enumerate() {
            let location = format!("projects[{idx}]");
            require_text(report, &format!("{location}.title"), &project.title);
            require_text(report, &format!("{location}.description"), &project.description);

            if project.tags.is_empty() {
                report.add_warning(ValidationWarning::new(
                    format!("{location}.tags"),
                    format!("Project '{}' has no tags", project.title),
                ));
            }
            if project.features.is_empty() {
                report.add_warning(ValidationWarning::new(
                    format!("{location}.features"),
                    format!("Project '{}' lists no features", project.title),
                ));
            }

            check_unique(report, &mut seen, &location, "Project title", &project.title);
        }
    }

    fn validate_certifications(&self, report: &mut ValidationReport) {
        let mut seen = HashSet::new();
        for (idx, cert) in self.content.certifications.iter().enumerate() {
            let location = format!("certifications[{idx}]");
            require_text(report, &format!("{location}.organization"), &cert.organization);
            require_text(report, &format!("{location}.title"), &cert.title);
            require_text(report, &format!("{location}.period"), &cert.period);

            let key = format!("{}: {}", cert.organization, cert.title);
            check_unique(report, &mut seen, &location, "Certification", &key);
        }
    }

    fn validate_contacts(&self, report: &mut ValidationReport) {
        let mut seen = HashSet::new();
        for (idx, contact) in self.content.contacts.iter().enumerate() {
            let location = format!("contacts[{idx}]");
            require_text(report, &format!("{location}.label"), &contact.label);
            require_text(report, &format!("{location}.value"), &contact.value);
            check_href(report, &format!("{location}.href"), &contact.href);
            check_unique(report, &mut seen, &location, "Contact label", &contact.label);
        }

        for (idx, cta) in self.content.calls_to_action.iter().enumerate() {
            let location = format!("calls_to_action[{idx}]");
            require_text(report, &format!("{location}.label"), &cta.label);
            check_href(report, &format!("{location}.href"), &cta.href);
        }
    }
}

fn require_text(report: &mut ValidationReport, location: &str, value: &str) {
    if value.trim().is_empty() {
        report.add_error(ValidationError::new(
            ValidationErrorKind::EmptyField,
            location,
            "Value must not be empty",
        ));
    }
}

fn check_unique(
    report: &mut ValidationReport,
    seen: &mut HashSet<String>,
    location: &str,
    what: &str,
    key: &str,
) {
    if !seen.insert(key.to_string()) {
        report.add_error(ValidationError::new(
            ValidationErrorKind::DuplicateKey,
            location,
            format!("{what} '{key}' appears more than once"),
        ));
    }
}

fn check_href(report: &mut ValidationReport, location: &str, href: &str) {
    if href.trim().is_empty() {
        report.add_error(ValidationError::new(
            ValidationErrorKind::EmptyField,
            location,
            "Endpoint must not be empty",
        ));
    } else if !href_pattern().is_some_and(|pattern| pattern.is_match(href)) {
        report.add_warning(ValidationWarning::new(
            location,
            format!("Endpoint '{href}' does not use mailto:, tel:, http(s):// or #"),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContactEntry, Gradient};

    #[test]
    fn test_builtin_content_is_clean() {
        let content = Content::builtin().unwrap();
        let report = ContentValidator::new(&content).validate();
        assert!(report.is_valid(), "{}", report.format_message());
        assert!(report.warnings.is_empty(), "{}", report.format_message());
    }

    #[test]
    fn test_duplicate_project_title() {
        let mut content = Content::builtin().unwrap();
        let copy = content.projects[0].clone();
        content.projects.push(copy);

        let report = ContentValidator::new(&content).validate();
        assert!(!report.is_valid());
        assert!(report
            .errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateKey && e.location == "projects[2]"));
    }

    #[test]
    fn test_empty_skill_list() {
        let mut content = Content::builtin().unwrap();
        content.skills[1].skills.clear();

        let report = ContentValidator::new(&content).validate();
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, ValidationErrorKind::EmptyList);
        assert_eq!(report.errors[0].location, "skills[1].skills");
    }

    #[test]
    fn test_empty_profile_name() {
        let mut content = Content::builtin().unwrap();
        content.profile.name = "   ".to_string();

        let report = ContentValidator::new(&content).validate();
        assert_eq!(report.errors[0].location, "profile.name");
    }

    #[test]
    fn test_unusual_href_is_only_a_warning() {
        let mut content = Content::builtin().unwrap();
        content.contacts.push(ContactEntry {
            label: "Chat".to_string(),
            value: "folio".to_string(),
            href: "irc://example.net/folio".to_string(),
            gradient: Gradient::default(),
        });

        let report = ContentValidator::new(&content).validate();
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].message.contains("irc://example.net/folio"));
        // Endpoint left untouched
        assert_eq!(content.contacts.last().unwrap().href, "irc://example.net/folio");
    }

    #[test]
    fn test_href_pattern() {
        for href in [
            "mailto:someone@example.com?subject=Project Collaboration",
            "tel:+918088128353",
            "https://github.com/",
            "#",
            "#contact",
        ] {
            let mut report = ValidationReport::new();
            check_href(&mut report, "x", href);
            assert!(report.warnings.is_empty(), "{href}");
        }
    }

    #[test]
    fn test_report_format() {
        let mut report = ValidationReport::new();
        report.add_error(ValidationError::new(
            ValidationErrorKind::EmptyField,
            "profile.bio",
            "Value must not be empty",
        ));
        report.add_warning(ValidationWarning::new("projects[0].tags", "No tags"));

        let message = report.format_message();
        assert!(message.contains("1 validation errors"));
        assert!(message.contains("1 warnings"));
        assert!(message.contains("[profile.bio] Empty Field"));
        assert!(message.contains("No tags"));
    }
}
