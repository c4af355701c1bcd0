//! Portfolio content tables.
//!
//! The built-in table is embedded at compile time from
//! `src/data/portfolio.toml`. A replacement table with the same schema can be
//! loaded from disk with [`Content::from_path`]. Either way the table is
//! validated before use and is immutable afterwards.

pub mod gradient;
pub mod records;
pub mod summary;
pub mod validator;

pub use gradient::{Gradient, Tone};
pub use records::{
    CallToAction, Certification, CertificationCategory, ContactEntry, ExperienceItem,
    ExperienceKind, Profile, Project, Skill,
};
pub use summary::CertificationSummary;
pub use validator::{
    ContentValidator, ValidationError, ValidationErrorKind, ValidationReport, ValidationWarning,
};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

const BUILTIN_CONTENT: &str = include_str!("../data/portfolio.toml");

/// Every record shown by the portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Content {
    /// Hero data
    pub profile: Profile,
    /// Skill categories
    #[serde(default)]
    pub skills: Vec<Skill>,
    /// Experience entries
    #[serde(default)]
    pub experience: Vec<ExperienceItem>,
    /// Featured projects
    #[serde(default)]
    pub projects: Vec<Project>,
    /// Certifications
    #[serde(default)]
    pub certifications: Vec<Certification>,
    /// Contact methods
    #[serde(default)]
    pub contacts: Vec<ContactEntry>,
    /// Buttons under the contact grid
    #[serde(default)]
    pub calls_to_action: Vec<CallToAction>,
    /// Footer line
    #[serde(default)]
    pub footer: String,
}

impl Content {
    /// Parses and validates the embedded content table.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded table fails to parse or validate.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CONTENT).context("Built-in content is invalid")
    }

    /// Loads and validates a content table from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read, parsed or validated.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read content file: {}", path.display()))?;
        let content = Self::from_toml_str(&text)
            .with_context(|| format!("Invalid content file: {}", path.display()))?;
        debug!(path = %path.display(), "loaded content table");
        Ok(content)
    }

    /// Loads `path` when given, otherwise the built-in table.
    ///
    /// # Errors
    ///
    /// See [`Content::from_path`] and [`Content::builtin`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::builtin(),
        }
    }

    /// Parses a content table without validating it.
    ///
    /// # Errors
    ///
    /// Returns an error on TOML syntax errors, unknown fields or bad tokens.
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse content table")
    }

    /// Parses and validates a content table.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or validation reports errors.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let content = Self::parse(text)?;
        let report = content.validate();
        if !report.is_valid() {
            bail!("{}", report.format_message().trim_end());
        }
        Ok(content)
    }

    /// Runs the content validator.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        ContentValidator::new(self).validate()
    }

    /// Figures shown under the certification grid.
    #[must_use]
    pub fn certification_summary(&self) -> CertificationSummary {
        CertificationSummary::from_certifications(&self.certifications)
    }
}
