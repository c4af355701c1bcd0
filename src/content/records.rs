//! Content records shown by the portfolio sections.
//!
//! Records are plain data. They are deserialized once at startup, checked by
//! the [`ContentValidator`](super::ContentValidator) and never mutated.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::gradient::Gradient;

/// Hero section data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    /// Full name
    pub name: String,
    /// Static headline under the name
    pub headline: String,
    /// Tagline revealed by the typing effect
    pub tagline: String,
    /// City / region
    pub location: String,
    /// Contact email shown in the quick-info row
    pub email: String,
    /// Contact phone shown in the quick-info row
    pub phone: String,
    /// Short biography paragraph
    pub bio: String,
    /// Optional portrait description (terminals cannot show the image)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portrait: Option<String>,
}

/// A category of skills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Skill {
    /// Category heading, unique within the section
    pub category: String,
    /// Icon hint (`code`, `globe`, `database`, ...)
    pub icon: String,
    /// Skills listed under the category
    pub skills: Vec<String>,
    /// Card gradient
    pub gradient: Gradient,
}

/// Kind of an experience entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceKind {
    /// Work placement
    Internship,
    /// Virtual job simulation
    Simulation,
    /// Online course
    Course,
}

impl ExperienceKind {
    /// Badge text shown on the card.
    #[must_use]
    pub const fn badge(self) -> &'static str {
        match self {
            Self::Internship => "Internship",
            Self::Simulation => "Job Simulation",
            Self::Course => "Course",
        }
    }
}

impl fmt::Display for ExperienceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.badge())
    }
}

/// One experience or learning entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExperienceItem {
    /// Organization
    pub company: String,
    /// Role or programme
    pub role: String,
    /// Free-form period (`Oct 2024`)
    pub period: String,
    /// Entry kind
    #[serde(rename = "type")]
    pub kind: ExperienceKind,
    /// Card gradient
    pub gradient: Gradient,
}

/// A featured project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    /// Project title, unique within the section
    pub title: String,
    /// One-line description
    pub description: String,
    /// Icon hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Card gradient
    pub gradient: Gradient,
    /// Technology tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Key features
    #[serde(default)]
    pub features: Vec<String>,
}

/// Category of a certification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificationCategory {
    /// Programming languages
    Programming,
    /// Data analytics
    Analytics,
    /// Software testing
    Testing,
}

impl CertificationCategory {
    /// Badge text shown on the card.
    #[must_use]
    pub const fn badge(self) -> &'static str {
        match self {
            Self::Programming => "Programming",
            Self::Analytics => "Data Analytics",
            Self::Testing => "Testing",
        }
    }
}

impl fmt::Display for CertificationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.badge())
    }
}

/// A certification or completed programme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Certification {
    /// Issuing organization
    pub organization: String,
    /// Certificate title
    pub title: String,
    /// Free-form period (`Feb - May 2025`)
    pub period: String,
    /// Card gradient
    pub gradient: Gradient,
    /// Category badge
    pub category: CertificationCategory,
}

/// A contact method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactEntry {
    /// Label, unique within the section
    pub label: String,
    /// Displayed value
    pub value: String,
    /// Activation endpoint, passed through unchanged
    pub href: String,
    /// Card gradient
    pub gradient: Gradient,
}

/// A call-to-action button with an external endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CallToAction {
    /// Button text
    pub label: String,
    /// Activation endpoint, passed through unchanged
    pub href: String,
}
