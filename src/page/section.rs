//! Section identities, anchors and headings.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::reveal::Millis;

/// One of the portfolio's page sections, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    /// Name, headline, typed tagline
    Hero,
    /// Skill categories
    Skills,
    /// Experience and learning
    Experience,
    /// Featured projects
    Projects,
    /// Certifications and summary
    Certifications,
    /// Contact methods and calls to action
    Contact,
}

impl SectionId {
    /// All sections in page order.
    pub const ALL: [Self; 6] = [
        Self::Hero,
        Self::Skills,
        Self::Experience,
        Self::Projects,
        Self::Certifications,
        Self::Contact,
    ];

    /// Sections whose items reveal with a stagger.
    pub const STAGGERED: [Self; 5] = [
        Self::Skills,
        Self::Experience,
        Self::Projects,
        Self::Certifications,
        Self::Contact,
    ];

    /// Position in page order.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Section at `index` in page order.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// In-page anchor.
    #[must_use]
    pub const fn anchor(self) -> &'static str {
        match self {
            Self::Hero => "home",
            Self::Skills => "skills",
            Self::Experience => "experience",
            Self::Projects => "projects",
            Self::Certifications => "certifications",
            Self::Contact => "contact",
        }
    }

    /// Resolves an anchor (with or without `#`). `about` names the skills
    /// section.
    #[must_use]
    pub fn from_anchor(anchor: &str) -> Option<Self> {
        let anchor = anchor.strip_prefix('#').unwrap_or(anchor);
        if anchor == "about" {
            return Some(Self::Skills);
        }
        Self::ALL.into_iter().find(|id| id.anchor() == anchor)
    }

    /// Short label for the navigation bar.
    #[must_use]
    pub const fn nav_label(self) -> &'static str {
        match self {
            Self::Hero => "Home",
            Self::Skills => "Skills",
            Self::Experience => "Experience",
            Self::Projects => "Projects",
            Self::Certifications => "Certifications",
            Self::Contact => "Contact",
        }
    }

    /// Section heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Hero => "Home",
            Self::Skills => "Technical Skills",
            Self::Experience => "Experience & Learning",
            Self::Projects => "Featured Projects",
            Self::Certifications => "Certifications & Achievements",
            Self::Contact => "Let's Connect",
        }
    }

    /// Line under the heading.
    #[must_use]
    pub const fn subtitle(self) -> &'static str {
        match self {
            Self::Hero => "",
            Self::Skills => {
                "Expertise across multiple technologies and frameworks, with a focus on building robust and scalable solutions."
            }
            Self::Experience => {
                "Hands-on experience through internships, industry simulations, and continuous learning initiatives."
            }
            Self::Projects => {
                "Innovative solutions built with cutting-edge technology to solve real-world problems and create meaningful impact."
            }
            Self::Certifications => {
                "Continuous learning through industry-recognized certifications and professional development programs."
            }
            Self::Contact => {
                "Ready to collaborate on exciting projects or discuss new opportunities? I'd love to hear from you!"
            }
        }
    }

    /// Stagger step used when the configuration does not override it.
    #[must_use]
    pub const fn default_interval(self) -> Millis {
        match self {
            Self::Hero => 0,
            Self::Skills | Self::Contact => 200,
            Self::Experience => 300,
            Self::Projects => 400,
            Self::Certifications => 150,
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.anchor())
    }
}
