//! Static renderings of the portfolio.
//!
//! Exports show every item at once: there is no viewport, so nothing is
//! staggered or hidden.

pub mod markdown;
pub mod text;

pub use markdown::export_to_markdown;
pub use text::export_to_text;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

use crate::content::{CertificationSummary, Content};
use crate::page::SectionId;

/// Output format of `folio export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Markdown with anchored section headings
    Markdown,
    /// Content table plus section metadata as JSON
    Json,
    /// Plain text
    Text,
}

impl ExportFormat {
    /// Conventional file extension.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Json => "json",
            Self::Text => "txt",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Markdown => "markdown",
            Self::Json => "json",
            Self::Text => "text",
        };
        f.write_str(name)
    }
}

/// Heading metadata of one section.
#[derive(Debug, Clone, Serialize)]
pub struct SectionHeading {
    /// In-page anchor
    pub anchor: &'static str,
    /// Heading
    pub title: &'static str,
    /// Line under the heading (empty for the hero)
    pub subtitle: &'static str,
}

/// JSON export payload.
#[derive(Debug, Clone, Serialize)]
pub struct JsonExport<'a> {
    /// Sections in page order
    pub sections: Vec<SectionHeading>,
    /// Figures under the certification grid
    pub certification_summary: CertificationSummary,
    /// The content table
    pub content: &'a Content,
}

impl<'a> JsonExport<'a> {
    /// Collects the payload for `content`.
    #[must_use]
    pub fn new(content: &'a Content) -> Self {
        Self {
            sections: SectionId::ALL
                .into_iter()
                .map(|id| SectionHeading {
                    anchor: id.anchor(),
                    title: id.title(),
                    subtitle: id.subtitle(),
                })
                .collect(),
            certification_summary: content.certification_summary(),
            content,
        }
    }
}

/// Renders `content` in `format`.
pub fn render(content: &Content, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Markdown => Ok(export_to_markdown(content)),
        ExportFormat::Text => Ok(export_to_text(content)),
        ExportFormat::Json => {
            let mut json = serde_json::to_string_pretty(&JsonExport::new(content))
                .context("Failed to serialize content to JSON")?;
            json.push('\n');
            Ok(json)
        }
    }
}
