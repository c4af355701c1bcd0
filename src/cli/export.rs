//! Export command: static renderings of the portfolio.

use crate::cli::common::{read_content, CliError, CliResult};
use crate::export::{self, ExportFormat};
use clap::Args;
use std::path::PathBuf;

/// Export the portfolio with every item visible
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Markdown)]
    pub format: ExportFormat,

    /// Content table to export (defaults to the built-in one)
    #[arg(short, long, value_name = "FILE")]
    pub content: Option<PathBuf>,

    /// Write to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self) -> CliResult<()> {
        let content = read_content(self.content.as_deref())?;
        let report = content.validate();
        if !report.is_valid() {
            return Err(CliError::validation(report.format_message().trim_end()));
        }

        let rendered = export::render(&content, self.format)
            .map_err(|e| CliError::io(format!("Failed to export: {e:#}")))?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, rendered).map_err(|e| {
                    CliError::io(format!("Failed to write {}: {e}", path.display()))
                })?;
                tracing::info!(path = %path.display(), format = %self.format, "exported portfolio");
                eprintln!("✓ Exported {} to {}", self.format, path.display());
            }
            None => print!("{rendered}"),
        }

        Ok(())
    }
}
