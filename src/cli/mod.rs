//! CLI command handlers for Folio.
//!
//! Headless, scriptable access to the content table and configuration:
//! validation, static export and config management.

pub mod common;
pub mod config;
pub mod export;
pub mod validate;

pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use export::ExportArgs;
pub use validate::ValidateArgs;
