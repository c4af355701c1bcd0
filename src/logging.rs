//! Tracing subscriber setup.
//!
//! The TUI owns the terminal, so its events go to a log file. CLI
//! subcommands log to stderr when asked to (`-v`). The filter comes from
//! `FOLIO_LOG`, then `RUST_LOG`, then the verbosity flag.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::branding;
use crate::config::Config;

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Append to a file
    File(PathBuf),
    /// Write to stderr
    Stderr,
    /// Discard everything
    Off,
}

impl LogTarget {
    /// Log file next to the config file.
    pub fn default_file() -> Result<Self> {
        Ok(Self::File(Config::config_dir()?.join(branding::LOG_FILE_NAME)))
    }
}

/// Filter directive for a verbosity count (`-v`, `-vv`).
#[must_use]
pub const fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info,folio=debug",
        _ => "trace",
    }
}

fn env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_env(branding::LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)))
}

/// Installs the global subscriber.
///
/// Calling this twice is harmless; the second call leaves the first
/// subscriber in place.
pub fn init(target: &LogTarget, verbosity: u8) -> Result<()> {
    let filter = env_filter(verbosity);

    let installed = match target {
        LogTarget::Off => return Ok(()),
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .try_init(),
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false),
                )
                .try_init()
        }
    };

    if installed.is_ok() {
        tracing::debug!(?target, verbosity, "logging initialized");
    }
    Ok(())
}

fn open_log_file(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context(format!(
            "Failed to create log directory: {}",
            parent.display()
        ))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .context(format!("Failed to open log file: {}", path.display()))
}
