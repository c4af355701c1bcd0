//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::branding;

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "FOLIO_CONFIG_DIR";

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
pub enum ThemeMode {
    /// Automatically detect OS theme (dark/light)
    #[default]
    Auto,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

impl ThemeMode {
    /// Lowercase name as accepted on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Content table used instead of the built-in one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<PathBuf>,
}

/// UI preferences configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Display help on startup
    #[serde(default)]
    pub show_help_on_startup: bool,
    /// Theme mode preference (Auto, Dark, Light)
    #[serde(default)]
    pub theme_mode: ThemeMode,
    /// Redraw interval of the terminal loop in milliseconds
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u64,
}

fn default_frame_interval() -> u64 {
    16
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_help_on_startup: false,
            theme_mode: ThemeMode::default(),
            frame_interval_ms: default_frame_interval(),
        }
    }
}

/// Animation timing preferences.
///
/// Intervals are in milliseconds; thresholds are visible fractions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Run reveal animations (false shows everything immediately)
    pub enabled: bool,
    /// Stagger step of the skills section
    pub skills_interval_ms: u64,
    /// Stagger step of the experience section
    pub experience_interval_ms: u64,
    /// Stagger step of the projects section
    pub projects_interval_ms: u64,
    /// Stagger step of the certifications section
    pub certifications_interval_ms: u64,
    /// Stagger step of the contact section
    pub contact_interval_ms: u64,
    /// Delay between typed hero characters
    pub typing_interval_ms: u64,
    /// Fraction of an item that must be visible before it reveals
    pub item_threshold: f32,
    /// Fraction of a section header that must be visible
    pub header_threshold: f32,
    /// Scroll offset (document units) that shows the back-to-top control
    pub scroll_top_threshold: u32,
    /// Length of the entering transition
    pub transition_ms: u64,
    /// Length of smooth scroll jumps
    pub scroll_duration_ms: u64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            skills_interval_ms: 200,
            experience_interval_ms: 300,
            projects_interval_ms: 400,
            certifications_interval_ms: 150,
            contact_interval_ms: 200,
            typing_interval_ms: 50,
            item_threshold: 0.3,
            header_threshold: 0.1,
            scroll_top_threshold: 500,
            transition_ms: 700,
            scroll_duration_ms: 450,
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/Folio/config.toml`
/// - macOS: `~/Library/Application Support/Folio/config.toml`
/// - Windows: `%APPDATA%\Folio\config.toml`
///
/// `FOLIO_CONFIG_DIR` replaces the directory on every platform.
///
/// # Validation
///
/// - thresholds must lie in `0.0..=1.0`
/// - typing and frame intervals must be non-zero
/// - a configured content path must exist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
    /// Animation timing
    #[serde(default)]
    pub motion: MotionConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the config directory path.
    ///
    /// - `$FOLIO_CONFIG_DIR` when set
    /// - Linux: `~/.config/Folio/`
    /// - macOS: `~/Library/Application Support/Folio/`
    /// - Windows: `%APPDATA%\Folio\`
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(branding::APP_DATA_DIR);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate().context(format!(
            "Invalid config file: {}",
            config_path.display()
        ))?;

        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        // Ensure config directory exists
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        // Atomic rename
        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        tracing::info!(path = %config_path.display(), "saved config");
        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if let Some(content) = &self.paths.content {
            if !content.exists() {
                anyhow::bail!("Content file does not exist: {}", content.display());
            }
        }

        if self.ui.frame_interval_ms == 0 {
            anyhow::bail!("ui.frame_interval_ms must be greater than 0");
        }

        let motion = &self.motion;
        for (name, value) in [
            ("motion.item_threshold", motion.item_threshold),
            ("motion.header_threshold", motion.header_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                anyhow::bail!("{name} must be between 0.0 and 1.0, got {value}");
            }
        }

        if motion.typing_interval_ms == 0 {
            anyhow::bail!("motion.typing_interval_ms must be greater than 0");
        }

        Ok(())
    }
}
