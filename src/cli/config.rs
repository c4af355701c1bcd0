//! Configuration management CLI commands.

use crate::cli::common::{CliError, CliResult};
use crate::config::{Config, ThemeMode};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Print the config file location
    Path,
    /// Write a config file with default values
    Init(ConfigInitArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Write a default config file
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    force: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Theme mode
    #[arg(long, value_enum, value_name = "MODE")]
    theme: Option<ThemeMode>,

    /// Turn reveal animations on or off
    #[arg(long, value_name = "BOOL")]
    animation: Option<bool>,

    /// Content table used instead of the built-in one
    #[arg(long, value_name = "FILE")]
    content: Option<PathBuf>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput<'a> {
    path: String,
    exists: bool,
    #[serde(flatten)]
    config: &'a Config,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Path => print_path(),
            ConfigCommand::Init(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

fn config_path() -> CliResult<PathBuf> {
    Config::config_file_path()
        .map_err(|e| CliError::io(format!("Failed to locate config file: {e}")))
}

fn print_path() -> CliResult<()> {
    println!("{}", config_path()?.display());
    Ok(())
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            output_json(&config)?;
        } else {
            output_human_readable(&config);
        }

        Ok(())
    }
}

impl ConfigInitArgs {
    /// Execute init command
    pub fn execute(&self) -> CliResult<()> {
        let path = config_path()?;
        if path.exists() && !self.force {
            return Err(CliError::validation(format!(
                "Config file already exists: {} (use --force to overwrite)",
                path.display()
            )));
        }

        Config::default()
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Wrote default configuration to {}", path.display());
        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.theme.is_none() && self.animation.is_none() && self.content.is_none() {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --theme, --animation, or --content",
            ));
        }

        let mut config = Config::load().unwrap_or_else(|e| {
            tracing::warn!("unreadable config replaced by defaults: {e:#}");
            Config::default()
        });

        if let Some(theme) = self.theme {
            config.ui.theme_mode = theme;
        }

        if let Some(enabled) = self.animation {
            config.motion.enabled = enabled;
        }

        if let Some(path) = &self.content {
            if !path.exists() {
                return Err(CliError::validation(format!(
                    "Content file does not exist: {}",
                    path.display()
                )));
            }
            config.paths.content = Some(path.clone());
        }

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

/// Output configuration in JSON format
fn output_json(config: &Config) -> CliResult<()> {
    let path = config_path()?;
    let output = ConfigOutput {
        path: path.to_string_lossy().to_string(),
        exists: path.exists(),
        config,
    };

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| CliError::io(format!("Failed to serialize configuration to JSON: {e}")))?;

    println!("{json}");
    Ok(())
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    println!("Folio Configuration");
    println!("===================");
    println!();

    println!("Paths:");
    match &config.paths.content {
        Some(path) => println!("  Content: {}", path.display()),
        None => println!("  Content: (built-in)"),
    }
    println!();

    println!("UI:");
    println!("  Theme Mode: {}", config.ui.theme_mode.name());
    println!("  Help on Startup: {}", config.ui.show_help_on_startup);
    println!("  Frame Interval: {}ms", config.ui.frame_interval_ms);
    println!();

    let motion = &config.motion;
    println!("Motion:");
    println!("  Animation: {}", if motion.enabled { "on" } else { "off" });
    println!(
        "  Stagger (ms): skills {}, experience {}, projects {}, certifications {}, contact {}",
        motion.skills_interval_ms,
        motion.experience_interval_ms,
        motion.projects_interval_ms,
        motion.certifications_interval_ms,
        motion.contact_interval_ms
    );
    println!("  Typing Interval: {}ms", motion.typing_interval_ms);
    println!(
        "  Thresholds: item {}, header {}",
        motion.item_threshold, motion.header_threshold
    );
    println!("  Scroll-to-top After: {} units", motion.scroll_top_threshold);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: ConfigArgs,
    }

    #[test]
    fn test_set_parses_theme_and_animation() {
        let harness =
            Harness::try_parse_from(["folio", "set", "--theme", "light", "--animation", "false"])
                .unwrap();
        match harness.args.command {
            ConfigCommand::Set(set) => {
                assert_eq!(set.theme, Some(ThemeMode::Light));
                assert_eq!(set.animation, Some(false));
                assert!(set.content.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_set_rejects_unknown_theme() {
        assert!(Harness::try_parse_from(["folio", "set", "--theme", "sepia"]).is_err());
    }

    #[test]
    fn test_set_without_options_fails_validation() {
        let set = ConfigSetArgs {
            theme: None,
            animation: None,
            content: None,
        };
        assert_eq!(set.execute().unwrap_err().exit_code(), 1);
    }
}
