//! Folio - animated terminal portfolio
//!
//! Without a subcommand the portfolio opens in the terminal. Subcommands give
//! headless access to validation, export and configuration.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::warn;

use folio::cli::{CliError, ConfigArgs, ExportArgs, ValidateArgs};
use folio::config::{Config, ThemeMode};
use folio::content::Content;
use folio::logging::{self, LogTarget};
use folio::page::MotionSettings;
use folio::tui::{self, Theme};

/// Folio - animated terminal portfolio
#[derive(Parser, Debug)]
#[command(author, version, about = folio::branding::APP_DESCRIPTION, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Content table to show instead of the built-in one
    #[arg(long, value_name = "FILE")]
    content: Option<PathBuf>,

    /// Show every item immediately, without reveal animations
    #[arg(long)]
    no_animation: bool,

    /// Theme mode (overrides the config file)
    #[arg(long, value_enum, value_name = "MODE")]
    theme: Option<ThemeMode>,

    /// Write logs to FILE instead of the default log file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a content table
    Validate(ValidateArgs),
    /// Export the portfolio as Markdown, JSON or plain text
    Export(ExportArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    let Some(command) = cli.command.take() else {
        return run_tui(&cli);
    };

    let target = if cli.verbose > 0 {
        LogTarget::Stderr
    } else {
        LogTarget::Off
    };
    logging::init(&target, cli.verbose)?;

    let result = match command {
        Commands::Validate(args) => args.execute(),
        Commands::Export(args) => args.execute(),
        Commands::Config(args) => args.execute(),
    };

    if let Err(err) = result {
        exit_with(&err);
    }
    Ok(())
}

fn exit_with(err: &CliError) -> ! {
    eprintln!("Error: {err}");
    std::process::exit(err.exit_code());
}

fn run_tui(cli: &Cli) -> Result<()> {
    let target = match &cli.log_file {
        Some(path) => LogTarget::File(path.clone()),
        None => LogTarget::default_file().unwrap_or(LogTarget::Off),
    };
    logging::init(&target, cli.verbose)?;

    let config = Config::load().unwrap_or_else(|e| {
        warn!("using default configuration: {e:#}");
        Config::default()
    });

    let theme = Theme::from_mode(cli.theme.unwrap_or(config.ui.theme_mode));

    let mut motion = MotionSettings::from(&config.motion);
    if cli.no_animation {
        motion = motion.without_animation();
    }

    let content_path = cli.content.as_ref().or(config.paths.content.as_ref());
    let content = Content::load(content_path.map(PathBuf::as_path))
        .context("Failed to load portfolio content")?;

    tui::run(content, config, motion, theme)
}
