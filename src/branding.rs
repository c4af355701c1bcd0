//! Branding and application identity.
//!
//! All user-visible names and file names live here so renaming the
//! application touches one file.

/// The human-readable display name of the application.
///
/// Used in:
/// - Terminal title bar
/// - Help overlay
/// - Export headers
pub const APP_DISPLAY_NAME: &str = "Folio";

/// The binary/executable name (lowercase, no spaces).
///
/// Used in:
/// - Cargo.toml package name
/// - Command examples in help text
pub const APP_BINARY_NAME: &str = "folio";

/// The directory name for application data (config, logs).
///
/// Used in platform-specific paths:
/// - Linux: `~/.config/{APP_DATA_DIR}/`
/// - macOS: `~/Library/Application Support/{APP_DATA_DIR}/`
/// - Windows: `%APPDATA%\{APP_DATA_DIR}\`
pub const APP_DATA_DIR: &str = "Folio";

/// Short description for package metadata and help text.
pub const APP_DESCRIPTION: &str = "Animated terminal portfolio with scroll-triggered reveals";

/// Default log file name (inside the config directory).
pub const LOG_FILE_NAME: &str = "folio.log";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "FOLIO_LOG";

/// Title shown in the terminal frame.
#[must_use]
pub fn window_title(name: &str) -> String {
    format!("{APP_DISPLAY_NAME} · {name}")
}
