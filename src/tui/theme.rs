//! Theme system for consistent UI colors across dark and light modes.
//!
//! Besides the usual semantic colors a theme carries one color per gradient
//! [`Tone`], so content records can name their accent without knowing the
//! terminal background.

use ratatui::style::Color;

use crate::config::ThemeMode;
use crate::content::{Gradient, Tone};

/// Semantic color theme for the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // Primary UI colors
    /// Primary color for borders, titles, and emphasis
    pub primary: Color,
    /// Accent color for highlights, selections, and focus states
    pub accent: Color,
    /// Success state color for confirmations
    pub success: Color,
    /// Error state color
    pub error: Color,
    /// Warning state color
    pub warning: Color,

    // Gradient tones
    /// Lighter companion of `primary`
    pub primary_glow: Color,
    /// Brighter companion of `accent`
    pub accent_bright: Color,
    /// Third brand color
    pub secondary: Color,

    // Text hierarchy
    /// Primary text content color
    pub text: Color,
    /// Secondary text color for labels and less important content
    pub text_secondary: Color,
    /// Muted text color for help text and entering rows
    pub text_muted: Color,

    // Backgrounds
    /// Main background color
    pub background: Color,
    /// Highlight/selection background color
    pub highlight_bg: Color,
    /// Surface color for panels and elevated elements
    pub surface: Color,

    // State indicators
    /// Active/focused element color
    pub active: Color,
    /// Inactive element color
    pub inactive: Color,
}

/// Theme variant identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    /// Dark theme optimized for dark terminal backgrounds
    Dark,
    /// Light theme optimized for light terminal backgrounds
    Light,
}

impl Theme {
    /// Detects the OS theme and returns the appropriate Theme.
    #[must_use]
    pub fn detect() -> Self {
        match dark_light::detect() {
            Ok(dark_light::Mode::Light) => Self::light(),
            // Fall back to dark theme for dark mode, unspecified, or errors
            Ok(dark_light::Mode::Dark | dark_light::Mode::Unspecified) | Err(_) => Self::dark(),
        }
    }

    /// Resolves a configured preference.
    #[must_use]
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Auto => Self::detect(),
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Creates a dark theme optimized for dark terminal backgrounds.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::Rgb(139, 92, 246),
            accent: Color::Rgb(34, 211, 238),
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,

            primary_glow: Color::Rgb(196, 181, 253),
            accent_bright: Color::Rgb(103, 232, 249),
            secondary: Color::Rgb(236, 72, 153),

            text: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::DarkGray,

            background: Color::Black,
            highlight_bg: Color::Rgb(49, 46, 80),
            surface: Color::Rgb(24, 24, 32),

            active: Color::Rgb(34, 211, 238),
            inactive: Color::Gray,
        }
    }

    /// Creates a light theme optimized for light terminal backgrounds.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::Rgb(91, 33, 182),
            accent: Color::Rgb(14, 116, 144),
            success: Color::Rgb(0, 128, 0),
            error: Color::Red,
            warning: Color::Rgb(200, 100, 0),

            primary_glow: Color::Rgb(124, 58, 237),
            accent_bright: Color::Rgb(8, 145, 178),
            secondary: Color::Rgb(190, 24, 93),

            text: Color::Black,
            text_secondary: Color::Rgb(60, 60, 60),
            text_muted: Color::Gray,

            background: Color::White,
            highlight_bg: Color::Rgb(237, 233, 254),
            surface: Color::Rgb(245, 245, 245),

            active: Color::Rgb(14, 116, 144),
            inactive: Color::Rgb(180, 180, 180),
        }
    }

    /// Creates a theme from a variant enum.
    #[must_use]
    pub const fn from_variant(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Dark => Self::dark(),
            ThemeVariant::Light => Self::light(),
        }
    }

    /// Returns the theme variant, judged by the background color.
    #[must_use]
    pub const fn variant(&self) -> ThemeVariant {
        match self.background {
            Color::White | Color::Rgb(255, 255, 255) | Color::Rgb(245, 245, 245) => {
                ThemeVariant::Light
            }
            _ => ThemeVariant::Dark,
        }
    }

    /// Color of a gradient tone.
    #[must_use]
    pub const fn tone(&self, tone: Tone) -> Color {
        match tone {
            Tone::Primary => self.primary,
            Tone::PrimaryGlow => self.primary_glow,
            Tone::Accent => self.accent,
            Tone::AccentBright => self.accent_bright,
            Tone::Secondary => self.secondary,
        }
    }

    /// Start and end colors of a gradient.
    #[must_use]
    pub const fn gradient(&self, gradient: Gradient) -> (Color, Color) {
        (self.tone(gradient.from), self.tone(gradient.to))
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}
