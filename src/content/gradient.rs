//! Gradient presentation tokens.
//!
//! Content records carry a two-tone gradient written as
//! `"from-<tone> to-<tone>"`. The terminal frontend maps each tone onto a
//! theme color; exports keep the token string verbatim.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named color tone of the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tone {
    /// Main brand color
    Primary,
    /// Lighter variant of the primary color
    PrimaryGlow,
    /// Accent color
    Accent,
    /// Brighter accent
    AccentBright,
    /// Secondary color
    Secondary,
}

impl Tone {
    /// All tones in palette order.
    pub const ALL: [Self; 5] = [
        Self::Primary,
        Self::PrimaryGlow,
        Self::Accent,
        Self::AccentBright,
        Self::Secondary,
    ];

    /// Token name as written in content files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::PrimaryGlow => "primary-glow",
            Self::Accent => "accent",
            Self::AccentBright => "accent-bright",
            Self::Secondary => "secondary",
        }
    }

    /// Parses a tone name (`primary`, `accent-bright`, ...).
    pub fn parse(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|tone| tone.name() == name)
            .ok_or_else(|| anyhow::anyhow!("Unknown tone '{name}'"))
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Two-stop gradient used to decorate a card or badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Gradient {
    /// Starting tone
    pub from: Tone,
    /// Ending tone
    pub to: Tone,
}

impl Gradient {
    /// Creates a gradient between two tones.
    #[must_use]
    pub const fn new(from: Tone, to: Tone) -> Self {
        Self { from, to }
    }

    /// Parses `"from-<tone> to-<tone>"`.
    ///
    /// # Errors
    ///
    /// Returns an error if either stop is missing or names an unknown tone.
    pub fn parse(token: &str) -> Result<Self> {
        let mut parts = token.split_whitespace();
        let (Some(from), Some(to), None) = (parts.next(), parts.next(), parts.next()) else {
            bail!("Invalid gradient '{token}'. Expected 'from-<tone> to-<tone>'");
        };

        let Some(from) = from.strip_prefix("from-") else {
            bail!("Invalid gradient '{token}'. First stop must start with 'from-'");
        };
        let Some(to) = to.strip_prefix("to-") else {
            bail!("Invalid gradient '{token}'. Second stop must start with 'to-'");
        };

        Ok(Self::new(Tone::parse(from)?, Tone::parse(to)?))
    }
}

impl Default for Gradient {
    fn default() -> Self {
        Self::new(Tone::Primary, Tone::PrimaryGlow)
    }
}

impl fmt::Display for Gradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "from-{} to-{}", self.from, self.to)
    }
}

impl std::str::FromStr for Gradient {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Gradient {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Gradient> for String {
    fn from(gradient: Gradient) -> Self {
        gradient.to_string()
    }
}
