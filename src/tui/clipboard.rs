//! System clipboard hand-off for contact endpoints.

use anyhow::{Context, Result};

/// Kind of endpoint behind a contact link or call to action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    /// `mailto:` address
    Email,
    /// `tel:` number
    Phone,
    /// `http(s)://` URL
    Web,
    /// In-page anchor (`#...`)
    Anchor,
    /// Anything else
    Other,
}

impl EndpointKind {
    /// Classifies `endpoint` by its scheme.
    #[must_use]
    pub fn of(endpoint: &str) -> Self {
        if endpoint.starts_with("mailto:") {
            Self::Email
        } else if endpoint.starts_with("tel:") {
            Self::Phone
        } else if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            Self::Web
        } else if endpoint.starts_with('#') {
            Self::Anchor
        } else {
            Self::Other
        }
    }

    /// Noun used in status messages.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Email => "email link",
            Self::Phone => "phone link",
            Self::Web => "web link",
            Self::Anchor => "anchor",
            Self::Other => "link",
        }
    }
}

/// Copies `endpoint` to the system clipboard unchanged.
pub fn copy_endpoint(endpoint: &str) -> Result<()> {
    arboard::Clipboard::new()
        .and_then(|mut clipboard| clipboard.set_text(endpoint.to_owned()))
        .context("Failed to access the system clipboard")?;
    Ok(())
}

/// Status line shown after a successful copy.
#[must_use]
pub fn copied_message(label: &str, endpoint: &str) -> String {
    format!(
        "Copied {} {} ({endpoint})",
        label,
        EndpointKind::of(endpoint).noun()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_kind() {
        assert_eq!(
            EndpointKind::of("mailto:a@b.c?subject=Project Collaboration"),
            EndpointKind::Email
        );
        assert_eq!(EndpointKind::of("tel:+918088128353"), EndpointKind::Phone);
        assert_eq!(EndpointKind::of("https://github.com/"), EndpointKind::Web);
        assert_eq!(EndpointKind::of("#"), EndpointKind::Anchor);
        assert_eq!(EndpointKind::of("ftp://x"), EndpointKind::Other);
    }

    #[test]
    fn test_copied_message_keeps_endpoint_verbatim() {
        let message =
            copied_message("Start a Project", "mailto:a@b.c?subject=Project Collaboration");
        assert_eq!(
            message,
            "Copied Start a Project email link (mailto:a@b.c?subject=Project Collaboration)"
        );
    }
}
