//! Help registry for centralized keybinding definitions.
//!
//! Bindings are loaded from an embedded TOML file and queried by context for
//! the status bar and the help overlay.

use serde::Deserialize;
use std::collections::HashMap;
use tracing::warn;

/// Embedded help definitions TOML file
const HELP_TOML: &str = include_str!("../data/help.toml");

/// A single keybinding definition
#[derive(Debug, Clone, Deserialize)]
pub struct Binding {
    /// Primary key(s) for this action
    pub keys: Vec<String>,
    /// Alternative keys (optional)
    #[serde(default)]
    pub alt_keys: Vec<String>,
    /// Full description of the action
    pub action: String,
    /// Short hint for status bar (optional, uses the action if not set)
    pub hint: Option<String>,
    /// Priority for display order (lower = more important, shown first)
    #[serde(default = "default_priority")]
    pub priority: u32,
}

const fn default_priority() -> u32 {
    50
}

/// A context with its bindings
#[derive(Debug, Clone, Deserialize)]
pub struct Context {
    /// Human-readable name
    pub name: String,
    /// Description of when this context is active
    pub description: String,
    /// Keybindings for this context
    pub bindings: Vec<Binding>,
}

/// Metadata about the help file
#[derive(Debug, Clone, Deserialize)]
pub struct HelpMeta {
    /// Version of the help file format
    pub version: String,
    /// Name of the application
    pub app_name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct HelpFile {
    meta: HelpMeta,
    contexts: HashMap<String, Context>,
}

/// Help registry providing access to keybinding definitions
#[derive(Debug, Clone)]
pub struct HelpRegistry {
    meta: HelpMeta,
    contexts: HashMap<String, Context>,
}

impl HelpRegistry {
    /// Load the help registry from the embedded TOML file
    pub fn load() -> Result<Self, toml::de::Error> {
        Self::parse(HELP_TOML)
    }

    fn parse(text: &str) -> Result<Self, toml::de::Error> {
        let help_file: HelpFile = toml::from_str(text)?;
        Ok(Self {
            meta: help_file.meta,
            contexts: help_file.contexts,
        })
    }

    /// Get the app name from metadata
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.meta.app_name
    }

    /// Get help file version from metadata.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.meta.version
    }

    /// Get a context by name
    #[must_use]
    pub fn get_context(&self, name: &str) -> Option<&Context> {
        self.contexts.get(name)
    }

    /// Get all bindings for a context, sorted by priority
    #[must_use]
    pub fn get_bindings(&self, context_name: &str) -> Vec<&Binding> {
        let Some(context) = self.contexts.get(context_name) else {
            return Vec::new();
        };
        let mut bindings: Vec<&Binding> = context.bindings.iter().collect();
        bindings.sort_by_key(|b| b.priority);
        bindings
    }

    /// Bindings with a hint, sorted by priority
    #[must_use]
    pub fn get_status_bar_hints(&self, context_name: &str) -> Vec<&Binding> {
        self.get_bindings(context_name)
            .into_iter()
            .filter(|b| b.hint.is_some())
            .collect()
    }

    /// Format a binding for display in help overlay
    /// Returns (`keys_string`, `action_string`)
    #[must_use]
    pub fn format_binding_for_help(binding: &Binding) -> (String, String) {
        let keys = if binding.alt_keys.is_empty() {
            binding.keys.join("/")
        } else {
            format!(
                "{} ({})",
                binding.keys.join("/"),
                binding.alt_keys.join("/")
            )
        };
        (keys, binding.action.clone())
    }

    /// Format bindings for status bar display as `(key, hint)` pairs.
    #[must_use]
    pub fn format_status_bar_hints(
        &self,
        context_name: &str,
        max_hints: usize,
    ) -> Vec<(String, String)> {
        self.get_status_bar_hints(context_name)
            .into_iter()
            .take(max_hints)
            .map(|b| {
                let key = b.keys.first().map_or("", String::as_str);
                let hint = b.hint.as_deref().unwrap_or(&b.action);
                (key.to_string(), hint.to_string())
            })
            .collect()
    }
}

impl Default for HelpRegistry {
    fn default() -> Self {
        Self::load().unwrap_or_else(|err| {
            warn!(%err, "embedded help.toml failed to parse");
            Self {
                meta: HelpMeta {
                    version: String::new(),
                    app_name: crate::branding::APP_DISPLAY_NAME.to_string(),
                },
                contexts: HashMap::new(),
            }
        })
    }
}

/// Known context names
pub mod contexts {
    /// Reading the page
    pub const MAIN: &str = "main";
    /// A link is focused
    pub const FOCUS: &str = "focus";
    /// Help overlay
    pub const HELP: &str = "help";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_help_registry() {
        let registry = HelpRegistry::load().expect("Failed to load help registry");
        assert_eq!(registry.app_name(), "Folio");
        assert_eq!(registry.version(), "1.0");
    }

    #[test]
    fn test_all_contexts_present() {
        let registry = HelpRegistry::load().unwrap();
        for name in [contexts::MAIN, contexts::FOCUS, contexts::HELP] {
            assert!(registry.get_context(name).is_some(), "{name}");
        }
    }

    #[test]
    fn test_get_bindings_sorted_by_priority() {
        let registry = HelpRegistry::load().unwrap();
        let bindings = registry.get_bindings(contexts::MAIN);
        assert!(!bindings.is_empty());
        for window in bindings.windows(2) {
            assert!(window[0].priority <= window[1].priority);
        }
    }

    #[test]
    fn test_format_status_bar_hints() {
        let registry = HelpRegistry::load().unwrap();
        let hints = registry.format_status_bar_hints(contexts::MAIN, 3);
        assert_eq!(hints.len(), 3);
        assert_eq!(hints[0], ("j".to_string(), "Scroll".to_string()));
        assert_eq!(hints[1], ("1-6".to_string(), "Section".to_string()));
    }

    #[test]
    fn test_unknown_context_is_empty() {
        let registry = HelpRegistry::load().unwrap();
        assert!(registry.get_bindings("nope").is_empty());
    }

    #[test]
    fn test_format_binding_for_help() {
        let binding = Binding {
            keys: vec!["q".to_string(), "Esc".to_string()],
            alt_keys: vec!["Ctrl+C".to_string()],
            action: "Quit".to_string(),
            hint: None,
            priority: 1,
        };
        let (keys, action) = HelpRegistry::format_binding_for_help(&binding);
        assert_eq!(keys, "q/Esc (Ctrl+C)");
        assert_eq!(action, "Quit");
    }

    #[test]
    fn test_default_priority() {
        let registry = HelpRegistry::parse(
            r#"
            [meta]
            version = "0"
            app_name = "x"
            [contexts.a]
            name = "A"
            description = "a"
            [[contexts.a.bindings]]
            keys = ["z"]
            action = "zap"
            "#,
        )
        .unwrap();
        assert_eq!(registry.get_bindings("a")[0].priority, 50);
    }
}
