//! Status bar widget for status messages, reveal progress and help hints

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::help_registry::{self, HelpRegistry};
use super::{AppState, Theme};
use crate::page::SectionId;

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar with contextual help
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let first_line = if let Some(error) = &state.error_message {
            Line::from(vec![
                Span::styled("ERROR: ", Style::default().fg(theme.error)),
                Span::raw(error.clone()),
            ])
        } else if !state.status_message.is_empty() {
            Line::from(Span::styled(
                state.status_message.clone(),
                Style::default().fg(theme.success),
            ))
        } else {
            Self::progress_line(state, theme)
        };

        let status = Paragraph::new(vec![first_line, Self::help_line(state, theme)])
            .style(Style::default().bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Status ")
                    .style(Style::default().bg(theme.background)),
            );

        f.render_widget(status, area);
    }

    /// Revealed/total per staggered section, plus motion flags.
    fn progress_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let page = &state.page;
        let mut spans: Vec<Span<'static>> = Vec::new();
        for (i, id) in SectionId::STAGGERED.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            let total = page.layout().items(id).len();
            let revealed = page.revealed_count(id);
            let color = if revealed == total {
                theme.success
            } else {
                theme.text_muted
            };
            spans.push(Span::styled(
                format!("{} ", id.nav_label()),
                Style::default().fg(theme.text_secondary),
            ));
            spans.push(Span::styled(
                format!("{revealed}/{total}"),
                Style::default().fg(color),
            ));
        }
        if !page.motion().enabled {
            spans.push(Span::styled(
                "  [reduced motion]",
                Style::default().fg(theme.warning),
            ));
        }
        Line::from(spans)
    }

    fn current_context(state: &AppState) -> &'static str {
        if state.help.is_some() {
            help_registry::contexts::HELP
        } else if state.focus.is_some() {
            help_registry::contexts::FOCUS
        } else {
            help_registry::contexts::MAIN
        }
    }

    /// Get contextual help line from help registry
    fn help_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let context_name = Self::current_context(state);
        let registry = HelpRegistry::default();
        let hints = registry.format_status_bar_hints(context_name, 5);

        let mut spans: Vec<Span<'static>> = Vec::new();
        spans.push(Span::styled("Help: ", Style::default().fg(theme.primary)));

        if hints.is_empty() {
            spans.push(Span::raw("Press ? for help"));
            return Line::from(spans);
        }

        for (i, (key, action)) in hints.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" | "));
            }
            spans.push(Span::styled(
                key,
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(": "));
            spans.push(Span::raw(action));
        }

        if context_name != help_registry::contexts::HELP {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled("?", Style::default().fg(theme.accent)));
            spans.push(Span::raw(": Help"));
        }

        Line::from(spans)
    }
}
