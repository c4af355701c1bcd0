//! Navigation bar with the section the reader is in highlighted.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
    Frame,
};

use super::Theme;
use crate::page::SectionId;

/// Top navigation bar.
pub struct NavBar;

impl NavBar {
    /// Renders one tab per section, numbered for the `1`-`6` shortcuts.
    pub fn render(f: &mut Frame, area: Rect, title: &str, active: SectionId, theme: &Theme) {
        let titles: Vec<Line> = SectionId::ALL
            .iter()
            .map(|id| {
                Line::from(vec![
                    Span::styled(
                        format!("{} ", id.index() + 1),
                        Style::default().fg(theme.text_muted),
                    ),
                    Span::raw(id.nav_label()),
                ])
            })
            .collect();

        let tabs = Tabs::new(titles)
            .select(active.index())
            .style(Style::default().fg(theme.text_secondary))
            .highlight_style(
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
            .divider(Span::styled("│", Style::default().fg(theme.text_muted)))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.primary))
                    .title(Span::styled(
                        format!(" {title} "),
                        Style::default()
                            .fg(theme.primary_glow)
                            .add_modifier(Modifier::BOLD),
                    ))
                    .style(Style::default().bg(theme.background)),
            );

        f.render_widget(tabs, area);
    }
}
