//! Draws the scrolled document.

use ratatui::{
    layout::{Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

use super::document::{Document, Row, RowBody};
use super::Theme;
use crate::page::Page;
use crate::reveal::RevealPhase;

/// Label of the back-to-top badge.
pub const SCROLL_TOP_BADGE: &str = " ↑ Top (t) ";

/// The document viewport widget.
pub struct PageView;

impl PageView {
    /// Renders the rows under the page's scroll offset.
    pub fn render(
        f: &mut Frame,
        area: Rect,
        document: &Document,
        page: &Page,
        focus: Option<usize>,
        theme: &Theme,
    ) {
        let first = Document::row_at(page.offset());
        let height = usize::from(area.height);
        let lines: Vec<Line> = document
            .rows()
            .iter()
            .enumerate()
            .skip(first)
            .take(height)
            .map(|(index, row)| Self::row_line(document, page, index, row, focus, theme))
            .collect();

        let column = area.width.min(document.width());
        let text_area = Rect {
            x: area.x + (area.width - column) / 2,
            width: column,
            ..area
        };
        f.render_widget(
            Paragraph::new(lines).style(Style::default().bg(theme.background)),
            text_area,
        );

        let total = document.rows().len().saturating_sub(height);
        if total > 0 {
            let scrollbar = Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None)
                .track_symbol(Some("│"))
                .thumb_symbol("█")
                .style(Style::default().fg(theme.text_muted));
            let mut state = ScrollbarState::new(total).position(first.min(total));
            f.render_stateful_widget(scrollbar, area, &mut state);
        }

        if page.show_scroll_top() {
            Self::render_badge(f, area, theme);
        }
    }

    fn render_badge(f: &mut Frame, area: Rect, theme: &Theme) {
        let inner = area.inner(Margin::new(2, 1));
        let width = SCROLL_TOP_BADGE.chars().count() as u16;
        if inner.width < width || inner.height == 0 {
            return;
        }
        let badge_area = Rect {
            x: inner.x + inner.width - width,
            y: inner.y + inner.height - 1,
            width,
            height: 1,
        };
        let badge = Paragraph::new(Span::styled(
            SCROLL_TOP_BADGE,
            Style::default()
                .fg(theme.background)
                .bg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ));
        f.render_widget(badge, badge_area);
    }

    fn row_line(
        document: &Document,
        page: &Page,
        index: usize,
        row: &Row,
        focus: Option<usize>,
        theme: &Theme,
    ) -> Line<'static> {
        let phase = row.phase(page);
        if phase == RevealPhase::Hidden {
            return Line::default();
        }

        let focused = focus.and_then(|i| document.links().get(i).map(|link| (i, link.row)));
        let line = match &row.body {
            RowBody::Blank => Line::default(),
            RowBody::Text(line) => {
                if focused.is_some_and(|(_, row)| row == index) {
                    line.clone().patch_style(
                        Style::default()
                            .bg(theme.highlight_bg)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    line.clone()
                }
            }
            RowBody::Tagline => {
                let cursor = if page.is_hero_typed() {
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::SLOW_BLINK)
                } else {
                    Style::default().fg(theme.accent)
                };
                Line::from(vec![
                    Span::styled(
                        page.hero_text().to_string(),
                        Style::default().fg(theme.text_secondary),
                    ),
                    Span::styled("|", cursor),
                ])
                .centered()
            }
            RowBody::Links(ids) => {
                let mut spans = Vec::with_capacity(ids.len() * 2);
                for (n, id) in ids.iter().enumerate() {
                    let Some(link) = document.links().get(*id) else {
                        continue;
                    };
                    if n > 0 {
                        spans.push(Span::raw("   "));
                    }
                    let style = if focused.is_some_and(|(i, _)| i == *id) {
                        Style::default()
                            .fg(theme.background)
                            .bg(theme.accent)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(theme.accent)
                    };
                    spans.push(Span::styled(format!("[ {} ]", link.label), style));
                }
                Line::from(spans).centered()
            }
        };

        if phase == RevealPhase::Entering {
            Self::entering(line, theme)
        } else {
            line
        }
    }

    /// Mutes a row that is still transitioning in.
    fn entering(line: Line<'static>, theme: &Theme) -> Line<'static> {
        let alignment = line.alignment;
        let spans: Vec<Span<'static>> = line
            .spans
            .into_iter()
            .map(|span| {
                let style = span
                    .style
                    .fg(theme.text_muted)
                    .add_modifier(Modifier::DIM);
                Span::styled(span.content, style)
            })
            .collect();
        let mut line = Line::from(spans);
        line.alignment = alignment;
        line
    }
}
