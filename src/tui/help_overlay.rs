//! Help overlay listing every keybinding, opened with `?`.
//!
//! Content comes from the [`HelpRegistry`], so the overlay and the status bar
//! hints never disagree.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
    },
    Frame,
};

use super::component::Component;
use super::help_registry::{contexts, HelpRegistry};
use super::Theme;
use crate::page::SectionId;

/// Lines moved by PgUp/PgDn.
const PAGE_LINES: usize = 10;

/// Width of the key column.
const KEY_COLUMN: usize = 24;

/// Events emitted by the help overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpEvent {
    /// The overlay was dismissed
    Close,
}

/// State for the help overlay.
#[derive(Debug, Clone)]
pub struct HelpOverlayState {
    /// Current scroll offset (line number)
    pub scroll_offset: usize,
    total_lines: usize,
    closed: bool,
    registry: HelpRegistry,
}

impl HelpOverlayState {
    /// Creates a new help overlay state.
    #[must_use]
    pub fn new() -> Self {
        let registry = HelpRegistry::default();
        let total_lines = Self::help_content(&registry, &Theme::dark()).len();
        Self {
            scroll_offset: 0,
            total_lines,
            closed: false,
            registry,
        }
    }

    /// Number of content lines.
    #[must_use]
    pub const fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Scroll up by one line.
    pub const fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Scroll down by one line.
    pub const fn scroll_down(&mut self) {
        if self.scroll_offset + 1 < self.total_lines {
            self.scroll_offset += 1;
        }
    }

    /// Scroll to the top.
    pub const fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    /// Scroll to the bottom.
    pub const fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.total_lines.saturating_sub(1);
    }

    /// Scroll down by a page.
    pub fn page_down(&mut self, visible_height: usize) {
        self.scroll_offset =
            (self.scroll_offset + visible_height).min(self.total_lines.saturating_sub(1));
    }

    /// Scroll up by a page.
    pub const fn page_up(&mut self, visible_height: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(visible_height);
    }

    fn section_heading(title: &str, theme: &Theme) -> Line<'static> {
        Line::from(Span::styled(
            format!("═══ {title} ═══"),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ))
    }

    fn entry(keys: String, action: String, theme: &Theme) -> Line<'static> {
        let pad = KEY_COLUMN.saturating_sub(keys.chars().count()).max(1);
        Line::from(vec![
            Span::raw("  "),
            Span::styled(keys, Style::default().fg(theme.success)),
            Span::raw(" ".repeat(pad)),
            Span::styled(action, Style::default().fg(theme.text)),
        ])
    }

    fn help_content(registry: &HelpRegistry, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                format!("{} - Help", registry.app_name()),
                Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
            ))
            .centered(),
            Line::from(""),
        ];

        for name in [contexts::MAIN, contexts::FOCUS, contexts::HELP] {
            let Some(context) = registry.get_context(name) else {
                continue;
            };
            lines.push(Self::section_heading(&context.name.to_uppercase(), theme));
            lines.push(Line::from(Span::styled(
                format!("  {}", context.description),
                Style::default().fg(theme.text_muted),
            )));
            lines.push(Line::from(""));
            for binding in registry.get_bindings(name) {
                let (keys, action) = HelpRegistry::format_binding_for_help(binding);
                lines.push(Self::entry(keys, action, theme));
            }
            lines.push(Line::from(""));
        }

        lines.push(Self::section_heading("SECTIONS", theme));
        lines.push(Line::from(""));
        for id in SectionId::ALL {
            lines.push(Self::entry(
                (id.index() + 1).to_string(),
                format!("{} (#{})", id.title(), id.anchor()),
                theme,
            ));
        }
        lines
    }
}

impl Default for HelpOverlayState {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for HelpOverlayState {
    type Event = HelpEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<HelpEvent> {
        match key.code {
            KeyCode::Char('?' | 'q') | KeyCode::Esc => {
                self.closed = true;
                return Some(HelpEvent::Close);
            }
            KeyCode::Char('j') | KeyCode::Down => self.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_up(),
            KeyCode::PageDown | KeyCode::Char(' ') => self.page_down(PAGE_LINES),
            KeyCode::PageUp => self.page_up(PAGE_LINES),
            KeyCode::Char('g') | KeyCode::Home => self.scroll_to_top(),
            KeyCode::Char('G') | KeyCode::End => self.scroll_to_bottom(),
            _ => {}
        }
        None
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let modal_area = super::centered_rect(70, 80, area);
        f.render_widget(Clear, modal_area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(modal_area);
        let content_area = chunks[0];
        let scrollbar_area = chunks[1];

        let content = Self::help_content(&self.registry, theme);
        let visible_height = content_area.height.saturating_sub(2) as usize;
        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .title(" Help - Keyboard Shortcuts ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.primary)),
            )
            .style(Style::default().fg(theme.text).bg(theme.surface))
            .wrap(Wrap { trim: false })
            .scroll((self.scroll_offset as u16, 0));
        f.render_widget(paragraph, content_area);

        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .track_symbol(Some("│"))
            .thumb_symbol("█")
            .style(Style::default().fg(theme.primary));
        let mut scrollbar_state =
            ScrollbarState::new(self.total_lines.saturating_sub(visible_height))
                .position(self.scroll_offset);
        f.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }

    fn should_close(&self) -> bool {
        self.closed
    }
}
