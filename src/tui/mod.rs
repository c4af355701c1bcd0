//! Terminal user interface: application state, event loop and widgets.
//!
//! The page is laid out once per terminal size by [`document::Document`] and
//! animated by a headless [`Page`] whose clock follows wall time.

// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
// Input handlers use Result<bool> for consistency even when they never fail
#![allow(clippy::unnecessary_wraps)]

pub mod clipboard;
pub mod component;
pub mod document;
pub mod help_overlay;
pub mod help_registry;
pub mod nav;
pub mod page_view;
pub mod status_bar;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::content::Content;
use crate::page::{MotionSettings, Page, SectionId};
use crate::reveal::{EventLoop, Millis};

pub use component::Component;
use document::{rows_to_units, Document, LinkAction, ROW_UNITS};
use help_overlay::{HelpEvent, HelpOverlayState};
use nav::NavBar;
use page_view::PageView;
use status_bar::StatusBar;
pub use theme::Theme;

/// Height of the navigation bar.
pub const NAV_HEIGHT: u16 = 3;
/// Height of the status bar.
pub const STATUS_HEIGHT: u16 = 4;

/// Rows scrolled per mouse wheel notch.
const WHEEL_ROWS: i64 = 3;

/// Rows of the page viewport for a terminal `height` rows tall.
#[must_use]
pub fn page_rows(height: u16) -> u16 {
    height.saturating_sub(NAV_HEIGHT + STATUS_HEIGHT).max(1)
}

/// Application state
#[derive(Debug)]
pub struct AppState {
    /// Portfolio content
    pub content: Content,
    /// User configuration
    pub config: Config,
    /// Current UI theme
    pub theme: Theme,
    /// Rows for the current terminal width
    pub document: Document,
    /// Mounted reveal components
    pub page: Page,
    /// Focused link (index into the document's links)
    pub focus: Option<usize>,
    /// Open help overlay
    pub help: Option<HelpOverlayState>,
    /// Status message
    pub status_message: String,
    /// Error message
    pub error_message: Option<String>,
    /// Whether to quit
    pub should_quit: bool,
    started: Instant,
    viewport_rows: u16,
}

impl AppState {
    /// Lays out and mounts the page for a terminal of `width` x `height`.
    pub fn new(
        content: Content,
        config: Config,
        motion: MotionSettings,
        theme: Theme,
        width: u16,
        height: u16,
    ) -> Result<Self> {
        let viewport_rows = page_rows(height);
        let document = Document::build(&content, width.saturating_sub(2), &theme);
        let events = EventLoop::new();
        let page = Page::mount(
            &events,
            &content,
            document.layout().clone(),
            rows_to_units(viewport_rows),
            motion,
        )
        .context("Failed to mount portfolio page")?;

        let help = config.ui.show_help_on_startup.then(HelpOverlayState::new);

        Ok(Self {
            content,
            config,
            theme,
            document,
            page,
            focus: None,
            help,
            status_message: String::new(),
            error_message: None,
            should_quit: false,
            started: Instant::now(),
            viewport_rows,
        })
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.error_message = None;
    }

    /// Set error message
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error_message = Some(error.into());
    }

    /// Clear error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Advances the page clock to wall time.
    pub fn tick(&mut self) {
        let elapsed = Millis::try_from(self.started.elapsed().as_millis()).unwrap_or(Millis::MAX);
        self.page.tick(elapsed);
    }

    /// Re-lays out the document after a terminal resize.
    pub fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        self.viewport_rows = page_rows(height);
        self.document = Document::build(&self.content, width.saturating_sub(2), &self.theme);
        self.page
            .relayout(
                self.document.layout().clone(),
                rows_to_units(self.viewport_rows),
            )
            .context("Failed to relayout page")?;
        if self
            .focus
            .is_some_and(|focus| focus >= self.document.links().len())
        {
            self.focus = None;
        }
        debug!(width, height, rows = self.document.rows().len(), "terminal resized");
        Ok(())
    }

    /// Rows in the page viewport.
    #[must_use]
    pub const fn viewport_rows(&self) -> u16 {
        self.viewport_rows
    }

    fn scroll_rows(&mut self, rows: i64) {
        self.page.scroll_by(rows * i64::from(ROW_UNITS));
    }

    fn page_step(&self) -> i64 {
        i64::from(self.viewport_rows.saturating_sub(1).max(1))
    }

    fn jump_to(&mut self, section: SectionId) {
        self.page.jump_to(section);
        self.set_status(format!("{} (#{})", section.title(), section.anchor()));
    }

    /// Moves focus to the next (or previous) link, wrapping, and scrolls it
    /// into view.
    fn cycle_focus(&mut self, forward: bool) {
        let count = self.document.links().len();
        if count == 0 {
            return;
        }
        let next = match (self.focus, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        };
        self.focus = Some(next);
        let Some((label, row)) = self
            .document
            .links()
            .get(next)
            .map(|link| (link.label.clone(), link.row))
        else {
            return;
        };
        self.scroll_into_view(row);
        self.set_status(format!("Focused: {label}"));
    }

    fn scroll_into_view(&mut self, row: usize) {
        let top = Document::offset_of(row);
        let viewport = rows_to_units(self.viewport_rows);
        let margin = 2 * ROW_UNITS;
        let offset = self.page.offset();
        if top < offset {
            self.page.scroll_to(top.saturating_sub(margin));
        } else if top + ROW_UNITS > offset + viewport {
            self.page
                .scroll_to((top + ROW_UNITS + margin).saturating_sub(viewport));
        }
    }

    /// Follows the focused link.
    fn activate_focus(&mut self) {
        let Some(link) = self.focus.and_then(|i| self.document.links().get(i)).cloned() else {
            self.set_status("Press Tab to focus a link");
            return;
        };
        match link.action {
            LinkAction::Jump(section) => self.jump_to(section),
            LinkAction::Endpoint(endpoint) => match clipboard::copy_endpoint(&endpoint) {
                Ok(()) => {
                    info!(label = %link.label, "endpoint copied to clipboard");
                    self.set_status(clipboard::copied_message(&link.label, &endpoint));
                }
                Err(err) => {
                    warn!(error = %err, "clipboard copy failed");
                    self.set_error(format!("{err:#}"));
                }
            },
        }
    }
}

/// Setup terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Launches the TUI and blocks until the user quits.
pub fn run(content: Content, config: Config, motion: MotionSettings, theme: Theme) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let size = terminal.size().context("Failed to query terminal size")?;
    info!(width = size.width, height = size.height, "starting TUI");

    let result = AppState::new(content, config, motion, theme, size.width, size.height)
        .and_then(|mut state| run_tui(&mut state, &mut terminal));

    restore_terminal(terminal)?;
    result
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    let frame_interval = Duration::from_millis(state.config.ui.frame_interval_ms.max(1));

    loop {
        state.tick();
        terminal.draw(|f| render(f, state))?;

        if event::poll(frame_interval)? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key_event(state, key)? {
                        break;
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(state, mouse),
                Event::Resize(width, height) => state.resize(width, height)?,
                _ => {}
            }
        }

        if state.should_quit {
            break;
        }
    }

    info!("TUI closed");
    Ok(())
}

/// Render the UI from current state
fn render(f: &mut Frame, state: &AppState) {
    let theme = &state.theme;
    let full_bg = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(full_bg, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(NAV_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(f.area());

    NavBar::render(
        f,
        chunks[0],
        &crate::branding::window_title(&state.content.profile.name),
        state.page.active_section(),
        theme,
    );
    PageView::render(f, chunks[1], &state.document, &state.page, state.focus, theme);
    StatusBar::render(f, chunks[2], state, theme);

    if let Some(help) = &state.help {
        help.render(f, f.area(), theme);
    }
}

/// Handles one key press. Returns `Ok(true)` when the user quits.
pub fn handle_key_event(state: &mut AppState, key: KeyEvent) -> Result<bool> {
    if key.kind != KeyEventKind::Press {
        return Ok(false);
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return Ok(true);
    }

    if let Some(help) = state.help.as_mut() {
        if help.handle_input(key) == Some(HelpEvent::Close) || help.should_close() {
            state.help = None;
        }
        return Ok(false);
    }

    if state.error_message.is_some() && matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
        state.clear_error();
        return Ok(false);
    }

    match key.code {
        KeyCode::Char('q') => {
            state.should_quit = true;
            return Ok(true);
        }
        KeyCode::Esc => {
            if state.focus.take().is_some() {
                state.set_status("");
            } else {
                state.should_quit = true;
                return Ok(true);
            }
        }
        KeyCode::Char('j') | KeyCode::Down => state.scroll_rows(1),
        KeyCode::Char('k') | KeyCode::Up => state.scroll_rows(-1),
        KeyCode::PageDown | KeyCode::Char(' ') => state.scroll_rows(state.page_step()),
        KeyCode::PageUp => state.scroll_rows(-state.page_step()),
        KeyCode::Char('g') | KeyCode::Home => state.page.scroll_to(0),
        KeyCode::Char('G') | KeyCode::End => state.page.scroll_to(u32::MAX),
        KeyCode::Char(digit @ '1'..='6') => {
            let section = digit
                .to_digit(10)
                .and_then(|n| usize::try_from(n).ok())
                .and_then(|n| SectionId::from_index(n - 1));
            if let Some(section) = section {
                state.jump_to(section);
            }
        }
        KeyCode::Char('p') => state.jump_to(SectionId::Projects),
        KeyCode::Char('c') => state.jump_to(SectionId::Contact),
        KeyCode::Char('t') => {
            if state.page.scroll_to_top() {
                state.set_status("Back to top");
            }
        }
        KeyCode::Tab => state.cycle_focus(true),
        KeyCode::BackTab => state.cycle_focus(false),
        KeyCode::Enter | KeyCode::Char('y') => state.activate_focus(),
        KeyCode::Char('?') => state.help = Some(HelpOverlayState::new()),
        _ => {}
    }

    Ok(false)
}

/// Scrolls on mouse wheel events.
pub fn handle_mouse_event(state: &mut AppState, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollDown => state.scroll_rows(WHEEL_ROWS),
        MouseEventKind::ScrollUp => state.scroll_rows(-WHEEL_ROWS),
        _ => {}
    }
}

/// Helper function to create a centered rectangle
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
