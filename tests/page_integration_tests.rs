//! The laid-out portfolio driven end to end through virtual time.

mod fixtures;
use fixtures::*;

use folio::content::Content;
use folio::page::{MotionSettings, Page, SectionId};
use folio::reveal::{EventLoop, RevealPhase};
use folio::tui::document::{rows_to_units, Document, RowOwner};
use folio::tui::{self, AppState, Theme};
use folio::config::Config;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn builtin_page(events: &EventLoop, motion: MotionSettings) -> (Content, Document, Page) {
    let content = Content::builtin().unwrap();
    let document = Document::build(&content, 80, &Theme::dark());
    let page = Page::mount(
        events,
        &content,
        document.layout().clone(),
        rows_to_units(24),
        motion,
    )
    .unwrap();
    (content, document, page)
}

/// Scrolls the whole page one row at a time, letting each position settle.
fn read_to_the_end(page: &mut Page, mut now: u64) -> u64 {
    while page.offset() < page.max_offset() {
        page.scroll_by(i64::from(rows_to_units(1)));
        now += 100;
        page.tick(now);
    }
    now + 5_000
}

#[test]
fn test_reading_the_page_reveals_every_item() {
    let events = EventLoop::new();
    let (content, _document, mut page) = builtin_page(&events, MotionSettings::default());

    page.tick(0);
    assert!(page.revealed_count(SectionId::Contact) < content.contacts.len());

    let end = read_to_the_end(&mut page, 0);
    page.tick(end);

    for id in SectionId::STAGGERED {
        assert!(page.is_section_complete(id), "{id} not fully revealed");
        assert_eq!(page.header_phase(id, 0), RevealPhase::Shown);
    }
    assert!(page.is_hero_typed());
    assert_eq!(page.hero_text(), content.profile.tagline);
    assert!(page.show_scroll_top());
}

#[test]
fn test_items_reveal_in_ordinal_order() {
    let events = EventLoop::new();
    let (_content, _document, mut page) = builtin_page(&events, MotionSettings::default());

    // Jump before the first turn so the skill cards are first seen together
    page.scroll_to(page.layout().top_of(SectionId::Skills));
    page.tick(0);
    assert!(page.is_item_revealed(SectionId::Skills, 0));
    assert!(!page.is_item_revealed(SectionId::Skills, 1));

    page.tick(199);
    assert!(!page.is_item_revealed(SectionId::Skills, 1));
    page.tick(200);
    assert!(page.is_item_revealed(SectionId::Skills, 1));
    assert!(!page.is_item_revealed(SectionId::Skills, 2));
    assert_eq!(page.item_phase(SectionId::Skills, 1, 0), RevealPhase::Entering);
}

#[test]
fn test_every_owned_row_settles_to_shown() {
    let events = EventLoop::new();
    let (_content, document, mut page) = builtin_page(&events, MotionSettings::default());

    let end = read_to_the_end(&mut page, 0);
    page.tick(end);

    for (idx, row) in document.rows().iter().enumerate() {
        assert_eq!(row.phase(&page), RevealPhase::Shown, "row {idx} ({:?})", row.owner);
    }
}

#[test]
fn test_without_animation_nothing_is_hidden() {
    let events = EventLoop::new();
    let (_content, document, page) =
        builtin_page(&events, MotionSettings::default().without_animation());

    for row in document.rows() {
        assert_eq!(row.phase(&page), RevealPhase::Shown);
    }
    assert!(page.is_hero_typed());
}

#[test]
fn test_degraded_loop_shows_items_immediately() {
    let events = EventLoop::with_detection(false);
    let (_content, document, page) = builtin_page(&events, MotionSettings::default());

    assert!(page.is_degraded());
    for row in document.rows() {
        if let RowOwner::Item(..) = row.owner {
            assert_eq!(row.phase(&page), RevealPhase::Shown);
        }
    }
}

#[test]
fn test_dropping_the_page_releases_the_loop() {
    let events = EventLoop::new();
    let (_content, _document, mut page) = builtin_page(&events, MotionSettings::default());
    page.scroll_to(page.max_offset());
    page.tick(10);
    assert!(events.watcher_count() > 0);

    drop(page);
    assert_eq!(events.pending_timers(), 0);
    assert_eq!(events.watcher_count(), 0);
    events.advance_to(60_000);
}

#[test]
fn test_minimal_content_lays_out() {
    let content = minimal_content();
    let document = Document::build(&content, 60, &Theme::light());
    let layout = document.layout();

    assert_eq!(layout.items(SectionId::Skills).len(), 1);
    assert_eq!(layout.items(SectionId::Contact).len(), 1);
    assert!(document
        .links()
        .iter()
        .any(|link| link.label == "Say Hello"));
}

#[test]
fn test_keyboard_walkthrough() {
    let content = Content::builtin().unwrap();
    let mut state = AppState::new(
        content,
        Config::default(),
        MotionSettings::default(),
        Theme::dark(),
        100,
        40,
    )
    .unwrap();

    let press = |code| KeyEvent::new(code, KeyModifiers::NONE);

    tui::handle_key_event(&mut state, press(KeyCode::Char('4'))).unwrap();
    state.page.tick(2_000);
    assert_eq!(state.page.active_section(), SectionId::Projects);

    tui::handle_key_event(&mut state, press(KeyCode::Char('G'))).unwrap();
    state.page.tick(4_000);
    assert!(state.page.show_scroll_top());

    tui::handle_key_event(&mut state, press(KeyCode::Char('t'))).unwrap();
    state.page.tick(6_000);
    assert_eq!(state.page.offset(), 0);

    let quit = tui::handle_key_event(&mut state, press(KeyCode::Char('q'))).unwrap();
    assert!(quit);
}
