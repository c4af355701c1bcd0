//! Headless page composition.
//!
//! A [`Page`] mounts every reveal component of the portfolio against one
//! [`EventLoop`]: the hero typing effect, a staggered controller per content
//! section, a page-level controller for section headers and the
//! scroll-to-top affordance. It knows nothing about terminals; the TUI feeds
//! it scroll positions and clock ticks and reads phases back.

pub mod layout;
pub mod motion;
pub mod section;

pub use layout::{PageLayout, SectionLayout};
pub use motion::{MotionSettings, HEADER_ROOT_MARGIN};
pub use section::SectionId;

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::content::Content;
use crate::reveal::{
    EventLoop, Millis, RevealController, RevealPhase, ScrollTopAffordance, SmoothScroll,
    TypingEmitter, Viewport,
};

/// A mounted portfolio page.
///
/// Dropping the page unmounts every component and cancels all pending
/// timers and watchers it registered.
#[derive(Debug)]
pub struct Page {
    events: EventLoop,
    layout: PageLayout,
    viewport_height: u32,
    motion: MotionSettings,
    offset: u32,
    smooth: Option<SmoothScroll>,
    scroll_top: ScrollTopAffordance,
    mounted_at: Millis,
    typing: TypingEmitter,
    headers: RevealController,
    sections: BTreeMap<SectionId, RevealController>,
}

impl Page {
    /// Mounts all sections of `content` laid out as `layout`.
    ///
    /// # Errors
    ///
    /// Returns an error if a reveal controller rejects its settings.
    pub fn mount(
        events: &EventLoop,
        content: &Content,
        layout: PageLayout,
        viewport_height: u32,
        motion: MotionSettings,
    ) -> Result<Self> {
        events.set_viewport(Viewport::new(0, viewport_height));
        let mounted_at = events.now();

        let mut typing =
            TypingEmitter::start(events, content.profile.tagline.clone(), motion.typing_interval);

        let headers = RevealController::mount(
            events,
            "headers",
            motion.header_settings(),
            &layout.headers(),
        )
        .context("Failed to mount section header controller")?;

        let mut sections = BTreeMap::new();
        for id in SectionId::STAGGERED {
            let controller = RevealController::mount(
                events,
                id.anchor(),
                motion.item_settings(id),
                layout.items(id),
            )
            .with_context(|| format!("Failed to mount {id} section"))?;
            sections.insert(id, controller);
        }

        if !motion.enabled {
            typing.finish();
            headers.reveal_all();
            sections.values().for_each(RevealController::reveal_all);
        }

        info!(
            sections = layout.sections.len(),
            total_height = layout.total_height,
            viewport_height,
            animated = motion.enabled,
            "page mounted"
        );

        Ok(Self {
            events: events.clone(),
            layout,
            viewport_height,
            scroll_top: ScrollTopAffordance::new(motion.scroll_top_threshold),
            motion,
            offset: 0,
            smooth: None,
            mounted_at,
            typing,
            headers,
            sections,
        })
    }

    /// Advances the page clock to `now`.
    ///
    /// Smooth scrolls move first so watchers see the new position on the
    /// same turn.
    pub fn tick(&mut self, now: Millis) {
        if let Some(scroll) = self.smooth {
            self.set_offset(scroll.position(now));
            if scroll.is_finished(now) {
                self.smooth = None;
            }
        }
        self.events.advance_to(now);
    }

    /// Jumps to `offset` (clamped), cancelling any smooth scroll.
    pub fn scroll_to(&mut self, offset: u32) {
        self.smooth = None;
        self.set_offset(offset);
    }

    /// Scrolls by `delta` units (negative scrolls up).
    pub fn scroll_by(&mut self, delta: i64) {
        let max = i64::from(self.max_offset());
        let target = (i64::from(self.offset) + delta).clamp(0, max);
        self.scroll_to(u32::try_from(target).unwrap_or(0));
    }

    /// Smoothly scrolls to the top of `section`. Returns the target offset.
    pub fn jump_to(&mut self, section: SectionId) -> u32 {
        let target = self.layout.top_of(section).min(self.max_offset());
        debug!(%section, from = self.offset, to = target, "jump to section");
        self.start_scroll(SmoothScroll::new(
            self.offset,
            target,
            self.events.now(),
            self.motion.scroll_duration,
        ));
        target
    }

    /// Activates the back-to-top control. Returns false when it is hidden.
    pub fn scroll_to_top(&mut self) -> bool {
        if !self.scroll_top.is_visible() {
            return false;
        }
        let scroll = self
            .scroll_top
            .activate(self.offset, self.events.now(), self.motion.scroll_duration);
        debug!(from = self.offset, "scroll to top");
        self.start_scroll(scroll);
        true
    }

    fn start_scroll(&mut self, scroll: SmoothScroll) {
        if !self.motion.enabled || self.motion.scroll_duration == 0 {
            self.scroll_to(scroll.target());
            return;
        }
        self.smooth = Some(scroll);
    }

    fn set_offset(&mut self, offset: u32) {
        self.offset = offset.min(self.max_offset());
        self.events
            .set_viewport(Viewport::new(self.offset, self.viewport_height));
        if self.scroll_top.on_scroll(self.offset) {
            debug!(
                offset = self.offset,
                visible = self.scroll_top.is_visible(),
                "scroll-to-top visibility changed"
            );
        }
    }

    /// Replaces the layout after a resize.
    ///
    /// Revealed items stay revealed; the scroll offset is clamped to the new
    /// document height.
    ///
    /// # Errors
    ///
    /// Returns an error if a controller fails to re-register its watcher.
    pub fn relayout(&mut self, layout: PageLayout, viewport_height: u32) -> Result<()> {
        self.layout = layout;
        self.viewport_height = viewport_height;
        self.smooth = None;

        self.headers
            .relayout(&self.layout.headers())
            .context("Failed to relayout section headers")?;
        for (id, controller) in &mut self.sections {
            controller
                .relayout(self.layout.items(*id))
                .with_context(|| format!("Failed to relayout {id} section"))?;
        }

        if !self.motion.enabled {
            self.headers.reveal_all();
            self.sections.values().for_each(RevealController::reveal_all);
        }

        self.set_offset(self.offset);
        debug!(
            total_height = self.layout.total_height,
            viewport_height, "page relayout"
        );
        Ok(())
    }

    fn transition(&self) -> Millis {
        if self.motion.enabled {
            self.motion.transition
        } else {
            0
        }
    }

    /// Phase of item `ordinal` of `section`, with a per-row extra delay.
    ///
    /// Hero rows are timed from mount rather than from visibility.
    #[must_use]
    pub fn item_phase(
        &self,
        section: SectionId,
        ordinal: usize,
        extra_delay: Millis,
    ) -> RevealPhase {
        let now = self.events.now();
        if !self.motion.enabled {
            return RevealPhase::Shown;
        }
        match self.sections.get(&section) {
            Some(controller) => controller.phase(ordinal, now, extra_delay, self.transition()),
            None => RevealPhase::at(Some(self.mounted_at), now, extra_delay, self.transition()),
        }
    }

    /// Phase of the heading of `section`, with a per-row extra delay.
    ///
    /// Rows that belong to a section but not to any item (closing calls to
    /// action) follow the heading.
    #[must_use]
    pub fn header_phase(&self, section: SectionId, extra_delay: Millis) -> RevealPhase {
        if !self.motion.enabled {
            return RevealPhase::Shown;
        }
        let Some(ordinal) = self
            .layout
            .sections
            .iter()
            .position(|layout| layout.id == section)
        else {
            return RevealPhase::Hidden;
        };
        self.headers
            .phase(ordinal, self.events.now(), extra_delay, self.transition())
    }

    /// Whether item `ordinal` of `section` has been revealed.
    #[must_use]
    pub fn is_item_revealed(&self, section: SectionId, ordinal: usize) -> bool {
        self.sections
            .get(&section)
            .map_or(section == SectionId::Hero, |controller| {
                controller.is_revealed(ordinal)
            })
    }

    /// Number of revealed items in `section`.
    #[must_use]
    pub fn revealed_count(&self, section: SectionId) -> usize {
        self.sections
            .get(&section)
            .map_or(0, RevealController::revealed_count)
    }

    /// Whether every item of `section` has been revealed.
    #[must_use]
    pub fn is_section_complete(&self, section: SectionId) -> bool {
        self.sections
            .get(&section)
            .map_or(true, RevealController::is_complete)
    }

    /// Whether visibility detection was unavailable.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.headers.is_degraded()
    }

    /// Hero tagline typed so far.
    #[must_use]
    pub fn hero_text(&self) -> &str {
        self.typing.text()
    }

    /// Whether the hero tagline is fully typed.
    #[must_use]
    pub fn is_hero_typed(&self) -> bool {
        self.typing.is_complete()
    }

    /// Whether the back-to-top control is shown.
    #[must_use]
    pub const fn show_scroll_top(&self) -> bool {
        self.scroll_top.is_visible()
    }

    /// Whether a smooth scroll is in flight.
    #[must_use]
    pub const fn is_scrolling(&self) -> bool {
        self.smooth.is_some()
    }

    /// Section the reader is looking at (the one under the upper third).
    #[must_use]
    pub fn active_section(&self) -> SectionId {
        let reading_line = self.offset.saturating_add(self.viewport_height / 3);
        self.layout.section_at(reading_line).unwrap_or(SectionId::Hero)
    }

    /// Current scroll offset.
    #[must_use]
    pub const fn offset(&self) -> u32 {
        self.offset
    }

    /// Largest reachable scroll offset.
    #[must_use]
    pub const fn max_offset(&self) -> u32 {
        self.layout.total_height.saturating_sub(self.viewport_height)
    }

    /// Height of the visible window.
    #[must_use]
    pub const fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    /// Current layout.
    #[must_use]
    pub const fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Motion settings in effect.
    #[must_use]
    pub const fn motion(&self) -> &MotionSettings {
        &self.motion
    }

    /// Page clock.
    #[must_use]
    pub fn now(&self) -> Millis {
        self.events.now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::ElementRect;

    /// Hero 0..400, then each section: 100-unit header + `count` 100-unit items.
    fn layout(counts: &[(SectionId, u32)]) -> PageLayout {
        let mut sections = vec![SectionLayout {
            height: 400,
            header: ElementRect::new(0, 100),
            ..SectionLayout::new(SectionId::Hero, 0)
        }];
        let mut top = 400;
        for (id, count) in counts {
            let mut section = SectionLayout::new(*id, top);
            section.header = ElementRect::new(top, 100);
            section.items = (0..*count)
                .map(|i| ElementRect::new(top + 100 + i * 100, 100))
                .collect();
            section.height = 100 + count * 100;
            top += section.height;
            sections.push(section);
        }
        PageLayout::new(sections)
    }

    fn full_layout() -> PageLayout {
        layout(&[
            (SectionId::Skills, 5),
            (SectionId::Experience, 4),
            (SectionId::Projects, 2),
            (SectionId::Certifications, 5),
            (SectionId::Contact, 4),
        ])
    }

    fn mount(events: &EventLoop, motion: MotionSettings) -> Page {
        let content = Content::builtin().unwrap();
        Page::mount(events, &content, full_layout(), 400, motion).unwrap()
    }

    #[test]
    fn test_nothing_below_fold_is_revealed() {
        let events = EventLoop::new();
        let page = mount(&events, MotionSettings::default());
        events.advance_to(5_000);

        assert_eq!(page.revealed_count(SectionId::Projects), 0);
        assert_eq!(page.header_phase(SectionId::Hero, 0), RevealPhase::Shown);
        assert_eq!(page.header_phase(SectionId::Contact, 0), RevealPhase::Hidden);
    }

    #[test]
    fn test_scrolling_reveals_with_stagger() {
        let events = EventLoop::new();
        let mut page = mount(&events, MotionSettings::default());
        page.tick(1_000);

        let skills_top = page.layout().top_of(SectionId::Skills);
        page.scroll_to(skills_top);
        page.tick(2_000);
        // Viewport 400 units: header + items 0..2 of skills are on screen
        assert!(page.is_item_revealed(SectionId::Skills, 0));
        assert!(page.is_item_revealed(SectionId::Skills, 2));
        assert!(!page.is_item_revealed(SectionId::Skills, 3));
        assert_eq!(page.revealed_at_for_test(SectionId::Skills, 0), Some(1_000));
        assert_eq!(page.revealed_at_for_test(SectionId::Skills, 2), Some(1_400));
    }

    #[test]
    fn test_jump_to_is_smooth() {
        let events = EventLoop::new();
        let mut page = mount(&events, MotionSettings::default());

        let target = page.jump_to(SectionId::Projects);
        assert_eq!(target, page.layout().top_of(SectionId::Projects));
        assert!(page.is_scrolling());

        page.tick(200);
        assert!(page.offset() > 0 && page.offset() < target);
        page.tick(450);
        assert_eq!(page.offset(), target);
        assert!(!page.is_scrolling());
        assert_eq!(page.active_section(), SectionId::Projects);
    }

    #[test]
    fn test_scroll_to_top_only_when_visible() {
        let events = EventLoop::new();
        let mut page = mount(&events, MotionSettings::default());

        page.scroll_to(499);
        assert!(!page.show_scroll_top());
        assert!(!page.scroll_to_top());

        page.scroll_to(500);
        assert!(page.show_scroll_top());
        assert!(page.scroll_to_top());
        page.tick(10_000);
        assert_eq!(page.offset(), 0);
        assert!(!page.show_scroll_top());
    }

    #[test]
    fn test_scroll_to_top_animates() {
        let events = EventLoop::new();
        let mut page = mount(&events, MotionSettings::default());
        let duration = page.motion().scroll_duration;

        page.scroll_to(800);
        page.tick(1_000);
        assert!(page.scroll_to_top());
        assert!(page.is_scrolling());

        page.tick(1_000 + duration / 2);
        assert!(page.offset() > 0 && page.offset() < 800);

        page.tick(1_000 + duration);
        assert_eq!(page.offset(), 0);
        assert!(!page.is_scrolling());
    }

    #[test]
    fn test_scroll_clamps() {
        let events = EventLoop::new();
        let mut page = mount(&events, MotionSettings::default());
        page.scroll_by(-50);
        assert_eq!(page.offset(), 0);
        page.scroll_to(u32::MAX);
        assert_eq!(page.offset(), page.max_offset());
    }

    #[test]
    fn test_hero_types_and_fades_in() {
        let events = EventLoop::new();
        let mut page = mount(&events, MotionSettings::default());
        assert_eq!(page.hero_text(), "");
        assert_eq!(page.item_phase(SectionId::Hero, 0, 500), RevealPhase::Hidden);

        page.tick(500);
        assert_eq!(page.hero_text(), "Software D");
        assert_eq!(page.item_phase(SectionId::Hero, 0, 500), RevealPhase::Entering);

        page.tick(10_000);
        assert!(page.is_hero_typed());
        assert_eq!(page.item_phase(SectionId::Hero, 0, 500), RevealPhase::Shown);
    }

    #[test]
    fn test_without_animation_everything_shown() {
        let events = EventLoop::new();
        let page = mount(&events, MotionSettings::default().without_animation());

        assert!(page.is_hero_typed());
        for id in SectionId::STAGGERED {
            assert!(page.is_section_complete(id), "{id}");
            assert_eq!(page.item_phase(id, 0, 0), RevealPhase::Shown);
        }
        assert_eq!(page.header_phase(SectionId::Contact, 0), RevealPhase::Shown);
    }

    #[test]
    fn test_drop_releases_everything() {
        let events = EventLoop::new();
        let mut page = mount(&events, MotionSettings::default());
        page.scroll_to(page.layout().top_of(SectionId::Certifications));
        page.tick(0);
        assert!(events.pending_timers() > 0);

        drop(page);
        assert_eq!(events.pending_timers(), 0);
        assert_eq!(events.watcher_count(), 0);
        events.advance_to(60_000);
    }

    #[test]
    fn test_relayout_clamps_and_keeps_reveals() {
        let events = EventLoop::new();
        let mut page = mount(&events, MotionSettings::default());
        page.scroll_to(page.max_offset());
        page.tick(5_000);
        assert!(page.is_section_complete(SectionId::Contact));

        let shorter = layout(&[
            (SectionId::Skills, 5),
            (SectionId::Experience, 4),
            (SectionId::Projects, 2),
            (SectionId::Certifications, 5),
            (SectionId::Contact, 4),
        ]);
        page.relayout(shorter, 800).unwrap();
        assert_eq!(page.offset(), page.max_offset());
        assert!(page.is_section_complete(SectionId::Contact));
    }

    impl Page {
        fn revealed_at_for_test(&self, section: SectionId, ordinal: usize) -> Option<Millis> {
            self.sections.get(&section)?.revealed_at(ordinal)
        }
    }
}
