//! Parametrized reveal controller shared by every content section.
//!
//! One controller owns a scope, one viewport watcher over the section's
//! items and the section's [`RevealStore`]. Visibility events flow through a
//! [`StaggerScheduler`] so items cascade in rather than appearing together.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};

use super::error::{Result, RevealError};
use super::event_loop::{EventLoop, Millis, Scope, WatcherId};
use super::stagger::StaggerScheduler;
use super::store::RevealStore;
use super::viewport::{ElementRect, ObservedElement, RootMargin, WatchOptions};

/// Default fraction of an item that must be visible.
pub const DEFAULT_ITEM_THRESHOLD: f32 = 0.3;

/// Timing and visibility parameters for one section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealSettings {
    /// Stagger step between successive ordinals
    pub base_interval: Millis,
    /// Fraction of an item that must be visible
    pub threshold: f32,
    /// Root box adjustment
    pub root_margin: RootMargin,
}

impl RevealSettings {
    /// Settings with the given stagger step and the default threshold.
    #[must_use]
    pub const fn new(base_interval: Millis) -> Self {
        Self {
            base_interval,
            threshold: DEFAULT_ITEM_THRESHOLD,
            root_margin: RootMargin::ZERO,
        }
    }

    /// Overrides the visibility threshold.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Overrides the root margin.
    #[must_use]
    pub const fn with_root_margin(mut self, root_margin: RootMargin) -> Self {
        self.root_margin = root_margin;
        self
    }

    /// Watcher options derived from these settings.
    #[must_use]
    pub const fn watch_options(&self) -> WatchOptions {
        WatchOptions::new(self.threshold).with_root_margin(self.root_margin)
    }
}

/// Presentation state of one item at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    /// Not revealed yet (or its extra delay has not elapsed)
    Hidden,
    /// Transitioning towards its final style
    Entering,
    /// Fully visible
    Shown,
}

impl RevealPhase {
    /// Phase of an item revealed at `revealed_at`, viewed at `now`.
    ///
    /// `extra_delay` offsets nested rows (e.g. list entries inside a card);
    /// `transition` is how long the entering style lasts.
    #[must_use]
    pub fn at(
        revealed_at: Option<Millis>,
        now: Millis,
        extra_delay: Millis,
        transition: Millis,
    ) -> Self {
        let Some(revealed_at) = revealed_at else {
            return Self::Hidden;
        };
        let start = revealed_at.saturating_add(extra_delay);
        if now < start {
            Self::Hidden
        } else if now - start < transition {
            Self::Entering
        } else {
            Self::Shown
        }
    }

    /// Whether anything should be drawn.
    #[must_use]
    pub const fn is_visible(self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

/// Reveal state machine for one mounted section.
///
/// Unmounting (dropping) the controller cancels its watcher and any pending
/// reveals.
#[derive(Debug)]
pub struct RevealController {
    label: String,
    settings: RevealSettings,
    item_count: usize,
    stagger: StaggerScheduler,
    store: Rc<RefCell<RevealStore>>,
    watcher: Option<WatcherId>,
    degraded: bool,
    scope: Scope,
}

impl RevealController {
    /// Mounts a controller over `elements` (ordinal = index).
    ///
    /// When the loop has no visibility detection every item is revealed
    /// immediately instead.
    pub fn mount(
        events: &EventLoop,
        label: impl Into<String>,
        settings: RevealSettings,
        elements: &[ElementRect],
    ) -> Result<Self> {
        settings.watch_options().validate()?;

        let mut controller = Self {
            label: label.into(),
            settings,
            item_count: elements.len(),
            stagger: StaggerScheduler::new(settings.base_interval),
            store: Rc::new(RefCell::new(RevealStore::new())),
            watcher: None,
            degraded: false,
            scope: events.scope(),
        };
        controller.watch(ObservedElement::enumerate(elements))?;

        debug!(
            section = %controller.label,
            items = controller.item_count,
            base_interval = settings.base_interval,
            degraded = controller.degraded,
            "reveal controller mounted"
        );
        Ok(controller)
    }

    fn watch(&mut self, targets: Vec<ObservedElement>) -> Result<()> {
        if targets.is_empty() {
            return Ok(());
        }

        let handle = self.scope.handle();
        let store = Rc::downgrade(&self.store);
        let stagger = self.stagger;
        let item_count = self.item_count;
        let label = self.label.clone();

        let registered = self.scope.observe(
            self.settings.watch_options(),
            targets,
            move |ordinal, at| {
                if ordinal >= item_count {
                    warn!(section = %label, ordinal, "visibility event for unknown item");
                    return;
                }
                debug!(
                    section = %label,
                    ordinal,
                    at,
                    delay = stagger.delay_for(ordinal),
                    "item entered viewport"
                );
                stagger.schedule(&handle, ordinal, store.clone());
            },
        );

        match registered {
            Ok(id) => {
                self.watcher = Some(id);
                Ok(())
            }
            Err(RevealError::DetectionUnavailable) => {
                warn!(
                    section = %self.label,
                    "visibility detection unavailable, revealing all items"
                );
                self.degraded = true;
                self.reveal_all();
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Reveals every item at the current time, skipping the stagger.
    pub fn reveal_all(&self) {
        let now = self.scope.now();
        let mut store = self.store.borrow_mut();
        for ordinal in 0..self.item_count {
            store.add(ordinal, now);
        }
    }

    /// Feeds a visibility event for `ordinal` through the stagger scheduler.
    ///
    /// Safe to call repeatedly for the same ordinal; out-of-range ordinals
    /// are ignored.
    pub fn handle_visible(&self, ordinal: usize) {
        if ordinal >= self.item_count {
            warn!(section = %self.label, ordinal, "visibility event for unknown item");
            return;
        }
        if self.degraded {
            self.store.borrow_mut().add(ordinal, self.scope.now());
            return;
        }
        self.stagger
            .schedule(&self.scope.handle(), ordinal, Rc::downgrade(&self.store));
    }

    /// Replaces item geometry after a resize.
    ///
    /// Already revealed items stay revealed; the rest are observed again
    /// with their new bounds.
    pub fn relayout(&mut self, elements: &[ElementRect]) -> Result<()> {
        if let Some(id) = self.watcher.take() {
            self.scope.unobserve(id);
        }
        self.item_count = elements.len();

        if self.degraded {
            self.reveal_all();
            return Ok(());
        }

        let store = self.store.borrow();
        let targets: Vec<ObservedElement> = ObservedElement::enumerate(elements)
            .into_iter()
            .filter(|element| !store.contains(element.ordinal))
            .collect();
        drop(store);
        self.watch(targets)
    }

    /// Section label used in logs.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Settings this controller was mounted with.
    #[must_use]
    pub const fn settings(&self) -> RevealSettings {
        self.settings
    }

    /// Number of items under control.
    #[must_use]
    pub const fn item_count(&self) -> usize {
        self.item_count
    }

    /// Whether detection was unavailable and everything was shown at once.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Whether `ordinal` has been revealed.
    #[must_use]
    pub fn is_revealed(&self, ordinal: usize) -> bool {
        self.store.borrow().contains(ordinal)
    }

    /// Time `ordinal` was revealed.
    #[must_use]
    pub fn revealed_at(&self, ordinal: usize) -> Option<Millis> {
        self.store.borrow().revealed_at(ordinal)
    }

    /// Number of revealed items among the current `item_count`.
    ///
    /// Ordinals left over from a larger layout are not counted.
    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.store
            .borrow()
            .ordinals()
            .filter(|ordinal| *ordinal < self.item_count)
            .count()
    }

    /// Whether every item has been revealed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.revealed_count() >= self.item_count
    }

    /// Snapshot of the reveal store.
    #[must_use]
    pub fn snapshot(&self) -> RevealStore {
        self.store.borrow().clone()
    }

    /// Presentation phase of `ordinal` at `now`.
    #[must_use]
    pub fn phase(
        &self,
        ordinal: usize,
        now: Millis,
        extra_delay: Millis,
        transition: Millis,
    ) -> RevealPhase {
        let revealed_at = self.revealed_at(ordinal);
        if self.degraded {
            return if revealed_at.is_some() {
                RevealPhase::Shown
            } else {
                RevealPhase::Hidden
            };
        }
        RevealPhase::at(revealed_at, now, extra_delay, transition)
    }

    /// Releases the watcher and cancels pending reveals.
    pub fn unmount(self) {
        debug!(
            section = %self.label,
            revealed = self.revealed_count(),
            pending = self.scope.pending_timers(),
            "reveal controller unmounted"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::Viewport;

    fn stacked(count: u32, height: u32) -> Vec<ElementRect> {
        (0..count)
            .map(|i| ElementRect::new(i * height, height))
            .collect()
    }

    #[test]
    fn test_phase_transitions() {
        assert_eq!(RevealPhase::at(None, 1_000, 0, 700), RevealPhase::Hidden);
        assert_eq!(RevealPhase::at(Some(100), 100, 0, 700), RevealPhase::Entering);
        assert_eq!(RevealPhase::at(Some(100), 799, 0, 700), RevealPhase::Entering);
        assert_eq!(RevealPhase::at(Some(100), 800, 0, 700), RevealPhase::Shown);
        // Nested row waits for its own delay
        assert_eq!(RevealPhase::at(Some(100), 150, 100, 700), RevealPhase::Hidden);
        assert_eq!(RevealPhase::at(Some(100), 0, 0, 0), RevealPhase::Hidden);
        assert_eq!(RevealPhase::at(Some(100), 100, 0, 0), RevealPhase::Shown);
    }

    #[test]
    fn test_only_visible_items_reveal() {
        let events = EventLoop::new();
        events.set_viewport(Viewport::new(0, 250));
        let controller = RevealController::mount(
            &events,
            "skills",
            RevealSettings::new(200),
            &stacked(4, 100),
        )
        .unwrap();

        events.advance_to(1_000);
        // Items 0, 1 fully visible; item 2 has 50% visible (>= 0.3)
        assert!(controller.is_revealed(0));
        assert!(controller.is_revealed(1));
        assert!(controller.is_revealed(2));
        assert!(!controller.is_revealed(3));
        assert!(!controller.is_complete());
    }

    #[test]
    fn test_rejects_invalid_threshold() {
        let events = EventLoop::new();
        let result = RevealController::mount(
            &events,
            "projects",
            RevealSettings::new(400).with_threshold(2.0),
            &stacked(2, 100),
        );
        assert_eq!(result.err(), Some(RevealError::InvalidThreshold(2.0)));
    }

    #[test]
    fn test_degrades_without_detection() {
        let events = EventLoop::with_detection(false);
        let controller = RevealController::mount(
            &events,
            "contact",
            RevealSettings::new(200),
            &stacked(4, 100),
        )
        .unwrap();

        assert!(controller.is_degraded());
        assert!(controller.is_complete());
        assert_eq!(controller.phase(3, 0, 0, 700), RevealPhase::Shown);
        assert_eq!(events.pending_timers(), 0);
    }

    #[test]
    fn test_out_of_range_ordinal_ignored() {
        let events = EventLoop::new();
        let controller = RevealController::mount(
            &events,
            "certs",
            RevealSettings::new(150),
            &stacked(2, 10),
        )
        .unwrap();
        controller.handle_visible(7);
        events.advance_to(10_000);
        assert_eq!(controller.revealed_count(), 0);
    }

    #[test]
    fn test_relayout_keeps_revealed_items() {
        let events = EventLoop::new();
        events.set_viewport(Viewport::new(0, 100));
        let mut controller = RevealController::mount(
            &events,
            "experience",
            RevealSettings::new(300),
            &stacked(3, 100),
        )
        .unwrap();
        events.advance_to(0);
        assert!(controller.is_revealed(0));

        // Narrower terminal: items get taller and move down
        controller.relayout(&stacked(3, 200)).unwrap();
        assert_eq!(events.watcher_count(), 1);
        assert!(controller.is_revealed(0));

        events.set_viewport(Viewport::new(200, 400));
        events.advance_to(2_000);
        assert!(controller.is_complete());
    }

    #[test]
    fn test_relayout_shrink_ignores_dropped_items() {
        let events = EventLoop::new();
        events.set_viewport(Viewport::new(200, 300));
        let mut controller = RevealController::mount(
            &events,
            "projects",
            RevealSettings::new(0),
            &stacked(5, 100),
        )
        .unwrap();
        events.advance_to(0);
        assert_eq!(controller.revealed_count(), 3);
        assert!(!controller.is_revealed(0));

        // Two items left, both below the viewport
        controller
            .relayout(&[ElementRect::new(5_000, 100), ElementRect::new(5_100, 100)])
            .unwrap();
        events.advance_to(100);
        assert_eq!(controller.item_count(), 2);
        assert_eq!(controller.revealed_count(), 0);
        assert!(!controller.is_complete());

        events.set_viewport(Viewport::new(5_000, 300));
        events.advance_to(200);
        assert_eq!(controller.revealed_count(), 2);
        assert!(controller.is_complete());
    }

    #[test]
    fn test_unmount_cancels_pending() {
        let events = EventLoop::new();
        events.set_viewport(Viewport::new(0, 1_000));
        let controller = RevealController::mount(
            &events,
            "projects",
            RevealSettings::new(400),
            &stacked(3, 100),
        )
        .unwrap();
        events.advance_to(0);
        assert!(events.pending_timers() > 0);

        controller.unmount();
        assert_eq!(events.pending_timers(), 0);
        assert_eq!(events.watcher_count(), 0);
        events.advance_to(5_000);
    }
}
