//! Viewport geometry and the visibility watcher.
//!
//! Coordinates are abstract document units measured from the top of the
//! page. Only the vertical axis matters for a single scrolling column.

// Intersection math mixes signed margins with unsigned rects
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

use serde::{Deserialize, Serialize};

use super::error::{Result, RevealError};

/// Visible window of the scrolling container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// Scroll offset of the top edge
    pub offset: u32,
    /// Height of the visible window
    pub height: u32,
}

impl Viewport {
    /// Creates a viewport at `offset` with the given height.
    #[must_use]
    pub const fn new(offset: u32, height: u32) -> Self {
        Self { offset, height }
    }
}

/// On-page bounds of a rendered item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ElementRect {
    /// Distance from the top of the document
    pub top: u32,
    /// Height of the element
    pub height: u32,
}

impl ElementRect {
    /// Creates a rect starting at `top`.
    #[must_use]
    pub const fn new(top: u32, height: u32) -> Self {
        Self { top, height }
    }

    /// Document position just past the element.
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.top.saturating_add(self.height)
    }
}

/// Adjustment applied to the viewport before intersection tests.
///
/// Positive values grow the root box, negative values shrink it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RootMargin {
    /// Margin above the viewport
    pub top: i32,
    /// Margin below the viewport
    pub bottom: i32,
}

impl RootMargin {
    /// No adjustment.
    pub const ZERO: Self = Self { top: 0, bottom: 0 };

    /// Creates a margin with explicit top and bottom values.
    #[must_use]
    pub const fn new(top: i32, bottom: i32) -> Self {
        Self { top, bottom }
    }
}

/// Options for one watcher registration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatchOptions {
    /// Fraction of the element that must be visible (0.0..=1.0)
    pub threshold: f32,
    /// Root box adjustment
    pub root_margin: RootMargin,
}

impl WatchOptions {
    /// Creates options with the given threshold and no margin.
    #[must_use]
    pub const fn new(threshold: f32) -> Self {
        Self {
            threshold,
            root_margin: RootMargin::ZERO,
        }
    }

    /// Sets the root margin.
    #[must_use]
    pub const fn with_root_margin(mut self, root_margin: RootMargin) -> Self {
        self.root_margin = root_margin;
        self
    }

    /// Rejects thresholds outside `0.0..=1.0` (NaN included).
    pub fn validate(&self) -> Result<()> {
        if (0.0..=1.0).contains(&self.threshold) {
            Ok(())
        } else {
            Err(RevealError::InvalidThreshold(self.threshold))
        }
    }
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// An element registered with a watcher, tagged with its ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservedElement {
    /// Zero-based position within the owning section
    pub ordinal: usize,
    /// Current on-page bounds
    pub rect: ElementRect,
}

impl ObservedElement {
    /// Tags `rect` with `ordinal`.
    #[must_use]
    pub const fn new(ordinal: usize, rect: ElementRect) -> Self {
        Self { ordinal, rect }
    }

    /// Tags each rect with its index.
    #[must_use]
    pub fn enumerate(rects: &[ElementRect]) -> Vec<Self> {
        rects
            .iter()
            .enumerate()
            .map(|(ordinal, rect)| Self::new(ordinal, *rect))
            .collect()
    }
}

/// Visible fraction of `element` inside the (margin-adjusted) viewport.
///
/// Returns `None` when the element neither overlaps nor touches the root
/// box. Edge contact yields `Some(0.0)`. Zero-height elements inside the
/// root box count as fully visible.
#[must_use]
pub fn intersection_ratio(
    element: ElementRect,
    viewport: Viewport,
    margin: RootMargin,
) -> Option<f32> {
    let root_top = i64::from(viewport.offset) - i64::from(margin.top);
    let root_bottom =
        i64::from(viewport.offset) + i64::from(viewport.height) + i64::from(margin.bottom);
    if root_bottom < root_top {
        return None;
    }

    let el_top = i64::from(element.top);
    let el_bottom = i64::from(element.bottom());

    let overlap_top = el_top.max(root_top);
    let overlap_bottom = el_bottom.min(root_bottom);
    if overlap_bottom < overlap_top {
        return None;
    }

    if element.height == 0 {
        return Some(1.0);
    }

    let overlap = (overlap_bottom - overlap_top) as f64;
    Some((overlap / f64::from(element.height)) as f32)
}

/// Watches a set of elements and reports each one once when it enters
/// the viewport at or above the threshold.
#[derive(Debug, Clone)]
pub struct ViewportWatcher {
    options: WatchOptions,
    pending: Vec<ObservedElement>,
}

impl ViewportWatcher {
    /// Starts watching `elements`.
    #[must_use]
    pub fn new(options: WatchOptions, elements: Vec<ObservedElement>) -> Self {
        Self {
            options,
            pending: elements,
        }
    }

    /// Options this watcher was registered with.
    #[must_use]
    pub const fn options(&self) -> WatchOptions {
        self.options
    }

    /// Number of elements that have not entered yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Evaluates every pending element against `viewport`.
    ///
    /// Returns the ordinals that entered, in registration order. Reported
    /// elements stop being observed.
    pub fn update(&mut self, viewport: Viewport) -> Vec<usize> {
        let threshold = self.options.threshold;
        let margin = self.options.root_margin;
        let mut entered = Vec::new();

        self.pending.retain(|element| {
            let visible = intersection_ratio(element.rect, viewport, margin)
                .is_some_and(|ratio| ratio >= threshold);
            if visible {
                entered.push(element.ordinal);
            }
            !visible
        });

        entered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_fully_inside() {
        let ratio = intersection_ratio(
            ElementRect::new(100, 50),
            Viewport::new(0, 400),
            RootMargin::ZERO,
        );
        assert_eq!(ratio, Some(1.0));
    }

    #[test]
    fn test_ratio_partial_overlap() {
        // Element 380..480, viewport 0..400 -> 20 of 100 visible
        let ratio = intersection_ratio(
            ElementRect::new(380, 100),
            Viewport::new(0, 400),
            RootMargin::ZERO,
        )
        .unwrap();
        assert!((ratio - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn test_ratio_outside_and_touching() {
        let viewport = Viewport::new(0, 400);
        assert_eq!(
            intersection_ratio(ElementRect::new(500, 10), viewport, RootMargin::ZERO),
            None
        );
        assert_eq!(
            intersection_ratio(ElementRect::new(400, 10), viewport, RootMargin::ZERO),
            Some(0.0)
        );
    }

    #[test]
    fn test_negative_bottom_margin_shrinks_root() {
        // Visible without margin, hidden once the bottom 50 units are cut off
        let element = ElementRect::new(360, 40);
        let viewport = Viewport::new(0, 400);
        assert_eq!(
            intersection_ratio(element, viewport, RootMargin::ZERO),
            Some(1.0)
        );
        assert_eq!(
            intersection_ratio(element, viewport, RootMargin::new(0, -50)),
            None
        );
    }

    #[test]
    fn test_zero_height_element() {
        let ratio = intersection_ratio(
            ElementRect::new(10, 0),
            Viewport::new(0, 100),
            RootMargin::ZERO,
        );
        assert_eq!(ratio, Some(1.0));
    }

    #[test]
    fn test_validate_threshold() {
        assert!(WatchOptions::new(0.0).validate().is_ok());
        assert!(WatchOptions::new(1.0).validate().is_ok());
        assert_eq!(
            WatchOptions::new(1.5).validate(),
            Err(RevealError::InvalidThreshold(1.5))
        );
        assert!(WatchOptions::new(f32::NAN).validate().is_err());
    }

    #[test]
    fn test_watcher_reports_each_element_once() {
        let elements = ObservedElement::enumerate(&[
            ElementRect::new(0, 100),
            ElementRect::new(500, 100),
        ]);
        let mut watcher = ViewportWatcher::new(WatchOptions::new(0.3), elements);

        assert_eq!(watcher.update(Viewport::new(0, 300)), vec![0]);
        assert_eq!(watcher.update(Viewport::new(0, 300)), Vec::<usize>::new());
        assert_eq!(watcher.remaining(), 1);

        // 30 of 100 visible meets a 0.3 threshold exactly
        assert_eq!(watcher.update(Viewport::new(230, 300)), vec![1]);
        assert_eq!(watcher.remaining(), 0);
    }

    #[test]
    fn test_watcher_below_threshold_waits() {
        let elements = vec![ObservedElement::new(3, ElementRect::new(280, 100))];
        let mut watcher = ViewportWatcher::new(WatchOptions::new(0.3), elements);

        // Only 20% visible
        assert!(watcher.update(Viewport::new(0, 300)).is_empty());
        assert_eq!(watcher.update(Viewport::new(20, 300)), vec![3]);
    }
}
