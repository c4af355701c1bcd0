//! Scroll-to-top affordance and smooth scrolling.

// Easing works in floating point over integer offsets
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use super::event_loop::Millis;

/// Offset at which the scroll-to-top button appears.
pub const DEFAULT_SCROLL_TOP_THRESHOLD: u32 = 500;

/// Default smooth-scroll duration.
pub const DEFAULT_SCROLL_DURATION: Millis = 400;

/// Visibility of the floating "back to top" control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollTopAffordance {
    threshold: u32,
    visible: bool,
}

impl ScrollTopAffordance {
    /// Creates a hidden affordance that appears at `threshold`.
    #[must_use]
    pub const fn new(threshold: u32) -> Self {
        Self {
            threshold,
            visible: false,
        }
    }

    /// Updates visibility for a new scroll offset. Returns whether it changed.
    pub fn on_scroll(&mut self, offset: u32) -> bool {
        let visible = offset >= self.threshold;
        let changed = visible != self.visible;
        self.visible = visible;
        changed
    }

    /// Whether the control is shown.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Offset at which the control appears.
    #[must_use]
    pub const fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Starts a smooth scroll from `offset` back to the top.
    #[must_use]
    pub const fn activate(&self, offset: u32, now: Millis, duration: Millis) -> SmoothScroll {
        SmoothScroll::new(offset, 0, now, duration)
    }
}

impl Default for ScrollTopAffordance {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_TOP_THRESHOLD)
    }
}

/// An in-flight animated scroll between two offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmoothScroll {
    from: u32,
    to: u32,
    start: Millis,
    duration: Millis,
}

impl SmoothScroll {
    /// Scroll from `from` to `to`, starting at `start`.
    #[must_use]
    pub const fn new(from: u32, to: u32, start: Millis, duration: Millis) -> Self {
        Self {
            from,
            to,
            start,
            duration,
        }
    }

    /// Offset at time `now` (ease-in-out cubic).
    #[must_use]
    pub fn position(&self, now: Millis) -> u32 {
        if self.is_finished(now) {
            return self.to;
        }
        let elapsed = now.saturating_sub(self.start) as f64;
        let t = elapsed / self.duration as f64;
        let eased = if t < 0.5 {
            4.0 * t * t * t
        } else {
            1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
        };
        let from = f64::from(self.from);
        let to = f64::from(self.to);
        (from + (to - from) * eased).round().max(0.0) as u32
    }

    /// Whether the scroll has reached its target.
    #[must_use]
    pub const fn is_finished(&self, now: Millis) -> bool {
        now >= self.start.saturating_add(self.duration)
    }

    /// Destination offset.
    #[must_use]
    pub const fn target(&self) -> u32 {
        self.to
    }
}
