//! Scroll-triggered reveal engine.
//!
//! Everything here is independent of the terminal frontend. Time is virtual:
//! an [`EventLoop`] only moves forward when its owner calls
//! [`EventLoop::advance_to`], which keeps every animation deterministic under
//! test.
//!
//! ```text
//! set_viewport ─► ViewportWatcher ─► StaggerScheduler ─► RevealStore
//!                  (entering ordinals)  (ordinal × base)    (monotonic set)
//! ```
//!
//! All timers and watchers belong to a [`Scope`]. Dropping the scope cancels
//! them, so nothing fires against an unmounted section.

pub mod controller;
pub mod error;
pub mod event_loop;
pub mod scroll;
pub mod stagger;
pub mod store;
pub mod typing;
pub mod viewport;

pub use controller::{RevealController, RevealPhase, RevealSettings, DEFAULT_ITEM_THRESHOLD};
pub use error::RevealError;
pub use event_loop::{EventLoop, Millis, Scope, ScopeHandle, Tick, TimerId, WatcherId};
pub use scroll::{
    ScrollTopAffordance, SmoothScroll, DEFAULT_SCROLL_DURATION, DEFAULT_SCROLL_TOP_THRESHOLD,
};
pub use stagger::StaggerScheduler;
pub use store::RevealStore;
pub use typing::TypingEmitter;
pub use viewport::{
    intersection_ratio, ElementRect, ObservedElement, RootMargin, Viewport, ViewportWatcher,
    WatchOptions,
};
