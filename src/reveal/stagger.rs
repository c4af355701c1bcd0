//! Converts visibility events into delayed reveals.

use std::cell::RefCell;
use std::rc::Weak;

use tracing::trace;

use super::event_loop::{Millis, ScopeHandle, TimerId};
use super::store::RevealStore;

/// Delays the reveal of ordinal `i` by `i × base_interval`.
///
/// The delay is relative to the item's own visibility event, so events may
/// arrive in any order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaggerScheduler {
    base_interval: Millis,
}

impl StaggerScheduler {
    /// Creates a scheduler with the given per-ordinal step.
    #[must_use]
    pub const fn new(base_interval: Millis) -> Self {
        Self { base_interval }
    }

    /// Step between successive ordinals.
    #[must_use]
    pub const fn base_interval(&self) -> Millis {
        self.base_interval
    }

    /// Delay applied to `ordinal`.
    #[must_use]
    pub fn delay_for(&self, ordinal: usize) -> Millis {
        let ordinal = Millis::try_from(ordinal).unwrap_or(Millis::MAX);
        ordinal.saturating_mul(self.base_interval)
    }

    /// Schedules `ordinal` to be added to `store`.
    ///
    /// The timer is a no-op if the store has been dropped by the time it
    /// fires. Returns `None` when the scope has already closed.
    pub fn schedule(
        &self,
        scope: &ScopeHandle,
        ordinal: usize,
        store: Weak<RefCell<RevealStore>>,
    ) -> Option<TimerId> {
        let delay = self.delay_for(ordinal);
        scope.set_timeout(delay, move |at| {
            let Some(store) = store.upgrade() else {
                return;
            };
            if store.borrow_mut().add(ordinal, at) {
                trace!(ordinal, at, "item revealed");
            }
        })
    }
}
