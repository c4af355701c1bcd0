//! Monotonic set of revealed ordinals.

use std::collections::BTreeMap;

use super::event_loop::Millis;

/// Ordinals that have been revealed, with the time each was first revealed.
///
/// Entries are never removed for the lifetime of the store; adding an
/// ordinal twice keeps the original reveal time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealStore {
    revealed: BTreeMap<usize, Millis>,
}

impl RevealStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            revealed: BTreeMap::new(),
        }
    }

    /// Marks `ordinal` revealed at `at`. Returns `false` if it already was.
    pub fn add(&mut self, ordinal: usize, at: Millis) -> bool {
        if self.revealed.contains_key(&ordinal) {
            return false;
        }
        self.revealed.insert(ordinal, at);
        true
    }

    /// Whether `ordinal` has been revealed.
    #[must_use]
    pub fn contains(&self, ordinal: usize) -> bool {
        self.revealed.contains_key(&ordinal)
    }

    /// Time `ordinal` was first revealed.
    #[must_use]
    pub fn revealed_at(&self, ordinal: usize) -> Option<Millis> {
        self.revealed.get(&ordinal).copied()
    }

    /// Number of revealed ordinals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    /// Whether nothing has been revealed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }

    /// Revealed ordinals in ascending order.
    pub fn ordinals(&self) -> impl Iterator<Item = usize> + '_ {
        self.revealed.keys().copied()
    }
}
