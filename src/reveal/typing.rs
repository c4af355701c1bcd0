//! Character-by-character typing effect.

use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

use super::event_loop::{EventLoop, Millis, Scope, Tick, TimerId};

/// Reveals a target string one character per tick.
///
/// The emitted text is always a prefix of the target that ends on a
/// character boundary. Once complete the interval is released. Dropping the
/// emitter cancels any remaining ticks.
#[derive(Debug)]
pub struct TypingEmitter {
    target: String,
    total: usize,
    interval: Millis,
    typed: Rc<Cell<usize>>,
    timer: Option<TimerId>,
    scope: Scope,
}

impl TypingEmitter {
    /// Starts typing `target`, one character every `interval` ms.
    pub fn start(events: &EventLoop, target: impl Into<String>, interval: Millis) -> Self {
        let target = target.into();
        let total = target.chars().count();
        let typed = Rc::new(Cell::new(0));
        let scope = events.scope();

        let timer = if total == 0 {
            None
        } else {
            let counter = typed.clone();
            scope.set_interval(interval, move |_| {
                let next = counter.get() + 1;
                counter.set(next);
                if next >= total {
                    Tick::Stop
                } else {
                    Tick::Continue
                }
            })
        };

        debug!(chars = total, interval, "typing started");
        Self {
            target,
            total,
            interval,
            typed,
            timer,
            scope,
        }
    }

    /// Text typed so far.
    #[must_use]
    pub fn text(&self) -> &str {
        let typed = self.typed.get();
        match self.target.char_indices().nth(typed) {
            Some((end, _)) => &self.target[..end],
            None => &self.target,
        }
    }

    /// Full text being typed.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Characters emitted so far.
    #[must_use]
    pub fn typed_chars(&self) -> usize {
        self.typed.get().min(self.total)
    }

    /// Milliseconds between characters.
    #[must_use]
    pub const fn interval(&self) -> Millis {
        self.interval
    }

    /// Whether the whole target has been emitted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.typed.get() >= self.total
    }

    /// Emits the rest of the target at once.
    pub fn finish(&mut self) {
        self.stop();
        self.typed.set(self.total);
    }

    /// Stops typing, leaving the current prefix in place.
    pub fn stop(&mut self) {
        if let Some(id) = self.timer.take() {
            self.scope.clear(id);
        }
    }
}
