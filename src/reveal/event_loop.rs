//! Single-threaded timer loop with lifecycle scopes.
//!
//! The loop owns every pending timer and viewport watcher. Work is only ever
//! registered through a [`Scope`]; closing the scope (explicitly or by
//! dropping it) cancels everything it registered. Callbacks run with no
//! borrow of the loop held, so they are free to schedule more work.
//!
//! Time is virtual. [`EventLoop::advance_to`] first delivers pending
//! visibility changes, then runs due timers in due-time order (ties in
//! scheduling order), each receiving the time it fired at.
//!
//! A scope dropped while the loop is borrowed (for example a `Scope` owned
//! by a callback that another scope's close releases) is queued and closed
//! at the start of the next turn.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use super::error::{Result, RevealError};
use super::viewport::{ObservedElement, Viewport, ViewportWatcher, WatchOptions};

/// Milliseconds on the loop's virtual clock.
pub type Millis = u64;

/// Identifies a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Identifies a registered viewport watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WatcherId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct ScopeId(u64);

/// Whether an interval keeps running after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Schedule the next tick
    Continue,
    /// Cancel the interval
    Stop,
}

type TimeoutFn = Box<dyn FnOnce(Millis)>;
type IntervalFn = Box<dyn FnMut(Millis) -> Tick>;
type VisibilityFn = Box<dyn FnMut(usize, Millis)>;

enum Task {
    Once(TimeoutFn),
    Every { period: Millis, callback: IntervalFn },
}

struct PendingTimer {
    scope: ScopeId,
    task: Task,
}

struct WatcherSlot {
    scope: ScopeId,
    watcher: ViewportWatcher,
    /// Taken out while the callback runs
    callback: Option<VisibilityFn>,
    /// Not evaluated since registration
    fresh: bool,
}

struct LoopState {
    now: Millis,
    next_id: u64,
    detection: bool,
    viewport: Option<Viewport>,
    viewport_dirty: bool,
    timers: BTreeMap<(Millis, TimerId), PendingTimer>,
    due_index: BTreeMap<TimerId, Millis>,
    watchers: BTreeMap<WatcherId, WatcherSlot>,
    live_scopes: BTreeSet<ScopeId>,
    /// Interval currently executing, and whether it was cleared mid-tick
    running: Option<(TimerId, bool)>,
}

impl LoopState {
    fn new(detection: bool) -> Self {
        Self {
            now: 0,
            next_id: 1,
            detection,
            viewport: None,
            viewport_dirty: false,
            timers: BTreeMap::new(),
            due_index: BTreeMap::new(),
            watchers: BTreeMap::new(),
            live_scopes: BTreeSet::new(),
            running: None,
        }
    }

    fn alloc(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn insert_timer(&mut self, scope: ScopeId, delay: Millis, task: Task) -> TimerId {
        let id = TimerId(self.alloc());
        let due = self.now.saturating_add(delay);
        self.timers.insert((due, id), PendingTimer { scope, task });
        self.due_index.insert(id, due);
        id
    }

    fn cancel_timer(&mut self, id: TimerId) -> bool {
        if let Some(due) = self.due_index.remove(&id) {
            return self.timers.remove(&(due, id)).is_some();
        }
        match &mut self.running {
            Some((running, cleared)) if *running == id => {
                *cleared = true;
                true
            }
            _ => false,
        }
    }

    /// Unregisters everything `scope` owns and hands it back, so the
    /// callbacks can be dropped after the borrow ends.
    fn detach_scope(&mut self, scope: ScopeId) -> Released {
        self.live_scopes.remove(&scope);

        let (timers, kept): (BTreeMap<_, _>, BTreeMap<_, _>) = std::mem::take(&mut self.timers)
            .into_iter()
            .partition(|(_, timer)| timer.scope == scope);
        self.timers = kept;
        let live: BTreeSet<TimerId> = self.timers.keys().map(|(_, id)| *id).collect();
        self.due_index.retain(|id, _| live.contains(id));

        let (watchers, kept): (BTreeMap<_, _>, BTreeMap<_, _>) = std::mem::take(&mut self.watchers)
            .into_iter()
            .partition(|(_, slot)| slot.scope == scope);
        self.watchers = kept;

        Released { timers, watchers }
    }
}

/// Registrations removed from a closed scope.
struct Released {
    timers: BTreeMap<(Millis, TimerId), PendingTimer>,
    watchers: BTreeMap<WatcherId, WatcherSlot>,
}

/// Handle to a single-threaded, virtual-time event loop.
///
/// Clones share the same loop.
#[derive(Clone)]
pub struct EventLoop {
    state: Rc<RefCell<LoopState>>,
    /// Scopes dropped while `state` was borrowed
    deferred: Rc<RefCell<Vec<ScopeId>>>,
}

impl EventLoop {
    /// Creates a loop with visibility detection available.
    #[must_use]
    pub fn new() -> Self {
        Self::with_detection(true)
    }

    /// Creates a loop, optionally without visibility detection.
    ///
    /// Without detection every [`Scope::observe`] call fails with
    /// [`RevealError::DetectionUnavailable`].
    #[must_use]
    pub fn with_detection(available: bool) -> Self {
        Self {
            state: Rc::new(RefCell::new(LoopState::new(available))),
            deferred: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Millis {
        self.state.borrow().now
    }

    /// Opens a new lifecycle scope.
    #[must_use]
    pub fn scope(&self) -> Scope {
        let id = {
            let mut state = self.state.borrow_mut();
            let id = ScopeId(state.alloc());
            state.live_scopes.insert(id);
            id
        };
        trace!(scope = id.0, "scope opened");
        Scope {
            handle: ScopeHandle {
                id,
                state: Rc::downgrade(&self.state),
            },
            deferred: Rc::downgrade(&self.deferred),
        }
    }

    /// Records a new scroll position. Watchers see it on the next turn.
    pub fn set_viewport(&self, viewport: Viewport) {
        let mut state = self.state.borrow_mut();
        if state.viewport != Some(viewport) {
            state.viewport = Some(viewport);
            state.viewport_dirty = true;
        }
    }

    /// Last recorded viewport.
    #[must_use]
    pub fn viewport(&self) -> Option<Viewport> {
        self.state.borrow().viewport
    }

    /// Number of timers waiting to fire.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.close_deferred();
        self.state.borrow().timers.len()
    }

    /// Number of registered watchers.
    #[must_use]
    pub fn watcher_count(&self) -> usize {
        self.close_deferred();
        self.state.borrow().watchers.len()
    }

    /// Moves the clock forward by `delta`.
    pub fn advance_by(&self, delta: Millis) {
        let target = self.now().saturating_add(delta);
        self.advance_to(target);
    }

    /// Runs all pending work up to and including `target`.
    ///
    /// The clock never moves backwards; earlier targets only flush work that
    /// is already due.
    pub fn advance_to(&self, target: Millis) {
        let target = target.max(self.now());
        loop {
            self.close_deferred();
            if self.dispatch_visibility() {
                continue;
            }
            let Some((due, id, scope, task)) = self.pop_due(target) else {
                break;
            };
            self.run_timer(due, id, scope, task);
        }
        self.state.borrow_mut().now = target;
    }

    /// Closes scopes whose drop found the loop busy.
    fn close_deferred(&self) {
        loop {
            let pending = std::mem::take(&mut *self.deferred.borrow_mut());
            if pending.is_empty() {
                return;
            }
            for scope in pending {
                // Released callbacks may own scopes and queue them again
                let released = {
                    let mut state = self.state.borrow_mut();
                    state.detach_scope(scope)
                };
                debug!(
                    scope = scope.0,
                    cancelled_timers = released.timers.len(),
                    removed_watchers = released.watchers.len(),
                    "deferred scope closed"
                );
            }
        }
    }

    fn dispatch_visibility(&self) -> bool {
        let (now, batch) = {
            let mut state = self.state.borrow_mut();
            let Some(viewport) = state.viewport else {
                return false;
            };
            let dirty = state.viewport_dirty;
            if !dirty && !state.watchers.values().any(|slot| slot.fresh) {
                return false;
            }
            state.viewport_dirty = false;

            let mut batch = Vec::new();
            for (id, slot) in &mut state.watchers {
                if !dirty && !slot.fresh {
                    continue;
                }
                slot.fresh = false;
                for ordinal in slot.watcher.update(viewport) {
                    batch.push((*id, ordinal));
                }
            }
            (state.now, batch)
        };

        for (id, ordinal) in &batch {
            let callback = self
                .state
                .borrow_mut()
                .watchers
                .get_mut(id)
                .and_then(|slot| slot.callback.take());
            let Some(mut callback) = callback else {
                continue;
            };
            callback(*ordinal, now);
            if let Some(slot) = self.state.borrow_mut().watchers.get_mut(id) {
                slot.callback = Some(callback);
            }
        }

        !batch.is_empty()
    }

    fn pop_due(&self, target: Millis) -> Option<(Millis, TimerId, ScopeId, Task)> {
        let mut state = self.state.borrow_mut();
        let (due, id) = *state.timers.keys().next()?;
        if due > target {
            return None;
        }
        let timer = state.timers.remove(&(due, id))?;
        state.due_index.remove(&id);
        state.now = due;
        Some((due, id, timer.scope, timer.task))
    }

    fn run_timer(&self, due: Millis, id: TimerId, scope: ScopeId, task: Task) {
        match task {
            Task::Once(callback) => {
                trace!(timer = id.0, at = due, "timeout fired");
                callback(due);
            }
            Task::Every {
                period,
                mut callback,
            } => {
                self.state.borrow_mut().running = Some((id, false));
                let tick = callback(due);

                let mut state = self.state.borrow_mut();
                let cleared = state.running.take().is_some_and(|(_, cleared)| cleared);
                if tick == Tick::Continue && !cleared && state.live_scopes.contains(&scope) {
                    let next = due.saturating_add(period);
                    state.timers.insert(
                        (next, id),
                        PendingTimer {
                            scope,
                            task: Task::Every { period, callback },
                        },
                    );
                    state.due_index.insert(id, next);
                } else {
                    trace!(timer = id.0, at = due, "interval finished");
                }
            }
        }
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("EventLoop")
            .field("now", &state.now)
            .field("timers", &state.timers.len())
            .field("watchers", &state.watchers.len())
            .field("scopes", &state.live_scopes.len())
            .finish()
    }
}

/// Non-owning handle to a [`Scope`], for use inside callbacks.
///
/// Every operation is a silent no-op once the scope has closed.
#[derive(Debug, Clone)]
pub struct ScopeHandle {
    id: ScopeId,
    state: Weak<RefCell<LoopState>>,
}

impl ScopeHandle {
    fn with_live<R>(&self, f: impl FnOnce(&mut LoopState) -> R) -> Option<R> {
        let state = self.state.upgrade()?;
        let mut state = state.borrow_mut();
        if !state.live_scopes.contains(&self.id) {
            return None;
        }
        Some(f(&mut *state))
    }

    /// Whether the owning scope is still open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.with_live(|_| ()).is_some()
    }

    /// Current loop time, if the scope is still open.
    #[must_use]
    pub fn now(&self) -> Option<Millis> {
        self.with_live(|state| state.now)
    }

    /// Runs `callback` once, `delay` ms from now.
    pub fn set_timeout(
        &self,
        delay: Millis,
        callback: impl FnOnce(Millis) + 'static,
    ) -> Option<TimerId> {
        self.with_live(|state| {
            state.insert_timer(self.id, delay, Task::Once(Box::new(callback)))
        })
    }

    /// Runs `callback` every `period` ms until it returns [`Tick::Stop`].
    ///
    /// A zero period is treated as 1 ms.
    pub fn set_interval(
        &self,
        period: Millis,
        callback: impl FnMut(Millis) -> Tick + 'static,
    ) -> Option<TimerId> {
        let period = period.max(1);
        self.with_live(|state| {
            state.insert_timer(
                self.id,
                period,
                Task::Every {
                    period,
                    callback: Box::new(callback),
                },
            )
        })
    }

    /// Cancels a timer. Returns whether anything was cancelled.
    pub fn clear(&self, id: TimerId) -> bool {
        self.with_live(|state| state.cancel_timer(id))
            .unwrap_or(false)
    }
}

/// Lifetime of one mounted component.
///
/// Timers and watchers registered here are released when the scope is
/// closed or dropped.
#[derive(Debug)]
pub struct Scope {
    handle: ScopeHandle,
    deferred: Weak<RefCell<Vec<ScopeId>>>,
}

impl Scope {
    /// A handle callbacks can capture without extending the scope's life.
    #[must_use]
    pub fn handle(&self) -> ScopeHandle {
        self.handle.clone()
    }

    /// See [`ScopeHandle::set_timeout`].
    pub fn set_timeout(
        &self,
        delay: Millis,
        callback: impl FnOnce(Millis) + 'static,
    ) -> Option<TimerId> {
        self.handle.set_timeout(delay, callback)
    }

    /// See [`ScopeHandle::set_interval`].
    pub fn set_interval(
        &self,
        period: Millis,
        callback: impl FnMut(Millis) -> Tick + 'static,
    ) -> Option<TimerId> {
        self.handle.set_interval(period, callback)
    }

    /// See [`ScopeHandle::clear`].
    pub fn clear(&self, id: TimerId) -> bool {
        self.handle.clear(id)
    }

    /// Current loop time (0 if the loop is gone).
    #[must_use]
    pub fn now(&self) -> Millis {
        self.handle.now().unwrap_or(0)
    }

    /// Registers a viewport watcher over `elements`.
    ///
    /// `callback` receives each entering ordinal together with the time the
    /// visibility change was delivered. Elements are evaluated against the
    /// current viewport on the next loop turn.
    pub fn observe(
        &self,
        options: WatchOptions,
        elements: Vec<ObservedElement>,
        callback: impl FnMut(usize, Millis) + 'static,
    ) -> Result<WatcherId> {
        options.validate()?;
        let state = self.handle.state.upgrade().ok_or(RevealError::LoopClosed)?;
        let mut state = state.borrow_mut();
        if !state.detection {
            return Err(RevealError::DetectionUnavailable);
        }

        let id = WatcherId(state.alloc());
        debug!(
            scope = self.handle.id.0,
            watcher = id.0,
            elements = elements.len(),
            threshold = options.threshold,
            "watcher registered"
        );
        state.watchers.insert(
            id,
            WatcherSlot {
                scope: self.handle.id,
                watcher: ViewportWatcher::new(options, elements),
                callback: Some(Box::new(callback)),
                fresh: true,
            },
        );
        Ok(id)
    }

    /// Removes a watcher registered through this scope.
    pub fn unobserve(&self, id: WatcherId) -> bool {
        self.handle
            .with_live(|state| {
                let owned = state
                    .watchers
                    .get(&id)
                    .is_some_and(|slot| slot.scope == self.handle.id);
                owned && state.watchers.remove(&id).is_some()
            })
            .unwrap_or(false)
    }

    /// Timers registered through this scope that have not fired yet.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.handle
            .with_live(|state| {
                state
                    .timers
                    .values()
                    .filter(|timer| timer.scope == self.handle.id)
                    .count()
            })
            .unwrap_or(0)
    }

    /// Closes the scope, cancelling everything it registered.
    pub fn close(self) {
        drop(self);
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        let Some(state) = self.handle.state.upgrade() else {
            return;
        };
        let Ok(mut borrowed) = state.try_borrow_mut() else {
            trace!(scope = self.handle.id.0, "loop busy, deferring scope close");
            if let Some(deferred) = self.deferred.upgrade() {
                deferred.borrow_mut().push(self.handle.id);
            }
            return;
        };
        let released = borrowed.detach_scope(self.handle.id);
        drop(borrowed);
        debug!(
            scope = self.handle.id.0,
            cancelled_timers = released.timers.len(),
            removed_watchers = released.watchers.len(),
            "scope closed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::viewport::ElementRect;
    use std::cell::Cell;

    #[test]
    fn test_timeouts_fire_in_due_order() {
        let events = EventLoop::new();
        let scope = events.scope();
        let log = Rc::new(RefCell::new(Vec::new()));

        for (delay, tag) in [(300, "c"), (100, "a"), (200, "b"), (100, "a2")] {
            let log = log.clone();
            scope.set_timeout(delay, move |at| log.borrow_mut().push((tag, at)));
        }

        events.advance_to(250);
        assert_eq!(*log.borrow(), vec![("a", 100), ("a2", 100), ("b", 200)]);
        assert_eq!(events.now(), 250);

        events.advance_to(1000);
        assert_eq!(log.borrow().len(), 4);
        assert_eq!(events.pending_timers(), 0);
    }

    #[test]
    fn test_zero_delay_fires_on_next_turn() {
        let events = EventLoop::new();
        let scope = events.scope();
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        scope.set_timeout(0, move |_| flag.set(true));

        assert!(!fired.get());
        events.advance_to(0);
        assert!(fired.get());
    }

    #[test]
    fn test_clock_never_moves_backwards() {
        let events = EventLoop::new();
        events.advance_to(500);
        events.advance_to(100);
        assert_eq!(events.now(), 500);
    }

    #[test]
    fn test_interval_until_stop() {
        let events = EventLoop::new();
        let scope = events.scope();
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        scope.set_interval(50, move |_| {
            counter.set(counter.get() + 1);
            if counter.get() == 3 {
                Tick::Stop
            } else {
                Tick::Continue
            }
        });

        events.advance_to(1000);
        assert_eq!(count.get(), 3);
        assert_eq!(events.pending_timers(), 0);
    }

    #[test]
    fn test_interval_can_clear_itself() {
        let events = EventLoop::new();
        let scope = events.scope();
        let handle = scope.handle();
        let count = Rc::new(Cell::new(0));
        let own_id: Rc<Cell<Option<TimerId>>> = Rc::new(Cell::new(None));

        let counter = count.clone();
        let id_slot = own_id.clone();
        let id = scope.set_interval(10, move |_| {
            counter.set(counter.get() + 1);
            if let Some(id) = id_slot.get() {
                handle.clear(id);
            }
            Tick::Continue
        });
        own_id.set(id);

        events.advance_to(100);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_dropping_scope_cancels_timers() {
        let events = EventLoop::new();
        let fired = Rc::new(Cell::new(0));
        {
            let scope = events.scope();
            for delay in [10, 20, 30] {
                let fired = fired.clone();
                scope.set_timeout(delay, move |_| fired.set(fired.get() + 1));
            }
            assert_eq!(scope.pending_timers(), 3);
        }
        assert_eq!(events.pending_timers(), 0);

        events.advance_to(100);
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn test_handle_is_inert_after_close() {
        let events = EventLoop::new();
        let scope = events.scope();
        let handle = scope.handle();
        assert!(handle.is_open());

        scope.close();
        assert!(!handle.is_open());
        assert!(handle.set_timeout(0, |_| {}).is_none());
        assert_eq!(events.pending_timers(), 0);
    }

    #[test]
    fn test_scopes_are_isolated() {
        let events = EventLoop::new();
        let keep = events.scope();
        let fired = Rc::new(Cell::new(0));
        {
            let fired = fired.clone();
            keep.set_timeout(10, move |_| fired.set(fired.get() + 1));
        }
        {
            let dropped = events.scope();
            let fired = fired.clone();
            dropped.set_timeout(10, move |_| fired.set(fired.get() + 100));
        }

        events.advance_to(10);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_callback_can_schedule_more_work() {
        let events = EventLoop::new();
        let scope = events.scope();
        let handle = scope.handle();
        let log = Rc::new(RefCell::new(Vec::new()));

        let outer_log = log.clone();
        scope.set_timeout(10, move |at| {
            outer_log.borrow_mut().push(at);
            let inner_log = outer_log.clone();
            handle.set_timeout(15, move |at| inner_log.borrow_mut().push(at));
        });

        events.advance_to(100);
        assert_eq!(*log.borrow(), vec![10, 25]);
    }

    #[test]
    fn test_observe_delivers_on_next_turn() {
        let events = EventLoop::new();
        events.set_viewport(Viewport::new(0, 100));
        let scope = events.scope();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = seen.clone();
        scope
            .observe(
                WatchOptions::new(0.5),
                ObservedElement::enumerate(&[ElementRect::new(10, 20), ElementRect::new(300, 20)]),
                move |ordinal, _| sink.borrow_mut().push(ordinal),
            )
            .unwrap();
        assert!(seen.borrow().is_empty());

        events.advance_to(0);
        assert_eq!(*seen.borrow(), vec![0]);

        events.set_viewport(Viewport::new(250, 100));
        events.advance_to(16);
        assert_eq!(*seen.borrow(), vec![0, 1]);
    }

    #[test]
    fn test_observe_without_detection() {
        let events = EventLoop::with_detection(false);
        let scope = events.scope();
        let result = scope.observe(WatchOptions::new(0.3), Vec::new(), |_, _| {});
        assert_eq!(result, Err(RevealError::DetectionUnavailable));
    }

    #[test]
    fn test_observe_rejects_bad_threshold() {
        let events = EventLoop::new();
        let scope = events.scope();
        let result = scope.observe(WatchOptions::new(-0.1), Vec::new(), |_, _| {});
        assert_eq!(result, Err(RevealError::InvalidThreshold(-0.1)));
    }

    #[test]
    fn test_dropping_scope_removes_watchers() {
        let events = EventLoop::new();
        {
            let scope = events.scope();
            scope
                .observe(WatchOptions::new(0.3), Vec::new(), |_, _| {})
                .unwrap();
            assert_eq!(events.watcher_count(), 1);
        }
        assert_eq!(events.watcher_count(), 0);
    }

    fn counting_scope(events: &EventLoop, ticks: &Rc<Cell<u32>>) -> Scope {
        let scope = events.scope();
        let ticks = ticks.clone();
        scope.set_interval(100, move |_| {
            ticks.set(ticks.get() + 1);
            Tick::Continue
        });
        scope
    }

    #[test]
    fn test_closing_scope_closes_scopes_its_callbacks_own() {
        let events = EventLoop::new();
        let ticks = Rc::new(Cell::new(0));
        let outer = events.scope();
        let inner = counting_scope(&events, &ticks);
        outer.set_timeout(5_000, move |_| drop(inner));
        assert_eq!(events.pending_timers(), 2);

        outer.close();
        assert_eq!(events.pending_timers(), 0);
        events.advance_to(1_000);
        assert_eq!(ticks.get(), 0);
    }

    #[test]
    fn test_scope_dropped_during_clear_is_closed_next_turn() {
        let events = EventLoop::new();
        let ticks = Rc::new(Cell::new(0));
        let outer = events.scope();
        let inner = counting_scope(&events, &ticks);
        let id = outer.set_timeout(5_000, move |_| drop(inner)).unwrap();

        // The timer's closure, and the scope it owns, drop while the loop is borrowed
        assert!(outer.handle().clear(id));
        events.advance_to(1_000);
        assert_eq!(ticks.get(), 0);
        assert_eq!(events.pending_timers(), 0);
        assert!(events.deferred.borrow().is_empty());
    }
}
